use std::fs;
use std::process;

use vig2p_core::ipa::IpaTable;
use vig2p_core::settings::{self, Settings};
use vig2p_core::SyllableCodec;

macro_rules! die {
    ($result:expr, $($arg:tt)*) => {
        $result.unwrap_or_else(|e| {
            eprintln!($($arg)*, e);
            process::exit(1);
        })
    };
}

pub fn ipa_export() {
    print!("{}", vig2p_core::ipa::default_toml());
}

pub fn ipa_validate(file: &str) {
    let content = die!(fs::read_to_string(file), "Error reading {file}: {}");
    let table = die!(vig2p_core::ipa::parse_ipa_toml(&content), "Error: {}");
    println!(
        "OK: {} initials, {} medials, {} finals, {} tones",
        table.initials().count(),
        table.medials().count(),
        table.finals().count(),
        table.tones().count()
    );
}

pub fn settings_export() {
    print!("{}", settings::default_toml());
}

pub fn settings_validate(file: &str) {
    let content = die!(fs::read_to_string(file), "Error reading {file}: {}");
    let s = die!(settings::parse_settings_toml(&content), "Error: {}");
    println!(
        "OK: batch.suffix={:?}, batch.output_suffix={:?}, batch.jobs={}, text.clean={}",
        s.batch.suffix, s.batch.output_suffix, s.batch.jobs, s.text.clean
    );
}

/// The global codec, rendering with the IPA table at `ipa_file` if given.
pub fn load_codec(ipa_file: Option<&str>) -> &'static SyllableCodec {
    if let Some(file) = ipa_file {
        let content = die!(fs::read_to_string(file), "Error reading {file}: {}");
        die!(IpaTable::init_custom(content), "Error in {file}: {}");
    }
    SyllableCodec::global()
}

/// The global settings, from `settings_file` if given.
pub fn load_settings(settings_file: Option<&str>) -> &'static Settings {
    if let Some(file) = settings_file {
        let content = die!(fs::read_to_string(file), "Error reading {file}: {}");
        die!(settings::init_custom(content), "Error in {file}: {}");
    }
    settings::settings()
}
