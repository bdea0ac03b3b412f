use std::path::PathBuf;
use std::process;

use clap::{Parser, Subcommand};

use vig2p_cli::commands::phonemize_ops::PhonemizeOverrides;
use vig2p_cli::commands::{config_ops, convert_ops, phonemize_ops};
use vig2p_cli::trace_init;

#[derive(Parser)]
#[command(name = "vig2p", about = "Vietnamese grapheme-to-phoneme conversion")]
struct Cli {
    /// Write JSONL traces to DIR/vig2p-trace.jsonl instead of stderr
    #[arg(long, global = true, value_name = "DIR")]
    log_dir: Option<PathBuf>,
    /// Log debug events (RUST_LOG takes precedence)
    #[arg(short, long, global = true)]
    verbose: bool,
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Phonemize every matching text file under a folder
    Phonemize {
        /// Corpus root, searched recursively
        folder: String,
        /// Input file-name suffix (default from settings)
        #[arg(long)]
        suffix: Option<String>,
        /// Mirror outputs into this directory instead of next to the inputs
        #[arg(long)]
        out_dir: Option<PathBuf>,
        /// Number of worker threads (default from settings)
        #[arg(short, long)]
        jobs: Option<usize>,
        /// Seed for the processing order shuffle
        #[arg(long)]
        seed: Option<u64>,
        /// Process files in path order
        #[arg(long)]
        no_shuffle: bool,
        /// Rewrite outputs that already exist
        #[arg(long)]
        overwrite: bool,
        /// Convert the raw text without stripping punctuation and digits
        #[arg(long)]
        no_clean: bool,
        /// Path to a settings TOML file
        #[arg(long)]
        config: Option<String>,
        /// Path to an IPA table TOML file
        #[arg(long)]
        ipa: Option<String>,
    },

    /// Convert text to phonetic form (reads stdin when no text is given)
    Convert {
        /// Text to convert
        text: Vec<String>,
        /// Path to an IPA table TOML file
        #[arg(long)]
        ipa: Option<String>,
    },

    /// Show how a single syllable is segmented and rendered
    Explain {
        syllable: String,
        /// Output as JSON instead of text
        #[arg(long)]
        json: bool,
        /// Path to an IPA table TOML file
        #[arg(long)]
        ipa: Option<String>,
    },

    /// Print the default IPA table TOML
    IpaExport,

    /// Validate an IPA table TOML file
    IpaValidate { file: String },

    /// Print the default settings TOML
    SettingsExport,

    /// Validate a settings TOML file
    SettingsValidate { file: String },
}

fn main() {
    let cli = Cli::parse();

    let _guard = trace_init::init_tracing(cli.log_dir.as_deref(), cli.verbose).unwrap_or_else(|e| {
        eprintln!("Error creating log directory: {e}");
        process::exit(1);
    });

    match cli.command {
        Command::Phonemize {
            folder,
            suffix,
            out_dir,
            jobs,
            seed,
            no_shuffle,
            overwrite,
            no_clean,
            config,
            ipa,
        } => {
            let settings = config_ops::load_settings(config.as_deref());
            let codec = config_ops::load_codec(ipa.as_deref());
            let overrides = PhonemizeOverrides {
                suffix,
                out_dir,
                jobs,
                seed,
                no_shuffle,
                overwrite,
                no_clean,
            };
            phonemize_ops::phonemize(&folder, settings, codec, &overrides);
        }
        Command::Convert { text, ipa } => {
            convert_ops::convert_cmd(config_ops::load_codec(ipa.as_deref()), &text)
        }
        Command::Explain {
            syllable,
            json,
            ipa,
        } => convert_ops::explain_cmd(config_ops::load_codec(ipa.as_deref()), &syllable, json),
        Command::IpaExport => config_ops::ipa_export(),
        Command::IpaValidate { file } => config_ops::ipa_validate(&file),
        Command::SettingsExport => config_ops::settings_export(),
        Command::SettingsValidate { file } => config_ops::settings_validate(&file),
    }
}
