use std::collections::{BTreeMap, HashMap};

use serde::Deserialize;

use super::IpaTable;
use crate::syllable::inventory::{is_final, is_initial};
use crate::tone::Tone;
use crate::unicode::VowelTable;

#[derive(Deserialize)]
struct IpaConfig {
    initials: BTreeMap<String, String>,
    medials: BTreeMap<String, String>,
    finals: BTreeMap<String, String>,
    tones: BTreeMap<String, String>,
}

#[derive(Debug, thiserror::Error)]
pub enum IpaConfigError {
    #[error("TOML parse error: {0}")]
    Parse(String),
    #[error("[{0}] table is empty")]
    EmptySection(&'static str),
    #[error("empty value for {section}.{key}")]
    EmptyValue { section: &'static str, key: String },
    #[error("whitespace in value for {section}.{key}")]
    WhitespaceValue { section: &'static str, key: String },
    #[error("not an initial consonant: {0}")]
    UnknownInitial(String),
    #[error("not a final consonant: {0}")]
    UnknownFinal(String),
    #[error("medial must be lowercase untoned vowels: {0}")]
    InvalidMedial(String),
    #[error("unknown tone key: {0}")]
    UnknownTone(String),
    #[error("IPA table already initialized")]
    AlreadyInitialized,
}

/// Parse and validate an IPA table from TOML.
pub fn parse_ipa_toml(toml_str: &str) -> Result<IpaTable, IpaConfigError> {
    let config: IpaConfig =
        toml::from_str(toml_str).map_err(|e| IpaConfigError::Parse(e.to_string()))?;

    check_section("initials", &config.initials)?;
    check_section("medials", &config.medials)?;
    check_section("finals", &config.finals)?;
    check_section("tones", &config.tones)?;

    if let Some(key) = config.initials.keys().find(|k| !is_initial(k)) {
        return Err(IpaConfigError::UnknownInitial(key.clone()));
    }
    if let Some(key) = config.finals.keys().find(|k| !is_final(k)) {
        return Err(IpaConfigError::UnknownFinal(key.clone()));
    }

    let vowels = VowelTable::global();
    let untoned_vowel = |c: char| c.is_lowercase() && vowels.analyse(c) == Some((c, Tone::Level));
    if let Some(key) = config.medials.keys().find(|k| !k.chars().all(untoned_vowel)) {
        return Err(IpaConfigError::InvalidMedial(key.clone()));
    }

    let mut tones = HashMap::with_capacity(config.tones.len());
    for (key, digit) in config.tones {
        let tone = Tone::from_key(&key).ok_or(IpaConfigError::UnknownTone(key))?;
        tones.insert(tone, digit);
    }

    Ok(IpaTable {
        initials: config.initials.into_iter().collect(),
        medials: config.medials.into_iter().collect(),
        finals: config.finals.into_iter().collect(),
        tones,
    })
}

fn check_section(
    section: &'static str,
    map: &BTreeMap<String, String>,
) -> Result<(), IpaConfigError> {
    if map.is_empty() {
        return Err(IpaConfigError::EmptySection(section));
    }
    if let Some((key, _)) = map.iter().find(|(_, v)| v.is_empty()) {
        return Err(IpaConfigError::EmptyValue {
            section,
            key: key.clone(),
        });
    }
    // Each rendered syllable must stay a single output token.
    if let Some((key, _)) = map.iter().find(|(_, v)| v.contains(char::is_whitespace)) {
        return Err(IpaConfigError::WhitespaceValue {
            section,
            key: key.clone(),
        });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    const MINIMAL: &str = r#"
[initials]
t = "t"

[medials]
a = "a"

[finals]
ng = "ŋ"

[tones]
sac = "3"
"#;

    #[test]
    fn parse_minimal_toml() {
        let table = parse_ipa_toml(MINIMAL).unwrap();
        assert_eq!(table.initial("t"), Some("t"));
        assert_eq!(table.medial("a"), Some("a"));
        assert_eq!(table.final_("ng"), Some("ŋ"));
        assert_eq!(table.tone_digit(Tone::HighRising), Some("3"));
        assert_eq!(table.tone_digit(Tone::Level), None);
    }

    #[test]
    fn parse_default_toml() {
        let table = parse_ipa_toml(super::super::table::DEFAULT_TOML).unwrap();
        assert_eq!(table.initials().count(), 25);
        assert_eq!(table.finals().count(), 8);
        assert_eq!(table.tones().count(), 6);
        assert!(table.medials().count() > 40);
    }

    #[test]
    fn error_empty_section() {
        let toml = MINIMAL.replace("ng = \"ŋ\"", "");
        let err = parse_ipa_toml(&toml).unwrap_err();
        assert!(matches!(err, IpaConfigError::EmptySection("finals")));
    }

    #[test]
    fn error_empty_value() {
        let toml = MINIMAL.replace("t = \"t\"", "t = \"\"");
        let err = parse_ipa_toml(&toml).unwrap_err();
        assert!(err.to_string().contains("initials.t"));
    }

    #[test]
    fn error_whitespace_value() {
        let toml = MINIMAL.replace("t = \"t\"", "t = \"t h\"");
        let err = parse_ipa_toml(&toml).unwrap_err();
        assert!(matches!(
            err,
            IpaConfigError::WhitespaceValue { section: "initials", ref key } if key == "t"
        ));

        let toml = MINIMAL.replace("sac = \"3\"", "sac = \"3\\n\"");
        let err = parse_ipa_toml(&toml).unwrap_err();
        assert!(err.to_string().contains("tones.sac"));
    }

    #[test]
    fn error_unknown_initial() {
        let toml = MINIMAL.replace("t = \"t\"", "zz = \"z\"");
        let err = parse_ipa_toml(&toml).unwrap_err();
        assert!(matches!(err, IpaConfigError::UnknownInitial(ref k) if k == "zz"));
    }

    #[test]
    fn error_unknown_final() {
        let toml = MINIMAL.replace("ng = \"ŋ\"", "k = \"k\"");
        let err = parse_ipa_toml(&toml).unwrap_err();
        assert!(matches!(err, IpaConfigError::UnknownFinal(ref k) if k == "k"));
    }

    #[test]
    fn error_toned_medial() {
        let toml = MINIMAL.replace("a = \"a\"", "\"á\" = \"a\"");
        let err = parse_ipa_toml(&toml).unwrap_err();
        assert!(matches!(err, IpaConfigError::InvalidMedial(_)));
    }

    #[test]
    fn error_consonant_in_medial() {
        let toml = MINIMAL.replace("a = \"a\"", "an = \"an\"");
        let err = parse_ipa_toml(&toml).unwrap_err();
        assert!(matches!(err, IpaConfigError::InvalidMedial(_)));
    }

    #[test]
    fn error_unknown_tone() {
        let toml = MINIMAL.replace("sac = \"3\"", "rising = \"3\"");
        let err = parse_ipa_toml(&toml).unwrap_err();
        assert!(matches!(err, IpaConfigError::UnknownTone(ref k) if k == "rising"));
    }

    #[test]
    fn error_missing_section() {
        let err = parse_ipa_toml("[initials]\nt = \"t\"\n").unwrap_err();
        assert!(matches!(err, IpaConfigError::Parse(_)));
    }

    #[test]
    fn error_invalid_toml() {
        let err = parse_ipa_toml("not valid toml {{{").unwrap_err();
        assert!(matches!(err, IpaConfigError::Parse(_)));
    }
}
