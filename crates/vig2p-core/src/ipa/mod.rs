//! IPA-like rendering tables.
//!
//! Loaded from TOML. The defaults are embedded; a custom table can be set
//! with [`IpaTable::init_custom`] before the first [`IpaTable::global`] call.
//! Lookups return `None` on a miss and leave the fallback to the caller.

mod config;
mod table;

use std::collections::HashMap;
use std::sync::OnceLock;

pub use config::{parse_ipa_toml, IpaConfigError};

use crate::tone::Tone;

static CUSTOM_TOML: OnceLock<String> = OnceLock::new();

#[derive(Debug, Clone)]
pub struct IpaTable {
    initials: HashMap<String, String>,
    medials: HashMap<String, String>,
    finals: HashMap<String, String>,
    tones: HashMap<Tone, String>,
}

impl IpaTable {
    /// Set custom TOML before first `global()` call.
    pub fn init_custom(toml_content: String) -> Result<(), IpaConfigError> {
        // Validate eagerly
        parse_ipa_toml(&toml_content)?;
        CUSTOM_TOML
            .set(toml_content)
            .map_err(|_| IpaConfigError::AlreadyInitialized)
    }

    /// Get or initialize the global singleton.
    pub fn global() -> &'static IpaTable {
        static INSTANCE: OnceLock<IpaTable> = OnceLock::new();
        INSTANCE.get_or_init(|| {
            let toml_str = CUSTOM_TOML
                .get()
                .map(|s| s.as_str())
                .unwrap_or(table::DEFAULT_TOML);
            parse_ipa_toml(toml_str).expect("IPA TOML must be valid")
        })
    }

    /// The embedded default table.
    pub fn builtin() -> IpaTable {
        parse_ipa_toml(table::DEFAULT_TOML).expect("embedded IPA TOML must be valid")
    }

    pub fn initial(&self, initial: &str) -> Option<&str> {
        self.initials.get(initial).map(String::as_str)
    }

    /// Look up a tone-stripped nucleus.
    pub fn medial(&self, medial: &str) -> Option<&str> {
        self.medials.get(medial).map(String::as_str)
    }

    pub fn final_(&self, final_: &str) -> Option<&str> {
        self.finals.get(final_).map(String::as_str)
    }

    pub fn tone_digit(&self, tone: Tone) -> Option<&str> {
        self.tones.get(&tone).map(String::as_str)
    }

    pub fn initials(&self) -> impl Iterator<Item = (&str, &str)> {
        self.initials.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    pub fn medials(&self) -> impl Iterator<Item = (&str, &str)> {
        self.medials.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    pub fn finals(&self) -> impl Iterator<Item = (&str, &str)> {
        self.finals.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    pub fn tones(&self) -> impl Iterator<Item = (Tone, &str)> {
        self.tones.iter().map(|(t, v)| (*t, v.as_str()))
    }
}

/// Returns the embedded default IPA TOML content.
pub fn default_toml() -> &'static str {
    table::DEFAULT_TOML
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builtin_initials() {
        let table = IpaTable::builtin();
        assert_eq!(table.initial("ngh"), Some("ŋ"));
        assert_eq!(table.initial("đ"), Some("d"));
        assert_eq!(table.initial("th"), Some("tʰ"));
        assert_eq!(table.initial("qu"), Some("kw"));
        assert_eq!(table.initial("c"), None);
    }

    #[test]
    fn builtin_medials_cover_compounds() {
        let table = IpaTable::builtin();
        assert_eq!(table.medial("iê"), Some("iə"));
        assert_eq!(table.medial("ưa"), Some("ɯə"));
        assert_eq!(table.medial("ươi"), Some("ɯəj"));
        assert_eq!(table.medial("ơ"), Some("əː"));
        assert_eq!(table.medial("aa"), None);
    }

    #[test]
    fn builtin_tone_digits_match_defaults() {
        let table = IpaTable::builtin();
        for tone in Tone::ALL {
            let expected = tone.default_digit().to_string();
            assert_eq!(table.tone_digit(tone), Some(expected.as_str()));
        }
    }

    #[test]
    fn every_inventory_member_has_an_entry() {
        use crate::syllable::inventory::{BASE_VOWELS, COMPOUND_MEDIALS, FINALS, INITIALS};
        let table = IpaTable::builtin();
        for i in INITIALS {
            assert!(table.initial(i).is_some(), "missing initial {i}");
        }
        for f in FINALS {
            assert!(table.final_(f).is_some(), "missing final {f}");
        }
        for v in BASE_VOWELS {
            assert!(table.medial(&v.to_string()).is_some(), "missing vowel {v}");
        }
        for m in COMPOUND_MEDIALS {
            assert!(table.medial(m).is_some(), "missing medial {m}");
        }
    }

    #[test]
    fn global_is_builtin_without_custom() {
        assert_eq!(IpaTable::global().medial("uô"), Some("uə"));
    }
}
