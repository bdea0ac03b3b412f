//! Batch settings loaded from TOML, following the same OnceLock pattern as the IPA table.
//!
//! - `init_custom(toml_content)` sets a custom TOML before first `settings()` call
//! - `settings()` returns `&'static Settings` (lazy-init singleton)
//! - Default values are embedded via `include_str!("default_settings.toml")`

use std::sync::OnceLock;

use serde::Deserialize;

pub const DEFAULT_SETTINGS_TOML: &str = include_str!("default_settings.toml");

static CUSTOM_TOML: OnceLock<String> = OnceLock::new();

/// Set custom TOML before first `settings()` call.
pub fn init_custom(toml_content: String) -> Result<(), SettingsError> {
    parse_settings_toml(&toml_content)?;
    CUSTOM_TOML
        .set(toml_content)
        .map_err(|_| SettingsError::AlreadyInitialized)
}

/// Get or initialize the global settings singleton.
pub fn settings() -> &'static Settings {
    static INSTANCE: OnceLock<Settings> = OnceLock::new();
    INSTANCE.get_or_init(|| {
        let toml_str = CUSTOM_TOML
            .get()
            .map(|s| s.as_str())
            .unwrap_or(DEFAULT_SETTINGS_TOML);
        parse_settings_toml(toml_str).expect("settings TOML must be valid")
    })
}

/// Returns the embedded default settings TOML content.
pub fn default_toml() -> &'static str {
    DEFAULT_SETTINGS_TOML
}

#[derive(Debug, thiserror::Error)]
pub enum SettingsError {
    #[error("TOML parse error: {0}")]
    Parse(String),
    #[error("invalid value for {field}: {reason}")]
    InvalidValue { field: String, reason: String },
    #[error("settings already initialized")]
    AlreadyInitialized,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Settings {
    pub batch: BatchSettings,
    pub text: TextSettings,
}

#[derive(Debug, Clone, Deserialize)]
pub struct BatchSettings {
    pub suffix: String,
    pub output_suffix: String,
    pub shuffle: bool,
    pub skip_existing: bool,
    pub jobs: usize,
}

#[derive(Debug, Clone, Deserialize)]
pub struct TextSettings {
    pub clean: bool,
}

pub fn parse_settings_toml(toml_str: &str) -> Result<Settings, SettingsError> {
    let s: Settings = toml::from_str(toml_str).map_err(|e| SettingsError::Parse(e.to_string()))?;
    validate(&s)?;
    Ok(s)
}

fn validate(s: &Settings) -> Result<(), SettingsError> {
    macro_rules! check_non_empty {
        ($section:ident . $field:ident) => {
            if s.$section.$field.is_empty() {
                return Err(SettingsError::InvalidValue {
                    field: concat!(stringify!($section), ".", stringify!($field)).to_string(),
                    reason: "must not be empty".to_string(),
                });
            }
        };
    }

    check_non_empty!(batch.suffix);
    check_non_empty!(batch.output_suffix);

    if s.batch.suffix == s.batch.output_suffix {
        return Err(SettingsError::InvalidValue {
            field: "batch.output_suffix".to_string(),
            reason: "must differ from batch.suffix".to_string(),
        });
    }
    if s.batch.jobs == 0 {
        return Err(SettingsError::InvalidValue {
            field: "batch.jobs".to_string(),
            reason: "must be positive".to_string(),
        });
    }

    Ok(())
}
