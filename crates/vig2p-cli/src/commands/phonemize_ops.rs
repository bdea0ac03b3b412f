use std::path::{Path, PathBuf};
use std::process;
use std::time::Instant;

use vig2p_core::settings::{Settings, SettingsError};
use vig2p_core::SyllableCodec;

use crate::corpus::{self, BatchOptions};

macro_rules! die {
    ($result:expr, $($arg:tt)*) => {
        $result.unwrap_or_else(|e| {
            eprintln!($($arg)*, e);
            process::exit(1);
        })
    };
}

/// Command-line overrides on top of the `[batch]` / `[text]` settings.
#[derive(Debug, Default)]
pub struct PhonemizeOverrides {
    pub suffix: Option<String>,
    pub out_dir: Option<PathBuf>,
    pub jobs: Option<usize>,
    pub seed: Option<u64>,
    pub no_shuffle: bool,
    pub overwrite: bool,
    pub no_clean: bool,
}

impl PhonemizeOverrides {
    pub fn apply(&self, mut options: BatchOptions) -> Result<BatchOptions, SettingsError> {
        if let Some(suffix) = &self.suffix {
            if suffix.is_empty() {
                return Err(invalid("--suffix", "must not be empty"));
            }
            if *suffix == options.output_suffix {
                return Err(invalid("--suffix", "must differ from batch.output_suffix"));
            }
            options.suffix = suffix.clone();
        }
        if let Some(jobs) = self.jobs {
            if jobs == 0 {
                return Err(invalid("--jobs", "must be positive"));
            }
            options.jobs = jobs;
        }
        if self.out_dir.is_some() {
            options.out_dir = self.out_dir.clone();
        }
        if self.seed.is_some() {
            options.seed = self.seed;
        }
        options.shuffle &= !self.no_shuffle;
        options.skip_existing &= !self.overwrite;
        options.clean &= !self.no_clean;
        Ok(options)
    }
}

fn invalid(field: &str, reason: &str) -> SettingsError {
    SettingsError::InvalidValue {
        field: field.to_string(),
        reason: reason.to_string(),
    }
}

pub fn phonemize(
    folder: &str,
    settings: &Settings,
    codec: &SyllableCodec,
    overrides: &PhonemizeOverrides,
) {
    let options = die!(
        overrides.apply(BatchOptions::from_settings(settings)),
        "Error: {}"
    );
    let jobs = die!(corpus::plan(Path::new(folder), &options), "Error: {}");

    let started = Instant::now();
    let summary = corpus::run(&jobs, codec, &options);
    println!(
        "{} files: {} processed, {} skipped, {} failed ({:.2}s)",
        summary.total(),
        summary.processed,
        summary.skipped,
        summary.failed,
        started.elapsed().as_secs_f64()
    );
}

#[cfg(test)]
mod tests {
    use super::*;

    fn base() -> BatchOptions {
        BatchOptions {
            suffix: ".txt".to_string(),
            output_suffix: ".phn.txt".to_string(),
            out_dir: None,
            shuffle: true,
            seed: None,
            skip_existing: true,
            clean: true,
            jobs: 1,
        }
    }

    #[test]
    fn no_overrides_keeps_settings() {
        let opts = PhonemizeOverrides::default().apply(base()).unwrap();
        assert_eq!(opts.suffix, ".txt");
        assert!(opts.shuffle && opts.skip_existing && opts.clean);
        assert_eq!(opts.jobs, 1);
    }

    #[test]
    fn flags_override_settings() {
        let overrides = PhonemizeOverrides {
            suffix: Some(".normalized.txt".to_string()),
            out_dir: Some(PathBuf::from("/out")),
            jobs: Some(4),
            seed: Some(42),
            no_shuffle: true,
            overwrite: true,
            no_clean: true,
        };
        let opts = overrides.apply(base()).unwrap();
        assert_eq!(opts.suffix, ".normalized.txt");
        assert_eq!(opts.out_dir.as_deref(), Some(Path::new("/out")));
        assert_eq!(opts.jobs, 4);
        assert_eq!(opts.seed, Some(42));
        assert!(!opts.shuffle && !opts.skip_existing && !opts.clean);
    }

    #[test]
    fn rejects_zero_jobs() {
        let overrides = PhonemizeOverrides {
            jobs: Some(0),
            ..Default::default()
        };
        let err = overrides.apply(base()).unwrap_err();
        assert!(err.to_string().contains("--jobs"));
    }

    #[test]
    fn rejects_suffix_equal_to_output_suffix() {
        let overrides = PhonemizeOverrides {
            suffix: Some(".phn.txt".to_string()),
            ..Default::default()
        };
        assert!(overrides.apply(base()).is_err());
    }
}
