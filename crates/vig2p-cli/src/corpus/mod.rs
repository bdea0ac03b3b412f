//! Corpus discovery and the parallel batch phonemizer.
//!
//! Every input file maps to exactly one output file, so shards never
//! contend for a path. A failing file is logged and counted; it never
//! stops the batch.


use std::fs;
use std::io;
use std::ops::AddAssign;
use std::path::{Path, PathBuf};
use std::thread;

use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::SeedableRng;
use serde::Serialize;
use tracing::{debug, info, warn};
use walkdir::WalkDir;

use vig2p_core::settings::Settings;
use vig2p_core::text::clean_text;
use vig2p_core::SyllableCodec;

#[derive(Debug, thiserror::Error)]
pub enum CorpusError {
    #[error("not a directory: {}", .0.display())]
    NotADirectory(PathBuf),

    #[error("walk error: {0}")]
    Walk(#[from] walkdir::Error),

    #[error("error reading {}: {source}", .path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("error writing {}: {source}", .path.display())]
    Write {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

#[derive(Debug, Clone)]
pub struct BatchOptions {
    pub suffix: String,
    pub output_suffix: String,
    /// Mirror the input tree here instead of writing next to each input.
    pub out_dir: Option<PathBuf>,
    pub shuffle: bool,
    /// Fixed shuffle seed; `None` seeds from the OS.
    pub seed: Option<u64>,
    pub skip_existing: bool,
    pub clean: bool,
    pub jobs: usize,
}

impl BatchOptions {
    pub fn from_settings(settings: &Settings) -> Self {
        Self {
            suffix: settings.batch.suffix.clone(),
            output_suffix: settings.batch.output_suffix.clone(),
            out_dir: None,
            shuffle: settings.batch.shuffle,
            seed: None,
            skip_existing: settings.batch.skip_existing,
            clean: settings.text.clean,
            jobs: settings.batch.jobs,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CorpusJob {
    pub input: PathBuf,
    pub output: PathBuf,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct BatchSummary {
    pub processed: usize,
    pub skipped: usize,
    pub failed: usize,
}

impl BatchSummary {
    pub fn total(&self) -> usize {
        self.processed + self.skipped + self.failed
    }
}

impl AddAssign for BatchSummary {
    fn add_assign(&mut self, rhs: Self) {
        self.processed += rhs.processed;
        self.skipped += rhs.skipped;
        self.failed += rhs.failed;
    }
}

/// Regular files under `root` whose name ends with `suffix`, sorted by path.
/// Files ending with `output_suffix` are earlier outputs and are left out.
pub fn discover(
    root: &Path,
    suffix: &str,
    output_suffix: &str,
) -> Result<Vec<PathBuf>, CorpusError> {
    if !root.is_dir() {
        return Err(CorpusError::NotADirectory(root.to_path_buf()));
    }

    let mut files = Vec::new();
    for entry in WalkDir::new(root) {
        let entry = entry?;
        if !entry.file_type().is_file() {
            continue;
        }
        let wanted = {
            let name = entry.file_name().to_string_lossy();
            name.ends_with(suffix) && !name.ends_with(output_suffix)
        };
        if wanted {
            files.push(entry.into_path());
        }
    }
    files.sort();
    Ok(files)
}

/// Where the phonetic form of `input` is written.
pub fn output_path(
    root: &Path,
    input: &Path,
    out_dir: Option<&Path>,
    suffix: &str,
    output_suffix: &str,
) -> PathBuf {
    let name = input
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_default();
    let stem = name.strip_suffix(suffix).unwrap_or(name.as_str());
    let file_name = format!("{stem}{output_suffix}");

    match out_dir {
        Some(dir) => {
            let relative = input
                .parent()
                .and_then(|p| p.strip_prefix(root).ok())
                .unwrap_or_else(|| Path::new(""));
            dir.join(relative).join(file_name)
        }
        None => input.with_file_name(file_name),
    }
}

/// Discover inputs under `root` and pair each with its output path.
pub fn plan(root: &Path, options: &BatchOptions) -> Result<Vec<CorpusJob>, CorpusError> {
    let mut inputs = discover(root, &options.suffix, &options.output_suffix)?;

    if options.shuffle {
        let mut rng = match options.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_os_rng(),
        };
        inputs.shuffle(&mut rng);
    }

    let jobs = inputs
        .into_iter()
        .map(|input| {
            let output = output_path(
                root,
                &input,
                options.out_dir.as_deref(),
                &options.suffix,
                &options.output_suffix,
            );
            CorpusJob { input, output }
        })
        .collect();
    Ok(jobs)
}

enum Outcome {
    Processed,
    Skipped,
}

/// Phonemize every job, round-robin across `options.jobs` worker threads.
pub fn run(jobs: &[CorpusJob], codec: &SyllableCodec, options: &BatchOptions) -> BatchSummary {
    let workers = options.jobs.clamp(1, jobs.len().max(1));
    info!(files = jobs.len(), workers, "starting batch");

    let summary = if workers == 1 {
        run_shard(jobs.iter(), codec, options)
    } else {
        thread::scope(|scope| {
            let mut summary = BatchSummary::default();
            let mut handles = Vec::with_capacity(workers);

            for w in 0..workers {
                let shard =
                    move || run_shard(jobs.iter().skip(w).step_by(workers), codec, options);
                match thread::Builder::new()
                    .name(format!("vig2p-worker-{w}"))
                    .spawn_scoped(scope, shard)
                {
                    Ok(handle) => handles.push(handle),
                    Err(e) => {
                        warn!(worker = w, error = %e, "failed to spawn worker, running shard inline");
                        summary += shard();
                    }
                }
            }

            for handle in handles {
                match handle.join() {
                    Ok(part) => summary += part,
                    Err(payload) => std::panic::resume_unwind(payload),
                }
            }
            summary
        })
    };

    info!(
        processed = summary.processed,
        skipped = summary.skipped,
        failed = summary.failed,
        "batch finished"
    );
    summary
}

fn run_shard<'a>(
    shard: impl Iterator<Item = &'a CorpusJob>,
    codec: &SyllableCodec,
    options: &BatchOptions,
) -> BatchSummary {
    let mut summary = BatchSummary::default();
    for job in shard {
        match process_one(job, codec, options) {
            Ok(Outcome::Processed) => summary.processed += 1,
            Ok(Outcome::Skipped) => summary.skipped += 1,
            Err(e) => {
                warn!(path = %job.input.display(), error = %e, "failed to phonemize file");
                summary.failed += 1;
            }
        }
    }
    summary
}

fn process_one(
    job: &CorpusJob,
    codec: &SyllableCodec,
    options: &BatchOptions,
) -> Result<Outcome, CorpusError> {
    if options.skip_existing && job.output.exists() {
        debug!(path = %job.output.display(), "output exists, skipping");
        return Ok(Outcome::Skipped);
    }

    let raw = fs::read_to_string(&job.input).map_err(|source| CorpusError::Read {
        path: job.input.clone(),
        source,
    })?;
    let phonetic = if options.clean {
        codec.to_phonetic(&clean_text(&raw))
    } else {
        codec.to_phonetic(&raw)
    };

    let write_err = |source| CorpusError::Write {
        path: job.output.clone(),
        source,
    };
    if let Some(parent) = job.output.parent() {
        fs::create_dir_all(parent).map_err(write_err)?;
    }
    fs::write(&job.output, phonetic).map_err(write_err)?;

    debug!(input = %job.input.display(), output = %job.output.display(), "phonemized");
    Ok(Outcome::Processed)
}
