use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use std::time::Instant;

use chrono::{SecondsFormat, Utc};
use tracing::{debug, info, warn};
use walkdir::WalkDir;

use crate::classify::classify;
use crate::error::{GrabError, Result};
use crate::extract::extract_seeds;
use crate::model::{
    Bucket, BucketTotal, GrabReport, OutputSummary, SeedBuckets, SourceFile, SourceSummary,
    REPORT_VERSION,
};
use crate::output::write_sorted_seeds;

#[derive(Debug, Clone)]
pub struct GrabOptions {
    pub root: PathBuf,
    pub output_dir: PathBuf,
}

impl Default for GrabOptions {
    fn default() -> Self {
        Self {
            root: PathBuf::from("."),
            output_dir: PathBuf::from("."),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum GrabEvent {
    ReadingSource { bucket: Bucket, path: PathBuf },
    WroteOutput {
        bucket: Bucket,
        path: PathBuf,
        seeds: usize,
    },
}

#[derive(Debug)]
pub struct Discovery {
    pub sources: Vec<SourceFile>,
    pub warnings: Vec<String>,
}

/// Walks `root` recursively and returns every file whose name carries a
/// bucket suffix, in file-name order per directory.
///
/// Unreadable directories below the root are skipped and reported as
/// warnings; an unreadable entry named like a source is an `Io` error.
pub fn discover_sources(root: &Path) -> Result<Discovery> {
    let metadata = fs::metadata(root).map_err(|err| GrabError::io(root, err))?;
    if !metadata.is_dir() {
        return Err(GrabError::RootNotDirectory {
            path: root.to_path_buf(),
        });
    }

    let mut sources = Vec::new();
    let mut warnings = Vec::new();
    let walker = WalkDir::new(root).follow_links(true).sort_by_file_name();

    for item in walker {
        let entry = match item {
            Ok(entry) => entry,
            Err(err) => {
                if let Some(path) = unreadable_source(&err) {
                    let message = err.to_string();
                    let source = err
                        .into_io_error()
                        .unwrap_or_else(|| io::Error::new(io::ErrorKind::Other, message));
                    return Err(GrabError::io(path, source));
                }
                warn!("skipping unreadable entry under {}: {}", root.display(), err);
                warnings.push(format!("walk error under {}: {}", root.display(), err));
                continue;
            }
        };
        if entry.depth() == 0 || !entry.file_type().is_file() {
            continue;
        }
        if let Some(bucket) = classify(entry.path()).bucket() {
            sources.push(SourceFile {
                bucket,
                path: entry.into_path(),
            });
        }
    }

    Ok(Discovery { sources, warnings })
}

/// Path of a walk error that hit a would-be source file, such as a dangling
/// link named `*_winning_seeds.txt`. Directories and link loops stay warnings.
fn unreadable_source(err: &walkdir::Error) -> Option<PathBuf> {
    if err.loop_ancestor().is_some() {
        return None;
    }
    let path = err.path()?;
    if classify(path).bucket().is_none() {
        return None;
    }
    let is_dir = fs::metadata(path).is_ok_and(|metadata| metadata.is_dir());
    (!is_dir).then(|| path.to_path_buf())
}

/// Reads every source into a fresh set of buckets.
pub fn collect_seeds<F>(sources: &[SourceFile], on_source: F) -> Result<SeedBuckets>
where
    F: FnMut(&SourceFile),
{
    collect(sources, on_source).map(|(buckets, _)| buckets)
}

fn collect<F>(sources: &[SourceFile], mut on_source: F) -> Result<(SeedBuckets, Vec<usize>)>
where
    F: FnMut(&SourceFile),
{
    let mut buckets = SeedBuckets::new();
    let mut counts = Vec::with_capacity(sources.len());

    for source in sources {
        on_source(source);
        let added = extract_seeds(&source.path, buckets.get_mut(source.bucket))?;
        debug!(
            "read {} {} seed(s) from {}",
            added,
            source.bucket.label(),
            source.path.display()
        );
        counts.push(added);
    }

    Ok((buckets, counts))
}

pub fn run_grab(options: &GrabOptions) -> Result<GrabReport> {
    run_grab_with_callback(options, |_| {})
}

/// Discovers, reads, sorts and writes all three buckets.
///
/// Every source is read before any output is touched, so a malformed line
/// leaves existing list files as they were.
pub fn run_grab_with_callback<F>(options: &GrabOptions, mut on_event: F) -> Result<GrabReport>
where
    F: FnMut(GrabEvent),
{
    let started = Instant::now();
    info!("collecting seeds under {}", options.root.display());

    let Discovery { sources, warnings } = discover_sources(&options.root)?;
    let (mut buckets, counts) = collect(&sources, |source| {
        on_event(GrabEvent::ReadingSource {
            bucket: source.bucket,
            path: source.path.clone(),
        })
    })?;

    let mut outputs = Vec::with_capacity(Bucket::ALL.len());
    for bucket in Bucket::ALL {
        let path = options.output_dir.join(bucket.output_file_name());
        let seeds = write_sorted_seeds(buckets.get_mut(bucket), &path)?;
        info!("wrote {} {} seed(s) to {}", seeds, bucket.label(), path.display());
        on_event(GrabEvent::WroteOutput {
            bucket,
            path: path.clone(),
            seeds,
        });
        outputs.push(OutputSummary {
            bucket,
            path: path.to_string_lossy().to_string(),
            seeds: seeds as u64,
        });
    }

    let totals = Bucket::ALL
        .iter()
        .map(|bucket| BucketTotal {
            bucket: *bucket,
            source_files: sources
                .iter()
                .filter(|source| source.bucket == *bucket)
                .count() as u64,
            seeds: buckets.len(*bucket) as u64,
        })
        .collect();

    let sources = sources
        .iter()
        .zip(counts)
        .map(|(source, seeds)| SourceSummary {
            bucket: source.bucket,
            path: source.path.to_string_lossy().to_string(),
            seeds: seeds as u64,
        })
        .collect();

    Ok(GrabReport {
        report_version: REPORT_VERSION.to_string(),
        generated_at: Utc::now().to_rfc3339_opts(SecondsFormat::Secs, true),
        root: options.root.to_string_lossy().to_string(),
        output_dir: options.output_dir.to_string_lossy().to_string(),
        sources,
        outputs,
        totals,
        elapsed_ms: started.elapsed().as_millis().try_into().unwrap_or(u64::MAX),
        warnings,
    })
}
