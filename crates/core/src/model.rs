use std::path::PathBuf;

use serde::Serialize;

pub const REPORT_VERSION: &str = "1.0.0";

#[derive(Debug, Clone, Copy, Serialize, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[serde(rename_all = "snake_case")]
pub enum Bucket {
    Winning,
    Losing,
    Unknown,
}

impl Bucket {
    pub const ALL: [Bucket; 3] = [Bucket::Winning, Bucket::Losing, Bucket::Unknown];

    /// File name ending that routes a source file into this bucket.
    pub fn source_suffix(self) -> &'static str {
        match self {
            Bucket::Winning => "winning_seeds.txt",
            Bucket::Losing => "losing_seeds.txt",
            Bucket::Unknown => "unknown_seeds.txt",
        }
    }

    pub fn output_file_name(self) -> &'static str {
        match self {
            Bucket::Winning => "winning_seeds_list.txt",
            Bucket::Losing => "losing_seeds_list.txt",
            Bucket::Unknown => "unknown_seeds_list.txt",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Bucket::Winning => "winning",
            Bucket::Losing => "losing",
            Bucket::Unknown => "unknown",
        }
    }
}

/// Seed tokens per bucket, kept in the order they were read.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SeedBuckets {
    winning: Vec<String>,
    losing: Vec<String>,
    unknown: Vec<String>,
}

impl SeedBuckets {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, bucket: Bucket) -> &[String] {
        match bucket {
            Bucket::Winning => &self.winning,
            Bucket::Losing => &self.losing,
            Bucket::Unknown => &self.unknown,
        }
    }

    pub fn get_mut(&mut self, bucket: Bucket) -> &mut Vec<String> {
        match bucket {
            Bucket::Winning => &mut self.winning,
            Bucket::Losing => &mut self.losing,
            Bucket::Unknown => &mut self.unknown,
        }
    }

    pub fn len(&self, bucket: Bucket) -> usize {
        self.get(bucket).len()
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceFile {
    pub bucket: Bucket,
    pub path: PathBuf,
}

#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct GrabReport {
    pub report_version: String,
    pub generated_at: String,
    pub root: String,
    pub output_dir: String,
    pub sources: Vec<SourceSummary>,
    pub outputs: Vec<OutputSummary>,
    pub totals: Vec<BucketTotal>,
    pub elapsed_ms: u64,
    pub warnings: Vec<String>,
}

#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct SourceSummary {
    pub bucket: Bucket,
    pub path: String,
    pub seeds: u64,
}

#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct OutputSummary {
    pub bucket: Bucket,
    pub path: String,
    pub seeds: u64,
}

#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct BucketTotal {
    pub bucket: Bucket,
    pub source_files: u64,
    pub seeds: u64,
}
