pub mod classify;
pub mod error;
pub mod extract;
pub mod model;
pub mod output;
pub mod scan;

pub use classify::{classify, FileClass};
pub use error::{GrabError, Result};
pub use extract::{extract_seeds, split_seed};
pub use model::{
    Bucket, BucketTotal, GrabReport, OutputSummary, SeedBuckets, SourceFile, SourceSummary,
    REPORT_VERSION,
};
pub use output::write_sorted_seeds;
pub use scan::{
    collect_seeds, discover_sources, run_grab, run_grab_with_callback, Discovery, GrabEvent,
    GrabOptions,
};
