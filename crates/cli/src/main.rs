use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::Parser;
use seed_grabber_core::{run_grab_with_callback, Bucket, GrabEvent, GrabOptions};
use tracing_subscriber::EnvFilter;

const DONE_NOTICE: &str = "Done. Program terminated successfully.";

#[derive(Debug, Parser)]
#[command(
    name = "seed-grabber",
    version,
    about = "Gather winning, losing and unknown seeds from batch result files into sorted lists."
)]
struct Cli {
    /// Directory searched recursively for `*_seeds.txt` files.
    #[arg(long, default_value = ".", value_name = "DIR")]
    root: PathBuf,

    /// Directory the three `*_seeds_list.txt` files are written to.
    #[arg(long, default_value = ".", value_name = "DIR")]
    output_dir: PathBuf,

    /// Optional JSON run report.
    #[arg(long, value_name = "FILE")]
    report: Option<PathBuf>,
}

fn main() -> Result<()> {
    init_tracing();
    let cli = Cli::parse();

    let options = GrabOptions {
        root: cli.root,
        output_dir: cli.output_dir,
    };

    let report = run_grab_with_callback(&options, |event| {
        if let GrabEvent::ReadingSource { bucket, path } = event {
            println!("{}", progress_line(bucket, &path));
        }
    })
    .with_context(|| format!("failed to collect seeds under {}", options.root.display()))?;

    if let Some(path) = cli.report {
        let payload =
            serde_json::to_string_pretty(&report).context("failed to serialize run report")?;
        fs::write(&path, payload)
            .with_context(|| format!("failed to write run report to {}", path.display()))?;
    }

    println!("{DONE_NOTICE}");
    Ok(())
}

fn progress_line(bucket: Bucket, path: &Path) -> String {
    format!(
        "Getting {} seeds from file:  {}",
        bucket.label(),
        path.display()
    )
}

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init();
}
