use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use crate::error::{GrabError, Result};

/// Sorts `seeds` and writes them to `output_path`, one per line.
///
/// The file is created or truncated. Returns the number of lines written.
pub fn write_sorted_seeds(seeds: &mut [String], output_path: &Path) -> Result<usize> {
    seeds.sort();

    let file = File::create(output_path).map_err(|err| GrabError::io(output_path, err))?;
    let mut writer = BufWriter::new(file);
    for seed in seeds.iter() {
        writeln!(writer, "{seed}").map_err(|err| GrabError::io(output_path, err))?;
    }
    writer
        .flush()
        .map_err(|err| GrabError::io(output_path, err))?;

    Ok(seeds.len())
}
