use std::fs::File;
use std::io::{self, BufRead, BufReader};
use std::path::Path;

use crate::error::{GrabError, Result};

/// Appends the leading token of every line in `path` to `seeds`.
///
/// Lines end at `\n`, `\r\n` or a lone `\r`. Each line must hold a seed
/// followed by at least one more field; the first offending line aborts the
/// read. Returns the number of seeds added.
pub fn extract_seeds(path: &Path, seeds: &mut Vec<String>) -> Result<usize> {
    let file = File::open(path).map_err(|err| GrabError::io(path, err))?;
    let reader = BufReader::new(file);

    let mut added = 0_usize;
    let mut line_number = 0_usize;
    for chunk in reader.split(b'\n') {
        let chunk = chunk.map_err(|err| GrabError::io(path, err))?;
        let text = String::from_utf8(chunk).map_err(|err| {
            GrabError::io(path, io::Error::new(io::ErrorKind::InvalidData, err))
        })?;
        let text = text.strip_suffix('\r').unwrap_or(&text);

        for line in text.split('\r') {
            line_number += 1;
            let Some((seed, _rest)) = split_seed(line) else {
                return Err(GrabError::MalformedLine {
                    path: path.to_path_buf(),
                    line_number,
                    line: line.to_string(),
                });
            };
            seeds.push(seed.to_string());
            added += 1;
        }
    }

    Ok(added)
}

/// Splits a line at the first run of whitespace into (seed, remainder).
///
/// `None` when there is no non-blank remainder after the seed.
pub fn split_seed(line: &str) -> Option<(&str, &str)> {
    let line = line.trim_start();
    let end = line.find(char::is_whitespace)?;
    let (seed, rest) = line.split_at(end);
    let rest = rest.trim_start();
    if rest.is_empty() {
        return None;
    }
    Some((seed, rest))
}
