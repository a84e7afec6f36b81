use std::path::PathBuf;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum GrabError {
    #[error("I/O error on '{path}': {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("malformed line {line_number} in '{path}': expected a seed followed by more fields, got {line:?}")]
    MalformedLine {
        path: PathBuf,
        line_number: usize,
        line: String,
    },

    #[error("search root '{path}' is not a directory")]
    RootNotDirectory { path: PathBuf },
}

impl GrabError {
    pub(crate) fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }
}

pub type Result<T> = std::result::Result<T, GrabError>;
