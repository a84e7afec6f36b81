use std::path::Path;

use crate::model::Bucket;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FileClass {
    Source(Bucket),
    Ignored,
}

impl FileClass {
    pub fn bucket(self) -> Option<Bucket> {
        match self {
            FileClass::Source(bucket) => Some(bucket),
            FileClass::Ignored => None,
        }
    }
}

/// Routes a path to a bucket by the suffix of its file name.
pub fn classify(path: &Path) -> FileClass {
    let Some(name) = path.file_name() else {
        return FileClass::Ignored;
    };
    let name = name.to_string_lossy();

    Bucket::ALL
        .into_iter()
        .find(|bucket| name.ends_with(bucket.source_suffix()))
        .map(FileClass::Source)
        .unwrap_or(FileClass::Ignored)
}
