use std::path::PathBuf;

use thiserror::Error;

#[derive(Error, Debug)]
pub enum StoreError {
    #[error("task file {} not found; run `doit init` first", .path.display())]
    NotFound { path: PathBuf },

    #[error("malformed record on line {line}: {reason}")]
    MalformedRecord { line: u64, reason: String },

    #[error("task {0} not found")]
    TaskNotFound(u64),

    #[error("I/O error on {}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

impl StoreError {
    pub(crate) fn malformed(line: u64, reason: impl Into<String>) -> Self {
        Self::MalformedRecord {
            line,
            reason: reason.into(),
        }
    }

    /// Map a CSV error onto the store taxonomy. I/O failures keep their
    /// cause; anything else the reader rejects is a malformed record.
    pub(crate) fn from_csv(path: &std::path::Path, err: csv::Error) -> Self {
        let line = err.position().map(|p| p.line()).unwrap_or(0);
        match err.into_kind() {
            csv::ErrorKind::Io(source) => Self::Io {
                path: path.to_path_buf(),
                source,
            },
            csv::ErrorKind::Utf8 { err, .. } => {
                Self::malformed(line, format!("invalid UTF-8 ({err})"))
            }
            other => Self::malformed(line, format!("{other:?}")),
        }
    }
}

pub type Result<T> = std::result::Result<T, StoreError>;
