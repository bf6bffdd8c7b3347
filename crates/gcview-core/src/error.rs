use std::path::PathBuf;

/// Failures that abort parsing. Unmatched lines are not errors.
#[derive(Debug, thiserror::Error)]
pub enum GcLogError {
    #[error("cannot open GC log {}: {source}", path.display())]
    Open {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed reading GC log {}: {source}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

impl GcLogError {
    /// Path of the log file the error refers to.
    pub fn path(&self) -> &std::path::Path {
        match self {
            GcLogError::Open { path, .. } | GcLogError::Read { path, .. } => path,
        }
    }
}

/// Returned when a format selector is neither `unified` nor `java8`.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown GC log format {0:?} (expected \"unified\" or \"java8\")")]
pub struct UnknownFormat(pub String);
