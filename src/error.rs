use std::path::PathBuf;
use thiserror::Error;

/// Everything that can stop a record or plot run; nothing here is retried.
#[derive(Debug, Error)]
pub enum PlotError {
    #[error("could not read {}: {source}", path.display())]
    FileNotFound {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("line {line}: expected two numeric fields, found {content:?}")]
    Parse { line: usize, content: String },
    #[error("no samples, cannot compute the time window")]
    EmptyDataset,
    #[error("could not write {}: {reason}", path.display())]
    Write { path: PathBuf, reason: String },
}

impl PlotError {
    pub fn write<E: std::fmt::Display>(path: &std::path::Path, e: E) -> PlotError {
        PlotError::Write {
            path: path.to_path_buf(),
            reason: e.to_string(),
        }
    }
}
