use std::path::PathBuf;
use thiserror::Error;

/// Operational failures while querying version control.
///
/// Informational answers (untracked, dirty, no history) are returned as data
/// and never show up here.
#[derive(Error, Debug)]
pub enum VcsError {
    #[error("Git error: {0}")]
    Git(#[from] git2::Error),

    #[error("Failed to run '{command}': {reason}")]
    CommandFailed { command: String, reason: String },

    #[error("Unparseable git output: {0}")]
    UnexpectedOutput(String),

    #[error("Path is outside the repository work tree: {0}")]
    OutsideRepository(PathBuf),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

pub type VcsResult<T> = Result<T, VcsError>;
