use std::path::PathBuf;
use thiserror::Error;
use vcs::VcsError;

#[derive(Error, Debug)]
pub enum GitTimeError {
    /// The build handed over a source path that cannot be stat'ed
    #[error("Cannot stat content source '{}': {source}", path.display())]
    PathNotFound {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Version control error: {0}")]
    Vcs(#[from] VcsError),

    #[error("Unknown timezone: {0}")]
    UnknownTimezone(String),

    #[error("Invalid date format: {0}")]
    InvalidDateFormat(String),

    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("Configuration parse error: {0}")]
    ConfigParse(#[from] toml::de::Error),

    #[error("Tracing setup failed: {0}")]
    Tracing(String),
}

pub type GitTimeResult<T> = Result<T, GitTimeError>;
