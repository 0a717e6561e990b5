//! Logging setup for builds that do not install their own subscriber

use crate::error::{GitTimeError, GitTimeResult};
use tracing_subscriber::{EnvFilter, FmtSubscriber};

/// Filter used when `RUST_LOG` is unset
pub const DEFAULT_FILTER: &str = "gittime=info,vcs=info,content=info";

/// Install a global fmt subscriber.
///
/// `RUST_LOG` wins over `default_filter`. Fails if a global subscriber is
/// already set.
pub fn init_tracing(default_filter: Option<&str>) -> GitTimeResult<()> {
    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(default_filter.unwrap_or(DEFAULT_FILTER)))
        .map_err(|e| GitTimeError::Tracing(e.to_string()))?;

    let subscriber = FmtSubscriber::builder().with_env_filter(filter).finish();
    tracing::subscriber::set_global_default(subscriber)
        .map_err(|e| GitTimeError::Tracing(e.to_string()))
}
