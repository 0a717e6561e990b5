//! Filesystem change time, the fallback evidence for undated content

use crate::error::{GitTimeError, GitTimeResult};
use chrono::{DateTime, Utc};
use std::fs::Metadata;
use std::path::Path;

/// Metadata change time of `path` (creation time where the platform has no
/// ctime).
///
/// A path that cannot be stat'ed is a [`GitTimeError::PathNotFound`].
pub fn change_time(path: &Path) -> GitTimeResult<DateTime<Utc>> {
    let not_found = |source| GitTimeError::PathNotFound {
        path: path.to_path_buf(),
        source,
    };

    let metadata = std::fs::metadata(path).map_err(not_found)?;
    metadata_change_time(&metadata).map_err(not_found)
}

#[cfg(unix)]
fn metadata_change_time(metadata: &Metadata) -> std::io::Result<DateTime<Utc>> {
    use std::os::unix::fs::MetadataExt;

    let nanos = u32::try_from(metadata.ctime_nsec()).unwrap_or(0);
    timestamp(metadata.ctime(), nanos)
}

#[cfg(unix)]
fn timestamp(seconds: i64, nanos: u32) -> std::io::Result<DateTime<Utc>> {
    DateTime::from_timestamp(seconds, nanos).ok_or_else(|| {
        std::io::Error::new(
            std::io::ErrorKind::InvalidData,
            format!("change time {}s is out of range", seconds),
        )
    })
}

#[cfg(not(unix))]
fn metadata_change_time(metadata: &Metadata) -> std::io::Result<DateTime<Utc>> {
    let time = metadata.created().or_else(|_| metadata.modified())?;
    Ok(DateTime::<Utc>::from(time))
}
