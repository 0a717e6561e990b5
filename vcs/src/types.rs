//! Version control data handed to the timestamp resolver

use crate::error::{VcsError, VcsResult};
use chrono::{DateTime, NaiveDateTime, TimeDelta, Utc};
use serde::{Deserialize, Serialize};
use std::path::Path;
use tracing::trace;

/// Read-only questions asked about one path.
///
/// Paths may be absolute or relative to the process working directory.
pub trait VersionControl {
    /// Whether the path is in the index (committed or staged)
    fn is_tracked(&self, path: &Path) -> VcsResult<bool>;

    /// Commits that changed the path, newest first; empty when there are none
    fn commit_history(&self, path: &Path) -> VcsResult<Vec<CommitRecord>>;

    /// Whether the file differs from its last committed revision
    fn working_copy_differs(&self, path: &Path) -> VcsResult<bool>;
}

/// A commit touching a path.
///
/// The commit time is kept the way git records it: wall-clock fields in the
/// committer's zone plus that zone's offset from UTC.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CommitRecord {
    /// Full commit hash
    pub id: String,

    /// Committer wall-clock time
    pub committed_local: NaiveDateTime,

    /// Seconds east of UTC for `committed_local`
    pub utc_offset_seconds: i32,
}

impl CommitRecord {
    pub fn new(id: impl Into<String>, committed_local: NaiveDateTime, utc_offset_seconds: i32) -> Self {
        Self {
            id: id.into(),
            committed_local,
            utc_offset_seconds,
        }
    }

    /// Build from git's raw representation: epoch seconds and the committer
    /// offset in minutes.
    pub fn from_epoch(id: impl Into<String>, seconds: i64, offset_minutes: i32) -> VcsResult<Self> {
        let id = id.into();
        let committed_local = DateTime::from_timestamp(seconds, 0)
            .and_then(|utc| {
                utc.naive_utc()
                    .checked_add_signed(TimeDelta::minutes(i64::from(offset_minutes)))
            })
            .ok_or_else(|| {
                VcsError::UnexpectedOutput(format!(
                    "commit {} has out of range time {} {:+}",
                    id, seconds, offset_minutes
                ))
            })?;

        Ok(Self::new(id, committed_local, offset_minutes * 60))
    }

    /// The absolute instant of the commit
    pub fn committed_at(&self) -> DateTime<Utc> {
        (self.committed_local - TimeDelta::seconds(i64::from(self.utc_offset_seconds))).and_utc()
    }
}

/// Snapshot of what version control knows about one path
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct VcsState {
    pub tracked: bool,

    /// Newest first
    pub history: Vec<CommitRecord>,

    /// Only meaningful when `history` is non-empty
    pub working_copy_differs: bool,
}

impl VcsState {
    pub fn untracked() -> Self {
        Self::default()
    }

    /// Ask `vcs` about `path`, skipping questions whose answer cannot matter:
    /// history is only read for tracked paths and the working copy is only
    /// compared when there is a commit to compare against.
    pub fn query<V: VersionControl + ?Sized>(vcs: &V, path: &Path) -> VcsResult<Self> {
        if !vcs.is_tracked(path)? {
            trace!(path = %path.display(), "path is not tracked");
            return Ok(Self::untracked());
        }

        let history = vcs.commit_history(path)?;
        let working_copy_differs = if history.is_empty() {
            false
        } else {
            vcs.working_copy_differs(path)?
        };

        trace!(
            path = %path.display(),
            commits = history.len(),
            dirty = working_copy_differs,
            "queried version control"
        );

        Ok(Self {
            tracked: true,
            history,
            working_copy_differs,
        })
    }

    pub fn newest(&self) -> Option<&CommitRecord> {
        self.history.first()
    }

    pub fn oldest(&self) -> Option<&CommitRecord> {
        self.history.last()
    }
}
