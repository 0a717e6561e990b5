//! Which evidence dates a content item
//!
//! | state                            | created       | modified      |
//! |----------------------------------|---------------|---------------|
//! | not tracked                      | ctime         | = created     |
//! | tracked, no commits              | ctime         | = created     |
//! | committed, working copy dirty    | oldest commit | ctime         |
//! | committed once, clean            | the commit    | = created     |
//! | committed more than once, clean  | oldest commit | newest commit |
//!
//! Commit times are read in the system zone via [`Zone::commit_instant`].

use crate::zone::Zone;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use vcs::VcsState;

/// Which row of the table produced a pair of dates
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum DateSource {
    Untracked,
    /// Staged but never committed
    Uncommitted,
    DirtyWorkingCopy,
    SingleCommit,
    CommitHistory,
}

/// Creation and modification instants, always both present
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Timestamps {
    pub created: DateTime<Utc>,
    pub modified: DateTime<Utc>,
    pub source: DateSource,
}

impl Timestamps {
    fn unmodified(created: DateTime<Utc>, source: DateSource) -> Self {
        Self {
            created,
            modified: created,
            source,
        }
    }
}

/// Pick created/modified instants from a path's version control state and
/// its filesystem change time.
pub fn decide(state: &VcsState, ctime: DateTime<Utc>, system: Zone) -> Timestamps {
    if !state.tracked {
        return Timestamps::unmodified(ctime, DateSource::Untracked);
    }

    let (Some(newest), Some(oldest)) = (state.newest(), state.oldest()) else {
        return Timestamps::unmodified(ctime, DateSource::Uncommitted);
    };
    let created = system.commit_instant(oldest);

    if state.working_copy_differs {
        return Timestamps {
            created,
            modified: ctime,
            source: DateSource::DirtyWorkingCopy,
        };
    }

    if state.history.len() == 1 {
        return Timestamps::unmodified(created, DateSource::SingleCommit);
    }

    Timestamps {
        created,
        modified: system.commit_instant(newest),
        source: DateSource::CommitHistory,
    }
}
