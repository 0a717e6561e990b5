//! Timestamp resolution for a single content item

use crate::ctime::change_time;
use crate::error::GitTimeResult;
use crate::flag::GitTimeFlag;
use crate::policy::{decide, Timestamps};
use crate::zone::Zone;
use content::ContentKind;
use std::path::Path;
use tracing::debug;
use vcs::{VcsState, VersionControl};

/// Why an item was left with the dates the build gave it
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SkipReason {
    /// Passthrough asset, not templated content
    StaticContent,
    /// No repository was found when the resolver was built
    NoRepository,
    /// The item's metadata switched git dates off
    OptedOut,
    /// The plugin is disabled in configuration
    Disabled,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Resolution {
    Skip(SkipReason),
    Resolved(Timestamps),
}

impl Resolution {
    pub fn timestamps(&self) -> Option<&Timestamps> {
        match self {
            Resolution::Resolved(ts) => Some(ts),
            Resolution::Skip(_) => None,
        }
    }

    pub fn is_skip(&self) -> bool {
        matches!(self, Resolution::Skip(_))
    }
}

/// Resolves dates against an optional repository handle.
///
/// Without a handle every item is skipped.
pub struct TimestampResolver {
    vcs: Option<Box<dyn VersionControl>>,
}

impl TimestampResolver {
    pub fn new(vcs: Option<Box<dyn VersionControl>>) -> Self {
        Self { vcs }
    }

    pub fn with_vcs(vcs: impl VersionControl + 'static) -> Self {
        Self::new(Some(Box::new(vcs)))
    }

    pub fn inert() -> Self {
        Self::new(None)
    }

    pub fn is_active(&self) -> bool {
        self.vcs.is_some()
    }

    /// Decide created/modified instants for the item at `path`, reading
    /// commit times in the `system` zone.
    ///
    /// Fails only when `path` cannot be stat'ed or the repository itself
    /// cannot be read.
    pub fn resolve(
        &self,
        kind: ContentKind,
        path: &Path,
        flag: GitTimeFlag,
        system: Zone,
    ) -> GitTimeResult<Resolution> {
        if kind.is_static() {
            return Ok(Resolution::Skip(SkipReason::StaticContent));
        }
        let Some(vcs) = self.vcs.as_deref() else {
            return Ok(Resolution::Skip(SkipReason::NoRepository));
        };
        if !flag.is_enabled() {
            debug!(path = %path.display(), "git dates disabled by metadata");
            return Ok(Resolution::Skip(SkipReason::OptedOut));
        }

        let ctime = change_time(path)?;
        let state = VcsState::query(vcs, path)?;
        let timestamps = decide(&state, ctime, system);

        debug!(
            path = %path.display(),
            source = ?timestamps.source,
            created = %timestamps.created,
            modified = %timestamps.modified,
            "resolved content dates"
        );

        Ok(Resolution::Resolved(timestamps))
    }
}
