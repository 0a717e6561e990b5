//! Per-item opt-out read from content metadata

use content::Metadata;

/// Metadata key consulted when no other key is configured
pub const DEFAULT_METADATA_KEY: &str = "gittime";

/// Whether an item wants git-derived dates
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum GitTimeFlag {
    #[default]
    Yes,
    No,
}

impl GitTimeFlag {
    /// Interpret a raw metadata value.
    ///
    /// Matching is case-insensitive and `false`/`off` are spellings of `no`.
    /// Anything that does not come out as `no` keeps dates enabled.
    pub fn parse(value: &str) -> Self {
        let normalized = value
            .to_lowercase()
            .replace("false", "no")
            .replace("off", "no");

        if normalized == "no" {
            GitTimeFlag::No
        } else {
            GitTimeFlag::Yes
        }
    }

    /// Read the flag under `key`, defaulting to `Yes` when absent
    pub fn from_metadata(metadata: &Metadata, key: &str) -> Self {
        metadata
            .get(key)
            .map(String::as_str)
            .map(Self::parse)
            .unwrap_or_default()
    }

    pub fn is_enabled(&self) -> bool {
        matches!(self, GitTimeFlag::Yes)
    }
}
