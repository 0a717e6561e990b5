use crate::error::{GitTimeError, GitTimeResult};
use crate::flag::DEFAULT_METADATA_KEY;
use crate::zone::Zone;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// How the repository is queried
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum VcsBackend {
    /// In-process through libgit2
    #[default]
    Libgit2,
    /// By running the `git` binary
    Cli,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct GitTimeConfig {
    /// Turns the plugin off without opening the repository
    pub enabled: bool,
    /// Content metadata key holding the per-item opt-out
    pub metadata_key: String,
    /// Display zone; overrides the site `TIMEZONE` when set
    pub timezone: Option<String>,
    /// Zone naive local times are read in; the host zone when unset
    pub system_timezone: Option<String>,
    pub backend: VcsBackend,
    /// Where repository discovery starts
    pub repository_root: PathBuf,
}

impl Default for GitTimeConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            metadata_key: DEFAULT_METADATA_KEY.to_string(),
            timezone: None,
            system_timezone: None,
            backend: VcsBackend::default(),
            repository_root: PathBuf::from("."),
        }
    }
}

impl GitTimeConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_toml_str(source: &str) -> GitTimeResult<Self> {
        let config: Self = toml::from_str(source)?;
        config.validate().map_err(GitTimeError::InvalidConfig)?;
        Ok(config)
    }

    pub fn with_enabled(mut self, enabled: bool) -> Self {
        self.enabled = enabled;
        self
    }

    pub fn with_metadata_key(mut self, key: impl Into<String>) -> Self {
        self.metadata_key = key.into();
        self
    }

    pub fn with_timezone(mut self, timezone: impl Into<String>) -> Self {
        self.timezone = Some(timezone.into());
        self
    }

    pub fn with_system_timezone(mut self, timezone: impl Into<String>) -> Self {
        self.system_timezone = Some(timezone.into());
        self
    }

    pub fn with_backend(mut self, backend: VcsBackend) -> Self {
        self.backend = backend;
        self
    }

    pub fn with_repository_root(mut self, root: impl Into<PathBuf>) -> Self {
        self.repository_root = root.into();
        self
    }

    pub fn validate(&self) -> Result<(), String> {
        if self.metadata_key.trim().is_empty() {
            return Err("Metadata key cannot be empty".to_string());
        }

        for zone in [&self.timezone, &self.system_timezone].into_iter().flatten() {
            Zone::parse(zone).map_err(|e| e.to_string())?;
        }

        if self.repository_root.as_os_str().is_empty() {
            return Err("Repository root cannot be empty".to_string());
        }

        Ok(())
    }
}
