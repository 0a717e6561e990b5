//! Content listener that writes git-derived dates onto items

use crate::config::{GitTimeConfig, VcsBackend};
use crate::error::{GitTimeError, GitTimeResult};
use crate::flag::GitTimeFlag;
use crate::format::format_date;
use crate::resolver::{Resolution, SkipReason, TimestampResolver};
use crate::zone::{Zone, ZoneTagger};
use content::{Content, ContentDates, ContentError, ContentListener, ContentResult, Signals};
use tracing::{info, warn};
use vcs::{GitCli, GitRepository, VersionControl};

pub const PLUGIN_NAME: &str = "gittime";

pub struct GitTimePlugin {
    config: GitTimeConfig,
    resolver: TimestampResolver,
}

impl GitTimePlugin {
    /// Validate `config` and open the repository it points at.
    ///
    /// A missing repository yields an inert plugin that skips every item.
    pub fn from_config(config: GitTimeConfig) -> GitTimeResult<Self> {
        config.validate().map_err(GitTimeError::InvalidConfig)?;

        let vcs = if config.enabled {
            discover(&config)?
        } else {
            None
        };

        if config.enabled && vcs.is_none() {
            info!(
                "No git repository at {}; content dates are left as they are",
                config.repository_root.display()
            );
        }

        Ok(Self::with_resolver(config, TimestampResolver::new(vcs)))
    }

    pub fn with_resolver(config: GitTimeConfig, resolver: TimestampResolver) -> Self {
        Self { config, resolver }
    }

    pub fn config(&self) -> &GitTimeConfig {
        &self.config
    }

    pub fn is_active(&self) -> bool {
        self.config.enabled && self.resolver.is_active()
    }

    /// Resolve dates for `content` and write them onto it.
    ///
    /// Skipped items are not touched at all.
    pub fn apply(&self, content: &mut dyn Content) -> GitTimeResult<Resolution> {
        if !self.config.enabled {
            return Ok(Resolution::Skip(SkipReason::Disabled));
        }

        let system = Zone::parse_optional(self.config.system_timezone.as_deref())?;
        let flag = GitTimeFlag::from_metadata(content.metadata(), &self.config.metadata_key);
        let resolution = self
            .resolver
            .resolve(content.kind(), content.source_path(), flag, system)?;
        let Resolution::Resolved(timestamps) = resolution else {
            return Ok(resolution);
        };

        let settings = content.settings();
        settings.validate().map_err(GitTimeError::InvalidConfig)?;
        let display = Zone::parse_optional(
            self.config
                .timezone
                .as_deref()
                .or(settings.timezone.as_deref()),
        )?;
        let tagger = ZoneTagger::new(system, display);

        let created_at = tagger.tag(timestamps.created);
        let modified_at = tagger.tag(timestamps.modified);
        let locale_date = format_date(&created_at, content.date_format())?;
        let locale_modified = format_date(&modified_at, content.date_format())?;

        content.set_dates(ContentDates {
            created_at,
            modified_at,
            locale_date,
            locale_modified,
        });

        Ok(resolution)
    }
}

impl ContentListener for GitTimePlugin {
    fn name(&self) -> &str {
        PLUGIN_NAME
    }

    fn on_content_initialized(&self, content: &mut dyn Content) -> ContentResult<()> {
        self.apply(content).map(|_| ()).map_err(|e| {
            warn!("Failed to date {}: {}", content.source_path().display(), e);
            ContentError::Listener {
                listener: PLUGIN_NAME.to_string(),
                reason: e.to_string(),
            }
        })
    }
}

fn discover(config: &GitTimeConfig) -> GitTimeResult<Option<Box<dyn VersionControl>>> {
    let root = &config.repository_root;
    let vcs = match config.backend {
        VcsBackend::Libgit2 => GitRepository::discover(root)?
            .map(|repo| Box::new(repo) as Box<dyn VersionControl>),
        VcsBackend::Cli => {
            GitCli::discover(root)?.map(|cli| Box::new(cli) as Box<dyn VersionControl>)
        }
    };
    Ok(vcs)
}

/// Connect a [`GitTimePlugin`] built from `config` to `signals`
pub fn register(signals: &mut Signals, config: GitTimeConfig) -> GitTimeResult<()> {
    let plugin = GitTimePlugin::from_config(config)?;
    signals.connect(Box::new(plugin));
    Ok(())
}
