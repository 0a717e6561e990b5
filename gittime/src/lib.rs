//! Git-derived dates for static-site content
//!
//! Each templated content item gets a creation date and a modification date
//! taken from the commits that touched its source file, falling back to the
//! file's change time when git has nothing to say:
//!
//! - untracked or never committed: both dates are the file's ctime
//! - committed with local edits: created at the first commit, modified at ctime
//! - committed and clean: created at the first commit, modified at the last
//!
//! Items opt out with `gittime: no` (or `false`/`off`) in their metadata.
//!
//! ```no_run
//! use content::{ContentItem, Signals};
//! use gittime::GitTimeConfig;
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let mut signals = Signals::new();
//! gittime::register(&mut signals, GitTimeConfig::default())?;
//!
//! let mut item = ContentItem::article("content/hello.md");
//! signals.content_initialized(&mut item)?;
//! println!("{:?} / {:?}", item.locale_date, item.locale_modified);
//! # Ok(())
//! # }
//! ```

pub mod config;
pub mod ctime;
pub mod error;
pub mod flag;
pub mod format;
pub mod plugin;
pub mod policy;
pub mod resolver;
pub mod telemetry;
pub mod zone;

pub use config::{GitTimeConfig, VcsBackend};
pub use ctime::change_time;
pub use error::{GitTimeError, GitTimeResult};
pub use flag::{GitTimeFlag, DEFAULT_METADATA_KEY};
pub use format::format_date;
pub use plugin::{register, GitTimePlugin, PLUGIN_NAME};
pub use policy::{decide, DateSource, Timestamps};
pub use resolver::{Resolution, SkipReason, TimestampResolver};
pub use telemetry::init_tracing;
pub use zone::{Zone, ZoneTagger};
