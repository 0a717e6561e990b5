//! Content model shared between a static-site build and its plugins
//!
//! The build owns every [`Content`] item. Plugins observe items through the
//! [`ContentListener`] trait and are wired up through a [`Signals`] registry,
//! which fires once per item after the item is initialised.

pub mod item;
pub mod listener;
pub mod settings;

pub use item::{Content, ContentDates, ContentItem, ContentKind, Metadata};
pub use listener::{ContentError, ContentListener, ContentResult, Signals};
pub use settings::SiteSettings;
