//! Content items as seen by plugins

use crate::settings::SiteSettings;
use chrono::{DateTime, FixedOffset};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::{Path, PathBuf};

/// Key/value metadata parsed from an item's header
pub type Metadata = HashMap<String, String>;

/// How the build treats a content item
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ContentKind {
    /// Blog article rendered through templates
    Article,
    /// Standalone page rendered through templates
    Page,
    /// Opaque file copied to the output untouched
    Static,
}

impl ContentKind {
    /// Whether the item is a passthrough asset rather than templated content
    pub fn is_static(&self) -> bool {
        matches!(self, ContentKind::Static)
    }
}

/// Creation and modification dates together with their rendered strings.
///
/// Always written as a whole so an item never carries a modification date
/// without a creation date.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContentDates {
    pub created_at: DateTime<FixedOffset>,
    pub modified_at: DateTime<FixedOffset>,
    pub locale_date: String,
    pub locale_modified: String,
}

/// Read access to an item plus the single mutation plugins may perform.
pub trait Content {
    fn kind(&self) -> ContentKind;

    fn source_path(&self) -> &Path;

    fn metadata(&self) -> &Metadata;

    /// Format string for rendering this item's dates
    fn date_format(&self) -> &str;

    fn settings(&self) -> &SiteSettings;

    fn set_dates(&mut self, dates: ContentDates);
}

/// In-memory content item
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ContentItem {
    pub kind: ContentKind,
    pub source_path: PathBuf,
    pub metadata: Metadata,
    /// Per-item format; falls back to the site default when unset
    pub date_format: Option<String>,
    pub settings: SiteSettings,
    pub date: Option<DateTime<FixedOffset>>,
    pub modified: Option<DateTime<FixedOffset>>,
    pub locale_date: Option<String>,
    pub locale_modified: Option<String>,
}

impl ContentItem {
    pub fn new(kind: ContentKind, source_path: impl Into<PathBuf>) -> Self {
        Self {
            kind,
            source_path: source_path.into(),
            metadata: Metadata::new(),
            date_format: None,
            settings: SiteSettings::default(),
            date: None,
            modified: None,
            locale_date: None,
            locale_modified: None,
        }
    }

    pub fn article(source_path: impl Into<PathBuf>) -> Self {
        Self::new(ContentKind::Article, source_path)
    }

    pub fn with_metadata(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.metadata.insert(key.into(), value.into());
        self
    }

    pub fn with_date_format(mut self, format: impl Into<String>) -> Self {
        self.date_format = Some(format.into());
        self
    }

    pub fn with_settings(mut self, settings: SiteSettings) -> Self {
        self.settings = settings;
        self
    }

    /// Date assigned by the build before plugins run
    pub fn with_date(mut self, date: DateTime<FixedOffset>) -> Self {
        self.date = Some(date);
        self
    }
}

impl Content for ContentItem {
    fn kind(&self) -> ContentKind {
        self.kind
    }

    fn source_path(&self) -> &Path {
        &self.source_path
    }

    fn metadata(&self) -> &Metadata {
        &self.metadata
    }

    fn date_format(&self) -> &str {
        self.date_format
            .as_deref()
            .unwrap_or(&self.settings.default_date_format)
    }

    fn settings(&self) -> &SiteSettings {
        &self.settings
    }

    fn set_dates(&mut self, dates: ContentDates) {
        self.date = Some(dates.created_at);
        self.modified = Some(dates.modified_at);
        self.locale_date = Some(dates.locale_date);
        self.locale_modified = Some(dates.locale_modified);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_static_kind() {
        assert!(ContentKind::Static.is_static());
        assert!(!ContentKind::Article.is_static());
        assert!(!ContentKind::Page.is_static());
    }

    #[test]
    fn test_date_format_falls_back_to_site_default() {
        let item = ContentItem::article("content/post.md");
        assert_eq!(item.date_format(), "%a %d %B %Y");

        let item = item.with_date_format("%Y-%m-%d");
        assert_eq!(item.date_format(), "%Y-%m-%d");
    }

    #[test]
    fn test_set_dates_populates_every_field() {
        let utc = FixedOffset::east_opt(0).unwrap();
        let created = utc.with_ymd_and_hms(2020, 1, 1, 0, 0, 0).unwrap();
        let modified = utc.with_ymd_and_hms(2021, 6, 1, 12, 0, 0).unwrap();

        let mut item = ContentItem::article("content/post.md");
        item.set_dates(ContentDates {
            created_at: created,
            modified_at: modified,
            locale_date: "2020".to_string(),
            locale_modified: "2021".to_string(),
        });

        assert_eq!(item.date, Some(created));
        assert_eq!(item.modified, Some(modified));
        assert_eq!(item.locale_date.as_deref(), Some("2020"));
        assert_eq!(item.locale_modified.as_deref(), Some("2021"));
    }

    #[test]
    fn test_builder_metadata() {
        let item = ContentItem::new(ContentKind::Page, "pages/about.md")
            .with_metadata("gittime", "off");
        assert_eq!(item.metadata().get("gittime").map(String::as_str), Some("off"));
        assert_eq!(item.source_path(), Path::new("pages/about.md"));
    }
}
