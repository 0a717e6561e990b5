use serde::{Deserialize, Serialize};

/// Site-wide settings visible to every content item.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SiteSettings {
    /// IANA zone name used when displaying dates (`TIMEZONE`); `None` means
    /// the system zone
    pub timezone: Option<String>,
    /// strftime-style format used when an item does not set its own
    pub default_date_format: String,
}

impl Default for SiteSettings {
    fn default() -> Self {
        Self {
            timezone: None,
            default_date_format: "%a %d %B %Y".to_string(),
        }
    }
}

impl SiteSettings {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_timezone(mut self, timezone: impl Into<String>) -> Self {
        self.timezone = Some(timezone.into());
        self
    }

    pub fn with_default_date_format(mut self, format: impl Into<String>) -> Self {
        self.default_date_format = format.into();
        self
    }

    pub fn validate(&self) -> Result<(), String> {
        if self.default_date_format.is_empty() {
            return Err("Default date format cannot be empty".to_string());
        }

        if let Some(timezone) = &self.timezone {
            if timezone.trim().is_empty() {
                return Err("Timezone cannot be blank".to_string());
            }
        }

        Ok(())
    }
}
