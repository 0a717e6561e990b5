use crate::error::{GitTimeError, GitTimeResult};
use chrono::{DateTime, TimeZone};
use std::fmt::{Display, Write};

/// Render `date` with a strftime-style `format`.
///
/// Unknown specifiers are reported instead of panicking.
pub fn format_date<Tz>(date: &DateTime<Tz>, format: &str) -> GitTimeResult<String>
where
    Tz: TimeZone,
    Tz::Offset: Display,
{
    let mut rendered = String::new();
    write!(rendered, "{}", date.format(format))
        .map_err(|_| GitTimeError::InvalidDateFormat(format.to_string()))?;
    Ok(rendered)
}
