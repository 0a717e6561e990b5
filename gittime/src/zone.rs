//! Attaching display timezones to resolved instants
//!
//! An instant is first rendered as wall-clock time in the system zone; the
//! display zone is then attached to that wall-clock value without shifting
//! it again. When both zones agree the instant is preserved exactly.
//!
//! Commit times come in the other direction: the recorded wall-clock fields
//! are read as the system zone's *standard* time, so a commit made while DST
//! was in effect lands one DST step later than the instant git recorded.

use crate::error::{GitTimeError, GitTimeResult};
use chrono::{
    DateTime, Datelike, FixedOffset, Local, LocalResult, NaiveDate, NaiveDateTime, Offset,
    TimeDelta, TimeZone, Utc,
};
use chrono_tz::{OffsetComponents, Tz};
use vcs::CommitRecord;

/// A timezone: the host's own or a named IANA zone
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Zone {
    #[default]
    Local,
    Named(Tz),
}

impl Zone {
    /// Parse an IANA name such as `Europe/Paris`
    pub fn parse(name: &str) -> GitTimeResult<Self> {
        name.trim()
            .parse::<Tz>()
            .map(Zone::Named)
            .map_err(|_| GitTimeError::UnknownTimezone(name.to_string()))
    }

    /// `None` means the host zone
    pub fn parse_optional(name: Option<&str>) -> GitTimeResult<Self> {
        name.map(Self::parse).transpose().map(Option::unwrap_or_default)
    }

    /// The zone's offset without any DST adjustment around `local`
    pub fn standard_offset(&self, local: &NaiveDateTime) -> FixedOffset {
        match self {
            Zone::Local => {
                // the host database only gives total offsets; DST always
                // adds, so the smaller of midwinter and midsummer is standard
                [1, 7]
                    .into_iter()
                    .filter_map(|month| {
                        NaiveDate::from_ymd_opt(local.year(), month, 1)?.and_hms_opt(0, 0, 0)
                    })
                    .map(|midnight| Local.offset_from_utc_datetime(&midnight).fix())
                    .min_by_key(FixedOffset::local_minus_utc)
                    .unwrap_or_else(|| Local.offset_from_utc_datetime(local).fix())
            }
            Zone::Named(tz) => {
                let offset = tz.offset_from_utc_datetime(local);
                i32::try_from(offset.base_utc_offset().num_seconds())
                    .ok()
                    .and_then(FixedOffset::east_opt)
                    .unwrap_or_else(|| offset.fix())
            }
        }
    }

    /// Read a commit's recorded wall-clock fields as standard time here
    pub fn commit_instant(&self, commit: &CommitRecord) -> DateTime<Utc> {
        let local = commit.committed_local;
        let offset = self.standard_offset(&local).local_minus_utc();
        (local - TimeDelta::seconds(i64::from(offset))).and_utc()
    }

    fn wall_clock(&self, instant: &DateTime<Utc>) -> NaiveDateTime {
        match self {
            Zone::Local => instant.with_timezone(&Local).naive_local(),
            Zone::Named(tz) => instant.with_timezone(tz).naive_local(),
        }
    }

    fn attach(&self, wall_clock: &NaiveDateTime) -> DateTime<FixedOffset> {
        match self {
            Zone::Local => attach_wall_clock(&Local, wall_clock),
            Zone::Named(tz) => attach_wall_clock(tz, wall_clock),
        }
    }
}

/// Tag `wall_clock` with `zone` keeping its fields unchanged.
///
/// In a DST fold the earlier reading wins; inside a DST gap the zone's offset
/// at that moment (read as UTC) is used.
fn attach_wall_clock<Z: TimeZone>(zone: &Z, wall_clock: &NaiveDateTime) -> DateTime<FixedOffset> {
    match zone.from_local_datetime(wall_clock) {
        LocalResult::Single(dt) => dt.fixed_offset(),
        LocalResult::Ambiguous(a, b) => {
            if a <= b {
                a.fixed_offset()
            } else {
                b.fixed_offset()
            }
        }
        LocalResult::None => {
            let offset = zone.offset_from_utc_datetime(wall_clock).fix();
            let utc = *wall_clock - TimeDelta::seconds(i64::from(offset.local_minus_utc()));
            DateTime::from_naive_utc_and_offset(utc, offset)
        }
    }
}

/// Converts resolved instants into dates shown on the site
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ZoneTagger {
    system: Zone,
    display: Zone,
}

impl ZoneTagger {
    pub fn new(system: Zone, display: Zone) -> Self {
        Self { system, display }
    }

    pub fn tag(&self, instant: DateTime<Utc>) -> DateTime<FixedOffset> {
        self.display.attach(&self.system.wall_clock(&instant))
    }
}
