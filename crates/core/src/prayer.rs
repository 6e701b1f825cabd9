//! Canonical prayer schedule model.
//!
//! A [`Schedule`] is one civil day's wall-clock prayer times at a site. The
//! five canonical prayers ([`Prayer`]) drive the countdown; Imsak and Sunrise
//! are display-only. Times are `chrono::NaiveTime` in the site's local civil
//! time and are always rendered as `HH:MM`.

use std::collections::BTreeMap;
use std::fmt;

use chrono::{Duration, NaiveDate, NaiveTime};
use serde::{Deserialize, Serialize};

use crate::error::CoreError;

/// Output format for all schedule times.
pub const TIME_FORMAT: &str = "%H:%M";

/// Grace minutes applied to a prayer that is missing from a persisted table.
pub const DEFAULT_GRACE_MINUTES: i64 = 10;

/// Largest grace period honoured; larger persisted values are clamped.
pub const MAX_GRACE_MINUTES: i64 = 24 * 60;

/// Default Imsak offset (minutes before Fajr).
pub const DEFAULT_IMSAK_OFFSET_MINUTES: u32 = 10;

/// Largest Imsak offset honoured; larger persisted values are clamped.
pub const MAX_IMSAK_OFFSET_MINUTES: u32 = 180;

// ---------------------------------------------------------------------------
// Prayer
// ---------------------------------------------------------------------------

/// The five canonical daily prayers, in canonical order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Prayer {
    Fajr,
    Dhuhr,
    Asr,
    Maghrib,
    Isha,
}

impl Prayer {
    /// Canonical scan order used by the countdown.
    pub const ALL: [Prayer; 5] = [
        Prayer::Fajr,
        Prayer::Dhuhr,
        Prayer::Asr,
        Prayer::Maghrib,
        Prayer::Isha,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            Prayer::Fajr => "fajr",
            Prayer::Dhuhr => "dhuhr",
            Prayer::Asr => "asr",
            Prayer::Maghrib => "maghrib",
            Prayer::Isha => "isha",
        }
    }

    /// Parse a lower-case prayer key as used in grace tables and manual maps.
    pub fn from_key(key: &str) -> Option<Self> {
        Self::ALL
            .into_iter()
            .find(|p| p.as_str().eq_ignore_ascii_case(key.trim()))
    }

    /// Grace minutes used when no table is persisted.
    pub fn default_grace_minutes(self) -> i64 {
        match self {
            Prayer::Fajr => 15,
            Prayer::Dhuhr | Prayer::Asr | Prayer::Isha => 10,
            Prayer::Maghrib => 5,
        }
    }
}

impl fmt::Display for Prayer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ---------------------------------------------------------------------------
// Time-of-day helpers
// ---------------------------------------------------------------------------

/// Parse a wall-clock time of day.
///
/// Accepts `HH:MM` and `HH:MM:SS`. Anything after the first whitespace is
/// ignored so provider strings such as `"04:40 (WIB)"` parse as `04:40`.
pub fn parse_time_of_day(raw: &str) -> Result<NaiveTime, CoreError> {
    let token = raw.split_whitespace().next().unwrap_or_default();

    NaiveTime::parse_from_str(token, "%H:%M")
        .or_else(|_| NaiveTime::parse_from_str(token, "%H:%M:%S"))
        .map_err(|_| CoreError::Parse(format!("invalid time of day '{raw}'")))
}

/// Render a time of day as `HH:MM`.
pub fn format_time_of_day(time: NaiveTime) -> String {
    time.format(TIME_FORMAT).to_string()
}

/// Imsak is `fajr - offset` in clock arithmetic (wraps across midnight).
pub fn derive_imsak(fajr: NaiveTime, offset_minutes: u32) -> NaiveTime {
    fajr - Duration::minutes(i64::from(offset_minutes))
}

/// Add minutes to a time of day, wrapping across midnight.
pub fn add_minutes(time: NaiveTime, minutes: i64) -> NaiveTime {
    time + Duration::minutes(minutes.rem_euclid(24 * 60))
}

// ---------------------------------------------------------------------------
// Schedule
// ---------------------------------------------------------------------------

/// One civil day's prayer times at a site.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Schedule {
    pub date: NaiveDate,
    /// IANA timezone the times were computed in.
    pub timezone: String,
    pub imsak: NaiveTime,
    pub fajr: NaiveTime,
    pub sunrise: NaiveTime,
    pub dhuhr: NaiveTime,
    pub asr: NaiveTime,
    pub maghrib: NaiveTime,
    pub isha: NaiveTime,
}

impl Schedule {
    /// Time of one of the five canonical prayers.
    pub fn time_of(&self, prayer: Prayer) -> NaiveTime {
        match prayer {
            Prayer::Fajr => self.fajr,
            Prayer::Dhuhr => self.dhuhr,
            Prayer::Asr => self.asr,
            Prayer::Maghrib => self.maghrib,
            Prayer::Isha => self.isha,
        }
    }

    /// Replace Imsak with `fajr - offset`.
    pub fn with_imsak_offset(mut self, offset_minutes: u32) -> Self {
        self.imsak = derive_imsak(self.fajr, offset_minutes);
        self
    }

    /// Check Imsak <= Fajr <= Sunrise <= Dhuhr <= Asr <= Maghrib <= Isha.
    ///
    /// Upstream replies that violate the ordering are malformed and must be
    /// rejected by the adapter.
    pub fn ensure_chronological(&self) -> Result<(), CoreError> {
        let ordered = [
            ("imsak", self.imsak),
            ("fajr", self.fajr),
            ("sunrise", self.sunrise),
            ("dhuhr", self.dhuhr),
            ("asr", self.asr),
            ("maghrib", self.maghrib),
            ("isha", self.isha),
        ];

        for pair in ordered.windows(2) {
            let (earlier_name, earlier) = pair[0];
            let (later_name, later) = pair[1];
            if earlier > later {
                return Err(CoreError::Validation(format!(
                    "{earlier_name} ({}) is after {later_name} ({})",
                    format_time_of_day(earlier),
                    format_time_of_day(later),
                )));
            }
        }
        Ok(())
    }
}

/// The hard-coded last-resort schedule (Imsak derived from its Fajr).
pub fn static_default_schedule(date: NaiveDate, timezone: &str, imsak_offset: u32) -> Schedule {
    let at = |h, m| NaiveTime::from_hms_opt(h, m, 0).unwrap_or(NaiveTime::MIN);

    Schedule {
        date,
        timezone: timezone.to_string(),
        imsak: NaiveTime::MIN,
        fajr: at(4, 30),
        sunrise: at(5, 45),
        dhuhr: at(11, 45),
        asr: at(15, 15),
        maghrib: at(17, 45),
        isha: at(19, 0),
    }
    .with_imsak_offset(imsak_offset)
}

// ---------------------------------------------------------------------------
// Manual override
// ---------------------------------------------------------------------------

/// Manually entered times from the settings document (`HH:MM` strings).
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ManualTimes {
    pub fajr: Option<String>,
    pub sunrise: Option<String>,
    pub dhuhr: Option<String>,
    pub asr: Option<String>,
    pub maghrib: Option<String>,
    pub isha: Option<String>,
}

impl ManualTimes {
    /// Build a schedule from the manual entries, deriving Imsak from Fajr.
    ///
    /// Every entry must be present and parse; otherwise the manual override
    /// is unusable as a whole.
    pub fn to_schedule(
        &self,
        date: NaiveDate,
        timezone: &str,
        imsak_offset: u32,
    ) -> Result<Schedule, CoreError> {
        let field = |name: &str, value: &Option<String>| -> Result<NaiveTime, CoreError> {
            let raw = value
                .as_deref()
                .ok_or_else(|| CoreError::Parse(format!("manual {name} time is missing")))?;
            parse_time_of_day(raw)
        };

        let fajr = field("fajr", &self.fajr)?;
        Ok(Schedule {
            date,
            timezone: timezone.to_string(),
            imsak: derive_imsak(fajr, imsak_offset),
            fajr,
            sunrise: field("sunrise", &self.sunrise)?,
            dhuhr: field("dhuhr", &self.dhuhr)?,
            asr: field("asr", &self.asr)?,
            maghrib: field("maghrib", &self.maghrib)?,
            isha: field("isha", &self.isha)?,
        })
    }
}

// ---------------------------------------------------------------------------
// Grace periods (iqomah)
// ---------------------------------------------------------------------------

/// Minutes between the call to prayer and the congregation, per prayer.
///
/// Persisted as a `{ "fajr": 15, ... }` object. Unknown keys are dropped,
/// missing prayers read as [`DEFAULT_GRACE_MINUTES`] and values are clamped
/// to `0..=MAX_GRACE_MINUTES`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "BTreeMap<String, i64>", into = "BTreeMap<String, i64>")]
pub struct GracePeriodTable {
    minutes: BTreeMap<Prayer, i64>,
}

impl GracePeriodTable {
    pub fn new(entries: impl IntoIterator<Item = (Prayer, i64)>) -> Self {
        Self {
            minutes: entries
                .into_iter()
                .map(|(prayer, minutes)| (prayer, minutes.clamp(0, MAX_GRACE_MINUTES)))
                .collect(),
        }
    }

    /// Grace minutes for a prayer (never negative).
    pub fn minutes_for(&self, prayer: Prayer) -> i64 {
        self.minutes
            .get(&prayer)
            .copied()
            .unwrap_or(DEFAULT_GRACE_MINUTES)
    }
}

impl Default for GracePeriodTable {
    fn default() -> Self {
        Self::new(Prayer::ALL.map(|p| (p, p.default_grace_minutes())))
    }
}

impl From<BTreeMap<String, i64>> for GracePeriodTable {
    fn from(raw: BTreeMap<String, i64>) -> Self {
        Self::new(
            raw.into_iter()
                .filter_map(|(key, minutes)| Prayer::from_key(&key).map(|p| (p, minutes))),
        )
    }
}

impl From<GracePeriodTable> for BTreeMap<String, i64> {
    fn from(table: GracePeriodTable) -> Self {
        table
            .minutes
            .into_iter()
            .map(|(prayer, minutes)| (prayer.as_str().to_string(), minutes))
            .collect()
    }
}

/// Congregation (iqomah) time for each prayer: prayer time plus grace.
pub fn grace_times(schedule: &Schedule, table: &GracePeriodTable) -> BTreeMap<Prayer, String> {
    Prayer::ALL
        .into_iter()
        .map(|prayer| {
            let end = add_minutes(schedule.time_of(prayer), table.minutes_for(prayer));
            (prayer, format_time_of_day(end))
        })
        .collect()
}
