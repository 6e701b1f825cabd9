//! Normalization of provider time strings into a [`Schedule`].

use masjid_core::error::CoreError;
use masjid_core::prayer::{derive_imsak, parse_time_of_day, Schedule, DEFAULT_IMSAK_OFFSET_MINUTES};
use masjid_core::resolver::LocationQuery;

/// Provider time strings for one day, as received.
pub(crate) struct RawTimes<'a> {
    pub imsak: Option<&'a str>,
    pub fajr: &'a str,
    pub sunrise: &'a str,
    pub dhuhr: &'a str,
    pub asr: &'a str,
    pub maghrib: &'a str,
    pub isha: &'a str,
}

/// Parse every entry and reject replies that are not in chronological order.
///
/// A missing provider Imsak is derived from Fajr with the default offset; the
/// resolver applies the configured offset afterwards either way.
pub(crate) fn normalize(raw: RawTimes<'_>, query: &LocationQuery) -> Result<Schedule, CoreError> {
    let fajr = parse_time_of_day(raw.fajr)?;
    let imsak = match raw.imsak {
        Some(imsak) => parse_time_of_day(imsak)?,
        None => derive_imsak(fajr, DEFAULT_IMSAK_OFFSET_MINUTES),
    };

    let schedule = Schedule {
        date: query.date,
        timezone: query.timezone.clone(),
        imsak,
        fajr,
        sunrise: parse_time_of_day(raw.sunrise)?,
        dhuhr: parse_time_of_day(raw.dhuhr)?,
        asr: parse_time_of_day(raw.asr)?,
        maghrib: parse_time_of_day(raw.maghrib)?,
        isha: parse_time_of_day(raw.isha)?,
    };
    schedule.ensure_chronological()?;
    Ok(schedule)
}
