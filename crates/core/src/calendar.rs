//! Gregorian and Hijri date strings for the display header.
//!
//! The two strings are produced independently: a Hijri conversion failure
//! (the Umm al-Qura tables only cover a bounded range) never blocks the
//! Gregorian string.

use std::fmt;

use chrono::{Datelike, NaiveDate, Weekday};
use hijri_date::HijriDate;
use serde::{Deserialize, Serialize};

/// Display language for date names and advisories.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum Locale {
    #[default]
    En,
    Id,
}

impl Locale {
    pub fn as_str(self) -> &'static str {
        match self {
            Locale::En => "en",
            Locale::Id => "id",
        }
    }
}

impl From<String> for Locale {
    fn from(raw: String) -> Self {
        match raw.trim().to_ascii_lowercase().as_str() {
            "id" | "id_id" | "id-id" | "indonesian" => Locale::Id,
            _ => Locale::En,
        }
    }
}

impl From<Locale> for String {
    fn from(locale: Locale) -> Self {
        locale.as_str().to_string()
    }
}

impl fmt::Display for Locale {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

const MONTHS_EN: [&str; 12] = [
    "January", "February", "March", "April", "May", "June", "July", "August", "September",
    "October", "November", "December",
];

const MONTHS_ID: [&str; 12] = [
    "Januari", "Februari", "Maret", "April", "Mei", "Juni", "Juli", "Agustus", "September",
    "Oktober", "November", "Desember",
];

const HIJRI_MONTHS_EN: [&str; 12] = [
    "Muharram",
    "Safar",
    "Rabi' al-Awwal",
    "Rabi' al-Thani",
    "Jumada al-Ula",
    "Jumada al-Akhirah",
    "Rajab",
    "Sha'ban",
    "Ramadhan",
    "Shawwal",
    "Dhu al-Qi'dah",
    "Dhu al-Hijjah",
];

const HIJRI_MONTHS_ID: [&str; 12] = [
    "Muharram",
    "Safar",
    "Rabiul Awal",
    "Rabiul Akhir",
    "Jumadil Awal",
    "Jumadil Akhir",
    "Rajab",
    "Syaban",
    "Ramadhan",
    "Syawal",
    "Dzulkaidah",
    "Dzulhijjah",
];

/// Gregorian years covered by the Umm al-Qura conversion tables.
const HIJRI_TABLE_YEARS: std::ops::RangeInclusive<i32> = 1938..=2076;

fn weekday_name(day: Weekday, locale: Locale) -> &'static str {
    match (locale, day) {
        (Locale::En, Weekday::Mon) => "Monday",
        (Locale::En, Weekday::Tue) => "Tuesday",
        (Locale::En, Weekday::Wed) => "Wednesday",
        (Locale::En, Weekday::Thu) => "Thursday",
        (Locale::En, Weekday::Fri) => "Friday",
        (Locale::En, Weekday::Sat) => "Saturday",
        (Locale::En, Weekday::Sun) => "Sunday",
        (Locale::Id, Weekday::Mon) => "Senin",
        (Locale::Id, Weekday::Tue) => "Selasa",
        (Locale::Id, Weekday::Wed) => "Rabu",
        (Locale::Id, Weekday::Thu) => "Kamis",
        (Locale::Id, Weekday::Fri) => "Jumat",
        (Locale::Id, Weekday::Sat) => "Sabtu",
        (Locale::Id, Weekday::Sun) => "Minggu",
    }
}

/// `"Wednesday, 14 October 2026"` / `"Rabu, 14 Oktober 2026"`.
pub fn format_gregorian(date: NaiveDate, locale: Locale) -> String {
    let months = match locale {
        Locale::En => &MONTHS_EN,
        Locale::Id => &MONTHS_ID,
    };
    format!(
        "{}, {:02} {} {}",
        weekday_name(date.weekday(), locale),
        date.day(),
        months[date.month0() as usize],
        date.year(),
    )
}

/// Hijri (Umm al-Qura) date as `"<day> <month name> <year>"`.
///
/// Returns `None` when the date is outside the conversion tables.
pub fn format_hijri(date: NaiveDate, locale: Locale) -> Option<String> {
    if !HIJRI_TABLE_YEARS.contains(&date.year()) {
        tracing::warn!(%date, "Date outside Hijri conversion range");
        return None;
    }

    let (Ok(year), Ok(month), Ok(day)) = (
        usize::try_from(date.year()),
        usize::try_from(date.month()),
        usize::try_from(date.day()),
    ) else {
        return None;
    };

    let hijri = match HijriDate::from_gr(year, month, day) {
        Ok(hijri) => hijri,
        Err(e) => {
            tracing::warn!(%date, error = %e, "Hijri conversion failed");
            return None;
        }
    };

    let names = match locale {
        Locale::En => &HIJRI_MONTHS_EN,
        Locale::Id => &HIJRI_MONTHS_ID,
    };
    let month_name = names.get(hijri.month().checked_sub(1)?)?;

    Some(format!("{} {} {}", hijri.day(), month_name, hijri.year()))
}
