//! Assembly of the display payload from a resolved schedule.

use std::collections::BTreeMap;

use chrono::NaiveDateTime;
use serde::Serialize;

use crate::calendar::{format_gregorian, format_hijri, Locale};
use crate::countdown::{classify, CanonicalTimes};
use crate::prayer::{format_time_of_day, grace_times, GracePeriodTable, Prayer};
use crate::resolver::{ResolvedSchedule, ScheduleSource};

/// What the display needs for one poll.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PrayerTimesView {
    pub fajr: String,
    pub imsak: String,
    pub sunrise: String,
    pub dhuhr: String,
    pub asr: String,
    pub maghrib: String,
    pub isha: String,
    pub gregorian_date: String,
    /// Empty when the date is outside the Hijri conversion range.
    pub hijri_date: String,
    /// Site civil time, `HH:MM:SS`.
    pub current_time: String,
    pub next_prayer: Prayer,
    /// Whole minutes until the countdown target.
    pub time_until_next: i64,
    pub seconds_until_next: i64,
    pub is_grace_countdown: bool,
    pub grace_times: BTreeMap<Prayer, String>,
    pub source: ScheduleSource,
}

/// Build the view for `now` (site civil time).
///
/// Dates are taken from `now`, which is also the schedule's date when the
/// caller resolved for today.
pub fn build_view(
    resolved: &ResolvedSchedule,
    grace: &GracePeriodTable,
    now: NaiveDateTime,
    locale: Locale,
) -> PrayerTimesView {
    let schedule = &resolved.schedule;
    let state = classify(&CanonicalTimes::from(schedule), grace, now);
    let today = now.date();

    PrayerTimesView {
        fajr: format_time_of_day(schedule.fajr),
        imsak: format_time_of_day(schedule.imsak),
        sunrise: format_time_of_day(schedule.sunrise),
        dhuhr: format_time_of_day(schedule.dhuhr),
        asr: format_time_of_day(schedule.asr),
        maghrib: format_time_of_day(schedule.maghrib),
        isha: format_time_of_day(schedule.isha),
        gregorian_date: format_gregorian(today, locale),
        hijri_date: format_hijri(today, locale).unwrap_or_default(),
        current_time: now.format("%H:%M:%S").to_string(),
        next_prayer: state.prayer,
        time_until_next: state.remaining_minutes,
        seconds_until_next: state.remaining_seconds,
        is_grace_countdown: state.in_grace,
        grace_times: grace_times(schedule, grace),
        source: resolved.source,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::prayer::static_default_schedule;
    use chrono::NaiveDate;

    fn now(h: u32, m: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2026, 10, 14)
            .unwrap()
            .and_hms_opt(h, m, 0)
            .unwrap()
    }

    fn resolved() -> ResolvedSchedule {
        ResolvedSchedule {
            schedule: static_default_schedule(now(0, 0).date(), "Asia/Jakarta", 10),
            source: ScheduleSource::StaticDefault,
        }
    }

    #[test]
    fn grace_countdown_view() {
        let view = build_view(&resolved(), &GracePeriodTable::default(), now(4, 40), Locale::En);

        assert_eq!(view.fajr, "04:30");
        assert_eq!(view.imsak, "04:20");
        assert_eq!(view.current_time, "04:40:00");
        assert_eq!(view.next_prayer, Prayer::Fajr);
        assert!(view.is_grace_countdown);
        assert_eq!(view.seconds_until_next, 300);
        assert_eq!(view.time_until_next, 5);
        assert_eq!(view.grace_times[&Prayer::Fajr], "04:45");
        assert_eq!(view.grace_times[&Prayer::Maghrib], "17:50");
        assert_eq!(view.gregorian_date, "Wednesday, 14 October 2026");
        assert!(!view.hijri_date.is_empty());
    }

    #[test]
    fn serializes_with_flat_wire_names() {
        let view = build_view(&resolved(), &GracePeriodTable::default(), now(12, 0), Locale::Id);
        let json = serde_json::to_value(&view).unwrap();

        assert_eq!(json["next_prayer"], "asr");
        assert_eq!(json["is_grace_countdown"], false);
        assert_eq!(json["source"], "static_default");
        assert_eq!(json["grace_times"]["dhuhr"], "11:55");
        assert_eq!(json["gregorian_date"], "Rabu, 14 Oktober 2026");
    }
}
