//! Next-prayer / iqomah countdown classifier.
//!
//! Given today's five canonical prayer times, a grace table and the current
//! civil time at the site, decide whether the display should count down to
//! the congregation (grace window active) or to the next call to prayer.
//!
//! The classifier is a pure function of its inputs. All instants are composed
//! on `now`'s civil date, so the only timezone dependency is whatever was
//! baked into `now` by the caller.

use chrono::{Duration, NaiveDateTime, NaiveTime};
use serde::Serialize;

use crate::prayer::{parse_time_of_day, GracePeriodTable, Prayer, Schedule};

/// Today's canonical prayer times, each possibly absent.
///
/// Absent entries come from unparsable input and are skipped by the scan.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CanonicalTimes {
    times: [Option<NaiveTime>; 5],
}

impl CanonicalTimes {
    pub fn new(entries: impl IntoIterator<Item = (Prayer, Option<NaiveTime>)>) -> Self {
        let mut times = [None; 5];
        for (prayer, time) in entries {
            times[Self::index(prayer)] = time;
        }
        Self { times }
    }

    /// Parse raw `HH:MM` strings; entries that fail to parse become absent.
    pub fn parse<'a>(entries: impl IntoIterator<Item = (Prayer, &'a str)>) -> Self {
        Self::new(entries.into_iter().map(|(prayer, raw)| {
            let parsed = parse_time_of_day(raw);
            if let Err(e) = &parsed {
                tracing::debug!(prayer = %prayer, error = %e, "Skipping unparsable prayer time");
            }
            (prayer, parsed.ok())
        }))
    }

    pub fn get(&self, prayer: Prayer) -> Option<NaiveTime> {
        self.times[Self::index(prayer)]
    }

    fn index(prayer: Prayer) -> usize {
        match prayer {
            Prayer::Fajr => 0,
            Prayer::Dhuhr => 1,
            Prayer::Asr => 2,
            Prayer::Maghrib => 3,
            Prayer::Isha => 4,
        }
    }
}

impl From<&Schedule> for CanonicalTimes {
    fn from(schedule: &Schedule) -> Self {
        Self::new(Prayer::ALL.map(|p| (p, Some(schedule.time_of(p)))))
    }
}

/// Which countdown the display shows and how long is left.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ResolvedState {
    /// The prayer the countdown refers to.
    pub prayer: Prayer,
    /// `true` while inside the call-to-prayer-to-congregation window.
    pub in_grace: bool,
    /// Remaining whole seconds, never negative.
    pub remaining_seconds: i64,
    /// Remaining whole minutes (floor of seconds / 60).
    pub remaining_minutes: i64,
}

impl ResolvedState {
    fn new(prayer: Prayer, in_grace: bool, remaining: Duration) -> Self {
        let remaining_seconds = remaining.num_seconds().max(0);
        Self {
            prayer,
            in_grace,
            remaining_seconds,
            remaining_minutes: remaining_seconds / 60,
        }
    }

    /// Returned when nothing in the schedule is usable.
    pub fn zero() -> Self {
        Self::new(Prayer::Fajr, false, Duration::zero())
    }
}

/// Classify `now` against today's prayer times and grace table.
///
/// 1. Inside a grace window (`prayer <= now < prayer + grace`): first match in
///    canonical order wins.
/// 2. Otherwise the first prayer still ahead today.
/// 3. Otherwise Fajr of the following civil day.
///
/// Absent times are skipped; with no usable Fajr for the wrap-around, or no
/// usable times at all, the zero state is returned.
pub fn classify(
    times: &CanonicalTimes,
    grace: &GracePeriodTable,
    now: NaiveDateTime,
) -> ResolvedState {
    let today = now.date();

    let scheduled: Vec<(Prayer, NaiveDateTime)> = Prayer::ALL
        .into_iter()
        .filter_map(|prayer| times.get(prayer).map(|t| (prayer, today.and_time(t))))
        .collect();

    for &(prayer, adhan) in &scheduled {
        let grace_end = adhan + Duration::minutes(grace.minutes_for(prayer));
        if adhan <= now && now < grace_end {
            return ResolvedState::new(prayer, true, grace_end - now);
        }
    }

    if let Some(&(prayer, adhan)) = scheduled.iter().find(|(_, adhan)| *adhan > now) {
        return ResolvedState::new(prayer, false, adhan - now);
    }

    let fajr_tomorrow = times
        .get(Prayer::Fajr)
        .and_then(|fajr| today.succ_opt().map(|tomorrow| tomorrow.and_time(fajr)));

    match fajr_tomorrow {
        Some(next) => ResolvedState::new(Prayer::Fajr, false, next - now),
        None => ResolvedState::zero(),
    }
}
