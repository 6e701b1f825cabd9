//! Injectable wall-clock source.
//!
//! Handlers never call `Utc::now()` directly; they read the clock held in
//! application state so tests can pin "now" to a known instant.

use chrono::{DateTime, NaiveDateTime, Utc};
use chrono_tz::Tz;

/// Timezone used when the configured name is not a known IANA zone.
pub const DEFAULT_TIMEZONE: Tz = chrono_tz::Asia::Kuala_Lumpur;

pub trait Clock: Send + Sync {
    fn now_utc(&self) -> DateTime<Utc>;

    /// Current civil time at the site.
    fn now_local(&self, tz: Tz) -> NaiveDateTime {
        self.now_utc().with_timezone(&tz).naive_local()
    }
}

/// Real system time.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now_utc(&self) -> DateTime<Utc> {
        Utc::now()
    }
}

/// A clock frozen at one instant.
#[derive(Debug, Clone, Copy)]
pub struct FixedClock(pub DateTime<Utc>);

impl Clock for FixedClock {
    fn now_utc(&self) -> DateTime<Utc> {
        self.0
    }
}

/// Resolve an IANA timezone name, falling back to [`DEFAULT_TIMEZONE`].
pub fn resolve_timezone(name: &str) -> Tz {
    match name.trim().parse::<Tz>() {
        Ok(tz) => tz,
        Err(_) => {
            tracing::warn!(
                timezone = name,
                fallback = %DEFAULT_TIMEZONE,
                "Unknown timezone, using fallback"
            );
            DEFAULT_TIMEZONE
        }
    }
}
