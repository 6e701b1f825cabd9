//! Upstream data providers for the display backend.
//!
//! Each adapter implements one of the core seams:
//!
//! - [`AladhanSource`] and [`PrayZoneSource`] implement
//!   [`PrayerTimeSource`](masjid_core::resolver::PrayerTimeSource).
//! - [`OpenWeatherFeed`] implements
//!   [`WeatherFeed`](masjid_core::weather::WeatherFeed).
//! - [`BmkgFeed`] implements [`HazardFeed`](masjid_core::alert::HazardFeed).
//!
//! Response parsing is kept in pure functions over the body text so it can be
//! exercised without network access.

pub mod aladhan;
pub mod bmkg;
pub mod error;
pub mod http;
pub mod openweather;
pub mod prayzone;
mod times;

pub use aladhan::AladhanSource;
pub use bmkg::BmkgFeed;
pub use error::SourceError;
pub use openweather::OpenWeatherFeed;
pub use prayzone::PrayZoneSource;
