//! Domain logic for the mosque information display.
//!
//! No I/O lives here apart from the async seams that the sources crate
//! implements:
//!
//! - [`resolver`]: ordered prayer-time source chain with manual override and
//!   static fallback.
//! - [`countdown`]: next-prayer / grace-window classifier.
//! - [`alert`]: distance-filtered seismic and severe-weather alerts.
//! - [`calendar`]: Gregorian and Hijri date strings.
//! - [`settings`]: the persisted settings document.

pub mod alert;
pub mod calendar;
pub mod clock;
pub mod countdown;
pub mod display;
pub mod error;
pub mod geo;
pub mod method;
pub mod prayer;
pub mod resolver;
pub mod settings;
pub mod types;
pub mod weather;
