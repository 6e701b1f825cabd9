//! Great-circle distance between two points on a spherical earth.

use serde::Serialize;

use crate::error::CoreError;

/// Mean earth radius in kilometres.
pub const EARTH_RADIUS_KM: f64 = 6371.0;

/// Latitude/longitude in decimal degrees.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Coordinates {
    pub latitude: f64,
    pub longitude: f64,
}

impl Coordinates {
    pub fn new(latitude: f64, longitude: f64) -> Self {
        Self {
            latitude,
            longitude,
        }
    }
}

/// Parse a `"lat,lon"` pair such as `"-7.52,110.77"`.
pub fn parse_coordinates(raw: &str) -> Result<Coordinates, CoreError> {
    let invalid = || CoreError::Parse(format!("invalid coordinates '{raw}'"));

    let (lat, lon) = raw.split_once(',').ok_or_else(invalid)?;
    let latitude: f64 = lat.trim().parse().map_err(|_| invalid())?;
    let longitude: f64 = lon.trim().parse().map_err(|_| invalid())?;

    if !(-90.0..=90.0).contains(&latitude) || !(-180.0..=180.0).contains(&longitude) {
        return Err(invalid());
    }
    Ok(Coordinates::new(latitude, longitude))
}

/// Haversine distance in kilometres.
pub fn haversine_km(a: Coordinates, b: Coordinates) -> f64 {
    let phi1 = a.latitude.to_radians();
    let phi2 = b.latitude.to_radians();
    let d_phi = (b.latitude - a.latitude).to_radians();
    let d_lambda = (b.longitude - a.longitude).to_radians();

    let h = (d_phi / 2.0).sin().powi(2) + phi1.cos() * phi2.cos() * (d_lambda / 2.0).sin().powi(2);
    2.0 * EARTH_RADIUS_KM * h.sqrt().min(1.0).asin()
}
