//! The persisted site settings document.
//!
//! Stored as one JSON document. Every field has a default so that older or
//! partial documents still deserialize, and an absent document is simply
//! [`MosqueSettings::default`].

use serde::{Deserialize, Serialize};

use crate::alert::AlertSite;
use crate::calendar::Locale;
use crate::geo::Coordinates;
use crate::method::CalculationMethod;
use crate::prayer::{GracePeriodTable, ManualTimes, MAX_IMSAK_OFFSET_MINUTES};
use crate::resolver::LocationConfig;
use crate::types::Timestamp;

pub const DEFAULT_ADMIN_PASSWORD: &str = "admin123";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MosqueSettings {
    pub mosque_name: String,
    pub mosque_address: String,
    pub mosque_logo: String,
    pub latitude: f64,
    pub longitude: f64,
    pub timezone: String,
    pub calculation_method: CalculationMethod,
    /// Minutes Imsak precedes Fajr.
    pub imsak_offset: u32,
    pub grace_periods: GracePeriodTable,
    pub use_manual_times: bool,
    pub manual_prayer_times: Option<ManualTimes>,
    pub theme: String,
    pub background_image: String,
    pub locale: Locale,
    /// BMKG province feed name, e.g. `JawaTimur`.
    pub weather_province: String,
    /// Area name within the province feed.
    pub weather_city: String,
    pub admin_password: String,
    pub updated_at: Option<Timestamp>,
}

impl Default for MosqueSettings {
    fn default() -> Self {
        Self {
            mosque_name: "Masjid Al-Noor".to_string(),
            mosque_address: "Jl. Contoh No. 123, Kota Malang".to_string(),
            mosque_logo: String::new(),
            latitude: 3.139,
            longitude: 101.6869,
            timezone: "Asia/Kuala_Lumpur".to_string(),
            calculation_method: CalculationMethod::Isna,
            imsak_offset: 10,
            grace_periods: GracePeriodTable::default(),
            use_manual_times: false,
            manual_prayer_times: None,
            theme: "midnight".to_string(),
            background_image: String::new(),
            locale: Locale::En,
            weather_province: "JawaTimur".to_string(),
            weather_city: "Malang".to_string(),
            admin_password: DEFAULT_ADMIN_PASSWORD.to_string(),
            updated_at: None,
        }
    }
}

impl MosqueSettings {
    /// The location inputs for schedule resolution.
    pub fn location(&self) -> LocationConfig {
        LocationConfig {
            latitude: self.latitude,
            longitude: self.longitude,
            timezone: self.timezone.clone(),
            calculation_method: self.calculation_method,
            imsak_offset: self.imsak_offset.min(MAX_IMSAK_OFFSET_MINUTES),
            use_manual_times: self.use_manual_times,
            manual_times: self.manual_prayer_times.clone(),
        }
    }

    pub fn coordinates(&self) -> Coordinates {
        Coordinates::new(self.latitude, self.longitude)
    }

    pub fn alert_site(&self) -> AlertSite {
        AlertSite {
            coordinates: self.coordinates(),
            province: self.weather_province.clone(),
            city: self.weather_city.clone(),
        }
    }

    /// Merge a partial update. `None` fields are left untouched.
    pub fn apply(&mut self, update: UpdateSettings) {
        let UpdateSettings {
            mosque_name,
            mosque_address,
            mosque_logo,
            latitude,
            longitude,
            timezone,
            calculation_method,
            imsak_offset,
            grace_periods,
            use_manual_times,
            manual_prayer_times,
            theme,
            background_image,
            locale,
            weather_province,
            weather_city,
            admin_password,
        } = update;

        merge(&mut self.mosque_name, mosque_name);
        merge(&mut self.mosque_address, mosque_address);
        merge(&mut self.mosque_logo, mosque_logo);
        merge(&mut self.latitude, latitude);
        merge(&mut self.longitude, longitude);
        merge(&mut self.timezone, timezone);
        merge(&mut self.calculation_method, calculation_method);
        merge(&mut self.imsak_offset, imsak_offset);
        merge(&mut self.grace_periods, grace_periods);
        merge(&mut self.use_manual_times, use_manual_times);
        if let Some(times) = manual_prayer_times {
            self.manual_prayer_times = Some(times);
        }
        merge(&mut self.theme, theme);
        merge(&mut self.background_image, background_image);
        merge(&mut self.locale, locale);
        merge(&mut self.weather_province, weather_province);
        merge(&mut self.weather_city, weather_city);
        merge(&mut self.admin_password, admin_password);
    }
}

fn merge<T>(slot: &mut T, value: Option<T>) {
    if let Some(value) = value {
        *slot = value;
    }
}

/// Partial settings update; absent fields keep their stored value.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct UpdateSettings {
    pub mosque_name: Option<String>,
    pub mosque_address: Option<String>,
    pub mosque_logo: Option<String>,
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
    pub timezone: Option<String>,
    pub calculation_method: Option<CalculationMethod>,
    pub imsak_offset: Option<u32>,
    pub grace_periods: Option<GracePeriodTable>,
    pub use_manual_times: Option<bool>,
    pub manual_prayer_times: Option<ManualTimes>,
    pub theme: Option<String>,
    pub background_image: Option<String>,
    pub locale: Option<Locale>,
    pub weather_province: Option<String>,
    pub weather_city: Option<String>,
    pub admin_password: Option<String>,
}
