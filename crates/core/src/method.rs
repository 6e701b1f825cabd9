//! Named prayer-time calculation conventions.
//!
//! The settings document stores the method as a free-form string. Values are
//! coerced, never rejected: unknown names fall back to [`CalculationMethod::Isna`],
//! and bare numbers are read as the legacy numeric `school` convention used by
//! older prayer-time services.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Upstream calculation convention (regional religious authority).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum CalculationMethod {
    /// Islamic Society of North America.
    #[default]
    Isna,
    /// Muslim World League.
    Mwl,
    /// Egyptian General Authority of Survey.
    Egyptian,
    /// University of Islamic Sciences, Karachi.
    Karachi,
    /// Umm Al-Qura University, Makkah.
    Makkah,
    /// Institute of Geophysics, University of Tehran.
    Tehran,
    /// Majlis Ugama Islam Singapura.
    Singapore,
    /// Kementerian Agama Republik Indonesia.
    Kemenag,
    /// Jabatan Kemajuan Islam Malaysia.
    Jakim,
}

impl CalculationMethod {
    pub const ALL: [CalculationMethod; 9] = [
        CalculationMethod::Isna,
        CalculationMethod::Mwl,
        CalculationMethod::Egyptian,
        CalculationMethod::Karachi,
        CalculationMethod::Makkah,
        CalculationMethod::Tehran,
        CalculationMethod::Singapore,
        CalculationMethod::Kemenag,
        CalculationMethod::Jakim,
    ];

    /// Canonical upper-case name as persisted in settings.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Isna => "ISNA",
            Self::Mwl => "MWL",
            Self::Egyptian => "EGYPTIAN",
            Self::Karachi => "KARACHI",
            Self::Makkah => "MAKKAH",
            Self::Tehran => "TEHRAN",
            Self::Singapore => "SINGAPORE",
            Self::Kemenag => "KEMENAG",
            Self::Jakim => "JAKIM",
        }
    }

    /// Map a legacy numeric `school` id to a named method.
    ///
    /// The legacy convention only knows six authorities; anything else is `None`.
    pub fn from_legacy_school(code: u8) -> Option<Self> {
        match code {
            1 => Some(Self::Karachi),
            2 => Some(Self::Isna),
            3 => Some(Self::Mwl),
            4 => Some(Self::Makkah),
            5 => Some(Self::Egyptian),
            7 => Some(Self::Tehran),
            _ => None,
        }
    }

    /// The legacy numeric `school` id for this method.
    ///
    /// Methods the legacy convention lacks map to Muslim World League (3).
    pub fn legacy_school(self) -> u8 {
        match self {
            Self::Karachi => 1,
            Self::Isna => 2,
            Self::Makkah => 4,
            Self::Egyptian => 5,
            Self::Tehran => 7,
            Self::Mwl | Self::Singapore | Self::Kemenag | Self::Jakim => 3,
        }
    }

    /// Lenient parse used for settings coercion.
    pub fn coerce(raw: &str) -> Self {
        let name = raw.trim().to_ascii_uppercase().replace(|c: char| c == '-' || c == ' ', "_");

        if let Ok(code) = name.parse::<u8>() {
            return Self::from_legacy_school(code).unwrap_or_default();
        }

        match name.as_str() {
            "MWL" | "MUSLIM_WORLD_LEAGUE" => Self::Mwl,
            "EGYPTIAN" | "EGYPT" => Self::Egyptian,
            "KARACHI" => Self::Karachi,
            "MAKKAH" | "UMM_AL_QURA" | "UMMALQURA" => Self::Makkah,
            "TEHRAN" => Self::Tehran,
            "SINGAPORE" | "MUIS" => Self::Singapore,
            "KEMENAG" | "INDONESIA" => Self::Kemenag,
            "JAKIM" | "MALAYSIA" => Self::Jakim,
            _ => Self::Isna,
        }
    }
}

impl From<String> for CalculationMethod {
    fn from(raw: String) -> Self {
        Self::coerce(&raw)
    }
}

impl From<CalculationMethod> for String {
    fn from(method: CalculationMethod) -> Self {
        method.as_str().to_string()
    }
}

impl fmt::Display for CalculationMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn coerces_canonical_names() {
        for method in CalculationMethod::ALL {
            assert_eq!(CalculationMethod::coerce(method.as_str()), method);
        }
    }

    #[test]
    fn coerces_aliases_case_insensitively() {
        assert_eq!(CalculationMethod::coerce("umm-al-qura"), CalculationMethod::Makkah);
        assert_eq!(CalculationMethod::coerce(" muis "), CalculationMethod::Singapore);
        assert_eq!(CalculationMethod::coerce("egypt"), CalculationMethod::Egyptian);
    }

    #[test]
    fn unknown_name_falls_back_to_isna() {
        assert_eq!(CalculationMethod::coerce("CUSTOM"), CalculationMethod::Isna);
        assert_eq!(CalculationMethod::coerce(""), CalculationMethod::Isna);
    }

    #[test]
    fn numeric_input_uses_legacy_school_convention() {
        assert_eq!(CalculationMethod::coerce("1"), CalculationMethod::Karachi);
        assert_eq!(CalculationMethod::coerce("3"), CalculationMethod::Mwl);
        assert_eq!(CalculationMethod::coerce("7"), CalculationMethod::Tehran);
        assert_eq!(CalculationMethod::coerce("42"), CalculationMethod::Isna);
    }

    #[test]
    fn legacy_school_round_trips_for_supported_methods() {
        for code in [1, 2, 3, 4, 5, 7] {
            let method = CalculationMethod::from_legacy_school(code).unwrap();
            assert_eq!(method.legacy_school(), code);
        }
    }

    #[test]
    fn regional_methods_map_to_mwl_school() {
        assert_eq!(CalculationMethod::Kemenag.legacy_school(), 3);
        assert_eq!(CalculationMethod::Jakim.legacy_school(), 3);
    }

    #[test]
    fn serde_uses_upper_case_string() {
        let json = serde_json::to_string(&CalculationMethod::Kemenag).unwrap();
        assert_eq!(json, "\"KEMENAG\"");
        let parsed: CalculationMethod = serde_json::from_str("\"karachi\"").unwrap();
        assert_eq!(parsed, CalculationMethod::Karachi);
    }
}
