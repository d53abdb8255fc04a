//! Discrete weather states and classical forecast codes
//!
//! [`WeatherState`] is the single vocabulary every model speaks; the
//! orchestrator blends on it and nothing else. [`ForecastCode`] is the 26-entry
//! letter code (A-Z) produced only by the classical barometric algorithms and
//! kept for detail output.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Weather condition shared across all forecast models
///
/// The discriminants are an ordinal scale from fair to severe. That ordering
/// is only meaningful to the weighted blend; everything else keys on the
/// variant itself.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
#[repr(u8)]
pub enum WeatherState {
    /// Clear sky
    Sunny = 0,
    /// Broken cloud, dry
    PartlyCloudy = 1,
    /// Showers with bright intervals
    PartlyRainy = 2,
    /// Overcast, mostly dry
    Cloudy = 3,
    /// Steady rain
    Rainy = 4,
    /// Heavy rain
    Pouring = 5,
    /// Thunderstorm
    Lightning = 6,
}

impl WeatherState {
    /// All states in ordinal order
    pub const ALL: [WeatherState; 7] = [
        WeatherState::Sunny,
        WeatherState::PartlyCloudy,
        WeatherState::PartlyRainy,
        WeatherState::Cloudy,
        WeatherState::Rainy,
        WeatherState::Pouring,
        WeatherState::Lightning,
    ];

    /// Highest ordinal value
    pub const MAX_ORDINAL: u8 = 6;

    /// Position on the fair-to-severe scale (0-6)
    #[inline]
    #[must_use]
    pub const fn ordinal(self) -> u8 {
        self as u8
    }

    /// State for an ordinal, `None` outside 0-6
    #[must_use]
    pub fn from_ordinal(ordinal: u8) -> Option<Self> {
        Self::ALL.get(usize::from(ordinal)).copied()
    }

    /// State for an ordinal, saturating at both ends of the scale
    #[must_use]
    pub fn from_ordinal_saturating(ordinal: i32) -> Self {
        let clamped = ordinal.clamp(0, i32::from(Self::MAX_ORDINAL)) as u8;
        Self::ALL[usize::from(clamped)]
    }

    /// Whether this state implies precipitation reaching the ground
    #[must_use]
    pub const fn is_precipitating(self) -> bool {
        matches!(
            self,
            WeatherState::PartlyRainy
                | WeatherState::Rainy
                | WeatherState::Pouring
                | WeatherState::Lightning
        )
    }

    /// Stable identifier (matches the serde representation)
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            WeatherState::Sunny => "sunny",
            WeatherState::PartlyCloudy => "partly_cloudy",
            WeatherState::PartlyRainy => "partly_rainy",
            WeatherState::Cloudy => "cloudy",
            WeatherState::Rainy => "rainy",
            WeatherState::Pouring => "pouring",
            WeatherState::Lightning => "lightning",
        }
    }
}

impl fmt::Display for WeatherState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Forecast phrases for letter codes A-Z
///
/// Shared by Zambretti and Negretti-Zambra: both algorithms resolve to an
/// index into this list, each through its own lookup tables.
pub const FORECAST_TEXTS: [&str; 26] = [
    "Settled fine",
    "Fine weather",
    "Becoming fine",
    "Fine, becoming less settled",
    "Fine, possible showers",
    "Fairly fine, improving",
    "Fairly fine, possible showers early",
    "Fairly fine, showery later",
    "Showery early, improving",
    "Changeable, mending",
    "Fairly fine, showers likely",
    "Rather unsettled, clearing later",
    "Unsettled, probably improving",
    "Showery, bright intervals",
    "Showery, becoming less settled",
    "Changeable, some rain",
    "Unsettled, short fine intervals",
    "Unsettled, rain later",
    "Unsettled, some rain",
    "Mostly very unsettled",
    "Occasional rain, worsening",
    "Rain at times, very unsettled",
    "Rain at frequent intervals",
    "Rain, very unsettled",
    "Stormy, may improve",
    "Stormy, much rain",
];

/// Classical forecast code: index 0-25 with letter A-Z
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ForecastCode(u8);

impl ForecastCode {
    /// Highest valid index ('Z')
    pub const MAX: u8 = 25;

    /// Create a code, clamping to 0-25
    #[must_use]
    pub fn new(index: i32) -> Self {
        ForecastCode(index.clamp(0, i32::from(Self::MAX)) as u8)
    }

    /// Code for a letter A-Z (case-insensitive)
    #[must_use]
    pub fn from_letter(letter: char) -> Option<Self> {
        let upper = letter.to_ascii_uppercase();
        upper
            .is_ascii_uppercase()
            .then(|| ForecastCode(upper as u8 - b'A'))
    }

    /// Table index 0-25
    #[inline]
    #[must_use]
    pub const fn index(self) -> u8 {
        self.0
    }

    /// Letter A-Z
    #[inline]
    #[must_use]
    pub const fn letter(self) -> char {
        (b'A' + self.0) as char
    }

    /// Forecast phrase for this code
    #[must_use]
    pub fn text(self) -> &'static str {
        FORECAST_TEXTS[usize::from(self.0)]
    }
}

impl fmt::Display for ForecastCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({})", self.letter(), self.text())
    }
}
