//! Precipitation phase from air temperature
//!
//! The phase describes what would fall, not whether anything will: it depends
//! on the current temperature only, so a dry forecast still reports the phase
//! a shower would take.

use crate::config::PrecipitationConfig;
use crate::core_types::units::Celsius;
use serde::{Deserialize, Serialize};

/// Phase of any precipitation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PrecipitationType {
    /// Phase unknown (no temperature reading)
    None,
    /// Liquid
    Rain,
    /// Frozen
    Snow,
    /// Sleet or a rain/snow mix
    Mixed,
}

impl PrecipitationType {
    /// Classify from temperature
    ///
    /// At or below `snow_max_c` is snow, at or above `rain_min_c` is rain,
    /// and the band between is mixed.
    #[must_use]
    pub fn classify(temperature: Option<Celsius>, config: &PrecipitationConfig) -> Self {
        let Some(temperature) = temperature else {
            return PrecipitationType::None;
        };
        if *temperature <= config.snow_max_c {
            PrecipitationType::Snow
        } else if *temperature >= config.rain_min_c {
            PrecipitationType::Rain
        } else {
            PrecipitationType::Mixed
        }
    }

    /// Stable identifier (matches the serde representation)
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            PrecipitationType::None => "none",
            PrecipitationType::Rain => "rain",
            PrecipitationType::Snow => "snow",
            PrecipitationType::Mixed => "mixed",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_band_edges() {
        let config = PrecipitationConfig::default();
        let at = |t| PrecipitationType::classify(Some(Celsius::new(t)), &config);
        assert_eq!(at(-5.0), PrecipitationType::Snow);
        assert_eq!(at(0.0), PrecipitationType::Snow);
        assert_eq!(at(1.0), PrecipitationType::Mixed);
        assert_eq!(at(2.0), PrecipitationType::Rain);
        assert_eq!(at(25.0), PrecipitationType::Rain);
    }

    #[test]
    fn test_missing_temperature() {
        let config = PrecipitationConfig::default();
        assert_eq!(
            PrecipitationType::classify(None, &config),
            PrecipitationType::None
        );
    }
}
