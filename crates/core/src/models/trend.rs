//! Shared pressure-trend classification
//!
//! One dead-band, one function: the classical algorithms and the nowcasting
//! models must agree on what counts as "steady", otherwise a trend hovering at
//! the threshold makes one model flip while another does not.

use crate::config::TrendConfig;
use crate::core_types::units::PressureTendency;
use serde::{Deserialize, Serialize};

/// Sign of a pressure trend after the dead-band is applied
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TrendDirection {
    /// Trend at or above the dead-band
    Rising,
    /// |trend| strictly inside the dead-band
    Steady,
    /// Trend at or below the negative dead-band
    Falling,
}

impl TrendDirection {
    /// Table column for trend-indexed lookups (rising, steady, falling)
    #[must_use]
    pub const fn index(self) -> usize {
        match self {
            TrendDirection::Rising => 0,
            TrendDirection::Steady => 1,
            TrendDirection::Falling => 2,
        }
    }
}

/// WMO barometric tendency magnitude bucket
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TendencyMagnitude {
    /// Inside the dead-band
    Steady,
    /// Dead-band up to the "quickly" edge
    Moderate,
    /// "Quickly" up to the "very rapidly" edge
    Quick,
    /// At or beyond the "very rapidly" edge
    VeryRapid,
}

/// Classify the trend direction with a symmetric dead-band
///
/// The same `|trend| < dead_band` test decides both branches, so a rate of
/// `+dead_band` and `-dead_band` are treated alike.
///
/// # Arguments
///
/// * `trend` - Pressure tendency in hPa/3h
/// * `dead_band` - Half-width of the steady band in hPa/3h
#[must_use]
pub fn classify_trend(trend: PressureTendency, dead_band: f64) -> TrendDirection {
    if trend.abs() < PressureTendency::new(dead_band) {
        TrendDirection::Steady
    } else if trend.is_falling() {
        TrendDirection::Falling
    } else {
        TrendDirection::Rising
    }
}

/// Bucket the trend magnitude on the WMO tendency scale
#[must_use]
pub fn tendency_magnitude(trend: PressureTendency, config: &TrendConfig) -> TendencyMagnitude {
    let magnitude = *trend.abs();
    if magnitude < config.dead_band_hpa_per_3h {
        TendencyMagnitude::Steady
    } else if magnitude < config.quick_hpa_per_3h {
        TendencyMagnitude::Moderate
    } else if magnitude < config.very_rapid_hpa_per_3h {
        TendencyMagnitude::Quick
    } else {
        TendencyMagnitude::VeryRapid
    }
}

/// How decisive a trend is, 0 (flat) to 1 (at or beyond "very rapidly")
///
/// Uses the raw magnitude rather than the dead-banded class, so confidence
/// grows smoothly with the trend instead of stepping at the threshold.
#[must_use]
pub fn trend_decisiveness(trend: PressureTendency, config: &TrendConfig) -> f64 {
    (*trend.abs() / config.very_rapid_hpa_per_3h).clamp(0.0, 1.0)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_dead_band_is_symmetric() {
        let band = 1.6;
        assert_eq!(
            classify_trend(PressureTendency::new(1.59), band),
            TrendDirection::Steady
        );
        assert_eq!(
            classify_trend(PressureTendency::new(-1.59), band),
            TrendDirection::Steady
        );
        assert_eq!(
            classify_trend(PressureTendency::new(1.6), band),
            TrendDirection::Rising
        );
        assert_eq!(
            classify_trend(PressureTendency::new(-1.6), band),
            TrendDirection::Falling
        );
    }

    #[test]
    fn test_zero_dead_band_only_zero_is_steady() {
        assert_eq!(
            classify_trend(PressureTendency::new(0.0), 0.0),
            TrendDirection::Rising
        );
        assert_eq!(
            classify_trend(PressureTendency::new(-0.01), 0.0),
            TrendDirection::Falling
        );
    }

    #[test]
    fn test_magnitude_buckets() {
        let config = TrendConfig::default();
        let bucket = |v| tendency_magnitude(PressureTendency::new(v), &config);
        assert_eq!(bucket(0.5), TendencyMagnitude::Steady);
        assert_eq!(bucket(-2.0), TendencyMagnitude::Moderate);
        assert_eq!(bucket(4.0), TendencyMagnitude::Quick);
        assert_eq!(bucket(-6.0), TendencyMagnitude::VeryRapid);
    }

    #[test]
    fn test_decisiveness_is_monotonic_and_bounded() {
        let config = TrendConfig::default();
        let mut last = -1.0;
        for step in 0..=100 {
            let d = trend_decisiveness(PressureTendency::new(-f64::from(step) * 0.1), &config);
            assert!(d >= last);
            assert!((0.0..=1.0).contains(&d));
            last = d;
        }
    }
}
