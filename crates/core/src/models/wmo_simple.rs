//! WMO-simple nowcast
//!
//! Maps the WMO barometric tendency class together with the current pressure
//! level straight onto a short-range outcome. Valid for roughly 1-3 hours:
//! beyond that its confidence decays quickly and the classical algorithms take
//! over.

use super::persistence::pressure_level_state;
use super::r#trait::{Forecaster, ModelOutput};
use super::trend::{classify_trend, tendency_magnitude, TendencyMagnitude, TrendDirection};
use crate::config::ForecastConfig;
use crate::core_types::observation::Observation;
use crate::core_types::units::{Hectopascals, Hours, PressureTendency};
use crate::core_types::weather::WeatherState;

/// Confidence while inside the nowcast validity window
const PEAK_CONFIDENCE: f64 = 0.8;

/// e-folding time (h) of the confidence decay past the validity window
const DECAY_HOURS: f64 = 3.0;

/// Confidence multiplier when the trend is unknown and taken as steady
const MISSING_TREND_FACTOR: f64 = 0.5;

/// WMO tendency nowcast
#[derive(Debug, Clone, Copy, Default)]
pub struct WmoSimple;

/// One step toward fair weather
fn improved(state: WeatherState) -> WeatherState {
    match state {
        WeatherState::Lightning | WeatherState::Pouring => WeatherState::Rainy,
        WeatherState::Rainy => WeatherState::PartlyRainy,
        WeatherState::PartlyRainy | WeatherState::Cloudy => WeatherState::PartlyCloudy,
        WeatherState::PartlyCloudy | WeatherState::Sunny => WeatherState::Sunny,
    }
}

impl WmoSimple {
    /// Outcome for a tendency class at a pressure level
    ///
    /// # Arguments
    ///
    /// * `direction` - Dead-banded trend direction
    /// * `magnitude` - WMO tendency bucket
    /// * `pressure` - Current sea-level pressure
    #[must_use]
    pub fn outcome(
        direction: TrendDirection,
        magnitude: TendencyMagnitude,
        pressure: Hectopascals,
    ) -> (WeatherState, &'static str) {
        let level = pressure_level_state(pressure);
        match (direction, magnitude) {
            (TrendDirection::Steady, _) | (_, TendencyMagnitude::Steady) => {
                (level, "No significant change")
            }
            (TrendDirection::Falling, TendencyMagnitude::VeryRapid) => {
                (WeatherState::Lightning, "Storm likely within hours")
            }
            (TrendDirection::Falling, TendencyMagnitude::Quick) => {
                if *pressure < 1010.0 {
                    (WeatherState::Pouring, "Heavy rain likely soon")
                } else {
                    (WeatherState::Rainy, "Rain likely soon")
                }
            }
            (TrendDirection::Falling, TendencyMagnitude::Moderate) => {
                if *pressure < 1000.0 {
                    (WeatherState::Rainy, "Rain likely")
                } else if *pressure < 1015.0 {
                    (WeatherState::PartlyRainy, "Becoming unsettled, showers possible")
                } else {
                    (WeatherState::Cloudy, "Clouding over")
                }
            }
            (TrendDirection::Rising, TendencyMagnitude::Moderate) => {
                (improved(level), "Slowly improving")
            }
            (TrendDirection::Rising, TendencyMagnitude::Quick) => {
                if *pressure < 1000.0 {
                    (WeatherState::PartlyRainy, "Clearing showers")
                } else {
                    (WeatherState::PartlyCloudy, "Clearing, becoming fair")
                }
            }
            (TrendDirection::Rising, TendencyMagnitude::VeryRapid) => {
                (WeatherState::PartlyCloudy, "Rapid clearing, windy")
            }
        }
    }

    /// Confidence after `horizon` hours with a known trend
    ///
    /// Flat through the persistence band, then an exponential decay.
    #[must_use]
    pub fn confidence(horizon: Hours, config: &ForecastConfig) -> f64 {
        let past_window = (*horizon - config.blend.persistence_band_end_h).max(0.0);
        PEAK_CONFIDENCE * (-past_window / DECAY_HOURS).exp()
    }
}

impl Forecaster for WmoSimple {
    fn is_available(&self, observation: &Observation) -> bool {
        observation.pressure().is_some()
    }

    fn forecast(
        &self,
        observation: &Observation,
        horizon: Hours,
        config: &ForecastConfig,
    ) -> Option<ModelOutput> {
        let pressure = observation.pressure()?;
        let (trend, factor) = match observation.pressure_trend() {
            Some(trend) => (trend, 1.0),
            None => (PressureTendency::new(0.0), MISSING_TREND_FACTOR),
        };

        let direction = classify_trend(trend, config.trend.dead_band_hpa_per_3h);
        let magnitude = tendency_magnitude(trend, &config.trend);
        let (state, text) = Self::outcome(direction, magnitude, pressure);

        Some(ModelOutput {
            state,
            confidence: Self::confidence(horizon, config) * factor,
            text,
            code: None,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core_types::observation::Hemisphere;
    use chrono::{TimeZone, Utc};

    fn observation(pressure: f64) -> Observation {
        let at = Utc.with_ymd_and_hms(2024, 3, 2, 6, 0, 0).unwrap();
        Observation::new(at, Hemisphere::North).with_pressure(pressure)
    }

    #[test]
    fn test_requires_pressure() {
        let config = ForecastConfig::default();
        let at = Utc.with_ymd_and_hms(2024, 3, 2, 6, 0, 0).unwrap();
        let bare = Observation::new(at, Hemisphere::North).with_pressure_trend(-3.0);
        assert!(!WmoSimple.is_available(&bare));
        assert!(WmoSimple.forecast(&bare, Hours::new(2.0), &config).is_none());
    }

    #[test]
    fn test_rapid_fall_is_stormy() {
        let config = ForecastConfig::default();
        let obs = observation(1002.0).with_pressure_trend(-7.0);
        let out = WmoSimple.forecast(&obs, Hours::new(2.0), &config).unwrap();
        assert_eq!(out.state, WeatherState::Lightning);
    }

    #[test]
    fn test_missing_trend_is_steady_with_lower_confidence() {
        let config = ForecastConfig::default();
        let known = observation(1020.0).with_pressure_trend(0.2);
        let unknown = observation(1020.0);
        let a = WmoSimple.forecast(&known, Hours::new(2.0), &config).unwrap();
        let b = WmoSimple.forecast(&unknown, Hours::new(2.0), &config).unwrap();
        assert_eq!(a.state, b.state);
        assert!(b.confidence < a.confidence);
    }

    #[test]
    fn test_confidence_flat_then_decays() {
        let config = ForecastConfig::default();
        let c = |h| WmoSimple::confidence(Hours::new(h), &config);
        assert!((c(0.0) - c(3.0)).abs() < 1e-12);
        assert!(c(6.0) < c(3.0));
        assert!(c(24.0) < 0.01);
    }

    #[test]
    fn test_rising_never_worsens_level() {
        for pressure in (960..=1045).step_by(5) {
            let p = Hectopascals::new(f64::from(pressure));
            let level = pressure_level_state(p);
            for magnitude in [
                TendencyMagnitude::Moderate,
                TendencyMagnitude::Quick,
                TendencyMagnitude::VeryRapid,
            ] {
                let (state, _) = WmoSimple::outcome(TrendDirection::Rising, magnitude, p);
                assert!(
                    state.ordinal() <= level.ordinal().max(WeatherState::PartlyRainy.ordinal()),
                    "{pressure} hPa {magnitude:?} gave {state}"
                );
            }
        }
    }
}
