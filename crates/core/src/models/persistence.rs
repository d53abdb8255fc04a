//! Persistence: "the weather stays as it is now"
//!
//! The current state is read from absolute pressure level, humidity and
//! sunshine. The trend is never used, which keeps persistence available for
//! every observation and makes it the baseline the other models blend toward
//! at short horizons.

use super::r#trait::{Forecaster, ModelOutput};
use crate::config::ForecastConfig;
use crate::core_types::observation::Observation;
use crate::core_types::units::{Hectopascals, Hours};
use crate::core_types::weather::WeatherState;

/// Pressure level ladder (hPa lower edge, state), highest first
const PRESSURE_LEVELS: [(f64, WeatherState); 4] = [
    (1022.0, WeatherState::Sunny),
    (1013.0, WeatherState::PartlyCloudy),
    (1006.0, WeatherState::Cloudy),
    (995.0, WeatherState::Rainy),
];

/// Humidity (%) at which fair-weather states are downgraded to overcast
const SATURATED_HUMIDITY: f64 = 90.0;

/// Irradiance (W/m²) that breaks an overcast reading into partly cloudy
const BRIGHT_SUN_WM2: f64 = 600.0;

/// Irradiance (W/m²) that confirms a clear sky
const FULL_SUN_WM2: f64 = 850.0;

/// Confidence at zero horizon with a pressure reading
const BASE_CONFIDENCE: f64 = 0.98;

/// Confidence at zero horizon from humidity and sunshine only
const BASE_CONFIDENCE_NO_PRESSURE: f64 = 0.6;

/// Fraction of the base confidence kept once the persistence band has passed
const FLOOR_FRACTION: f64 = 0.1;

/// State implied by absolute pressure alone
#[must_use]
pub(crate) fn pressure_level_state(pressure: Hectopascals) -> WeatherState {
    PRESSURE_LEVELS
        .iter()
        .find(|(lower, _)| *pressure >= *lower)
        .map_or(WeatherState::Pouring, |(_, state)| *state)
}

/// Persistence model
#[derive(Debug, Clone, Copy, Default)]
pub struct Persistence;

impl Persistence {
    /// The state right now, with its zero-horizon confidence
    #[must_use]
    pub fn current_state(observation: &Observation) -> (WeatherState, f64) {
        let humidity = observation.humidity().map(|h| *h);
        let solar = observation
            .solar_radiation()
            .filter(|_| observation.is_daytime())
            .map(|s| *s);

        let (mut state, base) = match observation.pressure() {
            Some(pressure) => (pressure_level_state(pressure), BASE_CONFIDENCE),
            None => {
                let fallback = if humidity.is_some_and(|h| h >= 80.0) {
                    WeatherState::Cloudy
                } else {
                    WeatherState::PartlyCloudy
                };
                let base = if humidity.is_some() || solar.is_some() {
                    BASE_CONFIDENCE_NO_PRESSURE
                } else {
                    BASE_CONFIDENCE_NO_PRESSURE / 2.0
                };
                (fallback, base)
            }
        };

        if humidity.is_some_and(|h| h >= SATURATED_HUMIDITY)
            && matches!(state, WeatherState::Sunny | WeatherState::PartlyCloudy)
        {
            state = WeatherState::Cloudy;
        }

        if let Some(solar) = solar {
            state = match state {
                WeatherState::Cloudy if solar >= BRIGHT_SUN_WM2 => WeatherState::PartlyCloudy,
                WeatherState::PartlyCloudy if solar >= FULL_SUN_WM2 => WeatherState::Sunny,
                other => other,
            };
        }

        (state, base)
    }

    /// Confidence after `horizon` hours
    ///
    /// Ramps from the base down to a floor across the persistence band, using
    /// the configured decay curve, and stays at the floor afterwards.
    #[must_use]
    pub fn confidence(base: f64, horizon: Hours, config: &ForecastConfig) -> f64 {
        let progress = *horizon / config.blend.persistence_band_end_h;
        let decay = config.blend.decay_curve.apply(progress);
        base * (1.0 - (1.0 - FLOOR_FRACTION) * decay)
    }
}

fn describe(state: WeatherState) -> &'static str {
    match state {
        WeatherState::Sunny => "Clear and dry",
        WeatherState::PartlyCloudy => "Partly cloudy",
        WeatherState::PartlyRainy => "Showers around",
        WeatherState::Cloudy => "Overcast",
        WeatherState::Rainy => "Raining",
        WeatherState::Pouring => "Heavy rain",
        WeatherState::Lightning => "Thunderstorms",
    }
}

impl Forecaster for Persistence {
    fn is_available(&self, _observation: &Observation) -> bool {
        true
    }

    fn forecast(
        &self,
        observation: &Observation,
        horizon: Hours,
        config: &ForecastConfig,
    ) -> Option<ModelOutput> {
        let (state, base) = Self::current_state(observation);
        Some(ModelOutput {
            state,
            confidence: Self::confidence(base, horizon, config),
            text: describe(state),
            code: None,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core_types::observation::Hemisphere;
    use chrono::{TimeZone, Utc};

    fn observation() -> Observation {
        let at = Utc.with_ymd_and_hms(2024, 5, 10, 12, 0, 0).unwrap();
        Observation::new(at, Hemisphere::North)
    }

    #[test]
    fn test_pressure_ladder() {
        let state = |p| pressure_level_state(Hectopascals::new(p));
        assert_eq!(state(1030.0), WeatherState::Sunny);
        assert_eq!(state(1020.0), WeatherState::PartlyCloudy);
        assert_eq!(state(1008.0), WeatherState::Cloudy);
        assert_eq!(state(1000.0), WeatherState::Rainy);
        assert_eq!(state(980.0), WeatherState::Pouring);
    }

    #[test]
    fn test_trend_is_ignored() {
        let config = ForecastConfig::default();
        let steady = observation().with_pressure(1020.0);
        let falling = steady.clone().with_pressure_trend(-8.0);
        let a = Persistence.forecast(&steady, Hours::new(1.0), &config);
        let b = Persistence.forecast(&falling, Hours::new(1.0), &config);
        assert_eq!(a, b);
    }

    #[test]
    fn test_humidity_and_sun_adjust_state() {
        let humid = observation().with_pressure(1025.0).with_humidity(95.0);
        assert_eq!(Persistence::current_state(&humid).0, WeatherState::Cloudy);

        let bright = observation().with_pressure(1008.0).with_solar_radiation(700.0);
        assert_eq!(
            Persistence::current_state(&bright).0,
            WeatherState::PartlyCloudy
        );

        // Sunshine is ignored at night
        let night = bright.with_daytime(false);
        assert_eq!(Persistence::current_state(&night).0, WeatherState::Cloudy);
    }

    #[test]
    fn test_confidence_decays_across_band() {
        let config = ForecastConfig::default();
        let at = |h| Persistence::confidence(BASE_CONFIDENCE, Hours::new(h), &config);
        assert!((at(0.0) - BASE_CONFIDENCE).abs() < 1e-12);
        assert!(at(1.5) < at(0.0));
        assert!((at(3.0) - BASE_CONFIDENCE * FLOOR_FRACTION).abs() < 1e-12);
        assert!((at(24.0) - at(3.0)).abs() < 1e-12);
    }

    #[test]
    fn test_runs_without_any_sensor() {
        let config = ForecastConfig::default();
        let output = Persistence
            .forecast(&observation(), Hours::ZERO, &config)
            .unwrap();
        assert!(output.confidence < BASE_CONFIDENCE_NO_PRESSURE);
        assert!(output.code.is_none());
    }
}
