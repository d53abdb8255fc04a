//! Zambretti barometric forecaster
//!
//! Table-driven variant of the 1915 Negretti & Zambra pocket forecaster. The
//! sea-level pressure is first nudged by wind direction and season, then
//! bucketed into one of 22 bands across 950-1050 hPa. The trend direction
//! selects one of three option tables, whose entry is the letter code.
//!
//! Wind and seasonal corrections are expressed as a percentage of the
//! barometer range. Wind directions are mirrored in the southern hemisphere,
//! where the moist sector lies to the north.

use super::classical_confidence;
use super::r#trait::{Forecaster, ModelOutput};
use super::trend::{classify_trend, trend_decisiveness, TrendDirection};
use crate::config::{BlendConfig, ForecastConfig};
use crate::core_types::compass::CompassPoint;
use crate::core_types::observation::{Hemisphere, Observation, Season};
use crate::core_types::units::{Degrees, Hectopascals, Hours};
use crate::core_types::weather::{ForecastCode, WeatherState};
use tracing::trace;

/// Bottom of the barometer scale (hPa)
const BAR_BOTTOM: f64 = 950.0;

/// Top of the barometer scale (hPa)
const BAR_TOP: f64 = 1050.0;

/// Number of pressure bands in each option table
const BANDS: usize = 22;

/// Letter index per band, low pressure first, for a rising barometer
const RISE_OPTIONS: [u8; BANDS] = [
    25, 25, 25, 24, 24, 19, 16, 12, 11, 9, 8, 6, 5, 2, 1, 1, 0, 0, 0, 0, 0, 0,
];

/// Letter index per band for a steady barometer
const STEADY_OPTIONS: [u8; BANDS] = [
    25, 25, 25, 25, 25, 25, 23, 23, 22, 18, 15, 13, 10, 4, 1, 1, 0, 0, 0, 0, 0, 0,
];

/// Letter index per band for a falling barometer
const FALL_OPTIONS: [u8; BANDS] = [
    25, 25, 25, 25, 25, 25, 25, 25, 23, 23, 21, 20, 17, 14, 7, 3, 1, 1, 1, 0, 0, 0,
];

/// Pressure correction (% of range) per compass point, clockwise from N
const WIND_ADJUSTMENT: [f64; 16] = [
    6.0, 5.0, 5.0, 2.0, -0.5, -2.0, -5.0, -8.5, -12.0, -10.0, -6.0, -4.5, -3.0, -0.5, 1.5, 3.0,
];

/// Pressure correction (% of range) by season (row) and trend (rising, steady, falling)
const SEASONAL_ADJUSTMENT: [[f64; 3]; 2] = [
    [7.0, 0.0, -7.0], // Summer
    [0.0, 0.0, 0.0],  // Winter
];

/// Weather state for each letter A-Z
const STATE_BY_CODE: [WeatherState; 26] = {
    use WeatherState::{
        Cloudy as C, Lightning as L, PartlyCloudy as PC, PartlyRainy as PR, Pouring as P,
        Rainy as R, Sunny as S,
    };
    [
        S, S, PC, PC, PR, PC, PR, PR, PR, PC, PR, C, C, // A-M
        PR, R, R, R, R, R, R, R, P, P, P, L, L, // N-Z
    ]
};

/// e-folding time (h) of the decay toward climatology beyond the nowcast band
const DECAY_HOURS: f64 = 18.0;

/// Zambretti forecaster
#[derive(Debug, Clone, Copy, Default)]
pub struct Zambretti;

impl Zambretti {
    /// Letter code for already-classified inputs
    ///
    /// # Arguments
    ///
    /// * `pressure` - Sea-level pressure
    /// * `direction` - Dead-banded trend direction
    /// * `wind_direction` - Bearing the wind blows from, if known
    /// * `hemisphere` - Station hemisphere
    /// * `season` - Local season
    #[must_use]
    pub fn code_for(
        pressure: Hectopascals,
        direction: TrendDirection,
        wind_direction: Option<Degrees>,
        hemisphere: Hemisphere,
        season: Season,
    ) -> ForecastCode {
        let range = BAR_TOP - BAR_BOTTOM;
        let mut adjusted = *pressure;

        if let Some(bearing) = wind_direction {
            let bearing = match hemisphere {
                Hemisphere::North => bearing,
                Hemisphere::South => bearing.reversed(),
            };
            let point = CompassPoint::from_bearing(bearing);
            adjusted += range * WIND_ADJUSTMENT[point.index()] / 100.0;
        }
        adjusted += range * SEASONAL_ADJUSTMENT[season.index()][direction.index()] / 100.0;

        let band_width = range / BANDS as f64;
        let band = ((adjusted - BAR_BOTTOM) / band_width)
            .floor()
            .clamp(0.0, (BANDS - 1) as f64) as usize;

        let options = match direction {
            TrendDirection::Rising => &RISE_OPTIONS,
            TrendDirection::Steady => &STEADY_OPTIONS,
            TrendDirection::Falling => &FALL_OPTIONS,
        };
        ForecastCode::new(i32::from(options[band]))
    }

    /// Letter code for an observation, `None` without pressure and trend
    #[must_use]
    pub fn forecast_code(observation: &Observation, config: &ForecastConfig) -> Option<ForecastCode> {
        let pressure = observation.pressure()?;
        let trend = observation.pressure_trend()?;
        let direction = classify_trend(trend, config.trend.dead_band_hpa_per_3h);
        Some(Self::code_for(
            pressure,
            direction,
            observation.wind_direction(),
            observation.hemisphere(),
            observation.season(),
        ))
    }

    /// Weather state for a letter code
    #[must_use]
    pub fn state_for(code: ForecastCode) -> WeatherState {
        STATE_BY_CODE[usize::from(code.index())]
    }

    /// Confidence at a horizon for a trend-based confidence `base`
    #[must_use]
    pub fn confidence_at(base: f64, horizon: Hours, config: &BlendConfig) -> f64 {
        classical_confidence(base, horizon, DECAY_HOURS, config)
    }
}

impl Forecaster for Zambretti {
    fn is_available(&self, observation: &Observation) -> bool {
        observation.pressure().is_some() && observation.pressure_trend().is_some()
    }

    fn forecast(
        &self,
        observation: &Observation,
        horizon: Hours,
        config: &ForecastConfig,
    ) -> Option<ModelOutput> {
        let code = Self::forecast_code(observation, config)?;
        let trend = observation.pressure_trend()?;

        let wind_bonus = if observation.wind_direction().is_some() {
            0.05
        } else {
            0.0
        };
        let base = 0.55 + 0.35 * trend_decisiveness(trend, &config.trend) + wind_bonus;
        let confidence = Self::confidence_at(base.min(0.95), horizon, &config.blend);

        let state = Self::state_for(code);
        trace!("Zambretti {code} -> {state}, confidence {confidence:.2}");

        Some(ModelOutput {
            state,
            confidence,
            text: code.text(),
            code: Some(code),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn code(pressure: f64, direction: TrendDirection) -> char {
        Zambretti::code_for(
            Hectopascals::new(pressure),
            direction,
            None,
            Hemisphere::North,
            Season::Winter,
        )
        .letter()
    }

    #[test]
    fn test_reference_table_lookups() {
        assert_eq!(code(1005.0, TrendDirection::Falling), 'R');
        assert_eq!(code(1035.0, TrendDirection::Steady), 'A');
        assert_eq!(code(1001.0, TrendDirection::Rising), 'G');
        assert_eq!(code(960.0, TrendDirection::Falling), 'Z');
    }

    #[test]
    fn test_out_of_range_pressure_clamps() {
        assert_eq!(code(900.0, TrendDirection::Rising), 'Z');
        assert_eq!(code(1090.0, TrendDirection::Falling), 'A');
    }

    #[test]
    fn test_southerly_wind_worsens_north_and_improves_south() {
        let pressure = Hectopascals::new(1012.0);
        let south_wind = Some(Degrees::new(180.0));
        let calm = Zambretti::code_for(
            pressure,
            TrendDirection::Steady,
            None,
            Hemisphere::North,
            Season::Winter,
        );
        let north = Zambretti::code_for(
            pressure,
            TrendDirection::Steady,
            south_wind,
            Hemisphere::North,
            Season::Winter,
        );
        let south = Zambretti::code_for(
            pressure,
            TrendDirection::Steady,
            south_wind,
            Hemisphere::South,
            Season::Winter,
        );
        assert!(north.index() > calm.index());
        assert!(south.index() <= calm.index());
    }

    #[test]
    fn test_summer_shifts_rising_and_falling_only() {
        let at = |direction, season| {
            Zambretti::code_for(
                Hectopascals::new(1010.0),
                direction,
                None,
                Hemisphere::North,
                season,
            )
            .index()
        };
        assert!(at(TrendDirection::Rising, Season::Summer) <= at(TrendDirection::Rising, Season::Winter));
        assert!(at(TrendDirection::Falling, Season::Summer) >= at(TrendDirection::Falling, Season::Winter));
        assert_eq!(
            at(TrendDirection::Steady, Season::Summer),
            at(TrendDirection::Steady, Season::Winter)
        );
    }

    #[test]
    fn test_every_code_maps_to_a_state() {
        for index in 0..=25 {
            let state = Zambretti::state_for(ForecastCode::new(index));
            assert!(WeatherState::ALL.contains(&state));
        }
        assert_eq!(Zambretti::state_for(ForecastCode::new(0)), WeatherState::Sunny);
        assert_eq!(Zambretti::state_for(ForecastCode::new(25)), WeatherState::Lightning);
    }

    #[test]
    fn test_confidence_decays_faster_than_negretti() {
        use crate::models::{NegrettiZambra, CLIMATOLOGY_CONFIDENCE};

        let config = BlendConfig::default();
        let z = |h| Zambretti::confidence_at(0.8, Hours::new(h), &config);
        let n = |h| NegrettiZambra::confidence_at(0.8, Hours::new(h), &config);
        assert_eq!(z(4.0), 0.8);
        assert_eq!(z(6.0), n(6.0));
        assert!(z(12.0) < n(12.0));
        assert!(z(24.0) < z(12.0));
        assert!((z(400.0) - CLIMATOLOGY_CONFIDENCE).abs() < 1e-9);
        assert!((n(400.0) - CLIMATOLOGY_CONFIDENCE).abs() < 1e-5);
    }
}
