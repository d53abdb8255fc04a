//! Negretti-Zambra formula forecaster
//!
//! Algebraic form of the classical dial: a linear function of pressure gives
//! a Z-number in a sub-range chosen by trend direction (falling 1-9, steady
//! 10-19, rising 20-32). Wind sector and season shift the Z-number by at most
//! one step each, and the result is mapped to a letter through a per-trend
//! table.
//!
//! Shares the letter vocabulary with [`super::Zambretti`] but has its own
//! state mapping and rain rule family.

use super::classical_confidence;
use super::r#trait::{Forecaster, ModelOutput};
use super::trend::{classify_trend, trend_decisiveness, TrendDirection};
use crate::config::{BlendConfig, ForecastConfig};
use crate::core_types::compass::CompassPoint;
use crate::core_types::observation::{Hemisphere, Observation, Season};
use crate::core_types::units::{Degrees, Hectopascals, Hours};
use crate::core_types::weather::{ForecastCode, WeatherState};
use std::ops::RangeInclusive;
use tracing::trace;

/// Letter indices for Z = 1..=9 (falling)
const FALLING_LETTERS: [u8; 9] = [0, 1, 3, 7, 14, 17, 20, 21, 23];

/// Letter indices for Z = 10..=19 (steady)
const STEADY_LETTERS: [u8; 10] = [0, 1, 4, 10, 13, 15, 18, 22, 23, 25];

/// Letter indices for Z = 20..=32 (rising)
const RISING_LETTERS: [u8; 13] = [0, 1, 2, 5, 6, 8, 9, 11, 12, 16, 19, 24, 25];

/// Z-number offset by season (row) and trend (rising, steady, falling)
const SEASONAL_OFFSET: [[i32; 3]; 2] = [
    [-1, 0, -1], // Summer
    [0, 0, 1],   // Winter
];

/// Weather state for each letter A-Z
const STATE_BY_CODE: [WeatherState; 26] = {
    use WeatherState::{
        Cloudy as C, Lightning as L, PartlyCloudy as PC, PartlyRainy as PR, Pouring as P,
        Rainy as R, Sunny as S,
    };
    [
        S, S, S, PC, PC, PC, PR, PR, PR, PC, PR, PR, C, // A-M
        PR, R, R, R, R, R, P, R, P, P, P, L, L, // N-Z
    ]
};

/// e-folding time (h) of the decay toward climatology beyond the nowcast band
const DECAY_HOURS: f64 = 30.0;

/// Negretti-Zambra forecaster
#[derive(Debug, Clone, Copy, Default)]
pub struct NegrettiZambra;

/// Z-number range and formula coefficients for a trend direction
fn formula(direction: TrendDirection) -> (RangeInclusive<i32>, f64, f64) {
    match direction {
        TrendDirection::Falling => (1..=9, 127.0, 0.12),
        TrendDirection::Steady => (10..=19, 144.0, 0.13),
        TrendDirection::Rising => (20..=32, 185.0, 0.16),
    }
}

/// Z-number shift for the wind sector: polar winds fair, equatorial winds wet
fn wind_offset(bearing: Degrees, hemisphere: Hemisphere) -> i32 {
    let bearing = match hemisphere {
        Hemisphere::North => bearing,
        Hemisphere::South => bearing.reversed(),
    };
    match CompassPoint::from_bearing(bearing) {
        CompassPoint::NW
        | CompassPoint::NNW
        | CompassPoint::N
        | CompassPoint::NNE
        | CompassPoint::NE => -1,
        CompassPoint::SE
        | CompassPoint::SSE
        | CompassPoint::S
        | CompassPoint::SSW
        | CompassPoint::SW => 1,
        _ => 0,
    }
}

impl NegrettiZambra {
    /// Z-number for already-classified inputs, within the trend's sub-range
    ///
    /// # Arguments
    ///
    /// * `pressure` - Sea-level pressure
    /// * `direction` - Dead-banded trend direction
    /// * `wind_direction` - Bearing the wind blows from, if known
    /// * `hemisphere` - Station hemisphere
    /// * `season` - Local season
    #[must_use]
    pub fn z_number(
        pressure: Hectopascals,
        direction: TrendDirection,
        wind_direction: Option<Degrees>,
        hemisphere: Hemisphere,
        season: Season,
    ) -> i32 {
        let (range, intercept, slope) = formula(direction);
        let raw = (intercept - slope * *pressure).round() as i32;
        let wind = wind_direction.map_or(0, |bearing| wind_offset(bearing, hemisphere));
        let seasonal = SEASONAL_OFFSET[season.index()][direction.index()];
        (raw + wind + seasonal).clamp(*range.start(), *range.end())
    }

    /// Letter code for a Z-number produced by [`NegrettiZambra::z_number`]
    #[must_use]
    pub fn code_for_z(z: i32, direction: TrendDirection) -> ForecastCode {
        let (range, _, _) = formula(direction);
        let letters: &[u8] = match direction {
            TrendDirection::Falling => &FALLING_LETTERS,
            TrendDirection::Steady => &STEADY_LETTERS,
            TrendDirection::Rising => &RISING_LETTERS,
        };
        let offset = (z.clamp(*range.start(), *range.end()) - range.start()) as usize;
        ForecastCode::new(i32::from(letters[offset]))
    }

    /// Letter code for an observation, `None` without pressure and trend
    #[must_use]
    pub fn forecast_code(observation: &Observation, config: &ForecastConfig) -> Option<ForecastCode> {
        let pressure = observation.pressure()?;
        let trend = observation.pressure_trend()?;
        let direction = classify_trend(trend, config.trend.dead_band_hpa_per_3h);
        let z = Self::z_number(
            pressure,
            direction,
            observation.wind_direction(),
            observation.hemisphere(),
            observation.season(),
        );
        Some(Self::code_for_z(z, direction))
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

impl Forecaster for NegrettiZambra {
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

        let base = 0.5 + 0.4 * trend_decisiveness(trend, &config.trend);
        let confidence = Self::confidence_at(base, horizon, &config.blend);

        let state = Self::state_for(code);
        trace!("Negretti-Zambra {code} -> {state}, confidence {confidence:.2}");

        Some(ModelOutput {
            state,
            confidence,
            text: code.text(),
            code: Some(code),
        })
    }
}
