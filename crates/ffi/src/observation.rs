//! FFI-exposed observation input.
//!
//! C callers cannot express `Option<f64>`, so a missing sensor reading is
//! passed as NaN and an unknown daylight flag as a negative value.

use barocast_core::{Hemisphere, Observation};
use chrono::DateTime;

use crate::error::DefaultBarocastError;

/// Station hemisphere.
#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BarocastHemisphere {
    /// Northern hemisphere.
    North = 0,
    /// Southern hemisphere.
    South = 1,
}

impl From<BarocastHemisphere> for Hemisphere {
    fn from(hemisphere: BarocastHemisphere) -> Self {
        match hemisphere {
            BarocastHemisphere::North => Hemisphere::North,
            BarocastHemisphere::South => Hemisphere::South,
        }
    }
}

/// One snapshot of local sensor readings.
///
/// Set any floating-point field to NaN when the sensor is absent. Readings
/// outside physical limits are treated as absent too.
///
/// # Example (C)
/// ```c
/// BarocastObservation obs = {
///     .timestamp_unix = 1705309200,
///     .hemisphere = North,
///     .pressure_hpa = 1012.0,
///     .pressure_trend_hpa_per_3h = -2.0,
///     .temperature_c = 4.5,
///     .temperature_trend_c = NAN,
///     .wind_direction_deg = NAN,
///     .wind_speed_ms = NAN,
///     .solar_radiation_wm2 = NAN,
///     .humidity_percent = 81.0,
///     .is_daytime = -1,
/// };
/// ```
#[repr(C)]
#[derive(Debug, Clone, Copy)]
pub struct BarocastObservation {
    /// Time of the reading, seconds since the Unix epoch (UTC).
    pub timestamp_unix: i64,
    /// Station hemisphere.
    pub hemisphere: BarocastHemisphere,
    /// Sea-level-corrected pressure (hPa).
    pub pressure_hpa: f64,
    /// Pressure tendency (hPa per 3 hours). NaN derives it from the previous call.
    pub pressure_trend_hpa_per_3h: f64,
    /// Air temperature (°C).
    pub temperature_c: f64,
    /// Temperature change per configured interval (°C). NaN derives it from the previous call.
    pub temperature_trend_c: f64,
    /// Direction the wind blows from (degrees).
    pub wind_direction_deg: f64,
    /// Sustained wind speed (m/s).
    pub wind_speed_ms: f64,
    /// Global solar irradiance (W/m²).
    pub solar_radiation_wm2: f64,
    /// Relative humidity (%).
    pub humidity_percent: f64,
    /// 1 = daytime, 0 = night, negative = unknown.
    pub is_daytime: i8,
}

/// Apply a setter only when the C value is present (not NaN).
fn present(
    observation: Observation,
    value: f64,
    set: fn(Observation, f64) -> Observation,
) -> Observation {
    if value.is_nan() {
        observation
    } else {
        set(observation, value)
    }
}

impl TryFrom<&BarocastObservation> for Observation {
    type Error = DefaultBarocastError;

    fn try_from(raw: &BarocastObservation) -> Result<Self, Self::Error> {
        let timestamp = DateTime::from_timestamp(raw.timestamp_unix, 0).ok_or_else(|| {
            DefaultBarocastError::invalid_observation(
                "timestamp_unix",
                &format!("{} is out of range", raw.timestamp_unix),
            )
        })?;

        let mut observation = Observation::new(timestamp, raw.hemisphere.into());
        observation = present(observation, raw.pressure_hpa, Observation::with_pressure);
        observation = present(
            observation,
            raw.pressure_trend_hpa_per_3h,
            Observation::with_pressure_trend,
        );
        observation = present(observation, raw.temperature_c, Observation::with_temperature);
        observation = present(
            observation,
            raw.temperature_trend_c,
            Observation::with_temperature_trend,
        );
        observation = present(
            observation,
            raw.wind_direction_deg,
            Observation::with_wind_direction,
        );
        observation = present(observation, raw.wind_speed_ms, Observation::with_wind_speed);
        observation = present(
            observation,
            raw.solar_radiation_wm2,
            Observation::with_solar_radiation,
        );
        observation = present(observation, raw.humidity_percent, Observation::with_humidity);
        if raw.is_daytime >= 0 {
            observation = observation.with_daytime(raw.is_daytime > 0);
        }
        Ok(observation)
    }
}
