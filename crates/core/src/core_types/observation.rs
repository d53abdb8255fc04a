//! Sensor observations and the rolling observation buffer
//!
//! An [`Observation`] is an immutable snapshot of what the local station
//! reports. Every sensor field is optional: a missing or implausible reading
//! never fails a forecast, it only narrows which models can run.
//!
//! The [`ObservationBuffer`] is owned by the caller. It carries the current
//! snapshot, at most one prior snapshot for trend derivation, and the time of
//! the previous forecast update for the timing calculator.

use crate::core_types::units::{
    Celsius, Degrees, Hectopascals, Hours, MetersPerSecond, Percent, PressureTendency,
    WattsPerSquareMeter,
};
use chrono::{DateTime, Datelike, Utc};
use serde::{Deserialize, Serialize};
use tracing::warn;

/// Plausible sea-level pressure envelope (hPa); readings outside are sensor faults
const PRESSURE_PLAUSIBLE_HPA: std::ops::RangeInclusive<f64> = 850.0..=1100.0;

/// Plausible surface air temperature envelope (°C)
const TEMPERATURE_PLAUSIBLE_C: std::ops::RangeInclusive<f64> = -90.0..=60.0;

/// Prior observations older than this are not used for trend derivation
const MAX_TREND_LOOKBACK_HOURS: f64 = 24.0;

/// Standard atmosphere temperature lapse rate (K/m)
const LAPSE_RATE: f64 = 0.0065;

/// Hemisphere of the station, decides which months count as local summer
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Hemisphere {
    /// Northern hemisphere
    #[default]
    North,
    /// Southern hemisphere
    South,
}

impl Hemisphere {
    /// Table row for two-axis seasonal lookups
    #[must_use]
    pub const fn index(self) -> usize {
        match self {
            Hemisphere::North => 0,
            Hemisphere::South => 1,
        }
    }
}

/// Half-year season used by the classical barometric algorithms
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Season {
    /// Warm half of the year (April-September in the north)
    Summer,
    /// Cold half of the year
    Winter,
}

/// Local season by hemisphere (row) and month (column, January first)
const LOCAL_SEASON: [[Season; 12]; 2] = {
    use Season::{Summer as S, Winter as W};
    [
        // Jan Feb Mar Apr May Jun Jul Aug Sep Oct Nov Dec
        [W, W, W, S, S, S, S, S, S, W, W, W], // North
        [S, S, S, W, W, W, W, W, W, S, S, S], // South
    ]
};

impl Season {
    /// Local season for a calendar month (1-12) in a hemisphere
    ///
    /// Months outside 1-12 are clamped.
    #[must_use]
    pub fn local(month: u8, hemisphere: Hemisphere) -> Self {
        let column = usize::from(month.clamp(1, 12) - 1);
        LOCAL_SEASON[hemisphere.index()][column]
    }

    /// Table column for two-axis seasonal lookups
    #[must_use]
    pub const fn index(self) -> usize {
        match self {
            Season::Summer => 0,
            Season::Winter => 1,
        }
    }
}

/// Reduce a station pressure reading to sea level (hypsometric formula)
///
/// # Arguments
///
/// * `station` - Pressure measured at the station
/// * `elevation_m` - Station elevation above mean sea level in meters
/// * `temperature` - Station air temperature
///
/// # Returns
///
/// Equivalent sea-level pressure
#[must_use]
pub fn sea_level_pressure(
    station: Hectopascals,
    elevation_m: f64,
    temperature: Celsius,
) -> Hectopascals {
    let lapse_height = LAPSE_RATE * elevation_m;
    let ratio = 1.0 - lapse_height / (temperature.kelvin() + lapse_height);
    Hectopascals::new(*station * ratio.powf(-5.257))
}

/// Dew point from temperature and relative humidity (Magnus formula)
///
/// Returns `None` when humidity is zero, where the dew point is undefined.
#[must_use]
pub fn dew_point(temperature: Celsius, humidity: Percent) -> Option<Celsius> {
    const A: f64 = 17.62;
    const B: f64 = 243.12;

    if *humidity <= 0.0 {
        return None;
    }
    let gamma = humidity.fraction().ln() + A * *temperature / (B + *temperature);
    Some(Celsius::new(B * gamma / (A - gamma)))
}

fn plausible(value: f64, range: &std::ops::RangeInclusive<f64>, field: &str) -> Option<f64> {
    if value.is_finite() && range.contains(&value) {
        Some(value)
    } else {
        warn!("Discarding implausible {field} reading: {value}");
        None
    }
}

fn finite(value: f64, field: &str) -> Option<f64> {
    if value.is_finite() {
        Some(value)
    } else {
        warn!("Discarding non-finite {field} reading");
        None
    }
}

/// Immutable snapshot of local sensor readings
///
/// Built with the `with_*` methods. Each setter validates its input and treats
/// non-finite or physically implausible values as missing.
///
/// # Example
/// ```
/// use barocast_core::{Hemisphere, Observation};
/// use chrono::{TimeZone, Utc};
///
/// let now = Utc.with_ymd_and_hms(2024, 1, 15, 9, 0, 0).unwrap();
/// let obs = Observation::new(now, Hemisphere::North)
///     .with_pressure(1012.0)
///     .with_pressure_trend(-2.0)
///     .with_temperature(4.5)
///     .with_humidity(f64::NAN); // dropped, not an error
///
/// assert_eq!(obs.month(), 1);
/// assert!(obs.humidity().is_none());
/// assert!(obs.pressure().is_some());
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Observation {
    /// Sea-level-corrected pressure
    pub(crate) pressure: Option<Hectopascals>,
    /// Pressure tendency over the caller's lookback window, normalized to 3h
    pub(crate) pressure_trend: Option<PressureTendency>,
    /// Air temperature
    pub(crate) temperature: Option<Celsius>,
    /// Temperature change per configured interval (°C)
    pub(crate) temperature_trend: Option<f64>,
    /// Time of the reading
    pub(crate) timestamp: DateTime<Utc>,
    /// Station hemisphere
    pub(crate) hemisphere: Hemisphere,
    /// Calendar month 1-12 for seasonal correction
    pub(crate) month: u8,
    /// Direction the wind blows from
    pub(crate) wind_direction: Option<Degrees>,
    /// Sustained wind speed
    pub(crate) wind_speed: Option<MetersPerSecond>,
    /// Global solar irradiance
    pub(crate) solar_radiation: Option<WattsPerSquareMeter>,
    /// Relative humidity
    pub(crate) humidity: Option<Percent>,
    /// Daylight flag supplied by the caller (sun position lives outside the engine)
    pub(crate) is_daytime: Option<bool>,
}

impl Observation {
    /// Create an empty observation; the month is taken from the timestamp
    #[must_use]
    pub fn new(timestamp: DateTime<Utc>, hemisphere: Hemisphere) -> Self {
        Self {
            pressure: None,
            pressure_trend: None,
            temperature: None,
            temperature_trend: None,
            timestamp,
            hemisphere,
            month: timestamp.month() as u8,
            wind_direction: None,
            wind_speed: None,
            solar_radiation: None,
            humidity: None,
            is_daytime: None,
        }
    }

    /// Override the month used for seasonal correction (clamped to 1-12)
    pub fn with_month(mut self, month: u8) -> Self {
        self.month = month.clamp(1, 12);
        self
    }

    /// Set sea-level pressure in hPa
    pub fn with_pressure(mut self, hpa: f64) -> Self {
        self.pressure = plausible(hpa, &PRESSURE_PLAUSIBLE_HPA, "pressure").map(Hectopascals::new);
        self
    }

    /// Set pressure from a raw station reading, reducing it to sea level
    ///
    /// Uses the observation temperature when already set, otherwise the
    /// standard-atmosphere 15 °C. Call after `with_temperature`; a temperature
    /// set afterwards does not revisit the reduction.
    pub fn with_station_pressure(self, station_hpa: f64, elevation_m: f64) -> Self {
        if !station_hpa.is_finite() || !elevation_m.is_finite() {
            warn!("Discarding non-finite station pressure or elevation");
            return Self {
                pressure: None,
                ..self
            };
        }
        let temperature = self.temperature.unwrap_or(Celsius::new(15.0));
        let reduced = sea_level_pressure(Hectopascals::new(station_hpa), elevation_m, temperature);
        self.with_pressure(*reduced)
    }

    /// Set pressure tendency in hPa per 3 hours
    pub fn with_pressure_trend(mut self, hpa_per_3h: f64) -> Self {
        self.pressure_trend = finite(hpa_per_3h, "pressure trend").map(PressureTendency::new);
        self
    }

    /// Set air temperature in °C
    pub fn with_temperature(mut self, celsius: f64) -> Self {
        self.temperature =
            plausible(celsius, &TEMPERATURE_PLAUSIBLE_C, "temperature").map(Celsius::new);
        self
    }

    /// Set temperature change per configured trend interval (°C)
    pub fn with_temperature_trend(mut self, celsius_per_interval: f64) -> Self {
        self.temperature_trend = finite(celsius_per_interval, "temperature trend");
        self
    }

    /// Set wind direction (degrees the wind blows from)
    pub fn with_wind_direction(mut self, degrees: f64) -> Self {
        self.wind_direction = finite(degrees, "wind direction").map(Degrees::new);
        self
    }

    /// Set sustained wind speed in m/s
    pub fn with_wind_speed(mut self, meters_per_second: f64) -> Self {
        self.wind_speed = plausible(meters_per_second, &(0.0..=150.0), "wind speed")
            .map(MetersPerSecond::new);
        self
    }

    /// Set global solar irradiance in W/m²
    pub fn with_solar_radiation(mut self, watts: f64) -> Self {
        self.solar_radiation =
            plausible(watts, &(0.0..=1500.0), "solar radiation").map(WattsPerSquareMeter::new);
        self
    }

    /// Set relative humidity in percent
    pub fn with_humidity(mut self, percent: f64) -> Self {
        self.humidity = plausible(percent, &(0.0..=100.0), "humidity").map(Percent::new);
        self
    }

    /// Set whether the sun is currently up
    pub fn with_daytime(mut self, is_daytime: bool) -> Self {
        self.is_daytime = Some(is_daytime);
        self
    }

    /// Sea-level pressure, if available
    #[must_use]
    pub fn pressure(&self) -> Option<Hectopascals> {
        self.pressure
    }

    /// Pressure tendency (hPa/3h), if available
    #[must_use]
    pub fn pressure_trend(&self) -> Option<PressureTendency> {
        self.pressure_trend
    }

    /// Air temperature, if available
    #[must_use]
    pub fn temperature(&self) -> Option<Celsius> {
        self.temperature
    }

    /// Temperature change per trend interval, if available
    #[must_use]
    pub fn temperature_trend(&self) -> Option<f64> {
        self.temperature_trend
    }

    /// Time of the reading
    #[must_use]
    pub fn timestamp(&self) -> DateTime<Utc> {
        self.timestamp
    }

    /// Station hemisphere
    #[must_use]
    pub fn hemisphere(&self) -> Hemisphere {
        self.hemisphere
    }

    /// Calendar month 1-12
    #[must_use]
    pub fn month(&self) -> u8 {
        self.month
    }

    /// Local half-year season
    #[must_use]
    pub fn season(&self) -> Season {
        Season::local(self.month, self.hemisphere)
    }

    /// Wind direction, if available
    #[must_use]
    pub fn wind_direction(&self) -> Option<Degrees> {
        self.wind_direction
    }

    /// Wind speed, if available
    #[must_use]
    pub fn wind_speed(&self) -> Option<MetersPerSecond> {
        self.wind_speed
    }

    /// Solar irradiance, if available
    #[must_use]
    pub fn solar_radiation(&self) -> Option<WattsPerSquareMeter> {
        self.solar_radiation
    }

    /// Relative humidity, if available
    #[must_use]
    pub fn humidity(&self) -> Option<Percent> {
        self.humidity
    }

    /// Whether it is daytime
    ///
    /// Falls back to "any measurable sunlight" when the caller did not say,
    /// and to daytime when there is no solar sensor either.
    #[must_use]
    pub fn is_daytime(&self) -> bool {
        self.is_daytime
            .or_else(|| self.solar_radiation.map(|s| *s > 10.0))
            .unwrap_or(true)
    }

    /// Dew point from temperature and humidity
    #[must_use]
    pub fn dew_point(&self) -> Option<Celsius> {
        dew_point(self.temperature?, self.humidity?)
    }
}

/// Current and recent-past readings plus the previous forecast time
///
/// Maintained by the caller between invocations. The engine only reads it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ObservationBuffer {
    current: Observation,
    previous: Option<Observation>,
    last_forecast_at: Option<DateTime<Utc>>,
}

impl ObservationBuffer {
    /// Buffer holding only the current observation
    #[must_use]
    pub fn new(current: Observation) -> Self {
        Self {
            current,
            previous: None,
            last_forecast_at: None,
        }
    }

    /// Attach the prior observation used to derive missing trends
    pub fn with_previous(mut self, previous: Observation) -> Self {
        self.previous = Some(previous);
        self
    }

    /// Attach the time of the previous forecast update
    pub fn with_last_forecast_at(mut self, at: DateTime<Utc>) -> Self {
        self.last_forecast_at = Some(at);
        self
    }

    /// The current snapshot as supplied
    #[must_use]
    pub fn current(&self) -> &Observation {
        &self.current
    }

    /// The prior snapshot, if any
    #[must_use]
    pub fn previous(&self) -> Option<&Observation> {
        self.previous.as_ref()
    }

    /// Time of the previous forecast update, if any
    #[must_use]
    pub fn last_forecast_at(&self) -> Option<DateTime<Utc>> {
        self.last_forecast_at
    }

    /// Injected "now": the timestamp of the current observation
    #[must_use]
    pub fn now(&self) -> DateTime<Utc> {
        self.current.timestamp
    }

    /// Current observation with missing trend rates derived from the prior one
    ///
    /// Trends the caller already supplied always win. A prior observation is
    /// only used when it is strictly older than the current one and no more
    /// than 24 hours old.
    ///
    /// # Arguments
    ///
    /// * `temperature_interval` - Interval the temperature trend is expressed per
    #[must_use]
    pub fn resolved(&self, temperature_interval: Hours) -> Observation {
        let mut resolved = self.current.clone();
        let Some(previous) = &self.previous else {
            return resolved;
        };

        let elapsed = Hours::from_duration(self.current.timestamp - previous.timestamp);
        if *elapsed <= 0.0 || *elapsed > MAX_TREND_LOOKBACK_HOURS {
            warn!(
                "Ignoring prior observation {:.2}h away for trend derivation",
                *elapsed
            );
            return resolved;
        }

        if resolved.pressure_trend.is_none() {
            if let (Some(now), Some(before)) = (self.current.pressure, previous.pressure) {
                resolved.pressure_trend = PressureTendency::from_change(now - before, elapsed);
            }
        }

        if resolved.temperature_trend.is_none() && *temperature_interval > 0.0 {
            if let (Some(now), Some(before)) = (self.current.temperature, previous.temperature) {
                resolved.temperature_trend =
                    Some((now - before) * *temperature_interval / *elapsed);
            }
        }

        resolved
    }
}

impl From<Observation> for ObservationBuffer {
    fn from(current: Observation) -> Self {
        Self::new(current)
    }
}
