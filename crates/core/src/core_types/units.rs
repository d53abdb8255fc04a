//! Semantic unit types for sensor quantities
//!
//! Newtype wrappers for the physical quantities a weather station reports, so a
//! pressure can never be passed where a temperature is expected and a pressure
//! *level* can never be confused with a pressure *tendency*.
//!
//! # Design Philosophy
//! - All quantities are `f64`; forecast math is cheap and precision is free
//! - `Deref` to the raw `f64` for arithmetic-heavy classifier code
//! - Total ordering via `Ord` (NaN sorts greater than all values)
//! - Serde support, serialized transparently as the bare number; bounded
//!   quantities deserialize through their constructor so clamping and wrapping
//!   still apply
//! - Constructors never panic: sensor plausibility is judged by the observation
//!   layer, not by the unit type
//!
//! # Usage
//! ```
//! use barocast_core::core_types::units::{Hectopascals, PressureTendency};
//!
//! let p = Hectopascals::new(1013.25);
//! let falling = PressureTendency::new(-2.4);
//! assert!(*p > 1000.0);
//! assert!(falling.is_falling());
//! assert_eq!(falling.abs(), PressureTendency::new(2.4));
//! ```

use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::fmt;
use std::ops::{Add, Deref, Mul, Neg, Sub};

/// Compare f64 values with total ordering using Rust's built-in `total_cmp`
#[inline]
fn f64_total_cmp(a: f64, b: f64) -> Ordering {
    a.total_cmp(&b)
}

// ============================================================================
// TEMPERATURE
// ============================================================================

/// Air temperature in degrees Celsius
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(transparent)]
#[repr(transparent)]
pub struct Celsius(f64);

impl Eq for Celsius {}

impl PartialOrd for Celsius {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Celsius {
    fn cmp(&self, other: &Self) -> Ordering {
        f64_total_cmp(self.0, other.0)
    }
}

impl Deref for Celsius {
    type Target = f64;
    #[inline]
    fn deref(&self) -> &f64 {
        &self.0
    }
}

impl Celsius {
    /// Absolute zero in Celsius
    pub const ABSOLUTE_ZERO: Celsius = Celsius(-273.15);

    /// Celsius to Kelvin conversion offset (0°C = 273.15 K)
    pub const KELVIN_OFFSET: f64 = 273.15;

    /// Water freezing point
    pub const FREEZING: Celsius = Celsius(0.0);

    /// Create a new Celsius temperature
    #[inline]
    #[must_use]
    pub const fn new(value: f64) -> Self {
        Celsius(value)
    }

    /// Temperature in Kelvin as a raw value
    #[inline]
    #[must_use]
    pub fn kelvin(self) -> f64 {
        self.0 + Self::KELVIN_OFFSET
    }
}

impl From<f64> for Celsius {
    fn from(v: f64) -> Self {
        Celsius(v)
    }
}

impl Add<f64> for Celsius {
    type Output = Celsius;
    fn add(self, rhs: f64) -> Celsius {
        Celsius(self.0 + rhs)
    }
}

impl Sub<Celsius> for Celsius {
    type Output = f64;
    fn sub(self, rhs: Celsius) -> f64 {
        self.0 - rhs.0
    }
}

impl fmt::Display for Celsius {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:.1}°C", self.0)
    }
}

// ============================================================================
// PRESSURE
// ============================================================================

/// Barometric pressure in hectopascals (millibars)
///
/// Every model in this crate assumes sea-level-corrected pressure.
/// Use [`crate::core_types::observation::sea_level_pressure`] to reduce a
/// raw station reading first.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(transparent)]
#[repr(transparent)]
pub struct Hectopascals(f64);

impl Eq for Hectopascals {}

impl PartialOrd for Hectopascals {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Hectopascals {
    fn cmp(&self, other: &Self) -> Ordering {
        f64_total_cmp(self.0, other.0)
    }
}

impl Deref for Hectopascals {
    type Target = f64;
    #[inline]
    fn deref(&self) -> &f64 {
        &self.0
    }
}

impl Hectopascals {
    /// ICAO standard sea-level pressure
    pub const STANDARD: Hectopascals = Hectopascals(1013.25);

    /// Create a new pressure value
    #[inline]
    #[must_use]
    pub const fn new(value: f64) -> Self {
        Hectopascals(value)
    }
}

impl From<f64> for Hectopascals {
    fn from(v: f64) -> Self {
        Hectopascals(v)
    }
}

impl Sub<Hectopascals> for Hectopascals {
    type Output = f64;
    fn sub(self, rhs: Hectopascals) -> f64 {
        self.0 - rhs.0
    }
}

impl fmt::Display for Hectopascals {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:.1} hPa", self.0)
    }
}

/// Pressure tendency in hPa per 3 hours (signed)
///
/// Three hours is the WMO synoptic tendency window; every trend threshold in
/// this crate is expressed against it.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(transparent)]
#[repr(transparent)]
pub struct PressureTendency(f64);

impl Eq for PressureTendency {}

impl PartialOrd for PressureTendency {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for PressureTendency {
    fn cmp(&self, other: &Self) -> Ordering {
        f64_total_cmp(self.0, other.0)
    }
}

impl Deref for PressureTendency {
    type Target = f64;
    #[inline]
    fn deref(&self) -> &f64 {
        &self.0
    }
}

impl PressureTendency {
    /// Create a tendency from an hPa-per-3h rate
    #[inline]
    #[must_use]
    pub const fn new(hpa_per_3h: f64) -> Self {
        PressureTendency(hpa_per_3h)
    }

    /// Build a tendency from a pressure change observed over an arbitrary window
    ///
    /// Returns `None` for empty or negative windows.
    #[must_use]
    pub fn from_change(delta_hpa: f64, over: Hours) -> Option<Self> {
        (*over > 0.0).then(|| PressureTendency(delta_hpa * 3.0 / *over))
    }

    /// Magnitude of the tendency
    #[inline]
    #[must_use]
    pub fn abs(self) -> Self {
        PressureTendency(self.0.abs())
    }

    /// True for a negative rate (no dead-band applied)
    #[inline]
    #[must_use]
    pub fn is_falling(self) -> bool {
        self.0 < 0.0
    }
}

impl Neg for PressureTendency {
    type Output = PressureTendency;
    fn neg(self) -> PressureTendency {
        PressureTendency(-self.0)
    }
}

impl fmt::Display for PressureTendency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:+.1} hPa/3h", self.0)
    }
}

// ============================================================================
// RATIOS, WIND, RADIATION
// ============================================================================

/// Percentage value (0-100)
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(from = "f64", into = "f64")]
#[repr(transparent)]
pub struct Percent(f64);

impl Eq for Percent {}

impl PartialOrd for Percent {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Percent {
    fn cmp(&self, other: &Self) -> Ordering {
        f64_total_cmp(self.0, other.0)
    }
}

impl Deref for Percent {
    type Target = f64;
    #[inline]
    fn deref(&self) -> &f64 {
        &self.0
    }
}

impl Percent {
    /// Create a percentage, clamped to 0-100
    #[inline]
    #[must_use]
    pub fn new(value: f64) -> Self {
        Percent(value.clamp(0.0, 100.0))
    }

    /// Fraction in 0-1
    #[inline]
    #[must_use]
    pub fn fraction(self) -> f64 {
        self.0 / 100.0
    }
}

impl fmt::Display for Percent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:.0}%", self.0)
    }
}

/// Wind speed in meters per second
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(from = "f64", into = "f64")]
#[repr(transparent)]
pub struct MetersPerSecond(f64);

impl Eq for MetersPerSecond {}

impl PartialOrd for MetersPerSecond {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for MetersPerSecond {
    fn cmp(&self, other: &Self) -> Ordering {
        f64_total_cmp(self.0, other.0)
    }
}

impl Deref for MetersPerSecond {
    type Target = f64;
    #[inline]
    fn deref(&self) -> &f64 {
        &self.0
    }
}

impl MetersPerSecond {
    /// Create a wind speed, negative values clamp to calm
    #[inline]
    #[must_use]
    pub fn new(value: f64) -> Self {
        MetersPerSecond(value.max(0.0))
    }

    /// Convert from km/h
    #[inline]
    #[must_use]
    pub fn from_kmh(kmh: f64) -> Self {
        Self::new(kmh / 3.6)
    }

    /// Speed in km/h
    #[inline]
    #[must_use]
    pub fn to_kmh(self) -> f64 {
        self.0 * 3.6
    }
}

impl fmt::Display for MetersPerSecond {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:.1} m/s", self.0)
    }
}

/// Compass bearing in degrees (0=North, 90=East), normalized to [0, 360)
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(from = "f64", into = "f64")]
#[repr(transparent)]
pub struct Degrees(f64);

impl Deref for Degrees {
    type Target = f64;
    #[inline]
    fn deref(&self) -> &f64 {
        &self.0
    }
}

impl Degrees {
    /// Create a bearing, wrapping into [0, 360)
    #[inline]
    #[must_use]
    pub fn new(value: f64) -> Self {
        Degrees(value.rem_euclid(360.0))
    }

    /// The opposite bearing
    #[inline]
    #[must_use]
    pub fn reversed(self) -> Self {
        Self::new(self.0 + 180.0)
    }
}

impl fmt::Display for Degrees {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:.0}°", self.0)
    }
}

/// Global horizontal irradiance in W/m²
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(from = "f64", into = "f64")]
#[repr(transparent)]
pub struct WattsPerSquareMeter(f64);

impl Deref for WattsPerSquareMeter {
    type Target = f64;
    #[inline]
    fn deref(&self) -> &f64 {
        &self.0
    }
}

impl WattsPerSquareMeter {
    /// Create an irradiance value, negative sensor noise clamps to zero
    #[inline]
    #[must_use]
    pub fn new(value: f64) -> Self {
        WattsPerSquareMeter(value.max(0.0))
    }
}

/// Route deserialization through `new` for types whose constructor sanitizes
macro_rules! sanitized_f64 {
    ($($name:ident),+) => {$(
        impl From<f64> for $name {
            fn from(value: f64) -> Self {
                Self::new(value)
            }
        }

        impl From<$name> for f64 {
            fn from(value: $name) -> f64 {
                value.0
            }
        }
    )+};
}

sanitized_f64!(Percent, MetersPerSecond, Degrees, WattsPerSquareMeter);

// ============================================================================
// TIME
// ============================================================================

/// Duration or horizon in hours
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(transparent)]
#[repr(transparent)]
pub struct Hours(f64);

impl Eq for Hours {}

impl PartialOrd for Hours {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Hours {
    fn cmp(&self, other: &Self) -> Ordering {
        f64_total_cmp(self.0, other.0)
    }
}

impl Deref for Hours {
    type Target = f64;
    #[inline]
    fn deref(&self) -> &f64 {
        &self.0
    }
}

impl Hours {
    /// Zero hours (the present)
    pub const ZERO: Hours = Hours(0.0);

    /// Create an hour value
    #[inline]
    #[must_use]
    pub const fn new(value: f64) -> Self {
        Hours(value)
    }

    /// Convert a chrono duration to fractional hours
    #[must_use]
    pub fn from_duration(duration: chrono::TimeDelta) -> Self {
        Hours(duration.num_seconds() as f64 / 3600.0)
    }
}

impl Mul<f64> for Hours {
    type Output = Hours;
    fn mul(self, rhs: f64) -> Hours {
        Hours(self.0 * rhs)
    }
}

impl fmt::Display for Hours {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:.1}h", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_degrees_wrap() {
        assert_eq!(*Degrees::new(370.0), 10.0);
        assert_eq!(*Degrees::new(-90.0), 270.0);
        assert_eq!(*Degrees::new(45.0).reversed(), 225.0);
    }

    #[derive(Debug, Deserialize, Serialize)]
    struct Reading {
        bearing: Degrees,
        humidity: Percent,
        wind: MetersPerSecond,
        solar: WattsPerSquareMeter,
    }

    #[test]
    fn test_deserialize_applies_constructor() {
        let reading: Reading =
            toml::from_str("bearing = -90.0\nhumidity = 140.0\nwind = -3.0\nsolar = -5.0\n")
                .unwrap();
        assert_eq!(*reading.bearing, 270.0);
        assert_eq!(*reading.humidity, 100.0);
        assert_eq!(*reading.wind, 0.0);
        assert_eq!(*reading.solar, 0.0);

        // Still serialized as the bare number
        let text = toml::to_string(&reading).unwrap();
        assert!(text.contains("bearing = 270.0"), "{text}");
    }

    #[test]
    fn test_tendency_from_change_normalizes_to_three_hours() {
        let t = PressureTendency::from_change(-1.0, Hours::new(1.0)).unwrap();
        assert!((*t + 3.0).abs() < 1e-9);
        assert!(PressureTendency::from_change(1.0, Hours::ZERO).is_none());
    }

    #[test]
    fn test_percent_clamps() {
        assert_eq!(*Percent::new(120.0), 100.0);
        assert_eq!(*Percent::new(-3.0), 0.0);
        assert!((Percent::new(45.0).fraction() - 0.45).abs() < 1e-12);
    }

    #[test]
    fn test_wind_conversions() {
        let w = MetersPerSecond::from_kmh(36.0);
        assert!((*w - 10.0).abs() < 1e-9);
        assert!((w.to_kmh() - 36.0).abs() < 1e-9);
        assert_eq!(*MetersPerSecond::new(-1.0), 0.0);
    }

    #[test]
    fn test_total_ordering() {
        let a = Celsius::new(-2.0);
        let b = Celsius::new(5.0);
        assert_eq!(a.min(b), a);
        assert!(Hectopascals::new(990.0) < Hectopascals::STANDARD);
    }
}
