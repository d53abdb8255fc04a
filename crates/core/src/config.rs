//! Engine configuration
//!
//! Every tunable threshold lives here, grouped by the component that reads it.
//! All sections default field-by-field, so a TOML file only has to name the
//! values it changes:
//!
//! ```
//! use barocast_core::ForecastConfig;
//!
//! let config = ForecastConfig::from_toml_str(
//!     r#"
//!     [precipitation]
//!     rain_min_c = 1.5
//!
//!     [blend]
//!     decay_curve = "smoothstep"
//!     "#,
//! )
//! .unwrap();
//!
//! assert_eq!(config.precipitation.rain_min_c, 1.5);
//! assert_eq!(config.precipitation.snow_max_c, 0.0); // untouched default
//! ```

use crate::error::{ConfigError, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Shape of the weight ramps inside each horizon band
///
/// Both curves are monotonic and continuous, reach exactly 0 and 1 at the
/// band edges, and therefore keep the weighting free of jumps.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DecayCurve {
    /// Straight-line ramp
    #[default]
    Linear,
    /// Hermite `3t² - 2t³`; flat at both band edges
    Smoothstep,
}

impl DecayCurve {
    /// Map progress through a band (clamped to 0-1) onto the ramp
    #[must_use]
    pub fn apply(self, t: f64) -> f64 {
        let t = t.clamp(0.0, 1.0);
        match self {
            DecayCurve::Linear => t,
            DecayCurve::Smoothstep => t * t * (3.0 - 2.0 * t),
        }
    }
}

/// Pressure-trend classification thresholds
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct TrendConfig {
    /// |trend| below this (hPa/3h) counts as steady for every model
    pub dead_band_hpa_per_3h: f64,
    /// Start of the "quickly" tendency bucket (hPa/3h)
    pub quick_hpa_per_3h: f64,
    /// Start of the "very rapidly" tendency bucket (hPa/3h)
    pub very_rapid_hpa_per_3h: f64,
    /// Interval the temperature trend is expressed per (hours)
    pub temperature_interval_hours: f64,
}

impl Default for TrendConfig {
    fn default() -> Self {
        Self {
            dead_band_hpa_per_3h: 1.6,
            quick_hpa_per_3h: 3.6,
            very_rapid_hpa_per_3h: 6.0,
            temperature_interval_hours: 1.0,
        }
    }
}

/// Horizon bands and blending policy
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct BlendConfig {
    /// Horizon (h) where persistence hands over fully to WMO-simple
    pub persistence_band_end_h: f64,
    /// Horizon (h) where WMO-simple hands over fully to the classical pair
    pub nowcast_band_end_h: f64,
    /// Minimum weight for a model's text or letter to be used verbatim
    pub dominance_threshold: f64,
    /// Confidence difference below which the classical pair splits evenly
    pub confidence_materiality: f64,
    /// Hours past the nowcast band over which the classical split moves onto
    /// the confidence-proportional share
    pub proportional_ramp_h: f64,
    /// Ramp shape inside each band
    pub decay_curve: DecayCurve,
    /// Requests beyond this horizon (h) are clamped to it
    pub max_horizon_h: u32,
}

impl Default for BlendConfig {
    fn default() -> Self {
        Self {
            persistence_band_end_h: 3.0,
            nowcast_band_end_h: 6.0,
            dominance_threshold: 0.5,
            confidence_materiality: 0.05,
            proportional_ramp_h: 2.0,
            decay_curve: DecayCurve::Linear,
            max_horizon_h: 72,
        }
    }
}

/// Precipitation phase cut-offs
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct PrecipitationConfig {
    /// At or below this temperature (°C) precipitation falls as snow
    pub snow_max_c: f64,
    /// At or above this temperature (°C) precipitation falls as rain
    pub rain_min_c: f64,
}

impl Default for PrecipitationConfig {
    fn default() -> Self {
        Self {
            snow_max_c: 0.0,
            rain_min_c: 2.0,
        }
    }
}

/// Fog, frost and visibility thresholds
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct VisibilityConfig {
    /// Dew-point spread (°C) at or above which fog risk is zero
    pub fog_spread_max_c: f64,
    /// Temperature (°C) at or above which frost risk is zero
    pub frost_max_c: f64,
    /// Temperature (°C) at or below which frost is certain under clear sky
    pub frost_certain_c: f64,
    /// Wind speed (m/s) below which air counts as calm for fog and frost
    pub calm_wind_ms: f64,
}

impl Default for VisibilityConfig {
    fn default() -> Self {
        Self {
            fog_spread_max_c: 2.5,
            frost_max_c: 3.0,
            frost_certain_c: -2.0,
            calm_wind_ms: 2.0,
        }
    }
}

/// Exceptional-weather detector thresholds
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ExceptionalConfig {
    /// Sustained wind (m/s) at or above which hurricane force is flagged (Beaufort 12)
    pub hurricane_wind_ms: f64,
    /// Pressure fall (hPa/3h, positive number) at or beyond which hail is possible
    pub hail_drop_hpa_per_3h: f64,
    /// Lower edge of the hail temperature band (°C)
    pub hail_min_c: f64,
    /// Upper edge of the hail temperature band (°C)
    pub hail_max_c: f64,
    /// Pressure (hPa) below which the reading is climatologically extreme
    pub extreme_low_hpa: f64,
    /// Pressure (hPa) above which the reading is climatologically extreme
    pub extreme_high_hpa: f64,
}

impl Default for ExceptionalConfig {
    fn default() -> Self {
        Self {
            hurricane_wind_ms: 32.7,
            hail_drop_hpa_per_3h: 3.0,
            hail_min_c: 10.0,
            hail_max_c: 30.0,
            extreme_low_hpa: 960.0,
            extreme_high_hpa: 1050.0,
        }
    }
}

/// Refresh timing
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct TimingConfig {
    /// Regular interval between forecast refreshes (minutes)
    pub refresh_interval_min: u32,
    /// Elapsed time (h) after which the previous forecast counts as aged
    pub aging_threshold_h: f64,
    /// Offset (minutes) added to the next change time once aged
    pub aging_correction_min: u32,
}

impl Default for TimingConfig {
    fn default() -> Self {
        Self {
            refresh_interval_min: 60,
            aging_threshold_h: 6.0,
            aging_correction_min: 15,
        }
    }
}

/// Complete engine configuration
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ForecastConfig {
    /// Trend classification
    pub trend: TrendConfig,
    /// Horizon weighting and blending
    pub blend: BlendConfig,
    /// Precipitation phase
    pub precipitation: PrecipitationConfig,
    /// Fog, frost and visibility
    pub visibility: VisibilityConfig,
    /// Exceptional weather
    pub exceptional: ExceptionalConfig,
    /// Refresh timing
    pub timing: TimingConfig,
}

impl ForecastConfig {
    /// Parse and validate a TOML document
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Parse`] for malformed TOML or unknown keys and
    /// [`ConfigError::Invalid`] when a value violates a constraint.
    pub fn from_toml_str(text: &str) -> Result<Self> {
        let config: Self = toml::from_str(text)?;
        config.validate()?;
        Ok(config)
    }

    /// Load and validate a TOML file
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Io`] when the file cannot be read, otherwise
    /// the same errors as [`ForecastConfig::from_toml_str`].
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml_str(&text)
    }

    /// Check cross-field constraints
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Invalid`] naming the first offending field.
    pub fn validate(&self) -> Result<()> {
        let trend = &self.trend;
        if trend.dead_band_hpa_per_3h.is_nan() || trend.dead_band_hpa_per_3h < 0.0 {
            return Err(ConfigError::invalid(
                "trend.dead_band_hpa_per_3h",
                "must be zero or positive",
            ));
        }
        if !strictly_increasing(&[
            trend.dead_band_hpa_per_3h,
            trend.quick_hpa_per_3h,
            trend.very_rapid_hpa_per_3h,
        ]) {
            return Err(ConfigError::invalid(
                "trend.quick_hpa_per_3h",
                "tendency buckets must increase: dead band < quick < very rapid",
            ));
        }
        if !is_positive(trend.temperature_interval_hours) {
            return Err(ConfigError::invalid(
                "trend.temperature_interval_hours",
                "must be positive",
            ));
        }

        let blend = &self.blend;
        if !strictly_increasing(&[
            0.0,
            blend.persistence_band_end_h,
            blend.nowcast_band_end_h,
        ]) {
            return Err(ConfigError::invalid(
                "blend.nowcast_band_end_h",
                "bands must satisfy 0 < persistence end < nowcast end",
            ));
        }
        if !is_positive(blend.proportional_ramp_h) {
            return Err(ConfigError::invalid(
                "blend.proportional_ramp_h",
                "must be positive",
            ));
        }
        if !(0.0..1.0).contains(&blend.dominance_threshold) {
            return Err(ConfigError::invalid(
                "blend.dominance_threshold",
                format!("must be in [0, 1), got {}", blend.dominance_threshold),
            ));
        }
        if !(0.0..=1.0).contains(&blend.confidence_materiality) {
            return Err(ConfigError::invalid(
                "blend.confidence_materiality",
                "must be in [0, 1]",
            ));
        }

        let precipitation = &self.precipitation;
        if !strictly_increasing(&[precipitation.snow_max_c, precipitation.rain_min_c]) {
            return Err(ConfigError::invalid(
                "precipitation.snow_max_c",
                "snow cut-off must be below the rain cut-off",
            ));
        }

        let visibility = &self.visibility;
        if !is_positive(visibility.fog_spread_max_c) {
            return Err(ConfigError::invalid(
                "visibility.fog_spread_max_c",
                "must be positive",
            ));
        }
        if !strictly_increasing(&[visibility.frost_certain_c, visibility.frost_max_c]) {
            return Err(ConfigError::invalid(
                "visibility.frost_certain_c",
                "must be below visibility.frost_max_c",
            ));
        }

        let exceptional = &self.exceptional;
        if !strictly_increasing(&[exceptional.hail_min_c, exceptional.hail_max_c]) {
            return Err(ConfigError::invalid(
                "exceptional.hail_min_c",
                "hail band must have hail_min_c < hail_max_c",
            ));
        }
        if !strictly_increasing(&[exceptional.extreme_low_hpa, exceptional.extreme_high_hpa]) {
            return Err(ConfigError::invalid(
                "exceptional.extreme_low_hpa",
                "extreme-pressure envelope must have low < high",
            ));
        }

        if self.timing.refresh_interval_min == 0 {
            return Err(ConfigError::invalid(
                "timing.refresh_interval_min",
                "must be positive",
            ));
        }
        if !is_positive(self.timing.aging_threshold_h) {
            return Err(ConfigError::invalid(
                "timing.aging_threshold_h",
                "must be positive",
            ));
        }

        Ok(())
    }
}

/// NaN-safe positivity check
fn is_positive(value: f64) -> bool {
    value > 0.0
}

/// True when every value is strictly greater than the one before (NaN fails)
fn strictly_increasing(values: &[f64]) -> bool {
    values.windows(2).all(|pair| pair[0] < pair[1])
}
