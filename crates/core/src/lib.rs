//! Barometric Forecast Core Library
//!
//! Turns local sensor readings (pressure, pressure trend, temperature and,
//! when available, wind, sunshine and humidity) into a short-range forecast
//! with no network weather service.
//!
//! ## Models and blending
//!
//! Four models are blended by horizon:
//! - Persistence for the present and the first hours
//! - WMO-simple tendency nowcasting for 1-6 hours
//! - Zambretti and Negretti-Zambra classical barometric algorithms beyond
//!
//! Weights vary continuously with the horizon. Missing sensors remove models
//! from the blend and lower confidence; they never fail a forecast.
//!
//! ## Derived products
//!
//! Rain probability, precipitation phase, exceptional-weather flags, wind
//! scale, visibility with fog, frost and snow risk, stability, icons and the
//! next refresh time are computed from the blended result.

// Core types and utilities
pub mod core_types;

// Configuration and errors
pub mod config;
pub mod error;

// Forecast engine
pub mod blend;
pub mod derived;
pub mod forecast;
pub mod models;

// Re-export core types
pub use core_types::{
    CompassPoint, ForecastCode, Hemisphere, Observation, ObservationBuffer, Season, WeatherState,
};
pub use core_types::{
    Celsius, Degrees, Hectopascals, Hours, MetersPerSecond, Percent, PressureTendency,
    WattsPerSquareMeter,
};

// Re-export configuration
pub use config::{DecayCurve, ForecastConfig};
pub use error::{ConfigError, Result};

// Re-export engine types
pub use blend::{BlendedForecast, ModelContribution, ModelWeights};
pub use derived::{
    AtmosphereStability, ExceptionalWeather, PrecipitationType, RainProbability, RuleFamily,
    VisibilityLevel, WindScale,
};
pub use forecast::{compute_forecast, compute_forecasts, hourly_forecast, ForecastResult};
pub use models::{ForecastModel, Forecaster, ModelOutput};
