//! Core types and utilities

pub mod compass;
pub mod observation;
pub mod units;
pub mod weather;

// Re-export
pub use compass::CompassPoint;
pub use observation::{dew_point, sea_level_pressure, Hemisphere, Observation, ObservationBuffer, Season};
pub use units::*;
pub use weather::{ForecastCode, WeatherState, FORECAST_TEXTS};
