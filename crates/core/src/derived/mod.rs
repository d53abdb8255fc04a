//! Quantities derived from the observation and the blended forecast
//!
//! Each calculator is a pure function of its inputs. A calculator whose
//! inputs are missing returns its neutral value (zero risk, no flag, unknown
//! phase) rather than failing.

pub mod exceptional;
pub mod icons;
pub mod precipitation;
pub mod rain;
pub mod stability;
pub mod timing;
pub mod visibility;
pub mod wind;

pub use exceptional::ExceptionalWeather;
pub use precipitation::PrecipitationType;
pub use rain::{rain_probability, RainProbability, RuleFamily};
pub use stability::AtmosphereStability;
pub use timing::{next_change, NextChange};
pub use visibility::{visibility_level, VisibilityLevel};
pub use wind::WindScale;
