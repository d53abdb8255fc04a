//! C ABI for the barometric forecast engine
//!
//! An opaque [`BarocastInstance`] owns the configuration and the readings
//! seen so far. Every fallible call returns a [`BarocastErrorCode`]; details
//! of the last failure on the calling thread are available from
//! [`barocast_get_last_error`].
//!
//! The C header `BarocastFFI.h` is generated by the build script.

mod error;
mod forecast;
mod helpers;
mod instance;
mod observation;

pub use error::{barocast_get_last_error, barocast_get_last_error_code, BarocastErrorCode};
pub use forecast::{
    barocast_compute_forecast, barocast_get_forecast_icon, barocast_get_forecast_text,
    BarocastForecast, BAROCAST_FLAG_EXTREME_PRESSURE, BAROCAST_FLAG_HAIL,
    BAROCAST_FLAG_HURRICANE,
};
pub use instance::{
    barocast_destroy, barocast_new, barocast_new_from_file, barocast_new_from_toml,
    barocast_reset_history, BarocastInstance,
};
pub use observation::{BarocastHemisphere, BarocastObservation};
