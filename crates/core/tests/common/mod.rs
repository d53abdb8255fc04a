//! Shared fixtures for the integration tests

#![allow(dead_code)]

use barocast_core::{Hemisphere, Observation};
use chrono::{DateTime, TimeZone, Utc};

/// Install a tracing subscriber once per test binary
///
/// Filter with `RUST_LOG`, e.g. `RUST_LOG=barocast_core=trace`.
#[ctor::ctor]
fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}

/// Mid-January morning, northern winter
pub fn january_morning() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2024, 1, 15, 9, 0, 0).unwrap()
}

/// Mid-July afternoon, northern summer
pub fn july_afternoon() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2024, 7, 15, 15, 0, 0).unwrap()
}

/// Fully populated observation at a northern station
pub fn full_observation(pressure: f64, trend: f64, temperature: f64) -> Observation {
    Observation::new(january_morning(), Hemisphere::North)
        .with_pressure(pressure)
        .with_pressure_trend(trend)
        .with_temperature(temperature)
        .with_temperature_trend(0.0)
        .with_humidity(70.0)
        .with_wind_speed(4.0)
        .with_wind_direction(250.0)
        .with_daytime(true)
}
