//! Exceptional-weather flags
//!
//! Flags are reported alongside the forecast and never change the blended
//! state: they mark conditions the barometric models are not built to
//! describe.

use crate::config::ExceptionalConfig;
use crate::core_types::observation::Observation;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use tracing::warn;

/// Exceptional condition detected from current readings
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ExceptionalWeather {
    /// Sustained wind at hurricane force
    Hurricane,
    /// Rapid fall in the warm-season temperature band
    Hail,
    /// Pressure outside the usual climatological envelope
    ExtremePressure,
}

/// Detect every exceptional condition present in an observation
///
/// Each detector needs its own inputs and is silently skipped when they are
/// missing.
#[must_use]
pub fn detect(observation: &Observation, config: &ExceptionalConfig) -> BTreeSet<ExceptionalWeather> {
    let mut flags = BTreeSet::new();

    if observation
        .wind_speed()
        .is_some_and(|speed| *speed >= config.hurricane_wind_ms)
    {
        flags.insert(ExceptionalWeather::Hurricane);
    }

    if let (Some(trend), Some(temperature)) =
        (observation.pressure_trend(), observation.temperature())
    {
        let hail_band = config.hail_min_c..=config.hail_max_c;
        if *trend <= -config.hail_drop_hpa_per_3h && hail_band.contains(&*temperature) {
            flags.insert(ExceptionalWeather::Hail);
        }
    }

    if observation
        .pressure()
        .is_some_and(|p| *p < config.extreme_low_hpa || *p > config.extreme_high_hpa)
    {
        flags.insert(ExceptionalWeather::ExtremePressure);
    }

    if !flags.is_empty() {
        warn!("Exceptional weather detected: {:?}", flags);
    }
    flags
}
