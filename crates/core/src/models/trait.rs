//! Forecaster trait definition
//!
//! Every forecast model, statistical or classical, answers the same question:
//! given one observation, what weather state is expected at a horizon and how
//! sure is the model. The orchestrator depends only on this trait.

use crate::config::ForecastConfig;
use crate::core_types::observation::Observation;
use crate::core_types::units::Hours;
use crate::core_types::weather::{ForecastCode, WeatherState};

/// One model's answer for one horizon
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ModelOutput {
    /// Expected weather state
    pub state: WeatherState,
    /// Self-reported confidence in 0-1
    pub confidence: f64,
    /// Model phrase describing the outlook
    pub text: &'static str,
    /// Letter code, classical models only
    pub code: Option<ForecastCode>,
}

/// Shared capability of all forecast models
///
/// Implementations are pure: the same observation, horizon and config always
/// give the same output.
pub trait Forecaster: Send + Sync {
    /// Whether the observation carries every input this model needs
    ///
    /// Models may still run on partial input and report a lower confidence;
    /// this only answers whether they can run at all.
    fn is_available(&self, observation: &Observation) -> bool;

    /// Forecast for one horizon
    ///
    /// # Arguments
    ///
    /// * `observation` - Current readings with trends already resolved
    /// * `horizon` - Hours ahead, already clamped to the supported range
    /// * `config` - Engine configuration
    ///
    /// # Returns
    ///
    /// `None` exactly when [`Forecaster::is_available`] is false
    fn forecast(
        &self,
        observation: &Observation,
        horizon: Hours,
        config: &ForecastConfig,
    ) -> Option<ModelOutput>;
}
