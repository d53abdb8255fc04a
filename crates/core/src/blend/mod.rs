//! Horizon weighting and forecast blending
//!
//! [`weights`] decides how much each model counts at a horizon;
//! [`blend`] asks the models and combines their answers.

mod orchestrator;
mod weights;

pub use orchestrator::{blend, clamp_horizon, BlendedForecast, ModelContribution};
pub use weights::{classical_split, weights, weights_with_confidence, ModelWeights};
