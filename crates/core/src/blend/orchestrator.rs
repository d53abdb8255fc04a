//! Weighted blending of model opinions into one forecast
//!
//! Each model with nonzero weight is asked for its state and confidence; the
//! final state is the weighted mean on the ordinal scale, rounded, with ties
//! going to the side carrying more confident weight. Text and letter code are
//! taken verbatim from a model only when it dominates the blend.

use super::weights::{weights, weights_with_confidence, ModelWeights};
use crate::config::ForecastConfig;
use crate::core_types::observation::Observation;
use crate::core_types::units::Hours;
use crate::core_types::weather::{ForecastCode, WeatherState};
use crate::models::{ForecastModel, ModelOutput, Persistence};
use serde::{Deserialize, Serialize};
use tracing::{debug, trace};

/// Fractional distance from .5 treated as an exact rounding tie
const TIE_EPSILON: f64 = 1e-9;

/// What one model said and how much it counted
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ModelContribution {
    /// The model
    pub model: ForecastModel,
    /// Final blend weight
    pub weight: f64,
    /// State the model forecast
    pub state: WeatherState,
    /// Model's own confidence
    pub confidence: f64,
    /// Model phrase
    pub text: String,
    /// Letter code, classical models only
    pub code: Option<ForecastCode>,
}

/// Result of blending all models for one horizon
#[derive(Debug, Clone, PartialEq)]
pub struct BlendedForecast {
    /// Horizon actually used, after clamping
    pub horizon: Hours,
    /// Blended weather state
    pub state: WeatherState,
    /// Forecast phrase
    pub text: String,
    /// Weighted confidence in 0-1
    pub confidence: f64,
    /// Classical letter code, only when a classical model dominates
    pub letter_code: Option<ForecastCode>,
    /// Persistence state at the time of observation
    pub current_state: WeatherState,
    /// Weights after availability redistribution
    pub weights: ModelWeights,
    /// Per-model detail, nonzero weights only
    pub contributions: Vec<ModelContribution>,
}

impl BlendedForecast {
    /// Contribution of one model, if it took part
    #[must_use]
    pub fn contribution(&self, model: ForecastModel) -> Option<&ModelContribution> {
        self.contributions.iter().find(|c| c.model == model)
    }
}

/// Clamp a requested horizon into `0..=max_horizon_h`
#[must_use]
pub fn clamp_horizon(hours_ahead: f64, config: &ForecastConfig) -> Hours {
    if hours_ahead.is_nan() {
        return Hours::ZERO;
    }
    Hours::new(hours_ahead.clamp(0.0, f64::from(config.blend.max_horizon_h)))
}

/// Phrase for a blend no single model dominates, from the direction of change
fn synthesized_text(current: WeatherState, forecast: WeatherState) -> &'static str {
    match i32::from(forecast.ordinal()) - i32::from(current.ordinal()) {
        d if d >= 2 => "Becoming much more unsettled",
        1 => "Becoming less settled",
        0 => "Little change expected",
        -1 => "Slowly improving",
        _ => "Becoming settled",
    }
}

/// Round a weighted mean ordinal to a state
///
/// On an exact .5 tie the side whose contributors carry the larger summed
/// `weight * confidence` wins; if that is also equal, the fairer state wins.
fn blended_state(mean: f64, contributions: &[ModelContribution]) -> WeatherState {
    let lower = mean.floor();
    if ((mean - lower) - 0.5).abs() >= TIE_EPSILON {
        return WeatherState::from_ordinal_saturating(mean.round() as i32);
    }

    let support = |keep: &dyn Fn(f64) -> bool| -> f64 {
        contributions
            .iter()
            .filter(|c| keep(f64::from(c.state.ordinal())))
            .map(|c| c.weight * c.confidence)
            .sum()
    };
    let below = support(&|ordinal| ordinal <= lower);
    let above = support(&|ordinal| ordinal > lower);

    let chosen = if above > below { lower + 1.0 } else { lower };
    WeatherState::from_ordinal_saturating(chosen as i32)
}

/// Blend all available models for one horizon
///
/// # Arguments
///
/// * `observation` - Current readings with trends already resolved
/// * `hours_ahead` - Requested horizon; clamped to `0..=max_horizon_h`
/// * `config` - Engine configuration
///
/// # Returns
///
/// The blended forecast. At zero horizon this is exactly the persistence
/// output, with no letter code.
#[must_use]
pub fn blend(observation: &Observation, hours_ahead: f64, config: &ForecastConfig) -> BlendedForecast {
    let horizon = clamp_horizon(hours_ahead, config);
    let (current_state, _) = Persistence::current_state(observation);
    let is_available = |model: ForecastModel| model.forecaster().is_available(observation);

    let nominal = weights(horizon, &config.blend).redistribute(is_available);
    let outputs: [Option<ModelOutput>; 4] = ForecastModel::ALL.map(|model| {
        if nominal.get(model) > 0.0 {
            model.forecaster().forecast(observation, horizon, config)
        } else {
            None
        }
    });

    let zambretti = outputs[ForecastModel::Zambretti.index()];
    let negretti = outputs[ForecastModel::NegrettiZambra.index()];
    let final_weights = match (zambretti, negretti) {
        (Some(z), Some(n)) => {
            weights_with_confidence(horizon, z.confidence, n.confidence, &config.blend)
                .redistribute(is_available)
        }
        _ => nominal,
    };
    trace!("Weights at {}: {:?}", horizon, final_weights);

    let mut contributions: Vec<ModelContribution> = ForecastModel::ALL
        .iter()
        .zip(outputs)
        .filter_map(|(&model, output)| {
            let output = output?;
            let weight = final_weights.get(model);
            (weight > 0.0).then(|| ModelContribution {
                model,
                weight,
                state: output.state,
                confidence: output.confidence,
                text: output.text.to_string(),
                code: output.code,
            })
        })
        .collect();

    for model in ForecastModel::ALL {
        if !is_available(model) {
            debug!("{model} unavailable at {horizon}, weight redistributed");
        }
    }

    let total: f64 = contributions.iter().map(|c| c.weight).sum();
    if total > 0.0 {
        for contribution in &mut contributions {
            contribution.weight /= total;
        }
    }

    if *horizon <= 0.0 {
        if let Some(persistence) = contributions
            .iter()
            .find(|c| c.model == ForecastModel::Persistence)
        {
            return BlendedForecast {
                horizon,
                state: persistence.state,
                text: persistence.text.clone(),
                confidence: persistence.confidence,
                letter_code: None,
                current_state,
                weights: ModelWeights::only(ForecastModel::Persistence),
                contributions: vec![ModelContribution {
                    weight: 1.0,
                    ..persistence.clone()
                }],
            };
        }
    }

    let mean: f64 = contributions
        .iter()
        .map(|c| c.weight * f64::from(c.state.ordinal()))
        .sum();
    let state = blended_state(mean, &contributions);
    let confidence = contributions
        .iter()
        .map(|c| c.weight * c.confidence)
        .sum::<f64>()
        .clamp(0.0, 1.0);

    let threshold = config.blend.dominance_threshold;
    let dominant = contributions
        .iter()
        .filter(|c| c.weight > threshold)
        .max_by(|a, b| a.weight.total_cmp(&b.weight));
    let text = dominant.map_or_else(
        || synthesized_text(current_state, state).to_string(),
        |c| c.text.clone(),
    );
    let letter_code = dominant
        .filter(|c| c.model.is_classical())
        .and_then(|c| c.code);

    debug!(
        "Blend at {}: mean ordinal {:.2} -> {}, confidence {:.2}, {} contributors",
        horizon,
        mean,
        state,
        confidence,
        contributions.len()
    );

    BlendedForecast {
        horizon,
        state,
        text,
        confidence,
        letter_code,
        current_state,
        weights: final_weights,
        contributions,
    }
}
