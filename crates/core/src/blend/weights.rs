//! Horizon-dependent model weights
//!
//! Three consecutive bands, each a ramp between two regimes:
//!
//! ```text
//! h = 0          persistence only
//! 0 < h <= 3     persistence -> WMO-simple
//! 3 < h <= 6     WMO-simple  -> classical pair
//! h > 6          classical pair only
//! ```
//!
//! Band edges and ramp shape come from [`BlendConfig`]. Every ramp reaches 0
//! and 1 exactly at its edges, so weights are continuous in `h` and no model
//! receives weight outside its band. Past the nowcast band the classical pair
//! is split in proportion to confidence.

use crate::config::BlendConfig;
use crate::core_types::units::Hours;
use crate::models::ForecastModel;
use serde::{Deserialize, Serialize};

/// Weight per model, always summing to 1
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ModelWeights([f64; 4]);

impl ModelWeights {
    /// All weight on a single model
    #[must_use]
    pub fn only(model: ForecastModel) -> Self {
        let mut weights = [0.0; 4];
        weights[model.index()] = 1.0;
        Self(weights)
    }

    /// Weight of one model
    #[must_use]
    pub fn get(&self, model: ForecastModel) -> f64 {
        self.0[model.index()]
    }

    /// `(model, weight)` pairs in table order, including zero weights
    pub fn entries(&self) -> impl Iterator<Item = (ForecastModel, f64)> + '_ {
        ForecastModel::ALL.iter().map(|&model| (model, self.get(model)))
    }

    /// Sum of all weights
    #[must_use]
    pub fn total(&self) -> f64 {
        self.0.iter().sum()
    }

    /// Model with the largest weight (earliest in table order on ties)
    #[must_use]
    pub fn dominant(&self) -> (ForecastModel, f64) {
        self.entries().fold(
            (ForecastModel::Persistence, f64::NEG_INFINITY),
            |best, candidate| if candidate.1 > best.1 { candidate } else { best },
        )
    }

    /// Move the weight of unavailable models to their nearest available stand-in
    ///
    /// A classical model falls back to its sibling, then WMO-simple, then
    /// persistence. WMO-simple falls back to persistence. The total is
    /// preserved.
    #[must_use]
    pub fn redistribute(self, is_available: impl Fn(ForecastModel) -> bool) -> Self {
        let mut weights = self.0;
        for model in ForecastModel::ALL {
            let weight = weights[model.index()];
            if weight <= 0.0 || is_available(model) {
                continue;
            }
            if let Some(&stand_in) = fallbacks(model).iter().find(|&&m| is_available(m)) {
                weights[stand_in.index()] += weight;
                weights[model.index()] = 0.0;
            }
        }
        Self(weights)
    }
}

/// Preferred stand-ins for a model, nearest first
const fn fallbacks(model: ForecastModel) -> &'static [ForecastModel] {
    match model {
        ForecastModel::Zambretti => &[
            ForecastModel::NegrettiZambra,
            ForecastModel::WmoSimple,
            ForecastModel::Persistence,
        ],
        ForecastModel::NegrettiZambra => &[
            ForecastModel::Zambretti,
            ForecastModel::WmoSimple,
            ForecastModel::Persistence,
        ],
        ForecastModel::WmoSimple => &[ForecastModel::Persistence],
        ForecastModel::Persistence => &[ForecastModel::WmoSimple],
    }
}

/// Zambretti's share of the classical weight
///
/// Inside the nowcast band the split is even unless the confidences differ by
/// more than the materiality threshold; only the excess over the threshold
/// shifts weight. Past the band the share is proportional to confidence,
/// reached over `proportional_ramp_h` hours so the split stays continuous.
/// Both classical confidences decay toward one climatological value, which
/// brings the proportional split back to even at long horizons.
///
/// # Arguments
///
/// * `horizon` - Hours ahead
/// * `zambretti_confidence` - Zambretti confidence at this horizon
/// * `negretti_confidence` - Negretti-Zambra confidence at this horizon
/// * `config` - Blend configuration
#[must_use]
pub fn classical_split(
    horizon: Hours,
    zambretti_confidence: f64,
    negretti_confidence: f64,
    config: &BlendConfig,
) -> f64 {
    let total = zambretti_confidence + negretti_confidence;
    if total <= 0.0 || !total.is_finite() {
        return 0.5;
    }

    let difference = zambretti_confidence - negretti_confidence;
    let excess = (difference.abs() - config.confidence_materiality).max(0.0);
    let material = 0.5 + difference.signum() * excess / (2.0 * total);
    if *horizon <= config.nowcast_band_end_h {
        return material.clamp(0.0, 1.0);
    }

    let proportional = zambretti_confidence / total;
    let ramp = config
        .decay_curve
        .apply((*horizon - config.nowcast_band_end_h) / config.proportional_ramp_h);
    (material + (proportional - material) * ramp).clamp(0.0, 1.0)
}

/// Weights for a horizon given the two classical confidences
///
/// Does not account for model availability; see [`ModelWeights::redistribute`].
#[must_use]
pub fn weights_with_confidence(
    horizon: Hours,
    zambretti_confidence: f64,
    negretti_confidence: f64,
    config: &BlendConfig,
) -> ModelWeights {
    let h = *horizon;
    let curve = config.decay_curve;
    let persistence_end = config.persistence_band_end_h;
    let nowcast_end = config.nowcast_band_end_h;

    let (persistence, wmo, classical) = if h <= 0.0 {
        (1.0, 0.0, 0.0)
    } else if h <= persistence_end {
        let wmo = curve.apply(h / persistence_end);
        (1.0 - wmo, wmo, 0.0)
    } else if h <= nowcast_end {
        let wmo = 1.0 - curve.apply((h - persistence_end) / (nowcast_end - persistence_end));
        (0.0, wmo, 1.0 - wmo)
    } else {
        (0.0, 0.0, 1.0)
    };

    let share = classical_split(horizon, zambretti_confidence, negretti_confidence, config);
    ModelWeights([
        persistence,
        wmo,
        classical * share,
        classical * (1.0 - share),
    ])
}

/// Nominal weights for a horizon
///
/// The classical pair is split by the confidences both models would report
/// for the same trend, so only their horizon decay differs.
#[must_use]
pub fn weights(horizon: Hours, config: &BlendConfig) -> ModelWeights {
    let confidence = |model: ForecastModel| {
        model
            .nominal_confidence(horizon, config)
            .unwrap_or_default()
    };
    weights_with_confidence(
        horizon,
        confidence(ForecastModel::Zambretti),
        confidence(ForecastModel::NegrettiZambra),
        config,
    )
}
