//! Forecast models
//!
//! Four independent models share the [`Forecaster`] capability:
//!
//! | Model | Inputs | Useful horizon |
//! |-------|--------|----------------|
//! | [`Persistence`] | pressure level, humidity, sunshine | 0-3 h |
//! | [`WmoSimple`] | pressure, trend (optional) | 1-6 h |
//! | [`Zambretti`] | pressure, trend, wind, season | 3 h+ |
//! | [`NegrettiZambra`] | pressure, trend, wind, season | 3 h+ |
//!
//! The set is closed: [`ForecastModel`] enumerates it and dispatches
//! statically, and the blending weights are keyed by it.

mod negretti_zambra;
mod persistence;
#[allow(clippy::module_name_repetitions)]
mod r#trait;
pub mod trend;
mod wmo_simple;
mod zambretti;

pub use negretti_zambra::NegrettiZambra;
pub use persistence::Persistence;
pub use r#trait::{Forecaster, ModelOutput};
pub use wmo_simple::WmoSimple;
pub use zambretti::Zambretti;

use crate::config::BlendConfig;
use crate::core_types::units::Hours;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Confidence both classical models decay toward far beyond the nowcast band
///
/// Sharing one value makes the confidence-proportional split converge to an
/// even split at long horizons.
pub const CLIMATOLOGY_CONFIDENCE: f64 = 0.15;

/// Trend-based confidence assumed for both classical models in nominal weights
const NOMINAL_CLASSICAL_BASE: f64 = 0.7;

/// Classical confidence at a horizon
///
/// Equal to `base` inside the nowcast band, then an exponential approach to
/// [`CLIMATOLOGY_CONFIDENCE`] with e-folding time `decay_hours`.
pub(crate) fn classical_confidence(
    base: f64,
    horizon: Hours,
    decay_hours: f64,
    config: &BlendConfig,
) -> f64 {
    let past = (*horizon - config.nowcast_band_end_h).max(0.0);
    CLIMATOLOGY_CONFIDENCE + (base - CLIMATOLOGY_CONFIDENCE) * (-past / decay_hours).exp()
}

/// Identifies one of the four forecast models
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ForecastModel {
    /// "Weather stays as it is now"
    Persistence,
    /// WMO tendency nowcast
    WmoSimple,
    /// Zambretti table algorithm
    Zambretti,
    /// Negretti-Zambra formula algorithm
    NegrettiZambra,
}

impl ForecastModel {
    /// All models, in weight-table order
    pub const ALL: [ForecastModel; 4] = [
        ForecastModel::Persistence,
        ForecastModel::WmoSimple,
        ForecastModel::Zambretti,
        ForecastModel::NegrettiZambra,
    ];

    /// Position in [`ForecastModel::ALL`]
    #[must_use]
    pub const fn index(self) -> usize {
        self as usize
    }

    /// The model implementation
    #[must_use]
    pub fn forecaster(self) -> &'static dyn Forecaster {
        match self {
            ForecastModel::Persistence => &Persistence,
            ForecastModel::WmoSimple => &WmoSimple,
            ForecastModel::Zambretti => &Zambretti,
            ForecastModel::NegrettiZambra => &NegrettiZambra,
        }
    }

    /// Whether this is one of the two classical letter-code algorithms
    #[must_use]
    pub const fn is_classical(self) -> bool {
        matches!(
            self,
            ForecastModel::Zambretti | ForecastModel::NegrettiZambra
        )
    }

    /// Confidence of a classical model at a horizon for a typical trend,
    /// `None` otherwise
    ///
    /// Both models start from the same trend-based confidence, so the ratio
    /// between the two reflects horizon decay alone and decides their nominal
    /// split.
    #[must_use]
    pub fn nominal_confidence(self, horizon: Hours, config: &BlendConfig) -> Option<f64> {
        match self {
            ForecastModel::Zambretti => {
                Some(Zambretti::confidence_at(NOMINAL_CLASSICAL_BASE, horizon, config))
            }
            ForecastModel::NegrettiZambra => Some(NegrettiZambra::confidence_at(
                NOMINAL_CLASSICAL_BASE,
                horizon,
                config,
            )),
            ForecastModel::Persistence | ForecastModel::WmoSimple => None,
        }
    }

    /// Stable identifier (matches the serde representation)
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            ForecastModel::Persistence => "persistence",
            ForecastModel::WmoSimple => "wmo_simple",
            ForecastModel::Zambretti => "zambretti",
            ForecastModel::NegrettiZambra => "negretti_zambra",
        }
    }
}

impl fmt::Display for ForecastModel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ForecastConfig;
    use crate::core_types::observation::{Hemisphere, Observation};
    use chrono::{TimeZone, Utc};

    #[test]
    fn test_index_matches_table_order() {
        for (i, model) in ForecastModel::ALL.iter().enumerate() {
            assert_eq!(model.index(), i);
        }
    }

    #[test]
    fn test_forecast_is_none_exactly_when_unavailable() {
        let config = ForecastConfig::default();
        let at = Utc.with_ymd_and_hms(2024, 10, 1, 8, 0, 0).unwrap();
        let observations = [
            Observation::new(at, Hemisphere::North),
            Observation::new(at, Hemisphere::North).with_pressure(1010.0),
            Observation::new(at, Hemisphere::North).with_pressure_trend(-1.0),
            Observation::new(at, Hemisphere::South)
                .with_pressure(1010.0)
                .with_pressure_trend(-1.0),
        ];
        for observation in &observations {
            for model in ForecastModel::ALL {
                let forecaster = model.forecaster();
                let output = forecaster.forecast(observation, Hours::new(4.0), &config);
                assert_eq!(output.is_some(), forecaster.is_available(observation), "{model}");
                if let Some(output) = output {
                    assert!((0.0..=1.0).contains(&output.confidence));
                    assert_eq!(output.code.is_some(), model.is_classical());
                }
            }
        }
    }

    #[test]
    fn test_only_classical_models_report_nominal_confidence() {
        let config = BlendConfig::default();
        for model in ForecastModel::ALL {
            assert_eq!(
                model.nominal_confidence(Hours::new(12.0), &config).is_some(),
                model.is_classical()
            );
        }
    }

    #[test]
    fn test_classical_confidence_decays_to_climatology() {
        let config = BlendConfig::default();
        let at = |h| classical_confidence(0.8, Hours::new(h), 18.0, &config);
        assert_eq!(at(2.0), 0.8);
        assert_eq!(at(6.0), 0.8);
        assert!(at(12.0) < at(6.0));
        assert!(at(12.0) > at(30.0));
        assert!((at(500.0) - CLIMATOLOGY_CONFIDENCE).abs() < 1e-9);
        assert!(at(500.0) >= CLIMATOLOGY_CONFIDENCE);
    }
}
