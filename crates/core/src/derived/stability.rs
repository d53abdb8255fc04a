//! Atmosphere stability from the pressure trend magnitude

use crate::config::TrendConfig;
use crate::core_types::units::PressureTendency;
use crate::models::trend::{tendency_magnitude, TendencyMagnitude};
use serde::{Deserialize, Serialize};

/// Coarse stability of the air mass
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AtmosphereStability {
    /// Barometer steady
    Stable,
    /// Moderate change, or trend unknown
    Neutral,
    /// Quick or very rapid change
    Unstable,
}

impl AtmosphereStability {
    /// Classify using the same tendency buckets as the models
    ///
    /// A missing trend gives [`AtmosphereStability::Neutral`].
    #[must_use]
    pub fn classify(trend: Option<PressureTendency>, config: &TrendConfig) -> Self {
        match trend.map(|t| tendency_magnitude(t, config)) {
            Some(TendencyMagnitude::Steady) => AtmosphereStability::Stable,
            Some(TendencyMagnitude::Moderate) | None => AtmosphereStability::Neutral,
            Some(TendencyMagnitude::Quick | TendencyMagnitude::VeryRapid) => {
                AtmosphereStability::Unstable
            }
        }
    }
}
