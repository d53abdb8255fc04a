//! Rain probability from a (current, forecast) state pair
//!
//! Each classical algorithm carries its own rule family. Zambretti rules key
//! on exact state pairs; Negretti-Zambra rules key on coarse state groups.
//! Pairs no rule covers fall back to a per-forecast-state baseline.

use crate::core_types::weather::WeatherState;
use serde::{Deserialize, Serialize};

/// Which classical rule set to apply
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RuleFamily {
    /// Exact state-pair rules
    #[default]
    Zambretti,
    /// Grouped rules
    NegrettiZambra,
}

/// Chance of measurable rain in the next 6 and 12 hours (percent)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RainProbability {
    /// Next 6 hours, 0-100
    pub six_hours: u8,
    /// Next 12 hours, 0-100
    pub twelve_hours: u8,
}

impl RainProbability {
    const fn new(six_hours: u8, twelve_hours: u8) -> Self {
        Self {
            six_hours,
            twelve_hours,
        }
    }
}

/// Zambretti rules keyed by exact (current, forecast) pair
const ZAMBRETTI_RULES: [(WeatherState, WeatherState, RainProbability); 9] = {
    use WeatherState::{
        Cloudy as C, PartlyCloudy as PC, PartlyRainy as PR, Pouring as P, Rainy as R, Sunny as S,
    };
    [
        (S, S, RainProbability::new(5, 10)),
        (S, PR, RainProbability::new(25, 45)),
        (S, R, RainProbability::new(45, 65)),
        (PC, R, RainProbability::new(55, 70)),
        (C, R, RainProbability::new(65, 75)),
        (R, R, RainProbability::new(80, 80)),
        (R, S, RainProbability::new(20, 10)),
        (R, PC, RainProbability::new(30, 20)),
        (C, P, RainProbability::new(85, 90)),
    ]
};

/// Coarse grouping used by the Negretti-Zambra rules
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum StateGroup {
    Fair,
    Unsettled,
    Wet,
}

impl StateGroup {
    fn of(state: WeatherState) -> Self {
        match state {
            WeatherState::Sunny | WeatherState::PartlyCloudy => StateGroup::Fair,
            WeatherState::PartlyRainy | WeatherState::Cloudy => StateGroup::Unsettled,
            WeatherState::Rainy | WeatherState::Pouring | WeatherState::Lightning => {
                StateGroup::Wet
            }
        }
    }
}

/// Negretti-Zambra rules keyed by (current, forecast) group
const NEGRETTI_RULES: [(StateGroup, StateGroup, RainProbability); 4] = [
    (StateGroup::Fair, StateGroup::Fair, RainProbability::new(10, 15)),
    (StateGroup::Fair, StateGroup::Wet, RainProbability::new(66, 72)),
    (StateGroup::Wet, StateGroup::Wet, RainProbability::new(85, 85)),
    (StateGroup::Wet, StateGroup::Fair, RainProbability::new(20, 18)),
];

/// Probability implied by the forecast state alone
#[must_use]
pub fn baseline(forecast: WeatherState) -> RainProbability {
    match forecast {
        WeatherState::Sunny => RainProbability::new(5, 10),
        WeatherState::PartlyCloudy => RainProbability::new(15, 20),
        WeatherState::PartlyRainy => RainProbability::new(40, 50),
        WeatherState::Cloudy => RainProbability::new(25, 35),
        WeatherState::Rainy => RainProbability::new(70, 75),
        WeatherState::Pouring => RainProbability::new(90, 90),
        WeatherState::Lightning => RainProbability::new(80, 85),
    }
}

/// Rain probability for a state transition under a rule family
///
/// # Arguments
///
/// * `current` - State now
/// * `forecast` - Forecast state at the horizon
/// * `family` - Rule set of the classical algorithm leading the blend
#[must_use]
pub fn rain_probability(
    current: WeatherState,
    forecast: WeatherState,
    family: RuleFamily,
) -> RainProbability {
    let rule = match family {
        RuleFamily::Zambretti => ZAMBRETTI_RULES
            .iter()
            .find(|(from, to, _)| *from == current && *to == forecast)
            .map(|(_, _, probability)| *probability),
        RuleFamily::NegrettiZambra => {
            let (from, to) = (StateGroup::of(current), StateGroup::of(forecast));
            NEGRETTI_RULES
                .iter()
                .find(|(f, t, _)| *f == from && *t == to)
                .map(|(_, _, probability)| *probability)
        }
    };
    rule.unwrap_or_else(|| baseline(forecast))
}
