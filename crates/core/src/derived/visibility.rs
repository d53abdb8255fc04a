//! Fog, frost and snow risk, and the visibility classification
//!
//! Risks are scores in 0-1, not calibrated probabilities. Visibility is
//! estimated as a distance and then banded into eight levels, 1 being the
//! worst.

use crate::config::{PrecipitationConfig, VisibilityConfig};
use crate::core_types::observation::Observation;
use crate::core_types::units::{Celsius, Percent};
use crate::core_types::weather::WeatherState;
use crate::derived::rain::RainProbability;
use serde::{Deserialize, Serialize};

/// Clear-air visibility used as the estimate's ceiling (km)
const CLEAR_AIR_KM: f64 = 30.0;

/// Upper edge (km) of visibility levels 1-7; level 8 is anything beyond
const LEVEL_UPPER_KM: [f64; 7] = [0.05, 0.2, 0.5, 1.0, 2.0, 4.0, 10.0];

/// Irradiance (W/m²) at which daytime heating starts burning fog off
const FOG_BURN_OFF_WM2: f64 = 400.0;

/// Eight-level visibility class, 1 (under 50 m) to 8 (over 10 km)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct VisibilityLevel(u8);

impl VisibilityLevel {
    /// Worst level
    pub const MIN: VisibilityLevel = VisibilityLevel(1);
    /// Best level
    pub const MAX: VisibilityLevel = VisibilityLevel(8);

    /// Band an estimated visibility distance
    #[must_use]
    pub fn from_distance_km(km: f64) -> Self {
        let below = LEVEL_UPPER_KM.iter().take_while(|&&edge| km >= edge).count();
        VisibilityLevel(below as u8 + 1)
    }

    /// Level number 1-8
    #[must_use]
    pub const fn level(self) -> u8 {
        self.0
    }

    /// Short description of the band
    #[must_use]
    pub const fn description(self) -> &'static str {
        match self.0 {
            1 => "Dense fog",
            2 => "Thick fog",
            3 => "Fog",
            4 => "Poor",
            5 => "Moderate",
            6 => "Fair",
            7 => "Good",
            _ => "Excellent",
        }
    }
}

/// How much falling precipitation implied by a state cuts visibility
fn precipitation_factor(state: WeatherState) -> f64 {
    match state {
        WeatherState::Sunny | WeatherState::PartlyCloudy => 1.0,
        WeatherState::Cloudy => 0.9,
        WeatherState::PartlyRainy => 0.8,
        WeatherState::Rainy => 0.5,
        WeatherState::Lightning => 0.3,
        WeatherState::Pouring => 0.2,
    }
}

/// Haze reduction for humid air
fn humidity_factor(humidity: Option<Percent>) -> f64 {
    humidity.map_or(1.0, |h| {
        if *h > 80.0 {
            1.0 - (*h - 80.0) / 40.0
        } else {
            1.0
        }
    })
}

/// Estimated visibility distance (km)
#[must_use]
pub fn visibility_km(fog_risk: f64, humidity: Option<Percent>, state: WeatherState) -> f64 {
    let clear = 1.0 - fog_risk.clamp(0.0, 1.0);
    CLEAR_AIR_KM * clear * clear * precipitation_factor(state) * humidity_factor(humidity)
}

/// Visibility level from fog risk, humidity and the implied precipitation
///
/// # Arguments
///
/// * `fog_risk` - Fog risk score 0-1
/// * `humidity` - Relative humidity, if known
/// * `state` - Weather state whose precipitation intensity applies
#[must_use]
pub fn visibility_level(
    fog_risk: f64,
    humidity: Option<Percent>,
    state: WeatherState,
) -> VisibilityLevel {
    VisibilityLevel::from_distance_km(visibility_km(fog_risk, humidity, state))
}

/// Fog risk from the dew-point spread, reduced by wind and strong sunshine
///
/// Zero without both temperature and humidity.
#[must_use]
pub fn fog_risk(observation: &Observation, config: &VisibilityConfig) -> f64 {
    let (Some(temperature), Some(dew_point)) = (observation.temperature(), observation.dew_point())
    else {
        return 0.0;
    };

    let spread = (temperature - dew_point).max(0.0);
    let saturation = ((config.fog_spread_max_c - spread) / config.fog_spread_max_c).clamp(0.0, 1.0);

    let wind = observation.wind_speed().map_or(1.0, |speed| {
        if *speed <= config.calm_wind_ms {
            1.0
        } else {
            (config.calm_wind_ms / *speed).clamp(0.3, 1.0)
        }
    });
    let sun = match observation.solar_radiation() {
        Some(solar) if observation.is_daytime() && *solar >= FOG_BURN_OFF_WM2 => 0.5,
        _ => 1.0,
    };

    (saturation * wind * sun).clamp(0.0, 1.0)
}

/// Frost risk from temperature, sky cover and wind
///
/// # Arguments
///
/// * `observation` - Current readings
/// * `state` - Current sky state; clear skies radiate more heat away
/// * `config` - Thresholds
#[must_use]
pub fn frost_risk(observation: &Observation, state: WeatherState, config: &VisibilityConfig) -> f64 {
    let Some(temperature) = observation.temperature() else {
        return 0.0;
    };

    let cold = ((config.frost_max_c - *temperature) / (config.frost_max_c - config.frost_certain_c))
        .clamp(0.0, 1.0);
    let sky = match state {
        WeatherState::Sunny | WeatherState::PartlyCloudy => 1.0,
        WeatherState::Cloudy => 0.6,
        WeatherState::PartlyRainy
        | WeatherState::Rainy
        | WeatherState::Pouring
        | WeatherState::Lightning => 0.4,
    };
    let wind = match observation.wind_speed() {
        Some(speed) if *speed > config.calm_wind_ms => 0.7,
        _ => 1.0,
    };

    (cold * sky * wind).clamp(0.0, 1.0)
}

/// Snow risk: how cold it is for snow times the chance of precipitation
#[must_use]
pub fn snow_risk(
    temperature: Option<Celsius>,
    rain: RainProbability,
    config: &PrecipitationConfig,
) -> f64 {
    let Some(temperature) = temperature else {
        return 0.0;
    };
    let cold = ((config.rain_min_c - *temperature) / (config.rain_min_c - config.snow_max_c))
        .clamp(0.0, 1.0);
    cold * f64::from(rain.twelve_hours) / 100.0
}
