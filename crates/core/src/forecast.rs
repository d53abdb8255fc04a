//! Forecast entry points and the assembled result
//!
//! [`compute_forecast`] is the single public operation: resolve trends,
//! blend the models, then run every derived calculator on the outcome. The
//! batch helpers only fan that out across horizons.

use crate::blend::{blend, BlendedForecast, ModelContribution};
use crate::config::ForecastConfig;
use crate::core_types::observation::{Observation, ObservationBuffer};
use crate::core_types::units::{Celsius, Hours};
use crate::core_types::weather::WeatherState;
use crate::derived::exceptional::{self, ExceptionalWeather};
use crate::derived::icons::icon;
use crate::derived::precipitation::PrecipitationType;
use crate::derived::rain::{rain_probability, RainProbability, RuleFamily};
use crate::derived::stability::AtmosphereStability;
use crate::derived::timing::next_change;
use crate::derived::visibility::{fog_risk, frost_risk, snow_risk, visibility_level, VisibilityLevel};
use crate::derived::wind::WindScale;
use crate::models::ForecastModel;
use chrono::{DateTime, Utc};
use rayon::prelude::*;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use tracing::{debug, info};

/// Hours after which the temperature trend is no longer extrapolated
const TEMPERATURE_PROJECTION_CAP_H: f64 = 6.0;

/// Complete forecast for one horizon
///
/// Built fresh on every call; nothing in it refers back to engine state.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ForecastResult {
    /// Horizon the result describes, after clamping
    pub hours_ahead: u32,
    /// Blended weather state
    pub weather_state: WeatherState,
    /// Human-readable forecast phrase
    pub forecast_text: String,
    /// Blend confidence in 0-1
    pub confidence: f64,
    /// Classical letter A-Z, only when a classical model dominates
    pub letter_code: Option<char>,
    /// Rain chance over the next 6 and 12 hours
    pub rain_probability: RainProbability,
    /// Phase any precipitation would take
    pub precipitation_type: PrecipitationType,
    /// Exceptional conditions present now
    pub exceptional_flags: BTreeSet<ExceptionalWeather>,
    /// Beaufort force and compass direction, when wind speed is known
    pub wind_scale: Option<WindScale>,
    /// Visibility class 1 (worst) to 8 for the current state, like the
    /// fog and frost risks
    pub visibility_level: VisibilityLevel,
    /// Fog risk 0-1
    pub fog_risk: f64,
    /// Snow risk 0-1
    pub snow_risk: f64,
    /// Frost risk 0-1
    pub frost_risk: f64,
    /// Air-mass stability
    pub atmosphere_stability: AtmosphereStability,
    /// Icon for the weather now
    pub icon_now: String,
    /// Icon for the forecast state
    pub icon_later: String,
    /// When the forecast is next expected to change
    pub next_change_time: DateTime<Utc>,
    /// Minutes until `next_change_time`, rounded up
    pub next_change_minutes: i64,
    /// Temperature extrapolated to the horizon (°C)
    pub projected_temperature_c: Option<f64>,
    /// What each model contributed
    pub details: Vec<ModelContribution>,
}

/// Rain rule family of the more heavily weighted classical model
fn rule_family(blended: &BlendedForecast) -> RuleFamily {
    let weight = |model| blended.contribution(model).map_or(0.0, |c| c.weight);
    if weight(ForecastModel::NegrettiZambra) > weight(ForecastModel::Zambretti) {
        RuleFamily::NegrettiZambra
    } else {
        RuleFamily::Zambretti
    }
}

/// Temperature extrapolated along its trend, capped at a few hours ahead
fn projected_temperature(observation: &Observation, horizon: Hours, interval_h: f64) -> Option<Celsius> {
    let temperature = observation.temperature()?;
    let Some(trend) = observation.temperature_trend() else {
        return Some(temperature);
    };
    let hours = horizon.min(Hours::new(TEMPERATURE_PROJECTION_CAP_H));
    Some(temperature + trend * *hours / interval_h)
}

/// Compute the forecast for one horizon
///
/// Never fails: missing sensors narrow the set of models and lower the
/// confidence, and out-of-range horizons are clamped to
/// `0..=config.blend.max_horizon_h`.
///
/// # Arguments
///
/// * `buffer` - Current observation, optional prior observation and the
///   previous forecast time
/// * `hours_ahead` - Horizon in hours
/// * `config` - Engine configuration
///
/// # Example
/// ```
/// use barocast_core::{compute_forecast, ForecastConfig, Hemisphere, Observation, WeatherState};
/// use chrono::{TimeZone, Utc};
///
/// let now = Utc.with_ymd_and_hms(2024, 1, 10, 9, 0, 0).unwrap();
/// let observation = Observation::new(now, Hemisphere::North)
///     .with_pressure(1020.0)
///     .with_pressure_trend(0.0)
///     .with_temperature(15.0);
///
/// let result = compute_forecast(&observation.into(), 0, &ForecastConfig::default());
/// assert_eq!(result.weather_state, WeatherState::PartlyCloudy);
/// assert!(result.letter_code.is_none());
/// ```
#[must_use]
pub fn compute_forecast(
    buffer: &ObservationBuffer,
    hours_ahead: i32,
    config: &ForecastConfig,
) -> ForecastResult {
    let interval_h = config.trend.temperature_interval_hours;
    let observation = buffer.resolved(Hours::new(interval_h));
    let blended = blend(&observation, f64::from(hours_ahead), config);

    let family = rule_family(&blended);
    let rain = rain_probability(blended.current_state, blended.state, family);
    let precipitation =
        PrecipitationType::classify(observation.temperature(), &config.precipitation);
    let fog = fog_risk(&observation, &config.visibility);
    let is_daytime = observation.is_daytime();
    let timing = next_change(buffer.last_forecast_at(), buffer.now(), &config.timing);

    debug!(
        "Forecast +{}: {} ({:.2}), rain {}%/{}%, family {:?}",
        blended.horizon,
        blended.state,
        blended.confidence,
        rain.six_hours,
        rain.twelve_hours,
        family
    );

    ForecastResult {
        hours_ahead: *blended.horizon as u32,
        weather_state: blended.state,
        forecast_text: blended.text,
        confidence: blended.confidence,
        letter_code: blended.letter_code.map(|code| code.letter()),
        rain_probability: rain,
        precipitation_type: precipitation,
        exceptional_flags: exceptional::detect(&observation, &config.exceptional),
        wind_scale: observation
            .wind_speed()
            .map(|speed| WindScale::classify(speed, observation.wind_direction())),
        visibility_level: visibility_level(fog, observation.humidity(), blended.current_state),
        fog_risk: fog,
        snow_risk: snow_risk(observation.temperature(), rain, &config.precipitation),
        frost_risk: frost_risk(&observation, blended.current_state, &config.visibility),
        atmosphere_stability: AtmosphereStability::classify(
            observation.pressure_trend(),
            &config.trend,
        ),
        icon_now: icon(blended.current_state, is_daytime, precipitation).to_string(),
        icon_later: icon(blended.state, is_daytime, precipitation).to_string(),
        next_change_time: timing.at,
        next_change_minutes: timing.minutes,
        projected_temperature_c: projected_temperature(&observation, blended.horizon, interval_h)
            .map(|t| *t),
        details: blended.contributions,
    }
}

/// Compute forecasts for several horizons in parallel
///
/// Results are in the same order as `horizons`.
#[must_use]
pub fn compute_forecasts(
    buffer: &ObservationBuffer,
    horizons: &[i32],
    config: &ForecastConfig,
) -> Vec<ForecastResult> {
    horizons
        .par_iter()
        .map(|&hours_ahead| compute_forecast(buffer, hours_ahead, config))
        .collect()
}

/// Hourly forecast series from now through `hours` hours ahead (inclusive)
#[must_use]
pub fn hourly_forecast(
    buffer: &ObservationBuffer,
    hours: u32,
    config: &ForecastConfig,
) -> Vec<ForecastResult> {
    let last = hours.min(config.blend.max_horizon_h);
    info!("Computing hourly forecast series 0..={}h", last);
    let horizons: Vec<i32> = (0..=last).map(|h| h as i32).collect();
    compute_forecasts(buffer, &horizons, config)
}
