//! End-to-end forecast scenarios
//!
//! Each scenario builds an observation the way a host would, runs the whole
//! pipeline through `compute_forecast`, and checks the assembled result.
//!
//! Run with: cargo test --test `forecast_scenarios`

mod common;

use barocast_core::{
    compute_forecast, ExceptionalWeather, ForecastConfig, ForecastModel, Hemisphere, Observation,
    ObservationBuffer, PrecipitationType, WeatherState,
};
use chrono::TimeDelta;
use common::{full_observation, january_morning};

// ═══════════════════════════════════════════════════════════════════════════════
// SCENARIO A: steady high pressure, now
// ═══════════════════════════════════════════════════════════════════════════════

#[test]
fn test_scenario_a_steady_high_pressure_now() {
    let config = ForecastConfig::default();
    let observation = Observation::new(january_morning(), Hemisphere::North)
        .with_pressure(1020.0)
        .with_pressure_trend(0.0)
        .with_temperature(5.0);

    let result = compute_forecast(&observation.into(), 0, &config);

    assert_eq!(result.weather_state, WeatherState::PartlyCloudy);
    assert!(result.confidence >= 0.9, "confidence = {}", result.confidence);
    assert!(result.letter_code.is_none());
    assert_eq!(result.details.len(), 1);
    assert_eq!(result.details[0].model, ForecastModel::Persistence);
    assert_eq!(result.icon_now, result.icon_later);
}

// ═══════════════════════════════════════════════════════════════════════════════
// SCENARIO B: winter pressure fall, half a day out
// ═══════════════════════════════════════════════════════════════════════════════

#[test]
fn test_scenario_b_winter_fall_twelve_hours() {
    let config = ForecastConfig::default();
    let observation = Observation::new(january_morning(), Hemisphere::North)
        .with_pressure(1005.0)
        .with_pressure_trend(-6.0)
        .with_temperature(-2.0);

    let result = compute_forecast(&observation.into(), 12, &config);

    let classical: f64 = result
        .details
        .iter()
        .filter(|c| c.model.is_classical())
        .map(|c| c.weight)
        .sum();
    assert!((classical - 1.0).abs() < 1e-9, "classical weight = {classical}");

    assert_eq!(result.precipitation_type, PrecipitationType::Snow);
    assert!(
        result.weather_state.ordinal() >= WeatherState::Rainy.ordinal(),
        "state = {}",
        result.weather_state
    );
    assert!(result.snow_risk > 0.5, "snow risk = {}", result.snow_risk);
    assert!(result.icon_later.contains("snow"), "icon = {}", result.icon_later);
}

#[test]
fn test_slower_decaying_classical_model_leads_two_days_out() {
    let config = ForecastConfig::default();
    let observation = Observation::new(january_morning(), Hemisphere::North)
        .with_pressure(1005.0)
        .with_pressure_trend(-6.0)
        .with_temperature(-2.0);

    let result = compute_forecast(&observation.into(), 48, &config);

    let detail = |model| {
        result
            .details
            .iter()
            .find(|c| c.model == model)
            .unwrap()
            .clone()
    };
    let zambretti = detail(ForecastModel::Zambretti);
    let negretti = detail(ForecastModel::NegrettiZambra);
    assert!(negretti.confidence > zambretti.confidence);
    assert!(
        (negretti.weight - negretti.confidence / (negretti.confidence + zambretti.confidence))
            .abs()
            < 1e-9,
        "weight {} not proportional to confidence",
        negretti.weight
    );
    assert!(negretti.weight > config.blend.dominance_threshold);
    assert_eq!(result.letter_code, Some('U'));
    assert_eq!(result.forecast_text, negretti.text);
}

#[test]
fn test_scenario_b_shifts_wetter_than_scenario_a() {
    let config = ForecastConfig::default();
    let steady = Observation::new(january_morning(), Hemisphere::North)
        .with_pressure(1020.0)
        .with_pressure_trend(0.0)
        .with_temperature(5.0);
    let falling = Observation::new(january_morning(), Hemisphere::North)
        .with_pressure(1005.0)
        .with_pressure_trend(-6.0)
        .with_temperature(-2.0);

    let a = compute_forecast(&steady.into(), 0, &config);
    let b = compute_forecast(&falling.into(), 12, &config);

    assert!(b.weather_state.ordinal() > a.weather_state.ordinal());
    assert!(b.rain_probability.twelve_hours > a.rain_probability.twelve_hours);
}

// ═══════════════════════════════════════════════════════════════════════════════
// SCENARIO C: hurricane-force wind with a sharp fall
// ═══════════════════════════════════════════════════════════════════════════════

#[test]
fn test_scenario_c_hurricane_flag_leaves_state_alone() {
    let config = ForecastConfig::default();
    let calm = Observation::new(january_morning(), Hemisphere::North)
        .with_pressure(985.0)
        .with_pressure_trend(-8.0)
        .with_temperature(18.0)
        .with_wind_direction(160.0);
    let storm = calm.clone().with_wind_speed(35.0);

    for hours in [0, 2, 6, 12, 24] {
        let without = compute_forecast(&calm.clone().into(), hours, &config);
        let with = compute_forecast(&storm.clone().into(), hours, &config);

        assert!(with.exceptional_flags.contains(&ExceptionalWeather::Hurricane));
        assert!(!without.exceptional_flags.contains(&ExceptionalWeather::Hurricane));
        assert_eq!(with.weather_state, without.weather_state, "h = {hours}");
        assert_eq!(with.wind_scale.map(|w| w.beaufort), Some(12));
    }
}

#[test]
fn test_scenario_c_sharp_warm_fall_flags_hail() {
    let config = ForecastConfig::default();
    let observation = Observation::new(january_morning(), Hemisphere::North)
        .with_pressure(985.0)
        .with_pressure_trend(-8.0)
        .with_temperature(18.0);
    let result = compute_forecast(&observation.into(), 3, &config);
    assert!(result.exceptional_flags.contains(&ExceptionalWeather::Hail));
    assert_eq!(result.weather_state, WeatherState::Lightning);
}

// ═══════════════════════════════════════════════════════════════════════════════
// MISSING INPUT
// ═══════════════════════════════════════════════════════════════════════════════

#[test]
fn test_missing_trend_redistributes_to_nowcasting() {
    let config = ForecastConfig::default();
    let full = full_observation(1008.0, -2.5, 9.0);
    let no_trend = Observation::new(january_morning(), Hemisphere::North)
        .with_pressure(1008.0)
        .with_temperature(9.0)
        .with_temperature_trend(0.0)
        .with_humidity(70.0)
        .with_wind_speed(4.0)
        .with_wind_direction(250.0)
        .with_daytime(true);

    for hours in [6, 12] {
        let complete = compute_forecast(&full.clone().into(), hours, &config);
        let degraded = compute_forecast(&no_trend.clone().into(), hours, &config);

        assert!(degraded.details.iter().all(|c| !c.model.is_classical()));
        assert!(degraded
            .details
            .iter()
            .any(|c| c.model == ForecastModel::WmoSimple));
        assert!(
            degraded.confidence < complete.confidence,
            "h = {hours}: {} !< {}",
            degraded.confidence,
            complete.confidence
        );
        assert!(degraded.letter_code.is_none());
    }
}

#[test]
fn test_missing_pressure_still_forecasts() {
    let config = ForecastConfig::default();
    let observation = Observation::new(january_morning(), Hemisphere::North)
        .with_temperature(3.0)
        .with_humidity(92.0);

    for hours in [0, 3, 6, 24, 72] {
        let result = compute_forecast(&observation.clone().into(), hours, &config);
        assert_eq!(result.details.len(), 1);
        assert_eq!(result.details[0].model, ForecastModel::Persistence);
        assert!((0.0..=1.0).contains(&result.confidence));
    }
}

#[test]
fn test_empty_observation_is_not_an_error() {
    let config = ForecastConfig::default();
    let observation = Observation::new(january_morning(), Hemisphere::South);
    let result = compute_forecast(&observation.into(), 12, &config);
    assert_eq!(result.precipitation_type, PrecipitationType::None);
    assert!(result.wind_scale.is_none());
    assert!(result.projected_temperature_c.is_none());
    assert_eq!(result.fog_risk, 0.0);
    assert!(result.exceptional_flags.is_empty());
}

// ═══════════════════════════════════════════════════════════════════════════════
// BUFFER AND TIMING
// ═══════════════════════════════════════════════════════════════════════════════

#[test]
fn test_trend_derived_from_previous_observation_enables_classical_models() {
    let config = ForecastConfig::default();
    let now = january_morning();
    let previous = Observation::new(now - TimeDelta::hours(3), Hemisphere::North)
        .with_pressure(1012.0)
        .with_temperature(4.0);
    let current = Observation::new(now, Hemisphere::North)
        .with_pressure(1006.0)
        .with_temperature(2.0);

    let buffer = ObservationBuffer::new(current).with_previous(previous);
    let result = compute_forecast(&buffer, 12, &config);

    assert!(result.details.iter().any(|c| c.model.is_classical()));
    // 2 °C falling 2 °C over 3 h, extrapolated 6 h at most
    let projected = result.projected_temperature_c.unwrap();
    assert!((projected - (2.0 - 4.0)).abs() < 1e-9, "projected = {projected}");
}

#[test]
fn test_next_change_follows_last_update() {
    let config = ForecastConfig::default();
    let now = january_morning();
    let buffer = ObservationBuffer::new(full_observation(1015.0, 0.5, 8.0))
        .with_last_forecast_at(now - TimeDelta::minutes(40));

    let result = compute_forecast(&buffer, 3, &config);
    assert_eq!(result.next_change_minutes, 20);
    assert_eq!(result.next_change_time, now + TimeDelta::minutes(20));
}
