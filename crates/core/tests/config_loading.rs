//! Loading engine configuration from TOML files
//!
//! Run with: cargo test --test `config_loading`

mod common;

use barocast_core::{ConfigError, DecayCurve, ForecastConfig};
use std::path::PathBuf;

const FULL_CONFIG: &str = r#"
[trend]
dead_band_hpa_per_3h = 1.0
quick_hpa_per_3h = 3.0
very_rapid_hpa_per_3h = 5.0
temperature_interval_hours = 3.0

[blend]
persistence_band_end_h = 2.0
nowcast_band_end_h = 8.0
dominance_threshold = 0.6
confidence_materiality = 0.1
proportional_ramp_h = 1.5
decay_curve = "smoothstep"
max_horizon_h = 48

[precipitation]
snow_max_c = -0.5
rain_min_c = 2.5

[visibility]
fog_spread_max_c = 3.0
frost_max_c = 4.0
frost_certain_c = -3.0
calm_wind_ms = 1.5

[exceptional]
hurricane_wind_ms = 33.0
hail_drop_hpa_per_3h = 4.0
hail_min_c = 12.0
hail_max_c = 28.0
extreme_low_hpa = 955.0
extreme_high_hpa = 1055.0

[timing]
refresh_interval_min = 30
aging_threshold_h = 4.0
aging_correction_min = 10
"#;

/// Per-test scratch file under the system temp directory
fn scratch_path(name: &str) -> PathBuf {
    std::env::temp_dir().join(format!("barocast-{}-{name}.toml", std::process::id()))
}

#[test]
fn test_full_file_round_trip() {
    let path = scratch_path("full");
    std::fs::write(&path, FULL_CONFIG).unwrap();
    let loaded = ForecastConfig::load(&path);
    std::fs::remove_file(&path).unwrap();
    let config = loaded.unwrap();

    assert_eq!(config.trend.temperature_interval_hours, 3.0);
    assert_eq!(config.blend.decay_curve, DecayCurve::Smoothstep);
    assert_eq!(config.blend.max_horizon_h, 48);
    assert_eq!(config.blend.proportional_ramp_h, 1.5);
    assert_eq!(config.precipitation.snow_max_c, -0.5);
    assert_eq!(config.exceptional.extreme_high_hpa, 1055.0);
    assert_eq!(config.timing.refresh_interval_min, 30);

    let written = toml::to_string(&config).unwrap();
    assert_eq!(ForecastConfig::from_toml_str(&written).unwrap(), config);
}

#[test]
fn test_empty_file_gives_defaults() {
    assert_eq!(
        ForecastConfig::from_toml_str("").unwrap(),
        ForecastConfig::default()
    );
}

#[test]
fn test_missing_file_is_io_error() {
    let path = scratch_path("does-not-exist");
    match ForecastConfig::load(&path) {
        Err(ConfigError::Io { path: reported, .. }) => assert_eq!(reported, path),
        other => panic!("expected Io error, got {other:?}"),
    }
}

#[test]
fn test_unknown_key_is_parse_error() {
    let result = ForecastConfig::from_toml_str("[blend]\nhorizon_bands = 3\n");
    assert!(matches!(result, Err(ConfigError::Parse(_))), "{result:?}");
}

#[test]
fn test_out_of_order_bands_are_invalid() {
    let result = ForecastConfig::from_toml_str(
        r#"
        [blend]
        persistence_band_end_h = 7.0
        nowcast_band_end_h = 6.0
        "#,
    );
    match result {
        Err(ConfigError::Invalid { field, .. }) => assert_eq!(field, "blend.nowcast_band_end_h"),
        other => panic!("expected Invalid error, got {other:?}"),
    }
}

#[test]
fn test_loaded_config_changes_forecast() {
    use barocast_core::{compute_forecast, ObservationBuffer};
    use common::full_observation;

    let strict = ForecastConfig::from_toml_str("[exceptional]\nhurricane_wind_ms = 3.0\n").unwrap();
    let buffer: ObservationBuffer = full_observation(1012.0, 0.0, 12.0).into();

    assert!(compute_forecast(&buffer, 0, &ForecastConfig::default())
        .exceptional_flags
        .is_empty());
    assert!(!compute_forecast(&buffer, 0, &strict)
        .exceptional_flags
        .is_empty());
}
