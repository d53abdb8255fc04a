//! Rain probability against a reference transition table
//!
//! `REFERENCE` holds 6 h / 12 h precipitation chances for every
//! (current, forecast) transition in the style of a forecast-service
//! probability-of-precipitation table. Rows are the current state and columns
//! the forecast state, both in ordinal order. The rule tables may disagree with
//! it, but never by more than a bounded margin.
//!
//! Run with: cargo test --test `rain_reference`

mod common;

use barocast_core::derived::rain::{baseline, rain_probability};
use barocast_core::{RuleFamily, WeatherState};

const TOLERANCE_PERCENT: i32 = 20;

/// (6 h, 12 h) chance in percent, `REFERENCE[current][forecast]`
#[rustfmt::skip]
const REFERENCE: [[(i32, i32); 7]; 7] = [
    //  sunny     p.cloudy  p.rainy   cloudy    rainy     pouring   lightning
    [(5, 10),  (10, 15), (35, 45), (20, 30), (55, 65), (75, 85), (70, 80)], // sunny
    [(5, 10),  (10, 15), (35, 45), (20, 30), (60, 70), (80, 85), (70, 80)], // partly cloudy
    [(10, 10), (15, 20), (45, 50), (30, 35), (70, 75), (85, 85), (75, 80)], // partly rainy
    [(10, 10), (15, 20), (45, 50), (30, 35), (70, 75), (85, 90), (75, 85)], // cloudy
    [(20, 15), (25, 20), (50, 50), (40, 40), (85, 80), (90, 90), (80, 85)], // rainy
    [(20, 15), (30, 20), (55, 50), (40, 40), (85, 80), (95, 90), (85, 85)], // pouring
    [(20, 15), (25, 20), (50, 50), (40, 40), (80, 80), (90, 90), (85, 85)], // lightning
];

fn reference(current: WeatherState, forecast: WeatherState) -> (i32, i32) {
    REFERENCE[usize::from(current.ordinal())][usize::from(forecast.ordinal())]
}

#[test]
fn test_rules_stay_near_reference() {
    for family in [RuleFamily::Zambretti, RuleFamily::NegrettiZambra] {
        for current in WeatherState::ALL {
            for forecast in WeatherState::ALL {
                let probability = rain_probability(current, forecast, family);
                let (six, twelve) = reference(current, forecast);

                assert!(probability.six_hours <= 100 && probability.twelve_hours <= 100);
                assert!(
                    (i32::from(probability.six_hours) - six).abs() <= TOLERANCE_PERCENT,
                    "{family:?} {current} -> {forecast}: 6h {} vs reference {six}",
                    probability.six_hours
                );
                assert!(
                    (i32::from(probability.twelve_hours) - twelve).abs() <= TOLERANCE_PERCENT,
                    "{family:?} {current} -> {forecast}: 12h {} vs reference {twelve}",
                    probability.twelve_hours
                );
            }
        }
    }
}

#[test]
fn test_reference_table_is_wetter_toward_severe_states() {
    // Sanity of the table itself: for a fixed current state, forecasting
    // rain is always wetter than forecasting sun
    for current in WeatherState::ALL {
        let sunny = reference(current, WeatherState::Sunny);
        let rainy = reference(current, WeatherState::Rainy);
        assert!(rainy.0 > sunny.0 && rainy.1 > sunny.1, "{current}");
    }
}

#[test]
fn test_wet_pairs_outrank_dry_pairs() {
    for family in [RuleFamily::Zambretti, RuleFamily::NegrettiZambra] {
        let dry = rain_probability(WeatherState::Sunny, WeatherState::Sunny, family);
        let wet = rain_probability(WeatherState::Rainy, WeatherState::Rainy, family);
        assert!(wet.six_hours > dry.six_hours);
        assert!(wet.twelve_hours > dry.twelve_hours);
    }
}

#[test]
fn test_uncovered_pairs_fall_back_to_baseline() {
    assert_eq!(
        rain_probability(
            WeatherState::Lightning,
            WeatherState::Cloudy,
            RuleFamily::Zambretti
        ),
        baseline(WeatherState::Cloudy)
    );
    assert_eq!(
        rain_probability(
            WeatherState::Cloudy,
            WeatherState::PartlyRainy,
            RuleFamily::NegrettiZambra
        ),
        baseline(WeatherState::PartlyRainy)
    );
}
