//! Display icon names
//!
//! Names follow the Material Design Icons weather set (`mdi:weather-*`).

use crate::core_types::weather::WeatherState;
use crate::derived::precipitation::PrecipitationType;

/// Icon for a state, with night and frozen-precipitation variants
///
/// # Arguments
///
/// * `state` - Weather state to depict
/// * `is_daytime` - Whether the sun is up
/// * `precipitation` - Phase of any precipitation
#[must_use]
pub fn icon(state: WeatherState, is_daytime: bool, precipitation: PrecipitationType) -> &'static str {
    // Phase only matters for states that actually precipitate
    let frozen = state.is_precipitating()
        && matches!(
            precipitation,
            PrecipitationType::Snow | PrecipitationType::Mixed
        );
    match state {
        WeatherState::Sunny if is_daytime => "mdi:weather-sunny",
        WeatherState::Sunny => "mdi:weather-night",
        WeatherState::PartlyCloudy if is_daytime => "mdi:weather-partly-cloudy",
        WeatherState::PartlyCloudy => "mdi:weather-night-partly-cloudy",
        WeatherState::PartlyRainy if frozen => "mdi:weather-partly-snowy",
        WeatherState::PartlyRainy => "mdi:weather-partly-rainy",
        WeatherState::Cloudy => "mdi:weather-cloudy",
        WeatherState::Rainy if precipitation == PrecipitationType::Snow => "mdi:weather-snowy",
        WeatherState::Rainy if frozen => "mdi:weather-snowy-rainy",
        WeatherState::Rainy => "mdi:weather-rainy",
        WeatherState::Pouring if frozen => "mdi:weather-snowy-heavy",
        WeatherState::Pouring => "mdi:weather-pouring",
        WeatherState::Lightning => "mdi:weather-lightning-rainy",
    }
}
