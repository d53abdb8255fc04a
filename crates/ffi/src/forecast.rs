use barocast_core::{
    compute_forecast, AtmosphereStability, ExceptionalWeather, ForecastResult, Observation,
    PrecipitationType,
};
use std::ffi::CString;
use std::os::raw::c_char;
use std::ptr;

use crate::error::{BarocastErrorCode, DefaultBarocastError};
use crate::helpers::{instance_from_ptr, track_error, track_result};
use crate::instance::{BarocastInstance, ForecastStrings};
use crate::observation::BarocastObservation;

/// Bit set in `exceptional_flags` for hurricane-force wind.
pub const BAROCAST_FLAG_HURRICANE: u32 = 1 << 0;
/// Bit set in `exceptional_flags` when hail is possible.
pub const BAROCAST_FLAG_HAIL: u32 = 1 << 1;
/// Bit set in `exceptional_flags` for pressure outside the usual envelope.
pub const BAROCAST_FLAG_EXTREME_PRESSURE: u32 = 1 << 2;

#[repr(C)]
/// FFI-friendly forecast for one horizon.
/// Keep this layout stable for C/C++/C# consumers.
///
/// Text and icon names are fetched separately with
/// `barocast_get_forecast_text` and `barocast_get_forecast_icon`.
pub struct BarocastForecast {
    /// Horizon after clamping (hours).
    pub hours_ahead: u32,

    /// Weather state ordinal: 0 sunny, 1 partly cloudy, 2 partly rainy,
    /// 3 cloudy, 4 rainy, 5 pouring, 6 lightning.
    pub weather_state: u8,

    /// Blend confidence (0.0 - 1.0).
    pub confidence: f64,

    /// Classical letter code `'A'..='Z'`, or 0 when no classical model dominates.
    pub letter_code: c_char,

    /// Rain chance over the next 6 hours (%).
    pub rain_probability_6h: u8,

    /// Rain chance over the next 12 hours (%).
    pub rain_probability_12h: u8,

    /// 0 unknown, 1 rain, 2 snow, 3 mixed.
    pub precipitation_type: u8,

    /// Bitwise OR of the `BAROCAST_FLAG_*` constants.
    pub exceptional_flags: u32,

    /// Beaufort force 0-12, or -1 when wind speed is unknown.
    pub beaufort: i8,

    /// Visibility level 1 (worst) to 8.
    pub visibility_level: u8,

    /// Fog risk (0.0 - 1.0).
    pub fog_risk: f64,

    /// Snow risk (0.0 - 1.0).
    pub snow_risk: f64,

    /// Frost risk (0.0 - 1.0).
    pub frost_risk: f64,

    /// 0 stable, 1 neutral, 2 unstable.
    pub atmosphere_stability: u8,

    /// Next expected change, seconds since the Unix epoch (UTC).
    pub next_change_unix: i64,

    /// Minutes until the next expected change, rounded up.
    pub next_change_minutes: i64,

    /// Temperature extrapolated to the horizon (°C), NaN when unknown.
    pub projected_temperature_c: f64,
}

impl From<&ForecastResult> for BarocastForecast {
    fn from(result: &ForecastResult) -> Self {
        let exceptional_flags = result
            .exceptional_flags
            .iter()
            .map(|flag| match flag {
                ExceptionalWeather::Hurricane => BAROCAST_FLAG_HURRICANE,
                ExceptionalWeather::Hail => BAROCAST_FLAG_HAIL,
                ExceptionalWeather::ExtremePressure => BAROCAST_FLAG_EXTREME_PRESSURE,
            })
            .fold(0, |flags, bit| flags | bit);

        Self {
            hours_ahead: result.hours_ahead,
            weather_state: result.weather_state.ordinal(),
            confidence: result.confidence,
            letter_code: result
                .letter_code
                .map_or(0, |letter| letter as u8 as c_char),
            rain_probability_6h: result.rain_probability.six_hours,
            rain_probability_12h: result.rain_probability.twelve_hours,
            precipitation_type: match result.precipitation_type {
                PrecipitationType::None => 0,
                PrecipitationType::Rain => 1,
                PrecipitationType::Snow => 2,
                PrecipitationType::Mixed => 3,
            },
            exceptional_flags,
            beaufort: result.wind_scale.map_or(-1, |scale| scale.beaufort as i8),
            visibility_level: result.visibility_level.level(),
            fog_risk: result.fog_risk,
            snow_risk: result.snow_risk,
            frost_risk: result.frost_risk,
            atmosphere_stability: match result.atmosphere_stability {
                AtmosphereStability::Stable => 0,
                AtmosphereStability::Neutral => 1,
                AtmosphereStability::Unstable => 2,
            },
            next_change_unix: result.next_change_time.timestamp(),
            next_change_minutes: result.next_change_minutes,
            projected_temperature_c: result.projected_temperature_c.unwrap_or(f64::NAN),
        }
    }
}

/// Compute a forecast and record the reading in the instance history.
fn forecast(
    instance: &BarocastInstance,
    raw: &BarocastObservation,
    hours_ahead: i32,
) -> Result<ForecastResult, DefaultBarocastError> {
    let observation = Observation::try_from(raw)?;
    let config = instance
        .config
        .read()
        .map_err(|_| DefaultBarocastError::lock_poisoned("config"))?;
    let mut history = instance
        .history
        .lock()
        .map_err(|_| DefaultBarocastError::lock_poisoned("history"))?;

    let result = compute_forecast(&history.buffer(observation.clone()), hours_ahead, &config);
    history.record(&observation);

    let mut strings = instance
        .strings
        .lock()
        .map_err(|_| DefaultBarocastError::lock_poisoned("strings"))?;
    *strings = ForecastStrings {
        text: CString::new(result.forecast_text.as_str()).ok(),
        icon_now: CString::new(result.icon_now.as_str()).ok(),
        icon_later: CString::new(result.icon_later.as_str()).ok(),
    };
    Ok(result)
}

#[no_mangle]
/// Compute the forecast `hours_ahead` hours from the observation time.
///
/// Missing readings never fail the call; they lower the confidence. Trends
/// left as NaN are derived from the reading stored by an earlier call.
/// Horizons outside the configured range are clamped.
///
/// Returns
/// - `BarocastErrorCode::Ok` (0) with the result written to `out_result`
/// - `BarocastErrorCode::NullPointer` if `ptr`, `observation` or `out_result` is null
/// - `BarocastErrorCode::InvalidObservation` if the timestamp is out of range
/// - `BarocastErrorCode::LockPoisoned` if an internal lock is poisoned
///
/// # Safety
///
/// - `ptr` must be null or a live pointer from `barocast_new*`.
/// - `observation` must be null or point to a valid `BarocastObservation`.
/// - `out_result` must be null or point to writable memory for a `BarocastForecast`.
///
/// # Example Usage (C)
/// ```c
/// BarocastForecast forecast;
/// if (barocast_compute_forecast(engine, &obs, 12, &forecast) != Ok) {
///     fprintf(stderr, "%s\n", barocast_get_last_error());
///     return;
/// }
/// if (forecast.exceptional_flags & BAROCAST_FLAG_HURRICANE) {
///     raise_alert();
/// }
/// ```
pub unsafe extern "C" fn barocast_compute_forecast(
    ptr: *const BarocastInstance,
    observation: *const BarocastObservation,
    hours_ahead: i32,
    out_result: *mut BarocastForecast,
) -> BarocastErrorCode {
    if out_result.is_null() {
        return track_error(&DefaultBarocastError::null_pointer("out_result"));
    }
    // SAFETY: null or valid per the caller contract
    let Some(raw) = (unsafe { observation.as_ref() }) else {
        return track_error(&DefaultBarocastError::null_pointer("observation"));
    };

    let result = unsafe { instance_from_ptr(ptr) }
        .and_then(|instance| forecast(instance, raw, hours_ahead))
        .map(|result| {
            // SAFETY: checked non-null above
            unsafe {
                *out_result = BarocastForecast::from(&result);
            }
        });
    track_result(result)
}

/// Read one cached string from the last forecast.
unsafe fn cached_string(
    ptr: *const BarocastInstance,
    select: fn(&ForecastStrings) -> Option<&CString>,
) -> *const c_char {
    let result = unsafe { instance_from_ptr(ptr) }.and_then(|instance| {
        let strings = instance
            .strings
            .lock()
            .map_err(|_| DefaultBarocastError::lock_poisoned("strings"))?;
        // The CString lives in the instance until the next forecast call
        Ok(select(&strings).map_or(ptr::null(), |cs| cs.as_ptr()))
    });
    match result {
        Ok(text) => text,
        Err(error) => {
            track_error(&error);
            ptr::null()
        }
    }
}

#[no_mangle]
/// Forecast text of the last successful `barocast_compute_forecast` call.
///
/// Returns a borrowed string, or null before the first forecast.
/// **DO NOT FREE THIS POINTER**; it is invalidated by the next forecast call.
///
/// # Safety
/// `ptr` must be null or a live pointer from `barocast_new*`.
pub unsafe extern "C" fn barocast_get_forecast_text(
    ptr: *const BarocastInstance,
) -> *const c_char {
    unsafe { cached_string(ptr, |strings| strings.text.as_ref()) }
}

#[no_mangle]
/// Icon name (`mdi:weather-*`) of the last forecast.
///
/// `later` selects the icon for the forecast state; otherwise the icon for
/// the weather at observation time is returned. Same lifetime rules as
/// `barocast_get_forecast_text`.
///
/// # Safety
/// `ptr` must be null or a live pointer from `barocast_new*`.
pub unsafe extern "C" fn barocast_get_forecast_icon(
    ptr: *const BarocastInstance,
    later: bool,
) -> *const c_char {
    if later {
        unsafe { cached_string(ptr, |strings| strings.icon_later.as_ref()) }
    } else {
        unsafe { cached_string(ptr, |strings| strings.icon_now.as_ref()) }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::instance::{barocast_destroy, barocast_new};
    use crate::observation::BarocastHemisphere;
    use std::ffi::CStr;

    fn observation(timestamp_unix: i64, pressure: f64, trend: f64) -> BarocastObservation {
        BarocastObservation {
            timestamp_unix,
            hemisphere: BarocastHemisphere::North,
            pressure_hpa: pressure,
            pressure_trend_hpa_per_3h: trend,
            temperature_c: 5.0,
            temperature_trend_c: f64::NAN,
            wind_direction_deg: f64::NAN,
            wind_speed_ms: 35.0,
            solar_radiation_wm2: f64::NAN,
            humidity_percent: f64::NAN,
            is_daytime: 1,
        }
    }

    fn empty_forecast() -> BarocastForecast {
        BarocastForecast {
            hours_ahead: 0,
            weather_state: 0,
            confidence: 0.0,
            letter_code: 0,
            rain_probability_6h: 0,
            rain_probability_12h: 0,
            precipitation_type: 0,
            exceptional_flags: 0,
            beaufort: 0,
            visibility_level: 0,
            fog_risk: 0.0,
            snow_risk: 0.0,
            frost_risk: 0.0,
            atmosphere_stability: 0,
            next_change_unix: 0,
            next_change_minutes: 0,
            projected_temperature_c: 0.0,
        }
    }

    #[test]
    fn test_compute_forecast_through_ffi() {
        let mut engine: *mut BarocastInstance = ptr::null_mut();
        assert_eq!(unsafe { barocast_new(&mut engine) }, BarocastErrorCode::Ok);
        assert!(unsafe { barocast_get_forecast_text(engine) }.is_null());

        // 2024-01-15 09:00 UTC
        let obs = observation(1_705_309_200, 1020.0, 0.0);
        let mut out = empty_forecast();
        let code = unsafe { barocast_compute_forecast(engine, &obs, 0, &mut out) };
        assert_eq!(code, BarocastErrorCode::Ok);

        assert_eq!(out.hours_ahead, 0);
        assert_eq!(out.weather_state, 1);
        assert_eq!(out.letter_code, 0);
        assert_eq!(out.beaufort, 12);
        assert_ne!(out.exceptional_flags & BAROCAST_FLAG_HURRICANE, 0);
        assert_eq!(out.precipitation_type, 1);
        assert_eq!(out.next_change_minutes, 60);

        let text = unsafe { CStr::from_ptr(barocast_get_forecast_text(engine)) };
        assert!(!text.to_str().unwrap().is_empty());
        let icon = unsafe { CStr::from_ptr(barocast_get_forecast_icon(engine, true)) };
        assert!(icon.to_str().unwrap().starts_with("mdi:weather-"));

        unsafe { barocast_destroy(engine) };
    }

    #[test]
    fn test_trend_derived_from_history() {
        let mut engine: *mut BarocastInstance = ptr::null_mut();
        assert_eq!(unsafe { barocast_new(&mut engine) }, BarocastErrorCode::Ok);
        let mut out = empty_forecast();

        let first = observation(1_705_309_200, 1012.0, f64::NAN);
        unsafe { barocast_compute_forecast(engine, &first, 6, &mut out) };
        // Neutral: no trend yet
        assert_eq!(out.atmosphere_stability, 1);

        let later = observation(1_705_309_200 + 3 * 3600, 1004.0, f64::NAN);
        unsafe { barocast_compute_forecast(engine, &later, 6, &mut out) };
        assert_eq!(out.atmosphere_stability, 2);

        unsafe { barocast_destroy(engine) };
    }

    #[test]
    fn test_null_arguments_are_reported() {
        let obs = observation(1_705_309_200, 1020.0, 0.0);
        let mut out = empty_forecast();
        let code = unsafe { barocast_compute_forecast(ptr::null(), &obs, 0, &mut out) };
        assert_eq!(code, BarocastErrorCode::NullPointer);
        assert!(!crate::error::barocast_get_last_error().is_null());

        let code = unsafe { barocast_compute_forecast(ptr::null(), &obs, 0, ptr::null_mut()) };
        assert_eq!(code, BarocastErrorCode::NullPointer);
    }
}
