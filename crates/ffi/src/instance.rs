use barocast_core::{ForecastConfig, Observation, ObservationBuffer};
use chrono::{DateTime, TimeDelta, Utc};
use std::ffi::CString;
use std::os::raw::c_char;
use std::ptr;
use std::sync::{Mutex, RwLock};

use crate::error::{BarocastErrorCode, DefaultBarocastError};
use crate::helpers::{instance_from_ptr, str_from_ptr, track_error, track_result};

/// Hours a stored reading is kept before the next one replaces it as trend anchor
const TREND_ANCHOR_HOURS: i64 = 3;

/// Readings carried between calls so trends and refresh timing can be derived.
#[derive(Debug, Default)]
pub(crate) struct History {
    /// Older reading that missing trends are derived against
    anchor: Option<Observation>,
    /// Time of the previous forecast call
    last_forecast_at: Option<DateTime<Utc>>,
}

impl History {
    /// Buffer for `current`, using the stored anchor and last forecast time.
    pub(crate) fn buffer(&self, current: Observation) -> ObservationBuffer {
        let mut buffer = ObservationBuffer::new(current);
        if let Some(anchor) = &self.anchor {
            buffer = buffer.with_previous(anchor.clone());
        }
        if let Some(at) = self.last_forecast_at {
            buffer = buffer.with_last_forecast_at(at);
        }
        buffer
    }

    /// Remember a reading after a forecast was computed from it.
    ///
    /// The anchor only moves once it is at least three hours older than the
    /// incoming reading, so derived trends span a useful interval.
    pub(crate) fn record(&mut self, observation: &Observation) {
        let now = observation.timestamp();
        let stale = match &self.anchor {
            Some(anchor) => {
                now - anchor.timestamp() >= TimeDelta::hours(TREND_ANCHOR_HOURS)
                    || anchor.timestamp() > now
            }
            None => true,
        };
        if stale {
            self.anchor = Some(observation.clone());
        }
        self.last_forecast_at = Some(now);
    }
}

/// Strings from the most recent forecast, handed out as borrowed C strings.
#[derive(Debug, Default)]
pub(crate) struct ForecastStrings {
    pub(crate) text: Option<CString>,
    pub(crate) icon_now: Option<CString>,
    pub(crate) icon_later: Option<CString>,
}

/// A forecast engine: configuration plus the readings it has seen.
///
/// # Thread Safety
/// `BarocastInstance` is safe to share between threads. The configuration
/// sits behind an `RwLock`; history and cached strings behind `Mutex`es.
///
/// # Usage (C)
/// ```c
/// BarocastInstance* engine = NULL;
/// if (barocast_new(&engine) != Ok) {
///     return;
/// }
///
/// BarocastForecast forecast;
/// if (barocast_compute_forecast(engine, &obs, 12, &forecast) == Ok) {
///     printf("%s\n", barocast_get_forecast_text(engine));
/// }
///
/// barocast_destroy(engine);
/// ```
pub struct BarocastInstance {
    pub(crate) config: RwLock<ForecastConfig>,
    pub(crate) history: Mutex<History>,
    /// Reused across calls to avoid reallocating per forecast.
    pub(crate) strings: Mutex<ForecastStrings>,
}

impl BarocastInstance {
    pub(crate) fn new(config: ForecastConfig) -> Box<Self> {
        Box::new(Self {
            config: RwLock::new(config),
            history: Mutex::new(History::default()),
            strings: Mutex::new(ForecastStrings::default()),
        })
    }
}

/// Hand a new instance to the caller, or null the out-pointer on failure.
///
/// # Safety
/// `out_instance` must be non-null and writable.
unsafe fn publish(
    result: Result<ForecastConfig, DefaultBarocastError>,
    out_instance: *mut *mut BarocastInstance,
) -> BarocastErrorCode {
    match result {
        Ok(config) => {
            unsafe {
                *out_instance = Box::into_raw(BarocastInstance::new(config));
            }
            track_result(Ok(()))
        }
        Err(error) => {
            unsafe {
                *out_instance = ptr::null_mut();
            }
            track_error(&error)
        }
    }
}

/// Create an engine with the default configuration.
///
/// Returns
/// - `BarocastErrorCode::Ok` (0) with a valid instance in `out_instance`
/// - `BarocastErrorCode::NullPointer` if `out_instance` is null
///
/// # Safety
///
/// - `out_instance` must be a valid, non-null pointer to writable memory.
/// - The caller owns the returned instance and MUST call `barocast_destroy`
///   exactly once.
#[no_mangle]
pub unsafe extern "C" fn barocast_new(
    out_instance: *mut *mut BarocastInstance,
) -> BarocastErrorCode {
    if out_instance.is_null() {
        return track_error(&DefaultBarocastError::null_pointer("out_instance"));
    }
    unsafe { publish(Ok(ForecastConfig::default()), out_instance) }
}

/// Create an engine from a TOML configuration document.
///
/// Sections and keys left out keep their defaults.
///
/// Returns
/// - `BarocastErrorCode::Ok` (0) with a valid instance in `out_instance`
/// - `BarocastErrorCode::NullPointer` if `toml_text` or `out_instance` is null
/// - `BarocastErrorCode::InvalidConfig` if the document does not parse or validate;
///   `out_instance` is set to null and `barocast_get_last_error()` says why
///
/// # Safety
///
/// - `toml_text` must be a valid null-terminated UTF-8 string.
/// - `out_instance` must be a valid, non-null pointer to writable memory.
#[no_mangle]
pub unsafe extern "C" fn barocast_new_from_toml(
    toml_text: *const c_char,
    out_instance: *mut *mut BarocastInstance,
) -> BarocastErrorCode {
    if out_instance.is_null() {
        return track_error(&DefaultBarocastError::null_pointer("out_instance"));
    }
    let config = unsafe { str_from_ptr(toml_text, "toml_text") }
        .and_then(|text| ForecastConfig::from_toml_str(text).map_err(Into::into));
    unsafe { publish(config, out_instance) }
}

/// Create an engine from a TOML configuration file.
///
/// Returns the same codes as `barocast_new_from_toml`; an unreadable file is
/// reported as `BarocastErrorCode::InvalidConfig`.
///
/// # Safety
///
/// - `path` must be a valid null-terminated UTF-8 string.
/// - `out_instance` must be a valid, non-null pointer to writable memory.
#[no_mangle]
pub unsafe extern "C" fn barocast_new_from_file(
    path: *const c_char,
    out_instance: *mut *mut BarocastInstance,
) -> BarocastErrorCode {
    if out_instance.is_null() {
        return track_error(&DefaultBarocastError::null_pointer("out_instance"));
    }
    let config = unsafe { str_from_ptr(path, "path") }
        .and_then(|path| ForecastConfig::load(path).map_err(Into::into));
    unsafe { publish(config, out_instance) }
}

/// Forget stored readings, e.g. after the station was moved.
///
/// # Safety
/// `ptr` must be null or a live pointer from `barocast_new*`.
#[no_mangle]
pub unsafe extern "C" fn barocast_reset_history(
    ptr: *const BarocastInstance,
) -> BarocastErrorCode {
    let result = unsafe { instance_from_ptr(ptr) }.and_then(|instance| {
        let mut history = instance
            .history
            .lock()
            .map_err(|_| DefaultBarocastError::lock_poisoned("history"))?;
        *history = History::default();
        Ok(())
    });
    track_result(result)
}

/// Destroy an engine created by `barocast_new*`.
///
/// A null `ptr` is a no-op.
///
/// # Safety
/// - The pointer MUST have been created by `barocast_new*` and not destroyed yet.
/// - The caller must not use the pointer afterwards.
#[no_mangle]
pub unsafe extern "C" fn barocast_destroy(ptr: *mut BarocastInstance) {
    if ptr.is_null() {
        return;
    }

    // SAFETY: created by `Box::into_raw` in `publish` and not yet freed
    unsafe {
        drop(Box::from_raw(ptr));
    }
}
