use barocast_core::ConfigError;
use std::cell::RefCell;
use std::ffi::CString;
use std::os::raw::c_char;
use std::ptr;

/// Common interface for errors crossing the FFI boundary.
///
/// - `code()` - The code returned to the caller
/// - `msg()` - Diagnostic message kept in thread-local storage
///
/// # Example
/// ```rust,ignore
/// let err = DefaultBarocastError::null_pointer("out_instance");
/// assert_eq!(err.code(), BarocastErrorCode::NullPointer);
/// assert_eq!(err.msg(), "Parameter 'out_instance' cannot be null");
/// ```
pub(crate) trait BarocastError {
    /// Returns the error code to be returned across the FFI boundary.
    fn code(&self) -> BarocastErrorCode;

    /// Returns the human-readable error message.
    fn msg(&self) -> &str;
}

/// Default implementation of `BarocastError` for the FFI failure cases.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DefaultBarocastError {
    code: BarocastErrorCode,
    msg: String,
}

impl DefaultBarocastError {
    /// Null pointer passed where non-null is required.
    ///
    /// # Arguments
    /// * `param_name` - Name of the null parameter (e.g., `"out_result"`)
    pub fn null_pointer(param_name: &str) -> Self {
        Self {
            code: BarocastErrorCode::NullPointer,
            msg: format!("Parameter '{param_name}' cannot be null"),
        }
    }

    /// Lock poisoned by a panic on another thread.
    ///
    /// # Arguments
    /// * `lock_name` - Which lock was poisoned (e.g., `"config"`, `"history"`)
    pub fn lock_poisoned(lock_name: &str) -> Self {
        Self {
            code: BarocastErrorCode::LockPoisoned,
            msg: format!("Lock '{lock_name}' was poisoned by a panic in another thread"),
        }
    }

    /// Observation field that cannot be interpreted.
    ///
    /// # Arguments
    /// * `field` - Name of the offending field
    /// * `message` - What is wrong with it
    pub fn invalid_observation(field: &str, message: &str) -> Self {
        Self {
            code: BarocastErrorCode::InvalidObservation,
            msg: format!("Observation field {field}: {message}"),
        }
    }

    /// Invalid argument other than the observation.
    pub fn invalid_parameter(message: String) -> Self {
        Self {
            code: BarocastErrorCode::InvalidParameter,
            msg: message,
        }
    }
}

impl From<ConfigError> for DefaultBarocastError {
    fn from(error: ConfigError) -> Self {
        Self {
            code: BarocastErrorCode::InvalidConfig,
            msg: error.to_string(),
        }
    }
}

impl BarocastError for DefaultBarocastError {
    fn code(&self) -> BarocastErrorCode {
        self.code
    }

    fn msg(&self) -> &str {
        &self.msg
    }
}

/// FFI error codes returned by barocast functions.
/// Follows standard C convention: 0 = success, non-zero = error.
#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BarocastErrorCode {
    /// Operation completed successfully.
    Ok = 0,

    /// Null pointer passed where non-null required.
    NullPointer = 1,

    /// Internal lock was poisoned by a panic.
    LockPoisoned = 2,

    /// Observation timestamp or hemisphere cannot be interpreted.
    InvalidObservation = 3,

    /// Invalid parameter passed to function.
    InvalidParameter = 4,

    /// Configuration could not be read, parsed or validated.
    InvalidConfig = 5,
}

impl From<DefaultBarocastError> for BarocastErrorCode {
    fn from(error: DefaultBarocastError) -> Self {
        error.code
    }
}

thread_local! {
    /// Most recent FFI error on this thread (message, code).
    /// The `CString` is kept here so the pointer handed out stays valid.
    static LAST_ERROR: RefCell<(Option<CString>, BarocastErrorCode)> = const { RefCell::new((None, BarocastErrorCode::Ok)) };
}

/// Read the thread-local error state.
pub(crate) fn with_last_error<F, R>(f: F) -> R
where
    F: FnOnce(&(Option<CString>, BarocastErrorCode)) -> R,
{
    LAST_ERROR.with_borrow(f)
}

/// Mutate the thread-local error state.
pub(crate) fn with_last_error_mut<F, R>(f: F) -> R
where
    F: FnOnce(&mut (Option<CString>, BarocastErrorCode)) -> R,
{
    LAST_ERROR.with_borrow_mut(f)
}

/// Retrieve the most recent FFI error message as a null-terminated C string.
///
/// Returns:
/// - A borrowed pointer to the error message if the last call on this thread failed.
/// - `null` if the last call succeeded.
///
/// # Thread Safety
/// Error state is per-thread; each thread sees only its own failures.
///
/// # Lifetime
/// The returned pointer is valid until the next barocast call on this thread.
///
/// **DO NOT FREE THIS POINTER** - it is managed internally.
///
/// Example:
/// ```c
/// BarocastInstance* engine = NULL;
/// if (barocast_new_from_toml(text, &engine) != Ok) {
///     const char* error = barocast_get_last_error();
///     if (error) {
///         fprintf(stderr, "Config rejected: %s\n", error);
///     }
/// }
/// ```
#[no_mangle]
pub extern "C" fn barocast_get_last_error() -> *const c_char {
    with_last_error(|(cstring, _code)| cstring.as_ref().map_or(ptr::null(), |cs| cs.as_ptr()))
}

/// Retrieve the most recent FFI error code.
///
/// Returns `BarocastErrorCode::Ok` (0) if the last call on this thread succeeded.
#[no_mangle]
pub extern "C" fn barocast_get_last_error_code() -> BarocastErrorCode {
    with_last_error(|(_cstring, code)| *code)
}
