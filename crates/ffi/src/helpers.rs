use crate::error::{with_last_error_mut, BarocastError, BarocastErrorCode, DefaultBarocastError};
use crate::instance::BarocastInstance;
use std::ffi::{CStr, CString};
use std::os::raw::c_char;

/// Record an error in thread-local storage.
pub(crate) fn set_last_error(error: &impl BarocastError) {
    with_last_error_mut(|(cstring, code)| {
        *cstring = CString::new(error.msg()).ok();
        *code = error.code();
    });
}

/// Record an error and return its code.
#[inline]
pub(crate) fn track_error(error: &impl BarocastError) -> BarocastErrorCode {
    set_last_error(error);
    error.code()
}

/// Clear the thread-local error state after a successful call.
pub(crate) fn clear_last_error() {
    with_last_error_mut(|(cstring, code)| {
        *cstring = None;
        *code = BarocastErrorCode::Ok;
    });
}

/// Map a result onto an error code, recording failures and clearing on success.
pub(crate) fn track_result(result: Result<(), DefaultBarocastError>) -> BarocastErrorCode {
    match result {
        Ok(()) => {
            clear_last_error();
            BarocastErrorCode::Ok
        }
        Err(error) => track_error(&error),
    }
}

/// Borrow the instance behind an opaque pointer.
///
/// # Safety
/// `ptr` must be null or a pointer returned by `barocast_new*` that has not
/// been destroyed.
pub(crate) unsafe fn instance_from_ptr<'a>(
    ptr: *const BarocastInstance,
) -> Result<&'a BarocastInstance, DefaultBarocastError> {
    // SAFETY: caller guarantees `ptr` is null or a live instance
    unsafe { ptr.as_ref() }.ok_or_else(|| DefaultBarocastError::null_pointer("ptr"))
}

/// Borrow a C string argument as UTF-8.
///
/// # Safety
/// `ptr` must be null or point to a null-terminated string that outlives the
/// returned reference.
pub(crate) unsafe fn str_from_ptr<'a>(
    ptr: *const c_char,
    param_name: &str,
) -> Result<&'a str, DefaultBarocastError> {
    if ptr.is_null() {
        return Err(DefaultBarocastError::null_pointer(param_name));
    }
    // SAFETY: non-null and null-terminated per the caller contract
    unsafe { CStr::from_ptr(ptr) }.to_str().map_err(|_| {
        DefaultBarocastError::invalid_parameter(format!("Parameter '{param_name}' is not UTF-8"))
    })
}
