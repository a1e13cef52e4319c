use crate::error::{with_last_error_mut, FfiError, SmokeSimErrorCode};
use crate::instance::SmokeSimInstance;
use std::ffi::CString;

/// Set the thread-local error message and code.
/// Internal helper for FFI functions to record failure details.
pub(crate) fn set_last_error(error: &FfiError) {
    with_last_error_mut(|(cstring, code)| {
        *cstring = CString::new(error.msg()).ok();
        *code = error.code();
    });
}

/// Record an error in thread-local storage and return its code.
#[inline]
pub(crate) fn track_error(error: &FfiError) -> SmokeSimErrorCode {
    set_last_error(error);
    error.code()
}

/// Clear the thread-local error message and code.
/// Internal helper called on successful operations.
pub(crate) fn clear_last_error() {
    with_last_error_mut(|(cstring, code)| {
        *cstring = None;
        *code = SmokeSimErrorCode::Ok;
    });
}

/// Borrow the instance behind a raw pointer, rejecting null and instances
/// disabled by a caught panic.
///
/// # Safety
/// The pointer must either be null or originate from `smoke_sim_new` and not
/// have been destroyed.
pub(crate) unsafe fn instance_mut<'a>(
    ptr: *mut SmokeSimInstance,
) -> Result<&'a mut SmokeSimInstance, FfiError> {
    if ptr.is_null() {
        return Err(FfiError::null_pointer("instance"));
    }
    let instance = unsafe { &mut *ptr };
    if instance.disabled() {
        return Err(FfiError::instance_disabled());
    }
    Ok(instance)
}
