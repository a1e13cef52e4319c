use std::cell::RefCell;
use std::ffi::CString;
use std::os::raw::c_char;
use std::ptr;

/// FFI error codes returned by smoke simulation functions.
/// Follows standard C convention: 0 = success, non-zero = error.
#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SmokeSimErrorCode {
    /// Operation completed successfully.
    Ok = 0,

    /// Invalid pointer: null pointer passed where non-null required.
    NullPointer = 1,

    /// Invalid parameter passed to function.
    InvalidParameter = 2,

    /// A panic was caught inside a prior frame step; the instance is
    /// permanently disabled and only destroy/query calls remain valid.
    InstanceDisabled = 3,
}

/// An FFI failure: the code crossing the boundary plus a diagnostic message
/// retrievable through `smoke_sim_get_last_error`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct FfiError {
    code: SmokeSimErrorCode,
    msg: String,
}

impl FfiError {
    /// Null pointer passed where non-null required.
    ///
    /// `param_name` is the offending parameter (e.g. `"out_instance"`).
    pub fn null_pointer(param_name: &str) -> Self {
        Self {
            code: SmokeSimErrorCode::NullPointer,
            msg: format!("Parameter '{param_name}' cannot be null"),
        }
    }

    /// Invalid parameter with a custom description.
    pub fn invalid_parameter(message: String) -> Self {
        Self {
            code: SmokeSimErrorCode::InvalidParameter,
            msg: message,
        }
    }

    /// Instance was disabled by a caught panic in an earlier step.
    pub fn instance_disabled() -> Self {
        Self {
            code: SmokeSimErrorCode::InstanceDisabled,
            msg: "Simulation instance disabled by a previous internal failure".to_owned(),
        }
    }

    pub fn code(&self) -> SmokeSimErrorCode {
        self.code
    }

    pub fn msg(&self) -> &str {
        &self.msg
    }
}

thread_local! {
    /// Most recent FFI error on this thread (C string, error code).
    /// The CString is stored so the pointer handed to the caller stays valid
    /// until the next error on the same thread.
    static LAST_ERROR: RefCell<(Option<CString>, SmokeSimErrorCode)> =
        const { RefCell::new((None, SmokeSimErrorCode::Ok)) };
}

/// Internal helper to read `LAST_ERROR` thread-local storage.
pub(crate) fn with_last_error<F, R>(f: F) -> R
where
    F: FnOnce(&(Option<CString>, SmokeSimErrorCode)) -> R,
{
    LAST_ERROR.with_borrow(f)
}

/// Internal helper to mutate `LAST_ERROR` thread-local storage.
pub(crate) fn with_last_error_mut<F, R>(f: F) -> R
where
    F: FnOnce(&mut (Option<CString>, SmokeSimErrorCode)) -> R,
{
    LAST_ERROR.with_borrow_mut(f)
}

/// Retrieve the most recent FFI error message as a null-terminated C string.
///
/// Returns a borrowed pointer to the message, or `null` if no error has
/// occurred on this thread. The pointer is valid until the next FFI call on
/// the same thread that sets or clears the error. Do not free it.
#[no_mangle]
pub extern "C" fn smoke_sim_get_last_error() -> *const c_char {
    with_last_error(|(cstring, _code)| cstring.as_ref().map_or(ptr::null(), |cs| cs.as_ptr()))
}

/// Retrieve the most recent FFI error code on this thread.
///
/// Returns `SmokeSimErrorCode::Ok` (0) if no error has occurred.
#[no_mangle]
pub extern "C" fn smoke_sim_get_last_error_code() -> SmokeSimErrorCode {
    with_last_error(|(_cstring, code)| *code)
}
