use std::ptr;

use crate::error::{FfiError, SmokeSimErrorCode};
use crate::helpers::{clear_last_error, track_error};
use crate::instance::SmokeSimInstance;

// Queries stay valid on disabled instances: the last published texture is
// exactly what a host falling back to a static presentation needs.

/// Interior grid cells per side, or 0 if `ptr` is null.
///
/// # Safety
/// `ptr` must be null or a valid pointer from `smoke_sim_new`.
#[no_mangle]
pub unsafe extern "C" fn smoke_sim_resolution(ptr: *const SmokeSimInstance) -> u32 {
    if ptr.is_null() {
        return 0;
    }
    unsafe { &*ptr }.sim().resolution() as u32
}

/// Borrowed pointer to the published density texture, `resolution *
/// resolution` row-major `f32` values in `[0, 1]`, or null if `ptr` is null.
///
/// The pointer is valid until the next `smoke_sim_tick`, `smoke_sim_restart`
/// or `smoke_sim_destroy` on this instance. Do not free it.
///
/// # Safety
/// `ptr` must be null or a valid pointer from `smoke_sim_new`.
#[no_mangle]
pub unsafe extern "C" fn smoke_sim_density_ptr(ptr: *const SmokeSimInstance) -> *const f32 {
    if ptr.is_null() {
        return ptr::null();
    }
    unsafe { &*ptr }.sim().texture().as_slice().as_ptr()
}

/// Element count of the buffer returned by `smoke_sim_density_ptr`
/// (`resolution * resolution`), or 0 if `ptr` is null.
///
/// # Safety
/// `ptr` must be null or a valid pointer from `smoke_sim_new`.
#[no_mangle]
pub unsafe extern "C" fn smoke_sim_density_len(ptr: *const SmokeSimInstance) -> usize {
    if ptr.is_null() {
        return 0;
    }
    unsafe { &*ptr }.sim().texture().as_slice().len()
}

/// Consume the texture dirty flag.
///
/// `out_dirty` receives whether the texture changed since the flag was last
/// consumed; the host re-uploads the buffer only when it did. The flag is
/// cleared by this call.
///
/// # Safety
/// `ptr` must be a valid pointer from `smoke_sim_new`; `out_dirty` must be
/// non-null and writable.
#[no_mangle]
pub unsafe extern "C" fn smoke_sim_take_dirty(
    ptr: *mut SmokeSimInstance,
    out_dirty: *mut bool,
) -> SmokeSimErrorCode {
    if ptr.is_null() {
        return track_error(&FfiError::null_pointer("instance"));
    }
    if out_dirty.is_null() {
        return track_error(&FfiError::null_pointer("out_dirty"));
    }

    let dirty = unsafe { &mut *ptr }.sim_mut().texture_mut().take_dirty();
    unsafe {
        *out_dirty = dirty;
    }
    clear_last_error();
    SmokeSimErrorCode::Ok
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::instance::{smoke_sim_destroy, smoke_sim_new};
    use crate::simulation::smoke_sim_tick;

    fn create(resolution: u32) -> *mut SmokeSimInstance {
        let mut out: *mut SmokeSimInstance = ptr::null_mut();
        let code = unsafe { smoke_sim_new(resolution, 0, &mut out) };
        assert_eq!(code, SmokeSimErrorCode::Ok);
        out
    }

    #[test]
    fn test_density_buffer_shape() {
        let sim = create(32);
        assert_eq!(unsafe { smoke_sim_resolution(sim) }, 32);
        assert_eq!(unsafe { smoke_sim_density_len(sim) }, 32 * 32);
        assert!(!unsafe { smoke_sim_density_ptr(sim) }.is_null());
        unsafe { smoke_sim_destroy(sim) };
    }

    #[test]
    fn test_null_queries_are_safe() {
        assert_eq!(unsafe { smoke_sim_resolution(ptr::null()) }, 0);
        assert_eq!(unsafe { smoke_sim_density_len(ptr::null()) }, 0);
        assert!(unsafe { smoke_sim_density_ptr(ptr::null()) }.is_null());
        let mut dirty = false;
        assert_eq!(
            unsafe { smoke_sim_take_dirty(ptr::null_mut(), &mut dirty) },
            SmokeSimErrorCode::NullPointer
        );
    }

    #[test]
    fn test_take_dirty_consumes_flag() {
        let sim = create(16);

        let code = unsafe { smoke_sim_tick(sim, 1.0, true, ptr::null_mut()) };
        assert_eq!(code, SmokeSimErrorCode::Ok);

        let mut dirty = false;
        assert_eq!(
            unsafe { smoke_sim_take_dirty(sim, &mut dirty) },
            SmokeSimErrorCode::Ok
        );
        assert!(dirty);

        assert_eq!(
            unsafe { smoke_sim_take_dirty(sim, &mut dirty) },
            SmokeSimErrorCode::Ok
        );
        assert!(!dirty);

        unsafe { smoke_sim_destroy(sim) };
    }
}
