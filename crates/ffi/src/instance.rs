use smoke_sim_core::SmokeSimulation;

use crate::error::{FfiError, SmokeSimErrorCode};
use crate::helpers::{clear_last_error, track_error};

/// Opaque handle to one smoke simulation.
///
/// Holds the simulation state plus a disabled flag: if a panic is ever
/// caught during a frame step, the instance is flagged disabled and every
/// later stepping call fails with `SmokeSimErrorCode::InstanceDisabled` so
/// the host can fall back to a static presentation. Queries against the
/// last published texture stay valid.
///
/// # Thread Safety
/// Not synchronized. The host must confine each instance to one thread, or
/// provide its own locking. The simulation is frame-driven and intended to
/// be ticked from the host's render loop.
pub struct SmokeSimInstance {
    sim: SmokeSimulation,
    disabled: bool,
}

impl SmokeSimInstance {
    pub(crate) fn new(resolution: u32, seed: u64) -> Box<Self> {
        Box::new(Self {
            sim: SmokeSimulation::new(resolution as usize, seed),
            disabled: false,
        })
    }

    pub(crate) fn sim(&self) -> &SmokeSimulation {
        &self.sim
    }

    pub(crate) fn sim_mut(&mut self) -> &mut SmokeSimulation {
        &mut self.sim
    }

    pub(crate) fn disabled(&self) -> bool {
        self.disabled
    }

    pub(crate) fn disable(&mut self) {
        self.disabled = true;
    }
}

/// Create a new simulation instance and return it via out-parameter.
///
/// - `resolution`: interior grid cells per side, clamped to `[8, 1024]`.
/// - `seed`: drives the ambient plume jitter; equal seeds reproduce runs.
/// - `out_instance`: receives the created instance. Must be non-null.
///
/// Returns `SmokeSimErrorCode::Ok` (0) on success. On failure returns a
/// non-zero code, sets `out_instance` to null, and records a message
/// retrievable with `smoke_sim_get_last_error`.
///
/// # Safety
/// - `out_instance` must be a valid, non-null pointer to writable memory.
/// - The caller owns the returned instance and must call `smoke_sim_destroy`
///   exactly once.
#[no_mangle]
pub unsafe extern "C" fn smoke_sim_new(
    resolution: u32,
    seed: u64,
    out_instance: *mut *mut SmokeSimInstance,
) -> SmokeSimErrorCode {
    if out_instance.is_null() {
        return track_error(&FfiError::null_pointer("out_instance"));
    }

    let instance = SmokeSimInstance::new(resolution, seed);
    unsafe {
        *out_instance = Box::into_raw(instance);
    }
    clear_last_error();
    SmokeSimErrorCode::Ok
}

/// Destroy an instance previously created by `smoke_sim_new`.
///
/// Null is a no-op. Works on disabled instances.
///
/// # Safety
/// - The pointer must have been created by `smoke_sim_new` and not already
///   destroyed.
/// - After this call the pointer must not be used again.
#[no_mangle]
pub unsafe extern "C" fn smoke_sim_destroy(ptr: *mut SmokeSimInstance) {
    if ptr.is_null() {
        return;
    }

    // SAFETY: the pointer originates from Box::into_raw in smoke_sim_new and
    // the null case is handled above. Reclaiming the Box frees the instance.
    unsafe {
        drop(Box::from_raw(ptr));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::ptr;

    #[test]
    fn test_new_and_destroy() {
        let mut out: *mut SmokeSimInstance = ptr::null_mut();
        let code = unsafe { smoke_sim_new(64, 7, &mut out) };
        assert_eq!(code, SmokeSimErrorCode::Ok);
        assert!(!out.is_null());
        assert_eq!(unsafe { &*out }.sim().resolution(), 64);
        unsafe { smoke_sim_destroy(out) };
    }

    #[test]
    fn test_new_rejects_null_out_param() {
        let code = unsafe { smoke_sim_new(64, 0, ptr::null_mut()) };
        assert_eq!(code, SmokeSimErrorCode::NullPointer);
    }

    #[test]
    fn test_destroy_null_is_noop() {
        unsafe { smoke_sim_destroy(ptr::null_mut()) };
    }
}
