use smoke_sim_core::{ForcingPolicy, SmokeOptions, Vec2};
use std::panic::{catch_unwind, AssertUnwindSafe};

use crate::error::{FfiError, SmokeSimErrorCode};
use crate::helpers::{clear_last_error, instance_mut, track_error};
use crate::instance::SmokeSimInstance;

/// C-compatible configuration knobs.
///
/// Numeric knobs are unit-scale: `1.0` everywhere reproduces the default
/// look. `input` selects the pointer forcing policy (0 = follow, 1 =
/// aim-and-release); `source` toggles the ambient plume.
#[repr(C)]
#[derive(Debug, Clone, Copy)]
pub struct SmokeSimConfig {
    pub diffusion: f32,
    pub viscosity: f32,
    pub density: f32,
    pub radius: f32,
    pub velocity: f32,
    pub input: u8,
    pub source: bool,
}

fn require_finite(name: &str, value: f64) -> Result<(), FfiError> {
    if value.is_finite() {
        Ok(())
    } else {
        Err(FfiError::invalid_parameter(format!(
            "Parameter '{name}' must be finite, got {value}"
        )))
    }
}

/// Run one scheduled frame at wall-clock time `now` (seconds).
///
/// If `visible` is false no step runs and the frame clock returns to idle;
/// field buffers stay intact, so the simulation resumes smoothly when the
/// host becomes visible again. `out_stepped` (optional, may be null)
/// receives whether a step actually ran.
///
/// A panic inside the step is caught here: the instance is flagged disabled,
/// `SmokeSimErrorCode::InstanceDisabled` is returned now and on every later
/// stepping call, and the host should fall back to a static presentation.
///
/// # Safety
/// `ptr` must be a valid pointer from `smoke_sim_new`; `out_stepped` must be
/// null or point to writable memory.
#[no_mangle]
pub unsafe extern "C" fn smoke_sim_tick(
    ptr: *mut SmokeSimInstance,
    now: f64,
    visible: bool,
    out_stepped: *mut bool,
) -> SmokeSimErrorCode {
    let instance = match unsafe { instance_mut(ptr) } {
        Ok(instance) => instance,
        Err(err) => return track_error(&err),
    };
    if let Err(err) = require_finite("now", now) {
        return track_error(&err);
    }

    let result = catch_unwind(AssertUnwindSafe(|| instance.sim_mut().tick(now, visible)));
    match result {
        Ok(stepped) => {
            if !out_stepped.is_null() {
                unsafe {
                    *out_stepped = stepped;
                }
            }
            clear_last_error();
            SmokeSimErrorCode::Ok
        }
        Err(_) => {
            instance.disable();
            track_error(&FfiError::instance_disabled())
        }
    }
}

/// Zero every field and the output texture, keeping the current
/// configuration.
///
/// # Safety
/// `ptr` must be a valid pointer from `smoke_sim_new`.
#[no_mangle]
pub unsafe extern "C" fn smoke_sim_restart(ptr: *mut SmokeSimInstance) -> SmokeSimErrorCode {
    match unsafe { instance_mut(ptr) } {
        Ok(instance) => {
            instance.sim_mut().restart();
            clear_last_error();
            SmokeSimErrorCode::Ok
        }
        Err(err) => track_error(&err),
    }
}

/// Apply a configuration at a frame boundary.
///
/// Validation happens up front: on rejection nothing is applied and the
/// prior configuration stays in effect. `input` values above 1 are invalid.
///
/// # Safety
/// `ptr` must be a valid pointer from `smoke_sim_new`.
#[no_mangle]
pub unsafe extern "C" fn smoke_sim_configure(
    ptr: *mut SmokeSimInstance,
    config: SmokeSimConfig,
) -> SmokeSimErrorCode {
    let instance = match unsafe { instance_mut(ptr) } {
        Ok(instance) => instance,
        Err(err) => return track_error(&err),
    };

    let input = match config.input {
        0 => ForcingPolicy::Follow,
        1 => ForcingPolicy::AimAndRelease,
        other => {
            return track_error(&FfiError::invalid_parameter(format!(
                "Parameter 'input' must be 0 (follow) or 1 (aim-and-release), got {other}"
            )));
        }
    };

    let options = SmokeOptions {
        diffusion: config.diffusion,
        viscosity: config.viscosity,
        density: config.density,
        radius: config.radius,
        velocity: config.velocity,
        input,
        source: config.source,
    };

    match instance.sim_mut().configure(&options) {
        Ok(()) => {
            clear_last_error();
            SmokeSimErrorCode::Ok
        }
        Err(err) => track_error(&FfiError::invalid_parameter(err.to_string())),
    }
}

/// Record a pointer press at normalized coordinates (`[0, 1]` over the
/// display surface).
///
/// # Safety
/// `ptr` must be a valid pointer from `smoke_sim_new`.
#[no_mangle]
pub unsafe extern "C" fn smoke_sim_pointer_press(
    ptr: *mut SmokeSimInstance,
    x: f32,
    y: f32,
) -> SmokeSimErrorCode {
    let instance = match unsafe { instance_mut(ptr) } {
        Ok(instance) => instance,
        Err(err) => return track_error(&err),
    };
    if let Err(err) =
        require_finite("x", f64::from(x)).and_then(|()| require_finite("y", f64::from(y)))
    {
        return track_error(&err);
    }

    instance.sim_mut().pointer_press(Vec2::new(x, y));
    clear_last_error();
    SmokeSimErrorCode::Ok
}

/// Record a pointer move at normalized coordinates, stamped with the
/// wall-clock time `now` (seconds, same clock as `smoke_sim_tick`).
///
/// # Safety
/// `ptr` must be a valid pointer from `smoke_sim_new`.
#[no_mangle]
pub unsafe extern "C" fn smoke_sim_pointer_move(
    ptr: *mut SmokeSimInstance,
    x: f32,
    y: f32,
    now: f64,
) -> SmokeSimErrorCode {
    let instance = match unsafe { instance_mut(ptr) } {
        Ok(instance) => instance,
        Err(err) => return track_error(&err),
    };
    if let Err(err) = require_finite("x", f64::from(x))
        .and_then(|()| require_finite("y", f64::from(y)))
        .and_then(|()| require_finite("now", now))
    {
        return track_error(&err);
    }

    instance.sim_mut().pointer_move(Vec2::new(x, y), now);
    clear_last_error();
    SmokeSimErrorCode::Ok
}

/// Record a pointer release.
///
/// # Safety
/// `ptr` must be a valid pointer from `smoke_sim_new`.
#[no_mangle]
pub unsafe extern "C" fn smoke_sim_pointer_release(
    ptr: *mut SmokeSimInstance,
) -> SmokeSimErrorCode {
    match unsafe { instance_mut(ptr) } {
        Ok(instance) => {
            instance.sim_mut().pointer_release();
            clear_last_error();
            SmokeSimErrorCode::Ok
        }
        Err(err) => track_error(&err),
    }
}
