//! C ABI for embedding the smoke simulation in a host shell.
//!
//! The surface is a thin wrapper over `smoke-sim-core`: an opaque instance
//! handle with create/destroy, a per-frame `tick`, pointer events,
//! configuration, restart, and read access to the published density texture.
//! Errors follow C conventions (0 = success) with a per-thread last-error
//! message; a panic caught during a step disables the instance so the host
//! can fall back to a static presentation.
//!
//! The companion header `SmokeSimFFI.h` is generated by cbindgen at build
//! time.

mod error;
mod helpers;
mod instance;
mod queries;
mod simulation;

pub use error::{smoke_sim_get_last_error, smoke_sim_get_last_error_code, SmokeSimErrorCode};
pub use instance::{smoke_sim_destroy, smoke_sim_new, SmokeSimInstance};
pub use queries::{
    smoke_sim_density_len, smoke_sim_density_ptr, smoke_sim_resolution, smoke_sim_take_dirty,
};
pub use simulation::{
    smoke_sim_configure, smoke_sim_pointer_move, smoke_sim_pointer_press,
    smoke_sim_pointer_release, smoke_sim_restart, smoke_sim_tick, SmokeSimConfig,
};
