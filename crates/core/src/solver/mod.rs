//! Solver stages for the Stable Fluids pipeline
//!
//! Each stage operates on the interior cells of the grid and re-enforces the
//! boundary halo before returning. Per frame the simulation runs, in order:
//! forcing/injection, semi-Lagrangian advection, implicit diffusion, and
//! pressure projection. The stages are free functions over [`crate::grid`]
//! buffers so that each one is testable in isolation.

mod advection;
mod config;
mod diffusion;
mod forcing;
mod projection;

pub use advection::advect;
pub use config::{ConfigError, SmokeOptions, SmokeParams};
pub use diffusion::{diffuse, relaxation_iterations};
pub use forcing::{inject, AmbientSource, ForcingPolicy, Impulse, MAX_DENSITY, MAX_VELOCITY};
pub use projection::{mean_abs_divergence, project};
