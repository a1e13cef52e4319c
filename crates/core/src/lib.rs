//! Smoke Simulation Core Library
//!
//! A grid-based incompressible-fluid solver ("Stable Fluids" style) driving an
//! interactive 2D smoke density field. Implements semi-Lagrangian advection,
//! implicit diffusion relaxation, and pressure projection on a square grid
//! with a one-cell boundary halo, plus:
//!
//! - pointer-driven forcing (density and velocity impulses with radial falloff)
//! - an optional ambient plume source for an idle look
//! - a simulation-to-texture bridge publishing the density field each frame
//! - a frame driver that sequences the stages from a wall-clock delta
//!
//! Rendering, raw input event plumbing, and host-page chrome are external
//! collaborators: the library consumes normalized pointer snapshots and
//! produces a flat `f32` density buffer with a dirty flag.

// Core types and utilities
pub mod core_types;

// Grid storage, double-buffering, and boundary conditions
pub mod grid;

// Solver stages: advection, diffusion, projection, forcing
pub mod solver;

// Frame orchestration and output bridge
pub mod simulation;

// Re-export core types
pub use core_types::{PointerState, Vec2};

// Re-export grid types
pub use grid::{apply_boundary, DoubleBuffer, FieldKind, ScalarField};

// Re-export solver types
pub use solver::{
    mean_abs_divergence, relaxation_iterations, ConfigError, ForcingPolicy, SmokeOptions,
    SmokeParams,
};

// Re-export simulation types
pub use simulation::{DensityTexture, DriverState, FrameClock, SmokeSimulation};
