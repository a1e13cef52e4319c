//! Smoke simulation orchestrator.
//!
//! Owns every field buffer, the solver parameters, the pointer snapshot, the
//! ambient-plume rng, the output texture, and the frame clock. One instance
//! is one independent simulation; there is no process-wide state.

use crate::core_types::{PointerState, Vec2};
use crate::grid::{DoubleBuffer, FieldKind, ScalarField};
use crate::simulation::driver::{DriverState, FrameClock};
use crate::simulation::texture::DensityTexture;
use crate::solver::{advect, diffuse, inject, project, AmbientSource, ConfigError, SmokeOptions, SmokeParams};
use rand::rngs::StdRng;
use rand::SeedableRng;
use tracing::{debug, info};

/// Smallest supported grid resolution (interior cells per side).
const MIN_RESOLUTION: usize = 8;

/// Largest supported grid resolution (interior cells per side).
const MAX_RESOLUTION: usize = 1024;

/// Interactive 2D smoke simulation on a square grid.
///
/// Each [`step`](Self::step) runs the fixed pipeline: forcing/injection,
/// semi-Lagrangian advection, implicit diffusion, pressure projection, then
/// publishes the density field to the output texture. [`tick`](Self::tick)
/// wraps `step` with wall-clock timing and visibility gating.
///
/// Single-threaded and frame-driven: a step runs to completion per tick, and
/// pointer events only mutate the input snapshot, never grid buffers.
pub struct SmokeSimulation {
    resolution: usize,

    // Double-buffered fields: stages swap, then write current from previous
    density: DoubleBuffer,
    vel_x: DoubleBuffer,
    vel_y: DoubleBuffer,

    // Scratch fields, fully recomputed by projection every frame
    pressure: ScalarField,
    divergence: ScalarField,

    params: SmokeParams,
    ambient: AmbientSource,
    pointer: PointerState,
    texture: DensityTexture,
    clock: FrameClock,
    rng: StdRng,

    simulation_time: f64,
}

impl SmokeSimulation {
    /// Create a zeroed simulation.
    ///
    /// `resolution` is the interior side length in cells, clamped to
    /// `[8, 1024]`. `seed` drives the ambient plume's horizontal jitter;
    /// equal seeds give reproducible runs.
    #[must_use]
    pub fn new(resolution: usize, seed: u64) -> Self {
        let resolution = resolution.clamp(MIN_RESOLUTION, MAX_RESOLUTION);
        info!(
            "Creating smoke simulation: {0}x{0} interior, {1}x{1} buffer",
            resolution,
            resolution + 2
        );

        Self {
            resolution,
            density: DoubleBuffer::new(resolution),
            vel_x: DoubleBuffer::new(resolution),
            vel_y: DoubleBuffer::new(resolution),
            pressure: ScalarField::new(resolution),
            divergence: ScalarField::new(resolution),
            params: SmokeParams::default(),
            ambient: AmbientSource::default(),
            pointer: PointerState::new(),
            texture: DensityTexture::new(resolution),
            clock: FrameClock::new(),
            rng: StdRng::seed_from_u64(seed),
            simulation_time: 0.0,
        }
    }

    /// Scheduled tick at wall-clock time `now` (seconds).
    ///
    /// If the visibility precondition fails the clock resets to idle and no
    /// step runs — field buffers stay intact so the simulation resumes
    /// without discontinuity. The first tick after idle steps by the nominal
    /// 1/60 s instead of an unbounded wall-clock gap.
    ///
    /// Returns whether a step ran.
    pub fn tick(&mut self, now: f64, visible: bool) -> bool {
        if !visible {
            if self.clock.state() == DriverState::Running {
                debug!("Simulation hidden, returning to idle");
            }
            self.clock.reset();
            return false;
        }

        let dt = self.clock.tick(now);
        self.pointer.refresh(now);
        self.step(dt);
        true
    }

    /// Advance the simulation by `dt` seconds.
    ///
    /// Runs the fixed stage order: injection, advection, diffusion,
    /// projection, texture publish. Parameters are read-only for the whole
    /// sequence.
    pub fn step(&mut self, dt: f32) {
        self.simulation_time += f64::from(dt);
        debug!(
            "Step: t={:.3}s, dt={:.4}s, held={}, moving={}",
            self.simulation_time,
            dt,
            self.pointer.held(),
            self.pointer.moving()
        );

        self.inject_sources(dt);
        self.advect_fields(dt);
        self.diffuse_fields(dt);
        project(
            self.vel_x.current_mut(),
            self.vel_y.current_mut(),
            &mut self.pressure,
            &mut self.divergence,
        );
        self.texture.publish(self.density.current());
    }

    /// Forcing stage: pointer-driven impulse plus the optional ambient plume.
    ///
    /// Both may run in the same frame; the ambient source is independent of
    /// pointer state.
    fn inject_sources(&mut self, dt: f32) {
        if let Some(impulse) =
            self.params
                .input
                .impulse(&self.pointer, self.resolution, self.params.velocity_gain)
        {
            inject(
                self.density.current_mut(),
                self.vel_x.current_mut(),
                self.vel_y.current_mut(),
                &impulse,
                self.params.radius,
                self.params.density_gain,
                dt,
            );
        }

        if self.params.source {
            let impulse = self.ambient.impulse(&mut self.rng, self.resolution);
            inject(
                self.density.current_mut(),
                self.vel_x.current_mut(),
                self.vel_y.current_mut(),
                &impulse,
                self.params.radius,
                self.params.density_gain,
                dt,
            );
        }
    }

    /// Advection stage.
    ///
    /// Density is carried by the current velocity; velocity then advects
    /// itself using its own pre-swap snapshot as the carrier for both axes.
    fn advect_fields(&mut self, dt: f32) {
        self.density.swap();
        let (new, previous) = self.density.split_mut();
        advect(
            new,
            previous,
            self.vel_x.current(),
            self.vel_y.current(),
            FieldKind::Scalar,
            dt,
        );

        self.vel_x.swap();
        self.vel_y.swap();

        let (new_x, prev_x) = self.vel_x.split_mut();
        advect(new_x, prev_x, prev_x, self.vel_y.previous(), FieldKind::VelocityX, dt);

        let (new_y, prev_y) = self.vel_y.split_mut();
        advect(new_y, prev_y, self.vel_x.previous(), prev_y, FieldKind::VelocityY, dt);
    }

    /// Diffusion stage: momentum first (vx, vy), then density.
    fn diffuse_fields(&mut self, dt: f32) {
        let viscosity = self.params.viscosity;
        let diffusion = self.params.diffusion;

        self.vel_x.swap();
        let (new, previous) = self.vel_x.split_mut();
        diffuse(new, previous, viscosity, FieldKind::VelocityX, dt);

        self.vel_y.swap();
        let (new, previous) = self.vel_y.split_mut();
        diffuse(new, previous, viscosity, FieldKind::VelocityY, dt);

        self.density.swap();
        let (new, previous) = self.density.split_mut();
        diffuse(new, previous, diffusion, FieldKind::Scalar, dt);
    }

    /// Zero every field and the output texture, keeping parameters.
    pub fn restart(&mut self) {
        info!("Restarting simulation");
        self.density.clear();
        self.vel_x.clear();
        self.vel_y.clear();
        self.pressure.clear();
        self.divergence.clear();
        self.texture.clear();
        self.simulation_time = 0.0;
    }

    /// Apply validated configuration at a frame boundary.
    ///
    /// Rejection leaves prior parameters in effect; nothing is applied
    /// partially.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] if the options fail validation.
    pub fn configure(&mut self, options: &SmokeOptions) -> Result<(), ConfigError> {
        match options.resolve() {
            Ok(params) => {
                self.params = params;
                Ok(())
            }
            Err(err) => {
                tracing::warn!("Rejected configuration: {err}");
                Err(err)
            }
        }
    }

    /// Record a pointer press at normalized coordinates.
    pub fn pointer_press(&mut self, pos: Vec2) {
        self.pointer.press(pos);
    }

    /// Record a pointer move at normalized coordinates, stamped with
    /// wall-clock time `now`.
    pub fn pointer_move(&mut self, pos: Vec2, now: f64) {
        self.pointer.move_to(pos, now);
    }

    /// Record a pointer release.
    pub fn pointer_release(&mut self) {
        self.pointer.release();
    }

    /// Interior side length in cells.
    #[must_use]
    pub fn resolution(&self) -> usize {
        self.resolution
    }

    /// Current solver parameters.
    #[must_use]
    pub fn params(&self) -> &SmokeParams {
        &self.params
    }

    /// Current density field (halo included).
    #[must_use]
    pub fn density(&self) -> &ScalarField {
        self.density.current()
    }

    /// Current velocity components (halo included).
    #[must_use]
    pub fn velocity(&self) -> (&ScalarField, &ScalarField) {
        (self.vel_x.current(), self.vel_y.current())
    }

    /// Published output texture.
    #[must_use]
    pub fn texture(&self) -> &DensityTexture {
        &self.texture
    }

    /// Mutable output texture (for consuming the dirty flag).
    pub fn texture_mut(&mut self) -> &mut DensityTexture {
        &mut self.texture
    }

    /// Driver state of the frame schedule.
    #[must_use]
    pub fn driver_state(&self) -> DriverState {
        self.clock.state()
    }

    /// Accumulated simulated time in seconds.
    #[must_use]
    pub fn simulation_time(&self) -> f64 {
        self.simulation_time
    }
}
