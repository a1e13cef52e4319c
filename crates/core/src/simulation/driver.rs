//! Frame clock: wall-clock timestamps to simulation time steps.

/// Nominal time step used for the first frame after idle (seconds).
///
/// Using the previous wall-clock delta after a pause would feed the solver an
/// unbounded `dt` and destabilize every stage; the first frame instead steps
/// by one nominal display refresh.
pub const NOMINAL_DT: f32 = 1.0 / 60.0;

/// Driver state of the frame schedule.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DriverState {
    /// No prior frame timestamp; the next tick uses [`NOMINAL_DT`].
    Idle,
    /// Steady state; `dt` is the wall-clock delta to the previous tick.
    Running,
}

/// Converts wall-clock tick timestamps into per-frame time steps.
///
/// `Idle → Running` on the first tick; [`reset`](Self::reset) returns to
/// `Idle` when the visibility precondition fails, leaving field buffers
/// untouched so the simulation resumes without discontinuity.
#[derive(Debug, Clone, Default)]
pub struct FrameClock {
    last_time: Option<f64>,
}

impl FrameClock {
    /// Create an idle clock.
    #[must_use]
    pub fn new() -> Self {
        Self { last_time: None }
    }

    /// Current driver state.
    #[must_use]
    pub fn state(&self) -> DriverState {
        if self.last_time.is_some() {
            DriverState::Running
        } else {
            DriverState::Idle
        }
    }

    /// Advance to `now` (seconds) and return the frame's time step.
    pub fn tick(&mut self, now: f64) -> f32 {
        let dt = match self.last_time {
            None => NOMINAL_DT,
            Some(last) => (now - last) as f32,
        };
        self.last_time = Some(now);
        dt
    }

    /// Drop the frame timestamp, returning to idle.
    pub fn reset(&mut self) {
        self.last_time = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_first_tick_uses_nominal_dt() {
        let mut clock = FrameClock::new();
        assert_eq!(clock.state(), DriverState::Idle);
        assert_eq!(clock.tick(123.0), NOMINAL_DT);
        assert_eq!(clock.state(), DriverState::Running);
    }

    #[test]
    fn test_steady_state_uses_wall_clock_delta() {
        let mut clock = FrameClock::new();
        clock.tick(10.0);
        assert_relative_eq!(clock.tick(10.25), 0.25, epsilon = 1e-6);
        assert_relative_eq!(clock.tick(10.3), 0.05, epsilon = 1e-6);
    }

    #[test]
    fn test_reset_returns_to_nominal() {
        let mut clock = FrameClock::new();
        clock.tick(10.0);
        clock.tick(10.02);
        clock.reset();
        assert_eq!(clock.state(), DriverState::Idle);
        // A long gap while hidden must not become an unbounded dt
        assert_eq!(clock.tick(500.0), NOMINAL_DT);
    }
}
