//! Forcing: pointer-driven and ambient injection of density and velocity.
//!
//! Injection writes localized impulses into the fields, scaled by a linear
//! falloff over a radial footprint and by the frame's `dt`. Contributions are
//! clamped at the source: density stays in `[0, 1]` and each velocity
//! component in `[-MAX_VELOCITY, MAX_VELOCITY]`, whatever the input
//! magnitude. Halo cells never receive forcing; the footprint is clamped to
//! the interior.

use crate::core_types::{PointerState, Vec2};
use crate::grid::ScalarField;
use rand::Rng;
use serde::{Deserialize, Serialize};

/// Upper clamp for injected density.
pub const MAX_DENSITY: f32 = 1.0;

/// Symmetric clamp for injected velocity components.
pub const MAX_VELOCITY: f32 = 10.0;

/// Resolved injection request: a center in interior grid coordinates
/// (zero-based, `[0, resolution)`) and a velocity impulse.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Impulse {
    /// Injection center in interior grid coordinates.
    pub center: Vec2,
    /// Velocity impulse applied within the footprint.
    pub velocity: Vec2,
}

/// Pointer forcing policy.
///
/// Each variant is a pure function from the pointer snapshot to an optional
/// `(center, impulse)` pair; the frame driver is agnostic to which one is
/// active.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum ForcingPolicy {
    /// Inject at the pointer while it is in motion, with a fixed upward
    /// impulse.
    #[default]
    Follow,
    /// While the pointer is held, inject at the press-down anchor with an
    /// impulse proportional to the drag offset (aim-and-release).
    AimAndRelease,
}

impl ForcingPolicy {
    /// Resolve the pointer snapshot into an injection request, if the policy
    /// is currently active.
    #[must_use]
    pub fn impulse(
        self,
        pointer: &PointerState,
        resolution: usize,
        velocity_gain: f32,
    ) -> Option<Impulse> {
        let n = resolution as f32;
        match self {
            ForcingPolicy::Follow => {
                if !pointer.moving() {
                    return None;
                }
                Some(Impulse {
                    center: pointer.pos() * n,
                    velocity: Vec2::new(0.0, velocity_gain),
                })
            }
            ForcingPolicy::AimAndRelease => {
                if !pointer.held() {
                    return None;
                }
                Some(Impulse {
                    center: pointer.click_pos() * n,
                    velocity: (pointer.pos() - pointer.click_pos()) * velocity_gain,
                })
            }
        }
    }
}

/// Fixed-position ambient plume, used as an idle look.
///
/// Injects every frame, independent of pointer state, at a fixed fraction of
/// the grid with a randomized integer horizontal impulse in
/// `[-10, 10]` and a fixed upward impulse.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct AmbientSource {
    /// Plume position as a fraction of the grid width/height.
    pub position: Vec2,
    /// Fixed upward impulse component.
    pub upward: f32,
}

impl Default for AmbientSource {
    fn default() -> Self {
        Self {
            position: Vec2::new(0.5, 0.1),
            upward: 5.0,
        }
    }
}

impl AmbientSource {
    /// Produce this frame's plume injection request.
    pub fn impulse<R: Rng>(&self, rng: &mut R, resolution: usize) -> Impulse {
        let n = resolution as f32;
        let jitter = rng.random_range(0..=20) as f32 - 10.0;
        Impulse {
            center: Vec2::new((self.position.x * n).floor(), (self.position.y * n).floor()),
            velocity: Vec2::new(jitter, self.upward),
        }
    }
}

/// Inject a density/velocity impulse with linear radial falloff.
///
/// `center` is in zero-based interior grid coordinates; `radius` is a
/// fraction of the grid width, converted to grid units internally. Only the
/// bounding box of cells within the grid radius is visited (clamped to the
/// interior), and each cell within Euclidean distance of the radius receives
/// a weight `1 − distance/gridRadius` (a zero radius counts as weight 1).
/// All contributions are scaled by `dt` and clamped.
pub fn inject(
    density: &mut ScalarField,
    vel_x: &mut ScalarField,
    vel_y: &mut ScalarField,
    impulse: &Impulse,
    radius: f32,
    density_gain: f32,
    dt: f32,
) {
    let n = density.resolution();
    let n_f = n as f32;
    let grid_radius = radius * n_f;
    let reach = grid_radius.floor();

    let clamp_cell = |v: f32| (v.floor().max(0.0) as usize).min(n - 1);
    let left = clamp_cell(impulse.center.x - reach);
    let right = clamp_cell(impulse.center.x + reach);
    let bottom = clamp_cell(impulse.center.y - reach);
    let top = clamp_cell(impulse.center.y + reach);

    let falloff_radius = if grid_radius > 0.0 { grid_radius } else { 1.0 };

    for cy in bottom..=top {
        for cx in left..=right {
            let dx = cx as f32 - impulse.center.x;
            let dy = cy as f32 - impulse.center.y;
            let distance = (dx * dx + dy * dy).sqrt();
            if distance > grid_radius {
                continue;
            }
            let weight = 1.0 - distance / falloff_radius;

            // +1: interior cell (cx, cy) lives at buffer (cx + 1, cy + 1)
            let (x, y) = (cx + 1, cy + 1);
            let d = (density.at(x, y) + weight * density_gain * dt).clamp(0.0, MAX_DENSITY);
            density.set(x, y, d);
            let vx = (vel_x.at(x, y) + weight * impulse.velocity.x * dt)
                .clamp(-MAX_VELOCITY, MAX_VELOCITY);
            vel_x.set(x, y, vx);
            let vy = (vel_y.at(x, y) + weight * impulse.velocity.y * dt)
                .clamp(-MAX_VELOCITY, MAX_VELOCITY);
            vel_y.set(x, y, vy);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn fields(n: usize) -> (ScalarField, ScalarField, ScalarField) {
        (ScalarField::new(n), ScalarField::new(n), ScalarField::new(n))
    }

    #[test]
    fn test_center_cell_injection_scenario() {
        // resolution 4 (buffer 6x6), one-cell footprint at the center,
        // gain 10 and dt 1: the center clamps toward 1.0, everything
        // outside the radius stays 0.
        let (mut density, mut vel_x, mut vel_y) = fields(4);
        let impulse = Impulse {
            center: Vec2::new(2.0, 2.0),
            velocity: Vec2::zeros(),
        };
        inject(&mut density, &mut vel_x, &mut vel_y, &impulse, 0.1, 10.0, 1.0);

        assert_eq!(density.at(3, 3), 1.0);
        for y in 1..=4 {
            for x in 1..=4 {
                if (x, y) != (3, 3) {
                    assert_eq!(density.at(x, y), 0.0, "cell ({x}, {y}) outside radius");
                }
            }
        }
    }

    #[test]
    fn test_clamps_hold_for_any_magnitude() {
        let (mut density, mut vel_x, mut vel_y) = fields(8);
        let impulse = Impulse {
            center: Vec2::new(4.0, 4.0),
            velocity: Vec2::new(1e6, -1e6),
        };
        inject(&mut density, &mut vel_x, &mut vel_y, &impulse, 0.5, 1e9, 1.0);

        for y in 1..=8 {
            for x in 1..=8 {
                assert!((0.0..=MAX_DENSITY).contains(&density.at(x, y)));
                assert!(vel_x.at(x, y).abs() <= MAX_VELOCITY);
                assert!(vel_y.at(x, y).abs() <= MAX_VELOCITY);
            }
        }
    }

    #[test]
    fn test_halo_never_receives_forcing() {
        let (mut density, mut vel_x, mut vel_y) = fields(8);
        // Center outside the grid with a huge radius: footprint must clamp
        let impulse = Impulse {
            center: Vec2::new(-5.0, 20.0),
            velocity: Vec2::new(5.0, 5.0),
        };
        inject(&mut density, &mut vel_x, &mut vel_y, &impulse, 4.0, 10.0, 1.0);

        let size = density.size();
        for i in 0..size {
            for field in [&density, &vel_x, &vel_y] {
                assert_eq!(field.at(i, 0), 0.0);
                assert_eq!(field.at(i, size - 1), 0.0);
                assert_eq!(field.at(0, i), 0.0);
                assert_eq!(field.at(size - 1, i), 0.0);
            }
        }
    }

    #[test]
    fn test_linear_falloff() {
        let (mut density, mut vel_x, mut vel_y) = fields(16);
        let impulse = Impulse {
            center: Vec2::new(8.0, 8.0),
            velocity: Vec2::zeros(),
        };
        // grid radius 4: weight 1 at the center, 0.75 one cell out
        inject(&mut density, &mut vel_x, &mut vel_y, &impulse, 0.25, 1.0, 0.1);

        let center = density.at(9, 9);
        let one_out = density.at(10, 9);
        assert!((center - 0.1).abs() < 1e-6);
        assert!((one_out - 0.075).abs() < 1e-6);
    }

    #[test]
    fn test_zero_radius_no_division_by_zero() {
        let (mut density, mut vel_x, mut vel_y) = fields(8);
        let impulse = Impulse {
            center: Vec2::new(4.0, 4.0),
            velocity: Vec2::zeros(),
        };
        inject(&mut density, &mut vel_x, &mut vel_y, &impulse, 0.0, 10.0, 0.01);
        let v = density.at(5, 5);
        assert!(v.is_finite());
        assert!((v - 0.1).abs() < 1e-6);
    }

    #[test]
    fn test_follow_policy_requires_motion() {
        let mut pointer = PointerState::new();
        assert!(ForcingPolicy::Follow.impulse(&pointer, 100, 20.0).is_none());

        pointer.move_to(Vec2::new(0.5, 0.25), 1.0);
        let impulse = ForcingPolicy::Follow
            .impulse(&pointer, 100, 20.0)
            .expect("moving pointer must inject");
        assert_eq!(impulse.center, Vec2::new(50.0, 25.0));
        assert_eq!(impulse.velocity, Vec2::new(0.0, 20.0));
    }

    #[test]
    fn test_aim_and_release_anchors_at_press() {
        let mut pointer = PointerState::new();
        pointer.press(Vec2::new(0.5, 0.5));
        pointer.move_to(Vec2::new(0.75, 0.25), 1.0);

        let impulse = ForcingPolicy::AimAndRelease
            .impulse(&pointer, 100, 20.0)
            .expect("held pointer must inject");
        assert_eq!(impulse.center, Vec2::new(50.0, 50.0));
        assert!((impulse.velocity.x - 5.0).abs() < 1e-6);
        assert!((impulse.velocity.y + 5.0).abs() < 1e-6);

        pointer.release();
        assert!(ForcingPolicy::AimAndRelease
            .impulse(&pointer, 100, 20.0)
            .is_none());
    }

    #[test]
    fn test_ambient_source_bounded_jitter() {
        let source = AmbientSource::default();
        let mut rng = StdRng::seed_from_u64(7);
        for _ in 0..100 {
            let impulse = source.impulse(&mut rng, 100);
            assert_eq!(impulse.center, Vec2::new(50.0, 10.0));
            assert!(impulse.velocity.x >= -10.0 && impulse.velocity.x <= 10.0);
            assert_eq!(impulse.velocity.y, 5.0);
        }
    }
}
