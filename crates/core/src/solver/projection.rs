//! Pressure projection (incompressibility enforcement)
//!
//! A velocity field produced by advection, diffusion, and forcing is not
//! divergence-free; left alone, the density visibly piles up wherever the
//! flow converges. Helmholtz-Hodge decomposition says any field is the sum
//! of a divergence-free part and the gradient of a scalar, so the stage:
//!
//! ```text
//! 1.  div = -0.5·h·(∂vx/∂x + ∂vy/∂y)          h = 1/resolution
//! 2.  ∇²p = div                                (discrete Poisson equation,
//!                                               Gauss-Seidel relaxation)
//! 3.  v  -= ∇p                                 (subtract the gradient)
//! ```
//!
//! leaving the velocity divergence-free up to the relaxation residual
//! (Stam 2003, "Real-Time Fluid Dynamics for Games").

use super::diffusion::relaxation_iterations;
use crate::grid::{apply_boundary, FieldKind, ScalarField};

/// Project `(vel_x, vel_y)` onto its divergence-free part.
///
/// `pressure` and `divergence` are scratch fields fully recomputed here;
/// they carry no state between frames. The Poisson relaxation runs the same
/// adaptive sweep count as diffusion.
pub fn project(
    vel_x: &mut ScalarField,
    vel_y: &mut ScalarField,
    pressure: &mut ScalarField,
    divergence: &mut ScalarField,
) {
    let n = vel_x.resolution();
    let h = 1.0 / n as f32;

    for y in 1..=n {
        for x in 1..=n {
            let div = -0.5
                * h
                * (vel_x.at(x + 1, y) - vel_x.at(x - 1, y) + vel_y.at(x, y + 1)
                    - vel_y.at(x, y - 1));
            divergence.set(x, y, div);
            pressure.set(x, y, 0.0);
        }
    }
    apply_boundary(FieldKind::Scalar, divergence);
    apply_boundary(FieldKind::Scalar, pressure);

    for _ in 0..relaxation_iterations(n) {
        for y in 1..=n {
            for x in 1..=n {
                let p = (divergence.at(x, y)
                    + pressure.at(x + 1, y)
                    + pressure.at(x - 1, y)
                    + pressure.at(x, y + 1)
                    + pressure.at(x, y - 1))
                    / 4.0;
                pressure.set(x, y, p);
            }
        }
    }
    apply_boundary(FieldKind::Scalar, pressure);

    for y in 1..=n {
        for x in 1..=n {
            let grad_x = (pressure.at(x + 1, y) - pressure.at(x - 1, y)) * 0.5 / h;
            let grad_y = (pressure.at(x, y + 1) - pressure.at(x, y - 1)) * 0.5 / h;
            vel_x.add(x, y, -grad_x);
            vel_y.add(x, y, -grad_y);
        }
    }
    apply_boundary(FieldKind::VelocityX, vel_x);
    apply_boundary(FieldKind::VelocityY, vel_y);
}

/// Mean absolute divergence over the interior cells.
///
/// Diagnostic for the projection residual; also used by the headless demo's
/// periodic report.
#[must_use]
pub fn mean_abs_divergence(vel_x: &ScalarField, vel_y: &ScalarField) -> f32 {
    let n = vel_x.resolution();
    let h = 1.0 / n as f32;
    let mut total = 0.0_f64;
    for y in 1..=n {
        for x in 1..=n {
            let div = -0.5
                * h
                * (vel_x.at(x + 1, y) - vel_x.at(x - 1, y) + vel_y.at(x, y + 1)
                    - vel_y.at(x, y - 1));
            total += f64::from(div.abs());
        }
    }
    (total / (n * n) as f64) as f32
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Radial outflow from the grid center: strongly divergent everywhere.
    fn divergent_velocity(n: usize) -> (ScalarField, ScalarField) {
        let mut vel_x = ScalarField::new(n);
        let mut vel_y = ScalarField::new(n);
        let center = (n as f32 + 1.0) / 2.0;
        for y in 1..=n {
            for x in 1..=n {
                vel_x.set(x, y, (x as f32 - center) * 0.1);
                vel_y.set(x, y, (y as f32 - center) * 0.1);
            }
        }
        apply_boundary(FieldKind::VelocityX, &mut vel_x);
        apply_boundary(FieldKind::VelocityY, &mut vel_y);
        (vel_x, vel_y)
    }

    #[test]
    fn test_projection_reduces_divergence() {
        let n = 16;
        let (mut vel_x, mut vel_y) = divergent_velocity(n);
        let before = mean_abs_divergence(&vel_x, &vel_y);
        assert!(before > 0.0, "test field must be divergent");

        let mut pressure = ScalarField::new(n);
        let mut divergence = ScalarField::new(n);
        project(&mut vel_x, &mut vel_y, &mut pressure, &mut divergence);

        let after = mean_abs_divergence(&vel_x, &vel_y);
        assert!(
            after < before,
            "projection must reduce divergence: before={before}, after={after}"
        );
    }

    #[test]
    fn test_divergence_free_field_nearly_unchanged() {
        let n = 16;
        // Uniform flow is already divergence-free in the interior
        let mut vel_x = ScalarField::new(n);
        let mut vel_y = ScalarField::new(n);
        for y in 1..=n {
            for x in 1..=n {
                vel_x.set(x, y, 1.0);
                vel_y.set(x, y, 0.0);
            }
        }
        apply_boundary(FieldKind::VelocityX, &mut vel_x);
        apply_boundary(FieldKind::VelocityY, &mut vel_y);

        let before = mean_abs_divergence(&vel_x, &vel_y);

        let mut pressure = ScalarField::new(n);
        let mut divergence = ScalarField::new(n);
        project(&mut vel_x, &mut vel_y, &mut pressure, &mut divergence);

        let after = mean_abs_divergence(&vel_x, &vel_y);
        assert!(after <= before + 1e-5);
    }

    #[test]
    fn test_scratch_fields_fully_recomputed() {
        let n = 8;
        let (mut vel_x, mut vel_y) = divergent_velocity(n);
        let mut pressure = ScalarField::new(n);
        let mut divergence = ScalarField::new(n);
        // Poison the scratch fields; project must overwrite every cell it reads
        for y in 1..=n {
            for x in 1..=n {
                pressure.set(x, y, 1e6);
                divergence.set(x, y, -1e6);
            }
        }
        project(&mut vel_x, &mut vel_y, &mut pressure, &mut divergence);
        assert!(pressure.interior_abs_max() < 1e3);
        assert!(divergence.interior_abs_max() < 1e3);
    }

    #[test]
    fn test_determinism() {
        let n = 12;
        let (mut ax, mut ay) = divergent_velocity(n);
        let (mut bx, mut by) = divergent_velocity(n);
        let mut scratch = (ScalarField::new(n), ScalarField::new(n));
        project(&mut ax, &mut ay, &mut scratch.0, &mut scratch.1);
        let mut scratch = (ScalarField::new(n), ScalarField::new(n));
        project(&mut bx, &mut by, &mut scratch.0, &mut scratch.1);
        assert_eq!(ax, bx);
        assert_eq!(ay, by);
    }
}
