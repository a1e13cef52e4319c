//! Semi-Lagrangian advection
//!
//! Transports a field along the velocity field by backward tracing: every
//! interior cell looks up where its contents came from one step ago and
//! samples the previous buffer there with bilinear interpolation. Sampling a
//! convex combination of the four surrounding grid points keeps the scheme
//! unconditionally stable — no new extrema can appear, whatever the time
//! step (Stam 1999, "Stable Fluids").

use crate::grid::{apply_boundary, FieldKind, ScalarField};

/// Advect `previous` into `new` along `(vel_x, vel_y)` over time step `dt`.
///
/// The backward-traced source position is clamped to `[0, resolution]` on
/// both axes so the four sample points stay inside the buffer. Boundary
/// conditions for `kind` are re-enforced on the result.
///
/// The velocity buffers are whatever the caller chooses as the carrier:
/// density is carried by the current velocity, while velocity advects itself
/// using its own pre-swap snapshot for both axes.
pub fn advect(
    new: &mut ScalarField,
    previous: &ScalarField,
    vel_x: &ScalarField,
    vel_y: &ScalarField,
    kind: FieldKind,
    dt: f32,
) {
    let n = new.resolution();
    let n_f = n as f32;

    for y in 1..=n {
        for x in 1..=n {
            // Backward trace: where did the contents of (x, y) come from?
            let src_x = (x as f32 - vel_x.at(x, y) * dt * n_f).clamp(0.0, n_f);
            let src_y = (y as f32 - vel_y.at(x, y) * dt * n_f).clamp(0.0, n_f);

            let i = src_x.floor() as usize;
            let j = src_y.floor() as usize;
            let fx = src_x - i as f32;
            let fy = src_y - j as f32;

            let value = (1.0 - fx) * (1.0 - fy) * previous.at(i, j)
                + fx * (1.0 - fy) * previous.at(i + 1, j)
                + (1.0 - fx) * fy * previous.at(i, j + 1)
                + fx * fy * previous.at(i + 1, j + 1);

            new.set(x, y, value);
        }
    }

    apply_boundary(kind, new);
}
