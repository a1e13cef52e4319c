//! Boundary condition enforcement on the halo cells.
//!
//! The walls are free-slip/no-penetration for velocity and zero-gradient for
//! scalars: each halo cell mirrors its adjacent interior cell, negated iff
//! the stored component is perpendicular to that wall. Corner halo cells are
//! set from the diagonally adjacent interior cell. This must run after every
//! stage that mutates a field read by the next stage, and it is the sole
//! writer of halo cells.

use super::field::ScalarField;
use serde::{Deserialize, Serialize};

/// Field interpretation for boundary dispatch.
///
/// Determines which walls negate the mirrored value: the x-velocity
/// component reflects off the left/right walls, the y-velocity component off
/// the top/bottom walls, and scalars never reflect.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum FieldKind {
    /// Scalar field (density, pressure, divergence): zero-gradient walls.
    Scalar,
    /// X component of velocity: negated on left/right walls.
    VelocityX,
    /// Y component of velocity: negated on top/bottom walls.
    VelocityY,
}

/// Apply wall boundary conditions to the halo cells of `field`.
///
/// Idempotent: a second application leaves the halo unchanged, since halo
/// values are recomputed purely from interior cells.
pub fn apply_boundary(kind: FieldKind, field: &mut ScalarField) {
    let n = field.resolution();

    for i in 1..=n {
        let left = field.at(1, i);
        let right = field.at(n, i);
        let bottom = field.at(i, 1);
        let top = field.at(i, n);

        field.set(0, i, if kind == FieldKind::VelocityX { -left } else { left });
        field.set(n + 1, i, if kind == FieldKind::VelocityX { -right } else { right });
        field.set(i, 0, if kind == FieldKind::VelocityY { -bottom } else { bottom });
        field.set(i, n + 1, if kind == FieldKind::VelocityY { -top } else { top });
    }

    // Corners mirror the diagonal interior cell, negated for velocity kinds
    let corner = |v: f32| if kind == FieldKind::Scalar { v } else { -v };
    let bl = field.at(1, 1);
    let tl = field.at(1, n);
    let br = field.at(n, 1);
    let tr = field.at(n, n);
    field.set(0, 0, corner(bl));
    field.set(0, n + 1, corner(tl));
    field.set(n + 1, 0, corner(br));
    field.set(n + 1, n + 1, corner(tr));
}
