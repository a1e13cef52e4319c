//! Grid storage and boundary conditions
//!
//! All simulation fields live on a square grid of `resolution` interior cells
//! surrounded by a one-cell halo, giving a buffer side of `resolution + 2`.
//! Interior simulation coordinates run `1..=resolution`; halo cells encode
//! boundary conditions and are written only by [`apply_boundary`].

mod boundary;
mod double_buffer;
mod field;

pub use boundary::{apply_boundary, FieldKind};
pub use double_buffer::DoubleBuffer;
pub use field::ScalarField;
