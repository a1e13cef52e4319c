//! Field-to-texture bridge.

use crate::grid::ScalarField;

/// Flat single-channel image buffer published to the display layer.
///
/// Holds `resolution × resolution` floats in row-major order, zero-based —
/// the interior density cells without the halo. No scaling or gamma is
/// applied; raw `[0, 1]` density maps to the visualization's alpha channel
/// by convention at the display layer. The dirty flag tells the consumer a
/// re-upload is due and is cleared by [`take_dirty`](Self::take_dirty).
#[derive(Debug, Clone)]
pub struct DensityTexture {
    data: Vec<f32>,
    resolution: usize,
    dirty: bool,
}

impl DensityTexture {
    /// Create a zeroed texture for a grid of `resolution` interior cells.
    #[must_use]
    pub fn new(resolution: usize) -> Self {
        Self {
            data: vec![0.0; resolution * resolution],
            resolution,
            dirty: false,
        }
    }

    /// Copy the interior density cells into the buffer and mark it dirty.
    pub fn publish(&mut self, density: &ScalarField) {
        debug_assert_eq!(density.resolution(), self.resolution);
        for y in 1..=self.resolution {
            for x in 1..=self.resolution {
                self.data[(x - 1) + (y - 1) * self.resolution] = density.at(x, y);
            }
        }
        self.dirty = true;
    }

    /// Zero the buffer and mark it dirty (used by restart).
    pub fn clear(&mut self) {
        self.data.fill(0.0);
        self.dirty = true;
    }

    /// The raw image buffer, `resolution²` floats, row-major.
    #[must_use]
    pub fn as_slice(&self) -> &[f32] {
        &self.data
    }

    /// Side length of the square image in pixels.
    #[must_use]
    pub fn resolution(&self) -> usize {
        self.resolution
    }

    /// Whether a re-upload is due.
    #[must_use]
    pub fn dirty(&self) -> bool {
        self.dirty
    }

    /// Consume the dirty flag, returning whether it was set.
    pub fn take_dirty(&mut self) -> bool {
        std::mem::take(&mut self.dirty)
    }
}
