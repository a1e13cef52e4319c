//! Flat scalar field storage with a one-cell boundary halo.

/// 2D scalar field over the simulation grid, stored as a flat `Vec<f32>`
/// in row-major order with a one-cell halo on every side.
///
/// For a grid of `resolution` interior cells the buffer side is
/// `resolution + 2` and `index(x, y) = y * size + x` with
/// `x, y ∈ [0, size)`. Interior cells are `1..=resolution` on both axes;
/// row/column `0` and `resolution + 1` are halo.
#[derive(Debug, Clone, PartialEq)]
pub struct ScalarField {
    /// Field values in row-major order (y * size + x), halo included.
    data: Vec<f32>,
    /// Interior side length in cells.
    resolution: usize,
    /// Buffer side length (`resolution + 2`).
    size: usize,
}

impl ScalarField {
    /// Create a zeroed field for a grid of `resolution` interior cells.
    #[must_use]
    pub fn new(resolution: usize) -> Self {
        let size = resolution + 2;
        Self {
            data: vec![0.0; size * size],
            resolution,
            size,
        }
    }

    /// Interior side length in cells.
    #[must_use]
    pub fn resolution(&self) -> usize {
        self.resolution
    }

    /// Buffer side length including the halo.
    #[must_use]
    pub fn size(&self) -> usize {
        self.size
    }

    /// Flat index for buffer coordinates.
    ///
    /// Valid only for `0 ≤ x, y < size`; callers are responsible for staying
    /// in range.
    #[inline]
    #[must_use]
    pub fn index(&self, x: usize, y: usize) -> usize {
        y * self.size + x
    }

    /// Value at buffer coordinates.
    ///
    /// # Panics
    ///
    /// Panics if coordinates are out of bounds.
    #[inline]
    #[must_use]
    pub fn at(&self, x: usize, y: usize) -> f32 {
        debug_assert!(x < self.size && y < self.size, "coordinates out of bounds");
        self.data[y * self.size + x]
    }

    /// Set value at buffer coordinates.
    ///
    /// # Panics
    ///
    /// Panics if coordinates are out of bounds.
    #[inline]
    pub fn set(&mut self, x: usize, y: usize, value: f32) {
        debug_assert!(x < self.size && y < self.size, "coordinates out of bounds");
        self.data[y * self.size + x] = value;
    }

    /// Add to the value at buffer coordinates.
    #[inline]
    pub fn add(&mut self, x: usize, y: usize, value: f32) {
        debug_assert!(x < self.size && y < self.size, "coordinates out of bounds");
        self.data[y * self.size + x] += value;
    }

    /// Zero every cell, halo included.
    pub fn clear(&mut self) {
        self.data.fill(0.0);
    }

    /// Read-only view of the raw buffer.
    #[must_use]
    pub fn as_slice(&self) -> &[f32] {
        &self.data
    }

    /// Sum of all interior cells (halo excluded).
    #[must_use]
    pub fn interior_sum(&self) -> f64 {
        let mut total = 0.0_f64;
        for y in 1..=self.resolution {
            for x in 1..=self.resolution {
                total += f64::from(self.at(x, y));
            }
        }
        total
    }

    /// Largest interior magnitude (halo excluded).
    #[must_use]
    pub fn interior_abs_max(&self) -> f32 {
        let mut max = 0.0_f32;
        for y in 1..=self.resolution {
            for x in 1..=self.resolution {
                max = max.max(self.at(x, y).abs());
            }
        }
        max
    }
}
