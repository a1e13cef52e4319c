//! Current/previous buffer pair for fields that are read and written in the
//! same stage.

use super::field::ScalarField;

/// Named pair of field buffers with an explicit swap.
///
/// A stage that both reads and writes a field (advection, diffusion) first
/// calls [`swap`](Self::swap) so that `previous` holds the pre-stage snapshot
/// and `current` becomes the write target. The swap exchanges buffer
/// identities before any stage reads the new `previous`, which is the only
/// handoff discipline the single-threaded step needs.
#[derive(Debug, Clone)]
pub struct DoubleBuffer {
    current: ScalarField,
    previous: ScalarField,
}

impl DoubleBuffer {
    /// Create a zeroed pair for a grid of `resolution` interior cells.
    #[must_use]
    pub fn new(resolution: usize) -> Self {
        Self {
            current: ScalarField::new(resolution),
            previous: ScalarField::new(resolution),
        }
    }

    /// Exchange the `current` and `previous` buffer identities.
    pub fn swap(&mut self) {
        std::mem::swap(&mut self.current, &mut self.previous);
    }

    /// The buffer holding the latest field state.
    #[must_use]
    pub fn current(&self) -> &ScalarField {
        &self.current
    }

    /// Mutable access to the latest field state.
    pub fn current_mut(&mut self) -> &mut ScalarField {
        &mut self.current
    }

    /// The pre-stage snapshot.
    #[must_use]
    pub fn previous(&self) -> &ScalarField {
        &self.previous
    }

    /// Write target and snapshot at once, for stages that read `previous`
    /// while filling `current`.
    pub fn split_mut(&mut self) -> (&mut ScalarField, &ScalarField) {
        (&mut self.current, &self.previous)
    }

    /// Zero both buffers.
    pub fn clear(&mut self) {
        self.current.clear();
        self.previous.clear();
    }
}
