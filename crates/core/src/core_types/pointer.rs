//! Pointer input snapshot consumed by the forcing stage.
//!
//! The host's input layer translates raw mouse/touch events into normalized
//! coordinates in `[0, 1]²` (y up) and feeds them in via [`PointerState::press`],
//! [`PointerState::move_to`], and [`PointerState::release`]. Handlers only ever
//! mutate this snapshot; they never touch grid buffers, so there is no
//! read/write race with the simulation step.

use crate::core_types::vec2::Vec2;

/// Seconds of inactivity after which the pointer no longer counts as moving.
const MOVING_THRESHOLD: f64 = 0.1;

/// Seconds of inactivity after which a stale hold is released.
const HELD_TIMEOUT: f64 = 1.0;

/// Snapshot of pointer input in normalized surface coordinates.
///
/// Positions are in `[0, 1]²` relative to the visualization surface, with
/// `y = 0` at the bottom. `moving` and `held` are time-gated: both expire
/// after a period without movement, matching the interaction feel of the
/// pointer-follow and aim-and-release forcing policies.
#[derive(Debug, Clone)]
pub struct PointerState {
    /// Current pointer position.
    pos: Vec2,
    /// Position at the most recent press (anchor for aim-and-release).
    click_pos: Vec2,
    /// Position at the previous move event.
    last_pos: Vec2,
    /// Displacement of the most recent move event.
    delta: Vec2,
    /// Whether the pointer is currently pressed.
    held: bool,
    /// Whether the pointer moved recently (within [`MOVING_THRESHOLD`]).
    moving: bool,
    /// Wall-clock time of the last move event (seconds).
    last_move_time: f64,
    /// No move event seen yet; the first one seeds `last_pos`.
    first: bool,
}

impl Default for PointerState {
    fn default() -> Self {
        Self::new()
    }
}

impl PointerState {
    /// Create an idle pointer at the origin.
    #[must_use]
    pub fn new() -> Self {
        Self {
            pos: Vec2::zeros(),
            click_pos: Vec2::zeros(),
            last_pos: Vec2::zeros(),
            delta: Vec2::zeros(),
            held: false,
            moving: false,
            last_move_time: 0.0,
            first: true,
        }
    }

    /// Record a press at a normalized position.
    pub fn press(&mut self, pos: Vec2) {
        self.click_pos = pos;
        self.held = true;
    }

    /// Record a move to a normalized position at wall-clock time `now`.
    pub fn move_to(&mut self, pos: Vec2, now: f64) {
        if self.first {
            self.last_pos = pos;
            self.first = false;
        } else {
            self.last_pos = self.pos;
        }
        self.pos = pos;
        self.delta = self.pos - self.last_pos;
        self.moving = true;
        self.last_move_time = now;
    }

    /// Record a release.
    pub fn release(&mut self) {
        self.held = false;
    }

    /// Expire time-gated flags against wall-clock time `now`.
    ///
    /// `moving` drops after [`MOVING_THRESHOLD`] seconds without movement;
    /// `held` drops after [`HELD_TIMEOUT`] seconds (a stale hold, e.g. a touch
    /// that never produced a release event).
    pub fn refresh(&mut self, now: f64) {
        if self.moving && now - MOVING_THRESHOLD > self.last_move_time {
            self.moving = false;
        }
        if self.held && now - HELD_TIMEOUT > self.last_move_time {
            self.held = false;
        }
    }

    /// Current normalized position.
    #[must_use]
    pub fn pos(&self) -> Vec2 {
        self.pos
    }

    /// Normalized position of the most recent press.
    #[must_use]
    pub fn click_pos(&self) -> Vec2 {
        self.click_pos
    }

    /// Displacement of the most recent move event.
    #[must_use]
    pub fn delta(&self) -> Vec2 {
        self.delta
    }

    /// Whether the pointer is currently pressed.
    #[must_use]
    pub fn held(&self) -> bool {
        self.held
    }

    /// Whether the pointer moved recently.
    #[must_use]
    pub fn moving(&self) -> bool {
        self.moving
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_move_sets_moving_and_delta() {
        let mut pointer = PointerState::new();
        pointer.move_to(Vec2::new(0.5, 0.5), 1.0);
        assert!(pointer.moving());
        // First move seeds last_pos, so the delta is zero
        assert_eq!(pointer.delta(), Vec2::zeros());

        pointer.move_to(Vec2::new(0.6, 0.5), 1.01);
        assert!((pointer.delta().x - 0.1).abs() < 1e-6);
    }

    #[test]
    fn test_moving_expires() {
        let mut pointer = PointerState::new();
        pointer.move_to(Vec2::new(0.5, 0.5), 1.0);
        pointer.refresh(1.05);
        assert!(pointer.moving());
        pointer.refresh(1.2);
        assert!(!pointer.moving());
    }

    #[test]
    fn test_stale_hold_released() {
        let mut pointer = PointerState::new();
        pointer.move_to(Vec2::new(0.3, 0.3), 1.0);
        pointer.press(Vec2::new(0.3, 0.3));
        pointer.refresh(1.5);
        assert!(pointer.held());
        pointer.refresh(2.5);
        assert!(!pointer.held());
    }

    #[test]
    fn test_press_anchors_click_pos() {
        let mut pointer = PointerState::new();
        pointer.press(Vec2::new(0.2, 0.8));
        pointer.move_to(Vec2::new(0.9, 0.1), 0.0);
        assert_eq!(pointer.click_pos(), Vec2::new(0.2, 0.8));
        assert_eq!(pointer.pos(), Vec2::new(0.9, 0.1));
    }
}
