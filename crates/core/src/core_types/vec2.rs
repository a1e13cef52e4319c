//! Vector type alias for 2D positions and directions.

use nalgebra::Vector2;

/// 2D vector type for pointer positions, injection centers, and impulses.
///
/// This is a simple alias for `nalgebra::Vector2<f32>`, used throughout
/// the simulation for normalized pointer coordinates and velocity impulses.
pub type Vec2 = Vector2<f32>;
