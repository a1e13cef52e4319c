//! Core types and utilities

pub mod pointer;
pub mod vec2;

pub use pointer::PointerState;
pub use vec2::Vec2;
