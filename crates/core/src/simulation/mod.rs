//! Frame orchestration and output bridge
//!
//! [`SmokeSimulation`] owns every field buffer and sequences the per-frame
//! pipeline; [`FrameClock`] turns wall-clock timestamps into simulation time
//! steps; [`DensityTexture`] is the flat image buffer the display layer
//! re-uploads when its dirty flag is set.

mod driver;
mod smoke;
mod texture;

pub use driver::{DriverState, FrameClock, NOMINAL_DT};
pub use smoke::SmokeSimulation;
pub use texture::DensityTexture;
