//! Solver parameters and validated configuration input.
//!
//! [`SmokeParams`] holds the coefficients the stages read; they are fixed for
//! the duration of a frame and only replaced at frame boundaries.
//! [`SmokeOptions`] is the user-facing configuration surface: unit-scale
//! knobs (1.0 = default look) that resolve to coefficients via fixed scale
//! factors. Resolution validates everything up front — an invalid option set
//! is rejected before any parameter is applied, leaving prior parameters in
//! effect.

use super::forcing::ForcingPolicy;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Scale factor from the `diffusion` knob to the density diffusion rate.
const DIFFUSION_SCALE: f32 = 0.001;

/// Scale factor from the `viscosity` knob to the momentum diffusion rate.
const VISCOSITY_SCALE: f32 = 0.0001;

/// Scale factor from the `density` knob to the injected density gain.
const DENSITY_SCALE: f32 = 10.0;

/// Scale factor from the `radius` knob to the injection radius
/// (fraction of grid width).
const RADIUS_SCALE: f32 = 0.1;

/// Scale factor from the `velocity` knob to the impulse magnitude.
const VELOCITY_SCALE: f32 = 20.0;

/// Internal solver coefficients, read-only during a frame's stage sequence.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SmokeParams {
    /// Momentum diffusion rate (velocity fields).
    pub viscosity: f32,
    /// Density diffusion rate.
    pub diffusion: f32,
    /// Injection radius as a fraction of grid width.
    pub radius: f32,
    /// Density added per second at the footprint center.
    pub density_gain: f32,
    /// Impulse magnitude for pointer forcing.
    pub velocity_gain: f32,
    /// Active pointer forcing policy.
    pub input: ForcingPolicy,
    /// Whether the ambient plume source runs each frame.
    pub source: bool,
}

impl Default for SmokeParams {
    fn default() -> Self {
        Self {
            viscosity: VISCOSITY_SCALE,
            diffusion: DIFFUSION_SCALE,
            radius: RADIUS_SCALE,
            density_gain: DENSITY_SCALE,
            velocity_gain: VELOCITY_SCALE,
            input: ForcingPolicy::Follow,
            source: false,
        }
    }
}

/// User-facing configuration: unit-scale knobs around the default look.
///
/// A value of `1.0` for every numeric knob reproduces [`SmokeParams::default`].
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SmokeOptions {
    /// Scales the density diffusion rate.
    pub diffusion: f32,
    /// Scales the momentum diffusion rate.
    pub viscosity: f32,
    /// Scales the injected density gain.
    pub density: f32,
    /// Scales the injection radius.
    pub radius: f32,
    /// Scales the injection impulse magnitude.
    pub velocity: f32,
    /// Selects the pointer forcing policy.
    pub input: ForcingPolicy,
    /// Toggles the ambient plume.
    pub source: bool,
}

impl Default for SmokeOptions {
    fn default() -> Self {
        Self {
            diffusion: 1.0,
            viscosity: 1.0,
            density: 1.0,
            radius: 1.0,
            velocity: 1.0,
            input: ForcingPolicy::Follow,
            source: false,
        }
    }
}

impl SmokeOptions {
    /// Resolve the knobs into solver coefficients.
    ///
    /// Every numeric knob must be finite and non-negative; the first
    /// offending field is reported and nothing is applied.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] if any numeric field is non-finite or
    /// negative.
    pub fn resolve(&self) -> Result<SmokeParams, ConfigError> {
        for (name, value) in [
            ("diffusion", self.diffusion),
            ("viscosity", self.viscosity),
            ("density", self.density),
            ("radius", self.radius),
            ("velocity", self.velocity),
        ] {
            if !value.is_finite() {
                return Err(ConfigError::NotFinite { field: name });
            }
            if value < 0.0 {
                return Err(ConfigError::Negative { field: name, value });
            }
        }

        Ok(SmokeParams {
            viscosity: self.viscosity * VISCOSITY_SCALE,
            diffusion: self.diffusion * DIFFUSION_SCALE,
            radius: self.radius * RADIUS_SCALE,
            density_gain: self.density * DENSITY_SCALE,
            velocity_gain: self.velocity * VELOCITY_SCALE,
            input: self.input,
            source: self.source,
        })
    }
}

/// Rejection reason for invalid configuration input.
#[derive(Debug, Clone, PartialEq)]
pub enum ConfigError {
    /// A numeric field was NaN or infinite.
    NotFinite {
        /// Name of the offending field.
        field: &'static str,
    },
    /// A numeric field was negative.
    Negative {
        /// Name of the offending field.
        field: &'static str,
        /// The rejected value.
        value: f32,
    },
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::NotFinite { field } => {
                write!(f, "option '{field}' must be a finite number")
            }
            ConfigError::Negative { field, value } => {
                write!(f, "option '{field}' must be non-negative, got {value}")
            }
        }
    }
}

impl std::error::Error for ConfigError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unit_options_give_default_params() {
        let params = SmokeOptions::default().resolve().expect("defaults valid");
        assert_eq!(params, SmokeParams::default());
    }

    #[test]
    fn test_knobs_scale_coefficients() {
        let options = SmokeOptions {
            diffusion: 2.0,
            viscosity: 0.5,
            density: 3.0,
            radius: 2.0,
            velocity: 0.25,
            input: ForcingPolicy::AimAndRelease,
            source: true,
        };
        let params = options.resolve().expect("valid options");
        assert_eq!(params.diffusion, 0.002);
        assert_eq!(params.viscosity, 0.00005);
        assert_eq!(params.density_gain, 30.0);
        assert_eq!(params.radius, 0.2);
        assert_eq!(params.velocity_gain, 5.0);
        assert_eq!(params.input, ForcingPolicy::AimAndRelease);
        assert!(params.source);
    }

    #[test]
    fn test_nan_rejected() {
        let options = SmokeOptions {
            viscosity: f32::NAN,
            ..SmokeOptions::default()
        };
        assert_eq!(
            options.resolve(),
            Err(ConfigError::NotFinite { field: "viscosity" })
        );
    }

    #[test]
    fn test_negative_rejected() {
        let options = SmokeOptions {
            radius: -0.5,
            ..SmokeOptions::default()
        };
        let err = options.resolve().unwrap_err();
        assert!(matches!(err, ConfigError::Negative { field: "radius", .. }));
        assert!(err.to_string().contains("radius"));
    }

    #[test]
    fn test_serde_round_trip() {
        let options = SmokeOptions {
            density: 1.5,
            source: true,
            ..SmokeOptions::default()
        };
        let json = serde_json::to_string(&options).expect("serialize");
        let back: SmokeOptions = serde_json::from_str(&json).expect("deserialize");
        assert_eq!(options, back);
    }
}
