//! # nec-core
//!
//! Core types, traits, and error handling for Nucleon Energy Correlator analysis.
//!
//! This crate provides:
//! - Common error types
//! - The event data model (inclusive kinematics, particles, named collections)
//! - Pure kinematic formulas (log, polar angle, rapidity, energy-fraction weight)
//! - The [`EventSource`] trait the analysis pulls events from

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod error;
pub mod kinematics;
pub mod traits;
pub mod types;

pub use error::{Error, Result};
pub use kinematics::{
    PROTON_ENERGY_GEV, energy_fraction_weight, ln_positive, particle_angles, polar_angle,
    rapidity,
};
pub use traits::{EventSource, VecEventSource};
pub use types::{Event, InclusiveKinematics, Particle, Vector3};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_version() {
        assert!(!VERSION.is_empty());
    }
}
