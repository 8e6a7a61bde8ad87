//! Event data model for NEC analysis

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::{Error, Result};

/// Cartesian 3-vector (GeV/c for momenta).
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Vector3 {
    /// x component
    pub x: f64,
    /// y component
    pub y: f64,
    /// z component
    pub z: f64,
}

impl Vector3 {
    /// Create a new vector
    pub fn new(x: f64, y: f64, z: f64) -> Self {
        Self { x, y, z }
    }

    /// Euclidean magnitude.
    pub fn norm(&self) -> f64 {
        (self.x * self.x + self.y * self.y + self.z * self.z).sqrt()
    }
}

/// Event-level DIS kinematics (first record of an inclusive kinematics collection).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct InclusiveKinematics {
    /// Momentum transfer squared [GeV^2]
    #[serde(rename = "Q2")]
    pub q2: f64,
    /// Bjorken scaling variable
    pub x: f64,
}

impl InclusiveKinematics {
    /// Create a new kinematics record
    pub fn new(q2: f64, x: f64) -> Self {
        Self { q2, x }
    }
}

/// Reconstructed or generated particle, momenta already in the Breit frame.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Particle {
    /// Energy [GeV]
    pub energy: f64,
    /// Momentum [GeV/c]
    pub momentum: Vector3,
}

impl Particle {
    /// Create a new particle
    pub fn new(energy: f64, momentum: Vector3) -> Self {
        Self { energy, momentum }
    }
}

/// One collision event: named kinematics and particle collections.
///
/// Events are read-only once constructed. Absent collections behave exactly
/// like empty ones.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Event {
    /// Inclusive kinematics collections keyed by collection name.
    #[serde(default)]
    pub kinematics: BTreeMap<String, Vec<InclusiveKinematics>>,
    /// Particle collections keyed by collection name.
    #[serde(default)]
    pub particles: BTreeMap<String, Vec<Particle>>,
}

impl Event {
    /// Create an empty event
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder-style: attach a kinematics collection.
    pub fn with_kinematics(
        mut self,
        name: impl Into<String>,
        records: Vec<InclusiveKinematics>,
    ) -> Self {
        self.kinematics.insert(name.into(), records);
        self
    }

    /// Builder-style: attach a particle collection.
    pub fn with_particles(mut self, name: impl Into<String>, particles: Vec<Particle>) -> Self {
        self.particles.insert(name.into(), particles);
        self
    }

    /// Kinematics collection by name (empty slice if absent).
    pub fn kinematics(&self, name: &str) -> &[InclusiveKinematics] {
        self.kinematics.get(name).map(Vec::as_slice).unwrap_or(&[])
    }

    /// Particle collection by name (empty slice if absent).
    pub fn particles(&self, name: &str) -> &[Particle] {
        self.particles.get(name).map(Vec::as_slice).unwrap_or(&[])
    }

    /// Front of a kinematics collection, if any.
    pub fn first_kinematics(&self, name: &str) -> Option<&InclusiveKinematics> {
        self.kinematics(name).first()
    }

    /// Front of a kinematics collection, or [`Error::MissingCollection`].
    pub fn require_kinematics(&self, name: &str) -> Result<&InclusiveKinematics> {
        self.first_kinematics(name).ok_or_else(|| Error::MissingCollection(name.to_string()))
    }
}
