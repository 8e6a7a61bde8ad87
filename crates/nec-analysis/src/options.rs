//! Run options for the NEC pipeline.

use serde::{Deserialize, Serialize};

use crate::error::{AnalysisError, Result};

/// Immutable configuration of one analysis run.
///
/// Built once by the caller and passed by reference into
/// [`NecAnalysis::new`](crate::NecAnalysis::new); never mutated afterwards.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnalysisOptions {
    /// Lower Q² bound, exclusive [GeV²].
    #[serde(default = "default_min_q2")]
    pub min_q2: f64,

    /// Upper Q² bound, exclusive [GeV²].
    #[serde(default = "default_max_q2")]
    pub max_q2: f64,

    /// Power to raise x_B to. Reserved for weight shaping; no formula reads it yet.
    #[serde(default = "default_n_pow")]
    pub n_pow: f64,

    /// Reconstructed inclusive kinematics collection.
    #[serde(default = "default_rec_kinematics")]
    pub rec_kinematics: String,

    /// Generated (truth) inclusive kinematics collection.
    #[serde(default = "default_gen_kinematics")]
    pub gen_kinematics: String,

    /// Reconstructed particle collection.
    #[serde(default = "default_rec_particles")]
    pub rec_particles: String,

    /// Generated particle collection.
    #[serde(default = "default_gen_particles")]
    pub gen_particles: String,

    /// Threads (0 = rayon default). Use 1 for deterministic parity.
    #[serde(default = "default_threads")]
    pub threads: usize,
}

fn default_min_q2() -> f64 {
    0.0
}

fn default_max_q2() -> f64 {
    100.0
}

fn default_n_pow() -> f64 {
    1.0
}

fn default_rec_kinematics() -> String {
    "InclusiveKinematicsElectron".to_string()
}

fn default_gen_kinematics() -> String {
    "InclusiveKinematicsTruth".to_string()
}

fn default_rec_particles() -> String {
    "ReconstructedBreitFrameParticles".to_string()
}

fn default_gen_particles() -> String {
    "GeneratedBreitFrameParticles".to_string()
}

fn default_threads() -> usize {
    1
}

impl Default for AnalysisOptions {
    fn default() -> Self {
        Self {
            min_q2: default_min_q2(),
            max_q2: default_max_q2(),
            n_pow: default_n_pow(),
            rec_kinematics: default_rec_kinematics(),
            gen_kinematics: default_gen_kinematics(),
            rec_particles: default_rec_particles(),
            gen_particles: default_gen_particles(),
            threads: default_threads(),
        }
    }
}

impl AnalysisOptions {
    /// Check bounds and collection names.
    pub fn validate(&self) -> Result<()> {
        if !self.min_q2.is_finite() || !self.max_q2.is_finite() {
            return Err(AnalysisError::Validation(format!(
                "Q2 bounds must be finite (min_q2={}, max_q2={})",
                self.min_q2, self.max_q2
            )));
        }
        if self.min_q2 >= self.max_q2 {
            return Err(AnalysisError::Validation(format!(
                "min_q2 must be < max_q2 (min_q2={}, max_q2={})",
                self.min_q2, self.max_q2
            )));
        }
        if !self.n_pow.is_finite() {
            return Err(AnalysisError::Validation(format!("n_pow must be finite, got {}", self.n_pow)));
        }
        for name in self.required_collections() {
            if name.trim().is_empty() {
                return Err(AnalysisError::Validation("collection names must be non-empty".into()));
            }
        }
        Ok(())
    }

    /// Collections that must be non-empty for an event to be analysed.
    pub fn required_collections(&self) -> [&str; 4] {
        [&self.rec_kinematics, &self.gen_kinematics, &self.rec_particles, &self.gen_particles]
    }

    /// Strict Q² window test.
    #[inline]
    pub fn q2_in_window(&self, q2: f64) -> bool {
        q2 > self.min_q2 && q2 < self.max_q2
    }
}
