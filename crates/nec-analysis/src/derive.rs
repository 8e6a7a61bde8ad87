//! Per-event derived quantities.
//!
//! Pure functions from the raw collections to the values that get histogrammed.
//! Undefined values (log of a non-positive number, angle of a zero momentum,
//! divergent rapidity) are `None` and simply not filled.

use nec_core::{Event, InclusiveKinematics, Particle, energy_fraction_weight, ln_positive};

use crate::options::AnalysisOptions;

/// Derived values of one particle.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ParticleQuantities {
    /// Energy [GeV], copied from the record.
    pub energy: f64,
    /// Polar angle [rad].
    pub polar_angle: Option<f64>,
    /// `ln(tan(theta / 2))`.
    pub rapidity: Option<f64>,
    /// `x * (E / 100 GeV)`.
    pub weight: Option<f64>,
}

impl ParticleQuantities {
    /// Derive from a particle and its view's Bjorken x.
    pub fn new(p: &Particle, x: f64) -> Self {
        let (polar_angle, rapidity) = nec_core::particle_angles(p);
        let weight = energy_fraction_weight(x, p.energy);
        Self { energy: p.energy, polar_angle, rapidity, weight }
    }
}

/// Derived values of one view (reconstructed or generated).
#[derive(Debug, Clone, PartialEq)]
pub struct DerivedView {
    /// Q² [GeV²].
    pub q2: f64,
    /// ln Q².
    pub ln_q2: Option<f64>,
    /// Bjorken x.
    pub x: f64,
    /// ln x.
    pub ln_x: Option<f64>,
    /// One entry per particle, input order.
    pub particles: Vec<ParticleQuantities>,
}

/// Derive a view from its kinematics record and particle collection.
pub fn derive_view(kin: &InclusiveKinematics, particles: &[Particle]) -> DerivedView {
    DerivedView {
        q2: kin.q2,
        ln_q2: ln_positive(kin.q2),
        x: kin.x,
        ln_x: ln_positive(kin.x),
        particles: particles.iter().map(|p| ParticleQuantities::new(p, kin.x)).collect(),
    }
}

/// Both views of an event.
#[derive(Debug, Clone, PartialEq)]
pub struct DerivedEvent {
    /// Reconstructed view.
    pub rec: DerivedView,
    /// Generated (truth) view.
    pub truth: DerivedView,
}

/// Derive both views.
///
/// Fails with [`nec_core::Error::MissingCollection`] if either kinematics
/// collection is empty; particle collections may be empty.
pub fn derive_event(event: &Event, opts: &AnalysisOptions) -> nec_core::Result<DerivedEvent> {
    let rec_kin = event.require_kinematics(&opts.rec_kinematics)?;
    let gen_kin = event.require_kinematics(&opts.gen_kinematics)?;
    Ok(DerivedEvent {
        rec: derive_view(rec_kin, event.particles(&opts.rec_particles)),
        truth: derive_view(gen_kin, event.particles(&opts.gen_particles)),
    })
}
