//! Derived kinematic quantities.
//!
//! Every function here is pure and total: an argument outside the real-valued
//! domain of the formula yields `None` instead of a NaN or an infinity, so the
//! caller can drop exactly that one value and keep the rest of the event.

use crate::types::{Particle, Vector3};

/// Stand-in for the beam proton energy used in the energy-fraction weight [GeV].
///
/// This is a fixed placeholder, not derived from the kinematics collection.
/// Candidate for promotion to a run option once the intended normalisation is settled.
pub const PROTON_ENERGY_GEV: f64 = 100.0;

/// Natural log of a strictly positive finite value.
///
/// Returns `None` for `v <= 0`, NaN or infinities.
#[inline]
pub fn ln_positive(v: f64) -> Option<f64> {
    if v > 0.0 && v.is_finite() { Some(v.ln()) } else { None }
}

/// Polar angle `acos(p_z / |p|)` of a momentum vector, in `[0, pi]`.
///
/// Returns `None` for the zero vector or non-finite components.
pub fn polar_angle(p: &Vector3) -> Option<f64> {
    let norm = p.norm();
    if norm <= 0.0 || !norm.is_finite() {
        return None;
    }
    // rounding can push |cos| a hair above 1
    let cos = (p.z / norm).clamp(-1.0, 1.0);
    Some(cos.acos())
}

/// Rapidity-like coordinate `ln(tan(theta / 2))` of a polar angle.
///
/// Diverges at `theta = 0`; that case (and any other non-finite result) is `None`.
/// Near `theta = pi` the value is large but finite and is returned as-is.
pub fn rapidity(theta: f64) -> Option<f64> {
    let y = (theta / 2.0).tan().ln();
    if y.is_finite() { Some(y) } else { None }
}

/// Energy-fraction weight `x * (E / 100 GeV)` used as the NEC proxy.
pub fn energy_fraction_weight(x: f64, energy: f64) -> Option<f64> {
    let w = x * (energy / PROTON_ENERGY_GEV);
    if w.is_finite() { Some(w) } else { None }
}

/// Polar angle and rapidity of a particle in one step.
pub fn particle_angles(p: &Particle) -> (Option<f64>, Option<f64>) {
    let theta = polar_angle(&p.momentum);
    (theta, theta.and_then(rapidity))
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use std::f64::consts::{FRAC_PI_2, PI};

    #[test]
    fn test_ln_positive() {
        assert_relative_eq!(ln_positive(25.0).unwrap(), 3.2188758248682006, epsilon = 1e-12);
        assert_eq!(ln_positive(0.0), None);
        assert_eq!(ln_positive(-4.0), None);
        assert_eq!(ln_positive(f64::NAN), None);
        assert_eq!(ln_positive(f64::INFINITY), None);
    }

    #[test]
    fn test_polar_angle() {
        assert_relative_eq!(polar_angle(&Vector3::new(0.0, 0.0, 5.0)).unwrap(), 0.0);
        assert_relative_eq!(polar_angle(&Vector3::new(0.0, 0.0, -5.0)).unwrap(), PI);
        assert_relative_eq!(polar_angle(&Vector3::new(1.0, 0.0, 0.0)).unwrap(), FRAC_PI_2);
        assert_relative_eq!(
            polar_angle(&Vector3::new(1.0, 0.0, 1.0)).unwrap(),
            PI / 4.0,
            epsilon = 1e-12
        );
        assert_eq!(polar_angle(&Vector3::default()), None);
        assert_eq!(polar_angle(&Vector3::new(f64::NAN, 0.0, 1.0)), None);
    }

    #[test]
    fn test_rapidity() {
        // theta = pi/2 -> tan(pi/4) = 1 -> 0
        assert_relative_eq!(rapidity(FRAC_PI_2).unwrap(), 0.0, epsilon = 1e-12);
        assert_eq!(rapidity(0.0), None);
        let back = rapidity(PI).unwrap();
        assert!(back.is_finite() && back > 30.0);
    }

    #[test]
    fn test_energy_fraction_weight() {
        assert_relative_eq!(energy_fraction_weight(0.2, 50.0).unwrap(), 0.1, epsilon = 1e-15);
        assert_eq!(energy_fraction_weight(0.0, 50.0), Some(0.0));
        assert_eq!(energy_fraction_weight(f64::NAN, 50.0), None);
    }

    #[test]
    fn test_forward_particle_has_no_rapidity() {
        let p = Particle::new(50.0, Vector3::new(0.0, 0.0, 50.0));
        let (theta, y) = particle_angles(&p);
        assert_eq!(theta, Some(0.0));
        assert_eq!(y, None);
    }
}
