//! Integration tests: gate/derive/accumulate behaviour of the NEC pipeline.

use approx::assert_relative_eq;
use nec_analysis::{AnalysisOptions, EventOutcome, NecAnalysis, RunSummary};
use nec_core::{Event, InclusiveKinematics, Particle, Vector3};
use nec_hist::{Hist1D, HistogramRegistry};

fn opts() -> AnalysisOptions {
    AnalysisOptions { min_q2: 0.0, max_q2: 100.0, ..Default::default() }
}

fn make_event(o: &AnalysisOptions, q2: f64, x: f64, particles: Vec<Particle>) -> Event {
    Event::new()
        .with_kinematics(&o.rec_kinematics, vec![InclusiveKinematics::new(q2, x)])
        .with_kinematics(&o.gen_kinematics, vec![InclusiveKinematics::new(q2, x)])
        .with_particles(&o.rec_particles, particles.clone())
        .with_particles(&o.gen_particles, particles)
}

fn h1<'a>(reg: &'a HistogramRegistry, name: &str) -> &'a Hist1D {
    reg.get(name)
        .and_then(|h| h.as_1d())
        .unwrap_or_else(|| panic!("missing 1D histogram {name}"))
}

fn entries(reg: &HistogramRegistry, name: &str) -> u64 {
    reg.get(name).map(|h| h.entries()).unwrap_or_else(|| panic!("missing histogram {name}"))
}

#[test]
fn availability_gate_rejects_without_fills() {
    let o = opts();
    let a = NecAnalysis::new(&o).unwrap();
    let p = Particle::new(10.0, Vector3::new(1.0, 0.0, 1.0));

    for missing in o.required_collections() {
        let mut ev = make_event(&o, 25.0, 0.1, vec![p]);
        ev.kinematics.remove(missing);
        ev.particles.remove(missing);

        let mut reg = a.new_registry();
        let mut summary = RunSummary::default();
        let out = a.process_event(&ev, &mut reg, &mut summary).unwrap();

        assert_eq!(out, EventOutcome::MissingCollection(missing.to_string()));
        assert_eq!(reg.total_entries(), 0, "fills after rejecting on {missing}");
        assert_eq!(summary.skipped_missing_collection, 1);
    }

    // present but empty counts as missing
    let ev = make_event(&o, 25.0, 0.1, vec![]);
    let (reg, summary) = a.run_sequential(&[ev]).unwrap();
    assert_eq!(summary.skipped_missing_collection, 1);
    assert_eq!(reg.total_entries(), 0);
}

#[test]
fn selection_boundaries_are_exclusive() {
    let o = AnalysisOptions { min_q2: 10.0, max_q2: 50.0, ..Default::default() };
    let a = NecAnalysis::new(&o).unwrap();
    let p = Particle::new(10.0, Vector3::new(0.0, 1.0, 0.0));
    let eps = 1e-9;

    for (q2, accepted) in
        [(10.0, false), (50.0, false), (10.0 + eps, true), (50.0 - eps, true), (5.0, false)]
    {
        let ev = make_event(&o, q2, 0.1, vec![p]);
        let mut reg = a.new_registry();
        let mut summary = RunSummary::default();
        let out = a.process_event(&ev, &mut reg, &mut summary).unwrap();
        assert_eq!(out.is_accepted(), accepted, "q2 = {q2}");
        assert_eq!(entries(&reg, "hQ2Rec"), u64::from(accepted));
    }
}

#[test]
fn particle_histograms_fill_once_per_particle() {
    let o = opts();
    let a = NecAnalysis::new(&o).unwrap();
    let parts: Vec<Particle> = (1..=7)
        .map(|i| Particle::new(5.0 * i as f64, Vector3::new(1.0, 0.5, i as f64 - 4.0)))
        .collect();
    let ev = make_event(&o, 30.0, 0.2, parts);

    let (reg, summary) = a.run_sequential(&[ev]).unwrap();
    assert_eq!(summary.events_accepted, 1);
    assert_eq!(entries(&reg, "hEneParRec"), 7);
    assert_eq!(entries(&reg, "hEneParGen"), 7);
    assert_eq!(entries(&reg, "hNECVsRapRec"), 7);
    assert_eq!(entries(&reg, "hQ2Rec"), 1);
    assert_eq!(entries(&reg, "hXBRecVsGen"), 1);
}

#[test]
fn nec_weight_is_x_times_energy_fraction() {
    let o = opts();
    let a = NecAnalysis::new(&o).unwrap();
    let (energy, x) = (40.0, 0.3);
    // theta = pi/4
    let p = Particle::new(energy, Vector3::new(1.0, 0.0, 1.0));
    let ev = make_event(&o, 20.0, x, vec![p]);

    let (reg, _) = a.run_sequential(&[ev]).unwrap();
    let y = (std::f64::consts::FRAC_PI_4 / 2.0).tan().ln();
    let nec = h1(&reg, "hNECVsRapRec");
    let expected = x * (energy / 100.0);
    assert_relative_eq!(nec.content_at(y).unwrap(), expected, epsilon = 1e-12);
    assert_relative_eq!(nec.integral(), expected, epsilon = 1e-12);
    assert_relative_eq!(nec.sumw2.iter().sum::<f64>(), expected * expected, epsilon = 1e-12);

    let rap = h1(&reg, "hRapParRec");
    assert_eq!(rap.content_at(y), Some(1.0));
}

/// Events whose weights are exact binary fractions, so sums do not depend on order.
fn dyadic_events(o: &AnalysisOptions) -> Vec<Event> {
    let energies = [25.0, 50.0, 75.0, 100.0, 125.0];
    let xs = [0.5, 0.25, 0.125];
    (0..30)
        .map(|i| {
            let parts = (0..(i % 4) + 1)
                .map(|j| {
                    let e = energies[(i + j) % energies.len()];
                    Particle::new(e, Vector3::new(1.0, (j as f64) - 1.0, (i % 7) as f64 - 3.0))
                })
                .collect();
            let q2 = 4.0 * (i as f64 + 1.0);
            make_event(o, q2, xs[i % xs.len()], parts)
        })
        .collect()
}

#[test]
fn event_order_does_not_change_results() {
    let o = opts();
    let a = NecAnalysis::new(&o).unwrap();
    let events = dyadic_events(&o);
    let mut reversed = events.clone();
    reversed.reverse();
    let mut interleaved: Vec<Event> = events.iter().step_by(2).cloned().collect();
    interleaved.extend(events.iter().skip(1).step_by(2).cloned());

    let (base, s0) = a.run_sequential(&events).unwrap();
    let (rev, s1) = a.run_sequential(&reversed).unwrap();
    let (mix, s2) = a.run_sequential(&interleaved).unwrap();
    let (par, s3) = a.run_parallel(&events, 3).unwrap();

    assert!(s0.events_accepted > 0 && s0.skipped_out_of_range > 0);
    assert_eq!(base, rev);
    assert_eq!(base, mix);
    assert_eq!(base, par);
    assert_eq!(s0, s1);
    assert_eq!(s0, s2);
    assert_eq!(s0, s3);
}

#[test]
fn log_of_q2_and_non_positive_policy() {
    let o = opts();
    let a = NecAnalysis::new(&o).unwrap();
    let p = Particle::new(10.0, Vector3::new(0.0, 1.0, 0.0));

    let (reg, summary) = a.run_sequential(&[make_event(&o, 25.0, 0.1, vec![p])]).unwrap();
    let ln_q2 = h1(&reg, "hLogQ2Rec");
    assert_relative_eq!(25f64.ln(), 3.2188758248682006, epsilon = 1e-12);
    assert_eq!(ln_q2.content_at(25f64.ln()), Some(1.0));
    assert_eq!(summary.domain_anomalies, 0);

    // a window that admits Q2 <= 0
    let o = AnalysisOptions { min_q2: -10.0, max_q2: 100.0, ..Default::default() };
    let a = NecAnalysis::new(&o).unwrap();
    let (reg, summary) = a.run_sequential(&[make_event(&o, -5.0, 0.1, vec![p])]).unwrap();
    assert_eq!(summary.events_accepted, 1);
    assert_eq!(entries(&reg, "hLogQ2Rec"), 0);
    assert_eq!(entries(&reg, "hLogQ2Gen"), 0);
    assert_eq!(entries(&reg, "hLogQ2RecVsGen"), 0);
    assert_eq!(h1(&reg, "hQ2Rec").underflow, 1.0);
    assert_eq!(entries(&reg, "hLogXBRec"), 1);
    assert_eq!(summary.domain_anomalies, 3);
}

#[test]
fn three_event_scenario() {
    let o = opts();
    let a = NecAnalysis::new(&o).unwrap();
    let forward = Particle::new(50.0, Vector3::new(0.0, 0.0, 50.0));

    let mut missing = make_event(&o, 5.0, 0.2, vec![forward]);
    missing.particles.remove(&o.rec_particles);
    let good = make_event(&o, 5.0, 0.2, vec![forward]);
    let high = make_event(&o, 150.0, 0.2, vec![forward]);

    let (reg, summary) = a.run_sequential(&[missing, good, high]).unwrap();

    assert_eq!(summary.events_read, 3);
    assert_eq!(summary.events_accepted, 1);
    assert_eq!(summary.skipped_missing_collection, 1);
    assert_eq!(summary.skipped_out_of_range, 1);

    for v in ["Rec", "Gen"] {
        for base in ["hQ2", "hLogQ2", "hXB", "hLogXB", "hEnePar", "hAngPar", "hEneFrac"] {
            assert_eq!(entries(&reg, &format!("{base}{v}")), 1, "{base}{v}");
        }
        assert_eq!(entries(&reg, &format!("hNECVsAng{v}")), 1);
        // theta = 0: rapidity diverges and is not filled
        assert_eq!(entries(&reg, &format!("hRapPar{v}")), 0);
        assert_eq!(entries(&reg, &format!("hNECVsRap{v}")), 0);
    }
    for corr in ["hQ2RecVsGen", "hLogQ2RecVsGen", "hXBRecVsGen", "hLogXBRecVsGen"] {
        assert_eq!(entries(&reg, corr), 1, "{corr}");
    }
    assert_eq!(h1(&reg, "hAngParRec").bin_content[0], 1.0);
    assert_relative_eq!(h1(&reg, "hNECVsAngRec").bin_content[0], 0.2 * 0.5, epsilon = 1e-15);
    assert_eq!(summary.domain_anomalies, 4);
}
