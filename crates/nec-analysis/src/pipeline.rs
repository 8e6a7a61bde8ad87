//! Gate → derive → gate → accumulate.

use nec_core::Event;
use nec_hist::{HistId, HistogramRegistry};
use rayon::prelude::*;

use crate::catalogue::{AxisCatalogue, View, build_registry, histogram_defs, names};
use crate::derive::{DerivedEvent, DerivedView, derive_event};
use crate::error::{AnalysisError, Result};
use crate::options::AnalysisOptions;
use crate::summary::{EventOutcome, RunSummary};

/// Fill targets of one view, resolved once at construction.
#[derive(Debug, Clone, Copy)]
struct ViewTargets {
    q2: HistId,
    ln_q2: HistId,
    x: HistId,
    ln_x: HistId,
    energy: HistId,
    angle: HistId,
    rapidity: HistId,
    weight: HistId,
    nec_vs_rap: HistId,
    nec_vs_ang: HistId,
}

impl ViewTargets {
    fn resolve(reg: &HistogramRegistry, v: View) -> Result<Self> {
        Ok(Self {
            q2: reg.resolve(&names::q2(v))?,
            ln_q2: reg.resolve(&names::ln_q2(v))?,
            x: reg.resolve(&names::x(v))?,
            ln_x: reg.resolve(&names::ln_x(v))?,
            energy: reg.resolve(&names::energy(v))?,
            angle: reg.resolve(&names::angle(v))?,
            rapidity: reg.resolve(&names::rapidity(v))?,
            weight: reg.resolve(&names::weight(v))?,
            nec_vs_rap: reg.resolve(&names::nec_vs_rap(v))?,
            nec_vs_ang: reg.resolve(&names::nec_vs_ang(v))?,
        })
    }
}

#[derive(Debug, Clone, Copy)]
struct FillTargets {
    rec: ViewTargets,
    truth: ViewTargets,
    q2_corr: HistId,
    ln_q2_corr: HistId,
    x_corr: HistId,
    ln_x_corr: HistId,
}

impl FillTargets {
    fn resolve(reg: &HistogramRegistry) -> Result<Self> {
        Ok(Self {
            rec: ViewTargets::resolve(reg, View::Rec)?,
            truth: ViewTargets::resolve(reg, View::Gen)?,
            q2_corr: reg.resolve(names::Q2_CORR)?,
            ln_q2_corr: reg.resolve(names::LN_Q2_CORR)?,
            x_corr: reg.resolve(names::X_CORR)?,
            ln_x_corr: reg.resolve(names::LN_X_CORR)?,
        })
    }
}

/// Raw inputs are filled as-is except NaN; ±inf still reaches the flows.
fn defined(v: f64) -> Option<f64> {
    (!v.is_nan()).then_some(v)
}

/// Fill helper that drops undefined values and counts them.
struct Filler<'a> {
    reg: &'a mut HistogramRegistry,
    dropped: u64,
}

impl Filler<'_> {
    fn fill(&mut self, id: HistId, val: Option<f64>) -> Result<()> {
        match val {
            Some(v) => self.reg.fill(id, v)?,
            None => self.dropped += 1,
        }
        Ok(())
    }

    fn fill_weighted(&mut self, id: HistId, val: Option<f64>, weight: Option<f64>) -> Result<()> {
        match (val, weight) {
            (Some(v), Some(w)) => self.reg.fill_weighted(id, v, w)?,
            _ => self.dropped += 1,
        }
        Ok(())
    }

    fn fill2(&mut self, id: HistId, x: Option<f64>, y: Option<f64>) -> Result<()> {
        match (x, y) {
            (Some(x), Some(y)) => self.reg.fill2(id, x, y)?,
            _ => self.dropped += 1,
        }
        Ok(())
    }

    fn fill_view(&mut self, t: &ViewTargets, v: &DerivedView) -> Result<()> {
        self.fill(t.q2, defined(v.q2))?;
        self.fill(t.ln_q2, v.ln_q2)?;
        self.fill(t.x, defined(v.x))?;
        self.fill(t.ln_x, v.ln_x)?;
        for p in &v.particles {
            self.fill(t.energy, defined(p.energy))?;
            self.fill(t.angle, p.polar_angle)?;
            self.fill(t.rapidity, p.rapidity)?;
            self.fill(t.weight, p.weight)?;
            self.fill_weighted(t.nec_vs_rap, p.rapidity, p.weight)?;
            self.fill_weighted(t.nec_vs_ang, p.polar_angle, p.weight)?;
        }
        Ok(())
    }
}

/// The NEC pipeline with its histogram set declared and resolved.
///
/// Construction validates the options, declares every histogram and resolves
/// every fill target by name, so a misconfigured histogram set fails here
/// rather than during event processing.
#[derive(Debug, Clone)]
pub struct NecAnalysis {
    opts: AnalysisOptions,
    template: HistogramRegistry,
    targets: FillTargets,
}

impl NecAnalysis {
    /// Build the pipeline for `opts`.
    pub fn new(opts: &AnalysisOptions) -> Result<Self> {
        opts.validate()?;
        let catalogue = AxisCatalogue::standard()?;
        let template = build_registry(&catalogue, &histogram_defs())?;
        let targets = FillTargets::resolve(&template)?;
        tracing::debug!(histograms = template.len(), "histogram set declared");
        Ok(Self { opts: opts.clone(), template, targets })
    }

    /// Options this pipeline was built with.
    pub fn options(&self) -> &AnalysisOptions {
        &self.opts
    }

    /// Empty registry holding every declared histogram.
    pub fn new_registry(&self) -> HistogramRegistry {
        self.template.empty_like()
    }

    /// Process one event into `reg`, updating `summary`.
    ///
    /// A rejected event leaves `reg` untouched.
    pub fn process_event(
        &self,
        event: &Event,
        reg: &mut HistogramRegistry,
        summary: &mut RunSummary,
    ) -> Result<EventOutcome> {
        let outcome = self.process_inner(event, reg, summary)?;
        summary.record(&outcome);
        Ok(outcome)
    }

    fn process_inner(
        &self,
        event: &Event,
        reg: &mut HistogramRegistry,
        summary: &mut RunSummary,
    ) -> Result<EventOutcome> {
        if let Some(name) = self.first_empty_collection(event) {
            tracing::trace!(collection = name, "event skipped: empty collection");
            return Ok(EventOutcome::MissingCollection(name.to_string()));
        }

        let derived = match derive_event(event, &self.opts) {
            Ok(d) => d,
            Err(nec_core::Error::MissingCollection(name)) => {
                return Ok(EventOutcome::MissingCollection(name));
            }
            Err(e) => return Err(e.into()),
        };

        if !self.opts.q2_in_window(derived.rec.q2) {
            tracing::trace!(q2 = derived.rec.q2, "event skipped: Q2 outside window");
            return Ok(EventOutcome::OutOfRange(derived.rec.q2));
        }

        summary.domain_anomalies += self.accumulate(&derived, reg)?;
        Ok(EventOutcome::Accepted)
    }

    /// First required collection the event lacks. Kinematics and particle
    /// collections are looked up in their own maps, even when names coincide.
    fn first_empty_collection(&self, event: &Event) -> Option<&str> {
        let o = &self.opts;
        [
            (&o.rec_kinematics, event.kinematics(&o.rec_kinematics).is_empty()),
            (&o.gen_kinematics, event.kinematics(&o.gen_kinematics).is_empty()),
            (&o.rec_particles, event.particles(&o.rec_particles).is_empty()),
            (&o.gen_particles, event.particles(&o.gen_particles).is_empty()),
        ]
        .into_iter()
        .find_map(|(name, empty)| empty.then_some(name.as_str()))
    }

    /// Fill every histogram from an accepted event. Returns the number of
    /// fills dropped for undefined values.
    fn accumulate(&self, d: &DerivedEvent, reg: &mut HistogramRegistry) -> Result<u64> {
        let t = &self.targets;
        let mut f = Filler { reg, dropped: 0 };
        f.fill_view(&t.rec, &d.rec)?;
        f.fill_view(&t.truth, &d.truth)?;
        f.fill2(t.q2_corr, defined(d.rec.q2), defined(d.truth.q2))?;
        f.fill2(t.ln_q2_corr, d.rec.ln_q2, d.truth.ln_q2)?;
        f.fill2(t.x_corr, defined(d.rec.x), defined(d.truth.x))?;
        f.fill2(t.ln_x_corr, d.rec.ln_x, d.truth.ln_x)?;
        if f.dropped > 0 {
            tracing::trace!(dropped = f.dropped, "undefined values not filled");
        }
        Ok(f.dropped)
    }

    /// Process `events` one at a time on the current thread.
    pub fn run_sequential(&self, events: &[Event]) -> Result<(HistogramRegistry, RunSummary)> {
        let mut reg = self.new_registry();
        let mut summary = RunSummary::default();
        for ev in events {
            self.process_event(ev, &mut reg, &mut summary)?;
        }
        Ok((reg, summary))
    }

    /// Process `events` with rayon, one private registry per task, merged at the end.
    ///
    /// `threads == 0` uses the global rayon pool.
    pub fn run_parallel(
        &self,
        events: &[Event],
        threads: usize,
    ) -> Result<(HistogramRegistry, RunSummary)> {
        let run = || -> Result<(HistogramRegistry, RunSummary)> {
            events
                .par_iter()
                .try_fold(
                    || (self.new_registry(), RunSummary::default()),
                    |(mut reg, mut summary), ev| -> Result<(HistogramRegistry, RunSummary)> {
                        self.process_event(ev, &mut reg, &mut summary)?;
                        Ok((reg, summary))
                    },
                )
                .try_reduce(
                    || (self.new_registry(), RunSummary::default()),
                    |(mut reg, mut summary),
                     (other_reg, other_summary)|
                     -> Result<(HistogramRegistry, RunSummary)> {
                        reg.merge(&other_reg)?;
                        summary.merge(&other_summary);
                        Ok((reg, summary))
                    },
                )
        };

        if threads > 0 {
            let pool = rayon::ThreadPoolBuilder::new()
                .num_threads(threads)
                .build()
                .map_err(|e| {
                    AnalysisError::ThreadPool(format!("failed to create thread pool: {e}"))
                })?;
            pool.install(run)
        } else {
            run()
        }
    }

    /// Run with the configured thread count (1 = sequential).
    pub fn run(&self, events: &[Event]) -> Result<(HistogramRegistry, RunSummary)> {
        let (reg, summary) = if self.opts.threads == 1 {
            self.run_sequential(events)?
        } else {
            self.run_parallel(events, self.opts.threads)?
        };
        tracing::debug!(
            read = summary.events_read,
            accepted = summary.events_accepted,
            skipped = summary.events_skipped(),
            anomalies = summary.domain_anomalies,
            "events processed"
        );
        Ok((reg, summary))
    }
}
