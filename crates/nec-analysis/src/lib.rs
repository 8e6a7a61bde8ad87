//! # nec-analysis
//!
//! Nucleon Energy Correlator histogramming pipeline.
//!
//! Each event goes through four stages, strictly in order:
//!
//! 1. availability gate: every required collection must be non-empty;
//! 2. kinematic derivation: Q², x, their logs, and per-particle energy,
//!    polar angle, rapidity and energy-fraction weight for the reconstructed
//!    and generated views;
//! 3. selection gate: `min_q2 < Q²_rec < max_q2`;
//! 4. accumulation into the fixed histogram set of [`catalogue`].
//!
//! ## Example
//!
//! ```
//! use nec_analysis::{AnalysisOptions, NecAnalysis};
//! use nec_core::{Event, InclusiveKinematics, Particle, Vector3};
//!
//! let opts = AnalysisOptions::default();
//! let analysis = NecAnalysis::new(&opts).unwrap();
//! let kin = vec![InclusiveKinematics::new(25.0, 0.1)];
//! let parts = vec![Particle::new(10.0, Vector3::new(3.0, 0.0, 4.0))];
//! let ev = Event::new()
//!     .with_kinematics(&opts.rec_kinematics, kin.clone())
//!     .with_kinematics(&opts.gen_kinematics, kin)
//!     .with_particles(&opts.rec_particles, parts.clone())
//!     .with_particles(&opts.gen_particles, parts);
//! let (hists, summary) = analysis.run_sequential(&[ev]).unwrap();
//! assert_eq!(summary.events_accepted, 1);
//! assert_eq!(hists.get("hQ2Rec").unwrap().entries(), 1);
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod catalogue;
pub mod derive;
pub mod error;
pub mod options;
pub mod pipeline;
pub mod summary;

pub use catalogue::{AxisCatalogue, HistogramDef, View, build_registry, histogram_defs};
pub use derive::{DerivedEvent, DerivedView, ParticleQuantities, derive_event, derive_view};
pub use error::{AnalysisError, Result};
pub use options::AnalysisOptions;
pub use pipeline::NecAnalysis;
pub use summary::{EventOutcome, RunSummary};
