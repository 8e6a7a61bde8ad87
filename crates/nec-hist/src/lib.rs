//! # nec-hist
//!
//! Histogram accumulation for NEC analysis.
//!
//! Fixed-binning 1D/2D histograms carrying per-bin sum of weights and sum of
//! weights squared, a name-keyed [`HistogramRegistry`] with startup-time name
//! resolution, and a JSON artifact format for persisting a finished run.
//!
//! ## Example
//!
//! ```
//! use nec_hist::{Axis, HistogramRegistry};
//!
//! let mut reg = HistogramRegistry::new();
//! let ene = Axis::new("E [GeV]", 200, 0.0, 200.0).unwrap();
//! reg.declare_1d("hEneParRec", "", &ene).unwrap();
//! let id = reg.resolve("hEneParRec").unwrap();
//! reg.fill(id, 12.5).unwrap();
//! assert_eq!(reg.get("hEneParRec").unwrap().entries(), 1);
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod artifact;
pub mod axis;
pub mod error;
pub mod histogram;
pub mod registry;

pub use artifact::{
    ARTIFACT_SCHEMA_VERSION, ArtifactMeta, HistogramArtifact, PendingArtifact, read_artifact,
    write_artifact,
};
pub use axis::{Axis, BinLookup};
pub use error::{HistError, Result};
pub use histogram::{Hist1D, Hist2D, Histogram};
pub use registry::{HistId, HistogramRegistry};
