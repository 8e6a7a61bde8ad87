//! Binning and the fixed histogram set of the NEC analysis.
//!
//! Axes are defined once per physical quantity and shared by every histogram
//! of that quantity. Histogram names are `h<Quantity><View>`, e.g. `hQ2Rec`,
//! `hNECVsRapGen`, plus the rec-vs-gen correlations `h<Quantity>RecVsGen`.

use std::collections::BTreeMap;

use nec_hist::{Axis, HistError, HistogramRegistry};

use crate::error::Result;

/// Reconstructed or generated view of an event.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum View {
    /// Detector-level reconstruction.
    Rec,
    /// Simulation truth.
    Gen,
}

impl View {
    /// Both views, reconstructed first.
    pub const ALL: [View; 2] = [View::Rec, View::Gen];

    /// Name suffix (`Rec` / `Gen`).
    pub fn suffix(self) -> &'static str {
        match self {
            View::Rec => "Rec",
            View::Gen => "Gen",
        }
    }
}

/// Axis keys.
pub mod axes {
    /// Particle energy.
    pub const ENE: &str = "ene";
    /// Polar angle.
    pub const ANG: &str = "ang";
    /// ln tan(theta/2).
    pub const RAP: &str = "rap";
    /// Energy-fraction weight.
    pub const WEIGHT: &str = "weight";
    /// Bjorken x.
    pub const X: &str = "x";
    /// ln x.
    pub const LNX: &str = "lnx";
    /// Q².
    pub const Q2: &str = "q2";
    /// ln Q².
    pub const LNQ2: &str = "lnq2";
}

/// Named set of shared axes.
#[derive(Debug, Clone, PartialEq)]
pub struct AxisCatalogue {
    axes: BTreeMap<&'static str, Axis>,
}

impl AxisCatalogue {
    /// The analysis binning.
    pub fn standard() -> Result<Self> {
        let defs: [(&'static str, &str, usize, f64, f64); 8] = [
            (axes::ENE, "E [GeV]", 200, 0.0, 200.0),
            (axes::ANG, "#theta [rad]", 160, 0.0, 3.2),
            (axes::RAP, "y = ln tan(#theta/2)", 200, -15.0, 5.0),
            (axes::WEIGHT, "E/E_{p}", 30, -1.0, 2.0),
            (axes::X, "x_{B}", 60, -1.0, 2.0),
            (axes::LNX, "ln x_{B}", 100, -50.0, 50.0),
            (axes::Q2, "Q^{2} [GeV^{2}]", 200, 0.0, 200.0),
            (axes::LNQ2, "ln Q^{2}", 100, -10.0, 10.0),
        ];
        let mut axes = BTreeMap::new();
        for (key, title, n, lo, hi) in defs {
            axes.insert(key, Axis::new(title, n, lo, hi)?);
        }
        Ok(Self { axes })
    }

    /// Axis by key.
    pub fn get(&self, key: &str) -> Result<&Axis> {
        self.axes.get(key).ok_or_else(|| {
            HistError::InvalidAxis { title: key.to_string(), reason: "no such axis".into() }.into()
        })
    }

    /// Keys in sorted order.
    pub fn keys(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.axes.keys().copied()
    }
}

/// One histogram declaration.
#[derive(Debug, Clone, PartialEq)]
pub enum HistogramDef {
    /// 1D histogram over one catalogue axis.
    OneD {
        /// Unique name.
        name: String,
        /// Overall title.
        title: String,
        /// Catalogue key of the x axis.
        axis: &'static str,
        /// Y-axis label.
        ytitle: String,
    },
    /// 2D histogram over two catalogue axes.
    TwoD {
        /// Unique name.
        name: String,
        /// Overall title.
        title: String,
        /// Catalogue key of the x axis.
        x_axis: &'static str,
        /// Catalogue key of the y axis.
        y_axis: &'static str,
    },
}

impl HistogramDef {
    /// Declared name.
    pub fn name(&self) -> &str {
        match self {
            HistogramDef::OneD { name, .. } | HistogramDef::TwoD { name, .. } => name,
        }
    }
}

/// `"title;xtitle;ytitle"`.
pub fn make_title(title: &str, xtitle: &str, ytitle: &str) -> String {
    format!("{title};{xtitle};{ytitle}")
}

/// Per-view histogram names.
pub(crate) mod names {
    use super::View;

    pub fn q2(v: View) -> String {
        format!("hQ2{}", v.suffix())
    }
    pub fn ln_q2(v: View) -> String {
        format!("hLogQ2{}", v.suffix())
    }
    pub fn x(v: View) -> String {
        format!("hXB{}", v.suffix())
    }
    pub fn ln_x(v: View) -> String {
        format!("hLogXB{}", v.suffix())
    }
    pub fn energy(v: View) -> String {
        format!("hEnePar{}", v.suffix())
    }
    pub fn angle(v: View) -> String {
        format!("hAngPar{}", v.suffix())
    }
    pub fn rapidity(v: View) -> String {
        format!("hRapPar{}", v.suffix())
    }
    pub fn weight(v: View) -> String {
        format!("hEneFrac{}", v.suffix())
    }
    pub fn nec_vs_rap(v: View) -> String {
        format!("hNECVsRap{}", v.suffix())
    }
    pub fn nec_vs_ang(v: View) -> String {
        format!("hNECVsAng{}", v.suffix())
    }

    pub const Q2_CORR: &str = "hQ2RecVsGen";
    pub const LN_Q2_CORR: &str = "hLogQ2RecVsGen";
    pub const X_CORR: &str = "hXBRecVsGen";
    pub const LN_X_CORR: &str = "hLogXBRecVsGen";
}

/// The full histogram set, in declaration order.
pub fn histogram_defs() -> Vec<HistogramDef> {
    let one = |name: String, axis: &'static str, ytitle: &str| HistogramDef::OneD {
        name,
        title: String::new(),
        axis,
        ytitle: ytitle.to_string(),
    };
    let two = |name: &str, axis: &'static str| HistogramDef::TwoD {
        name: name.to_string(),
        title: String::new(),
        x_axis: axis,
        y_axis: axis,
    };

    let mut defs = Vec::with_capacity(24);
    for v in View::ALL {
        defs.push(one(names::q2(v), axes::Q2, "counts"));
        defs.push(one(names::ln_q2(v), axes::LNQ2, "counts"));
        defs.push(one(names::x(v), axes::X, "counts"));
        defs.push(one(names::ln_x(v), axes::LNX, "counts"));
        defs.push(one(names::energy(v), axes::ENE, "counts"));
        defs.push(one(names::angle(v), axes::ANG, "counts"));
        defs.push(one(names::rapidity(v), axes::RAP, "counts"));
        defs.push(one(names::weight(v), axes::WEIGHT, "counts"));
        defs.push(one(names::nec_vs_rap(v), axes::RAP, "#LTNEC#GT"));
        defs.push(one(names::nec_vs_ang(v), axes::ANG, "#LTNEC#GT"));
    }
    defs.push(two(names::Q2_CORR, axes::Q2));
    defs.push(two(names::LN_Q2_CORR, axes::LNQ2));
    defs.push(two(names::X_CORR, axes::X));
    defs.push(two(names::LN_X_CORR, axes::LNX));
    defs
}

/// Declare every definition in a fresh registry.
pub fn build_registry(catalogue: &AxisCatalogue, defs: &[HistogramDef]) -> Result<HistogramRegistry> {
    let mut reg = HistogramRegistry::new();
    for def in defs {
        match def {
            HistogramDef::OneD { name, title, axis, ytitle } => {
                let ax = catalogue.get(axis)?;
                reg.declare_1d(name, &make_title(title, &ax.title, ytitle), ax)?;
            }
            HistogramDef::TwoD { name, title, x_axis, y_axis } => {
                let ax = catalogue.get(x_axis)?;
                let ay = catalogue.get(y_axis)?;
                let xtitle = format!("{} (rec)", ax.title);
                let ytitle = format!("{} (gen)", ay.title);
                reg.declare_2d(name, &make_title(title, &xtitle, &ytitle), ax, ay)?;
            }
        }
    }
    Ok(reg)
}
