//! Weighted 1D and 2D histograms.
//!
//! Every fill adds `w` to the bin's sum of weights and `w^2` to its sum of
//! weights squared (an unweighted fill is `w = 1`). Values outside the axis
//! range, including infinities, go to the flow counters and never to a bin.
//! NaN values are dropped without touching any counter.

use serde::{Deserialize, Serialize};

use crate::axis::{Axis, BinLookup};
use crate::error::{HistError, Result};

/// A 1D histogram with sumw2 bookkeeping.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Hist1D {
    /// Histogram name (unique within a registry).
    pub name: String,
    /// Title in `"title;xtitle;ytitle"` form.
    pub title: String,
    /// Binning.
    pub axis: Axis,
    /// Bin contents (sum of weights per bin).
    pub bin_content: Vec<f64>,
    /// Sum of weights squared per bin.
    pub sumw2: Vec<f64>,
    /// Underflow sum of weights.
    pub underflow: f64,
    /// Overflow sum of weights.
    pub overflow: f64,
    /// Underflow sum of weights squared.
    pub underflow_sumw2: f64,
    /// Overflow sum of weights squared.
    pub overflow_sumw2: f64,
    /// Number of fill calls that landed in a bin or a flow counter.
    pub entries: u64,
}

impl Hist1D {
    /// Empty histogram over `axis`.
    pub fn new(name: impl Into<String>, title: impl Into<String>, axis: &Axis) -> Self {
        let n = axis.n_bins;
        Self {
            name: name.into(),
            title: title.into(),
            axis: axis.clone(),
            bin_content: vec![0.0; n],
            sumw2: vec![0.0; n],
            underflow: 0.0,
            overflow: 0.0,
            underflow_sumw2: 0.0,
            overflow_sumw2: 0.0,
            entries: 0,
        }
    }

    /// Unit-weight fill.
    #[inline]
    pub fn fill(&mut self, val: f64) {
        self.fill_weighted(val, 1.0);
    }

    /// Weighted fill.
    pub fn fill_weighted(&mut self, val: f64, weight: f64) {
        let w2 = weight * weight;
        match self.axis.find_bin(val) {
            BinLookup::Bin(b) => {
                self.bin_content[b] += weight;
                self.sumw2[b] += w2;
            }
            BinLookup::Underflow => {
                self.underflow += weight;
                self.underflow_sumw2 += w2;
            }
            BinLookup::Overflow => {
                self.overflow += weight;
                self.overflow_sumw2 += w2;
            }
            BinLookup::Undefined => return,
        }
        self.entries += 1;
    }

    /// Sum of in-range bin contents.
    pub fn integral(&self) -> f64 {
        self.bin_content.iter().sum()
    }

    /// Statistical error of bin `i` (`sqrt(sumw2)`).
    pub fn bin_error(&self, i: usize) -> f64 {
        self.sumw2[i].sqrt()
    }

    /// Content of the bin containing `val`, if in range.
    pub fn content_at(&self, val: f64) -> Option<f64> {
        match self.axis.find_bin(val) {
            BinLookup::Bin(b) => Some(self.bin_content[b]),
            _ => None,
        }
    }

    /// Same name and binning, zero contents.
    pub fn empty_like(&self) -> Self {
        Self::new(self.name.clone(), self.title.clone(), &self.axis)
    }

    /// Add `other`'s contents into `self`.
    pub fn merge(&mut self, other: &Hist1D) -> Result<()> {
        if self.name != other.name || !self.axis.same_binning(&other.axis) {
            return Err(HistError::BinningMismatch(format!(
                "cannot merge '{}' ({} bins [{}, {})) with '{}' ({} bins [{}, {}))",
                self.name,
                self.axis.n_bins,
                self.axis.low,
                self.axis.high,
                other.name,
                other.axis.n_bins,
                other.axis.low,
                other.axis.high
            )));
        }
        add_into(&mut self.bin_content, &other.bin_content);
        add_into(&mut self.sumw2, &other.sumw2);
        self.underflow += other.underflow;
        self.overflow += other.overflow;
        self.underflow_sumw2 += other.underflow_sumw2;
        self.overflow_sumw2 += other.overflow_sumw2;
        self.entries += other.entries;
        Ok(())
    }
}

/// A 2D histogram with sumw2 bookkeeping.
///
/// Bins are stored row-major by x: bin `(ix, iy)` lives at `ix * ny + iy`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Hist2D {
    /// Histogram name (unique within a registry).
    pub name: String,
    /// Title in `"title;xtitle;ytitle"` form.
    pub title: String,
    /// X binning.
    pub x_axis: Axis,
    /// Y binning.
    pub y_axis: Axis,
    /// Bin contents, `nx * ny`.
    pub bin_content: Vec<f64>,
    /// Sum of weights squared, `nx * ny`.
    pub sumw2: Vec<f64>,
    /// Sum of weights of fills outside the in-range rectangle.
    pub out_of_range: f64,
    /// Sum of weights squared of fills outside the in-range rectangle.
    pub out_of_range_sumw2: f64,
    /// Number of fill calls that were counted (in range or not).
    pub entries: u64,
}

impl Hist2D {
    /// Empty histogram over `x_axis` × `y_axis`.
    pub fn new(
        name: impl Into<String>,
        title: impl Into<String>,
        x_axis: &Axis,
        y_axis: &Axis,
    ) -> Self {
        let n = x_axis.n_bins * y_axis.n_bins;
        Self {
            name: name.into(),
            title: title.into(),
            x_axis: x_axis.clone(),
            y_axis: y_axis.clone(),
            bin_content: vec![0.0; n],
            sumw2: vec![0.0; n],
            out_of_range: 0.0,
            out_of_range_sumw2: 0.0,
            entries: 0,
        }
    }

    #[inline]
    fn index(&self, ix: usize, iy: usize) -> usize {
        ix * self.y_axis.n_bins + iy
    }

    /// Unit-weight fill.
    #[inline]
    pub fn fill(&mut self, x: f64, y: f64) {
        self.fill_weighted(x, y, 1.0);
    }

    /// Weighted fill.
    pub fn fill_weighted(&mut self, x: f64, y: f64, weight: f64) {
        let w2 = weight * weight;
        match (self.x_axis.find_bin(x), self.y_axis.find_bin(y)) {
            (BinLookup::Undefined, _) | (_, BinLookup::Undefined) => return,
            (BinLookup::Bin(ix), BinLookup::Bin(iy)) => {
                let i = self.index(ix, iy);
                self.bin_content[i] += weight;
                self.sumw2[i] += w2;
            }
            _ => {
                self.out_of_range += weight;
                self.out_of_range_sumw2 += w2;
            }
        }
        self.entries += 1;
    }

    /// Content of bin `(ix, iy)`.
    pub fn bin(&self, ix: usize, iy: usize) -> f64 {
        self.bin_content[self.index(ix, iy)]
    }

    /// Sum of in-range bin contents.
    pub fn integral(&self) -> f64 {
        self.bin_content.iter().sum()
    }

    /// Same name and binning, zero contents.
    pub fn empty_like(&self) -> Self {
        Self::new(self.name.clone(), self.title.clone(), &self.x_axis, &self.y_axis)
    }

    /// Add `other`'s contents into `self`.
    pub fn merge(&mut self, other: &Hist2D) -> Result<()> {
        if self.name != other.name
            || !self.x_axis.same_binning(&other.x_axis)
            || !self.y_axis.same_binning(&other.y_axis)
        {
            return Err(HistError::BinningMismatch(format!(
                "cannot merge 2D '{}' with '{}'",
                self.name, other.name
            )));
        }
        add_into(&mut self.bin_content, &other.bin_content);
        add_into(&mut self.sumw2, &other.sumw2);
        self.out_of_range += other.out_of_range;
        self.out_of_range_sumw2 += other.out_of_range_sumw2;
        self.entries += other.entries;
        Ok(())
    }
}

fn add_into(dst: &mut [f64], src: &[f64]) {
    for (d, s) in dst.iter_mut().zip(src) {
        *d += *s;
    }
}

/// Either kind of histogram, as stored in the registry.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind")]
pub enum Histogram {
    /// One-dimensional.
    #[serde(rename = "1d")]
    H1(Hist1D),
    /// Two-dimensional.
    #[serde(rename = "2d")]
    H2(Hist2D),
}

impl Histogram {
    /// Histogram name.
    pub fn name(&self) -> &str {
        match self {
            Histogram::H1(h) => &h.name,
            Histogram::H2(h) => &h.name,
        }
    }

    /// Histogram title.
    pub fn title(&self) -> &str {
        match self {
            Histogram::H1(h) => &h.title,
            Histogram::H2(h) => &h.title,
        }
    }

    /// 1 or 2.
    pub fn dim(&self) -> usize {
        match self {
            Histogram::H1(_) => 1,
            Histogram::H2(_) => 2,
        }
    }

    /// Number of counted fills.
    pub fn entries(&self) -> u64 {
        match self {
            Histogram::H1(h) => h.entries,
            Histogram::H2(h) => h.entries,
        }
    }

    /// Borrow as 1D.
    pub fn as_1d(&self) -> Option<&Hist1D> {
        match self {
            Histogram::H1(h) => Some(h),
            Histogram::H2(_) => None,
        }
    }

    /// Borrow as 2D.
    pub fn as_2d(&self) -> Option<&Hist2D> {
        match self {
            Histogram::H2(h) => Some(h),
            Histogram::H1(_) => None,
        }
    }

    fn mismatch(&self, requested: usize) -> HistError {
        HistError::DimensionMismatch { name: self.name().to_string(), actual: self.dim(), requested }
    }

    /// Weighted 1D fill; errors on a 2D histogram.
    pub fn fill_weighted(&mut self, val: f64, weight: f64) -> Result<()> {
        if let Histogram::H1(h) = self {
            h.fill_weighted(val, weight);
            return Ok(());
        }
        Err(self.mismatch(1))
    }

    /// Weighted 2D fill; errors on a 1D histogram.
    pub fn fill2_weighted(&mut self, x: f64, y: f64, weight: f64) -> Result<()> {
        if let Histogram::H2(h) = self {
            h.fill_weighted(x, y, weight);
            return Ok(());
        }
        Err(self.mismatch(2))
    }

    /// Same name and binning, zero contents.
    pub fn empty_like(&self) -> Self {
        match self {
            Histogram::H1(h) => Histogram::H1(h.empty_like()),
            Histogram::H2(h) => Histogram::H2(h.empty_like()),
        }
    }

    /// Add `other`'s contents into `self`.
    pub fn merge(&mut self, other: &Histogram) -> Result<()> {
        match (self, other) {
            (Histogram::H1(a), Histogram::H1(b)) => a.merge(b),
            (Histogram::H2(a), Histogram::H2(b)) => a.merge(b),
            (a, b) => Err(HistError::BinningMismatch(format!(
                "cannot merge {}D '{}' with {}D '{}'",
                a.dim(),
                a.name(),
                b.dim(),
                b.name()
            ))),
        }
    }
}
