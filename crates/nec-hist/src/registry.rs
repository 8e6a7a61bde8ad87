//! Name-keyed histogram registry.
//!
//! Histograms are declared once, before any event is processed. Callers then
//! [`resolve`](HistogramRegistry::resolve) every name they intend to fill into
//! a [`HistId`] up front, so a typo in a histogram name fails at startup
//! instead of silently dropping fills.

use std::collections::BTreeMap;

use crate::axis::Axis;
use crate::error::{HistError, Result};
use crate::histogram::{Hist1D, Hist2D, Histogram};

/// Resolved handle into a [`HistogramRegistry`].
///
/// Stays valid for every registry derived from the one it was resolved on via
/// [`HistogramRegistry::empty_like`] or `clone`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct HistId(usize);

/// Ordered collection of uniquely named histograms.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct HistogramRegistry {
    hists: Vec<Histogram>,
    index: BTreeMap<String, usize>,
}

impl HistogramRegistry {
    /// Empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    fn insert(&mut self, hist: Histogram) -> Result<HistId> {
        let name = hist.name().to_string();
        if self.index.contains_key(&name) {
            return Err(HistError::DuplicateHistogram(name));
        }
        let id = self.hists.len();
        self.hists.push(hist);
        self.index.insert(name, id);
        Ok(HistId(id))
    }

    /// Declare a 1D histogram.
    pub fn declare_1d(&mut self, name: &str, title: &str, axis: &Axis) -> Result<HistId> {
        axis.validate()?;
        tracing::trace!(name, bins = axis.n_bins, "declare 1D histogram");
        self.insert(Histogram::H1(Hist1D::new(name, title, axis)))
    }

    /// Declare a 2D histogram.
    pub fn declare_2d(
        &mut self,
        name: &str,
        title: &str,
        x_axis: &Axis,
        y_axis: &Axis,
    ) -> Result<HistId> {
        x_axis.validate()?;
        y_axis.validate()?;
        tracing::trace!(name, nx = x_axis.n_bins, ny = y_axis.n_bins, "declare 2D histogram");
        self.insert(Histogram::H2(Hist2D::new(name, title, x_axis, y_axis)))
    }

    /// Handle for a declared name.
    pub fn resolve(&self, name: &str) -> Result<HistId> {
        self.index
            .get(name)
            .map(|&i| HistId(i))
            .ok_or_else(|| HistError::UnknownHistogram(name.to_string()))
    }

    /// Histogram by name.
    pub fn get(&self, name: &str) -> Option<&Histogram> {
        self.index.get(name).map(|&i| &self.hists[i])
    }

    /// Histogram by handle.
    pub fn get_by_id(&self, id: HistId) -> Option<&Histogram> {
        self.hists.get(id.0)
    }

    fn slot(&mut self, id: HistId) -> Result<&mut Histogram> {
        self.hists
            .get_mut(id.0)
            .ok_or_else(|| HistError::UnknownHistogram(format!("<id {}>", id.0)))
    }

    /// Unit-weight 1D fill.
    pub fn fill(&mut self, id: HistId, val: f64) -> Result<()> {
        self.slot(id)?.fill_weighted(val, 1.0)
    }

    /// Weighted 1D fill.
    pub fn fill_weighted(&mut self, id: HistId, val: f64, weight: f64) -> Result<()> {
        self.slot(id)?.fill_weighted(val, weight)
    }

    /// Unit-weight 2D fill.
    pub fn fill2(&mut self, id: HistId, x: f64, y: f64) -> Result<()> {
        self.slot(id)?.fill2_weighted(x, y, 1.0)
    }

    /// Weighted 2D fill.
    pub fn fill2_weighted(&mut self, id: HistId, x: f64, y: f64, weight: f64) -> Result<()> {
        self.slot(id)?.fill2_weighted(x, y, weight)
    }

    /// Same declarations, all contents zero. Handles remain valid.
    pub fn empty_like(&self) -> Self {
        Self {
            hists: self.hists.iter().map(Histogram::empty_like).collect(),
            index: self.index.clone(),
        }
    }

    /// Add every histogram of `other` into the same-named histogram of `self`.
    ///
    /// Both registries must hold exactly the same declarations.
    pub fn merge(&mut self, other: &HistogramRegistry) -> Result<()> {
        if self.index != other.index {
            return Err(HistError::BinningMismatch(
                "registries declare different histograms".to_string(),
            ));
        }
        for (dst, src) in self.hists.iter_mut().zip(&other.hists) {
            dst.merge(src)?;
        }
        Ok(())
    }

    /// Number of declared histograms.
    pub fn len(&self) -> usize {
        self.hists.len()
    }

    /// No histograms declared.
    pub fn is_empty(&self) -> bool {
        self.hists.is_empty()
    }

    /// Histograms in declaration order.
    pub fn iter(&self) -> impl Iterator<Item = &Histogram> {
        self.hists.iter()
    }

    /// Consume into histograms in declaration order.
    pub fn into_histograms(self) -> Vec<Histogram> {
        self.hists
    }

    /// Sum of entries over all histograms.
    pub fn total_entries(&self) -> u64 {
        self.hists.iter().map(Histogram::entries).sum()
    }
}
