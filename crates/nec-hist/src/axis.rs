//! Uniform axis binning.

use serde::{Deserialize, Serialize};

use crate::error::{HistError, Result};

/// Uniform binning: `n_bins` equal-width bins over `[low, high)`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Axis {
    /// Axis title (ROOT-style LaTeX markup allowed).
    pub title: String,
    /// Number of bins (excluding under/overflow).
    pub n_bins: usize,
    /// Lower edge of the first bin.
    pub low: f64,
    /// Upper edge of the last bin.
    pub high: f64,
}

/// Where a value lands on an axis.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BinLookup {
    /// Below `low` (including `-inf`).
    Underflow,
    /// In-range bin index.
    Bin(usize),
    /// At or above `high` (including `+inf`).
    Overflow,
    /// NaN: belongs nowhere.
    Undefined,
}

impl Axis {
    /// Create a validated axis.
    pub fn new(title: impl Into<String>, n_bins: usize, low: f64, high: f64) -> Result<Self> {
        let axis = Self { title: title.into(), n_bins, low, high };
        axis.validate()?;
        Ok(axis)
    }

    /// Check bin count and edges.
    pub fn validate(&self) -> Result<()> {
        let reason = if self.n_bins == 0 {
            Some("n_bins must be > 0".to_string())
        } else if !self.low.is_finite() || !self.high.is_finite() {
            Some(format!("edges must be finite (low={}, high={})", self.low, self.high))
        } else if self.low >= self.high {
            Some(format!("low must be < high (low={}, high={})", self.low, self.high))
        } else {
            None
        };
        match reason {
            Some(reason) => Err(HistError::InvalidAxis { title: self.title.clone(), reason }),
            None => Ok(()),
        }
    }

    /// Bin width.
    pub fn width(&self) -> f64 {
        (self.high - self.low) / self.n_bins as f64
    }

    /// Bin edges (length = n_bins + 1).
    pub fn edges(&self) -> Vec<f64> {
        let w = self.width();
        (0..=self.n_bins)
            .map(|i| if i == self.n_bins { self.high } else { self.low + w * i as f64 })
            .collect()
    }

    /// Bin centres (length = n_bins).
    pub fn centers(&self) -> Vec<f64> {
        let w = self.width();
        (0..self.n_bins).map(|i| self.low + w * (i as f64 + 0.5)).collect()
    }

    /// Locate `val`: lower edge inclusive, upper edge exclusive.
    pub fn find_bin(&self, val: f64) -> BinLookup {
        if val.is_nan() {
            return BinLookup::Undefined;
        }
        if val < self.low {
            return BinLookup::Underflow;
        }
        if val >= self.high {
            return BinLookup::Overflow;
        }
        let idx = ((val - self.low) / self.width()).floor() as usize;
        // guard against rounding just below `high`
        BinLookup::Bin(idx.min(self.n_bins - 1))
    }

    /// Same binning (title is ignored).
    pub fn same_binning(&self, other: &Axis) -> bool {
        self.n_bins == other.n_bins && self.low == other.low && self.high == other.high
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn find_bin_edge_cases() {
        let a = Axis::new("x", 3, 0.0, 3.0).unwrap();
        assert_eq!(a.find_bin(-0.5), BinLookup::Underflow);
        assert_eq!(a.find_bin(3.0), BinLookup::Overflow);
        assert_eq!(a.find_bin(0.0), BinLookup::Bin(0));
        assert_eq!(a.find_bin(1.0), BinLookup::Bin(1));
        assert_eq!(a.find_bin(2.99), BinLookup::Bin(2));
        assert_eq!(a.find_bin(f64::NEG_INFINITY), BinLookup::Underflow);
        assert_eq!(a.find_bin(f64::INFINITY), BinLookup::Overflow);
        assert_eq!(a.find_bin(f64::NAN), BinLookup::Undefined);
    }

    #[test]
    fn find_bin_negative_range() {
        let a = Axis::new("rap", 200, -15.0, 5.0).unwrap();
        assert_eq!(a.find_bin(-15.0), BinLookup::Bin(0));
        assert_eq!(a.find_bin(0.0), BinLookup::Bin(150));
        assert_eq!(a.find_bin(4.999_999), BinLookup::Bin(199));
    }

    #[test]
    fn edges_and_centers() {
        let a = Axis::new("x", 4, -1.0, 1.0).unwrap();
        assert_eq!(a.edges(), vec![-1.0, -0.5, 0.0, 0.5, 1.0]);
        assert_eq!(a.centers(), vec![-0.75, -0.25, 0.25, 0.75]);
    }

    #[test]
    fn invalid_axes_rejected() {
        assert!(Axis::new("a", 0, 0.0, 1.0).is_err());
        assert!(Axis::new("a", 10, 1.0, 1.0).is_err());
        assert!(Axis::new("a", 10, 0.0, f64::INFINITY).is_err());
        let err = Axis::new("a", 10, 2.0, 1.0).unwrap_err();
        assert!(err.to_string().contains("low must be < high"));
    }
}
