//! Discrete probability mass derived from a CDF.

use crate::cdf::Cdf;

/// First differences of `ys`, starting with `ys[0]` itself.
///
/// No normalization is applied.
pub fn derive_pdf(ys: &[f64]) -> Vec<f64> {
    let mut pdf = Vec::with_capacity(ys.len());
    let mut prev = 0.0;
    for &y in ys {
        pdf.push(y - prev);
        prev = y;
    }
    pdf
}

/// Approximate mass `Pr(SER = x)` per CDF bucket.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Pdf {
    /// Bucket positions, shared with the CDF.
    pub xs: Vec<f64>,
    /// Mass attributed to each bucket.
    pub mass: Vec<f64>,
}

impl Pdf {
    /// Derive from a CDF.
    pub fn from_cdf(cdf: &Cdf) -> Self {
        Self {
            xs: cdf.xs(),
            mass: derive_pdf(&cdf.ys()),
        }
    }

    /// Sum of all bucket masses.
    pub fn total_mass(&self) -> f64 {
        self.mass.iter().sum()
    }

    /// Number of buckets.
    pub fn len(&self) -> usize {
        self.mass.len()
    }

    /// Whether there are no buckets.
    pub fn is_empty(&self) -> bool {
        self.mass.is_empty()
    }
}
