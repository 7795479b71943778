//! Descending frequency counts and dataset loading.

use std::fs;
use std::path::Path;

use rand::Rng;
use rand_distr::{Distribution, Zipf};
use tracing::debug;

use crate::error::{AccuracyError, Result};

/// Per-item counts sorted in descending order.
///
/// Prefix sums are cached at construction so any rank window can be summed
/// in constant time. They are held as `u128`, which cannot overflow for any
/// sequence of `u64` counts that fits in memory.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ScoreSequence {
    counts: Vec<u64>,
    prefix: Vec<u128>,
}

impl ScoreSequence {
    /// Build a sequence from raw counts, sorting them descending.
    pub fn from_counts(mut counts: Vec<u64>) -> Self {
        counts.sort_unstable_by(|a, b| b.cmp(a));
        let mut prefix = Vec::with_capacity(counts.len() + 1);
        prefix.push(0u128);
        let mut acc = 0u128;
        for &count in &counts {
            acc += u128::from(count);
            prefix.push(acc);
        }
        Self { counts, prefix }
    }

    /// Parse whitespace or line separated non-negative integers.
    ///
    /// Blank lines are skipped and `#` starts a comment that runs to the end
    /// of the line.
    pub fn parse(text: &str) -> Result<Self> {
        let mut counts = Vec::new();
        for (line_no, line) in text.lines().enumerate() {
            let content = line.split('#').next().unwrap_or("");
            for token in content.split_whitespace() {
                let value = token.parse::<u64>().map_err(|e| {
                    AccuracyError::dataset(format!(
                        "line {}: invalid count {token:?}: {e}",
                        line_no + 1
                    ))
                })?;
                counts.push(value);
            }
        }
        Ok(Self::from_counts(counts))
    }

    /// Load counts from a file.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let text = fs::read_to_string(path).map_err(|e| {
            AccuracyError::dataset(format!("failed reading {}: {e}", path.display()))
        })?;
        let scores = Self::parse(&text)?;
        debug!(path = %path.display(), items = scores.len(), "loaded score sequence");
        Ok(scores)
    }

    /// Number of items (`k`).
    pub fn len(&self) -> usize {
        self.counts.len()
    }

    /// Whether the sequence has no items.
    pub fn is_empty(&self) -> bool {
        self.counts.is_empty()
    }

    /// Counts in descending order.
    pub fn as_slice(&self) -> &[u64] {
        &self.counts
    }

    /// Count at 1-based rank `rank` (rank 1 is the largest).
    pub fn rank(&self, rank: usize) -> Option<u64> {
        rank.checked_sub(1).and_then(|i| self.counts.get(i).copied())
    }

    /// Sum of the counts at 0-based positions `start..end`.
    ///
    /// Bounds are clamped to the sequence length.
    pub fn window_sum(&self, start: usize, end: usize) -> u128 {
        let end = end.min(self.counts.len());
        let start = start.min(end);
        self.prefix[end] - self.prefix[start]
    }

    /// Sum of the `c` largest counts.
    pub fn top_sum(&self, c: usize) -> u128 {
        self.window_sum(0, c)
    }

    /// Number of counts that are at least `cutoff`.
    ///
    /// The sequence is descending, so these form a prefix.
    pub fn count_at_least(&self, cutoff: f64) -> usize {
        self.counts.partition_point(|&s| s as f64 >= cutoff)
    }
}

/// Draw `n` synthetic item counts following a Zipf law.
///
/// Item `i` receives `scale / rank^exponent` where ranks are sampled from
/// `Zipf(n, exponent)`, which yields the long-tailed shape of click-stream
/// datasets. Returned counts are unsorted.
pub fn synthetic_zipf_counts<R: Rng>(
    rng: &mut R,
    n: usize,
    exponent: f64,
    scale: u64,
) -> Result<Vec<u64>> {
    if n == 0 {
        return Ok(Vec::new());
    }
    let dist = Zipf::new(n as u64, exponent)
        .map_err(|e| AccuracyError::invalid(format!("invalid zipf parameters: {e}")))?;
    let counts = (0..n)
        .map(|_| {
            let rank: f64 = dist.sample(rng);
            (scale as f64 / rank.powf(exponent)).round() as u64
        })
        .collect();
    Ok(counts)
}
