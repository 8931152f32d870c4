//! Smoothed log-PMF centroids.
//!
//! A centroid here is not a geometric mean: it is, for each dimension, the
//! logarithm of the cluster's empirical category distribution.
//!
//! For a cluster of size `n` and a dimension with `C` valid categories:
//!
//! ```text
//! p[c] = count[c] / n
//! ```
//!
//! If any `p[c]` is zero, the row is smoothed with `ε = 1 / (n + 1)`:
//! observed categories are scaled by `(1 - ε)` and every unobserved category
//! is set to `ε` itself. `ε` is not split between the empty categories, so a
//! row with `e` empty categories sums to `1 - ε + e·ε`. Rows without empty
//! categories are left unsmoothed.
//!
//! Padding columns (`c >= C`) are stored as `0.0` and never read.

use super::stats::CategoryStatistics;
use super::util;

#[cfg(feature = "parallel")]
use rayon::prelude::*;

/// Log-probability matrix of one cluster, `n_dims` rows by `width` columns.
#[derive(Debug, Clone, PartialEq)]
pub struct LogPmf {
    values: Vec<f64>,
    n_dims: usize,
    width: usize,
}

impl LogPmf {
    /// Number of dimensions (rows).
    pub fn n_dims(&self) -> usize {
        self.n_dims
    }

    /// Row width (columns).
    pub fn width(&self) -> usize {
        self.width
    }

    /// `ln P(category c | cluster, dimension d)`.
    #[inline]
    pub fn get(&self, d: usize, c: usize) -> f64 {
        self.values[d * self.width + c]
    }

    /// Full row of dimension `d`, padding included.
    pub fn row(&self, d: usize) -> &[f64] {
        &self.values[d * self.width..(d + 1) * self.width]
    }

    /// Joint log-likelihood of a multi-index under attribute independence.
    #[inline]
    pub fn log_likelihood(&self, multi_index: &[usize]) -> f64 {
        util::indexed_sum(&self.values, self.width, multi_index)
    }
}

/// Result of a centroid pass.
#[derive(Debug, Clone, PartialEq)]
pub enum CentroidOutcome {
    /// One matrix per cluster, indexed by cluster id.
    Ready(Vec<LogPmf>),
    /// A cluster had no members; no centroids were produced.
    ///
    /// Assignment must not run on this iteration. The usual repair is a
    /// random swap with this cluster as the victim.
    Degenerate {
        /// Lowest-indexed empty cluster.
        cluster: usize,
    },
}

impl CentroidOutcome {
    /// Whether centroids are available.
    pub fn is_ready(&self) -> bool {
        matches!(self, CentroidOutcome::Ready(_))
    }
}

/// Compute every cluster's smoothed log-PMF matrix from current statistics.
pub fn compute_centroids(stats: &CategoryStatistics) -> CentroidOutcome {
    if let Some(cluster) = (0..stats.n_clusters()).find(|&k| stats.size(k) == 0) {
        tracing::warn!(cluster, "cluster has no members, centroids unavailable");
        return CentroidOutcome::Degenerate { cluster };
    }

    #[cfg(feature = "parallel")]
    let matrices = (0..stats.n_clusters())
        .into_par_iter()
        .map(|k| cluster_log_pmf(stats, k))
        .collect();

    #[cfg(not(feature = "parallel"))]
    let matrices = (0..stats.n_clusters())
        .map(|k| cluster_log_pmf(stats, k))
        .collect();

    CentroidOutcome::Ready(matrices)
}

fn cluster_log_pmf(stats: &CategoryStatistics, k: usize) -> LogPmf {
    let width = stats.width();
    let n_dims = stats.n_dims();
    let size = stats.size(k) as f64;
    let counts = stats.counts(k);
    let mut values = vec![0.0; n_dims * width];

    for (d, &n_cat) in stats.n_categories().iter().enumerate() {
        let row_counts = &counts[d * width..d * width + n_cat];
        let row = &mut values[d * width..d * width + n_cat];

        if row_counts.contains(&0) {
            let epsilon = 1.0 / (size + 1.0);
            for (p, &n) in row.iter_mut().zip(row_counts) {
                *p = if n == 0 {
                    epsilon
                } else {
                    f64::from(n) / size * (1.0 - epsilon)
                };
            }
        } else {
            for (p, &n) in row.iter_mut().zip(row_counts) {
                *p = f64::from(n) / size;
            }
        }

        for p in row.iter_mut() {
            *p = p.ln();
        }
    }

    LogPmf {
        values,
        n_dims,
        width,
    }
}
