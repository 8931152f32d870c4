//! Maximum-likelihood reassignment.
//!
//! Every point moves to the cluster whose centroid gives its multi-index the
//! highest joint log-likelihood,
//!
//! ```text
//! score(i, k) = Σ_d ln P_k(m_i[d] | d)
//! ```
//!
//! with ties going to the lowest cluster index.
//!
//! The pass runs in two phases. Scoring reads only the centroid snapshot and
//! is parallel under the `parallel` feature. Applying the resulting moves
//! mutates the shared statistics and is always sequential.

use super::centroid::LogPmf;
use super::dataset::CategoricalDataset;
use super::stats::ClusterState;
use super::util;
use crate::error::{Error, Result};

#[cfg(feature = "parallel")]
use rayon::prelude::*;

/// A pending move of one point to a new cluster.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Move {
    /// Point index.
    pub point: usize,
    /// Destination cluster.
    pub to: usize,
}

/// Best cluster for one multi-index under the given centroids.
#[inline]
pub fn best_cluster(centroids: &[LogPmf], multi_index: &[usize]) -> Option<usize> {
    util::argmax_first(centroids.iter().map(|c| c.log_likelihood(multi_index)))
}

/// Score every point and list the ones whose best cluster differs from
/// their current assignment, in point order.
///
/// Pure: neither the state nor the centroids are modified.
pub fn score_assignments(
    state: &ClusterState,
    data: &CategoricalDataset,
    centroids: &[LogPmf],
) -> Vec<Move> {
    let decide = |point: usize| -> Option<Move> {
        let to = best_cluster(centroids, data.multi_index(point))?;
        (state.assignments[point] != Some(to)).then_some(Move { point, to })
    };

    #[cfg(feature = "parallel")]
    let moves = (0..data.n_points()).into_par_iter().filter_map(decide).collect();

    #[cfg(not(feature = "parallel"))]
    let moves = (0..data.n_points()).filter_map(decide).collect();

    moves
}

/// Apply moves to the statistics and assignment vector, one point at a time.
///
/// Orphaned points are only added to their new cluster.
pub fn apply_assignments(
    state: &mut ClusterState,
    data: &CategoricalDataset,
    moves: &[Move],
) -> Result<()> {
    for &Move { point, to } in moves {
        let multi_index = data.multi_index(point);
        if let Some(from) = state.assignments[point] {
            state.stats.remove(multi_index, from)?;
        }
        state.stats.add(multi_index, to);
        state.assignments[point] = Some(to);
    }
    Ok(())
}

/// Reassign every point under `centroids` and return how many points moved.
///
/// `centroids` must hold one freshly computed matrix per cluster. Zero
/// movements means the assignment is a fixed point of these centroids.
pub fn assign(
    state: &mut ClusterState,
    data: &CategoricalDataset,
    centroids: &[LogPmf],
) -> Result<usize> {
    if centroids.len() != state.n_clusters() {
        return Err(Error::DimensionMismatch {
            expected: state.n_clusters(),
            found: centroids.len(),
        });
    }
    if data.n_points() != state.assignments.len() {
        return Err(Error::DimensionMismatch {
            expected: state.assignments.len(),
            found: data.n_points(),
        });
    }

    let moves = score_assignments(state, data, centroids);
    apply_assignments(state, data, &moves)?;

    debug_assert!(state.stats.check_consistency().is_ok());
    tracing::trace!(movements = moves.len(), "assignment pass");
    Ok(moves.len())
}
