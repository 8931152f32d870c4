//! Random swap perturbation.
//!
//! A swap picks a *prototype* point and reseeds a *victim* cluster as a
//! singleton holding only the prototype's profile:
//!
//! 1. The prototype's contribution is removed from its previous cluster.
//! 2. The victim's statistics are overwritten wholesale by the singleton.
//! 3. Every former member of the victim becomes unassigned.
//! 4. The prototype is assigned to the victim.
//!
//! Former victim members are orphaned, not merged elsewhere; the next
//! assignment pass places them. Swaps repair empty clusters and also serve as
//! a diversification move out of local optima.

use super::dataset::CategoricalDataset;
use super::stats::ClusterState;
use crate::error::{Error, Result};
use rand::prelude::*;

/// What a swap did.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Swap {
    /// Point whose profile seeds the victim.
    pub prototype: usize,
    /// Cluster the prototype left (`None` if it was orphaned).
    pub previous_cluster: Option<usize>,
    /// Cluster that was reseeded.
    pub victim: usize,
    /// Number of former victim members left unassigned (prototype excluded).
    pub orphaned: usize,
}

/// Reseed `victim` (or a random cluster) from `prototype` (or a random point).
///
/// When `prototype` is `None` a non-empty cluster is drawn uniformly, then one
/// of its members uniformly. When `victim` is `None` it is drawn uniformly
/// among clusters other than the prototype's current one.
///
/// # Errors
///
/// - [`Error::NoMembers`] if a prototype must be drawn but every cluster is empty.
/// - [`Error::InvalidParameter`] for out-of-range indices, or if a victim must be
///   drawn and there is no other cluster to draw from.
pub fn random_swap<R: Rng + ?Sized>(
    state: &mut ClusterState,
    data: &CategoricalDataset,
    rng: &mut R,
    victim: Option<usize>,
    prototype: Option<usize>,
) -> Result<Swap> {
    let n_clusters = state.n_clusters();

    let prototype = match prototype {
        Some(p) if p >= data.n_points() => {
            return Err(Error::InvalidParameter {
                name: "prototype_index",
                message: "out of range",
            })
        }
        Some(p) => p,
        None => draw_prototype(state, rng)?,
    };
    let previous_cluster = state.assignments[prototype];

    let victim = match victim {
        Some(v) if v >= n_clusters => {
            return Err(Error::InvalidParameter {
                name: "victim_cluster",
                message: "out of range",
            })
        }
        Some(v) => v,
        None => {
            let candidates: Vec<usize> = (0..n_clusters)
                .filter(|&k| Some(k) != previous_cluster)
                .collect();
            *candidates.choose(rng).ok_or(Error::InvalidParameter {
                name: "victim_cluster",
                message: "needs a cluster other than the prototype's",
            })?
        }
    };

    let multi_index = data.multi_index(prototype);
    if let Some(prev) = previous_cluster {
        state.stats.remove(multi_index, prev)?;
    }
    state.stats.reset_to_singleton(victim, multi_index);

    let mut orphaned = 0;
    for (i, a) in state.assignments.iter_mut().enumerate() {
        if *a == Some(victim) {
            *a = None;
            if i != prototype {
                orphaned += 1;
            }
        }
    }
    state.assignments[prototype] = Some(victim);

    debug_assert!(state.stats.check_consistency().is_ok());
    tracing::debug!(
        prototype,
        ?previous_cluster,
        victim,
        orphaned,
        "random swap"
    );

    Ok(Swap {
        prototype,
        previous_cluster,
        victim,
        orphaned,
    })
}

fn draw_prototype<R: Rng + ?Sized>(state: &ClusterState, rng: &mut R) -> Result<usize> {
    let non_empty: Vec<usize> = (0..state.n_clusters())
        .filter(|&k| state.assignments.contains(&Some(k)))
        .collect();
    let cluster = *non_empty.choose(rng).ok_or(Error::NoMembers)?;
    let members = state.members(cluster);
    members.choose(rng).copied().ok_or(Error::NoMembers)
}
