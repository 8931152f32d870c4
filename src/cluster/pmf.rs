//! Iterative PMF clustering for categorical data.
//!
//! Each cluster is modelled as a product of independent per-dimension
//! categorical distributions. One iteration is:
//!
//! 1. compute smoothed log-PMF centroids from the cluster statistics;
//! 2. move every point to the cluster that maximizes its log-likelihood.
//!
//! Iteration stops when no point moves or `max_iter` is reached. If a
//! cluster runs empty, it is reseeded with a random swap before the next
//! iteration.
//!
//! ## Random swap search
//!
//! A converged partition is only a local optimum. With
//! [`CategoricalPmf::with_random_swaps`] the controller then tries that many
//! random swaps: each one perturbs the partition, iterates to convergence
//! again, and is kept only if the overall impurity strictly decreases.

use super::assignment::assign;
use super::centroid::{compute_centroids, CentroidOutcome};
use super::dataset::CategoricalDataset;
use super::stats::ClusterState;
use super::swap::random_swap;
use super::traits::CategoricalClustering;
use crate::error::{Error, Result};
use rand::prelude::*;

/// PMF clustering for categorical data.
#[derive(Debug, Clone)]
pub struct CategoricalPmf {
    /// Number of clusters.
    k: usize,
    /// Maximum iterations per convergence run.
    max_iter: usize,
    /// Random swaps attempted after the first convergence.
    random_swaps: usize,
    /// Random seed.
    seed: Option<u64>,
}

/// Result of [`CategoricalPmf::fit`].
#[derive(Debug, Clone)]
pub struct PmfFit {
    /// Cluster label per point.
    pub labels: Vec<usize>,
    /// Iterations run, summed over all convergence runs.
    pub n_iter: usize,
    /// Whether the kept partition reached a fixed point.
    pub converged: bool,
    /// Overall impurity of the kept partition.
    pub impurity: f64,
    /// Empty clusters reseeded during the kept runs.
    pub repairs: usize,
    /// Random swaps that lowered the impurity.
    pub swaps_accepted: usize,
}

#[derive(Debug, Default, Clone, Copy)]
struct Progress {
    n_iter: usize,
    converged: bool,
    repairs: usize,
}

impl CategoricalPmf {
    /// Create a new clusterer with `k` clusters.
    pub fn new(k: usize) -> Self {
        Self {
            k,
            max_iter: 100,
            random_swaps: 0,
            seed: None,
        }
    }

    /// Set maximum iterations per convergence run.
    pub fn with_max_iter(mut self, max_iter: usize) -> Self {
        self.max_iter = max_iter;
        self
    }

    /// Set the number of random swaps tried after convergence.
    pub fn with_random_swaps(mut self, random_swaps: usize) -> Self {
        self.random_swaps = random_swaps;
        self
    }

    /// Set random seed for reproducibility.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Fit on `data`, returning labels and run diagnostics.
    pub fn fit(&self, data: &CategoricalDataset) -> Result<PmfFit> {
        let n = data.n_points();
        if n == 0 {
            return Err(Error::EmptyInput);
        }
        if self.k == 0 || self.k > n {
            return Err(Error::InvalidClusterCount {
                requested: self.k,
                n_items: n,
            });
        }
        if self.max_iter == 0 {
            return Err(Error::InvalidParameter {
                name: "max_iter",
                message: "must be at least 1",
            });
        }

        let mut rng: Box<dyn RngCore> = match self.seed {
            Some(s) => Box::new(StdRng::seed_from_u64(s)),
            None => Box::new(rand::rng()),
        };

        let mut state = ClusterState::random(data, self.k, &mut rng)?;
        let mut progress = self.converge(&mut state, data, &mut rng)?;
        let mut n_iter = progress.n_iter;
        let mut impurity = state.stats.overall_impurity();
        let mut swaps_accepted = 0;

        // A swap needs a victim other than the prototype's cluster.
        let attempts = if self.k > 1 { self.random_swaps } else { 0 };
        for attempt in 0..attempts {
            let snapshot = state.clone();
            random_swap(&mut state, data, &mut rng, None, None)?;
            let trial = self.converge(&mut state, data, &mut rng)?;
            n_iter += trial.n_iter;

            let trial_impurity = state.stats.overall_impurity();
            if state.unassigned() == 0 && trial_impurity < impurity {
                tracing::debug!(attempt, impurity, trial_impurity, "swap accepted");
                impurity = trial_impurity;
                progress = trial;
                swaps_accepted += 1;
            } else {
                tracing::trace!(attempt, impurity, trial_impurity, "swap rejected");
                state = snapshot;
            }
        }

        let labels = state.labels().ok_or(Error::Unsettled {
            unassigned: state.unassigned(),
        })?;

        Ok(PmfFit {
            labels,
            n_iter,
            converged: progress.converged,
            impurity,
            repairs: progress.repairs,
            swaps_accepted,
        })
    }

    /// Alternate centroid and assignment passes until no point moves.
    fn converge<R: Rng + ?Sized>(
        &self,
        state: &mut ClusterState,
        data: &CategoricalDataset,
        rng: &mut R,
    ) -> Result<Progress> {
        let mut progress = Progress::default();

        for iter in 0..self.max_iter {
            progress.n_iter = iter + 1;
            match compute_centroids(&state.stats) {
                CentroidOutcome::Degenerate { cluster } => {
                    random_swap(state, data, rng, Some(cluster), None)?;
                    progress.repairs += 1;
                }
                CentroidOutcome::Ready(centroids) => {
                    let movements = assign(state, data, &centroids)?;
                    tracing::debug!(iteration = iter, movements, "iteration");
                    if movements == 0 {
                        progress.converged = true;
                        break;
                    }
                }
            }
        }

        if progress.converged {
            tracing::debug!(iterations = progress.n_iter, "converged");
        }
        Ok(progress)
    }
}

impl CategoricalClustering for CategoricalPmf {
    fn fit_predict(&self, data: &CategoricalDataset) -> Result<Vec<usize>> {
        Ok(self.fit(data)?.labels)
    }

    fn n_clusters(&self) -> usize {
        self.k
    }
}
