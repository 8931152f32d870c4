//! Per-cluster category statistics and the mutable clustering state.
//!
//! For every cluster `k` the store keeps a `(n_dims x max_categories)` count
//! matrix, where `count(k, d, c)` is the number of members whose value in
//! dimension `d` is category `c`, plus the member count `size(k)`.
//!
//! Invariant: for every dimension `d`, `sum_c count(k, d, c) == size(k)`.
//! Columns at or beyond `n_categories[d]` are padding and stay zero.

use super::dataset::CategoricalDataset;
use crate::error::{Error, Result};
use rand::prelude::*;

/// Sufficient statistics for all clusters, packed into one flat buffer.
#[derive(Debug, Clone, PartialEq)]
pub struct CategoryStatistics {
    counts: Vec<u32>,
    sizes: Vec<usize>,
    n_categories: Vec<usize>,
    width: usize,
}

impl CategoryStatistics {
    /// Create empty statistics for `n_clusters` clusters.
    pub fn new(n_clusters: usize, n_categories: &[usize]) -> Self {
        let width = n_categories.iter().copied().max().unwrap_or(0);
        Self {
            counts: vec![0; n_clusters * n_categories.len() * width],
            sizes: vec![0; n_clusters],
            n_categories: n_categories.to_vec(),
            width,
        }
    }

    /// Number of clusters.
    pub fn n_clusters(&self) -> usize {
        self.sizes.len()
    }

    /// Number of attribute dimensions.
    pub fn n_dims(&self) -> usize {
        self.n_categories.len()
    }

    /// Column count of each cluster's matrix.
    pub fn width(&self) -> usize {
        self.width
    }

    /// Valid category counts per dimension.
    pub fn n_categories(&self) -> &[usize] {
        &self.n_categories
    }

    #[inline]
    fn matrix_len(&self) -> usize {
        self.n_dims() * self.width
    }

    #[inline]
    fn matrix_mut(&mut self, k: usize) -> &mut [u32] {
        let len = self.matrix_len();
        &mut self.counts[k * len..(k + 1) * len]
    }

    /// Row-major count matrix of cluster `k` (`n_dims * width` entries).
    pub fn counts(&self, k: usize) -> &[u32] {
        let len = self.matrix_len();
        &self.counts[k * len..(k + 1) * len]
    }

    /// Count of category `c` in dimension `d` of cluster `k`.
    #[inline]
    pub fn count(&self, k: usize, d: usize, c: usize) -> u32 {
        self.counts(k)[d * self.width + c]
    }

    /// Number of points currently assigned to cluster `k`.
    #[inline]
    pub fn size(&self, k: usize) -> usize {
        self.sizes[k]
    }

    /// Add a point's contribution to cluster `k`.
    pub fn add(&mut self, multi_index: &[usize], k: usize) {
        debug_assert_eq!(multi_index.len(), self.n_dims());
        let width = self.width;
        let matrix = self.matrix_mut(k);
        for (d, &c) in multi_index.iter().enumerate() {
            matrix[d * width + c] += 1;
        }
        self.sizes[k] += 1;
    }

    /// Remove a point's contribution from cluster `k`.
    ///
    /// Fails without modifying anything if any affected count would go negative.
    pub fn remove(&mut self, multi_index: &[usize], k: usize) -> Result<()> {
        debug_assert_eq!(multi_index.len(), self.n_dims());
        let width = self.width;
        if self.sizes[k] == 0 {
            return Err(Error::InvariantViolation(format!(
                "removing a point from empty cluster {k}"
            )));
        }
        let matrix = self.matrix_mut(k);
        if let Some((d, &c)) = multi_index
            .iter()
            .enumerate()
            .find(|&(d, &c)| matrix[d * width + c] == 0)
        {
            return Err(Error::InvariantViolation(format!(
                "cluster {k} has no count for category {c} in dimension {d}"
            )));
        }
        for (d, &c) in multi_index.iter().enumerate() {
            matrix[d * width + c] -= 1;
        }
        self.sizes[k] -= 1;
        Ok(())
    }

    /// Replace cluster `k` wholesale with a single point's profile.
    ///
    /// Previous counts are discarded, not decremented.
    pub fn reset_to_singleton(&mut self, k: usize, multi_index: &[usize]) {
        self.matrix_mut(k).fill(0);
        self.sizes[k] = 0;
        self.add(multi_index, k);
    }

    /// Verify that every dimension of every cluster sums to the cluster size
    /// and that padding columns are untouched.
    pub fn check_consistency(&self) -> Result<()> {
        for k in 0..self.n_clusters() {
            let matrix = self.counts(k);
            for (d, &n_cat) in self.n_categories.iter().enumerate() {
                let row = &matrix[d * self.width..(d + 1) * self.width];
                let total: usize = row[..n_cat].iter().map(|&n| n as usize).sum();
                if total != self.sizes[k] {
                    return Err(Error::InvariantViolation(format!(
                        "cluster {k} dimension {d} sums to {total}, size is {}",
                        self.sizes[k]
                    )));
                }
                if row[n_cat..].iter().any(|&n| n != 0) {
                    return Err(Error::InvariantViolation(format!(
                        "cluster {k} dimension {d} has counts in padding columns"
                    )));
                }
            }
        }
        Ok(())
    }

    /// Negative log-likelihood of all members under their cluster's
    /// unsmoothed PMFs: `sum_k sum_d sum_c -n_kdc * ln(n_kdc / size_k)`.
    ///
    /// Zero when every cluster is pure in every dimension. Diagnostic only.
    pub fn overall_impurity(&self) -> f64 {
        let mut total = 0.0;
        for k in 0..self.n_clusters() {
            let size = self.sizes[k];
            if size == 0 {
                continue;
            }
            let size = size as f64;
            for &n in self.counts(k) {
                if n > 0 {
                    let n = f64::from(n);
                    total -= n * (n / size).ln();
                }
            }
        }
        total
    }
}

/// The mutable state of one clustering run: statistics plus assignments.
///
/// `assignments[i] == None` marks an orphaned point that currently
/// contributes to no cluster.
#[derive(Debug, Clone)]
pub struct ClusterState {
    pub(crate) stats: CategoryStatistics,
    pub(crate) assignments: Vec<Option<usize>>,
}

impl ClusterState {
    /// Build state from an explicit assignment vector.
    pub fn new(
        data: &CategoricalDataset,
        n_clusters: usize,
        assignments: Vec<Option<usize>>,
    ) -> Result<Self> {
        if assignments.len() != data.n_points() {
            return Err(Error::DimensionMismatch {
                expected: data.n_points(),
                found: assignments.len(),
            });
        }
        let mut stats = CategoryStatistics::new(n_clusters, data.category_counts());
        for (i, assignment) in assignments.iter().enumerate() {
            if let Some(k) = *assignment {
                if k >= n_clusters {
                    return Err(Error::InvalidParameter {
                        name: "assignments",
                        message: "cluster index out of range",
                    });
                }
                stats.add(data.multi_index(i), k);
            }
        }
        Ok(Self { stats, assignments })
    }

    /// Random initial partition.
    ///
    /// Points are shuffled and dealt round-robin, so every cluster starts
    /// non-empty whenever `n_clusters <= n_points`.
    pub fn random<R: Rng + ?Sized>(
        data: &CategoricalDataset,
        n_clusters: usize,
        rng: &mut R,
    ) -> Result<Self> {
        if n_clusters == 0 {
            return Err(Error::InvalidParameter {
                name: "n_clusters",
                message: "must be at least 1",
            });
        }
        let mut order: Vec<usize> = (0..data.n_points()).collect();
        order.shuffle(rng);
        let mut assignments = vec![None; data.n_points()];
        for (slot, &i) in order.iter().enumerate() {
            assignments[i] = Some(slot % n_clusters);
        }
        Self::new(data, n_clusters, assignments)
    }

    /// Cluster statistics.
    pub fn stats(&self) -> &CategoryStatistics {
        &self.stats
    }

    /// Current assignment of every point.
    pub fn assignments(&self) -> &[Option<usize>] {
        &self.assignments
    }

    /// Number of clusters.
    pub fn n_clusters(&self) -> usize {
        self.stats.n_clusters()
    }

    /// Number of orphaned points.
    pub fn unassigned(&self) -> usize {
        self.assignments.iter().filter(|a| a.is_none()).count()
    }

    /// Indices of the points assigned to cluster `k`.
    pub fn members(&self, k: usize) -> Vec<usize> {
        self.assignments
            .iter()
            .enumerate()
            .filter(|(_, a)| **a == Some(k))
            .map(|(i, _)| i)
            .collect()
    }

    /// Hard labels, or `None` while any point is orphaned.
    pub fn labels(&self) -> Option<Vec<usize>> {
        self.assignments.iter().copied().collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn toy() -> CategoricalDataset {
        CategoricalDataset::from_multi_indexes(
            &[vec![0, 2], vec![1, 0], vec![0, 1], vec![1, 1]],
            vec![2, 3],
        )
        .unwrap()
    }

    #[test]
    fn test_add_remove_keeps_sums() {
        let data = toy();
        let mut stats = CategoryStatistics::new(2, data.category_counts());
        stats.add(data.multi_index(0), 0);
        stats.add(data.multi_index(1), 0);
        stats.add(data.multi_index(2), 1);
        stats.check_consistency().unwrap();
        assert_eq!(stats.size(0), 2);
        assert_eq!(stats.count(0, 0, 0), 1);
        assert_eq!(stats.count(0, 0, 1), 1);
        assert_eq!(stats.count(0, 1, 2), 1);

        stats.remove(data.multi_index(0), 0).unwrap();
        stats.check_consistency().unwrap();
        assert_eq!(stats.size(0), 1);
        assert_eq!(stats.count(0, 1, 2), 0);
    }

    #[test]
    fn test_remove_underflow_is_rejected() {
        let data = toy();
        let mut stats = CategoryStatistics::new(2, data.category_counts());
        stats.add(data.multi_index(0), 0);
        let before = stats.clone();

        // Point 1 was never added to cluster 0.
        let err = stats.remove(data.multi_index(1), 0).unwrap_err();
        assert!(matches!(err, Error::InvariantViolation(_)));
        assert_eq!(stats, before);

        assert!(stats.remove(data.multi_index(0), 1).is_err());
    }

    #[test]
    fn test_reset_to_singleton_discards_previous() {
        let data = toy();
        let mut stats = CategoryStatistics::new(1, data.category_counts());
        for i in 0..4 {
            stats.add(data.multi_index(i), 0);
        }
        stats.reset_to_singleton(0, data.multi_index(3));
        stats.check_consistency().unwrap();
        assert_eq!(stats.size(0), 1);
        assert_eq!(stats.count(0, 0, 1), 1);
        assert_eq!(stats.count(0, 1, 1), 1);
        assert_eq!(stats.counts(0).iter().sum::<u32>(), 2);
    }

    #[test]
    fn test_impurity_zero_for_pure_clusters() {
        let data = CategoricalDataset::from_multi_indexes(
            &[vec![0], vec![0], vec![1], vec![1]],
            vec![2],
        )
        .unwrap();
        let pure = ClusterState::new(&data, 2, vec![Some(0), Some(0), Some(1), Some(1)]).unwrap();
        let mixed = ClusterState::new(&data, 2, vec![Some(0), Some(1), Some(0), Some(1)]).unwrap();
        assert_eq!(pure.stats().overall_impurity(), 0.0);
        // Each cluster is 50/50 over two members: 2 * (2 * ln 2).
        let expected = 4.0 * std::f64::consts::LN_2;
        assert!((mixed.stats().overall_impurity() - expected).abs() < 1e-12);
    }

    #[test]
    fn test_random_state_fills_every_cluster() {
        let data = toy();
        let mut rng = StdRng::seed_from_u64(7);
        let state = ClusterState::random(&data, 3, &mut rng).unwrap();
        state.stats().check_consistency().unwrap();
        assert_eq!(state.unassigned(), 0);
        for k in 0..3 {
            assert!(state.stats().size(k) >= 1);
            assert_eq!(state.members(k).len(), state.stats().size(k));
        }
        assert_eq!(state.labels().unwrap().len(), 4);
    }

    #[test]
    fn test_state_rejects_bad_assignment() {
        let data = toy();
        assert!(ClusterState::new(&data, 2, vec![Some(0); 3]).is_err());
        assert!(ClusterState::new(&data, 2, vec![Some(2), None, None, None]).is_err());
    }

    #[test]
    fn test_labels_none_with_orphans() {
        let data = toy();
        let state = ClusterState::new(&data, 2, vec![Some(0), None, Some(1), Some(1)]).unwrap();
        assert_eq!(state.unassigned(), 1);
        assert!(state.labels().is_none());
        state.stats().check_consistency().unwrap();
    }
}
