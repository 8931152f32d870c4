use super::dataset::CategoricalDataset;
use crate::error::Result;

/// Common interface for hard clustering of categorical data (one label per point).
pub trait CategoricalClustering {
    /// Fit the model and return one cluster label per point.
    fn fit_predict(&self, data: &CategoricalDataset) -> Result<Vec<usize>>;

    /// The configured number of clusters.
    fn n_clusters(&self) -> usize;
}
