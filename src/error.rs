use thiserror::Error;

/// Errors returned by clustering algorithms in this crate.
#[derive(Debug, Error)]
pub enum Error {
    /// Input dataset is empty.
    #[error("empty input")]
    EmptyInput,

    /// Invalid parameter value.
    #[error("invalid parameter {name}: {message}")]
    InvalidParameter {
        /// Parameter name.
        name: &'static str,
        /// Human-readable explanation.
        message: &'static str,
    },

    /// Requested cluster count is incompatible with the dataset.
    #[error("invalid cluster count: requested {requested}, but dataset has {n_items} items")]
    InvalidClusterCount {
        /// Requested number of clusters.
        requested: usize,
        /// Number of items in the dataset.
        n_items: usize,
    },

    /// Points in a dataset have inconsistent dimensionality.
    #[error("dimension mismatch: expected {expected}, found {found}")]
    DimensionMismatch {
        /// Expected dimensionality.
        expected: usize,
        /// Found dimensionality.
        found: usize,
    },

    /// A multi-index refers to a category that does not exist in its dimension.
    #[error("point {point}: category {category} out of range for dimension {dimension} ({n_categories} categories)")]
    CategoryOutOfRange {
        /// Offending point.
        point: usize,
        /// Dimension of the bad index.
        dimension: usize,
        /// The bad category index.
        category: usize,
        /// Valid categories in that dimension.
        n_categories: usize,
    },

    /// Cluster statistics no longer describe the current assignment.
    ///
    /// This is a programming error: continuing would feed negative or
    /// mismatched counts into the log-PMF computation.
    #[error("statistics invariant violated: {0}")]
    InvariantViolation(String),

    /// A random swap needs at least one non-empty cluster to draw a prototype from.
    #[error("no cluster has any members")]
    NoMembers,

    /// The iteration budget ran out while some points were still unassigned.
    #[error("{unassigned} points left unassigned when iteration stopped")]
    Unsettled {
        /// Number of orphaned points.
        unassigned: usize,
    },
}

/// Result type used by this crate.
pub type Result<T> = std::result::Result<T, Error>;
