//! Categorical clustering primitives.
//!
//! `catclump` clusters purely categorical data: every point is a vector of
//! discrete attribute values with no ordering between categories.
//!
//! The primary public API is under [`cluster`], which provides:
//! - a categorical dataset encoding (multi-indexes)
//! - a per-cluster category statistics store
//! - smoothed log-PMF centroids, maximum-likelihood reassignment and random swap
//! - [`CategoricalPmf`], the iterative controller tying these together

#![forbid(unsafe_code)]

pub mod cluster;
pub mod error;

pub use cluster::{
    assign, compute_centroids, random_swap, CategoricalClustering, CategoricalDataset,
    CategoricalPmf, CategoryStatistics, CentroidOutcome, ClusterState, LogPmf, PmfFit, Swap,
};
pub use error::{Error, Result};
