//! Clustering of purely categorical data.
//!
//! Every point is a vector of discrete attribute values. Categories carry no
//! order or distance, so k-means style averaging does not apply.
//!
//! ## The model
//!
//! Each cluster is a product of independent per-dimension categorical
//! distributions (PMFs), estimated from the category counts of its members.
//! A point belongs to the cluster under which it is most likely:
//!
//! ```text
//! k* = argmax_k Σ_d ln P_k(x_d | d)
//! ```
//!
//! This is the naive-Bayes log-likelihood of a categorical mixture with hard
//! assignments, in the same family as k-modes.
//!
//! ## Building blocks
//!
//! - [`CategoricalDataset`]: points encoded as per-dimension category indices.
//! - [`CategoryStatistics`] / [`ClusterState`]: per-cluster count matrices
//!   and the assignment vector, updated point by point.
//! - [`compute_centroids`]: smoothed log-PMF matrices; reports an empty
//!   cluster as [`CentroidOutcome::Degenerate`] instead of producing `ln 0`.
//! - [`assign`]: maximum-likelihood reassignment, lowest index wins ties.
//! - [`random_swap`]: reseeds a cluster from a single point, orphaning its
//!   previous members.
//! - [`CategoricalPmf`]: the iterative controller.
//!
//! ## Assumptions
//!
//! - Attributes are conditionally independent given the cluster.
//! - You know k in advance.
//!
//! ## Usage
//!
//! ```rust
//! use catclump::cluster::{CategoricalClustering, CategoricalDataset, CategoricalPmf};
//!
//! let rows = vec![
//!     vec!["red", "round"],
//!     vec!["red", "round"],
//!     vec!["green", "long"],
//!     vec!["green", "long"],
//! ];
//! let (data, _vocab) = CategoricalDataset::encode(&rows).unwrap();
//!
//! let labels = CategoricalPmf::new(2).with_seed(42).fit_predict(&data).unwrap();
//! assert_eq!(labels[0], labels[1]);
//! assert_eq!(labels[2], labels[3]);
//! assert_ne!(labels[0], labels[2]);
//! ```

mod assignment;
mod centroid;
mod dataset;
mod pmf;
mod stats;
mod swap;
mod traits;
mod util;

pub use assignment::{apply_assignments, assign, best_cluster, score_assignments, Move};
pub use centroid::{compute_centroids, CentroidOutcome, LogPmf};
pub use dataset::CategoricalDataset;
pub use pmf::{CategoricalPmf, PmfFit};
pub use stats::{CategoryStatistics, ClusterState};
pub use swap::{random_swap, Swap};
pub use traits::CategoricalClustering;
