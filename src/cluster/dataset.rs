//! Categorical dataset encoding.
//!
//! A point is stored as its *multi-index*: one category index per attribute
//! dimension, each in `[0, n_categories[d])`. Raw values never reach the
//! clustering core; [`CategoricalDataset::encode`] maps them to indices once.

use crate::error::{Error, Result};
use std::collections::HashMap;
use std::hash::Hash;

/// Immutable, row-major table of per-dimension category indices.
#[derive(Debug, Clone)]
pub struct CategoricalDataset {
    multi_indexes: Vec<usize>,
    n_points: usize,
    n_categories: Vec<usize>,
    max_categories: usize,
}

impl CategoricalDataset {
    /// Build a dataset from already-encoded multi-indexes.
    ///
    /// Every row must have `n_categories.len()` entries and every entry must be
    /// a valid category for its dimension.
    pub fn from_multi_indexes(rows: &[Vec<usize>], n_categories: Vec<usize>) -> Result<Self> {
        if rows.is_empty() {
            return Err(Error::EmptyInput);
        }
        let n_dims = n_categories.len();
        if n_dims == 0 {
            return Err(Error::InvalidParameter {
                name: "n_categories",
                message: "must describe at least one dimension",
            });
        }
        if n_categories.iter().any(|&c| c == 0) {
            return Err(Error::InvalidParameter {
                name: "n_categories",
                message: "every dimension needs at least one category",
            });
        }

        let mut flat = Vec::with_capacity(rows.len() * n_dims);
        for (point, row) in rows.iter().enumerate() {
            if row.len() != n_dims {
                return Err(Error::DimensionMismatch {
                    expected: n_dims,
                    found: row.len(),
                });
            }
            for (dimension, (&category, &limit)) in row.iter().zip(&n_categories).enumerate() {
                if category >= limit {
                    return Err(Error::CategoryOutOfRange {
                        point,
                        dimension,
                        category,
                        n_categories: limit,
                    });
                }
            }
            flat.extend_from_slice(row);
        }

        let max_categories = n_categories.iter().copied().max().unwrap_or(0);
        Ok(Self {
            multi_indexes: flat,
            n_points: rows.len(),
            n_categories,
            max_categories,
        })
    }

    /// Encode raw categorical rows.
    ///
    /// Categories are numbered per dimension in first-seen order. Returns the
    /// dataset together with each dimension's vocabulary, so that
    /// `vocab[d][c]` is the raw value encoded as category `c` of dimension `d`.
    pub fn encode<T>(rows: &[Vec<T>]) -> Result<(Self, Vec<Vec<T>>)>
    where
        T: Clone + Eq + Hash,
    {
        let first = rows.first().ok_or(Error::EmptyInput)?;
        let n_dims = first.len();

        let mut lookup: Vec<HashMap<T, usize>> = vec![HashMap::new(); n_dims];
        let mut vocab: Vec<Vec<T>> = vec![Vec::new(); n_dims];
        let mut encoded = Vec::with_capacity(rows.len());

        for row in rows {
            if row.len() != n_dims {
                return Err(Error::DimensionMismatch {
                    expected: n_dims,
                    found: row.len(),
                });
            }
            let mut multi_index = Vec::with_capacity(n_dims);
            for (d, value) in row.iter().enumerate() {
                let next = vocab[d].len();
                let idx = *lookup[d].entry(value.clone()).or_insert_with(|| {
                    vocab[d].push(value.clone());
                    next
                });
                multi_index.push(idx);
            }
            encoded.push(multi_index);
        }

        let n_categories = vocab.iter().map(Vec::len).collect();
        let dataset = Self::from_multi_indexes(&encoded, n_categories)?;
        Ok((dataset, vocab))
    }

    /// Number of points.
    pub fn n_points(&self) -> usize {
        self.n_points
    }

    /// Number of attribute dimensions.
    pub fn n_dims(&self) -> usize {
        self.n_categories.len()
    }

    /// Valid category count of dimension `d`.
    pub fn n_categories(&self, d: usize) -> usize {
        self.n_categories[d]
    }

    /// Valid category counts of all dimensions.
    pub fn category_counts(&self) -> &[usize] {
        &self.n_categories
    }

    /// Widest dimension; the column count of statistics and centroid matrices.
    pub fn max_categories(&self) -> usize {
        self.max_categories
    }

    /// The category-index tuple of point `i`.
    #[inline]
    pub fn multi_index(&self, i: usize) -> &[usize] {
        let d = self.n_dims();
        &self.multi_indexes[i * d..(i + 1) * d]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_encode_first_seen_order() {
        let rows = vec![
            vec!["red", "small"],
            vec!["blue", "small"],
            vec!["red", "large"],
            vec!["green", "small"],
        ];
        let (data, vocab) = CategoricalDataset::encode(&rows).unwrap();

        assert_eq!(data.n_points(), 4);
        assert_eq!(data.n_dims(), 2);
        assert_eq!(data.category_counts(), &[3, 2]);
        assert_eq!(data.max_categories(), 3);
        assert_eq!(data.multi_index(0), &[0, 0]);
        assert_eq!(data.multi_index(2), &[0, 1]);
        assert_eq!(data.multi_index(3), &[2, 0]);
        assert_eq!(vocab[0], vec!["red", "blue", "green"]);
        assert_eq!(vocab[1], vec!["small", "large"]);
    }

    #[test]
    fn test_encode_ragged_rows() {
        let rows = vec![vec![1, 2], vec![3]];
        let err = CategoricalDataset::encode(&rows).unwrap_err();
        assert!(matches!(
            err,
            Error::DimensionMismatch {
                expected: 2,
                found: 1
            }
        ));
    }

    #[test]
    fn test_encode_empty() {
        let rows: Vec<Vec<u8>> = vec![];
        assert!(matches!(
            CategoricalDataset::encode(&rows),
            Err(Error::EmptyInput)
        ));
    }

    #[test]
    fn test_from_multi_indexes_rejects_out_of_range() {
        let rows = vec![vec![0, 1], vec![2, 0]];
        let err = CategoricalDataset::from_multi_indexes(&rows, vec![2, 2]).unwrap_err();
        assert!(matches!(
            err,
            Error::CategoryOutOfRange {
                point: 1,
                dimension: 0,
                category: 2,
                n_categories: 2
            }
        ));
    }

    #[test]
    fn test_from_multi_indexes_rejects_empty_dimension() {
        let rows = vec![vec![0]];
        assert!(CategoricalDataset::from_multi_indexes(&rows, vec![]).is_err());
        assert!(CategoricalDataset::from_multi_indexes(&rows, vec![0]).is_err());
    }
}
