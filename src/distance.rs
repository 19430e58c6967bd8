//! Pairwise distance lookup keyed by entity name.
//!
//! The index is built once from a square matrix whose rows and columns are
//! aligned with an ordered list of names, and is read-only afterwards. Every
//! other module addresses entities by their position in that list; names only
//! matter at the edges (input parsing, lookups by name, output).
//!
//! ```rust
//! use glyphtier::DistanceIndex;
//!
//! let index = DistanceIndex::new(
//!     vec!["Garamond".into(), "Caslon".into()],
//!     vec![vec![0.0, 0.2], vec![0.2, 0.0]],
//! )
//! .unwrap();
//!
//! assert_eq!(index.distance("Caslon", "Garamond").unwrap(), 0.2);
//! ```

use crate::error::{Error, Result};
use ndarray::Array2;
use std::collections::HashMap;

/// Immutable pairwise distance table over named entities.
#[derive(Debug, Clone)]
pub struct DistanceIndex {
    names: Vec<String>,
    positions: HashMap<String, usize>,
    matrix: Array2<f64>,
}

impl DistanceIndex {
    /// Build an index from names and matrix rows aligned with them.
    ///
    /// # Errors
    ///
    /// - [`Error::EmptyInput`] when there are no names.
    /// - [`Error::DimensionMismatch`] when the matrix is not `n x n`.
    /// - [`Error::DuplicateEntity`] when a name repeats.
    /// - [`Error::InvalidDistance`] for negative or non-finite cells.
    pub fn new(names: Vec<String>, rows: Vec<Vec<f64>>) -> Result<Self> {
        let n = names.len();
        if rows.len() != n {
            return Err(Error::DimensionMismatch {
                expected: n,
                found: rows.len(),
            });
        }
        if let Some(row) = rows.iter().find(|row| row.len() != n) {
            return Err(Error::DimensionMismatch {
                expected: n,
                found: row.len(),
            });
        }

        let flat: Vec<f64> = rows.into_iter().flatten().collect();
        let matrix = Array2::from_shape_vec((n, n), flat).map_err(|_| Error::DimensionMismatch {
            expected: n * n,
            found: 0,
        })?;
        Self::from_array(names, matrix)
    }

    /// Build an index from names and an already-shaped matrix.
    pub fn from_array(names: Vec<String>, matrix: Array2<f64>) -> Result<Self> {
        let n = names.len();
        if n == 0 {
            return Err(Error::EmptyInput);
        }
        let (rows, cols) = matrix.dim();
        if rows != n || cols != n {
            return Err(Error::DimensionMismatch {
                expected: n,
                found: if rows != n { rows } else { cols },
            });
        }

        if let Some(((row, col), &value)) = matrix
            .indexed_iter()
            .find(|(_, v)| !v.is_finite() || **v < 0.0)
        {
            return Err(Error::InvalidDistance { row, col, value });
        }

        let mut positions = HashMap::with_capacity(n);
        for (i, name) in names.iter().enumerate() {
            if positions.insert(name.clone(), i).is_some() {
                return Err(Error::DuplicateEntity { name: name.clone() });
            }
        }

        Ok(Self {
            names,
            positions,
            matrix,
        })
    }

    /// Number of entities.
    pub fn len(&self) -> usize {
        self.names.len()
    }

    /// Whether the index holds no entities (never true for a built index).
    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }

    /// Entity names in input order.
    pub fn names(&self) -> &[String] {
        &self.names
    }

    /// Name of the entity at `position`.
    ///
    /// Positions come from this index, so an out-of-range position is a bug.
    pub fn name(&self, position: usize) -> &str {
        &self.names[position]
    }

    /// Whether `name` is indexed.
    pub fn contains(&self, name: &str) -> bool {
        self.positions.contains_key(name)
    }

    /// Position of `name`.
    pub fn position(&self, name: &str) -> Result<usize> {
        self.positions
            .get(name)
            .copied()
            .ok_or_else(|| Error::UnknownEntity {
                name: name.to_string(),
            })
    }

    /// Resolve names to positions, rejecting unknown and repeated names.
    pub fn resolve<S: AsRef<str>>(&self, names: &[S]) -> Result<Vec<usize>> {
        let mut seen = vec![false; self.len()];
        names
            .iter()
            .map(|name| {
                let name = name.as_ref();
                let position = self.position(name)?;
                if std::mem::replace(&mut seen[position], true) {
                    return Err(Error::DuplicateEntity {
                        name: name.to_string(),
                    });
                }
                Ok(position)
            })
            .collect()
    }

    /// Distance between two named entities.
    pub fn distance(&self, a: &str, b: &str) -> Result<f64> {
        Ok(self.distance_at(self.position(a)?, self.position(b)?))
    }

    /// Distance between two positions.
    ///
    /// Reads the `(min, max)` cell so the answer never depends on argument
    /// order, even if the source matrix was not perfectly symmetric.
    #[inline]
    pub fn distance_at(&self, a: usize, b: usize) -> f64 {
        let (lo, hi) = if a <= b { (a, b) } else { (b, a) };
        self.matrix[[lo, hi]]
    }

    /// All pairwise distances within `subset`, one per unordered pair.
    ///
    /// A subset of size `k` yields `k * (k - 1) / 2` samples; a singleton
    /// yields none.
    pub fn pairwise(&self, subset: &[usize]) -> Vec<f64> {
        let k = subset.len();
        let mut out = Vec::with_capacity(k * k.saturating_sub(1) / 2);
        for (i, &a) in subset.iter().enumerate() {
            for &b in &subset[i + 1..] {
                out.push(self.distance_at(a, b));
            }
        }
        out
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn names(list: &[&str]) -> Vec<String> {
        list.iter().map(|s| s.to_string()).collect()
    }

    fn three() -> DistanceIndex {
        DistanceIndex::new(
            names(&["a", "b", "c"]),
            vec![
                vec![0.0, 0.1, 0.7],
                vec![0.1, 0.0, 0.4],
                vec![0.7, 0.4, 0.0],
            ],
        )
        .unwrap()
    }

    #[test]
    fn test_lookup_is_symmetric() {
        let index = three();
        assert_eq!(index.distance("a", "c").unwrap(), 0.7);
        assert_eq!(index.distance("c", "a").unwrap(), 0.7);
        assert_eq!(index.distance("b", "b").unwrap(), 0.0);
    }

    #[test]
    fn test_asymmetric_input_reads_upper_triangle() {
        let index = DistanceIndex::new(
            names(&["a", "b"]),
            vec![vec![0.0, 0.3], vec![0.9, 0.0]],
        )
        .unwrap();
        assert_eq!(index.distance_at(0, 1), 0.3);
        assert_eq!(index.distance_at(1, 0), 0.3);
    }

    #[test]
    fn test_unknown_entity() {
        let index = three();
        let err = index.distance("a", "zapf").unwrap_err();
        assert!(matches!(err, Error::UnknownEntity { ref name } if name == "zapf"));
    }

    #[test]
    fn test_pairwise_follows_subset_order() {
        let index = three();
        assert_eq!(index.pairwise(&[2, 0, 1]), vec![0.7, 0.4, 0.1]);
        assert!(index.pairwise(&[1]).is_empty());
    }

    #[test]
    fn test_rejects_malformed_matrix() {
        assert!(matches!(
            DistanceIndex::new(names(&["a", "b"]), vec![vec![0.0, 1.0]]),
            Err(Error::DimensionMismatch { expected: 2, found: 1 })
        ));
        assert!(matches!(
            DistanceIndex::new(names(&["a", "b"]), vec![vec![0.0, 1.0], vec![1.0]]),
            Err(Error::DimensionMismatch { .. })
        ));
        assert!(matches!(
            DistanceIndex::new(names(&["a", "a"]), vec![vec![0.0; 2]; 2]),
            Err(Error::DuplicateEntity { .. })
        ));
        assert!(matches!(
            DistanceIndex::new(
                names(&["a", "b"]),
                vec![vec![0.0, -1.0], vec![-1.0, 0.0]]
            ),
            Err(Error::InvalidDistance { row: 0, col: 1, .. })
        ));
        assert!(matches!(
            DistanceIndex::new(Vec::new(), Vec::new()),
            Err(Error::EmptyInput)
        ));
    }

    #[test]
    fn test_resolve_rejects_repeats() {
        let index = three();
        assert_eq!(index.resolve(&["c", "a"]).unwrap(), vec![2, 0]);
        assert!(matches!(
            index.resolve(&["c", "c"]),
            Err(Error::DuplicateEntity { .. })
        ));
    }
}
