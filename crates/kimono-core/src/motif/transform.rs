use itertools::Itertools;

use crate::error::{KimonoError, Result};
use crate::node_id::node_position;

/// Gaps between sequence positions of the residues in a motif.
///
/// Positions are sorted and each adjacent pair contributes
/// `p[i] - p[i - 1]`, minus one when `zeroed`, so that directly
/// consecutive residues give `0`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DifferenceTransform {
    differences: Vec<i64>,
}

impl DifferenceTransform {
    pub fn new(mut positions: Vec<i64>, zeroed: bool) -> Self {
        positions.sort_unstable();
        let offset = i64::from(zeroed);
        let differences = positions
            .iter()
            .tuple_windows()
            .map(|(prev, next)| next - prev - offset)
            .collect();
        DifferenceTransform { differences }
    }

    /// Reads positions from the trailing integer of each node id.
    pub fn from_node_ids<I, S>(node_ids: I, zeroed: bool) -> Result<Self>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let positions = node_ids
            .into_iter()
            .map(|id| node_position(id.as_ref()))
            .collect::<Result<Vec<_>>>()?;
        Ok(Self::new(positions, zeroed))
    }

    pub fn differences(&self) -> &[i64] {
        &self.differences
    }

    pub fn len(&self) -> usize {
        self.differences.len()
    }

    pub fn is_empty(&self) -> bool {
        self.differences.is_empty()
    }

    pub fn sum(&self) -> i64 {
        self.differences.iter().sum()
    }

    /// Fails with [`KimonoError::EmptyTransform`] when there is nothing to average.
    pub fn average(&self) -> Result<f64> {
        if self.differences.is_empty() {
            return Err(KimonoError::EmptyTransform);
        }
        Ok(self.sum() as f64 / self.differences.len() as f64)
    }

    pub fn max(&self) -> Option<i64> {
        self.differences.iter().copied().max()
    }

    /// Differences with the zeros dropped.
    pub fn nonzero(&self) -> Vec<i64> {
        self.differences
            .iter()
            .copied()
            .filter(|&d| d != 0)
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_zeroed_transform() {
        let transform = DifferenceTransform::new(vec![15, 10, 16, 11], true);
        assert_eq!(transform.differences(), [0, 3, 0]);
        assert_eq!(transform.nonzero(), [3]);
        assert_eq!(transform.sum(), 3);
        assert_eq!(transform.max(), Some(3));
        assert_eq!(transform.average().unwrap(), 1.0);
    }

    #[test]
    fn test_raw_transform() {
        let transform = DifferenceTransform::new(vec![10, 11, 15, 16], false);
        assert_eq!(transform.differences(), [1, 4, 1]);
        assert_eq!(transform.nonzero(), [1, 4, 1]);
        assert_eq!(transform.sum(), 6);
    }

    #[test]
    fn test_single_and_empty() {
        for positions in [vec![42], vec![]] {
            let transform = DifferenceTransform::new(positions, true);
            assert!(transform.is_empty());
            assert_eq!(transform.sum(), 0);
            assert_eq!(transform.max(), None);
            assert!(matches!(
                transform.average(),
                Err(KimonoError::EmptyTransform)
            ));
        }
    }

    #[test]
    fn test_from_node_ids() {
        let ids = ["A:LYS:16", "A:SER:10", "A:THR:11", "A:GLY:15"];
        let transform = DifferenceTransform::from_node_ids(ids, true).unwrap();
        assert_eq!(transform.differences(), [0, 3, 0]);

        let bad = DifferenceTransform::from_node_ids(["A:SER:10", "garbage"], true);
        assert!(matches!(bad, Err(KimonoError::InvalidNodeId(_))));
    }
}
