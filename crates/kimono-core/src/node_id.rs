//! Canonical residue node identifiers, `CHAIN:RES:POS`.
//!
//! The same strings name the nodes of a [`ResidueGraph`](crate::ResidueGraph),
//! so a site's identifier doubles as its lookup key.

use crate::error::{KimonoError, Result};
use crate::residue::aa1to3;

/// Formats a node id from a one- or three-letter residue code.
///
/// Three-letter codes are upper-cased as given. One-letter codes are
/// expanded through the standard amino acid table.
pub fn format_node_id(chain_id: &str, residue: &str, position: i64) -> Result<String> {
    let residue = match residue.chars().count() {
        3 => residue.to_uppercase(),
        1 => residue
            .chars()
            .next()
            .and_then(aa1to3)
            .ok_or_else(|| KimonoError::InvalidResidue(residue.to_string()))?
            .to_string(),
        _ => return Err(KimonoError::InvalidResidue(residue.to_string())),
    };
    Ok(node_label(chain_id, &residue, position, None))
}

pub(crate) fn node_label(
    chain_id: &str,
    res_name: &str,
    position: i64,
    insertion_code: Option<&str>,
) -> String {
    match insertion_code {
        Some(code) => format!("{}:{}:{}:{}", chain_id.to_uppercase(), res_name, position, code),
        None => format!("{}:{}:{}", chain_id.to_uppercase(), res_name, position),
    }
}

/// The trailing integer of a node id, i.e. its residue number.
///
/// Insertion-code suffixes (`A:SER:15:B`) are skipped.
pub fn node_position(node_id: &str) -> Result<i64> {
    node_id
        .rsplit(':')
        .find_map(|token| token.parse::<i64>().ok())
        .ok_or_else(|| KimonoError::InvalidNodeId(node_id.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_one_and_three_letter_agree() {
        for (one, three) in [("S", "SER"), ("t", "thr"), ("Y", "Tyr"), ("k", "LYS")] {
            assert_eq!(
                format_node_id("A", one, 42).unwrap(),
                format_node_id("A", three, 42).unwrap()
            );
        }
        assert_eq!(format_node_id("a", "s", 15).unwrap(), "A:SER:15");
    }

    #[test]
    fn test_invalid_residues() {
        assert!(matches!(
            format_node_id("A", "SE", 1),
            Err(KimonoError::InvalidResidue(_))
        ));
        assert!(matches!(
            format_node_id("A", "", 1),
            Err(KimonoError::InvalidResidue(_))
        ));
        assert!(matches!(
            format_node_id("A", "X", 1),
            Err(KimonoError::InvalidResidue(_))
        ));
    }

    #[test]
    fn test_node_position() {
        assert_eq!(node_position("A:SER:15").unwrap(), 15);
        assert_eq!(node_position("A:SER:15:B").unwrap(), 15);
        assert_eq!(node_position("A:GLY:-3").unwrap(), -3);
        assert!(matches!(
            node_position("A:SER"),
            Err(KimonoError::InvalidNodeId(_))
        ));
    }
}
