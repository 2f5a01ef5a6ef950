//! Error type shared by the kimono crates.

use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum KimonoError {
    /// Residue code of unsupported length or unknown letter.
    #[error("invalid residue: {0}")]
    InvalidResidue(String),

    #[error("only chain A is supported for now, got chain {0:?}")]
    UnsupportedChain(String),

    /// Centre node absent from the full structure graph.
    #[error("node {0} not found in structure graph")]
    MissingNode(String),

    /// Expected structure file absent. Recoverable at batch level.
    #[error("structure not found for {acc_id} at {}", .path.display())]
    MissingStructure { acc_id: String, path: PathBuf },

    #[error("not implemented: {0}")]
    NotImplemented(String),

    #[error("invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("cannot average a difference transform with fewer than two residues")]
    EmptyTransform,

    #[error("unknown modification type: {0}")]
    UnknownModification(String),

    #[error("node id {0:?} has no residue position")]
    InvalidNodeId(String),

    /// Structure file could not be parsed.
    #[error("structure error: {0}")]
    Structure(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, KimonoError>;
