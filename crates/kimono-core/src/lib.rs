//! # kimono-core
//!
//! Core types for analyzing post-translational modification (PTM) sites in
//! structural context.
//!
//! __kimono-core__ provides:
//! * Residue code tables and the canonical `CHAIN:RES:POS` node identifier
//! * [`PtmSite`], one modified residue on one protein
//! * [`ResidueGraph`], a residue-level structure graph, and the
//!   [`GraphBackend`] trait that builds one from a structure file
//! * [`StructuralMotif`], the radius-bounded subgraph around a site, and the
//!   [`DifferenceTransform`] over its residue positions
//!
mod error;
mod graph;
mod motif;
mod node_id;
mod ptm;
mod residue;

pub use self::error::{KimonoError, Result};
pub use self::graph::{
    GraphBackend, GraphConfig, PdbtbxBackend, ResidueEdge, ResidueGraph, ResidueNode,
};
pub use self::motif::{
    DifferenceTransform, Granularity, MotifParams, StructuralMotif, DEFAULT_RADIUS,
};
pub use self::node_id::{format_node_id, node_position};
pub use self::ptm::{ModificationType, PtmSite, SUPPORTED_CHAIN};
pub use self::residue::{aa1to3, aa3to1};
