use std::fmt::Debug;
use std::path::Path;

use bon::Builder;

use super::ResidueGraph;
use crate::error::Result;

/// Something that can turn a structure file into a [`ResidueGraph`] and cut
/// spatial subgraphs out of it.
///
/// Node ids produced by `build_graph` must follow the `CHAIN:RES:POS`
/// convention of [`format_node_id`](crate::format_node_id).
pub trait GraphBackend: Debug {
    fn build_graph(&self, path: &Path) -> Result<ResidueGraph>;

    /// Induced subgraph of every node within `radius` of `centre`.
    fn extract_subgraph(
        &self,
        graph: &ResidueGraph,
        centre: [f32; 3],
        radius: f64,
    ) -> ResidueGraph {
        graph.within_radius(centre, radius)
    }
}

/// Options for residue graph construction.
#[derive(Builder, Debug, Clone, Default, PartialEq)]
pub struct GraphConfig {
    /// Add distance edges between residues closer than this (Å).
    pub distance_threshold: Option<f64>,
    /// Keep residues made only of HETATM records (ligands, waters).
    #[builder(default)]
    pub include_hetero: bool,
}
