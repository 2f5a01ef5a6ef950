//! Structural motifs: the spatial neighbourhood of a PTM site.
//!
//! A [`StructuralMotif`] pairs a [`PtmSite`] with the full residue graph of
//! its protein and the subgraph of residues within `radius` of the site.
//! The full graph sits behind an [`Arc`] so that every motif on a protein
//! shares a single copy.
//!
//! Motifs are immutable. Looking at a different radius goes through
//! [`StructuralMotif::subgraph_at`] or [`StructuralMotif::with_radius`],
//! each of which repeats the extraction.
//!
mod transform;

pub use transform::DifferenceTransform;

use std::path::Path;
use std::sync::Arc;

use bon::Builder;

use crate::error::{KimonoError, Result};
use crate::graph::{GraphBackend, ResidueGraph};
use crate::ptm::PtmSite;

/// Default motif radius in Ångströms.
pub const DEFAULT_RADIUS: f64 = 12.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Granularity {
    #[default]
    Residue,
    /// One node per atom. Not supported yet.
    Atom,
}

#[derive(Builder, Debug, Clone, PartialEq)]
pub struct MotifParams {
    #[builder(default = DEFAULT_RADIUS)]
    pub radius: f64,
    /// Relative solvent accessibility cut-off. Stored but not applied.
    pub rsa_threshold: Option<f64>,
    #[builder(default)]
    pub granularity: Granularity,
}

impl Default for MotifParams {
    fn default() -> Self {
        MotifParams::builder().build()
    }
}

#[derive(Debug, Clone)]
pub struct StructuralMotif {
    site: PtmSite,
    graph: Arc<ResidueGraph>,
    backend: Arc<dyn GraphBackend>,
    centre: String,
    params: MotifParams,
    subgraph: ResidueGraph,
}

impl StructuralMotif {
    /// Builds a motif around `site` from an already constructed graph.
    pub fn from_graph(
        site: PtmSite,
        graph: Arc<ResidueGraph>,
        backend: Arc<dyn GraphBackend>,
        params: MotifParams,
    ) -> Result<Self> {
        if params.granularity == Granularity::Atom {
            return Err(KimonoError::NotImplemented(
                "atom-level motif graphs".to_string(),
            ));
        }
        let centre = site.node_id();
        let centre_coords = graph
            .node(&centre)
            .ok_or_else(|| KimonoError::MissingNode(centre.clone()))?
            .coords;
        let subgraph = backend.extract_subgraph(&graph, centre_coords, params.radius);

        Ok(StructuralMotif {
            site,
            graph,
            backend,
            centre,
            params,
            subgraph,
        })
    }

    /// Builds the full graph from a structure file, then the motif.
    pub fn from_structure(
        site: PtmSite,
        path: &Path,
        backend: Arc<dyn GraphBackend>,
        params: MotifParams,
    ) -> Result<Self> {
        let graph = Arc::new(backend.build_graph(path)?);
        Self::from_graph(site, graph, backend, params)
    }

    pub fn site(&self) -> &PtmSite {
        &self.site
    }

    pub fn centre(&self) -> &str {
        &self.centre
    }

    pub fn radius(&self) -> f64 {
        self.params.radius
    }

    pub fn params(&self) -> &MotifParams {
        &self.params
    }

    pub fn graph(&self) -> &Arc<ResidueGraph> {
        &self.graph
    }

    pub fn subgraph(&self) -> &ResidueGraph {
        &self.subgraph
    }

    pub fn node_ids(&self) -> Vec<String> {
        self.subgraph.node_ids()
    }

    pub fn len(&self) -> usize {
        self.subgraph.node_count()
    }

    pub fn is_empty(&self) -> bool {
        self.subgraph.is_empty()
    }

    fn centre_coords(&self) -> [f32; 3] {
        self.subgraph
            .node(&self.centre)
            .or_else(|| self.graph.node(&self.centre))
            .map(|node| node.coords)
            .unwrap_or_default()
    }

    /// Extracts the neighbourhood at another radius. Nothing is cached.
    pub fn subgraph_at(&self, radius: f64) -> ResidueGraph {
        self.backend
            .extract_subgraph(&self.graph, self.centre_coords(), radius)
    }

    /// A new motif on the same shared graph with a different radius.
    pub fn with_radius(&self, radius: f64) -> Self {
        StructuralMotif {
            site: self.site.clone(),
            graph: Arc::clone(&self.graph),
            backend: Arc::clone(&self.backend),
            centre: self.centre.clone(),
            params: MotifParams {
                radius,
                ..self.params.clone()
            },
            subgraph: self.subgraph_at(radius),
        }
    }

    /// Residue numbers of the motif, in ascending order.
    pub fn positions(&self) -> Vec<i64> {
        let mut positions: Vec<i64> = self
            .subgraph
            .nodes()
            .map(|node| node.residue_number)
            .collect();
        positions.sort_unstable();
        positions
    }

    pub fn difference_transform(&self, zeroed: bool) -> Result<DifferenceTransform> {
        DifferenceTransform::from_node_ids(self.node_ids(), zeroed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::graph::tests::line_graph;
    use crate::graph::PdbtbxBackend;
    use kimono_test_data::TestFile;

    fn backend() -> Arc<dyn GraphBackend> {
        Arc::new(PdbtbxBackend::default())
    }

    fn ser4() -> PtmSite {
        PtmSite::new("SERA_HUMAN", "P12345", "S", 4, "Phosphorylation", None).unwrap()
    }

    #[test]
    fn test_motif_from_graph() {
        let graph = Arc::new(line_graph(None));
        let params = MotifParams::builder().radius(8.0).build();
        let motif = StructuralMotif::from_graph(ser4(), graph, backend(), params).unwrap();

        assert_eq!(motif.centre(), "A:SER:4");
        assert_eq!(
            motif.node_ids(),
            ["A:ALA:2", "A:GLY:3", "A:SER:4", "A:LYS:5", "A:LYS:20"]
        );
        assert_eq!(motif.positions(), [2, 3, 4, 5, 20]);

        let transform = motif.difference_transform(true).unwrap();
        assert_eq!(transform.differences(), [0, 0, 0, 14]);
        assert_eq!(transform.nonzero(), [14]);
        assert_eq!(transform.average().unwrap(), 3.5);
    }

    #[test]
    fn test_default_params() {
        let params = MotifParams::default();
        assert_eq!(params.radius, DEFAULT_RADIUS);
        assert_eq!(params.rsa_threshold, None);
        assert_eq!(params.granularity, Granularity::Residue);
    }

    #[test]
    fn test_missing_centre_node() {
        let graph = Arc::new(line_graph(None));
        let site = PtmSite::new("SERA_HUMAN", "P12345", "T", 4, "Phosphorylation", None).unwrap();
        let result = StructuralMotif::from_graph(site, graph, backend(), MotifParams::default());
        assert!(matches!(result, Err(KimonoError::MissingNode(id)) if id == "A:THR:4"));
    }

    #[test]
    fn test_atom_granularity_not_implemented() {
        let graph = Arc::new(line_graph(None));
        let params = MotifParams::builder()
            .granularity(Granularity::Atom)
            .build();
        let result = StructuralMotif::from_graph(ser4(), graph, backend(), params);
        assert!(matches!(result, Err(KimonoError::NotImplemented(_))));
    }

    #[test]
    fn test_radius_changes_leave_motif_untouched() {
        let graph = Arc::new(line_graph(None));
        let params = MotifParams::builder().radius(4.0).build();
        let motif = StructuralMotif::from_graph(ser4(), graph, backend(), params).unwrap();
        assert_eq!(motif.len(), 3);

        let wider = motif.subgraph_at(8.0);
        assert_eq!(wider.node_count(), 5);
        assert_eq!(motif.len(), 3);

        let tight = motif.with_radius(1.0);
        assert_eq!(tight.node_ids(), ["A:SER:4"]);
        assert_eq!(tight.radius(), 1.0);
        assert!(Arc::ptr_eq(tight.graph(), motif.graph()));

        let transform = tight.difference_transform(true).unwrap();
        assert!(transform.is_empty());
        assert!(matches!(
            transform.average(),
            Err(KimonoError::EmptyTransform)
        ));
    }

    #[test]
    fn test_motif_from_structure_file() {
        let (path, _temp) = TestFile::structure_01().create_temp().unwrap();
        let motif = StructuralMotif::from_structure(
            ser4(),
            Path::new(&path),
            backend(),
            MotifParams::default(),
        )
        .unwrap();

        // 12 Å around SER4 reaches MET1 and TYR7 (11.4 away) but not LEU8 (15.2)
        assert_eq!(motif.graph().node_count(), 9);
        assert_eq!(
            motif.node_ids(),
            [
                "A:MET:1", "A:ALA:2", "A:GLY:3", "A:SER:4", "A:LYS:5", "A:THR:6", "A:TYR:7",
                "A:LYS:20"
            ]
        );
        assert_eq!(motif.difference_transform(true).unwrap().sum(), 12);
    }
}
