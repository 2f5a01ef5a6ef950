//! Residue-level structure graphs.
//!
//! A [`ResidueGraph`] holds one node per residue, named by the canonical
//! `CHAIN:RES:POS` id, and carrying the coordinates of the residue's
//! representative atom. Graphs are built by a [`GraphBackend`] from a
//! structure file, or assembled directly from nodes.
//!
mod backend;
mod pdb;

pub use backend::{GraphBackend, GraphConfig};
pub use pdb::PdbtbxBackend;

use itertools::Itertools;
use petgraph::graph::{NodeIndex, UnGraph};
use std::collections::HashMap;

use crate::node_id::node_label;

#[derive(Debug, Clone, PartialEq)]
pub struct ResidueNode {
    pub node_id: String,
    pub chain_id: String,
    pub residue_name: String,
    pub residue_number: i64,
    pub insertion_code: Option<String>,
    pub coords: [f32; 3],
}

impl ResidueNode {
    pub fn new(
        chain_id: impl Into<String>,
        residue_name: impl Into<String>,
        residue_number: i64,
        insertion_code: Option<String>,
        coords: [f32; 3],
    ) -> Self {
        let chain_id = chain_id.into();
        let residue_name = residue_name.into().to_uppercase();
        let node_id = node_label(
            &chain_id,
            &residue_name,
            residue_number,
            insertion_code.as_deref(),
        );
        ResidueNode {
            node_id,
            chain_id,
            residue_name,
            residue_number,
            insertion_code,
            coords,
        }
    }

    pub fn distance_to(&self, point: [f32; 3]) -> f64 {
        let dx = f64::from(self.coords[0] - point[0]);
        let dy = f64::from(self.coords[1] - point[1]);
        let dz = f64::from(self.coords[2] - point[2]);
        (dx * dx + dy * dy + dz * dz).sqrt()
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ResidueEdge {
    /// Sequence neighbours on the same chain.
    PeptideBond,
    /// Representative atoms closer than the configured threshold.
    Distance(f32),
}

#[derive(Debug, Clone, Default)]
pub struct ResidueGraph {
    graph: UnGraph<ResidueNode, ResidueEdge>,
    node_index_map: HashMap<String, NodeIndex>,
}

impl ResidueGraph {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds a graph from residues in structure order.
    ///
    /// Consecutive residues on one chain whose numbers differ by one are
    /// joined by a peptide bond. With a `distance_threshold`, every other
    /// pair closer than the threshold gets a distance edge.
    pub fn from_residues(residues: Vec<ResidueNode>, distance_threshold: Option<f64>) -> Self {
        let mut graph = ResidueGraph::new();
        let indices: Vec<NodeIndex> = residues.into_iter().map(|r| graph.add_node(r)).collect();

        for (a, b) in indices.iter().tuple_windows() {
            let (left, right) = (&graph.graph[*a], &graph.graph[*b]);
            if left.chain_id == right.chain_id && right.residue_number - left.residue_number == 1 {
                graph.graph.update_edge(*a, *b, ResidueEdge::PeptideBond);
            }
        }

        if let Some(threshold) = distance_threshold {
            for (a, b) in indices.iter().tuple_combinations() {
                if graph.graph.find_edge(*a, *b).is_some() {
                    continue;
                }
                let distance = graph.graph[*a].distance_to(graph.graph[*b].coords);
                if distance <= threshold {
                    graph
                        .graph
                        .add_edge(*a, *b, ResidueEdge::Distance(distance as f32));
                }
            }
        }
        graph
    }

    /// Adds a residue. A node with the same id is replaced in place.
    pub fn add_node(&mut self, node: ResidueNode) -> NodeIndex {
        if let Some(&idx) = self.node_index_map.get(&node.node_id) {
            self.graph[idx] = node;
            return idx;
        }
        let id = node.node_id.clone();
        let idx = self.graph.add_node(node);
        self.node_index_map.insert(id, idx);
        idx
    }

    /// Connects two existing nodes. Unknown ids are ignored.
    pub fn add_edge(&mut self, source: &str, target: &str, edge: ResidueEdge) {
        if let (Some(&src_idx), Some(&tgt_idx)) = (
            self.node_index_map.get(source),
            self.node_index_map.get(target),
        ) {
            self.graph.update_edge(src_idx, tgt_idx, edge);
        }
    }

    pub fn contains(&self, node_id: &str) -> bool {
        self.node_index_map.contains_key(node_id)
    }

    pub fn node(&self, node_id: &str) -> Option<&ResidueNode> {
        self.node_index_map
            .get(node_id)
            .map(|&idx| &self.graph[idx])
    }

    pub fn nodes(&self) -> impl Iterator<Item = &ResidueNode> {
        self.graph.node_weights()
    }

    pub fn node_count(&self) -> usize {
        self.graph.node_count()
    }

    pub fn edge_count(&self) -> usize {
        self.graph.edge_count()
    }

    pub fn is_empty(&self) -> bool {
        self.graph.node_count() == 0
    }

    /// Node ids ordered by chain, then residue number.
    pub fn node_ids(&self) -> Vec<String> {
        self.nodes()
            .sorted_by(|a, b| {
                (&a.chain_id, a.residue_number, &a.insertion_code).cmp(&(
                    &b.chain_id,
                    b.residue_number,
                    &b.insertion_code,
                ))
            })
            .map(|node| node.node_id.clone())
            .collect()
    }

    /// Ids of the nodes sharing an edge with `node_id`.
    pub fn neighbors(&self, node_id: &str) -> Vec<&str> {
        match self.node_index_map.get(node_id) {
            Some(&idx) => self
                .graph
                .neighbors(idx)
                .map(|n| self.graph[n].node_id.as_str())
                .sorted()
                .collect(),
            None => Vec::new(),
        }
    }

    /// The subgraph induced by the nodes matching `keep`.
    ///
    /// Edges survive when both of their endpoints do.
    pub fn induced_subgraph<F>(&self, keep: F) -> ResidueGraph
    where
        F: Fn(&ResidueNode) -> bool,
    {
        let graph = self.graph.filter_map(
            |_, node| keep(node).then(|| node.clone()),
            |_, edge| Some(*edge),
        );
        let node_index_map = graph
            .node_indices()
            .map(|idx| (graph[idx].node_id.clone(), idx))
            .collect();
        ResidueGraph {
            graph,
            node_index_map,
        }
    }

    /// All nodes within `radius` (inclusive) of `centre`.
    pub fn within_radius(&self, centre: [f32; 3], radius: f64) -> ResidueGraph {
        self.induced_subgraph(|node| node.distance_to(centre) <= radius)
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;

    /// Residues 1..=5 on chain A spaced 3.8 apart along x, plus A:LYS:20 off-axis.
    pub(crate) fn line_graph(distance_threshold: Option<f64>) -> ResidueGraph {
        let mut residues: Vec<ResidueNode> = [
            ("MET", 0.0),
            ("ALA", 3.8),
            ("GLY", 7.6),
            ("SER", 11.4),
            ("LYS", 15.2),
        ]
        .iter()
        .enumerate()
        .map(|(i, (name, x))| ResidueNode::new("A", *name, i as i64 + 1, None, [*x, 0.0, 0.0]))
        .collect();
        residues.push(ResidueNode::new("A", "LYS", 20, None, [11.4, 6.0, 0.0]));
        ResidueGraph::from_residues(residues, distance_threshold)
    }

    #[test]
    fn test_from_residues_peptide_bonds() {
        let graph = line_graph(None);
        assert_eq!(graph.node_count(), 6);
        // 1-2, 2-3, 3-4, 4-5; nothing to residue 20
        assert_eq!(graph.edge_count(), 4);
        assert_eq!(graph.neighbors("A:GLY:3"), ["A:ALA:2", "A:SER:4"]);
        assert!(graph.neighbors("A:LYS:20").is_empty());
    }

    #[test]
    fn test_distance_edges() {
        let graph = line_graph(Some(6.5));
        // A:LYS:20 is 6.0 from A:SER:4; SER4-LYS5 is already bonded
        assert_eq!(graph.neighbors("A:LYS:20"), ["A:SER:4"]);
        assert_eq!(graph.edge_count(), 5);
    }

    #[test]
    fn test_lookup_and_ordering() {
        let graph = line_graph(None);
        assert!(graph.contains("A:SER:4"));
        assert!(!graph.contains("A:SER:5"));
        assert_eq!(graph.node("A:SER:4").unwrap().coords, [11.4, 0.0, 0.0]);
        assert_eq!(
            graph.node_ids(),
            ["A:MET:1", "A:ALA:2", "A:GLY:3", "A:SER:4", "A:LYS:5", "A:LYS:20"]
        );
    }

    #[test]
    fn test_within_radius() {
        let graph = line_graph(None);
        let centre = graph.node("A:SER:4").unwrap().coords;

        let sub = graph.within_radius(centre, 4.0);
        assert_eq!(sub.node_ids(), ["A:GLY:3", "A:SER:4", "A:LYS:5"]);
        assert_eq!(sub.edge_count(), 2);

        let sub = graph.within_radius(centre, 8.0);
        assert_eq!(
            sub.node_ids(),
            ["A:ALA:2", "A:GLY:3", "A:SER:4", "A:LYS:5", "A:LYS:20"]
        );
        assert!(sub.node("A:MET:1").is_none());
    }

    #[test]
    fn test_add_node_replaces_duplicates() {
        let mut graph = ResidueGraph::new();
        graph.add_node(ResidueNode::new("A", "SER", 4, None, [0.0, 0.0, 0.0]));
        graph.add_node(ResidueNode::new("A", "SER", 4, None, [1.0, 0.0, 0.0]));
        assert_eq!(graph.node_count(), 1);
        assert_eq!(graph.node("A:SER:4").unwrap().coords, [1.0, 0.0, 0.0]);

        graph.add_node(ResidueNode::new("A", "ser", 5, None, [2.0, 0.0, 0.0]));
        graph.add_edge("A:SER:4", "A:SER:5", ResidueEdge::PeptideBond);
        graph.add_edge("A:SER:4", "A:XXX:9", ResidueEdge::PeptideBond);
        assert_eq!(graph.edge_count(), 1);
    }
}
