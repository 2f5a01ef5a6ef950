use std::fs::File;
use std::path::Path;

use flate2::read::GzDecoder;
use itertools::Itertools;
use pdbtbx::{Atom, PDB};

use super::{GraphBackend, GraphConfig, ResidueGraph, ResidueNode};
use crate::error::{KimonoError, Result};

/// Builds residue graphs from PDB / mmCIF files with `pdbtbx`.
///
/// Each residue is placed at its `CA` atom, or at the centroid of its atoms
/// when there is no `CA`. Gzipped files (`.pdb.gz`, `.cif.gz`) are inflated
/// to a temporary file first.
#[derive(Debug, Clone, Default)]
pub struct PdbtbxBackend {
    config: GraphConfig,
}

impl PdbtbxBackend {
    pub fn new(config: GraphConfig) -> Self {
        PdbtbxBackend { config }
    }

    pub fn config(&self) -> &GraphConfig {
        &self.config
    }
}

impl GraphBackend for PdbtbxBackend {
    fn build_graph(&self, path: &Path) -> Result<ResidueGraph> {
        let pdb = open_structure(path)?;
        let residues = residue_nodes(&pdb, self.config.include_hetero);
        log::debug!(
            "built residue graph with {} nodes from {}",
            residues.len(),
            path.display()
        );
        Ok(ResidueGraph::from_residues(
            residues,
            self.config.distance_threshold,
        ))
    }
}

// the PDB API requires us to iterate PDB --> Chain --> Residue --> Atom;
// each residue collapses to a single node
fn residue_nodes(pdb: &PDB, include_hetero: bool) -> Vec<ResidueNode> {
    pdb.chains()
        .flat_map(|chain| {
            let chain_id = chain.id().to_string();
            chain.residues().filter_map(move |residue| {
                let atoms: Vec<&Atom> = residue.atoms().collect();
                if atoms.is_empty() || (!include_hetero && atoms.iter().all(|a| a.hetero())) {
                    return None;
                }
                let (res_number, insertion_code) = residue.id();
                Some(ResidueNode::new(
                    chain_id.clone(),
                    residue.name().unwrap_or_default(),
                    res_number as i64,
                    insertion_code.map(str::to_string),
                    representative_coords(&atoms),
                ))
            })
        })
        .collect()
}

fn representative_coords(atoms: &[&Atom]) -> [f32; 3] {
    if let Some(ca) = atoms.iter().find(|atom| atom.name() == "CA") {
        let (x, y, z) = ca.pos();
        return [x as f32, y as f32, z as f32];
    }
    let n = atoms.len() as f64;
    let (sx, sy, sz) = atoms.iter().fold((0.0, 0.0, 0.0), |(sx, sy, sz), atom| {
        let (x, y, z) = atom.pos();
        (sx + x, sy + y, sz + z)
    });
    [(sx / n) as f32, (sy / n) as f32, (sz / n) as f32]
}

fn open_structure(path: &Path) -> Result<PDB> {
    if path.extension().is_some_and(|ext| ext == "gz") {
        // pdbtbx picks the parser from the extension under the .gz
        let format = path
            .file_stem()
            .map(Path::new)
            .and_then(Path::extension)
            .and_then(|ext| ext.to_str())
            .unwrap_or("pdb");
        let mut decoder = GzDecoder::new(File::open(path)?);
        let mut inflated = tempfile::Builder::new()
            .suffix(&format!(".{format}"))
            .tempfile()?;
        std::io::copy(&mut decoder, &mut inflated)?;
        return read_plain(inflated.path());
    }
    read_plain(path)
}

fn read_plain(path: &Path) -> Result<PDB> {
    let filename = path.to_str().ok_or_else(|| {
        KimonoError::Structure(format!("non UTF-8 path {}", path.display()))
    })?;
    let (pdb, _warnings) = pdbtbx::open(filename).map_err(|errors| {
        KimonoError::Structure(format!(
            "{}: {}",
            path.display(),
            errors.iter().map(ToString::to_string).join("; ")
        ))
    })?;
    Ok(pdb)
}

#[cfg(test)]
mod tests {
    use super::*;
    use flate2::write::GzEncoder;
    use flate2::Compression;
    use kimono_test_data::TestFile;
    use std::io::Write;

    #[test]
    fn test_build_graph_from_pdb() {
        let (path, _temp) = TestFile::structure_01().create_temp().unwrap();
        let graph = PdbtbxBackend::default()
            .build_graph(Path::new(&path))
            .unwrap();

        assert_eq!(graph.node_count(), 9);
        // MET1..LEU8 are bonded in sequence, LYS20 follows a numbering gap
        assert_eq!(graph.edge_count(), 7);
        assert_eq!(graph.neighbors("A:SER:4"), ["A:GLY:3", "A:LYS:5"]);

        let ser = graph.node("A:SER:4").unwrap();
        assert_eq!(ser.residue_name, "SER");
        assert_eq!(ser.residue_number, 4);
        assert!((ser.coords[0] - 11.4).abs() < 1e-3);
        assert!(ser.coords[1].abs() < 1e-3);
    }

    #[test]
    fn test_build_graph_with_distance_edges() {
        let (path, _temp) = TestFile::structure_01().create_temp().unwrap();
        let config = GraphConfig::builder().distance_threshold(6.5).build();
        let graph = PdbtbxBackend::new(config)
            .build_graph(Path::new(&path))
            .unwrap();
        assert_eq!(graph.neighbors("A:LYS:20"), ["A:SER:4"]);
        assert_eq!(graph.edge_count(), 8);
    }

    #[test]
    fn test_build_graph_from_gzip() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("AF-P12345-F1-model_v3.pdb.gz");

        let mut encoder = GzEncoder::new(File::create(&path).unwrap(), Compression::default());
        encoder
            .write_all(TestFile::structure_01().bytes())
            .unwrap();
        encoder.finish().unwrap();

        let graph = PdbtbxBackend::default().build_graph(&path).unwrap();
        assert_eq!(graph.node_count(), 9);
        assert!(graph.contains("A:LYS:20"));
    }

    #[test]
    fn test_missing_file_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let result = PdbtbxBackend::default().build_graph(&dir.path().join("absent.pdb"));
        assert!(result.is_err());
    }
}
