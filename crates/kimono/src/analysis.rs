//! Batch motif analysis over a PTM dataset.

use std::collections::{BTreeMap, HashMap};
use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{Context, Result};
use kimono_core::{
    DifferenceTransform, GraphBackend, KimonoError, PdbtbxBackend, PtmSite, ResidueGraph,
    StructuralMotif,
};
use kimono_io::dbptm::{load_dbptm, DbPtmRecord};

use crate::config::{DatasetKind, ResolvedConfig};
use crate::structure::AlphaFoldResolver;
use crate::summary::{AnalysisSummary, FailedSite, MotifSummary};

/// Loads the configured dataset and builds one motif per site with a structure.
///
/// Sites whose structure file is missing are set aside in
/// [`MotifAnalysis::failed_sites`]. Any other error aborts the analysis.
/// Motifs are keyed by `"{entry_name}-{node_id}"`; a later site with the
/// same key replaces the earlier one.
#[derive(Debug)]
pub struct MotifAnalysis {
    config: ResolvedConfig,
    sites: Vec<PtmSite>,
    motifs: BTreeMap<String, StructuralMotif>,
    failed_sites: Vec<PtmSite>,
}

impl MotifAnalysis {
    pub fn new(config: ResolvedConfig) -> Result<Self> {
        let backend = Arc::new(PdbtbxBackend::new(config.graph().clone()));
        Self::with_backend(config, backend)
    }

    pub fn with_backend(config: ResolvedConfig, backend: Arc<dyn GraphBackend>) -> Result<Self> {
        let records = match config.dataset() {
            DatasetKind::DbPtm => load_dbptm(config.dataset_path(), config.filter())?,
        };
        let sites = records
            .iter()
            .map(site_from_record)
            .collect::<Result<Vec<_>>>()?;
        log::info!("loaded {} sites", sites.len());

        let resolver = AlphaFoldResolver::new(config.structure_dir(), config.alphafold().clone());
        let mut graphs: HashMap<PathBuf, Arc<ResidueGraph>> = HashMap::new();
        let mut motifs = BTreeMap::new();
        let mut failed_sites = Vec::new();

        for site in &sites {
            let path = match resolver.resolve(site) {
                Ok(path) => path,
                Err(KimonoError::MissingStructure { acc_id, path }) => {
                    log::warn!("no structure for {} at {}", acc_id, path.display());
                    failed_sites.push(site.clone());
                    continue;
                }
                Err(e) => return Err(e.into()),
            };

            let graph = match graphs.get(&path) {
                Some(graph) => Arc::clone(graph),
                None => {
                    let graph = Arc::new(
                        backend
                            .build_graph(&path)
                            .with_context(|| format!("building graph for {}", site.acc_id()))?,
                    );
                    graphs.insert(path, Arc::clone(&graph));
                    graph
                }
            };

            let motif = StructuralMotif::from_graph(
                site.clone(),
                graph,
                Arc::clone(&backend),
                config.motif().clone(),
            )
            .with_context(|| format!("building motif for {} {}", site.acc_id(), site.node_id()))?;

            let key = format!("{}-{}", site.entry_name(), site.node_id());
            if motifs.insert(key.clone(), motif).is_some() {
                log::debug!("replaced motif {key}");
            }
        }

        log::info!(
            "built {} motifs from {} structures, {} sites without a structure",
            motifs.len(),
            graphs.len(),
            failed_sites.len()
        );

        Ok(MotifAnalysis {
            config,
            sites,
            motifs,
            failed_sites,
        })
    }

    pub fn config(&self) -> &ResolvedConfig {
        &self.config
    }

    pub fn sites(&self) -> &[PtmSite] {
        &self.sites
    }

    pub fn motifs(&self) -> &BTreeMap<String, StructuralMotif> {
        &self.motifs
    }

    pub fn motif(&self, key: &str) -> Option<&StructuralMotif> {
        self.motifs.get(key)
    }

    pub fn failed_sites(&self) -> &[PtmSite] {
        &self.failed_sites
    }

    pub fn difference_transform(
        &self,
        zeroed: bool,
    ) -> kimono_core::Result<BTreeMap<String, DifferenceTransform>> {
        self.motifs
            .iter()
            .map(|(key, motif)| Ok((key.clone(), motif.difference_transform(zeroed)?)))
            .collect()
    }

    pub fn summary(&self, zeroed: bool) -> kimono_core::Result<AnalysisSummary> {
        let motifs = self
            .motifs
            .iter()
            .map(|(key, motif)| MotifSummary::from_motif(key, motif, zeroed))
            .collect::<kimono_core::Result<Vec<_>>>()?;
        Ok(AnalysisSummary {
            dataset_path: self.config.dataset_path().to_path_buf(),
            structure_dir: self.config.structure_dir().to_path_buf(),
            radius: self.config.motif().radius,
            zeroed,
            sites: self.sites.len(),
            motifs,
            failed: self.failed_sites.iter().map(FailedSite::from).collect(),
        })
    }
}

fn site_from_record(record: &DbPtmRecord) -> Result<PtmSite> {
    let site = PtmSite::new(
        &record.entry_name,
        &record.acc_id,
        &record.residue.to_string(),
        record.position,
        &record.mod_type,
        None,
    )
    .with_context(|| format!("{} position {}", record.acc_id, record.position))?;
    Ok(site)
}
