//! Serializable results of an analysis run.

use std::path::PathBuf;

use kimono_core::{PtmSite, Result, StructuralMotif};
use serde::Serialize;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AnalysisSummary {
    pub dataset_path: PathBuf,
    pub structure_dir: PathBuf,
    pub radius: f64,
    pub zeroed: bool,
    /// Sites kept after filtering, with or without a structure.
    pub sites: usize,
    pub motifs: Vec<MotifSummary>,
    pub failed: Vec<FailedSite>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MotifSummary {
    pub key: String,
    pub acc_id: String,
    pub centre: String,
    /// `None` for modification types without a symbol.
    pub label: Option<String>,
    pub radius: f64,
    pub nodes: Vec<String>,
    pub differences: Vec<i64>,
    pub sum: i64,
    pub max: Option<i64>,
    pub average: Option<f64>,
}

impl MotifSummary {
    pub fn from_motif(key: &str, motif: &StructuralMotif, zeroed: bool) -> Result<Self> {
        let transform = motif.difference_transform(zeroed)?;
        Ok(MotifSummary {
            key: key.to_string(),
            acc_id: motif.site().acc_id().to_string(),
            centre: motif.centre().to_string(),
            label: motif.site().display_label().ok(),
            radius: motif.radius(),
            nodes: motif.node_ids(),
            differences: transform.differences().to_vec(),
            sum: transform.sum(),
            max: transform.max(),
            average: transform.average().ok(),
        })
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FailedSite {
    pub entry_name: String,
    pub acc_id: String,
    pub node_id: String,
}

impl From<&PtmSite> for FailedSite {
    fn from(site: &PtmSite) -> Self {
        FailedSite {
            entry_name: site.entry_name().to_string(),
            acc_id: site.acc_id().to_string(),
            node_id: site.node_id(),
        }
    }
}
