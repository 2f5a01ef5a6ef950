//! Analysis configuration, loaded from JSON.
//!
//! Every field is optional in the file; missing fields take the defaults
//! below. [`MotifAnalysisConfig::resolve`] validates the values and works out
//! the concrete dataset and structure paths, failing before any data is read.
//!
//! ```json
//! {
//!   "data_dir": "data",
//!   "use_dataset": "dbptm",
//!   "radius": 10.0,
//!   "species_filter": ["human"],
//!   "max_sites": 200
//! }
//! ```

use std::fs;
use std::path::{Path, PathBuf};

use bon::Builder;
use kimono_core::{GraphConfig, KimonoError, MotifParams, Result, DEFAULT_RADIUS};
use kimono_io::dbptm::{DbPtmFilter, DEFAULT_MAX_SITES};
use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::structure::AlphaFoldParams;

/// Structure directory used when none of the path options are set.
pub const DEFAULT_STRUCTURE_DIR: &str = "data/structures";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum DatasetKind {
    #[default]
    #[serde(rename = "dbptm", alias = "dbPTM")]
    DbPtm,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StructureFormat {
    #[default]
    Pdb,
    Cif,
}

impl StructureFormat {
    fn extension(self) -> &'static str {
        match self {
            StructureFormat::Pdb => "pdb",
            StructureFormat::Cif => "cif",
        }
    }
}

#[derive(Builder, Debug, Clone, PartialEq, Serialize, Deserialize, Validate)]
#[serde(default, deny_unknown_fields)]
pub struct MotifAnalysisConfig {
    /// Root for `dbptm/dbptm.csv` and `structures/` when the specific paths are unset.
    pub data_dir: Option<PathBuf>,
    pub dataset_path: Option<PathBuf>,
    #[builder(default)]
    pub use_dataset: DatasetKind,

    pub structure_path: Option<PathBuf>,
    /// Takes precedence over `structure_path`.
    pub alphafold_structure_dir: Option<PathBuf>,
    #[builder(default)]
    pub structure_format: StructureFormat,

    #[builder(default = true)]
    pub af_ignore_fragments: bool,
    #[builder(default = 3)]
    #[validate(range(min = 1))]
    pub af_model_version: u32,
    #[builder(default = "pdb.gz".to_string())]
    #[validate(length(min = 1))]
    pub af_file_extension: String,

    #[builder(default = DEFAULT_RADIUS)]
    #[validate(range(exclusive_min = 0.0))]
    pub radius: f64,
    #[validate(range(min = 0.0, max = 1.0))]
    pub rsa_threshold: Option<f64>,
    /// Adds an edge between residues closer than this, on top of peptide bonds.
    #[validate(range(exclusive_min = 0.0))]
    pub distance_threshold: Option<f64>,

    #[builder(default = DEFAULT_MAX_SITES)]
    #[validate(range(min = 1))]
    pub max_sites: usize,
    #[validate(length(min = 1))]
    pub species_filter: Option<Vec<String>>,
    #[builder(default)]
    pub include_isoforms: bool,

    #[serde(skip)]
    #[builder(skip)]
    create_missing_dirs: bool,
}

impl Default for MotifAnalysisConfig {
    fn default() -> Self {
        MotifAnalysisConfig::builder().build()
    }
}

impl MotifAnalysisConfig {
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let contents = fs::read_to_string(path)?;
        Self::from_json_str(&contents).map_err(|e| match e {
            KimonoError::InvalidConfig(msg) => {
                KimonoError::InvalidConfig(format!("{}: {msg}", path.display()))
            }
            other => other,
        })
    }

    pub fn from_json_str(contents: &str) -> Result<Self> {
        serde_json::from_str(contents).map_err(|e| KimonoError::InvalidConfig(e.to_string()))
    }

    fn structure_dir(&self) -> PathBuf {
        self.alphafold_structure_dir
            .clone()
            .or_else(|| self.structure_path.clone())
            .or_else(|| self.data_dir.as_ref().map(|dir| dir.join("structures")))
            .unwrap_or_else(|| PathBuf::from(DEFAULT_STRUCTURE_DIR))
    }

    fn dataset_path(&self) -> Option<PathBuf> {
        match self.use_dataset {
            DatasetKind::DbPtm => self.dataset_path.clone().or_else(|| {
                self.data_dir
                    .as_ref()
                    .map(|dir| dir.join("dbptm").join("dbptm.csv"))
            }),
        }
    }

    /// Checks the values and fixes the dataset and structure locations.
    pub fn resolve(self) -> Result<ResolvedConfig> {
        self.validate()
            .map_err(|e| KimonoError::InvalidConfig(e.to_string()))?;

        let format = self.structure_format.extension();
        if !self.af_file_extension.starts_with(format) {
            return Err(KimonoError::InvalidConfig(format!(
                "af_file_extension `{}` does not match structure_format `{format}`",
                self.af_file_extension
            )));
        }

        let dataset_path = self.dataset_path().ok_or_else(|| {
            KimonoError::InvalidConfig("set either dataset_path or data_dir".to_string())
        })?;

        let structure_dir = self.structure_dir();
        if !structure_dir.is_dir() {
            if self.create_missing_dirs {
                log::info!("creating structure directory {}", structure_dir.display());
                fs::create_dir_all(&structure_dir)?;
            } else {
                return Err(KimonoError::InvalidConfig(format!(
                    "structure directory {} does not exist",
                    structure_dir.display()
                )));
            }
        }

        let species = self
            .species_filter
            .map(|names| names.iter().map(|s| s.to_lowercase()).collect());

        Ok(ResolvedConfig {
            dataset: self.use_dataset,
            dataset_path,
            structure_dir,
            alphafold: AlphaFoldParams {
                ignore_fragments: self.af_ignore_fragments,
                model_version: self.af_model_version,
                file_extension: self.af_file_extension,
            },
            motif: MotifParams::builder()
                .radius(self.radius)
                .maybe_rsa_threshold(self.rsa_threshold)
                .build(),
            graph: GraphConfig::builder()
                .maybe_distance_threshold(self.distance_threshold)
                .build(),
            filter: DbPtmFilter::builder()
                .maybe_species(species)
                .max_sites(self.max_sites)
                .include_isoforms(self.include_isoforms)
                .build(),
        })
    }
}

#[cfg(test)]
impl MotifAnalysisConfig {
    pub(crate) fn with_create_missing_dirs(mut self, create: bool) -> Self {
        self.create_missing_dirs = create;
        self
    }
}

/// A validated configuration with concrete paths.
#[derive(Debug, Clone)]
pub struct ResolvedConfig {
    dataset: DatasetKind,
    dataset_path: PathBuf,
    structure_dir: PathBuf,
    alphafold: AlphaFoldParams,
    motif: MotifParams,
    graph: GraphConfig,
    filter: DbPtmFilter,
}

impl ResolvedConfig {
    pub fn dataset(&self) -> DatasetKind {
        self.dataset
    }

    pub fn dataset_path(&self) -> &Path {
        &self.dataset_path
    }

    pub fn structure_dir(&self) -> &Path {
        &self.structure_dir
    }

    pub fn alphafold(&self) -> &AlphaFoldParams {
        &self.alphafold
    }

    pub fn motif(&self) -> &MotifParams {
        &self.motif
    }

    pub fn graph(&self) -> &GraphConfig {
        &self.graph
    }

    pub fn filter(&self) -> &DbPtmFilter {
        &self.filter
    }
}
