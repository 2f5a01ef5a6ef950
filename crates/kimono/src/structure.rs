//! AlphaFold structure file resolution.

use std::path::{Path, PathBuf};

use kimono_core::{KimonoError, PtmSite, Result};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AlphaFoldParams {
    /// Always use fragment 1. Multi-fragment models are not supported yet.
    pub ignore_fragments: bool,
    pub model_version: u32,
    pub file_extension: String,
}

impl Default for AlphaFoldParams {
    fn default() -> Self {
        AlphaFoldParams {
            ignore_fragments: true,
            model_version: 3,
            file_extension: "pdb.gz".to_string(),
        }
    }
}

/// Maps accessions to `AF-{acc}-F{fragment}-model_v{version}.{ext}` files in a directory.
#[derive(Debug, Clone)]
pub struct AlphaFoldResolver {
    structure_dir: PathBuf,
    params: AlphaFoldParams,
}

impl AlphaFoldResolver {
    pub fn new(structure_dir: impl Into<PathBuf>, params: AlphaFoldParams) -> Self {
        AlphaFoldResolver {
            structure_dir: structure_dir.into(),
            params,
        }
    }

    pub fn structure_dir(&self) -> &Path {
        &self.structure_dir
    }

    pub fn filename(&self, acc_id: &str) -> Result<String> {
        if !self.params.ignore_fragments {
            return Err(KimonoError::NotImplemented(
                "multiple fragments for AlphaFold structures".to_string(),
            ));
        }
        let fragment = 1;
        Ok(format!(
            "AF-{}-F{}-model_v{}.{}",
            acc_id, fragment, self.params.model_version, self.params.file_extension
        ))
    }

    /// Expected structure path for `site`; [`KimonoError::MissingStructure`] if absent.
    pub fn resolve(&self, site: &PtmSite) -> Result<PathBuf> {
        let path = self.structure_dir.join(self.filename(site.acc_id())?);
        if !path.is_file() {
            return Err(KimonoError::MissingStructure {
                acc_id: site.acc_id().to_string(),
                path,
            });
        }
        Ok(path)
    }
}
