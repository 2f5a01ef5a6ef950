use std::fs;
use std::path::{Path, PathBuf};
use tempfile::{Builder, NamedTempFile};

/// Accession of the synthetic peptide in [`TestFile::structure_01`].
pub const STRUCTURE_01_ACCESSION: &str = "P12345";

#[derive(Debug)]
pub struct TestFile {
    filebinary: &'static [u8],
    filename: &'static str,
    suffix: &'static str,
}

impl TestFile {
    /// Nine-residue chain A peptide (MET1..LEU8 along x, LYS20 off-axis) in AlphaFold naming.
    pub fn structure_01() -> Self {
        Self {
            filebinary: include_bytes!("../data/structures/AF-P12345-F1-model_v3.pdb"),
            filename: "AF-P12345-F1-model_v3.pdb",
            suffix: "pdb",
        }
    }

    /// Five dbPTM rows: two human sites on P12345, one human site without a
    /// structure, one mouse site and one isoform.
    pub fn dbptm_01() -> Self {
        Self {
            filebinary: include_bytes!("../data/dbptm/dbptm_sample.tsv"),
            filename: "dbptm_sample.tsv",
            suffix: "tsv",
        }
    }

    pub fn bytes(&self) -> &'static [u8] {
        self.filebinary
    }

    pub fn filename(&self) -> &'static str {
        self.filename
    }

    pub fn create_temp(&self) -> std::io::Result<(String, NamedTempFile)> {
        let temp = Builder::new()
            .suffix(&format!(".{}", self.suffix))
            .tempfile()?;

        fs::write(&temp, self.filebinary)?;
        let path = temp.path().to_string_lossy().into_owned();

        Ok((path, temp))
    }

    /// Writes the fixture into `dir` under its original file name.
    pub fn write_into(&self, dir: &Path) -> std::io::Result<PathBuf> {
        let path = dir.join(self.filename);
        fs::write(&path, self.filebinary)?;
        Ok(path)
    }
}
