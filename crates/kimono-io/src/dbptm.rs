//! dbPTM dataset reader.
//!
//! dbPTM exports are tab-separated with no header and six fixed columns. See
//! [`DBPTM_COLUMNS`]. Rows become [`DbPtmRecord`]s after species filtering,
//! truncation and isoform removal, applied in that order.
//!
//! The modified residue is read off the middle of the sequence window and is
//! not checked against the protein sequence at `position`.

use std::path::Path;
use std::sync::Arc;

use anyhow::{anyhow, Context, Result};
use bon::Builder;
use itertools::izip;
use polars::prelude::*;

pub const DBPTM_COLUMNS: [&str; 6] = [
    "entry_name",
    "acc_id",
    "position",
    "mod_type",
    "pmids",
    "seq_window",
];

pub const DEFAULT_MAX_SITES: usize = 1000;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DbPtmRecord {
    pub entry_name: String,
    pub acc_id: String,
    pub position: u32,
    pub mod_type: String,
    pub pmids: Option<String>,
    pub seq_window: String,
    pub species: String,
    pub residue: char,
}

#[derive(Builder, Debug, Clone, PartialEq, Eq)]
pub struct DbPtmFilter {
    /// Lower-case species names to keep, e.g. `human`.
    pub species: Option<Vec<String>>,
    #[builder(default = DEFAULT_MAX_SITES)]
    pub max_sites: usize,
    #[builder(default)]
    pub include_isoforms: bool,
}

impl Default for DbPtmFilter {
    fn default() -> Self {
        DbPtmFilter::builder().build()
    }
}

impl DbPtmFilter {
    fn keeps_species(&self, species: &str) -> bool {
        self.species
            .as_ref()
            .map_or(true, |keep| keep.iter().any(|s| s == species))
    }
}

/// Species is the last `_`-separated token of the entry name, lower-cased.
pub fn species_of(entry_name: &str) -> String {
    entry_name
        .rsplit('_')
        .next()
        .unwrap_or_default()
        .to_lowercase()
}

/// Isoform accessions carry a `-N` suffix.
pub fn is_isoform(acc_id: &str) -> bool {
    acc_id.contains('-')
}

/// Character at `floor(len / 2)` of the window.
pub fn residue_from_window(seq_window: &str) -> Option<char> {
    let len = seq_window.chars().count();
    seq_window.chars().nth(len / 2)
}

/// Reads a dbPTM export into a `DataFrame` with [`DBPTM_COLUMNS`].
pub fn read_dbptm(path: &Path) -> Result<DataFrame> {
    let schema = Schema::from_iter(DBPTM_COLUMNS.iter().map(|&name| {
        let dtype = match name {
            "position" => DataType::Int64,
            _ => DataType::String,
        };
        Field::new(name.into(), dtype)
    }));

    CsvReadOptions::default()
        .with_has_header(false)
        .with_schema(Some(Arc::new(schema)))
        .with_parse_options(
            CsvParseOptions::default()
                .with_separator(b'\t')
                .with_quote_char(None),
        )
        .try_into_reader_with_file_path(Some(path.to_path_buf()))
        .and_then(|reader| reader.finish())
        .with_context(|| format!("failed to read dbPTM table {}", path.display()))
}

struct Row {
    entry_name: String,
    acc_id: String,
    position: u32,
    mod_type: String,
    pmids: Option<String>,
    seq_window: String,
    species: String,
}

impl Row {
    fn into_record(self) -> Result<DbPtmRecord> {
        let residue = residue_from_window(&self.seq_window).ok_or_else(|| {
            anyhow!(
                "empty sequence window for {} position {}",
                self.acc_id,
                self.position
            )
        })?;
        Ok(DbPtmRecord {
            entry_name: self.entry_name,
            acc_id: self.acc_id,
            position: self.position,
            mod_type: self.mod_type,
            pmids: self.pmids,
            seq_window: self.seq_window,
            species: self.species,
            residue,
        })
    }
}

fn rows(df: &DataFrame) -> Result<Vec<Row>> {
    let entry_names = df.column("entry_name")?.str()?;
    let acc_ids = df.column("acc_id")?.str()?;
    let positions = df.column("position")?.i64()?;
    let mod_types = df.column("mod_type")?.str()?;
    let pmids = df.column("pmids")?.str()?;
    let windows = df.column("seq_window")?.str()?;

    izip!(entry_names, acc_ids, positions, mod_types, pmids, windows)
        .enumerate()
        .map(|(line, (entry_name, acc_id, position, mod_type, pmids, window))| -> Result<Row> {
            let line = line + 1;
            let entry_name = entry_name.ok_or_else(|| anyhow!("line {line}: missing entry_name"))?;
            let acc_id = acc_id.ok_or_else(|| anyhow!("line {line}: missing acc_id"))?;
            let position = position
                .and_then(|p| u32::try_from(p).ok())
                .ok_or_else(|| anyhow!("line {line}: missing or negative position"))?;
            Ok(Row {
                species: species_of(entry_name),
                entry_name: entry_name.to_string(),
                acc_id: acc_id.to_string(),
                position,
                mod_type: mod_type.unwrap_or_default().to_string(),
                pmids: pmids.map(str::to_string),
                seq_window: window.unwrap_or_default().to_string(),
            })
        })
        .collect()
}

/// Reads and filters a dbPTM export.
pub fn load_dbptm(path: &Path, filter: &DbPtmFilter) -> Result<Vec<DbPtmRecord>> {
    log::info!("Loading from {}", path.display());
    let df = read_dbptm(path)?;
    let total = df.height();

    let records = rows(&df)?
        .into_iter()
        .filter(|row| filter.keeps_species(&row.species))
        .take(filter.max_sites)
        .filter(|row| filter.include_isoforms || !is_isoform(&row.acc_id))
        .map(Row::into_record)
        .collect::<Result<Vec<_>>>()?;

    log::info!("kept {} of {} dbPTM rows", records.len(), total);
    Ok(records)
}
