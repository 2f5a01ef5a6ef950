//! kimono-io
//!
//! - readers for PTM site datasets (dbPTM).
//!
pub mod dbptm;

pub use dbptm::{load_dbptm, read_dbptm, DbPtmFilter, DbPtmRecord, DBPTM_COLUMNS};
