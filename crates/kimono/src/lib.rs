//! # kimono
//!
//! Batch structural-motif analysis of post-translational modification sites.
//!
//! A [`config::MotifAnalysisConfig`] names a PTM dataset and a directory of
//! AlphaFold structures. [`analysis::MotifAnalysis`] loads the dataset,
//! builds one residue graph per structure and one
//! [`StructuralMotif`](kimono_core::StructuralMotif) per site, and reports
//! the sites for which no structure was found.
//!
pub mod analysis;
pub mod config;
pub mod structure;
pub mod summary;
