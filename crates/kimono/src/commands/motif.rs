use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{Context, Result};
use kimono::summary::MotifSummary;
use kimono_core::{GraphConfig, MotifParams, PdbtbxBackend, PtmSite, StructuralMotif};

pub struct MotifArgs {
    pub structure: PathBuf,
    pub residue: String,
    pub position: u32,
    pub chain: String,
    pub mod_type: String,
    pub radius: f64,
    pub distance_threshold: Option<f64>,
    pub zeroed: bool,
}

pub fn execute(args: MotifArgs) -> Result<()> {
    let name = args
        .structure
        .file_name()
        .and_then(|name| name.to_str())
        .and_then(|name| name.split('.').next())
        .context("structure path has no file name")?
        .to_string();

    let site = PtmSite::new(
        name.clone(),
        name,
        &args.residue,
        args.position,
        args.mod_type,
        Some(&args.chain),
    )?;
    let backend = PdbtbxBackend::new(
        GraphConfig::builder()
            .maybe_distance_threshold(args.distance_threshold)
            .build(),
    );
    let params = MotifParams::builder().radius(args.radius).build();
    let motif = StructuralMotif::from_structure(site, &args.structure, Arc::new(backend), params)?;

    let summary = MotifSummary::from_motif(motif.centre(), &motif, args.zeroed)?;
    println!("{}", serde_json::to_string_pretty(&summary)?);
    Ok(())
}
