use std::fs;
use std::path::PathBuf;

use anyhow::{Context, Result};
use kimono::analysis::MotifAnalysis;
use kimono::config::MotifAnalysisConfig;

pub fn execute(config: PathBuf, output: Option<PathBuf>, zeroed: bool) -> Result<()> {
    let resolved = MotifAnalysisConfig::from_file(&config)?.resolve()?;
    let analysis = MotifAnalysis::new(resolved)?;
    let summary = serde_json::to_string_pretty(&analysis.summary(zeroed)?)?;

    match output {
        Some(path) => {
            fs::write(&path, summary)
                .with_context(|| format!("failed to write {}", path.display()))?;
            log::info!("wrote summary to {}", path.display());
        }
        None => println!("{summary}"),
    }
    Ok(())
}
