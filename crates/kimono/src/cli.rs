use std::path::PathBuf;

use super::commands;
use clap::{ArgAction, Parser, Subcommand};
use kimono_core::DEFAULT_RADIUS;

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Build motifs for every site of a dataset described by a JSON config
    Run {
        #[arg(short, long)]
        config: PathBuf,
        /// Write the summary here instead of stdout
        #[arg(short, long)]
        output: Option<PathBuf>,
        #[arg(long, default_value_t = true, action = ArgAction::Set)]
        zeroed: bool,
    },
    /// Build a single motif from one structure file
    Motif {
        #[arg(short, long)]
        structure: PathBuf,
        /// One- or three-letter residue code
        #[arg(short, long)]
        residue: String,
        #[arg(short, long)]
        position: u32,
        #[arg(long, default_value = "A")]
        chain: String,
        #[arg(long, default_value = "phosphorylation")]
        mod_type: String,
        #[arg(long, default_value_t = DEFAULT_RADIUS)]
        radius: f64,
        #[arg(long)]
        distance_threshold: Option<f64>,
        #[arg(long, default_value_t = true, action = ArgAction::Set)]
        zeroed: bool,
    },
}

impl Cli {
    pub fn execute(self) -> anyhow::Result<()> {
        match self.command {
            Commands::Run {
                config,
                output,
                zeroed,
            } => commands::run::execute(config, output, zeroed),
            Commands::Motif {
                structure,
                residue,
                position,
                chain,
                mod_type,
                radius,
                distance_threshold,
                zeroed,
            } => commands::motif::execute(commands::motif::MotifArgs {
                structure,
                residue,
                position,
                chain,
                mod_type,
                radius,
                distance_threshold,
                zeroed,
            }),
        }
    }
}
