//! TRN CLI - Train topology representing networks from the command line.

mod commands;
mod config;

use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing::Level;

#[derive(Parser)]
#[command(name = "trn")]
#[command(author, version, about = "TRN - Neural gas with competitive Hebbian wiring", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Verbose output
    #[arg(short, long, global = true)]
    verbose: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Write a default trn.toml
    Init {
        /// Project directory (default: current directory)
        #[arg(short, long)]
        path: Option<String>,
    },

    /// Adapt a network and export it as JSON
    Run {
        /// Config file (default: trn.toml in the current or a parent directory)
        #[arg(short, long)]
        config: Option<String>,

        /// Output file path
        #[arg(short, long, default_value = "network.json")]
        output: String,

        /// Override the configured seed
        #[arg(short, long)]
        seed: Option<u64>,
    },

    /// Show statistics of an exported network
    Stats {
        /// Exported network
        #[arg(default_value = "network.json")]
        file: String,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let level = if cli.verbose { Level::DEBUG } else { Level::WARN };
    tracing_subscriber::fmt()
        .with_max_level(level)
        .with_writer(std::io::stderr)
        .init();

    match cli.command {
        Commands::Init { path } => commands::init::run(path),
        Commands::Run {
            config,
            output,
            seed,
        } => commands::run::run(config.as_deref(), &output, seed),
        Commands::Stats { file } => commands::stats::run(&file),
    }
}
