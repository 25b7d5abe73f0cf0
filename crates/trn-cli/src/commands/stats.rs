//! Show statistics of an exported network.

use anyhow::{bail, Context, Result};
use colored::Colorize;
use std::path::Path;
use trn::prelude::*;

pub fn run(file: &str) -> Result<()> {
    if !Path::new(file).exists() {
        bail!("No network found at {file}. Run {} first.", "trn run".cyan());
    }

    let export = NetworkExport::load(file).with_context(|| format!("Failed to load {file}"))?;
    let metrics = &export.metrics;
    let meta = &export.metadata;

    println!("{}", "TRN Network Statistics".white().bold());
    println!("{}", "═".repeat(40).dimmed());
    println!();

    println!("{}", "Run".blue().bold());
    println!("  Steps:             {}", meta.steps.to_string().cyan());
    match meta.seed {
        Some(seed) => println!("  Seed:              {}", seed.to_string().cyan()),
        None => println!("  Seed:              {}", "unknown".dimmed()),
    }
    println!();

    println!("{}", "Pointers".blue().bold());
    println!("  Units:             {}", metrics.units.to_string().cyan());
    println!("  Dimension:         {}", metrics.dimension.to_string().cyan());
    println!("  Isolated:          {}", metrics.isolated.to_string().cyan());
    if let Some(error) = metrics.quantization_error {
        println!("  Quantization err:  {:.4}", error);
    }
    println!();

    println!("{}", "Topology".blue().bold());
    println!("  Edges:             {}", metrics.edges.to_string().cyan());
    println!("  Components:        {}", metrics.components.to_string().cyan());
    println!("  Mean degree:       {:.2}", metrics.mean_degree);
    println!("  Mean edge length:  {:.4}", metrics.mean_edge_length);
    println!();

    if metrics.units > 1 {
        let max_edges = (metrics.units * (metrics.units - 1)) / 2;
        let density = metrics.edges as f64 / max_edges as f64;
        println!("{}", "Density".blue().bold());
        println!("  Graph density:     {:.6}", density);
        println!();
    }

    println!("{}", "═".repeat(40).dimmed());

    Ok(())
}
