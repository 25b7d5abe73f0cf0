//! Adapt a network and export it.

use anyhow::{Context, Result};
use colored::Colorize;
use indicatif::{ProgressBar, ProgressStyle};
use rand::rngs::StdRng;
use rand::SeedableRng;
use std::path::Path;
use trn::prelude::*;
use trn::runtime::metrics::quantization_error;

use crate::config::Config;

/// Advances a progress bar once per adaptation step.
struct ProgressObserver {
    bar: ProgressBar,
}

impl ProgressObserver {
    fn new(steps: usize) -> Self {
        let bar = ProgressBar::new(steps as u64);
        let style = ProgressStyle::default_bar()
            .template("{spinner:.green} [{bar:40.cyan/blue}] {pos}/{len} steps")
            .unwrap_or_else(|_| ProgressStyle::default_bar())
            .progress_chars("#>-");
        bar.set_style(style);
        Self { bar }
    }
}

impl AdaptObserver for ProgressObserver {
    fn on_step(&mut self, _report: &StepReport) {
        self.bar.inc(1);
    }
}

pub fn run(config_path: Option<&str>, output: &str, seed: Option<u64>) -> Result<()> {
    let config = Config::load(config_path.map(Path::new))?;
    let seed = seed
        .or(config.network.seed)
        .unwrap_or_else(rand::random);
    let mut rng = StdRng::seed_from_u64(seed);

    println!("{} Loading patterns...", "→".blue());
    let patterns = config
        .dataset
        .load(&mut rng)
        .context("Failed to load dataset")?;
    println!(
        "  Loaded: {} patterns in {} dimensions",
        patterns.ncols().to_string().cyan(),
        patterns.nrows().to_string().cyan()
    );

    let pointers = config
        .distribution
        .distribute(patterns.nrows(), config.network.pointers, &mut rng)
        .context("Failed to place initial pointers")?;
    let initial_error = quantization_error(pointers.view(), patterns.view());

    let adapt_config = config.adapt_config();
    let steps = adapt_config.t_max;
    println!(
        "{} Adapting {} pointers for {} steps (seed {})...",
        "→".blue(),
        config.network.pointers.to_string().cyan(),
        steps.to_string().cyan(),
        seed.to_string().dimmed()
    );

    let mut progress = ProgressObserver::new(steps);
    let mut tracing_observer = TracingObserver;
    let result = adapt(
        pointers,
        patterns.view(),
        adapt_config,
        rng,
        &mut Tee::new(&mut progress, &mut tracing_observer),
    );
    progress.bar.finish_and_clear();
    let adaptation = result.context("Adaptation failed")?;

    let export = NetworkExport::from_adaptation(&adaptation, Some(patterns.view()), Some(seed));
    export
        .save(output)
        .with_context(|| format!("Failed to write {output}"))?;

    let metrics = &export.metrics;
    println!();
    println!("{} Adaptation complete!", "✓".green().bold());
    println!(
        "  Quantization error: {} → {}",
        format!("{initial_error:.4}").yellow(),
        format!("{:.4}", metrics.quantization_error.unwrap_or_default()).green()
    );
    println!(
        "  Edges: {} ({} components, mean degree {:.2})",
        metrics.edges.to_string().green(),
        metrics.components.to_string().cyan(),
        metrics.mean_degree
    );
    println!("  {} Wrote {}", "✓".green(), output);

    Ok(())
}
