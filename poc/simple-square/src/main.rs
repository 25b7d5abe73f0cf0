//! Simple Square Demo: pointers learn a uniformly sampled square
//!
//! 200 pointers start in the unit square [0, 1)² and adapt to 200 samples
//! drawn from [1, 3)². After 200·N steps the pointers should cover the
//! target square and their edges should form a planar mesh over it.
//!
//! Protocol:
//! 1. Sample the manifold and the initial pointers
//! 2. Adapt with exponential lifetime, step size and range schedules
//! 3. Measure coverage and graph structure
//! 4. Export the network as JSON for external plotting

use rand::rngs::StdRng;
use rand::SeedableRng;
use trn_core::error::Result;
use trn_runtime::metrics::quantization_error;
use trn_runtime::prelude::*;

const N: usize = 200;
const SEED: u64 = 2024;

fn main() -> Result<()> {
    tracing_subscriber::fmt::init();

    println!("╔══════════════════════════════════════════════════════╗");
    println!("║  Simple Square: Neural Gas + Hebbian Wiring          ║");
    println!("╚══════════════════════════════════════════════════════╝");
    println!();

    // --- Phase 1: Manifold and initial pointers ---
    let mut rng = StdRng::seed_from_u64(SEED);
    let patterns = square_manifold(200, 1.0, 3.0, &mut rng)?;
    let pointers = Distribution::Unconstrained.distribute(patterns.nrows(), N, &mut rng)?;
    let initial_error = quantization_error(pointers.view(), patterns.view());

    println!("── Phase 1: Setup ─────────────────────────────────────");
    println!("  Patterns: {} in [1, 3)²", patterns.ncols());
    println!("  Pointers: {} in [0, 1)²", pointers.ncols());
    println!("  Quantization error: {:.4}", initial_error);
    println!();

    // --- Phase 2: Adaptation ---
    let n = N as f64;
    let t_max = 200 * N;
    let config = AdaptConfig::new(
        t_max,
        ScheduledParameter::exponential(0.1 * n, 2.0 * n),
        ScheduledParameter::exponential(0.3, 0.05),
        ScheduledParameter::exponential(0.2 * n, 0.01),
    )
    .with_log_interval(t_max / 10);

    println!("── Phase 2: Adaptation ({} steps) ─────────────────────", t_max);
    let mut recorder = RecordingObserver::default();
    let mut logger = TracingObserver;
    let result = adapt(
        pointers,
        patterns.view(),
        config,
        rng,
        &mut Tee::new(&mut recorder, &mut logger),
    )?;
    println!("  Steps: {}", recorder.steps);
    println!("  Edges pruned along the way: {}", recorder.pruned);
    println!();

    // --- Phase 3: Coverage and structure ---
    println!("── Phase 3: Coverage ──────────────────────────────────");
    let edges = result.edges();
    let metrics = NetworkMetrics::compute(result.pointers.view(), &edges, Some(patterns.view()));
    let inside = result
        .pointers
        .columns()
        .into_iter()
        .filter(|w| w.iter().all(|&x| (0.9..=3.1).contains(&x)))
        .count();
    println!(
        "  Quantization error: {:.4} → {:.4}",
        initial_error,
        metrics.quantization_error.unwrap_or_default()
    );
    println!("  Pointers on the square: {}/{}", inside, N);
    println!("  Edges: {}, components: {}", metrics.edges, metrics.components);
    println!(
        "  Mean degree: {:.2}, mean edge length: {:.4}",
        metrics.mean_degree, metrics.mean_edge_length
    );
    if inside == N && metrics.components == 1 {
        println!("  MESH FORMED: every pointer on the square, one component.");
    } else {
        println!("  Mesh incomplete: stray pointers or disconnected pieces remain.");
    }
    println!();

    // --- Phase 4: Export ---
    println!("── Phase 4: Export ────────────────────────────────────");
    let output_dir = std::path::Path::new("poc/simple-square/output");
    std::fs::create_dir_all(output_dir)?;
    let export = NetworkExport::from_adaptation(&result, Some(patterns.view()), Some(SEED));
    let path = output_dir.join("simple-square.json");
    export.save(&path)?;
    println!("  JSON: {}", path.display());
    println!();
    println!("══════════════════════════════════════════════════════");

    Ok(())
}
