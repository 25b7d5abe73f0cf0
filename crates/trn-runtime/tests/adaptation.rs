//! End-to-end adaptation runs
//!
//! Checks the behavior of complete runs:
//! 1. Seeded runs are bit-for-bit reproducible
//! 2. Pointers migrate onto the sampled manifold
//! 3. The learned graph stays well formed and connects neighbors

use ndarray::{array, Array2};
use rand::rngs::StdRng;
use rand::SeedableRng;
use trn_runtime::metrics::quantization_error;
use trn_runtime::prelude::*;

fn square_run_config(units: usize, t_max: usize) -> AdaptConfig {
    let n = units as f64;
    AdaptConfig::new(
        t_max,
        ScheduledParameter::exponential(0.1 * n, 2.0 * n),
        ScheduledParameter::exponential(0.3, 0.05),
        ScheduledParameter::exponential(0.2 * n, 0.01),
    )
}

fn square_inputs(seed: u64, units: usize) -> (Array2<f64>, Array2<f64>) {
    let mut rng = StdRng::seed_from_u64(seed);
    let patterns = square_manifold(200, 1.0, 3.0, &mut rng).unwrap();
    let pointers = Distribution::Unconstrained
        .distribute(2, units, &mut rng)
        .unwrap();
    (pointers, patterns)
}

#[test]
fn seeded_runs_are_identical() {
    let (w, v) = square_inputs(1, 20);

    let first = adapt(
        w.clone(),
        v.view(),
        square_run_config(20, 2000),
        StdRng::seed_from_u64(99),
        &mut NoopObserver,
    )
    .unwrap();
    let second = adapt(
        w,
        v.view(),
        square_run_config(20, 2000),
        StdRng::seed_from_u64(99),
        &mut NoopObserver,
    )
    .unwrap();

    assert_eq!(first, second);
    let bits = |a: &Adaptation| a.pointers.iter().map(|x| x.to_bits()).collect::<Vec<_>>();
    assert_eq!(bits(&first), bits(&second));
}

#[test]
fn different_seeds_sample_differently() {
    let (w, v) = square_inputs(1, 20);
    let a = adapt(
        w.clone(),
        v.view(),
        square_run_config(20, 500),
        StdRng::seed_from_u64(1),
        &mut NoopObserver,
    )
    .unwrap();
    let b = adapt(
        w,
        v.view(),
        square_run_config(20, 500),
        StdRng::seed_from_u64(2),
        &mut NoopObserver,
    )
    .unwrap();
    assert_ne!(a.pointers, b.pointers);
}

#[test]
fn pointers_move_onto_square_manifold() {
    let (w, v) = square_inputs(3, 20);
    let before = quantization_error(w.view(), v.view());

    let out = adapt(
        w,
        v.view(),
        square_run_config(20, 4000),
        StdRng::seed_from_u64(3),
        &mut NoopObserver,
    )
    .unwrap();
    let after = quantization_error(out.pointers.view(), v.view());

    println!("quantization error: {:.4} -> {:.4}", before, after);
    assert!(
        after < before / 2.0,
        "pointers should approach the manifold: before={before}, after={after}"
    );
    assert!(out.pointers.iter().all(|x| x.is_finite()));
}

#[test]
fn learned_graph_is_well_formed() {
    let (w, v) = square_inputs(4, 30);
    let out = adapt(
        w,
        v.view(),
        square_run_config(30, 3000),
        StdRng::seed_from_u64(4),
        &mut NoopObserver,
    )
    .unwrap();

    let c = &out.connections;
    assert_eq!(c.dim(), (30, 30));
    for i in 0..30 {
        assert_eq!(c[[i, i]], 0);
        for j in 0..30 {
            assert!(c[[i, j]] <= 1);
            assert_eq!(c[[i, j]], c[[j, i]]);
        }
    }
    assert!(!out.edges().is_empty());

    let metrics = NetworkMetrics::compute(out.pointers.view(), &out.edges(), Some(v.view()));
    println!("{:?}", metrics);
    assert_eq!(metrics.units, 30);
    assert!(metrics.mean_edge_length < 2.0);
}

#[test]
fn two_pointer_single_step() {
    let w = array![[0.0, 10.0], [0.0, 10.0]];
    let v = array![[0.0], [0.0]];
    let config = AdaptConfig::new(
        1,
        ScheduledParameter::constant(100.0),
        ScheduledParameter::constant(0.5),
        ScheduledParameter::constant(1.0),
    );

    let out = adapt(w, v.view(), config, StdRng::seed_from_u64(0), &mut NoopObserver).unwrap();

    let moved = 10.0 * (1.0 - 0.5 * (-1.0f64).exp());
    assert_eq!(out.pointers.column(0).to_vec(), vec![0.0, 0.0]);
    assert!((out.pointers[[0, 1]] - moved).abs() < 1e-12);
    assert!((out.pointers[[1, 1]] - moved).abs() < 1e-12);
    assert_eq!(out.edges(), vec![Edge::new(0, 1)]);
}

#[test]
fn stepping_reports_match_topology() {
    let (w, v) = square_inputs(5, 10);
    let mut engine = AdaptationEngine::new(
        w,
        v.view(),
        square_run_config(10, 300),
        StdRng::seed_from_u64(5),
    )
    .unwrap();

    while let Some(report) = engine.step().unwrap() {
        assert_ne!(report.nearest, report.second);
        assert!(report.pattern < 200);
        for pruned in &report.pruned {
            assert!(!engine.topology().is_connected(report.nearest, *pruned));
        }
        if !report.pruned.contains(&report.second) {
            assert_eq!(engine.topology().age(report.nearest, report.second), Some(1.0));
        }
    }
    assert_eq!(engine.t(), 300);
}

#[test]
fn failing_schedule_returns_no_partial_result() {
    let (w, v) = square_inputs(6, 5);
    let config = AdaptConfig::new(
        50,
        ScheduledParameter::constant(10.0),
        ScheduledParameter::constant(0.1),
        ScheduledParameter::new(
            1.0,
            0.0,
            FnSchedule::new("linear-to-zero", |i, f, t, t_max| {
                i + (f - i) * t as f64 / (t_max as f64 / 2.0)
            }),
        ),
    );

    let err = adapt(w, v.view(), config, StdRng::seed_from_u64(6), &mut NoopObserver)
        .unwrap_err();
    match err {
        TrnError::Domain(DomainError::NonPositiveRange { schedule, t, .. }) => {
            assert_eq!(schedule, "linear-to-zero");
            assert_eq!(t, 25);
        }
        other => panic!("unexpected error: {other:?}"),
    }
}
