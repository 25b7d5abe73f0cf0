//! Adaptation engine: neural gas with competitive Hebbian wiring.
//!
//! The engine owns the pointer matrix W and the [`Topology`] (connection
//! matrix C and age matrix A) for the duration of a run. Each step:
//!
//! 1. Evaluate step size, neighborhood range and lifetime from their schedules
//! 2. Sample one input pattern v uniformly, with replacement
//! 3. Measure the distance from v to every pointer and rank the pointers
//!    (rank = number of pointers strictly closer)
//! 4. Move every pointer toward v by `eps * exp(-rank / lambda)`
//! 5. Connect the nearest and second-nearest pointers, age the nearest
//!    pointer's edges and prune those older than the lifetime
//! 6. Advance the step counter
//!
//! Distances and ranks are computed once per step, before any pointer moves,
//! and every update in the step reads that snapshot. Nearest and second
//! nearest come from the same snapshot, ordered by `(distance, index)`.

use crate::observer::AdaptObserver;
use ndarray::{Array2, ArrayView1, ArrayView2, Axis};
use rand::rngs::StdRng;
use rand::Rng;
use std::fmt;
use std::sync::Arc;
use trn_core::error::{ConfigError, DomainError, Result, TrnError};
use trn_core::schedule::{Constant, Exponential, Schedule};
use trn_core::topology::{edges_of, Topology};
use trn_core::types::{Controls, Edge, Parameter, ProgressRecord, Step, UnitIndex};
use tracing::debug;

/// A control parameter bound to its schedule.
#[derive(Clone)]
pub struct ScheduledParameter {
    pub initial: f64,
    pub final_value: f64,
    pub schedule: Arc<dyn Schedule>,
}

impl ScheduledParameter {
    pub fn new(initial: f64, final_value: f64, schedule: impl Schedule + 'static) -> Self {
        Self {
            initial,
            final_value,
            schedule: Arc::new(schedule),
        }
    }

    /// Hold `value` for the whole run.
    pub fn constant(value: f64) -> Self {
        Self::new(value, value, Constant)
    }

    /// Interpolate geometrically from `initial` to `final_value`.
    pub fn exponential(initial: f64, final_value: f64) -> Self {
        Self::new(initial, final_value, Exponential)
    }

    /// Name of the bound schedule.
    pub fn schedule_name(&self) -> &str {
        self.schedule.name()
    }

    /// Evaluate at step `t`, rejecting schedule failures and non-finite values.
    pub fn evaluate(&self, parameter: Parameter, t: Step, t_max: Step) -> Result<f64> {
        let value = self
            .schedule
            .value(self.initial, self.final_value, t, t_max)
            .map_err(|source| DomainError::Schedule {
                parameter,
                schedule: self.schedule_name().to_string(),
                t,
                source,
            })?;
        if !value.is_finite() {
            return Err(DomainError::NonFinite {
                parameter,
                schedule: self.schedule_name().to_string(),
                t,
                value,
            }
            .into());
        }
        Ok(value)
    }
}

impl fmt::Debug for ScheduledParameter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ScheduledParameter")
            .field("initial", &self.initial)
            .field("final_value", &self.final_value)
            .field("schedule", &self.schedule_name())
            .finish()
    }
}

/// Immutable configuration of an adaptation run.
#[derive(Debug, Clone)]
pub struct AdaptConfig {
    /// Number of steps to run.
    pub t_max: Step,
    /// Connection lifetime `T`.
    pub lifetime: ScheduledParameter,
    /// Step size `eps`.
    pub step_size: ScheduledParameter,
    /// Neighborhood range `lambda`.
    pub range: ScheduledParameter,
    /// Emit a progress record every this many steps. `None` disables it.
    pub log_interval: Option<Step>,
}

impl AdaptConfig {
    pub fn new(
        t_max: Step,
        lifetime: ScheduledParameter,
        step_size: ScheduledParameter,
        range: ScheduledParameter,
    ) -> Self {
        Self {
            t_max,
            lifetime,
            step_size,
            range,
            log_interval: None,
        }
    }

    /// Enable periodic progress records.
    pub fn with_log_interval(mut self, interval: Step) -> Self {
        self.log_interval = Some(interval);
        self
    }

    /// Evaluate all three control parameters for step `t`.
    pub fn controls_at(&self, t: Step) -> Result<Controls> {
        let eps = self.step_size.evaluate(Parameter::StepSize, t, self.t_max)?;
        let lambda = self.range.evaluate(Parameter::Range, t, self.t_max)?;
        if lambda <= 0.0 {
            return Err(DomainError::NonPositiveRange {
                schedule: self.range.schedule_name().to_string(),
                t,
                value: lambda,
            }
            .into());
        }
        let lifetime = self.lifetime.evaluate(Parameter::Lifetime, t, self.t_max)?;
        Ok(Controls {
            eps,
            lambda,
            lifetime,
        })
    }
}

/// What happened during a single step.
#[derive(Debug, Clone, PartialEq)]
pub struct StepReport {
    /// Index of the step that was executed (0-based).
    pub t: Step,
    /// Column of the pattern matrix that was sampled.
    pub pattern: usize,
    /// Control values used by the step.
    pub controls: Controls,
    /// Nearest pointer to the sampled pattern.
    pub nearest: UnitIndex,
    /// Second-nearest pointer to the sampled pattern.
    pub second: UnitIndex,
    /// Neighbors of `nearest` whose edges were pruned.
    pub pruned: Vec<UnitIndex>,
}

/// Result of a completed run.
#[derive(Debug, Clone, PartialEq)]
pub struct Adaptation {
    /// Adapted pointers, D×N.
    pub pointers: Array2<f64>,
    /// Connection matrix, N×N.
    pub connections: Array2<u8>,
    /// Number of steps executed.
    pub steps: Step,
}

impl Adaptation {
    /// Every learned edge once.
    pub fn edges(&self) -> Vec<Edge> {
        edges_of(&self.connections)
    }
}

/// The adaptation state machine.
pub struct AdaptationEngine<'a, R: Rng = StdRng> {
    pointers: Array2<f64>,
    patterns: ArrayView2<'a, f64>,
    topology: Topology,
    config: AdaptConfig,
    rng: R,
    t: Step,
    // Per-step scratch, reused across steps.
    distances: Vec<f64>,
    order: Vec<UnitIndex>,
    ranks: Vec<usize>,
}

impl<'a, R: Rng> AdaptationEngine<'a, R> {
    /// Create an engine over D×N `pointers` and D×M `patterns`.
    ///
    /// Rejects fewer than two pointers, mismatched dimensions, an empty or
    /// non-finite pattern sample, and (when `t_max > 0`) schedules that fail
    /// on the first step.
    pub fn new(
        pointers: Array2<f64>,
        patterns: ArrayView2<'a, f64>,
        config: AdaptConfig,
        rng: R,
    ) -> Result<Self> {
        let units = pointers.ncols();
        if units < 2 {
            return Err(TrnError::too_few_pointers(units));
        }
        if pointers.nrows() != patterns.nrows() {
            return Err(ConfigError::DimensionMismatch {
                pointers: pointers.nrows(),
                patterns: patterns.nrows(),
            }
            .into());
        }
        if patterns.ncols() == 0 {
            return Err(ConfigError::EmptyPatterns.into());
        }
        if !pointers.iter().all(|x| x.is_finite()) {
            return Err(ConfigError::NonFiniteInput { what: "Pointers" }.into());
        }
        if !patterns.iter().all(|x| x.is_finite()) {
            return Err(ConfigError::NonFiniteInput {
                what: "Input patterns",
            }
            .into());
        }
        if config.log_interval == Some(0) {
            return Err(TrnError::invalid_config(
                "log_interval",
                "0",
                "must be at least 1",
            ));
        }
        if config.t_max > 0 {
            config.controls_at(0)?;
        }

        debug!(
            units,
            dimension = pointers.nrows(),
            patterns = patterns.ncols(),
            t_max = config.t_max,
            lifetime = config.lifetime.schedule_name(),
            step_size = config.step_size.schedule_name(),
            range = config.range.schedule_name(),
            "adaptation engine ready"
        );

        Ok(Self {
            pointers,
            patterns,
            topology: Topology::new(units),
            config,
            rng,
            t: 0,
            distances: vec![0.0; units],
            order: (0..units).collect(),
            ranks: vec![0; units],
        })
    }

    /// Current step counter.
    pub fn t(&self) -> Step {
        self.t
    }

    /// Whether the step budget is exhausted.
    pub fn is_finished(&self) -> bool {
        self.t >= self.config.t_max
    }

    /// Current pointer positions.
    pub fn pointers(&self) -> &Array2<f64> {
        &self.pointers
    }

    /// Current connection and age matrices.
    pub fn topology(&self) -> &Topology {
        &self.topology
    }

    /// The run configuration.
    pub fn config(&self) -> &AdaptConfig {
        &self.config
    }

    /// Execute one step. Returns `None` once the budget is exhausted.
    pub fn step(&mut self) -> Result<Option<StepReport>> {
        if self.is_finished() {
            return Ok(None);
        }
        let t = self.t;
        let controls = self.config.controls_at(t)?;

        let patterns = self.patterns;
        let pattern = self.rng.gen_range(0..patterns.ncols());
        let v = patterns.column(pattern);

        self.measure(v);
        self.rank();
        let nearest = self.order[0];
        let second = self.order[1];

        for (i, mut w) in self.pointers.axis_iter_mut(Axis(1)).enumerate() {
            let h = controls.eps * (-(self.ranks[i] as f64) / controls.lambda).exp();
            w.zip_mut_with(&v, |wi, &x| *wi += h * (x - *wi));
        }

        self.topology.connect(nearest, second);
        self.topology.age_incident(nearest);
        let pruned = self.topology.prune_incident(nearest, controls.lifetime);

        self.t += 1;

        Ok(Some(StepReport {
            t,
            pattern,
            controls,
            nearest,
            second,
            pruned,
        }))
    }

    /// Run to the end of the budget, reporting to `observer`.
    pub fn run(&mut self, observer: &mut dyn AdaptObserver) -> Result<()> {
        while let Some(report) = self.step()? {
            observer.on_step(&report);
            if let Some(interval) = self.config.log_interval {
                if self.t % interval == 0 {
                    observer.on_progress(&ProgressRecord {
                        t: self.t,
                        t_max: self.config.t_max,
                        lifetime: report.controls.lifetime,
                        eps: report.controls.eps,
                        lambda: report.controls.lambda,
                    });
                }
            }
        }
        debug!(
            steps = self.t,
            edges = self.topology.edge_count(),
            "adaptation finished"
        );
        Ok(())
    }

    /// Consume the engine, returning W and C. The age matrix is dropped.
    pub fn finish(self) -> Adaptation {
        Adaptation {
            pointers: self.pointers,
            connections: self.topology.into_connections(),
            steps: self.t,
        }
    }

    /// Euclidean distance from `v` to every pointer.
    fn measure(&mut self, v: ArrayView1<'_, f64>) {
        for (d, w) in self
            .distances
            .iter_mut()
            .zip(self.pointers.axis_iter(Axis(1)))
        {
            *d = w
                .iter()
                .zip(v.iter())
                .map(|(a, b)| (a - b) * (a - b))
                .sum::<f64>()
                .sqrt();
        }
    }

    /// Sort units by `(distance, index)` and derive ranks; tied units share
    /// the rank of the first unit in their group.
    fn rank(&mut self) {
        let distances = &self.distances;
        self.order.sort_by(|&a, &b| {
            distances[a]
                .total_cmp(&distances[b])
                .then_with(|| a.cmp(&b))
        });
        for pos in 0..self.order.len() {
            let unit = self.order[pos];
            self.ranks[unit] = if pos > 0 && distances[self.order[pos - 1]] == distances[unit] {
                self.ranks[self.order[pos - 1]]
            } else {
                pos
            };
        }
    }
}

/// Run a complete adaptation: build the engine, step to `t_max`, return W and C.
///
/// `t_max = 0` returns the input pointers and an all-zero connection matrix.
pub fn adapt<R: Rng>(
    pointers: Array2<f64>,
    patterns: ArrayView2<'_, f64>,
    config: AdaptConfig,
    rng: R,
    observer: &mut dyn AdaptObserver,
) -> Result<Adaptation> {
    let mut engine = AdaptationEngine::new(pointers, patterns, config, rng)?;
    engine.run(observer)?;
    Ok(engine.finish())
}
