//! # TRN
//!
//! Topology representing networks: learn the shape of a data manifold from a
//! finite sample of input patterns.
//!
//! A fixed number of pointers is placed in the embedding space and moved
//! toward randomly sampled patterns with the neural gas rule, while the
//! competitive Hebbian rule connects the two pointers nearest to each sample.
//! Edges that are not refreshed age and are pruned once older than the
//! current lifetime. The pointers end up distributed like the sample, and
//! the connections trace its topology.
//!
//! ## Quick Start
//!
//! ```rust
//! use trn::prelude::*;
//! use rand::{rngs::StdRng, SeedableRng};
//!
//! let mut rng = StdRng::seed_from_u64(7);
//!
//! // 200 patterns from the square [1, 3)², 20 pointers in [0, 1)²
//! let patterns = square_manifold(200, 1.0, 3.0, &mut rng).unwrap();
//! let pointers = Distribution::Unconstrained.distribute(2, 20, &mut rng).unwrap();
//!
//! let config = AdaptConfig::new(
//!     1000,
//!     ScheduledParameter::exponential(2.0, 40.0),  // lifetime T
//!     ScheduledParameter::exponential(0.3, 0.05),  // step size eps
//!     ScheduledParameter::exponential(4.0, 0.01),  // range lambda
//! );
//!
//! let result = adapt(pointers, patterns.view(), config, rng, &mut NoopObserver).unwrap();
//! assert_eq!(result.connections.dim(), (20, 20));
//! println!("{} edges learned", result.edges().len());
//! ```
//!
//! ## Architecture
//!
//! - [`trn_core`] - Schedules, pointer distributions, topology, errors
//! - [`trn_runtime`] - Adaptation engine, observers, datasets, metrics, export
//!
//! ## Control parameters
//!
//! | Parameter | Symbol | Role |
//! |-----------|--------|------|
//! | Step size | eps | How far pointers move toward a sample |
//! | Neighborhood range | lambda | How many ranks share the move |
//! | Lifetime | T | Age after which an unrefreshed edge is pruned |
//!
//! Each is driven by a [`Schedule`](trn_core::schedule::Schedule) from an
//! initial to a final value over the run.

// Re-export all subcrates
pub use trn_core as core;
pub use trn_runtime as runtime;

/// Prelude module for convenient imports.
///
/// ```rust
/// use trn::prelude::*;
/// ```
pub mod prelude {
    // Core types
    pub use trn_core::types::{Controls, Edge, Parameter, ProgressRecord, Step, UnitIndex};

    // Schedules and distributions
    pub use trn_core::schedule::{Constant, Exponential, FnSchedule, Schedule, ScheduleKind};
    pub use trn_core::distribution::Distribution;

    // Topology
    pub use trn_core::topology::Topology;

    // Error types
    pub use trn_core::error::{ConfigError, DomainError, Result, ScheduleError, TrnError};

    // Engine
    pub use trn_runtime::engine::{
        adapt, AdaptConfig, Adaptation, AdaptationEngine, ScheduledParameter, StepReport,
    };
    pub use trn_runtime::observer::{
        AdaptObserver, NoopObserver, RecordingObserver, Tee, TracingObserver,
    };

    // Datasets, metrics, export
    pub use trn_runtime::dataset::{load_delimited, square_manifold, DatasetSpec};
    pub use trn_runtime::metrics::NetworkMetrics;
    pub use trn_runtime::export::NetworkExport;
}
