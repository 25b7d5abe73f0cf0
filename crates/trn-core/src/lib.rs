//! # TRN Core
//!
//! Core traits and types for topology representing networks.
//!
//! A topology representing network places a fixed number of pointers
//! (neural units) in a D-dimensional embedding space and adapts them to an
//! unknown data manifold that is only known through a finite sample of input
//! patterns. This crate holds the pieces shared by every part of the
//! framework:
//!
//! - **Schedules** - interpolate a control parameter (step size,
//!   neighborhood range, connection lifetime) over a fixed iteration budget
//! - **Distributions** - produce the initial D×N pointer matrix
//! - **Topology** - the symmetric connection matrix and edge-age matrix
//!   maintained by the competitive Hebbian rule
//!
//! ## Quick Start
//!
//! ```rust
//! use trn_core::prelude::*;
//! use rand::SeedableRng;
//!
//! let mut rng = rand::rngs::StdRng::seed_from_u64(42);
//! let pointers = Distribution::Unconstrained.distribute(2, 10, &mut rng).unwrap();
//! assert_eq!(pointers.dim(), (2, 10));
//!
//! let eps = Exponential.value(0.3, 0.05, 0, 100).unwrap();
//! assert!((eps - 0.3).abs() < 1e-12);
//! ```

pub mod types;
pub mod error;
pub mod schedule;
pub mod distribution;
pub mod topology;
pub mod prelude;
