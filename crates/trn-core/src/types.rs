//! Shared types used across the framework.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Discrete adaptation step counter.
pub type Step = usize;

/// Index of a pointer (a column of the pointer matrix).
pub type UnitIndex = usize;

/// The three time-varying control parameters of an adaptation run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Parameter {
    /// Step size `eps` of the neural gas update.
    StepSize,
    /// Neighborhood range `lambda` of the neural gas update.
    Range,
    /// Connection lifetime `T` used for pruning stale edges.
    Lifetime,
}

impl fmt::Display for Parameter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Parameter::StepSize => write!(f, "step size (eps)"),
            Parameter::Range => write!(f, "neighborhood range (lambda)"),
            Parameter::Lifetime => write!(f, "connection lifetime (T)"),
        }
    }
}

/// Control values evaluated from the schedules for one step.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Controls {
    /// Step size.
    pub eps: f64,
    /// Neighborhood range.
    pub lambda: f64,
    /// Connection lifetime.
    pub lifetime: f64,
}

/// Periodic progress record emitted during a run.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ProgressRecord {
    /// Number of completed steps.
    pub t: Step,
    /// Total number of steps in the run.
    pub t_max: Step,
    /// Lifetime in effect for the last completed step.
    pub lifetime: f64,
    /// Step size in effect for the last completed step.
    pub eps: f64,
    /// Neighborhood range in effect for the last completed step.
    pub lambda: f64,
}

impl fmt::Display for ProgressRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Step {}/{}: T = {:.2}, Epsilon = {:.2}, Lambda = {:.2}",
            self.t, self.t_max, self.lifetime, self.eps, self.lambda
        )
    }
}

/// An undirected edge between two pointers, stored with `a < b`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Edge {
    pub a: UnitIndex,
    pub b: UnitIndex,
}

impl Edge {
    /// Create an edge, normalizing the endpoint order.
    pub fn new(i: UnitIndex, j: UnitIndex) -> Self {
        if i <= j {
            Self { a: i, b: j }
        } else {
            Self { a: j, b: i }
        }
    }
}
