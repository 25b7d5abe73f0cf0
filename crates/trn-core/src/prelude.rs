//! TRN Core Prelude: convenient imports for common usage.
//!
//! ```rust
//! use trn_core::prelude::*;
//! ```

// Re-export commonly used types
pub use crate::types::{Controls, Edge, Parameter, ProgressRecord, Step, UnitIndex};

// Re-export schedules
pub use crate::schedule::{Constant, Exponential, FnSchedule, Schedule, ScheduleKind};

// Re-export distributions
pub use crate::distribution::Distribution;

// Re-export topology
pub use crate::topology::Topology;

// Re-export error types
pub use crate::error::{ConfigError, DomainError, Result, ScheduleError, TrnError};
