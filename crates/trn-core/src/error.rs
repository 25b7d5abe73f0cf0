//! Error types for TRN operations.
//!
//! Configuration errors are raised before an adaptation run starts; domain
//! errors are raised by the evaluation that produced an invalid value. Both
//! are fatal to the run.

use crate::types::{Parameter, Step};
use std::error::Error;
use std::fmt;

/// Result type for TRN operations.
pub type Result<T> = std::result::Result<T, TrnError>;

/// Errors that can occur during TRN operations.
#[derive(Debug, Clone, PartialEq)]
pub enum TrnError {
    /// Invalid configuration, detected before the step loop.
    Config(ConfigError),
    /// Invalid value produced while evaluating a step.
    Domain(DomainError),
    /// I/O errors (wrapped).
    Io(String),
    /// Serialization errors.
    Serialization(String),
}

impl fmt::Display for TrnError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TrnError::Config(e) => write!(f, "Config error: {}", e),
            TrnError::Domain(e) => write!(f, "Domain error: {}", e),
            TrnError::Io(msg) => write!(f, "I/O error: {}", msg),
            TrnError::Serialization(msg) => write!(f, "Serialization error: {}", msg),
        }
    }
}

impl Error for TrnError {}

impl From<std::io::Error> for TrnError {
    fn from(e: std::io::Error) -> Self {
        TrnError::Io(e.to_string())
    }
}

impl From<serde_json::Error> for TrnError {
    fn from(e: serde_json::Error) -> Self {
        TrnError::Serialization(e.to_string())
    }
}

impl From<ConfigError> for TrnError {
    fn from(e: ConfigError) -> Self {
        TrnError::Config(e)
    }
}

impl From<DomainError> for TrnError {
    fn from(e: DomainError) -> Self {
        TrnError::Domain(e)
    }
}

/// Configuration errors.
#[derive(Debug, Clone, PartialEq)]
pub enum ConfigError {
    /// Fewer than two pointers; no second-nearest unit exists.
    TooFewPointers { found: usize },
    /// Pointer and pattern matrices live in different embedding spaces.
    DimensionMismatch { pointers: usize, patterns: usize },
    /// The pattern matrix has no columns.
    EmptyPatterns,
    /// A bounds sequence does not have one entry per dimension.
    BoundsLength {
        which: &'static str,
        expected: usize,
        found: usize,
    },
    /// A bounded interval is empty or not finite.
    InvalidBounds { dimension: usize, low: f64, high: f64 },
    /// A matrix handed to the engine contains NaN or infinity.
    NonFiniteInput { what: &'static str },
    /// Invalid value.
    InvalidValue {
        field: String,
        value: String,
        reason: String,
    },
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::TooFewPointers { found } => {
                write!(f, "At least 2 pointers are required, found {}", found)
            }
            ConfigError::DimensionMismatch { pointers, patterns } => write!(
                f,
                "Pointers have dimension {} but input patterns have dimension {}",
                pointers, patterns
            ),
            ConfigError::EmptyPatterns => write!(f, "Input pattern matrix has no columns"),
            ConfigError::BoundsLength {
                which,
                expected,
                found,
            } => write!(
                f,
                "Bounded distribution needs {} {} values, found {}",
                expected, which, found
            ),
            ConfigError::InvalidBounds {
                dimension,
                low,
                high,
            } => write!(
                f,
                "Invalid bounds for dimension {}: [{}, {}) is empty or not finite",
                dimension, low, high
            ),
            ConfigError::NonFiniteInput { what } => {
                write!(f, "{} contain NaN or infinite entries", what)
            }
            ConfigError::InvalidValue {
                field,
                value,
                reason,
            } => write!(f, "Invalid value for {}: {} ({})", field, value, reason),
        }
    }
}

impl Error for ConfigError {}

/// Errors raised by a single schedule evaluation.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ScheduleError {
    /// Exponential interpolation starting from zero.
    ZeroInitial,
    /// Exponential interpolation ending at zero.
    ZeroFinal,
    /// Initial and final values do not share a sign.
    SignMismatch { initial: f64, final_value: f64 },
    /// Zero iteration budget.
    ZeroHorizon,
}

impl fmt::Display for ScheduleError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ScheduleError::ZeroInitial => write!(f, "initial value must be nonzero"),
            ScheduleError::ZeroFinal => write!(f, "final value must be nonzero"),
            ScheduleError::SignMismatch {
                initial,
                final_value,
            } => write!(
                f,
                "initial ({}) and final ({}) values must share sign",
                initial, final_value
            ),
            ScheduleError::ZeroHorizon => write!(f, "t_max must be positive"),
        }
    }
}

impl Error for ScheduleError {}

/// Errors detected while evaluating the control parameters of a step.
#[derive(Debug, Clone, PartialEq)]
pub enum DomainError {
    /// A schedule rejected its inputs.
    Schedule {
        parameter: Parameter,
        schedule: String,
        t: Step,
        source: ScheduleError,
    },
    /// Neighborhood range evaluated to zero or less.
    NonPositiveRange {
        schedule: String,
        t: Step,
        value: f64,
    },
    /// A schedule produced NaN or infinity.
    NonFinite {
        parameter: Parameter,
        schedule: String,
        t: Step,
        value: f64,
    },
}

impl fmt::Display for DomainError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DomainError::Schedule {
                parameter,
                schedule,
                t,
                source,
            } => write!(
                f,
                "{} schedule '{}' failed at step {}: {}",
                parameter, schedule, t, source
            ),
            DomainError::NonPositiveRange { schedule, t, value } => write!(
                f,
                "{} schedule '{}' produced {} at step {} (must be > 0)",
                Parameter::Range,
                schedule,
                value,
                t
            ),
            DomainError::NonFinite {
                parameter,
                schedule,
                t,
                value,
            } => write!(
                f,
                "{} schedule '{}' produced non-finite value {} at step {}",
                parameter, schedule, value, t
            ),
        }
    }
}

impl Error for DomainError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            DomainError::Schedule { source, .. } => Some(source),
            _ => None,
        }
    }
}

impl DomainError {
    /// The control parameter whose evaluation failed.
    pub fn parameter(&self) -> Parameter {
        match self {
            DomainError::Schedule { parameter, .. } => *parameter,
            DomainError::NonPositiveRange { .. } => Parameter::Range,
            DomainError::NonFinite { parameter, .. } => *parameter,
        }
    }
}

// Convenience constructors
impl TrnError {
    pub fn invalid_config(
        field: impl Into<String>,
        value: impl Into<String>,
        reason: impl Into<String>,
    ) -> Self {
        TrnError::Config(ConfigError::InvalidValue {
            field: field.into(),
            value: value.into(),
            reason: reason.into(),
        })
    }

    pub fn too_few_pointers(found: usize) -> Self {
        TrnError::Config(ConfigError::TooFewPointers { found })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn domain_error_names_parameter_and_schedule() {
        let err = TrnError::Domain(DomainError::Schedule {
            parameter: Parameter::StepSize,
            schedule: "exponential".to_string(),
            t: 3,
            source: ScheduleError::ZeroInitial,
        });
        let msg = err.to_string();
        assert!(msg.contains("step size"), "{}", msg);
        assert!(msg.contains("exponential"), "{}", msg);
        assert!(msg.contains("step 3"), "{}", msg);
    }

    #[test]
    fn schedule_errors_describe_the_bad_endpoint() {
        assert_eq!(
            ScheduleError::ZeroFinal.to_string(),
            "final value must be nonzero"
        );
        let mismatch = ScheduleError::SignMismatch {
            initial: 1.0,
            final_value: -2.0,
        };
        assert_eq!(
            mismatch.to_string(),
            "initial (1) and final (-2) values must share sign"
        );
    }

    #[test]
    fn non_positive_range_reports_range() {
        let err = DomainError::NonPositiveRange {
            schedule: "constant".to_string(),
            t: 0,
            value: 0.0,
        };
        assert_eq!(err.parameter(), Parameter::Range);
        assert!(err.to_string().contains("lambda"));
    }
}
