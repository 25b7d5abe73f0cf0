//! Schedules: time-varying control parameters.
//!
//! A schedule maps `(initial, final, t, t_max)` to the value of a control
//! parameter at step `t` of a run with a budget of `t_max` steps. Schedules
//! are pure: the same inputs always give the same value.
//!
//! Two variants ship with the crate:
//!
//! - [`Constant`] holds the initial value for the whole run
//! - [`Exponential`] interpolates geometrically, `initial * (final/initial)^(t/t_max)`
//!
//! Any closure of the same shape can be plugged in through [`FnSchedule`].

use crate::error::ScheduleError;
use crate::types::Step;
use serde::{Deserialize, Serialize};
use std::fmt;

/// A control parameter schedule.
pub trait Schedule: Send + Sync {
    /// Name used in error messages and logs.
    fn name(&self) -> &str;

    /// Value of the parameter at step `t` of `t_max`.
    fn value(
        &self,
        initial: f64,
        final_value: f64,
        t: Step,
        t_max: Step,
    ) -> Result<f64, ScheduleError>;
}

/// Returns the initial value at every step.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Constant;

impl Schedule for Constant {
    fn name(&self) -> &str {
        "constant"
    }

    fn value(
        &self,
        initial: f64,
        _final_value: f64,
        _t: Step,
        _t_max: Step,
    ) -> Result<f64, ScheduleError> {
        Ok(initial)
    }
}

/// Geometric interpolation from the initial to the final value.
///
/// Requires a nonzero initial value and a final value of the same sign,
/// otherwise the power is not real.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Exponential;

impl Schedule for Exponential {
    fn name(&self) -> &str {
        "exponential"
    }

    fn value(
        &self,
        initial: f64,
        final_value: f64,
        t: Step,
        t_max: Step,
    ) -> Result<f64, ScheduleError> {
        if t_max == 0 {
            return Err(ScheduleError::ZeroHorizon);
        }
        if initial == 0.0 {
            return Err(ScheduleError::ZeroInitial);
        }
        if final_value == 0.0 {
            return Err(ScheduleError::ZeroFinal);
        }
        let ratio = final_value / initial;
        // Also rejects NaN inputs.
        if !(ratio > 0.0) {
            return Err(ScheduleError::SignMismatch {
                initial,
                final_value,
            });
        }
        Ok(initial * ratio.powf(t as f64 / t_max as f64))
    }
}

/// Serializable selector for the built-in schedules.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ScheduleKind {
    #[default]
    Constant,
    Exponential,
}

impl Schedule for ScheduleKind {
    fn name(&self) -> &str {
        match self {
            ScheduleKind::Constant => Constant.name(),
            ScheduleKind::Exponential => Exponential.name(),
        }
    }

    fn value(
        &self,
        initial: f64,
        final_value: f64,
        t: Step,
        t_max: Step,
    ) -> Result<f64, ScheduleError> {
        match self {
            ScheduleKind::Constant => Constant.value(initial, final_value, t, t_max),
            ScheduleKind::Exponential => Exponential.value(initial, final_value, t, t_max),
        }
    }
}

impl fmt::Display for ScheduleKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

/// A named closure used as a schedule.
///
/// ```rust
/// use trn_core::schedule::{FnSchedule, Schedule};
///
/// let linear = FnSchedule::new("linear", |i, f, t, t_max| {
///     i + (f - i) * t as f64 / t_max as f64
/// });
/// assert_eq!(linear.value(1.0, 0.0, 5, 10).unwrap(), 0.5);
/// ```
pub struct FnSchedule<F> {
    name: String,
    f: F,
}

impl<F> FnSchedule<F>
where
    F: Fn(f64, f64, Step, Step) -> f64 + Send + Sync,
{
    pub fn new(name: impl Into<String>, f: F) -> Self {
        Self {
            name: name.into(),
            f,
        }
    }
}

impl<F> Schedule for FnSchedule<F>
where
    F: Fn(f64, f64, Step, Step) -> f64 + Send + Sync,
{
    fn name(&self) -> &str {
        &self.name
    }

    fn value(
        &self,
        initial: f64,
        final_value: f64,
        t: Step,
        t_max: Step,
    ) -> Result<f64, ScheduleError> {
        Ok((self.f)(initial, final_value, t, t_max))
    }
}

impl<F> fmt::Debug for FnSchedule<F> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FnSchedule").field("name", &self.name).finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn constant_ignores_final_and_step() {
        for &(f, t, t_max) in &[(0.0, 0, 1), (-5.0, 7, 10), (100.0, 99, 100), (3.0, 0, 0)] {
            assert_eq!(Constant.value(0.3, f, t, t_max).unwrap(), 0.3);
        }
    }

    #[test]
    fn exponential_hits_endpoints() {
        let start = Exponential.value(0.3, 0.05, 0, 1000).unwrap();
        let end = Exponential.value(0.3, 0.05, 1000, 1000).unwrap();
        assert!((start - 0.3).abs() < 1e-12);
        assert!((end - 0.05).abs() < 1e-12);
    }

    #[test]
    fn exponential_is_monotone_between_endpoints() {
        let mut prev = f64::INFINITY;
        for t in 0..100 {
            let v = Exponential.value(40.0, 0.01, t, 100).unwrap();
            assert!(v < prev);
            assert!(v > 0.01);
            prev = v;
        }
    }

    #[test]
    fn exponential_rising_schedule() {
        // Lifetime schedules typically grow, e.g. 0.1 N -> 2 N.
        let mid = Exponential.value(20.0, 400.0, 50, 100).unwrap();
        assert!((mid - (20.0f64 * 400.0).sqrt()).abs() < 1e-9);
    }

    #[test]
    fn exponential_negative_pair_is_valid() {
        let v = Exponential.value(-2.0, -8.0, 1, 2).unwrap();
        assert!((v + 4.0).abs() < 1e-12);
    }

    #[test]
    fn exponential_rejects_zero_initial() {
        assert_eq!(
            Exponential.value(0.0, 1.0, 0, 10),
            Err(ScheduleError::ZeroInitial)
        );
    }

    #[test]
    fn exponential_rejects_sign_mismatch() {
        assert!(matches!(
            Exponential.value(1.0, -1.0, 3, 10),
            Err(ScheduleError::SignMismatch { .. })
        ));
        assert!(matches!(
            Exponential.value(-1.0, 4.0, 3, 10),
            Err(ScheduleError::SignMismatch { .. })
        ));
    }

    #[test]
    fn exponential_rejects_zero_final() {
        assert_eq!(
            Exponential.value(1.0, 0.0, 3, 10),
            Err(ScheduleError::ZeroFinal)
        );
        assert_eq!(
            Exponential.value(-0.5, -0.0, 0, 10),
            Err(ScheduleError::ZeroFinal)
        );
    }

    #[test]
    fn exponential_rejects_zero_horizon() {
        assert_eq!(
            Exponential.value(1.0, 2.0, 0, 0),
            Err(ScheduleError::ZeroHorizon)
        );
    }

    #[test]
    fn kind_dispatches_and_parses() {
        let kind: ScheduleKind = serde_json::from_str("\"exponential\"").unwrap();
        assert_eq!(kind, ScheduleKind::Exponential);
        assert_eq!(kind.name(), "exponential");
        assert_eq!(
            kind.value(2.0, 8.0, 1, 2).unwrap(),
            Exponential.value(2.0, 8.0, 1, 2).unwrap()
        );
        assert_eq!(ScheduleKind::Constant.value(2.0, 8.0, 1, 2).unwrap(), 2.0);
    }

    #[test]
    fn fn_schedule_uses_closure() {
        let halving = FnSchedule::new("halving", |i, _f, t, _t_max| i / 2f64.powi(t as i32));
        assert_eq!(halving.name(), "halving");
        assert_eq!(halving.value(8.0, 0.0, 3, 10).unwrap(), 1.0);
    }
}
