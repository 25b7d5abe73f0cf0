//! Run observers: side-effecting hooks kept out of the state transition.
//!
//! The engine never prints. It hands every [`StepReport`] and every periodic
//! [`ProgressRecord`] to an [`AdaptObserver`], which may log, draw a progress
//! bar or record them. Observers cannot touch the engine's state.

use crate::engine::StepReport;
use tracing::info;
use trn_core::types::ProgressRecord;

/// Receives notifications from a running adaptation.
pub trait AdaptObserver {
    /// Called after every completed step.
    fn on_step(&mut self, _report: &StepReport) {}

    /// Called every `log_interval` steps.
    fn on_progress(&mut self, _record: &ProgressRecord) {}
}

/// Ignores every notification.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopObserver;

impl AdaptObserver for NoopObserver {}

/// Logs progress records through `tracing`.
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingObserver;

impl AdaptObserver for TracingObserver {
    fn on_progress(&mut self, record: &ProgressRecord) {
        info!(
            t = record.t,
            t_max = record.t_max,
            lifetime = record.lifetime,
            eps = record.eps,
            lambda = record.lambda,
            "{}",
            record
        );
    }
}

/// Collects progress records and simple step counters.
#[derive(Debug, Clone, Default)]
pub struct RecordingObserver {
    pub records: Vec<ProgressRecord>,
    /// Number of steps observed.
    pub steps: usize,
    /// Total number of edges pruned across observed steps.
    pub pruned: usize,
}

impl AdaptObserver for RecordingObserver {
    fn on_step(&mut self, report: &StepReport) {
        self.steps += 1;
        self.pruned += report.pruned.len();
    }

    fn on_progress(&mut self, record: &ProgressRecord) {
        self.records.push(*record);
    }
}

/// Forwards every notification to two observers in turn.
pub struct Tee<'a> {
    first: &'a mut dyn AdaptObserver,
    second: &'a mut dyn AdaptObserver,
}

impl<'a> Tee<'a> {
    pub fn new(first: &'a mut dyn AdaptObserver, second: &'a mut dyn AdaptObserver) -> Self {
        Self { first, second }
    }
}

impl AdaptObserver for Tee<'_> {
    fn on_step(&mut self, report: &StepReport) {
        self.first.on_step(report);
        self.second.on_step(report);
    }

    fn on_progress(&mut self, record: &ProgressRecord) {
        self.first.on_progress(record);
        self.second.on_progress(record);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use trn_core::types::Controls;

    fn report(pruned: Vec<usize>) -> StepReport {
        StepReport {
            t: 0,
            pattern: 0,
            controls: Controls {
                eps: 0.1,
                lambda: 1.0,
                lifetime: 5.0,
            },
            nearest: 0,
            second: 1,
            pruned,
        }
    }

    #[test]
    fn recording_observer_counts_steps_and_prunes() {
        let mut rec = RecordingObserver::default();
        rec.on_step(&report(vec![]));
        rec.on_step(&report(vec![2, 3]));
        assert_eq!(rec.steps, 2);
        assert_eq!(rec.pruned, 2);
        assert!(rec.records.is_empty());
    }

    #[test]
    fn tee_forwards_to_both() {
        let mut a = RecordingObserver::default();
        let mut b = RecordingObserver::default();
        {
            let mut tee = Tee::new(&mut a, &mut b);
            tee.on_step(&report(vec![1]));
            tee.on_progress(&ProgressRecord {
                t: 1,
                t_max: 1,
                lifetime: 5.0,
                eps: 0.1,
                lambda: 1.0,
            });
        }
        assert_eq!(a.steps, 1);
        assert_eq!(b.pruned, 1);
        assert_eq!(a.records.len(), 1);
        assert_eq!(b.records.len(), 1);
    }
}
