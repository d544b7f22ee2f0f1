//! Order-preserving result aggregation
//!
//! Cases complete in whatever order the scheduler interleaves them, but the
//! delivered [`SuiteResult`] must list them in registration/expansion
//! order. The collector pre-allocates one slot per expanded case and lets
//! concurrent executions record into their own index; slot order, not
//! completion order, determines the final sequence.

use chrono::Utc;
use parking_lot::Mutex;
use specdrive_core::{CaseOutcome, CaseResult, HookFailure, ParamTuple, SuiteResult};
use std::time::Duration;

/// Aggregates per-case outcomes and hook failures for one suite
pub(crate) struct ResultCollector {
    slots: Mutex<Vec<Option<CaseResult>>>,
    hook_failures: Mutex<Vec<HookFailure>>,
}

impl ResultCollector {
    /// Create a collector with one empty slot per expanded case
    pub(crate) fn with_capacity(cases: usize) -> Self {
        ResultCollector {
            slots: Mutex::new(vec![None; cases]),
            hook_failures: Mutex::new(Vec::new()),
        }
    }

    /// Record the result for the case at `index`
    pub(crate) fn record(&self, index: usize, result: CaseResult) {
        let mut slots = self.slots.lock();
        slots[index] = Some(result);
    }

    /// Record a lifecycle-hook failure
    pub(crate) fn record_hook_failure(&self, failure: HookFailure) {
        self.hook_failures.lock().push(failure);
    }

    /// Produce the immutable suite result
    ///
    /// Nothing is ever dropped: a slot left unfilled (which would indicate
    /// a scheduler bug) surfaces as an `Errored` record rather than a
    /// missing case.
    pub(crate) fn finish(&self, name: impl Into<String>) -> SuiteResult {
        let cases = self
            .slots
            .lock()
            .iter()
            .enumerate()
            .map(|(index, slot)| {
                slot.clone().unwrap_or_else(|| CaseResult {
                    description: format!("case #{}", index),
                    params: ParamTuple::new(),
                    outcome: CaseOutcome::Errored {
                        cause: "case result was never recorded".to_string(),
                    },
                    duration: Duration::ZERO,
                })
            })
            .collect();

        SuiteResult {
            name: name.into(),
            cases,
            hook_failures: self.hook_failures.lock().clone(),
            finished_at: Utc::now(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use specdrive_core::{HookFailure, HookKind};

    fn passed(description: &str) -> CaseResult {
        CaseResult {
            description: description.to_string(),
            params: ParamTuple::new(),
            outcome: CaseOutcome::Passed,
            duration: Duration::from_millis(1),
        }
    }

    #[test]
    fn test_slot_order_beats_completion_order() {
        let collector = ResultCollector::with_capacity(3);
        collector.record(2, passed("third"));
        collector.record(0, passed("first"));
        collector.record(1, passed("second"));

        let result = collector.finish("ordered");
        let descriptions: Vec<&str> = result.cases.iter().map(|c| c.description.as_str()).collect();
        assert_eq!(descriptions, vec!["first", "second", "third"]);
    }

    #[test]
    fn test_unfilled_slot_surfaces_as_errored() {
        let collector = ResultCollector::with_capacity(2);
        collector.record(0, passed("only"));

        let result = collector.finish("gappy");
        assert_eq!(result.cases.len(), 2);
        assert!(result.cases[0].outcome.is_passed());
        assert!(result.cases[1].outcome.is_errored());
        assert_eq!(result.cases[1].description, "case #1");
    }

    #[test]
    fn test_hook_failures_accumulate_separately() {
        let collector = ResultCollector::with_capacity(1);
        collector.record(0, passed("fine"));
        collector.record_hook_failure(HookFailure {
            kind: HookKind::Complete,
            case: None,
            cause: "completer raised".to_string(),
        });

        let result = collector.finish("with failure");
        assert_eq!(result.cases.len(), 1);
        assert_eq!(result.hook_failures.len(), 1);
        assert!(result.cases[0].outcome.is_passed());
    }
}
