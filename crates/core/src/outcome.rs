//! The immutable result model
//!
//! Every executed suite produces exactly one [`SuiteResult`]: an ordered
//! sequence of per-case outcomes plus the lifecycle-hook failures recorded
//! separately from any case. External reporters consume these records;
//! everything here is serde-serializable so a reporter can render or ship
//! them however it likes.
//!
//! A hook failure is not a case failure. A faulting teardown or completer is
//! attached to the suite, never attributed to an individual case, and never
//! alters an already-recorded case outcome.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use smallvec::SmallVec;
use std::fmt;
use std::time::Duration;

/// Rendered parameter values for one expanded case, at most three positions
pub type ParamTuple = SmallVec<[String; 3]>;

/// The lifecycle slot a hook was registered in
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum HookKind {
    /// Runs once before any case in the suite
    Initialize,
    /// Runs before every case, in registration order
    Setup,
    /// Runs after every case, in registration order
    TearDown,
    /// Runs once after all cases, regardless of their outcomes
    Complete,
}

impl fmt::Display for HookKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            HookKind::Initialize => "initialize",
            HookKind::Setup => "setup",
            HookKind::TearDown => "teardown",
            HookKind::Complete => "complete",
        };
        write!(f, "{}", name)
    }
}

/// Outcome of one executed case
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum CaseOutcome {
    /// The case body ran to completion with every expectation satisfied
    Passed,
    /// An expectation raised by the case body did not hold
    Failed {
        /// Human-readable description of the unmet expectation
        cause: String,
    },
    /// An unexpected fault occurred in setup or in the case body
    Errored {
        /// Human-readable description of the fault
        cause: String,
    },
}

impl CaseOutcome {
    /// True when the case passed
    pub fn is_passed(&self) -> bool {
        matches!(self, CaseOutcome::Passed)
    }

    /// True when an expectation did not hold
    pub fn is_failed(&self) -> bool {
        matches!(self, CaseOutcome::Failed { .. })
    }

    /// True when setup or the body raised an unexpected fault
    pub fn is_errored(&self) -> bool {
        matches!(self, CaseOutcome::Errored { .. })
    }
}

/// Result record for one executed (or skipped) case
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CaseResult {
    /// The case's rendered description
    pub description: String,
    /// Rendered parameter tuple, empty for non-data-driven cases
    pub params: ParamTuple,
    /// What happened
    pub outcome: CaseOutcome,
    /// Wall-clock time spent in setup, body, and teardown
    pub duration: Duration,
}

/// A lifecycle-hook fault, recorded on the suite rather than on any case
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HookFailure {
    /// Which hook slot faulted
    pub kind: HookKind,
    /// Description of the case the hook decorated, for per-case hooks
    pub case: Option<String>,
    /// Human-readable description of the fault
    pub cause: String,
}

/// Immutable aggregate result for one executed suite
///
/// Case order matches registration/expansion order, independent of the order
/// in which concurrent execution actually completed the cases.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SuiteResult {
    /// The suite's human-readable name
    pub name: String,
    /// One record per expanded case, in registration/expansion order
    pub cases: Vec<CaseResult>,
    /// Faults raised by initialize/setup/teardown/complete hooks
    pub hook_failures: Vec<HookFailure>,
    /// When the suite's terminal hook finished
    pub finished_at: DateTime<Utc>,
}

impl SuiteResult {
    /// Number of cases that passed
    pub fn passed(&self) -> usize {
        self.cases.iter().filter(|c| c.outcome.is_passed()).count()
    }

    /// Number of cases with an unmet expectation
    pub fn failed(&self) -> usize {
        self.cases.iter().filter(|c| c.outcome.is_failed()).count()
    }

    /// Number of cases that raised an unexpected fault
    pub fn errored(&self) -> usize {
        self.cases.iter().filter(|c| c.outcome.is_errored()).count()
    }

    /// True when every case passed and no hook faulted
    pub fn is_success(&self) -> bool {
        self.hook_failures.is_empty() && self.cases.iter().all(|c| c.outcome.is_passed())
    }
}
