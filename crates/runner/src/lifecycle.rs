//! Per-case lifecycle driver and fault isolation
//!
//! A suite moves through `NotStarted → Initializing → Ready → Running →
//! Completing → Finished`; within `Running`, every case moves through
//! `SettingUp → Executing → TearingDown`. Every phase is a fault boundary:
//! an unwind is caught where it happens, converted into a recorded outcome,
//! and never allowed to disturb any other case or hook.
//!
//! ## Isolation rules
//!
//! - setup fault: the case body is skipped, teardown still runs, the case
//!   records `Errored` AND the setup fault is recorded as a hook failure
//! - body fault: `Failed` when the payload is [`ExpectationFailed`],
//!   `Errored` for any other unwind; teardown still runs
//! - teardown fault: recorded as a hook failure tagged with the case it
//!   decorated, never attributed to the case's own outcome
//!
//! Setup and teardown each run in their own registration order; teardown
//! is NOT reversed.

use crate::suite::{HookFn, SpecificationCase};
use specdrive_core::{CaseOutcome, CaseResult, ExpectationFailed, Expect, HookFailure, HookKind};
use std::any::Any;
use std::panic::{catch_unwind, AssertUnwindSafe};
use std::time::Instant;
use tracing::trace;

/// Phases a suite passes through, in order
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SuitePhase {
    /// Built, not yet picked up by the scheduler
    NotStarted,
    /// Running the initialize hook
    Initializing,
    /// Initialization done, cases not yet dispatched
    Ready,
    /// Cases executing, possibly concurrently
    Running,
    /// Running the complete hook
    Completing,
    /// Result delivered
    Finished,
}

/// Phases one case passes through
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum CasePhase {
    SettingUp,
    Executing,
    TearingDown,
}

/// What a caught unwind turned out to be
enum Fault {
    /// The expectation capability raised it: an assertion mismatch
    Expectation(String),
    /// Anything else: an unexpected fault
    Unexpected(String),
}

fn classify_panic(payload: Box<dyn Any + Send>) -> Fault {
    match payload.downcast::<ExpectationFailed>() {
        Ok(failed) => Fault::Expectation(failed.0),
        Err(payload) => Fault::Unexpected(panic_message(payload.as_ref())),
    }
}

fn panic_message(payload: &(dyn Any + Send)) -> String {
    if let Some(s) = payload.downcast_ref::<&str>() {
        (*s).to_string()
    } else if let Some(s) = payload.downcast_ref::<String>() {
        s.clone()
    } else {
        "non-string panic payload".to_string()
    }
}

/// Run one hook block, converting an unwind into its message
pub(crate) fn run_hook(hook: &HookFn) -> Result<(), String> {
    catch_unwind(AssertUnwindSafe(|| hook())).map_err(|payload| match classify_panic(payload) {
        Fault::Expectation(cause) | Fault::Unexpected(cause) => cause,
    })
}

/// Everything one case execution produced
pub(crate) struct CaseExecution {
    pub(crate) result: CaseResult,
    pub(crate) hook_failures: Vec<HookFailure>,
}

/// Drive one case through setup → body → teardown
///
/// Teardown always runs once setup has started, whatever happened before
/// it. Never unwinds.
pub(crate) fn run_case(
    case: &SpecificationCase,
    setups: &[HookFn],
    teardowns: &[HookFn],
) -> CaseExecution {
    let start = Instant::now();
    let mut hook_failures = Vec::new();

    trace!(case = case.description(), phase = ?CasePhase::SettingUp, "case phase");
    let setup_fault = setups.iter().find_map(|setup| run_hook(setup).err());

    let outcome = match setup_fault {
        Some(cause) => {
            hook_failures.push(HookFailure {
                kind: HookKind::Setup,
                case: Some(case.description().to_string()),
                cause: cause.clone(),
            });
            CaseOutcome::Errored {
                cause: format!("setup failed: {}", cause),
            }
        }
        None => {
            trace!(case = case.description(), phase = ?CasePhase::Executing, "case phase");
            let expect = Expect::new();
            match catch_unwind(AssertUnwindSafe(|| (case.body)(&expect))) {
                Ok(()) => CaseOutcome::Passed,
                Err(payload) => match classify_panic(payload) {
                    Fault::Expectation(cause) => CaseOutcome::Failed { cause },
                    Fault::Unexpected(cause) => CaseOutcome::Errored { cause },
                },
            }
        }
    };

    trace!(case = case.description(), phase = ?CasePhase::TearingDown, "case phase");
    for teardown in teardowns {
        if let Err(cause) = run_hook(teardown) {
            hook_failures.push(HookFailure {
                kind: HookKind::TearDown,
                case: Some(case.description().to_string()),
                cause,
            });
        }
    }

    CaseExecution {
        result: CaseResult {
            description: case.description().to_string(),
            params: case.params().clone(),
            outcome,
            duration: start.elapsed(),
        },
        hook_failures,
    }
}
