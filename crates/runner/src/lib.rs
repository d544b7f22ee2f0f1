//! Suite registration and execution for specdrive
//!
//! This crate implements the execution engine:
//! - [`Suite`] / [`Description`]: fluent registration of cases and hooks
//! - [`columns`]: expansion of 1–3 parallel data columns into concrete cases
//! - [`lifecycle`]: the per-case setup/body/teardown driver with fault
//!   isolation at every phase boundary
//! - [`scheduler`]: a fixed worker pool executing independent cases (and
//!   independent suites) concurrently
//! - [`collector`]: order-preserving aggregation into one [`SuiteResult`]
//!   per suite
//!
//! Registration and execution are strictly separated: `Suite::describe`
//! runs the registration closure to completion and yields an immutable
//! suite; `Scheduler::run` consumes it and delivers the result.

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod collector;
pub mod columns;
pub mod description;
pub mod lifecycle;
pub mod scheduler;
pub mod suite;

pub use columns::{Column, GeneratedColumns, ThreeColumns, TwoColumns};
pub use description::Description;
pub use lifecycle::SuitePhase;
pub use scheduler::Scheduler;
pub use suite::{SpecificationCase, Suite};

// Re-export the core surface so downstream users need only this crate
pub use specdrive_core::{
    Actual, CaseOutcome, CaseResult, Expect, ExpectationFailed, HookFailure, HookKind, ParamTuple,
    Result, SpecError, SuiteResult,
};
pub use specdrive_generators::SourceGenerator;
