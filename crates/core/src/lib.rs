//! Core types for specdrive
//!
//! This crate defines the foundational types used throughout the system:
//! - SpecError: configuration error taxonomy
//! - CaseOutcome / CaseResult / SuiteResult: the immutable result model
//! - HookKind / HookFailure: lifecycle-hook failure records
//! - Expect: the expectation capability handed to case bodies

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod error;
pub mod expectation;
pub mod outcome;

pub use error::{Result, SpecError};
pub use expectation::{Actual, Expect, ExpectationFailed};
pub use outcome::{CaseOutcome, CaseResult, HookFailure, HookKind, ParamTuple, SuiteResult};
