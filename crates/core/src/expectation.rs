//! The expectation capability handed to case bodies
//!
//! Assertion matching is deliberately thin here: the core only needs a way
//! for a case body to signal "an expectation did not hold" that the lifecycle
//! can tell apart from an arbitrary fault. An unmet expectation unwinds with
//! an [`ExpectationFailed`] payload; the lifecycle downcasts the payload at
//! the phase boundary and records `Failed` instead of `Errored`. Richer
//! matcher libraries can be layered on top by raising the same payload.

use std::fmt::Debug;
use std::panic::panic_any;

/// Panic payload raised when an expectation does not hold
///
/// Carries the human-readable cause that ends up in the case's
/// `Failed` outcome.
#[derive(Debug, Clone)]
pub struct ExpectationFailed(
    /// Human-readable description of the unmet expectation
    pub String,
);

/// Expectation context passed into every case body
///
/// Constructed by the runner, once per case execution.
pub struct Expect {
    _private: (),
}

impl Expect {
    /// Create an expectation context
    ///
    /// Normally the runner does this; tests for matcher behavior may
    /// construct one directly.
    pub fn new() -> Self {
        Expect { _private: () }
    }

    /// Begin an expectation about `actual`
    pub fn that<T: Debug>(&self, actual: T) -> Actual<T> {
        Actual { actual }
    }

    /// Fail the case unconditionally with the given reason
    pub fn failure(&self, reason: impl Into<String>) -> ! {
        panic_any(ExpectationFailed(reason.into()))
    }
}

impl Default for Expect {
    fn default() -> Self {
        Self::new()
    }
}

/// A value under expectation
pub struct Actual<T: Debug> {
    actual: T,
}

impl<T: Debug> Actual<T> {
    /// Require equality with `expected`
    pub fn is_equal_to<U>(&self, expected: U)
    where
        T: PartialEq<U>,
        U: Debug,
    {
        if self.actual != expected {
            panic_any(ExpectationFailed(format!(
                "expected {:?} to equal {:?}",
                self.actual, expected
            )));
        }
    }

    /// Require inequality with `unexpected`
    pub fn is_not_equal_to<U>(&self, unexpected: U)
    where
        T: PartialEq<U>,
        U: Debug,
    {
        if self.actual == unexpected {
            panic_any(ExpectationFailed(format!(
                "expected {:?} to differ from {:?}",
                self.actual, unexpected
            )));
        }
    }

    /// Require that `predicate` holds for the value
    ///
    /// `requirement` names the property being checked and appears in the
    /// failure cause.
    pub fn satisfies(&self, requirement: &str, predicate: impl FnOnce(&T) -> bool) {
        if !predicate(&self.actual) {
            panic_any(ExpectationFailed(format!(
                "expected {:?} to satisfy: {}",
                self.actual, requirement
            )));
        }
    }
}

impl Actual<bool> {
    /// Require the value to be true
    pub fn is_true(&self) {
        self.is_equal_to(true);
    }

    /// Require the value to be false
    pub fn is_false(&self) {
        self.is_equal_to(false);
    }
}
