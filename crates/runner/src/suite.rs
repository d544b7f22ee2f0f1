//! Suites and their registered cases
//!
//! A [`Suite`] is built exactly once by [`Suite::describe`], is immutable
//! from that point on, and is consumed by execution. The registration
//! closure receives the fluent [`Description`] builder; configuration
//! errors propagate out of it with `?` and abort construction before
//! anything runs.

use crate::description::Description;
use crate::scheduler::Scheduler;
use once_cell::sync::Lazy;
use specdrive_core::{Expect, ParamTuple, Result, SuiteResult};

/// Case body: receives the expectation context, parameters pre-bound by
/// expansion
pub(crate) type CaseBody = Box<dyn Fn(&Expect) + Send + Sync>;

/// Lifecycle hook block
pub(crate) type HookFn = Box<dyn Fn() + Send + Sync>;

/// The four lifecycle hook slots of one suite
pub(crate) struct LifecycleHooks {
    /// Runs once before any case; at most one
    pub(crate) initialize: Option<HookFn>,
    /// Run before every case, in registration order
    pub(crate) setups: Vec<HookFn>,
    /// Run after every case, in registration order
    pub(crate) teardowns: Vec<HookFn>,
    /// Runs once after all cases; at most one
    pub(crate) complete: Option<HookFn>,
}

impl LifecycleHooks {
    pub(crate) fn new() -> Self {
        LifecycleHooks {
            initialize: None,
            setups: Vec::new(),
            teardowns: Vec::new(),
            complete: None,
        }
    }
}

/// One executable unit of behavior verification
///
/// For data-driven declarations, every expanded tuple yields its own case
/// with the parameter values bound into the body and rendered into the
/// description.
pub struct SpecificationCase {
    pub(crate) description: String,
    pub(crate) params: ParamTuple,
    pub(crate) body: CaseBody,
}

impl SpecificationCase {
    /// The case's rendered description
    pub fn description(&self) -> &str {
        &self.description
    }

    /// Rendered parameter values, empty for non-data-driven cases
    pub fn params(&self) -> &ParamTuple {
        &self.params
    }
}

/// A named group of specification cases sharing lifecycle hooks
pub struct Suite {
    pub(crate) name: String,
    pub(crate) cases: Vec<SpecificationCase>,
    pub(crate) hooks: LifecycleHooks,
}

impl Suite {
    /// Build a suite by running a registration closure against a fresh
    /// [`Description`]
    ///
    /// ```
    /// use specdrive_runner::Suite;
    ///
    /// let suite = Suite::describe("a calculator", |it| {
    ///     it.should("add small numbers", |expect| {
    ///         expect.that(1 + 2).is_equal_to(3);
    ///     });
    ///     Ok(())
    /// })
    /// .unwrap();
    /// assert_eq!(suite.len(), 1);
    /// ```
    pub fn describe(
        name: impl Into<String>,
        registration: impl FnOnce(&mut Description) -> Result<()>,
    ) -> Result<Suite> {
        let mut description = Description::new();
        registration(&mut description)?;
        let (cases, hooks) = description.into_parts();
        Ok(Suite {
            name: name.into(),
            cases,
            hooks,
        })
    }

    /// The suite's human-readable name
    pub fn name(&self) -> &str {
        &self.name
    }

    /// The expanded cases, in registration/expansion order
    pub fn cases(&self) -> &[SpecificationCase] {
        &self.cases
    }

    /// Number of expanded cases
    pub fn len(&self) -> usize {
        self.cases.len()
    }

    /// True when no case was registered
    pub fn is_empty(&self) -> bool {
        self.cases.is_empty()
    }

    /// Execute this suite on the shared default scheduler
    ///
    /// Consumes the suite; no suite is ever re-executed.
    pub fn run(self) -> SuiteResult {
        static DEFAULT_SCHEDULER: Lazy<Scheduler> = Lazy::new(Scheduler::default);
        DEFAULT_SCHEDULER.run(self)
    }
}
