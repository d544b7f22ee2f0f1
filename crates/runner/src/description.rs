//! Fluent registration builder
//!
//! One [`Description`] accumulates everything a suite registers: plain
//! cases via [`should`](Description::should), data-driven declarations via
//! the `uses*` / [`requires`](Description::requires) column builders, and
//! the four lifecycle hook categories. Declarations may interleave in any
//! order; only the per-category rules matter:
//!
//! - at most one `initialize` and one `complete` hook per suite
//!   ([`SpecError::DuplicateHook`] on a second)
//! - any number of `setup`/`teardown` blocks, each category executing in
//!   its own registration order around every case
//!
//! Calls that can misconfigure the suite return `Result` so the
//! registration closure can propagate with `?`; everything else returns
//! `()` or a column builder.

use crate::columns::{Column, GeneratedColumns, ThreeColumns, TwoColumns};
use crate::suite::{LifecycleHooks, SpecificationCase};
use specdrive_core::{Expect, HookKind, ParamTuple, Result, SpecError};
use std::fmt::Debug;

/// Fluent builder describing one suite
pub struct Description {
    cases: Vec<SpecificationCase>,
    hooks: LifecycleHooks,
}

impl Description {
    pub(crate) fn new() -> Self {
        Description {
            cases: Vec::new(),
            hooks: LifecycleHooks::new(),
        }
    }

    /// Register a non-data-driven case
    pub fn should(
        &mut self,
        description: impl Into<String>,
        body: impl Fn(&Expect) + Send + Sync + 'static,
    ) {
        self.cases.push(SpecificationCase {
            description: description.into(),
            params: ParamTuple::new(),
            body: Box::new(body),
        });
    }

    /// Begin a single-column data-driven declaration
    ///
    /// Accepts anything iterable: a `Vec`, an array (so a lone value is
    /// just `uses([v])`), or any other finite sequence. Must be followed
    /// by exactly one [`to_show`](Column::to_show).
    pub fn uses<T>(&mut self, values: impl IntoIterator<Item = T>) -> Column<'_, T>
    where
        T: Debug + Send + Sync + 'static,
    {
        Column::new(self, values.into_iter().collect())
    }

    /// Begin a two-column data-driven declaration
    ///
    /// Tuples pair positionally: tuple *i* is `(first[i], second[i])`.
    /// Fails with [`SpecError::ColumnLengthMismatch`] when the sequences
    /// disagree in length.
    pub fn uses_two<F, S>(&mut self, first: Vec<F>, second: Vec<S>) -> Result<TwoColumns<'_, F, S>>
    where
        F: Debug + Send + Sync + 'static,
        S: Debug + Send + Sync + 'static,
    {
        check_lengths(first.len(), second.len())?;
        Ok(TwoColumns::new(self, first, second))
    }

    /// Begin a three-column data-driven declaration
    ///
    /// Tuples pair positionally across all three sequences; any length
    /// disagreement fails with [`SpecError::ColumnLengthMismatch`].
    pub fn uses_three<F, S, T>(
        &mut self,
        first: Vec<F>,
        second: Vec<S>,
        third: Vec<T>,
    ) -> Result<ThreeColumns<'_, F, S, T>>
    where
        F: Debug + Send + Sync + 'static,
        S: Debug + Send + Sync + 'static,
        T: Debug + Send + Sync + 'static,
    {
        check_lengths(first.len(), second.len())?;
        check_lengths(second.len(), third.len())?;
        Ok(ThreeColumns::new(self, first, second, third))
    }

    /// Begin a generated data-driven declaration realizing `count` tuples
    ///
    /// The returned builder pulls values eagerly from a
    /// [`SourceGenerator`](specdrive_generators::SourceGenerator)
    /// (entropy-seeded unless overridden). Fails with
    /// [`SpecError::InvalidBound`] when `count` is zero.
    pub fn requires(&mut self, count: usize) -> Result<GeneratedColumns<'_>> {
        if count == 0 {
            return Err(SpecError::InvalidBound(0));
        }
        Ok(GeneratedColumns::new(self, count))
    }

    /// Run `block` before each case, in registration order
    pub fn should_setup(&mut self, block: impl Fn() + Send + Sync + 'static) {
        self.hooks.setups.push(Box::new(block));
    }

    /// Run `block` once before all cases
    ///
    /// At most one per suite.
    pub fn should_initialize(&mut self, block: impl Fn() + Send + Sync + 'static) -> Result<()> {
        if self.hooks.initialize.is_some() {
            return Err(SpecError::DuplicateHook(HookKind::Initialize));
        }
        self.hooks.initialize = Some(Box::new(block));
        Ok(())
    }

    /// Run `block` after each case, in registration order
    pub fn should_tear_down(&mut self, block: impl Fn() + Send + Sync + 'static) {
        self.hooks.teardowns.push(Box::new(block));
    }

    /// Run `block` once after all cases, regardless of their outcomes
    ///
    /// At most one per suite.
    pub fn should_complete(&mut self, block: impl Fn() + Send + Sync + 'static) -> Result<()> {
        if self.hooks.complete.is_some() {
            return Err(SpecError::DuplicateHook(HookKind::Complete));
        }
        self.hooks.complete = Some(Box::new(block));
        Ok(())
    }

    pub(crate) fn push_case(&mut self, case: SpecificationCase) {
        self.cases.push(case);
    }

    pub(crate) fn into_parts(self) -> (Vec<SpecificationCase>, LifecycleHooks) {
        (self.cases, self.hooks)
    }
}

fn check_lengths(left: usize, right: usize) -> Result<()> {
    if left != right {
        return Err(SpecError::ColumnLengthMismatch { left, right });
    }
    Ok(())
}
