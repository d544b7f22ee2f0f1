//! Specdrive - specification-execution engine
//!
//! Specdrive registers human-readable behavioral specifications, expands
//! data-driven variants, runs every case through a managed lifecycle
//! (initialize once, setup each, body, teardown each, complete once), and
//! collects pass/fail/error outcomes concurrently without losing or
//! duplicating any of them.
//!
//! # Quick Start
//!
//! ```
//! use specdrive::{Scheduler, Suite};
//!
//! let suite = Suite::describe("a calculator", |it| {
//!     it.should("add small numbers", |expect| {
//!         expect.that(1 + 2).is_equal_to(3);
//!     });
//!
//!     it.uses_two(vec![1, 2, 3], vec![2, 4, 6])?
//!         .to_show("doubles {} into {}", |expect, n, doubled| {
//!             expect.that(*n * 2).is_equal_to(*doubled);
//!         });
//!     Ok(())
//! })?;
//!
//! let result = Scheduler::default().run(suite);
//! assert_eq!(result.passed(), 4);
//! assert!(result.is_success());
//! # Ok::<(), specdrive::SpecError>(())
//! ```
//!
//! # Architecture
//!
//! Registration happens through the fluent [`Description`] builder inside
//! [`Suite::describe`]; execution happens on a [`Scheduler`] that runs
//! independent cases (and independent suites) concurrently while keeping
//! the delivered [`SuiteResult`] in registration order. External reporters
//! consume the `SuiteResult`; rendering is out of scope here.

// Re-export the public API from specdrive-runner
pub use specdrive_runner::*;
