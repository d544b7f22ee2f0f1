//! Concurrent execution tests for specdrive-runner
//!
//! These exercise the ordering and fault-isolation contracts under real
//! concurrency:
//!
//! 1. **Initialize-before-cases** - no case starts before initialize returns
//! 2. **Complete-after-everything** - the completer sees every case and
//!    teardown finished
//! 3. **Fault isolation** - one faulting hook or case never prevents other
//!    cases from running and being reported
//! 4. **Order preservation** - collected order matches registration order
//!    regardless of scheduling interleaving

use parking_lot::Mutex;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;

use specdrive_runner::{CaseOutcome, HookKind, Scheduler, Suite};

/// Records labels in the order suite components actually ran
#[derive(Clone, Default)]
struct CallLog {
    entries: Arc<Mutex<Vec<String>>>,
}

impl CallLog {
    fn push(&self, label: impl Into<String>) {
        self.entries.lock().push(label.into());
    }

    fn snapshot(&self) -> Vec<String> {
        self.entries.lock().clone()
    }
}

#[test]
fn initialize_strictly_precedes_every_case() {
    let initialized = Arc::new(AtomicBool::new(false));
    let saw_uninitialized = Arc::new(AtomicBool::new(false));

    let init_flag = Arc::clone(&initialized);
    let seen_flag = Arc::clone(&saw_uninitialized);
    let suite = Suite::describe("init ordering", move |it| {
        let flag = Arc::clone(&init_flag);
        it.should_initialize(move || {
            // Give any eagerly scheduled case a chance to misbehave
            std::thread::sleep(Duration::from_millis(20));
            flag.store(true, Ordering::SeqCst);
        })?;
        for i in 0..8 {
            let init = Arc::clone(&init_flag);
            let seen = Arc::clone(&seen_flag);
            it.should(format!("case {}", i), move |_| {
                if !init.load(Ordering::SeqCst) {
                    seen.store(true, Ordering::SeqCst);
                }
            });
        }
        Ok(())
    })
    .unwrap();

    let result = Scheduler::new(4).run(suite);
    assert_eq!(result.cases.len(), 8);
    assert!(!saw_uninitialized.load(Ordering::SeqCst));
    assert!(result.is_success());
}

#[test]
fn complete_strictly_follows_every_case_and_teardown() {
    let cases_done = Arc::new(AtomicUsize::new(0));
    let teardowns_done = Arc::new(AtomicUsize::new(0));
    let seen_at_complete = Arc::new(Mutex::new((0usize, 0usize)));

    let case_count = Arc::clone(&cases_done);
    let teardown_count = Arc::clone(&teardowns_done);
    let observed = Arc::clone(&seen_at_complete);
    let suite = Suite::describe("complete ordering", move |it| {
        let teardowns = Arc::clone(&teardown_count);
        it.should_tear_down(move || {
            teardowns.fetch_add(1, Ordering::SeqCst);
        });
        for i in 0..6 {
            let cases = Arc::clone(&case_count);
            it.should(format!("case {}", i), move |_| {
                std::thread::sleep(Duration::from_millis(2));
                cases.fetch_add(1, Ordering::SeqCst);
            });
        }
        let cases = Arc::clone(&case_count);
        let teardowns = Arc::clone(&teardown_count);
        let observed = Arc::clone(&observed);
        it.should_complete(move || {
            *observed.lock() = (
                cases.load(Ordering::SeqCst),
                teardowns.load(Ordering::SeqCst),
            );
        })?;
        Ok(())
    })
    .unwrap();

    let result = Scheduler::new(4).run(suite);
    assert!(result.is_success());
    assert_eq!(*seen_at_complete.lock(), (6, 6));
}

#[test]
fn two_case_suite_with_faulting_completer_records_everything() {
    let log = CallLog::default();

    let registration_log = log.clone();
    let suite = Suite::describe("a two spec suite", move |it| {
        let l = registration_log.clone();
        it.should("have spec1", move |_| l.push("spec1"));
        let l = registration_log.clone();
        it.should("have spec2", move |_| l.push("spec2"));

        // Deliberately registered teardown-before-setup: category order,
        // not registration interleaving, governs per-case sequencing.
        let l = registration_log.clone();
        it.should_tear_down(move || l.push("teardown"));
        let l = registration_log.clone();
        it.should_setup(move || l.push("setup"));

        it.should_complete(|| panic!("completer raised"))?;
        let l = registration_log.clone();
        it.should_initialize(move || l.push("initialize"))?;
        Ok(())
    })
    .unwrap();

    let result = Scheduler::new(4).run(suite);

    // Both specs executed and are recorded exactly once, in order
    let entries = log.snapshot();
    assert_eq!(entries.iter().filter(|e| *e == "spec1").count(), 1);
    assert_eq!(entries.iter().filter(|e| *e == "spec2").count(), 1);
    assert_eq!(result.cases.len(), 2);
    assert_eq!(result.cases[0].description, "have spec1");
    assert_eq!(result.cases[1].description, "have spec2");
    assert!(result.cases.iter().all(|c| c.outcome.is_passed()));

    // The completer's fault is recorded separately, not on any case
    assert_eq!(result.hook_failures.len(), 1);
    assert_eq!(result.hook_failures[0].kind, HookKind::Complete);
    assert_eq!(result.hook_failures[0].case, None);
    assert_eq!(result.passed(), 2);
    assert!(!result.is_success());
}

#[test]
fn teardown_registered_first_still_runs_after_setup() {
    let log = CallLog::default();

    let registration_log = log.clone();
    let suite = Suite::describe("category ordering", move |it| {
        let l = registration_log.clone();
        it.should_tear_down(move || l.push("teardown"));
        let l = registration_log.clone();
        it.should_setup(move || l.push("setup"));
        let l = registration_log.clone();
        it.should("only case", move |_| l.push("body"));
        Ok(())
    })
    .unwrap();

    let result = Scheduler::new(1).run(suite);
    assert!(result.is_success());
    assert_eq!(log.snapshot(), vec!["setup", "body", "teardown"]);
}

#[test]
fn setup_faulting_on_every_case_errors_each_and_still_tears_down() {
    let teardowns_run = Arc::new(AtomicUsize::new(0));
    let bodies_run = Arc::new(AtomicUsize::new(0));

    let teardown_count = Arc::clone(&teardowns_run);
    let body_count = Arc::clone(&bodies_run);
    let suite = Suite::describe("broken setup", move |it| {
        it.should_setup(|| panic!("fixture missing"));
        let teardowns = Arc::clone(&teardown_count);
        it.should_tear_down(move || {
            teardowns.fetch_add(1, Ordering::SeqCst);
        });
        for i in 0..4 {
            let bodies = Arc::clone(&body_count);
            it.should(format!("case {}", i), move |_| {
                bodies.fetch_add(1, Ordering::SeqCst);
            });
        }
        Ok(())
    })
    .unwrap();

    let result = Scheduler::new(4).run(suite);

    assert_eq!(result.cases.len(), 4);
    assert!(result.cases.iter().all(|c| c.outcome.is_errored()));
    assert_eq!(bodies_run.load(Ordering::SeqCst), 0);
    // Teardown executed exactly once per case despite the setup fault
    assert_eq!(teardowns_run.load(Ordering::SeqCst), 4);
    // And each setup fault is recorded as a hook failure on the suite
    assert_eq!(
        result
            .hook_failures
            .iter()
            .filter(|f| f.kind == HookKind::Setup)
            .count(),
        4
    );
}

#[test]
fn mixed_outcomes_are_isolated_per_case() {
    let suite = Suite::describe("mixed", |it| {
        it.should("passes", |expect| expect.that(2 + 2).is_equal_to(4));
        it.should("fails", |expect| expect.that(2 + 2).is_equal_to(5));
        it.should("errors", |_| panic!("unexpected"));
        it.should("also passes", |expect| expect.that(true).is_true());
        Ok(())
    })
    .unwrap();

    let result = Scheduler::new(4).run(suite);
    assert_eq!(result.cases.len(), 4);
    assert!(result.cases[0].outcome.is_passed());
    assert!(matches!(
        result.cases[1].outcome,
        CaseOutcome::Failed { .. }
    ));
    assert!(matches!(
        result.cases[2].outcome,
        CaseOutcome::Errored { .. }
    ));
    assert!(result.cases[3].outcome.is_passed());
    assert_eq!(result.passed(), 2);
    assert_eq!(result.failed(), 1);
    assert_eq!(result.errored(), 1);
}

#[test]
fn suites_run_concurrently_and_independently() {
    let concurrent_peak = Arc::new(AtomicUsize::new(0));
    let in_flight = Arc::new(AtomicUsize::new(0));

    let mut suites = Vec::new();
    for s in 0..4 {
        let peak = Arc::clone(&concurrent_peak);
        let active = Arc::clone(&in_flight);
        suites.push(
            Suite::describe(format!("suite {}", s), move |it| {
                let peak = Arc::clone(&peak);
                let active = Arc::clone(&active);
                it.should("works", move |_| {
                    let now = active.fetch_add(1, Ordering::SeqCst) + 1;
                    peak.fetch_max(now, Ordering::SeqCst);
                    std::thread::sleep(Duration::from_millis(30));
                    active.fetch_sub(1, Ordering::SeqCst);
                });
                Ok(())
            })
            .unwrap(),
        );
    }

    let scheduler = Scheduler::new(4);
    let results = scheduler.run_all(suites);

    assert_eq!(results.len(), 4);
    assert!(results.iter().all(|r| r.is_success()));
    for (i, result) in results.iter().enumerate() {
        assert_eq!(result.name, format!("suite {}", i));
    }
    // With 4 workers and 30ms bodies, at least two suites overlapped
    assert!(concurrent_peak.load(Ordering::SeqCst) >= 2);
}

#[test]
fn stress_many_cases_none_lost_none_duplicated() {
    let executions = Arc::new(AtomicUsize::new(0));

    let execution_count = Arc::clone(&executions);
    let suite = Suite::describe("stress", move |it| {
        it.uses((0..200).collect::<Vec<i64>>())
            .to_show("case {}", {
                let count = Arc::clone(&execution_count);
                move |expect, n| {
                    count.fetch_add(1, Ordering::Relaxed);
                    expect.that(*n).is_not_equal_to(-1);
                }
            });
        Ok(())
    })
    .unwrap();

    let result = Scheduler::new(8).run(suite);
    assert_eq!(result.cases.len(), 200);
    assert_eq!(executions.load(Ordering::Relaxed), 200);
    for (i, case) in result.cases.iter().enumerate() {
        assert_eq!(case.description, format!("case {}", i));
    }
    assert!(result.is_success());
}
