//! Concurrent case and suite scheduling
//!
//! A fixed pool of worker threads executes case tasks FIFO. One suite's
//! driver initializes on its own thread, submits every case as an
//! independent task, waits on a completion latch, then completes. So
//! cases within a suite run concurrently with each other, and independent
//! suites run concurrently on scoped driver threads sharing the pool.
//!
//! The run is declared done only after every case and every terminal hook
//! across every suite has finished; nothing is left dangling.

use crate::collector::ResultCollector;
use crate::lifecycle::{run_case, run_hook, SuitePhase};
use crate::suite::{HookFn, SpecificationCase, Suite};
use parking_lot::{Condvar, Mutex};
use specdrive_core::{CaseOutcome, CaseResult, HookFailure, HookKind, SuiteResult};
use std::collections::VecDeque;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::thread::JoinHandle;
use std::time::Duration;
use tracing::{debug, error, trace};

type Task = Box<dyn FnOnce() + Send>;

struct PoolInner {
    queue: Mutex<VecDeque<Task>>,
    work_ready: Condvar,
    shutdown: AtomicBool,
}

/// Fixed pool of worker threads executing case tasks in FIFO order
struct WorkerPool {
    inner: Arc<PoolInner>,
    workers: Mutex<Vec<JoinHandle<()>>>,
}

impl WorkerPool {
    /// Spawn `num_threads` workers, named `specdrive-worker-0`, `-1`, ...
    fn new(num_threads: usize) -> Self {
        let inner = Arc::new(PoolInner {
            queue: Mutex::new(VecDeque::new()),
            work_ready: Condvar::new(),
            shutdown: AtomicBool::new(false),
        });

        let mut workers = Vec::with_capacity(num_threads);
        for i in 0..num_threads {
            let inner_clone = Arc::clone(&inner);
            let handle = std::thread::Builder::new()
                .name(format!("specdrive-worker-{}", i))
                .spawn(move || worker_loop(&inner_clone))
                .expect("failed to spawn specdrive worker thread");
            workers.push(handle);
        }

        WorkerPool {
            inner,
            workers: Mutex::new(workers),
        }
    }

    fn submit(&self, task: impl FnOnce() + Send + 'static) {
        {
            let mut queue = self.inner.queue.lock();
            queue.push_back(Box::new(task));
        }
        self.inner.work_ready.notify_one();
    }

    /// Signal workers to exit once the queue is empty and join them
    fn shutdown(&self) {
        self.inner.shutdown.store(true, Ordering::Release);

        // Lock the queue before notifying to prevent lost-wakeup: a worker
        // between its shutdown check and condvar wait holds this lock, so
        // acquiring it guarantees the worker either is already waiting (our
        // notify wakes it) or has yet to check the flag (and will see it).
        {
            let _queue = self.inner.queue.lock();
            self.inner.work_ready.notify_all();
        }

        let mut workers = self.workers.lock();
        for handle in workers.drain(..) {
            let _ = handle.join();
        }
    }
}

fn worker_loop(inner: &PoolInner) {
    loop {
        let task = {
            let mut queue = inner.queue.lock();
            loop {
                if let Some(task) = queue.pop_front() {
                    break task;
                }
                if inner.shutdown.load(Ordering::Acquire) {
                    return;
                }
                inner.work_ready.wait(&mut queue);
            }
        };

        // Tasks contain their own fault boundaries; this catch only keeps a
        // worker alive if one slips through.
        if let Err(payload) = std::panic::catch_unwind(std::panic::AssertUnwindSafe(task)) {
            error!(
                "case task panicked past its fault boundary: {:?}",
                payload.downcast_ref::<&str>().copied().unwrap_or("(non-string panic)")
            );
        }
    }
}

/// Waits until a known number of case tasks have finished
struct CompletionLatch {
    remaining: Mutex<usize>,
    done: Condvar,
}

impl CompletionLatch {
    fn new(count: usize) -> Self {
        CompletionLatch {
            remaining: Mutex::new(count),
            done: Condvar::new(),
        }
    }

    fn count_down(&self) {
        let mut remaining = self.remaining.lock();
        *remaining -= 1;
        if *remaining == 0 {
            self.done.notify_all();
        }
    }

    fn wait(&self) {
        let mut remaining = self.remaining.lock();
        while *remaining > 0 {
            self.done.wait(&mut remaining);
        }
    }
}

/// Everything case tasks need to share across threads
struct SuiteBody {
    cases: Vec<SpecificationCase>,
    setups: Vec<HookFn>,
    teardowns: Vec<HookFn>,
}

/// Executes suites on a shared fixed-size worker pool
pub struct Scheduler {
    pool: WorkerPool,
}

impl Scheduler {
    /// Create a scheduler with `num_threads` case workers
    pub fn new(num_threads: usize) -> Self {
        Scheduler {
            pool: WorkerPool::new(num_threads.max(1)),
        }
    }

    /// Execute one suite, blocking until its result is complete
    pub fn run(&self, suite: Suite) -> SuiteResult {
        self.execute(suite)
    }

    /// Execute independent suites concurrently
    ///
    /// Each suite gets its own driver thread; all case tasks share the
    /// pool. Results come back in the order the suites were given,
    /// independent of completion order.
    pub fn run_all(&self, suites: Vec<Suite>) -> Vec<SuiteResult> {
        std::thread::scope(|scope| {
            let handles: Vec<_> = suites
                .into_iter()
                .map(|suite| scope.spawn(move || self.execute(suite)))
                .collect();
            handles
                .into_iter()
                .map(|handle| handle.join().expect("suite driver thread panicked"))
                .collect()
        })
    }

    fn execute(&self, suite: Suite) -> SuiteResult {
        let Suite { name, cases, hooks } = suite;
        debug!(suite = name.as_str(), cases = cases.len(), "suite starting");

        let mut phase = SuitePhase::NotStarted;
        trace!(suite = name.as_str(), phase = ?phase, "suite phase");
        let collector = Arc::new(ResultCollector::with_capacity(cases.len()));

        enter(&name, &mut phase, SuitePhase::Initializing);
        let initialized = match &hooks.initialize {
            Some(hook) => match run_hook(hook) {
                Ok(()) => true,
                Err(cause) => {
                    collector.record_hook_failure(HookFailure {
                        kind: HookKind::Initialize,
                        case: None,
                        cause,
                    });
                    false
                }
            },
            None => true,
        };

        let body = Arc::new(SuiteBody {
            cases,
            setups: hooks.setups,
            teardowns: hooks.teardowns,
        });

        if initialized {
            enter(&name, &mut phase, SuitePhase::Ready);
            let latch = Arc::new(CompletionLatch::new(body.cases.len()));

            enter(&name, &mut phase, SuitePhase::Running);
            for index in 0..body.cases.len() {
                let body = Arc::clone(&body);
                let collector = Arc::clone(&collector);
                let latch = Arc::clone(&latch);
                self.pool.submit(move || {
                    let execution = run_case(&body.cases[index], &body.setups, &body.teardowns);
                    collector.record(index, execution.result);
                    for failure in execution.hook_failures {
                        collector.record_hook_failure(failure);
                    }
                    latch.count_down();
                });
            }
            latch.wait();
        } else {
            // Initialization failed: no case runs, but every registered
            // case is still represented in the result.
            for (index, case) in body.cases.iter().enumerate() {
                collector.record(
                    index,
                    CaseResult {
                        description: case.description().to_string(),
                        params: case.params().clone(),
                        outcome: CaseOutcome::Errored {
                            cause: "suite initialization failed; case skipped".to_string(),
                        },
                        duration: Duration::ZERO,
                    },
                );
            }
        }

        enter(&name, &mut phase, SuitePhase::Completing);
        if let Some(hook) = &hooks.complete {
            if let Err(cause) = run_hook(hook) {
                collector.record_hook_failure(HookFailure {
                    kind: HookKind::Complete,
                    case: None,
                    cause,
                });
            }
        }

        enter(&name, &mut phase, SuitePhase::Finished);
        let result = collector.finish(name.clone());
        debug!(
            suite = name.as_str(),
            passed = result.passed(),
            failed = result.failed(),
            errored = result.errored(),
            hook_failures = result.hook_failures.len(),
            "suite finished"
        );
        result
    }
}

impl Default for Scheduler {
    /// Scheduler sized to the machine's available parallelism
    fn default() -> Self {
        let threads = std::thread::available_parallelism()
            .map(|n| n.get())
            .unwrap_or(4);
        Scheduler::new(threads)
    }
}

impl Drop for Scheduler {
    fn drop(&mut self) {
        self.pool.shutdown();
    }
}

fn enter(suite: &str, phase: &mut SuitePhase, next: SuitePhase) {
    *phase = next;
    trace!(suite, phase = ?next, "suite phase");
}
