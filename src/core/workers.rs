//! Background thread pool for frame decoding.
//!
//! Uses work-stealing deques:
//! - New tasks pushed to the global injector
//! - Idle workers steal from each other
//!
//! Epoch mechanism lets a deactivated presentation drop decode jobs that
//! were queued but not started yet. Jobs already running are not interrupted.

use crossbeam::deque::{Injector, Worker};
use log::trace;
use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use std::sync::Arc;
use std::thread;

type Job = Box<dyn FnOnce() + Send + 'static>;

/// Worker pool with work-stealing for background decoding.
///
/// # Example
/// ```ignore
/// let workers = Workers::new(4, Arc::new(AtomicU64::new(0)));
/// let epoch = workers.current_epoch();
/// workers.execute_with_epoch(epoch, move || {
///     let _ = tx.send(Loader::load(&path));
/// });
/// ```
pub struct Workers {
    injector: Arc<Injector<Job>>,          // Global queue for external tasks
    handles: Vec<thread::JoinHandle<()>>,  // Thread handles for proper shutdown
    current_epoch: Arc<AtomicU64>,         // Epoch counter
    shutdown: Arc<AtomicBool>,             // Shutdown signal
}

impl Workers {
    /// Create worker pool with work-stealing deques and shared epoch counter.
    ///
    /// Recommended: `num_cpus::get() * 3 / 4` (leave 25% for the UI thread).
    pub fn new(num_threads: usize, epoch: Arc<AtomicU64>) -> Self {
        let num_threads = num_threads.max(1);
        let injector: Arc<Injector<Job>> = Arc::new(Injector::new());
        let shutdown = Arc::new(AtomicBool::new(false));

        let mut workers_local: Vec<Worker<Job>> = Vec::new();
        let mut stealers = Vec::new();
        let mut handles = Vec::new();

        for _ in 0..num_threads {
            let worker: Worker<Job> = Worker::new_fifo();
            stealers.push(worker.stealer());
            workers_local.push(worker);
        }

        for (worker_id, worker) in workers_local.into_iter().enumerate() {
            let injector = Arc::clone(&injector);
            let shutdown = Arc::clone(&shutdown);
            let stealers = stealers.clone();

            let spawned = thread::Builder::new()
                .name(format!("scrollreel-decode-{}", worker_id))
                .spawn(move || {
                    trace!("Worker {} started", worker_id);

                    loop {
                        if let Some(job) = worker.pop() {
                            job();
                            continue;
                        }

                        if let Some(job) = injector.steal_batch_and_pop(&worker).success() {
                            job();
                            continue;
                        }

                        let stolen = stealers
                            .iter()
                            .find_map(|stealer| stealer.steal().success());
                        if let Some(job) = stolen {
                            job();
                            continue;
                        }

                        if shutdown.load(Ordering::Relaxed) {
                            break;
                        }

                        // No work - short sleep to avoid CPU spin
                        thread::sleep(std::time::Duration::from_millis(1));
                    }

                    trace!("Worker {} stopped", worker_id);
                });

            match spawned {
                Ok(handle) => handles.push(handle),
                Err(e) => log::error!("Failed to spawn decode worker {}: {}", worker_id, e),
            }
        }

        trace!("Workers initialized: {} threads (work-stealing)", handles.len());

        Self {
            injector,
            handles,
            current_epoch: epoch,
            shutdown,
        }
    }

    /// Number of live worker threads
    pub fn len(&self) -> usize {
        self.handles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.handles.is_empty()
    }

    /// Get current epoch
    pub fn current_epoch(&self) -> u64 {
        self.current_epoch.load(Ordering::Relaxed)
    }

    /// Invalidate every job queued under the previous epoch.
    pub fn bump_epoch(&self) -> u64 {
        let next = self.current_epoch.fetch_add(1, Ordering::SeqCst) + 1;
        trace!("Workers epoch -> {}", next);
        next
    }

    /// Execute closure with epoch check (for cancellable requests).
    ///
    /// The check runs when a worker picks the job up, not at enqueue time,
    /// so bumping the epoch drops everything still waiting in the queues.
    pub fn execute_with_epoch<F>(&self, epoch: u64, f: F)
    where
        F: FnOnce() + Send + 'static,
    {
        let current_epoch = Arc::clone(&self.current_epoch);
        let wrapped = move || {
            if current_epoch.load(Ordering::Relaxed) == epoch {
                f();
            }
        };
        self.injector.push(Box::new(wrapped));
    }
}

impl Drop for Workers {
    fn drop(&mut self) {
        use std::time::{Duration, Instant};

        let num_threads = self.handles.len();
        trace!("Workers shutting down ({} threads)...", num_threads);

        self.shutdown.store(true, Ordering::SeqCst);

        // Decoding a single frame is short; don't block exit on a stuck file
        let deadline = Instant::now() + Duration::from_millis(500);

        let handles = std::mem::take(&mut self.handles);
        for handle in handles {
            while !handle.is_finished() {
                if Instant::now() >= deadline {
                    trace!("Shutdown timeout reached, exiting anyway");
                    return;
                }
                thread::sleep(Duration::from_millis(1));
            }
            let _ = handle.join();
        }

        trace!("All {} workers stopped gracefully", num_threads);
    }
}
