//! Fixed-size worker pool.
//!
//! Jobs wait in a queue behind a mutex. Idle workers block on a condition
//! variable until a job arrives or the pool shuts down. Shutdown lets the
//! workers drain whatever is still queued before they exit, so dropping
//! the pool never loses submitted work. If no worker thread could be
//! started, jobs run inline on the submitting thread.

use std::collections::VecDeque;
use std::io;
use std::sync::Arc;
use std::thread::{self, JoinHandle};

use crossbeam::channel;
use parking_lot::{Condvar, Mutex};

use crate::DriverError;

type Job = Box<dyn FnOnce() + Send + 'static>;

struct Queue {
    jobs: VecDeque<Job>,
    shutdown: bool,
}

struct Shared {
    queue: Mutex<Queue>,
    ready: Condvar,
}

pub struct WorkerPool {
    shared: Arc<Shared>,
    workers: Vec<JoinHandle<()>>,
}

impl WorkerPool {
    /// Start `threads` workers (at least one).
    pub fn new(threads: usize) -> Self {
        Self::with_spawner(threads, |index, shared| {
            thread::Builder::new()
                .name(format!("zeus-worker-{index}"))
                .spawn(move || worker_loop(&shared))
        })
    }

    fn with_spawner<S>(threads: usize, mut spawn: S) -> Self
    where
        S: FnMut(usize, Arc<Shared>) -> io::Result<JoinHandle<()>>,
    {
        let shared = Arc::new(Shared {
            queue: Mutex::new(Queue {
                jobs: VecDeque::new(),
                shutdown: false,
            }),
            ready: Condvar::new(),
        });
        let mut workers = Vec::with_capacity(threads.max(1));
        for index in 0..threads.max(1) {
            match spawn(index, Arc::clone(&shared)) {
                Ok(worker) => workers.push(worker),
                Err(error) => tracing::warn!(%error, index, "could not start worker"),
            }
        }
        tracing::debug!(threads = workers.len(), "worker pool started");
        WorkerPool { shared, workers }
    }

    pub fn threads(&self) -> usize {
        self.workers.len()
    }

    /// Queue a job for the next idle worker, or run it right away when
    /// the pool has no workers.
    pub fn execute<F>(&self, job: F)
    where
        F: FnOnce() + Send + 'static,
    {
        if self.workers.is_empty() {
            job();
            return;
        }
        self.shared.queue.lock().jobs.push_back(Box::new(job));
        self.shared.ready.notify_one();
    }

    /// Run `f` on every item and return the results in input order.
    ///
    /// Fails if a job dies before reporting its result.
    pub fn map<T, R, F>(&self, items: Vec<T>, f: F) -> Result<Vec<R>, DriverError>
    where
        T: Send + 'static,
        R: Send + 'static,
        F: Fn(T) -> R + Send + Sync + 'static,
    {
        let count = items.len();
        let f = Arc::new(f);
        let (sender, receiver) = channel::unbounded();
        for (index, item) in items.into_iter().enumerate() {
            let f = Arc::clone(&f);
            let sender = sender.clone();
            self.execute(move || {
                // The receiver only goes away once `map` has given up.
                let _ = sender.send((index, f(item)));
            });
        }
        drop(sender);

        let mut results: Vec<Option<R>> = (0..count).map(|_| None).collect();
        for _ in 0..count {
            let (index, result) = receiver.recv().map_err(|_| DriverError::PoolStopped)?;
            results[index] = Some(result);
        }
        results
            .into_iter()
            .map(|result| result.ok_or(DriverError::PoolStopped))
            .collect()
    }
}

fn worker_loop(shared: &Shared) {
    loop {
        let job = {
            let mut queue = shared.queue.lock();
            loop {
                if let Some(job) = queue.jobs.pop_front() {
                    break Some(job);
                }
                if queue.shutdown {
                    break None;
                }
                shared.ready.wait(&mut queue);
            }
        };
        match job {
            Some(job) => job(),
            None => break,
        }
    }
}

impl Drop for WorkerPool {
    fn drop(&mut self) {
        self.shared.queue.lock().shutdown = true;
        self.shared.ready.notify_all();
        for worker in self.workers.drain(..) {
            // A panicking job already lost its result; nothing left to do.
            let _ = worker.join();
        }
        tracing::debug!("worker pool stopped");
    }
}
