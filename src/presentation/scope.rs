//! Screen-bound task scope. Every task a state holder starts lives here and is
//! aborted together when the screen goes away.

use std::future::Future;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Mutex, MutexGuard, PoisonError};
use tokio::task::{AbortHandle, JoinSet};
use tracing::debug;

pub struct ScreenScope {
    name: &'static str,
    tasks: Mutex<JoinSet<()>>,
    cancelled: AtomicBool,
}

impl ScreenScope {
    pub fn new(name: &'static str) -> Self {
        Self {
            name,
            tasks: Mutex::new(JoinSet::new()),
            cancelled: AtomicBool::new(false),
        }
    }

    pub fn name(&self) -> &'static str {
        self.name
    }

    /// Start a task in this scope. Returns `None` once the scope is cancelled.
    /// Must be called from within a tokio runtime.
    pub fn spawn<F>(&self, task: F) -> Option<AbortHandle>
    where
        F: Future<Output = ()> + Send + 'static,
    {
        let mut tasks = lock(&self.tasks);
        // cancel() sets the flag before it takes the lock.
        if self.is_cancelled() {
            debug!(scope = self.name, "scope cancelled, task not started");
            return None;
        }
        // Drop the results of tasks that already finished.
        while tasks.try_join_next().is_some() {}
        Some(tasks.spawn(task))
    }

    /// Abort every task. Idempotent.
    pub fn cancel(&self) {
        if self.cancelled.swap(true, Ordering::SeqCst) {
            return;
        }
        let mut tasks = lock(&self.tasks);
        debug!(scope = self.name, tasks = tasks.len(), "cancelling scope");
        tasks.abort_all();
    }

    pub fn is_cancelled(&self) -> bool {
        self.cancelled.load(Ordering::SeqCst)
    }
}

impl Drop for ScreenScope {
    fn drop(&mut self) {
        self.cancel();
    }
}

pub(crate) fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(PoisonError::into_inner)
}
