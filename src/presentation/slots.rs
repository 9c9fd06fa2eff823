//! Observable data and status slots shared by a state holder and its tasks.

use super::scope::lock;
use std::sync::Mutex;
use tokio::sync::watch;

/// Which subscription may write, and whether anyone may write at all.
#[derive(Debug)]
struct Gate {
    open: bool,
    generation: u64,
}

/// Data slot plus status slot, updated only through the reduction rules below.
///
/// Every update runs under the gate lock, so once [`Slots::close`] returns no
/// further change is published.
pub struct Slots<T> {
    data: watch::Sender<T>,
    status: watch::Sender<Option<String>>,
    gate: Mutex<Gate>,
}

impl<T: Clone + Default> Slots<T> {
    pub fn new() -> Self {
        Self {
            data: watch::Sender::new(T::default()),
            status: watch::Sender::new(None),
            gate: Mutex::new(Gate {
                open: true,
                generation: 0,
            }),
        }
    }

    pub fn data(&self) -> T {
        self.data.borrow().clone()
    }

    pub fn status(&self) -> Option<String> {
        self.status.borrow().clone()
    }

    pub fn watch_data(&self) -> watch::Receiver<T> {
        self.data.subscribe()
    }

    pub fn watch_status(&self) -> watch::Receiver<Option<String>> {
        self.status.subscribe()
    }

    /// Start a new read subscription; older ones stop being able to write.
    pub(crate) fn next_generation(&self) -> u64 {
        let mut gate = lock(&self.gate);
        gate.generation += 1;
        gate.generation
    }

    /// Successful emission: status cleared, data replaced.
    pub(crate) fn show(&self, generation: u64, value: T) {
        let gate = lock(&self.gate);
        if gate.open && gate.generation == generation {
            self.status.send_replace(None);
            self.data.send_replace(value);
        }
    }

    /// Failed emission or stream fault: message shown, data discarded.
    pub(crate) fn fail(&self, generation: u64, message: String) {
        let gate = lock(&self.gate);
        if gate.open && gate.generation == generation {
            self.status.send_replace(Some(message));
            self.data.send_replace(T::default());
        }
    }

    /// Outcome of a write command. Leaves the data slot alone.
    pub(crate) fn report(&self, message: String) {
        let gate = lock(&self.gate);
        if gate.open {
            self.status.send_replace(Some(message));
        }
    }

    pub(crate) fn close(&self) {
        lock(&self.gate).open = false;
    }
}

impl<T: Clone + Default> Default for Slots<T> {
    fn default() -> Self {
        Self::new()
    }
}
