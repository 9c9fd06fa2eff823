//! State of the sleep screen. Read-only; nothing is loaded until the first refresh.

use super::{Slots, ScreenScope, follow};
use crate::domain::Sleep;
use crate::presentation::scope::lock;
use crate::usecases::GetAllSleepsUseCase;
use std::sync::{Arc, Mutex};
use tokio::sync::watch;
use tokio::task::AbortHandle;

const LOAD_FAILED: &str = "Failed to load sleeps";

pub struct SleepStateHolder {
    scope: ScreenScope,
    slots: Arc<Slots<Vec<Sleep>>>,
    get_all: GetAllSleepsUseCase,
    subscription: Mutex<Option<AbortHandle>>,
}

impl SleepStateHolder {
    pub fn new(get_all: GetAllSleepsUseCase) -> Self {
        Self {
            scope: ScreenScope::new("sleeps"),
            slots: Arc::new(Slots::new()),
            get_all,
            subscription: Mutex::new(None),
        }
    }

    pub fn sleeps(&self) -> Vec<Sleep> {
        self.slots.data()
    }

    pub fn status(&self) -> Option<String> {
        self.slots.status()
    }

    pub fn watch_sleeps(&self) -> watch::Receiver<Vec<Sleep>> {
        self.slots.watch_data()
    }

    pub fn watch_status(&self) -> watch::Receiver<Option<String>> {
        self.slots.watch_status()
    }

    /// Start following the sleep list, replacing any earlier subscription.
    /// Needs a tokio runtime.
    pub fn refresh(&self) {
        let mut current = lock(&self.subscription);
        if let Some(handle) = current.take() {
            handle.abort();
        }
        *current = follow(&self.scope, &self.slots, self.get_all.execute(), LOAD_FAILED);
    }

    pub fn cancel(&self) {
        self.slots.close();
        self.scope.cancel();
    }
}

impl Drop for SleepStateHolder {
    fn drop(&mut self) {
        self.cancel();
    }
}
