//! Sleep repository. Read-only.

use super::live_envelope;
use crate::domain::Sleep;
use crate::ports::{LiveResults, SleepRepository, SleepStore};
use std::sync::Arc;

const FETCH_FAILED: &str = "Failed to fetch sleeps from database";

pub struct SleepRepo {
    store: Arc<dyn SleepStore>,
}

impl SleepRepo {
    pub fn new(store: Arc<dyn SleepStore>) -> Self {
        Self { store }
    }
}

impl SleepRepository for SleepRepo {
    fn all_sleeps(&self) -> LiveResults<Vec<Sleep>> {
        live_envelope(self.store.live_query_all(), FETCH_FAILED, |records| {
            records
                .into_iter()
                .map(Sleep::try_from)
                .collect::<Result<Vec<_>, _>>()
        })
    }
}
