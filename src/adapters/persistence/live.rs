//! Change notifications and the live-query stream built on them.
//!
//! Writers publish the table they touched after the change is visible. Each
//! live query re-runs its full read on every notification for its table.

use crate::domain::{DomainError, StreamFault};
use crate::ports::LiveQuery;
use futures::{StreamExt, stream};
use std::future::Future;
use tokio::sync::broadcast::{self, error::RecvError};
use tracing::{debug, warn};

/// Default number of unread notifications a subscriber may fall behind.
pub const DEFAULT_BUS_CAPACITY: usize = 64;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Table {
    Exercise,
    Sleep,
    User,
}

/// Broadcast of "table X changed". Dropping it ends every live query with a
/// [`StreamFault::Closed`].
pub struct ChangeBus {
    tx: broadcast::Sender<Table>,
}

impl ChangeBus {
    pub fn new(capacity: usize) -> Self {
        let (tx, _) = broadcast::channel(capacity.max(1));
        Self { tx }
    }

    pub fn publish(&self, table: Table) {
        // Err only means nobody is listening.
        if self.tx.send(table).is_err() {
            debug!(?table, "change published without subscribers");
        }
    }

    /// Emit `query()` now, then again after every change to `table`.
    ///
    /// The subscription is taken before the first read so no change between
    /// the two is missed. A lagging subscriber re-reads instead of failing,
    /// since every emission is a full result set anyway.
    pub fn live<T, Q, Fut>(&self, table: Table, query: Q) -> LiveQuery<T>
    where
        T: Send + 'static,
        Q: Fn() -> Fut + Send + 'static,
        Fut: Future<Output = Result<T, DomainError>> + Send + 'static,
    {
        let rx = self.tx.subscribe();
        stream::unfold(Some((rx, query, true)), move |state| async move {
            let Some((mut rx, query, first)) = state else {
                return None;
            };
            if !first {
                loop {
                    match rx.recv().await {
                        Ok(changed) if changed == table => break,
                        Ok(_) => continue,
                        Err(RecvError::Lagged(skipped)) => {
                            warn!(?table, skipped, "live query fell behind, re-reading");
                            break;
                        }
                        Err(RecvError::Closed) => {
                            let fault = StreamFault::Closed(format!(
                                "{table:?} change notifications stopped"
                            ));
                            return Some((Err(DomainError::Stream(fault)), None));
                        }
                    }
                }
            }
            let item = query().await;
            Some((item, Some((rx, query, false))))
        })
        .boxed()
    }
}

impl Default for ChangeBus {
    fn default() -> Self {
        Self::new(DEFAULT_BUS_CAPACITY)
    }
}
