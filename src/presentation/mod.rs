//! Screen state holders. Subscribe to use-case streams, reduce envelopes into
//! observable slots and run write commands.

pub mod exercise_state;
pub mod scope;
pub mod sleep_state;
pub mod slots;
pub mod user_state;

pub use exercise_state::ExerciseStateHolder;
pub use scope::ScreenScope;
pub use sleep_state::SleepStateHolder;
pub use slots::Slots;
pub use user_state::UserStateHolder;

use crate::domain::DataResult;
use crate::ports::LiveResults;
use futures::StreamExt;
use std::sync::Arc;
use tokio::task::AbortHandle;
use tracing::{debug, warn};

/// Prefix of every status message caused by a broken subscription, as opposed
/// to an `Error` emission.
pub const STREAM_FAULT_PREFIX: &str = "Unexpected error in data flow";

/// Start (or restart) the read subscription of a screen.
///
/// `load_failed` prefixes messages built from `Error` emissions.
fn follow<T>(
    scope: &ScreenScope,
    slots: &Arc<Slots<T>>,
    mut stream: LiveResults<T>,
    load_failed: &'static str,
) -> Option<AbortHandle>
where
    T: Clone + Default + Send + Sync + 'static,
{
    let generation = slots.next_generation();
    let slots = Arc::clone(slots);
    let screen = scope.name();
    scope.spawn(async move {
        debug!(screen, generation, "subscribed");
        while let Some(item) = stream.next().await {
            match item {
                Ok(DataResult::Success(value)) => slots.show(generation, value),
                Ok(DataResult::Error(e)) => {
                    slots.fail(generation, format!("{load_failed}: {}", e.message()));
                }
                Err(fault) => {
                    warn!(screen, error = %fault, "live query subscription failed");
                    slots.fail(
                        generation,
                        format!("{STREAM_FAULT_PREFIX} ({screen}): {fault}"),
                    );
                }
            }
        }
        debug!(screen, generation, "live query ended");
    })
}

#[cfg(test)]
pub(crate) mod test_support {
    use std::time::Duration;
    use tokio::sync::watch;

    /// Wait until the slot satisfies `ready`, failing the test after two seconds.
    pub async fn settle<T>(rx: &mut watch::Receiver<T>, ready: impl FnMut(&T) -> bool) {
        tokio::time::timeout(Duration::from_secs(2), rx.wait_for(ready))
            .await
            .expect("slot never reached the expected state")
            .expect("slot sender dropped");
    }

    /// Give spawned tasks a chance to run.
    pub async fn idle() {
        tokio::time::sleep(Duration::from_millis(30)).await;
    }
}
