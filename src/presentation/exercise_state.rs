//! State of the exercises screen: live list, status line, add/delete commands.

use super::{Slots, ScreenScope, follow};
use crate::domain::{DataResult, Exercise};
use crate::presentation::scope::lock;
use crate::usecases::{AddNewExerciseUseCase, DeleteExerciseUseCase, GetAllExercisesUseCase};
use std::sync::{Arc, Mutex};
use tokio::sync::{mpsc, watch};
use tokio::task::AbortHandle;
use tracing::{debug, info};

const LOAD_FAILED: &str = "Failed to load exercises";

enum Command {
    Add(Exercise),
    Delete(Exercise),
}

/// Holder for the exercises screen.
///
/// The list shown always comes from the live query. Write commands only set
/// the status line; their effect on the list arrives with the next emission.
pub struct ExerciseStateHolder {
    scope: ScreenScope,
    slots: Arc<Slots<Vec<Exercise>>>,
    get_all: GetAllExercisesUseCase,
    commands: mpsc::UnboundedSender<Command>,
    subscription: Mutex<Option<AbortHandle>>,
}

impl ExerciseStateHolder {
    /// Subscribes to the exercise list right away. Needs a tokio runtime.
    pub fn new(
        get_all: GetAllExercisesUseCase,
        add: AddNewExerciseUseCase,
        delete: DeleteExerciseUseCase,
    ) -> Self {
        let scope = ScreenScope::new("exercises");
        let slots = Arc::new(Slots::new());
        let (commands, rx) = mpsc::unbounded_channel();
        scope.spawn(run_commands(rx, add, delete, Arc::clone(&slots)));

        let holder = Self {
            scope,
            slots,
            get_all,
            commands,
            subscription: Mutex::new(None),
        };
        holder.refresh();
        holder
    }

    pub fn exercises(&self) -> Vec<Exercise> {
        self.slots.data()
    }

    pub fn status(&self) -> Option<String> {
        self.slots.status()
    }

    pub fn watch_exercises(&self) -> watch::Receiver<Vec<Exercise>> {
        self.slots.watch_data()
    }

    pub fn watch_status(&self) -> watch::Receiver<Option<String>> {
        self.slots.watch_status()
    }

    /// Queue an insert. Commands run one at a time, in submission order.
    pub fn submit_add(&self, exercise: Exercise) {
        self.submit(Command::Add(exercise));
    }

    /// Queue a delete.
    pub fn submit_delete(&self, exercise: Exercise) {
        self.submit(Command::Delete(exercise));
    }

    /// Drop the current subscription and start a fresh one.
    pub fn refresh(&self) {
        let mut current = lock(&self.subscription);
        if let Some(handle) = current.take() {
            handle.abort();
        }
        *current = follow(&self.scope, &self.slots, self.get_all.execute(), LOAD_FAILED);
    }

    /// End the screen: no slot changes after this returns.
    pub fn cancel(&self) {
        self.slots.close();
        self.scope.cancel();
    }

    fn submit(&self, command: Command) {
        if self.commands.send(command).is_err() {
            debug!("exercise screen closed, command dropped");
        }
    }
}

impl Drop for ExerciseStateHolder {
    fn drop(&mut self) {
        self.cancel();
    }
}

async fn run_commands(
    mut rx: mpsc::UnboundedReceiver<Command>,
    add: AddNewExerciseUseCase,
    delete: DeleteExerciseUseCase,
    slots: Arc<Slots<Vec<Exercise>>>,
) {
    while let Some(command) = rx.recv().await {
        let message = match command {
            Command::Add(exercise) => match add.execute(&exercise).await {
                DataResult::Success(id) => {
                    info!(id, "exercise added");
                    "Exercise added successfully!".to_string()
                }
                DataResult::Error(e) => format!("Failed to add exercise: {}", e.message()),
            },
            Command::Delete(exercise) => match delete.execute(&exercise).await {
                DataResult::Success(()) => {
                    info!(id = ?exercise.id, "exercise deleted");
                    "Exercise deleted successfully!".to_string()
                }
                DataResult::Error(e) => format!("Failed to delete exercise: {}", e.message()),
            },
        };
        slots.report(message);
    }
}
