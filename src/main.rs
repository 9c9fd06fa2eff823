//! Wiring & DI. Entry point: open storage, build repositories, use cases and
//! screen state holders, render them to the log until Ctrl-C.
//! No business logic here.

use dotenv::dotenv;
use std::path::PathBuf;
use std::sync::Arc;
use tracing::{info, warn};
use wellness_tracker::adapters::persistence::{MemoryStore, SqliteStore};
use wellness_tracker::adapters::presentation::{
    LogSink, describe_exercises, describe_sleeps, describe_user,
};
use wellness_tracker::ports::{
    ExerciseRepository, ExerciseStore, SleepRepository, SleepStore, UserRepository, UserStore,
};
use wellness_tracker::presentation::{ExerciseStateHolder, SleepStateHolder, UserStateHolder};
use wellness_tracker::repository::{ExerciseRepo, SleepRepo, UserRepo};
use wellness_tracker::shared::config::{AppConfig, StorageBackend};
use wellness_tracker::shared::logging;
use wellness_tracker::usecases::{
    AddNewExerciseUseCase, DeleteExerciseUseCase, GetAllExercisesUseCase, GetAllSleepsUseCase,
    GetUserUseCase, InsertUserUseCase,
};

type Stores = (Arc<dyn ExerciseStore>, Arc<dyn SleepStore>, Arc<dyn UserStore>);

/// One backend serves all three store ports.
fn split<S>(store: Arc<S>) -> Stores
where
    S: ExerciseStore + SleepStore + UserStore + 'static,
{
    let exercises: Arc<dyn ExerciseStore> = Arc::<S>::clone(&store);
    let sleeps: Arc<dyn SleepStore> = Arc::<S>::clone(&store);
    let users: Arc<dyn UserStore> = store;
    (exercises, sleeps, users)
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cwd = std::env::current_dir().unwrap_or_else(|_| PathBuf::from("."));
    let env_loaded = dotenv();
    let cfg = match AppConfig::load() {
        Ok(cfg) => cfg,
        Err(e) => {
            eprintln!("config error, using defaults: {e}");
            AppConfig::default()
        }
    };
    logging::init(cfg.log_level_or_default());

    match &env_loaded {
        Ok(path) => info!(path = %path.display(), "loaded .env"),
        Err(_) => info!(cwd = %cwd.display(), "no .env found (check CWD)"),
    }

    let capacity = cfg.change_bus_capacity_or_default();
    let (exercise_store, sleep_store, user_store): Stores = match cfg.storage_or_default() {
        StorageBackend::Sqlite => {
            let data_dir = cfg.data_dir_or_default();
            let store = SqliteStore::connect(&data_dir, capacity)
                .await
                .map_err(|e| anyhow::anyhow!("SQLite connect failed: {}", e))?;
            info!(path = %store.path().display(), "database ready");
            split(Arc::new(store))
        }
        StorageBackend::Memory => {
            warn!("in-memory storage: nothing is kept after exit");
            split(Arc::new(MemoryStore::new(capacity)))
        }
    };

    // --- Repositories ---
    let exercise_repo: Arc<dyn ExerciseRepository> = Arc::new(ExerciseRepo::new(exercise_store));
    let sleep_repo: Arc<dyn SleepRepository> = Arc::new(SleepRepo::new(sleep_store));
    let user_repo: Arc<dyn UserRepository> = Arc::new(UserRepo::new(user_store));

    // --- Profile seeding (optional) ---
    if let Some((user, password)) = cfg.seed_user() {
        let id = InsertUserUseCase::new(Arc::clone(&user_repo))
            .execute(&user, &password)
            .await
            .map_err(|e| anyhow::anyhow!("Seeding profile failed: {}", e))?;
        info!(id, name = %user.name, "profile seeded");
    }

    // --- Screens ---
    let exercises = ExerciseStateHolder::new(
        GetAllExercisesUseCase::new(Arc::clone(&exercise_repo)),
        AddNewExerciseUseCase::new(Arc::clone(&exercise_repo)),
        DeleteExerciseUseCase::new(exercise_repo),
    );
    let sleeps = SleepStateHolder::new(GetAllSleepsUseCase::new(sleep_repo));
    sleeps.refresh();
    let user = UserStateHolder::new(GetUserUseCase::new(user_repo), cfg.user_id_or_default());

    let sink = LogSink::new();
    sink.render(
        "exercises",
        exercises.watch_exercises(),
        exercises.watch_status(),
        describe_exercises,
    );
    sink.render("sleep", sleeps.watch_sleeps(), sleeps.watch_status(), describe_sleeps);
    sink.render("user", user.watch_user(), user.watch_status(), describe_user);

    info!("watching wellness data; press Ctrl-C to exit");
    tokio::signal::ctrl_c().await?;

    exercises.cancel();
    sleeps.cancel();
    user.cancel();
    sink.shutdown();
    info!("shut down");
    Ok(())
}
