//! Store -> repository -> use case -> state holder, over the in-memory store.

use chrono::NaiveDate;
use futures::StreamExt;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::watch;
use wellness_tracker::adapters::persistence::MemoryStore;
use wellness_tracker::domain::{DataResult, Exercise, ExerciseCategory, User};
use wellness_tracker::ports::{
    ExerciseRepository, SleepRecord, SleepRepository, UserRepository,
};
use wellness_tracker::presentation::{ExerciseStateHolder, SleepStateHolder, UserStateHolder};
use wellness_tracker::repository::{ExerciseRepo, SleepRepo, UserRepo};
use wellness_tracker::usecases::{
    AddNewExerciseUseCase, DeleteExerciseUseCase, GetAllExercisesUseCase, GetAllSleepsUseCase,
    GetUserUseCase, InsertUserUseCase,
};

fn morning_run() -> Exercise {
    Exercise {
        id: None,
        start_time: NaiveDate::from_ymd_opt(2024, 1, 1)
            .unwrap()
            .and_hms_opt(8, 0, 0)
            .unwrap(),
        duration: 30,
        category: ExerciseCategory::Running,
        intensity: 3,
    }
}

async fn settle<T>(rx: &mut watch::Receiver<T>, ready: impl FnMut(&T) -> bool) {
    tokio::time::timeout(Duration::from_secs(2), rx.wait_for(ready))
        .await
        .expect("slot never reached the expected state")
        .expect("slot sender dropped");
}

/// The next emission clears a command's status line, so success may show as
/// either the message or nothing. A failure message stays.
async fn assert_no_failure(status: &watch::Receiver<Option<String>>) {
    tokio::time::sleep(Duration::from_millis(30)).await;
    let line = status.borrow().clone();
    assert!(
        !line.as_deref().is_some_and(|m| m.starts_with("Failed")),
        "unexpected status: {line:?}"
    );
}

fn exercise_screen(repo: &Arc<dyn ExerciseRepository>) -> ExerciseStateHolder {
    ExerciseStateHolder::new(
        GetAllExercisesUseCase::new(Arc::clone(repo)),
        AddNewExerciseUseCase::new(Arc::clone(repo)),
        DeleteExerciseUseCase::new(Arc::clone(repo)),
    )
}

#[tokio::test]
async fn added_exercise_shows_up_in_the_live_list() {
    let store = Arc::new(MemoryStore::default());
    let repo = ExerciseRepo::new(store);
    let mut live = repo.all_exercises();
    assert_eq!(
        live.next().await.unwrap().unwrap(),
        DataResult::Success(vec![])
    );

    assert_eq!(repo.add_exercise(&morning_run()).await, DataResult::Success(1));

    let expected = Exercise {
        id: Some(1),
        ..morning_run()
    };
    assert_eq!(
        live.next().await.unwrap().unwrap(),
        DataResult::Success(vec![expected])
    );
}

#[tokio::test]
async fn unknown_user_is_an_empty_success() {
    let store = Arc::new(MemoryStore::default());
    let repo = UserRepo::new(store);
    let first = repo.user(42).next().await.unwrap().unwrap();
    assert_eq!(first, DataResult::Success(None));
}

#[tokio::test]
async fn exercise_screen_follows_add_and_delete() {
    let store = Arc::new(MemoryStore::default());
    let repo: Arc<dyn ExerciseRepository> = Arc::new(ExerciseRepo::new(store));
    let screen = exercise_screen(&repo);
    let mut list = screen.watch_exercises();
    let status = screen.watch_status();

    screen.submit_add(morning_run());
    settle(&mut list, |l| l.len() == 1).await;
    assert_no_failure(&status).await;

    let saved = screen.exercises().remove(0);
    assert_eq!(saved.id, Some(1));

    screen.submit_delete(saved);
    settle(&mut list, Vec::is_empty).await;
    assert_no_failure(&status).await;
}

#[tokio::test]
async fn deleting_a_missing_row_still_succeeds() {
    let store = Arc::new(MemoryStore::default());
    let repo: Arc<dyn ExerciseRepository> = Arc::new(ExerciseRepo::new(store));
    let missing = Exercise {
        id: Some(99),
        ..morning_run()
    };
    assert_eq!(repo.delete_exercise(&missing).await, DataResult::Success(()));
}

#[tokio::test]
async fn delete_without_id_is_reported_on_the_status_line() {
    let store = Arc::new(MemoryStore::default());
    let repo: Arc<dyn ExerciseRepository> = Arc::new(ExerciseRepo::new(store));
    let screen = exercise_screen(&repo);
    let mut status = screen.watch_status();

    screen.submit_delete(morning_run());
    settle(&mut status, |s| {
        s.as_deref()
            .is_some_and(|m| m.starts_with("Failed to delete exercise: "))
    })
    .await;
    assert!(screen.exercises().is_empty());
}

#[tokio::test]
async fn sleep_screen_loads_on_refresh() {
    let store = Arc::new(MemoryStore::default());
    store
        .insert_sleep_record(SleepRecord {
            start_time: 1_704_070_800_000,
            duration: 450,
            quality: 4,
        })
        .await;
    let repo: Arc<dyn SleepRepository> = Arc::new(SleepRepo::new(store));
    let screen = SleepStateHolder::new(GetAllSleepsUseCase::new(repo));
    assert!(screen.sleeps().is_empty());

    screen.refresh();
    let mut list = screen.watch_sleeps();
    settle(&mut list, |l| l.len() == 1).await;
    assert_eq!(screen.sleeps()[0].quality, 4);
}

#[tokio::test]
async fn user_screen_sees_the_inserted_profile() {
    let store = Arc::new(MemoryStore::default());
    let repo: Arc<dyn UserRepository> = Arc::new(UserRepo::new(store));
    let screen = UserStateHolder::new(GetUserUseCase::new(Arc::clone(&repo)), 1);
    let mut profile = screen.watch_user();

    let ada = User {
        id: 0,
        name: "Ada".into(),
        email: "ada@example.com".into(),
    };
    let id = InsertUserUseCase::new(repo)
        .execute(&ada, "secret")
        .await
        .unwrap();
    assert_eq!(id, 1);

    settle(&mut profile, Option::is_some).await;
    assert_eq!(
        screen.user(),
        Some(User {
            id: 1,
            ..ada
        })
    );
}

#[tokio::test]
async fn cancelled_screen_ignores_later_changes() {
    let store = Arc::new(MemoryStore::default());
    let repo: Arc<dyn ExerciseRepository> = Arc::new(ExerciseRepo::new(store));
    let screen = exercise_screen(&repo);
    tokio::time::sleep(Duration::from_millis(30)).await;

    screen.cancel();
    assert_eq!(repo.add_exercise(&morning_run()).await, DataResult::Success(1));
    tokio::time::sleep(Duration::from_millis(30)).await;

    assert!(screen.exercises().is_empty());
    assert_eq!(screen.status(), None);
}
