//! Headless renderer. Follows a screen's data and status slots and logs every
//! change, so the binary is usable without a UI.

use crate::domain::{Exercise, Sleep, User};
use crate::presentation::ScreenScope;
use tokio::sync::watch;
use tokio::task::AbortHandle;
use tracing::{debug, info, warn};

pub struct LogSink {
    scope: ScreenScope,
}

impl LogSink {
    pub fn new() -> Self {
        Self {
            scope: ScreenScope::new("log-sink"),
        }
    }

    /// Log the current and every later value of `data` and `status` for `screen`.
    /// Stops when both slots' holders are gone or on [`LogSink::shutdown`].
    pub fn render<T>(
        &self,
        screen: &'static str,
        mut data: watch::Receiver<T>,
        mut status: watch::Receiver<Option<String>>,
        describe: fn(&T) -> String,
    ) -> Option<AbortHandle>
    where
        T: Send + Sync + 'static,
    {
        data.mark_changed();
        status.mark_changed();
        self.scope.spawn(async move {
            let mut data_open = true;
            let mut status_open = true;
            while data_open || status_open {
                tokio::select! {
                    changed = data.changed(), if data_open => {
                        if changed.is_err() {
                            data_open = false;
                            continue;
                        }
                        let line = describe(&data.borrow_and_update());
                        info!(screen, "{line}");
                    }
                    changed = status.changed(), if status_open => {
                        if changed.is_err() {
                            status_open = false;
                            continue;
                        }
                        let message = status.borrow_and_update().clone();
                        match message {
                            Some(message) => warn!(screen, status = %message),
                            None => debug!(screen, "status cleared"),
                        }
                    }
                }
            }
            debug!(screen, "screen closed");
        })
    }

    pub fn shutdown(&self) {
        self.scope.cancel();
    }
}

impl Default for LogSink {
    fn default() -> Self {
        Self::new()
    }
}

pub fn describe_exercises(exercises: &Vec<Exercise>) -> String {
    match exercises.as_slice() {
        [] => "no exercises".to_string(),
        list => {
            let minutes: i64 = list.iter().map(|e| i64::from(e.duration)).sum();
            let latest = list.iter().map(|e| e.start_time).max();
            match latest {
                Some(at) => format!("{} exercises, {minutes} min total, latest {at}", list.len()),
                None => format!("{} exercises", list.len()),
            }
        }
    }
}

pub fn describe_sleeps(sleeps: &Vec<Sleep>) -> String {
    if sleeps.is_empty() {
        return "no sleep sessions".to_string();
    }
    let minutes: i64 = sleeps.iter().map(|s| i64::from(s.duration)).sum();
    let avg_quality = sleeps.iter().map(|s| f64::from(s.quality)).sum::<f64>() / sleeps.len() as f64;
    format!(
        "{} sleep sessions, {minutes} min total, average quality {avg_quality:.1}",
        sleeps.len()
    )
}

pub fn describe_user(user: &Option<User>) -> String {
    match user {
        Some(u) => format!("{} <{}> (id {})", u.name, u.email, u.id),
        None => "no profile".to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::ExerciseCategory;
    use chrono::NaiveDate;
    use std::time::Duration;

    fn at(hour: u32) -> chrono::NaiveDateTime {
        NaiveDate::from_ymd_opt(2024, 1, 1)
            .unwrap()
            .and_hms_opt(hour, 0, 0)
            .unwrap()
    }

    #[test]
    fn exercise_summary() {
        assert_eq!(describe_exercises(&vec![]), "no exercises");
        let list = vec![
            Exercise {
                id: Some(1),
                start_time: at(8),
                duration: 30,
                category: ExerciseCategory::Running,
                intensity: 3,
            },
            Exercise {
                id: Some(2),
                start_time: at(18),
                duration: 45,
                category: ExerciseCategory::Tennis,
                intensity: 4,
            },
        ];
        assert_eq!(
            describe_exercises(&list),
            "2 exercises, 75 min total, latest 2024-01-01 18:00:00"
        );
    }

    #[test]
    fn sleep_summary() {
        assert_eq!(describe_sleeps(&vec![]), "no sleep sessions");
        let list = vec![
            Sleep {
                start_time: at(0),
                duration: 420,
                quality: 3,
            },
            Sleep {
                start_time: at(1),
                duration: 480,
                quality: 4,
            },
        ];
        assert_eq!(
            describe_sleeps(&list),
            "2 sleep sessions, 900 min total, average quality 3.5"
        );
    }

    #[test]
    fn user_summary() {
        assert_eq!(describe_user(&None), "no profile");
        let ada = User {
            id: 42,
            name: "Ada".into(),
            email: "ada@example.com".into(),
        };
        assert_eq!(describe_user(&Some(ada)), "Ada <ada@example.com> (id 42)");
    }

    #[tokio::test]
    async fn render_task_ends_with_the_screen() {
        let sink = LogSink::new();
        let (data_tx, data_rx) = watch::channel(None::<User>);
        let (status_tx, status_rx) = watch::channel(None::<String>);
        let task = sink.render("user", data_rx, status_rx, describe_user).unwrap();

        status_tx.send_replace(Some("Failed to load user: boom".into()));
        drop(data_tx);
        drop(status_tx);

        tokio::time::timeout(Duration::from_secs(2), async {
            while !task.is_finished() {
                tokio::time::sleep(Duration::from_millis(10)).await;
            }
        })
        .await
        .expect("render task did not finish");
    }

    #[tokio::test]
    async fn shutdown_stops_rendering() {
        let sink = LogSink::new();
        let (_data_tx, data_rx) = watch::channel(Vec::<Sleep>::new());
        let (status_tx, status_rx) = watch::channel(None::<String>);
        sink.render("sleep", data_rx, status_rx, describe_sleeps);

        sink.shutdown();

        tokio::time::timeout(Duration::from_secs(2), status_tx.closed())
            .await
            .expect("receivers still alive after shutdown");
        let (_late_tx, late_rx) = watch::channel(Vec::new());
        let (_late_status_tx, late_status_rx) = watch::channel(None);
        assert!(
            sink.render("sleep", late_rx, late_status_rx, describe_sleeps)
                .is_none()
        );
    }
}
