//! SQLite-backed store via libsql. Implements the exercise, sleep and user store ports.
//!
//! One database file (wellness.db) in the data directory. Rows are keyed by an
//! INTEGER PRIMARY KEY; an incoming id of 0 lets SQLite assign one. Live
//! queries re-run their SELECT whenever a write to their table is published.

use super::live::{ChangeBus, Table};
use crate::domain::DomainError;
use crate::ports::{
    ExerciseRecord, ExerciseStore, LiveQuery, SleepRecord, SleepStore, UserRecord, UserStore,
};
use libsql::{Connection, Database, params};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tracing::{debug, info};

const EXERCISE_TABLE: &str = r#"
CREATE TABLE IF NOT EXISTS exercise (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    start_time INTEGER NOT NULL,
    duration INTEGER NOT NULL,
    category TEXT NOT NULL,
    intensity INTEGER NOT NULL
)"#;

const SLEEP_TABLE: &str = r#"
CREATE TABLE IF NOT EXISTS sleep (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    start_time INTEGER NOT NULL,
    duration INTEGER NOT NULL,
    quality INTEGER NOT NULL
)"#;

const USER_TABLE: &str = r#"
CREATE TABLE IF NOT EXISTS "user" (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    name TEXT NOT NULL,
    email TEXT NOT NULL,
    password TEXT
)"#;

fn repo_err(context: &'static str) -> impl Fn(libsql::Error) -> DomainError {
    move |e| DomainError::storage(context, e)
}

/// SQLite store. Safe to share via Arc; each operation opens its own connection.
pub struct SqliteStore {
    db: Arc<Database>,
    db_path: PathBuf,
    bus: ChangeBus,
}

impl SqliteStore {
    /// Connect to (or create) the database and ensure the schema exists.
    ///
    /// Sets WAL mode and synchronous=NORMAL so live-query reads do not block writers.
    pub async fn connect(
        base_dir: impl AsRef<Path>,
        bus_capacity: usize,
    ) -> Result<Self, DomainError> {
        let base = base_dir.as_ref();
        std::fs::create_dir_all(base)
            .map_err(|e| DomainError::storage("create data directory", e))?;
        let db_path = base.join("wellness.db");
        let path_str = db_path.to_string_lossy();
        let db = libsql::Builder::new_local(path_str.as_ref())
            .build()
            .await
            .map_err(repo_err("open database"))?;
        let conn = db.connect().map_err(repo_err("connect"))?;

        // PRAGMA returns a row; query and drain it (execute fails when rows are returned).
        for pragma in ["PRAGMA journal_mode=WAL", "PRAGMA synchronous=NORMAL"] {
            let mut rows = conn.query(pragma, ()).await.map_err(repo_err("pragma"))?;
            while rows.next().await.map_err(repo_err("pragma"))?.is_some() {}
        }

        for ddl in [EXERCISE_TABLE, SLEEP_TABLE, USER_TABLE] {
            conn.execute(ddl, ()).await.map_err(repo_err("create schema"))?;
        }

        info!(path = %db_path.display(), "SQLite connected with WAL mode");

        Ok(Self {
            db: Arc::new(db),
            db_path,
            bus: ChangeBus::new(bus_capacity),
        })
    }

    pub fn path(&self) -> &Path {
        &self.db_path
    }

    /// Seed a sleep session. Not part of the store ports: sleeps are read-only
    /// for the rest of the system.
    pub async fn insert_sleep_record(&self, record: SleepRecord) -> Result<i64, DomainError> {
        let conn = self.conn()?;
        let mut rows = conn
            .query(
                "INSERT INTO sleep (start_time, duration, quality) VALUES (?1, ?2, ?3) RETURNING id",
                params![record.start_time, record.duration, record.quality],
            )
            .await
            .map_err(repo_err("insert sleep"))?;
        let id = returned_id(&mut rows, "insert sleep").await?;
        self.bus.publish(Table::Sleep);
        Ok(id)
    }

    fn conn(&self) -> Result<Connection, DomainError> {
        self.db.connect().map_err(repo_err("connect"))
    }
}

async fn returned_id(rows: &mut libsql::Rows, context: &'static str) -> Result<i64, DomainError> {
    let row = rows
        .next()
        .await
        .map_err(repo_err(context))?
        .ok_or_else(|| DomainError::storage_msg(format!("{context}: no id returned")))?;
    row.get::<i64>(0).map_err(repo_err(context))
}

async fn read_exercises(db: &Database) -> Result<Vec<ExerciseRecord>, DomainError> {
    let conn = db.connect().map_err(repo_err("connect"))?;
    let mut rows = conn
        .query(
            "SELECT id, start_time, duration, category, intensity FROM exercise ORDER BY id",
            (),
        )
        .await
        .map_err(repo_err("read exercises"))?;
    let mut records = Vec::new();
    while let Some(row) = rows.next().await.map_err(repo_err("read exercises"))? {
        records.push(ExerciseRecord {
            id: row.get(0).map_err(repo_err("read exercises"))?,
            start_time: row.get(1).map_err(repo_err("read exercises"))?,
            duration: row.get(2).map_err(repo_err("read exercises"))?,
            category: row.get(3).map_err(repo_err("read exercises"))?,
            intensity: row.get(4).map_err(repo_err("read exercises"))?,
        });
    }
    Ok(records)
}

async fn read_sleeps(db: &Database) -> Result<Vec<SleepRecord>, DomainError> {
    let conn = db.connect().map_err(repo_err("connect"))?;
    let mut rows = conn
        .query("SELECT start_time, duration, quality FROM sleep ORDER BY id", ())
        .await
        .map_err(repo_err("read sleeps"))?;
    let mut records = Vec::new();
    while let Some(row) = rows.next().await.map_err(repo_err("read sleeps"))? {
        records.push(SleepRecord {
            start_time: row.get(0).map_err(repo_err("read sleeps"))?,
            duration: row.get(1).map_err(repo_err("read sleeps"))?,
            quality: row.get(2).map_err(repo_err("read sleeps"))?,
        });
    }
    Ok(records)
}

async fn read_user(db: &Database, id: i64) -> Result<Option<UserRecord>, DomainError> {
    let conn = db.connect().map_err(repo_err("connect"))?;
    let mut rows = conn
        .query(
            r#"SELECT id, name, email, password FROM "user" WHERE id = ?1"#,
            params![id],
        )
        .await
        .map_err(repo_err("read user"))?;
    match rows.next().await.map_err(repo_err("read user"))? {
        Some(row) => Ok(Some(UserRecord {
            id: row.get(0).map_err(repo_err("read user"))?,
            name: row.get(1).map_err(repo_err("read user"))?,
            email: row.get(2).map_err(repo_err("read user"))?,
            password: row
                .get::<Option<String>>(3)
                .map_err(repo_err("read user"))?,
        })),
        None => Ok(None),
    }
}

#[async_trait::async_trait]
impl ExerciseStore for SqliteStore {
    async fn insert_or_update(&self, record: ExerciseRecord) -> Result<i64, DomainError> {
        let conn = self.conn()?;
        let mut rows = conn
            .query(
                r#"
                INSERT INTO exercise (id, start_time, duration, category, intensity)
                VALUES (NULLIF(?1, 0), ?2, ?3, ?4, ?5)
                ON CONFLICT (id) DO UPDATE SET
                    start_time = excluded.start_time,
                    duration = excluded.duration,
                    category = excluded.category,
                    intensity = excluded.intensity
                RETURNING id
                "#,
                params![
                    record.id,
                    record.start_time,
                    record.duration,
                    record.category.as_str(),
                    record.intensity
                ],
            )
            .await
            .map_err(repo_err("upsert exercise"))?;
        let id = returned_id(&mut rows, "upsert exercise").await?;
        self.bus.publish(Table::Exercise);
        Ok(id)
    }

    fn live_query_all(&self) -> LiveQuery<Vec<ExerciseRecord>> {
        let db = Arc::clone(&self.db);
        self.bus.live(Table::Exercise, move || {
            let db = Arc::clone(&db);
            async move { read_exercises(&db).await }
        })
    }

    async fn delete_by_id(&self, id: i64) -> Result<(), DomainError> {
        let changed = self
            .conn()?
            .execute("DELETE FROM exercise WHERE id = ?1", params![id])
            .await
            .map_err(repo_err("delete exercise"))?;
        if changed > 0 {
            self.bus.publish(Table::Exercise);
        } else {
            debug!(id, "delete of missing exercise");
        }
        Ok(())
    }
}

impl SleepStore for SqliteStore {
    fn live_query_all(&self) -> LiveQuery<Vec<SleepRecord>> {
        let db = Arc::clone(&self.db);
        self.bus.live(Table::Sleep, move || {
            let db = Arc::clone(&db);
            async move { read_sleeps(&db).await }
        })
    }
}

#[async_trait::async_trait]
impl UserStore for SqliteStore {
    async fn insert_or_update(&self, record: UserRecord) -> Result<i64, DomainError> {
        let conn = self.conn()?;
        let mut rows = conn
            .query(
                r#"
                INSERT INTO "user" (id, name, email, password)
                VALUES (NULLIF(?1, 0), ?2, ?3, ?4)
                ON CONFLICT (id) DO UPDATE SET
                    name = excluded.name,
                    email = excluded.email,
                    password = excluded.password
                RETURNING id
                "#,
                params![
                    record.id,
                    record.name.as_str(),
                    record.email.as_str(),
                    record.password
                ],
            )
            .await
            .map_err(repo_err("upsert user"))?;
        let id = returned_id(&mut rows, "upsert user").await?;
        self.bus.publish(Table::User);
        Ok(id)
    }

    fn live_query_by_id(&self, id: i64) -> LiveQuery<Option<UserRecord>> {
        let db = Arc::clone(&self.db);
        self.bus.live(Table::User, move || {
            let db = Arc::clone(&db);
            async move { read_user(&db, id).await }
        })
    }

    async fn delete_by_id(&self, id: i64) -> Result<(), DomainError> {
        let changed = self
            .conn()?
            .execute(r#"DELETE FROM "user" WHERE id = ?1"#, params![id])
            .await
            .map_err(repo_err("delete user"))?;
        if changed > 0 {
            self.bus.publish(Table::User);
        }
        Ok(())
    }
}
