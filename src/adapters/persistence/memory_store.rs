//! In-process store. Implements the three store ports over ordered maps.
//!
//! Same contract as the SQLite store: ids assigned from 1 upwards, live
//! queries in primary-key order, change published only when a row changed.

use super::live::{ChangeBus, Table};
use crate::domain::DomainError;
use crate::ports::{
    ExerciseRecord, ExerciseStore, LiveQuery, SleepRecord, SleepStore, UserRecord, UserStore,
};
use std::collections::BTreeMap;
use std::sync::Arc;
use tokio::sync::RwLock;
use tracing::debug;

/// Rows keyed by id, plus the highest id ever used. Like AUTOINCREMENT, ids
/// of deleted rows are never handed out again.
struct Rows<V> {
    rows: BTreeMap<i64, V>,
    last_id: i64,
}

impl<V> Default for Rows<V> {
    fn default() -> Self {
        Self {
            rows: BTreeMap::new(),
            last_id: 0,
        }
    }
}

impl<V> Rows<V> {
    /// `requested`, or the next never-used id when it is 0.
    fn assign(&self, requested: i64) -> i64 {
        if requested == 0 { self.last_id + 1 } else { requested }
    }

    fn put(&mut self, id: i64, row: V) {
        self.last_id = self.last_id.max(id);
        self.rows.insert(id, row);
    }
}

#[derive(Default)]
struct Tables {
    exercises: Rows<ExerciseRecord>,
    sleeps: Rows<SleepRecord>,
    users: Rows<UserRecord>,
}

pub struct MemoryStore {
    tables: Arc<RwLock<Tables>>,
    bus: ChangeBus,
}

impl MemoryStore {
    pub fn new(bus_capacity: usize) -> Self {
        Self {
            tables: Arc::new(RwLock::new(Tables::default())),
            bus: ChangeBus::new(bus_capacity),
        }
    }

    /// Seed a sleep session. Not part of the store ports: sleeps are read-only
    /// for the rest of the system.
    pub async fn insert_sleep_record(&self, record: SleepRecord) -> i64 {
        let id = {
            let mut tables = self.tables.write().await;
            let id = tables.sleeps.assign(0);
            tables.sleeps.put(id, record);
            id
        };
        self.bus.publish(Table::Sleep);
        id
    }
}

impl Default for MemoryStore {
    fn default() -> Self {
        Self::new(super::live::DEFAULT_BUS_CAPACITY)
    }
}

#[async_trait::async_trait]
impl ExerciseStore for MemoryStore {
    async fn insert_or_update(&self, mut record: ExerciseRecord) -> Result<i64, DomainError> {
        let id = {
            let mut tables = self.tables.write().await;
            let id = tables.exercises.assign(record.id);
            record.id = id;
            tables.exercises.put(id, record);
            id
        };
        self.bus.publish(Table::Exercise);
        Ok(id)
    }

    fn live_query_all(&self) -> LiveQuery<Vec<ExerciseRecord>> {
        let tables = Arc::clone(&self.tables);
        self.bus.live(Table::Exercise, move || {
            let tables = Arc::clone(&tables);
            async move { Ok(tables.read().await.exercises.rows.values().cloned().collect()) }
        })
    }

    async fn delete_by_id(&self, id: i64) -> Result<(), DomainError> {
        let removed = self.tables.write().await.exercises.rows.remove(&id).is_some();
        if removed {
            self.bus.publish(Table::Exercise);
        } else {
            debug!(id, "delete of missing exercise");
        }
        Ok(())
    }
}

impl SleepStore for MemoryStore {
    fn live_query_all(&self) -> LiveQuery<Vec<SleepRecord>> {
        let tables = Arc::clone(&self.tables);
        self.bus.live(Table::Sleep, move || {
            let tables = Arc::clone(&tables);
            async move { Ok(tables.read().await.sleeps.rows.values().cloned().collect()) }
        })
    }
}

#[async_trait::async_trait]
impl UserStore for MemoryStore {
    async fn insert_or_update(&self, mut record: UserRecord) -> Result<i64, DomainError> {
        let id = {
            let mut tables = self.tables.write().await;
            let id = tables.users.assign(record.id);
            record.id = id;
            tables.users.put(id, record);
            id
        };
        self.bus.publish(Table::User);
        Ok(id)
    }

    fn live_query_by_id(&self, id: i64) -> LiveQuery<Option<UserRecord>> {
        let tables = Arc::clone(&self.tables);
        self.bus.live(Table::User, move || {
            let tables = Arc::clone(&tables);
            async move { Ok(tables.read().await.users.rows.get(&id).cloned()) }
        })
    }

    async fn delete_by_id(&self, id: i64) -> Result<(), DomainError> {
        if self.tables.write().await.users.rows.remove(&id).is_some() {
            self.bus.publish(Table::User);
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use futures::StreamExt;

    fn row(category: &str) -> ExerciseRecord {
        ExerciseRecord {
            id: 0,
            start_time: 1_704_096_000,
            duration: 30,
            category: category.into(),
            intensity: 3,
        }
    }

    #[tokio::test]
    async fn ids_are_assigned_in_order_and_upsert_replaces() {
        let store = MemoryStore::default();
        assert_eq!(ExerciseStore::insert_or_update(&store, row("Running")).await.unwrap(), 1);
        assert_eq!(ExerciseStore::insert_or_update(&store, row("Walking")).await.unwrap(), 2);

        let mut update = row("Swimming");
        update.id = 1;
        assert_eq!(ExerciseStore::insert_or_update(&store, update).await.unwrap(), 1);

        let mut live = ExerciseStore::live_query_all(&store);
        let rows = live.next().await.unwrap().unwrap();
        let categories: Vec<_> = rows.iter().map(|r| r.category.as_str()).collect();
        assert_eq!(categories, vec!["Swimming", "Walking"]);
    }

    #[tokio::test]
    async fn ids_of_deleted_rows_are_not_reused() {
        let store = MemoryStore::default();
        let first = ExerciseStore::insert_or_update(&store, row("Running")).await.unwrap();
        let newest = ExerciseStore::insert_or_update(&store, row("Walking")).await.unwrap();
        assert_eq!((first, newest), (1, 2));

        ExerciseStore::delete_by_id(&store, newest).await.unwrap();
        let next = ExerciseStore::insert_or_update(&store, row("Tennis")).await.unwrap();

        assert_eq!(next, 3);
    }

    #[tokio::test]
    async fn every_change_re_emits_the_full_list() {
        let store = MemoryStore::default();
        let mut live = ExerciseStore::live_query_all(&store);
        assert!(live.next().await.unwrap().unwrap().is_empty());

        ExerciseStore::insert_or_update(&store, row("Running")).await.unwrap();
        assert_eq!(live.next().await.unwrap().unwrap().len(), 1);

        ExerciseStore::insert_or_update(&store, row("Tennis")).await.unwrap();
        assert_eq!(live.next().await.unwrap().unwrap().len(), 2);

        ExerciseStore::delete_by_id(&store, 1).await.unwrap();
        let rows = live.next().await.unwrap().unwrap();
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].id, 2);
    }

    #[tokio::test]
    async fn deleting_a_missing_row_is_fine() {
        let store = MemoryStore::default();
        assert!(ExerciseStore::delete_by_id(&store, 99).await.is_ok());
        assert!(UserStore::delete_by_id(&store, 99).await.is_ok());
    }

    #[tokio::test]
    async fn user_lookup_follows_inserts() {
        let store = MemoryStore::default();
        let mut live = store.live_query_by_id(1);
        assert_eq!(live.next().await.unwrap().unwrap(), None);

        let id = UserStore::insert_or_update(
            &store,
            UserRecord {
                id: 0,
                name: "Ada".into(),
                email: "ada@example.com".into(),
                password: Some("pw".into()),
            },
        )
        .await
        .unwrap();
        assert_eq!(id, 1);
        let found = live.next().await.unwrap().unwrap().unwrap();
        assert_eq!(found.name, "Ada");
    }

    #[tokio::test]
    async fn seeded_sleeps_are_visible() {
        let store = MemoryStore::default();
        store
            .insert_sleep_record(SleepRecord {
                start_time: 1_704_146_400_000,
                duration: 450,
                quality: 3,
            })
            .await;

        let rows = SleepStore::live_query_all(&store)
            .next()
            .await
            .unwrap()
            .unwrap();
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].duration, 450);
    }
}
