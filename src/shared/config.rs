//! Application configuration. Storage location, backend, profile, logging.

use crate::adapters::persistence::DEFAULT_BUS_CAPACITY;
use crate::domain::User;
use serde::Deserialize;
use std::path::PathBuf;

/// Profile shown on the user screen when `WELLNESS_USER_ID` is unset.
pub const DEFAULT_USER_ID: i64 = 1;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StorageBackend {
    #[default]
    Sqlite,
    Memory,
}

#[derive(Debug, Deserialize, Default)]
pub struct AppConfig {
    /// Directory holding wellness.db. Read from WELLNESS_DATA_DIR.
    #[serde(default)]
    pub data_dir: Option<String>,

    /// `sqlite` (default) or `memory`. Read from WELLNESS_STORAGE.
    #[serde(default)]
    pub storage: Option<StorageBackend>,

    /// Id of the profile the user screen follows. Read from WELLNESS_USER_ID.
    #[serde(default)]
    pub user_id: Option<i64>,

    /// Default tracing level when RUST_LOG is unset. Read from WELLNESS_LOG_LEVEL.
    #[serde(default)]
    pub log_level: Option<String>,

    /// How far a live query may fall behind before it re-reads. Read from WELLNESS_CHANGE_BUS_CAPACITY.
    #[serde(default)]
    pub change_bus_capacity: Option<usize>,

    // ─────────────────────────────────────────────────────────────────────────
    // First-run profile seeding (all three must be set)
    // ─────────────────────────────────────────────────────────────────────────
    #[serde(default)]
    pub seed_user_name: Option<String>,

    #[serde(default)]
    pub seed_user_email: Option<String>,

    #[serde(default)]
    pub seed_user_password: Option<String>,
}

impl AppConfig {
    /// Environment (WELLNESS_*) plus an optional file named by WELLNESS_CONFIG.
    pub fn load() -> Result<Self, config::ConfigError> {
        dotenv::dotenv().ok();
        let mut c = config::Config::builder();
        if let Ok(path) = std::env::var("WELLNESS_CONFIG") {
            c = c.add_source(config::File::with_name(&path));
        }
        c = c.add_source(config::Environment::with_prefix("WELLNESS").try_parsing(true));
        c.build()?.try_deserialize()
    }

    /// Returns the data directory. Defaults to ./data.
    pub fn data_dir_or_default(&self) -> PathBuf {
        PathBuf::from(self.data_dir.as_deref().unwrap_or("./data"))
    }

    pub fn storage_or_default(&self) -> StorageBackend {
        self.storage.unwrap_or_default()
    }

    pub fn user_id_or_default(&self) -> i64 {
        self.user_id.unwrap_or(DEFAULT_USER_ID)
    }

    pub fn log_level_or_default(&self) -> &str {
        self.log_level.as_deref().unwrap_or("info")
    }

    pub fn change_bus_capacity_or_default(&self) -> usize {
        self.change_bus_capacity.unwrap_or(DEFAULT_BUS_CAPACITY)
    }

    /// Profile and password to upsert at startup, if fully configured.
    /// The profile takes the configured user id so the user screen shows it.
    pub fn seed_user(&self) -> Option<(User, String)> {
        let name = self.seed_user_name.clone()?;
        let email = self.seed_user_email.clone()?;
        let password = self.seed_user_password.clone()?;
        Some((
            User {
                id: self.user_id_or_default(),
                name,
                email,
            },
            password,
        ))
    }
}
