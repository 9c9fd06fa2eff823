//! Domain entities. Pure data structures for the core business.
//!
//! No storage types here; records are mapped in `ports::records`.

use chrono::NaiveDateTime;
use std::fmt;
use std::str::FromStr;

use super::DomainError;

/// A logged exercise session. `start_time` is a UTC wall-clock time.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Exercise {
    /// `None` until storage assigns one on first insert.
    pub id: Option<i64>,
    pub start_time: NaiveDateTime,
    /// Minutes.
    pub duration: i32,
    pub category: ExerciseCategory,
    /// 1 (light) to 5 (maximal).
    pub intensity: i32,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ExerciseCategory {
    Football,
    Running,
    Riding,
    Cycling,
    Swimming,
    Walking,
    Tennis,
}

impl ExerciseCategory {
    pub const ALL: [ExerciseCategory; 7] = [
        Self::Football,
        Self::Running,
        Self::Riding,
        Self::Cycling,
        Self::Swimming,
        Self::Walking,
        Self::Tennis,
    ];

    /// Tag persisted in the `category` column.
    pub fn name(self) -> &'static str {
        match self {
            Self::Football => "Football",
            Self::Running => "Running",
            Self::Riding => "Riding",
            Self::Cycling => "Cycling",
            Self::Swimming => "Swimming",
            Self::Walking => "Walking",
            Self::Tennis => "Tennis",
        }
    }
}

impl fmt::Display for ExerciseCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Exact, case-sensitive match on the persisted tag.
impl FromStr for ExerciseCategory {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|c| c.name() == s)
            .ok_or_else(|| DomainError::Conversion(format!("unknown exercise category '{s}'")))
    }
}

/// A sleep session. `start_time` is local wall-clock time, whole seconds.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Sleep {
    pub start_time: NaiveDateTime,
    /// Minutes.
    pub duration: i32,
    /// 1 (poor) to 5 (excellent).
    pub quality: i32,
}

/// The profile as seen above the repository layer. Never carries a password.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct User {
    /// 0 = unset.
    pub id: i64,
    pub name: String,
    pub email: String,
}
