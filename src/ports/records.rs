//! Storage-bound records and their mapping to domain entities.
//!
//! Records never leave the repository layer. Exercise times are stored as UTC
//! epoch seconds; sleep times as epoch milliseconds read back in the local
//! time zone. The two encodings differ on purpose and must stay that way.

use crate::domain::{DomainError, Exercise, Sleep, User};
use chrono::{DateTime, Local, TimeZone, Timelike};
use std::fmt;

/// Row of the `exercise` table. `id == 0` asks storage to assign one.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExerciseRecord {
    pub id: i64,
    pub start_time: i64,
    pub duration: i32,
    pub category: String,
    pub intensity: i32,
}

/// Row of the `sleep` table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SleepRecord {
    pub start_time: i64,
    pub duration: i32,
    pub quality: i32,
}

/// Row of the `user` table. The only place a password exists.
#[derive(Clone, PartialEq, Eq)]
pub struct UserRecord {
    pub id: i64,
    pub name: String,
    pub email: String,
    pub password: Option<String>,
}

fn check_rating(field: &str, value: i32) -> Result<(), DomainError> {
    if (1..=5).contains(&value) {
        Ok(())
    } else {
        Err(DomainError::Conversion(format!(
            "{field} must be between 1 and 5, got {value}"
        )))
    }
}

fn check_duration(value: i32) -> Result<(), DomainError> {
    if value > 0 {
        Ok(())
    } else {
        Err(DomainError::Conversion(format!(
            "duration must be a positive number of minutes, got {value}"
        )))
    }
}

impl ExerciseRecord {
    /// Storage keeps whole seconds: sub-second precision of `start_time` is
    /// floored away, so such values come back truncated.
    pub fn from_domain(exercise: &Exercise) -> Result<Self, DomainError> {
        check_duration(exercise.duration)?;
        check_rating("intensity", exercise.intensity)?;
        Ok(Self {
            id: exercise.id.unwrap_or(0),
            start_time: exercise.start_time.and_utc().timestamp(),
            duration: exercise.duration,
            category: exercise.category.name().to_string(),
            intensity: exercise.intensity,
        })
    }
}

impl TryFrom<ExerciseRecord> for Exercise {
    type Error = DomainError;

    fn try_from(record: ExerciseRecord) -> Result<Self, Self::Error> {
        let start = DateTime::from_timestamp(record.start_time, 0).ok_or_else(|| {
            DomainError::Conversion(format!(
                "exercise {} has an out-of-range start time {}",
                record.id, record.start_time
            ))
        })?;
        check_duration(record.duration)?;
        check_rating("intensity", record.intensity)?;
        Ok(Exercise {
            id: Some(record.id),
            start_time: start.naive_utc(),
            duration: record.duration,
            category: record.category.parse()?,
            intensity: record.intensity,
        })
    }
}

impl SleepRecord {
    /// Inverse of the read mapping: local wall-clock time to epoch millis.
    /// Wall-clock times skipped by a DST transition cannot be stored.
    pub fn from_domain(sleep: &Sleep) -> Result<Self, DomainError> {
        Self::from_domain_in(sleep, &Local)
    }

    /// [`SleepRecord::from_domain`] with `start_time` read as wall-clock time in `tz`.
    pub fn from_domain_in<Tz: TimeZone>(sleep: &Sleep, tz: &Tz) -> Result<Self, DomainError> {
        let start = tz
            .from_local_datetime(&sleep.start_time)
            .earliest()
            .ok_or_else(|| {
                DomainError::Conversion(format!(
                    "sleep start {} does not exist in the local time zone",
                    sleep.start_time
                ))
            })?;
        Ok(Self {
            start_time: start.timestamp_millis(),
            duration: sleep.duration,
            quality: sleep.quality,
        })
    }

    /// Read the row with its epoch millis shown as wall-clock time in `tz`,
    /// truncated to whole seconds.
    pub fn into_domain_in<Tz: TimeZone>(self, tz: &Tz) -> Result<Sleep, DomainError> {
        let start = tz
            .timestamp_millis_opt(self.start_time)
            .single()
            .ok_or_else(|| {
                DomainError::Conversion(format!(
                    "sleep start {} ms is out of range",
                    self.start_time
                ))
            })?;
        let start_time = start
            .naive_local()
            .with_nanosecond(0)
            .ok_or_else(|| DomainError::Conversion("cannot truncate sleep start".into()))?;
        check_duration(self.duration)?;
        check_rating("quality", self.quality)?;
        Ok(Sleep {
            start_time,
            duration: self.duration,
            quality: self.quality,
        })
    }
}

/// Sleeps are read in the local time zone of the host.
impl TryFrom<SleepRecord> for Sleep {
    type Error = DomainError;

    fn try_from(record: SleepRecord) -> Result<Self, Self::Error> {
        record.into_domain_in(&Local)
    }
}

impl UserRecord {
    /// Attach the secret to a domain user for persistence.
    pub fn with_password(user: &User, password: impl Into<String>) -> Self {
        Self {
            id: user.id,
            name: user.name.clone(),
            email: user.email.clone(),
            password: Some(password.into()),
        }
    }
}

/// Strips the password.
impl From<UserRecord> for User {
    fn from(record: UserRecord) -> Self {
        User {
            id: record.id,
            name: record.name,
            email: record.email,
        }
    }
}

impl fmt::Debug for UserRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("UserRecord")
            .field("id", &self.id)
            .field("name", &self.name)
            .field("email", &self.email)
            .field("password", &self.password.as_ref().map(|_| "<redacted>"))
            .finish()
    }
}
