//! Port traits. API boundaries for the hexagon.
//!
//! - Storage: called by repositories into persistence adapters
//! - Repositories: called by use cases into the data layer

pub mod records;
pub mod repositories;
pub mod storage;

pub use records::{ExerciseRecord, SleepRecord, UserRecord};
pub use repositories::{ExerciseRepository, LiveResults, SleepRepository, UserRepository};
pub use storage::{ExerciseStore, LiveQuery, SleepStore, UserStore};
