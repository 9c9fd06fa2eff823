//! Core domain layer. No I/O dependencies.
//!
//! Entities, the result envelope and the error taxonomy live here. Dependencies flow inward.

pub mod entities;
pub mod errors;
pub mod result;

pub use entities::{Exercise, ExerciseCategory, Sleep, User};
pub use errors::{DomainError, StreamFault};
pub use result::{DataResult, ErrorInfo};
