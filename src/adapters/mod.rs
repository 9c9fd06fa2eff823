//! Infrastructure adapters. Implement outbound ports and render screen state.
//!
//! Storage engines map their errors to DomainError.

pub mod persistence;
pub mod presentation;
