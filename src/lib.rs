//! wellness-tracker: exercises, sleep and profile kept in sync between a local
//! database and screen state through live queries. Hexagonal layout.

pub mod adapters;
pub mod domain;
pub mod ports;
pub mod presentation;
pub mod repository;
pub mod shared;
pub mod usecases;
