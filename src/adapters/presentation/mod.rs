//! Renderers of screen state. Headless: state changes go to the log.

pub mod log_sink;

pub use log_sink::{LogSink, describe_exercises, describe_sleeps, describe_user};
