//! `log` engine behind the `al_core` facade.

pub mod backend;

pub use backend::{LogBackend, LogLogger, TARGET, log_level, log_logger};
