//! Structured logging facade.
//!
//! Call sites log through [`Logger`] with a message and typed [`Field`]s; a
//! [`GatedLogger`] checks the configured [`Level`] first and hands accepted
//! records to a [`Backend`] adapter that translates each field into its
//! engine's own calls.

mod log_macros;

pub mod field;
pub mod level;
pub mod logger;
pub mod noop;

pub use field::{ERROR_KEY, Field, FieldInt, FieldKind, FieldValue};
pub use level::{Level, LevelCheck, ParseLevelError};
pub use logger::{Backend, GatedLogger, LevelLogger, Logger};
pub use noop::{NoopBackend, NoopLogger};
