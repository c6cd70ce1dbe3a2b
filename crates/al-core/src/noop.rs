//! Backend that discards every record.

use crate::field::Field;
use crate::level::Level;
use crate::logger::{Backend, GatedLogger};

/// Silent backend for tests and benchmarks.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopBackend;

impl Backend for NoopBackend {
    #[inline]
    fn emit(&self, _level: Level, _msg: &str, _fields: &[Field<'_>]) {}
}

pub type NoopLogger = GatedLogger<NoopBackend>;

impl NoopLogger {
    /// Silent logger that still runs the level gate at `threshold`.
    pub fn noop(threshold: Level) -> Self {
        GatedLogger::new(NoopBackend, threshold)
    }
}
