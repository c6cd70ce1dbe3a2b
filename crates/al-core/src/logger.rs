use std::fmt;
use std::sync::Arc;

use crate::field::Field;
use crate::level::{Level, LevelCheck};

/// A concrete logging engine seen through the facade.
///
/// `emit` is only reached for records that passed the level gate. An
/// implementation translates every field, in slice order, into the engine's
/// own record-building call for that field's kind, then emits the message
/// once. Kinds without a dedicated engine capability go through the opaque
/// [`Display`](fmt::Display) rendering of [`FieldValue`](crate::FieldValue);
/// no field is dropped.
pub trait Backend: Send + Sync {
    fn emit(&self, level: Level, msg: &str, fields: &[Field<'_>]);
}

impl<B: Backend + ?Sized> Backend for Arc<B> {
    fn emit(&self, level: Level, msg: &str, fields: &[Field<'_>]) {
        (**self).emit(level, msg, fields)
    }
}

impl<B: Backend + ?Sized> Backend for Box<B> {
    fn emit(&self, level: Level, msg: &str, fields: &[Field<'_>]) {
        (**self).emit(level, msg, fields)
    }
}

/// Leveled structured logging interface used by application components.
///
/// Components receive an `Arc<dyn Logger>` at construction; there is no
/// process-wide default logger.
///
/// ```
/// use std::sync::Arc;
/// use al_core::{Field, Level, Logger, NoopLogger};
///
/// let logger: Arc<dyn Logger> = Arc::new(NoopLogger::noop(Level::Info));
/// logger.info("tile cached", &[Field::int("zoom", 14), Field::bool("hit", true)]);
/// ```
pub trait Logger: Send + Sync {
    /// Whether a record at `level` would reach the backend.
    fn enabled(&self, level: Level) -> bool;

    fn log(&self, level: Level, msg: &str, fields: &[Field<'_>]);

    fn debug(&self, msg: &str, fields: &[Field<'_>]) {
        self.log(Level::Debug, msg, fields);
    }

    fn info(&self, msg: &str, fields: &[Field<'_>]) {
        self.log(Level::Info, msg, fields);
    }

    fn warn(&self, msg: &str, fields: &[Field<'_>]) {
        self.log(Level::Warn, msg, fields);
    }

    fn error(&self, msg: &str, fields: &[Field<'_>]) {
        self.log(Level::Error, msg, fields);
    }

    /// Logs at [`Level::Fatal`]. The process is not terminated.
    fn fatal(&self, msg: &str, fields: &[Field<'_>]) {
        self.log(Level::Fatal, msg, fields);
    }

    /// Logs at [`Level::Panic`]. The caller's thread does not unwind.
    fn panic(&self, msg: &str, fields: &[Field<'_>]) {
        self.log(Level::Panic, msg, fields);
    }

    /// Print-style view bound to `level`.
    fn level_logger(&self, level: Level) -> LevelLogger<'_>
    where
        Self: Sized,
    {
        LevelLogger::new(self, level)
    }
}

impl<L: Logger + ?Sized> Logger for &L {
    fn enabled(&self, level: Level) -> bool {
        (**self).enabled(level)
    }

    fn log(&self, level: Level, msg: &str, fields: &[Field<'_>]) {
        (**self).log(level, msg, fields)
    }
}

impl<L: Logger + ?Sized> Logger for Arc<L> {
    fn enabled(&self, level: Level) -> bool {
        (**self).enabled(level)
    }

    fn log(&self, level: Level, msg: &str, fields: &[Field<'_>]) {
        (**self).log(level, msg, fields)
    }
}

impl<L: Logger + ?Sized> Logger for Box<L> {
    fn enabled(&self, level: Level) -> bool {
        (**self).enabled(level)
    }

    fn log(&self, level: Level, msg: &str, fields: &[Field<'_>]) {
        (**self).log(level, msg, fields)
    }
}

// ---------------------------------------------------------------------------
// GatedLogger: level check in front of a backend
// ---------------------------------------------------------------------------

/// The facade: a [`LevelCheck`] in front of a [`Backend`].
///
/// The gate is consulted before anything else, so a suppressed call never
/// reads its fields and never reaches the backend.
#[derive(Debug, Clone)]
pub struct GatedLogger<B> {
    backend: B,
    level_check: LevelCheck,
}

impl<B: Backend> GatedLogger<B> {
    pub fn new(backend: B, threshold: Level) -> Self {
        Self {
            backend,
            level_check: LevelCheck::new(threshold),
        }
    }

    pub fn backend(&self) -> &B {
        &self.backend
    }

    pub fn level_check(&self) -> LevelCheck {
        self.level_check
    }
}

impl<B: Backend> Logger for GatedLogger<B> {
    #[inline]
    fn enabled(&self, level: Level) -> bool {
        self.level_check.check(level)
    }

    fn log(&self, level: Level, msg: &str, fields: &[Field<'_>]) {
        if !self.level_check.check(level) {
            return;
        }
        self.backend.emit(level, msg, fields);
    }
}

// ---------------------------------------------------------------------------
// LevelLogger: print-style shim
// ---------------------------------------------------------------------------

/// A logger pinned to one level, for code written against
/// `println`/`printf`-shaped logging.
///
/// Each level routes to the same level on the backend and goes through the
/// logger's gate.
#[derive(Clone, Copy)]
pub struct LevelLogger<'l> {
    logger: &'l dyn Logger,
    level: Level,
}

impl<'l> LevelLogger<'l> {
    pub fn new(logger: &'l dyn Logger, level: Level) -> Self {
        Self { logger, level }
    }

    pub fn level(&self) -> Level {
        self.level
    }

    /// Emits an empty message with one unnamed interface field per value.
    pub fn println(&self, values: &[&dyn fmt::Debug]) {
        if !self.logger.enabled(self.level) {
            return;
        }
        let fields: Vec<Field<'_>> = values.iter().map(|v| Field::any("", *v)).collect();
        self.logger.log(self.level, "", &fields);
    }

    /// Emits the formatted message without fields.
    pub fn printf(&self, args: fmt::Arguments<'_>) {
        if !self.logger.enabled(self.level) {
            return;
        }
        match args.as_str() {
            Some(msg) => self.logger.log(self.level, msg, &[]),
            None => self.logger.log(self.level, &args.to_string(), &[]),
        }
    }
}

impl fmt::Debug for LevelLogger<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LevelLogger")
            .field("level", &self.level)
            .finish_non_exhaustive()
    }
}
