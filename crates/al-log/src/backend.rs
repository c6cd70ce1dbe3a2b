use std::fmt;
use std::sync::Arc;

use al_core::{Backend, Field, FieldValue, GatedLogger, Level};
use log::kv::{self, Key, Source, Value, VisitSource};
use log::Log;

/// Default target of records emitted through the facade.
pub const TARGET: &str = "al";

/// Facade logger backed by the `log` crate.
pub type LogLogger = GatedLogger<LogBackend>;

/// Build a [`LogLogger`] writing to `sink`.
pub fn log_logger(sink: Arc<dyn Log>, threshold: Level) -> LogLogger {
    GatedLogger::new(LogBackend::new(sink), threshold)
}

#[derive(Clone)]
enum Sink {
    /// Whatever `log::set_logger` installed.
    Global,
    Shared(Arc<dyn Log>),
}

/// Adapter from facade records to `log::Record`s.
///
/// Fields become the record's key/value pairs, in order. Strings, integers,
/// booleans, arbitrary values and errors map onto the matching `log::kv`
/// value constructors; raw byte strings have no `log` counterpart and are
/// passed as their lossy text.
#[derive(Clone)]
pub struct LogBackend {
    sink: Sink,
    target: &'static str,
}

impl LogBackend {
    pub fn new(sink: Arc<dyn Log>) -> Self {
        Self {
            sink: Sink::Shared(sink),
            target: TARGET,
        }
    }

    /// Backend over the process-wide `log` logger.
    pub fn global() -> Self {
        Self {
            sink: Sink::Global,
            target: TARGET,
        }
    }

    pub fn with_target(mut self, target: &'static str) -> Self {
        self.target = target;
        self
    }

    pub fn target(&self) -> &'static str {
        self.target
    }

    fn sink(&self) -> &dyn Log {
        match &self.sink {
            Sink::Global => log::logger(),
            Sink::Shared(sink) => sink.as_ref(),
        }
    }
}

impl fmt::Debug for LogBackend {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let sink = match self.sink {
            Sink::Global => "global",
            Sink::Shared(_) => "shared",
        };
        f.debug_struct("LogBackend")
            .field("sink", &sink)
            .field("target", &self.target)
            .finish()
    }
}

impl Backend for LogBackend {
    fn emit(&self, level: Level, msg: &str, fields: &[Field<'_>]) {
        let source = FieldSource(fields);
        self.sink().log(
            &log::Record::builder()
                .level(log_level(level))
                .target(self.target)
                .args(format_args!("{msg}"))
                .key_values(&source)
                .build(),
        );
    }
}

/// `log` level a facade level is emitted at.
pub fn log_level(level: Level) -> log::Level {
    match level {
        Level::Debug => log::Level::Debug,
        Level::Info => log::Level::Info,
        Level::Warn => log::Level::Warn,
        Level::Error | Level::Fatal | Level::Panic => log::Level::Error,
    }
}

// ---------------------------------------------------------------------------
// FieldSource: facade fields as a `log::kv::Source`
// ---------------------------------------------------------------------------

struct FieldSource<'a, 'f>(&'a [Field<'f>]);

impl Source for FieldSource<'_, '_> {
    fn visit<'kvs>(&'kvs self, visitor: &mut dyn VisitSource<'kvs>) -> Result<(), kv::Error> {
        for field in self.0 {
            visitor.visit_pair(Key::from_str(field.key()), to_value(field))?;
        }
        Ok(())
    }

    fn count(&self) -> usize {
        self.0.len()
    }
}

fn to_value<'v>(field: &'v Field<'_>) -> Value<'v> {
    match field.value() {
        FieldValue::String(s) => Value::from(*s),
        FieldValue::Int(i) => Value::from(*i),
        FieldValue::Bool(b) => Value::from(*b),
        FieldValue::Any(value) => Value::from_debug(value),
        FieldValue::Error(err) | FieldValue::NamedError(err) => Value::from_dyn_error(*err),
        other => Value::from_display(other),
    }
}
