use std::fmt::{self, Write as _};

use al_core::{Backend, Field, FieldValue, GatedLogger, Level};
use tracing::Dispatch;

/// Target of every event emitted through the facade.
pub const TARGET: &str = "al";

/// Facade logger backed by `tracing`.
pub type TracingLogger = GatedLogger<TracingBackend>;

/// Build a [`TracingLogger`] that emits into `dispatch`.
pub fn tracing_logger(dispatch: Dispatch, threshold: Level) -> TracingLogger {
    GatedLogger::new(TracingBackend::new(dispatch), threshold)
}

/// Adapter from facade records to `tracing` events.
///
/// `tracing` needs field names at compile time, so the facade fields of a
/// record are rendered into one logfmt-style `fields` value. Every event also
/// carries `severity`, the facade level name, because `tracing` has no
/// levels above ERROR.
#[derive(Debug, Clone)]
pub struct TracingBackend {
    dispatch: Dispatch,
}

impl TracingBackend {
    pub fn new(dispatch: Dispatch) -> Self {
        Self { dispatch }
    }

    /// Snapshot of the dispatcher in effect for the calling thread.
    pub fn current() -> Self {
        Self::new(tracing::dispatcher::get_default(Dispatch::clone))
    }

    pub fn dispatch(&self) -> &Dispatch {
        &self.dispatch
    }
}

impl Default for TracingBackend {
    fn default() -> Self {
        Self::current()
    }
}

/// Emit one event at a runtime `tracing` level. Callsites need a constant
/// level, so each level gets its own.
macro_rules! emit_at {
    ($target:expr, $level:expr, $($rest:tt)+) => {
        match $level {
            tracing::Level::TRACE => tracing::event!(target: $target, tracing::Level::TRACE, $($rest)+),
            tracing::Level::DEBUG => tracing::event!(target: $target, tracing::Level::DEBUG, $($rest)+),
            tracing::Level::INFO => tracing::event!(target: $target, tracing::Level::INFO, $($rest)+),
            tracing::Level::WARN => tracing::event!(target: $target, tracing::Level::WARN, $($rest)+),
            tracing::Level::ERROR => tracing::event!(target: $target, tracing::Level::ERROR, $($rest)+),
        }
    };
}

pub(crate) use emit_at;

impl Backend for TracingBackend {
    fn emit(&self, level: Level, msg: &str, fields: &[Field<'_>]) {
        let severity = level.as_str();
        // Rendered only if a subscriber records the event.
        let fields = (!fields.is_empty()).then(|| tracing::field::display(Rendered(fields)));
        tracing::dispatcher::with_default(&self.dispatch, || {
            emit_at!(TARGET, tracing_level(level), severity, fields, "{}", msg)
        });
    }
}

/// `tracing` level a facade level is emitted at.
pub fn tracing_level(level: Level) -> tracing::Level {
    match level {
        Level::Debug => tracing::Level::DEBUG,
        Level::Info => tracing::Level::INFO,
        Level::Warn => tracing::Level::WARN,
        Level::Error | Level::Fatal | Level::Panic => tracing::Level::ERROR,
    }
}

/// Render fields as space-separated `key=value` pairs, in order.
///
/// Strings and error messages are quoted and escaped, byte strings are
/// embedded verbatim.
pub fn render_fields(fields: &[Field<'_>]) -> String {
    Rendered(fields).to_string()
}

/// Lazy logfmt view over a field slice.
struct Rendered<'a, 'f>(&'a [Field<'f>]);

impl fmt::Display for Rendered<'_, '_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, field) in self.0.iter().enumerate() {
            if i > 0 {
                f.write_char(' ')?;
            }
            write_field(f, field)?;
        }
        Ok(())
    }
}

fn write_field(out: &mut fmt::Formatter<'_>, field: &Field<'_>) -> fmt::Result {
    let key = field.key();
    match field.value() {
        FieldValue::String(s) => write!(out, "{key}={s:?}"),
        FieldValue::Int(i) => write!(out, "{key}={i}"),
        FieldValue::Bool(b) => write!(out, "{key}={b}"),
        FieldValue::ByteString(raw) => {
            write!(out, "{key}={}", String::from_utf8_lossy(raw))
        }
        FieldValue::Any(value) => write!(out, "{key}={value:?}"),
        FieldValue::Error(err) | FieldValue::NamedError(err) => {
            write!(out, "{key}={:?}", err.to_string())
        }
        other => write!(out, "{key}={other}"),
    }
}
