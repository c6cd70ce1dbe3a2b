//! `log` records forwarded into `tracing`, key/value pairs included.
//!
//! Facade records sent through the `log` engine carry their fields as
//! `log::kv` pairs. [`LogBridge`] renders those pairs into the same `fields`
//! value the tracing adapter produces, so both engines end up in one
//! subscriber with identical field output.

use std::fmt::{self, Write as _};

use log::kv::{self, Key, Source, Value, VisitSource};
use log::{Log, Metadata, Record};
use tracing::level_filters::LevelFilter;

use crate::backend::emit_at;

/// Target of every event forwarded from `log`. The record's own target is
/// kept in the `origin` field.
pub const LOG_TARGET: &str = "log";

/// `log::Log` that re-emits records as `tracing` events on the current
/// dispatcher.
#[derive(Debug, Default, Clone, Copy)]
pub struct LogBridge;

impl Log for LogBridge {
    fn enabled(&self, _metadata: &Metadata<'_>) -> bool {
        // The subscriber's filter decides.
        true
    }

    fn log(&self, record: &Record<'_>) {
        let pairs = record.key_values();
        let fields = (pairs.count() > 0).then(|| tracing::field::display(Pairs(pairs)));
        let severity = severity_name(record.level());
        let origin = record.target();
        emit_at!(
            LOG_TARGET,
            tracing_level(record.level()),
            severity,
            origin,
            fields,
            "{}",
            record.args()
        );
    }

    fn flush(&self) {}
}

fn severity_name(level: log::Level) -> &'static str {
    match level {
        log::Level::Error => "error",
        log::Level::Warn => "warn",
        log::Level::Info => "info",
        log::Level::Debug => "debug",
        log::Level::Trace => "trace",
    }
}

fn tracing_level(level: log::Level) -> tracing::Level {
    match level {
        log::Level::Error => tracing::Level::ERROR,
        log::Level::Warn => tracing::Level::WARN,
        log::Level::Info => tracing::Level::INFO,
        log::Level::Debug => tracing::Level::DEBUG,
        log::Level::Trace => tracing::Level::TRACE,
    }
}

/// `log` max level matching what the installed subscriber can accept.
pub(crate) fn log_filter(filter: LevelFilter) -> log::LevelFilter {
    match filter.into_level() {
        None => log::LevelFilter::Off,
        Some(tracing::Level::ERROR) => log::LevelFilter::Error,
        Some(tracing::Level::WARN) => log::LevelFilter::Warn,
        Some(tracing::Level::INFO) => log::LevelFilter::Info,
        Some(tracing::Level::DEBUG) => log::LevelFilter::Debug,
        Some(tracing::Level::TRACE) => log::LevelFilter::Trace,
    }
}

// ---------------------------------------------------------------------------
// Pairs: logfmt rendering of a kv source
// ---------------------------------------------------------------------------

/// Renders pairs like the tracing adapter renders facade fields: strings and
/// errors quoted, everything else bare.
struct Pairs<'a>(&'a dyn Source);

impl fmt::Display for Pairs<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut writer = PairWriter { out: f, first: true };
        self.0.visit(&mut writer).map_err(|_| fmt::Error)
    }
}

struct PairWriter<'a, 'b> {
    out: &'a mut fmt::Formatter<'b>,
    first: bool,
}

impl<'kvs> VisitSource<'kvs> for PairWriter<'_, '_> {
    fn visit_pair(&mut self, key: Key<'kvs>, value: Value<'kvs>) -> Result<(), kv::Error> {
        if !self.first {
            self.out.write_char(' ')?;
        }
        self.first = false;
        if let Some(s) = value.to_borrowed_str() {
            write!(self.out, "{key}={s:?}")?;
        } else if let Some(err) = value.to_borrowed_error() {
            write!(self.out, "{key}={:?}", err.to_string())?;
        } else {
            write!(self.out, "{key}={value}")?;
        }
        Ok(())
    }
}
