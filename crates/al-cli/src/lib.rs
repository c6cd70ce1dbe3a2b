//! Wiring between a [`LoggingConfig`] and the facade, shared by the
//! `al-demo` binary and its tests.

use std::io;
use std::sync::Arc;
use std::time::Instant;

use al_config::{BackendKind, LoggingConfig};
use al_core::{Field, GatedLogger, Level, LevelLogger, Logger};
use al_log::LogBackend;
use al_tracing::TracingBackend;

/// Facade logger for the configured engine and threshold.
///
/// Both engines write into the subscriber installed by
/// [`init_tracing`](al_tracing::init_tracing): `tracing` directly, `log`
/// through its bridge.
pub fn build_logger(config: &LoggingConfig) -> Arc<dyn Logger> {
    match config.backend {
        BackendKind::Tracing => Arc::new(GatedLogger::new(TracingBackend::current(), config.level)),
        BackendKind::Log => Arc::new(GatedLogger::new(LogBackend::global(), config.level)),
    }
}

/// One record per level, every field kind, then one line through the print
/// shim.
pub fn emit_demo(logger: &dyn Logger) {
    let started = Instant::now();
    let err = io::Error::other("upstream refused connection");

    logger.debug(
        "resolving upstream",
        &[Field::string("host", "tiles.example"), Field::int("port", 443u16)],
    );
    logger.info(
        "request served",
        &[
            Field::string("path", "/tiles/14/8529/5974"),
            Field::int("status", 200),
            Field::bool("cached", true),
        ],
    );
    logger.warn(
        "slow upstream",
        &[
            Field::any("elapsed", &started.elapsed()),
            Field::byte_string("meta", br#"{"region":"eu"}"#),
        ],
    );
    logger.error("fetch failed", &[Field::error(&err)]);
    logger.fatal("cache volume unavailable", &[Field::named_error("cause", &err)]);
    logger.panic(
        "invariant violated",
        &[Field::string("invariant", "tile index monotonic")],
    );
    LevelLogger::new(logger, Level::Info).printf(format_args!("{} records emitted", 6));
}
