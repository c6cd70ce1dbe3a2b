//! Leveled logging macros that skip field construction for suppressed
//! levels.
//!
//! A plain `logger.info(msg, &[...])` call builds its fields before the gate
//! runs. The macros check `Logger::enabled` first and only then evaluate the
//! field expressions.
//!
//! # Usage
//!
//! ```
//! use al_core::{Field, Level, NoopLogger, al_debug, al_info};
//!
//! let logger = NoopLogger::noop(Level::Info);
//! al_info!(logger, "engine started");
//! al_debug!(logger, "frame decoded"; Field::int("rows", 42), Field::bool("last", false));
//! ```

// ---------------------------------------------------------------------------
// Core macro: gate, then build fields and dispatch.
// ---------------------------------------------------------------------------

/// Internal helper.  Use `al_debug!` … `al_panic!` instead.
#[doc(hidden)]
#[macro_export]
macro_rules! al_log {
    ($logger:expr, $level:expr, $msg:expr $(; $($field:expr),* $(,)?)?) => {{
        let logger = &$logger;
        let level: $crate::Level = $level;
        if $crate::Logger::enabled(logger, level) {
            $crate::Logger::log(logger, level, $msg, &[$($($field),*)?]);
        }
    }};
}

// ---------------------------------------------------------------------------
// Public per-level macros
// ---------------------------------------------------------------------------

/// Log at DEBUG level.
#[macro_export]
macro_rules! al_debug {
    ($logger:expr, $($rest:tt)*) => {
        $crate::al_log!($logger, $crate::Level::Debug, $($rest)*)
    };
}

/// Log at INFO level.
#[macro_export]
macro_rules! al_info {
    ($logger:expr, $($rest:tt)*) => {
        $crate::al_log!($logger, $crate::Level::Info, $($rest)*)
    };
}

/// Log at WARN level.
#[macro_export]
macro_rules! al_warn {
    ($logger:expr, $($rest:tt)*) => {
        $crate::al_log!($logger, $crate::Level::Warn, $($rest)*)
    };
}

/// Log at ERROR level.
///
/// ```
/// use al_core::{Field, Level, NoopLogger, al_error};
///
/// let logger = NoopLogger::noop(Level::Warn);
/// let err = std::io::Error::other("connection reset");
/// al_error!(logger, "tile fetch failed"; Field::string("tile", "14/8529/5974"), Field::error(&err));
/// ```
#[macro_export]
macro_rules! al_error {
    ($logger:expr, $($rest:tt)*) => {
        $crate::al_log!($logger, $crate::Level::Error, $($rest)*)
    };
}

/// Log at FATAL level. Does not exit the process.
#[macro_export]
macro_rules! al_fatal {
    ($logger:expr, $($rest:tt)*) => {
        $crate::al_log!($logger, $crate::Level::Fatal, $($rest)*)
    };
}

/// Log at PANIC level. Does not unwind.
#[macro_export]
macro_rules! al_panic {
    ($logger:expr, $($rest:tt)*) => {
        $crate::al_log!($logger, $crate::Level::Panic, $($rest)*)
    };
}
