//! `tracing` engine behind the `al_core` facade.
//!
//! [`TracingBackend`] turns accepted records into `tracing` events on an
//! injected [`Dispatch`](tracing::Dispatch); [`init_tracing`] installs the
//! subscriber stack described by a [`LoggingConfig`](al_config::LoggingConfig)
//! and forwards `log` records into it through [`LogBridge`].

pub mod backend;
pub mod bridge;
pub mod error;
pub mod init;

pub use backend::{
    TARGET, TracingBackend, TracingLogger, render_fields, tracing_level, tracing_logger,
};
pub use bridge::{LOG_TARGET, LogBridge};
pub use error::{InitError, InitReason, InitResult};
pub use init::{SeverityFormat, init_tracing};
