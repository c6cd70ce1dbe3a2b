pub mod logging;

pub use logging::{BackendKind, LogFormat, LoggingConfig};
