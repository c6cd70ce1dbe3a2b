use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::str::FromStr;

use al_core::Level;
use serde::Deserialize;

/// Logging configuration. All fields have defaults so the entire `[logging]`
/// section may be omitted.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Minimum severity the facade emits (e.g. `"info"`, `"warn"`).
    pub level: Level,
    /// Engine the facade is wired to.
    pub backend: BackendKind,
    /// Per-target level overrides, e.g. `{ "hyper" = "warn" }`.
    pub modules: HashMap<String, String>,
    /// Optional file path for log output. Relative paths are resolved against
    /// the config file's parent directory.
    pub file: Option<PathBuf>,
    /// Output format: `plain` (human-readable) or `json` (structured).
    pub format: LogFormat,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: Level::Info,
            backend: BackendKind::Tracing,
            modules: HashMap::new(),
            file: None,
            format: LogFormat::Plain,
        }
    }
}

/// Logging engine behind the facade.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BackendKind {
    #[default]
    Tracing,
    Log,
}

/// Log output format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    Plain,
    Json,
}

/// Top level of a config file; only the `[logging]` section is read.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct ConfigFile {
    logging: LoggingConfig,
}

impl LoggingConfig {
    /// Read and parse a TOML config file.
    pub fn load(path: impl AsRef<Path>) -> anyhow::Result<Self> {
        let content = std::fs::read_to_string(path.as_ref())
            .map_err(|e| anyhow::anyhow!("failed to read {}: {e}", path.as_ref().display()))?;
        content
            .parse::<Self>()
            .map_err(|e| anyhow::anyhow!("invalid config {}: {e}", path.as_ref().display()))
    }

    /// Log file path with relative paths resolved against `base_dir`.
    pub fn resolved_file(&self, base_dir: &Path) -> Option<PathBuf> {
        self.file.as_ref().map(|file| {
            if file.is_relative() {
                base_dir.join(file)
            } else {
                file.clone()
            }
        })
    }
}

impl FromStr for LoggingConfig {
    type Err = anyhow::Error;

    /// Parse the `[logging]` section of a TOML document.
    fn from_str(toml_str: &str) -> anyhow::Result<Self> {
        let file: ConfigFile = toml::from_str(toml_str)?;
        Ok(file.logging)
    }
}
