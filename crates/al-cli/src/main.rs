use std::path::{Path, PathBuf};

use al_cli::{build_logger, emit_demo};
use al_config::LoggingConfig;
use al_core::Level;
use al_tracing::init_tracing;
use anyhow::Result;
use clap::{Parser, Subcommand};

#[derive(Parser)]
#[command(name = "al-demo", about = "Structured logging facade demo")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Emit one record per level through the configured backend
    Run {
        /// Path to a TOML file with a [logging] section
        #[arg(short, long)]
        config: Option<PathBuf>,
        /// Minimum level, overriding the config file
        #[arg(short, long)]
        level: Option<Level>,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Run { config, level } => {
            let (mut logging, base_dir) = match config {
                Some(path) => {
                    let path = path
                        .canonicalize()
                        .map_err(|e| anyhow::anyhow!("config path '{}': {e}", path.display()))?;
                    let logging = LoggingConfig::load(&path)?;
                    let base_dir = path.parent().map(Path::to_path_buf).unwrap_or_default();
                    (logging, base_dir)
                }
                None => (LoggingConfig::default(), std::env::current_dir()?),
            };
            if let Some(level) = level {
                logging.level = level;
            }

            let _guard = init_tracing(&logging, &base_dir).map_err(|e| anyhow::anyhow!("{e}"))?;

            let logger = build_logger(&logging);
            emit_demo(logger.as_ref());
        }
    }

    Ok(())
}
