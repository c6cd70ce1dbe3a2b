use std::fmt::{self as stdfmt, Write as _};
use std::path::Path;

use al_config::{LogFormat, LoggingConfig};
use orion_error::prelude::*;
use tracing::field::{Field, Visit};
use tracing::level_filters::LevelFilter;
use tracing::{Event, Subscriber};
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::fmt::format::{Format, Writer};
use tracing_subscriber::fmt::time::{FormatTime, SystemTime};
use tracing_subscriber::fmt::{self, FmtContext, FormatEvent, FormatFields};
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::registry::LookupSpan;
use tracing_subscriber::{EnvFilter, Layer, Registry};

use crate::backend::{TARGET, tracing_level};
use crate::bridge::{LOG_TARGET, LogBridge, log_filter};
use crate::error::{InitReason, InitResult};

type BoxedLayer = Box<dyn Layer<Registry> + Send + Sync>;

/// Event formatter for facade records.
///
/// ```text
/// 2026-02-21T01:17:14.120Z FATAL disk gone mount="/data"
/// 2026-02-21T01:17:14.121Z  INFO al: request served status=200
/// ```
///
/// Events emitted by the facade, directly or through the `log` bridge, are
/// labelled with their `severity` name, so FATAL and PANIC stay apart from
/// ERROR. The rendered `fields` follow the message; bridged records put
/// their `log` target first. Every other event uses the stock format.
pub struct SeverityFormat {
    timer: SystemTime,
    fallback: Format,
}

impl SeverityFormat {
    pub fn new() -> Self {
        Self {
            timer: SystemTime,
            fallback: Format::default(),
        }
    }
}

impl Default for SeverityFormat {
    fn default() -> Self {
        Self::new()
    }
}

impl<S, N> FormatEvent<S, N> for SeverityFormat
where
    S: Subscriber + for<'a> LookupSpan<'a>,
    N: for<'writer> FormatFields<'writer> + 'static,
{
    fn format_event(
        &self,
        ctx: &FmtContext<'_, S, N>,
        mut writer: Writer<'_>,
        event: &Event<'_>,
    ) -> stdfmt::Result {
        let metadata = event.metadata();
        if metadata.target() != TARGET && metadata.target() != LOG_TARGET {
            return self.fallback.format_event(ctx, writer, event);
        }

        let mut record = FacadeRecord::default();
        event.record(&mut record);

        if self.timer.format_time(&mut writer).is_err() {
            writer.write_str("<unknown time>")?;
        }

        let label = record
            .severity
            .as_deref()
            .unwrap_or(metadata.level().as_str())
            .to_ascii_uppercase();
        if writer.has_ansi_escapes() {
            write!(writer, " \x1b[{}m{label:>5}\x1b[0m ", label_color(&label))?;
        } else {
            write!(writer, " {label:>5} ")?;
        }

        if let Some(origin) = &record.origin {
            write!(writer, "{origin}: ")?;
        }
        writer.write_str(&record.message)?;
        if let Some(fields) = &record.fields {
            write!(writer, " {fields}")?;
        }
        writeln!(writer)
    }
}

fn label_color(label: &str) -> &'static str {
    match label {
        "PANIC" | "FATAL" => "1;31",
        "ERROR" => "31",
        "WARN" => "33",
        "INFO" => "32",
        "DEBUG" => "34",
        _ => "35",
    }
}

/// The parts of a facade event: severity name, optional `log` target,
/// message and pre-rendered fields.
#[derive(Default)]
struct FacadeRecord {
    severity: Option<String>,
    origin: Option<String>,
    message: String,
    fields: Option<String>,
}

impl Visit for FacadeRecord {
    fn record_str(&mut self, field: &Field, value: &str) {
        match field.name() {
            "severity" => self.severity = Some(value.to_string()),
            "origin" => self.origin = Some(value.to_string()),
            _ => self.record_debug(field, &value),
        }
    }

    fn record_debug(&mut self, field: &Field, value: &dyn stdfmt::Debug) {
        match field.name() {
            "message" => {
                write!(&mut self.message, "{value:?}").ok();
            }
            "fields" => self.fields = Some(format!("{value:?}")),
            _ => {}
        }
    }
}

/// Filter directives for `config`: the facade threshold mapped onto
/// `tracing` levels, then the per-module overrides.
fn filter_directives(config: &LoggingConfig) -> String {
    let mut directives = tracing_level(config.level).as_str().to_ascii_lowercase();
    let mut modules: Vec<_> = config.modules.iter().collect();
    modules.sort();
    for (module, level) in modules {
        directives.push(',');
        directives.push_str(module);
        directives.push('=');
        directives.push_str(level);
    }
    directives
}

fn output_layer<W>(format: LogFormat, writer: W, ansi: bool) -> BoxedLayer
where
    W: for<'writer> fmt::MakeWriter<'writer> + Send + Sync + 'static,
{
    match format {
        LogFormat::Json => fmt::layer()
            .json()
            .with_ansi(false)
            .with_writer(writer)
            .boxed(),
        LogFormat::Plain => fmt::layer()
            .event_format(SeverityFormat::new())
            .with_ansi(ansi)
            .with_writer(writer)
            .boxed(),
    }
}

/// Install the global `tracing` subscriber described by `config`, then the
/// `log` bridge so `log` records (key/value pairs included) reach it too.
///
/// `RUST_LOG`, when set, replaces the directives built from the config.
/// Relative file paths resolve against `base_dir`. The returned
/// [`WorkerGuard`] flushes the file writer on drop and must be held for as
/// long as records should reach the file.
pub fn init_tracing(config: &LoggingConfig, base_dir: &Path) -> InitResult<Option<WorkerGuard>> {
    let filter = if std::env::var("RUST_LOG").is_ok() {
        EnvFilter::from_default_env()
    } else {
        let directives = filter_directives(config);
        EnvFilter::try_new(&directives).map_err(|e| {
            StructError::from(InitReason::Filter)
                .with_detail(format!("invalid log filter '{directives}': {e}"))
        })?
    };

    let mut layers = vec![output_layer(config.format, std::io::stderr, true)];
    let mut guard = None;

    if let Some(path) = config.resolved_file(base_dir) {
        let (Some(dir), Some(file_name)) = (path.parent(), path.file_name()) else {
            return Err(StructError::from(InitReason::LogFile)
                .with_detail(format!("'{}' is not a file path", path.display())));
        };
        std::fs::create_dir_all(dir).map_err(|e| {
            StructError::from(InitReason::LogFile)
                .with_detail(format!("create log directory '{}': {e}", dir.display()))
        })?;

        let (writer, file_guard) =
            tracing_appender::non_blocking(tracing_appender::rolling::never(dir, file_name));
        layers.push(output_layer(config.format, writer, false));
        guard = Some(file_guard);
    }

    let subscriber = tracing_subscriber::registry().with(layers.with_filter(filter));
    tracing::subscriber::set_global_default(subscriber)
        .map_err(|e| StructError::from(InitReason::Install).with_detail(e.to_string()))?;

    log::set_logger(&LogBridge)
        .map_err(|e| StructError::from(InitReason::LogBridge).with_detail(e.to_string()))?;
    log::set_max_level(log_filter(LevelFilter::current()));

    Ok(guard)
}
