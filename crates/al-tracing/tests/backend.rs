//! Records emitted through an injected dispatcher and rendered with
//! `SeverityFormat`.

use std::cell::Cell;
use std::fmt as stdfmt;
use std::io;
use std::sync::{Arc, Mutex};

use al_core::{Field, Level, LevelLogger, Logger};
use al_tracing::{LogBridge, SeverityFormat, tracing_logger};
use log::Log;
use tracing::Dispatch;
use tracing_subscriber::fmt;
use tracing_subscriber::layer::SubscriberExt;

// -- helpers ------------------------------------------------------------

#[derive(Clone, Default)]
struct Captured(Arc<Mutex<Vec<u8>>>);

impl Captured {
    fn text(&self) -> String {
        String::from_utf8(self.0.lock().unwrap().clone()).unwrap()
    }
}

impl io::Write for Captured {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.0.lock().unwrap().extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

fn capture() -> (Captured, Dispatch) {
    let captured = Captured::default();
    let writer = captured.clone();
    let subscriber = tracing_subscriber::registry().with(
        fmt::layer()
            .event_format(SeverityFormat::new())
            .with_ansi(false)
            .with_writer(move || writer.clone()),
    );
    (captured, Dispatch::new(subscriber))
}

fn capture_json() -> (Captured, Dispatch) {
    let captured = Captured::default();
    let writer = captured.clone();
    let subscriber = tracing_subscriber::registry().with(
        fmt::layer()
            .json()
            .with_ansi(false)
            .with_writer(move || writer.clone()),
    );
    (captured, Dispatch::new(subscriber))
}

// -- tests --------------------------------------------------------------

#[test]
fn record_carries_message_and_fields() {
    let (captured, dispatch) = capture();
    let logger = tracing_logger(dispatch, Level::Debug);

    logger.info(
        "tile cached",
        &[Field::string("user", "ada"), Field::int("zoom", 14)],
    );

    let text = captured.text();
    assert!(
        text.ends_with(" INFO tile cached user=\"ada\" zoom=14\n"),
        "{text}"
    );
}

#[test]
fn record_without_fields() {
    let (captured, dispatch) = capture();
    let logger = tracing_logger(dispatch, Level::Debug);

    logger.warn("plain", &[]);

    assert!(captured.text().ends_with(" WARN plain\n"), "{}", captured.text());
}

#[test]
fn fatal_and_panic_keep_their_label() {
    let (captured, dispatch) = capture();
    let logger = tracing_logger(dispatch, Level::Debug);

    logger.error("write failed", &[]);
    logger.fatal("disk gone", &[]);
    logger.panic("invariant broken", &[]);

    let text = captured.text();
    let lines: Vec<&str> = text.lines().collect();
    assert_eq!(lines.len(), 3);
    assert!(lines[0].ends_with("ERROR write failed"));
    assert!(lines[1].ends_with("FATAL disk gone"));
    assert!(lines[2].ends_with("PANIC invariant broken"));
}

#[test]
fn raw_bytes_are_embedded_verbatim() {
    let (captured, dispatch) = capture();
    let logger = tracing_logger(dispatch, Level::Debug);
    let err = io::Error::other("refused");

    logger.error(
        "upstream",
        &[Field::byte_string("body", br#"{"a":1}"#), Field::error(&err)],
    );

    let text = captured.text();
    assert!(
        text.ends_with("ERROR upstream body={\"a\":1} error=\"refused\"\n"),
        "{text}"
    );
}

#[test]
fn suppressed_records_never_reach_the_dispatcher() {
    let (captured, dispatch) = capture();
    let logger = tracing_logger(dispatch, Level::Error);

    logger.debug("hidden", &[Field::any("x", &1)]);
    logger.info("hidden", &[]);
    logger.warn("hidden", &[]);

    assert_eq!(captured.text(), "");
}

#[test]
fn records_go_only_to_the_injected_dispatcher() {
    let (first, first_dispatch) = capture();
    let (second, _second_dispatch) = capture();
    let logger = tracing_logger(first_dispatch, Level::Info);

    logger.info("only here", &[]);

    assert!(first.text().contains("only here"));
    assert_eq!(second.text(), "");
}

#[test]
fn level_logger_routes_through_the_backend() {
    let (captured, dispatch) = capture();
    let logger = tracing_logger(dispatch, Level::Info);
    let shim = LevelLogger::new(&logger, Level::Warn);

    shim.printf(format_args!("{} retries left", 2));

    assert!(captured.text().ends_with(" WARN 2 retries left\n"));
}

#[test]
fn json_output_keeps_severity_and_fields() {
    let (captured, dispatch) = capture_json();
    let logger = tracing_logger(dispatch, Level::Debug);

    logger.fatal("disk gone", &[Field::int("free", 0)]);

    let text = captured.text();
    assert!(text.contains(r#""level":"ERROR""#), "{text}");
    assert!(text.contains(r#""severity":"fatal""#), "{text}");
    assert!(text.contains(r#""fields":"free=0""#), "{text}");
    assert!(text.contains(r#""message":"disk gone""#), "{text}");
}

#[test]
fn foreign_severity_field_does_not_replace_label() {
    let (captured, dispatch) = capture();

    tracing::dispatcher::with_default(&dispatch, || {
        tracing::warn!(target: "tile_cache", severity = "fatal", fields = 3, "evicted");
    });

    let text = captured.text();
    assert!(text.contains(" WARN "), "{text}");
    assert!(!text.contains("FATAL"), "{text}");
    assert!(text.contains("fields=3"), "{text}");
}

#[test]
fn log_records_keep_their_pairs() {
    let (captured, dispatch) = capture();
    let pairs: [(&str, log::kv::Value<'_>); 3] = [
        ("path", log::kv::Value::from("/x")),
        ("status", log::kv::Value::from(200i64)),
        ("cached", log::kv::Value::from(true)),
    ];

    tracing::dispatcher::with_default(&dispatch, || {
        LogBridge.log(
            &log::Record::builder()
                .level(log::Level::Info)
                .target("al")
                .args(format_args!("request served"))
                .key_values(&pairs)
                .build(),
        );
    });

    let text = captured.text();
    assert!(
        text.ends_with(" INFO al: request served path=\"/x\" status=200 cached=true\n"),
        "{text}"
    );
}

/// Counts how often it is formatted.
struct Counted<'a>(&'a Cell<u32>);

impl stdfmt::Debug for Counted<'_> {
    fn fmt(&self, f: &mut stdfmt::Formatter<'_>) -> stdfmt::Result {
        self.0.set(self.0.get() + 1);
        f.write_str("counted")
    }
}

#[test]
fn fields_are_rendered_only_for_recorded_events() {
    let captured = Captured::default();
    let writer = captured.clone();
    let subscriber = tracing_subscriber::fmt()
        .with_max_level(tracing::Level::ERROR)
        .with_ansi(false)
        .event_format(SeverityFormat::new())
        .with_writer(move || writer.clone())
        .finish();
    // Facade threshold lets everything through; the subscriber does not.
    let logger = tracing_logger(Dispatch::new(subscriber), Level::Debug);
    let renders = Cell::new(0);

    logger.info("filtered", &[Field::any("v", &Counted(&renders))]);
    assert_eq!(renders.get(), 0);
    assert_eq!(captured.text(), "");

    logger.error("kept", &[Field::any("v", &Counted(&renders))]);
    assert_eq!(renders.get(), 1);
    assert!(captured.text().ends_with("ERROR kept v=counted\n"));
}
