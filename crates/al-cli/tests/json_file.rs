//! `backend = "tracing"` with `format = "json"`. Only one test per binary may
//! install.

use std::fs;

use al_cli::{build_logger, emit_demo};
use al_config::LoggingConfig;
use al_core::Field;
use al_tracing::init_tracing;

#[test]
fn json_file_carries_severity_and_fields() {
    let dir = tempfile::tempdir().unwrap();
    let config: LoggingConfig =
        "[logging]\nlevel = \"debug\"\nformat = \"json\"\nfile = \"logs/demo.json\""
            .parse()
            .unwrap();

    let guard = init_tracing(&config, dir.path()).unwrap();
    let logger = build_logger(&config);

    logger.fatal("disk gone", &[Field::string("mount", "/data")]);
    emit_demo(logger.as_ref());
    drop(guard);

    let text = fs::read_to_string(dir.path().join("logs/demo.json")).unwrap();
    let line = text
        .lines()
        .find(|line| line.contains("disk gone"))
        .unwrap_or_else(|| panic!("no record in {text}"));
    assert!(line.contains(r#""level":"ERROR""#), "{line}");
    assert!(line.contains(r#""severity":"fatal""#), "{line}");
    assert!(line.contains(r#""fields":"mount=\"/data\"""#), "{line}");
    assert!(line.contains(r#""target":"al""#), "{line}");
    assert!(text.contains(r#""severity":"panic""#), "{text}");
}
