//! The global backend writes through whatever `log::set_logger` installed.
//! Only one test per binary may install a logger.

use std::sync::Mutex;

use al_core::{Field, GatedLogger, Level, Logger};
use al_log::LogBackend;
use log::{Log, Metadata, Record};

static LINES: Mutex<Vec<String>> = Mutex::new(Vec::new());

struct Lines;

impl Log for Lines {
    fn enabled(&self, _metadata: &Metadata<'_>) -> bool {
        true
    }

    fn log(&self, record: &Record<'_>) {
        let count = record.key_values().count();
        LINES
            .lock()
            .unwrap()
            .push(format!("{} {} fields={count}", record.level(), record.args()));
    }

    fn flush(&self) {}
}

static LOGGER: Lines = Lines;

#[test]
fn global_backend_uses_installed_logger() {
    log::set_logger(&LOGGER).unwrap();
    log::set_max_level(log::LevelFilter::Trace);

    let logger = GatedLogger::new(LogBackend::global(), Level::Info);
    logger.info("bootstrap complete", &[Field::int("schemas", 1), Field::int("rules", 2)]);
    logger.debug("hidden", &[]);

    assert_eq!(
        *LINES.lock().unwrap(),
        vec!["INFO bootstrap complete fields=2".to_string()]
    );
}
