use std::{
    collections::VecDeque,
    sync::{Arc, Mutex},
};

use chrono::Local;
use log::{Level, LevelFilter, Metadata, Record, SetLoggerError};
use serde::{Deserialize, Serialize};

pub static LOG: Mutex<Option<Arc<Mutex<dyn Repository>>>> = Mutex::new(None);

/// Maximum number of entries a repository keeps.
pub const CAPACITY: usize = 100;

/// Storage for log entries.
///
/// Implementations must not log themselves, as they are called while the logger is locked.
#[allow(clippy::missing_errors_doc)]
pub trait Repository: Send + Sync + 'static {
    /// Most recent entry first.
    fn read_entries(&self) -> Result<VecDeque<Entry>, Error>;
    fn write_entry(&self, entry: Entry) -> Result<(), Error>;
}

#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum Error {
    #[error("{0}")]
    Unknown(String),
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct Entry {
    pub time: String,
    #[serde(with = "LevelDef")]
    pub level: Level,
    pub message: String,
}

#[derive(Serialize, Deserialize)]
#[serde(remote = "Level")]
pub enum LevelDef {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

static LOGGER: Logger = Logger;

/// # Errors
///
/// Returns an error if the logger has already been initialized.
pub fn init(
    storage: Arc<Mutex<dyn Repository>>,
    level: LevelFilter,
) -> Result<(), SetLoggerError> {
    if let Ok(mut log) = LOG.lock() {
        *log = Some(storage);
    }
    log::set_logger(&LOGGER).map(|()| log::set_max_level(level))
}

/// Map the number of `-v` and `-q` flags to a level, starting from warnings.
#[must_use]
pub fn level_filter(verbose: u8, quiet: bool) -> LevelFilter {
    if quiet {
        return LevelFilter::Error;
    }
    match verbose {
        0 => LevelFilter::Warn,
        1 => LevelFilter::Info,
        2 => LevelFilter::Debug,
        _ => LevelFilter::Trace,
    }
}

struct Logger;

impl log::Log for Logger {
    fn enabled(&self, metadata: &Metadata) -> bool {
        metadata.level() <= log::max_level() && metadata.target().starts_with("ppling")
    }

    fn log(&self, record: &Record) {
        if !self.enabled(record.metadata()) {
            return;
        }

        let message = record.args().to_string();
        eprintln!("{}: {message}", record.level().as_str().to_lowercase());

        if let Ok(log) = LOG.lock() {
            if let Some(repository) = log.as_ref() {
                if let Ok(repository) = repository.lock() {
                    let _ = repository.write_entry(Entry {
                        time: Local::now().format("%b %d %H:%M:%S").to_string(),
                        level: record.level(),
                        message,
                    });
                }
            }
        }
    }

    fn flush(&self) {}
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use rstest::rstest;

    use super::*;

    #[rstest]
    #[case(0, false, LevelFilter::Warn)]
    #[case(1, false, LevelFilter::Info)]
    #[case(2, false, LevelFilter::Debug)]
    #[case(5, false, LevelFilter::Trace)]
    #[case(2, true, LevelFilter::Error)]
    fn test_level_filter(#[case] verbose: u8, #[case] quiet: bool, #[case] expected: LevelFilter) {
        assert_eq!(level_filter(verbose, quiet), expected);
    }

    #[test]
    fn test_entry_serialization() {
        let entry = Entry {
            time: "Jan 01 18:00:00".to_string(),
            level: Level::Warn,
            message: "discarding stored state".to_string(),
        };
        let json = serde_json::to_string(&entry).unwrap();

        assert_eq!(
            json,
            r#"{"time":"Jan 01 18:00:00","level":"Warn","message":"discarding stored state"}"#
        );
        assert_eq!(serde_json::from_str::<Entry>(&json).unwrap(), entry);
    }
}
