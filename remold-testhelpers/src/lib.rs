#![warn(missing_docs)]
#![forbid(unsafe_code)]
#![doc = include_str!("../README.md")]

pub use color_eyre::eyre;

use log::{Level, LevelFilter, Log, Metadata, Record};
use owo_colors::{OwoColorize, Style};
use std::io::Write;

struct SimpleLogger;

impl Log for SimpleLogger {
    fn enabled(&self, _metadata: &Metadata) -> bool {
        true
    }

    fn log(&self, record: &Record) {
        let level_style = match record.level() {
            Level::Error => Style::new().red(),
            Level::Warn => Style::new().yellow(),
            Level::Info => Style::new().green(),
            Level::Debug => Style::new().blue(),
            Level::Trace => Style::new().cyan(),
        };

        eprintln!(
            "{} - {}: {}",
            record.level().style(level_style),
            record.target().blue(),
            record.args()
        );
    }

    fn flush(&self) {
        let _ = std::io::stderr().flush();
    }
}

/// Installs color-eyre and a simple stderr logger at trace level.
///
/// Idempotent: tests share a process, so every test can (and should) call
/// this first without caring who won.
pub fn setup() {
    use std::sync::Once;

    static INSTALL: Once = Once::new();
    INSTALL.call_once(|| {
        color_eyre::install().expect("failed to set up color-eyre");

        let logger = Box::new(SimpleLogger);
        if log::set_boxed_logger(logger).is_ok() {
            log::set_max_level(LevelFilter::Trace);
        }
    });
}
