//! Front end for the `log` facade.
//!
//! [`init`] installs a [`Logger`] as the global `log` backend, so records
//! emitted with `log::info!` and friends go through the same hook chain and
//! writer as records built by hand. `trace` records are mapped to
//! [`Level::DEBUG`].

use crate::field::Fields;
use crate::level::Level;
use crate::logger::Logger;

/// Key under which the `log` target is attached.
pub const FIELD_TARGET: &str = "target";

impl log::Log for Logger {
    fn enabled(&self, metadata: &log::Metadata<'_>) -> bool {
        Logger::enabled(self, metadata.level().into())
    }

    fn log(&self, record: &log::Record<'_>) {
        let level = Level::from(record.level());
        if !Logger::enabled(self, level) {
            return;
        }
        let entry = self
            .entry(level)
            .string(FIELD_TARGET, record.target().to_owned());
        // `Log::log` has no way to report a failure to the caller.
        if let Err(err) = entry.messagef(*record.args()) {
            tracing::warn!(error = %err, log_target = record.target(), "failed to write log record");
        }
    }

    fn flush(&self) {}
}

/// Installs `logger` as the global `log` backend and sets the facade's
/// maximum level from the logger's threshold.
///
/// Fails if another backend is already installed.
pub fn init(logger: Logger) -> Result<(), log::SetLoggerError> {
    let max_level = log::LevelFilter::from(logger.level());
    log::set_boxed_logger(Box::new(logger))?;
    log::set_max_level(max_level);
    Ok(())
}
