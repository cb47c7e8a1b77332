use std::error::Error as StdError;
use std::sync::Arc;

use crate::entry::Entry;
use crate::field::{Field, Fields};
use crate::hook::Chain;
use crate::level::Level;
use crate::options::Options;

/// A structured, leveled logger.
///
/// A logger is an immutable snapshot of its [`Options`] plus the hook chain
/// built from them. Each hook wraps the ones added before it, so the chain
/// runs the most recently added hook first and the first one added last.
/// The level filter sits innermost, right in front of the writer: hooks see
/// every record but the writer only receives records that pass the
/// threshold.
///
/// Cloning a logger is cheap and clones share the chain. To derive a
/// differently configured logger, call [`with`](Logger::with), adjust the
/// options and build a new one.
///
/// # Thread Safety
///
/// A logger can be shared by any number of threads. Each record is built and
/// rendered on the thread that creates it; the only shared state is the
/// buffer and entry pools and the writer's output lock.
///
/// # Examples
///
/// ```
/// # use field_logger::{Fields, JsonWriter, Options};
/// let logger = Options::new().writer(JsonWriter::new(std::io::sink())).logger();
/// logger.info().string("service", "auth").int("retries", 3).message("started")?;
/// logger.debug().message("filtered out")?;
/// # Ok::<(), field_logger::Error>(())
/// ```
#[derive(Clone)]
pub struct Logger {
    options: Options,
    chain: Arc<Chain>,
}

impl Logger {
    /// Text output to stderr at `info`.
    pub fn new() -> Self {
        Options::new().logger()
    }

    pub(crate) fn from_options(options: Options) -> Self {
        let chain = Chain::from_arc(options.writer.clone())
            .hooks(options.hooks.iter().rev().cloned())
            .hook(options.level);
        Self {
            options,
            chain: Arc::new(chain),
        }
    }

    /// Minimum level of records that get written.
    pub fn level(&self) -> Level {
        self.options.level
    }

    /// Whether a record at `level` would pass the level filter.
    pub fn enabled(&self, level: Level) -> bool {
        level != Level::NONE && level <= self.options.level
    }

    /// Starts a record at `level`. The level comes first in the record,
    /// followed by the persistent fields of the logger.
    pub fn entry(&self, level: Level) -> Entry {
        Entry::new(self.chain.clone())
            .with_field(Field::Level(level))
            .with(self.options.fields.iter().cloned())
    }

    pub fn error(&self) -> Entry {
        self.entry(Level::ERROR)
    }

    /// Starts an `error` record with `errs` attached, one field each.
    pub fn error_with<I, E>(&self, errs: I) -> Entry
    where
        I: IntoIterator<Item = E>,
        E: StdError + Send + Sync + 'static,
    {
        errs.into_iter().fold(self.error(), |entry, err| entry.error(err))
    }

    pub fn warn(&self) -> Entry {
        self.entry(Level::WARN)
    }

    /// Starts a `warn` record with `errs` attached, one field each.
    pub fn warn_with<I, E>(&self, errs: I) -> Entry
    where
        I: IntoIterator<Item = E>,
        E: StdError + Send + Sync + 'static,
    {
        errs.into_iter().fold(self.warn(), |entry, err| entry.error(err))
    }

    pub fn info(&self) -> Entry {
        self.entry(Level::INFO)
    }

    pub fn debug(&self) -> Entry {
        self.entry(Level::DEBUG)
    }

    /// The options this logger was built from, for deriving another one.
    pub fn with(&self) -> Options {
        self.options.clone()
    }
}

impl Default for Logger {
    fn default() -> Self {
        Self::new()
    }
}
