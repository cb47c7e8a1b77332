use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::field::{Field, Fields};
use crate::hook::Hook;
use crate::level::Level;
use crate::logger::Logger;
use crate::writer::{JsonWriter, TextWriter, Writer};

/// Configuration builder for a [`Logger`].
///
/// Options only collect settings: the output writer, the minimum level, the
/// hooks, and the persistent fields every record of the resulting logger
/// starts with. Nothing is encoded here. Persistent fields are attached
/// through the [`Fields`] trait, like on an [`Entry`](crate::Entry).
///
/// # Examples
///
/// ```
/// # use field_logger::{Fields, JsonWriter, Level, Options};
/// let logger = Options::new()
///     .writer(JsonWriter::new(std::io::sink()))
///     .level(Level::DEBUG)
///     .name("auth")
///     .logger();
/// assert_eq!(logger.level(), Level::DEBUG);
/// ```
#[derive(Clone)]
pub struct Options {
    pub(crate) writer: Arc<dyn Writer>,
    pub(crate) level: Level,
    pub(crate) hooks: Vec<Arc<dyn Hook>>,
    pub(crate) fields: Vec<Field>,
}

impl Options {
    /// Text output to stderr at `info`.
    pub fn new() -> Self {
        Self {
            writer: Arc::new(TextWriter::stderr()),
            level: Level::INFO,
            hooks: Vec::new(),
            fields: Vec::new(),
        }
    }

    /// Options described by a deserialized configuration, writing to stderr.
    pub fn from_config(config: &LoggerConfig) -> Self {
        let mut options = Self::new().level(config.level);
        if config.format == Format::Json {
            options = options.writer(JsonWriter::stderr());
        }
        if let Some(name) = &config.name {
            options = options.name(name.clone());
        }
        if config.timestamp {
            options = options.timestamp();
        }
        options
    }

    pub fn writer(mut self, writer: impl Writer + 'static) -> Self {
        self.writer = Arc::new(writer);
        self
    }

    pub fn level(mut self, level: Level) -> Self {
        self.level = level;
        self
    }

    /// Adds a hook. A hook wraps every hook added before it, so the last one
    /// added sees a record first. All of them run before the level filter.
    pub fn hook(mut self, hook: impl Hook + 'static) -> Self {
        self.hooks.push(Arc::new(hook));
        self
    }

    pub fn hooks<I: IntoIterator<Item = Arc<dyn Hook>>>(mut self, hooks: I) -> Self {
        self.hooks.extend(hooks);
        self
    }

    pub fn logger(self) -> Logger {
        Logger::from_options(self)
    }
}

impl Default for Options {
    fn default() -> Self {
        Self::new()
    }
}

impl Fields for Options {
    fn with_field(mut self, field: Field) -> Self {
        self.fields.push(field);
        self
    }
}

/// Output format selected in a [`LoggerConfig`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Format {
    Json,
    #[default]
    Text,
}

/// Logger settings as they appear in a configuration file.
///
/// Every key is optional; missing ones take the defaults of
/// [`Options::new`].
///
/// ```
/// # use field_logger::{Format, Level, LoggerConfig};
/// let config: LoggerConfig =
///     serde_json::from_str(r#"{"level": "WARNING", "format": "json"}"#).unwrap();
/// assert_eq!(config.level, Level::WARN);
/// assert_eq!(config.format, Format::Json);
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct LoggerConfig {
    pub level: Level,
    pub format: Format,
    /// Logger name attached to every record.
    pub name: Option<String>,
    /// Attach the current time to every record.
    pub timestamp: bool,
}

impl Default for LoggerConfig {
    fn default() -> Self {
        Self {
            level: Level::INFO,
            format: Format::Text,
            name: None,
            timestamp: false,
        }
    }
}
