use std::borrow::Cow;
use std::fmt;
use std::str::FromStr;

use serde::{de, ser, Deserialize, Deserializer, Serialize, Serializer};

use crate::error::{Error, Result};
use crate::field::Field;
use crate::hook::{Hook, HookAction};

/// Logging priority level.
///
/// Levels are ordinals: `NONE < ERROR < WARN < INFO < DEBUG`. A level plays
/// two roles in the pipeline:
///
/// * attached to a record as [`Field::Level`], it renders as its label under
///   the `level` key;
/// * installed as a [`Hook`], it is a threshold that drops every record more
///   verbose than itself, and every record without a level.
///
/// Ordinals past `DEBUG` can be built with [`Level::from_raw`]; they render
/// as `invalid (<n>)` and refuse to serialize.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct Level(u8);

const LABELS: [&str; Level::COUNT as usize] = ["none", "error", "warn", "info", "debug"];

const ALIASES: [(&str, Level); 8] = [
    ("none", Level::NONE),
    ("disabled", Level::NONE),
    ("error", Level::ERROR),
    ("warn", Level::WARN),
    ("warning", Level::WARN),
    ("info", Level::INFO),
    ("debug", Level::DEBUG),
    ("trace", Level::DEBUG),
];

impl Level {
    pub const NONE: Level = Level(0);
    pub const ERROR: Level = Level(1);
    pub const WARN: Level = Level(2);
    pub const INFO: Level = Level(3);
    pub const DEBUG: Level = Level(4);

    const COUNT: u8 = 5;

    pub const fn from_raw(raw: u8) -> Self {
        Level(raw)
    }

    pub const fn raw(self) -> u8 {
        self.0
    }

    pub const fn is_valid(self) -> bool {
        self.0 < Self::COUNT
    }

    /// Canonical lowercase label, or `None` for an out-of-range ordinal.
    pub fn label(self) -> Option<&'static str> {
        LABELS.get(self.0 as usize).copied()
    }

    /// Text form used for configuration round trips. Never produces an
    /// alias; fails for out-of-range ordinals.
    pub fn to_text(self) -> Result<&'static str> {
        self.label()
            .ok_or_else(|| Error::InvalidLevel(self.0.to_string()))
    }
}

impl fmt::Display for Level {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.label() {
            Some(label) => f.write_str(label),
            None => write!(f, "invalid ({})", self.0),
        }
    }
}

impl FromStr for Level {
    type Err = Error;

    /// Case-insensitive; accepts `disabled`, `warning` and `trace` as
    /// aliases of `none`, `warn` and `debug`.
    fn from_str(s: &str) -> Result<Self> {
        ALIASES
            .iter()
            .find(|(name, _)| name.eq_ignore_ascii_case(s))
            .map(|&(_, lvl)| lvl)
            .ok_or_else(|| Error::InvalidLevel(s.to_owned()))
    }
}

impl Hook for Level {
    /// Forwards the record only if its level, taken from the last level
    /// field, is set and not more verbose than `self`.
    fn hook(&self, fields: &mut Vec<Field>) -> HookAction {
        let level = fields
            .iter()
            .rev()
            .find_map(|f| match f {
                Field::Level(lvl) => Some(*lvl),
                _ => None,
            })
            .unwrap_or(Level::NONE);
        if level == Level::NONE || *self < level {
            return HookAction::Drop;
        }
        HookAction::Forward
    }
}

impl Serialize for Level {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        let text = self.to_text().map_err(<S::Error as ser::Error>::custom)?;
        serializer.serialize_str(text)
    }
}

impl<'de> Deserialize<'de> for Level {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        let text = Cow::<'de, str>::deserialize(deserializer)?;
        text.parse().map_err(de::Error::custom)
    }
}

impl From<log::Level> for Level {
    fn from(level: log::Level) -> Self {
        match level {
            log::Level::Error => Level::ERROR,
            log::Level::Warn => Level::WARN,
            log::Level::Info => Level::INFO,
            log::Level::Debug | log::Level::Trace => Level::DEBUG,
        }
    }
}

impl From<log::LevelFilter> for Level {
    fn from(filter: log::LevelFilter) -> Self {
        filter.to_level().map_or(Level::NONE, Level::from)
    }
}

impl From<Level> for log::LevelFilter {
    fn from(level: Level) -> Self {
        match level {
            Level::NONE => log::LevelFilter::Off,
            Level::ERROR => log::LevelFilter::Error,
            Level::WARN => log::LevelFilter::Warn,
            Level::INFO => log::LevelFilter::Info,
            _ => log::LevelFilter::Trace,
        }
    }
}
