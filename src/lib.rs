//! # Field Logger
//!
//! A structured, leveled logging library that keeps the hot path free of
//! heap allocation:
//!
//! * **Structured records**: every record is an ordered list of key/value
//!   fields, rendered in attachment order
//! * **Two wire formats**: one JSON object per line, or `key=value` text for
//!   humans
//! * **Composable delivery**: hooks intercept, rewrite or drop records before
//!   the writer sees them; level filtering is just another hook
//!
//! ## Key Features
//!
//! * Fields are plain values that know how to encode themselves against any
//!   encoder; no intermediate tree is built
//! * Render buffers and record field lists are recycled through
//!   process-wide pools
//! * Everything runs synchronously on the logging thread; the pools and the
//!   writer's output lock are the only shared state
//!
//! ## Main Components
//!
//! * [`Buffer`] and [`Pool`]: reusable byte storage
//! * [`Field`] and the [`Encoder`] contract, implemented by [`JsonEncoder`]
//!   and [`TextEncoder`]
//! * [`Entry`]: the record builder
//! * [`Writer`], [`Hook`] and [`Chain`]: delivery
//! * [`Level`]: priority, both a field and a filtering hook
//! * [`Options`] and [`Logger`]: configuration and the everyday front end
//!
//! ## Quick Start
//!
//! ```
//! use field_logger::{Fields, JsonWriter, Level, Options};
//!
//! let logger = Options::new()
//!     .writer(JsonWriter::new(std::io::stdout()))
//!     .level(Level::INFO)
//!     .name("auth")
//!     .logger();
//!
//! // {"level":"info","log":"auth","user":"ada","attempt":2,"message":"login"}
//! logger
//!     .info()
//!     .string("user", "ada")
//!     .int("attempt", 2)
//!     .message("login")?;
//!
//! // Below the threshold: dropped silently.
//! logger.debug().message("cache miss")?;
//! # Ok::<(), field_logger::Error>(())
//! ```

pub mod bridge;
pub mod buffer;
pub mod encoder;
pub mod encoding;
pub mod entry;
pub mod error;
pub mod field;
pub mod hook;
pub mod level;
pub mod logger;
pub mod options;
pub mod pool;
pub mod writer;

pub use buffer::Buffer;
pub use encoder::Encoder;
pub use encoding::{JsonEncoder, TextEncoder};
pub use entry::Entry;
pub use error::{Error, Result};
pub use field::{Field, Fields};
pub use hook::{Chain, Hook, HookAction};
pub use level::Level;
pub use logger::Logger;
pub use options::{Format, LoggerConfig, Options};
pub use pool::{Pool, Pooled, Recycle};
pub use writer::{JsonWriter, TextWriter, Writer};
