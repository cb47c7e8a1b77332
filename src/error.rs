use std::io;

/// Errors surfaced by the logging pipeline.
///
/// Neither variant is fatal to the calling program: a level that fails to
/// parse is reported to whoever performed the parse, and a sink failure is
/// handed back from [`Entry::message`](crate::Entry::message) for the caller
/// to inspect or ignore. Nothing is retried.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// Text that does not name a known priority level, or an ordinal with no
    /// canonical label.
    #[error("{0}: invalid level")]
    InvalidLevel(String),

    /// The sink rejected or partially accepted a rendered record.
    #[error("failed to write log record: {0}")]
    Io(#[from] io::Error),
}

pub type Result<T> = std::result::Result<T, Error>;
