use std::borrow::Cow;
use std::fmt;
use std::sync::Arc;

use crate::error::Result;
use crate::field::{Field, Fields};
use crate::hook::Chain;
use crate::pool::ENTRY_FIELDS;

/// A log record being assembled.
///
/// An entry owns an ordered list of fields and the [`Chain`] it will be sent
/// through. Attach methods (from the [`Fields`] trait) take the entry by value
/// and return it, so the one live handle is threaded through the call chain
/// and the compiler rejects any use after finalization.
///
/// The field list is borrowed from a process-wide pool and goes back to it
/// when the entry is finalized with [`message`](Entry::message), abandoned
/// with [`discard`](Entry::discard), or simply dropped.
///
/// # Examples
///
/// ```
/// # use std::sync::Arc;
/// # use field_logger::{Chain, Entry, Field, Fields, JsonWriter, Level};
/// let chain = Arc::new(Chain::new(JsonWriter::new(std::io::sink())));
/// Entry::new(chain)
///     .with_field(Field::Level(Level::INFO))
///     .string("service", "auth")
///     .int("retries", 3)
///     .message("started")?;
/// # Ok::<(), field_logger::Error>(())
/// ```
pub struct Entry {
    chain: Arc<Chain>,
    fields: Vec<Field>,
}

impl Entry {
    pub fn new(chain: Arc<Chain>) -> Self {
        Self {
            chain,
            fields: ENTRY_FIELDS.get(),
        }
    }

    /// Fields attached so far, in attachment order.
    pub fn fields(&self) -> &[Field] {
        &self.fields
    }

    /// Appends a message and sends the record through the chain.
    ///
    /// A record dropped by a hook is not an error. A sink failure is
    /// returned as is; nothing is retried.
    pub fn message(mut self, msg: impl Into<Cow<'static, str>>) -> Result<()> {
        self.fields.push(Field::Message(msg.into()));
        self.chain.dispatch(&mut self.fields)
    }

    /// Like [`message`](Entry::message), with a formatted message:
    /// `entry.messagef(format_args!("took {}ms", ms))`.
    pub fn messagef(self, args: fmt::Arguments<'_>) -> Result<()> {
        match args.as_str() {
            Some(msg) => self.message(msg),
            None => self.message(args.to_string()),
        }
    }

    /// Abandons the record without writing it.
    pub fn discard(self) {}
}

impl Fields for Entry {
    fn with_field(mut self, field: Field) -> Self {
        self.fields.push(field);
        self
    }
}

impl Drop for Entry {
    fn drop(&mut self) {
        ENTRY_FIELDS.put(std::mem::take(&mut self.fields));
    }
}

impl fmt::Debug for Entry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Entry").field("fields", &self.fields).finish()
    }
}
