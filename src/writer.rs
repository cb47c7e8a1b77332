use std::io;

use parking_lot::Mutex;

use crate::buffer::Buffer;
use crate::encoding::{JsonEncoder, TextEncoder};
use crate::error::Result;
use crate::field::Field;
use crate::pool::{JSON_BUFFERS, TEXT_BUFFERS};

/// Sink-facing end of the pipeline.
///
/// A writer receives the final, ordered field list of one record. Terminal
/// writers render it and flush the bytes to their output; anything else
/// implementing the trait (a closure, a test collector) decides for itself.
pub trait Writer: Send + Sync {
    fn write(&self, fields: &[Field]) -> Result<()>;
}

impl<F> Writer for F
where
    F: Fn(&[Field]) -> Result<()> + Send + Sync,
{
    fn write(&self, fields: &[Field]) -> Result<()> {
        self(fields)
    }
}

/// Terminal writer producing one JSON object per line.
///
/// The object is always written, `{}` included for a record with no fields.
///
/// # Examples
///
/// ```
/// # use field_logger::{Field, JsonWriter, Writer};
/// let writer = JsonWriter::new(Vec::new());
/// writer.write(&[Field::string("service", "auth"), Field::int("retries", 3)])?;
/// assert_eq!(writer.into_inner(), b"{\"service\":\"auth\",\"retries\":3}\n");
/// # Ok::<(), field_logger::Error>(())
/// ```
pub struct JsonWriter<W> {
    out: Mutex<W>,
}

impl<W: io::Write + Send> JsonWriter<W> {
    pub fn new(out: W) -> Self {
        Self {
            out: Mutex::new(out),
        }
    }

    pub fn into_inner(self) -> W {
        self.out.into_inner()
    }
}

impl JsonWriter<io::Stderr> {
    pub fn stderr() -> Self {
        Self::new(io::stderr())
    }
}

impl<W: io::Write + Send> Writer for JsonWriter<W> {
    fn write(&self, fields: &[Field]) -> Result<()> {
        let mut buf = JSON_BUFFERS.guard();
        buf.append_byte(b'{');
        render_json(&mut buf, fields);
        buf.append_str("}\n");
        flush(&self.out, &buf)
    }
}

fn render_json(buf: &mut Buffer, fields: &[Field]) {
    let mut enc = JsonEncoder::new(buf);
    for f in fields {
        f.encode(&mut enc);
    }
}

/// Terminal writer producing one `key=value` line per record.
///
/// A record whose fields all render to nothing (an absent error, empty
/// bytes) produces no output at all, not even a newline.
pub struct TextWriter<W> {
    out: Mutex<W>,
}

impl<W: io::Write + Send> TextWriter<W> {
    pub fn new(out: W) -> Self {
        Self {
            out: Mutex::new(out),
        }
    }

    pub fn into_inner(self) -> W {
        self.out.into_inner()
    }
}

impl TextWriter<io::Stderr> {
    pub fn stderr() -> Self {
        Self::new(io::stderr())
    }
}

impl<W: io::Write + Send> Writer for TextWriter<W> {
    fn write(&self, fields: &[Field]) -> Result<()> {
        let mut buf = TEXT_BUFFERS.guard();
        render_text(&mut buf, fields);
        if buf.is_empty() {
            return Ok(());
        }
        buf.append_byte(b'\n');
        flush(&self.out, &buf)
    }
}

fn render_text(buf: &mut Buffer, fields: &[Field]) {
    let mut enc = TextEncoder::new(buf);
    for f in fields {
        f.encode(&mut enc);
    }
}

fn flush<W: io::Write>(out: &Mutex<W>, buf: &Buffer) -> Result<()> {
    buf.write_to(&mut *out.lock())?;
    Ok(())
}
