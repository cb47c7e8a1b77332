use std::error::Error as StdError;
use std::fmt;
use std::time::Duration;

use chrono::{DateTime, FixedOffset};

use crate::buffer::Buffer;
use crate::encoder::Encoder;

/// Renders fields as space-separated `key=value` tokens.
///
/// Values are never quoted. Keys and string values have their control
/// characters replaced by two-character escapes (`\a \b \f \n \r \t \v`) so a
/// record always stays on one line. Absent errors and empty byte strings are
/// left out entirely, which means a record may render to nothing at all; the
/// [`TextWriter`](crate::TextWriter) skips such records.
pub struct TextEncoder<'a> {
    buf: &'a mut Buffer,
}

impl<'a> TextEncoder<'a> {
    pub fn new(buf: &'a mut Buffer) -> Self {
        Self { buf }
    }

    fn append_key(&mut self, key: &str) {
        if !self.buf.is_empty() {
            self.buf.append_byte(b' ');
        }
        append_escaped(self.buf, key);
        self.buf.append_byte(b'=');
    }
}

fn append_escaped(buf: &mut Buffer, s: &str) {
    let mut start = 0;
    for (i, b) in s.bytes().enumerate() {
        let escape = match b {
            0x07 => "\\a",
            0x08 => "\\b",
            0x0c => "\\f",
            b'\n' => "\\n",
            b'\r' => "\\r",
            b'\t' => "\\t",
            0x0b => "\\v",
            _ => continue,
        };
        buf.append_str(&s[start..i]);
        buf.append_str(escape);
        start = i + 1;
    }
    buf.append_str(&s[start..]);
}

struct Escaping<'a>(&'a mut Buffer);

impl fmt::Write for Escaping<'_> {
    fn write_str(&mut self, s: &str) -> fmt::Result {
        append_escaped(self.0, s);
        Ok(())
    }
}

impl Encoder for TextEncoder<'_> {
    fn encode_bool(&mut self, key: &str, b: bool) {
        self.append_key(key);
        self.buf.append_bool(b);
    }

    fn encode_bytes(&mut self, key: &str, p: &[u8]) {
        if p.is_empty() {
            return;
        }
        self.append_key(key);
        for &b in p {
            self.buf.append_uint(u64::from(b));
        }
    }

    fn encode_duration(&mut self, key: &str, d: Duration) {
        self.append_key(key);
        self.buf.append_duration(d);
        self.buf.append_byte(b's');
    }

    fn encode_error(&mut self, key: &str, err: Option<&(dyn StdError + 'static)>) {
        let Some(err) = err else {
            return;
        };
        self.append_key(key);
        let _ = fmt::Write::write_fmt(&mut Escaping(&mut *self.buf), format_args!("{}", err));
    }

    fn encode_float32(&mut self, key: &str, f: f32) {
        self.append_key(key);
        self.buf.append_float(f64::from(f), 32);
    }

    fn encode_float64(&mut self, key: &str, f: f64) {
        self.append_key(key);
        self.buf.append_float(f, 64);
    }

    fn encode_int(&mut self, key: &str, i: isize) {
        self.append_key(key);
        self.buf.append_int(i as i64);
    }

    fn encode_int32(&mut self, key: &str, i: i32) {
        self.append_key(key);
        self.buf.append_int(i64::from(i));
    }

    fn encode_int64(&mut self, key: &str, i: i64) {
        self.append_key(key);
        self.buf.append_int(i);
    }

    fn encode_str(&mut self, key: &str, s: &str) {
        self.append_key(key);
        append_escaped(self.buf, s);
    }

    fn encode_time(&mut self, key: &str, t: &DateTime<FixedOffset>) {
        self.append_key(key);
        self.buf.append_time(t);
    }

    fn encode_uint(&mut self, key: &str, i: usize) {
        self.append_key(key);
        self.buf.append_uint(i as u64);
    }

    fn encode_uint32(&mut self, key: &str, i: u32) {
        self.append_key(key);
        self.buf.append_uint(u64::from(i));
    }

    fn encode_uint64(&mut self, key: &str, i: u64) {
        self.append_key(key);
        self.buf.append_uint(i);
    }
}
