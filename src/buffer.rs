use std::borrow::Cow;
use std::fmt;
use std::io;
use std::time::Duration;

use chrono::{DateTime, FixedOffset};

/// Growable byte buffer that records are rendered into.
///
/// A `Buffer` is a thin wrapper around a `Vec<u8>` with one append helper per
/// primitive kind the encoders need. Every helper writes the canonical text
/// form of its value straight into the backing storage, so rendering a record
/// never builds intermediate strings.
///
/// Buffers are meant to be reused: [`reset`](Buffer::reset) drops the content
/// but keeps the allocation, which is what makes the [`Pool`](crate::Pool)
/// worthwhile.
///
/// # Examples
///
/// ```
/// # use field_logger::Buffer;
/// let mut buf = Buffer::new();
/// buf.append_str("retries=");
/// buf.append_int(3);
/// assert_eq!(buf.as_bytes(), b"retries=3");
///
/// let cap = buf.cap();
/// buf.reset();
/// assert_eq!(buf.len(), 0);
/// assert_eq!(buf.cap(), cap);
/// ```
#[derive(Debug, Default, Clone)]
pub struct Buffer {
    buf: Vec<u8>,
}

const HEX_DIGITS: &[u8; 16] = b"0123456789abcdef";

impl Buffer {
    /// Creates an empty buffer without allocating.
    pub const fn new() -> Self {
        Self { buf: Vec::new() }
    }

    /// Creates an empty buffer able to hold `capacity` bytes before growing.
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            buf: Vec::with_capacity(capacity),
        }
    }

    /// Returns the rendered bytes. The view is only valid until the next
    /// mutating call.
    pub fn as_bytes(&self) -> &[u8] {
        &self.buf
    }

    /// Returns the content as text, replacing invalid UTF-8 sequences.
    pub fn to_string_lossy(&self) -> Cow<'_, str> {
        String::from_utf8_lossy(&self.buf)
    }

    pub fn len(&self) -> usize {
        self.buf.len()
    }

    pub fn is_empty(&self) -> bool {
        self.buf.is_empty()
    }

    pub fn cap(&self) -> usize {
        self.buf.capacity()
    }

    /// Truncates the buffer to zero length, keeping its capacity.
    pub fn reset(&mut self) {
        self.buf.clear();
    }

    /// Writes the whole content to `out` and returns the number of bytes
    /// written.
    ///
    /// The content is left in place; callers reset the buffer themselves
    /// (the pool does it on return).
    pub fn write_to<W: io::Write + ?Sized>(&self, out: &mut W) -> io::Result<usize> {
        out.write_all(&self.buf)?;
        Ok(self.buf.len())
    }

    pub fn append_bool(&mut self, v: bool) {
        self.append_str(if v { "true" } else { "false" });
    }

    pub fn append_byte(&mut self, c: u8) {
        self.buf.push(c);
    }

    pub fn append_int(&mut self, i: i64) {
        self.append_display(i);
    }

    pub fn append_uint(&mut self, i: u64) {
        self.append_display(i);
    }

    /// Appends `f` in fixed notation using the shortest representation that
    /// round-trips at the given bit width (32 or 64).
    ///
    /// Non-finite values are written as `NaN`, `+Inf` and `-Inf`.
    pub fn append_float(&mut self, f: f64, bits: u32) {
        if f.is_nan() {
            self.append_str("NaN");
        } else if f.is_infinite() {
            self.append_str(if f > 0.0 { "+Inf" } else { "-Inf" });
        } else if bits == 32 {
            self.append_display(f as f32);
        } else {
            self.append_display(f);
        }
    }

    /// Appends the number of seconds in `d`, without a unit.
    pub fn append_duration(&mut self, d: Duration) {
        self.append_display(d.as_secs_f64());
    }

    /// Appends `s` wrapped in double quotes.
    ///
    /// Quotes, backslashes and control characters are escaped the way JSON
    /// strings expect them; everything else, multi-byte UTF-8 included, is
    /// copied as is.
    pub fn append_quote(&mut self, s: &str) {
        self.buf.push(b'"');
        self.append_escaped(s);
        self.buf.push(b'"');
    }

    /// Like [`append_quote`](Buffer::append_quote), for any `Display` value.
    /// The value is escaped as it is formatted, without a scratch string.
    pub fn append_quote_display<T: fmt::Display + ?Sized>(&mut self, v: &T) {
        self.buf.push(b'"');
        let _ = fmt::Write::write_fmt(&mut Escaping(&mut *self), format_args!("{}", v));
        self.buf.push(b'"');
    }

    fn append_escaped(&mut self, s: &str) {
        let bytes = s.as_bytes();
        let mut start = 0;
        for (i, &b) in bytes.iter().enumerate() {
            let escape = match b {
                b'"' => "\\\"",
                b'\\' => "\\\\",
                b'\n' => "\\n",
                b'\r' => "\\r",
                b'\t' => "\\t",
                0x08 => "\\b",
                0x0c => "\\f",
                0x00..=0x1f | 0x7f => "",
                _ => continue,
            };
            self.buf.extend_from_slice(&bytes[start..i]);
            if escape.is_empty() {
                self.append_str("\\u00");
                self.buf.push(HEX_DIGITS[(b >> 4) as usize]);
                self.buf.push(HEX_DIGITS[(b & 0x0f) as usize]);
            } else {
                self.append_str(escape);
            }
            start = i + 1;
        }
        self.buf.extend_from_slice(&bytes[start..]);
    }

    /// Appends the UTF-8 encoding of `c`.
    pub fn append_char(&mut self, c: char) {
        let mut utf8 = [0u8; 4];
        self.buf.extend_from_slice(c.encode_utf8(&mut utf8).as_bytes());
    }

    pub fn append_str(&mut self, s: &str) {
        self.buf.extend_from_slice(s.as_bytes());
    }

    /// Appends `t` as RFC 3339 text with second precision: `Z` for a zero
    /// offset, `±hh:mm` otherwise.
    pub fn append_time(&mut self, t: &DateTime<FixedOffset>) {
        self.append_display(t.format("%Y-%m-%dT%H:%M:%S"));
        let offset = t.offset().local_minus_utc();
        if offset == 0 {
            self.buf.push(b'Z');
            return;
        }
        self.buf.push(if offset < 0 { b'-' } else { b'+' });
        let minutes = offset.unsigned_abs() / 60;
        self.append_two_digits(minutes / 60);
        self.buf.push(b':');
        self.append_two_digits(minutes % 60);
    }

    fn append_two_digits(&mut self, v: u32) {
        self.buf.push(b'0' + (v / 10 % 10) as u8);
        self.buf.push(b'0' + (v % 10) as u8);
    }

    fn append_display<T: fmt::Display>(&mut self, v: T) {
        // Writing into a Vec cannot fail.
        let _ = fmt::Write::write_fmt(self, format_args!("{}", v));
    }
}

struct Escaping<'a>(&'a mut Buffer);

impl fmt::Write for Escaping<'_> {
    fn write_str(&mut self, s: &str) -> fmt::Result {
        self.0.append_escaped(s);
        Ok(())
    }
}

impl fmt::Write for Buffer {
    fn write_str(&mut self, s: &str) -> fmt::Result {
        self.append_str(s);
        Ok(())
    }
}

impl io::Write for Buffer {
    fn write(&mut self, p: &[u8]) -> io::Result<usize> {
        self.buf.extend_from_slice(p);
        Ok(p.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_float_widths() {
        let mut buf = Buffer::new();
        buf.append_float(0.1f32 as f64, 32);
        assert_eq!(buf.as_bytes(), b"0.1");

        buf.reset();
        buf.append_float(0.1f32 as f64, 64);
        assert_eq!(buf.as_bytes(), b"0.10000000149011612");

        buf.reset();
        buf.append_float(2.0, 64);
        assert_eq!(buf.as_bytes(), b"2");
    }

    #[test]
    fn test_non_finite_floats() {
        let mut buf = Buffer::new();
        buf.append_float(f64::NAN, 64);
        buf.append_byte(b' ');
        buf.append_float(f64::INFINITY, 64);
        buf.append_byte(b' ');
        buf.append_float(f64::NEG_INFINITY, 32);
        assert_eq!(buf.as_bytes(), b"NaN +Inf -Inf");
    }

    #[test]
    fn test_duration_seconds() {
        let mut buf = Buffer::new();
        buf.append_duration(Duration::from_millis(1500));
        assert_eq!(buf.as_bytes(), b"1.5");

        buf.reset();
        buf.append_duration(Duration::ZERO);
        assert_eq!(buf.as_bytes(), b"0");
    }

    #[test]
    fn test_time_offsets() {
        let utc = FixedOffset::east_opt(0).unwrap();
        let t = utc.with_ymd_and_hms(2024, 3, 9, 7, 5, 1).unwrap();
        let mut buf = Buffer::new();
        buf.append_time(&t);
        assert_eq!(buf.as_bytes(), b"2024-03-09T07:05:01Z");

        let west = FixedOffset::west_opt(5 * 3600 + 30 * 60).unwrap();
        let t = west.with_ymd_and_hms(2024, 3, 9, 7, 5, 1).unwrap();
        buf.reset();
        buf.append_time(&t);
        assert_eq!(buf.as_bytes(), b"2024-03-09T07:05:01-05:30");
    }

    #[test]
    fn test_quote_escapes() {
        let mut buf = Buffer::new();
        buf.append_quote("a\"b\\c\nd\u{1}é");
        assert_eq!(buf.to_string_lossy(), "\"a\\\"b\\\\c\\nd\\u0001é\"");
    }
}
