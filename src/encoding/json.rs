use std::error::Error as StdError;
use std::time::Duration;

use chrono::{DateTime, FixedOffset};

use crate::buffer::Buffer;
use crate::encoder::Encoder;

/// Renders fields as the members of a JSON object.
///
/// The encoder only writes the members; the enclosing braces and the line
/// terminator belong to [`JsonWriter`](crate::JsonWriter). It remembers how
/// many members it has written so far to know when a comma is due.
pub struct JsonEncoder<'a> {
    buf: &'a mut Buffer,
    n: usize,
}

impl<'a> JsonEncoder<'a> {
    pub fn new(buf: &'a mut Buffer) -> Self {
        Self { buf, n: 0 }
    }

    fn append_key(&mut self, key: &str) {
        if self.n > 0 {
            self.buf.append_byte(b',');
        }
        self.buf.append_quote(key);
        self.buf.append_byte(b':');
        self.n += 1;
    }

    fn append_null(&mut self) {
        self.buf.append_str("null");
    }
}

impl Encoder for JsonEncoder<'_> {
    fn encode_bool(&mut self, key: &str, b: bool) {
        self.append_key(key);
        self.buf.append_bool(b);
    }

    fn encode_bytes(&mut self, key: &str, p: &[u8]) {
        self.append_key(key);
        if p.is_empty() {
            self.append_null();
            return;
        }
        self.buf.append_byte(b'"');
        for &b in p {
            self.buf.append_uint(u64::from(b));
        }
        self.buf.append_byte(b'"');
    }

    fn encode_duration(&mut self, key: &str, d: Duration) {
        self.append_key(key);
        self.buf.append_duration(d);
    }

    fn encode_error(&mut self, key: &str, err: Option<&(dyn StdError + 'static)>) {
        self.append_key(key);
        match err {
            Some(err) => self.buf.append_quote_display(err),
            None => self.append_null(),
        }
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
        self.buf.append_quote(s);
    }

    fn encode_time(&mut self, key: &str, t: &DateTime<FixedOffset>) {
        self.append_key(key);
        self.buf.append_byte(b'"');
        self.buf.append_time(t);
        self.buf.append_byte(b'"');
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

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_comma_between_members() {
        let mut buf = Buffer::new();
        let mut enc = JsonEncoder::new(&mut buf);
        enc.encode_bool("a", true);
        enc.encode_int32("b", -7);
        enc.encode_uint64("c", u64::MAX);
        assert_eq!(
            buf.to_string_lossy(),
            r#""a":true,"b":-7,"c":18446744073709551615"#
        );
    }

    #[test]
    fn test_bytes() {
        let mut buf = Buffer::new();
        let mut enc = JsonEncoder::new(&mut buf);
        enc.encode_bytes("data", &[1, 20, 255]);
        enc.encode_bytes("empty", &[]);
        assert_eq!(buf.to_string_lossy(), r#""data":"120255","empty":null"#);
    }
}
