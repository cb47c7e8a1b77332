use std::error::Error as StdError;
use std::time::Duration;

use chrono::{DateTime, FixedOffset};

/// Format-specific adapter that renders fields into a [`Buffer`](crate::Buffer).
///
/// There is one method per supported primitive kind. Each call appends one
/// `key`/value pair to the buffer the encoder is bound to; nothing is
/// returned because rendering into memory cannot fail. An encoder is created
/// for a single record and thrown away afterwards.
///
/// The trait is object safe: fields encode themselves against
/// `&mut dyn Encoder`, so the same field list renders through either format.
pub trait Encoder {
    fn encode_bool(&mut self, key: &str, b: bool);

    /// Bytes render as the decimal value of each byte, concatenated.
    fn encode_bytes(&mut self, key: &str, p: &[u8]);

    fn encode_duration(&mut self, key: &str, d: Duration);

    /// `None` is a valid value, rendered as null or left out depending on
    /// the format.
    fn encode_error(&mut self, key: &str, err: Option<&(dyn StdError + 'static)>);

    fn encode_float32(&mut self, key: &str, f: f32);

    fn encode_float64(&mut self, key: &str, f: f64);

    fn encode_int(&mut self, key: &str, i: isize);

    fn encode_int32(&mut self, key: &str, i: i32);

    fn encode_int64(&mut self, key: &str, i: i64);

    fn encode_str(&mut self, key: &str, s: &str);

    fn encode_time(&mut self, key: &str, t: &DateTime<FixedOffset>);

    fn encode_uint(&mut self, key: &str, i: usize);

    fn encode_uint32(&mut self, key: &str, i: u32);

    fn encode_uint64(&mut self, key: &str, i: u64);
}
