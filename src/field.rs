use std::borrow::Cow;
use std::error::Error as StdError;
use std::fmt;
use std::panic::Location;
use std::sync::Arc;
use std::time::{Duration, Instant};

use chrono::{DateTime, FixedOffset, Local};

use crate::encoder::Encoder;
use crate::level::Level;

/// Well-known field keys.
pub const FIELD_CALLER: &str = "caller";
pub const FIELD_ERROR: &str = "error";
pub const FIELD_LEVEL: &str = "level";
pub const FIELD_MESSAGE: &str = "message";
pub const FIELD_NAME: &str = "log";
pub const FIELD_SPAN: &str = "span";
pub const FIELD_TIME: &str = "time";

pub type Key = Cow<'static, str>;

/// Error value carried by [`Field::Error`].
pub type ErrorValue = Arc<dyn StdError + Send + Sync>;

/// One unit of structured log data.
///
/// A field pairs a value with the knowledge of which [`Encoder`] method
/// renders it, without committing to a wire format. Each variant maps to
/// exactly one encoder call, so the same field list can be rendered as JSON
/// or as text, any number of times, with no side effects beyond the bytes
/// written.
///
/// Fields are plain values: attaching one to a record costs no allocation
/// unless the key or value is an owned string.
///
/// # Examples
///
/// ```
/// # use field_logger::{Buffer, Field, TextEncoder};
/// let fields = [Field::string("service", "auth"), Field::int("retries", 3)];
///
/// let mut buf = Buffer::new();
/// let mut enc = TextEncoder::new(&mut buf);
/// for f in &fields {
///     f.encode(&mut enc);
/// }
/// assert_eq!(buf.as_bytes(), b"service=auth retries=3");
/// ```
#[derive(Debug, Clone)]
pub enum Field {
    Bool(Key, bool),
    Bytes(Key, Cow<'static, [u8]>),
    /// Call site as `file:line`, formatted when the field was created;
    /// encodes nothing when no location is known.
    Caller(Option<Cow<'static, str>>),
    Duration(Key, Duration),
    /// Error under the `error` key. `None` is a renderable state, not a
    /// failure.
    Error(Option<ErrorValue>),
    Float32(Key, f32),
    Float64(Key, f64),
    Int(Key, isize),
    Int32(Key, i32),
    Int64(Key, i64),
    Level(Level),
    Message(Cow<'static, str>),
    /// Logger name, under the `log` key.
    Name(Cow<'static, str>),
    /// Start of a span; encodes the time elapsed since then.
    Span(Instant),
    String(Key, Cow<'static, str>),
    Time(Key, DateTime<FixedOffset>),
    /// Encodes the wall-clock time at the moment of encoding.
    Timestamp,
    Uint(Key, usize),
    Uint32(Key, u32),
    Uint64(Key, u64),
    /// User-defined field.
    Func(FieldFn),
}

/// Closure that encodes a user-defined field.
#[derive(Clone)]
pub struct FieldFn(Arc<dyn Fn(&mut dyn Encoder) + Send + Sync>);

impl fmt::Debug for FieldFn {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("FieldFn")
    }
}

#[derive(Debug, thiserror::Error)]
#[error("{0}")]
struct FormattedError(String);

impl Field {
    /// Renders the field through `enc`.
    pub fn encode(&self, enc: &mut dyn Encoder) {
        match self {
            Field::Bool(key, b) => enc.encode_bool(key, *b),
            Field::Bytes(key, p) => enc.encode_bytes(key, p),
            Field::Caller(Some(caller)) => enc.encode_str(FIELD_CALLER, caller),
            Field::Caller(None) => {}
            Field::Duration(key, d) => enc.encode_duration(key, *d),
            Field::Error(err) => enc.encode_error(
                FIELD_ERROR,
                err.as_deref().map(|e| e as &(dyn StdError + 'static)),
            ),
            Field::Float32(key, f) => enc.encode_float32(key, *f),
            Field::Float64(key, f) => enc.encode_float64(key, *f),
            Field::Int(key, i) => enc.encode_int(key, *i),
            Field::Int32(key, i) => enc.encode_int32(key, *i),
            Field::Int64(key, i) => enc.encode_int64(key, *i),
            Field::Level(lvl) => match lvl.label() {
                Some(label) => enc.encode_str(FIELD_LEVEL, label),
                None => enc.encode_str(FIELD_LEVEL, &lvl.to_string()),
            },
            Field::Message(msg) => enc.encode_str(FIELD_MESSAGE, msg),
            Field::Name(name) => enc.encode_str(FIELD_NAME, name),
            Field::Span(start) => enc.encode_duration(FIELD_SPAN, start.elapsed()),
            Field::String(key, s) => enc.encode_str(key, s),
            Field::Time(key, t) => enc.encode_time(key, t),
            Field::Timestamp => enc.encode_time(FIELD_TIME, &Local::now().fixed_offset()),
            Field::Uint(key, i) => enc.encode_uint(key, *i),
            Field::Uint32(key, i) => enc.encode_uint32(key, *i),
            Field::Uint64(key, i) => enc.encode_uint64(key, *i),
            Field::Func(f) => (f.0)(enc),
        }
    }

    pub fn bool(key: impl Into<Key>, b: bool) -> Self {
        Field::Bool(key.into(), b)
    }

    pub fn bytes(key: impl Into<Key>, p: impl Into<Cow<'static, [u8]>>) -> Self {
        Field::Bytes(key.into(), p.into())
    }

    /// Captures the location of the caller. Functions marked
    /// `#[track_caller]` pass the capture on to their own caller.
    #[track_caller]
    pub fn caller() -> Self {
        let loc = Location::caller();
        Field::Caller(Some(format!("{}:{}", loc.file(), loc.line()).into()))
    }

    pub fn duration(key: impl Into<Key>, d: Duration) -> Self {
        Field::Duration(key.into(), d)
    }

    pub fn error<E: StdError + Send + Sync + 'static>(err: E) -> Self {
        Field::Error(Some(Arc::new(err)))
    }

    /// Error field from a formatted message.
    pub fn errorf(args: fmt::Arguments<'_>) -> Self {
        Field::error(FormattedError(args.to_string()))
    }

    pub fn float32(key: impl Into<Key>, f: f32) -> Self {
        Field::Float32(key.into(), f)
    }

    pub fn float64(key: impl Into<Key>, f: f64) -> Self {
        Field::Float64(key.into(), f)
    }

    pub fn int(key: impl Into<Key>, i: isize) -> Self {
        Field::Int(key.into(), i)
    }

    pub fn int32(key: impl Into<Key>, i: i32) -> Self {
        Field::Int32(key.into(), i)
    }

    pub fn int64(key: impl Into<Key>, i: i64) -> Self {
        Field::Int64(key.into(), i)
    }

    pub fn message(msg: impl Into<Cow<'static, str>>) -> Self {
        Field::Message(msg.into())
    }

    pub fn name(name: impl Into<Cow<'static, str>>) -> Self {
        Field::Name(name.into())
    }

    /// Span starting now.
    pub fn span() -> Self {
        Field::Span(Instant::now())
    }

    pub fn string(key: impl Into<Key>, s: impl Into<Cow<'static, str>>) -> Self {
        Field::String(key.into(), s.into())
    }

    pub fn time<Tz: chrono::TimeZone>(key: impl Into<Key>, t: DateTime<Tz>) -> Self {
        Field::Time(key.into(), t.fixed_offset())
    }

    pub fn uint(key: impl Into<Key>, i: usize) -> Self {
        Field::Uint(key.into(), i)
    }

    pub fn uint32(key: impl Into<Key>, i: u32) -> Self {
        Field::Uint32(key.into(), i)
    }

    pub fn uint64(key: impl Into<Key>, i: u64) -> Self {
        Field::Uint64(key.into(), i)
    }

    /// User-defined field rendered by `f`.
    ///
    /// ```
    /// # use field_logger::{Buffer, Encoder, Field, JsonEncoder};
    /// let point = Field::func(|enc: &mut dyn Encoder| {
    ///     enc.encode_int32("x", 1);
    ///     enc.encode_int32("y", 2);
    /// });
    /// let mut buf = Buffer::new();
    /// point.encode(&mut JsonEncoder::new(&mut buf));
    /// assert_eq!(buf.as_bytes(), br#""x":1,"y":2"#);
    /// ```
    pub fn func<F>(f: F) -> Self
    where
        F: Fn(&mut dyn Encoder) + Send + Sync + 'static,
    {
        Field::Func(FieldFn(Arc::new(f)))
    }
}

impl From<Level> for Field {
    fn from(level: Level) -> Self {
        Field::Level(level)
    }
}

/// Builder-style attach methods shared by [`Entry`](crate::Entry) and
/// [`Options`](crate::Options).
///
/// Every method consumes the builder and hands it back with one more field,
/// in attachment order. Only [`with_field`](Fields::with_field) has to be
/// implemented.
pub trait Fields: Sized {
    fn with_field(self, field: Field) -> Self;

    fn with<I: IntoIterator<Item = Field>>(self, fields: I) -> Self {
        fields.into_iter().fold(self, Fields::with_field)
    }

    fn bool(self, key: impl Into<Key>, b: bool) -> Self {
        self.with_field(Field::bool(key, b))
    }

    fn bytes(self, key: impl Into<Key>, p: impl Into<Cow<'static, [u8]>>) -> Self {
        self.with_field(Field::bytes(key, p))
    }

    /// Attaches the location this method is called from.
    ///
    /// To report a location further up the stack, call this from a helper
    /// that is itself marked `#[track_caller]`: each marked frame passes the
    /// capture on to its own caller, so the helper frames are skipped.
    #[track_caller]
    fn caller(self) -> Self {
        self.with_field(Field::caller())
    }

    fn duration(self, key: impl Into<Key>, d: Duration) -> Self {
        self.with_field(Field::duration(key, d))
    }

    fn error<E: StdError + Send + Sync + 'static>(self, err: E) -> Self {
        self.with_field(Field::error(err))
    }

    /// Attaches an error that may be absent. An absent error renders as
    /// `null` in JSON and is left out of text output.
    fn opt_error<E: StdError + Send + Sync + 'static>(self, err: Option<E>) -> Self {
        self.with_field(Field::Error(err.map(|e| Arc::new(e) as ErrorValue)))
    }

    fn errorf(self, args: fmt::Arguments<'_>) -> Self {
        self.with_field(Field::errorf(args))
    }

    fn float32(self, key: impl Into<Key>, f: f32) -> Self {
        self.with_field(Field::float32(key, f))
    }

    fn float64(self, key: impl Into<Key>, f: f64) -> Self {
        self.with_field(Field::float64(key, f))
    }

    fn int(self, key: impl Into<Key>, i: isize) -> Self {
        self.with_field(Field::int(key, i))
    }

    fn int32(self, key: impl Into<Key>, i: i32) -> Self {
        self.with_field(Field::int32(key, i))
    }

    fn int64(self, key: impl Into<Key>, i: i64) -> Self {
        self.with_field(Field::int64(key, i))
    }

    fn name(self, name: impl Into<Cow<'static, str>>) -> Self {
        self.with_field(Field::name(name))
    }

    fn span(self) -> Self {
        self.with_field(Field::span())
    }

    fn string(self, key: impl Into<Key>, s: impl Into<Cow<'static, str>>) -> Self {
        self.with_field(Field::string(key, s))
    }

    /// Attaches the `Display` form of `v` as a string.
    fn display<T: fmt::Display + ?Sized>(self, key: impl Into<Key>, v: &T) -> Self {
        self.with_field(Field::string(key, v.to_string()))
    }

    fn stringf(self, key: impl Into<Key>, args: fmt::Arguments<'_>) -> Self {
        let s = match args.as_str() {
            Some(s) => Cow::Borrowed(s),
            None => Cow::Owned(args.to_string()),
        };
        self.with_field(Field::string(key, s))
    }

    fn time<Tz: chrono::TimeZone>(self, key: impl Into<Key>, t: DateTime<Tz>) -> Self {
        self.with_field(Field::time(key, t))
    }

    fn timestamp(self) -> Self {
        self.with_field(Field::Timestamp)
    }

    fn uint(self, key: impl Into<Key>, i: usize) -> Self {
        self.with_field(Field::uint(key, i))
    }

    fn uint32(self, key: impl Into<Key>, i: u32) -> Self {
        self.with_field(Field::uint32(key, i))
    }

    fn uint64(self, key: impl Into<Key>, i: u64) -> Self {
        self.with_field(Field::uint64(key, i))
    }
}
