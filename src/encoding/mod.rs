//! The two wire formats.
//!
//! * [`JsonEncoder`]: `{"key":value,...}` maps, one per line.
//! * [`TextEncoder`]: space-separated `key=value` tokens for humans.

pub mod json;
pub mod text;

pub use json::JsonEncoder;
pub use text::TextEncoder;
