use chrono::{FixedOffset, TimeZone};
use field_logger::{Buffer, Encoder, Field, JsonEncoder, Level, TextEncoder};
use std::fmt;
use std::time::Duration;

#[derive(Debug)]
struct Refused(&'static str);

impl fmt::Display for Refused {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "refused: {}", self.0)
    }
}

impl std::error::Error for Refused {}

fn every_kind() -> Vec<Field> {
    let tz = FixedOffset::east_opt(2 * 3600).unwrap();
    vec![
        Field::Level(Level::WARN),
        Field::bool("ok", false),
        Field::bytes("data", vec![7u8, 8, 9]),
        Field::duration("took", Duration::from_millis(2500)),
        Field::error(Refused("quota")),
        Field::float32("ratio", 0.5),
        Field::float64("pi", 3.14159),
        Field::int("i", -1),
        Field::int32("i32", -32),
        Field::int64("i64", -64),
        Field::name("db"),
        Field::string("query", "select \"x\"\n"),
        Field::time("at", tz.with_ymd_and_hms(2024, 5, 6, 7, 8, 9).unwrap()),
        Field::uint("u", 1),
        Field::uint32("u32", 32),
        Field::uint64("u64", 64),
        Field::message("done"),
    ]
}

fn render_json(fields: &[Field]) -> String {
    let mut buf = Buffer::new();
    buf.append_byte(b'{');
    let mut enc = JsonEncoder::new(&mut buf);
    for f in fields {
        f.encode(&mut enc);
    }
    buf.append_byte(b'}');
    buf.to_string_lossy().into_owned()
}

fn render_text(fields: &[Field]) -> String {
    let mut buf = Buffer::new();
    let mut enc = TextEncoder::new(&mut buf);
    for f in fields {
        f.encode(&mut enc);
    }
    buf.to_string_lossy().into_owned()
}

#[test]
fn test_json_every_kind() {
    let out = render_json(&every_kind());
    assert_eq!(
        out,
        concat!(
            r#"{"level":"warn","ok":false,"data":"789","took":2.5,"error":"refused: quota","#,
            r#""ratio":0.5,"pi":3.14159,"i":-1,"i32":-32,"i64":-64,"log":"db","#,
            r#""query":"select \"x\"\n","at":"2024-05-06T07:08:09+02:00","#,
            r#""u":1,"u32":32,"u64":64,"message":"done"}"#
        )
    );
}

#[test]
fn test_json_output_parses() {
    let out = render_json(&every_kind());
    let value: serde_json::Value = serde_json::from_str(&out).expect("Output should be valid JSON");
    assert_eq!(value["query"], "select \"x\"\n");
    assert_eq!(value["u64"], 64);
    assert_eq!(value["took"], 2.5);
}

#[test]
fn test_text_every_kind() {
    let out = render_text(&every_kind());
    assert_eq!(
        out,
        concat!(
            "level=warn ok=false data=789 took=2.5s error=refused: quota ratio=0.5 pi=3.14159 ",
            "i=-1 i32=-32 i64=-64 log=db query=select \"x\"\\n at=2024-05-06T07:08:09+02:00 ",
            "u=1 u32=32 u64=64 message=done"
        )
    );
}

#[test]
fn test_encoding_is_idempotent() {
    let fields = every_kind();
    assert_eq!(render_json(&fields), render_json(&fields));
    assert_eq!(render_text(&fields), render_text(&fields));
}

#[test]
fn test_nil_error() {
    let fields = [Field::Error(None)];
    assert_eq!(render_json(&fields), r#"{"error":null}"#);
    assert_eq!(render_text(&fields), "");
}

#[test]
fn test_empty_bytes() {
    let fields = [Field::string("k", "v"), Field::bytes("data", Vec::new())];
    assert_eq!(render_json(&fields), r#"{"k":"v","data":null}"#);
    assert_eq!(render_text(&fields), "k=v");
}

#[test]
fn test_invalid_level_label() {
    let fields = [Field::Level(Level::from_raw(9))];
    assert_eq!(render_json(&fields), r#"{"level":"invalid (9)"}"#);
    assert_eq!(render_text(&fields), "level=invalid (9)");
}

#[test]
fn test_caller_location() {
    let line = line!() + 1;
    let fields = [Field::caller()];
    let out = render_text(&fields);
    assert!(
        out.starts_with("caller=") && out.ends_with(&format!("encoder_tests.rs:{line}")),
        "Unexpected caller output: {out}"
    );
    assert_eq!(render_text(&[Field::Caller(None)]), "");
}

#[test]
fn test_span_and_timestamp_are_encoded_late() {
    let fields = [Field::span(), Field::Timestamp];
    let out = render_json(&fields);
    let value: serde_json::Value = serde_json::from_str(&out).unwrap();
    assert!(value["span"].as_f64().unwrap() >= 0.0);
    let time = value["time"].as_str().unwrap();
    assert!(
        chrono::DateTime::parse_from_rfc3339(time).is_ok(),
        "Timestamp should be RFC 3339: {time}"
    );
}

#[test]
fn test_custom_field() {
    let fields = [Field::func(|enc: &mut dyn Encoder| {
        enc.encode_str("user", "ada");
        enc.encode_bool("admin", true);
    })];
    assert_eq!(render_json(&fields), r#"{"user":"ada","admin":true}"#);
    assert_eq!(render_text(&fields), "user=ada admin=true");
}

#[test]
fn test_float_widths_render_shortest() {
    let fields = [Field::float32("f32", 0.1), Field::float64("f64", 0.1), Field::float64("big", 1e21)];
    assert_eq!(
        render_json(&fields),
        r#"{"f32":0.1,"f64":0.1,"big":1000000000000000000000}"#
    );
}

#[test]
fn test_caller_is_formatted_once() {
    let field = Field::caller();
    let Field::Caller(Some(text)) = &field else {
        panic!("Caller location should be captured");
    };
    assert!(text.contains("encoder_tests.rs:"), "Unexpected caller text: {text}");

    let first = render_json(std::slice::from_ref(&field));
    assert_eq!(first, render_json(std::slice::from_ref(&field)));
    assert_eq!(first, format!("{{\"caller\":\"{text}\"}}"));
}

#[track_caller]
fn audited(action: &'static str) -> Vec<Field> {
    vec![Field::string("action", action), Field::caller()]
}

#[test]
fn test_track_caller_helpers_skip_their_frame() {
    let line = line!() + 1;
    let fields = audited("delete");
    let out = render_text(&fields);
    assert!(
        out.ends_with(&format!("encoder_tests.rs:{line}")),
        "Helper frame should be skipped: {out}"
    );
}
