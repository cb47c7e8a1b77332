use std::env;
use std::process::ExitCode;
use std::time::Duration;

use field_logger::{Fields, Format, LoggerConfig, Options};

/// Writes a few sample records to stderr.
///
/// Usage: `field_logger [json|text] [level]`
fn main() -> ExitCode {
    let mut config = LoggerConfig {
        name: Some("demo".to_owned()),
        ..LoggerConfig::default()
    };
    let mut args = env::args().skip(1);
    if let Some(format) = args.next() {
        config.format = if format == "json" { Format::Json } else { Format::Text };
    }
    if let Some(level) = args.next() {
        match level.parse() {
            Ok(level) => config.level = level,
            Err(err) => {
                eprintln!("{err}");
                return ExitCode::FAILURE;
            }
        }
    }

    let logger = Options::from_config(&config).logger();
    let results = [
        logger
            .info()
            .string("service", "auth")
            .int("retries", 3)
            .message("started"),
        logger
            .debug()
            .duration("elapsed", Duration::from_millis(1250))
            .bytes("data", b"\x01\x02".as_slice())
            .message("handshake"),
        logger
            .warn()
            .errorf(format_args!("connection reset by {}", "10.0.0.7"))
            .message("retrying"),
    ];
    if results.iter().any(Result::is_err) {
        return ExitCode::FAILURE;
    }
    ExitCode::SUCCESS
}
