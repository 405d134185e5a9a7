use super::parsers::{parse_duration_arg, parse_header, parse_timeout};
use super::test_support::parse_test_args;
use super::*;
use crate::error::{AppError, AppResult};
use std::time::Duration;

#[test]
fn parse_header_valid() -> AppResult<()> {
    let (key, value) = parse_header("Content-Type: application/json")?;
    if key != "Content-Type" {
        return Err(AppError::validation(format!("Unexpected key: {}", key)));
    }
    if value != "application/json" {
        return Err(AppError::validation(format!("Unexpected value: {}", value)));
    }
    Ok(())
}

#[test]
fn parse_header_rejects_missing_delimiter() -> AppResult<()> {
    if parse_header("MissingDelimiter").is_ok() {
        return Err(AppError::validation("Expected Err for missing ':'"));
    }
    Ok(())
}

#[test]
fn parse_header_rejects_extra_delimiter() -> AppResult<()> {
    if parse_header("Host:localhost:8080").is_ok() {
        return Err(AppError::validation("Expected Err for three parts"));
    }
    Ok(())
}

#[test]
fn parse_header_rejects_empty_name() -> AppResult<()> {
    if parse_header(" :value").is_ok() {
        return Err(AppError::validation("Expected Err for empty name"));
    }
    Ok(())
}

#[test]
fn parse_duration_compound_units() -> AppResult<()> {
    let cases = [
        ("10", Duration::from_secs(10)),
        ("100ms", Duration::from_millis(100)),
        ("10s", Duration::from_secs(10)),
        ("2m", Duration::from_secs(120)),
        ("1h30m", Duration::from_secs(5_400)),
        ("1m500ms", Duration::from_millis(60_500)),
        ("0", Duration::ZERO),
    ];
    for (input, expected) in cases {
        let parsed = parse_duration_arg(input)?;
        if parsed != expected {
            return Err(AppError::validation(format!(
                "{} parsed as {:?}, expected {:?}",
                input, parsed, expected
            )));
        }
    }
    Ok(())
}

#[test]
fn parse_duration_rejects_bad_input() -> AppResult<()> {
    for input in ["", "ms", "10x", "1h30", "-5s", "1.5s"] {
        if parse_duration_arg(input).is_ok() {
            return Err(AppError::validation(format!("Expected Err for '{}'", input)));
        }
    }
    Ok(())
}

#[test]
fn parse_timeout_rejects_zero() -> AppResult<()> {
    if parse_timeout("0s").is_ok() {
        return Err(AppError::validation("Expected Err for zero timeout"));
    }
    Ok(())
}

#[test]
fn request_rate_parses_fixed_point() -> AppResult<()> {
    let cases = [("5", 5_000), ("0.5", 500), ("12.25", 12_250), (".1", 100), ("3.", 3_000)];
    for (input, expected) in cases {
        let rate: RequestRate = input.parse()?;
        if rate.millis_per_sec() != expected {
            return Err(AppError::validation(format!(
                "{} parsed as {}, expected {}",
                input,
                rate.millis_per_sec(),
                expected
            )));
        }
    }
    Ok(())
}

#[test]
fn request_rate_rejects_non_positive_and_malformed() -> AppResult<()> {
    for input in ["0", "0.000", "-1", "abc", "1e3", ".", "0.0001", ""] {
        if input.parse::<RequestRate>().is_ok() {
            return Err(AppError::validation(format!("Expected Err for '{}'", input)));
        }
    }
    Ok(())
}

#[test]
fn request_rate_display_trims_fraction() -> AppResult<()> {
    let rate: RequestRate = "2.50".parse()?;
    if rate.to_string() != "2.5" {
        return Err(AppError::validation(format!("Unexpected display: {}", rate)));
    }
    let whole = RequestRate::per_second(7)?;
    if whole.to_string() != "7" {
        return Err(AppError::validation(format!("Unexpected display: {}", whole)));
    }
    Ok(())
}

#[test]
fn cli_parses_full_flag_set() -> AppResult<()> {
    let args = parse_test_args([
        "steadyload",
        "--rps",
        "20",
        "--address",
        "http://localhost:8080/health",
        "--authentication",
        "secret",
        "--headers",
        "X-One:1",
        "--headers",
        "X-Two:2",
        "--duration",
        "30s",
        "--timeout",
        "2s",
        "--max-in-flight",
        "64",
    ])?;
    let config = LoadConfig::try_from(args)?;

    if config.rate.millis_per_sec() != 20_000 {
        return Err(AppError::validation("Unexpected rate"));
    }
    if config.headers.len() != 2 {
        return Err(AppError::validation("Expected two headers"));
    }
    if config.auth_token.as_deref() != Some("secret") {
        return Err(AppError::validation("Unexpected auth token"));
    }
    if config.run_duration != Some(Duration::from_secs(30)) {
        return Err(AppError::validation("Unexpected run duration"));
    }
    if config.request_timeout != Some(Duration::from_secs(2)) {
        return Err(AppError::validation("Unexpected timeout"));
    }
    if config.max_in_flight.map(PositiveUsize::get) != Some(64) {
        return Err(AppError::validation("Unexpected max in flight"));
    }
    Ok(())
}

#[test]
fn cli_rejects_malformed_header() -> AppResult<()> {
    let parsed = parse_test_args([
        "steadyload",
        "--rps",
        "1",
        "--address",
        "http://localhost",
        "--headers",
        "broken",
    ]);
    if parsed.is_ok() {
        return Err(AppError::validation("Expected Err for malformed header"));
    }
    Ok(())
}

#[test]
fn zero_duration_means_unbounded() -> AppResult<()> {
    let args = parse_test_args([
        "steadyload",
        "--rps",
        "1",
        "--address",
        "http://localhost",
        "--duration",
        "0",
    ])?;
    let config = LoadConfig::try_from(args)?;
    if config.run_duration.is_some() {
        return Err(AppError::validation("Expected unbounded run"));
    }
    Ok(())
}

#[test]
fn missing_required_values_are_rejected() -> AppResult<()> {
    let no_rate = parse_test_args(["steadyload", "--address", "http://localhost"])?;
    if LoadConfig::try_from(no_rate).is_ok() {
        return Err(AppError::validation("Expected Err without rps"));
    }
    let no_address = parse_test_args(["steadyload", "--rps", "1"])?;
    if LoadConfig::try_from(no_address).is_ok() {
        return Err(AppError::validation("Expected Err without address"));
    }
    let blank_address = parse_test_args(["steadyload", "--rps", "1", "--address", "  "])?;
    if LoadConfig::try_from(blank_address).is_ok() {
        return Err(AppError::validation("Expected Err for blank address"));
    }
    Ok(())
}

#[test]
fn empty_authentication_is_ignored() -> AppResult<()> {
    let args = parse_test_args([
        "steadyload",
        "--rps",
        "1",
        "--address",
        "http://localhost",
        "--authentication",
        "",
    ])?;
    let config = LoadConfig::try_from(args)?;
    if config.auth_token.is_some() {
        return Err(AppError::validation("Expected no auth token"));
    }
    Ok(())
}
