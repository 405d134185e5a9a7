use std::time::Duration;

use crate::error::ValidationError;

use super::types::{PositiveUsize, RequestRate};

/// Splits a `Name:Value` header. Exactly one `:` is accepted.
pub(crate) fn parse_header(s: &str) -> Result<(String, String), ValidationError> {
    let mut parts = s.split(':');
    let (Some(name), Some(value), None) = (parts.next(), parts.next(), parts.next()) else {
        return Err(ValidationError::InvalidHeaderFormat {
            value: s.to_owned(),
        });
    };
    let name = name.trim();
    if name.is_empty() {
        return Err(ValidationError::EmptyHeaderName {
            value: s.to_owned(),
        });
    }
    Ok((name.to_owned(), value.trim().to_owned()))
}

pub(super) fn parse_rate(s: &str) -> Result<RequestRate, ValidationError> {
    s.parse::<RequestRate>()
}

pub(super) fn parse_positive_usize(s: &str) -> Result<PositiveUsize, ValidationError> {
    s.parse::<PositiveUsize>()
}

/// Parses a duration such as `90`, `100ms`, `10s`, or `1h30m`.
///
/// A bare number is read as seconds. Zero is accepted.
pub(crate) fn parse_duration_arg(s: &str) -> Result<Duration, ValidationError> {
    let value = s.trim();
    if value.is_empty() {
        return Err(ValidationError::DurationEmpty);
    }

    if value.bytes().all(|byte| byte.is_ascii_digit()) {
        let secs = parse_duration_number(value, value)?;
        return Ok(Duration::from_secs(secs));
    }

    let mut total = Duration::ZERO;
    let mut rest = value;
    while !rest.is_empty() {
        let digits_len = rest
            .find(|ch: char| !ch.is_ascii_digit())
            .unwrap_or(rest.len());
        if digits_len == 0 {
            return Err(ValidationError::InvalidDurationFormat {
                value: value.to_owned(),
            });
        }
        let (num_part, tail) = rest.split_at(digits_len);
        let number = parse_duration_number(num_part, value)?;

        let unit_len = tail
            .find(|ch: char| ch.is_ascii_digit())
            .unwrap_or(tail.len());
        let (unit, remainder) = tail.split_at(unit_len);
        let component = duration_from_unit(number, unit)?;
        total = total
            .checked_add(component)
            .ok_or(ValidationError::DurationOverflow)?;
        rest = remainder;
    }

    Ok(total)
}

/// Like [`parse_duration_arg`], but zero is rejected.
pub(crate) fn parse_timeout(s: &str) -> Result<Duration, ValidationError> {
    let duration = parse_duration_arg(s)?;
    if duration.is_zero() {
        return Err(ValidationError::DurationZero);
    }
    Ok(duration)
}

fn parse_duration_number(digits: &str, value: &str) -> Result<u64, ValidationError> {
    digits
        .parse()
        .map_err(|err| ValidationError::InvalidDurationNumber {
            value: value.to_owned(),
            source: err,
        })
}

fn duration_from_unit(number: u64, unit: &str) -> Result<Duration, ValidationError> {
    match unit {
        "ms" => Ok(Duration::from_millis(number)),
        "s" => Ok(Duration::from_secs(number)),
        "m" => number
            .checked_mul(60)
            .map(Duration::from_secs)
            .ok_or(ValidationError::DurationOverflow),
        "h" => number
            .checked_mul(60)
            .and_then(|minutes| minutes.checked_mul(60))
            .map(Duration::from_secs)
            .ok_or(ValidationError::DurationOverflow),
        _ => Err(ValidationError::InvalidDurationUnit {
            unit: unit.to_owned(),
        }),
    }
}
