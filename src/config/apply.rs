use clap::ArgMatches;
use clap::parser::ValueSource;

use crate::args::{LoadArgs, PositiveUsize, parse_header};
use crate::error::{AppError, AppResult, ConfigError, ValidationError};

use super::types::ConfigFile;

/// Applies configuration values to CLI arguments. Values given on the
/// command line (or via env) take precedence over the file.
///
/// # Errors
///
/// Returns an error when a config value is invalid.
pub fn apply_config(
    args: &mut LoadArgs,
    matches: &ArgMatches,
    config: &ConfigFile,
) -> AppResult<()> {
    if !is_set(matches, "rps")
        && let Some(rps) = config.rps.as_ref()
    {
        args.rps = Some(rps.to_rate().map_err(|err| invalid_field("rps", err))?);
    }

    if !is_set(matches, "address")
        && let Some(address) = config.address.clone()
    {
        args.address = Some(address);
    }

    if !is_set(matches, "authentication")
        && let Some(token) = config.authentication.clone()
    {
        args.authentication = Some(token);
    }

    if !is_set(matches, "headers")
        && let Some(headers) = config.headers.as_ref()
    {
        let mut parsed = Vec::with_capacity(headers.len());
        for header in headers {
            parsed.push(parse_header(header).map_err(|err| invalid_field("headers", err))?);
        }
        args.headers = parsed;
    }

    if !is_set(matches, "duration")
        && let Some(duration) = config.duration.as_ref()
    {
        args.duration = Some(
            duration
                .to_duration()
                .map_err(|err| invalid_field("duration", err))?,
        );
    }

    if !is_set(matches, "timeout")
        && let Some(timeout) = config.timeout.as_ref()
    {
        let timeout = timeout
            .to_duration()
            .map_err(|err| invalid_field("timeout", err))?;
        if timeout.is_zero() {
            return Err(invalid_field("timeout", ValidationError::DurationZero));
        }
        args.timeout = Some(timeout);
    }

    if !is_set(matches, "max_in_flight")
        && let Some(max_in_flight) = config.max_in_flight
    {
        args.max_in_flight = Some(
            PositiveUsize::try_from(max_in_flight)
                .map_err(|err| invalid_field("max_in_flight", err))?,
        );
    }

    Ok(())
}

fn is_set(matches: &ArgMatches, name: &str) -> bool {
    matches!(
        matches.value_source(name),
        Some(ValueSource::CommandLine | ValueSource::EnvVariable)
    )
}

fn invalid_field(field: &'static str, source: ValidationError) -> AppError {
    AppError::config(ConfigError::InvalidField { field, source })
}

