use reqwest::{
    Client, Url,
    header::{HeaderMap, HeaderName, HeaderValue},
};
use tracing::debug;

use crate::args::{DEFAULT_USER_AGENT, LoadConfig};
use crate::error::HttpError;

use super::execution::HttpExecutor;

/// Header carrying `--authentication` as `bearer <token>`.
pub const AUTHENTICATION_HEADER: &str = "Authentication";

/// Builds the HTTP client and the GET template shared by every request.
///
/// # Errors
///
/// Returns an error when the address, a header, or the client is invalid.
pub fn build_executor(config: &LoadConfig) -> Result<HttpExecutor, HttpError> {
    let url = parse_address(&config.address)?;
    let headers = build_headers(config)?;

    let mut client_builder = Client::builder().user_agent(DEFAULT_USER_AGENT);
    if let Some(timeout) = config.request_timeout {
        client_builder = client_builder.timeout(timeout);
    }
    let client = client_builder
        .build()
        .map_err(|err| HttpError::BuildClientFailed { source: err })?;

    let request = client
        .get(url)
        .headers(headers)
        .build()
        .map_err(|err| HttpError::BuildRequestFailed { source: err })?;

    debug!(
        "Prepared GET {} with {} header(s)",
        request.url(),
        request.headers().len()
    );
    Ok(HttpExecutor::new(client, request))
}

pub(super) fn parse_address(address: &str) -> Result<Url, HttpError> {
    let url = Url::parse(address).map_err(|err| HttpError::InvalidUrl {
        url: address.to_owned(),
        source: err,
    })?;
    match url.scheme() {
        "http" | "https" => Ok(url),
        other => Err(HttpError::UnsupportedScheme {
            scheme: other.to_owned(),
        }),
    }
}

pub(super) fn build_headers(config: &LoadConfig) -> Result<HeaderMap, HttpError> {
    let mut headers = HeaderMap::with_capacity(config.headers.len().saturating_add(1));
    for (name, value) in &config.headers {
        insert_header(&mut headers, name, value)?;
    }
    if let Some(token) = config.auth_token.as_deref() {
        insert_header(
            &mut headers,
            AUTHENTICATION_HEADER,
            &format!("bearer {}", token),
        )?;
    }
    Ok(headers)
}

fn insert_header(headers: &mut HeaderMap, name: &str, value: &str) -> Result<(), HttpError> {
    let header_name =
        HeaderName::from_bytes(name.as_bytes()).map_err(|err| HttpError::InvalidHeaderName {
            name: name.to_owned(),
            source: err,
        })?;
    let header_value = HeaderValue::from_str(value).map_err(|err| HttpError::InvalidHeaderValue {
        name: name.to_owned(),
        source: err,
    })?;
    headers.insert(header_name, header_value);
    Ok(())
}
