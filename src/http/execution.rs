use async_trait::async_trait;
use futures_util::StreamExt;
use reqwest::{Client, Request, StatusCode};
use tokio::time::Instant;
use tracing::debug;

use crate::metrics::Outcome;

/// Failure category for connection, DNS, and body-read errors.
pub const REQUEST_ERROR_CATEGORY: &str = "request error";
/// Failure category for requests exceeding `--timeout`.
pub const TIMEOUT_CATEGORY: &str = "timeout";

/// Performs one request attempt and classifies it. Implementations are
/// shared across concurrently running tasks.
#[async_trait]
pub trait RequestExecutor: Send + Sync + 'static {
    async fn execute(&self) -> Outcome;
}

/// Issues the prepared GET through a pooled `reqwest` client.
#[derive(Debug)]
pub struct HttpExecutor {
    client: Client,
    request: Request,
}

impl HttpExecutor {
    pub(super) const fn new(client: Client, request: Request) -> Self {
        Self { client, request }
    }

    #[must_use]
    pub const fn request(&self) -> &Request {
        &self.request
    }
}

#[async_trait]
impl RequestExecutor for HttpExecutor {
    async fn execute(&self) -> Outcome {
        let Some(request) = self.request.try_clone() else {
            return Outcome::failure(REQUEST_ERROR_CATEGORY);
        };

        let start = Instant::now();
        let response = match self.client.execute(request).await {
            Ok(response) => response,
            Err(err) => return transport_failure(&err),
        };
        let status = response.status();
        let drained = drain_response_body(response).await;
        let elapsed = start.elapsed();

        if let Err(err) = drained {
            return transport_failure(&err);
        }
        if status != StatusCode::OK {
            debug!("Status code {}", status.as_u16());
            return Outcome::failure(status.as_u16().to_string());
        }
        Outcome::success(elapsed)
    }
}

fn transport_failure(err: &reqwest::Error) -> Outcome {
    debug!("Request failed: {}", err);
    if err.is_timeout() {
        Outcome::failure(TIMEOUT_CATEGORY)
    } else {
        Outcome::failure(REQUEST_ERROR_CATEGORY)
    }
}

/// Reads the body to the end so the connection can go back to the pool.
async fn drain_response_body(response: reqwest::Response) -> Result<u64, reqwest::Error> {
    let mut stream = response.bytes_stream();
    let mut total_bytes: u64 = 0;
    while let Some(chunk) = stream.next().await {
        let bytes = chunk?;
        total_bytes = total_bytes.saturating_add(u64::try_from(bytes.len()).unwrap_or(u64::MAX));
    }
    Ok(total_bytes)
}
