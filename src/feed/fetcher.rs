use std::time::Duration;
use thiserror::Error;

/// Default connect and read timeout for feed fetches.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_millis(15_000);

/// Errors that can occur while fetching one feed document.
///
/// Every variant is isolated to the source being fetched; the pipeline
/// converts them to diagnostic log lines and never propagates them further.
#[derive(Debug, Error)]
pub enum FetchError {
    /// Network-level error: DNS, connection, TLS, malformed URL, or a failure
    /// while reading the body.
    #[error("Request failed: {0}")]
    Network(#[from] reqwest::Error),
    /// Response arrived with a status other than 200 OK.
    #[error("HTTP {status} {reason} for {url}")]
    HttpStatus {
        status: u16,
        reason: String,
        url: String,
    },
    /// Request exceeded the read timeout.
    #[error("Request timed out")]
    Timeout,
}

/// Builds the shared HTTP client used for all feed fetches.
///
/// The connect timeout bounds the TCP/TLS handshake; the read timeout bounds
/// gaps between body chunks. [`fetch_text`] additionally guards the whole
/// request with the read timeout, so a slowly trickling response cannot hold
/// a task open indefinitely.
pub fn build_client(connect: Duration, read: Duration) -> Result<reqwest::Client, FetchError> {
    let client = reqwest::Client::builder()
        .connect_timeout(connect)
        .read_timeout(read)
        .build()?;
    Ok(client)
}

/// Fetches one URL and decodes the response body as text.
///
/// A single GET, no retries — retry policy, if any, belongs to the caller.
/// The body is decoded using the `Content-Type` header's `charset` parameter
/// when present and resolvable, falling back to UTF-8 (this is exactly what
/// `reqwest::Response::text()` implements).
///
/// # Errors
///
/// - [`FetchError::Timeout`] when the request outlives `timeout`
/// - [`FetchError::HttpStatus`] for any status other than 200, carrying the
///   status code, canonical reason text, and the URL
/// - [`FetchError::Network`] for malformed URLs and connection or I/O failures
pub async fn fetch_text(
    client: &reqwest::Client,
    url: &str,
    timeout: Duration,
) -> Result<String, FetchError> {
    let response = tokio::time::timeout(timeout, client.get(url).send())
        .await
        .map_err(|_| FetchError::Timeout)??;

    let status = response.status();
    if status != reqwest::StatusCode::OK {
        return Err(FetchError::HttpStatus {
            status: status.as_u16(),
            reason: status.canonical_reason().unwrap_or("Unknown").to_string(),
            url: url.to_string(),
        });
    }

    let text = tokio::time::timeout(timeout, response.text())
        .await
        .map_err(|_| FetchError::Timeout)??;
    Ok(text)
}
