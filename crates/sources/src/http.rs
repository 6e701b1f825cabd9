//! Shared HTTP client helpers.

use std::time::Duration;

use crate::error::SourceError;

/// Default per-request timeout for upstream calls.
pub const DEFAULT_UPSTREAM_TIMEOUT: Duration = Duration::from_secs(10);

/// Build the client shared by every adapter.
pub fn build_client(timeout: Duration) -> Result<reqwest::Client, reqwest::Error> {
    reqwest::Client::builder()
        .timeout(timeout)
        .user_agent(concat!("masjid-display/", env!("CARGO_PKG_VERSION")))
        .build()
}

/// Return the response unchanged on 2xx, otherwise a
/// [`SourceError::Status`] carrying the status and body text.
pub async fn ensure_success(response: reqwest::Response) -> Result<reqwest::Response, SourceError> {
    let status = response.status();
    if !status.is_success() {
        let body = response
            .text()
            .await
            .unwrap_or_else(|_| "<unreadable body>".to_string());
        return Err(SourceError::Status {
            status: status.as_u16(),
            body,
        });
    }
    Ok(response)
}

/// Send a prepared request and read the 2xx body as text.
pub async fn fetch_text(request: reqwest::RequestBuilder) -> Result<String, SourceError> {
    let response = request.send().await?;
    // Path only: query strings may carry API keys.
    tracing::debug!(
        host = response.url().host_str().unwrap_or_default(),
        path = response.url().path(),
        status = response.status().as_u16(),
        "Upstream responded",
    );
    let response = ensure_success(response).await?;
    Ok(response.text().await?)
}

/// Join a base URL and a path without doubling the slash.
pub fn join_url(base: &str, path: &str) -> String {
    format!("{}/{}", base.trim_end_matches('/'), path.trim_start_matches('/'))
}
