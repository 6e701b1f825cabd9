use masjid_core::error::{CoreError, SourceFailure};

/// Errors from talking to an upstream provider.
#[derive(Debug, thiserror::Error)]
pub enum SourceError {
    /// The HTTP request itself failed (network, DNS, TLS, timeout).
    #[error("HTTP request failed: {0}")]
    Request(#[from] reqwest::Error),

    /// The provider returned a non-2xx status code.
    #[error("upstream returned HTTP {status}: {body}")]
    Status { status: u16, body: String },

    /// The provider answered 2xx but reported an error in its envelope.
    #[error("upstream rejected the request: {0}")]
    Rejected(String),

    #[error("malformed JSON body: {0}")]
    Json(#[from] serde_json::Error),

    #[error("malformed XML body: {0}")]
    Xml(#[from] quick_xml::DeError),

    /// A field was missing or did not parse into the domain type.
    #[error("{0}")]
    Payload(#[from] CoreError),

    #[error("no API key configured")]
    MissingApiKey,
}

impl SourceError {
    /// Collapse into the core failure type that callers fall back on.
    pub fn into_failure(self, source_name: &'static str) -> SourceFailure {
        SourceFailure::new(source_name, self.to_string())
    }
}
