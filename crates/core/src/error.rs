use crate::types::DbId;

#[derive(Debug, thiserror::Error)]
pub enum CoreError {
    #[error("Entity not found: {entity} with id {id}")]
    NotFound { entity: &'static str, id: DbId },

    /// An input string (time of day, coordinate) could not be parsed.
    #[error("Parse failed: {0}")]
    Parse(String),

    #[error("Validation failed: {0}")]
    Validation(String),

    #[error("Unauthorized: {0}")]
    Unauthorized(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

/// An upstream provider could not produce a usable schedule or feed.
///
/// Covers network errors, timeouts, non-success statuses and malformed
/// payloads alike. Callers recover from it by falling back; it is never
/// surfaced to HTTP clients.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("{source_name} failed: {reason}")]
pub struct SourceFailure {
    /// Short provider name, e.g. `"aladhan"`.
    pub source_name: &'static str,
    pub reason: String,
}

impl SourceFailure {
    pub fn new(source_name: &'static str, reason: impl Into<String>) -> Self {
        Self {
            source_name,
            reason: reason.into(),
        }
    }
}
