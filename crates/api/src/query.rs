//! Shared query parameter types for API handlers.

use serde::Deserialize;

/// `?active_only=` for content lists. Defaults to `true`.
#[derive(Debug, Deserialize)]
pub struct ActiveOnlyParams {
    #[serde(default = "default_active_only")]
    pub active_only: bool,
}

fn default_active_only() -> bool {
    true
}
