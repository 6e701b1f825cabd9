//! Shared response bodies for API handlers.

use serde::Serialize;

/// `{ "success": true, "message": ... }` acknowledgement body.
#[derive(Debug, Serialize)]
pub struct SuccessResponse {
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<&'static str>,
}

impl SuccessResponse {
    pub fn ok() -> Self {
        Self {
            success: true,
            message: None,
        }
    }

    pub fn with_message(message: &'static str) -> Self {
        Self {
            success: true,
            message: Some(message),
        }
    }
}

/// Standard `{ "data": T }` response envelope.
#[derive(Debug, Serialize)]
pub struct DataResponse<T: Serialize> {
    pub data: T,
}
