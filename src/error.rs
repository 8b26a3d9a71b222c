//! Portal Error Handling
//!
//! Every handler failure funnels through `PortalError`, which renders the
//! `{"error": "..."}` body the browser client expects.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;
use tracing::error;

use crate::chat::ChatError;
use crate::identify::IdentifyError;

#[derive(Debug, Error)]
pub enum PortalError {
    #[error("No image uploaded")]
    NoImage,

    #[error("{0}")]
    BadRequest(&'static str),

    #[error("Invalid upload: {0}")]
    InvalidUpload(String),

    #[error("Image exceeds the {limit} byte upload limit")]
    PayloadTooLarge { limit: usize },

    #[error("{0} not found")]
    NotFound(&'static str),

    #[error("Too many requests")]
    RateLimited,

    /// Upstream or internal failure. The cause is logged, the client only sees "Server error".
    #[error("Server error")]
    Upstream(#[source] anyhow::Error),
}

impl PortalError {
    pub fn status(&self) -> StatusCode {
        match self {
            PortalError::NoImage | PortalError::BadRequest(_) | PortalError::InvalidUpload(_) => {
                StatusCode::BAD_REQUEST
            }
            PortalError::PayloadTooLarge { .. } => StatusCode::PAYLOAD_TOO_LARGE,
            PortalError::NotFound(_) => StatusCode::NOT_FOUND,
            PortalError::RateLimited => StatusCode::TOO_MANY_REQUESTS,
            PortalError::Upstream(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for PortalError {
    fn into_response(self) -> Response {
        if let PortalError::Upstream(ref cause) = self {
            error!("Upstream failure: {:#}", cause);
        }
        let status = self.status();
        (status, Json(json!({ "error": self.to_string() }))).into_response()
    }
}

impl From<IdentifyError> for PortalError {
    fn from(err: IdentifyError) -> Self {
        PortalError::Upstream(err.into())
    }
}

impl From<ChatError> for PortalError {
    fn from(err: ChatError) -> Self {
        PortalError::Upstream(err.into())
    }
}

impl From<anyhow::Error> for PortalError {
    fn from(err: anyhow::Error) -> Self {
        PortalError::Upstream(err)
    }
}
