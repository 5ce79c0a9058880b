use chimpreport_core::{ConfigError, EndpointError, ValidationError};
use serde_json::{json, Value as JsonValue};

use crate::http::HttpError;

/// Why an invocation failed. Nothing is retried and no partial record is returned.
#[derive(Debug, thiserror::Error)]
pub enum OperationError {
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error(transparent)]
    Validation(#[from] ValidationError),
    #[error("transport error: {0}")]
    Transport(#[from] HttpError),
    #[error("remote returned HTTP {status}")]
    Remote { status: u16, body: JsonValue },
}

impl From<EndpointError> for OperationError {
    fn from(e: EndpointError) -> Self {
        match e {
            EndpointError::Config(e) => Self::Config(e),
            EndpointError::Validation(e) => Self::Validation(e),
        }
    }
}

impl OperationError {
    /// The value reported to the host as the failure.
    pub fn failure_payload(&self) -> JsonValue {
        match self {
            Self::Config(e) => JsonValue::String(e.to_string()),
            Self::Validation(e) => JsonValue::String(e.to_string()),
            Self::Transport(e) => json!({"type": "network", "message": e.to_string()}),
            Self::Remote { body, .. } => body.clone(),
        }
    }

    /// Failed before any request was sent.
    pub fn is_local(&self) -> bool {
        matches!(self, Self::Config(_) | Self::Validation(_))
    }
}
