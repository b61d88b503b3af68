//! Client error types

use shared::ValidationErrors;
use shared::models::ComplaintStatus;
use thiserror::Error;

/// Client error type
#[derive(Debug, Error)]
pub enum ClientError {
    /// No credential is stored locally; no request was sent
    #[error("Not authenticated")]
    NotAuthenticated,

    /// HTTP request could not complete
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// Credential rejected by the backend
    #[error("Unauthorized: {0}")]
    Unauthorized(String),

    /// Permission denied
    #[error("Permission denied: {0}")]
    Forbidden(String),

    /// Resource not found
    #[error("Not found: {0}")]
    NotFound(String),

    /// Validation error, from the backend or a local precondition
    #[error("Validation error: {0}")]
    Validation(ValidationErrors),

    /// Response body did not match the expected schema
    #[error("Invalid response: {0}")]
    InvalidResponse(String),

    /// Backend failure (5xx or unexpected status)
    #[error("Internal error: {0}")]
    Internal(String),

    /// Serialization error
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// Local storage error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// The status PATCH succeeded but appending the timeline entry failed
    #[error("Status changed to {status}, but the update message was not saved: {source}")]
    TimelineNotRecorded {
        status: ComplaintStatus,
        #[source]
        source: Box<ClientError>,
    },
}

/// Result type for client operations
pub type ClientResult<T> = Result<T, ClientError>;

/// Failure classes as presented to the user
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// Nothing to show until the user signs in
    AuthenticationAbsent,
    /// Retryable; local state is unchanged
    Network,
    /// Backend or local validation message, shown verbatim
    Validation,
    /// Entity missing or not visible to this user
    NotFound,
    /// Unexpected backend or local failure
    Server,
}

impl ClientError {
    /// Local precondition failure carrying a single message.
    pub fn validation(message: impl Into<String>) -> Self {
        ClientError::Validation(ValidationErrors::message(message))
    }

    pub fn kind(&self) -> ErrorKind {
        match self {
            ClientError::NotAuthenticated => ErrorKind::AuthenticationAbsent,
            ClientError::Http(_) => ErrorKind::Network,
            ClientError::Validation(_) => ErrorKind::Validation,
            ClientError::Unauthorized(_) | ClientError::Forbidden(_) | ClientError::NotFound(_) => {
                ErrorKind::NotFound
            }
            ClientError::InvalidResponse(_)
            | ClientError::Internal(_)
            | ClientError::Serialization(_)
            | ClientError::Io(_) => ErrorKind::Server,
            ClientError::TimelineNotRecorded { source, .. } => source.kind(),
        }
    }

    /// Message suitable for a notice shown to the user.
    pub fn user_notice(&self) -> String {
        match self {
            ClientError::NotAuthenticated => "You are not logged in.".to_string(),
            ClientError::Http(_) => "Failed to connect to the server.".to_string(),
            ClientError::Validation(errors) => errors.to_string(),
            ClientError::Unauthorized(_) | ClientError::Forbidden(_) | ClientError::NotFound(_) => {
                "Not found.".to_string()
            }
            ClientError::InvalidResponse(_) | ClientError::Internal(_) => {
                "Unable to load data from the server.".to_string()
            }
            ClientError::Serialization(e) => format!("Unexpected data: {e}"),
            ClientError::Io(e) => format!("Local storage error: {e}"),
            ClientError::TimelineNotRecorded { status, source } => format!(
                "Status changed to {}, but the update message was not saved: {}",
                status.label(),
                source.user_notice()
            ),
        }
    }

    /// Backend validation details, if this is a validation failure.
    pub fn validation_errors(&self) -> Option<&ValidationErrors> {
        match self {
            ClientError::Validation(errors) => Some(errors),
            ClientError::TimelineNotRecorded { source, .. } => source.validation_errors(),
            _ => None,
        }
    }
}
