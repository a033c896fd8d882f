use actix_web::{HttpResponse, ResponseError, http::StatusCode};
use derive_more::{Display, Error};
use serde_json::json;

/// Error taxonomy shared by the ledgers, the store and the HTTP layer.
///
/// Every core operation returns one of these instead of swallowing the
/// failure; the HTTP layer maps them to a status code and the usual
/// `{"message": ...}` body.
#[derive(Debug, Display, Error)]
pub enum HrError {
    #[display(fmt = "{}", message)]
    NotFound { message: String },

    #[display(fmt = "{}", message)]
    InvalidState { message: String },

    #[display(fmt = "{}", message)]
    PreconditionFailed { message: String },

    #[display(fmt = "{}", message)]
    Validation { message: String },

    #[display(fmt = "{}", message)]
    Storage { message: String },

    #[display(fmt = "{}", message)]
    Internal { message: String },
}

impl HrError {
    pub fn not_found(message: impl Into<String>) -> Self {
        Self::NotFound {
            message: message.into(),
        }
    }

    pub fn invalid_state(message: impl Into<String>) -> Self {
        Self::InvalidState {
            message: message.into(),
        }
    }

    pub fn precondition_failed(message: impl Into<String>) -> Self {
        Self::PreconditionFailed {
            message: message.into(),
        }
    }

    pub fn validation(message: impl Into<String>) -> Self {
        Self::Validation {
            message: message.into(),
        }
    }

    pub fn storage(message: impl Into<String>) -> Self {
        Self::Storage {
            message: message.into(),
        }
    }

    pub fn internal(message: impl Into<String>) -> Self {
        Self::Internal {
            message: message.into(),
        }
    }
}

impl ResponseError for HrError {
    fn status_code(&self) -> StatusCode {
        match self {
            Self::NotFound { .. } => StatusCode::NOT_FOUND,
            Self::InvalidState { .. } => StatusCode::CONFLICT,
            Self::PreconditionFailed { .. } => StatusCode::UNPROCESSABLE_ENTITY,
            Self::Validation { .. } => StatusCode::BAD_REQUEST,
            Self::Storage { .. } | Self::Internal { .. } => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn error_response(&self) -> HttpResponse {
        HttpResponse::build(self.status_code()).json(json!({
            "message": self.to_string()
        }))
    }
}

impl From<std::io::Error> for HrError {
    fn from(err: std::io::Error) -> Self {
        Self::Storage {
            message: err.to_string(),
        }
    }
}

impl From<serde_json::Error> for HrError {
    fn from(err: serde_json::Error) -> Self {
        Self::Storage {
            message: err.to_string(),
        }
    }
}

// A poisoned state lock means a writer panicked mid-mutation; surface it as
// an internal fault instead of propagating the panic into every handler.
impl<T> From<std::sync::PoisonError<T>> for HrError {
    fn from(_: std::sync::PoisonError<T>) -> Self {
        Self::Internal {
            message: "state lock poisoned".to_string(),
        }
    }
}
