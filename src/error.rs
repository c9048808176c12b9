use actix_web::http::StatusCode;
use actix_web::{HttpResponse, ResponseError};
use serde::Serialize;
use std::fmt;

use crate::services::{AgentError, FieldErrors, ReviewError, SaveError, StoreError};

/// Application-level error type
#[derive(Debug)]
pub enum AppError {
    /// Store operation failed
    Store(StoreError),
    /// Malformed or out-of-constraint input
    Validation { message: String, fields: FieldErrors },
    /// Not found error
    NotFound(String),
    /// Verb not supported on this route
    MethodNotAllowed,
}

#[derive(Serialize)]
struct ErrorResponse {
    error: ErrorBody,
    meta: ErrorMeta,
}

#[derive(Serialize)]
struct ErrorBody {
    code: String,
    message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    details: Option<serde_json::Value>,
}

#[derive(Serialize)]
struct ErrorMeta {
    request_id: String,
}

impl AppError {
    /// Validation failure without field detail, e.g. an unparseable body
    pub fn bad_request(message: impl Into<String>) -> Self {
        Self::Validation {
            message: message.into(),
            fields: FieldErrors::new(),
        }
    }

    fn error_code(&self) -> &'static str {
        match self {
            Self::Store(_) => "DATABASE_ERROR",
            Self::Validation { .. } => "VALIDATION_ERROR",
            Self::NotFound(_) => "NOT_FOUND",
            Self::MethodNotAllowed => "METHOD_NOT_ALLOWED",
        }
    }

    /// Message safe to return to callers
    fn public_message(&self) -> String {
        match self {
            Self::Store(_) => "Database error".to_string(),
            other => other.to_string(),
        }
    }

    fn details(&self) -> Option<serde_json::Value> {
        match self {
            Self::Validation { fields, .. } if !fields.is_empty() => {
                serde_json::to_value(fields).ok()
            }
            _ => None,
        }
    }
}

impl fmt::Display for AppError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Store(e) => write!(f, "Store error: {e}"),
            Self::Validation { message, .. } => write!(f, "Validation error: {message}"),
            Self::NotFound(msg) => write!(f, "Not found: {msg}"),
            Self::MethodNotAllowed => write!(f, "Method not allowed"),
        }
    }
}

impl ResponseError for AppError {
    fn status_code(&self) -> StatusCode {
        match self {
            Self::Store(_) => StatusCode::INTERNAL_SERVER_ERROR,
            Self::Validation { .. } => StatusCode::BAD_REQUEST,
            Self::NotFound(_) => StatusCode::NOT_FOUND,
            Self::MethodNotAllowed => StatusCode::METHOD_NOT_ALLOWED,
        }
    }

    fn error_response(&self) -> HttpResponse {
        let request_id = uuid::Uuid::new_v4().to_string();

        if let Self::Store(e) = self {
            tracing::error!(%request_id, error = %e, "Request failed");
        }

        let error_response = ErrorResponse {
            error: ErrorBody {
                code: self.error_code().to_string(),
                message: self.public_message(),
                details: self.details(),
            },
            meta: ErrorMeta { request_id },
        };

        HttpResponse::build(self.status_code()).json(error_response)
    }
}

impl From<StoreError> for AppError {
    fn from(err: StoreError) -> Self {
        Self::Store(err)
    }
}

impl From<AgentError> for AppError {
    fn from(err: AgentError) -> Self {
        match err {
            AgentError::Validation(fields) => Self::Validation {
                message: "Validation failed".to_string(),
                fields,
            },
            AgentError::NotFound(id) => Self::NotFound(format!("Agent not found: {id}")),
            AgentError::Store(e) => Self::Store(e),
        }
    }
}

impl From<ReviewError> for AppError {
    fn from(err: ReviewError) -> Self {
        match err {
            ReviewError::Validation(fields) => Self::Validation {
                message: "Validation failed".to_string(),
                fields,
            },
            ReviewError::AgentNotFound(id) => Self::NotFound(format!("Agent not found: {id}")),
            ReviewError::Store(e) => Self::Store(e),
        }
    }
}

impl From<SaveError> for AppError {
    fn from(err: SaveError) -> Self {
        match err {
            SaveError::Validation(fields) => Self::Validation {
                message: "Validation failed".to_string(),
                fields,
            },
            SaveError::AgentNotFound(id) => Self::NotFound(format!("Agent not found: {id}")),
            SaveError::Store(e) => Self::Store(e),
        }
    }
}
