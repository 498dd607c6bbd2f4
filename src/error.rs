//! Error taxonomy shared by the upstream clients, the estimator and the REST layer.
//!
//! Variants are mapped to HTTP status codes only at the actix boundary, see
//! the [`ResponseError`] impl below.

use actix_web::http::StatusCode;
use actix_web::{HttpResponse, ResponseError};
use serde::Serialize;
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum ApiError {
    /// Malformed or out-of-range path parameters. Raised before any outbound call.
    #[error("{0}")]
    BadRequest(String),

    /// An upstream collaborator had no data for the requested resource.
    #[error("{0}")]
    NotFound(String),

    /// Non-2xx from a collaborator, a transport failure, or a body that does
    /// not have the fields we need.
    #[error("{service} failed{}: {detail}", status_suffix(.status))]
    Upstream {
        service: &'static str,
        status: Option<u16>,
        detail: String,
    },

    /// Upstream data references something that cannot be resolved.
    #[error("{0}")]
    Inconsistency(String),
}

impl ApiError {
    pub fn upstream(service: &'static str, detail: impl Into<String>) -> Self {
        ApiError::Upstream {
            service,
            status: None,
            detail: detail.into(),
        }
    }

    /// Maps a non-success status code from `service` onto the taxonomy.
    pub fn from_upstream_status(service: &'static str, status: u16, detail: impl Into<String>) -> Self {
        if status == 404 {
            ApiError::NotFound(format!("{service}: {}", detail.into()))
        } else {
            ApiError::Upstream {
                service,
                status: Some(status),
                detail: detail.into(),
            }
        }
    }

    /// Short human-readable label sent as `message` in the error body.
    pub fn message(&self) -> &'static str {
        match self {
            ApiError::BadRequest(_) => "Bad Request",
            ApiError::NotFound(_) => "Not Found",
            ApiError::Upstream { .. } => "Bad Gateway",
            ApiError::Inconsistency(_) => "Internal Server Error",
        }
    }
}

fn status_suffix(status: &Option<u16>) -> String {
    status.map(|s| format!(" with status {s}")).unwrap_or_default()
}

/// JSON body of every error response.
#[derive(Debug, Serialize)]
pub struct ErrorBody {
    pub status: u16,
    pub message: &'static str,
    pub error: String,
}

impl ResponseError for ApiError {
    fn status_code(&self) -> StatusCode {
        match self {
            ApiError::BadRequest(_) => StatusCode::BAD_REQUEST,
            ApiError::NotFound(_) => StatusCode::NOT_FOUND,
            ApiError::Upstream { .. } => StatusCode::BAD_GATEWAY,
            ApiError::Inconsistency(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn error_response(&self) -> HttpResponse {
        let status = self.status_code();
        HttpResponse::build(status).json(ErrorBody {
            status: status.as_u16(),
            message: self.message(),
            error: self.to_string(),
        })
    }
}
