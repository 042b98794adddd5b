// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Agora Platform

//! Service-level error taxonomy.
//!
//! Every failure leaving a handler is one of these five kinds, rendered as
//! `{"error": <message>, "error_code": <kind>}` so callers can branch on the
//! kind without parsing the human-readable message.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;

use crate::store::StoreError;

/// Failure taxonomy for the comment API.
#[derive(Debug, Clone)]
pub enum ApiError {
    /// Malformed or missing input rejected at the boundary.
    Validation(String),
    /// The caller's credential was rejected, locally or by the identity
    /// service. Carries the status to return (the remote status when the
    /// rejection came from upstream).
    Authentication { status: StatusCode, message: String },
    /// The identity service could not be reached or gave an unusable answer.
    UpstreamUnavailable(String),
    /// The referenced comment does not exist.
    NotFound(String),
    /// The comment store failed for infrastructure reasons.
    Persistence(String),
}

#[derive(Serialize)]
struct ErrorBody {
    error: String,
    error_code: String,
}

impl ApiError {
    /// NotFound with the canonical per-comment message.
    pub fn comment_not_found(id: &str) -> Self {
        ApiError::NotFound(format!("Comment with ID {id} not found"))
    }

    /// Machine-checkable error kind.
    pub fn error_code(&self) -> &'static str {
        match self {
            ApiError::Validation(_) => "validation_failure",
            ApiError::Authentication { .. } => "authentication_failure",
            ApiError::UpstreamUnavailable(_) => "upstream_unavailable",
            ApiError::NotFound(_) => "not_found",
            ApiError::Persistence(_) => "persistence_failure",
        }
    }

    /// HTTP status for this error.
    pub fn status_code(&self) -> StatusCode {
        match self {
            ApiError::Validation(_) => StatusCode::BAD_REQUEST,
            ApiError::Authentication { status, .. } => *status,
            ApiError::UpstreamUnavailable(_) | ApiError::Persistence(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
            ApiError::NotFound(_) => StatusCode::NOT_FOUND,
        }
    }
}

impl std::fmt::Display for ApiError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ApiError::Validation(msg)
            | ApiError::UpstreamUnavailable(msg)
            | ApiError::NotFound(msg)
            | ApiError::Persistence(msg) => write!(f, "{msg}"),
            ApiError::Authentication { message, .. } => write!(f, "{message}"),
        }
    }
}

impl std::error::Error for ApiError {}

impl From<StoreError> for ApiError {
    fn from(e: StoreError) -> Self {
        ApiError::Persistence(e.to_string())
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        let body = Json(ErrorBody {
            error: self.to_string(),
            error_code: self.error_code().to_string(),
        });
        (status, body).into_response()
    }
}
