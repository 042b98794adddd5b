// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Agora Platform

//! Failure vocabulary shared by the token guard and the identity resolver.
//!
//! Granular variants for everything that can go wrong between "a request
//! arrived" and "we know who the caller is". They fold into the service
//! taxonomy (`ApiError`) for the response: header-shape problems are
//! validation failures, any token rejection (local or remote) is an
//! authentication failure, and not being able to ask the identity service at
//! all is an upstream failure, never an authentication failure.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
};

use crate::error::ApiError;

/// Default message when the identity service rejects a token without a
/// usable message of its own.
pub const DEFAULT_REJECTION_MESSAGE: &str = "Failed to authenticate user";

/// Everything that can fail while establishing the caller.
#[derive(Debug, Clone)]
pub enum AuthError {
    /// The request carried no authorization header
    MissingAuthHeader,
    /// Authorization header is not bearer-scheme or carries no token
    InvalidAuthHeader,
    /// Token is structurally malformed
    MalformedToken,
    /// Signature check against the shared secret failed
    InvalidSignature,
    /// Token has expired
    TokenExpired,
    /// Token carries no usable subject claim
    MissingSubject,
    /// The identity service explicitly rejected the token
    Rejected { status: StatusCode, message: String },
    /// The identity service could not be reached
    Unreachable(String),
    /// The identity service answered success with an unusable payload
    InvalidIdentityPayload(String),
}

impl AuthError {
    /// HTTP status code for this error.
    pub fn status_code(&self) -> StatusCode {
        match self {
            AuthError::MissingAuthHeader | AuthError::InvalidAuthHeader => StatusCode::BAD_REQUEST,
            AuthError::MalformedToken
            | AuthError::InvalidSignature
            | AuthError::TokenExpired
            | AuthError::MissingSubject => StatusCode::UNAUTHORIZED,
            AuthError::Rejected { status, .. } => *status,
            AuthError::Unreachable(_) | AuthError::InvalidIdentityPayload(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }
}

impl std::fmt::Display for AuthError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            AuthError::MissingAuthHeader => write!(f, "Authorization header is required"),
            AuthError::InvalidAuthHeader => {
                write!(f, "Invalid authorization header format (expected 'Bearer <token>')")
            }
            AuthError::MalformedToken => write!(f, "Token is malformed"),
            AuthError::InvalidSignature => write!(f, "Token signature is invalid"),
            AuthError::TokenExpired => write!(f, "Token has expired"),
            AuthError::MissingSubject => write!(f, "Token carries no subject claim"),
            AuthError::Rejected { message, .. } => write!(f, "{message}"),
            AuthError::Unreachable(msg) => {
                write!(f, "Failed to connect to auth service: {msg}")
            }
            AuthError::InvalidIdentityPayload(msg) => {
                write!(f, "Identity service returned an invalid payload: {msg}")
            }
        }
    }
}

impl std::error::Error for AuthError {}

impl From<AuthError> for ApiError {
    fn from(err: AuthError) -> Self {
        match err {
            AuthError::MissingAuthHeader | AuthError::InvalidAuthHeader => {
                ApiError::Validation(err.to_string())
            }
            AuthError::Rejected { status, message } => {
                ApiError::Authentication { status, message }
            }
            AuthError::Unreachable(_) | AuthError::InvalidIdentityPayload(_) => {
                ApiError::UpstreamUnavailable(err.to_string())
            }
            AuthError::MalformedToken
            | AuthError::InvalidSignature
            | AuthError::TokenExpired
            | AuthError::MissingSubject => ApiError::Authentication {
                status: StatusCode::UNAUTHORIZED,
                message: err.to_string(),
            },
        }
    }
}

impl IntoResponse for AuthError {
    fn into_response(self) -> Response {
        ApiError::from(self).into_response()
    }
}
