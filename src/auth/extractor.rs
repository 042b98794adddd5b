// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Agora Platform

//! Axum extractors for the transport-layer token guard.
//!
//! Use the `Auth` extractor in handlers to require a caller with a locally
//! valid token:
//!
//! ```rust,ignore
//! async fn my_handler(Auth(citizen): Auth) -> impl IntoResponse {
//!     // citizen is AuthenticatedCitizen
//! }
//! ```
//!
//! The guard checks header shape, signature, and expiry against the shared
//! HS256 secret. It does not call the identity service; comment creation
//! additionally resolves the token remotely through the `IdentityResolver`.

use axum::{
    extract::FromRequestParts,
    http::{header::AUTHORIZATION, request::Parts},
};
use jsonwebtoken::{decode, Algorithm, DecodingKey, Validation};

use super::claims::{AuthenticatedCitizen, TokenClaims};
use super::error::AuthError;
use crate::state::AppState;

/// Clock skew tolerance (60 seconds).
const CLOCK_SKEW_LEEWAY: u64 = 60;

/// Verifies bearer tokens against the shared signing secret.
///
/// Built once at startup from the decoded `JWT_SECRET` and shared through
/// `AppState`.
#[derive(Clone)]
pub struct TokenVerifier {
    decoding_key: DecodingKey,
    validation: Validation,
}

impl TokenVerifier {
    /// Build a verifier from the decoded (raw-byte) HS256 secret.
    pub fn new(secret: &[u8]) -> Self {
        let mut validation = Validation::new(Algorithm::HS256);
        validation.leeway = CLOCK_SKEW_LEEWAY;
        // Tokens carry no audience for this service.
        validation.validate_aud = false;
        Self {
            decoding_key: DecodingKey::from_secret(secret),
            validation,
        }
    }

    /// Verify signature and expiry, then map the claims into a caller
    /// identity. A token without an `exp` claim is malformed.
    pub fn verify(&self, token: &str) -> Result<AuthenticatedCitizen, AuthError> {
        let token_data = decode::<TokenClaims>(token, &self.decoding_key, &self.validation)
            .map_err(|e| match e.kind() {
                jsonwebtoken::errors::ErrorKind::ExpiredSignature => AuthError::TokenExpired,
                jsonwebtoken::errors::ErrorKind::InvalidSignature => AuthError::InvalidSignature,
                _ => AuthError::MalformedToken,
            })?;

        AuthenticatedCitizen::from_claims(token_data.claims)
    }
}

/// Extractor for the raw bearer credential.
///
/// Rejects before any verification when the authorization header is missing,
/// not bearer-scheme, or carries an empty token. Those are boundary-shape
/// problems (400), not authentication failures.
pub struct BearerToken(pub String);

impl FromRequestParts<AppState> for BearerToken {
    type Rejection = AuthError;

    async fn from_request_parts(
        parts: &mut Parts,
        _state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let auth_header = parts
            .headers
            .get(AUTHORIZATION)
            .ok_or(AuthError::MissingAuthHeader)?
            .to_str()
            .map_err(|_| AuthError::InvalidAuthHeader)?;

        let token = auth_header
            .strip_prefix("Bearer ")
            .ok_or(AuthError::InvalidAuthHeader)?;
        if token.is_empty() {
            return Err(AuthError::InvalidAuthHeader);
        }

        Ok(BearerToken(token.to_string()))
    }
}

/// Extractor for callers with a locally verified token.
pub struct Auth(pub AuthenticatedCitizen);

impl FromRequestParts<AppState> for Auth {
    type Rejection = AuthError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let BearerToken(token) = BearerToken::from_request_parts(parts, state).await?;
        let citizen = state.verifier.verify(&token)?;
        Ok(Auth(citizen))
    }
}
