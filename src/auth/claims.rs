// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Agora Platform

//! JWT claims and the caller identity established by the transport guard.

use serde::Deserialize;

use super::error::AuthError;

/// Claims carried by a platform-issued access token.
///
/// Only the claims this service reads are modeled; signature and expiry
/// enforcement happen in the verifier, not here. The identity service issues
/// numeric citizen ids through the standard `sub` claim, so `sub` is kept as
/// a raw JSON value and normalized in [`AuthenticatedCitizen::from_claims`].
#[derive(Debug, Deserialize)]
pub struct TokenClaims {
    /// Subject (citizen id), string or number.
    #[serde(default)]
    pub sub: Option<serde_json::Value>,
    /// Citizen email, passed through opaquely.
    #[serde(default)]
    pub email: Option<String>,
    /// Citizen role, passed through opaquely. No authorization decisions are
    /// made from it in this service.
    #[serde(default)]
    pub role: Option<String>,
}

/// Caller identity established by the transport-layer token guard.
///
/// This is the local (signature-only) identity. Comment creation additionally
/// resolves the token against the identity service, which is the identity of
/// record for the stored `citizen_id`.
#[derive(Debug, Clone, PartialEq)]
pub struct AuthenticatedCitizen {
    /// Canonical citizen id (`sub` claim, normalized to a string).
    pub user_id: String,
    /// Email from the token, if present.
    pub email: Option<String>,
    /// Role from the token, if present.
    pub role: Option<String>,
}

impl AuthenticatedCitizen {
    /// Map verified claims into a caller identity.
    ///
    /// A token without a usable subject identifies nobody and is rejected.
    pub fn from_claims(claims: TokenClaims) -> Result<Self, AuthError> {
        let user_id = claims
            .sub
            .as_ref()
            .and_then(subject_string)
            .ok_or(AuthError::MissingSubject)?;
        Ok(Self {
            user_id,
            email: claims.email,
            role: claims.role,
        })
    }
}

fn subject_string(value: &serde_json::Value) -> Option<String> {
    match value {
        serde_json::Value::String(s) if !s.is_empty() => Some(s.clone()),
        serde_json::Value::Number(n) => Some(n.to_string()),
        _ => None,
    }
}
