// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Agora Platform

//! Remote identity resolution.
//!
//! Comment creation binds the stored `citizen_id` to an identity the
//! authentication service vouches for, not to anything the caller claims
//! about themselves. The resolver owns that trust decision and the
//! translation of remote failures:
//!
//! - the identity service answered and said no → [`AuthError::Rejected`],
//!   carrying the remote status and message;
//! - the identity service could not be reached at all →
//!   [`AuthError::Unreachable`], which is an infrastructure failure and must
//!   never be reported as an authentication failure.
//!
//! There is no caching and no retry: every resolution is one remote call.

use async_trait::async_trait;
use axum::http::StatusCode;
use serde::Deserialize;
use std::time::Duration;
use tracing::warn;

use super::error::{AuthError, DEFAULT_REJECTION_MESSAGE};

/// Outbound request timeout for the identity service.
const HTTP_TIMEOUT: Duration = Duration::from_secs(10);

/// A caller identity verified by the identity service.
#[derive(Debug, Clone, PartialEq)]
pub struct Identity {
    /// Canonical citizen id.
    pub user_id: i64,
    /// Email on record, if any.
    pub email: Option<String>,
    /// Role on record, if any. Passed through opaquely.
    pub role: Option<String>,
}

/// Resolves a bearer token into a verified identity.
///
/// The comment lifecycle depends on this trait only, so tests substitute a
/// deterministic resolver instead of a live identity service.
#[async_trait]
pub trait IdentityResolver: Send + Sync {
    async fn resolve(&self, token: &str) -> Result<Identity, AuthError>;
}

/// Success payload of `GET /auth/me`.
#[derive(Debug, Deserialize)]
struct IdentityPayload {
    id: i64,
    #[serde(default)]
    email: Option<String>,
    #[serde(default)]
    role: Option<String>,
}

/// Error body of `GET /auth/me`. The identity service emits either a plain
/// message string or an array of validation messages.
#[derive(Debug, Deserialize)]
struct RemoteErrorBody {
    #[serde(default)]
    message: Option<RemoteMessage>,
}

#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum RemoteMessage {
    One(String),
    Many(Vec<String>),
}

impl RemoteMessage {
    fn into_string(self) -> String {
        match self {
            RemoteMessage::One(message) => message,
            RemoteMessage::Many(messages) => messages.join(", "),
        }
    }
}

/// Identity resolver backed by the platform's authentication service.
#[derive(Debug, Clone)]
pub struct HttpIdentityResolver {
    base_url: String,
    client: reqwest::Client,
}

impl HttpIdentityResolver {
    /// Create a resolver for the identity service at `base_url`.
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into().trim_end_matches('/').to_string(),
            client: reqwest::Client::builder()
                .timeout(HTTP_TIMEOUT)
                .build()
                .expect("Failed to create HTTP client"),
        }
    }
}

#[async_trait]
impl IdentityResolver for HttpIdentityResolver {
    async fn resolve(&self, token: &str) -> Result<Identity, AuthError> {
        let response = self
            .client
            .get(format!("{}/auth/me", self.base_url))
            .bearer_auth(token)
            .send()
            .await
            .map_err(|e| {
                warn!(error = %e, "identity service unreachable");
                AuthError::Unreachable(e.to_string())
            })?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            let message = serde_json::from_str::<RemoteErrorBody>(&body)
                .ok()
                .and_then(|b| b.message)
                .map(RemoteMessage::into_string)
                .unwrap_or_else(|| DEFAULT_REJECTION_MESSAGE.to_string());
            warn!(status = %status, message = %message, "identity service rejected token");
            return Err(AuthError::Rejected {
                status: StatusCode::from_u16(status.as_u16())
                    .unwrap_or(StatusCode::UNAUTHORIZED),
                message,
            });
        }

        let payload: IdentityPayload = response
            .json()
            .await
            .map_err(|e| AuthError::InvalidIdentityPayload(e.to_string()))?;

        Ok(Identity {
            user_id: payload.id,
            email: payload.email,
            role: payload.role,
        })
    }
}

#[cfg(test)]
pub(crate) mod testing {
    //! Deterministic resolver double for lifecycle and handler tests.

    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;

    use super::*;

    enum Outcome {
        Resolve(Identity),
        Fail(AuthError),
    }

    /// Resolver returning a canned outcome and counting calls.
    pub(crate) struct FakeResolver {
        outcome: Outcome,
        calls: AtomicUsize,
    }

    impl FakeResolver {
        pub(crate) fn resolving(identity: Identity) -> Arc<Self> {
            Arc::new(Self {
                outcome: Outcome::Resolve(identity),
                calls: AtomicUsize::new(0),
            })
        }

        pub(crate) fn failing(error: AuthError) -> Arc<Self> {
            Arc::new(Self {
                outcome: Outcome::Fail(error),
                calls: AtomicUsize::new(0),
            })
        }

        /// Identity with the given citizen id and no email/role.
        pub(crate) fn citizen(user_id: i64) -> Arc<Self> {
            Self::resolving(Identity {
                user_id,
                email: None,
                role: None,
            })
        }

        pub(crate) fn calls(&self) -> usize {
            self.calls.load(Ordering::SeqCst)
        }
    }

    #[async_trait]
    impl IdentityResolver for FakeResolver {
        async fn resolve(&self, _token: &str) -> Result<Identity, AuthError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            match &self.outcome {
                Outcome::Resolve(identity) => Ok(identity.clone()),
                Outcome::Fail(error) => Err(error.clone()),
            }
        }
    }
}
