// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Agora Platform

//! # Authentication Module
//!
//! Two layers stand between a request and a stored comment:
//!
//! 1. **Transport guard** ([`Auth`] / [`BearerToken`] extractors backed by
//!    [`TokenVerifier`]): every comment route requires a bearer header and a
//!    locally valid HS256 signature with an unexpired `exp` claim. The secret
//!    is shared with the identity service (`JWT_SECRET`, base64-encoded in
//!    the environment).
//! 2. **Remote resolution** ([`IdentityResolver`]): comment creation sends
//!    the token to the identity service (`GET /auth/me`) and binds the stored
//!    `citizen_id` to the identity it returns. The service never trusts a
//!    caller-supplied citizen id.
//!
//! Failure translation keeps the two upstream families apart: an explicit
//! remote rejection propagates status and message as an authentication
//! failure, while an unreachable identity service is an upstream failure.

pub mod claims;
pub mod error;
pub mod extractor;
pub mod resolver;

pub use claims::AuthenticatedCitizen;
pub use error::AuthError;
pub use extractor::{Auth, BearerToken, TokenVerifier};
pub use resolver::{HttpIdentityResolver, Identity, IdentityResolver};
