// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Agora Platform

use crate::auth::TokenVerifier;
use crate::comments::CommentService;

/// Shared application state.
///
/// Built once at startup; everything inside is cheap to clone (the comment
/// service holds its store and resolver behind `Arc`s).
#[derive(Clone)]
pub struct AppState {
    pub comments: CommentService,
    pub verifier: TokenVerifier,
}

impl AppState {
    pub fn new(comments: CommentService, verifier: TokenVerifier) -> Self {
        Self { comments, verifier }
    }
}
