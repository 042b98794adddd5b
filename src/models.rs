// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Agora Platform

//! # API Data Models
//!
//! Request and response structures for the REST API. All types derive
//! `Serialize`, `Deserialize`, and `ToSchema` for automatic JSON handling and
//! OpenAPI documentation.
//!
//! The platform's wire contract is camelCase (`commentId`, `campaignId`,
//! `publicationDate`, ...); stored records use snake_case, and the mapping
//! lives in [`CommentResponse::from`].

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::store::Comment;

// =============================================================================
// Request Models
// =============================================================================

/// Request to create a comment on a campaign.
///
/// The authoring citizen is never part of the request body; it is bound from
/// the identity resolved out of the caller's bearer token.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateCommentRequest {
    /// Comment body text, stored as given.
    pub content: String,
    /// Campaign the comment is attached to.
    pub campaign_id: i64,
}

/// Request to update a comment's content.
#[derive(Debug, Clone, Default, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UpdateCommentRequest {
    /// Replacement body text. When missing or empty the stored content is
    /// kept unchanged (the update still counts as a modification).
    #[serde(default)]
    pub content: Option<String>,
}

// =============================================================================
// Response Models
// =============================================================================

/// A comment as returned by the API.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CommentResponse {
    /// Store-assigned comment identifier.
    pub comment_id: String,
    /// Comment body text.
    pub content: String,
    /// Creation time.
    pub publication_date: DateTime<Utc>,
    /// `null` until the comment is first updated.
    pub last_modified_date: Option<DateTime<Utc>>,
    /// Campaign the comment is attached to.
    pub campaign_id: i64,
    /// Authoring citizen, resolved at creation.
    pub citizen_id: i64,
}

impl From<Comment> for CommentResponse {
    fn from(comment: Comment) -> Self {
        Self {
            comment_id: comment.id,
            content: comment.content,
            publication_date: comment.publication_date,
            last_modified_date: comment.last_modified_date,
            campaign_id: comment.campaign_id,
            citizen_id: comment.citizen_id,
        }
    }
}
