// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Agora Platform

//! Comment lifecycle.
//!
//! `CommentService` orchestrates create/read/update/delete against the store.
//! Creation is the only operation that talks to the identity service: the
//! stored `citizen_id` comes from the resolved identity, never from the
//! request body. Update and delete check existence but not ownership; any
//! caller passing the transport guard may mutate any comment.

use std::sync::Arc;

use chrono::Utc;
use tracing::info;

use crate::auth::resolver::IdentityResolver;
use crate::error::ApiError;
use crate::models::{CreateCommentRequest, UpdateCommentRequest};
use crate::store::{Comment, CommentStore, NewComment};

/// Orchestrates the comment lifecycle over the store and the resolver.
#[derive(Clone)]
pub struct CommentService {
    store: Arc<CommentStore>,
    resolver: Arc<dyn IdentityResolver>,
}

impl CommentService {
    pub fn new(store: Arc<CommentStore>, resolver: Arc<dyn IdentityResolver>) -> Self {
        Self { store, resolver }
    }

    /// Whether the backing store is reachable (readiness probe).
    pub fn store_ready(&self) -> bool {
        self.store.is_ready()
    }

    /// Create a comment authored by whoever the identity service says the
    /// token belongs to.
    ///
    /// Resolver failures propagate unchanged in category and message; nothing
    /// is persisted unless resolution succeeded. Exactly one remote call is
    /// made per invocation.
    pub async fn create(
        &self,
        request: CreateCommentRequest,
        token: &str,
    ) -> Result<Comment, ApiError> {
        let identity = self.resolver.resolve(token).await?;

        let comment = self.store.insert(NewComment {
            content: request.content,
            campaign_id: request.campaign_id,
            citizen_id: identity.user_id,
            publication_date: Utc::now(),
        })?;

        info!(
            comment_id = %comment.id,
            campaign_id = comment.campaign_id,
            citizen_id = comment.citizen_id,
            "comment created"
        );
        Ok(comment)
    }

    /// All stored comments, unpaginated, in store iteration order.
    pub fn list(&self) -> Result<Vec<Comment>, ApiError> {
        Ok(self.store.find_all()?)
    }

    /// All comments attached to one campaign.
    pub fn list_by_campaign(&self, campaign_id: i64) -> Result<Vec<Comment>, ApiError> {
        Ok(self.store.find_by_campaign(campaign_id)?)
    }

    /// Update a comment's content.
    ///
    /// Missing or empty replacement text keeps the stored content. Every
    /// accepted update stamps a new modification time, even when the content
    /// did not change.
    pub fn update(&self, id: &str, request: UpdateCommentRequest) -> Result<Comment, ApiError> {
        let Some(mut comment) = self.store.find_by_id(id)? else {
            return Err(ApiError::comment_not_found(id));
        };

        if let Some(content) = request.content.filter(|c| !c.is_empty()) {
            comment.content = content;
        }
        comment.last_modified_date = Some(Utc::now());

        if !self.store.replace(id, &comment)? {
            // Deleted between the read and the write.
            return Err(ApiError::comment_not_found(id));
        }
        Ok(comment)
    }

    /// Delete a comment permanently.
    pub fn delete(&self, id: &str) -> Result<(), ApiError> {
        if !self.store.delete_by_id(id)? {
            return Err(ApiError::comment_not_found(id));
        }
        info!(comment_id = %id, "comment deleted");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::auth::resolver::testing::FakeResolver;
    use crate::auth::AuthError;
    use axum::http::StatusCode;
    use std::time::Duration;
    use tempfile::TempDir;

    fn service_with(resolver: Arc<FakeResolver>) -> (CommentService, Arc<FakeResolver>, TempDir) {
        let temp_dir = TempDir::new().expect("Failed to create temp dir");
        let store = CommentStore::open(temp_dir.path()).expect("Failed to open store");
        let service = CommentService::new(Arc::new(store), resolver.clone());
        (service, resolver, temp_dir)
    }

    fn create_request(content: &str, campaign_id: i64) -> CreateCommentRequest {
        CreateCommentRequest {
            content: content.to_string(),
            campaign_id,
        }
    }

    #[tokio::test]
    async fn create_binds_resolved_identity() {
        let (service, resolver, _dir) = service_with(FakeResolver::citizen(7));
        let before = Utc::now();

        let comment = service
            .create(create_request("Great idea", 42), "token")
            .await
            .unwrap();

        assert_eq!(comment.content, "Great idea");
        assert_eq!(comment.campaign_id, 42);
        assert_eq!(comment.citizen_id, 7);
        assert!(comment.last_modified_date.is_none());
        assert!(comment.publication_date >= before);
        assert!(comment.publication_date <= Utc::now());
        assert_eq!(resolver.calls(), 1);
    }

    #[tokio::test]
    async fn create_propagates_remote_rejection_and_persists_nothing() {
        let (service, _resolver, _dir) = service_with(FakeResolver::failing(AuthError::Rejected {
            status: StatusCode::UNAUTHORIZED,
            message: "invalid token".to_string(),
        }));

        let err = service
            .create(create_request("Great idea", 42), "bad-token")
            .await
            .unwrap_err();

        assert_eq!(err.error_code(), "authentication_failure");
        assert_eq!(err.status_code(), StatusCode::UNAUTHORIZED);
        assert_eq!(err.to_string(), "invalid token");
        assert!(service.list().unwrap().is_empty());
    }

    #[tokio::test]
    async fn create_maps_unreachable_resolver_to_upstream_failure() {
        let (service, _resolver, _dir) = service_with(FakeResolver::failing(
            AuthError::Unreachable("connection refused".to_string()),
        ));

        let err = service
            .create(create_request("Great idea", 42), "token")
            .await
            .unwrap_err();

        assert_eq!(err.error_code(), "upstream_unavailable");
        assert_eq!(err.status_code(), StatusCode::INTERNAL_SERVER_ERROR);
    }

    #[tokio::test]
    async fn update_replaces_content_and_stamps_modification() {
        let (service, _resolver, _dir) = service_with(FakeResolver::citizen(7));
        let created = service
            .create(create_request("Great idea", 42), "token")
            .await
            .unwrap();

        tokio::time::sleep(Duration::from_millis(5)).await;
        let updated = service
            .update(
                &created.id,
                UpdateCommentRequest {
                    content: Some("Even better".to_string()),
                },
            )
            .unwrap();

        assert_eq!(updated.content, "Even better");
        let modified = updated.last_modified_date.expect("modification stamped");
        assert!(modified > created.publication_date);
        // Immutable fields stay put.
        assert_eq!(updated.id, created.id);
        assert_eq!(updated.citizen_id, 7);
        assert_eq!(updated.publication_date, created.publication_date);
    }

    #[tokio::test]
    async fn update_without_content_still_counts_as_modification() {
        let (service, _resolver, _dir) = service_with(FakeResolver::citizen(7));
        let created = service
            .create(create_request("Great idea", 42), "token")
            .await
            .unwrap();

        let first = service
            .update(&created.id, UpdateCommentRequest { content: None })
            .unwrap();
        assert_eq!(first.content, "Great idea");
        let first_stamp = first.last_modified_date.expect("modification stamped");

        tokio::time::sleep(Duration::from_millis(5)).await;
        let second = service
            .update(
                &created.id,
                UpdateCommentRequest {
                    content: Some(String::new()),
                },
            )
            .unwrap();
        assert_eq!(second.content, "Great idea");
        assert!(second.last_modified_date.expect("modification stamped") > first_stamp);
    }

    #[tokio::test]
    async fn update_unknown_id_is_not_found() {
        let (service, _resolver, _dir) = service_with(FakeResolver::citizen(7));

        let err = service
            .update("nope", UpdateCommentRequest::default())
            .unwrap_err();

        assert_eq!(err.error_code(), "not_found");
        assert_eq!(err.to_string(), "Comment with ID nope not found");
    }

    #[tokio::test]
    async fn delete_removes_comment_and_second_delete_fails() {
        let (service, _resolver, _dir) = service_with(FakeResolver::citizen(7));
        let created = service
            .create(create_request("Great idea", 42), "token")
            .await
            .unwrap();

        service.delete(&created.id).unwrap();
        assert!(service.list().unwrap().is_empty());

        let err = service.delete(&created.id).unwrap_err();
        assert_eq!(err.error_code(), "not_found");
    }

    #[tokio::test]
    async fn delete_unknown_id_leaves_store_untouched() {
        let (service, _resolver, _dir) = service_with(FakeResolver::citizen(7));
        service
            .create(create_request("keep me", 1), "token")
            .await
            .unwrap();

        let err = service.delete("missing").unwrap_err();
        assert_eq!(err.error_code(), "not_found");
        assert_eq!(service.list().unwrap().len(), 1);
    }

    #[tokio::test]
    async fn list_by_campaign_returns_exactly_that_campaign() {
        let (service, _resolver, _dir) = service_with(FakeResolver::citizen(7));
        service
            .create(create_request("a", 42), "token")
            .await
            .unwrap();
        service
            .create(create_request("b", 42), "token")
            .await
            .unwrap();
        service
            .create(create_request("other", 9), "token")
            .await
            .unwrap();

        let campaign = service.list_by_campaign(42).unwrap();
        assert_eq!(campaign.len(), 2);
        assert!(campaign.iter().all(|c| c.campaign_id == 42));
        assert!(service.list_by_campaign(100).unwrap().is_empty());
    }

    #[tokio::test]
    async fn resolver_is_called_once_per_create_and_never_otherwise() {
        let (service, resolver, _dir) = service_with(FakeResolver::citizen(7));
        let created = service
            .create(create_request("Great idea", 42), "token")
            .await
            .unwrap();
        assert_eq!(resolver.calls(), 1);

        service.list().unwrap();
        service.list_by_campaign(42).unwrap();
        service
            .update(&created.id, UpdateCommentRequest::default())
            .unwrap();
        service.delete(&created.id).unwrap();

        assert_eq!(resolver.calls(), 1);
    }

    #[tokio::test]
    async fn corrupt_record_surfaces_as_persistence_failure() {
        let (service, _resolver, dir) = service_with(FakeResolver::citizen(7));
        service
            .create(create_request("good", 1), "token")
            .await
            .unwrap();
        std::fs::write(dir.path().join("comments/bad.json"), b"not json").unwrap();

        let err = service.list().unwrap_err();
        assert_eq!(err.error_code(), "persistence_failure");
        assert_eq!(err.status_code(), StatusCode::INTERNAL_SERVER_ERROR);
    }
}
