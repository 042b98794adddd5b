// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Agora Platform

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};

use crate::{
    auth::{Auth, BearerToken},
    error::ApiError,
    models::{CommentResponse, CreateCommentRequest, UpdateCommentRequest},
    state::AppState,
};

/// Create a comment bound to the caller's verified identity.
///
/// The bearer token is forwarded to the identity service; the comment's
/// `citizenId` is whatever identity it vouches for.
#[utoipa::path(
    post,
    path = "/comments",
    request_body = CreateCommentRequest,
    tag = "Comments",
    security(("bearer_auth" = [])),
    responses(
        (status = 201, description = "Comment created", body = CommentResponse),
        (status = 400, description = "Missing or malformed authorization header"),
        (status = 401, description = "Token rejected"),
        (status = 500, description = "Identity service unreachable")
    )
)]
pub async fn create_comment(
    Auth(_caller): Auth,
    BearerToken(token): BearerToken,
    State(state): State<AppState>,
    Json(request): Json<CreateCommentRequest>,
) -> Result<(StatusCode, Json<CommentResponse>), ApiError> {
    let comment = state.comments.create(request, &token).await?;
    Ok((StatusCode::CREATED, Json(comment.into())))
}

/// List every stored comment.
#[utoipa::path(
    get,
    path = "/comments",
    tag = "Comments",
    security(("bearer_auth" = [])),
    responses((status = 200, body = [CommentResponse]))
)]
pub async fn list_comments(
    Auth(_caller): Auth,
    State(state): State<AppState>,
) -> Result<Json<Vec<CommentResponse>>, ApiError> {
    let comments = state.comments.list()?;
    Ok(Json(comments.into_iter().map(Into::into).collect()))
}

/// List the comments attached to one campaign.
#[utoipa::path(
    get,
    path = "/comments/campaign/{campaign_id}",
    params(
        ("campaign_id" = i64, Path, description = "Campaign to filter by")
    ),
    tag = "Comments",
    security(("bearer_auth" = [])),
    responses((status = 200, body = [CommentResponse]))
)]
pub async fn list_campaign_comments(
    Auth(_caller): Auth,
    Path(campaign_id): Path<i64>,
    State(state): State<AppState>,
) -> Result<Json<Vec<CommentResponse>>, ApiError> {
    let comments = state.comments.list_by_campaign(campaign_id)?;
    Ok(Json(comments.into_iter().map(Into::into).collect()))
}

/// Update a comment's content.
#[utoipa::path(
    put,
    path = "/comments/{id}",
    params(
        ("id" = String, Path, description = "Identifier of the comment to update")
    ),
    request_body = UpdateCommentRequest,
    tag = "Comments",
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "Comment updated", body = CommentResponse),
        (status = 404, description = "No comment with this id")
    )
)]
pub async fn update_comment(
    Auth(_caller): Auth,
    Path(id): Path<String>,
    State(state): State<AppState>,
    Json(request): Json<UpdateCommentRequest>,
) -> Result<Json<CommentResponse>, ApiError> {
    let comment = state.comments.update(&id, request)?;
    Ok(Json(comment.into()))
}

/// Delete a comment permanently.
#[utoipa::path(
    delete,
    path = "/comments/{id}",
    params(
        ("id" = String, Path, description = "Identifier of the comment to delete")
    ),
    tag = "Comments",
    security(("bearer_auth" = [])),
    responses(
        (status = 204, description = "Comment deleted"),
        (status = 404, description = "No comment with this id")
    )
)]
pub async fn delete_comment(
    Auth(_caller): Auth,
    Path(id): Path<String>,
    State(state): State<AppState>,
) -> Result<StatusCode, ApiError> {
    state.comments.delete(&id)?;
    Ok(StatusCode::NO_CONTENT)
}
