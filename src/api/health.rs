// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Agora Platform

//! Health probes. `/health` reports readiness including the comment store;
//! `/health/live` only says the process responds.

use axum::{extract::State, http::StatusCode, Json};
use serde::Serialize;
use utoipa::ToSchema;

use crate::state::AppState;

/// Readiness report for the service and its dependencies.
#[derive(Debug, Serialize, ToSchema)]
pub struct ReadyResponse {
    /// "ok" when every check passed, "degraded" otherwise.
    pub status: String,
    /// Per-component results.
    pub checks: HealthChecks,
}

/// Per-component readiness results.
#[derive(Debug, Serialize, ToSchema)]
pub struct HealthChecks {
    /// The process itself. Always "ok" in a served response.
    pub service: String,
    /// "ok" when the comment store directory is reachable, "missing"
    /// otherwise.
    pub store: String,
}

/// Body of the liveness probe.
#[derive(Debug, Serialize, ToSchema)]
pub struct HealthResponse {
    pub status: String,
}

/// Readiness probe.
///
/// Degrades to 503 when the comment store directory has gone away, so an
/// orchestrator stops routing traffic here before writes start failing.
#[utoipa::path(
    get,
    path = "/health",
    tag = "Health",
    responses(
        (status = 200, description = "Ready to serve requests", body = ReadyResponse),
        (status = 503, description = "A dependency is unavailable", body = ReadyResponse)
    )
)]
pub async fn health(State(state): State<AppState>) -> (StatusCode, Json<ReadyResponse>) {
    let store_ok = state.comments.store_ready();
    let status = if store_ok {
        StatusCode::OK
    } else {
        StatusCode::SERVICE_UNAVAILABLE
    };

    let body = ReadyResponse {
        status: if store_ok { "ok" } else { "degraded" }.to_string(),
        checks: HealthChecks {
            service: "ok".to_string(),
            store: if store_ok { "ok" } else { "missing" }.to_string(),
        },
    };

    (status, Json(body))
}

/// Liveness probe. Says nothing about dependencies; see `/health`.
#[utoipa::path(
    get,
    path = "/health/live",
    tag = "Health",
    responses((status = 200, description = "Process is responding", body = HealthResponse))
)]
pub async fn liveness() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok".to_string(),
    })
}
