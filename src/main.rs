// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Agora Platform

use std::sync::Arc;

use agora_comments::api::router;
use agora_comments::auth::{HttpIdentityResolver, TokenVerifier};
use agora_comments::comments::CommentService;
use agora_comments::config::AppConfig;
use agora_comments::state::AppState;
use agora_comments::store::CommentStore;
use tracing::info;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() {
    dotenvy::dotenv().ok();
    init_tracing();

    let config = AppConfig::from_env().expect("Failed to load configuration");

    let store = CommentStore::open(&config.data_dir).expect("Failed to open comment store");
    let resolver = Arc::new(HttpIdentityResolver::new(config.auth_service_url.clone()));
    let comments = CommentService::new(Arc::new(store), resolver);
    let verifier = TokenVerifier::new(&config.jwt_secret);

    let state = AppState::new(comments, verifier);
    let app = router(state);

    let addr = format!("{}:{}", config.host, config.port);
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .expect("Failed to bind listen address");

    info!("Comment service listening on http://{addr} (docs at /docs)");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .expect("Server failed");
}

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("info,tower_http=debug"));

    let subscriber = tracing_subscriber::fmt().with_env_filter(filter);

    match std::env::var("LOG_FORMAT").as_deref() {
        Ok("json") => subscriber.json().init(),
        _ => subscriber.init(),
    }
}

async fn shutdown_signal() {
    tokio::signal::ctrl_c()
        .await
        .expect("Failed to install Ctrl+C handler");
    info!("Shutdown signal received, draining connections");
}
