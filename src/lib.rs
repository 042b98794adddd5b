// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Agora Platform

//! Agora Comments - Campaign Comment Service
//!
//! This crate provides the comment management service for the Agora
//! citizen-participation platform. Citizens attach comments to campaigns
//! after authenticating against the central identity service.
//!
//! ## Modules
//!
//! - `api` - HTTP API handlers (Axum)
//! - `auth` - Token verification and remote identity resolution
//! - `comments` - Comment lifecycle management
//! - `store` - File-backed comment persistence

pub mod api;
pub mod auth;
pub mod comments;
pub mod config;
pub mod error;
pub mod models;
pub mod state;
pub mod store;
