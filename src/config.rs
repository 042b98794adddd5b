// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Agora Platform

//! # Runtime Configuration
//!
//! Configuration is loaded from the environment once at startup into an
//! [`AppConfig`] and handed to the components that need it. A `.env` file is
//! honored in development (loaded by `main` before this module runs).
//!
//! ## Environment Variables
//!
//! | Variable | Description | Default |
//! |----------|-------------|---------|
//! | `AUTH_SERVICE_URL` | Base URL of the authentication service | `http://localhost:8081` |
//! | `JWT_SECRET` | Base64-encoded HS256 secret for token verification | Required |
//! | `DATA_DIR` | Root directory for comment storage | `data` |
//! | `HOST` | Server bind address | `0.0.0.0` |
//! | `PORT` | Server bind port | `8080` |
//! | `LOG_FORMAT` | Logging format (`json` or `pretty`) | `pretty` |
//! | `RUST_LOG` | Log level filter | `info,tower_http=debug` |

use std::env;
use std::path::PathBuf;

use base64ct::{Base64, Encoding};
use thiserror::Error;
use url::Url;

/// Environment variable name for the authentication service base URL.
pub const AUTH_SERVICE_URL_ENV: &str = "AUTH_SERVICE_URL";

/// Environment variable name for the base64-encoded token-signing secret.
///
/// The identity service signs access tokens with HS256; this service verifies
/// them with the same shared secret. The variable holds the secret
/// base64-encoded and it is decoded here, at load time.
pub const JWT_SECRET_ENV: &str = "JWT_SECRET";

/// Environment variable name for the comment storage root directory.
pub const DATA_DIR_ENV: &str = "DATA_DIR";

/// Environment variable name for the server bind address.
pub const HOST_ENV: &str = "HOST";

/// Environment variable name for the server bind port.
pub const PORT_ENV: &str = "PORT";

const DEFAULT_AUTH_SERVICE_URL: &str = "http://localhost:8081";
const DEFAULT_DATA_DIR: &str = "data";
const DEFAULT_HOST: &str = "0.0.0.0";
const DEFAULT_PORT: u16 = 8080;

/// Error raised when the environment is missing or malformed.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("{0} is not set")]
    Missing(&'static str),
    #[error("{name} is invalid: {reason}")]
    Invalid { name: &'static str, reason: String },
}

/// Application configuration resolved from the environment.
#[derive(Clone)]
pub struct AppConfig {
    /// Base URL of the authentication service (no trailing slash required).
    pub auth_service_url: String,
    /// Decoded HS256 secret shared with the identity service.
    pub jwt_secret: Vec<u8>,
    /// Root directory for the comment store.
    pub data_dir: PathBuf,
    /// Bind address.
    pub host: String,
    /// Bind port.
    pub port: u16,
}

impl AppConfig {
    /// Load configuration from the environment.
    ///
    /// Fails fast on a missing or undecodable `JWT_SECRET` and on an
    /// unparseable `AUTH_SERVICE_URL`; everything else falls back to
    /// defaults.
    pub fn from_env() -> Result<Self, ConfigError> {
        let auth_service_url = env::var(AUTH_SERVICE_URL_ENV)
            .unwrap_or_else(|_| DEFAULT_AUTH_SERVICE_URL.to_string());
        Url::parse(&auth_service_url).map_err(|e| ConfigError::Invalid {
            name: AUTH_SERVICE_URL_ENV,
            reason: e.to_string(),
        })?;

        let encoded_secret =
            env::var(JWT_SECRET_ENV).map_err(|_| ConfigError::Missing(JWT_SECRET_ENV))?;
        let jwt_secret = decode_secret(&encoded_secret)?;

        let data_dir =
            PathBuf::from(env::var(DATA_DIR_ENV).unwrap_or_else(|_| DEFAULT_DATA_DIR.to_string()));

        let host = env::var(HOST_ENV).unwrap_or_else(|_| DEFAULT_HOST.to_string());
        let port = match env::var(PORT_ENV) {
            Ok(raw) => raw.parse().map_err(|_| ConfigError::Invalid {
                name: PORT_ENV,
                reason: format!("not a port number: {raw}"),
            })?,
            Err(_) => DEFAULT_PORT,
        };

        Ok(Self {
            auth_service_url,
            jwt_secret,
            data_dir,
            host,
            port,
        })
    }
}

/// Decode the base64-encoded signing secret.
///
/// The identity service stores the shared secret base64-encoded, so an empty
/// or undecodable value means the deployment is misconfigured rather than
/// "no auth".
fn decode_secret(encoded: &str) -> Result<Vec<u8>, ConfigError> {
    if encoded.trim().is_empty() {
        return Err(ConfigError::Missing(JWT_SECRET_ENV));
    }
    let secret = Base64::decode_vec(encoded.trim()).map_err(|e| ConfigError::Invalid {
        name: JWT_SECRET_ENV,
        reason: e.to_string(),
    })?;
    if secret.is_empty() {
        return Err(ConfigError::Missing(JWT_SECRET_ENV));
    }
    Ok(secret)
}

#[cfg(test)]
mod tests {
    use super::*;
    use base64::engine::general_purpose::STANDARD;
    use base64::Engine as _;

    #[test]
    fn decode_secret_accepts_base64() {
        let encoded = STANDARD.encode(b"comment-service-secret");
        let secret = decode_secret(&encoded).unwrap();
        assert_eq!(secret, b"comment-service-secret");
    }

    #[test]
    fn decode_secret_rejects_empty() {
        assert!(matches!(
            decode_secret(""),
            Err(ConfigError::Missing(JWT_SECRET_ENV))
        ));
        assert!(matches!(
            decode_secret("   "),
            Err(ConfigError::Missing(JWT_SECRET_ENV))
        ));
    }

    #[test]
    fn decode_secret_rejects_invalid_base64() {
        assert!(matches!(
            decode_secret("not base64!!!"),
            Err(ConfigError::Invalid { .. })
        ));
    }

    #[test]
    fn config_error_messages_name_the_variable() {
        let err = ConfigError::Missing(JWT_SECRET_ENV);
        assert_eq!(err.to_string(), "JWT_SECRET is not set");
    }
}
