#[cfg(feature = "cli")]
pub mod cli;
pub mod commerce;

use crate::core::subscriber::DEFAULT_BACKEND_URL;
use crate::utils::error::Result;
use crate::utils::validation::{validate_url, Validate};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

pub const DEFAULT_PORT: u16 = 9000;

/// Every environment value the crate consumes, captured once at startup.
///
/// Empty strings are treated as unset, so `REDIS_URL=` disables the event bus
/// the same way a missing variable does.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct EnvSnapshot {
    pub node_env: Option<String>,
    pub database_url: Option<String>,
    pub redis_url: Option<String>,
    pub admin_cors: Option<String>,
    pub auth_cors: Option<String>,
    pub store_cors: Option<String>,
    pub jwt_secret: Option<String>,
    pub cookie_secret: Option<String>,
    pub backend_url: Option<String>,
    pub resend_api_key: Option<String>,
    pub resend_from_email: Option<String>,
    pub resend_from: Option<String>,
    pub admin_api_token: Option<String>,
    pub publishable_key: Option<String>,
    pub port: u16,
    pub ci: bool,
    pub skip_prefetch: bool,
}

impl EnvSnapshot {
    /// Loads `.env` when present, then snapshots the process environment.
    pub fn from_env() -> Self {
        match dotenvy::dotenv() {
            Ok(path) => tracing::debug!("Loaded environment from {}", path.display()),
            Err(e) if e.not_found() => {}
            Err(e) => tracing::warn!("Ignoring unreadable .env file: {}", e),
        }
        Self::from_vars(std::env::vars())
    }

    pub fn from_vars<I, K, V>(vars: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        let mut map: HashMap<String, String> = vars
            .into_iter()
            .map(|(k, v)| (k.into(), v.into()))
            .filter(|(_, v)| !v.trim().is_empty())
            .collect();

        let port = match map.get("PORT").map(|p| p.parse::<u16>()) {
            Some(Ok(port)) => port,
            Some(Err(_)) => {
                tracing::warn!("PORT is not a valid port number, using {}", DEFAULT_PORT);
                DEFAULT_PORT
            }
            None => DEFAULT_PORT,
        };
        let flag = |name: &str| map.get(name).map(|v| v == "true").unwrap_or(false);
        let ci = flag("CI");
        let skip_prefetch = flag("NEXT_PUBLIC_SKIP_PREFETCH") || flag("NEXT_SKIP_BUILD_FETCH");

        Self {
            node_env: map.remove("NODE_ENV"),
            database_url: map.remove("DATABASE_URL"),
            redis_url: map.remove("REDIS_URL"),
            admin_cors: map.remove("ADMIN_CORS"),
            auth_cors: map.remove("AUTH_CORS"),
            store_cors: map.remove("STORE_CORS"),
            jwt_secret: map.remove("JWT_SECRET"),
            cookie_secret: map.remove("COOKIE_SECRET"),
            backend_url: map.remove("BACKEND_URL"),
            resend_api_key: map.remove("RESEND_API_KEY"),
            resend_from_email: map.remove("RESEND_FROM_EMAIL"),
            resend_from: map.remove("RESEND_FROM"),
            admin_api_token: map.remove("ADMIN_API_TOKEN"),
            publishable_key: map.remove("NEXT_PUBLIC_MEDUSA_PUBLISHABLE_KEY"),
            port,
            ci,
            skip_prefetch,
        }
    }

    /// Sender for ad-hoc CLI mail: `RESEND_FROM` wins over `RESEND_FROM_EMAIL`.
    pub fn sender_address(&self) -> Option<&str> {
        self.resend_from
            .as_deref()
            .or(self.resend_from_email.as_deref())
    }

    /// Features that stay disabled because their variables are missing.
    pub fn warnings(&self) -> Vec<String> {
        let mut warnings = Vec::new();
        if self.backend_url.is_none() {
            warnings.push(format!(
                "BACKEND_URL not set: file URLs are null and invite links point at {}",
                DEFAULT_BACKEND_URL
            ));
        }
        if self.redis_url.is_none() {
            warnings.push("REDIS_URL not set: event bus module disabled".to_string());
        }
        if self.resend_api_key.is_none() || self.resend_from_email.is_none() {
            warnings.push(
                "RESEND_API_KEY or RESEND_FROM_EMAIL not set: notification module disabled"
                    .to_string(),
            );
        }
        warnings
    }
}

/// Checks only what is set; absent values are a feature switch, not an error.
impl Validate for EnvSnapshot {
    fn validate(&self) -> Result<()> {
        if let Some(url) = &self.backend_url {
            validate_url("BACKEND_URL", url)?;
        }
        Ok(())
    }
}
