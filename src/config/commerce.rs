//! Assembles the Medusa configuration document from an [`EnvSnapshot`].
//!
//! Optional modules are switched on by the presence of their variables and
//! silently left out otherwise. Required values (database URL, secrets) are
//! passed through as-is; the framework reports them at startup.

use crate::config::EnvSnapshot;
use crate::utils::error::Result;
use serde::{Deserialize, Serialize};

pub const UPLOAD_DIR: &str = "static";

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum ModuleKey {
    File,
    EventBus,
    Notification,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct CommerceConfig {
    pub project_config: ProjectConfig,
    pub admin: AdminConfig,
    pub modules: Vec<ModuleEntry>,
    pub plugins: Vec<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ProjectConfig {
    pub database_url: Option<String>,
    pub database_logging: bool,
    pub redis_url: Option<String>,
    pub worker_mode: String,
    pub http: HttpConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct HttpConfig {
    pub admin_cors: Option<String>,
    pub auth_cors: Option<String>,
    pub store_cors: Option<String>,
    pub jwt_secret: Option<String>,
    pub cookie_secret: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct AdminConfig {
    pub backend_url: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ModuleEntry {
    pub key: ModuleKey,
    pub resolve: String,
    pub options: ModuleOptions,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(untagged)]
pub enum ModuleOptions {
    Providers { providers: Vec<ProviderEntry> },
    EventBus {
        #[serde(rename = "redisUrl")]
        redis_url: String,
    },
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ProviderEntry {
    pub resolve: String,
    pub id: String,
    pub options: ProviderOptions,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(untagged)]
pub enum ProviderOptions {
    LocalFile {
        upload_dir: String,
        backend_url: Option<String>,
    },
    Resend {
        channels: Vec<String>,
        api_key: String,
        from: String,
    },
}

impl CommerceConfig {
    pub fn module(&self, key: ModuleKey) -> Option<&ModuleEntry> {
        self.modules.iter().find(|m| m.key == key)
    }

    pub fn to_json_pretty(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// TOML has no null, so unset values are omitted rather than written out.
    pub fn to_toml(&self) -> Result<String> {
        Ok(toml::to_string_pretty(self)?)
    }
}

/// Pure function of the snapshot; reads nothing else.
pub fn assemble(env: &EnvSnapshot) -> CommerceConfig {
    let mut modules = vec![file_module(env)];

    if let Some(redis_url) = &env.redis_url {
        modules.push(ModuleEntry {
            key: ModuleKey::EventBus,
            resolve: "@medusajs/event-bus-redis".to_string(),
            options: ModuleOptions::EventBus {
                redis_url: redis_url.clone(),
            },
        });
    }

    if let (Some(api_key), Some(from)) = (&env.resend_api_key, &env.resend_from_email) {
        modules.push(ModuleEntry {
            key: ModuleKey::Notification,
            resolve: "@medusajs/notification".to_string(),
            options: ModuleOptions::Providers {
                providers: vec![ProviderEntry {
                    resolve: "./src/modules/email-notifications".to_string(),
                    id: "resend".to_string(),
                    options: ProviderOptions::Resend {
                        channels: vec!["email".to_string()],
                        api_key: api_key.clone(),
                        from: from.clone(),
                    },
                }],
            },
        });
    }

    CommerceConfig {
        project_config: ProjectConfig {
            database_url: env.database_url.clone(),
            database_logging: false,
            redis_url: env.redis_url.clone(),
            worker_mode: "background".to_string(),
            http: HttpConfig {
                admin_cors: env.admin_cors.clone(),
                auth_cors: env.auth_cors.clone(),
                store_cors: env.store_cors.clone(),
                jwt_secret: env.jwt_secret.clone(),
                cookie_secret: env.cookie_secret.clone(),
            },
        },
        admin: AdminConfig {
            backend_url: env.backend_url.clone(),
        },
        modules,
        plugins: Vec::new(),
    }
}

fn file_module(env: &EnvSnapshot) -> ModuleEntry {
    let backend_url = env
        .backend_url
        .as_deref()
        .map(|url| format!("{}/{}", url.trim_end_matches('/'), UPLOAD_DIR));

    ModuleEntry {
        key: ModuleKey::File,
        resolve: "@medusajs/file".to_string(),
        options: ModuleOptions::Providers {
            providers: vec![ProviderEntry {
                resolve: "@medusajs/file-local".to_string(),
                id: "local".to_string(),
                options: ProviderOptions::LocalFile {
                    upload_dir: UPLOAD_DIR.to_string(),
                    backend_url,
                },
            }],
        },
    }
}
