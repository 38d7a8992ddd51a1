use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// Instance-wide settings. At most one row exists; its id is fixed to 1.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, FromRow)]
pub struct Setting {
    pub id: i64,
    pub is_registration_enabled: bool,
    /// JSON envelope (hex iv + hex content) produced by the secret codec.
    pub proxy_password: Option<String>,
    pub proxy_user: Option<String>,
    pub proxy_hash: Option<String>,
    pub is_traefik_used: bool,
    pub is_auto_update_enabled: bool,
    pub arch: Option<String>,
    pub dns_servers: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, FromRow)]
pub struct Destination {
    pub id: i64,
    pub name: String,
    pub engine: String,
    pub network: String,
    pub is_coolify_proxy_used: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, FromRow)]
pub struct GitSource {
    pub id: i64,
    pub name: String,
    #[sqlx(rename = "type")]
    #[serde(rename = "type")]
    pub source_type: GitSourceType,
    pub api_url: String,
    pub html_url: String,
    pub for_public: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Git provider kind, stored as lowercase TEXT.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, sqlx::Type)]
#[serde(rename_all = "lowercase")]
#[sqlx(rename_all = "lowercase")]
pub enum GitSourceType {
    Github,
    Gitlab,
}

impl GitSourceType {
    pub fn as_str(self) -> &'static str {
        match self {
            GitSourceType::Github => "github",
            GitSourceType::Gitlab => "gitlab",
        }
    }
}
