use figment::{
    Figment,
    providers::{Env, Format, Serialized, Toml},
};
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;
use std::path::PathBuf;

use crate::error::SeedError;

/// Seeder configuration managed by Figment.
///
/// Values merge in priority order: struct defaults, then `config.toml` if
/// present, then `COOLIFY_`-prefixed environment variables. The loaded
/// config is passed explicitly to the seeding entry point; there is no
/// process-global instance.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct SeedConfig {
    /// Database URL for SQLite.
    /// Env: `COOLIFY_DATABASE_URL`. Default: `sqlite://coolify.db`.
    #[serde(default = "default_database_url")]
    pub database_url: String,

    /// Symmetric key for secret encryption (must be 32 bytes when used).
    /// Env: `COOLIFY_SECRET_KEY`. No default; only required when a new
    /// settings row has to be created.
    #[serde(default)]
    #[serde(deserialize_with = "deserialize_string_lax")]
    pub secret_key: String,

    /// Opt-in flag for automatic updates. Only the literal string `true`
    /// enables the feature; any other value leaves it disabled.
    /// Env: `COOLIFY_AUTO_UPDATE`. Default: empty (disabled).
    #[serde(default)]
    #[serde(deserialize_with = "deserialize_string_lax")]
    pub auto_update: String,

    /// CPU architecture recorded on the settings row at creation.
    /// Env: `COOLIFY_ARCH`. Default: the architecture this binary was
    /// compiled for.
    #[serde(default = "default_arch")]
    pub arch: String,

    /// Log level for tracing subscriber initialization (e.g., "error",
    /// "warn", "info", "debug", "trace").
    /// Env: `COOLIFY_LOGLEVEL`. Default: `info`.
    #[serde(default = "default_loglevel")]
    pub loglevel: String,
}

impl Default for SeedConfig {
    fn default() -> Self {
        Self {
            database_url: default_database_url(),
            secret_key: String::new(),
            auto_update: String::new(),
            arch: default_arch(),
            loglevel: default_loglevel(),
        }
    }
}

const DEFAULT_CONFIG_FILE: &str = "config.toml";

impl SeedConfig {
    /// Builds a Figment that merges defaults, an optional config TOML file,
    /// and prefixed environment variables.
    pub fn figment() -> Figment {
        let figment = Figment::new().merge(Serialized::defaults(SeedConfig::default()));
        let figment = if PathBuf::from(DEFAULT_CONFIG_FILE).is_file() {
            figment.merge(Toml::file(DEFAULT_CONFIG_FILE))
        } else {
            figment
        };
        figment.merge(Env::prefixed("COOLIFY_"))
    }

    /// Loads configuration from all sources.
    pub fn load() -> Result<Self, SeedError> {
        Ok(Self::figment().extract()?)
    }

    /// Whether automatic updates were opted into. The check is strict: the
    /// configured value must equal the literal string `true`.
    pub fn is_auto_update_enabled(&self) -> bool {
        self.auto_update == "true"
    }
}

// Env values arrive through Figment's inference, so `COOLIFY_AUTO_UPDATE=true`
// parses as a boolean and numeric keys parse as numbers. Fold those back into
// the string the rest of the code compares against.
fn deserialize_string_lax<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    let v = Value::deserialize(deserializer)?;

    match v {
        Value::String(s) => Ok(s),
        Value::Number(n) => Ok(n.to_string()),
        Value::Bool(b) => Ok(b.to_string()),
        _ => Err(serde::de::Error::custom(
            "expected a string, number, or boolean",
        )),
    }
}

/// Default SQLite database URL.
fn default_database_url() -> String {
    "sqlite://coolify.db".to_string()
}

/// Default architecture string, taken from the build target.
fn default_arch() -> String {
    std::env::consts::ARCH.to_string()
}

/// Default log level for the tracing subscriber.
fn default_loglevel() -> String {
    "info".to_string()
}
