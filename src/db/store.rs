//! Pool-backed store with the typed queries the seeder runs.

use chrono::Utc;
use serde::{Deserialize, Serialize};
use sqlx::SqlitePool;
use sqlx::sqlite::{SqliteConnectOptions, SqliteJournalMode, SqlitePoolOptions, SqliteSynchronous};
use std::{str::FromStr, time::Duration};
use tracing::{debug, info};

use crate::db::models::{Destination, GitSource, GitSourceType, Setting};
use crate::db::schema::SQLITE_INIT;
use crate::error::SeedError;

/// Settings id is fixed by the schema; there is never more than one row.
const SETTINGS_ID: i64 = 1;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SettingCreate {
    pub is_registration_enabled: bool,
    /// JSON envelope from the secret codec; `None` leaves the column NULL.
    pub proxy_password: Option<String>,
    pub proxy_user: String,
    pub arch: String,
    pub dns_servers: String,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SettingPatch {
    /// `None` => do not change; `Some(v)` => update
    pub is_traefik_used: Option<bool>,
    /// `None` => do not change; `Some(v)` => update
    pub is_auto_update_enabled: Option<bool>,
    /// `true` => reset the stored proxy hash to NULL
    pub clear_proxy_hash: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DestinationCreate {
    pub name: String,
    pub engine: String,
    pub network: String,
    pub is_coolify_proxy_used: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GitSourceCreate {
    pub name: String,
    pub source_type: GitSourceType,
    pub api_url: String,
    pub html_url: String,
    pub for_public: bool,
}

/// Owns the SQLite pool for the lifetime of a seed run.
pub struct SeedStore {
    pool: SqlitePool,
}

impl SeedStore {
    /// Opens (creating if missing) the database and applies the schema.
    pub async fn connect(database_url: &str) -> Result<Self, SeedError> {
        let connect_opts = SqliteConnectOptions::from_str(database_url)?
            .create_if_missing(true)
            .busy_timeout(Duration::from_secs(5))
            .journal_mode(SqliteJournalMode::Wal)
            .synchronous(SqliteSynchronous::Normal);

        let pool = SqlitePoolOptions::new().connect_with(connect_opts).await?;

        apply_schema(&pool).await?;

        info!("seed store initialized");
        Ok(Self { pool })
    }

    /// Closes the pool. Safe to call exactly once at the end of a run.
    pub async fn close(&self) {
        self.pool.close().await;
    }

    /// Returns the settings row if one exists.
    pub async fn find_settings(&self) -> Result<Option<Setting>, SeedError> {
        let row = sqlx::query_as::<_, Setting>(
            r#"
        SELECT id, is_registration_enabled, proxy_password, proxy_user, proxy_hash,
               is_traefik_used, is_auto_update_enabled, arch, dns_servers, created_at, updated_at
        FROM settings
        LIMIT 1
        "#,
        )
        .fetch_optional(&self.pool)
        .await?;

        Ok(row)
    }

    /// Inserts the settings row. Returns `None` when another writer got
    /// there first; the caller treats that the same as "already existed".
    pub async fn create_settings(&self, create: SettingCreate) -> Result<Option<i64>, SeedError> {
        let now = Utc::now();
        let id: Option<i64> = sqlx::query_scalar(
            r#"
        INSERT INTO settings (
            id, is_registration_enabled, proxy_password, proxy_user, arch, dns_servers, created_at, updated_at
        )
        VALUES (?, ?, ?, ?, ?, ?, ?, ?)
        ON CONFLICT(id) DO NOTHING
        RETURNING id
        "#,
        )
        .bind(SETTINGS_ID)
        .bind(create.is_registration_enabled)
        .bind(create.proxy_password)
        .bind(create.proxy_user)
        .bind(create.arch)
        .bind(create.dns_servers)
        .bind(now)
        .bind(now)
        .fetch_optional(&self.pool)
        .await?;

        Ok(id)
    }

    /// Applies a partial update to the settings row by id.
    pub async fn update_settings(&self, id: i64, patch: SettingPatch) -> Result<(), SeedError> {
        let SettingPatch {
            is_traefik_used,
            is_auto_update_enabled,
            clear_proxy_hash,
        } = patch;

        let is_traefik_used_set = is_traefik_used.is_some();
        let is_auto_update_enabled_set = is_auto_update_enabled.is_some();
        let updated_at = Utc::now();

        // COALESCE keeps untouched columns; the hash reset needs its own CASE
        // because the goal there is writing NULL, not keeping it.
        let res = sqlx::query(
            r#"
            UPDATE settings
            SET
                is_traefik_used = COALESCE(?, is_traefik_used),
                is_auto_update_enabled = COALESCE(?, is_auto_update_enabled),
                proxy_hash = CASE WHEN ? THEN NULL ELSE proxy_hash END,
                updated_at = ?
            WHERE id = ?
            "#,
        )
        .bind(is_traefik_used)
        .bind(is_auto_update_enabled)
        .bind(clear_proxy_hash)
        .bind(updated_at)
        .bind(id)
        .execute(&self.pool)
        .await?;

        let affected = res.rows_affected();
        debug!(
            id,
            affected,
            updated_at = %updated_at,
            is_traefik_used_set,
            is_auto_update_enabled_set,
            clear_proxy_hash,
            "settings patch applied"
        );

        if affected == 0 {
            return Err(SeedError::UnexpectedError(format!(
                "settings row not found for id={id}"
            )));
        }

        Ok(())
    }

    /// Returns the destination with the given engine socket, if any.
    pub async fn find_destination_by_engine(
        &self,
        engine: &str,
    ) -> Result<Option<Destination>, SeedError> {
        let row = sqlx::query_as::<_, Destination>(
            r#"
        SELECT id, name, engine, network, is_coolify_proxy_used, created_at, updated_at
        FROM destinations
        WHERE engine = ?
        "#,
        )
        .bind(engine)
        .fetch_optional(&self.pool)
        .await?;

        Ok(row)
    }

    /// Inserts a destination. Returns `None` if one with the same engine
    /// already exists.
    pub async fn create_destination(
        &self,
        create: DestinationCreate,
    ) -> Result<Option<i64>, SeedError> {
        let now = Utc::now();
        let id: Option<i64> = sqlx::query_scalar(
            r#"
        INSERT INTO destinations (name, engine, network, is_coolify_proxy_used, created_at, updated_at)
        VALUES (?, ?, ?, ?, ?, ?)
        ON CONFLICT(engine) DO NOTHING
        RETURNING id
        "#,
        )
        .bind(create.name)
        .bind(create.engine)
        .bind(create.network)
        .bind(create.is_coolify_proxy_used)
        .bind(now)
        .bind(now)
        .fetch_optional(&self.pool)
        .await?;

        Ok(id)
    }

    /// Returns the public git source registered for the given site URL.
    pub async fn find_public_git_source(
        &self,
        html_url: &str,
    ) -> Result<Option<GitSource>, SeedError> {
        let row = sqlx::query_as::<_, GitSource>(
            r#"
        SELECT id, name, type, api_url, html_url, for_public, created_at, updated_at
        FROM git_sources
        WHERE html_url = ? AND for_public = 1
        "#,
        )
        .bind(html_url)
        .fetch_optional(&self.pool)
        .await?;

        Ok(row)
    }

    /// Inserts a git source. Returns `None` if a public row for the same
    /// site URL already exists.
    pub async fn create_git_source(
        &self,
        create: GitSourceCreate,
    ) -> Result<Option<i64>, SeedError> {
        let now = Utc::now();
        let id: Option<i64> = sqlx::query_scalar(
            r#"
        INSERT INTO git_sources (name, type, api_url, html_url, for_public, created_at, updated_at)
        VALUES (?, ?, ?, ?, ?, ?, ?)
        ON CONFLICT(html_url) WHERE for_public = 1 DO NOTHING
        RETURNING id
        "#,
        )
        .bind(create.name)
        .bind(create.source_type)
        .bind(create.api_url)
        .bind(create.html_url)
        .bind(create.for_public)
        .bind(now)
        .bind(now)
        .fetch_optional(&self.pool)
        .await?;

        Ok(id)
    }
}

async fn apply_schema(pool: &SqlitePool) -> Result<(), SeedError> {
    for stmt in SQLITE_INIT.split(';') {
        let s = stmt.trim();
        if s.is_empty() {
            continue;
        }
        sqlx::query(s).execute(pool).await?;
    }
    Ok(())
}
