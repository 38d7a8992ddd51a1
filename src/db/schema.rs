//! SQL DDL for initializing the instance database.
//! SQLite-first design; uniqueness rules live in the schema so concurrent
//! seed runs degrade to benign conflicts instead of duplicate rows.

/// SQLite schema includes:
/// - `settings` table (instance-wide settings, at most one row, id fixed to 1)
/// - `destinations` table (deployment targets, one per container engine)
/// - `git_sources` table (git provider integrations, one public row per site URL)
pub const SQLITE_INIT: &str = r#"
-- ---------------------------------------------------------------------------
-- Instance settings (singleton row)
-- ---------------------------------------------------------------------------
CREATE TABLE IF NOT EXISTS settings (
    id INTEGER PRIMARY KEY CHECK (id = 1),
    is_registration_enabled INTEGER NOT NULL DEFAULT 0,
    proxy_password TEXT NULL,
    proxy_user TEXT NULL,
    proxy_hash TEXT NULL,
    is_traefik_used INTEGER NOT NULL DEFAULT 0,
    is_auto_update_enabled INTEGER NOT NULL DEFAULT 0,
    arch TEXT NULL,
    dns_servers TEXT NULL,
    created_at TEXT NOT NULL, -- RFC3339
    updated_at TEXT NOT NULL -- RFC3339
);

-- ---------------------------------------------------------------------------
-- Deployment destinations (one per container engine socket)
-- ---------------------------------------------------------------------------
CREATE TABLE IF NOT EXISTS destinations (
    id INTEGER PRIMARY KEY NOT NULL,
    name TEXT NOT NULL,
    engine TEXT NOT NULL,
    network TEXT NOT NULL,
    is_coolify_proxy_used INTEGER NOT NULL DEFAULT 0,
    created_at TEXT NOT NULL, -- RFC3339
    updated_at TEXT NOT NULL, -- RFC3339
    UNIQUE(engine)
);

-- ---------------------------------------------------------------------------
-- Git provider integrations (one public row per site URL)
-- ---------------------------------------------------------------------------
CREATE TABLE IF NOT EXISTS git_sources (
    id INTEGER PRIMARY KEY NOT NULL,
    name TEXT NOT NULL,
    type TEXT NOT NULL,
    api_url TEXT NOT NULL,
    html_url TEXT NOT NULL,
    for_public INTEGER NOT NULL DEFAULT 0,
    created_at TEXT NOT NULL, -- RFC3339
    updated_at TEXT NOT NULL -- RFC3339
);

CREATE UNIQUE INDEX IF NOT EXISTS idx_git_sources_public_html_url
    ON git_sources(html_url) WHERE for_public = 1;
"#;
