//! Seeding pipeline. Every step is idempotent: first runs populate a fresh
//! database, later runs converge it to the same state.

mod destination;
mod git_source;
mod settings;

pub use destination::{LOCAL_DOCKER_ENGINE, ensure_local_docker};
pub use git_source::ensure_public_sources;
pub use settings::{apply_auto_update, ensure_settings};

use crate::config::SeedConfig;
use crate::db::SeedStore;
use crate::error::SeedError;

/// Runs the full pipeline against the configured database. The connection
/// pool is closed before returning, whether seeding succeeded or not.
pub async fn run(cfg: &SeedConfig) -> Result<(), SeedError> {
    let store = SeedStore::connect(&cfg.database_url).await?;
    let result = seed_all(&store, cfg).await;
    store.close().await;
    result
}

async fn seed_all(store: &SeedStore, cfg: &SeedConfig) -> Result<(), SeedError> {
    ensure_settings(store, cfg).await?;
    apply_auto_update(store, cfg).await?;
    ensure_local_docker(store).await?;
    ensure_public_sources(store).await
}
