use tracing::{debug, info};

use crate::db::{DestinationCreate, SeedStore};
use crate::error::SeedError;

/// Engine socket of the host's own Docker daemon.
pub const LOCAL_DOCKER_ENGINE: &str = "/var/run/docker.sock";

/// Registers the local Docker socket as a deployment destination if it is
/// not known yet. Existing rows are never modified.
pub async fn ensure_local_docker(store: &SeedStore) -> Result<(), SeedError> {
    if store
        .find_destination_by_engine(LOCAL_DOCKER_ENGINE)
        .await?
        .is_some()
    {
        debug!(
            engine = LOCAL_DOCKER_ENGINE,
            "local docker destination already present"
        );
        return Ok(());
    }

    let create = DestinationCreate {
        name: "Local Docker".to_string(),
        engine: LOCAL_DOCKER_ENGINE.to_string(),
        network: "coolify".to_string(),
        is_coolify_proxy_used: true,
    };
    match store.create_destination(create).await? {
        Some(id) => info!(id, engine = LOCAL_DOCKER_ENGINE, "local docker destination created"),
        None => debug!(
            engine = LOCAL_DOCKER_ENGINE,
            "local docker destination appeared concurrently"
        ),
    }
    Ok(())
}
