use tracing::{debug, info};

use crate::db::{GitSourceCreate, GitSourceType, SeedStore};
use crate::error::SeedError;

/// Registers the public github and gitlab integrations if they are not
/// known yet. Existing rows are never modified.
pub async fn ensure_public_sources(store: &SeedStore) -> Result<(), SeedError> {
    ensure_public_source(
        store,
        GitSourceCreate {
            name: "Github Public".to_string(),
            source_type: GitSourceType::Github,
            api_url: "https://api.github.com".to_string(),
            html_url: "https://github.com".to_string(),
            for_public: true,
        },
    )
    .await?;

    ensure_public_source(
        store,
        GitSourceCreate {
            name: "Gitlab Public".to_string(),
            source_type: GitSourceType::Gitlab,
            api_url: "https://gitlab.com/api/v4".to_string(),
            html_url: "https://gitlab.com".to_string(),
            for_public: true,
        },
    )
    .await
}

async fn ensure_public_source(
    store: &SeedStore,
    create: GitSourceCreate,
) -> Result<(), SeedError> {
    if store
        .find_public_git_source(&create.html_url)
        .await?
        .is_some()
    {
        debug!(html_url = %create.html_url, "public git source already present");
        return Ok(());
    }

    let kind = create.source_type;
    let html_url = create.html_url.clone();
    match store.create_git_source(create).await? {
        Some(id) => {
            info!(id, source_type = kind.as_str(), html_url = %html_url, "public git source created");
        }
        None => debug!(html_url = %html_url, "public git source appeared concurrently"),
    }
    Ok(())
}
