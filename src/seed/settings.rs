use tracing::info;
use uuid::Uuid;

use crate::config::SeedConfig;
use crate::crypto::{DEFAULT_PASSWORD_LENGTH, SecretCodec, generate_password};
use crate::db::{SeedStore, SettingCreate, SettingPatch};
use crate::error::SeedError;

/// First pass over the settings row: create it on a fresh database,
/// otherwise bring the pre-existing row up to date. The two branches are
/// mutually exclusive within a run.
pub async fn ensure_settings(store: &SeedStore, cfg: &SeedConfig) -> Result<(), SeedError> {
    match store.find_settings().await? {
        None => {
            // The key is only touched on this branch; update-only runs must
            // succeed without one.
            let codec = SecretCodec::from_key_bytes(cfg.secret_key.as_bytes())?;
            let password = generate_password(DEFAULT_PASSWORD_LENGTH)?;
            let proxy_password = codec
                .encrypt(&password)
                .map(|payload| serde_json::to_string(&payload))
                .transpose()?;

            let create = SettingCreate {
                is_registration_enabled: true,
                proxy_password,
                proxy_user: Uuid::new_v4().to_string(),
                arch: cfg.arch.clone(),
                dns_servers: "1.1.1.1,8.8.8.8".to_string(),
            };
            match store.create_settings(create).await? {
                Some(id) => info!(id, "settings row created"),
                None => info!("settings row already present; keeping it as is"),
            }
        }
        Some(existing) => {
            let patch = SettingPatch {
                is_traefik_used: Some(true),
                clear_proxy_hash: true,
                ..SettingPatch::default()
            };
            store.update_settings(existing.id, patch).await?;
            info!(id = existing.id, "settings row updated for existing install");
        }
    }
    Ok(())
}

/// Second pass: record the auto update opt-in on the settings row. This
/// pass only updates; a database without a settings row is left alone.
pub async fn apply_auto_update(store: &SeedStore, cfg: &SeedConfig) -> Result<(), SeedError> {
    if let Some(settings) = store.find_settings().await? {
        let enabled = cfg.is_auto_update_enabled();
        let patch = SettingPatch {
            is_auto_update_enabled: Some(enabled),
            ..SettingPatch::default()
        };
        store.update_settings(settings.id, patch).await?;
        info!(id = settings.id, enabled, "auto update preference recorded");
    }
    Ok(())
}
