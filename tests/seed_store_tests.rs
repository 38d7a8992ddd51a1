use coolify_seed::db::{
    DestinationCreate, GitSourceCreate, GitSourceType, SeedStore, SettingCreate, SettingPatch,
};
use std::collections::hash_map::DefaultHasher;
use std::hash::{Hash, Hasher};
use std::path::PathBuf;
use std::time::SystemTime;
use tokio::fs;

fn temp_database(tag: &str) -> (PathBuf, String) {
    let tmp_dir = std::env::temp_dir();
    let mut hasher = DefaultHasher::new();
    SystemTime::now().hash(&mut hasher);
    tag.hash(&mut hasher);
    let db_file_name = format!("test_store_{}_{}.sqlite", tag, hasher.finish());
    let db_path = tmp_dir.join(db_file_name);
    let database_url = format!("sqlite:{}", db_path.to_str().unwrap());
    (db_path, database_url)
}

async fn cleanup(db_path: &PathBuf) {
    let wal_path = PathBuf::from(format!("{}-wal", db_path.to_string_lossy()));
    let shm_path = PathBuf::from(format!("{}-shm", db_path.to_string_lossy()));
    let _ = fs::remove_file(&wal_path).await;
    let _ = fs::remove_file(&shm_path).await;
    fs::remove_file(db_path).await.unwrap();
}

fn sample_settings() -> SettingCreate {
    SettingCreate {
        is_registration_enabled: true,
        proxy_password: Some("{\"iv\":\"00\",\"content\":\"ff\"}".to_string()),
        proxy_user: "user-a".to_string(),
        arch: "x64".to_string(),
        dns_servers: "1.1.1.1,8.8.8.8".to_string(),
    }
}

fn sample_destination(engine: &str) -> DestinationCreate {
    DestinationCreate {
        name: "Local Docker".to_string(),
        engine: engine.to_string(),
        network: "coolify".to_string(),
        is_coolify_proxy_used: true,
    }
}

fn sample_source(html_url: &str, for_public: bool) -> GitSourceCreate {
    GitSourceCreate {
        name: "Github Public".to_string(),
        source_type: GitSourceType::Github,
        api_url: "https://api.github.com".to_string(),
        html_url: html_url.to_string(),
        for_public,
    }
}

#[tokio::test]
async fn test_create_conflicts_resolve_as_already_exists() {
    let (db_path, database_url) = temp_database("conflicts");
    let store = SeedStore::connect(&database_url).await.unwrap();

    // 1. Settings: the singleton insert wins once, then reports the conflict
    assert!(store.find_settings().await.unwrap().is_none());
    let first = store.create_settings(sample_settings()).await.unwrap();
    assert_eq!(first, Some(1), "Singleton row id is fixed to 1");
    let second = store.create_settings(sample_settings()).await.unwrap();
    assert!(second.is_none(), "Second insert should be a benign conflict");

    let found = store.find_settings().await.unwrap().unwrap();
    assert_eq!(found.proxy_user.as_deref(), Some("user-a"));

    // 2. Destinations: engine uniqueness
    let first = store
        .create_destination(sample_destination("/var/run/docker.sock"))
        .await
        .unwrap();
    assert!(first.is_some());
    let second = store
        .create_destination(sample_destination("/var/run/docker.sock"))
        .await
        .unwrap();
    assert!(second.is_none(), "Duplicate engine should be a benign conflict");
    let other = store
        .create_destination(sample_destination("tcp://10.0.0.5:2376"))
        .await
        .unwrap();
    assert!(other.is_some(), "A different engine is a separate destination");

    // 3. Git sources: uniqueness applies to public rows per site URL
    let first = store
        .create_git_source(sample_source("https://github.com", true))
        .await
        .unwrap();
    assert!(first.is_some());
    let second = store
        .create_git_source(sample_source("https://github.com", true))
        .await
        .unwrap();
    assert!(second.is_none(), "Duplicate public source should be a benign conflict");

    store.close().await;
    cleanup(&db_path).await;
}

#[tokio::test]
async fn test_public_uniqueness_ignores_private_rows() {
    let (db_path, database_url) = temp_database("partial");
    let store = SeedStore::connect(&database_url).await.unwrap();

    let public = store
        .create_git_source(sample_source("https://github.com", true))
        .await
        .unwrap();
    assert!(public.is_some());

    // A private row for the same site URL does not collide
    let private = store
        .create_git_source(sample_source("https://github.com", false))
        .await
        .unwrap();
    assert!(private.is_some(), "Private rows are outside the unique index");

    // And the public lookup still resolves to the public row
    let found = store
        .find_public_git_source("https://github.com")
        .await
        .unwrap()
        .expect("public row should be found");
    assert_eq!(found.id, public.unwrap());
    assert!(found.for_public);

    store.close().await;
    cleanup(&db_path).await;
}

#[tokio::test]
async fn test_update_settings_without_row_errors() {
    let (db_path, database_url) = temp_database("norow");
    let store = SeedStore::connect(&database_url).await.unwrap();

    let patch = SettingPatch {
        is_traefik_used: Some(true),
        ..SettingPatch::default()
    };
    let err = store.update_settings(1, patch).await.unwrap_err();
    assert!(
        matches!(err, coolify_seed::SeedError::UnexpectedError(_)),
        "Unexpected error: {err}"
    );

    store.close().await;
    cleanup(&db_path).await;
}

#[tokio::test]
async fn test_settings_patch_clears_hash_and_keeps_other_fields() {
    let (db_path, database_url) = temp_database("patch");
    let store = SeedStore::connect(&database_url).await.unwrap();

    let id = store
        .create_settings(sample_settings())
        .await
        .unwrap()
        .expect("fresh database should accept the insert");

    // Give the row a hash through a raw write so the clear is observable
    let pool = sqlx::SqlitePool::connect(&database_url).await.unwrap();
    sqlx::query("UPDATE settings SET proxy_hash = 'stale-hash' WHERE id = ?")
        .bind(id)
        .execute(&pool)
        .await
        .unwrap();
    pool.close().await;

    let patch = SettingPatch {
        is_traefik_used: Some(true),
        clear_proxy_hash: true,
        ..SettingPatch::default()
    };
    store.update_settings(id, patch).await.unwrap();

    let row = store.find_settings().await.unwrap().unwrap();
    assert!(row.is_traefik_used);
    assert!(row.proxy_hash.is_none(), "Hash should be reset to NULL");
    assert!(
        row.is_registration_enabled,
        "Fields outside the patch must be untouched"
    );
    assert_eq!(row.proxy_user.as_deref(), Some("user-a"));
    assert!(row.proxy_password.is_some());
    assert!(
        !row.is_auto_update_enabled,
        "Unset patch fields must not change the row"
    );

    store.close().await;
    cleanup(&db_path).await;
}
