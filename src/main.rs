use std::process::ExitCode;
use tracing::{error, info};
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

use coolify_seed::SeedConfig;

#[tokio::main]
async fn main() -> ExitCode {
    dotenvy::dotenv().ok();

    let cfg = match SeedConfig::load() {
        Ok(cfg) => cfg,
        Err(e) => {
            // The subscriber is not up yet, so report on stderr directly.
            eprintln!("failed to load configuration: {e}");
            return ExitCode::FAILURE;
        }
    };

    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(cfg.loglevel.clone()));
    tracing_subscriber::registry()
        .with(env_filter)
        .with(
            tracing_subscriber::fmt::layer()
                .compact()
                .with_level(true)
                .with_target(false),
        )
        .init();

    info!(
        database_url = %cfg.database_url,
        arch = %cfg.arch,
        auto_update = cfg.is_auto_update_enabled(),
        loglevel = %cfg.loglevel,
        "starting seed run"
    );

    if let Err(e) = coolify_seed::seed::run(&cfg).await {
        error!(error = %e, "seed run failed");
        return ExitCode::FAILURE;
    }

    info!("seed run complete");
    ExitCode::SUCCESS
}
