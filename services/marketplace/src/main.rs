use anyhow::Context as _;
use sea_orm::Database;
use tokio::signal;
use tracing::info;

use estate_auth_types::identity::JwtSecret;
use estate_core::config::Config as _;
use estate_core::tracing::init_tracing;
use estate_marketplace::config::MarketplaceConfig;
use estate_marketplace::infra::media::{HttpMediaStore, MediaConfig};
use estate_marketplace::infra::places::StaticPlaceDirectory;
use estate_marketplace::router::{HttpSettings, build_router};
use estate_marketplace::state::AppState;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    init_tracing();

    let config = MarketplaceConfig::from_env().context("load configuration")?;

    let db = Database::connect(&config.database_url)
        .await
        .context("connect to database")?;

    let http = reqwest::Client::builder()
        .timeout(std::time::Duration::from_secs(60))
        .build()
        .context("build image store client")?;
    let media = HttpMediaStore::new(
        http,
        MediaConfig {
            base_url: config.media_base_url.clone(),
            cloud_name: config.cloudinary_cloud_name.clone(),
            api_key: config.cloudinary_api_key.clone(),
            api_secret: config.cloudinary_api_secret.clone(),
        },
    );

    let settings = HttpSettings {
        allowed_origins: config.allowed_origins(),
        max_body_bytes: config.max_body_bytes,
    };
    let state = AppState {
        db,
        jwt_secret: JwtSecret::new(config.jwt_secret.as_str()),
        media,
        places: StaticPlaceDirectory,
    };

    let router = build_router(state, &settings);
    let addr = format!("0.0.0.0:{}", config.port);
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .with_context(|| format!("bind {addr}"))?;

    info!("marketplace service listening on {addr}");
    axum::serve(listener, router)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("server error")?;
    info!("marketplace service stopped");
    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            tracing::error!(error = %e, "failed to listen for ctrl-c");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut stream) => {
                stream.recv().await;
            }
            Err(e) => {
                tracing::error!(error = %e, "failed to install SIGTERM handler");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }
    info!("shutdown signal received");
}
