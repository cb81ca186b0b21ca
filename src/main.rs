use ironlog::config::CONFIG;
use ironlog::server::{IronlogState, ironlog_router};
use mimalloc::MiMalloc;
use std::net::SocketAddr;
use std::sync::Arc;
use tokio::{net::TcpListener, signal};
use tracing::{info, warn};
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

#[global_allocator]
static GLOBAL: MiMalloc = MiMalloc;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    dotenvy::dotenv().ok();

    let cfg = &*CONFIG;
    let basic = &cfg.basic;
    let sync_cfg = cfg.sync();

    let env_filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(basic.loglevel.clone()));
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
        database_url = %basic.database_url,
        loglevel = %basic.loglevel,
        listen_addr = %basic.listen_addr,
        listen_port = basic.listen_port,
        api_key = basic.api_key.is_some(),
        sync_configured = sync_cfg.is_configured(),
        sync_proxy = %sync_cfg.proxy.as_ref().map_or("<none>", |u| u.as_str()),
    );
    if basic.api_key.is_none() {
        warn!("basic.api_key is not set; /api routes are open to anyone who can reach the server");
    }

    let db = ironlog::db::spawn(&basic.database_url).await?;
    db.seed_builtins().await?;

    let state = IronlogState::new(
        db,
        sync_cfg,
        basic.api_key.as_deref().map(Arc::from),
        basic.insecure_cookie,
        basic.settings_path.as_str(),
    );
    let app = ironlog_router(state);

    let addr = SocketAddr::from((basic.listen_addr, basic.listen_port));
    let listener = TcpListener::bind(addr).await?;
    info!("HTTP server listening on {}", addr);
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;
    info!("Server has shut down gracefully.");
    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        signal::ctrl_c()
            .await
            .expect("failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        signal::unix::signal(signal::unix::SignalKind::terminate())
            .expect("failed to install signal handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => {},
        () = terminate => {},
    }
}
