use std::{net::SocketAddr, sync::Arc};

use tokio::signal;
use tower_http::{
    compression::CompressionLayer,
    cors::CorsLayer,
};
use tracing::{error, info};

use erp_schema as api;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cfg = api::config::load_config()?;
    api::config::init_tracing(cfg.log_level(), cfg.log_json);

    // Init DB
    let db = Arc::new(api::db::establish_connection_from_app_config(&cfg).await?);
    let app_state = api::AppState::new(db.clone(), cfg.clone());

    if cfg.auto_migrate {
        app_state.migrations.run_pending(None).await.map_err(|e| {
            error!("Failed running migrations: {}", e);
            e
        })?;
    }

    let mut app = api::app_router(app_state).layer(CompressionLayer::new());
    if cfg.is_development() {
        info!("Using permissive CORS in the development environment");
        app = app.layer(CorsLayer::permissive());
    }

    // Bind and serve
    let addr: SocketAddr = format!("{}:{}", cfg.host, cfg.port).parse()?;
    info!("erp-schema listening on http://{}", addr);
    let listener = tokio::net::TcpListener::bind(addr).await?;

    axum::serve(listener, app.into_make_service())
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("Server stopped; closing database pool");
    if let Ok(db) = Arc::try_unwrap(db) {
        api::db::close_pool(db).await?;
    }

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
        use tokio::signal::unix::{signal, SignalKind};

        let mut sigterm =
            signal(SignalKind::terminate()).expect("failed to install signal handler");
        sigterm.recv().await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }
}
