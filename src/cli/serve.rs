use crate::api;
use crate::cli::commands::ServeArgs;
use crate::config::NavGuardConfig;
use crate::errors::NavGuardError;
use tracing::info;

pub async fn handle_serve(args: ServeArgs, mut config: NavGuardConfig) -> Result<(), NavGuardError> {
    if let Some(host) = args.host {
        config.bridge.host = host;
    }
    if let Some(port) = args.port {
        config.bridge.port = port;
    }

    let addr = format!("{}:{}", config.bridge.host, config.bridge.port);
    info!(
        addr = %addr,
        oracle = %config.oracle.endpoint,
        oracle_enabled = config.oracle.enabled,
        "Starting bridge"
    );

    let state = api::create_app_state(config)?;
    let interceptor = state.interceptor.clone();
    let app = api::build_router(state);

    let listener = tokio::net::TcpListener::bind(&addr).await?;
    info!("Listening on {}", addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(async {
            let _ = tokio::signal::ctrl_c().await;
            info!("Shutdown requested");
        })
        .await
        .map_err(|e| NavGuardError::Internal(format!("Server error: {}", e)))?;

    interceptor.shutdown();
    Ok(())
}
