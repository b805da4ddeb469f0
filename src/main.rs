use focusgrid::{load_data, resolve_data_path, router, AppState};
use std::{env, net::SocketAddr, time::Duration};
use tokio::fs;
use tracing::info;
use tracing_subscriber::{fmt, EnvFilter};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    fmt()
        .with_env_filter(EnvFilter::from_default_env().add_directive("info".parse()?))
        .init();

    let data_path = resolve_data_path()?;
    if let Some(parent) = data_path.parent() {
        fs::create_dir_all(parent).await?;
    }

    let data = load_data(&data_path).await;
    let state = AppState::new(data_path, data);
    let app = router(state.clone());

    let port = env::var("PORT")
        .ok()
        .and_then(|value| value.parse::<u16>().ok())
        .unwrap_or(8080);
    let addr = SocketAddr::from(([0, 0, 0, 0], port));

    info!("listening on http://{addr}");
    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal(state))
        .await?;

    Ok(())
}

/// Resolves when ctrl-c arrives or, if `HEARTBEAT_TIMEOUT_SECS` is set to a
/// positive value, when the page stops pinging `/heartbeat` for that long
/// (i.e. the browser window was closed).
async fn shutdown_signal(state: AppState) {
    let timeout = env::var("HEARTBEAT_TIMEOUT_SECS")
        .ok()
        .and_then(|value| value.parse::<u64>().ok())
        .filter(|secs| *secs > 0)
        .map(Duration::from_secs);

    let watchdog = async {
        match timeout {
            Some(timeout) => loop {
                tokio::time::sleep(Duration::from_secs(1)).await;
                if state.heartbeat_age().await > timeout {
                    info!("no heartbeat for {timeout:?}, shutting down");
                    break;
                }
            },
            None => std::future::pending::<()>().await,
        }
    };

    tokio::select! {
        _ = tokio::signal::ctrl_c() => {}
        _ = watchdog => {}
    }
}
