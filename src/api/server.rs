use std::future::Future;
use tokio::net::TcpListener;
use tracing::info;

use crate::api::{create_router, AppState};
use crate::error::{HeartbeatError, Result};

/// Bind and serve until `shutdown` resolves.
pub async fn start_server<F>(state: AppState, host: &str, port: u16, shutdown: F) -> Result<()>
where
    F: Future<Output = ()> + Send + 'static,
{
    let app = create_router(state);

    let listener = TcpListener::bind((host, port)).await?;
    let addr = listener.local_addr()?;
    info!("Heartbeat diagnosis UI listening on http://{}", addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown)
        .await
        .map_err(|e| HeartbeatError::Internal(format!("server error: {e}")))?;

    info!("Server stopped");
    Ok(())
}
