pub mod pages;
pub mod predict;

pub use pages::*;
pub use predict::*;

use crate::domain::Prediction;
use crate::error::{HeartbeatError, Result};

/// Run a diagnosis on the blocking pool so inference never stalls the reactor.
pub(crate) async fn run_blocking<F>(job: F) -> Result<Prediction>
where
    F: FnOnce() -> Result<Prediction> + Send + 'static,
{
    tokio::task::spawn_blocking(job)
        .await
        .map_err(|e| HeartbeatError::Internal(format!("diagnosis task failed: {e}")))?
}
