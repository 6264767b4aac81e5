use async_trait::async_trait;
use axum::Router;

/// Context handed to lifecycle hooks; carries the resolved settings.
pub struct InitCtx<'a> {
    pub settings: &'a crate::settings::Settings,
}

/// Contract every SHELF module fulfils.
///
/// The registry drives the lifecycle: `init` for every module in
/// registration order, then `start`, then `stop` in reverse order once
/// serving ends. Everything except `name` has a do-nothing default so small
/// modules only implement what they use.
#[async_trait]
pub trait Module: Send + Sync {
    /// Stable module name; doubles as the mount segment under `/api`.
    fn name(&self) -> &'static str;

    /// One-time setup, run before the server binds.
    async fn init(&self, _ctx: &InitCtx<'_>) -> anyhow::Result<()> {
        Ok(())
    }

    /// Router for this module's endpoints, mounted under `/api/{name}`.
    fn routes(&self) -> Router {
        Router::new()
    }

    /// OpenAPI fragment merged into the served document. Paths are given
    /// relative to the mount point.
    fn openapi(&self) -> Option<serde_json::Value> {
        None
    }

    /// Hook for background work; runs after every module has initialized.
    async fn start(&self, _ctx: &InitCtx<'_>) -> anyhow::Result<()> {
        Ok(())
    }

    /// Teardown during shutdown.
    async fn stop(&self) -> anyhow::Result<()> {
        Ok(())
    }
}
