use anyhow::Context;

use shelf_app::modules;
use shelf_kernel::{settings::Settings, InitCtx, ModuleRegistry};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let settings = Settings::load().context("failed to load SHELF settings")?;
    shelf_telemetry::init(&settings.telemetry);

    tracing::info!(
        environment = ?settings.environment,
        host = %settings.server.host,
        port = settings.server.port,
        "shelf-app bootstrap starting"
    );

    let mut registry = ModuleRegistry::new();
    modules::register_all(&mut registry);

    let ctx = InitCtx {
        settings: &settings,
    };
    registry.init_all(&ctx).await?;
    registry.start_all(&ctx).await?;

    shelf_http::start_server(&registry, &settings).await?;

    registry.stop_all().await?;
    Ok(())
}
