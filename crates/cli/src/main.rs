use anyhow::Context;
use clap::{Parser, Subcommand};

use shelf_kernel::settings::Settings;

#[derive(Parser)]
#[command(name = "shelf-cli", version, about = "Operational helper for SHELF deployments")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Resolve the layered configuration and print the effective settings
    Config {
        /// Emit machine-readable JSON instead of summary lines
        #[arg(long)]
        json: bool,
    },
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt::try_init().ok();

    let cli = Cli::parse();

    match cli.command {
        Command::Config { json } => print_config(json),
    }
}

/// Load settings exactly the way the server does and print the result,
/// so a deploy can be smoke-checked without binding a port.
fn print_config(json: bool) -> anyhow::Result<()> {
    let settings = Settings::load().with_context(|| "failed to load SHELF settings")?;

    tracing::info!(env = ?settings.environment, "effective configuration resolved");

    if json {
        let rendered = serde_json::to_string_pretty(&settings)
            .context("failed to render settings as JSON")?;
        println!("{rendered}");
    } else {
        println!("environment: {:?}", settings.environment);
        println!("listen: {}:{}", settings.server.host, settings.server.port);
        println!("request timeout: {}ms", settings.server.request_timeout_ms);
        println!("log format: {:?}", settings.telemetry.log_format);
    }

    Ok(())
}
