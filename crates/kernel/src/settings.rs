use std::path::PathBuf;

use anyhow::{anyhow, Context};
use serde::{Deserialize, Serialize};

const DEFAULT_ENV: &str = "local";
const ENV_VAR_NAME: &str = "SHELF_ENV";
const CONFIG_DIR_ENV: &str = "SHELF_CONFIG_DIR";

/// Deployment environment the process runs in. Selected by `SHELF_ENV` and
/// used to pick the `config/{env}.toml` overlay.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum Environment {
    #[default]
    Local,
    Staging,
    Production,
}

/// Effective configuration for every SHELF binary.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct Settings {
    #[serde(default)]
    pub environment: Environment,
    #[serde(default)]
    pub server: ServerSettings,
    #[serde(default)]
    pub telemetry: TelemetrySettings,
}

impl Settings {
    /// Resolve configuration from, in increasing precedence: `.env`,
    /// `config/base.toml`, `config/{SHELF_ENV}.toml`, then `SHELF_*`
    /// environment variables. Missing files are fine; every field has a
    /// default.
    pub fn load() -> anyhow::Result<Self> {
        let _ = dotenvy::dotenv();

        let env_name = std::env::var(ENV_VAR_NAME).unwrap_or_else(|_| DEFAULT_ENV.to_string());
        let environment = parse_environment(&env_name)?;
        let config_dir = resolve_config_dir()?;

        let layered = config::Config::builder()
            .add_source(config::File::from(config_dir.join("base.toml")).required(false))
            .add_source(
                config::File::from(config_dir.join(format!("{env_name}.toml"))).required(false),
            )
            .add_source(config::Environment::with_prefix("SHELF").separator("_"))
            .build()
            .context("failed to assemble configuration sources")?;

        let mut settings: Settings = layered
            .try_deserialize()
            .context("configuration does not match the settings schema")?;

        // The environment comes from SHELF_ENV, not from file contents.
        settings.environment = environment;
        Ok(settings)
    }
}

fn parse_environment(name: &str) -> anyhow::Result<Environment> {
    match name {
        "local" => Ok(Environment::Local),
        "staging" => Ok(Environment::Staging),
        "production" => Ok(Environment::Production),
        other => Err(anyhow!(
            "unsupported environment '{other}'; expected local, staging, or production"
        )),
    }
}

fn resolve_config_dir() -> anyhow::Result<PathBuf> {
    match std::env::var(CONFIG_DIR_ENV) {
        Ok(dir) => Ok(PathBuf::from(dir)),
        Err(_) => Ok(std::env::current_dir()
            .context("unable to resolve current directory")?
            .join("config")),
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerSettings {
    #[serde(default = "ServerSettings::default_host")]
    pub host: String,
    #[serde(default = "ServerSettings::default_port")]
    pub port: u16,
    #[serde(default = "ServerSettings::default_request_timeout_ms")]
    pub request_timeout_ms: u64,
}

impl ServerSettings {
    fn default_host() -> String {
        "0.0.0.0".to_string()
    }

    fn default_port() -> u16 {
        8080
    }

    fn default_request_timeout_ms() -> u64 {
        15000
    }
}

impl Default for ServerSettings {
    fn default() -> Self {
        Self {
            host: Self::default_host(),
            port: Self::default_port(),
            request_timeout_ms: Self::default_request_timeout_ms(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct TelemetrySettings {
    #[serde(default)]
    pub log_format: LogFormat,
}

/// Output shape of the tracing subscriber.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    #[default]
    Pretty,
    Json,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_environment_is_local() {
        let settings = Settings::default();
        assert_eq!(settings.environment, Environment::Local);
    }

    #[test]
    fn default_server_listens_on_any_interface() {
        let settings = Settings::default();
        assert_eq!(settings.server.host, "0.0.0.0");
        assert_eq!(settings.server.port, 8080);
        assert_eq!(settings.server.request_timeout_ms, 15000);
    }

    #[test]
    fn default_log_format_is_pretty() {
        let settings = Settings::default();
        assert_eq!(settings.telemetry.log_format, LogFormat::Pretty);
    }

    #[test]
    fn environment_names_parse_case_sensitively() {
        assert_eq!(parse_environment("local").unwrap(), Environment::Local);
        assert_eq!(parse_environment("staging").unwrap(), Environment::Staging);
        assert_eq!(
            parse_environment("production").unwrap(),
            Environment::Production
        );
        assert!(parse_environment("prod").is_err());
        assert!(parse_environment("Production").is_err());
    }
}
