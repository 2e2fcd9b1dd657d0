//! Handles settings for the application.
//!
//! Values come from an optional `settings.toml` in the working directory,
//! overridden by `FROTA__<SECTION>__<KEY>` environment variables, e.g.
//! `FROTA__SERVER__PORT=8080`.

use config::{Config, ConfigBuilder, ConfigError, Environment, File, builder::DefaultState};
use serde::Deserialize;

pub const DEFAULT_GATEWAY_URL: &str = "https://ai.gateway.lovable.dev/v1/chat/completions";
pub const DEFAULT_MODEL: &str = "google/gemini-3-flash-preview";

#[derive(Debug, Deserialize)]
pub struct App {
    pub level: String,
}

#[derive(Debug, Deserialize)]
pub struct Server {
    pub bind: String,
    pub port: u16,
    pub api_key: Option<String>,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ClassifierMode {
    /// Talk to the language model gateway directly.
    Gateway,
    /// Delegate to a remote classify endpoint.
    Endpoint,
}

#[derive(Debug, Deserialize)]
pub struct Classifier {
    pub mode: ClassifierMode,
    pub url: String,
    pub api_key: Option<String>,
    pub model: String,
    pub timeout_secs: u64,
}

#[derive(Debug, Deserialize)]
pub struct Engine {
    /// IANA zone used for "today"; the process local zone when absent.
    pub timezone: Option<String>,
    pub strict_drivers: bool,
    /// JSON file backing the store; in memory when absent.
    pub store_path: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct Settings {
    pub app: App,
    pub server: Server,
    pub classifier: Classifier,
    pub engine: Engine,
}

impl Settings {
    pub fn new() -> Result<Self, ConfigError> {
        defaults()?
            .add_source(File::with_name("settings").required(false))
            .add_source(
                Environment::with_prefix("FROTA")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?
            .try_deserialize()
    }
}

fn defaults() -> Result<ConfigBuilder<DefaultState>, ConfigError> {
    Config::builder()
        .set_default("app.level", "info")?
        .set_default("server.bind", "127.0.0.1")?
        .set_default("server.port", 3000)?
        .set_default("classifier.mode", "gateway")?
        .set_default("classifier.url", DEFAULT_GATEWAY_URL)?
        .set_default("classifier.model", DEFAULT_MODEL)?
        .set_default("classifier.timeout_secs", 30)?
        .set_default("engine.strict_drivers", false)
}
