use std::path::Path;

use config::{Config, ConfigError, Environment, File};
use serde::Deserialize;

/// Runtime configuration.
///
/// Built-in defaults are overridden by `trivia.toml` and then by `TRIVIA_*`
/// environment variables.
#[derive(Debug, Clone, Deserialize)]
pub struct Settings {
    pub host: String,
    pub port: u16,
    pub database_path: String,
    /// Path every API route is nested under.
    pub api_prefix: String,
}

impl Settings {
    pub fn load() -> Result<Self, ConfigError> {
        dotenv::dotenv().ok();
        Self::load_from(Path::new("trivia.toml"))
    }

    pub fn load_from(file: &Path) -> Result<Self, ConfigError> {
        Config::builder()
            .set_default("host", "0.0.0.0")?
            .set_default("port", 8080_i64)?
            .set_default("database_path", "trivia.db")?
            .set_default("api_prefix", "/api")?
            .add_source(File::from(file).required(false))
            .add_source(Environment::with_prefix("TRIVIA"))
            .build()?
            .try_deserialize()
    }

    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}
