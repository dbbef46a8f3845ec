pub mod tracing;

use figment::{providers::Format, Figment};
use serde::Deserialize;

#[derive(Debug, Clone, Deserialize)]
pub struct AppCfg {
    pub database_url: String,
    #[serde(default = "default_bind_addr")]
    pub bind_addr: String,
    #[serde(default = "default_max_connections")]
    pub max_connections: usize,
    /// Glob tera loads templates from.
    #[serde(default = "default_templates")]
    pub templates: String,
}

fn default_bind_addr() -> String {
    "0.0.0.0:3000".to_owned()
}

fn default_max_connections() -> usize {
    10
}

fn default_templates() -> String {
    "src/templates/**/*".to_owned()
}

impl AppCfg {
    /// `appsettings.json`, overridden by `APP_*` environment variables.
    pub fn load() -> Result<Self, figment::Error> {
        Self::figment().extract()
    }

    pub fn figment() -> Figment {
        Figment::new()
            .merge(figment::providers::Json::file("appsettings.json"))
            .merge(figment::providers::Env::prefixed("APP_"))
    }
}
