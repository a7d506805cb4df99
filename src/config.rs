use std::{collections::HashMap, env};

use config::{Config as ConfigBuilder, ConfigError, Environment, File};
use mpwebstudio_notification::EmailConfig;
use serde::Deserialize;

#[derive(Debug, Deserialize, Clone)]
pub struct Config {
    pub server: ServerConfig,
    #[serde(default)]
    pub cors: CorsConfig,
    #[serde(default)]
    pub mail: EmailConfig,
    #[serde(default)]
    pub observability: ObservabilityConfig,
}

#[derive(Debug, Deserialize, Clone)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    /// Maximum accepted request body, in bytes.
    pub body_limit: usize,
}

#[derive(Debug, Deserialize, Clone)]
pub struct CorsConfig {
    /// Browser origins allowed to call the API, matched exactly.
    #[serde(default = "default_allowed_origins")]
    pub allowed_origins: Vec<String>,
}

impl Default for CorsConfig {
    fn default() -> Self {
        Self {
            allowed_origins: default_allowed_origins(),
        }
    }
}

fn default_allowed_origins() -> Vec<String> {
    vec![
        "https://mpwebstudio.rs".to_string(),
        "https://www.mpwebstudio.rs".to_string(),
        "http://localhost:5500".to_string(),
        "http://127.0.0.1:5500".to_string(),
    ]
}

#[derive(Debug, Deserialize, Clone)]
pub struct ObservabilityConfig {
    #[serde(default = "default_log_level")]
    pub log_level: String,
    /// Emit JSON log lines instead of the console format.
    #[serde(default)]
    pub json: bool,
}

impl Default for ObservabilityConfig {
    fn default() -> Self {
        Self {
            log_level: default_log_level(),
            json: false,
        }
    }
}

fn default_log_level() -> String {
    "info".to_string()
}

/// Unprefixed variables of the original deployment and the keys they set.
const LEGACY_ENV: [(&str, &str); 10] = [
    ("PORT", "server.port"),
    ("SMTP_HOST", "mail.smtp_host"),
    ("SMTP_PORT", "mail.smtp_port"),
    ("SMTP_SECURE", "mail.smtp_secure"),
    ("SMTP_USER", "mail.smtp_username"),
    ("SMTP_PASS", "mail.smtp_password"),
    ("MAIL_TO", "mail.to_address"),
    ("MAIL_FROM", "mail.from_address"),
    ("MAIL_RELAY", "mail.relay"),
    ("LOG_LEVEL", "observability.log_level"),
];

impl Config {
    /// Load configuration from file and environment variables
    ///
    /// Priority (highest to lowest):
    /// 1. Legacy environment variables (PORT, SMTP_HOST, MAIL_TO, etc.)
    /// 2. Prefixed environment variables (MPWEBSTUDIO__SERVER__PORT, etc.)
    /// 3. Config file specified by path
    /// 4. Hardcoded defaults
    pub fn load(config_path: Option<String>) -> Result<Self, ConfigError> {
        Self::from_env(config_path, env::vars().collect())
    }

    /// Same as [`Config::load`] but reads variables from `vars` instead of the process.
    pub fn from_env(
        config_path: Option<String>,
        vars: HashMap<String, String>,
    ) -> Result<Self, ConfigError> {
        let mut builder = ConfigBuilder::builder()
            .set_default("server.host", "0.0.0.0")?
            .set_default("server.port", 3000)?
            .set_default("server.body_limit", 200 * 1024)?;

        let config_file_path = config_path
            .or_else(|| vars.get("CONFIG_PATH").cloned())
            .unwrap_or_else(|| "config/default.toml".to_string());

        // Optional, ignored if not found
        if std::path::Path::new(&config_file_path).exists() {
            builder = builder.add_source(File::with_name(&config_file_path));
        }

        builder = builder.add_source(
            Environment::with_prefix("MPWEBSTUDIO")
                .separator("__")
                .try_parsing(true)
                .list_separator(",")
                .with_list_parse_key("cors.allowed_origins")
                .source(Some(vars.clone())),
        );

        for (var, key) in LEGACY_ENV {
            if let Some(value) = vars.get(var) {
                builder = builder.set_override(key, value.as_str())?;
            }
        }

        builder.build()?.try_deserialize()
    }

    /// Validate configuration
    pub fn validate(&self) -> Result<(), String> {
        if self.server.port == 0 {
            return Err("Server port must be greater than 0".to_string());
        }
        if self.server.body_limit == 0 {
            return Err("Server body_limit must be greater than 0".to_string());
        }
        if self.cors.allowed_origins.is_empty() {
            return Err("At least one allowed origin is required".to_string());
        }
        if let Some(origin) = self
            .cors
            .allowed_origins
            .iter()
            .find(|origin| !is_origin(origin))
        {
            return Err(format!(
                "Allowed origin {origin:?} must look like scheme://host[:port]"
            ));
        }
        Ok(())
    }
}

fn is_origin(value: &str) -> bool {
    let Some(host) = value
        .strip_prefix("https://")
        .or_else(|| value.strip_prefix("http://"))
    else {
        return false;
    };

    !host.is_empty() && !host.contains('/')
}
