//! CLI configuration.

use anyhow::{bail, Context, Result};
use qkart_commerce::Currency;
use qkart_data::DEFAULT_ENDPOINT;
use serde::{Deserialize, Serialize};

/// Environment variable that overrides `api.endpoint`.
pub const ENDPOINT_ENV: &str = "QKART_API_ENDPOINT";

/// CLI configuration file.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CliConfig {
    /// Backend settings.
    #[serde(default)]
    pub api: ApiConfig,

    /// Session persistence.
    #[serde(default)]
    pub session: SessionConfig,

    /// Display preferences.
    #[serde(default)]
    pub display: DisplayConfig,
}

impl CliConfig {
    /// Load config from a file.
    pub fn load(path: &str) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path))?;

        if path.ends_with(".json") {
            serde_json::from_str(&content)
                .with_context(|| format!("Failed to parse JSON config: {}", path))
        } else {
            toml::from_str(&content)
                .with_context(|| format!("Failed to parse TOML config: {}", path))
        }
    }

    /// Save config to a file.
    pub fn save(&self, path: &str) -> Result<()> {
        let content = if path.ends_with(".json") {
            serde_json::to_string_pretty(self)?
        } else {
            toml::to_string_pretty(self)?
        };

        std::fs::write(path, content)
            .with_context(|| format!("Failed to write config file: {}", path))
    }

    /// The API root, with the environment override applied.
    pub fn endpoint(&self) -> String {
        match std::env::var(ENDPOINT_ENV) {
            Ok(value) if !value.trim().is_empty() => value.trim().to_string(),
            _ => self.api.endpoint.clone(),
        }
    }

    /// Currency label for displayed amounts.
    pub fn currency(&self) -> Result<Currency> {
        Currency::from_code(&self.display.currency)
            .with_context(|| format!("Unknown display.currency: {}", self.display.currency))
    }

    /// Read a value by dotted key.
    pub fn get(&self, key: &str) -> Result<String> {
        let parts: Vec<&str> = key.split('.').collect();

        match parts.as_slice() {
            ["api", "endpoint"] => Ok(self.api.endpoint.clone()),
            ["session", "path"] => Ok(self
                .session
                .path
                .clone()
                .unwrap_or_else(|| "(default)".to_string())),
            ["display", "currency"] => Ok(self.display.currency.clone()),
            ["display", "show_ratings"] => Ok(self.display.show_ratings.to_string()),
            _ => bail!("Unknown config key: {}", key),
        }
    }

    /// Write a value by dotted key.
    pub fn set(&mut self, key: &str, value: &str) -> Result<()> {
        let parts: Vec<&str> = key.split('.').collect();

        match parts.as_slice() {
            ["api", "endpoint"] => self.api.endpoint = value.to_string(),
            ["session", "path"] => self.session.path = Some(value.to_string()),
            ["display", "currency"] => {
                if Currency::from_code(value).is_none() {
                    bail!("Unknown currency code: {}", value);
                }
                self.display.currency = value.to_uppercase();
            }
            ["display", "show_ratings"] => self.display.show_ratings = value.parse()?,
            _ => bail!("Unknown config key: {}", key),
        }

        Ok(())
    }

    /// Problems that would make commands fail.
    pub fn validate(&self) -> Vec<String> {
        let mut errors = Vec::new();
        let endpoint = &self.api.endpoint;
        if !(endpoint.starts_with("http://") || endpoint.starts_with("https://")) {
            errors.push(format!("api.endpoint must be an http(s) URL: {}", endpoint));
        }
        if Currency::from_code(&self.display.currency).is_none() {
            errors.push(format!("display.currency is not supported: {}", self.display.currency));
        }
        errors
    }
}

/// Backend settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiConfig {
    /// API root, e.g. `https://host/api/v1`.
    #[serde(default = "default_endpoint")]
    pub endpoint: String,
}

fn default_endpoint() -> String {
    DEFAULT_ENDPOINT.to_string()
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            endpoint: default_endpoint(),
        }
    }
}

/// Session persistence.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SessionConfig {
    /// Session file. Defaults to `~/.local/share/qkart/session.json`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub path: Option<String>,
}

/// Display preferences.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DisplayConfig {
    /// ISO code used to label amounts. No conversion is applied.
    #[serde(default = "default_currency")]
    pub currency: String,

    /// Show star ratings in product listings.
    #[serde(default = "default_true")]
    pub show_ratings: bool,
}

fn default_currency() -> String {
    Currency::default().code().to_string()
}

fn default_true() -> bool {
    true
}

impl Default for DisplayConfig {
    fn default() -> Self {
        Self {
            currency: default_currency(),
            show_ratings: true,
        }
    }
}

/// Generate a default qkart.toml config file.
pub fn generate_default_config() -> String {
    format!(
        r#"# QKart storefront configuration

[api]
endpoint = "{endpoint}"

[session]
# path = "~/.local/share/qkart/session.json"

[display]
currency = "{currency}"
show_ratings = true
"#,
        endpoint = DEFAULT_ENDPOINT,
        currency = default_currency(),
    )
}
