//! Application settings and configuration management

use crate::error::{AppError, Result};
use crate::prompt::{BackgroundCatalog, BackgroundDescriptor};
use config::{Config, Environment, File};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Root configuration structure
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct Settings {
    #[serde(default)]
    pub server: ServerConfig,
    #[serde(default)]
    pub gemini: GeminiConfig,
    #[serde(default)]
    pub logging: LoggingConfig,
    #[serde(default)]
    pub download: DownloadConfig,
    /// Catalog override; the built-in scenes are used when empty
    #[serde(default)]
    pub backgrounds: Vec<BackgroundDescriptor>,
}

/// Server configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ServerConfig {
    #[serde(default = "default_host")]
    pub host: String,
    #[serde(default = "default_port")]
    pub port: u16,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
        }
    }
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    8080
}

/// Gemini API configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct GeminiConfig {
    #[serde(default)]
    pub api_key: Option<String>,
    #[serde(default = "default_base_url")]
    pub base_url: String,
    #[serde(default = "default_model")]
    pub model: String,
    /// No timeout is applied unless set
    #[serde(default)]
    pub timeout_ms: Option<u64>,
}

impl Default for GeminiConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            base_url: default_base_url(),
            model: default_model(),
            timeout_ms: None,
        }
    }
}

fn default_base_url() -> String {
    "https://generativelanguage.googleapis.com".to_string()
}

fn default_model() -> String {
    "gemini-2.5-flash-image-preview".to_string()
}

/// Logging configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct LoggingConfig {
    #[serde(default = "default_log_level")]
    pub level: String,
    #[serde(default = "default_log_format")]
    pub format: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            format: default_log_format(),
        }
    }
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_log_format() -> String {
    "json".to_string()
}

/// Result download configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct DownloadConfig {
    #[serde(default = "default_file_name")]
    pub file_name: String,
}

impl Default for DownloadConfig {
    fn default() -> Self {
        Self {
            file_name: default_file_name(),
        }
    }
}

fn default_file_name() -> String {
    "ai-wardrobe-creation.png".to_string()
}

impl Settings {
    /// Load settings from configuration files and environment variables
    pub fn load() -> Result<Self> {
        Self::load_from_path("config/default.toml")
    }

    /// Load settings from a specific configuration file path
    pub fn load_from_path<P: AsRef<Path>>(path: P) -> Result<Self> {
        let config = Config::builder()
            // Start with default values
            .set_default("server.host", default_host())?
            .set_default("server.port", 8080)?
            .set_default("gemini.base_url", default_base_url())?
            .set_default("gemini.model", default_model())?
            // Load from configuration file
            .add_source(File::with_name(path.as_ref().to_str().unwrap_or("config/default")).required(false))
            // Override with environment variables (prefixed with WARDROBE_)
            .add_source(
                Environment::with_prefix("WARDROBE")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?;

        let mut settings: Settings = config.try_deserialize()?;

        if settings.gemini.api_key.is_none() {
            settings.gemini.api_key = std::env::var("GEMINI_API_KEY")
                .or_else(|_| std::env::var("API_KEY"))
                .ok()
                .filter(|key| !key.is_empty());
        }

        Ok(settings)
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<()> {
        if self.server.port == 0 {
            return Err(AppError::Config(config::ConfigError::Message(
                "Server port cannot be 0".to_string(),
            )));
        }

        if self.gemini.model.is_empty() {
            return Err(AppError::Config(config::ConfigError::Message(
                "Gemini model cannot be empty".to_string(),
            )));
        }

        if self.download.file_name.is_empty() {
            return Err(AppError::Config(config::ConfigError::Message(
                "Download file name cannot be empty".to_string(),
            )));
        }

        if !self.backgrounds.is_empty() {
            BackgroundCatalog::new(self.backgrounds.clone()).map_err(|e| {
                AppError::Config(config::ConfigError::Message(e.to_string()))
            })?;
        }

        Ok(())
    }

    /// The background catalog in effect for this configuration
    pub fn catalog(&self) -> Result<BackgroundCatalog> {
        if self.backgrounds.is_empty() {
            Ok(BackgroundCatalog::builtin())
        } else {
            BackgroundCatalog::new(self.backgrounds.clone())
        }
    }
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            server: ServerConfig::default(),
            gemini: GeminiConfig::default(),
            logging: LoggingConfig::default(),
            download: DownloadConfig::default(),
            backgrounds: vec![],
        }
    }
}
