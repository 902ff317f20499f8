use std::env;
use std::path::{Path, PathBuf};

use serde::Deserialize;

use crate::error::{AppError, AppResult};

pub const DEFAULT_MODEL: &str = "gpt-4";
pub const DEFAULT_REPORT_FORMAT: &str = "markdown";

#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    pub data_paths: DataPaths,
    pub azure_openai: AzureOpenAIConfig,
    #[serde(default)]
    pub report_settings: ReportSettings,
}

#[derive(Debug, Clone, Deserialize)]
pub struct DataPaths {
    pub csv: PathBuf,
    pub ocr: PathBuf,
    pub images: PathBuf,
    pub output: PathBuf,
}

#[derive(Debug, Clone, Deserialize)]
pub struct AzureOpenAIConfig {
    #[serde(default)]
    pub api_key: String,
    #[serde(default)]
    pub api_version: String,
    #[serde(default)]
    pub endpoint: String,
    #[serde(default = "default_model")]
    pub model: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ReportSettings {
    #[serde(default = "default_report_format")]
    pub format: String,
}

impl Default for ReportSettings {
    fn default() -> Self {
        Self {
            format: default_report_format(),
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct TelemetryConfig {
    pub environment: String,
    pub service_name: String,
    /// OTLP export is enabled only when this is set.
    pub exporter_endpoint: Option<String>,
}

fn default_model() -> String {
    DEFAULT_MODEL.to_string()
}

fn default_report_format() -> String {
    DEFAULT_REPORT_FORMAT.to_string()
}

impl TelemetryConfig {
    pub fn from_env() -> Self {
        dotenvy::dotenv().ok();

        Self {
            environment: env::var("ENVIRONMENT").unwrap_or_else(|_| "development".to_string()),
            service_name: env::var("OTEL_SERVICE_NAME")
                .unwrap_or_else(|_| "daily-insights".to_string()),
            exporter_endpoint: env::var("OTEL_EXPORTER_OTLP_ENDPOINT")
                .ok()
                .filter(|v| !v.is_empty()),
        }
    }

    pub fn is_production(&self) -> bool {
        self.environment == "production"
    }
}

impl Config {
    /// Loads the YAML settings document at `path`, then layers `.env` and
    /// process environment overrides for the Azure OpenAI credentials.
    pub fn load(path: &Path) -> AppResult<Self> {
        dotenvy::dotenv().ok();
        Self::load_with(path, |key| env::var(key).ok())
    }

    /// Same as [`Config::load`] with overrides resolved through `lookup`.
    /// Required settings are validated after the overrides are applied.
    pub fn load_with(path: &Path, lookup: impl Fn(&str) -> Option<String>) -> AppResult<Self> {
        let raw = std::fs::read_to_string(path).map_err(|e| {
            AppError::Config(format!("failed to read {}: {e}", path.display()))
        })?;
        let mut config = Self::from_yaml(&raw)?;
        config.apply_overrides(lookup);
        config.validate()?;

        Ok(config)
    }

    pub fn from_yaml(raw: &str) -> AppResult<Self> {
        serde_yaml::from_str(raw).map_err(|e| AppError::Config(e.to_string()))
    }

    pub fn apply_overrides(&mut self, lookup: impl Fn(&str) -> Option<String>) {
        if let Some(key) = lookup("AZURE_OPENAI_API_KEY") {
            self.azure_openai.api_key = key;
        }
        if let Some(endpoint) = lookup("AZURE_OPENAI_ENDPOINT") {
            self.azure_openai.endpoint = endpoint;
        }
        if let Some(version) = lookup("AZURE_OPENAI_API_VERSION") {
            self.azure_openai.api_version = version;
        }
    }

    pub fn validate(&self) -> AppResult<()> {
        let required = [
            ("azure_openai.api_key", &self.azure_openai.api_key),
            ("azure_openai.api_version", &self.azure_openai.api_version),
            ("azure_openai.endpoint", &self.azure_openai.endpoint),
        ];
        for (name, value) in required {
            if value.trim().is_empty() {
                return Err(AppError::Config(format!("{name} must be set")));
            }
        }
        Ok(())
    }

    pub fn report_path(&self) -> PathBuf {
        self.data_paths.output.join("daily_report.md")
    }
}
