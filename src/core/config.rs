use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use thiserror::Error;

pub const MIN_DAYS: u32 = 1;
pub const MAX_DAYS: u32 = 365;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to read config: {0}")]
    ReadError(#[from] std::io::Error),
    #[error("Failed to parse config: {0}")]
    ParseError(#[from] toml::de::Error),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ColorMode {
    Auto,
    Always,
    Never,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Settings {
    #[serde(default = "default_days")]
    pub days: u32,
    #[serde(default = "default_color")]
    pub color: ColorMode,
    #[serde(default = "default_true")]
    pub cache: bool,
    pub cache_dir: Option<PathBuf>,
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

fn default_days() -> u32 {
    8
}
fn default_color() -> ColorMode {
    ColorMode::Auto
}
fn default_true() -> bool {
    true
}
fn default_timeout_secs() -> u64 {
    60
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            days: default_days(),
            color: default_color(),
            cache: true,
            cache_dir: None,
            timeout_secs: default_timeout_secs(),
        }
    }
}

/// Options forwarded to every `aws` invocation.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AwsSettings {
    pub profile: Option<String>,
    pub region: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AppConfig {
    #[serde(default)]
    pub settings: Settings,
    #[serde(default)]
    pub aws: AwsSettings,
}

impl AppConfig {
    /// Get the config file path, respecting XDG_CONFIG_HOME
    pub fn config_path() -> PathBuf {
        let config_dir = std::env::var("XDG_CONFIG_HOME")
            .map(PathBuf::from)
            .unwrap_or_else(|_| {
                dirs::home_dir()
                    .unwrap_or_else(|| PathBuf::from("~"))
                    .join(".config")
            });
        config_dir.join("costwatch").join("config.toml")
    }

    /// Load config from the default path, falling back to defaults if not found
    pub fn load() -> Result<Self, ConfigError> {
        let path = Self::config_path();
        if !path.exists() {
            return Ok(Self::default());
        }
        let content = std::fs::read_to_string(&path)?;
        let config: AppConfig = toml::from_str(&content)?;
        Ok(config)
    }

    /// Validate the config
    pub fn validate(&self) -> Vec<String> {
        let mut issues = Vec::new();
        if !(MIN_DAYS..=MAX_DAYS).contains(&self.settings.days) {
            issues.push(format!(
                "Invalid days: {} (must be between {} and {})",
                self.settings.days, MIN_DAYS, MAX_DAYS
            ));
        }
        if self.settings.timeout_secs == 0 {
            issues.push("Invalid timeout_secs: must be greater than 0".to_string());
        }
        for (key, value) in [
            ("profile", &self.aws.profile),
            ("region", &self.aws.region),
        ] {
            if value.as_deref().is_some_and(|v| v.trim().is_empty()) {
                issues.push(format!("aws.{} must not be empty when set", key));
            }
        }
        issues
    }
}
