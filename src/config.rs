use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::workflow::PLATFORM_FEE;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub api: ApiConfig,
    #[serde(default)]
    pub pricing: PricingConfig,
    #[serde(default)]
    pub ui: UiConfig,
    #[serde(default)]
    pub paths: PathsConfig,
    #[serde(default)]
    pub logging: LoggingConfig,
}

/// Platform REST API connection settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiConfig {
    #[serde(default = "default_base_url")]
    pub base_url: String,
    /// Bearer token sent with every request
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub auth_token: Option<String>,
    /// Per-request timeout in seconds (default: 30)
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

fn default_base_url() -> String {
    "http://localhost:5000".to_string()
}

fn default_timeout_secs() -> u64 {
    30
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            auth_token: None,
            timeout_secs: default_timeout_secs(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PricingConfig {
    /// Fee shown in the price confirmation dialog
    #[serde(default = "default_platform_fee")]
    pub platform_fee: f64,
}

fn default_platform_fee() -> f64 {
    PLATFORM_FEE
}

impl Default for PricingConfig {
    fn default() -> Self {
        Self {
            platform_fee: default_platform_fee(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UiConfig {
    /// Event poll interval for the terminal loop
    #[serde(default = "default_tick_rate")]
    pub tick_rate_ms: u64,
}

fn default_tick_rate() -> u64 {
    250
}

impl Default for UiConfig {
    fn default() -> Self {
        Self {
            tick_rate_ms: default_tick_rate(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PathsConfig {
    #[serde(default = "default_state_dir")]
    pub state: String,
}

fn default_state_dir() -> String {
    ".vibes-invite".to_string()
}

impl Default for PathsConfig {
    fn default() -> Self {
        Self {
            state: default_state_dir(),
        }
    }
}

/// Logging configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Log level filter (trace, debug, info, warn, error)
    #[serde(default = "default_log_level")]
    pub level: String,

    /// Whether to log to file in TUI mode (false = stderr for debugging)
    #[serde(default = "default_log_to_file")]
    pub to_file: bool,
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_log_to_file() -> bool {
    true
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            to_file: default_log_to_file(),
        }
    }
}

impl Config {
    /// Global config file in ~/.config/vibes-invite/
    pub fn user_config_path() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| dir.join("vibes-invite").join("config.toml"))
    }

    pub fn load(config_path: Option<&str>) -> Result<Self> {
        Self::load_layers(Self::user_config_path().as_deref(), config_path)
    }

    fn load_layers(user_config: Option<&Path>, config_path: Option<&str>) -> Result<Self> {
        // Embedded defaults so the app works without any config file
        let defaults = Config::default();
        let defaults_json =
            serde_json::to_string(&defaults).context("Failed to serialize default config")?;

        let mut builder = config::Config::builder().add_source(config::File::from_str(
            &defaults_json,
            config::FileFormat::Json,
        ));

        if let Some(user_config) = user_config {
            if user_config.exists() {
                builder = builder.add_source(config::File::from(user_config.to_path_buf()));
            }
        }

        // Explicit config file (CLI override)
        if let Some(path) = config_path {
            builder = builder.add_source(config::File::from(PathBuf::from(path)));
        }

        builder = builder.add_source(
            config::Environment::with_prefix("VIBES_INVITE")
                .separator("__")
                .try_parsing(true),
        );

        let config = builder.build().context("Failed to load configuration")?;
        config
            .try_deserialize()
            .context("Failed to deserialize configuration")
    }

    /// Save config to ~/.config/vibes-invite/config.toml
    pub fn save(&self) -> Result<PathBuf> {
        let path = Self::user_config_path().context("No user config directory available")?;
        self.save_to(&path)?;
        Ok(path)
    }

    pub fn save_to(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).context("Failed to create config directory")?;
        }

        let toml_str =
            toml::to_string_pretty(self).context("Failed to serialize config to TOML")?;

        std::fs::write(path, toml_str).context("Failed to write config file")?;

        Ok(())
    }

    /// Get absolute path to state directory
    pub fn state_path(&self) -> PathBuf {
        let path = PathBuf::from(&self.paths.state);
        if path.is_absolute() {
            path
        } else {
            std::env::current_dir().unwrap_or_default().join(path)
        }
    }

    /// Get absolute path to logs directory
    pub fn logs_path(&self) -> PathBuf {
        self.state_path().join("logs")
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            api: ApiConfig::default(),
            pricing: PricingConfig::default(),
            ui: UiConfig::default(),
            paths: PathsConfig::default(),
            logging: LoggingConfig::default(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_defaults() {
        let config = Config::load_layers(None, None).unwrap();
        assert_eq!(config.api.base_url, "http://localhost:5000");
        assert_eq!(config.api.timeout_secs, 30);
        assert_eq!(config.pricing.platform_fee, 99.99);
        assert_eq!(config.ui.tick_rate_ms, 250);
        assert_eq!(config.logging.level, "info");
        assert!(config.logging.to_file);
    }

    #[test]
    fn test_explicit_file_overrides_defaults() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("custom.toml");
        std::fs::write(
            &path,
            "[api]\nbase_url = \"https://api.example.com\"\nauth_token = \"t0k\"\n\n[pricing]\nplatform_fee = 12.5\n",
        )
        .unwrap();

        let config = Config::load_layers(None, path.to_str()).unwrap();
        assert_eq!(config.api.base_url, "https://api.example.com");
        assert_eq!(config.api.auth_token.as_deref(), Some("t0k"));
        assert_eq!(config.pricing.platform_fee, 12.5);
        // untouched sections keep their defaults
        assert_eq!(config.api.timeout_secs, 30);
        assert_eq!(config.paths.state, ".vibes-invite");
    }

    #[test]
    fn test_explicit_file_wins_over_user_file() {
        let dir = TempDir::new().unwrap();
        let user = dir.path().join("user.toml");
        let explicit = dir.path().join("explicit.toml");
        std::fs::write(&user, "[ui]\ntick_rate_ms = 100\n\n[logging]\nlevel = \"debug\"\n")
            .unwrap();
        std::fs::write(&explicit, "[ui]\ntick_rate_ms = 50\n").unwrap();

        let config = Config::load_layers(Some(&user), explicit.to_str()).unwrap();
        assert_eq!(config.ui.tick_rate_ms, 50);
        assert_eq!(config.logging.level, "debug");
    }

    #[test]
    fn test_missing_user_file_is_skipped() {
        let dir = TempDir::new().unwrap();
        let config = Config::load_layers(Some(&dir.path().join("absent.toml")), None).unwrap();
        assert_eq!(config.ui.tick_rate_ms, 250);
    }

    #[test]
    fn test_save_then_load() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("nested").join("config.toml");
        let mut config = Config::default();
        config.api.base_url = "https://saved.example.com".to_string();
        config.save_to(&path).unwrap();

        let loaded = Config::load_layers(None, path.to_str()).unwrap();
        assert_eq!(loaded.api.base_url, "https://saved.example.com");
        assert!(loaded.api.auth_token.is_none());
    }

    #[test]
    fn test_logs_path_under_state() {
        let mut config = Config::default();
        config.paths.state = "/tmp/vibes-state".to_string();
        assert_eq!(config.logs_path(), PathBuf::from("/tmp/vibes-state/logs"));
    }
}
