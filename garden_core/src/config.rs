//! Configuration file support for Mind Garden.
//!
//! Configuration is loaded from `$XDG_CONFIG_HOME/mind-garden/config.toml`.

use crate::{Error, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Application configuration
#[derive(Clone, Debug, Serialize, Deserialize, Default)]
pub struct Config {
    #[serde(default)]
    pub api: ApiConfig,

    #[serde(default)]
    pub breathing: BreathingConfig,

    #[serde(default)]
    pub ui: UiConfig,
}

/// Wire encoding used for mood check-ins
///
/// The backend contract is not settled, so neither encoding is assumed.
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum CheckinFormat {
    /// `{ "mood": "Happy" }`
    Label,
    /// `{ "mood_value": "Good", "mood_score": 4, "notes": ... }`
    Scored,
}

impl std::str::FromStr for CheckinFormat {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_lowercase().as_str() {
            "label" => Ok(CheckinFormat::Label),
            "scored" => Ok(CheckinFormat::Scored),
            other => Err(Error::Config(format!(
                "Unknown check-in format '{}' (expected label or scored)",
                other
            ))),
        }
    }
}

/// Backend connection configuration
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct ApiConfig {
    #[serde(default = "default_base_url")]
    pub base_url: String,

    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,

    #[serde(default)]
    pub checkin_format: Option<CheckinFormat>,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            timeout_secs: default_timeout_secs(),
            checkin_format: None,
        }
    }
}

/// Breathing exercise defaults
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct BreathingConfig {
    #[serde(default = "default_pattern")]
    pub default_pattern: String,
}

impl Default for BreathingConfig {
    fn default() -> Self {
        Self {
            default_pattern: default_pattern(),
        }
    }
}

/// Display preferences
#[derive(Clone, Debug, Serialize, Deserialize, Default)]
pub struct UiConfig {
    #[serde(default)]
    pub dark_mode: bool,
}

// Default value functions
fn default_base_url() -> String {
    "http://127.0.0.1:8000".into()
}

fn default_timeout_secs() -> u64 {
    10
}

fn default_pattern() -> String {
    "box".into()
}

impl Config {
    /// Load configuration from the standard config path
    pub fn load() -> Result<Self> {
        let config_path = Self::default_config_path();
        if config_path.exists() {
            Self::load_from(&config_path)
        } else {
            tracing::info!(
                "No config file found at {:?}, using defaults",
                config_path
            );
            Ok(Self::default())
        }
    }

    /// Load configuration from a specific path
    pub fn load_from(path: &Path) -> Result<Self> {
        let contents = std::fs::read_to_string(path)?;
        let config: Config = toml::from_str(&contents)?;
        config.validate()?;
        tracing::info!("Loaded config from {:?}", path);
        Ok(config)
    }

    /// Load from `path` if given and present, otherwise defaults
    pub fn load_or_default(path: Option<&Path>) -> Result<Self> {
        match path {
            Some(p) if p.exists() => Self::load_from(p),
            Some(p) => {
                tracing::info!("No config file found at {:?}, using defaults", p);
                Ok(Self::default())
            }
            None => Self::load(),
        }
    }

    /// Get the default config file path
    pub fn default_config_path() -> PathBuf {
        let base = dirs::config_dir()
            .or_else(|| dirs::home_dir().map(|home| home.join(".config")))
            .unwrap_or_else(|| PathBuf::from("."));
        base.join("mind-garden").join("config.toml")
    }

    /// Reject values the rest of the system cannot work with
    pub fn validate(&self) -> Result<()> {
        let url = self.api.base_url.trim();
        if !(url.starts_with("http://") || url.starts_with("https://")) {
            return Err(Error::Config(format!(
                "api.base_url must be an http(s) URL, got '{}'",
                self.api.base_url
            )));
        }
        if self.api.timeout_secs == 0 {
            return Err(Error::Config("api.timeout_secs must be positive".into()));
        }
        Ok(())
    }

    /// Save the current configuration to the default path
    pub fn save(&self) -> Result<()> {
        let config_path = Self::default_config_path();
        self.save_to(&config_path)
    }

    /// Save the current configuration to a specific path
    pub fn save_to(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let contents = toml::to_string_pretty(self)
            .map_err(|e| Error::Config(format!("Failed to serialize config: {}", e)))?;
        std::fs::write(path, contents)?;
        tracing::info!("Saved config to {:?}", path);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert_eq!(config.api.base_url, "http://127.0.0.1:8000");
        assert_eq!(config.api.timeout_secs, 10);
        assert_eq!(config.api.checkin_format, None);
        assert_eq!(config.breathing.default_pattern, "box");
        assert!(!config.ui.dark_mode);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_partial_config() {
        let toml_str = r#"
[api]
base_url = "http://192.168.1.250:8000"
checkin_format = "scored"

[ui]
dark_mode = true
"#;
        let config: Config = toml::from_str(toml_str).unwrap();
        assert_eq!(config.api.base_url, "http://192.168.1.250:8000");
        assert_eq!(config.api.checkin_format, Some(CheckinFormat::Scored));
        assert_eq!(config.api.timeout_secs, 10); // default
        assert_eq!(config.breathing.default_pattern, "box"); // default
        assert!(config.ui.dark_mode);
    }

    #[test]
    fn test_save_and_load() {
        let temp_dir = tempfile::tempdir().unwrap();
        let path = temp_dir.path().join("nested").join("config.toml");

        let mut config = Config::default();
        config.ui.dark_mode = true;
        config.api.checkin_format = Some(CheckinFormat::Label);
        config.save_to(&path).unwrap();

        let loaded = Config::load_from(&path).unwrap();
        assert!(loaded.ui.dark_mode);
        assert_eq!(loaded.api.checkin_format, Some(CheckinFormat::Label));
    }

    #[test]
    fn test_invalid_base_url_rejected() {
        let temp_dir = tempfile::tempdir().unwrap();
        let path = temp_dir.path().join("config.toml");
        std::fs::write(&path, "[api]\nbase_url = \"ftp://nope\"\n").unwrap();

        assert!(matches!(Config::load_from(&path), Err(Error::Config(_))));
    }

    #[test]
    fn test_missing_explicit_path_uses_defaults() {
        let temp_dir = tempfile::tempdir().unwrap();
        let path = temp_dir.path().join("absent.toml");
        let config = Config::load_or_default(Some(&path)).unwrap();
        assert_eq!(config.breathing.default_pattern, "box");
    }

    #[test]
    fn test_checkin_format_parse() {
        assert_eq!("Label".parse::<CheckinFormat>().unwrap(), CheckinFormat::Label);
        assert_eq!("scored".parse::<CheckinFormat>().unwrap(), CheckinFormat::Scored);
        assert!("json".parse::<CheckinFormat>().is_err());
    }
}
