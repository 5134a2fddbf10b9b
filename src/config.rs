//! Configuration management for the resume desk client

use crate::error::{Result, ResumeDeskError};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    pub backend: BackendConfig,
    pub session: SessionConfig,
    pub output: OutputConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BackendConfig {
    pub base_url: String,
    pub timeout_secs: u64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionConfig {
    pub state_dir: PathBuf,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OutputConfig {
    pub format: OutputFormat,
    pub color_output: bool,
    pub pretty_json: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum OutputFormat {
    Console,
    Json,
    Markdown,
    Html,
}

impl Default for Config {
    fn default() -> Self {
        let state_dir = dirs::data_local_dir()
            .unwrap_or_else(|| dirs::home_dir().unwrap_or_else(|| PathBuf::from(".")))
            .join("resume-desk");

        Self {
            backend: BackendConfig {
                base_url: "http://127.0.0.1:8000".to_string(),
                timeout_secs: 120,
            },
            session: SessionConfig { state_dir },
            output: OutputConfig {
                format: OutputFormat::Console,
                color_output: true,
                pretty_json: true,
            },
        }
    }
}

impl Config {
    pub fn load() -> Result<Self> {
        Self::load_from(&Self::config_path())
    }

    /// Load from an explicit path, writing defaults there when the file is missing.
    pub fn load_from(path: &Path) -> Result<Self> {
        if path.exists() {
            let content = std::fs::read_to_string(path)?;
            let config: Config = toml::from_str(&content)
                .map_err(|e| ResumeDeskError::Configuration(format!("Failed to parse config: {}", e)))?;
            Ok(config)
        } else {
            let config = Self::default();
            config.save_to(path)?;
            Ok(config)
        }
    }

    pub fn save(&self) -> Result<()> {
        self.save_to(&Self::config_path())
    }

    pub fn save_to(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let content = toml::to_string_pretty(self)
            .map_err(|e| ResumeDeskError::Configuration(format!("Failed to serialize config: {}", e)))?;

        std::fs::write(path, content)?;
        Ok(())
    }

    pub fn config_path() -> PathBuf {
        dirs::config_dir()
            .unwrap_or_else(|| dirs::home_dir().unwrap_or_else(|| PathBuf::from(".")))
            .join("resume-desk")
            .join("config.toml")
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.backend.timeout_secs)
    }

    pub fn state_dir(&self) -> &Path {
        &self.session.state_dir
    }

    /// Set a single dotted key, e.g. `backend.base_url`.
    pub fn set_value(&mut self, key: &str, value: &str) -> Result<()> {
        match key {
            "backend.base_url" => {
                let trimmed = value.trim().trim_end_matches('/');
                if !trimmed.starts_with("http://") && !trimmed.starts_with("https://") {
                    return Err(ResumeDeskError::Configuration(format!(
                        "backend.base_url must start with http:// or https://, got '{}'",
                        value
                    )));
                }
                self.backend.base_url = trimmed.to_string();
            }
            "backend.timeout_secs" => {
                self.backend.timeout_secs = value.trim().parse().map_err(|_| {
                    ResumeDeskError::Configuration(format!("Invalid timeout: {}", value))
                })?;
            }
            "session.state_dir" => {
                self.session.state_dir = PathBuf::from(value.trim());
            }
            "output.format" => {
                self.output.format = crate::cli::parse_output_format(value)
                    .map_err(ResumeDeskError::Configuration)?;
            }
            "output.color_output" => {
                self.output.color_output = parse_bool(value)?;
            }
            "output.pretty_json" => {
                self.output.pretty_json = parse_bool(value)?;
            }
            _ => {
                return Err(ResumeDeskError::Configuration(format!(
                    "Unknown configuration key: {}",
                    key
                )))
            }
        }
        Ok(())
    }
}

fn parse_bool(value: &str) -> Result<bool> {
    match value.trim().to_lowercase().as_str() {
        "true" | "yes" | "on" | "1" => Ok(true),
        "false" | "no" | "off" | "0" => Ok(false),
        _ => Err(ResumeDeskError::Configuration(format!(
            "Expected a boolean, got '{}'",
            value
        ))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_load_writes_defaults_when_missing() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("config.toml");

        let config = Config::load_from(&path).unwrap();
        assert!(path.exists());
        assert_eq!(config.backend.base_url, "http://127.0.0.1:8000");

        let reloaded = Config::load_from(&path).unwrap();
        assert_eq!(reloaded.backend.timeout_secs, config.backend.timeout_secs);
        assert_eq!(reloaded.output.format, OutputFormat::Console);
    }

    #[test]
    fn test_set_value() {
        let mut config = Config::default();
        config.set_value("backend.base_url", "https://resumes.example.com/").unwrap();
        assert_eq!(config.backend.base_url, "https://resumes.example.com");

        config.set_value("output.format", "md").unwrap();
        assert_eq!(config.output.format, OutputFormat::Markdown);

        config.set_value("output.color_output", "off").unwrap();
        assert!(!config.output.color_output);

        assert!(config.set_value("backend.timeout_secs", "soon").is_err());
        assert!(config.set_value("backend.base_url", "localhost:8000").is_err());
        assert!(config.set_value("scoring.weight", "1").is_err());
    }

    #[test]
    fn test_invalid_toml_is_configuration_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "backend = 3").unwrap();

        match Config::load_from(&path) {
            Err(ResumeDeskError::Configuration(msg)) => assert!(msg.contains("Failed to parse")),
            other => panic!("expected configuration error, got {:?}", other.map(|_| ())),
        }
    }
}
