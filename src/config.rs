//! Configuration types and loading

use eyre::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

use crate::coordinator::CoordinatorConfig;

/// Main configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Queue sizing
    pub queue: QueueConfig,

    /// Coordinator settings (channels, termination policy)
    pub coordinator: CoordinatorConfig,

    /// Demo driver script
    pub demo: DemoConfig,
}

impl Config {
    /// Load configuration with fallback chain
    pub fn load(config_path: Option<&PathBuf>) -> Result<Self> {
        // If explicit config path provided, try to load it
        if let Some(path) = config_path {
            return Self::load_from_file(path).context(format!("Failed to load config from {}", path.display()));
        }

        // Try project-local config: .conveyor.yml
        let local_config = PathBuf::from(".conveyor.yml");
        if local_config.exists() {
            match Self::load_from_file(&local_config) {
                Ok(config) => return Ok(config),
                Err(e) => {
                    tracing::warn!("Failed to load config from {}: {}", local_config.display(), e);
                }
            }
        }

        // Try user config: ~/.config/conveyor/conveyor.yml
        if let Some(config_dir) = dirs::config_dir() {
            let user_config = config_dir.join("conveyor").join("conveyor.yml");
            if user_config.exists() {
                match Self::load_from_file(&user_config) {
                    Ok(config) => return Ok(config),
                    Err(e) => {
                        tracing::warn!("Failed to load config from {}: {}", user_config.display(), e);
                    }
                }
            }
        }

        // No config file found, use defaults
        tracing::info!("No config file found, using defaults");
        Ok(Self::default())
    }

    fn load_from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = fs::read_to_string(&path).context("Failed to read config file")?;

        let config: Self = serde_yaml::from_str(&content).context("Failed to parse config file")?;

        tracing::info!("Loaded config from: {}", path.as_ref().display());
        Ok(config)
    }
}

/// Queue sizing
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct QueueConfig {
    /// Maximum number of queued elements. Negative values are rejected by
    /// the queue constructor at startup.
    pub capacity: i64,
}

impl Default for QueueConfig {
    fn default() -> Self {
        Self { capacity: 8 }
    }
}

/// Demo driver script
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct DemoConfig {
    /// Number of values pushed (and pop requests issued)
    pub items: u64,

    /// Fixed delay between producer commands
    #[serde(rename = "producer-delay-ms")]
    pub producer_delay_ms: u64,

    /// Fixed delay between consumer commands
    #[serde(rename = "consumer-delay-ms")]
    pub consumer_delay_ms: u64,
}

impl Default for DemoConfig {
    fn default() -> Self {
        Self {
            items: 16,
            producer_delay_ms: 0,
            consumer_delay_ms: 10,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert_eq!(config.queue.capacity, 8);
        assert_eq!(config.demo.items, 16);
        assert_eq!(config.demo.producer_delay_ms, 0);
        assert_eq!(config.demo.consumer_delay_ms, 10);
    }

    #[test]
    fn test_load_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "queue:\n  capacity: 2\ndemo:\n  items: 4").unwrap();

        let config = Config::load(Some(&file.path().to_path_buf())).unwrap();
        assert_eq!(config.queue.capacity, 2);
        assert_eq!(config.demo.items, 4);
        // Unspecified sections keep their defaults
        assert_eq!(config.demo.consumer_delay_ms, 10);
        assert_eq!(config.coordinator.command_buffer, 1024);
    }

    #[test]
    fn test_load_missing_explicit_file_fails() {
        let path = PathBuf::from("/nonexistent/conveyor.yml");
        assert!(Config::load(Some(&path)).is_err());
    }
}
