use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Main application configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    /// File locations for the dataset, artifacts and announcement store
    #[serde(default)]
    pub paths: PathsConfig,

    /// Offline training parameters
    #[serde(default)]
    pub training: TrainingConfig,

    /// Operator session settings
    #[serde(default)]
    pub session: SessionConfig,

    /// Observability configuration
    #[serde(default)]
    pub observability: ObservabilityConfig,
}

impl Config {
    /// Load configuration from file and environment
    pub fn load() -> Result<Self, config::ConfigError> {
        let config_path = std::env::var("QUAKE_ALERT_CONFIG")
            .unwrap_or_else(|_| "config/local.toml".to_string());
        Self::load_from(Path::new(&config_path))
    }

    /// Load configuration, overlaying the given file (if it exists) on the defaults
    pub fn load_from(config_path: &Path) -> Result<Self, config::ConfigError> {
        config::Config::builder()
            // Start with default values
            .add_source(config::File::from_str(
                include_str!("../config/default.toml"),
                config::FileFormat::Toml,
            ))
            // Override with config file if it exists
            .add_source(config::File::from(config_path).required(false))
            // Override with environment variables (prefix: QUAKE_ALERT__)
            .add_source(
                config::Environment::with_prefix("QUAKE_ALERT")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?
            .try_deserialize()
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PathsConfig {
    /// Historical earthquake CSV
    #[serde(default = "default_dataset_path")]
    pub dataset: PathBuf,

    /// Serialized classifier
    #[serde(default = "default_model_path")]
    pub model: PathBuf,

    /// Serialized label encoder
    #[serde(default = "default_encoder_path")]
    pub encoder: PathBuf,

    /// Public announcement document
    #[serde(default = "default_announcements_path")]
    pub announcements: PathBuf,
}

impl Default for PathsConfig {
    fn default() -> Self {
        Self {
            dataset: default_dataset_path(),
            model: default_model_path(),
            encoder: default_encoder_path(),
            announcements: default_announcements_path(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TrainingConfig {
    /// Number of trees in the forest
    #[serde(default = "default_n_trees")]
    pub n_trees: u16,

    /// Seed for the split shuffle and the forest
    #[serde(default = "default_seed")]
    pub seed: u64,

    /// Fraction of rows held out for evaluation
    #[serde(default = "default_test_size")]
    pub test_size: f64,
}

impl Default for TrainingConfig {
    fn default() -> Self {
        Self {
            n_trees: default_n_trees(),
            seed: default_seed(),
            test_size: default_test_size(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionConfig {
    /// Number of most recent dataset rows offered for selection
    #[serde(default = "default_tail_rows")]
    pub tail_rows: usize,

    /// Number of rows shown in the dataset preview
    #[serde(default = "default_preview_rows")]
    pub preview_rows: usize,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            tail_rows: default_tail_rows(),
            preview_rows: default_preview_rows(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ObservabilityConfig {
    /// Log level
    #[serde(default = "default_log_level")]
    pub log_level: String,

    /// Enable JSON logging
    #[serde(default)]
    pub json_logs: bool,
}

impl Default for ObservabilityConfig {
    fn default() -> Self {
        Self {
            log_level: default_log_level(),
            json_logs: false,
        }
    }
}

// Default value functions
fn default_dataset_path() -> PathBuf {
    PathBuf::from("data/earthquakes.csv")
}

fn default_model_path() -> PathBuf {
    PathBuf::from("artifacts/earthquake_model.bin")
}

fn default_encoder_path() -> PathBuf {
    PathBuf::from("artifacts/label_encoder.bin")
}

fn default_announcements_path() -> PathBuf {
    PathBuf::from("storage/public_announcements.json")
}

fn default_n_trees() -> u16 {
    100
}

fn default_seed() -> u64 {
    42
}

fn default_test_size() -> f64 {
    0.2
}

fn default_tail_rows() -> usize {
    200
}

fn default_preview_rows() -> usize {
    5
}

fn default_log_level() -> String {
    "info".to_string()
}
