//! Declarative benchmark configuration
//!
//! This module provides the schema, validation, and loading for the JSON
//! documents that drive a benchmark run.
//!
//! # Example
//!
//! ```json
//! {
//!   "version": "single",
//!   "random_seed": 303,
//!   "datasets": {
//!     "cars196_50pct_cls_splt": {
//!       "component": "tfds",
//!       "dataset_id": "cars196",
//!       "train_classes": [0, 98],
//!       "test_classes": [98, 196]
//!     }
//!   },
//!   "optimizer": { "lamb": { "component": "lamb", "lr": 0.0001 } }
//! }
//! ```
//!
//! A configuration is authored once, loaded and validated at run start, and
//! persisted unchanged as a run artifact.

mod schema;
pub mod templates;
mod validate;


pub use schema::{
    ArchitectureConfig, AugmentationConfig, AverageMode, BatchSampling, BenchmarkConfig,
    ClassRange, DatasetConfig, EvalCallback, LossConfig, LrSchedule, MetricConfig,
    OptimizerConfig, Trainable, TrainingPhase, TrainValSplits, TransformConfig,
};
pub use templates::{generate_config, generate_json, Template};
pub use validate::{validate_config, ValidationError, ValidationResult};

mod cli;
pub use cli::{
    Cli, Command, ComponentsArgs, InfoArgs, InitArgs, OutputFormat, TemplateArg, ValidateArgs,
};

use crate::error::{Error, Result};
use crate::registry::Registry;
use std::path::Path;

/// Supported configuration file formats
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfigFormat {
    /// JSON, the primary and run-artifact format
    Json,
    /// YAML, accepted for hand-authored configs
    Yaml,
}

impl ConfigFormat {
    /// Get file extension for this format
    pub fn extension(&self) -> &str {
        match self {
            ConfigFormat::Json => "json",
            ConfigFormat::Yaml => "yaml",
        }
    }

    /// Detect format from file extension
    pub fn from_extension(ext: &str) -> Option<Self> {
        match ext.to_lowercase().as_str() {
            "json" => Some(ConfigFormat::Json),
            "yaml" | "yml" => Some(ConfigFormat::Yaml),
            _ => None,
        }
    }

    /// Detect format from a path's extension
    pub fn from_path(path: &Path) -> Option<Self> {
        path.extension()
            .and_then(|ext| ext.to_str())
            .and_then(Self::from_extension)
    }
}

/// Load and validate a benchmark configuration from a file
///
/// Parses the document, runs structural validation, then cross-checks every
/// `component` tag against the default registry.
pub fn load_config<P: AsRef<Path>>(path: P) -> Result<BenchmarkConfig> {
    load_config_with(path, &Registry::default())
}

/// Load and validate a benchmark configuration against a custom registry
pub fn load_config_with<P: AsRef<Path>>(path: P, registry: &Registry) -> Result<BenchmarkConfig> {
    let path = path.as_ref();
    let format = ConfigFormat::from_path(path)
        .ok_or_else(|| Error::UnsupportedFormat(path.display().to_string()))?;

    let content = std::fs::read_to_string(path).map_err(|e| {
        Error::Config(format!(
            "Failed to read config file {}: {e}",
            path.display()
        ))
    })?;

    let config = match format {
        ConfigFormat::Json => parse_json(&content)?,
        ConfigFormat::Yaml => parse_yaml(&content)?,
    };

    validate_config(&config)?;
    registry.check_config(&config)?;

    Ok(config)
}

/// Parse and validate a JSON configuration document
pub fn from_json_str(content: &str) -> Result<BenchmarkConfig> {
    let config = parse_json(content)?;
    validate_config(&config)?;
    Registry::default().check_config(&config)?;
    Ok(config)
}

/// Parse and validate a YAML configuration document
pub fn from_yaml_str(content: &str) -> Result<BenchmarkConfig> {
    let config = parse_yaml(content)?;
    validate_config(&config)?;
    Registry::default().check_config(&config)?;
    Ok(config)
}

fn parse_json(content: &str) -> Result<BenchmarkConfig> {
    serde_json::from_str(content).map_err(|e| Error::Parse(format!("Failed to parse JSON config: {e}")))
}

fn parse_yaml(content: &str) -> Result<BenchmarkConfig> {
    serde_yaml::from_str(content).map_err(|e| Error::Parse(format!("Failed to parse YAML config: {e}")))
}

/// Save a benchmark configuration as a pretty-printed JSON run artifact
pub fn save_config<P: AsRef<Path>>(config: &BenchmarkConfig, path: P) -> Result<()> {
    let content = serde_json::to_string_pretty(config)
        .map_err(|e| Error::Serialization(format!("Failed to serialize config: {e}")))?;

    std::fs::write(path.as_ref(), content).map_err(|e| {
        Error::Config(format!(
            "Failed to write config file {}: {e}",
            path.as_ref().display()
        ))
    })?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    fn temp_config_file(suffix: &str, content: &str) -> NamedTempFile {
        let mut file = tempfile::Builder::new()
            .suffix(suffix)
            .tempfile()
            .unwrap();
        file.write_all(content.as_bytes()).unwrap();
        file
    }

    #[test]
    fn test_format_from_extension() {
        assert_eq!(ConfigFormat::from_extension("json"), Some(ConfigFormat::Json));
        assert_eq!(ConfigFormat::from_extension("JSON"), Some(ConfigFormat::Json));
        assert_eq!(ConfigFormat::from_extension("yaml"), Some(ConfigFormat::Yaml));
        assert_eq!(ConfigFormat::from_extension("yml"), Some(ConfigFormat::Yaml));
        assert_eq!(ConfigFormat::from_extension("toml"), None);
    }

    #[test]
    fn test_load_valid_config() {
        let json = generate_json(Template::Cars196);
        let file = temp_config_file(".json", &json);

        let config = load_config(file.path()).unwrap();
        assert_eq!(config.random_seed, 303);
        assert_eq!(config.training[0].epochs, 20);
    }

    #[test]
    fn test_load_unsupported_extension() {
        let file = temp_config_file(".toml", "version = 'single'");
        let result = load_config(file.path());
        assert!(matches!(result, Err(Error::UnsupportedFormat(_))));
    }

    #[test]
    fn test_load_malformed_json() {
        let file = temp_config_file(".json", "{ not json ]");
        let result = load_config(file.path());
        assert!(matches!(result, Err(Error::Parse(_))));
    }

    #[test]
    fn test_missing_version_fails() {
        let json = generate_json(Template::Cars196);
        let mut value: serde_json::Value = serde_json::from_str(&json).unwrap();
        value.as_object_mut().unwrap().remove("version");

        let result = from_json_str(&value.to_string());
        assert!(matches!(result, Err(Error::Parse(_))));
    }

    #[test]
    fn test_invalid_config_rejected() {
        let json = generate_json(Template::Cars196);
        let mut value: serde_json::Value = serde_json::from_str(&json).unwrap();
        value["training"][0]["epochs"] = serde_json::json!(0);

        let result = from_json_str(&value.to_string());
        assert!(matches!(result, Err(Error::Validation(_))));
    }

    #[test]
    fn test_unknown_component_rejected() {
        let json = generate_json(Template::Cars196);
        let mut value: serde_json::Value = serde_json::from_str(&json).unwrap();
        value["datasets"]["cars196_50pct_cls_splt"]["component"] =
            serde_json::json!("imagenet_tarballs");

        let result = from_json_str(&value.to_string());
        assert!(matches!(result, Err(Error::UnknownComponent(_))));
    }

    #[test]
    fn test_yaml_config_accepted() {
        let config = generate_config(Template::Minimal);
        let yaml = serde_yaml::to_string(&config).unwrap();
        let parsed = from_yaml_str(&yaml).unwrap();
        assert_eq!(parsed, config);
    }

    #[test]
    fn test_save_and_reload_round_trip() {
        let config = generate_config(Template::Cars196);
        let file = tempfile::Builder::new().suffix(".json").tempfile().unwrap();

        save_config(&config, file.path()).unwrap();
        let reloaded = load_config(file.path()).unwrap();
        assert_eq!(reloaded, config);
    }
}
