//! # CLI Configuration
//!
//! Optional YAML file named by `--config`. Every key has a default, and
//! command-line flags override the file.
//!
//! ```yaml
//! metaschema_version: "1.0"
//! output: json
//! display_metaschema: false
//! ```

use std::path::Path;

use anyhow::{Context, Result};
use clap::ValueEnum;
use dftool_schema::metaschema::DEFAULT_METASCHEMA_VERSION;
use serde::Deserialize;

/// Report format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    #[default]
    Text,
    Json,
}

/// Settings read from the configuration file.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct CliConfig {
    /// Label applied to the meta-schema repository. Cosmetic.
    pub metaschema_version: String,
    pub output: OutputFormat,
    /// Print the formatted meta-schema before each report.
    pub display_metaschema: bool,
}

impl Default for CliConfig {
    fn default() -> Self {
        Self {
            metaschema_version: DEFAULT_METASCHEMA_VERSION.to_string(),
            output: OutputFormat::Text,
            display_metaschema: false,
        }
    }
}

impl CliConfig {
    /// Load the file at `path`, or the defaults when no path is given.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let Some(path) = path else {
            return Ok(Self::default());
        };
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("cannot read config file {}", path.display()))?;
        let config: Self = serde_yaml::from_str(&content)
            .with_context(|| format!("invalid config file {}", path.display()))?;
        tracing::debug!(path = %path.display(), ?config, "loaded configuration");
        Ok(config)
    }

    /// Apply command-line overrides.
    pub fn with_overrides(
        mut self,
        output: Option<OutputFormat>,
        metaschema_version: Option<String>,
    ) -> Self {
        if let Some(output) = output {
            self.output = output;
        }
        if let Some(version) = metaschema_version {
            self.metaschema_version = version;
        }
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn no_path_gives_defaults() {
        let config = CliConfig::load(None).unwrap();
        assert_eq!(config, CliConfig::default());
        assert_eq!(config.metaschema_version, "1.0");
        assert_eq!(config.output, OutputFormat::Text);
    }

    #[test]
    fn partial_file_keeps_other_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("dftool.yaml");
        std::fs::write(&path, "output: json\n").unwrap();
        let config = CliConfig::load(Some(&path)).unwrap();
        assert_eq!(config.output, OutputFormat::Json);
        assert_eq!(config.metaschema_version, "1.0");
        assert!(!config.display_metaschema);
    }

    #[test]
    fn unknown_keys_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("dftool.yaml");
        std::fs::write(&path, "colour: red\n").unwrap();
        assert!(CliConfig::load(Some(&path)).is_err());
    }

    #[test]
    fn missing_file_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let err = CliConfig::load(Some(&dir.path().join("absent.yaml"))).unwrap_err();
        assert!(err.to_string().contains("cannot read config file"));
    }

    #[test]
    fn overrides_win() {
        let config = CliConfig::default()
            .with_overrides(Some(OutputFormat::Json), Some("1.1 test only".to_string()));
        assert_eq!(config.output, OutputFormat::Json);
        assert_eq!(config.metaschema_version, "1.1 test only");

        let untouched = CliConfig::default().with_overrides(None, None);
        assert_eq!(untouched, CliConfig::default());
    }
}
