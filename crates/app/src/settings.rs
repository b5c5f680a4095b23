//! Handles settings for the application.
//!
//! Layers, lowest first: built-in defaults, the TOML file (`follyo.toml`
//! unless `--config` says otherwise, optional), `FOLLYO_*` environment
//! variables, command-line flags.

use std::path::PathBuf;

use config::{Config, Environment, File};
use serde::Deserialize;

use crate::{cli::GlobalArgs, error::Result};

const DEFAULT_CONFIG_PATH: &str = "follyo.toml";

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub data_dir: PathBuf,
    pub ledger_file: String,
    pub snapshots_file: String,
    pub log_level: String,
    pub allow_negative_holdings: bool,
    /// Platform recorded on buys and sales given without `--platform`.
    pub default_platform: Option<String>,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            data_dir: PathBuf::from("data"),
            ledger_file: "portfolio.json".to_string(),
            snapshots_file: "snapshots.json".to_string(),
            log_level: "info".to_string(),
            allow_negative_holdings: false,
            default_platform: None,
        }
    }
}

impl Settings {
    pub fn load(args: &GlobalArgs) -> Result<Self> {
        let config_path = args.config.as_deref().unwrap_or(DEFAULT_CONFIG_PATH);
        let mut settings: Settings = Config::builder()
            .add_source(File::with_name(config_path).required(false))
            .add_source(Environment::with_prefix("FOLLYO").try_parsing(true))
            .build()?
            .try_deserialize()?;

        if let Some(data_dir) = &args.data_dir {
            settings.data_dir = data_dir.clone();
        }
        if let Some(level) = &args.log_level {
            settings.log_level = level.clone();
        }
        if args.allow_negative_holdings {
            settings.allow_negative_holdings = true;
        }
        Ok(settings)
    }

    pub fn ledger_path(&self) -> PathBuf {
        self.data_dir.join(&self.ledger_file)
    }

    pub fn snapshots_path(&self) -> PathBuf {
        self.data_dir.join(&self.snapshots_file)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn file_values_then_flag_overrides() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("custom.toml");
        std::fs::write(
            &path,
            "data_dir = \"/srv/follyo\"\nlog_level = \"debug\"\ndefault_platform = \"Kraken\"\n",
        )
        .unwrap();

        let args = GlobalArgs {
            config: Some(path.display().to_string()),
            log_level: Some("trace".to_string()),
            allow_negative_holdings: true,
            ..GlobalArgs::default()
        };
        let settings = Settings::load(&args).unwrap();
        assert_eq!(settings.data_dir, PathBuf::from("/srv/follyo"));
        assert_eq!(settings.log_level, "trace");
        assert!(settings.allow_negative_holdings);
        assert_eq!(settings.default_platform.as_deref(), Some("Kraken"));
        assert_eq!(
            settings.ledger_path(),
            PathBuf::from("/srv/follyo/portfolio.json")
        );
    }

    #[test]
    fn missing_file_means_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let args = GlobalArgs {
            config: Some(dir.path().join("absent.toml").display().to_string()),
            ..GlobalArgs::default()
        };
        let settings = Settings::load(&args).unwrap();
        assert_eq!(settings.snapshots_path(), PathBuf::from("data/snapshots.json"));
        assert!(!settings.allow_negative_holdings);
    }
}
