//! phpcase settings
//!
//! Three layers, later ones winning:
//!
//!     defaults/phpcase.default.toml   compiled in
//!     --config <file>                 optional, must exist when given
//!     --pretty / --short-tokens       single-key overrides
//!
//! The display knobs only reach stdout. Fixture files ignore them.

use crate::php::serialize::{JsonStyle, TokenForm};
use config::builder::DefaultState;
use config::{Config, ConfigBuilder, ConfigError, File, FileFormat, ValueKind};
use serde::Deserialize;
use std::path::Path;

const DEFAULT_TOML: &str = include_str!("../../defaults/phpcase.default.toml");

#[derive(Debug, Clone, Deserialize)]
pub struct PhpCaseConfig {
    pub scan: ScanConfig,
    pub fixtures: FixturesConfig,
    pub log: LogConfig,
}

/// Display knobs for the `scan` command.
#[derive(Debug, Clone, Deserialize)]
pub struct ScanConfig {
    pub pretty: bool,
    pub token_form: TokenForm,
}

impl ScanConfig {
    pub fn json_style(&self) -> JsonStyle {
        if self.pretty {
            JsonStyle::Pretty
        } else {
            JsonStyle::Compact
        }
    }
}

/// Which files the gencase commands pick up and how their fixtures are named.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct FixturesConfig {
    pub extension: String,
    pub tokens_suffix: String,
    pub tree_suffix: String,
}

impl Default for FixturesConfig {
    fn default() -> Self {
        Self {
            extension: "php".to_string(),
            tokens_suffix: ".tokens".to_string(),
            tree_suffix: ".tree".to_string(),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct LogConfig {
    pub level: String,
}

/// Builds a [PhpCaseConfig] from the embedded defaults, an optional `--config` file and flags.
#[derive(Debug, Clone)]
pub struct Loader {
    builder: ConfigBuilder<DefaultState>,
}

impl Loader {
    /// Only the embedded `phpcase.default.toml` so far
    pub fn new() -> Self {
        let builder = Config::builder().add_source(File::from_str(DEFAULT_TOML, FileFormat::Toml));
        Self { builder }
    }

    /// Add a TOML file on top. The file has to exist when [Loader::build] runs.
    pub fn with_file(mut self, path: impl AsRef<Path>) -> Self {
        let source = File::from(path.as_ref())
            .format(FileFormat::Toml)
            .required(true);
        self.builder = self.builder.add_source(source);
        self
    }

    /// Force one dotted key, e.g. `scan.pretty` for `--pretty`
    pub fn set_override<I>(mut self, key: &str, value: I) -> Result<Self, ConfigError>
    where
        I: Into<ValueKind>,
    {
        self.builder = self.builder.set_override(key, value)?;
        Ok(self)
    }

    pub fn build(self) -> Result<PhpCaseConfig, ConfigError> {
        self.builder.build()?.try_deserialize()
    }
}

impl Default for Loader {
    fn default() -> Self {
        Self::new()
    }
}

pub fn load_defaults() -> Result<PhpCaseConfig, ConfigError> {
    Loader::new().build()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn loads_default_config() {
        let config = load_defaults().expect("defaults to deserialize");
        assert!(!config.scan.pretty);
        assert_eq!(config.scan.token_form, TokenForm::Full);
        assert_eq!(config.fixtures, FixturesConfig::default());
        assert_eq!(config.log.level, "warn");
    }

    #[test]
    fn supports_overrides() {
        let config = Loader::new()
            .set_override("scan.pretty", true)
            .expect("override to apply")
            .set_override("scan.token_form", "short")
            .expect("override to apply")
            .build()
            .expect("config to build");
        assert_eq!(config.scan.json_style(), JsonStyle::Pretty);
        assert_eq!(config.scan.token_form, TokenForm::Short);
    }

    #[test]
    fn layers_user_file() {
        let mut file = tempfile::Builder::new()
            .suffix(".toml")
            .tempfile()
            .expect("temp file");
        writeln!(file, "[fixtures]\nextension = \"phpt\"\ntree_suffix = \".ast\"").unwrap();

        let config = Loader::new().with_file(file.path()).build().unwrap();
        assert_eq!(config.fixtures.extension, "phpt");
        assert_eq!(config.fixtures.tree_suffix, ".ast");
        assert_eq!(config.fixtures.tokens_suffix, ".tokens");
    }

    #[test]
    fn missing_user_file_is_an_error() {
        let result = Loader::new()
            .with_file("/definitely/not/here/phpcase.toml")
            .build();
        assert!(result.is_err());
    }
}
