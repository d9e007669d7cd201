//! Run configuration loaded from TOML
//!
//! Every field is optional. A missing `[[image]]` list means the built-in
//! OS4 documentation catalogue, so an empty file reproduces the default
//! documentation build.

use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::Deserialize;
use thiserror::Error;

use crate::catalogue::{self, CatalogueEntry};
use crate::converter::{ExternalConverter, DEFAULT_DPI, DEFAULT_PROGRAM};
use crate::generator::FailurePolicy;
use crate::lcd::annunciator::{Annunciator, Annunciators};
use crate::renderer::{Lcd41, SvgConfig};
use crate::stylesheet::LcdStyle;

/// Directory the documentation build reads static images from
pub const DEFAULT_OUTPUT_DIR: &str = "_static";

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    IoError(#[from] std::io::Error),
    #[error("Failed to parse config TOML: {0}")]
    ParseError(#[from] toml::de::Error),
    #[error("dpi must be positive")]
    ZeroDpi,
}

/// Converter section of the config file
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ConverterConfig {
    pub program: String,
    pub dpi: u32,
    pub timeout_secs: Option<u64>,
    pub on_failure: FailurePolicy,
}

impl Default for ConverterConfig {
    fn default() -> Self {
        Self {
            program: DEFAULT_PROGRAM.to_string(),
            dpi: DEFAULT_DPI,
            timeout_secs: None,
            on_failure: FailurePolicy::default(),
        }
    }
}

impl ConverterConfig {
    pub fn build(&self) -> ExternalConverter {
        ExternalConverter::new(self.program.clone())
            .with_dpi(self.dpi)
            .with_timeout(self.timeout_secs.map(Duration::from_secs))
    }
}

#[derive(Deserialize)]
#[serde(deny_unknown_fields)]
struct TomlConfig {
    output_dir: Option<PathBuf>,
    annunciators: Option<Vec<Annunciator>>,
    #[serde(default)]
    converter: ConverterConfig,
    #[serde(default)]
    style: LcdStyle,
    #[serde(default)]
    svg: SvgConfig,
    image: Option<Vec<CatalogueEntry>>,
}

/// Everything needed for one generation run
#[derive(Debug, Clone, PartialEq)]
pub struct GeneratorConfig {
    pub output_dir: PathBuf,
    pub annunciators: Annunciators,
    pub converter: ConverterConfig,
    pub style: LcdStyle,
    pub svg: SvgConfig,
    pub entries: Vec<CatalogueEntry>,
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        Self {
            output_dir: PathBuf::from(DEFAULT_OUTPUT_DIR),
            annunciators: catalogue::os4_annunciators(),
            converter: ConverterConfig::default(),
            style: LcdStyle::default(),
            svg: SvgConfig::default(),
            entries: catalogue::os4_documentation(),
        }
    }
}

impl GeneratorConfig {
    /// Load configuration from a TOML file
    ///
    /// A relative `output_dir` is resolved against the file's directory.
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)?;
        let mut config = Self::from_toml(&content)?;
        if config.output_dir.is_relative() {
            if let Some(base) = path.parent() {
                config.output_dir = base.join(&config.output_dir);
            }
        }
        Ok(config)
    }

    /// The display renderer with this run's palette and SVG options
    pub fn renderer(&self) -> Lcd41 {
        Lcd41::new()
            .with_style(self.style.clone())
            .with_svg(self.svg.clone())
    }

    /// Load configuration from a TOML string
    pub fn from_toml(content: &str) -> Result<Self, ConfigError> {
        let parsed: TomlConfig = toml::from_str(content)?;
        if parsed.converter.dpi == 0 {
            return Err(ConfigError::ZeroDpi);
        }
        let defaults = Self::default();

        Ok(GeneratorConfig {
            output_dir: parsed.output_dir.unwrap_or(defaults.output_dir),
            annunciators: parsed
                .annunciators
                .map(|list| list.into_iter().collect())
                .unwrap_or(defaults.annunciators),
            converter: parsed.converter,
            style: parsed.style,
            svg: parsed.svg,
            entries: parsed.image.unwrap_or(defaults.entries),
        })
    }
}
