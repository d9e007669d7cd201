//! LCD color palette
//!
//! The palette decides how the panel, lit and unlit segments, and the
//! annunciator text look. It can be loaded from TOML so the documentation
//! can match a printed or on-screen theme.

use std::path::Path;

use serde::Deserialize;
use thiserror::Error;

/// Errors that can occur when loading or parsing a palette
#[derive(Error, Debug)]
pub enum StylesheetError {
    #[error("Failed to read stylesheet file: {0}")]
    IoError(#[from] std::io::Error),
    #[error("Failed to parse stylesheet TOML: {0}")]
    ParseError(#[from] toml::de::Error),
}

/// Colors used when drawing a display
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default, rename_all = "kebab-case")]
pub struct LcdStyle {
    /// Panel behind the cells
    pub background: String,
    /// Lit segments and punctuation
    pub segment_on: String,
    /// Unlit segments, when drawn at all
    pub segment_off: String,
    /// Annunciator labels
    pub annunciator: String,
    /// Font for the annunciator row
    pub font_family: String,
}

impl Default for LcdStyle {
    fn default() -> Self {
        Self {
            background: "#c9d1b0".to_string(),
            segment_on: "#1a1a1a".to_string(),
            segment_off: "#b8c09f".to_string(),
            annunciator: "#1a1a1a".to_string(),
            font_family: "sans-serif".to_string(),
        }
    }
}

/// TOML structure for a standalone palette file
#[derive(Deserialize)]
struct TomlStylesheet {
    metadata: Option<TomlMetadata>,
    #[serde(default)]
    colors: LcdStyle,
}

#[derive(Deserialize)]
struct TomlMetadata {
    name: Option<String>,
}

impl LcdStyle {
    /// Load a palette from a TOML file
    pub fn from_file(path: &Path) -> Result<Self, StylesheetError> {
        let content = std::fs::read_to_string(path)?;
        Self::from_toml(&content)
    }

    /// Load a palette from a TOML string with a `[colors]` table
    pub fn from_toml(content: &str) -> Result<Self, StylesheetError> {
        let parsed: TomlStylesheet = toml::from_str(content)?;
        if let Some(name) = parsed.metadata.and_then(|m| m.name) {
            tracing::debug!(palette = %name, "loaded LCD palette");
        }
        Ok(parsed.colors)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_palette() {
        let style = LcdStyle::default();
        assert_eq!(style.segment_on, "#1a1a1a");
        assert_eq!(style.background, "#c9d1b0");
    }

    #[test]
    fn test_partial_override_keeps_defaults() {
        let toml_str = r##"
[metadata]
name = "Print"

[colors]
background = "#ffffff"
"##;
        let style = LcdStyle::from_toml(toml_str).expect("Should parse");
        assert_eq!(style.background, "#ffffff");
        assert_eq!(style.segment_on, LcdStyle::default().segment_on);
    }

    #[test]
    fn test_kebab_case_keys() {
        let style = LcdStyle::from_toml("[colors]\nsegment-off = \"none\"\n").unwrap();
        assert_eq!(style.segment_off, "none");
    }

    #[test]
    fn test_missing_colors_table_is_default() {
        let style = LcdStyle::from_toml("").unwrap();
        assert_eq!(style, LcdStyle::default());
    }

    #[test]
    fn test_invalid_toml_error() {
        let result = LcdStyle::from_toml("this is not valid toml {{{{");
        assert!(matches!(result, Err(StylesheetError::ParseError(_))));
    }
}
