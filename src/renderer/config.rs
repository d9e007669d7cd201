//! Output options for the `[svg]` config section

use serde::Deserialize;

/// How the SVG markup is written, independent of the palette
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SvgConfig {
    /// Space between the panel and the edge of the drawing
    pub viewbox_padding: f64,
    /// Emit the `<?xml ...?>` declaration
    pub standalone: bool,
    /// One element per line, indented
    pub pretty_print: bool,
    /// Prepended to every CSS class; empty for bare names
    pub class_prefix: String,
    /// Draw unlit segments in the faint color
    pub show_unlit: bool,
}

impl Default for SvgConfig {
    fn default() -> Self {
        Self {
            viewbox_padding: 4.0,
            standalone: true,
            pretty_print: true,
            class_prefix: "lcd-".to_string(),
            show_unlit: false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[derive(Deserialize)]
    struct Wrapper {
        #[serde(default)]
        svg: SvgConfig,
    }

    #[test]
    fn test_missing_section_is_default() {
        let w: Wrapper = toml::from_str("").unwrap();
        assert_eq!(w.svg, SvgConfig::default());
        assert_eq!(w.svg.class_prefix, "lcd-");
    }

    #[test]
    fn test_partial_section() {
        let w: Wrapper = toml::from_str("[svg]\nshow_unlit = true\nviewbox_padding = 0.5\n").unwrap();
        assert!(w.svg.show_unlit);
        assert_eq!(w.svg.viewbox_padding, 0.5);
        assert!(w.svg.pretty_print);
    }

    #[test]
    fn test_unknown_key_rejected() {
        assert!(toml::from_str::<Wrapper>("[svg]\nshow_unlitt = true\n").is_err());
    }
}
