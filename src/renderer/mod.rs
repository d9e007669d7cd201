//! SVG renderer for LCD display states
//!
//! [`DisplayRenderer`] is the seam the batch generator renders through;
//! [`Lcd41`] is the built-in implementation that draws the twelve-cell
//! fourteen-segment display.

pub mod config;
pub mod geometry;
pub mod svg;

pub use config::SvgConfig;
pub use svg::render_svg;

use crate::error::RenderError;
use crate::lcd::annunciator::Annunciators;
use crate::lcd::cells::DisplayCells;
use crate::stylesheet::LcdStyle;

/// Turns display text plus annunciator state into SVG markup
///
/// Implementations must be pure: the same inputs give the same markup.
pub trait DisplayRenderer {
    fn render(&self, tokens: &str, annunciators: &Annunciators) -> Result<String, RenderError>;
}

/// The HP-41 style liquid crystal display
#[derive(Debug, Clone, Default)]
pub struct Lcd41 {
    pub svg: SvgConfig,
    pub style: LcdStyle,
}

impl Lcd41 {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the SVG configuration
    pub fn with_svg(mut self, config: SvgConfig) -> Self {
        self.svg = config;
        self
    }

    /// Set the color palette
    pub fn with_style(mut self, style: LcdStyle) -> Self {
        self.style = style;
        self
    }
}

impl DisplayRenderer for Lcd41 {
    fn render(&self, tokens: &str, annunciators: &Annunciators) -> Result<String, RenderError> {
        let cells = DisplayCells::parse(tokens)?;
        Ok(render_svg(&cells, annunciators, &self.svg, &self.style))
    }
}
