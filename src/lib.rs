//! OS4 display images - LCD mockups for the OS4 documentation
//!
//! This library renders HP-41 style display states to SVG and turns a
//! catalogue of them into `.svg`/`.pdf` pairs with an external converter.
//!
//! # Example
//!
//! ```rust
//! use os4_display_images::{render_display, Annunciator, Annunciators};
//!
//! let anns = Annunciators::new().with(Annunciator::Prgm);
//! let svg = render_display("05 &lt; __", &anns).unwrap();
//! assert!(svg.contains("<svg"));
//! assert!(svg.contains("PRGM"));
//! ```

pub mod catalogue;
pub mod config;
pub mod converter;
pub mod error;
pub mod generator;
pub mod lcd;
pub mod renderer;
pub mod stylesheet;

pub use catalogue::{CatalogueEntry, CatalogueError, DisplaySpec, InvalidIdentifier};
pub use config::{ConfigError, GeneratorConfig};
pub use converter::{Converter, ConverterFailure, ExternalConverter};
pub use error::RenderError;
pub use generator::{BatchGenerator, BatchReport, EntryStatus, FailurePolicy, GenerateError};
pub use lcd::{Annunciator, Annunciators};
pub use renderer::{DisplayRenderer, Lcd41, SvgConfig};
pub use stylesheet::LcdStyle;

use thiserror::Error;

/// Errors from a complete render-and-generate run
#[derive(Debug, Error)]
pub enum RunError {
    #[error(transparent)]
    Catalogue(#[from] CatalogueError),

    #[error(transparent)]
    Generate(#[from] GenerateError),
}

/// Render one display state with the default LCD look
pub fn render_display(tokens: &str, annunciators: &Annunciators) -> Result<String, RenderError> {
    Lcd41::new().render(tokens, annunciators)
}

/// Render the configured catalogue and write it out with `converter`
///
/// The whole catalogue is rendered before anything is written, so a bad
/// display text leaves the output directory untouched.
pub fn generate<C: Converter>(
    config: &GeneratorConfig,
    converter: C,
) -> Result<BatchReport, RunError> {
    let specs = render_catalogue(config)?;
    let generator = BatchGenerator::new(&config.output_dir, converter)
        .with_policy(config.converter.on_failure);
    Ok(generator.run(&specs)?)
}

/// Render the configured catalogue without touching the filesystem
pub fn render_catalogue(config: &GeneratorConfig) -> Result<Vec<DisplaySpec>, CatalogueError> {
    catalogue::render(&config.entries, &config.renderer(), &config.annunciators)
}
