//! Catalogue of display mockups
//!
//! A catalogue is an ordered list of entries, each naming the file stem
//! and the display text to render. Rendering a catalogue produces the
//! [`DisplaySpec`]s that the batch generator writes to disk.

use std::collections::HashSet;

use serde::Deserialize;

use crate::error::RenderError;
use crate::lcd::annunciator::{Annunciator, Annunciators};
use crate::renderer::DisplayRenderer;

/// One display to render: file stem plus display text
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(try_from = "TomlEntry")]
pub struct CatalogueEntry {
    pub identifier: String,
    pub tokens: String,
}

#[derive(Deserialize)]
#[serde(deny_unknown_fields)]
struct TomlEntry {
    id: String,
    text: String,
}

impl TryFrom<TomlEntry> for CatalogueEntry {
    type Error = InvalidIdentifier;

    fn try_from(entry: TomlEntry) -> Result<Self, Self::Error> {
        check_identifier(&entry.id)?;
        Ok(CatalogueEntry::new(entry.id, entry.text))
    }
}

/// An identifier that cannot be used as a file stem in the output directory
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum InvalidIdentifier {
    #[error("identifier is empty")]
    Empty,
    #[error("identifier '{0}' contains a path separator or '..'")]
    LeavesOutputDir(String),
}

/// Check that `identifier` names a file directly inside the output directory
pub fn check_identifier(identifier: &str) -> Result<(), InvalidIdentifier> {
    if identifier.is_empty() {
        return Err(InvalidIdentifier::Empty);
    }
    if identifier.contains(['/', '\\']) || identifier.contains("..") {
        return Err(InvalidIdentifier::LeavesOutputDir(identifier.to_string()));
    }
    Ok(())
}

impl CatalogueEntry {
    pub fn new(identifier: impl Into<String>, tokens: impl Into<String>) -> Self {
        Self {
            identifier: identifier.into(),
            tokens: tokens.into(),
        }
    }
}

/// A rendered catalogue entry: file stem plus SVG markup
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DisplaySpec {
    pub identifier: String,
    pub markup: String,
}

impl DisplaySpec {
    pub fn new(identifier: impl Into<String>, markup: impl Into<String>) -> Self {
        Self {
            identifier: identifier.into(),
            markup: markup.into(),
        }
    }

    /// Name of the vector source file
    pub fn svg_file_name(&self) -> String {
        format!("{}.svg", self.identifier)
    }

    /// Name of the print-ready file
    pub fn pdf_file_name(&self) -> String {
        format!("{}.pdf", self.identifier)
    }
}

/// Render every entry in order, stopping at the first renderer error
pub fn render(
    entries: &[CatalogueEntry],
    renderer: &dyn DisplayRenderer,
    annunciators: &Annunciators,
) -> Result<Vec<DisplaySpec>, CatalogueError> {
    entries
        .iter()
        .map(|entry| {
            renderer
                .render(&entry.tokens, annunciators)
                .map(|markup| DisplaySpec::new(entry.identifier.clone(), markup))
                .map_err(|source| CatalogueError {
                    identifier: entry.identifier.clone(),
                    tokens: entry.tokens.clone(),
                    source,
                })
        })
        .collect()
}

/// A renderer failure, tagged with the entry it happened in
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
#[error("cannot render '{identifier}': {source}")]
pub struct CatalogueError {
    pub identifier: String,
    pub tokens: String,
    #[source]
    pub source: RenderError,
}

impl CatalogueError {
    /// Format the underlying error against the entry's display text
    pub fn format(&self, color: bool) -> String {
        self.source
            .format_with_color(&self.tokens, &self.identifier, color)
    }
}

/// Identifiers that occur more than once, in order of their second occurrence
pub fn duplicate_identifiers<'a, I>(identifiers: I) -> Vec<&'a str>
where
    I: IntoIterator<Item = &'a str>,
{
    let mut seen = HashSet::new();
    let mut duplicates = Vec::new();
    for id in identifiers {
        if !seen.insert(id) && !duplicates.contains(&id) {
            duplicates.push(id);
        }
    }
    duplicates
}

/// Display mockups used by the OS4 documentation
pub fn os4_documentation() -> Vec<CatalogueEntry> {
    vec![
        CatalogueEntry::new("lcd-less-than-program-1", "05 &lt; __"),
        CatalogueEntry::new("lcd-less-than-program-2", "05 &lt; ST _"),
        CatalogueEntry::new("lcd-less-than-program-3", "05 &lt; Z __"),
        CatalogueEntry::new("lcd-less-than-program-4", "5 &lt; Z IND __"),
        CatalogueEntry::new("lcd-less-than-program-5", "05`ÿÿ"),
        CatalogueEntry::new("lcd-less-than-program-6", "Z &lt; IND 10?"),
        CatalogueEntry::new("lcd-less-than-program-7", "06 M &lt;= L?"),
    ]
}

/// Annunciators shared by the OS4 documentation mockups
pub fn os4_annunciators() -> Annunciators {
    Annunciators::new().with(Annunciator::Prgm)
}
