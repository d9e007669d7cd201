//! Batch image generation
//!
//! For each catalogue entry, in order: write `<id>.svg` into the output
//! directory, then run the converter to produce `<id>.pdf` next to it and
//! wait for it to exit. Writing a source file is fatal on failure; what
//! happens after a failed conversion is decided by [`FailurePolicy`].

use std::fs::File;
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use serde::Deserialize;
use thiserror::Error;
use tracing::{info, warn};

use crate::catalogue::{check_identifier, duplicate_identifiers, DisplaySpec, InvalidIdentifier};
use crate::converter::{Converter, ConverterFailure};

/// What to do when the converter fails for an entry
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FailurePolicy {
    /// Log a warning and go on with the next entry
    #[default]
    Continue,
    /// Stop the run with an error
    Abort,
}

/// Outcome of one catalogue entry
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EntryStatus {
    Success,
    ConverterFailed(ConverterFailure),
}

/// Errors that stop a run
#[derive(Debug, Error)]
pub enum GenerateError {
    /// The vector source could not be written
    #[error("cannot write '{}': {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// An entry would be written outside the output directory
    #[error(transparent)]
    InvalidIdentifier(#[from] InvalidIdentifier),

    /// The converter failed and the policy is [`FailurePolicy::Abort`]
    #[error("converter failed for '{identifier}': {failure}")]
    ConverterFailed {
        identifier: String,
        failure: ConverterFailure,
    },
}

/// Per-entry results of a run, in catalogue order
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BatchReport {
    pub entries: Vec<(String, EntryStatus)>,
}

impl BatchReport {
    /// Identifiers that converted successfully
    pub fn succeeded(&self) -> impl Iterator<Item = &str> {
        self.entries
            .iter()
            .filter(|(_, status)| *status == EntryStatus::Success)
            .map(|(id, _)| id.as_str())
    }

    /// Entries whose conversion failed
    pub fn failed(&self) -> impl Iterator<Item = (&str, &ConverterFailure)> {
        self.entries.iter().filter_map(|(id, status)| match status {
            EntryStatus::ConverterFailed(failure) => Some((id.as_str(), failure)),
            EntryStatus::Success => None,
        })
    }

    pub fn is_success(&self) -> bool {
        self.failed().next().is_none()
    }
}

/// Writes catalogue entries into one output directory and converts them
pub struct BatchGenerator<C> {
    output_dir: PathBuf,
    converter: C,
    policy: FailurePolicy,
}

impl<C: Converter> BatchGenerator<C> {
    pub fn new(output_dir: impl Into<PathBuf>, converter: C) -> Self {
        Self {
            output_dir: output_dir.into(),
            converter,
            policy: FailurePolicy::default(),
        }
    }

    pub fn with_policy(mut self, policy: FailurePolicy) -> Self {
        self.policy = policy;
        self
    }

    pub fn output_dir(&self) -> &Path {
        &self.output_dir
    }

    pub fn converter(&self) -> &C {
        &self.converter
    }

    /// Write and convert every entry, strictly in order
    ///
    /// Identifiers are checked up front; an invalid one fails the run
    /// before anything is written.
    pub fn run(&self, catalogue: &[DisplaySpec]) -> Result<BatchReport, GenerateError> {
        check_catalogue(catalogue)?;

        let mut report = BatchReport::default();
        for spec in catalogue {
            self.write_source(spec)?;

            let status = match self.converter.convert(
                &self.output_dir,
                &spec.svg_file_name(),
                &spec.pdf_file_name(),
            ) {
                Ok(()) => {
                    info!(id = %spec.identifier, "converted {}", spec.pdf_file_name());
                    EntryStatus::Success
                }
                Err(failure) => match self.policy {
                    FailurePolicy::Abort => {
                        return Err(GenerateError::ConverterFailed {
                            identifier: spec.identifier.clone(),
                            failure,
                        })
                    }
                    FailurePolicy::Continue => {
                        warn!(id = %spec.identifier, "converter {}", failure);
                        EntryStatus::ConverterFailed(failure)
                    }
                },
            };
            report.entries.push((spec.identifier.clone(), status));
        }
        Ok(report)
    }

    /// Write the vector sources without running the converter
    pub fn write_sources_only(&self, catalogue: &[DisplaySpec]) -> Result<Vec<PathBuf>, GenerateError> {
        check_catalogue(catalogue)?;
        catalogue.iter().map(|spec| self.write_source(spec)).collect()
    }

    fn write_source(&self, spec: &DisplaySpec) -> Result<PathBuf, GenerateError> {
        let path = self.output_dir.join(spec.svg_file_name());
        write_file(&path, &spec.markup).map_err(|source| GenerateError::Io {
            path: path.clone(),
            source,
        })?;
        info!(id = %spec.identifier, path = %path.display(), "wrote source");
        Ok(path)
    }
}

// The handle is closed when `file` drops, also on the error path
fn write_file(path: &Path, contents: &str) -> io::Result<()> {
    let mut file = File::create(path)?;
    file.write_all(contents.as_bytes())?;
    file.flush()
}

fn check_catalogue(catalogue: &[DisplaySpec]) -> Result<(), GenerateError> {
    for spec in catalogue {
        check_identifier(&spec.identifier)?;
    }
    let ids = catalogue.iter().map(|spec| spec.identifier.as_str());
    for id in duplicate_identifiers(ids) {
        warn!(id, "identifier appears more than once, later entries overwrite earlier files");
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;
    use std::fs;

    use pretty_assertions::assert_eq;

    /// Converter that fails for the listed inputs and records every call
    #[derive(Default)]
    struct Scripted {
        failing: Vec<&'static str>,
        calls: RefCell<Vec<String>>,
    }

    impl Converter for Scripted {
        fn convert(&self, _dir: &Path, input: &str, _output: &str) -> Result<(), ConverterFailure> {
            self.calls.borrow_mut().push(input.to_string());
            if self.failing.iter().any(|f| *f == input) {
                Err(ConverterFailure::Exit(1))
            } else {
                Ok(())
            }
        }
    }

    fn specs() -> Vec<DisplaySpec> {
        vec![
            DisplaySpec::new("a", "<svg>X</svg>"),
            DisplaySpec::new("b", "<svg>Y</svg>"),
            DisplaySpec::new("c", "<svg>Z</svg>"),
        ]
    }

    #[test]
    fn test_continue_policy_records_failures() {
        let dir = tempfile::tempdir().unwrap();
        let converter = Scripted {
            failing: vec!["b.svg"],
            ..Default::default()
        };
        let generator = BatchGenerator::new(dir.path(), converter);
        let report = generator.run(&specs()).unwrap();

        assert!(!report.is_success());
        assert_eq!(report.succeeded().collect::<Vec<_>>(), vec!["a", "c"]);
        assert_eq!(
            report.failed().collect::<Vec<_>>(),
            vec![("b", &ConverterFailure::Exit(1))]
        );
        assert_eq!(
            *generator.converter().calls.borrow(),
            vec!["a.svg", "b.svg", "c.svg"]
        );
    }

    #[test]
    fn test_abort_policy_stops_at_failure() {
        let dir = tempfile::tempdir().unwrap();
        let converter = Scripted {
            failing: vec!["b.svg"],
            ..Default::default()
        };
        let generator = BatchGenerator::new(dir.path(), converter).with_policy(FailurePolicy::Abort);
        let err = generator.run(&specs()).unwrap_err();

        assert!(matches!(err, GenerateError::ConverterFailed { ref identifier, .. } if identifier == "b"));
        assert!(dir.path().join("b.svg").exists());
        assert!(!dir.path().join("c.svg").exists());
    }

    #[test]
    fn test_write_sources_only() {
        let dir = tempfile::tempdir().unwrap();
        let generator = BatchGenerator::new(dir.path(), Scripted::default());
        let paths = generator.write_sources_only(&specs()).unwrap();

        assert_eq!(paths.len(), 3);
        assert_eq!(fs::read_to_string(&paths[2]).unwrap(), "<svg>Z</svg>");
        assert!(generator.converter().calls.borrow().is_empty());
    }

    #[test]
    fn test_overwrites_existing_file() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("a.svg"), "a much longer stale body than the new one").unwrap();
        let generator = BatchGenerator::new(dir.path(), Scripted::default());
        generator.run(&specs()[..1]).unwrap();
        assert_eq!(
            fs::read_to_string(dir.path().join("a.svg")).unwrap(),
            "<svg>X</svg>"
        );
    }

    #[test]
    fn test_io_error_message_names_path() {
        let dir = tempfile::tempdir().unwrap();
        let missing = dir.path().join("nope");
        let generator = BatchGenerator::new(&missing, Scripted::default());
        let err = generator.run(&specs()).unwrap_err();
        assert!(err.to_string().contains("a.svg"));
    }

    #[test]
    fn test_rejects_identifiers_leaving_output_dir() {
        let dir = tempfile::tempdir().unwrap();
        let out = dir.path().join("out");
        fs::create_dir(&out).unwrap();
        let generator = BatchGenerator::new(&out, Scripted::default());

        let escaping = vec![
            DisplaySpec::new("a", "<svg/>"),
            DisplaySpec::new("../escaped", "<svg/>"),
        ];
        let err = generator.run(&escaping).unwrap_err();
        assert!(matches!(
            err,
            GenerateError::InvalidIdentifier(InvalidIdentifier::LeavesOutputDir(ref id)) if id == "../escaped"
        ));
        assert!(!dir.path().join("escaped.svg").exists());
        assert!(!out.join("a.svg").exists());
        assert!(generator.converter().calls.borrow().is_empty());
    }

    #[test]
    fn test_rejects_empty_identifier() {
        let dir = tempfile::tempdir().unwrap();
        let generator = BatchGenerator::new(dir.path(), Scripted::default());

        let err = generator
            .write_sources_only(&[DisplaySpec::new("", "<svg/>")])
            .unwrap_err();
        assert!(matches!(
            err,
            GenerateError::InvalidIdentifier(InvalidIdentifier::Empty)
        ));
        assert!(!dir.path().join(".svg").exists());
    }

    #[test]
    fn test_policy_from_toml_value() {
        #[derive(Deserialize)]
        struct Wrapper {
            on_failure: FailurePolicy,
        }
        let w: Wrapper = toml::from_str(r#"on_failure = "abort""#).unwrap();
        assert_eq!(w.on_failure, FailurePolicy::Abort);
    }
}
