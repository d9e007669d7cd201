//! External vector-to-print conversion
//!
//! The converter runs as a child process with its working directory set
//! to the output directory, so it only ever sees bare file names.

use std::io;
use std::path::Path;
use std::process::{Command, ExitStatus, Stdio};
use std::thread;
use std::time::{Duration, Instant};

use thiserror::Error;

/// Resolution passed to the converter for raster sub-elements
pub const DEFAULT_DPI: u32 = 96;

/// Converter used when none is configured
pub const DEFAULT_PROGRAM: &str = "inkscape";

const POLL_INTERVAL: Duration = Duration::from_millis(50);

/// Why a conversion did not produce its output
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConverterFailure {
    #[error("exited with status {0}")]
    Exit(i32),
    #[error("terminated by signal")]
    Signal,
    /// The process could not be started
    #[error("could not run: {0}")]
    Spawn(String),
    /// Waiting on or killing the process failed
    #[error("lost track of process: {0}")]
    Wait(String),
    /// The process outlived the configured timeout and was killed
    #[error("timed out")]
    TimedOut,
}

/// Converts `<dir>/<input>` into `<dir>/<output>`
pub trait Converter {
    fn convert(&self, dir: &Path, input: &str, output: &str) -> Result<(), ConverterFailure>;
}

/// A command line converter, Inkscape by default
#[derive(Debug, Clone, PartialEq)]
pub struct ExternalConverter {
    pub program: String,
    pub dpi: u32,
    pub timeout: Option<Duration>,
}

impl Default for ExternalConverter {
    fn default() -> Self {
        Self {
            program: DEFAULT_PROGRAM.to_string(),
            dpi: DEFAULT_DPI,
            timeout: None,
        }
    }
}

impl ExternalConverter {
    pub fn new(program: impl Into<String>) -> Self {
        Self {
            program: program.into(),
            ..Self::default()
        }
    }

    pub fn with_dpi(mut self, dpi: u32) -> Self {
        self.dpi = dpi;
        self
    }

    pub fn with_timeout(mut self, timeout: Option<Duration>) -> Self {
        self.timeout = timeout;
        self
    }

    /// Arguments passed to the program for one conversion
    pub fn arguments(&self, input: &str, output: &str) -> Vec<String> {
        vec![
            format!("--export-filename={}", output),
            format!("--export-dpi={}", self.dpi),
            input.to_string(),
        ]
    }

    fn wait(&self, child: &mut std::process::Child) -> io::Result<Option<ExitStatus>> {
        let Some(timeout) = self.timeout else {
            return child.wait().map(Some);
        };
        let deadline = Instant::now() + timeout;
        loop {
            if let Some(status) = child.try_wait()? {
                return Ok(Some(status));
            }
            if Instant::now() >= deadline {
                child.kill()?;
                child.wait()?;
                return Ok(None);
            }
            thread::sleep(POLL_INTERVAL);
        }
    }
}

impl Converter for ExternalConverter {
    fn convert(&self, dir: &Path, input: &str, output: &str) -> Result<(), ConverterFailure> {
        let args = self.arguments(input, output);
        tracing::debug!(program = %self.program, ?args, dir = %dir.display(), "running converter");

        let mut child = Command::new(&self.program)
            .args(&args)
            .current_dir(dir)
            .stdin(Stdio::null())
            .spawn()
            .map_err(|e| ConverterFailure::Spawn(format!("{}: {}", self.program, e)))?;

        match self.wait(&mut child) {
            Ok(Some(status)) if status.success() => Ok(()),
            Ok(Some(status)) => match status.code() {
                Some(code) => Err(ConverterFailure::Exit(code)),
                None => Err(ConverterFailure::Signal),
            },
            Ok(None) => Err(ConverterFailure::TimedOut),
            Err(e) => Err(ConverterFailure::Wait(e.to_string())),
        }
    }
}
