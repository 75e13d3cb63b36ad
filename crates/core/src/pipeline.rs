//! CI runner integration
//!
//! Key/value shim over the files and workflow commands a GitHub Actions
//! compatible runner provides: step outputs go to `$GITHUB_OUTPUT`,
//! exported variables to `$GITHUB_ENV`, and annotations to stdout.

use crate::error::{Error, Result};
use std::fs::OpenOptions;
use std::io::Write;
use std::path::{Path, PathBuf};

/// File receiving step outputs
pub const OUTPUT_FILE_ENV: &str = "GITHUB_OUTPUT";

/// File receiving variables for later steps
pub const ENV_FILE_ENV: &str = "GITHUB_ENV";

/// Whether the process runs inside a GitHub Actions compatible runner
pub fn running_in_ci() -> bool {
    std::env::var("GITHUB_ACTIONS").is_ok_and(|v| v == "true")
}

/// Handle on the runner's command files
#[derive(Debug, Clone, Default)]
pub struct Pipeline {
    output_file: Option<PathBuf>,
    env_file: Option<PathBuf>,
}

impl Pipeline {
    /// Create a pipeline writing to explicit command files
    pub fn new(output_file: Option<PathBuf>, env_file: Option<PathBuf>) -> Self {
        Self {
            output_file,
            env_file,
        }
    }

    /// Discover command files from the runner environment
    pub fn from_env() -> Self {
        let file_from = |key: &str| {
            std::env::var_os(key)
                .filter(|v| !v.is_empty())
                .map(PathBuf::from)
        };
        Self::new(file_from(OUTPUT_FILE_ENV), file_from(ENV_FILE_ENV))
    }

    /// Publish a step output
    pub fn set_output(&self, name: &str, value: &str) -> Result<()> {
        tracing::debug!(name, value, "setting step output");
        match &self.output_file {
            Some(path) => append_entry(path, name, value),
            None => {
                println!("::set-output name={}::{}", escape_property(name), escape_data(value));
                Ok(())
            }
        }
    }

    /// Make a variable visible to later steps of the same job
    pub fn export_variable(&self, name: &str, value: &str) -> Result<()> {
        tracing::debug!(name, value, "exporting variable");
        match &self.env_file {
            Some(path) => append_entry(path, name, value),
            None => {
                println!("::set-env name={}::{}", escape_property(name), escape_data(value));
                Ok(())
            }
        }
    }

    /// Emit an error annotation
    pub fn error(&self, message: &str) {
        println!("::error::{}", escape_data(message));
    }

    /// Emit a warning annotation
    pub fn warning(&self, message: &str) {
        println!("::warning::{}", escape_data(message));
    }

    /// Start a collapsible log group
    pub fn group(&self, title: &str) {
        println!("::group::{}", escape_data(title));
    }

    /// Close the current log group
    pub fn end_group(&self) {
        println!("::endgroup::");
    }
}

/// Format one `name=value` entry for a runner command file.
///
/// Multi-line values use the heredoc form with a random delimiter.
pub fn format_entry(name: &str, value: &str) -> Result<String> {
    if name.is_empty() || name.contains('=') || name.contains('\n') {
        return Err(Error::validation(format!("Invalid variable name: {:?}", name)));
    }

    if !value.contains('\n') && !value.contains('\r') {
        return Ok(format!("{}={}\n", name, value));
    }

    let delimiter = format!("ghadelimiter_{}", uuid::Uuid::new_v4());
    if value.contains(&delimiter) {
        return Err(Error::validation(format!(
            "Value for {} contains the delimiter {}",
            name, delimiter
        )));
    }
    Ok(format!("{}<<{}\n{}\n{}\n", name, delimiter, value, delimiter))
}

fn append_entry(path: &Path, name: &str, value: &str) -> Result<()> {
    let entry = format_entry(name, value)?;
    let mut file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(path)
        .map_err(|e| {
            Error::io(format!("Failed to open {}: {}", path.display(), e)).with_source(e)
        })?;
    file.write_all(entry.as_bytes())?;
    Ok(())
}

fn escape_data(s: &str) -> String {
    s.replace('%', "%25").replace('\r', "%0D").replace('\n', "%0A")
}

fn escape_property(s: &str) -> String {
    escape_data(s).replace(':', "%3A").replace(',', "%2C")
}
