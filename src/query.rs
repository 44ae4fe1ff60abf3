use std::fmt;
use std::path::{Path, PathBuf};
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Serialization used when writing the scan report.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    #[default]
    Json,
    Yaml,
}

impl OutputFormat {
    pub const DEFAULT: OutputFormat = OutputFormat::Json;

    pub const ALL: [OutputFormat; 2] = [OutputFormat::Json, OutputFormat::Yaml];

    pub fn as_str(&self) -> &'static str {
        match self {
            OutputFormat::Json => "json",
            OutputFormat::Yaml => "yaml",
        }
    }
}

impl FromStr for OutputFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "json" => Ok(OutputFormat::Json),
            "yaml" => Ok(OutputFormat::Yaml),
            _ => Err(format!("unsupported output format: {s}")),
        }
    }
}

impl fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Resolve a user-supplied format token, falling back to the default.
///
/// Never fails. An empty token silently selects the default; an unknown
/// token selects the default and returns a diagnostic for the caller to
/// report.
pub fn parse_output_format_or_default(format: &str) -> (OutputFormat, Option<String>) {
    if format.is_empty() {
        return (OutputFormat::DEFAULT, None);
    }

    match format.parse::<OutputFormat>() {
        Ok(parsed) => (parsed, None),
        Err(diagnostic) => (OutputFormat::DEFAULT, Some(diagnostic)),
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("only one of image file or image URI can be specified")]
    ConflictingTargets,
}

/// What a query asks the pipeline to look at.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScanTarget<'a> {
    File(&'a Path),
    Uri(&'a str),
    /// No explicit target: everything running on the configured runtimes.
    Runtimes,
}

/// A single scan request: target selection plus output sink and format.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SimpleQuery {
    pub project_id: Option<String>,
    pub output_path: Option<PathBuf>,
    pub output_fmt: OutputFormat,
    pub image_file: Option<PathBuf>,
    pub image_uri: Option<String>,
}

impl SimpleQuery {
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.image_file.is_some() && self.image_uri.is_some() {
            return Err(ValidationError::ConflictingTargets);
        }

        Ok(())
    }

    pub fn target(&self) -> ScanTarget<'_> {
        if let Some(file) = &self.image_file {
            ScanTarget::File(file)
        } else if let Some(uri) = &self.image_uri {
            ScanTarget::Uri(uri)
        } else {
            ScanTarget::Runtimes
        }
    }
}

impl fmt::Display for SimpleQuery {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let output =
            self.output_path.as_ref().map(|path| path.display().to_string()).unwrap_or_default();
        write!(
            f,
            "projectID:{}, output:{}, format:{}",
            self.project_id.as_deref().unwrap_or_default(),
            output,
            self.output_fmt
        )
    }
}
