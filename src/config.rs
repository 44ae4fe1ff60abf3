use std::fs;
use std::path::{Path, PathBuf};

use dirs_next as dirs;
use globset::{Glob, GlobSet};
use serde::{Deserialize, Serialize};

use crate::error::AppError;

const DEFAULT_RUNTIME: &str = "docker";

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub project: Option<String>,
    /// Raw format token; resolved the same way as `--format`.
    #[serde(default)]
    pub format: Option<String>,
    #[serde(default)]
    pub output: Option<String>,
    #[serde(default = "default_runtimes")]
    pub runtimes: Vec<String>,
    #[serde(default)]
    pub exclude: Vec<String>,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            project: None,
            format: None,
            output: None,
            runtimes: default_runtimes(),
            exclude: Vec::new(),
        }
    }
}

fn default_runtimes() -> Vec<String> {
    vec![DEFAULT_RUNTIME.to_string()]
}

impl Config {
    pub fn load() -> Result<Self, AppError> {
        let path = config_file_path()?;
        Config::load_from(&path)
    }

    pub fn load_from(path: &Path) -> Result<Self, AppError> {
        if path.exists() {
            let contents = fs::read_to_string(path)?;
            let config: Config = toml::from_str(&contents)?;
            log::debug!("loaded configuration from {}", path.display());
            Ok(config)
        } else {
            Ok(Config::default())
        }
    }

    pub fn output_path(&self) -> Result<Option<PathBuf>, AppError> {
        match self.output.as_deref() {
            None | Some("") => Ok(None),
            Some(value) => Ok(Some(expand_home_path(Path::new(value))?)),
        }
    }

    pub fn compile_excludes(&self) -> Result<Option<GlobSet>, AppError> {
        if self.exclude.is_empty() {
            return Ok(None);
        }

        let mut builder = globset::GlobSetBuilder::new();
        for pattern in &self.exclude {
            builder.add(Glob::new(pattern)?);
        }

        Ok(Some(builder.build()?))
    }
}

pub fn config_file_path() -> Result<PathBuf, AppError> {
    let config_root = std::env::var_os("XDG_CONFIG_HOME")
        .map(PathBuf::from)
        .or_else(dirs::config_dir)
        .ok_or_else(|| {
            AppError::config("Unable to determine configuration directory for this platform")
        })?;
    Ok(config_root.join("disco").join("config.toml"))
}

/// Expand a leading `~` in a user-supplied path; non-UTF-8 paths are kept as-is.
pub fn expand_home_path(path: &Path) -> Result<PathBuf, AppError> {
    match path.to_str() {
        Some(value) => Ok(PathBuf::from(expand_home(value)?)),
        None => Ok(path.to_path_buf()),
    }
}

pub fn expand_home(value: &str) -> Result<String, AppError> {
    if !value.starts_with('~') {
        return Ok(value.to_string());
    }
    let home_dir = dirs::home_dir().ok_or_else(|| {
        AppError::config("Unable to expand '~' because the home directory is unknown")
    })?;
    if value == "~" {
        Ok(home_dir.display().to_string())
    } else if let Some(stripped) = value.strip_prefix("~/") {
        Ok(home_dir.join(stripped).display().to_string())
    } else {
        Ok(value.to_string())
    }
}
