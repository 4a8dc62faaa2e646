use std::fs;
use std::path::PathBuf;

use dirs_next as dirs;
use serde::{Deserialize, Serialize};

use crate::error::AppError;

/// Patterns excluded from every scan unless `--no-default-excludes` is given.
/// They cover virtualenvs, conda package caches and conda environments.
pub const DEFAULT_EXCLUDED_PATTERNS: &[&str] = &[".*virtualenv.*", ".*pkgs.*", ".*anaconda/envs.*"];

/// File stem, relative to the home directory, of the generated scripts.
pub const DEFAULT_OUTFILE_STEM: &str = ".python_switchers";

/// On-disk configuration read from `config.toml`.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct Config {
    #[serde(default)]
    pub exclude: Vec<String>,

    #[serde(default)]
    pub outfile_basename: Option<String>,
}

impl Config {
    pub fn load() -> Result<Self, AppError> {
        let path = config_file_path()?;
        if path.exists() {
            tracing::debug!(path = %path.display(), "loading configuration");
            let contents = fs::read_to_string(&path)?;
            let config: Config = toml::from_str(&contents)?;
            Ok(config)
        } else {
            Ok(Config::default())
        }
    }
}

pub fn config_file_path() -> Result<PathBuf, AppError> {
    let config_root = std::env::var_os("XDG_CONFIG_HOME")
        .map(PathBuf::from)
        .or_else(dirs::config_dir)
        .ok_or_else(|| {
            AppError::config("Unable to determine configuration directory for this platform")
        })?;
    Ok(config_root.join("python-switchers").join("config.toml"))
}

/// Where candidate interpreter paths come from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum IndexSource {
    /// The system `locate` database.
    Locate,
    /// A recursive walk of the given directories.
    Walk(Vec<PathBuf>),
}

/// Resolved settings for one run, assembled once at startup.
#[derive(Debug, Clone)]
pub struct Settings {
    pub excluded_patterns: Vec<String>,
    pub outfile_basename: PathBuf,
    pub dry_run: bool,
    pub json: bool,
    pub index: IndexSource,
}

/// Command-line values that override the configuration file.
#[derive(Debug, Clone, Default)]
pub struct Overrides {
    pub excluded_patterns: Vec<String>,
    pub outfile_basename: Option<PathBuf>,
    pub no_default_excludes: bool,
    pub dry_run: bool,
    pub json: bool,
    pub search_roots: Vec<PathBuf>,
}

impl Settings {
    /// Merge built-in defaults, the configuration file and the command line.
    ///
    /// Exclusion patterns accumulate in that order. The output basename is
    /// taken from the command line first, then the configuration file, then
    /// `$HOME/.python_switchers`.
    pub fn resolve(config: Config, overrides: Overrides) -> Result<Self, AppError> {
        let mut excluded_patterns: Vec<String> = if overrides.no_default_excludes {
            Vec::new()
        } else {
            DEFAULT_EXCLUDED_PATTERNS.iter().map(|p| p.to_string()).collect()
        };
        excluded_patterns.extend(config.exclude);
        excluded_patterns.extend(overrides.excluded_patterns);

        let outfile_basename = match (overrides.outfile_basename, config.outfile_basename) {
            (Some(path), _) => path,
            (None, Some(configured)) => PathBuf::from(expand_home(&configured)?),
            (None, None) => default_outfile_basename()?,
        };

        let index = if overrides.search_roots.is_empty() {
            IndexSource::Locate
        } else {
            IndexSource::Walk(overrides.search_roots)
        };

        Ok(Settings {
            excluded_patterns,
            outfile_basename,
            dry_run: overrides.dry_run,
            json: overrides.json,
            index,
        })
    }

    /// Output file for one script dialect: the basename plus `extension`.
    pub fn output_path(&self, extension: &str) -> PathBuf {
        let mut path = self.outfile_basename.as_os_str().to_os_string();
        path.push(extension);
        PathBuf::from(path)
    }
}

pub fn default_outfile_basename() -> Result<PathBuf, AppError> {
    let home_dir = dirs::home_dir()
        .ok_or_else(|| AppError::config("Unable to determine the home directory"))?;
    Ok(home_dir.join(DEFAULT_OUTFILE_STEM))
}

fn expand_home(value: &str) -> Result<String, AppError> {
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
