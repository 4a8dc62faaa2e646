use std::fmt;
use std::path::{Path, PathBuf};

use serde::Serialize;

/// Packager of an interpreter build, as far as its install path tells.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Vendor {
    /// Installed from python.org under the non-system framework root.
    MacPython,
    /// Bundled with the OS.
    System,
    /// Anything else; the version string names the distribution, if anything.
    Other,
}

impl Vendor {
    pub fn as_str(&self) -> &'static str {
        match self {
            Vendor::MacPython => "macpython",
            Vendor::System => "system",
            Vendor::Other => "other",
        }
    }
}

impl fmt::Display for Vendor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Display strings and shell identifier derived from one installation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Naming {
    /// Full version string, vendor-qualified.
    pub full: String,
    /// Short form used for the prompt variable.
    pub short: String,
    /// Identifier-safe token; the switch function is `select_<token>`.
    pub token: String,
}

impl Naming {
    pub fn function_name(&self) -> String {
        format!("select_{}", self.token)
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct Installation {
    pub path: PathBuf,
    pub raw_version: String,
    pub vendor: Vendor,
    pub naming: Naming,
}

impl Installation {
    /// Directory holding the interpreter binary, prepended to `PATH` on switch.
    pub fn bin_dir(&self) -> &Path {
        self.path.parent().unwrap_or_else(|| Path::new(""))
    }
}

/// Outcome of one run.
#[derive(Debug, Clone, Default)]
pub struct Report {
    pub installations: Vec<Installation>,
    /// Files written, empty for a dry run.
    pub written: Vec<PathBuf>,
}
