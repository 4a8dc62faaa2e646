use std::path::{Path, PathBuf};

use regex::Regex;

use crate::error::AppError;
use crate::index::PathIndex;

/// Binary name suffixes recognised as interpreters.
const PYTHON_SUFFIXES: &[&str] = &["bin/python", "bin/python3"];

/// Ordered exclusion patterns, each anchored at the start of the path.
#[derive(Debug, Clone)]
pub struct ExclusionSet {
    patterns: Vec<Regex>,
}

impl ExclusionSet {
    pub fn new<S: AsRef<str>>(patterns: &[S]) -> Result<Self, AppError> {
        let patterns = patterns
            .iter()
            .map(|pattern| Regex::new(&format!("^(?:{})", pattern.as_ref())))
            .collect::<Result<Vec<_>, _>>()?;
        Ok(Self { patterns })
    }

    pub fn empty() -> Self {
        Self { patterns: Vec::new() }
    }

    /// True when any pattern matches from the beginning of `path`.
    pub fn is_excluded(&self, path: &str) -> bool {
        self.patterns.iter().any(|pattern| pattern.is_match(path))
    }

    pub fn len(&self) -> usize {
        self.patterns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.patterns.is_empty()
    }
}

pub fn is_python_filepath(path: &str) -> bool {
    PYTHON_SUFFIXES.iter().any(|suffix| path.ends_with(suffix))
}

/// Check that `path` names an existing interpreter and is not excluded.
pub fn is_python_executable<F>(path: &str, exclusions: &ExclusionSet, file_exists: F) -> bool
where
    F: Fn(&Path) -> bool,
{
    if !is_python_filepath(path) || !file_exists(Path::new(path)) {
        return false;
    }
    !exclusions.is_excluded(path)
}

pub struct Scanner {
    index: Box<dyn PathIndex>,
    exclusions: ExclusionSet,
}

impl Scanner {
    pub fn new(index: Box<dyn PathIndex>, exclusions: ExclusionSet) -> Self {
        Self { index, exclusions }
    }

    /// Every non-excluded interpreter path, in index order.
    pub fn detect_all_python_installs(&self) -> Vec<PathBuf> {
        let candidates = self.index.candidates();
        tracing::debug!(index = self.index.name(), count = candidates.len(), "index lookup done");

        candidates
            .into_iter()
            .filter(|candidate| {
                let keep = is_python_executable(candidate, &self.exclusions, Path::exists);
                if !keep && is_python_filepath(candidate) {
                    tracing::debug!(path = %candidate, "skipping excluded or missing interpreter");
                }
                keep
            })
            .map(PathBuf::from)
            .collect()
    }
}
