use std::path::PathBuf;

use walkdir::WalkDir;

use super::PathIndex;

/// Candidates from a recursive walk of chosen directories, for hosts
/// without a `locate` database.
pub struct WalkIndex {
    roots: Vec<PathBuf>,
}

impl WalkIndex {
    pub fn new(roots: Vec<PathBuf>) -> Self {
        Self { roots }
    }
}

impl PathIndex for WalkIndex {
    fn candidates(&self) -> Vec<String> {
        let mut paths = Vec::new();
        for root in &self.roots {
            if !root.exists() {
                tracing::debug!(root = %root.display(), "search root does not exist");
                continue;
            }

            for entry in WalkDir::new(root).sort_by_file_name() {
                let entry = match entry {
                    Ok(entry) => entry,
                    Err(err) => {
                        tracing::debug!(path = ?err.path(), error = %err, "skipping entry");
                        continue;
                    }
                };

                if !entry.file_type().is_dir() {
                    paths.push(entry.path().to_string_lossy().to_string());
                }
            }
        }
        paths
    }

    fn name(&self) -> &'static str {
        "walk"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    #[test]
    fn walk_lists_files_under_roots() {
        let temp = tempfile::tempdir().unwrap();
        let bin = temp.path().join("py/bin");
        fs::create_dir_all(&bin).unwrap();
        fs::write(bin.join("python"), "").unwrap();
        fs::write(bin.join("pip"), "").unwrap();

        let index = WalkIndex::new(vec![temp.path().to_path_buf()]);
        let candidates = index.candidates();

        assert_eq!(candidates.len(), 2);
        assert!(candidates.iter().any(|p| p.ends_with("py/bin/python")));
        assert!(candidates.iter().any(|p| p.ends_with("py/bin/pip")));
    }

    #[test]
    fn missing_root_is_ignored() {
        let index = WalkIndex::new(vec![PathBuf::from("/definitely/not/here/12345")]);
        assert!(index.candidates().is_empty());
    }
}
