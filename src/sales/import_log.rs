use anyhow::{Context as _, Result};
use std::{
    collections::HashSet,
    fs::OpenOptions,
    io::{ErrorKind, Write as _},
    path::{Component, Path, PathBuf},
};

/// Append-only list of source files that were already imported, one path per line.
/// Paths are compared after normalization, so `data/./a.csv` and `data/a.csv` are the same file.
#[derive(Debug, Clone)]
pub struct ImportLog {
    path: PathBuf,
}

impl ImportLog {
    pub fn new(path: PathBuf) -> Self {
        Self { path }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Returns false if the log file doesn't exist yet
    pub fn already_imported(&self, source: &Path) -> Result<bool> {
        Ok(self.imported_files()?.contains(&normalize_path(source)))
    }

    pub fn record_imported(&self, source: &Path) -> Result<()> {
        let normalized = normalize_path(source);
        log::debug!("Recording {} as imported", normalized.display());
        let mut file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.path)
            .with_context(|| format!("Failed to open import log {}", self.path.display()))?;
        writeln!(file, "{}", normalized.display())?;
        Ok(())
    }

    pub fn imported_files(&self) -> Result<HashSet<PathBuf>> {
        let content = match std::fs::read_to_string(&self.path) {
            Ok(content) => content,
            Err(err) if err.kind() == ErrorKind::NotFound => return Ok(HashSet::new()),
            Err(err) => {
                return Err(err).with_context(|| {
                    format!("Failed to read import log {}", self.path.display())
                })
            }
        };
        Ok(content
            .lines()
            .map(str::trim)
            .filter(|line| !line.is_empty())
            .map(|line| normalize_path(Path::new(line)))
            .collect())
    }
}

/// Canonical path if the file exists, otherwise the absolute path with `.` and `..` resolved lexically
pub fn normalize_path(path: &Path) -> PathBuf {
    if let Ok(canonical) = std::fs::canonicalize(path) {
        return canonical;
    }
    let absolute = if path.is_absolute() {
        path.to_path_buf()
    } else {
        match std::env::current_dir() {
            Ok(current_dir) => current_dir.join(path),
            Err(err) => {
                log::warn!("Couldn't determine current directory: {err}");
                path.to_path_buf()
            }
        }
    };
    let mut normalized = PathBuf::new();
    for component in absolute.components() {
        match component {
            Component::CurDir => {}
            Component::ParentDir => {
                if !normalized.pop() {
                    normalized.push(component);
                }
            }
            component => normalized.push(component),
        }
    }
    normalized
}
