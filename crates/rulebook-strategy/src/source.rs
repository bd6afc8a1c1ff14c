//! Where strategy definitions come from.

use std::path::PathBuf;
use std::sync::Mutex;

use rulebook_core::error::StrategyError;
use tracing::{debug, warn};

/// A named unit of raw strategy JSON. The name identifies the unit in
/// logs and errors (a file name for directory sources).
pub type StrategyUnit = (String, String);

/// Supplies raw strategy definitions to the registry.
pub trait StrategySource: Send + Sync {
    /// Enumerate all available units. Individual unreadable units may
    /// be skipped with a warning; an `Err` means the source itself is
    /// unavailable.
    fn enumerate(&self) -> Result<Vec<StrategyUnit>, StrategyError>;
}

/// Reads `*.json` files from a directory.
pub struct DirStrategySource {
    dir: PathBuf,
}

impl DirStrategySource {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }
}

impl StrategySource for DirStrategySource {
    fn enumerate(&self) -> Result<Vec<StrategyUnit>, StrategyError> {
        if !self.dir.is_dir() {
            debug!(dir = %self.dir.display(), "strategy directory does not exist, loading nothing");
            return Ok(Vec::new());
        }
        let entries = std::fs::read_dir(&self.dir)
            .map_err(|e| StrategyError::Source(format!("{}: {}", self.dir.display(), e)))?;

        let mut units = Vec::new();
        for entry in entries {
            let path = match entry {
                Ok(entry) => entry.path(),
                Err(e) => {
                    warn!(dir = %self.dir.display(), error = %e, "skipping unreadable directory entry");
                    continue;
                }
            };
            if path.extension().and_then(|ext| ext.to_str()) != Some("json") {
                continue;
            }
            let name = path
                .file_name()
                .map(|n| n.to_string_lossy().into_owned())
                .unwrap_or_else(|| path.display().to_string());
            match std::fs::read_to_string(&path) {
                Ok(text) => units.push((name, text)),
                Err(e) => warn!(file = %path.display(), error = %e, "skipping unreadable strategy file"),
            }
        }
        // Deterministic load order regardless of directory iteration.
        units.sort_by(|a, b| a.0.cmp(&b.0));
        Ok(units)
    }
}

/// In-memory source, mainly for tests and embedded setups.
#[derive(Default)]
pub struct StaticStrategySource {
    units: Mutex<Vec<StrategyUnit>>,
}

impl StaticStrategySource {
    pub fn new(units: Vec<StrategyUnit>) -> Self {
        Self {
            units: Mutex::new(units),
        }
    }

    /// Replace the unit set; visible on the next `enumerate`.
    pub fn set_units(&self, units: Vec<StrategyUnit>) {
        *self.units.lock().unwrap() = units;
    }
}

impl StrategySource for StaticStrategySource {
    fn enumerate(&self) -> Result<Vec<StrategyUnit>, StrategyError> {
        Ok(self.units.lock().unwrap().clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    #[test]
    fn test_missing_directory_yields_no_units() {
        let source = DirStrategySource::new("/nonexistent/strategies");
        assert!(source.enumerate().unwrap().is_empty());
    }

    #[test]
    fn test_reads_only_json_files_in_name_order() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("b.json"), "{}").unwrap();
        fs::write(dir.path().join("a.json"), "{}").unwrap();
        fs::write(dir.path().join("notes.txt"), "ignored").unwrap();

        let source = DirStrategySource::new(dir.path());
        let units = source.enumerate().unwrap();

        let names: Vec<&str> = units.iter().map(|(n, _)| n.as_str()).collect();
        assert_eq!(names, vec!["a.json", "b.json"]);
    }

    #[test]
    fn test_static_source_swaps_units() {
        let source = StaticStrategySource::default();
        assert!(source.enumerate().unwrap().is_empty());

        source.set_units(vec![("inline".to_string(), "{}".to_string())]);
        assert_eq!(source.enumerate().unwrap().len(), 1);
    }
}
