use crate::domain::ports::DataSource;
use crate::utils::error::Result;
use std::fs;
use std::path::PathBuf;
use std::time::UNIX_EPOCH;

/// 從本機檔案系統讀取資料檔
#[derive(Debug, Clone)]
pub struct LocalFileSource {
    base_path: PathBuf,
}

impl LocalFileSource {
    pub fn new(base_path: impl Into<PathBuf>) -> Self {
        Self {
            base_path: base_path.into(),
        }
    }

    fn resolve(&self, path: &str) -> PathBuf {
        self.base_path.join(path)
    }
}

impl Default for LocalFileSource {
    fn default() -> Self {
        Self::new(".")
    }
}

impl DataSource for LocalFileSource {
    fn read_file(&self, path: &str) -> Result<Vec<u8>> {
        let full_path = self.resolve(path);
        tracing::debug!("Reading {}", full_path.display());
        let data = fs::read(full_path)?;
        Ok(data)
    }

    fn identity(&self, path: &str) -> Result<String> {
        let full_path = fs::canonicalize(self.resolve(path))?;
        let metadata = fs::metadata(&full_path)?;
        let modified = metadata
            .modified()
            .ok()
            .and_then(|t| t.duration_since(UNIX_EPOCH).ok())
            .map(|d| d.as_nanos())
            .unwrap_or_default();

        Ok(format!(
            "{}:{}:{}",
            full_path.display(),
            metadata.len(),
            modified
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_read_and_identity() {
        let dir = TempDir::new().unwrap();
        fs::write(dir.path().join("data.csv"), b"name\nA\n").unwrap();

        let source = LocalFileSource::new(dir.path());
        assert_eq!(source.read_file("data.csv").unwrap(), b"name\nA\n");

        let identity = source.identity("data.csv").unwrap();
        assert!(identity.contains("data.csv"));
        assert_eq!(identity, source.identity("data.csv").unwrap());
    }

    #[test]
    fn test_missing_file_is_error() {
        let dir = TempDir::new().unwrap();
        let source = LocalFileSource::new(dir.path());
        assert!(source.read_file("missing.csv").is_err());
        assert!(source.identity("missing.csv").is_err());
    }
}
