//! Local file reader
//!
//! Reads files relative to a project root. Paths that escape the root are
//! treated as unreadable.

use async_trait::async_trait;
use council_application::FileReaderPort;
use std::path::{Component, Path, PathBuf};
use tracing::debug;

pub struct LocalFileReader {
    root: PathBuf,
}

impl LocalFileReader {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Join `path` onto the root, rejecting absolute paths and `..`.
    fn resolve(&self, path: &str) -> Option<PathBuf> {
        let relative = Path::new(path);
        let contained = relative
            .components()
            .all(|c| matches!(c, Component::Normal(_) | Component::CurDir));
        contained.then(|| self.root.join(relative))
    }
}

#[async_trait]
impl FileReaderPort for LocalFileReader {
    async fn read_file(&self, path: &str) -> Option<String> {
        let Some(full) = self.resolve(path) else {
            debug!("Refusing to read {} outside {}", path, self.root.display());
            return None;
        };
        match tokio::fs::read_to_string(&full).await {
            Ok(content) => Some(content),
            Err(e) => {
                debug!("Could not read {}: {}", full.display(), e);
                None
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_reads_relative_to_root() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::create_dir_all(dir.path().join("src")).unwrap();
        std::fs::write(dir.path().join("src/lib.rs"), "pub fn a() {}\n").unwrap();

        let reader = LocalFileReader::new(dir.path());
        assert_eq!(
            reader.read_file("src/lib.rs").await.as_deref(),
            Some("pub fn a() {}\n")
        );
        assert_eq!(
            reader.read_file("./src/lib.rs").await.as_deref(),
            Some("pub fn a() {}\n")
        );
    }

    #[tokio::test]
    async fn test_missing_file_is_none() {
        let dir = tempfile::tempdir().unwrap();
        let reader = LocalFileReader::new(dir.path());
        assert!(reader.read_file("nope.rs").await.is_none());
    }

    #[tokio::test]
    async fn test_escaping_paths_are_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let inner = dir.path().join("project");
        std::fs::create_dir_all(&inner).unwrap();
        std::fs::write(dir.path().join("secret.txt"), "x").unwrap();

        let reader = LocalFileReader::new(&inner);
        assert!(reader.read_file("../secret.txt").await.is_none());
        let absolute = dir.path().join("secret.txt");
        assert!(reader.read_file(&absolute.to_string_lossy()).await.is_none());
    }
}
