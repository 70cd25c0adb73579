//! File reader port
//!
//! Used to backfill `original_content` on update changes before they are
//! handed to the executor.

use async_trait::async_trait;

#[async_trait]
pub trait FileReaderPort: Send + Sync {
    /// Current content of `path`, or `None` if it cannot be read.
    async fn read_file(&self, path: &str) -> Option<String>;
}

/// Reader that never finds anything; every update is demoted to a create.
pub struct NoFileReader;

#[async_trait]
impl FileReaderPort for NoFileReader {
    async fn read_file(&self, _path: &str) -> Option<String> {
        None
    }
}
