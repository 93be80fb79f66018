use async_trait::async_trait;
use log::debug;
use std::io;

/// Local file access needed by uploads.
#[async_trait]
pub trait FileSystem: Send + Sync {
    /// Reads the whole file into memory.
    async fn read_file_as_bytes(&self, path: &str) -> io::Result<Vec<u8>>;
}

#[derive(Debug, Default, Clone, Copy)]
pub struct LocalFileSystem;

#[async_trait]
impl FileSystem for LocalFileSystem {
    async fn read_file_as_bytes(&self, path: &str) -> io::Result<Vec<u8>> {
        let data = tokio::fs::read(path).await?;
        debug!("Read {} bytes from {}", data.len(), path);
        Ok(data)
    }
}
