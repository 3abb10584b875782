use std::io::Cursor;

use async_trait::async_trait;
use tokio::io::{AsyncRead, AsyncReadExt};

use super::error::StorageError;

/// Type alias for a boxed async reader.
pub type BoxReader<'a> = Box<dyn AsyncRead + Unpin + Send + 'a>;

/// Storage for uploaded files, addressed by the reference returned from [`BlobStore::put_stream`].
#[async_trait]
pub trait BlobStore: Send + Sync {
    /// Store bytes under a name derived from `original_name` and return the file reference.
    async fn put(&self, original_name: &str, data: &[u8]) -> Result<String, StorageError> {
        let reader: BoxReader<'_> = Box::new(Cursor::new(data.to_vec()));
        self.put_stream(original_name, reader).await
    }

    /// Store data from an async reader and return the file reference.
    async fn put_stream(
        &self,
        original_name: &str,
        reader: BoxReader<'_>,
    ) -> Result<String, StorageError>;

    /// Retrieve all bytes of a stored file.
    async fn get(&self, path: &str) -> Result<Vec<u8>, StorageError> {
        let mut reader = self.get_stream(path).await?;
        let mut buf = Vec::new();
        reader.read_to_end(&mut buf).await?;
        Ok(buf)
    }

    /// Open a stored file as a streaming async reader.
    async fn get_stream(&self, path: &str) -> Result<BoxReader<'static>, StorageError>;

    /// Check whether a stored file exists.
    async fn exists(&self, path: &str) -> Result<bool, StorageError>;

    /// Delete a stored file.
    ///
    /// Returns `true` if the file was deleted, `false` if it did not exist.
    async fn delete(&self, path: &str) -> Result<bool, StorageError>;

    /// Get the size of a stored file in bytes.
    async fn size(&self, path: &str) -> Result<u64, StorageError>;
}
