use std::path::{Path, PathBuf};
use std::time::Duration;

use async_trait::async_trait;
use chrono::Utc;
use tokio::fs;
use tokio::io::{AsyncWriteExt, BufReader};
use tracing::debug;

use super::error::StorageError;
use super::filename::{sanitize_upload_name, validate_flat_filename};
use super::traits::{BlobStore, BoxReader};

/// URL prefix under which stored files are published.
pub const UPLOADS_PREFIX: &str = "uploads";

const MAX_NAME_ATTEMPTS: usize = 50;

/// Filesystem-backed upload store.
///
/// Files live flat under `root` as `{epoch millis}-{original name}` and are referenced as
/// `uploads/{stored name}`, which is also their URL path below the server root.
pub struct FilesystemBlobStore {
    root: PathBuf,
}

impl FilesystemBlobStore {
    /// Create a new filesystem store, creating the root directory if needed.
    pub async fn new(root: impl Into<PathBuf>) -> Result<Self, StorageError> {
        let store = Self { root: root.into() };
        store.ensure_root().await?;
        Ok(store)
    }

    /// Make sure the root directory exists. Idempotent.
    pub async fn ensure_root(&self) -> Result<(), StorageError> {
        fs::create_dir_all(&self.root).await?;
        Ok(())
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Build the public reference for a stored file name.
    pub fn reference(stored_name: &str) -> String {
        format!("{UPLOADS_PREFIX}/{stored_name}")
    }

    /// Open a fresh `{epoch millis}-{name}` file, moving to a later millisecond when a file
    /// with the same name was stored in the current one.
    async fn create_unique(&self, name: &str) -> Result<(String, PathBuf, fs::File), StorageError> {
        let mut last = None;
        for _ in 0..MAX_NAME_ATTEMPTS {
            let stored_name = format!("{}-{}", Utc::now().timestamp_millis(), name);
            let file_path = self.root.join(&stored_name);
            match fs::OpenOptions::new()
                .write(true)
                .create_new(true)
                .open(&file_path)
                .await
            {
                Ok(file) => return Ok((stored_name, file_path, file)),
                Err(e) if e.kind() == std::io::ErrorKind::AlreadyExists => {
                    tokio::time::sleep(Duration::from_millis(1)).await;
                    last = Some(stored_name);
                }
                Err(e) => return Err(e.into()),
            }
        }
        Err(StorageError::AlreadyExists(last.unwrap_or_default()))
    }

    /// Map a reference (`uploads/{name}` or a bare `{name}`) to a file directly under the root.
    fn resolve(&self, path: &str) -> Result<PathBuf, StorageError> {
        let name = path
            .strip_prefix(UPLOADS_PREFIX)
            .and_then(|rest| rest.strip_prefix('/'))
            .unwrap_or(path);
        let name = validate_flat_filename(name)
            .map_err(|e| StorageError::InvalidName(e.message().into()))?;
        Ok(self.root.join(name))
    }
}

#[async_trait]
impl BlobStore for FilesystemBlobStore {
    async fn put_stream(
        &self,
        original_name: &str,
        mut reader: BoxReader<'_>,
    ) -> Result<String, StorageError> {
        let name = sanitize_upload_name(original_name)
            .map_err(|e| StorageError::InvalidName(e.message().into()))?;

        // The root may have been removed since startup.
        self.ensure_root().await?;

        let (stored_name, file_path, mut file) = self.create_unique(name).await?;

        let written = async {
            let n = tokio::io::copy(&mut reader, &mut file).await?;
            file.flush().await?;
            Ok::<u64, std::io::Error>(n)
        }
        .await;

        match written {
            Ok(bytes) => {
                debug!(file = %stored_name, bytes, "Stored upload");
                Ok(Self::reference(&stored_name))
            }
            Err(e) => {
                drop(file);
                let _ = fs::remove_file(&file_path).await;
                Err(e.into())
            }
        }
    }

    async fn get_stream(&self, path: &str) -> Result<BoxReader<'static>, StorageError> {
        let file_path = self.resolve(path)?;
        match fs::File::open(&file_path).await {
            Ok(file) => Ok(Box::new(BufReader::new(file))),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                Err(StorageError::NotFound(path.to_string()))
            }
            Err(e) => Err(e.into()),
        }
    }

    async fn exists(&self, path: &str) -> Result<bool, StorageError> {
        let file_path = self.resolve(path)?;
        Ok(fs::try_exists(&file_path).await?)
    }

    async fn delete(&self, path: &str) -> Result<bool, StorageError> {
        let file_path = self.resolve(path)?;
        match fs::remove_file(&file_path).await {
            Ok(()) => Ok(true),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(false),
            Err(e) => Err(e.into()),
        }
    }

    async fn size(&self, path: &str) -> Result<u64, StorageError> {
        let file_path = self.resolve(path)?;
        match fs::metadata(&file_path).await {
            Ok(meta) if meta.is_file() => Ok(meta.len()),
            Ok(_) => Err(StorageError::NotFound(path.to_string())),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                Err(StorageError::NotFound(path.to_string()))
            }
            Err(e) => Err(e.into()),
        }
    }
}
