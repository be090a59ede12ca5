//! File-backed key-value store: one JSON file per key under a data directory.

use std::path::{Path, PathBuf};

use async_trait::async_trait;

use super::{KeyValueStore, StorageError};

/// Persists each key as `<dir>/<encoded-key>.json`.
///
/// Keys are percent-encoded so guest keys containing `@` or `/` stay
/// filesystem-safe. Writes replace the whole file (last-write-wins).
#[derive(Debug, Clone)]
pub struct FileStore {
    dir: PathBuf,
}

impl FileStore {
    /// Create a store rooted at `dir`, creating the directory if needed.
    ///
    /// # Errors
    ///
    /// Returns an error if the directory cannot be created.
    pub fn new(dir: impl AsRef<Path>) -> Result<Self, StorageError> {
        let dir = dir.as_ref().to_path_buf();
        std::fs::create_dir_all(&dir)?;
        Ok(Self { dir })
    }

    fn path_for(&self, key: &str) -> PathBuf {
        let encoded = urlencoding::encode(key);
        self.dir.join(format!("{encoded}.json"))
    }
}

#[async_trait]
impl KeyValueStore for FileStore {
    async fn get_raw(&self, key: &str) -> Result<Option<String>, StorageError> {
        match tokio::fs::read_to_string(self.path_for(key)).await {
            Ok(raw) => Ok(Some(raw)),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(StorageError::Io(e)),
        }
    }

    async fn put_raw(&self, key: &str, value: String) -> Result<(), StorageError> {
        tokio::fs::write(self.path_for(key), value).await?;
        Ok(())
    }

    async fn remove(&self, key: &str) -> Result<(), StorageError> {
        match tokio::fs::remove_file(self.path_for(key)).await {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(StorageError::Io(e)),
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_roundtrip_on_disk() {
        let dir = tempfile::tempdir().unwrap();
        let store = FileStore::new(dir.path()).unwrap();

        store.put_raw("cart_7", "{}".to_string()).await.unwrap();
        assert_eq!(
            store.get_raw("cart_7").await.unwrap(),
            Some("{}".to_string())
        );

        store.remove("cart_7").await.unwrap();
        assert_eq!(store.get_raw("cart_7").await.unwrap(), None);
    }

    #[tokio::test]
    async fn test_guest_email_key_is_filesystem_safe() {
        let dir = tempfile::tempdir().unwrap();
        let store = FileStore::new(dir.path()).unwrap();

        let key = "cart_guest@example.com";
        store.put_raw(key, "[]".to_string()).await.unwrap();
        assert_eq!(store.get_raw(key).await.unwrap(), Some("[]".to_string()));
    }

    #[tokio::test]
    async fn test_missing_key_reads_none() {
        let dir = tempfile::tempdir().unwrap();
        let store = FileStore::new(dir.path()).unwrap();
        assert_eq!(store.get_raw("nope").await.unwrap(), None);
        store.remove("nope").await.unwrap();
    }
}
