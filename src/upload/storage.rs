use displaydoc::Display;
use futures_util::future::BoxFuture;
use log::*;
use std::io;
use std::path::{Component, Path, PathBuf};
use thiserror::Error;

/// Error from an object store
#[derive(Debug, Error, Display)]
pub enum StorageError {
    /// Could not store object {key}: {source}
    Io { key: String, source: io::Error },
    /// Invalid object key {0:?}
    InvalidKey(String),
}

/// Somewhere uploaded files can be put and later fetched by URL
pub trait ObjectStorage: Send + Sync {
    /// Store an object, returning its public URL
    fn put<'a>(
        &'a self,
        key: &'a str,
        content_type: &'a str,
        body: Vec<u8>,
    ) -> BoxFuture<'a, Result<String, StorageError>>;
}

/// Object storage in a local directory, served under `public_url`
#[derive(Debug, Clone)]
pub struct FolderStorage {
    root: PathBuf,
    public_url: String,
}

impl FolderStorage {
    pub fn new<P: Into<PathBuf>, S: Into<String>>(root: P, public_url: S) -> Self {
        Self {
            root: root.into(),
            public_url: public_url.into().trim_end_matches('/').to_owned(),
        }
    }

    /// Map a key to a file below the root; keys that could escape it are rejected
    pub fn resolve(&self, key: &str) -> Option<PathBuf> {
        if key.is_empty() || key.contains('\\') {
            return None;
        }
        let rel = Path::new(key);
        let plain = rel.components().all(|c| matches!(c, Component::Normal(_)));
        if plain {
            Some(self.root.join(rel))
        } else {
            None
        }
    }
}

impl ObjectStorage for FolderStorage {
    fn put<'a>(
        &'a self,
        key: &'a str,
        content_type: &'a str,
        body: Vec<u8>,
    ) -> BoxFuture<'a, Result<String, StorageError>> {
        Box::pin(async move {
            let path = self
                .resolve(key)
                .ok_or_else(|| StorageError::InvalidKey(key.to_owned()))?;
            let io_err = |source| StorageError::Io {
                key: key.to_owned(),
                source,
            };
            if let Some(dir) = path.parent() {
                tokio::fs::create_dir_all(dir).await.map_err(io_err)?;
            }
            tokio::fs::write(&path, body).await.map_err(io_err)?;
            debug!("Stored {} ({}) at {:?}", key, content_type, path);
            Ok(format!("{}/{}", self.public_url, key))
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_resolve_rejects_traversal() {
        let storage = FolderStorage::new("/srv/uploads", "/uploads");
        assert_eq!(
            storage.resolve("blogs/a.png"),
            Some(PathBuf::from("/srv/uploads/blogs/a.png"))
        );
        assert_eq!(storage.resolve("../etc/passwd"), None);
        assert_eq!(storage.resolve("/etc/passwd"), None);
        assert!(storage.resolve("blogs/./a.png").is_some());
        assert_eq!(storage.resolve("blogs\\a.png"), None);
        assert_eq!(storage.resolve(""), None);
    }

    #[tokio::test]
    async fn test_put_writes_file() {
        let dir = tempfile::tempdir().unwrap();
        let storage = FolderStorage::new(dir.path(), "https://cdn.example.com/");
        let url = storage
            .put("blogs/1-abc-still.png", "image/png", vec![1, 2, 3])
            .await
            .unwrap();
        assert_eq!(url, "https://cdn.example.com/blogs/1-abc-still.png");
        let stored = std::fs::read(dir.path().join("blogs/1-abc-still.png")).unwrap();
        assert_eq!(stored, vec![1, 2, 3]);
    }
}
