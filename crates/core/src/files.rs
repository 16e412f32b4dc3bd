//! Directory-backed cover image store.

use std::io;
use std::path::PathBuf;

use async_trait::async_trait;
use uuid::Uuid;

use crate::error::CoreError;
use crate::naming::check_flat_file_name;
use crate::store::FileStore;

/// Stores cover images as flat files in one directory.
///
/// Writes go to a hidden temporary sibling first and are renamed into
/// place, so a reader never sees a half-written image.
#[derive(Debug, Clone)]
pub struct LocalFileStore {
    root: PathBuf,
}

impl LocalFileStore {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// Create the image directory if it does not exist yet.
    pub async fn ensure_root(&self) -> Result<(), CoreError> {
        tokio::fs::create_dir_all(&self.root).await?;
        Ok(())
    }

    fn path_for(&self, name: &str) -> Result<PathBuf, CoreError> {
        check_flat_file_name(name)?;
        Ok(self.root.join(name))
    }
}

#[async_trait]
impl FileStore for LocalFileStore {
    async fn exists(&self, name: &str) -> Result<bool, CoreError> {
        let path = self.path_for(name)?;
        Ok(tokio::fs::try_exists(&path).await?)
    }

    async fn delete(&self, name: &str) -> Result<(), CoreError> {
        let path = self.path_for(name)?;
        match tokio::fs::remove_file(&path).await {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(e.into()),
        }
    }

    async fn move_into(&self, name: &str, contents: &[u8]) -> Result<(), CoreError> {
        let path = self.path_for(name)?;
        tokio::fs::create_dir_all(&self.root).await?;

        let tmp = self.root.join(format!(".{name}.{}.part", Uuid::new_v4()));
        tokio::fs::write(&tmp, contents).await?;
        if let Err(e) = tokio::fs::rename(&tmp, &path).await {
            let _ = tokio::fs::remove_file(&tmp).await;
            return Err(e.into());
        }

        tracing::debug!(file = %path.display(), bytes = contents.len(), "Stored cover image");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use assert_matches::assert_matches;

    use super::*;

    #[tokio::test]
    async fn move_into_then_exists_then_delete() {
        let dir = tempfile::tempdir().unwrap();
        let store = LocalFileStore::new(dir.path());

        store.move_into("a.png", b"png-bytes").await.unwrap();
        assert!(store.exists("a.png").await.unwrap());
        assert_eq!(std::fs::read(dir.path().join("a.png")).unwrap(), b"png-bytes");

        store.delete("a.png").await.unwrap();
        assert!(!store.exists("a.png").await.unwrap());
    }

    #[tokio::test]
    async fn move_into_creates_missing_directory() {
        let dir = tempfile::tempdir().unwrap();
        let store = LocalFileStore::new(dir.path().join("public").join("images"));

        store.move_into("b.jpg", b"jpg").await.unwrap();
        assert!(dir.path().join("public/images/b.jpg").exists());
    }

    #[tokio::test]
    async fn move_into_leaves_no_temporary_files() {
        let dir = tempfile::tempdir().unwrap();
        let store = LocalFileStore::new(dir.path());

        store.move_into("c.gif", b"gif").await.unwrap();
        let names: Vec<_> = std::fs::read_dir(dir.path())
            .unwrap()
            .map(|e| e.unwrap().file_name().into_string().unwrap())
            .collect();
        assert_eq!(names, vec!["c.gif".to_string()]);
    }

    #[tokio::test]
    async fn delete_missing_file_is_ok() {
        let dir = tempfile::tempdir().unwrap();
        let store = LocalFileStore::new(dir.path());
        assert!(store.delete("nope.png").await.is_ok());
    }

    #[tokio::test]
    async fn rejects_path_traversal() {
        let dir = tempfile::tempdir().unwrap();
        let store = LocalFileStore::new(dir.path());

        let err = store.move_into("../escape.png", b"x").await.unwrap_err();
        assert_matches!(err, CoreError::Io(e) if e.kind() == io::ErrorKind::InvalidInput);
        assert_matches!(store.exists("a/b.png").await, Err(CoreError::Io(_)));
    }
}
