//! Cache storage backends

use crate::error::{InstallError, InstallResult};
use crate::fsutil::{move_dir_or_copy, remove_dir_if_exists};
use crate::source::fetch::extract_tarball;
use async_trait::async_trait;
use flate2::write::GzEncoder;
use flate2::Compression;
use sha2::{Digest, Sha256};
use std::fs::{self, File};
use std::path::{Path, PathBuf};
use tracing::debug;

/// Keyed storage for lists of directories
#[async_trait]
pub trait CacheStore: Send + Sync {
    /// Restore `paths` from the entry stored under `key`.
    /// Returns the key that was restored, or `None` on a miss.
    async fn restore(&self, paths: &[PathBuf], key: &str) -> InstallResult<Option<String>>;

    /// Store `paths` under `key`. Existing entries are never overwritten.
    async fn save(&self, paths: &[PathBuf], key: &str) -> InstallResult<()>;
}

/// Cache blobs kept as gzip tarballs in a local directory
///
/// Each blob holds one top-level entry per cached path, named by the
/// path's index in the list.
pub struct LocalCacheStore {
    dir: PathBuf,
}

impl LocalCacheStore {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    /// Blob location for `key` (first 16 bytes of its SHA-256)
    pub fn blob_path(&self, key: &str) -> PathBuf {
        let digest = Sha256::digest(key.as_bytes());
        self.dir
            .join(format!("{}.tar.gz", hex::encode(&digest[..16])))
    }
}

#[async_trait]
impl CacheStore for LocalCacheStore {
    async fn restore(&self, paths: &[PathBuf], key: &str) -> InstallResult<Option<String>> {
        let blob = self.blob_path(key);
        if !blob.exists() {
            debug!("No cache blob at {}", blob.display());
            return Ok(None);
        }

        let staging = self
            .dir
            .join(format!(".restore-{}", uuid::Uuid::new_v4()));
        let paths = paths.to_vec();
        tokio::task::spawn_blocking(move || {
            let result = unpack_blob(&blob, &staging, &paths);
            let _ = remove_dir_if_exists(&staging);
            result
        })
        .await
        .map_err(|e| InstallError::Internal(format!("cache restore task failed: {}", e)))??;

        Ok(Some(key.to_string()))
    }

    async fn save(&self, paths: &[PathBuf], key: &str) -> InstallResult<()> {
        let blob = self.blob_path(key);
        if blob.exists() {
            return Err(InstallError::Cache(format!(
                "Unable to reserve cache with key {}, another job may be creating this cache",
                key
            )));
        }

        fs::create_dir_all(&self.dir)
            .map_err(|e| InstallError::io(format!("creating {}", self.dir.display()), e))?;
        let partial = self.dir.join(format!(".{}.partial", uuid::Uuid::new_v4()));
        let paths = paths.to_vec();
        tokio::task::spawn_blocking(move || {
            let result = pack_blob(&partial, &paths).and_then(|()| {
                fs::rename(&partial, &blob)
                    .map_err(|e| InstallError::io(format!("writing {}", blob.display()), e))
            });
            if result.is_err() {
                let _ = fs::remove_file(&partial);
            }
            result
        })
        .await
        .map_err(|e| InstallError::Internal(format!("cache save task failed: {}", e)))?
    }
}

fn pack_blob(dest: &Path, paths: &[PathBuf]) -> InstallResult<()> {
    let file =
        File::create(dest).map_err(|e| InstallError::io(format!("creating {}", dest.display()), e))?;
    let mut builder = tar::Builder::new(GzEncoder::new(file, Compression::default()));
    builder.follow_symlinks(false);

    for (index, path) in paths.iter().enumerate() {
        if !path.is_dir() {
            return Err(InstallError::Cache(format!(
                "Path {} does not exist, nothing to cache",
                path.display()
            )));
        }
        builder
            .append_dir_all(index.to_string(), path)
            .map_err(|e| InstallError::io(format!("archiving {}", path.display()), e))?;
    }

    builder
        .into_inner()
        .and_then(|encoder| encoder.finish())
        .map_err(|e| InstallError::io(format!("finishing {}", dest.display()), e))?;
    Ok(())
}

fn unpack_blob(blob: &Path, staging: &Path, paths: &[PathBuf]) -> InstallResult<()> {
    extract_tarball(blob, staging)?;
    for (index, path) in paths.iter().enumerate() {
        let src = staging.join(index.to_string());
        if src.is_dir() {
            move_dir_or_copy(&src, path)?;
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn build_tree(root: &Path) {
        fs::create_dir_all(root.join("build/lib")).unwrap();
        fs::write(root.join("CMakeLists.txt"), "project(SFML)").unwrap();
        fs::write(root.join("build/lib/libsfml-system.so"), "elf").unwrap();
    }

    #[tokio::test]
    async fn save_then_restore() {
        let temp = TempDir::new().unwrap();
        let store = LocalCacheStore::new(temp.path().join("cache"));
        let tree = temp.path().join("sfml-2.6.1-Release");
        build_tree(&tree);

        store.save(&[tree.clone()], "key-1").await.unwrap();
        fs::remove_dir_all(&tree).unwrap();

        let restored = store.restore(&[tree.clone()], "key-1").await.unwrap();
        assert_eq!(restored.as_deref(), Some("key-1"));
        assert_eq!(
            fs::read_to_string(tree.join("CMakeLists.txt")).unwrap(),
            "project(SFML)"
        );
        assert!(tree.join("build/lib/libsfml-system.so").exists());
    }

    #[tokio::test]
    async fn restore_miss_returns_none() {
        let temp = TempDir::new().unwrap();
        let store = LocalCacheStore::new(temp.path());
        let restored = store
            .restore(&[temp.path().join("tree")], "missing")
            .await
            .unwrap();
        assert!(restored.is_none());
        assert!(!temp.path().join("tree").exists());
    }

    #[tokio::test]
    async fn save_refuses_existing_key() {
        let temp = TempDir::new().unwrap();
        let store = LocalCacheStore::new(temp.path().join("cache"));
        let tree = temp.path().join("tree");
        build_tree(&tree);

        store.save(&[tree.clone()], "key").await.unwrap();
        let err = store.save(&[tree], "key").await.unwrap_err();
        assert!(matches!(err, InstallError::Cache(_)));
    }

    #[tokio::test]
    async fn save_missing_path_leaves_no_blob() {
        let temp = TempDir::new().unwrap();
        let store = LocalCacheStore::new(temp.path().join("cache"));

        let err = store
            .save(&[temp.path().join("absent")], "key")
            .await
            .unwrap_err();
        assert!(matches!(err, InstallError::Cache(_)));
        assert!(!store.blob_path("key").exists());
        assert_eq!(fs::read_dir(temp.path().join("cache")).unwrap().count(), 0);
    }

    #[test]
    fn blob_path_is_stable_per_key() {
        let store = LocalCacheStore::new("/cache");
        assert_eq!(store.blob_path("a"), store.blob_path("a"));
        assert_ne!(store.blob_path("a"), store.blob_path("b"));
        assert!(store
            .blob_path("a")
            .to_string_lossy()
            .ends_with(".tar.gz"));
    }
}
