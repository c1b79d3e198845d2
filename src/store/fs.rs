//! File Store Module
//!
//! Directory-backed store: one file per key at `<root>/<key>.<extension>`.

use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicU64, Ordering};

use async_trait::async_trait;
use bytes::Bytes;
use tokio::io::AsyncWriteExt;
use tracing::{debug, info};

use super::{PersistentStore, StoreError};

/// Default folder name for the store root.
pub const DEFAULT_FOLDER_NAME: &str = "downloaded_images";

/// Default file extension for stored values.
pub const DEFAULT_EXTENSION: &str = "bin";

/// Per-process sequence for temp file names.
static TEMP_SEQ: AtomicU64 = AtomicU64::new(0);

// == File Store ==
/// Stores raw bytes as individual files in a single directory.
#[derive(Debug, Clone)]
pub struct FileStore {
    root: PathBuf,
    extension: String,
}

impl FileStore {
    // == Constructor ==
    /// Opens a store rooted at `root`, creating the directory if needed.
    ///
    /// # Arguments
    /// * `root` - Directory holding one file per key
    /// * `extension` - File extension appended to each key (without the dot)
    pub async fn open(
        root: impl Into<PathBuf>,
        extension: impl Into<String>,
    ) -> Result<Self, StoreError> {
        let root = root.into();
        let extension = extension.into();

        if tokio::fs::metadata(&root).await.is_err() {
            tokio::fs::create_dir_all(&root).await?;
            info!(path = %root.display(), "created store directory");
        }

        Ok(Self { root, extension })
    }

    /// Opens a store with the default extension.
    pub async fn open_default(root: impl Into<PathBuf>) -> Result<Self, StoreError> {
        Self::open(root, DEFAULT_EXTENSION).await
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    // == Path For Key ==
    /// Maps a key to its file path.
    ///
    /// Keys that could escape the root directory are rejected. Dots inside
    /// a key are fine; only a whole `.` or `..` component is refused.
    pub fn path_for(&self, key: &str) -> Result<PathBuf, StoreError> {
        if key.is_empty()
            || key.contains('/')
            || key.contains('\\')
            || key.contains('\0')
            || key == "."
            || key == ".."
        {
            return Err(StoreError::InvalidKey(key.to_string()));
        }

        if self.extension.is_empty() {
            Ok(self.root.join(key))
        } else {
            Ok(self.root.join(format!("{}.{}", key, self.extension)))
        }
    }

    /// Unique hidden sibling for one write to `path`.
    fn temp_path_for(&self, path: &Path) -> PathBuf {
        let name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_default();
        let seq = TEMP_SEQ.fetch_add(1, Ordering::Relaxed);
        self.root.join(format!(".{}.{}.{}.tmp", name, std::process::id(), seq))
    }
}

/// Writes `value` to a freshly created file at `temp`.
async fn write_new_file(temp: &Path, value: &[u8]) -> std::io::Result<()> {
    let mut file = tokio::fs::OpenOptions::new()
        .write(true)
        .create_new(true)
        .open(temp)
        .await?;
    file.write_all(value).await?;
    file.sync_all().await?;
    Ok(())
}

#[async_trait]
impl PersistentStore<Bytes> for FileStore {
    async fn read(&self, key: &str) -> Result<Option<Bytes>, StoreError> {
        let path = self.path_for(key)?;

        match tokio::fs::read(&path).await {
            Ok(data) => {
                debug!(key, bytes = data.len(), "read value from store");
                Ok(Some(Bytes::from(data)))
            }
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
            Err(e) => Err(StoreError::Io(e)),
        }
    }

    async fn write(&self, key: &str, value: &Bytes) -> Result<(), StoreError> {
        let path = self.path_for(key)?;

        // Each write fills its own temp file, then renames over the target
        let temp = self.temp_path_for(&path);
        let result = match write_new_file(&temp, value).await {
            Ok(()) => tokio::fs::rename(&temp, &path).await,
            Err(e) => Err(e),
        };
        if let Err(e) = result {
            let _ = tokio::fs::remove_file(&temp).await;
            return Err(StoreError::Io(e));
        }

        debug!(key, bytes = value.len(), "wrote value to store");
        Ok(())
    }
}
