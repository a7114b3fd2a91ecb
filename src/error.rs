use std::path::PathBuf;
use thiserror::Error;

/// Failures writing settings or saved views to disk.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("no parent directory for {0:?}")]
    NoParent(PathBuf),
    #[error("failed to write {path:?}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to serialize: {0}")]
    Json(#[from] serde_json::Error),
}

impl StoreError {
    pub(crate) fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }
}

/// Atomic write: tmp file then rename, so a crash never leaves half a file.
pub(crate) fn write_atomic(path: &std::path::Path, contents: &str) -> Result<(), StoreError> {
    let parent = path
        .parent()
        .ok_or_else(|| StoreError::NoParent(path.to_path_buf()))?;
    std::fs::create_dir_all(parent).map_err(|e| StoreError::io(parent, e))?;

    let tmp_path = path.with_extension("tmp");
    std::fs::write(&tmp_path, contents).map_err(|e| StoreError::io(&tmp_path, e))?;
    std::fs::rename(&tmp_path, path).map_err(|e| StoreError::io(path, e))?;
    Ok(())
}
