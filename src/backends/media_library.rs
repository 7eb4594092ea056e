// SPDX-License-Identifier: GPL-3.0-only

//! Media library capability
//!
//! The system-wide photo store, distinct from the app-private photo
//! directory. On the desktop this is the user's pictures directory.

use crate::errors::ExportError;
use futures::future::BoxFuture;
use std::path::{Path, PathBuf};
use tracing::info;

/// Import-one-file-from-path operation
pub trait MediaLibrary: Send + Sync {
    /// Copy `path` into the library; returns the destination path
    fn import(&self, path: &Path) -> BoxFuture<'static, Result<PathBuf, ExportError>>;
}

/// Media library rooted in the system pictures directory
pub struct PicturesLibrary {
    root: PathBuf,
}

impl PicturesLibrary {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// Default library directory (`~/Pictures/snapcam`)
    pub fn default_root() -> PathBuf {
        dirs::picture_dir()
            .or_else(|| dirs::home_dir().map(|home| home.join("Pictures")))
            .unwrap_or_else(|| PathBuf::from("."))
            .join("snapcam")
    }
}

impl MediaLibrary for PicturesLibrary {
    fn import(&self, path: &Path) -> BoxFuture<'static, Result<PathBuf, ExportError>> {
        let src = path.to_path_buf();
        let root = self.root.clone();
        Box::pin(async move {
            tokio::task::spawn_blocking(move || {
                std::fs::create_dir_all(&root)
                    .map_err(|e| ExportError::ImportFailed(e.to_string()))?;
                let ext = src
                    .extension()
                    .map(|e| e.to_string_lossy().into_owned())
                    .unwrap_or_else(|| "jpg".to_string());
                let timestamp = chrono::Local::now().format("%Y%m%d_%H%M%S");
                let dest = root.join(format!("IMG_{}.{}", timestamp, ext));
                std::fs::copy(&src, &dest).map_err(|e| ExportError::ImportFailed(e.to_string()))?;
                info!(dest = %dest.display(), "Photo imported into media library");
                Ok(dest)
            })
            .await
            .map_err(|e| ExportError::ImportFailed(e.to_string()))?
        })
    }
}
