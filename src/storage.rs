// SPDX-License-Identifier: GPL-3.0-only

//! Single-slot photo store
//!
//! The application keeps at most one photo, at a fixed path inside an
//! app-private directory. Each capture overwrites the previous photo and
//! the review screen reads back the most recently modified entry.

use crate::constants::{PHOTO_FILE_NAME, PHOTOS_DIR_NAME};
use std::io;
use std::path::{Path, PathBuf};
use std::time::SystemTime;
use tracing::debug;

/// A photo currently persisted in the store
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PersistedPhoto {
    pub path: PathBuf,
    pub modified: SystemTime,
}

/// Handle to the app-private photo directory
#[derive(Debug, Clone)]
pub struct PhotoStore {
    root: PathBuf,
}

impl PhotoStore {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// Default app-private photo directory (`<data dir>/snapcam/photos`)
    pub fn default_root() -> PathBuf {
        dirs::data_local_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("snapcam")
            .join(PHOTOS_DIR_NAME)
    }

    pub fn at_default() -> Self {
        Self::new(Self::default_root())
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Fixed path of the single persisted photo
    pub fn photo_path(&self) -> PathBuf {
        self.root.join(PHOTO_FILE_NAME)
    }

    /// Create the photo directory; an already existing directory is fine
    pub fn ensure(&self) -> io::Result<()> {
        std::fs::create_dir_all(&self.root)
    }

    /// Move a freshly captured temporary file into the fixed slot,
    /// overwriting whatever was there before.
    pub async fn commit(&self, temp: PathBuf) -> io::Result<PathBuf> {
        let store = self.clone();
        tokio::task::spawn_blocking(move || {
            store.ensure()?;
            let dest = store.photo_path();
            if std::fs::rename(&temp, &dest).is_err() {
                // Rename cannot cross filesystems; fall back to copy + remove.
                std::fs::copy(&temp, &dest)?;
                std::fs::remove_file(&temp)?;
            }
            debug!(path = %dest.display(), "Capture committed");
            Ok(dest)
        })
        .await
        .map_err(io::Error::other)?
    }

    /// The most recently modified photo in the store, if any
    pub async fn current_photo(&self) -> Option<PersistedPhoto> {
        let root = self.root.clone();
        tokio::task::spawn_blocking(move || {
            let mut newest: Option<PersistedPhoto> = None;
            for entry in std::fs::read_dir(&root).ok()?.flatten() {
                let path = entry.path();
                let Some(ext) = path.extension() else { continue };
                let ext = ext.to_string_lossy();
                if !(ext.eq_ignore_ascii_case("jpg")
                    || ext.eq_ignore_ascii_case("jpeg")
                    || ext.eq_ignore_ascii_case("png"))
                {
                    continue;
                }
                let Ok(modified) = entry.metadata().and_then(|m| m.modified()) else {
                    continue;
                };
                if newest.as_ref().is_none_or(|n| modified > n.modified) {
                    newest = Some(PersistedPhoto { path, modified });
                }
            }
            newest
        })
        .await
        .ok()
        .flatten()
    }
}
