// SPDX-License-Identifier: GPL-3.0-only

//! Permission capability
//!
//! Grants are resolved through a one-shot query per capability; the model
//! caches the answer for the process lifetime, so a denied prompt is
//! terminal for the session.

use futures::future::BoxFuture;
use std::path::PathBuf;
use tracing::debug;

/// Capabilities the application may need to ask for
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Capability {
    Camera,
    MediaLibrary,
}

impl Capability {
    pub fn label(&self) -> &'static str {
        match self {
            Capability::Camera => "camera",
            Capability::MediaLibrary => "media library",
        }
    }
}

/// One-shot grant/deny query per capability
pub trait PermissionBroker: Send + Sync {
    fn request(&self, capability: Capability) -> BoxFuture<'static, bool>;
}

/// Grants derived from the host environment
///
/// The camera needs no device access here (the synthetic sensor is always
/// available); the media library is granted when its directory can be
/// created.
pub struct HostPermissions {
    library_dir: PathBuf,
}

impl HostPermissions {
    pub fn new(library_dir: impl Into<PathBuf>) -> Self {
        Self {
            library_dir: library_dir.into(),
        }
    }
}

impl PermissionBroker for HostPermissions {
    fn request(&self, capability: Capability) -> BoxFuture<'static, bool> {
        match capability {
            Capability::Camera => Box::pin(std::future::ready(true)),
            Capability::MediaLibrary => {
                let dir = self.library_dir.clone();
                Box::pin(async move {
                    tokio::task::spawn_blocking(move || {
                        let granted = std::fs::create_dir_all(&dir).is_ok();
                        debug!(dir = %dir.display(), granted, "Media library permission resolved");
                        granted
                    })
                    .await
                    .unwrap_or(false)
                })
            }
        }
    }
}

/// Fixed grant table, for tests and headless runs
#[derive(Debug, Clone, Copy)]
pub struct StaticGrants {
    pub camera: bool,
    pub media_library: bool,
}

impl StaticGrants {
    pub fn allow_all() -> Self {
        Self {
            camera: true,
            media_library: true,
        }
    }
}

impl PermissionBroker for StaticGrants {
    fn request(&self, capability: Capability) -> BoxFuture<'static, bool> {
        let granted = match capability {
            Capability::Camera => self.camera,
            Capability::MediaLibrary => self.media_library,
        };
        Box::pin(std::future::ready(granted))
    }
}
