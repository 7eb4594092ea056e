// SPDX-License-Identifier: GPL-3.0-only

//! Error types for the capture and export workflows

use crate::backends::permissions::Capability;
use std::fmt;

/// Result type alias using AppError
pub type AppResult<T> = Result<T, AppError>;

/// Main application error type
#[derive(Debug, Clone)]
pub enum AppError {
    /// A capability was refused by the permission broker
    Permission(Capability),
    /// Photo capture errors
    Capture(CaptureError),
    /// Media library export errors
    Export(ExportError),
    /// Storage/filesystem errors
    Storage(String),
    /// Configuration errors
    Config(String),
}

/// Photo capture errors
///
/// These ride inside messages, so they are cheap to clone.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CaptureError {
    /// No camera backend is attached
    NoCamera,
    /// The sensor failed to produce a frame
    CaptureFailed(String),
    /// Moving the captured file into the photo store failed
    SaveFailed(String),
}

/// Media library export errors
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ExportError {
    /// Media library permission was refused
    PermissionDenied,
    /// There is no photo to export
    EmptyGallery,
    /// Copying into the media library failed
    ImportFailed(String),
}

impl fmt::Display for AppError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AppError::Permission(capability) => {
                write!(f, "Permission denied: {}", capability.label())
            }
            AppError::Capture(e) => write!(f, "Capture error: {}", e),
            AppError::Export(e) => write!(f, "Export error: {}", e),
            AppError::Storage(msg) => write!(f, "Storage error: {}", msg),
            AppError::Config(msg) => write!(f, "Configuration error: {}", msg),
        }
    }
}

impl fmt::Display for CaptureError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CaptureError::NoCamera => write!(f, "No camera attached"),
            CaptureError::CaptureFailed(msg) => write!(f, "Capture failed: {}", msg),
            CaptureError::SaveFailed(msg) => write!(f, "Save failed: {}", msg),
        }
    }
}

impl fmt::Display for ExportError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ExportError::PermissionDenied => write!(f, "Media library permission denied"),
            ExportError::EmptyGallery => write!(f, "No photo to save"),
            ExportError::ImportFailed(msg) => write!(f, "Import failed: {}", msg),
        }
    }
}

impl std::error::Error for AppError {}
impl std::error::Error for CaptureError {}
impl std::error::Error for ExportError {}

// Conversions from sub-errors to AppError
impl From<CaptureError> for AppError {
    fn from(err: CaptureError) -> Self {
        AppError::Capture(err)
    }
}

impl From<ExportError> for AppError {
    fn from(err: ExportError) -> Self {
        AppError::Export(err)
    }
}

// Conversions for I/O errors
impl From<std::io::Error> for AppError {
    fn from(err: std::io::Error) -> Self {
        AppError::Storage(err.to_string())
    }
}

impl From<std::io::Error> for CaptureError {
    fn from(err: std::io::Error) -> Self {
        CaptureError::SaveFailed(err.to_string())
    }
}
