// SPDX-License-Identifier: GPL-3.0-only

//! snapcam - a camera capture and review workflow
//!
//! The library drives a small capture-and-review loop: a live preview with
//! quick camera controls, a shutter flow that blacks out the screen while
//! the sensor captures, a single-slot photo store, and a review screen that
//! can export the photo into the user's media library.
//!
//! # Architecture
//!
//! The crate is organized into several modules:
//!
//! - [`app`]: Application model, messages, handlers and the event loop
//! - [`backends`]: Camera, permission, media library and haptics backends
//! - [`config`]: User configuration handling
//! - [`storage`]: App-private photo store
//! - [`terminal`]: Terminal front-end rendered with half-block characters
pub mod app;
pub mod backends;
pub mod config;
pub mod constants;
pub mod errors;
pub mod storage;
pub mod terminal;

// Re-export commonly used types
pub use app::{
    AppModel, CameraConfiguration, Message, Runtime, StatusKind, StatusNotice, Task, WorkflowState,
};
pub use config::AppConfig;
pub use errors::{AppError, AppResult, CaptureError, ExportError};
pub use storage::{PersistedPhoto, PhotoStore};
