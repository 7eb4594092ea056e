// SPDX-License-Identifier: GPL-3.0-only

//! Camera backend abstraction
//!
//! The workflow talks to the sensor exclusively through [`CameraBackend`]:
//! a preview stream delivered over a bounded channel, plus a one-shot
//! `capture` primitive that hands back a temporary file. The built-in
//! [`SyntheticCamera`] renders a test pattern; a hardware backend slots in
//! behind the same trait.

pub mod synthetic;
pub mod types;

pub use synthetic::SyntheticCamera;
pub use types::{CameraFrame, PixelFormat};

use crate::app::CameraConfiguration;
use crate::errors::CaptureError;
use futures::channel::mpsc;
use futures::future::BoxFuture;
use std::path::PathBuf;
use std::sync::Arc;

/// Common camera backend interface
pub trait CameraBackend: Send + Sync {
    /// Backend name for logs and the status bar
    fn name(&self) -> &'static str;

    /// Push the current configuration snapshot down to the sensor.
    ///
    /// Called after every configuration mutation; must be cheap.
    fn configure(&self, config: &CameraConfiguration);

    /// Start streaming preview frames into `sender`.
    ///
    /// Frames are dropped rather than buffered when the receiver lags;
    /// dropping the receiver stops the stream.
    fn start_preview(&self, sender: mpsc::Sender<Arc<CameraFrame>>) -> Result<(), CaptureError>;

    /// Stop the preview stream
    fn stop_preview(&self);

    /// Capture a single photo with the current settings.
    ///
    /// Writes the encoded image to a temporary file and returns its path;
    /// the caller owns moving it into permanent storage.
    fn capture(&self) -> BoxFuture<'static, Result<PathBuf, CaptureError>>;
}
