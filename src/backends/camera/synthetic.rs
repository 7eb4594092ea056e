// SPDX-License-Identifier: GPL-3.0-only

//! Synthetic test-pattern camera
//!
//! Stands in for sensor hardware: streams an animated gradient whose tint,
//! orientation and brightness follow the active configuration, and
//! "captures" by encoding the current pattern to a temporary JPEG.

use super::CameraBackend;
use super::types::CameraFrame;
use crate::app::CameraConfiguration;
use crate::constants::{Facing, FlashMode, WhiteBalance};
use crate::errors::CaptureError;
use futures::channel::mpsc;
use futures::future::BoxFuture;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;
use tracing::debug;

const FRAME_INTERVAL: Duration = Duration::from_millis(33);

pub struct SyntheticCamera {
    config: Arc<Mutex<CameraConfiguration>>,
    running: Arc<AtomicBool>,
    tick: Arc<AtomicU64>,
}

impl SyntheticCamera {
    pub fn new() -> Self {
        Self {
            config: Arc::new(Mutex::new(CameraConfiguration::default())),
            running: Arc::new(AtomicBool::new(false)),
            tick: Arc::new(AtomicU64::new(0)),
        }
    }

    fn snapshot(&self) -> CameraConfiguration {
        self.config
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .clone()
    }
}

impl Default for SyntheticCamera {
    fn default() -> Self {
        Self::new()
    }
}

impl CameraBackend for SyntheticCamera {
    fn name(&self) -> &'static str {
        "synthetic"
    }

    fn configure(&self, config: &CameraConfiguration) {
        let mut guard = self
            .config
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner());
        *guard = config.clone();
    }

    fn start_preview(&self, mut sender: mpsc::Sender<Arc<CameraFrame>>) -> Result<(), CaptureError> {
        if self.running.swap(true, Ordering::SeqCst) {
            return Err(CaptureError::CaptureFailed("preview already running".into()));
        }
        let config = Arc::clone(&self.config);
        let running = Arc::clone(&self.running);
        let tick = Arc::clone(&self.tick);

        std::thread::spawn(move || {
            debug!("Synthetic preview stream started");
            while running.load(Ordering::SeqCst) {
                let t = tick.fetch_add(1, Ordering::SeqCst);
                let snapshot = config
                    .lock()
                    .unwrap_or_else(|poisoned| poisoned.into_inner())
                    .clone();
                let frame = Arc::new(render_pattern(&snapshot, t));
                if sender.try_send(frame).is_err() && sender.is_closed() {
                    break;
                }
                std::thread::sleep(FRAME_INTERVAL);
            }
            running.store(false, Ordering::SeqCst);
            debug!("Synthetic preview stream stopped");
        });
        Ok(())
    }

    fn stop_preview(&self) {
        self.running.store(false, Ordering::SeqCst);
    }

    fn capture(&self) -> BoxFuture<'static, Result<PathBuf, CaptureError>> {
        let snapshot = self.snapshot();
        let tick = self.tick.load(Ordering::SeqCst);
        Box::pin(async move {
            tokio::task::spawn_blocking(move || {
                let frame = render_pattern(&snapshot, tick);
                let path =
                    std::env::temp_dir().join(format!("snapcam-{}.jpg", uuid::Uuid::new_v4()));
                encode_jpeg(frame, &path)?;
                debug!(path = %path.display(), "Synthetic capture written");
                Ok(path)
            })
            .await
            .map_err(|e| CaptureError::CaptureFailed(e.to_string()))?
        })
    }
}

/// Render one test-pattern frame for the given configuration
fn render_pattern(config: &CameraConfiguration, tick: u64) -> CameraFrame {
    let (width, height) = config.aspect_ratio.preview_size();
    let (tint_r, tint_g, tint_b) = white_balance_tint(config.white_balance);
    let boost = if config.flash == FlashMode::Torch {
        1.3
    } else {
        1.0
    };
    // Zoom tightens the gradient, so zooming is visible in the preview.
    let scale = 1.0 + config.zoom * 3.0;

    let mut data = Vec::with_capacity((width * height * 3) as usize);
    for y in 0..height {
        for x in 0..width {
            // The front sensor mirrors horizontally, selfie style.
            let px = if config.facing == Facing::Front {
                width - 1 - x
            } else {
                x
            };
            let base = ((px as f32 + y as f32) * scale + tick as f32).rem_euclid(256.0);
            let r = (base * tint_r * boost).clamp(0.0, 255.0) as u8;
            let g = ((255.0 - base) * tint_g * boost).clamp(0.0, 255.0) as u8;
            let b = ((px * 255 / width.max(1)) as f32 * tint_b * boost).clamp(0.0, 255.0) as u8;
            data.push(r);
            data.push(g);
            data.push(b);
        }
    }
    CameraFrame::rgb24(width, height, data)
}

/// RGB channel gains approximating each white balance preset
fn white_balance_tint(white_balance: WhiteBalance) -> (f32, f32, f32) {
    match white_balance {
        WhiteBalance::Auto => (1.0, 1.0, 1.0),
        WhiteBalance::Sunny => (1.1, 1.0, 0.9),
        WhiteBalance::Cloudy => (1.15, 1.0, 0.85),
        WhiteBalance::Shadow => (1.2, 1.0, 0.8),
        WhiteBalance::Fluorescent => (0.9, 1.0, 1.1),
        WhiteBalance::Incandescent => (1.25, 0.95, 0.75),
    }
}

fn encode_jpeg(frame: CameraFrame, path: &Path) -> Result<(), CaptureError> {
    let img: image::RgbImage = image::ImageBuffer::from_raw(frame.width, frame.height, frame.data)
        .ok_or_else(|| CaptureError::CaptureFailed("frame buffer size mismatch".into()))?;
    img.save(path)
        .map_err(|e| CaptureError::CaptureFailed(e.to_string()))
}
