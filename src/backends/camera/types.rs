// SPDX-License-Identifier: GPL-3.0-only

//! Frame types shared between camera backends and the front-end

use std::time::Instant;

/// Pixel layout of a frame buffer
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PixelFormat {
    /// 24-bit RGB, 3 bytes per pixel
    RGB24,
    /// 32-bit RGBA, 4 bytes per pixel
    RGBA,
    /// 8-bit grayscale, single channel
    Gray8,
}

impl PixelFormat {
    pub fn bytes_per_pixel(&self) -> u32 {
        match self {
            PixelFormat::RGB24 => 3,
            PixelFormat::RGBA => 4,
            PixelFormat::Gray8 => 1,
        }
    }
}

/// A single preview or capture frame
#[derive(Debug, Clone)]
pub struct CameraFrame {
    pub width: u32,
    pub height: u32,
    pub data: Vec<u8>,
    pub format: PixelFormat,
    /// Bytes per row (may include padding)
    pub stride: u32,
    /// When the frame left the sensor (for latency diagnostics)
    pub captured_at: Instant,
}

impl CameraFrame {
    /// Build a tightly packed RGB24 frame
    pub fn rgb24(width: u32, height: u32, data: Vec<u8>) -> Self {
        Self {
            width,
            height,
            data,
            format: PixelFormat::RGB24,
            stride: width * 3,
            captured_at: Instant::now(),
        }
    }

    /// Sample a pixel as RGB, clamping out-of-range coordinates to the edge
    pub fn sample_rgb(&self, x: u32, y: u32) -> (u8, u8, u8) {
        let x = x.min(self.width.saturating_sub(1));
        let y = y.min(self.height.saturating_sub(1));
        let data = &self.data;

        match self.format {
            PixelFormat::RGB24 => {
                let idx = (y * self.stride + x * 3) as usize;
                if idx + 2 < data.len() {
                    (data[idx], data[idx + 1], data[idx + 2])
                } else {
                    (0, 0, 0)
                }
            }
            PixelFormat::RGBA => {
                let idx = (y * self.stride + x * 4) as usize;
                if idx + 2 < data.len() {
                    (data[idx], data[idx + 1], data[idx + 2])
                } else {
                    (0, 0, 0)
                }
            }
            PixelFormat::Gray8 => {
                let idx = (y * self.stride + x) as usize;
                if idx < data.len() {
                    let v = data[idx];
                    (v, v, v)
                } else {
                    (0, 0, 0)
                }
            }
        }
    }
}
