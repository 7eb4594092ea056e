// SPDX-License-Identifier: GPL-3.0-only

//! Application-wide constants and cycling camera presets

use serde::{Deserialize, Serialize};

/// Name of the app-private directory holding the current photo
pub const PHOTOS_DIR_NAME: &str = "photos";

/// Fixed file name of the single persisted photo.
///
/// Every capture overwrites this file; the application retains at most one
/// photo at a time.
pub const PHOTO_FILE_NAME: &str = "Photo_1.jpg";

/// Default pause between showing the blackout cover and triggering the
/// sensor capture. Long enough for the cover to render, so the shutter UI
/// never ends up in the photo. Overridable via `AppConfig::settle_delay_ms`.
pub const DEFAULT_SETTLE_DELAY_MS: u64 = 500;

/// Bounded capacity of the preview frame channel
pub const FRAME_CHANNEL_CAPACITY: usize = 10;

/// Flash mode for photo capture
///
/// The shutter control cycles through a strict four-state ring:
/// off → on → auto → torch → off.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum FlashMode {
    /// Flash disabled
    #[default]
    Off,
    /// Flash fires on every capture
    On,
    /// Flash fires when the scene is dark
    Auto,
    /// Continuous light while active
    Torch,
}

impl FlashMode {
    /// All modes in ring order, starting at the default
    pub const ALL: [FlashMode; 4] = [
        FlashMode::Off,
        FlashMode::On,
        FlashMode::Auto,
        FlashMode::Torch,
    ];

    /// Advance one step along the ring
    pub fn next(self) -> Self {
        match self {
            FlashMode::Off => FlashMode::On,
            FlashMode::On => FlashMode::Auto,
            FlashMode::Auto => FlashMode::Torch,
            FlashMode::Torch => FlashMode::Off,
        }
    }

    /// Display name for the status bar
    pub fn label(&self) -> &'static str {
        match self {
            FlashMode::Off => "off",
            FlashMode::On => "on",
            FlashMode::Auto => "auto",
            FlashMode::Torch => "torch",
        }
    }
}

/// White balance preset, cycled through a six-state ring
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum WhiteBalance {
    #[default]
    Auto,
    Sunny,
    Cloudy,
    Shadow,
    Fluorescent,
    Incandescent,
}

impl WhiteBalance {
    /// All presets in ring order, starting at the default
    pub const ALL: [WhiteBalance; 6] = [
        WhiteBalance::Auto,
        WhiteBalance::Sunny,
        WhiteBalance::Cloudy,
        WhiteBalance::Shadow,
        WhiteBalance::Fluorescent,
        WhiteBalance::Incandescent,
    ];

    /// Advance one step along the ring
    pub fn next(self) -> Self {
        match self {
            WhiteBalance::Auto => WhiteBalance::Sunny,
            WhiteBalance::Sunny => WhiteBalance::Cloudy,
            WhiteBalance::Cloudy => WhiteBalance::Shadow,
            WhiteBalance::Shadow => WhiteBalance::Fluorescent,
            WhiteBalance::Fluorescent => WhiteBalance::Incandescent,
            WhiteBalance::Incandescent => WhiteBalance::Auto,
        }
    }

    /// Display name for the status bar
    pub fn label(&self) -> &'static str {
        match self {
            WhiteBalance::Auto => "auto",
            WhiteBalance::Sunny => "sunny",
            WhiteBalance::Cloudy => "cloudy",
            WhiteBalance::Shadow => "shadow",
            WhiteBalance::Fluorescent => "fluorescent",
            WhiteBalance::Incandescent => "incandescent",
        }
    }
}

/// Which sensor the preview and capture use
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Facing {
    /// Selfie camera (preview is mirrored)
    #[default]
    Front,
    /// Rear camera
    Back,
}

impl Facing {
    pub const ALL: [Facing; 2] = [Facing::Front, Facing::Back];

    /// Switch to the other sensor
    pub fn flip(self) -> Self {
        match self {
            Facing::Front => Facing::Back,
            Facing::Back => Facing::Front,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Facing::Front => "front",
            Facing::Back => "back",
        }
    }
}

/// Capture aspect ratio
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum AspectRatio {
    /// 16:9 widescreen (default)
    #[default]
    Wide16x9,
    /// 4:3 standard
    Standard4x3,
    /// 1:1 square
    Square1x1,
}

impl AspectRatio {
    pub const ALL: [AspectRatio; 3] = [
        AspectRatio::Wide16x9,
        AspectRatio::Standard4x3,
        AspectRatio::Square1x1,
    ];

    /// Advance one step along the ring
    pub fn next(self) -> Self {
        match self {
            AspectRatio::Wide16x9 => AspectRatio::Standard4x3,
            AspectRatio::Standard4x3 => AspectRatio::Square1x1,
            AspectRatio::Square1x1 => AspectRatio::Wide16x9,
        }
    }

    /// Display name for the status bar
    pub fn label(&self) -> &'static str {
        match self {
            AspectRatio::Wide16x9 => "16:9",
            AspectRatio::Standard4x3 => "4:3",
            AspectRatio::Square1x1 => "1:1",
        }
    }

    /// Frame resolution used by the built-in test-pattern camera
    pub fn preview_size(&self) -> (u32, u32) {
        match self {
            AspectRatio::Wide16x9 => (320, 180),
            AspectRatio::Standard4x3 => (320, 240),
            AspectRatio::Square1x1 => (240, 240),
        }
    }
}
