// SPDX-License-Identifier: GPL-3.0-only

//! Integration tests for camera settings and their cycling rings

use snapcam::app::{AppModel, CameraConfiguration, Message};
use snapcam::backends::camera::{CameraBackend, SyntheticCamera};
use snapcam::backends::haptics::NullHaptics;
use snapcam::backends::media_library::PicturesLibrary;
use snapcam::backends::permissions::StaticGrants;
use snapcam::config::AppConfig;
use snapcam::constants::{AspectRatio, Facing, FlashMode, WhiteBalance};
use snapcam::storage::PhotoStore;
use std::sync::Arc;

fn test_model() -> AppModel {
    let root = std::env::temp_dir().join(format!("snapcam-settings-{}", uuid::Uuid::new_v4()));
    AppModel::new(
        AppConfig::default(),
        PhotoStore::new(root.join("photos")),
        Some(Arc::new(SyntheticCamera::new()) as Arc<dyn CameraBackend>),
        Arc::new(PicturesLibrary::new(root.join("library"))),
        Arc::new(StaticGrants::allow_all()),
        Arc::new(NullHaptics),
    )
}

#[test]
fn test_default_configuration() {
    let config = CameraConfiguration::default();

    assert_eq!(config.flash, FlashMode::Off);
    assert_eq!(config.white_balance, WhiteBalance::Auto);
    assert_eq!(config.facing, Facing::Front, "Selfie camera is the default");
    assert_eq!(config.aspect_ratio, AspectRatio::Wide16x9);
    assert_eq!(config.zoom, 0.0);
    assert!(config.auto_focus);
}

#[test]
fn test_flash_ring_order() {
    // off -> on -> auto -> torch -> off
    assert_eq!(FlashMode::ALL.len(), 4);
    let mut mode = FlashMode::default();
    for expected in FlashMode::ALL {
        assert_eq!(mode, expected);
        mode = mode.next();
    }
    assert_eq!(mode, FlashMode::Off, "Ring closes back at off");
}

#[test]
fn test_flash_cycle_is_modular() {
    // n presses from the default land on ALL[n % 4]
    let mut mode = FlashMode::default();
    for n in 0..12 {
        assert_eq!(mode, FlashMode::ALL[n % 4]);
        mode = mode.next();
    }
}

#[test]
fn test_toggle_flash_touches_only_flash() {
    let mut model = test_model();
    let before = model.camera_config.clone();

    let _ = model.update(Message::ToggleFlash);

    assert_eq!(model.camera_config.flash, FlashMode::On);
    let mut expected = before;
    expected.flash = FlashMode::On;
    assert_eq!(
        model.camera_config, expected,
        "Only the flash field may change"
    );
}

#[test]
fn test_white_balance_ring_closes() {
    assert_eq!(WhiteBalance::ALL.len(), 6);
    let mut wb = WhiteBalance::default();
    for _ in 0..WhiteBalance::ALL.len() {
        wb = wb.next();
    }
    assert_eq!(wb, WhiteBalance::Auto);
}

#[test]
fn test_facing_flip_is_involutive() {
    for facing in Facing::ALL {
        assert_eq!(facing.flip().flip(), facing);
    }
    assert_eq!(Facing::Front.flip(), Facing::Back);
}

#[test]
fn test_aspect_ratio_ring_and_sizes() {
    let mut ratio = AspectRatio::default();
    for _ in 0..AspectRatio::ALL.len() {
        let (w, h) = ratio.preview_size();
        assert!(w > 0 && h > 0);
        ratio = ratio.next();
    }
    assert_eq!(ratio, AspectRatio::Wide16x9, "Ring closes back at 16:9");

    let (w, h) = AspectRatio::Wide16x9.preview_size();
    assert_eq!(w * 9, h * 16);
    let (w, h) = AspectRatio::Square1x1.preview_size();
    assert_eq!(w, h);
}

#[test]
fn test_zoom_is_clamped() {
    let mut model = test_model();

    let _ = model.update(Message::SetZoom(2.5));
    assert_eq!(model.camera_config.zoom, 1.0);

    let _ = model.update(Message::SetZoom(-0.5));
    assert_eq!(model.camera_config.zoom, 0.0);
}

#[test]
fn test_settings_survive_a_full_cycle() {
    let mut model = test_model();

    let _ = model.update(Message::CycleWhiteBalance);
    let _ = model.update(Message::SwitchFacing);
    let _ = model.update(Message::CycleAspectRatio);
    let _ = model.update(Message::ToggleAutoFocus);

    assert_eq!(model.camera_config.white_balance, WhiteBalance::Sunny);
    assert_eq!(model.camera_config.facing, Facing::Back);
    assert_eq!(model.camera_config.aspect_ratio, AspectRatio::Standard4x3);
    assert!(!model.camera_config.auto_focus);
}

#[test]
fn test_labels_are_non_empty() {
    for mode in FlashMode::ALL {
        assert!(!mode.label().is_empty(), "Mode {:?} has empty label", mode);
    }
    for wb in WhiteBalance::ALL {
        assert!(!wb.label().is_empty(), "Preset {:?} has empty label", wb);
    }
    for ratio in AspectRatio::ALL {
        assert!(!ratio.label().is_empty(), "Ratio {:?} has empty label", ratio);
    }
}
