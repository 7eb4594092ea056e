// SPDX-License-Identifier: GPL-3.0-only

//! Message update handling
//!
//! The main `update()` function acts as a dispatcher, routing each message
//! to a focused handler method. Handlers live in the `handlers` submodules
//! organized by functional domain:
//!
//! - `handlers::capture`: shutter flow, blackout, flash, preview toggle
//! - `handlers::camera`: sensor configuration and preview frames
//! - `handlers::review`: review screen loading, export, discard

use crate::app::runtime::Task;
use crate::app::state::{AppModel, Message};
use tracing::warn;

impl AppModel {
    /// Main message handler - routes messages to appropriate handler methods
    pub fn update(&mut self, message: Message) -> Task<Message> {
        match message {
            // ===== Capture workflow =====
            Message::Shutter => self.handle_shutter(),
            Message::BlackoutSettled => self.handle_blackout_settled(),
            Message::PhotoSaved(result) => self.handle_photo_saved(result),
            Message::ToggleFlash => self.handle_toggle_flash(),
            Message::TogglePreview => self.handle_toggle_preview(),

            // ===== Camera configuration =====
            Message::CycleWhiteBalance => self.handle_cycle_white_balance(),
            Message::ToggleAutoFocus => self.handle_toggle_auto_focus(),
            Message::SetZoom(level) => self.handle_set_zoom(level),
            Message::SetFocusDepth(depth) => self.handle_set_focus_depth(depth),
            Message::SwitchFacing => self.handle_switch_facing(),
            Message::CycleAspectRatio => self.handle_cycle_aspect_ratio(),
            Message::CameraFrame(frame) => self.handle_camera_frame(frame),

            // ===== Review & export =====
            Message::ReviewPhotoLoaded(photo) => self.handle_review_photo_loaded(photo),
            Message::SaveToLibrary => self.handle_save_to_library(),
            Message::MediaLibraryPermission(granted) => {
                self.handle_media_library_permission(granted)
            }
            Message::LibraryExportFinished(result) => self.handle_library_export_finished(result),
            Message::Discard => self.handle_discard(),

            // ===== System =====
            Message::PermissionsResolved { camera } => self.handle_permissions_resolved(camera),
            Message::UpdateConfig(config) => {
                if let Err(err) = config.save() {
                    warn!(error = %err, "Failed to persist configuration");
                }
                self.config = config;
                Task::none()
            }
            Message::ClearStatus => {
                self.status = None;
                Task::none()
            }
        }
    }
}
