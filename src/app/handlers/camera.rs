// SPDX-License-Identifier: GPL-3.0-only

//! Camera configuration and preview frame handlers
//!
//! Every mutation is immediate and purely local to the configuration
//! snapshot; the new snapshot is pushed down to the backend afterwards.

use crate::app::runtime::Task;
use crate::app::state::{AppModel, Message, StatusNotice};
use crate::backends::camera::CameraFrame;
use crate::backends::permissions::Capability;
use std::sync::Arc;
use tracing::{debug, info, warn};

impl AppModel {
    pub(crate) fn handle_cycle_white_balance(&mut self) -> Task<Message> {
        self.camera_config.white_balance = self.camera_config.white_balance.next();
        info!(
            white_balance = self.camera_config.white_balance.label(),
            "White balance cycled"
        );
        self.sync_camera_config();
        Task::none()
    }

    pub(crate) fn handle_toggle_auto_focus(&mut self) -> Task<Message> {
        self.camera_config.auto_focus = !self.camera_config.auto_focus;
        info!(
            auto_focus = self.camera_config.auto_focus,
            "Autofocus toggled"
        );
        self.sync_camera_config();
        Task::none()
    }

    pub(crate) fn handle_set_zoom(&mut self, level: f32) -> Task<Message> {
        let level = level.clamp(0.0, 1.0);
        if (level - self.camera_config.zoom).abs() > f32::EPSILON {
            self.camera_config.zoom = level;
            debug!(zoom = level, "Zoom changed");
            self.sync_camera_config();
        }
        Task::none()
    }

    pub(crate) fn handle_set_focus_depth(&mut self, depth: f32) -> Task<Message> {
        let depth = depth.clamp(0.0, 1.0);
        if (depth - self.camera_config.focus_depth).abs() > f32::EPSILON {
            self.camera_config.focus_depth = depth;
            debug!(focus_depth = depth, "Focus depth changed");
            self.sync_camera_config();
        }
        Task::none()
    }

    pub(crate) fn handle_switch_facing(&mut self) -> Task<Message> {
        self.camera_config.facing = self.camera_config.facing.flip();
        info!(facing = self.camera_config.facing.label(), "Camera switched");
        self.sync_camera_config();
        Task::none()
    }

    pub(crate) fn handle_cycle_aspect_ratio(&mut self) -> Task<Message> {
        self.camera_config.aspect_ratio = self.camera_config.aspect_ratio.next();
        info!(
            aspect_ratio = self.camera_config.aspect_ratio.label(),
            "Aspect ratio cycled"
        );
        self.sync_camera_config();
        Task::none()
    }

    /// New preview frame from the backend
    pub(crate) fn handle_camera_frame(&mut self, frame: Arc<CameraFrame>) -> Task<Message> {
        self.current_frame = Some(frame);
        Task::none()
    }

    /// Camera permission resolved at startup.
    ///
    /// A denial is cached and never re-queried: the capture screen renders
    /// its fallback message for the rest of the session.
    pub(crate) fn handle_permissions_resolved(&mut self, camera: bool) -> Task<Message> {
        self.permissions.insert(Capability::Camera, camera);
        if camera {
            info!("Camera permission granted");
            self.sync_camera_config();
        } else {
            warn!("Camera permission denied");
            self.status = Some(StatusNotice::error(
                "Camera permissions not granted - cannot open camera preview",
            ));
        }
        Task::none()
    }
}
