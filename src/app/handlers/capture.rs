// SPDX-License-Identifier: GPL-3.0-only

//! Capture workflow handlers
//!
//! Owns the shutter flow: blackout, settle delay, sensor capture, commit
//! into the photo store, and the transitions back out of blackout.

use crate::app::runtime::Task;
use crate::app::state::{AppModel, Message, StatusNotice, WorkflowState};
use crate::errors::CaptureError;
use std::path::PathBuf;
use std::sync::Arc;
use tracing::{error, info, warn};

impl AppModel {
    /// Send `message` after the given number of milliseconds
    pub(crate) fn delay_task(millis: u64, message: Message) -> Task<Message> {
        Task::perform(
            async move {
                tokio::time::sleep(tokio::time::Duration::from_millis(millis)).await;
                message
            },
            |message| message,
        )
    }

    /// Shutter pressed.
    ///
    /// Accepted only from Idle with a camera attached and allowed; a press
    /// during blackout or preview is dropped, so at most one capture is in
    /// flight at a time.
    pub(crate) fn handle_shutter(&mut self) -> Task<Message> {
        if !self.workflow.is_idle() {
            warn!(state = ?self.workflow, "Shutter ignored: not in live preview");
            return Task::none();
        }
        if !self.camera_allowed() {
            warn!("Shutter ignored: camera permission not granted");
            return Task::none();
        }
        if self.camera.is_none() {
            error!("Shutter ignored: no camera attached");
            self.status = Some(StatusNotice::error(CaptureError::NoCamera.to_string()));
            return Task::none();
        }

        // Cover the preview before anything touches the sensor, so the
        // shutter UI cannot end up in the photo.
        self.workflow = WorkflowState::begin_blackout();
        info!(
            settle_ms = self.config.settle_delay_ms,
            "Shutter pressed, blackout up"
        );
        if self.config.settle_delay_ms == 0 {
            return Task::done(Message::BlackoutSettled);
        }
        Self::delay_task(self.config.settle_delay_ms, Message::BlackoutSettled)
    }

    /// The blackout cover has had time to render; capture and persist.
    pub(crate) fn handle_blackout_settled(&mut self) -> Task<Message> {
        if !self.workflow.is_blackout() {
            // The settle timer outlived the blackout (a failure already
            // reverted to Idle); nothing left to capture.
            return Task::none();
        }
        let Some(camera) = self.camera.as_ref().map(Arc::clone) else {
            self.workflow = WorkflowState::Idle;
            self.status = Some(StatusNotice::error(CaptureError::NoCamera.to_string()));
            return Task::none();
        };

        let store = self.store.clone();
        info!(backend = camera.name(), "Capturing photo...");
        Task::perform(
            async move {
                let temp = camera.capture().await?;
                store
                    .commit(temp)
                    .await
                    .map_err(|e| CaptureError::SaveFailed(e.to_string()))
            },
            Message::PhotoSaved,
        )
    }

    /// Capture finished: enter the review screen, or recover to Idle
    pub(crate) fn handle_photo_saved(
        &mut self,
        result: Result<PathBuf, CaptureError>,
    ) -> Task<Message> {
        match result {
            Ok(path) => {
                info!(path = %path.display(), "Photo saved");
                if self.config.haptics_enabled {
                    self.haptics.pulse();
                }
                self.workflow = WorkflowState::Preview;
                self.load_review_photo()
            }
            Err(err) => {
                error!(error = %err, "Capture failed, returning to live preview");
                self.workflow = WorkflowState::Idle;
                self.status = Some(StatusNotice::error(err.to_string()));
                Task::none()
            }
        }
    }

    /// Advance the flash mode one step along the off→on→auto→torch ring.
    ///
    /// Touches nothing but the flash field.
    pub(crate) fn handle_toggle_flash(&mut self) -> Task<Message> {
        self.camera_config.flash = self.camera_config.flash.next();
        info!(flash = self.camera_config.flash.label(), "Flash mode cycled");
        self.sync_camera_config();
        Task::none()
    }

    /// Flip between live preview and the review screen without capturing
    pub(crate) fn handle_toggle_preview(&mut self) -> Task<Message> {
        match self.workflow {
            WorkflowState::Idle => {
                self.workflow = WorkflowState::Preview;
                self.load_review_photo()
            }
            WorkflowState::Preview => {
                self.workflow = WorkflowState::Idle;
                Task::none()
            }
            WorkflowState::Blackout { .. } => Task::none(),
        }
    }
}
