// SPDX-License-Identifier: GPL-3.0-only

//! Review screen and media library export handlers

use crate::app::runtime::Task;
use crate::app::state::{AppModel, Message, StatusNotice, WorkflowState};
use crate::backends::permissions::Capability;
use crate::errors::ExportError;
use crate::storage::PersistedPhoto;
use std::path::PathBuf;
use std::sync::Arc;
use tracing::{debug, error, info, warn};

impl AppModel {
    /// Refresh the review photo from the store (most recent entry wins)
    pub(crate) fn load_review_photo(&self) -> Task<Message> {
        let store = self.store.clone();
        Task::perform(
            async move { store.current_photo().await },
            Message::ReviewPhotoLoaded,
        )
    }

    pub(crate) fn handle_review_photo_loaded(
        &mut self,
        photo: Option<PersistedPhoto>,
    ) -> Task<Message> {
        if photo.is_none() {
            debug!("Photo store is empty");
        }
        self.review_photo = photo;
        Task::none()
    }

    /// Save button on the review screen.
    ///
    /// Requests the media library permission on first use; the cached
    /// answer is reused for the rest of the session.
    pub(crate) fn handle_save_to_library(&mut self) -> Task<Message> {
        if !self.workflow.is_preview() || self.export_in_flight {
            return Task::none();
        }
        if self.review_photo.is_none() {
            info!("Nothing to save, photo store is empty");
            self.status = Some(StatusNotice::info(ExportError::EmptyGallery.to_string()));
            return Task::none();
        }

        match self.permission(Capability::MediaLibrary) {
            Some(true) => self.begin_export(),
            Some(false) => {
                warn!("Export refused: media library permission denied");
                self.status = Some(StatusNotice::error(
                    ExportError::PermissionDenied.to_string(),
                ));
                Task::none()
            }
            None => {
                let broker = Arc::clone(&self.permission_broker);
                Task::perform(
                    async move { broker.request(Capability::MediaLibrary).await },
                    Message::MediaLibraryPermission,
                )
            }
        }
    }

    pub(crate) fn handle_media_library_permission(&mut self, granted: bool) -> Task<Message> {
        self.permissions.insert(Capability::MediaLibrary, granted);
        if granted {
            self.begin_export()
        } else {
            warn!("Media library permission denied");
            self.status = Some(StatusNotice::error(
                ExportError::PermissionDenied.to_string(),
            ));
            Task::none()
        }
    }

    /// Start the import task for the currently reviewed photo.
    ///
    /// Two permission prompts can resolve back to back when the save button
    /// is pressed twice before the first answer arrives; the in-flight flag
    /// collapses them into one export. A grant that arrives after the user
    /// already left the review screen starts nothing.
    fn begin_export(&mut self) -> Task<Message> {
        if self.export_in_flight || !self.workflow.is_preview() {
            return Task::none();
        }
        let Some(path) = self.review_photo.as_ref().map(|p| p.path.clone()) else {
            self.status = Some(StatusNotice::info(ExportError::EmptyGallery.to_string()));
            return Task::none();
        };
        self.export_in_flight = true;
        info!(path = %path.display(), "Exporting photo to media library");
        Task::perform(self.library.import(&path), Message::LibraryExportFinished)
    }

    /// Import finished: report the outcome and, on success, hand control
    /// back to the capture screen.
    pub(crate) fn handle_library_export_finished(
        &mut self,
        result: Result<PathBuf, ExportError>,
    ) -> Task<Message> {
        self.export_in_flight = false;
        match result {
            Ok(dest) => {
                info!(dest = %dest.display(), "Photo saved to media library");
                self.status = Some(StatusNotice::info(format!(
                    "Saved to {}",
                    dest.display()
                )));
                // The user may have discarded and resumed capturing while
                // the import ran; only the review screen hands control
                // back to Idle.
                if self.workflow.is_preview() {
                    self.workflow = WorkflowState::Idle;
                }
            }
            Err(err) => {
                // The failure reaches the user; the review screen stays up
                // so they can retry or discard.
                error!(error = %err, "Media library export failed");
                self.status = Some(StatusNotice::error(err.to_string()));
            }
        }
        Task::none()
    }

    /// Leave the review screen; the persisted photo is untouched
    pub(crate) fn handle_discard(&mut self) -> Task<Message> {
        if self.workflow.is_preview() {
            self.workflow = WorkflowState::Idle;
        }
        Task::none()
    }
}
