// SPDX-License-Identifier: GPL-3.0-only

//! Application state management

use crate::app::runtime::Task;
use crate::backends::camera::{CameraBackend, CameraFrame};
use crate::backends::haptics::Haptics;
use crate::backends::media_library::MediaLibrary;
use crate::backends::permissions::{Capability, PermissionBroker};
use crate::config::AppConfig;
use crate::constants::{AspectRatio, Facing, FlashMode, WhiteBalance};
use crate::errors::{CaptureError, ExportError};
use crate::storage::{PersistedPhoto, PhotoStore};
use std::collections::HashMap;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Instant;

/// Capture workflow state machine
///
/// | State    | Entry action         | Valid exits                         |
/// |----------|----------------------|-------------------------------------|
/// | Idle     | show live preview    | Blackout (shutter)                  |
/// | Blackout | show opaque cover    | Preview (saved) or Idle (failure)   |
/// | Preview  | render review screen | Idle (discard or save completes)    |
///
/// The shutter is only accepted from Idle, which is what keeps a second
/// press from racing an in-flight capture.
#[derive(Debug, Default)]
pub enum WorkflowState {
    /// Live camera preview visible
    #[default]
    Idle,
    /// Opaque cover shown while the sensor captures and the file is written
    Blackout {
        /// When the cover went up
        since: Instant,
    },
    /// Review screen visible
    Preview,
}

impl WorkflowState {
    pub fn is_idle(&self) -> bool {
        matches!(self, WorkflowState::Idle)
    }

    pub fn is_blackout(&self) -> bool {
        matches!(self, WorkflowState::Blackout { .. })
    }

    pub fn is_preview(&self) -> bool {
        matches!(self, WorkflowState::Preview)
    }

    /// Enter blackout, stamping the transition time
    pub fn begin_blackout() -> Self {
        WorkflowState::Blackout {
            since: Instant::now(),
        }
    }
}

/// Sensor configuration snapshot
///
/// Owned by the model, mutated only through messages, and never persisted:
/// a fresh session starts from defaults.
#[derive(Debug, Clone, PartialEq)]
pub struct CameraConfiguration {
    pub flash: FlashMode,
    /// Zoom level in `[0, 1]`
    pub zoom: f32,
    pub auto_focus: bool,
    /// Manual focus depth in `[0, 1]`, used when autofocus is off
    pub focus_depth: f32,
    pub facing: Facing,
    pub white_balance: WhiteBalance,
    pub aspect_ratio: AspectRatio,
}

impl Default for CameraConfiguration {
    fn default() -> Self {
        Self {
            flash: FlashMode::Off,
            zoom: 0.0,
            auto_focus: true,
            focus_depth: 0.0,
            facing: Facing::Front,
            white_balance: WhiteBalance::Auto,
            aspect_ratio: AspectRatio::Wide16x9,
        }
    }
}

/// Severity of a user-visible status notice
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatusKind {
    Info,
    Error,
}

/// A short notice shown in the status bar until dismissed
#[derive(Debug, Clone)]
pub struct StatusNotice {
    pub kind: StatusKind,
    pub text: String,
}

impl StatusNotice {
    pub fn info(text: impl Into<String>) -> Self {
        Self {
            kind: StatusKind::Info,
            text: text.into(),
        }
    }

    pub fn error(text: impl Into<String>) -> Self {
        Self {
            kind: StatusKind::Error,
            text: text.into(),
        }
    }
}

/// The application model stores all state used to drive the capture and
/// review workflow.
pub struct AppModel {
    /// Configuration data that persists between application runs
    pub config: AppConfig,
    /// Current sensor configuration
    pub camera_config: CameraConfiguration,
    /// Capture workflow state
    pub workflow: WorkflowState,
    /// Permission grants resolved so far, cached for the process lifetime
    pub permissions: HashMap<Capability, bool>,
    /// Latest preview frame
    pub current_frame: Option<Arc<CameraFrame>>,
    /// Photo shown on the review screen, if any
    pub review_photo: Option<PersistedPhoto>,
    /// User-visible status notice
    pub status: Option<StatusNotice>,
    /// App-private photo store
    pub store: PhotoStore,
    /// Attached camera backend
    pub camera: Option<Arc<dyn CameraBackend>>,
    /// Media library export target
    pub library: Arc<dyn MediaLibrary>,
    /// Permission broker
    pub permission_broker: Arc<dyn PermissionBroker>,
    /// Haptic feedback
    pub haptics: Arc<dyn Haptics>,
    /// An export task is running; guards double save presses
    pub(crate) export_in_flight: bool,
}

impl AppModel {
    pub fn new(
        config: AppConfig,
        store: PhotoStore,
        camera: Option<Arc<dyn CameraBackend>>,
        library: Arc<dyn MediaLibrary>,
        permission_broker: Arc<dyn PermissionBroker>,
        haptics: Arc<dyn Haptics>,
    ) -> Self {
        Self {
            config,
            camera_config: CameraConfiguration::default(),
            workflow: WorkflowState::Idle,
            permissions: HashMap::new(),
            current_frame: None,
            review_photo: None,
            status: None,
            store,
            camera,
            library,
            permission_broker,
            haptics,
            export_in_flight: false,
        }
    }

    /// Startup task: resolve the camera permission once.
    ///
    /// The media library permission is requested lazily, on the first save.
    pub fn init(&self) -> Task<Message> {
        let broker = Arc::clone(&self.permission_broker);
        Task::perform(
            async move { broker.request(Capability::Camera).await },
            |granted| Message::PermissionsResolved { camera: granted },
        )
    }

    /// Cached grant for a capability, `None` while unresolved
    pub fn permission(&self, capability: Capability) -> Option<bool> {
        self.permissions.get(&capability).copied()
    }

    pub fn camera_allowed(&self) -> bool {
        self.permission(Capability::Camera) == Some(true)
    }

    /// Push the configuration snapshot down to the attached camera
    pub fn sync_camera_config(&self) {
        if let Some(camera) = &self.camera {
            camera.configure(&self.camera_config);
        }
    }
}

/// Messages emitted by the front-end and by completed tasks.
///
/// Messages are organized into logical groups:
/// - **Capture workflow**: shutter flow and blackout transitions
/// - **Camera configuration**: local mutations of the sensor settings
/// - **Review & export**: review screen, media library export, discard
/// - **System**: permissions, configuration, status bar
#[derive(Debug, Clone)]
pub enum Message {
    // ===== Capture workflow =====
    /// Shutter pressed
    Shutter,
    /// The blackout cover has had time to render; trigger the capture
    BlackoutSettled,
    /// Capture-and-persist finished with the committed path
    PhotoSaved(Result<PathBuf, CaptureError>),
    /// Advance the flash mode one step along its ring
    ToggleFlash,
    /// Flip between live preview and review without capturing
    TogglePreview,

    // ===== Camera configuration =====
    /// Advance the white balance one step along its ring
    CycleWhiteBalance,
    /// Toggle autofocus on/off
    ToggleAutoFocus,
    /// Set the zoom level (clamped to `[0, 1]`)
    SetZoom(f32),
    /// Set the manual focus depth (clamped to `[0, 1]`)
    SetFocusDepth(f32),
    /// Switch between the front and back sensor
    SwitchFacing,
    /// Advance the aspect ratio one step along its ring
    CycleAspectRatio,
    /// New preview frame from the camera backend
    CameraFrame(Arc<CameraFrame>),

    // ===== Review & export =====
    /// The store scan finished; update the review screen
    ReviewPhotoLoaded(Option<PersistedPhoto>),
    /// Save button on the review screen
    SaveToLibrary,
    /// Media library permission resolved (requested on first save)
    MediaLibraryPermission(bool),
    /// Media library import finished
    LibraryExportFinished(Result<PathBuf, ExportError>),
    /// Leave the review screen without touching the photo
    Discard,

    // ===== System =====
    /// Camera permission resolved at startup
    PermissionsResolved { camera: bool },
    /// Configuration updated
    UpdateConfig(AppConfig),
    /// Dismiss the status notice
    ClearStatus,
}
