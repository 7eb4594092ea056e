// SPDX-License-Identifier: GPL-3.0-only

//! Integration tests for the capture and review workflow

use futures::channel::mpsc;
use futures::future::BoxFuture;
use snapcam::app::{AppModel, CameraConfiguration, Message, Runtime, StatusKind};
use snapcam::backends::camera::{CameraBackend, CameraFrame};
use snapcam::backends::haptics::NullHaptics;
use snapcam::backends::media_library::MediaLibrary;
use snapcam::backends::permissions::{Capability, StaticGrants};
use snapcam::config::AppConfig;
use snapcam::errors::{CaptureError, ExportError};
use snapcam::storage::PhotoStore;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicBool, AtomicU64, AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

/// Camera double that writes numbered marker files instead of JPEGs
struct ScriptedCamera {
    captures: AtomicUsize,
    fail_next: AtomicBool,
}

impl ScriptedCamera {
    fn new() -> Self {
        Self {
            captures: AtomicUsize::new(0),
            fail_next: AtomicBool::new(false),
        }
    }

    fn capture_count(&self) -> usize {
        self.captures.load(Ordering::SeqCst)
    }
}

impl CameraBackend for ScriptedCamera {
    fn name(&self) -> &'static str {
        "scripted"
    }

    fn configure(&self, _config: &CameraConfiguration) {}

    fn start_preview(&self, _sender: mpsc::Sender<Arc<CameraFrame>>) -> Result<(), CaptureError> {
        Ok(())
    }

    fn stop_preview(&self) {}

    fn capture(&self) -> BoxFuture<'static, Result<PathBuf, CaptureError>> {
        if self.fail_next.swap(false, Ordering::SeqCst) {
            return Box::pin(std::future::ready(Err(CaptureError::CaptureFailed(
                "sensor fault".into(),
            ))));
        }
        let n = self.captures.fetch_add(1, Ordering::SeqCst) + 1;
        Box::pin(async move {
            let path = std::env::temp_dir().join(format!("scripted-{}.jpg", uuid::Uuid::new_v4()));
            std::fs::write(&path, format!("frame-{}", n))
                .map_err(|e| CaptureError::CaptureFailed(e.to_string()))?;
            Ok(path)
        })
    }
}

/// Media library double that records imports without touching the disk
struct RecordingLibrary {
    root: PathBuf,
    imports: Mutex<Vec<PathBuf>>,
    fail: AtomicBool,
    delay_ms: AtomicU64,
}

impl RecordingLibrary {
    fn new(root: PathBuf) -> Self {
        Self {
            root,
            imports: Mutex::new(Vec::new()),
            fail: AtomicBool::new(false),
            delay_ms: AtomicU64::new(0),
        }
    }

    fn import_count(&self) -> usize {
        self.imports.lock().unwrap().len()
    }
}

impl MediaLibrary for RecordingLibrary {
    fn import(&self, path: &Path) -> BoxFuture<'static, Result<PathBuf, ExportError>> {
        if self.fail.load(Ordering::SeqCst) {
            return Box::pin(std::future::ready(Err(ExportError::ImportFailed(
                "disk full".into(),
            ))));
        }
        let dest = self.root.join(path.file_name().unwrap_or_default());
        self.imports.lock().unwrap().push(path.to_path_buf());
        let delay = self.delay_ms.load(Ordering::SeqCst);
        Box::pin(async move {
            if delay > 0 {
                tokio::time::sleep(Duration::from_millis(delay)).await;
            }
            Ok(dest)
        })
    }
}

struct Harness {
    runtime: Runtime,
    camera: Arc<ScriptedCamera>,
    library: Arc<RecordingLibrary>,
    store: PhotoStore,
}

impl Harness {
    /// Build a runtime with a zero settle delay and resolve permissions
    async fn start(grants: StaticGrants) -> Self {
        Self::start_with(grants, 0).await
    }

    async fn start_with(grants: StaticGrants, settle_delay_ms: u64) -> Self {
        let root = std::env::temp_dir().join(format!("snapcam-wf-{}", uuid::Uuid::new_v4()));
        let store = PhotoStore::new(root.join("photos"));
        let camera = Arc::new(ScriptedCamera::new());
        let library = Arc::new(RecordingLibrary::new(root.join("library")));

        let config = AppConfig {
            settle_delay_ms,
            haptics_enabled: false,
            library_dir: None,
        };
        let model = AppModel::new(
            config,
            store.clone(),
            Some(camera.clone() as Arc<dyn CameraBackend>),
            library.clone(),
            Arc::new(grants),
            Arc::new(NullHaptics),
        );
        let mut runtime = Runtime::new(model);
        runtime.run_until_idle().await;

        Self {
            runtime,
            camera,
            library,
            store,
        }
    }

    async fn dispatch(&mut self, message: Message) {
        self.runtime.dispatch(message);
        self.runtime.run_until_idle().await;
    }

    fn model(&self) -> &AppModel {
        self.runtime.model()
    }
}

#[tokio::test]
async fn test_capture_flow_lands_in_review() {
    let mut h = Harness::start(StaticGrants::allow_all()).await;
    assert!(h.model().workflow.is_idle());

    h.dispatch(Message::Shutter).await;

    assert!(h.model().workflow.is_preview(), "Capture ends on the review screen");
    assert_eq!(h.camera.capture_count(), 1);
    let photo = h.model().review_photo.as_ref().expect("photo loaded for review");
    assert_eq!(photo.path, h.store.photo_path());
    assert_eq!(std::fs::read_to_string(&photo.path).unwrap(), "frame-1");
}

#[tokio::test]
async fn test_second_capture_overwrites_first() {
    let mut h = Harness::start(StaticGrants::allow_all()).await;

    h.dispatch(Message::Shutter).await;
    h.dispatch(Message::Discard).await;
    assert!(h.model().workflow.is_idle());

    h.dispatch(Message::Shutter).await;

    let photo_path = h.store.photo_path();
    assert_eq!(std::fs::read_to_string(&photo_path).unwrap(), "frame-2");
    let entries = std::fs::read_dir(h.store.root()).unwrap().count();
    assert_eq!(entries, 1, "Only one photo is ever retained");
}

#[tokio::test]
async fn test_shutter_ignored_outside_idle() {
    let mut h = Harness::start(StaticGrants::allow_all()).await;

    // A second press lands while the first is still in blackout
    h.runtime.dispatch(Message::Shutter);
    h.runtime.dispatch(Message::Shutter);
    h.runtime.run_until_idle().await;

    assert_eq!(h.camera.capture_count(), 1, "Double press captures once");
    assert!(h.model().workflow.is_preview());

    // And a press on the review screen does nothing
    h.dispatch(Message::Shutter).await;
    assert_eq!(h.camera.capture_count(), 1);
}

#[tokio::test]
async fn test_discard_keeps_photo_and_settings() {
    let mut h = Harness::start(StaticGrants::allow_all()).await;

    h.dispatch(Message::ToggleFlash).await;
    h.dispatch(Message::CycleWhiteBalance).await;
    let settings = h.model().camera_config.clone();

    h.dispatch(Message::Shutter).await;
    h.dispatch(Message::Discard).await;

    assert!(h.model().workflow.is_idle());
    assert_eq!(
        h.model().camera_config,
        settings,
        "Capture and discard leave the settings untouched"
    );
    assert!(
        h.store.photo_path().exists(),
        "Discard leaves the persisted photo in place"
    );
}

#[tokio::test]
async fn test_save_exports_and_returns_to_idle() {
    let mut h = Harness::start(StaticGrants::allow_all()).await;

    h.dispatch(Message::Shutter).await;
    h.dispatch(Message::SaveToLibrary).await;

    assert_eq!(h.library.import_count(), 1);
    assert_eq!(
        h.library.imports.lock().unwrap()[0],
        h.store.photo_path(),
        "The persisted photo is what gets exported"
    );
    assert!(h.model().workflow.is_idle(), "Save hands control back to capture");
    let status = h.model().status.as_ref().expect("save reports its outcome");
    assert_eq!(status.kind, StatusKind::Info);
}

#[tokio::test]
async fn test_save_requests_permission_lazily_and_respects_denial() {
    let mut h = Harness::start(StaticGrants {
        camera: true,
        media_library: false,
    })
    .await;

    h.dispatch(Message::Shutter).await;
    h.dispatch(Message::SaveToLibrary).await;

    assert_eq!(h.library.import_count(), 0, "Denied permission blocks the export");
    assert!(h.model().workflow.is_preview(), "Denial leaves the review screen up");
    let status = h.model().status.as_ref().expect("denial is reported");
    assert_eq!(status.kind, StatusKind::Error);

    // The denial is cached; a retry fails the same way without a new prompt
    h.dispatch(Message::SaveToLibrary).await;
    assert_eq!(h.library.import_count(), 0);
}

#[tokio::test]
async fn test_save_with_empty_store() {
    let mut h = Harness::start(StaticGrants::allow_all()).await;

    h.dispatch(Message::TogglePreview).await;
    assert!(h.model().workflow.is_preview());
    assert!(h.model().review_photo.is_none());

    h.dispatch(Message::SaveToLibrary).await;

    assert_eq!(h.library.import_count(), 0);
    let status = h.model().status.as_ref().expect("empty store is reported");
    assert_eq!(status.kind, StatusKind::Info);
    assert_eq!(status.text, "No photo to save");
}

#[tokio::test]
async fn test_double_save_exports_once() {
    let mut h = Harness::start(StaticGrants::allow_all()).await;
    h.dispatch(Message::Shutter).await;

    h.runtime.dispatch(Message::SaveToLibrary);
    h.runtime.dispatch(Message::SaveToLibrary);
    h.runtime.run_until_idle().await;

    assert_eq!(h.library.import_count(), 1, "Double press exports once");
}

#[tokio::test]
async fn test_capture_failure_recovers_to_idle() {
    let mut h = Harness::start(StaticGrants::allow_all()).await;
    h.camera.fail_next.store(true, Ordering::SeqCst);

    h.dispatch(Message::Shutter).await;

    assert!(h.model().workflow.is_idle(), "A failed capture returns to live preview");
    assert!(h.model().review_photo.is_none());
    let status = h.model().status.as_ref().expect("failure is reported");
    assert_eq!(status.kind, StatusKind::Error);

    // The workflow is not wedged: the next capture succeeds
    h.dispatch(Message::Shutter).await;
    assert!(h.model().workflow.is_preview());
    assert_eq!(h.camera.capture_count(), 1);
}

#[tokio::test]
async fn test_export_failure_stays_in_review() {
    let mut h = Harness::start(StaticGrants::allow_all()).await;
    h.dispatch(Message::Shutter).await;

    h.library.fail.store(true, Ordering::SeqCst);
    h.dispatch(Message::SaveToLibrary).await;

    assert!(h.model().workflow.is_preview(), "A failed export keeps the review screen");
    let status = h.model().status.as_ref().expect("failure is reported");
    assert_eq!(status.kind, StatusKind::Error);

    // Retry after the condition clears
    h.library.fail.store(false, Ordering::SeqCst);
    h.dispatch(Message::SaveToLibrary).await;
    assert_eq!(h.library.import_count(), 1);
    assert!(h.model().workflow.is_idle());
}

#[tokio::test]
async fn test_camera_permission_denied_blocks_capture() {
    let mut h = Harness::start(StaticGrants {
        camera: false,
        media_library: true,
    })
    .await;

    assert!(!h.model().camera_allowed());
    let status = h.model().status.as_ref().expect("denial is reported at startup");
    assert_eq!(status.kind, StatusKind::Error);

    h.dispatch(Message::Shutter).await;
    assert_eq!(h.camera.capture_count(), 0);
    assert!(h.model().workflow.is_idle());
}

#[tokio::test]
async fn test_slow_export_completion_does_not_cancel_next_capture() {
    // The import outlives the review screen: save, then discard and press
    // the shutter again while the copy is still running. Its completion
    // must not pull the new capture out of blackout.
    let mut h = Harness::start_with(StaticGrants::allow_all(), 200).await;
    h.runtime
        .model_mut()
        .permissions
        .insert(Capability::MediaLibrary, true);

    h.dispatch(Message::Shutter).await;
    assert!(h.model().workflow.is_preview());

    h.library.delay_ms.store(80, Ordering::SeqCst);
    h.runtime.dispatch(Message::SaveToLibrary);
    h.runtime.dispatch(Message::Discard);
    h.runtime.dispatch(Message::Shutter);
    h.runtime.run_until_idle().await;

    assert_eq!(
        h.camera.capture_count(),
        2,
        "The accepted second shutter press must still capture"
    );
    assert!(h.model().workflow.is_preview());
    assert_eq!(h.library.import_count(), 1);
}

#[tokio::test]
async fn test_late_permission_grant_after_discard_starts_no_export() {
    let mut h = Harness::start(StaticGrants::allow_all()).await;
    h.dispatch(Message::Shutter).await;

    // Discard before the permission prompt resolves
    h.runtime.dispatch(Message::SaveToLibrary);
    h.runtime.dispatch(Message::Discard);
    h.runtime.run_until_idle().await;

    assert_eq!(
        h.library.import_count(),
        0,
        "A grant arriving after discard starts nothing"
    );
    assert!(h.model().workflow.is_idle());
}

#[tokio::test]
async fn test_update_config_takes_effect() {
    let mut h = Harness::start(StaticGrants::allow_all()).await;

    let mut config = h.model().config.clone();
    config.haptics_enabled = !config.haptics_enabled;
    config.settle_delay_ms = 125;

    h.dispatch(Message::UpdateConfig(config.clone())).await;

    assert_eq!(h.model().config, config);
}

#[tokio::test]
async fn test_preview_toggle_skips_blackout() {
    let mut h = Harness::start(StaticGrants::allow_all()).await;

    h.dispatch(Message::TogglePreview).await;
    assert!(h.model().workflow.is_preview());
    h.dispatch(Message::TogglePreview).await;
    assert!(h.model().workflow.is_idle());

    // Blackout ignores the toggle entirely
    h.runtime.dispatch(Message::Shutter);
    h.runtime.dispatch(Message::TogglePreview);
    h.runtime.run_until_idle().await;
    assert!(h.model().workflow.is_preview(), "The in-flight capture still completes");
    assert_eq!(h.camera.capture_count(), 1);
}
