// SPDX-License-Identifier: GPL-3.0-only

//! Integration tests for the single-slot photo store

use snapcam::storage::PhotoStore;
use std::fs::{self, File};
use std::path::PathBuf;
use std::time::{Duration, SystemTime};

fn temp_store() -> (PhotoStore, PathBuf) {
    let root = std::env::temp_dir().join(format!("snapcam-store-{}", uuid::Uuid::new_v4()));
    (PhotoStore::new(&root), root)
}

fn write_temp_capture(contents: &str) -> PathBuf {
    let path = std::env::temp_dir().join(format!("snapcam-cap-{}.jpg", uuid::Uuid::new_v4()));
    fs::write(&path, contents).expect("temp capture should be writable");
    path
}

#[tokio::test]
async fn test_commit_creates_directory_and_fixed_slot() {
    let (store, root) = temp_store();
    assert!(!root.exists());

    let temp = write_temp_capture("first");
    let dest = store.commit(temp.clone()).await.expect("commit should succeed");

    assert_eq!(dest, store.photo_path());
    assert_eq!(fs::read_to_string(&dest).unwrap(), "first");
    assert!(!temp.exists(), "Temporary capture should be moved, not copied");
    let _ = fs::remove_dir_all(root);
}

#[tokio::test]
async fn test_commit_overwrites_previous_photo() {
    let (store, root) = temp_store();

    store.commit(write_temp_capture("first")).await.unwrap();
    store.commit(write_temp_capture("second")).await.unwrap();

    assert_eq!(fs::read_to_string(store.photo_path()).unwrap(), "second");
    let entries = fs::read_dir(store.root()).unwrap().count();
    assert_eq!(entries, 1, "The store holds at most one photo");
    let _ = fs::remove_dir_all(root);
}

#[tokio::test]
async fn test_current_photo_empty_store() {
    let (store, root) = temp_store();

    // Directory does not exist yet
    assert!(store.current_photo().await.is_none());

    // Exists but holds no image
    store.ensure().unwrap();
    fs::write(store.root().join("notes.txt"), "not a photo").unwrap();
    assert!(
        store.current_photo().await.is_none(),
        "Non-image files are not photos"
    );
    let _ = fs::remove_dir_all(root);
}

#[tokio::test]
async fn test_current_photo_picks_most_recently_modified() {
    let (store, root) = temp_store();
    store.ensure().unwrap();

    let older = store.root().join("old.png");
    let newer = store.root().join("Photo_1.jpg");
    fs::write(&older, "old").unwrap();
    fs::write(&newer, "new").unwrap();

    let now = SystemTime::now();
    File::options()
        .write(true)
        .open(&older)
        .unwrap()
        .set_modified(now - Duration::from_secs(60))
        .unwrap();
    File::options()
        .write(true)
        .open(&newer)
        .unwrap()
        .set_modified(now)
        .unwrap();

    let photo = store.current_photo().await.expect("store is not empty");
    assert_eq!(photo.path, newer, "The newest photo wins");
    let _ = fs::remove_dir_all(root);
}

#[tokio::test]
async fn test_commit_after_review_updates_current_photo() {
    let (store, root) = temp_store();

    store.commit(write_temp_capture("first")).await.unwrap();
    let first = store.current_photo().await.unwrap();

    store.commit(write_temp_capture("second")).await.unwrap();
    let second = store.current_photo().await.unwrap();

    assert_eq!(first.path, second.path, "The slot path is fixed");
    assert_eq!(fs::read_to_string(&second.path).unwrap(), "second");
    let _ = fs::remove_dir_all(root);
}
