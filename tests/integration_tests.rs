//! Integration tests for upload handling

use resume_desk::input::uploads::{FormFile, UploadSet};
use resume_desk::ResumeDeskError;
use std::path::PathBuf;
use tempfile::TempDir;

fn write_fixture(dir: &TempDir, name: &str, contents: &[u8]) -> PathBuf {
    let path = dir.path().join(name);
    std::fs::write(&path, contents).unwrap();
    path
}

#[tokio::test]
async fn test_add_paths_reads_files() {
    let dir = TempDir::new().unwrap();
    let asha = write_fixture(&dir, "asha.pdf", b"%PDF-1.4 Asha Raman");
    let ravi = write_fixture(&dir, "ravi.docx", b"PK ravi");

    let mut uploads = UploadSet::new();
    let added = uploads.add_paths(&[asha, ravi]).await.unwrap();

    assert_eq!(added, 2);
    assert_eq!(uploads.len(), 2);
    let file = uploads.get("asha.pdf").unwrap();
    assert_eq!(file.bytes, b"%PDF-1.4 Asha Raman");
    assert_eq!(file.size, 19);
}

#[tokio::test]
async fn test_same_file_twice_is_added_once() {
    let dir = TempDir::new().unwrap();
    let asha = write_fixture(&dir, "asha.pdf", b"%PDF-1.4");

    let mut uploads = UploadSet::new();
    assert_eq!(uploads.add_paths(&[asha.clone()]).await.unwrap(), 1);
    assert_eq!(uploads.add_paths(&[asha]).await.unwrap(), 0);
    assert_eq!(uploads.len(), 1);
}

#[tokio::test]
async fn test_missing_file() {
    let dir = TempDir::new().unwrap();
    let mut uploads = UploadSet::new();

    let result = uploads.add_paths(&[dir.path().join("ghost.pdf")]).await;
    assert!(matches!(result, Err(ResumeDeskError::InvalidInput(_))));
}

#[tokio::test]
async fn test_unsupported_file_type() {
    let dir = TempDir::new().unwrap();
    let photo = write_fixture(&dir, "photo.xyz", b"not a resume");

    let mut uploads = UploadSet::new();
    let result = uploads.add_paths(&[photo.clone()]).await;
    assert!(matches!(result, Err(ResumeDeskError::UnsupportedFormat(_))));

    assert!(matches!(
        FormFile::from_path(&photo).await,
        Err(ResumeDeskError::UnsupportedFormat(_))
    ));
}

#[tokio::test]
async fn test_previews_outlive_removal_until_released() {
    let dir = TempDir::new().unwrap();
    let meera = write_fixture(&dir, "meera.pdf", b"%PDF meera");

    let mut uploads = UploadSet::new();
    uploads.add_paths(&[meera]).await.unwrap();

    let preview = uploads.get("meera.pdf").unwrap().preview.clone();
    let snapshot = preview.path().to_path_buf();
    assert!(preview.url().ends_with(".pdf"));

    uploads.remove("meera.pdf");
    assert!(snapshot.exists());

    drop(preview);
    assert!(!snapshot.exists());
}

#[tokio::test]
async fn test_form_file_from_path() {
    let dir = TempDir::new().unwrap();
    let resume = write_fixture(&dir, "resume.txt", b"Asha Raman\nRust, SQL");

    let file = FormFile::from_path(&resume).await.unwrap();
    assert_eq!(file.name, "resume.txt");
    assert_eq!(file.mime, "text/plain");
    assert_eq!(file.bytes, b"Asha Raman\nRust, SQL");
}
