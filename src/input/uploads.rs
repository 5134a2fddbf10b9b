//! Upload set for bulk filtering, with locally held previews

use crate::error::{Result, ResumeDeskError};
use crate::input::file_detector::FileType;
use log::{debug, info};
use std::io::Write;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tempfile::TempPath;
use tokio::fs;

/// A private on-disk snapshot of an uploaded file, viewable through its
/// `file://` URL. The snapshot is removed when the last holder drops it.
#[derive(Debug)]
pub struct Preview {
    url: String,
    path: TempPath,
}

impl Preview {
    pub fn create(name: &str, file_type: FileType, bytes: &[u8]) -> Result<Self> {
        let stem = Path::new(name)
            .file_stem()
            .map(|s| s.to_string_lossy().to_string())
            .unwrap_or_else(|| "resume".to_string());

        let mut file = tempfile::Builder::new()
            .prefix(&format!("resume-preview-{}-", stem))
            .suffix(&format!(".{}", file_type.extension()))
            .tempfile()?;
        file.write_all(bytes)?;
        file.flush()?;

        let path = file.into_temp_path();
        let url = format!("file://{}", path.display());
        debug!("Created preview {}", url);
        Ok(Self { url, path })
    }

    pub fn url(&self) -> &str {
        &self.url
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

#[derive(Debug, Clone)]
pub struct UploadedFile {
    pub name: String,
    pub size: u64,
    pub file_type: FileType,
    pub bytes: Vec<u8>,
    pub preview: Arc<Preview>,
}

/// One file part of a multipart request.
#[derive(Debug, Clone, PartialEq)]
pub struct FormFile {
    pub name: String,
    pub mime: &'static str,
    pub bytes: Vec<u8>,
}

impl FormFile {
    /// Read a resume from disk for a single-file upload.
    pub async fn from_path(path: &Path) -> Result<Self> {
        let file_type = FileType::from_path(path);
        if file_type == FileType::Unknown {
            return Err(ResumeDeskError::UnsupportedFormat(format!(
                "Unsupported resume file: {}",
                path.display()
            )));
        }
        let name = path
            .file_name()
            .map(|n| n.to_string_lossy().to_string())
            .ok_or_else(|| ResumeDeskError::InvalidInput(format!("Not a file: {}", path.display())))?;
        let bytes = fs::read(path).await?;
        Ok(Self {
            name,
            mime: file_type.mime_type(),
            bytes,
        })
    }
}

impl From<&UploadedFile> for FormFile {
    fn from(file: &UploadedFile) -> Self {
        Self {
            name: file.name.clone(),
            mime: file.file_type.mime_type(),
            bytes: file.bytes.clone(),
        }
    }
}

/// Files selected for one filter session. A file is identified by its
/// name and size; re-adding the same file is a no-op.
#[derive(Debug, Default)]
pub struct UploadSet {
    files: Vec<UploadedFile>,
}

impl UploadSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Read each path and add it. Returns how many files were new.
    pub async fn add_paths(&mut self, paths: &[PathBuf]) -> Result<usize> {
        let mut added = 0;
        for path in paths {
            if !path.exists() {
                return Err(ResumeDeskError::InvalidInput(format!(
                    "File does not exist: {}",
                    path.display()
                )));
            }

            let name = path
                .file_name()
                .map(|n| n.to_string_lossy().to_string())
                .ok_or_else(|| {
                    ResumeDeskError::InvalidInput(format!("Not a file: {}", path.display()))
                })?;

            let bytes = fs::read(path).await?;
            if self.add_bytes(&name, bytes)? {
                added += 1;
            }
        }
        info!("Upload set now holds {} file(s)", self.files.len());
        Ok(added)
    }

    /// Add an in-memory file. Returns false when an identical entry exists.
    pub fn add_bytes(&mut self, name: &str, bytes: Vec<u8>) -> Result<bool> {
        let file_type = FileType::from_path(Path::new(name));
        if file_type == FileType::Unknown {
            return Err(ResumeDeskError::UnsupportedFormat(format!(
                "Unsupported resume file: {} (expected pdf, doc, docx or txt)",
                name
            )));
        }

        let size = bytes.len() as u64;
        if self.files.iter().any(|f| f.name == name && f.size == size) {
            debug!("Skipping duplicate upload {}", name);
            return Ok(false);
        }

        let preview = Arc::new(Preview::create(name, file_type, &bytes)?);
        self.files.push(UploadedFile {
            name: name.to_string(),
            size,
            file_type,
            bytes,
            preview,
        });
        Ok(true)
    }

    /// Remove every entry with this name. Returns how many were removed.
    pub fn remove(&mut self, name: &str) -> usize {
        let before = self.files.len();
        self.files.retain(|f| f.name != name);
        before - self.files.len()
    }

    pub fn get(&self, name: &str) -> Option<&UploadedFile> {
        self.files.iter().find(|f| f.name == name)
    }

    pub fn iter(&self) -> impl Iterator<Item = &UploadedFile> {
        self.files.iter()
    }

    pub fn len(&self) -> usize {
        self.files.len()
    }

    pub fn is_empty(&self) -> bool {
        self.files.is_empty()
    }

    pub fn total_bytes(&self) -> u64 {
        self.files.iter().map(|f| f.size).sum()
    }
}
