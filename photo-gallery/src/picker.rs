// Image picker capability
//
// The controller only sees a finite list of files or an explicit cancellation.
// On desktop the native dialog comes from rfd (feature "picker"); Android has
// no dialog backend here and reports PlatformNotSupported.

use crate::models::UploadFile;
use async_trait::async_trait;
use std::path::PathBuf;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PickerError {
    PermissionDenied(String),
    PlatformNotSupported(String),
    Io(String),
    Other(String),
}

impl std::fmt::Display for PickerError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            PickerError::PermissionDenied(msg) => write!(f, "Permission denied: {}", msg),
            PickerError::PlatformNotSupported(msg) => write!(f, "Platform not supported: {}", msg),
            PickerError::Io(msg) => write!(f, "Could not read file: {}", msg),
            PickerError::Other(msg) => write!(f, "Error: {}", msg),
        }
    }
}

impl std::error::Error for PickerError {}

/// Result of one picker interaction
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PickerOutcome {
    Selected(Vec<UploadFile>),
    Cancelled,
}

impl PickerOutcome {
    /// An empty selection counts as a cancellation
    pub fn from_files(files: Vec<UploadFile>) -> Self {
        if files.is_empty() {
            PickerOutcome::Cancelled
        } else {
            PickerOutcome::Selected(files)
        }
    }
}

/// Asynchronous source of images to upload
#[async_trait(?Send)]
pub trait FilePicker {
    async fn pick_images(&self) -> Result<PickerOutcome, PickerError>;
}

/// Picker over a fixed list of paths (command line, drag and drop, tests)
#[derive(Debug, Clone, Default)]
pub struct PathPicker {
    paths: Vec<PathBuf>,
}

impl PathPicker {
    pub fn new(paths: Vec<PathBuf>) -> Self {
        Self { paths }
    }
}

#[async_trait(?Send)]
impl FilePicker for PathPicker {
    async fn pick_images(&self) -> Result<PickerOutcome, PickerError> {
        let files = self
            .paths
            .iter()
            .map(|path| {
                UploadFile::from_path(path)
                    .map_err(|e| PickerError::Io(format!("{}: {}", path.display(), e)))
            })
            .collect::<Result<Vec<_>, _>>()?;
        Ok(PickerOutcome::from_files(files))
    }
}

/// Platform file dialog
#[derive(Debug, Clone, Default)]
pub struct NativeFilePicker {
    pub title: String,
}

#[cfg(all(feature = "picker", not(target_os = "android")))]
#[async_trait(?Send)]
impl FilePicker for NativeFilePicker {
    async fn pick_images(&self) -> Result<PickerOutcome, PickerError> {
        let mut dialog = rfd::AsyncFileDialog::new().add_filter(
            "Images",
            &["jpg", "jpeg", "png", "gif", "webp", "heic", "bmp"],
        );
        if !self.title.is_empty() {
            dialog = dialog.set_title(self.title.as_str());
        }

        let Some(handles) = dialog.pick_files().await else {
            log::debug!("Picker dismissed");
            return Ok(PickerOutcome::Cancelled);
        };

        let mut files = Vec::with_capacity(handles.len());
        for handle in handles {
            let name = handle.file_name();
            let content = handle.read().await;
            let mime_type = crate::models::mime_type_for(std::path::Path::new(&name));
            files.push(UploadFile::new(content, mime_type, name));
        }
        log::info!("Picked {} images", files.len());
        Ok(PickerOutcome::from_files(files))
    }
}

#[cfg(not(all(feature = "picker", not(target_os = "android"))))]
#[async_trait(?Send)]
impl FilePicker for NativeFilePicker {
    async fn pick_images(&self) -> Result<PickerOutcome, PickerError> {
        Err(PickerError::PlatformNotSupported(
            "Image picker is not available on this platform".to_string(),
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_path_picker_reads_files() {
        let dir = tempfile::tempdir().unwrap();
        let jpg = dir.path().join("beach.jpg");
        let png = dir.path().join("Sketch.PNG");
        std::fs::write(&jpg, [0xFF, 0xD8, 0xFF]).unwrap();
        std::fs::write(&png, [0x89, b'P', b'N', b'G']).unwrap();

        let outcome = PathPicker::new(vec![jpg, png]).pick_images().await.unwrap();

        let PickerOutcome::Selected(files) = outcome else {
            panic!("expected a selection");
        };
        assert_eq!(files.len(), 2);
        assert_eq!(files[0].name, "beach.jpg");
        assert_eq!(files[0].mime_type, "image/jpeg");
        assert_eq!(files[0].content, vec![0xFF, 0xD8, 0xFF]);
        assert_eq!(files[1].mime_type, "image/png");
    }

    #[tokio::test]
    async fn test_empty_selection_is_cancelled() {
        let outcome = PathPicker::default().pick_images().await.unwrap();
        assert_eq!(outcome, PickerOutcome::Cancelled);
    }

    #[tokio::test]
    async fn test_missing_file_is_io_error() {
        let dir = tempfile::tempdir().unwrap();
        let picker = PathPicker::new(vec![dir.path().join("gone.jpg")]);

        let result = picker.pick_images().await;

        assert!(matches!(result, Err(PickerError::Io(_))));
    }
}
