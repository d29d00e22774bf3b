use photo_gallery::{GalleryError, PickerError, SessionError};
use std::fmt;

/// Central error types for the gallery app
#[derive(Debug)]
pub enum AppError {
    /// Configuration file could not be parsed
    Config(String),
    /// Token storage error
    Session(SessionError),
    /// Error reported by the gallery service or transport
    Gallery(GalleryError),
    /// Image picker failure
    Picker(PickerError),
    /// Filesystem error
    Filesystem(std::io::Error),
    /// Platform integration error (e.g. JNI)
    Platform(String),
}

impl fmt::Display for AppError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            AppError::Config(msg) => write!(f, "Configuration error: {}", msg),
            AppError::Session(e) => write!(f, "{}", e),
            AppError::Gallery(e) => write!(f, "{}", e),
            AppError::Picker(e) => write!(f, "{}", e),
            AppError::Filesystem(e) => write!(f, "Filesystem error: {}", e),
            AppError::Platform(msg) => write!(f, "Platform error: {}", msg),
        }
    }
}

impl std::error::Error for AppError {}

impl From<SessionError> for AppError {
    fn from(e: SessionError) -> Self {
        AppError::Session(e)
    }
}

impl From<GalleryError> for AppError {
    fn from(e: GalleryError) -> Self {
        AppError::Gallery(e)
    }
}

impl From<PickerError> for AppError {
    fn from(e: PickerError) -> Self {
        AppError::Picker(e)
    }
}

impl From<std::io::Error> for AppError {
    fn from(e: std::io::Error) -> Self {
        AppError::Filesystem(e)
    }
}

impl From<toml::de::Error> for AppError {
    fn from(e: toml::de::Error) -> Self {
        AppError::Config(e.to_string())
    }
}

/// User-friendly error messages for UI
impl AppError {
    pub fn user_message(&self) -> String {
        match self {
            AppError::Config(_) => "The app configuration is invalid.".to_string(),
            AppError::Session(_) => "Could not access the login storage.".to_string(),
            AppError::Gallery(e) => e.user_message(),
            AppError::Picker(PickerError::PermissionDenied(_)) => {
                "Photo access is required to upload images.".to_string()
            }
            AppError::Picker(PickerError::PlatformNotSupported(_)) => {
                "Choosing photos is not supported on this device.".to_string()
            }
            AppError::Picker(_) => "The selected photos could not be read.".to_string(),
            AppError::Filesystem(_) => {
                "Error accessing files. Please check app permissions.".to_string()
            }
            AppError::Platform(_) => "The app could not start on this device.".to_string(),
        }
    }
}
