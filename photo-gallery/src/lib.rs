//! # Photo Gallery
//!
//! Client library for a remote photo gallery service.
//!
//! This crate provides:
//! - A token-bearing HTTP client for login, signup, listing, uploading and
//!   deleting photos
//! - A persisted authentication session (SQLite key/value storage)
//! - The photo collection state machine driving the gallery screen
//! - Full-screen viewer state and an image picker capability
//! - Optional Dioxus components for the gallery UI (`components` feature)
//!
//! ## Example Usage
//!
//! ```rust,ignore
//! use photo_gallery::{
//!     GalleryClient, GalleryConfig, PhotoCollectionController, Session, SqliteTokenStore,
//! };
//!
//! let session = Session::init(SqliteTokenStore::open(&db_path)?)?;
//! let client = GalleryClient::new(GalleryConfig::new("https://gallery.example.com"))?;
//! let controller = PhotoCollectionController::new(client, session);
//!
//! controller.refresh().await?;
//! for photo in controller.photos() {
//!     println!("{} -> {}", photo.id, controller.api().image_url(&photo));
//! }
//! ```

pub mod client;
pub mod controller;
pub mod error;
pub mod models;
pub mod picker;
pub mod schema;
pub mod session;
pub mod viewer;

#[cfg(feature = "components")]
pub mod components;

pub use client::{GalleryApi, GalleryClient, UPLOAD_FIELD};
pub use controller::{CollectionState, LoadState, PhotoCollectionController, SelectionState};
pub use error::{GalleryError, GalleryResult};
pub use models::{GalleryConfig, Photo, PhotoId, UploadFile};
pub use picker::{FilePicker, NativeFilePicker, PathPicker, PickerError, PickerOutcome};
pub use schema::init_storage_schema;
pub use session::{
    MemoryTokenStore, Session, SessionError, SqliteTokenStore, TokenStore, TOKEN_STORAGE_KEY,
};
pub use viewer::ViewerState;

#[cfg(feature = "components")]
pub use components::{
    DeleteConfirmDialog, ErrorNotice, FullscreenViewer, GalleryLabels, LoadingIndicator, PhotoGrid,
};
