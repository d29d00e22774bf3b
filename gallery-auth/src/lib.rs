//! # Gallery Auth
//!
//! Email/password authentication for the photo gallery service.
//!
//! This crate provides:
//! - Login and signup flows on top of any [`photo_gallery::GalleryApi`]
//! - Persisting the issued token through the shared [`photo_gallery::Session`]
//! - A Dioxus form component for both flows
//!
//! ## Separation of Concerns
//!
//! This crate focuses solely on authentication. It does **not**:
//! - Decide where the token is stored (the application picks the `TokenStore`)
//! - Navigate between screens (handled through callbacks)
//! - Touch the photo collection
//!
//! ## Example Usage
//!
//! ```rust,ignore
//! use gallery_auth::{AuthForm, AuthMode, AuthService, Credentials};
//!
//! // Programmatic usage
//! let auth = AuthService::new(client, session);
//! auth.login(&Credentials::new("a@b.com", "secret")).await?;
//!
//! // UI component usage
//! AuthForm {
//!     mode: AuthMode::Login,
//!     client: client.clone(),
//!     session: session.clone(),
//!     on_success: move |_| {
//!         // Show the gallery
//!     },
//! }
//! ```

pub mod component;
pub mod models;
pub mod service;

pub use component::{AuthForm, AuthFormProps, AuthLabels};
pub use models::{AuthMode, AuthState, Credentials};
pub use service::{AuthError, AuthService};
