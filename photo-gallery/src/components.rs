//! Dioxus UI components for the photo gallery
//!
//! These components only render state handed to them and report user intents
//! through callbacks. All decisions live in
//! [`PhotoCollectionController`](crate::PhotoCollectionController).

use crate::models::{GalleryConfig, Photo, PhotoId};
use dioxus::prelude::*;

/// Labels for the gallery UI
#[derive(Clone, PartialEq)]
pub struct GalleryLabels {
    pub empty: String,
    pub loading: String,
    pub delete: String,
    pub confirm_title: String,
    pub confirm_message: String,
    pub confirm_button: String,
    pub cancel_button: String,
    pub close: String,
    pub ok_button: String,
}

impl Default for GalleryLabels {
    fn default() -> Self {
        Self {
            empty: "No photos yet. Upload your first one!".to_string(),
            loading: "Loading photos...".to_string(),
            delete: "🗑️ Delete".to_string(),
            confirm_title: "Delete photo?".to_string(),
            confirm_message: "This photo will be removed from your gallery.".to_string(),
            confirm_button: "Delete".to_string(),
            cancel_button: "Cancel".to_string(),
            close: "×".to_string(),
            ok_button: "OK".to_string(),
        }
    }
}

/// Grid of photos with a long-press menu on one item at a time
///
/// # Example
/// ```rust,ignore
/// PhotoGrid {
///     photos: state.photos.clone(),
///     config: gallery_config.clone(),
///     revealed: controller.revealed(),
///     on_open: move |photo| viewer.write().open(photo),
///     on_reveal: move |id| controller.reveal(&id),
///     on_request_delete: move |photo| controller.request_delete(&photo),
///     on_dismiss: move |_| controller.dismiss(),
/// }
/// ```
#[component]
pub fn PhotoGrid(
    photos: Vec<Photo>,
    config: GalleryConfig,
    /// Item currently showing its menu affordance
    #[props(default)]
    revealed: Option<PhotoId>,
    on_open: EventHandler<Photo>,
    on_reveal: EventHandler<PhotoId>,
    on_request_delete: EventHandler<Photo>,
    on_dismiss: EventHandler<()>,
    #[props(default)] labels: Option<GalleryLabels>,
) -> Element {
    let labels = labels.unwrap_or_default();

    if photos.is_empty() {
        return rsx! {
            div {
                style: "padding: 24px; text-align: center; background: #f5f5f5; border-radius: 8px; color: #999;",
                "{labels.empty}"
            }
        };
    }

    rsx! {
        div {
            style: "display: grid; grid-template-columns: repeat(auto-fill, minmax(120px, 1fr)); gap: 12px;",
            for photo in photos {
                PhotoTile {
                    key: "{photo.id}",
                    is_revealed: revealed.as_ref() == Some(&photo.id),
                    image_url: config.image_url(&photo.filename),
                    photo: photo.clone(),
                    delete_label: labels.delete.clone(),
                    on_open,
                    on_reveal,
                    on_request_delete,
                    on_dismiss,
                }
            }
        }
    }
}

/// A single grid item
#[component]
fn PhotoTile(
    photo: Photo,
    image_url: String,
    is_revealed: bool,
    delete_label: String,
    on_open: EventHandler<Photo>,
    on_reveal: EventHandler<PhotoId>,
    on_request_delete: EventHandler<Photo>,
    on_dismiss: EventHandler<()>,
) -> Element {
    let border_color = if is_revealed { "#cc0000" } else { "#e0e0e0" };
    let tile_style = format!(
        "position: relative; aspect-ratio: 1/1; border-radius: 8px; overflow: hidden; border: 2px solid {};",
        border_color
    );

    rsx! {
        div {
            style: "{tile_style}",
            img {
                src: "{image_url}",
                alt: "{photo.filename}",
                style: "width: 100%; height: 100%; object-fit: cover; cursor: pointer;",
                onclick: {
                    let photo = photo.clone();
                    move |_| {
                        if is_revealed {
                            on_dismiss.call(());
                        } else {
                            on_open.call(photo.clone());
                        }
                    }
                },
                // Long-press surfaces as a context menu event in mobile webviews
                oncontextmenu: {
                    let id = photo.id.clone();
                    move |evt: MouseEvent| {
                        evt.prevent_default();
                        on_reveal.call(id.clone());
                    }
                },
            }
            if is_revealed {
                button {
                    style: "position: absolute; bottom: 6px; left: 6px; right: 6px; padding: 8px; background: rgba(204, 0, 0, 0.9); color: white; border-radius: 6px; font-size: 14px; cursor: pointer; border: none;",
                    onclick: {
                        let photo = photo.clone();
                        move |_| on_request_delete.call(photo.clone())
                    },
                    "{delete_label}"
                }
            }
        }
    }
}

/// Modal delete confirmation, visible while a delete is pending
#[component]
pub fn DeleteConfirmDialog(
    photo: Photo,
    on_confirm: EventHandler<()>,
    on_cancel: EventHandler<()>,
    #[props(default)] labels: Option<GalleryLabels>,
) -> Element {
    let labels = labels.unwrap_or_default();

    rsx! {
        div {
            style: "position: fixed; top: 0; left: 0; right: 0; bottom: 0; background: rgba(0, 0, 0, 0.5); z-index: 1100; display: flex; align-items: center; justify-content: center;",
            div {
                style: "background: white; border-radius: 12px; padding: 20px; width: 85%; max-width: 360px;",
                h3 { style: "margin: 0 0 8px 0; font-size: 18px;", "{labels.confirm_title}" }
                p { style: "margin: 0 0 4px 0; font-size: 14px; color: #555;", "{labels.confirm_message}" }
                p { style: "margin: 0 0 16px 0; font-size: 12px; color: #999; word-break: break-all;", "{photo.filename}" }
                div {
                    style: "display: flex; gap: 12px; justify-content: flex-end;",
                    button {
                        class: "btn-secondary",
                        onclick: move |_| on_cancel.call(()),
                        "{labels.cancel_button}"
                    }
                    button {
                        style: "padding: 10px 16px; background: #cc0000; color: white; border-radius: 8px; border: none; cursor: pointer;",
                        onclick: move |_| on_confirm.call(()),
                        "{labels.confirm_button}"
                    }
                }
            }
        }
    }
}

/// Full-screen preview of one photo
#[component]
pub fn FullscreenViewer(
    photo: Photo,
    image_url: String,
    on_close: EventHandler<()>,
    #[props(default)] labels: Option<GalleryLabels>,
) -> Element {
    let labels = labels.unwrap_or_default();

    rsx! {
        div {
            style: "position: fixed; top: 0; left: 0; right: 0; bottom: 0; background: rgba(0, 0, 0, 0.95); z-index: 1000; display: flex; flex-direction: column;",
            div {
                style: "display: flex; justify-content: space-between; align-items: center; padding: 16px; background: rgba(0, 0, 0, 0.7);",
                div { style: "color: white; font-size: 16px;", "{photo.filename}" }
                button {
                    style: "width: 40px; height: 40px; background: rgba(255, 255, 255, 0.2); color: white; border-radius: 50%; font-size: 24px; cursor: pointer; border: none;",
                    onclick: move |_| on_close.call(()),
                    "{labels.close}"
                }
            }
            div {
                style: "flex: 1; display: flex; align-items: center; justify-content: center; padding: 20px;",
                img {
                    src: "{image_url}",
                    alt: "{photo.filename}",
                    style: "max-width: 100%; max-height: 100%; object-fit: contain;",
                }
            }
        }
    }
}

/// Spinner shown while the collection is loading
#[component]
pub fn LoadingIndicator(#[props(default)] labels: Option<GalleryLabels>) -> Element {
    let labels = labels.unwrap_or_default();

    rsx! {
        div {
            style: "padding: 40px; text-align: center; color: #666;",
            div { style: "font-size: 32px; animation: spin 2s linear infinite;", "⏳" }
            p { style: "margin: 8px 0 0 0; font-size: 14px;", "{labels.loading}" }
        }
    }
}

/// Blocking notification for a failed operation
#[component]
pub fn ErrorNotice(
    message: String,
    on_dismiss: EventHandler<()>,
    #[props(default)] labels: Option<GalleryLabels>,
) -> Element {
    let labels = labels.unwrap_or_default();

    rsx! {
        div {
            style: "position: fixed; top: 0; left: 0; right: 0; bottom: 0; background: rgba(0, 0, 0, 0.5); z-index: 1200; display: flex; align-items: center; justify-content: center;",
            div {
                style: "background: #f8d7da; color: #721c24; border-radius: 12px; padding: 20px; width: 85%; max-width: 360px;",
                p { style: "margin: 0 0 16px 0; font-size: 14px;", "{message}" }
                button {
                    class: "btn-primary",
                    style: "width: 100%;",
                    onclick: move |_| on_dismiss.call(()),
                    "{labels.ok_button}"
                }
            }
        }
    }
}
