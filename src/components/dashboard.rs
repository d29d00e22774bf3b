use crate::error::AppError;
use crate::{AppContext, Screen};
use dioxus::prelude::*;
use photo_gallery::{
    DeleteConfirmDialog, ErrorNotice, FilePicker, FullscreenViewer, GalleryApi, GalleryError,
    LoadState, LoadingIndicator, NativeFilePicker, Photo, PhotoCollectionController, PhotoGrid,
    PhotoId, SelectionState, ViewerState,
};
use std::rc::Rc;

/// Network-bound actions started from the gallery screen
#[derive(Debug, Clone, Copy, PartialEq)]
enum Intent {
    Refresh,
    ConfirmDelete,
    Upload,
}

#[component]
pub fn DashboardScreen(context: AppContext, on_navigate: EventHandler<Screen>) -> Element {
    let controller = use_hook(|| {
        Rc::new(PhotoCollectionController::new(
            context.client.clone(),
            context.session.clone(),
        ))
    });
    let view = use_signal(|| controller.snapshot());
    let mut viewer = use_signal(ViewerState::default);
    let mut notice = use_signal(|| None::<String>);
    let mut in_flight = use_signal(|| 0usize);

    // Mirror every controller change, including Loading while a call is pending
    use_hook({
        let controller = controller.clone();
        move || {
            controller.set_observer(move |state| {
                let mut view = view;
                view.set(state);
            })
        }
    });

    let run = use_callback({
        let controller = controller.clone();
        move |intent: Intent| {
            let controller = controller.clone();
            spawn(async move {
                *in_flight.write() += 1;
                let result = match intent {
                    Intent::Refresh => controller.refresh().await.map_err(AppError::from),
                    Intent::ConfirmDelete => {
                        controller.confirm_delete().await.map_err(AppError::from)
                    }
                    Intent::Upload => {
                        pick_and_upload(controller.as_ref(), &NativeFilePicker::default()).await
                    }
                };
                *in_flight.write() -= 1;

                if let Err(e) = result {
                    log::warn!("{:?} failed: {}", intent, e);
                    match &e {
                        AppError::Gallery(gallery) if gallery.is_session_fatal() => {
                            on_navigate.call(Screen::Login)
                        }
                        _ => notice.set(Some(e.user_message())),
                    }
                }
            });
        }
    });

    let reveal = use_callback({
        let controller = controller.clone();
        move |id: PhotoId| controller.reveal(&id)
    });

    let dismiss = use_callback({
        let controller = controller.clone();
        move |_: ()| controller.dismiss()
    });

    let request_delete = use_callback({
        let controller = controller.clone();
        move |photo: Photo| controller.request_delete(&photo)
    });

    let cancel_delete = use_callback({
        let controller = controller.clone();
        move |_: ()| controller.cancel_delete()
    });

    let logout = use_callback({
        let controller = controller.clone();
        move |_: ()| {
            controller.logout();
            on_navigate.call(Screen::Login);
        }
    });

    // Load on mount
    use_effect(move || run.call(Intent::Refresh));

    let state = view();
    let config = context.client.config().clone();
    let busy = in_flight() > 0;

    rsx! {
        div { style: "padding: 16px; max-width: 900px; margin: 0 auto; min-height: 100vh; background: #f5f5f5;",
            div { style: "display: flex; align-items: center; justify-content: space-between; margin-bottom: 16px;",
                div {
                    h1 { style: "color: #0066cc; margin: 0; font-size: 24px; font-weight: 700;",
                        "📷 My Gallery"
                    }
                    p { style: "margin: 4px 0 0 0; font-size: 12px; color: #999;",
                        "{context.config.server_url}"
                    }
                }
                div { style: "display: flex; gap: 8px;",
                    button {
                        class: "btn-primary",
                        disabled: busy,
                        onclick: move |_| run.call(Intent::Upload),
                        "⬆️ Upload"
                    }
                    button {
                        class: "btn-secondary",
                        disabled: busy,
                        onclick: move |_| run.call(Intent::Refresh),
                        "🔄"
                    }
                    button {
                        class: "btn-secondary",
                        onclick: move |_| logout.call(()),
                        "🚪 Logout"
                    }
                }
            }

            match &state.load {
                LoadState::Loading => rsx! {
                    LoadingIndicator {}
                },
                LoadState::Failed(_) if state.photos.is_empty() => rsx! {
                    div { class: "card", style: "text-align: center;",
                        p { style: "color: #721c24;", "The gallery could not be loaded." }
                        button {
                            class: "btn-primary",
                            onclick: move |_| run.call(Intent::Refresh),
                            "Try again"
                        }
                    }
                },
                _ => rsx! {
                    PhotoGrid {
                        photos: state.photos.clone(),
                        config,
                        revealed: match &state.selection {
                            SelectionState::Revealed(id) => Some(id.clone()),
                            _ => None,
                        },
                        on_open: move |photo| viewer.write().open(photo),
                        on_reveal: reveal,
                        on_request_delete: request_delete,
                        on_dismiss: dismiss,
                    }
                },
            }

            if let SelectionState::ConfirmPending(photo) = state.selection.clone() {
                DeleteConfirmDialog {
                    photo,
                    on_confirm: move |_| run.call(Intent::ConfirmDelete),
                    on_cancel: cancel_delete,
                }
            }

            if let ViewerState::Open(photo) = viewer() {
                FullscreenViewer {
                    image_url: context.client.image_url(&photo),
                    photo: photo.clone(),
                    on_close: move |_| viewer.write().close(),
                }
            }

            if let Some(message) = notice() {
                ErrorNotice {
                    message,
                    on_dismiss: move |_| notice.set(None),
                }
            }
        }
    }
}

/// Let the user choose images and upload them; a logged-out user never sees
/// the picker
async fn pick_and_upload<A: GalleryApi>(
    controller: &PhotoCollectionController<A>,
    picker: &impl FilePicker,
) -> Result<(), AppError> {
    if !controller.session().is_authenticated() {
        return Err(GalleryError::AuthenticationRequired.into());
    }
    let outcome = picker.pick_images().await?;
    controller.upload_selection(outcome).await?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use photo_gallery::{
        GalleryClient, GalleryConfig, MemoryTokenStore, PickerError, PickerOutcome, Session,
    };
    use std::cell::Cell;

    #[derive(Default)]
    struct CountingPicker {
        opened: Cell<usize>,
    }

    #[async_trait(?Send)]
    impl FilePicker for CountingPicker {
        async fn pick_images(&self) -> Result<PickerOutcome, PickerError> {
            self.opened.set(self.opened.get() + 1);
            Ok(PickerOutcome::Cancelled)
        }
    }

    fn controller(store: MemoryTokenStore) -> PhotoCollectionController<GalleryClient> {
        // Nothing listens on the discard port; none of these paths reach it
        let client = GalleryClient::new(GalleryConfig::new("http://127.0.0.1:9")).unwrap();
        PhotoCollectionController::new(client, Session::init(store).unwrap())
    }

    #[tokio::test]
    async fn test_logged_out_upload_skips_picker() {
        let controller = controller(MemoryTokenStore::new());
        let picker = CountingPicker::default();

        let result = pick_and_upload(&controller, &picker).await;

        assert!(matches!(
            result,
            Err(AppError::Gallery(GalleryError::AuthenticationRequired))
        ));
        assert_eq!(picker.opened.get(), 0);
    }

    #[tokio::test]
    async fn test_cancelled_pick_uploads_nothing() {
        let controller = controller(MemoryTokenStore::with_token("T1"));
        let picker = CountingPicker::default();

        pick_and_upload(&controller, &picker).await.unwrap();

        assert_eq!(picker.opened.get(), 1);
        assert_eq!(controller.load_state(), LoadState::Idle);
    }
}
