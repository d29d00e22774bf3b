//! Photo collection state machine
//!
//! [`PhotoCollectionController`] owns the collection snapshot, its load state
//! and the per-item selection used for the delete flow. User intents and
//! network completions are its only inputs; the UI renders from
//! [`PhotoCollectionController::snapshot`] and may subscribe to every change
//! with [`PhotoCollectionController::set_observer`].
//!
//! The state sits in a `RefCell` that is never borrowed across an `.await`,
//! so several intents may be in flight at once on the UI task. Overlapping
//! [`refresh`](PhotoCollectionController::refresh) calls are neither
//! deduplicated nor cancelled: whichever response arrives last replaces the
//! collection, regardless of the order the calls were made in.
//!
//! A completion only touches state while the session it was sent with is
//! still the current one. Responses arriving after a logout or a token change
//! are dropped.

use crate::client::GalleryApi;
use crate::error::{GalleryError, GalleryResult};
use crate::models::{Photo, PhotoId, UploadFile};
use crate::picker::PickerOutcome;
use crate::session::Session;
use std::cell::{Cell, RefCell};
use std::collections::HashSet;

/// Whether the collection is being fetched
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum LoadState {
    #[default]
    Idle,
    Loading,
    Loaded,
    Failed(GalleryError),
}

/// Per-item interaction state of the delete flow
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum SelectionState {
    #[default]
    None,
    /// Menu affordance visible on one item (long-press)
    Revealed(PhotoId),
    /// Delete confirmation dialog open for this photo
    ConfirmPending(Photo),
}

/// Everything the rendering layer needs from the controller
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct CollectionState {
    pub load: LoadState,
    pub photos: Vec<Photo>,
    pub selection: SelectionState,
}

impl CollectionState {
    pub fn contains(&self, id: &PhotoId) -> bool {
        self.photos.iter().any(|p| &p.id == id)
    }
}

type Observer = Box<dyn Fn(CollectionState)>;

/// Session a request was issued under
struct Issued {
    token: String,
    epoch: u64,
}

pub struct PhotoCollectionController<A> {
    api: A,
    session: Session,
    state: RefCell<CollectionState>,
    refresh_seq: Cell<u64>,
    /// Bumped on logout
    epoch: Cell<u64>,
    observer: RefCell<Option<Observer>>,
}

impl<A: GalleryApi> PhotoCollectionController<A> {
    pub fn new(api: A, session: Session) -> Self {
        Self {
            api,
            session,
            state: RefCell::new(CollectionState::default()),
            refresh_seq: Cell::new(0),
            epoch: Cell::new(0),
            observer: RefCell::new(None),
        }
    }

    pub fn api(&self) -> &A {
        &self.api
    }

    pub fn session(&self) -> &Session {
        &self.session
    }

    /// Receive a snapshot after every state change
    ///
    /// The observer must not call back into the controller.
    pub fn set_observer(&self, observer: impl Fn(CollectionState) + 'static) {
        *self.observer.borrow_mut() = Some(Box::new(observer));
    }

    pub fn snapshot(&self) -> CollectionState {
        self.state.borrow().clone()
    }

    pub fn load_state(&self) -> LoadState {
        self.state.borrow().load.clone()
    }

    pub fn photos(&self) -> Vec<Photo> {
        self.state.borrow().photos.clone()
    }

    pub fn selection(&self) -> SelectionState {
        self.state.borrow().selection.clone()
    }

    /// Id of the item currently showing its menu affordance
    pub fn revealed(&self) -> Option<PhotoId> {
        match &self.state.borrow().selection {
            SelectionState::Revealed(id) => Some(id.clone()),
            _ => None,
        }
    }

    /// Photo awaiting delete confirmation; the dialog is open iff this is `Some`
    pub fn pending_delete(&self) -> Option<Photo> {
        match &self.state.borrow().selection {
            SelectionState::ConfirmPending(photo) => Some(photo.clone()),
            _ => None,
        }
    }

    /// Mutate the state, then notify the observer
    fn update<R>(&self, f: impl FnOnce(&mut CollectionState) -> R) -> R {
        let result = f(&mut self.state.borrow_mut());
        let snapshot = self.snapshot();
        if let Some(observer) = self.observer.borrow().as_ref() {
            observer(snapshot);
        }
        result
    }

    fn issue(&self) -> GalleryResult<Issued> {
        let token = self
            .session
            .token()
            .ok_or(GalleryError::AuthenticationRequired)?;
        Ok(Issued {
            token,
            epoch: self.epoch.get(),
        })
    }

    /// The session a request was sent with is still in place
    fn is_current(&self, issued: &Issued) -> bool {
        self.epoch.get() == issued.epoch
            && self.session.token().as_deref() == Some(issued.token.as_str())
    }

    /// Result for a completion whose session has gone away or changed
    fn superseded(&self, what: &str) -> GalleryResult<()> {
        log::debug!("{} completed under an ended session, discarding", what);
        if self.session.is_authenticated() {
            Ok(())
        } else {
            Err(GalleryError::AuthenticationRequired)
        }
    }

    /// Record a failure; a rejected token ends the session, unless a newer
    /// session has replaced it meanwhile
    fn fail(&self, issued: &Issued, error: GalleryError) -> GalleryError {
        if error == GalleryError::Unauthorized && self.is_current(issued) {
            log::warn!("Token rejected by the gallery service, ending session");
            if let Err(e) = self.session.teardown() {
                log::error!("Failed to clear rejected token: {}", e);
            }
        }
        error
    }

    /// Fetch the collection and replace the local snapshot
    ///
    /// On failure the previous collection is kept and the load state becomes
    /// [`LoadState::Failed`].
    pub async fn refresh(&self) -> GalleryResult<()> {
        let issued = self.issue()?;

        let seq = self.refresh_seq.get() + 1;
        self.refresh_seq.set(seq);
        self.update(|state| state.load = LoadState::Loading);
        log::debug!("Refresh #{} started", seq);

        let result = self.api.list_photos(Some(&issued.token)).await;

        if !self.is_current(&issued) {
            self.update(|state| {
                if state.load == LoadState::Loading {
                    state.load = LoadState::Idle;
                }
            });
            return self.superseded(&format!("Refresh #{}", seq));
        }

        match result {
            Ok(photos) => {
                let photos = dedup_by_id(photos);
                log::debug!("Refresh #{} completed with {} photos", seq, photos.len());
                self.update(|state| {
                    state.photos = photos;
                    state.load = LoadState::Loaded;
                    let stale = match &state.selection {
                        SelectionState::None => false,
                        SelectionState::Revealed(id) => !state.contains(id),
                        SelectionState::ConfirmPending(photo) => !state.contains(&photo.id),
                    };
                    if stale {
                        state.selection = SelectionState::None;
                    }
                });
                Ok(())
            }
            Err(e) => {
                log::warn!("Refresh #{} failed: {}", seq, e);
                self.update(|state| state.load = LoadState::Failed(e.clone()));
                Err(self.fail(&issued, e))
            }
        }
    }

    /// Show the menu affordance on one item, replacing any other revealed item
    pub fn reveal(&self, id: &PhotoId) {
        self.update(|state| {
            if matches!(state.selection, SelectionState::ConfirmPending(_)) {
                log::debug!("Ignoring reveal of {} while a delete is pending", id);
            } else if !state.contains(id) {
                log::debug!("Ignoring reveal of unknown photo {}", id);
            } else {
                state.selection = SelectionState::Revealed(id.clone());
            }
        });
    }

    /// Hide the menu affordance
    pub fn dismiss(&self) {
        self.update(|state| {
            if matches!(state.selection, SelectionState::Revealed(_)) {
                state.selection = SelectionState::None;
            }
        });
    }

    /// Open the delete confirmation for the revealed photo
    pub fn request_delete(&self, photo: &Photo) {
        self.update(|state| {
            let revealed =
                matches!(&state.selection, SelectionState::Revealed(id) if *id == photo.id);
            if revealed {
                state.selection = SelectionState::ConfirmPending(photo.clone());
            } else {
                log::debug!(
                    "Ignoring delete request for {} in state {:?}",
                    photo.id,
                    state.selection
                );
            }
        });
    }

    /// Close the delete confirmation without doing anything
    pub fn cancel_delete(&self) {
        self.update(|state| {
            if matches!(state.selection, SelectionState::ConfirmPending(_)) {
                state.selection = SelectionState::None;
            }
        });
    }

    /// Take the pending photo out of the selection, closing the dialog
    fn close_confirmation(&self) -> Option<Photo> {
        self.update(|state| match std::mem::take(&mut state.selection) {
            SelectionState::ConfirmPending(photo) => Some(photo),
            other => {
                state.selection = other;
                None
            }
        })
    }

    /// Delete the photo awaiting confirmation, then refresh
    ///
    /// The confirmation closes whatever the outcome. Nothing is removed
    /// locally; the collection only changes through the follow-up refresh.
    pub async fn confirm_delete(&self) -> GalleryResult<()> {
        let issued = match self.issue() {
            Ok(issued) => issued,
            Err(e) => {
                self.close_confirmation();
                return Err(e);
            }
        };

        let Some(photo) = self.close_confirmation() else {
            log::debug!("confirm_delete without a pending delete");
            return Ok(());
        };

        match self.api.delete_photo(Some(&issued.token), &photo.id).await {
            Ok(()) if !self.is_current(&issued) => self.superseded("Delete"),
            Ok(()) => {
                log::info!("Deleted photo {}", photo.id);
                self.refresh().await
            }
            Err(e) => {
                log::warn!("Deleting photo {} failed: {}", photo.id, e);
                Err(self.fail(&issued, e))
            }
        }
    }

    /// Upload a batch of files, then refresh
    ///
    /// An empty batch is a cancelled selection and does nothing.
    pub async fn upload(&self, files: Vec<UploadFile>) -> GalleryResult<()> {
        let issued = self.issue()?;
        if files.is_empty() {
            log::debug!("Upload with no files, nothing to do");
            return Ok(());
        }

        match self.api.upload_photos(Some(&issued.token), &files).await {
            Ok(()) if !self.is_current(&issued) => self.superseded("Upload"),
            Ok(()) => {
                log::info!("Uploaded {} photos", files.len());
                self.refresh().await
            }
            Err(e) => {
                log::warn!("Upload of {} photos failed: {}", files.len(), e);
                Err(self.fail(&issued, e))
            }
        }
    }

    /// Upload whatever the picker returned
    pub async fn upload_selection(&self, outcome: PickerOutcome) -> GalleryResult<()> {
        match outcome {
            PickerOutcome::Selected(files) => self.upload(files).await,
            PickerOutcome::Cancelled => {
                self.issue()?;
                Ok(())
            }
        }
    }

    /// End the session and forget the collection
    ///
    /// Requests still in flight complete without touching the state.
    pub fn logout(&self) {
        self.epoch.set(self.epoch.get() + 1);
        if let Err(e) = self.session.teardown() {
            log::error!("Failed to clear session: {}", e);
        }
        self.update(|state| *state = CollectionState::default());
    }
}

/// Keep the first occurrence of every id
fn dedup_by_id(photos: Vec<Photo>) -> Vec<Photo> {
    let mut seen = HashSet::with_capacity(photos.len());
    let total = photos.len();
    let unique: Vec<Photo> = photos
        .into_iter()
        .filter(|p| seen.insert(p.id.clone()))
        .collect();
    if unique.len() != total {
        log::warn!(
            "Dropped {} duplicate photo ids from server response",
            total - unique.len()
        );
    }
    unique
}
