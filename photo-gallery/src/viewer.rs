use crate::models::Photo;

/// Full-screen preview state, independent of the delete selection
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum ViewerState {
    #[default]
    Closed,
    Open(Photo),
}

impl ViewerState {
    pub fn open(&mut self, photo: Photo) {
        *self = ViewerState::Open(photo);
    }

    pub fn close(&mut self) {
        *self = ViewerState::Closed;
    }

    pub fn photo(&self) -> Option<&Photo> {
        match self {
            ViewerState::Open(photo) => Some(photo),
            ViewerState::Closed => None,
        }
    }

    pub fn is_open(&self) -> bool {
        matches!(self, ViewerState::Open(_))
    }
}
