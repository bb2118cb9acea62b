//! User selections that feed a generation request

use crate::ingest::ImageRecord;
use crate::prompt::BackgroundDescriptor;

/// Current value of every user-controlled input
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SelectionState {
    pub face: Option<ImageRecord>,
    pub garment: Option<ImageRecord>,
    pub background: BackgroundDescriptor,
    pub addendum: String,
    pub posing_enabled: bool,
}

impl SelectionState {
    /// Initial selection for a catalog default
    pub fn initial(default_background: BackgroundDescriptor) -> Self {
        Self {
            face: None,
            garment: None,
            background: default_background,
            addendum: String::new(),
            posing_enabled: false,
        }
    }
}

/// Holder of the selection. Every setter replaces its field wholesale.
#[derive(Debug, Clone)]
pub struct SelectionStore {
    default_background: BackgroundDescriptor,
    state: SelectionState,
}

impl SelectionStore {
    pub fn new(default_background: BackgroundDescriptor) -> Self {
        Self {
            state: SelectionState::initial(default_background.clone()),
            default_background,
        }
    }

    pub fn state(&self) -> &SelectionState {
        &self.state
    }

    pub fn set_face(&mut self, record: ImageRecord) {
        self.state.face = Some(record);
    }

    pub fn set_garment(&mut self, record: ImageRecord) {
        self.state.garment = Some(record);
    }

    pub fn set_background(&mut self, descriptor: BackgroundDescriptor) {
        self.state.background = descriptor;
    }

    pub fn set_addendum(&mut self, text: String) {
        self.state.addendum = text;
    }

    pub fn set_posing(&mut self, enabled: bool) {
        self.state.posing_enabled = enabled;
    }

    pub fn reset(&mut self) {
        self.state = SelectionState::initial(self.default_background.clone());
    }

    /// True when nothing differs from the initial selection
    pub fn is_initial(&self) -> bool {
        self.state.face.is_none()
            && self.state.garment.is_none()
            && self.state.background.id == self.default_background.id
            && self.state.addendum.is_empty()
            && !self.state.posing_enabled
    }
}
