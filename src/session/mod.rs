//! Session state machine
//!
//! Owns the user's selection and the generation phase. Every mutation goes
//! through [`SessionController`], which is also the authoritative
//! single-flight guard: at most one gateway call is outstanding per session.

pub mod selection;

pub use selection::{SelectionState, SelectionStore};

use parking_lot::Mutex;
use serde::Serialize;
use std::sync::Arc;
use tracing::{debug, info, warn};

use crate::backend::traits::GenerationGateway;
use crate::error::{AppError, GenerationError, IngestError, Result, INCOMPLETE_STEPS_MESSAGE};
use crate::ingest::{self, ImageRecord, RawFile};
use crate::prompt::{self, BackgroundCatalog};

/// Phase of the current generation attempt
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum SessionPhase {
    Idle,
    Generating,
    Succeeded { image: String },
    Failed { reason: String },
}

struct SessionInner {
    selection: SelectionStore,
    phase: SessionPhase,
    /// Bumped by every clear; a result from an older epoch is dropped
    epoch: u64,
    /// A gateway call is outstanding, possibly from before a clear
    in_flight: bool,
}

impl SessionInner {
    fn is_pristine(&self) -> bool {
        self.selection.is_initial() && self.phase == SessionPhase::Idle
    }

    fn can_generate(&self) -> bool {
        let state = self.selection.state();
        state.face.is_some() && state.garment.is_some() && !self.in_flight
    }
}

/// Summary of an uploaded image for rendering
#[derive(Debug, Clone, Serialize)]
pub struct ImageSummary {
    pub display_name: String,
    pub media_type: String,
    pub size_bytes: usize,
    pub preview: String,
}

impl From<&ImageRecord> for ImageSummary {
    fn from(record: &ImageRecord) -> Self {
        Self {
            display_name: record.display_name().to_string(),
            media_type: record.media_type().to_string(),
            size_bytes: record.payload().len(),
            preview: record.preview().to_string(),
        }
    }
}

/// Selected background as shown to the client
#[derive(Debug, Clone, Serialize)]
pub struct BackgroundSummary {
    pub id: String,
    pub display_name: String,
}

/// Snapshot of the whole session for rendering
#[derive(Debug, Clone, Serialize)]
pub struct SessionView {
    pub face: Option<ImageSummary>,
    pub garment: Option<ImageSummary>,
    pub background: BackgroundSummary,
    pub addendum: String,
    pub posing_enabled: bool,
    pub phase: SessionPhase,
    pub can_generate: bool,
    pub can_clear: bool,
}

/// Record the outcome of a gateway call unless the session was cleared meanwhile
fn apply_result(
    shared: &Mutex<SessionInner>,
    backend: &str,
    epoch: u64,
    result: std::result::Result<String, GenerationError>,
) -> SessionPhase {
    let mut inner = shared.lock();
    inner.in_flight = false;

    if inner.epoch != epoch {
        info!("Session was cleared during generation, discarding result");
        return inner.phase.clone();
    }

    inner.phase = match result {
        Ok(image) => {
            info!(backend = %backend, "Generation succeeded");
            SessionPhase::Succeeded { image }
        }
        Err(e) => {
            warn!(backend = %backend, error = %e, "Generation failed");
            SessionPhase::Failed {
                reason: e.user_message(),
            }
        }
    };
    inner.phase.clone()
}

/// Top-level controller for one user session
pub struct SessionController {
    catalog: BackgroundCatalog,
    gateway: Arc<dyn GenerationGateway>,
    inner: Arc<Mutex<SessionInner>>,
}

impl SessionController {
    pub fn new(catalog: BackgroundCatalog, gateway: Arc<dyn GenerationGateway>) -> Self {
        let selection = SelectionStore::new(catalog.default_background().clone());

        Self {
            catalog,
            gateway,
            inner: Arc::new(Mutex::new(SessionInner {
                selection,
                phase: SessionPhase::Idle,
                epoch: 0,
                in_flight: false,
            })),
        }
    }

    pub fn catalog(&self) -> &BackgroundCatalog {
        &self.catalog
    }

    pub fn phase(&self) -> SessionPhase {
        self.inner.lock().phase.clone()
    }

    pub fn selection(&self) -> SelectionState {
        self.inner.lock().selection.state().clone()
    }

    /// Read and store the face photo. A failed read leaves the session untouched.
    pub async fn upload_face(&self, file: RawFile) -> std::result::Result<(), IngestError> {
        let record = ingest::ingest(file).await?;
        info!(name = %record.display_name(), "Face image selected");
        self.inner.lock().selection.set_face(record);
        Ok(())
    }

    /// Read and store the garment photo. A failed read leaves the session untouched.
    pub async fn upload_garment(&self, file: RawFile) -> std::result::Result<(), IngestError> {
        let record = ingest::ingest(file).await?;
        info!(name = %record.display_name(), "Garment image selected");
        self.inner.lock().selection.set_garment(record);
        Ok(())
    }

    pub fn select_background(&self, id: &str) -> Result<()> {
        let descriptor = self
            .catalog
            .get(id)
            .cloned()
            .ok_or_else(|| AppError::InvalidRequest(format!("Unknown background '{}'", id)))?;

        self.inner.lock().selection.set_background(descriptor);
        Ok(())
    }

    pub fn set_addendum(&self, text: impl Into<String>) {
        self.inner.lock().selection.set_addendum(text.into());
    }

    pub fn set_posing(&self, enabled: bool) {
        self.inner.lock().selection.set_posing(enabled);
    }

    pub fn can_generate(&self) -> bool {
        self.inner.lock().can_generate()
    }

    /// True when clearing would change nothing
    pub fn is_pristine(&self) -> bool {
        self.inner.lock().is_pristine()
    }

    /// Run one generation attempt and return the phase it left the session in.
    ///
    /// While a call is outstanding this is a no-op that returns the current
    /// phase. Missing images fail immediately without reaching the gateway.
    pub async fn generate(&self) -> SessionPhase {
        let (face, garment, prompt, epoch) = {
            let mut inner = self.inner.lock();

            if inner.in_flight {
                debug!("Generation already in flight, ignoring trigger");
                return inner.phase.clone();
            }

            let state = inner.selection.state();
            let (Some(face), Some(garment)) = (state.face.clone(), state.garment.clone()) else {
                info!("Generation requested before all inputs were provided");
                inner.phase = SessionPhase::Failed {
                    reason: INCOMPLETE_STEPS_MESSAGE.to_string(),
                };
                return inner.phase.clone();
            };
            let prompt = prompt::compose(&state.background, state.posing_enabled, &state.addendum);

            info!(
                background = %state.background.id,
                posing = state.posing_enabled,
                "Starting generation"
            );
            inner.phase = SessionPhase::Generating;
            inner.in_flight = true;
            (face, garment, prompt, inner.epoch)
        };

        // The call runs on its own task so it completes and releases the
        // in-flight flag even when the caller is dropped mid-request.
        let gateway = self.gateway.clone();
        let shared = self.inner.clone();
        let call = tokio::spawn(async move {
            let result = gateway.generate(&face, &garment, &prompt).await;
            apply_result(&shared, gateway.name(), epoch, result)
        });

        match call.await {
            Ok(phase) => phase,
            Err(e) => {
                warn!(error = %e, "Generation task did not complete");
                apply_result(
                    &self.inner,
                    self.gateway.name(),
                    epoch,
                    Err(GenerationError::ServiceError(e.to_string())),
                )
            }
        }
    }

    /// Reset the selection and return to `Idle`. Returns false when the
    /// session was already pristine and nothing changed.
    pub fn clear(&self) -> bool {
        let mut inner = self.inner.lock();
        if inner.is_pristine() {
            return false;
        }

        inner.selection.reset();
        inner.phase = SessionPhase::Idle;
        inner.epoch += 1;
        info!("Session cleared");
        true
    }

    /// The rendered result, if the last attempt succeeded
    pub fn result(&self) -> Option<String> {
        match &self.inner.lock().phase {
            SessionPhase::Succeeded { image } => Some(image.clone()),
            _ => None,
        }
    }

    pub fn view(&self) -> SessionView {
        let inner = self.inner.lock();
        let state = inner.selection.state();

        SessionView {
            face: state.face.as_ref().map(ImageSummary::from),
            garment: state.garment.as_ref().map(ImageSummary::from),
            background: BackgroundSummary {
                id: state.background.id.clone(),
                display_name: state.background.display_name.clone(),
            },
            addendum: state.addendum.clone(),
            posing_enabled: state.posing_enabled,
            phase: inner.phase.clone(),
            can_generate: inner.can_generate(),
            can_clear: !inner.is_pristine(),
        }
    }
}
