//! Virtual Wardrobe
//!
//! Places the person from a face photo into a garment and a background scene
//! through a generative image model. One session holds the user's selection
//! and drives at most one generation request at a time.

pub mod api;
pub mod backend;
pub mod config;
pub mod error;
pub mod ingest;
pub mod prompt;
pub mod response;
pub mod session;

pub use error::{AppError, Result};

use std::sync::Arc;

use session::SessionController;

/// Application state shared across all handlers
pub struct AppState {
    pub settings: Arc<config::Settings>,
    pub session: Arc<SessionController>,
}
