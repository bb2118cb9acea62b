//! Common trait for image generation backends

use async_trait::async_trait;

use crate::error::GenerationError;
use crate::ingest::ImageRecord;

/// Single-request gateway to an external image generation service
#[async_trait]
pub trait GenerationGateway: Send + Sync {
    /// Get the backend name
    fn name(&self) -> &str;

    /// Get the model identifier requests are sent to
    fn model(&self) -> &str;

    /// Issue exactly one generation request and return the result as a data URI.
    ///
    /// The face image is sent first and the garment second; the prompt refers
    /// to them in that order. No retry, no caching.
    async fn generate(
        &self,
        face: &ImageRecord,
        garment: &ImageRecord,
        prompt: &str,
    ) -> Result<String, GenerationError>;
}
