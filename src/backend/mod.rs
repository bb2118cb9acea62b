//! Backend module - generation gateway trait and the Gemini client

pub mod gemini;
pub mod traits;

pub use gemini::GeminiBackend;
pub use traits::GenerationGateway;
