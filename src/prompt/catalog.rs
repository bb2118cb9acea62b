//! Background scene catalog

use serde::{Deserialize, Serialize};
use std::collections::HashSet;

use crate::error::{AppError, Result};

/// One selectable background scene
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BackgroundDescriptor {
    pub id: String,
    pub display_name: String,
    /// Sentence sent verbatim to the model
    pub scene_text: String,
}

impl BackgroundDescriptor {
    pub fn new(id: &str, display_name: &str, scene_text: &str) -> Self {
        Self {
            id: id.to_string(),
            display_name: display_name.to_string(),
            scene_text: scene_text.to_string(),
        }
    }
}

/// Ordered, read-only list of scenes. The first entry is the default selection.
#[derive(Debug, Clone)]
pub struct BackgroundCatalog {
    entries: Vec<BackgroundDescriptor>,
}

impl BackgroundCatalog {
    /// Build a catalog, rejecting empty lists and empty or duplicate ids
    pub fn new(entries: Vec<BackgroundDescriptor>) -> Result<Self> {
        if entries.is_empty() {
            return Err(AppError::InvalidRequest(
                "Background catalog cannot be empty".to_string(),
            ));
        }

        let mut seen = HashSet::new();
        for entry in &entries {
            if entry.id.is_empty() {
                return Err(AppError::InvalidRequest(
                    "Background id cannot be empty".to_string(),
                ));
            }
            if !seen.insert(entry.id.as_str()) {
                return Err(AppError::InvalidRequest(format!(
                    "Duplicate background id '{}'",
                    entry.id
                )));
            }
        }

        Ok(Self { entries })
    }

    /// The scenes shipped with the application
    pub fn builtin() -> Self {
        Self {
            entries: vec![
                BackgroundDescriptor::new(
                    "beach",
                    "Tropical beach",
                    "A person standing on a beautiful tropical beach with white sand, turquoise water, and palm trees under a clear blue sky.",
                ),
                BackgroundDescriptor::new(
                    "city",
                    "City at night",
                    "A person in a bustling big city at night, with brightly lit skyscrapers, neon signs, and light trails from traffic.",
                ),
                BackgroundDescriptor::new(
                    "forest",
                    "Enchanted forest",
                    "A person standing in a serene, enchanted forest with tall ancient trees, sunlight filtering through the canopy, and a mossy ground.",
                ),
                BackgroundDescriptor::new(
                    "mountains",
                    "Snowy mountains",
                    "A person on a majestic snowy mountain peak, with a panoramic view of other mountains and a clear sky.",
                ),
                BackgroundDescriptor::new(
                    "cafe",
                    "Modern cafe",
                    "A person inside a stylish, modern coffee shop with warm lighting, comfortable seating, and a cozy artistic atmosphere.",
                ),
                BackgroundDescriptor::new(
                    "studio",
                    "Studio backdrop",
                    "A person in a professional studio setting with a clean, solid-colored background, emphasizing the subject and their outfit with studio lighting.",
                ),
            ],
        }
    }

    pub fn default_background(&self) -> &BackgroundDescriptor {
        &self.entries[0]
    }

    pub fn get(&self, id: &str) -> Option<&BackgroundDescriptor> {
        self.entries.iter().find(|b| b.id == id)
    }

    pub fn entries(&self) -> &[BackgroundDescriptor] {
        &self.entries
    }
}

impl Default for BackgroundCatalog {
    fn default() -> Self {
        Self::builtin()
    }
}
