//! Prompt composition for the try-on model
//!
//! The composed text is sent verbatim to the model, so clause order and
//! wording are stable.

pub mod catalog;

pub use catalog::{BackgroundCatalog, BackgroundDescriptor};

/// Task statement, always first
pub const TASK_CLAUSE: &str = "Create a photorealistic image of the person from the first image wearing the outfit from the second image. The final image should be seamless, with realistic lighting, shadows, and proportions, matching the atmosphere of the background scene. Focus on making the person look natural in the new environment.";

/// Pose clause used when posing is enabled
pub const POSING_CLAUSE: &str = "The person should be striking a dynamic, confident, and fashionable pose like a professional model, suitable for a high-fashion photoshoot.";

/// Pose clause used when posing is disabled
pub const RELAXED_CLAUSE: &str = "The person should have a natural and relaxed posture.";

/// Combine the scene, pose flag and user addendum into one instruction string
pub fn compose(background: &BackgroundDescriptor, posing_enabled: bool, addendum: &str) -> String {
    let mut scene = format!(
        "The person should be placed in this scene: {}",
        background.scene_text
    );
    if !scene.ends_with(['.', '!', '?']) {
        scene.push('.');
    }

    let pose = if posing_enabled {
        POSING_CLAUSE
    } else {
        RELAXED_CLAUSE
    };

    let mut clauses = vec![TASK_CLAUSE.to_string(), scene, pose.to_string()];
    if !addendum.is_empty() {
        clauses.push(format!("Additional user instructions: \"{}\".", addendum));
    }

    clauses.join(" ")
}
