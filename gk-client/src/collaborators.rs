use std::path::Path;

use anyhow::Result;
use async_trait::async_trait;
use gk::basic_models::{RecipeId, RecipePayload, RecipeRecord};

/// Remote persistence of recipes.
#[async_trait]
pub trait RecipeStore: Send + Sync {
    async fn create_recipe(&self, payload: &RecipePayload) -> Result<RecipeId>;
    async fn update_recipe(&self, id: &str, payload: &RecipePayload) -> Result<RecipeId>;
    async fn delete_recipe(&self, id: &str) -> Result<()>;
    async fn load_recipe(&self, id: &str) -> Result<RecipeRecord>;
}

/// Hosting for photo blobs.
#[async_trait]
pub trait PhotoStore: Send + Sync {
    /// Upload a local photo and return its hosted URL.
    async fn upload_photo(&self, local: &Path, owner_id: &str, category: &str) -> Result<String>;
    async fn delete_photo(&self, url: &str) -> Result<()>;
}

/// Told when a submission or deletion has finished, so the surrounding screens can move on.
pub trait Navigator: Send + Sync {
    fn submission_completed(&self, outcome: &crate::submit::SubmitOutcome);

    fn recipe_deleted(&self, _id: &str) {}
}

/// A navigator for callers that don't need to be told.
pub struct StayPut;

impl Navigator for StayPut {
    fn submission_completed(&self, _outcome: &crate::submit::SubmitOutcome) {}
}
