use anyhow::{bail, Context, Result};
use async_trait::async_trait;
use gk::basic_models::{RecipeId, RecipePayload, RecipeRecord};
use tokio_retry::strategy::{jitter, ExponentialBackoff};
use tokio_retry::Retry;

use crate::collaborators::RecipeStore;
use crate::config::StoreConfig;

/// The recipe service, reached over HTTP with a bearer secret.
#[derive(Clone)]
pub struct HttpRecipeStore {
    client: reqwest::Client,
    server: String,
    secret: String,
}

impl HttpRecipeStore {
    pub fn new(server: impl Into<String>, secret: impl Into<String>) -> Self {
        Self {
            client: reqwest::Client::new(),
            server: server.into().trim_end_matches('/').to_string(),
            secret: secret.into(),
        }
    }

    /// Build from config, taking the secret from `PRINCIPAL_SECRET`.
    pub fn from_config(config: &StoreConfig) -> Result<Self> {
        let secret = dotenvy::var("PRINCIPAL_SECRET").context("PRINCIPAL_SECRET is not set")?;
        Ok(Self::new(config.server.clone(), secret))
    }

    fn recipe_url(&self, id: Option<&str>) -> String {
        match id {
            Some(id) => format!("{}/api/recipe/{}", self.server, id),
            None => format!("{}/api/recipe", self.server),
        }
    }

    /// Three attempts with jittered exponential backoff, for idempotent calls only.
    fn retry_strategy() -> impl Iterator<Item = std::time::Duration> {
        ExponentialBackoff::from_millis(10)
            .factor(10)
            .map(jitter)
            .take(2)
    }

    async fn check(resp: reqwest::Response, what: &str) -> Result<reqwest::Response> {
        let status = resp.status();
        if status.is_success() {
            return Ok(resp);
        }
        let body = resp.text().await.unwrap_or_default();
        bail!("Failed to {}. Status: {}. Response: {}", what, status, body)
    }

    async fn fetch_record(&self, id: &str) -> Result<RecipeRecord> {
        let resp = self
            .client
            .get(self.recipe_url(Some(id)))
            .bearer_auth(&self.secret)
            .send()
            .await?;
        Ok(Self::check(resp, "load recipe").await?.json().await?)
    }

    async fn send_delete(&self, id: &str) -> Result<()> {
        let resp = self
            .client
            .delete(self.recipe_url(Some(id)))
            .bearer_auth(&self.secret)
            .send()
            .await?;
        Self::check(resp, "delete recipe").await?;
        Ok(())
    }
}

#[async_trait]
impl RecipeStore for HttpRecipeStore {
    async fn create_recipe(&self, payload: &RecipePayload) -> Result<RecipeId> {
        let resp = self
            .client
            .post(self.recipe_url(None))
            .bearer_auth(&self.secret)
            .json(payload)
            .send()
            .await?;
        let id: RecipeId = Self::check(resp, "create recipe").await?.json().await?;
        tracing::info!("Recipe created as {}", id.id);
        Ok(id)
    }

    async fn update_recipe(&self, id: &str, payload: &RecipePayload) -> Result<RecipeId> {
        let resp = self
            .client
            .put(self.recipe_url(Some(id)))
            .bearer_auth(&self.secret)
            .json(payload)
            .send()
            .await?;
        Ok(Self::check(resp, "update recipe").await?.json().await?)
    }

    async fn delete_recipe(&self, id: &str) -> Result<()> {
        Retry::spawn(Self::retry_strategy(), || self.send_delete(id))
            .await
            .with_context(|| format!("Deleting recipe {}", id))
    }

    async fn load_recipe(&self, id: &str) -> Result<RecipeRecord> {
        Retry::spawn(Self::retry_strategy(), || self.fetch_record(id))
            .await
            .with_context(|| format!("Loading recipe {}", id))
    }
}
