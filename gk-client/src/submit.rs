use std::ops::{Deref, DerefMut};

use chrono::{DateTime, Utc};
use gk::basic_models::{RecipePayload, RecipeRecord};

use crate::collaborators::{Navigator, PhotoStore, RecipeStore, StayPut};
use crate::config::StorageConfig;
use crate::draft::{CookedStatus, Draft, PhotoRef};
use crate::errors::{SubmitError, SubmitResult};
use crate::payload::build_payload;
use crate::snapshot::OriginalSnapshot;

pub const DEFAULT_PHOTO_CATEGORY: &str = "cooked";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SubmitMode {
    Create,
    Update,
}

/// Everything a submission talks to, passed in explicitly.
pub struct SubmitContext<'a> {
    pub owner_id: &'a str,
    pub recipes: &'a dyn RecipeStore,
    pub photos: &'a dyn PhotoStore,
    pub navigator: &'a dyn Navigator,
    pub photo_category: &'a str,
}

impl<'a> SubmitContext<'a> {
    pub fn new(
        owner_id: &'a str,
        recipes: &'a dyn RecipeStore,
        photos: &'a dyn PhotoStore,
    ) -> Self {
        Self {
            owner_id,
            recipes,
            photos,
            navigator: &StayPut,
            photo_category: DEFAULT_PHOTO_CATEGORY,
        }
    }

    pub fn with_navigator(mut self, navigator: &'a dyn Navigator) -> Self {
        self.navigator = navigator;
        self
    }

    pub fn with_photo_category(mut self, category: &'a str) -> Self {
        self.photo_category = category;
        self
    }

    /// File uploads under the category configured for the bucket.
    pub fn with_storage(self, storage: &'a StorageConfig) -> Self {
        self.with_photo_category(&storage.category)
    }
}

#[derive(Debug, Clone)]
pub struct SubmitOutcome {
    pub recipe_id: String,
    pub mode: SubmitMode,
    pub payload: RecipePayload,
    pub submitted_at: DateTime<Utc>,
}

enum Mode {
    Create,
    Edit {
        original: OriginalSnapshot,
        /// Hosted photo of the last saved version, the one to clean up when replaced.
        saved_photo_url: Option<String>,
        /// Hosted photos this session has removed. None of them may be saved again.
        deleted_photos: Vec<String>,
    },
}

/// Holds the session while a submission is outstanding and releases it on drop.
struct InFlight<'s>(&'s mut DraftSession);

impl<'s> InFlight<'s> {
    fn enter(session: &'s mut DraftSession) -> SubmitResult<Self> {
        if session.submitting {
            tracing::warn!("Rejecting request while a submission is outstanding");
            return Err(SubmitError::AlreadySubmitting);
        }
        session.submitting = true;
        Ok(Self(session))
    }
}

impl Deref for InFlight<'_> {
    type Target = DraftSession;

    fn deref(&self) -> &DraftSession {
        self.0
    }
}

impl DerefMut for InFlight<'_> {
    fn deref_mut(&mut self) -> &mut DraftSession {
        self.0
    }
}

impl Drop for InFlight<'_> {
    fn drop(&mut self) {
        self.0.submitting = false;
    }
}

struct ResolvedPhoto {
    url: Option<String>,
    freshly_uploaded: bool,
}

/// A draft together with how it will be saved: as a new recipe or over an existing one.
pub struct DraftSession {
    pub draft: Draft,
    mode: Mode,
    submitting: bool,
}

impl DraftSession {
    /// Start composing a brand-new recipe.
    pub fn new_create() -> Self {
        Self {
            draft: Draft::new(),
            mode: Mode::Create,
            submitting: false,
        }
    }

    /// Start editing a recipe that is already at hand.
    pub fn from_record(record: &RecipeRecord) -> Self {
        let original = OriginalSnapshot::take(record);
        Self {
            draft: Draft::from_record(record),
            mode: Mode::Edit {
                saved_photo_url: original.photo_url().map(str::to_owned),
                deleted_photos: vec![],
                original,
            },
            submitting: false,
        }
    }

    /// Fetch a saved recipe and start editing it.
    pub async fn load_for_edit(recipes: &dyn RecipeStore, id: &str) -> SubmitResult<Self> {
        tracing::info!("Loading recipe {} for editing", id);
        let record = recipes
            .load_recipe(id)
            .await
            .map_err(SubmitError::LoadFailed)?;
        Ok(Self::from_record(&record))
    }

    pub fn mode(&self) -> SubmitMode {
        match self.mode {
            Mode::Create => SubmitMode::Create,
            Mode::Edit { .. } => SubmitMode::Update,
        }
    }

    pub fn original(&self) -> Option<&OriginalSnapshot> {
        match &self.mode {
            Mode::Create => None,
            Mode::Edit { original, .. } => Some(original),
        }
    }

    pub fn is_submitting(&self) -> bool {
        self.submitting
    }

    /// Whether the submit action should be enabled right now.
    pub fn can_submit(&self) -> bool {
        !self.is_submitting() && self.draft.can_submit()
    }

    /// Throw away every change and go back to the recipe as it was loaded.
    ///
    /// If the loaded photo has since been replaced and removed from hosting,
    /// the draft comes back without a photo and a new one has to be picked.
    pub fn revert(&mut self) -> SubmitResult<()> {
        let Mode::Edit {
            original,
            deleted_photos,
            ..
        } = &self.mode
        else {
            return Err(SubmitError::NotEditing);
        };
        tracing::info!("Reverting recipe {}", original.recipe_id());
        original.revert(&mut self.draft);
        let photo_is_gone = self
            .draft
            .photo()
            .and_then(PhotoRef::remote_url)
            .is_some_and(|url| deleted_photos.iter().any(|gone| gone == url));
        if photo_is_gone {
            tracing::info!("Loaded photo was already removed, clearing it");
            self.draft.set_photo(None);
        }
        Ok(())
    }

    /// Save the draft.
    ///
    /// Nothing is sent unless the photo, if any, is hosted first. Any failure
    /// leaves the draft as it was so the user can try again.
    pub async fn submit(&mut self, ctx: &SubmitContext<'_>) -> SubmitResult<SubmitOutcome> {
        let mut session = InFlight::enter(self)?;
        let outcome = session.run_submit(ctx).await?;
        Ok(outcome)
    }

    /// Delete the recipe being edited, along with its hosted photo.
    pub async fn delete(&mut self, ctx: &SubmitContext<'_>) -> SubmitResult<()> {
        let mut session = InFlight::enter(self)?;
        session.run_delete(ctx).await?;
        Ok(())
    }

    async fn run_submit(&mut self, ctx: &SubmitContext<'_>) -> SubmitResult<SubmitOutcome> {
        self.draft.flush();
        if !self.draft.can_submit() {
            return Err(SubmitError::Incomplete);
        }

        let photo = self.resolve_photo(ctx).await?;
        let payload = build_payload(&self.draft, ctx.owner_id, photo.url.as_deref());

        let saved = match &self.mode {
            Mode::Create => {
                tracing::info!("Creating recipe {:?}", payload.name);
                ctx.recipes.create_recipe(&payload).await
            }
            Mode::Edit { original, .. } => {
                tracing::info!("Updating recipe {}", original.recipe_id());
                ctx.recipes
                    .update_recipe(original.recipe_id(), &payload)
                    .await
            }
        };
        let saved = match saved {
            Ok(saved) => saved,
            Err(e) => {
                tracing::warn!("Saving recipe failed: {:#}", e);
                if photo.freshly_uploaded {
                    // Nothing refers to the new upload
                    discard_photo(ctx.photos, &payload.photo_url).await;
                }
                return Err(SubmitError::MutationFailed(e));
            }
        };

        let outcome = SubmitOutcome {
            recipe_id: saved.id,
            mode: self.mode(),
            payload,
            submitted_at: Utc::now(),
        };
        match &mut self.mode {
            Mode::Create => self.draft.clear(),
            Mode::Edit {
                saved_photo_url,
                deleted_photos,
                ..
            } => {
                if let Some(stale) = saved_photo_url.take() {
                    if stale != outcome.payload.photo_url {
                        discard_photo(ctx.photos, &stale).await;
                        deleted_photos.push(stale);
                    }
                }
                *saved_photo_url =
                    Some(outcome.payload.photo_url.clone()).filter(|url| !url.is_empty());
                self.draft.settle_saved(&outcome.payload);
            }
        }
        tracing::info!("Recipe {} saved", outcome.recipe_id);
        ctx.navigator.submission_completed(&outcome);
        Ok(outcome)
    }

    async fn run_delete(&mut self, ctx: &SubmitContext<'_>) -> SubmitResult<()> {
        let Mode::Edit {
            original,
            saved_photo_url,
            ..
        } = &self.mode
        else {
            return Err(SubmitError::NotEditing);
        };
        let id = original.recipe_id().to_string();
        tracing::info!("Deleting recipe {}", id);
        ctx.recipes
            .delete_recipe(&id)
            .await
            .map_err(SubmitError::MutationFailed)?;
        if let Some(url) = saved_photo_url {
            discard_photo(ctx.photos, url).await;
        }
        self.draft.clear();
        ctx.navigator.recipe_deleted(&id);
        Ok(())
    }

    async fn resolve_photo(&self, ctx: &SubmitContext<'_>) -> SubmitResult<ResolvedPhoto> {
        let none = ResolvedPhoto {
            url: None,
            freshly_uploaded: false,
        };
        if self.draft.cooked_status() != CookedStatus::Yes {
            return Ok(none);
        }
        match self.draft.photo() {
            None => Ok(none),
            Some(PhotoRef::Remote(url)) => {
                tracing::debug!("Reusing hosted photo {}", url);
                Ok(ResolvedPhoto {
                    url: Some(url.clone()),
                    freshly_uploaded: false,
                })
            }
            Some(PhotoRef::Local(path)) => {
                tracing::info!("Uploading photo {}", path.display());
                let url = ctx
                    .photos
                    .upload_photo(path, ctx.owner_id, ctx.photo_category)
                    .await
                    .map_err(|e| {
                        tracing::warn!("Photo upload failed: {:#}", e);
                        SubmitError::UploadFailed(e)
                    })?;
                Ok(ResolvedPhoto {
                    url: Some(url),
                    freshly_uploaded: true,
                })
            }
        }
    }
}

/// Best-effort removal of a hosted photo. Failures are only logged.
async fn discard_photo(photos: &dyn PhotoStore, url: &str) {
    if let Err(source) = photos.delete_photo(url).await {
        let err = SubmitError::CleanupFailed {
            url: url.to_string(),
            source,
        };
        tracing::warn!("{}", err);
    }
}
