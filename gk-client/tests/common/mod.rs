#![allow(dead_code)]

use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Mutex;

use anyhow::{bail, Result};
use async_trait::async_trait;
use gk::basic_models::{IngredientPayload, RecipeId, RecipePayload, RecipeRecord, StepPayload};
use gk_client::{Navigator, PhotoStore, RecipeStore, SubmitOutcome};

pub fn init_tracing() {
    let _ = tracing_subscriber::fmt().with_test_writer().try_init();
}

/// Recipe service kept in memory, recording every call.
#[derive(Default)]
pub struct FakeRecipes {
    pub records: Mutex<HashMap<String, RecipeRecord>>,
    pub created: Mutex<Vec<RecipePayload>>,
    pub updated: Mutex<Vec<(String, RecipePayload)>>,
    pub deleted: Mutex<Vec<String>>,
    pub fail_mutations: AtomicBool,
}

impl FakeRecipes {
    pub fn with_record(record: RecipeRecord) -> Self {
        let me = Self::default();
        me.records
            .lock()
            .unwrap()
            .insert(record.id.clone(), record);
        me
    }

    pub fn mutation_count(&self) -> usize {
        self.created.lock().unwrap().len() + self.updated.lock().unwrap().len()
    }

    fn check_failure(&self) -> Result<()> {
        if self.fail_mutations.load(Ordering::SeqCst) {
            bail!("service unavailable");
        }
        Ok(())
    }
}

#[async_trait]
impl RecipeStore for FakeRecipes {
    async fn create_recipe(&self, payload: &RecipePayload) -> Result<RecipeId> {
        self.check_failure()?;
        let mut created = self.created.lock().unwrap();
        created.push(payload.clone());
        let id = format!("new-{}", created.len());
        self.records
            .lock()
            .unwrap()
            .insert(id.clone(), RecipeRecord::from_payload(id.clone(), payload.clone()));
        Ok(RecipeId { id })
    }

    async fn update_recipe(&self, id: &str, payload: &RecipePayload) -> Result<RecipeId> {
        self.check_failure()?;
        self.updated
            .lock()
            .unwrap()
            .push((id.to_string(), payload.clone()));
        self.records
            .lock()
            .unwrap()
            .insert(id.to_string(), RecipeRecord::from_payload(id, payload.clone()));
        Ok(RecipeId { id: id.to_string() })
    }

    async fn delete_recipe(&self, id: &str) -> Result<()> {
        self.check_failure()?;
        self.deleted.lock().unwrap().push(id.to_string());
        self.records.lock().unwrap().remove(id);
        Ok(())
    }

    async fn load_recipe(&self, id: &str) -> Result<RecipeRecord> {
        match self.records.lock().unwrap().get(id) {
            Some(record) => Ok(record.clone()),
            None => bail!("no recipe {}", id),
        }
    }
}

/// Photo host kept in memory, recording every call.
#[derive(Default)]
pub struct FakePhotos {
    pub uploads: Mutex<Vec<PathBuf>>,
    pub deletes: Mutex<Vec<String>>,
    pub fail_uploads: AtomicBool,
    pub fail_deletes: AtomicBool,
}

impl FakePhotos {
    pub fn upload_count(&self) -> usize {
        self.uploads.lock().unwrap().len()
    }

    pub fn deleted(&self) -> Vec<String> {
        self.deletes.lock().unwrap().clone()
    }
}

#[async_trait]
impl PhotoStore for FakePhotos {
    async fn upload_photo(&self, local: &Path, owner_id: &str, category: &str) -> Result<String> {
        if self.fail_uploads.load(Ordering::SeqCst) {
            bail!("bucket unreachable");
        }
        let mut uploads = self.uploads.lock().unwrap();
        uploads.push(local.to_path_buf());
        Ok(format!(
            "https://cdn.test/{}/{}/{}.webp",
            category,
            owner_id,
            uploads.len()
        ))
    }

    async fn delete_photo(&self, url: &str) -> Result<()> {
        self.deletes.lock().unwrap().push(url.to_string());
        if self.fail_deletes.load(Ordering::SeqCst) {
            bail!("permission denied");
        }
        Ok(())
    }
}

#[derive(Default)]
pub struct RecordingNavigator {
    pub completed: Mutex<Vec<SubmitOutcome>>,
    pub deleted: Mutex<Vec<String>>,
}

impl Navigator for RecordingNavigator {
    fn submission_completed(&self, outcome: &SubmitOutcome) {
        self.completed.lock().unwrap().push(outcome.clone());
    }

    fn recipe_deleted(&self, id: &str) {
        self.deleted.lock().unwrap().push(id.to_string());
    }
}

pub const ORIGINAL_PHOTO: &str = "https://cdn.test/cooked/u1/original.webp";

pub fn saved_record() -> RecipeRecord {
    RecipeRecord {
        id: "r1".into(),
        owner_id: "u1".into(),
        url: "https://example.com/she-crab-soup".into(),
        name: "She-crab soup".into(),
        photo_url: ORIGINAL_PHOTO.into(),
        ingredients: vec![
            IngredientPayload {
                name: "Crab meat".into(),
                count: "1 lb".into(),
            },
            IngredientPayload {
                name: "Sherry".into(),
                count: "2 tbsp".into(),
            },
        ],
        steps: vec![
            StepPayload {
                text: "Make a roux".into(),
                expanded: false,
            },
            StepPayload {
                text: "Add crab".into(),
                expanded: false,
            },
        ],
        tastes: vec!["Salty".into(), "Umami".into()],
        has_cooked: true,
    }
}
