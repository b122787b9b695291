use std::path::PathBuf;

use gk::basic_models::{RecipePayload, RecipeRecord};

use crate::ingredients::{Ingredient, IngredientList};
use crate::steps::StepList;
use crate::tastes::{Taste, TasteSet};

/// Whether the recipe has been cooked. `No` marks a draft that must not carry a photo or tastes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CookedStatus {
    #[default]
    Unset,
    Yes,
    No,
}

impl CookedStatus {
    /// The one rule deciding whether photo and taste evidence may be kept.
    pub fn allows_evidence(self) -> bool {
        self != CookedStatus::No
    }

    pub fn from_flag(has_cooked: bool) -> Self {
        if has_cooked {
            CookedStatus::Yes
        } else {
            CookedStatus::No
        }
    }
}

/// A photo is either a file on this device waiting for upload or an already hosted URL.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PhotoRef {
    Local(PathBuf),
    Remote(String),
}

impl PhotoRef {
    pub fn remote_url(&self) -> Option<&str> {
        match self {
            PhotoRef::Remote(url) => Some(url),
            PhotoRef::Local(_) => None,
        }
    }
}

/// The predicates behind [`Draft::can_submit`], for telling the user what is missing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Eligibility {
    pub has_title: bool,
    pub has_ingredient: bool,
    pub has_step: bool,
    pub has_cooked_requirement: bool,
}

impl Eligibility {
    pub fn is_ready(&self) -> bool {
        self.has_title && self.has_ingredient && self.has_step && self.has_cooked_requirement
    }
}

/// A recipe fetched from some other source, used to prefill a draft.
#[derive(Debug, Clone, Default)]
pub struct ImportedRecipe {
    pub title: String,
    pub url: String,
    pub ingredients: Vec<Ingredient>,
    pub steps: Vec<String>,
}

#[derive(Debug, Clone, Default)]
pub struct Draft {
    pub title: String,
    pub source_link: String,
    pub ingredients: IngredientList,
    pub steps: StepList,
    cooked: CookedStatus,
    photo: Option<PhotoRef>,
    tastes: TasteSet,
}

impl Draft {
    pub fn new() -> Self {
        Self::default()
    }

    /// Rebuild a draft from a stored recipe. Steps are imported with fresh ids.
    ///
    /// A record marked as not cooked comes in without photo or tastes, whatever it stored.
    pub fn from_record(record: &RecipeRecord) -> Self {
        let mut steps = StepList::new();
        steps.bulk_import(
            &record
                .steps
                .iter()
                .map(|step| step.text.as_str())
                .collect::<Vec<_>>(),
        );
        let mut ingredients = IngredientList::new();
        ingredients.replace(record.ingredients.iter().map(Ingredient::from).collect());
        let photo = (!record.photo_url.is_empty())
            .then(|| PhotoRef::Remote(record.photo_url.clone()));
        let mut draft = Self {
            title: record.name.clone(),
            source_link: record.url.clone(),
            ingredients,
            steps,
            cooked: CookedStatus::Unset,
            photo,
            tastes: TasteSet::from_names(&record.tastes),
        };
        draft.set_cooked_status(CookedStatus::from_flag(record.has_cooked));
        draft
    }

    /// Line the draft up with a payload that was just saved from it.
    ///
    /// Text is trimmed and blank entries dropped as they were on the wire, and
    /// the photo becomes the hosted URL. Steps keep their ids and expanded
    /// state, so edits held against them stay valid.
    pub fn settle_saved(&mut self, saved: &RecipePayload) {
        self.title = saved.name.clone();
        self.source_link = saved.url.clone();
        self.ingredients.normalize();
        self.steps.normalize();
        self.photo = (!saved.photo_url.is_empty())
            .then(|| PhotoRef::Remote(saved.photo_url.clone()));
        self.set_cooked_status(CookedStatus::from_flag(saved.has_cooked));
    }

    pub fn cooked_status(&self) -> CookedStatus {
        self.cooked
    }

    /// Change the cooked status. Entering `No` drops the photo and tastes.
    pub fn set_cooked_status(&mut self, status: CookedStatus) {
        self.cooked = status;
        if !status.allows_evidence() {
            self.photo = None;
            self.tastes.clear();
        }
    }

    pub fn photo(&self) -> Option<&PhotoRef> {
        self.photo.as_ref()
    }

    pub fn set_photo(&mut self, photo: Option<PhotoRef>) {
        self.photo = photo;
    }

    pub fn tastes(&self) -> &TasteSet {
        &self.tastes
    }

    pub fn toggle_taste(&mut self, taste: Taste) -> bool {
        self.tastes.toggle(taste)
    }

    pub fn eligibility(&self) -> Eligibility {
        Eligibility {
            has_title: !self.title.trim().is_empty(),
            has_ingredient: self.ingredients.has_content(),
            has_step: self.steps.has_content(),
            has_cooked_requirement: match self.cooked {
                CookedStatus::Yes => self.photo.is_some() && !self.tastes.is_empty(),
                CookedStatus::No => true,
                CookedStatus::Unset => false,
            },
        }
    }

    /// Recomputed from scratch on every call; nothing is remembered between calls.
    pub fn can_submit(&self) -> bool {
        self.eligibility().is_ready()
    }

    /// Push pending step edits into the canonical list.
    pub fn flush(&mut self) {
        self.steps.flush_all();
    }

    /// Reset every field for a fresh start.
    pub fn clear(&mut self) {
        self.title.clear();
        self.source_link.clear();
        self.ingredients.clear();
        self.steps.clear();
        self.cooked = CookedStatus::Unset;
        self.photo = None;
        self.tastes.clear();
    }

    /// Prefill from an imported recipe. Blank imported fields leave the draft's own values alone.
    pub fn apply_import(&mut self, import: ImportedRecipe) {
        if !import.title.trim().is_empty() {
            self.title = import.title;
        }
        if !import.url.trim().is_empty() {
            self.source_link = import.url;
        }
        if !import.ingredients.is_empty() {
            self.ingredients.replace(import.ingredients);
        }
        if !import.steps.is_empty() {
            self.steps.bulk_import(&import.steps);
        }
    }
}
