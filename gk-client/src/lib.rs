//! Composing recipe drafts and saving them to the kitchen.
//!
//! A [`DraftSession`] owns the [`Draft`] being edited. Steps, ingredients and
//! tastes are edited through the draft's collections, and
//! [`DraftSession::submit`] hosts the photo and saves the recipe through the
//! [`RecipeStore`] and [`PhotoStore`] it is handed.

pub mod collaborators;
pub mod config;
pub mod draft;
pub mod errors;
pub mod gcs;
pub mod http_store;
pub mod ingredients;
pub mod payload;
pub mod photo;
pub mod snapshot;
pub mod steps;
pub mod submit;
pub mod tastes;

pub use collaborators::{Navigator, PhotoStore, RecipeStore};
pub use draft::{CookedStatus, Draft, Eligibility, ImportedRecipe, PhotoRef};
pub use errors::{SubmitError, SubmitResult};
pub use submit::{DraftSession, SubmitContext, SubmitMode, SubmitOutcome};
