use gk::basic_models::RecipeRecord;

use crate::draft::Draft;

/// The recipe exactly as it was loaded for editing.
///
/// Holds its own copy of the record, so nothing done to the live draft can reach it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OriginalSnapshot {
    record: RecipeRecord,
}

impl OriginalSnapshot {
    pub fn take(record: &RecipeRecord) -> Self {
        Self {
            record: record.clone(),
        }
    }

    pub fn recipe_id(&self) -> &str {
        &self.record.id
    }

    /// The hosted photo at load time, if there was one.
    pub fn photo_url(&self) -> Option<&str> {
        (!self.record.photo_url.is_empty()).then_some(self.record.photo_url.as_str())
    }

    pub fn record(&self) -> &RecipeRecord {
        &self.record
    }

    /// Overwrite every field of `draft` with the loaded values. Steps get fresh ids.
    pub fn revert(&self, draft: &mut Draft) {
        *draft = Draft::from_record(&self.record);
    }
}
