use serde::{Deserialize, Serialize};

/// The body sent to the recipe service when creating or updating a recipe.
///
/// Field names follow the service's camelCase wire format.
#[derive(Deserialize, Serialize, Clone, PartialEq, Eq, Default)]
#[serde(rename_all = "camelCase")]
pub struct RecipePayload {
    pub owner_id: String,
    pub url: String,
    pub name: String,
    /// Empty when the recipe has no photo
    pub photo_url: String,
    pub ingredients: Vec<IngredientPayload>,
    pub steps: Vec<StepPayload>,
    pub tastes: Vec<String>,
    pub has_cooked: bool,
}

impl std::fmt::Debug for RecipePayload {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RecipePayload")
            .field("owner_id", &self.owner_id)
            .field("name", &self.name)
            .field("photo_url", &self.photo_url)
            .field("ingredients", &self.ingredients.len())
            .field("steps", &self.steps.len())
            .field("tastes", &self.tastes)
            .field("has_cooked", &self.has_cooked)
            .finish()
    }
}

#[derive(Debug, Deserialize, Serialize, Clone, PartialEq, Eq, Default)]
pub struct IngredientPayload {
    pub name: String,
    #[serde(default)]
    pub count: String,
}

#[derive(Debug, Deserialize, Serialize, Clone, PartialEq, Eq, Default)]
pub struct StepPayload {
    pub text: String,
    #[serde(default)]
    pub expanded: bool,
}

/// A recipe as stored by the service, returned when loading it for editing.
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq, Eq, Default)]
#[serde(rename_all = "camelCase")]
pub struct RecipeRecord {
    pub id: String,
    #[serde(default)]
    pub owner_id: String,
    #[serde(default)]
    pub url: String,
    pub name: String,
    #[serde(default)]
    pub photo_url: String,
    #[serde(default)]
    pub ingredients: Vec<IngredientPayload>,
    #[serde(default)]
    pub steps: Vec<StepPayload>,
    #[serde(default)]
    pub tastes: Vec<String>,
    #[serde(default)]
    pub has_cooked: bool,
}

impl RecipeRecord {
    /// Attach a service-assigned id to a payload.
    pub fn from_payload(id: impl Into<String>, payload: RecipePayload) -> Self {
        Self {
            id: id.into(),
            owner_id: payload.owner_id,
            url: payload.url,
            name: payload.name,
            photo_url: payload.photo_url,
            ingredients: payload.ingredients,
            steps: payload.steps,
            tastes: payload.tastes,
            has_cooked: payload.has_cooked,
        }
    }
}

/// What the service answers after a create or update.
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq, Eq)]
pub struct RecipeId {
    pub id: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn payload_uses_camel_case_on_the_wire() {
        let payload = RecipePayload {
            owner_id: "u1".into(),
            name: "Grits".into(),
            has_cooked: true,
            ..Default::default()
        };
        let json = serde_json::to_value(&payload).unwrap();
        assert_eq!(json["ownerId"], "u1");
        assert_eq!(json["photoUrl"], "");
        assert_eq!(json["hasCooked"], true);
    }

    #[test]
    fn record_tolerates_missing_optional_fields() {
        let record: RecipeRecord =
            serde_json::from_str(r#"{"id": "r9", "name": "Biscuits"}"#).unwrap();
        assert_eq!(record.id, "r9");
        assert!(record.steps.is_empty());
        assert!(!record.has_cooked);
    }
}
