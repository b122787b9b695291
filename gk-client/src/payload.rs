use gk::basic_models::{IngredientPayload, RecipePayload, StepPayload};

use crate::draft::{CookedStatus, Draft};

/// Build the wire payload from a flushed draft.
///
/// `photo_url` is the hosted URL resolved for this submission, if any. When the
/// draft is marked as not cooked, photo and tastes are dropped no matter what
/// the draft still holds.
pub fn build_payload(draft: &Draft, owner_id: &str, photo_url: Option<&str>) -> RecipePayload {
    let keeps_evidence = draft.cooked_status().allows_evidence();
    let ingredients = draft
        .ingredients
        .items()
        .iter()
        .filter(|item| !item.name.trim().is_empty())
        .map(|item| IngredientPayload {
            name: item.name.trim().to_string(),
            count: item.count.trim().to_string(),
        })
        .collect();
    // The service never stores expand state
    let steps = draft
        .steps
        .items()
        .iter()
        .filter(|item| !item.text.trim().is_empty())
        .map(|item| StepPayload {
            text: item.text.trim().to_string(),
            expanded: false,
        })
        .collect();
    RecipePayload {
        owner_id: owner_id.to_string(),
        url: draft.source_link.trim().to_string(),
        name: draft.title.trim().to_string(),
        photo_url: match photo_url {
            Some(url) if keeps_evidence => url.to_string(),
            _ => String::new(),
        },
        ingredients,
        steps,
        tastes: if keeps_evidence {
            draft.tastes().to_names()
        } else {
            vec![]
        },
        has_cooked: draft.cooked_status() == CookedStatus::Yes,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::draft::PhotoRef;
    use crate::ingredients::IngredientField;
    use crate::tastes::Taste;

    #[test]
    fn trims_and_filters_blank_entries() {
        let mut draft = Draft::new();
        draft.title = "  Hoppin' John ".into();
        draft.source_link = " https://example.com/hj ".into();
        draft.ingredients.add(" Black-eyed peas ", " 1 lb ");
        draft.ingredients.add("Rice", "");
        draft.ingredients.update(1, IngredientField::Name, "  ");
        let first = draft.steps.add(" Soak peas ").unwrap();
        let second = draft.steps.add("Cook").unwrap();
        draft.steps.toggle_expanded(first);
        draft.steps.update_text(second, "   ");
        draft.set_cooked_status(CookedStatus::No);

        let payload = build_payload(&draft, "owner-1", None);
        assert_eq!(payload.name, "Hoppin' John");
        assert_eq!(payload.url, "https://example.com/hj");
        assert_eq!(
            payload.ingredients,
            vec![IngredientPayload {
                name: "Black-eyed peas".into(),
                count: "1 lb".into()
            }]
        );
        assert_eq!(
            payload.steps,
            vec![StepPayload {
                text: "Soak peas".into(),
                expanded: false
            }]
        );
        assert!(!payload.has_cooked);
        assert_eq!(payload.owner_id, "owner-1");
    }

    #[test]
    fn not_cooked_drops_stale_evidence() {
        let mut draft = Draft::new();
        draft.set_cooked_status(CookedStatus::No);
        // Evidence that slipped in after the transition
        draft.set_photo(Some(PhotoRef::Remote("https://cdn/p.webp".into())));
        draft.toggle_taste(Taste::Sweet);

        let payload = build_payload(&draft, "owner-1", Some("https://cdn/p.webp"));
        assert_eq!(payload.photo_url, "");
        assert!(payload.tastes.is_empty());
        assert!(!payload.has_cooked);
    }

    #[test]
    fn cooked_keeps_photo_and_tastes() {
        let mut draft = Draft::new();
        draft.set_cooked_status(CookedStatus::Yes);
        draft.toggle_taste(Taste::Umami);
        draft.toggle_taste(Taste::Salty);
        let payload = build_payload(&draft, "owner-1", Some("https://cdn/p.webp"));
        assert_eq!(payload.photo_url, "https://cdn/p.webp");
        assert_eq!(payload.tastes, vec!["Salty", "Umami"]);
        assert!(payload.has_cooked);
    }
}
