use gk::basic_models::IngredientPayload;

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Ingredient {
    pub name: String,
    pub count: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IngredientField {
    Name,
    Count,
}

/// Ingredients, addressed by position. Edits apply immediately.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct IngredientList {
    items: Vec<Ingredient>,
}

impl IngredientList {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append an ingredient. The name must not be blank; the count may be.
    pub fn add(&mut self, name: &str, count: &str) -> bool {
        if name.trim().is_empty() {
            return false;
        }
        self.items.push(Ingredient {
            name: name.to_string(),
            count: count.to_string(),
        });
        true
    }

    /// Remove by position. Later ingredients shift down by one.
    pub fn remove(&mut self, index: usize) -> Option<Ingredient> {
        (index < self.items.len()).then(|| self.items.remove(index))
    }

    pub fn update(&mut self, index: usize, field: IngredientField, value: &str) -> bool {
        let Some(item) = self.items.get_mut(index) else {
            return false;
        };
        match field {
            IngredientField::Name => item.name = value.to_string(),
            IngredientField::Count => item.count = value.to_string(),
        }
        true
    }

    pub fn replace(&mut self, items: Vec<Ingredient>) {
        self.items = items;
    }

    /// Drop nameless ingredients and trim the rest, matching what gets saved.
    pub fn normalize(&mut self) {
        self.items.retain(|item| !item.name.trim().is_empty());
        for item in &mut self.items {
            item.name = item.name.trim().to_string();
            item.count = item.count.trim().to_string();
        }
    }

    pub fn clear(&mut self) {
        self.items.clear();
    }

    pub fn items(&self) -> &[Ingredient] {
        &self.items
    }

    pub fn has_content(&self) -> bool {
        self.items.iter().any(|item| !item.name.trim().is_empty())
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

impl From<&IngredientPayload> for Ingredient {
    fn from(payload: &IngredientPayload) -> Self {
        Self {
            name: payload.name.clone(),
            count: payload.count.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn add_requires_a_name_but_not_a_count() {
        let mut list = IngredientList::new();
        assert!(!list.add(" ", "2 cups"));
        assert!(list.add("Salt", ""));
        assert_eq!(list.items()[0].count, "");
        assert_eq!(list.len(), 1);
    }

    #[test]
    fn remove_shifts_later_positions() {
        let mut list = IngredientList::new();
        list.add("Flour", "2 cups");
        list.add("Butter", "1 stick");
        list.add("Buttermilk", "3/4 cup");
        let removed = list.remove(0).unwrap();
        assert_eq!(removed.name, "Flour");
        assert_eq!(list.items()[0].name, "Butter");
        assert_eq!(list.items()[1].name, "Buttermilk");
        assert!(list.remove(5).is_none());
    }

    #[test]
    fn update_replaces_one_field_in_place() {
        let mut list = IngredientList::new();
        list.add("Sugar", "1 cup");
        assert!(list.update(0, IngredientField::Count, "2 tbsp"));
        assert!(list.update(0, IngredientField::Name, "Brown sugar"));
        assert_eq!(
            list.items()[0],
            Ingredient {
                name: "Brown sugar".into(),
                count: "2 tbsp".into()
            }
        );
        assert!(!list.update(3, IngredientField::Name, "nope"));
    }

    #[test]
    fn blanked_names_do_not_count_as_content() {
        let mut list = IngredientList::new();
        list.add("Pepper", "");
        assert!(list.has_content());
        list.update(0, IngredientField::Name, "   ");
        assert!(!list.has_content());
    }

    #[test]
    fn normalize_trims_and_drops_nameless_entries() {
        let mut list = IngredientList::new();
        list.add(" Okra ", " 1 lb");
        list.add("Cornmeal", "1 cup");
        list.update(1, IngredientField::Name, "  ");
        list.normalize();
        assert_eq!(
            list.items(),
            &[Ingredient {
                name: "Okra".into(),
                count: "1 lb".into()
            }]
        );
    }
}
