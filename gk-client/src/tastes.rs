use std::collections::BTreeSet;

use strum::{Display, EnumIter, EnumString, IntoStaticStr};

/// The fixed taste vocabulary. Names are used verbatim on the wire.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    Display,
    EnumString,
    EnumIter,
    IntoStaticStr,
)]
pub enum Taste {
    Salty,
    Sweet,
    Sour,
    Bitter,
    Umami,
    Spicy,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TasteSet {
    tastes: BTreeSet<Taste>,
}

impl TasteSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add the taste if absent, remove it if present. Returns whether it is now selected.
    pub fn toggle(&mut self, taste: Taste) -> bool {
        if self.tastes.remove(&taste) {
            false
        } else {
            self.tastes.insert(taste);
            true
        }
    }

    pub fn contains(&self, taste: Taste) -> bool {
        self.tastes.contains(&taste)
    }

    pub fn clear(&mut self) {
        self.tastes.clear();
    }

    pub fn len(&self) -> usize {
        self.tastes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tastes.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = Taste> + '_ {
        self.tastes.iter().copied()
    }

    /// Wire names in vocabulary order.
    pub fn to_names(&self) -> Vec<String> {
        self.iter().map(|taste| taste.to_string()).collect()
    }

    /// Build a set from wire names. Names outside the vocabulary are skipped.
    pub fn from_names<S: AsRef<str>>(names: &[S]) -> Self {
        let mut set = Self::new();
        for name in names {
            match name.as_ref().parse::<Taste>() {
                Ok(taste) => {
                    set.tastes.insert(taste);
                }
                Err(_) => tracing::warn!("Skipping unknown taste {:?}", name.as_ref()),
            }
        }
        set
    }
}

impl FromIterator<Taste> for TasteSet {
    fn from_iter<I: IntoIterator<Item = Taste>>(iter: I) -> Self {
        Self {
            tastes: iter.into_iter().collect(),
        }
    }
}
