use std::collections::HashMap;

use uuid::Uuid;

/// Identity of a step. Generated once and never reused, so it stays valid across reorders.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct StepId(Uuid);

impl StepId {
    fn generate() -> Self {
        Self(Uuid::new_v4())
    }
}

impl std::fmt::Display for StepId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        self.0.fmt(f)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StepItem {
    pub id: StepId,
    pub text: String,
    pub expanded: bool,
}

/// An ordered list of preparation steps.
///
/// Keystrokes land in a pending buffer keyed by [`StepId`] and only reach the
/// canonical list on a commit. Every operation that depends on step text
/// flushes *all* pending buffers first, since an edit on one step may still be
/// open while another step is toggled or dragged.
#[derive(Debug, Clone, Default)]
pub struct StepList {
    items: Vec<StepItem>,
    pending: HashMap<StepId, String>,
}

impl StepList {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a new collapsed step. Blank text is ignored.
    pub fn add(&mut self, text: &str) -> Option<StepId> {
        if text.trim().is_empty() {
            return None;
        }
        let id = StepId::generate();
        self.items.push(StepItem {
            id,
            text: text.to_string(),
            expanded: false,
        });
        Some(id)
    }

    /// Remove a step by id, returning it if it existed.
    pub fn remove(&mut self, id: StepId) -> Option<StepItem> {
        self.flush_all();
        let position = self.position(id)?;
        Some(self.items.remove(position))
    }

    /// Flip the expanded flag, returning the new value.
    pub fn toggle_expanded(&mut self, id: StepId) -> Option<bool> {
        self.flush_all();
        let item = self.items.iter_mut().find(|item| item.id == id)?;
        item.expanded = !item.expanded;
        Some(item.expanded)
    }

    /// Replace a step's canonical text immediately, discarding any pending edit for it.
    pub fn update_text(&mut self, id: StepId, text: &str) -> bool {
        self.pending.remove(&id);
        match self.items.iter_mut().find(|item| item.id == id) {
            Some(item) => {
                item.text = text.to_string();
                true
            }
            None => false,
        }
    }

    /// Record a keystroke-level edit without touching the canonical list.
    pub fn edit(&mut self, id: StepId, text: &str) -> bool {
        if self.position(id).is_none() {
            return false;
        }
        self.pending.insert(id, text.to_string());
        true
    }

    /// Flush the pending edit of a single step, as happens when its input loses focus.
    pub fn commit(&mut self, id: StepId) {
        if let Some(text) = self.pending.remove(&id) {
            if let Some(item) = self.items.iter_mut().find(|item| item.id == id) {
                item.text = text;
            }
        }
    }

    pub fn flush_all(&mut self) {
        for (id, text) in self.pending.drain() {
            if let Some(item) = self.items.iter_mut().find(|item| item.id == id) {
                item.text = text;
            }
        }
    }

    pub fn has_pending_edits(&self) -> bool {
        !self.pending.is_empty()
    }

    /// Text currently shown for a step: the pending edit if any, else the canonical text.
    pub fn display_text(&self, id: StepId) -> Option<&str> {
        if let Some(text) = self.pending.get(&id) {
            return Some(text.as_str());
        }
        self.items
            .iter()
            .find(|item| item.id == id)
            .map(|item| item.text.as_str())
    }

    /// Move the step at `from` to `to`, shifting the steps in between by one.
    ///
    /// Out of range indices leave the list alone.
    pub fn reorder(&mut self, from: usize, to: usize) -> bool {
        self.flush_all();
        if from >= self.items.len() || to >= self.items.len() {
            return false;
        }
        if from != to {
            let item = self.items.remove(from);
            self.items.insert(to, item);
        }
        true
    }

    /// Replace every step with freshly identified, expanded steps.
    pub fn bulk_import<S: AsRef<str>>(&mut self, texts: &[S]) {
        self.pending.clear();
        self.items = texts
            .iter()
            .map(|text| StepItem {
                id: StepId::generate(),
                text: text.as_ref().to_string(),
                expanded: true,
            })
            .collect();
    }

    /// Bring the canonical list in line with what was saved: blank steps go,
    /// the rest are trimmed. Surviving steps keep their ids and expanded state.
    pub fn normalize(&mut self) {
        self.flush_all();
        self.items.retain(|item| !item.text.trim().is_empty());
        for item in &mut self.items {
            let trimmed = item.text.trim();
            if trimmed.len() != item.text.len() {
                item.text = trimmed.to_string();
            }
        }
    }

    pub fn clear(&mut self) {
        self.pending.clear();
        self.items.clear();
    }

    /// Canonical items. Pending edits are not visible here until flushed.
    pub fn items(&self) -> &[StepItem] {
        &self.items
    }

    /// Items paired with their 1-based step number.
    pub fn numbered(&self) -> impl Iterator<Item = (usize, &StepItem)> {
        self.items.iter().enumerate().map(|(i, item)| (i + 1, item))
    }

    /// Whether any step has non-blank text, counting pending edits.
    pub fn has_content(&self) -> bool {
        self.items.iter().any(|item| {
            self.display_text(item.id)
                .is_some_and(|text| !text.trim().is_empty())
        })
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    fn position(&self, id: StepId) -> Option<usize> {
        self.items.iter().position(|item| item.id == id)
    }
}
