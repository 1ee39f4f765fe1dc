//! The recipe collection state container.
//!
//! The collection is the single source of truth for the shopping list. It
//! is mutated through a small set of transition functions and does no IO
//! of its own; hydration and persistence live in [`crate::storage`].

use super::section::RecipeSection;

/// An ordered collection of recipe sections.
///
/// Insertion order is import order, oldest first. Section removal is a
/// two-phase operation: a section is first marked pending, then removed
/// only when the confirmation names the same section. The pending marker
/// is a single slot, so a later request replaces an earlier one; it is
/// transient intent and is not part of the persisted representation.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RecipeCollection {
    sections: Vec<RecipeSection>,
    pending_delete: Option<String>,
}

impl RecipeCollection {
    /// An empty collection with nothing pending.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Wraps previously stored sections.
    #[must_use]
    pub const fn from_sections(sections: Vec<RecipeSection>) -> Self {
        Self {
            sections,
            pending_delete: None,
        }
    }

    /// The sections, oldest import first.
    #[must_use]
    pub fn sections(&self) -> &[RecipeSection] {
        &self.sections
    }

    /// Number of sections.
    #[must_use]
    pub fn len(&self) -> usize {
        self.sections.len()
    }

    /// Whether the collection holds no sections.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.sections.is_empty()
    }

    /// Appends a section, preserving arrival order.
    pub fn push(&mut self, section: RecipeSection) {
        self.sections.push(section);
    }

    /// Flips the checked flag on one entry.
    ///
    /// The entry is addressed by its own key within the section named by
    /// `section_key`; entries in other sections are never considered,
    /// even when their keys collide. Returns `true` if an entry was
    /// flipped.
    pub fn toggle(&mut self, section_key: &str, entry_key: &str) -> bool {
        let Some(section) = self.sections.iter_mut().find(|s| s.key == section_key) else {
            return false;
        };
        let Some(entry) = section.data.iter_mut().find(|e| e.key == entry_key) else {
            return false;
        };
        entry.checked = !entry.checked;
        true
    }

    /// Marks a section for removal.
    ///
    /// At most one section is pending at a time; a second request
    /// replaces the first. Returns `false` when no section has the given
    /// key, in which case nothing is marked.
    pub fn request_delete(&mut self, section_key: &str) -> bool {
        if !self.sections.iter().any(|s| s.key == section_key) {
            return false;
        }
        self.pending_delete = Some(section_key.to_string());
        true
    }

    /// The key of the section currently marked for removal, if any.
    #[must_use]
    pub fn pending_delete(&self) -> Option<&str> {
        self.pending_delete.as_deref()
    }

    /// Removes the pending section if `section_key` names it.
    ///
    /// A confirmation for any other key (stale, out of order, or never
    /// requested) is a no-op and leaves the collection unchanged. On
    /// success the removed section is returned and the marker cleared.
    pub fn confirm_delete(&mut self, section_key: &str) -> Option<RecipeSection> {
        if self.pending_delete.as_deref() != Some(section_key) {
            return None;
        }
        self.pending_delete = None;
        let index = self.sections.iter().position(|s| s.key == section_key)?;
        Some(self.sections.remove(index))
    }
}
