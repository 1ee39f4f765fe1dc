//! The grocery list lifecycle over a [`Store`].
//!
//! A list starts unhydrated. Hydration reads the stored sections once and
//! unlocks every mutating operation; from then on each effective change
//! is written back in full. Store failures never escape: a failed read
//! means starting empty, and a failed write is logged while the in-memory
//! state stays authoritative for the rest of the run.

use chrono::{Duration, Utc};

use crate::{
    client::{ExtractionError, RecipeSource},
    domain::{RecipeCollection, RecipeSection, RecipeUrl},
    storage::Store,
};

/// Store key the collection is persisted under.
const RECIPES_KEY: &str = "recipes";

/// Marker for a list that has not read the store yet.
#[derive(Debug, PartialEq, Eq)]
pub struct Unhydrated;

/// State of a list that has been hydrated from the store.
#[derive(Debug, PartialEq, Eq)]
pub struct Hydrated {
    collection: RecipeCollection,
}

/// A grocery list bound to its persistent store.
///
/// The type parameter tracks whether hydration has happened. Reads and
/// mutations of the collection are only available on
/// `GroceryList<Hydrated>`, so nothing can write the store back before
/// the stored state has been read.
#[derive(Debug)]
pub struct GroceryList<S> {
    store: Store,
    state: S,
}

impl GroceryList<Unhydrated> {
    /// Binds a new, unhydrated list to `store`.
    #[must_use]
    pub const fn new(store: Store) -> Self {
        Self {
            store,
            state: Unhydrated,
        }
    }

    /// Reads the stored sections and unlocks the list.
    ///
    /// A missing value, an unreadable store, and a value that does not
    /// parse as a section list all degrade to an empty collection; the
    /// two failure cases are logged. Hydration itself never writes the
    /// store.
    #[must_use]
    pub fn hydrate(self) -> GroceryList<Hydrated> {
        let collection = match self.store.get(RECIPES_KEY) {
            Ok(Some(stored)) => match serde_json::from_str::<Vec<RecipeSection>>(&stored) {
                Ok(sections) => RecipeCollection::from_sections(sections),
                Err(e) => {
                    tracing::warn!("ignoring unparseable stored recipes: {e}");
                    RecipeCollection::new()
                }
            },
            Ok(None) => RecipeCollection::new(),
            Err(e) => {
                tracing::warn!("could not read stored recipes, starting empty: {e}");
                RecipeCollection::new()
            }
        };

        GroceryList {
            store: self.store,
            state: Hydrated { collection },
        }
    }
}

impl GroceryList<Hydrated> {
    /// The underlying collection.
    #[must_use]
    pub const fn collection(&self) -> &RecipeCollection {
        &self.state.collection
    }

    /// Imports the recipe behind `url` and appends it to the list.
    ///
    /// One request goes to the extraction source; on success a new
    /// section is appended with its entries unchecked, in the order the
    /// service returned them, and the list is persisted. On failure
    /// nothing is appended, the collection is exactly as it was, and the
    /// error is handed back for the caller to surface. Nothing
    /// de-duplicates by URL; importing the same recipe twice appends two
    /// sections.
    ///
    /// # Errors
    ///
    /// Returns the extraction failure that discarded the import.
    pub fn import_recipe(
        &mut self,
        source: &dyn RecipeSource,
        url: &RecipeUrl,
    ) -> Result<RecipeSection, ExtractionError> {
        let parsed = source.fetch(url)?;

        // Imports landing in the same millisecond would share a key.
        let mut created = Utc::now();
        while self
            .state
            .collection
            .sections()
            .iter()
            .any(|s| s.key == RecipeSection::timestamp_key(created))
        {
            created += Duration::milliseconds(1);
        }

        let section = RecipeSection::new(parsed.title, parsed.ingredients, created);
        self.state.collection.push(section.clone());
        self.persist();
        Ok(section)
    }

    /// Flips one entry's checked flag and persists on change.
    ///
    /// Returns `false` without touching the store when no entry matched.
    pub fn toggle_ingredient(&mut self, section_key: &str, entry_key: &str) -> bool {
        let toggled = self.state.collection.toggle(section_key, entry_key);
        if toggled {
            self.persist();
        }
        toggled
    }

    /// Marks a section for removal.
    ///
    /// Intent only: the stored list is untouched until the matching
    /// [`confirm_delete`](Self::confirm_delete) arrives, and the marker
    /// itself is never persisted.
    pub fn request_delete(&mut self, section_key: &str) -> bool {
        self.state.collection.request_delete(section_key)
    }

    /// Removes the pending section if `section_key` names it.
    ///
    /// Persists only when a section was actually removed.
    pub fn confirm_delete(&mut self, section_key: &str) -> Option<RecipeSection> {
        let removed = self.state.collection.confirm_delete(section_key);
        if removed.is_some() {
            self.persist();
        }
        removed
    }

    /// Writes the whole collection back to the store.
    ///
    /// A write failure is logged and otherwise swallowed; the next
    /// effective mutation tries again.
    fn persist(&self) {
        let value = match serde_json::to_value(self.state.collection.sections()) {
            Ok(value) => value,
            Err(e) => {
                tracing::warn!("could not serialize the grocery list: {e}");
                return;
            }
        };
        if let Err(e) = self.store.set(RECIPES_KEY, &value) {
            tracing::warn!("could not persist the grocery list: {e}");
        }
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;
    use tempfile::TempDir;

    use super::*;
    use crate::client::ParsedRecipe;
    use crate::domain::Ingredient;

    /// Answers every fetch with the same parsed recipe.
    struct FixedSource(ParsedRecipe);

    impl RecipeSource for FixedSource {
        fn fetch(&self, _url: &RecipeUrl) -> Result<ParsedRecipe, ExtractionError> {
            Ok(self.0.clone())
        }
    }

    /// Fails every fetch.
    struct DownSource;

    impl RecipeSource for DownSource {
        fn fetch(&self, _url: &RecipeUrl) -> Result<ParsedRecipe, ExtractionError> {
            Err(ExtractionError::Status {
                status: reqwest::StatusCode::BAD_GATEWAY,
            })
        }
    }

    fn recipe(title: &str, raws: &[&str]) -> FixedSource {
        FixedSource(ParsedRecipe {
            title: title.to_string(),
            ingredients: raws
                .iter()
                .map(|raw| Ingredient {
                    raw: (*raw).to_string(),
                    value: Vec::new(),
                    label: Vec::new(),
                })
                .collect(),
        })
    }

    fn url() -> RecipeUrl {
        RecipeUrl::new("https://example.com/recettes/1").unwrap()
    }

    fn temp_list() -> (TempDir, GroceryList<Hydrated>) {
        let tmp = TempDir::new().expect("failed to create temp dir");
        let store = Store::new(tmp.path().to_path_buf());
        (tmp, GroceryList::new(store).hydrate())
    }

    fn reopen(tmp: &TempDir) -> GroceryList<Hydrated> {
        GroceryList::new(Store::new(tmp.path().to_path_buf())).hydrate()
    }

    #[test]
    fn imports_append_in_arrival_order() {
        let (_tmp, mut list) = temp_list();

        list.import_recipe(&recipe("Soup", &["2 carrots"]), &url())
            .unwrap();
        list.import_recipe(&recipe("Bread", &["flour"]), &url())
            .unwrap();

        let titles: Vec<_> = list
            .collection()
            .sections()
            .iter()
            .map(|s| s.title.as_str())
            .collect();
        assert_eq!(titles, ["Soup", "Bread"]);
    }

    #[test]
    fn toggling_one_entry_leaves_the_other_recipes_alone() {
        let (_tmp, mut list) = temp_list();
        list.import_recipe(&recipe("Soup", &["2 carrots"]), &url())
            .unwrap();
        let bread = list
            .import_recipe(&recipe("Bread", &["flour"]), &url())
            .unwrap();

        assert!(list.toggle_ingredient(&bread.key, &bread.data[0].key));

        let sections = list.collection().sections();
        assert!(sections[1].data[0].checked, "flour should be checked");
        assert!(!sections[0].data[0].checked, "carrots should be untouched");
    }

    #[test]
    fn failed_import_changes_nothing() {
        let (tmp, mut list) = temp_list();
        list.import_recipe(&recipe("Soup", &["2 carrots"]), &url())
            .unwrap();
        let before = list.collection().clone();
        let stored_before = Store::new(tmp.path().to_path_buf())
            .get("recipes")
            .unwrap();

        let result = list.import_recipe(&DownSource, &url());

        assert!(result.is_err());
        assert_eq!(list.collection(), &before);
        let stored_after = Store::new(tmp.path().to_path_buf())
            .get("recipes")
            .unwrap();
        assert_eq!(stored_after, stored_before);
    }

    #[test]
    fn rapid_imports_get_distinct_section_keys() {
        let (_tmp, mut list) = temp_list();
        let source = recipe("Soup", &["2 carrots"]);

        for _ in 0..3 {
            list.import_recipe(&source, &url()).unwrap();
        }

        let mut keys: Vec<_> = list
            .collection()
            .sections()
            .iter()
            .map(|s| s.key.clone())
            .collect();
        keys.sort_unstable();
        keys.dedup();
        assert_eq!(keys.len(), 3);
    }

    #[test]
    fn stored_list_round_trips_through_hydration() {
        let (tmp, mut list) = temp_list();
        list.import_recipe(&recipe("Soup", &["2 carrots", "1 onion"]), &url())
            .unwrap();
        let bread = list
            .import_recipe(&recipe("Bread", &["flour"]), &url())
            .unwrap();
        list.toggle_ingredient(&bread.key, &bread.data[0].key);

        let reopened = reopen(&tmp);

        assert_eq!(reopened.collection(), list.collection());
    }

    #[test]
    fn hydrating_an_empty_store_starts_empty() {
        let (_tmp, list) = temp_list();
        assert!(list.collection().is_empty());
    }

    #[test]
    fn hydrating_garbage_starts_empty() {
        let tmp = TempDir::new().unwrap();
        let store = Store::new(tmp.path().to_path_buf());
        store.set("recipes", &json!("definitely not a list")).unwrap();

        let list = GroceryList::new(store).hydrate();
        assert!(list.collection().is_empty());
    }

    #[test]
    fn confirmed_removal_survives_reopening() {
        let (tmp, mut list) = temp_list();
        let soup = list
            .import_recipe(&recipe("Soup", &["2 carrots"]), &url())
            .unwrap();
        list.import_recipe(&recipe("Bread", &["flour"]), &url())
            .unwrap();

        assert!(list.request_delete(&soup.key));
        assert!(list.confirm_delete(&soup.key).is_some());

        let reopened = reopen(&tmp);
        let titles: Vec<_> = reopened
            .collection()
            .sections()
            .iter()
            .map(|s| s.title.as_str())
            .collect();
        assert_eq!(titles, ["Bread"]);
    }

    #[test]
    fn pending_marker_is_not_persisted() {
        let (tmp, mut list) = temp_list();
        let soup = list
            .import_recipe(&recipe("Soup", &["2 carrots"]), &url())
            .unwrap();

        assert!(list.request_delete(&soup.key));

        let reopened = reopen(&tmp);
        assert_eq!(reopened.collection().pending_delete(), None);
        assert_eq!(reopened.collection().len(), 1);
    }

    #[test]
    fn stale_confirmation_does_not_touch_the_store() {
        let (tmp, mut list) = temp_list();
        let soup = list
            .import_recipe(&recipe("Soup", &["2 carrots"]), &url())
            .unwrap();
        let bread = list
            .import_recipe(&recipe("Bread", &["flour"]), &url())
            .unwrap();
        let stored_before = Store::new(tmp.path().to_path_buf())
            .get("recipes")
            .unwrap();

        assert!(list.request_delete(&soup.key));
        assert!(list.confirm_delete(&bread.key).is_none());

        assert_eq!(list.collection().len(), 2);
        let stored_after = Store::new(tmp.path().to_path_buf())
            .get("recipes")
            .unwrap();
        assert_eq!(stored_after, stored_before);
    }

    #[test]
    fn toggle_that_matches_nothing_never_writes() {
        let (tmp, mut list) = temp_list();

        assert!(!list.toggle_ingredient("no-such-section", "no-such-entry"));

        let stored = Store::new(tmp.path().to_path_buf()).get("recipes").unwrap();
        assert_eq!(stored, None, "no write should have happened");
    }
}
