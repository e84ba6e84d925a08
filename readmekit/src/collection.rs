//! Ordered section collection with an active-selection pointer
//!
//! A [`SectionCollection`] is a value: every operation borrows the current
//! collection and returns a new, fully consistent one. Operations are total.
//! Stale or unknown ids and malformed input turn the operation into a no-op
//! instead of an error, so an event referencing a section deleted a moment
//! earlier cannot break the document.
//!
//! Invariants held by every collection this module produces:
//! * section ids are pairwise distinct
//! * `active_id`, when set, names a section that is present
//! * the sequence order is the document order

use serde::{Deserialize, Serialize};
use std::collections::HashSet;

use crate::catalog::Catalog;
use crate::ids::{slugify, IdMinter};
use crate::section::Section;

/// Candidates taken from a minter before `add` stops trusting it
pub const MAX_MINT_ATTEMPTS: usize = 16;

/// Where to put a moved section relative to an anchor section
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Placement {
    /// Directly before the anchor
    Before(String),
    /// Directly after the anchor
    After(String),
}

impl Placement {
    fn anchor(&self) -> &str {
        match self {
            Placement::Before(id) | Placement::After(id) => id,
        }
    }
}

/// The sections currently making up the document
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct SectionCollection {
    sections: Vec<Section>,
    active_id: Option<String>,
}

impl SectionCollection {
    /// Deep copy of the catalog's default sections; the first one is active
    pub fn bootstrap(catalog: &Catalog) -> Self {
        let sections: Vec<Section> = catalog
            .list_defaults()
            .into_iter()
            .map(Section::from)
            .collect();
        let active_id = sections.first().map(|s| s.id.clone());

        Self {
            sections,
            active_id,
        }
    }

    /// Empty collection with no selection
    pub fn clean_start() -> Self {
        Self::default()
    }

    /// Build a collection from arbitrary sections (e.g. an imported README)
    ///
    /// Colliding ids get a `-2`, `-3`, ... suffix, empty ids are replaced by a
    /// slug of the title. The first section becomes active.
    pub fn from_sections(sections: Vec<Section>) -> Self {
        let mut seen: HashSet<String> = HashSet::new();
        let mut unique = Vec::with_capacity(sections.len());

        for mut section in sections {
            let base = if section.id.is_empty() {
                slugify(&section.title)
            } else {
                section.id.clone()
            };
            let mut candidate = base.clone();
            let mut suffix = 2;
            while seen.contains(&candidate) {
                candidate = format!("{}-{}", base, suffix);
                suffix += 1;
            }
            seen.insert(candidate.clone());
            section.id = candidate;
            unique.push(section);
        }

        let active_id = unique.first().map(|s| s.id.clone());
        Self {
            sections: unique,
            active_id,
        }
    }

    /// Sections in document order
    pub fn sections(&self) -> &[Section] {
        &self.sections
    }

    /// Id of the active section, if any
    pub fn active_id(&self) -> Option<&str> {
        self.active_id.as_deref()
    }

    /// The active section, if any
    pub fn active(&self) -> Option<&Section> {
        self.active_id.as_deref().and_then(|id| self.get(id))
    }

    /// Look up a section by id
    pub fn get(&self, id: &str) -> Option<&Section> {
        self.sections.iter().find(|s| s.id == id)
    }

    /// Index of a section by id
    pub fn position(&self, id: &str) -> Option<usize> {
        self.sections.iter().position(|s| s.id == id)
    }

    /// Whether a section with this id is present
    pub fn contains(&self, id: &str) -> bool {
        self.position(id).is_some()
    }

    /// Section ids in document order
    pub fn ids(&self) -> impl Iterator<Item = &str> {
        self.sections.iter().map(|s| s.id.as_str())
    }

    /// Number of sections
    pub fn len(&self) -> usize {
        self.sections.len()
    }

    /// Whether the collection has no sections
    pub fn is_empty(&self) -> bool {
        self.sections.is_empty()
    }

    /// Make `id` the active section
    pub fn select(&self, id: &str) -> Self {
        if !self.contains(id) {
            log::debug!("select: no section '{}'", id);
            return self.clone();
        }

        Self {
            sections: self.sections.clone(),
            active_id: Some(id.to_string()),
        }
    }

    /// Replace the content of a section
    pub fn set_content(&self, id: &str, content: &str) -> Self {
        self.update_section(id, |section| section.content = content.to_string())
    }

    /// Replace the order wholesale with `ids`
    ///
    /// `ids` must be a permutation of the current ids. Anything else (missing,
    /// extra or repeated ids) leaves the collection unchanged.
    pub fn reorder<S: AsRef<str>>(&self, ids: &[S]) -> Self {
        if !self.is_permutation(ids) {
            log::warn!(
                "reorder: rejected order of {} ids, not a permutation of the {} current sections",
                ids.len(),
                self.sections.len()
            );
            return self.clone();
        }

        let sections = ids
            .iter()
            .filter_map(|id| self.get(id.as_ref()).cloned())
            .collect();

        Self {
            sections,
            active_id: self.active_id.clone(),
        }
    }

    /// Move a section before or after another one
    pub fn move_section(&self, moved: &str, placement: &Placement) -> Self {
        let anchor = placement.anchor();
        if moved == anchor || !self.contains(anchor) {
            log::debug!("move: cannot place '{}' relative to '{}'", moved, anchor);
            return self.clone();
        }
        let Some(from) = self.position(moved) else {
            log::debug!("move: no section '{}'", moved);
            return self.clone();
        };

        let mut sections = self.sections.clone();
        let section = sections.remove(from);
        // Anchor is present and distinct from the moved section, so it is still found
        let anchor_index = sections
            .iter()
            .position(|s| s.id == anchor)
            .unwrap_or(sections.len());
        let insert_at = match placement {
            Placement::Before(_) => anchor_index,
            Placement::After(_) => (anchor_index + 1).min(sections.len()),
        };
        sections.insert(insert_at, section);

        Self {
            sections,
            active_id: self.active_id.clone(),
        }
    }

    /// Drag-and-drop: drop `dragged` onto `target`
    ///
    /// The dragged section is taken out and inserted at the index the target
    /// occupied, so dragging down lands after the target and dragging up lands
    /// before it.
    pub fn drop_onto(&self, dragged: &str, target: &str) -> Self {
        if dragged == target {
            return self.clone();
        }
        let (Some(from), Some(to)) = (self.position(dragged), self.position(target)) else {
            log::debug!("drop: unknown section '{}' or '{}'", dragged, target);
            return self.clone();
        };

        let mut sections = self.sections.clone();
        let section = sections.remove(from);
        sections.insert(to, section);

        Self {
            sections,
            active_id: self.active_id.clone(),
        }
    }

    /// Append a new custom section and make it active
    ///
    /// The id comes from `minter`; candidates already present are discarded.
    /// After [`MAX_MINT_ATTEMPTS`] collisions the last candidate gets a
    /// `-2`, `-3`, ... suffix instead.
    pub fn add<M: IdMinter + ?Sized>(&self, title: &str, content: &str, minter: &mut M) -> Self {
        let mut id = minter.mint(title);
        let mut attempts = 1;
        while self.contains(&id) && attempts < MAX_MINT_ATTEMPTS {
            log::debug!("add: minted id '{}' already in use, retrying", id);
            id = minter.mint(title);
            attempts += 1;
        }
        if self.contains(&id) {
            log::warn!("add: minter keeps repeating '{}', suffixing", id);
            let base = id;
            let mut suffix = 2;
            id = format!("{}-{}", base, suffix);
            while self.contains(&id) {
                suffix += 1;
                id = format!("{}-{}", base, suffix);
            }
        }

        let mut sections = self.sections.clone();
        sections.push(Section::new(id.clone(), title, content));

        Self {
            sections,
            active_id: Some(id),
        }
    }

    /// Append a catalog template under its own id and make it active
    ///
    /// No-op when the id is unknown to the catalog or already present.
    pub fn add_template(&self, id: &str, catalog: &Catalog) -> Self {
        if self.contains(id) {
            log::debug!("add: '{}' is already in the document", id);
            return self.clone();
        }
        let Some(template) = catalog.find_by_id(id) else {
            log::debug!("add: no template '{}'", id);
            return self.clone();
        };

        let mut sections = self.sections.clone();
        sections.push(Section::from(template));

        Self {
            sections,
            active_id: Some(id.to_string()),
        }
    }

    /// Remove a section
    ///
    /// If it was active, the section that slides into its slot becomes active
    /// (or the new last section, or nothing when the collection is empty).
    pub fn delete(&self, id: &str) -> Self {
        let Some(index) = self.position(id) else {
            log::debug!("delete: no section '{}'", id);
            return self.clone();
        };

        let mut sections = self.sections.clone();
        sections.remove(index);

        let active_id = if self.active_id.as_deref() == Some(id) {
            sections
                .get(index.min(sections.len().saturating_sub(1)))
                .map(|s| s.id.clone())
        } else {
            self.active_id.clone()
        };

        Self {
            sections,
            active_id,
        }
    }

    /// Restore a section's content from the catalog
    pub fn reset_content(&self, id: &str, catalog: &Catalog) -> Self {
        match catalog.default_template(id) {
            Some(template) => self.update_section(id, |section| {
                section.content = template.content.clone();
            }),
            None => {
                log::debug!("reset: no template for '{}'", id);
                self.clone()
            }
        }
    }

    /// Discard everything and start again from the catalog defaults
    pub fn reset_all(&self, catalog: &Catalog) -> Self {
        Self::bootstrap(catalog)
    }

    /// Change a section's title; blank titles are ignored
    pub fn rename(&self, id: &str, new_title: &str) -> Self {
        let title = new_title.trim();
        if title.is_empty() {
            log::debug!("rename: blank title for '{}' ignored", id);
            return self.clone();
        }
        self.update_section(id, |section| section.title = title.to_string())
    }

    /// Copy of `self` with `apply` run on the section named `id`
    fn update_section(&self, id: &str, apply: impl FnOnce(&mut Section)) -> Self {
        let Some(index) = self.position(id) else {
            log::debug!("no section '{}'", id);
            return self.clone();
        };

        let mut sections = self.sections.clone();
        apply(&mut sections[index]);

        Self {
            sections,
            active_id: self.active_id.clone(),
        }
    }

    fn is_permutation<S: AsRef<str>>(&self, ids: &[S]) -> bool {
        if ids.len() != self.sections.len() {
            return false;
        }
        let mut seen: HashSet<&str> = HashSet::with_capacity(ids.len());
        ids.iter()
            .all(|id| self.contains(id.as_ref()) && seen.insert(id.as_ref()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::SectionTemplate;
    use crate::ids::SequentialIds;

    fn abc(active: &str) -> SectionCollection {
        SectionCollection::from_sections(vec![
            Section::new("A", "A", "a"),
            Section::new("B", "B", "b"),
            Section::new("C", "C", "c"),
        ])
        .select(active)
    }

    fn ids(collection: &SectionCollection) -> Vec<&str> {
        collection.ids().collect()
    }

    #[test]
    fn test_bootstrap() {
        let collection = SectionCollection::bootstrap(&Catalog::builtin());
        assert_eq!(
            ids(&collection),
            vec![
                "title",
                "description",
                "installation",
                "usage",
                "contributing",
                "license"
            ]
        );
        assert_eq!(collection.active_id(), Some("title"));
    }

    #[test]
    fn test_bootstrap_empty_defaults() {
        let catalog =
            Catalog::new(vec![SectionTemplate::new("a", "A", "# A")], &[] as &[&str]).unwrap();
        let collection = SectionCollection::bootstrap(&catalog);
        assert!(collection.is_empty());
        assert_eq!(collection.active_id(), None);
    }

    #[test]
    fn test_clean_start() {
        let collection = SectionCollection::clean_start();
        assert!(collection.is_empty());
        assert_eq!(collection.active_id(), None);
    }

    #[test]
    fn test_select_unknown_is_noop() {
        let collection = abc("A");
        assert_eq!(collection.select("Z"), collection);
        assert_eq!(collection.select("C").active_id(), Some("C"));
    }

    #[test]
    fn test_set_content_keeps_position_and_active() {
        let collection = abc("A").set_content("B", "changed");
        assert_eq!(ids(&collection), vec!["A", "B", "C"]);
        assert_eq!(collection.get("B").unwrap().content, "changed");
        assert_eq!(collection.get("B").unwrap().title, "B");
        assert_eq!(collection.active_id(), Some("A"));
        assert_eq!(abc("A").set_content("Z", "x"), abc("A"));
    }

    #[test]
    fn test_reorder_permutation() {
        let collection = abc("B").reorder(&["C", "A", "B"]);
        assert_eq!(ids(&collection), vec!["C", "A", "B"]);
        assert_eq!(collection.active_id(), Some("B"));
        assert_eq!(collection.get("A").unwrap().content, "a");
    }

    #[test]
    fn test_reorder_rejects_non_permutation() {
        let collection = abc("A");
        assert_eq!(collection.reorder(&["A", "B"]), collection);
        assert_eq!(collection.reorder(&["A", "A", "B"]), collection);
        assert_eq!(collection.reorder(&["A", "B", "Z"]), collection);
        assert_eq!(collection.reorder(&["A", "B", "C", "C"]), collection);
    }

    #[test]
    fn test_move_section() {
        let collection = abc("A");
        let moved = collection.move_section("A", &Placement::After("C".to_string()));
        assert_eq!(ids(&moved), vec!["B", "C", "A"]);

        let moved = collection.move_section("C", &Placement::Before("A".to_string()));
        assert_eq!(ids(&moved), vec!["C", "A", "B"]);

        let moved = collection.move_section("A", &Placement::Before("C".to_string()));
        assert_eq!(ids(&moved), vec!["B", "A", "C"]);

        assert_eq!(
            collection.move_section("A", &Placement::After("A".to_string())),
            collection
        );
        assert_eq!(
            collection.move_section("Z", &Placement::After("A".to_string())),
            collection
        );
        assert_eq!(
            collection.move_section("A", &Placement::After("Z".to_string())),
            collection
        );
    }

    #[test]
    fn test_drop_onto_matches_drag_semantics() {
        let collection = abc("A");
        assert_eq!(ids(&collection.drop_onto("A", "C")), vec!["B", "C", "A"]);
        assert_eq!(ids(&collection.drop_onto("C", "A")), vec!["C", "A", "B"]);
        assert_eq!(ids(&collection.drop_onto("A", "B")), vec!["B", "A", "C"]);
        assert_eq!(collection.drop_onto("A", "A"), collection);
        assert_eq!(collection.drop_onto("A", "Z"), collection);
    }

    #[test]
    fn test_add_appends_and_activates() {
        let mut minter = SequentialIds::new();
        let collection = SectionCollection::clean_start().add("Intro", "# Intro", &mut minter);
        assert_eq!(collection.len(), 1);
        assert_eq!(collection.active_id(), Some("intro-1"));
        assert_eq!(collection.active().unwrap().title, "Intro");
    }

    #[test]
    fn test_add_skips_ids_in_use() {
        let existing = SectionCollection::from_sections(vec![Section::new("notes-1", "Notes", "")]);
        let collection = existing.add("Notes", "more", &mut SequentialIds::new());
        assert_eq!(ids(&collection), vec!["notes-1", "notes-2"]);
    }

    struct StuckIds;

    impl IdMinter for StuckIds {
        fn mint(&mut self, _title: &str) -> String {
            "notes".to_string()
        }
    }

    #[test]
    fn test_add_with_repeating_minter_terminates() {
        let mut minter = StuckIds;
        let collection = SectionCollection::clean_start()
            .add("Notes", "a", &mut minter)
            .add("Notes", "b", &mut minter)
            .add("Notes", "c", &mut minter);

        assert_eq!(ids(&collection), vec!["notes", "notes-2", "notes-3"]);
        assert_eq!(collection.active_id(), Some("notes-3"));
    }

    #[test]
    fn test_add_template_reuses_catalog_id() {
        let catalog = Catalog::builtin();
        let collection = SectionCollection::bootstrap(&catalog).delete("usage");
        let restored = collection.add_template("usage", &catalog);

        assert_eq!(restored.ids().last(), Some("usage"));
        assert_eq!(restored.active_id(), Some("usage"));
        assert_eq!(restored.add_template("usage", &catalog), restored);
        assert_eq!(restored.add_template("nope", &catalog), restored);
    }

    #[test]
    fn test_delete_middle_not_active() {
        let collection = abc("A").delete("B");
        assert_eq!(ids(&collection), vec!["A", "C"]);
        assert_eq!(collection.active_id(), Some("A"));
    }

    #[test]
    fn test_delete_active_middle_selects_next() {
        let collection = abc("B").delete("B");
        assert_eq!(ids(&collection), vec!["A", "C"]);
        assert_eq!(collection.active_id(), Some("C"));
    }

    #[test]
    fn test_delete_active_last_selects_new_last() {
        let collection = abc("C").delete("C");
        assert_eq!(collection.active_id(), Some("B"));
    }

    #[test]
    fn test_delete_sole_section() {
        let collection = SectionCollection::from_sections(vec![Section::new("A", "A", "a")]);
        let collection = collection.delete("A");
        assert!(collection.is_empty());
        assert_eq!(collection.active_id(), None);
    }

    #[test]
    fn test_delete_unknown_is_noop() {
        assert_eq!(abc("A").delete("Z"), abc("A"));
    }

    #[test]
    fn test_reset_content() {
        let catalog = Catalog::builtin();
        let collection = SectionCollection::bootstrap(&catalog)
            .set_content("license", "hand edited")
            .rename("license", "Licence");
        let reset = collection.reset_content("license", &catalog);

        let section = reset.get("license").unwrap();
        assert_eq!(section.content, catalog.find_by_id("license").unwrap().content);
        assert_eq!(section.title, "Licence");
        assert_eq!(reset.position("license"), Some(5));
    }

    #[test]
    fn test_reset_content_custom_section_is_noop() {
        let catalog = Catalog::builtin();
        let collection =
            SectionCollection::bootstrap(&catalog).add("Mine", "x", &mut SequentialIds::new());
        assert_eq!(collection.reset_content("mine-1", &catalog), collection);
    }

    #[test]
    fn test_reset_content_non_default_template() {
        let catalog = Catalog::builtin();
        let collection = SectionCollection::from_sections(vec![Section::new("faq", "FAQ", "")]);
        let reset = collection.reset_content("faq", &catalog);
        assert_eq!(reset.get("faq").unwrap().content, catalog.find_by_id("faq").unwrap().content);
    }

    #[test]
    fn test_reset_all_discards_custom_sections() {
        let catalog = Catalog::builtin();
        let collection = SectionCollection::bootstrap(&catalog)
            .add("Mine", "x", &mut SequentialIds::new())
            .delete("title");
        assert_eq!(collection.reset_all(&catalog), SectionCollection::bootstrap(&catalog));
    }

    #[test]
    fn test_rename() {
        let collection = abc("A").rename("B", "  Better B  ");
        assert_eq!(collection.get("B").unwrap().title, "Better B");
        assert_eq!(ids(&collection), vec!["A", "B", "C"]);
        assert_eq!(abc("A").rename("B", "   "), abc("A"));
        assert_eq!(abc("A").rename("Z", "Name"), abc("A"));
    }

    #[test]
    fn test_from_sections_dedupes_ids() {
        let collection = SectionCollection::from_sections(vec![
            Section::new("usage", "Usage", "1"),
            Section::new("usage", "Usage", "2"),
            Section::new("", "Getting Started", "3"),
            Section::new("usage", "Usage", "4"),
        ]);
        assert_eq!(
            ids(&collection),
            vec!["usage", "usage-2", "getting-started", "usage-3"]
        );
        assert_eq!(collection.active_id(), Some("usage"));
    }
}
