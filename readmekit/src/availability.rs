//! Catalog entries that can still be added to the document

use crate::catalog::{Catalog, SectionTemplate};
use crate::collection::SectionCollection;

/// Templates not yet present in `collection`, filtered by title
///
/// Catalog order is preserved. `search_term` matches titles as a
/// case-insensitive substring; an empty term keeps everything.
///
/// # Parameters
/// * `collection` - Current document sections
/// * `catalog` - Template registry
/// * `search_term` - Title filter
///
/// # Returns
/// * `Vec<&SectionTemplate>` - Addable templates, never sharing an id with `collection`
pub fn available<'a>(
    collection: &SectionCollection,
    catalog: &'a Catalog,
    search_term: &str,
) -> Vec<&'a SectionTemplate> {
    let needle = search_term.to_lowercase();

    catalog
        .list_all()
        .iter()
        .filter(|template| !collection.contains(&template.id))
        .filter(|template| needle.is_empty() || template.title.to_lowercase().contains(&needle))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ids::SequentialIds;
    use std::collections::HashSet;

    fn ids<'a>(templates: &[&'a SectionTemplate]) -> Vec<&'a str> {
        templates.iter().map(|t| t.id.as_str()).collect()
    }

    #[test]
    fn test_available_after_bootstrap_excludes_defaults() {
        let catalog = Catalog::builtin();
        let collection = SectionCollection::bootstrap(&catalog);
        let addable = available(&collection, &catalog, "");

        assert!(!addable.is_empty());
        assert!(addable.iter().all(|t| !catalog.is_default(&t.id)));
    }

    #[test]
    fn test_available_preserves_catalog_order() {
        let catalog = Catalog::builtin();
        let addable = available(&SectionCollection::clean_start(), &catalog, "");
        let all: Vec<&SectionTemplate> = catalog.list_all().iter().collect();
        assert_eq!(ids(&addable), ids(&all));
    }

    #[test]
    fn test_available_search_is_case_insensitive() {
        let catalog = Catalog::builtin();
        let collection = SectionCollection::clean_start();

        assert_eq!(ids(&available(&collection, &catalog, "LICEN")), vec!["license"]);
        assert_eq!(ids(&available(&collection, &catalog, "faq")), vec!["faq"]);
        assert!(available(&collection, &catalog, "no such title").is_empty());
    }

    #[test]
    fn test_available_complements_collection() {
        let catalog = Catalog::builtin();
        let collection = SectionCollection::bootstrap(&catalog)
            .delete("usage")
            .add("Custom", "x", &mut SequentialIds::new());

        let addable: HashSet<&str> = available(&collection, &catalog, "")
            .iter()
            .map(|t| t.id.as_str())
            .collect();
        let present: HashSet<&str> = collection
            .ids()
            .filter(|id| catalog.find_by_id(id).is_some())
            .collect();
        let all: HashSet<&str> = catalog.list_all().iter().map(|t| t.id.as_str()).collect();

        assert!(addable.is_disjoint(&present));
        assert_eq!(addable.union(&present).copied().collect::<HashSet<_>>(), all);
        assert!(addable.contains("usage"));
    }
}
