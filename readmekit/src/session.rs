//! Editing session: the state a front end drives with discrete events
//!
//! A [`Session`] owns the catalog, the current collection, the search term of
//! the "add section" picker and the id minter. Front ends translate user
//! events into [`Operation`]s and apply them one at a time; the available
//! templates and the composed document are derived on demand.
//!
//! Operations can also be scripted in a TOML plan file:
//!
//! ```toml
//! [[operation]]
//! op = "add"
//! title = "Quick Start"
//! content = "## Quick Start"
//!
//! [[operation]]
//! op = "move"
//! id = "license"
//! placement = { before = "contributing" }
//! ```

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

use crate::availability::available;
use crate::catalog::{Catalog, SectionTemplate};
use crate::collection::{Placement, SectionCollection};
use crate::composer::compose;
use crate::ids::IdMinter;

/// A single user event
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "op", rename_all = "snake_case")]
pub enum Operation {
    /// Make a section the edit target
    Select { id: String },
    /// Replace a section's content
    SetContent { id: String, content: String },
    /// Replace the whole order (must be a permutation)
    Reorder { ids: Vec<String> },
    /// Move a section before or after another
    Move { id: String, placement: Placement },
    /// Drag `id` and drop it onto `target`
    DropOnto { id: String, target: String },
    /// Append a new custom section
    Add {
        title: String,
        #[serde(default)]
        content: String,
    },
    /// Append a catalog template under its own id
    AddTemplate { id: String },
    /// Remove a section
    Delete { id: String },
    /// Restore a section's content from the catalog
    ResetContent { id: String },
    /// Restore the default section set
    ResetAll,
    /// Change a section's title
    Rename { id: String, title: String },
    /// Empty the document
    CleanStart,
    /// Set the search term of the template picker
    Search { term: String },
}

/// Interactive editing state
pub struct Session {
    catalog: Catalog,
    collection: SectionCollection,
    search_term: String,
    minter: Box<dyn IdMinter>,
}

impl Session {
    /// Start a session from the catalog defaults
    pub fn new(catalog: Catalog, minter: Box<dyn IdMinter>) -> Self {
        let collection = SectionCollection::bootstrap(&catalog);
        Self::with_collection(catalog, collection, minter)
    }

    /// Start a session from an existing collection
    pub fn with_collection(
        catalog: Catalog,
        collection: SectionCollection,
        minter: Box<dyn IdMinter>,
    ) -> Self {
        Self {
            catalog,
            collection,
            search_term: String::new(),
            minter,
        }
    }

    /// Template registry backing this session
    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    /// Current collection snapshot
    pub fn collection(&self) -> &SectionCollection {
        &self.collection
    }

    /// Current template search term
    pub fn search_term(&self) -> &str {
        &self.search_term
    }

    /// Templates that can still be added, filtered by the search term
    pub fn available(&self) -> Vec<&SectionTemplate> {
        available(&self.collection, &self.catalog, &self.search_term)
    }

    /// The composed document
    pub fn compose(&self) -> String {
        compose(&self.collection)
    }

    /// Apply one operation
    ///
    /// # Returns
    /// * `true` if the collection or the search term changed
    pub fn apply(&mut self, operation: &Operation) -> bool {
        let current = &self.collection;
        let next = match operation {
            Operation::Select { id } => current.select(id),
            Operation::SetContent { id, content } => current.set_content(id, content),
            Operation::Reorder { ids } => current.reorder(ids),
            Operation::Move { id, placement } => current.move_section(id, placement),
            Operation::DropOnto { id, target } => current.drop_onto(id, target),
            Operation::Add { title, content } => {
                current.add(title, content, self.minter.as_mut())
            }
            Operation::AddTemplate { id } => current.add_template(id, &self.catalog),
            Operation::Delete { id } => current.delete(id),
            Operation::ResetContent { id } => current.reset_content(id, &self.catalog),
            Operation::ResetAll => {
                log::info!("Content reset: the document has been restored to its default state");
                current.reset_all(&self.catalog)
            }
            Operation::Rename { id, title } => current.rename(id, title),
            Operation::CleanStart => {
                log::info!("Clean start: all sections removed");
                SectionCollection::clean_start()
            }
            Operation::Search { term } => {
                let changed = self.search_term != *term;
                self.search_term = term.clone();
                return changed;
            }
        };

        let changed = next != self.collection;
        if !changed {
            log::debug!("{:?} left the document unchanged", operation);
        }
        self.collection = next;
        changed
    }

    /// Apply operations in order, returning how many changed the session
    pub fn apply_all<'a, I>(&mut self, operations: I) -> usize
    where
        I: IntoIterator<Item = &'a Operation>,
    {
        operations
            .into_iter()
            .filter(|operation| self.apply(operation))
            .count()
    }
}

/// Errors that can occur when loading a plan file
#[derive(Error, Debug)]
pub enum PlanError {
    #[error("Failed to read plan {path}: {source}", path = .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("TOML parse error: {0}")]
    Parse(#[from] toml::de::Error),
}

/// A scripted list of operations
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Plan {
    /// Operations, applied in order
    #[serde(rename = "operation", default)]
    pub operations: Vec<Operation>,
}

impl Plan {
    /// Parse a plan from TOML text
    pub fn from_toml_str(content: &str) -> Result<Self, PlanError> {
        Ok(toml::from_str(content)?)
    }

    /// Load a plan from a TOML file
    ///
    /// # Parameters
    /// * `path` - Path to the plan file
    ///
    /// # Returns
    /// * `Ok(Plan)` - Successfully loaded plan
    /// * `Err(PlanError)` - Error reading or parsing the file
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, PlanError> {
        let content = fs::read_to_string(&path).map_err(|source| PlanError::Io {
            path: path.as_ref().to_path_buf(),
            source,
        })?;
        Self::from_toml_str(&content)
    }
}
