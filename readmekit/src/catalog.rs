//! Section template catalog
//!
//! The catalog is the read-only registry of known README sections. It supplies
//! the bootstrap set, the "available to add" list and the content used when a
//! section is reset to its default.
//!
//! The built-in catalog is compiled into the binary. A custom catalog can be
//! loaded from a TOML file of `[[template]]` tables:
//!
//! ```toml
//! [[template]]
//! id = "title"
//! title = "Project Title"
//! default = true
//! content = "# Project Title"
//! ```

use itertools::Itertools;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// A named section template
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SectionTemplate {
    /// Template identifier (e.g., "installation")
    pub id: String,
    /// Display title (e.g., "Installation")
    pub title: String,
    /// Default markdown content
    pub content: String,
}

impl SectionTemplate {
    /// Create a new template
    pub fn new(id: impl Into<String>, title: impl Into<String>, content: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            title: title.into(),
            content: content.into(),
        }
    }
}

/// Errors that can occur when building or loading a catalog
#[derive(Error, Debug)]
pub enum CatalogError {
    #[error("Failed to read catalog {path}: {source}", path = .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("TOML parse error: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Duplicate template id '{0}'")]
    DuplicateId(String),

    #[error("Default section '{0}' is not defined in the catalog")]
    UnknownDefault(String),
}

/// Immutable registry of section templates
#[derive(Debug, Clone)]
pub struct Catalog {
    /// All templates in their fixed listing order
    templates: Vec<SectionTemplate>,
    /// Indices into `templates` of the bootstrap subset, ascending
    defaults: Vec<usize>,
}

/// On-disk catalog layout
#[derive(Debug, Deserialize)]
struct CatalogFile {
    #[serde(rename = "template", default)]
    templates: Vec<CatalogEntry>,
}

#[derive(Debug, Deserialize)]
struct CatalogEntry {
    id: String,
    title: String,
    content: String,
    #[serde(default)]
    default: bool,
}

impl Catalog {
    /// Build a catalog from templates and the ids of its bootstrap subset
    ///
    /// # Parameters
    /// * `templates` - All templates, in listing order
    /// * `default_ids` - Ids of the templates used for bootstrap
    ///
    /// # Returns
    /// * `Ok(Catalog)` - Validated catalog; defaults keep the listing order
    /// * `Err(CatalogError)` - Duplicate template id or unknown default id
    pub fn new<S: AsRef<str>>(
        templates: Vec<SectionTemplate>,
        default_ids: &[S],
    ) -> Result<Self, CatalogError> {
        if let Some(duplicate) = templates.iter().map(|t| t.id.as_str()).duplicates().next() {
            return Err(CatalogError::DuplicateId(duplicate.to_string()));
        }

        for id in default_ids {
            if !templates.iter().any(|t| t.id == id.as_ref()) {
                return Err(CatalogError::UnknownDefault(id.as_ref().to_string()));
            }
        }

        let defaults = templates
            .iter()
            .enumerate()
            .filter(|(_, t)| default_ids.iter().any(|id| id.as_ref() == t.id))
            .map(|(index, _)| index)
            .collect();

        Ok(Self {
            templates,
            defaults,
        })
    }

    /// Parse a catalog from TOML text
    pub fn from_toml_str(content: &str) -> Result<Self, CatalogError> {
        let file: CatalogFile = toml::from_str(content)?;

        let default_ids: Vec<String> = file
            .templates
            .iter()
            .filter(|entry| entry.default)
            .map(|entry| entry.id.clone())
            .collect();

        let templates = file
            .templates
            .into_iter()
            .map(|entry| SectionTemplate::new(entry.id, entry.title, entry.content))
            .collect();

        Self::new(templates, &default_ids)
    }

    /// Load a catalog from a TOML file
    ///
    /// # Parameters
    /// * `path` - Path to the catalog file
    ///
    /// # Returns
    /// * `Ok(Catalog)` - Successfully loaded catalog
    /// * `Err(CatalogError)` - Error reading, parsing or validating the file
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, CatalogError> {
        let content = fs::read_to_string(&path).map_err(|source| CatalogError::Io {
            path: path.as_ref().to_path_buf(),
            source,
        })?;

        let catalog = Self::from_toml_str(&content)?;
        log::info!(
            "Loaded {} templates ({} defaults) from {}",
            catalog.templates.len(),
            catalog.defaults.len(),
            path.as_ref().display()
        );
        Ok(catalog)
    }

    /// The built-in README catalog
    pub fn builtin() -> Self {
        let entries = builtin_templates();
        let defaults = entries
            .iter()
            .enumerate()
            .filter(|(_, (_, is_default))| *is_default)
            .map(|(index, _)| index)
            .collect();

        Self {
            templates: entries.into_iter().map(|(template, _)| template).collect(),
            defaults,
        }
    }

    /// Every template in fixed listing order
    pub fn list_all(&self) -> &[SectionTemplate] {
        &self.templates
    }

    /// The bootstrap subset, in listing order
    pub fn list_defaults(&self) -> Vec<&SectionTemplate> {
        self.defaults.iter().map(|&i| &self.templates[i]).collect()
    }

    /// Look up a template by id
    pub fn find_by_id(&self, id: &str) -> Option<&SectionTemplate> {
        self.templates.iter().find(|t| t.id == id)
    }

    /// Whether `id` belongs to the bootstrap subset
    pub fn is_default(&self, id: &str) -> bool {
        self.defaults.iter().any(|&i| self.templates[i].id == id)
    }

    /// Template used when resetting a section: defaults first, then everything
    pub fn default_template(&self, id: &str) -> Option<&SectionTemplate> {
        self.list_defaults()
            .into_iter()
            .find(|t| t.id == id)
            .or_else(|| self.find_by_id(id))
    }
}

impl Default for Catalog {
    fn default() -> Self {
        Self::builtin()
    }
}

/// Built-in templates with their bootstrap flag
fn builtin_templates() -> Vec<(SectionTemplate, bool)> {
    vec![
        (
            SectionTemplate::new(
                "title",
                "Project Title",
                "# Project Title\n\nA brief description of your project.",
            ),
            true,
        ),
        (
            SectionTemplate::new(
                "badges",
                "Badges",
                "![Build](https://img.shields.io/badge/build-passing-brightgreen) ![License](https://img.shields.io/badge/license-MIT-blue)",
            ),
            false,
        ),
        (
            SectionTemplate::new(
                "table-of-contents",
                "Table of Contents",
                "## Table of Contents\n\n- [Installation](#installation)\n- [Usage](#usage)\n- [Contributing](#contributing)\n- [License](#license)",
            ),
            false,
        ),
        (
            SectionTemplate::new(
                "description",
                "Description",
                "## Description\n\nDetailed description of your project. What it does, why you built it, etc.",
            ),
            true,
        ),
        (
            SectionTemplate::new(
                "features",
                "Features",
                "## Features\n\n- Feature one\n- Feature two\n- Feature three",
            ),
            false,
        ),
        (
            SectionTemplate::new(
                "demo",
                "Demo",
                "## Demo\n\n![Screenshot](docs/screenshot.png)\n\nA short walkthrough of the project in action.",
            ),
            false,
        ),
        (
            SectionTemplate::new(
                "installation",
                "Installation",
                "## Installation\n\nInstructions on how to install and set up your project.\n\n```bash\nnpm install my-project\n```",
            ),
            true,
        ),
        (
            SectionTemplate::new(
                "usage",
                "Usage",
                "## Usage\n\nHow to use your project. Provide code examples if applicable.\n\n```javascript\nimport { something } from \"my-project\";\n\n// code example\nsomething();\n```",
            ),
            true,
        ),
        (
            SectionTemplate::new(
                "running-tests",
                "Running Tests",
                "## Running Tests\n\nExplain how to run the automated tests for this project.\n\n```bash\nnpm test\n```",
            ),
            false,
        ),
        (
            SectionTemplate::new(
                "deployment",
                "Deployment",
                "## Deployment\n\nNotes on how to deploy the project to a live system.",
            ),
            false,
        ),
        (
            SectionTemplate::new(
                "built-with",
                "Built With",
                "## Built With\n\n- [Framework](https://example.com) - The framework used\n- [Library](https://example.com) - A library the project depends on",
            ),
            false,
        ),
        (
            SectionTemplate::new(
                "roadmap",
                "Roadmap",
                "## Roadmap\n\n- [ ] Planned feature\n- [ ] Another planned feature",
            ),
            false,
        ),
        (
            SectionTemplate::new(
                "faq",
                "FAQ",
                "## FAQ\n\n**Question?**\n\nAnswer.",
            ),
            false,
        ),
        (
            SectionTemplate::new(
                "contributing",
                "Contributing",
                "## Contributing\n\nGuidelines for how other developers can contribute to your project. Please read CONTRIBUTING.md for details on our code of conduct, and the process for submitting pull requests to us.",
            ),
            true,
        ),
        (
            SectionTemplate::new(
                "changelog",
                "Changelog",
                "## Changelog\n\nSee CHANGELOG.md for a list of notable changes in each release.",
            ),
            false,
        ),
        (
            SectionTemplate::new(
                "authors",
                "Authors",
                "## Authors\n\n- **Your Name** - *Initial work*",
            ),
            false,
        ),
        (
            SectionTemplate::new(
                "support",
                "Support",
                "## Support\n\nOpen an issue on the project tracker if you need help.",
            ),
            false,
        ),
        (
            SectionTemplate::new(
                "license",
                "License",
                "## License\n\nThis project is licensed under the MIT License - see the LICENSE.md file for details.",
            ),
            true,
        ),
        (
            SectionTemplate::new(
                "acknowledgments",
                "Acknowledgments",
                "## Acknowledgments\n\n- Hat tip to anyone whose code was used\n- Inspiration\n- etc",
            ),
            false,
        ),
    ]
}
