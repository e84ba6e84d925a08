//! Section model for individual README blocks

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::catalog::SectionTemplate;

/// A section in the live document (one independently editable block)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Section {
    /// Identifier, unique within the owning collection
    pub id: String,
    /// Human-readable title shown in the section list
    pub title: String,
    /// Raw markdown content (opaque to the collection)
    pub content: String,
}

impl Section {
    /// Create a new section
    ///
    /// # Parameters
    /// * `id` - Section identifier
    /// * `title` - Display title
    /// * `content` - Markdown content
    pub fn new(id: impl Into<String>, title: impl Into<String>, content: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            title: title.into(),
            content: content.into(),
        }
    }
}

impl From<&SectionTemplate> for Section {
    fn from(template: &SectionTemplate) -> Self {
        Self {
            id: template.id.clone(),
            title: template.title.clone(),
            content: template.content.clone(),
        }
    }
}

impl fmt::Display for Section {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({})", self.title, self.id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_section_from_template_is_deep_copy() {
        let template = SectionTemplate::new("usage", "Usage", "## Usage");
        let mut section = Section::from(&template);
        section.content.push_str("\n\nMore");

        assert_eq!(section.id, "usage");
        assert_eq!(section.title, "Usage");
        assert_eq!(template.content, "## Usage");
    }

    #[test]
    fn test_display() {
        let section = Section::new("license", "License", "## License");
        assert_eq!(section.to_string(), "License (license)");
    }
}
