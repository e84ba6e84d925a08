//! Document composition
//!
//! Turns a collection into the single markdown document used for both preview
//! and export, and splits an existing markdown document back into sections.

use itertools::Itertools;
use pulldown_cmark::{Event, HeadingLevel, Parser, Tag, TagEnd};

use crate::collection::SectionCollection;
use crate::ids::slugify;
use crate::section::Section;

/// Separator placed between consecutive sections (one blank line)
pub const SEPARATOR: &str = "\n\n";

/// Compose the document: section contents in order, joined by [`SEPARATOR`]
///
/// # Parameters
/// * `collection` - The collection to compose
///
/// # Returns
/// * `String` - The composed markdown, empty for an empty collection
pub fn compose(collection: &SectionCollection) -> String {
    collection
        .sections()
        .iter()
        .map(|section| section.content.as_str())
        .join(SEPARATOR)
}

/// Split markdown into sections at every top-level level 1 and level 2 heading
///
/// Headings nested in block quotes or list items stay inside the current
/// section. Each section runs from its heading to the next cut. Text before the first
/// heading becomes an `intro` section. Ids are slugs of the heading text and
/// are not deduplicated here (see [`SectionCollection::from_sections`]).
///
/// # Parameters
/// * `markdown` - Markdown document to split
///
/// # Returns
/// * `Vec<Section>` - Sections in document order; empty for blank input
pub fn split_markdown(markdown: &str) -> Vec<Section> {
    let mut cuts: Vec<(usize, String)> = Vec::new();
    let mut heading: Option<(usize, String)> = None;
    // Headings inside block quotes, lists or footnotes are not section breaks
    let mut container_depth = 0usize;

    for (event, range) in Parser::new(markdown).into_offset_iter() {
        match event {
            Event::Start(
                Tag::BlockQuote(_) | Tag::List(_) | Tag::Item | Tag::FootnoteDefinition(_),
            ) => container_depth += 1,
            Event::End(
                TagEnd::BlockQuote(_) | TagEnd::List(_) | TagEnd::Item | TagEnd::FootnoteDefinition,
            ) => container_depth = container_depth.saturating_sub(1),
            Event::Start(Tag::Heading { level, .. })
                if container_depth == 0
                    && matches!(level, HeadingLevel::H1 | HeadingLevel::H2) =>
            {
                heading = Some((range.start, String::new()));
            }
            Event::Text(text) | Event::Code(text) => {
                if let Some((_, title)) = heading.as_mut() {
                    title.push_str(&text);
                }
            }
            Event::End(TagEnd::Heading(_)) => {
                if let Some(cut) = heading.take() {
                    cuts.push(cut);
                }
            }
            _ => {}
        }
    }

    let mut sections = Vec::with_capacity(cuts.len() + 1);

    let preamble_end = cuts.first().map_or(markdown.len(), |(start, _)| *start);
    let preamble = markdown[..preamble_end].trim();
    if !preamble.is_empty() {
        sections.push(Section::new("intro", "Introduction", preamble));
    }

    for (index, (start, title)) in cuts.iter().enumerate() {
        let end = cuts.get(index + 1).map_or(markdown.len(), |(next, _)| *next);
        let title = title.trim();
        sections.push(Section::new(
            slugify(title),
            title,
            markdown[*start..end].trim(),
        ));
    }

    log::debug!("Split markdown into {} sections", sections.len());
    sections
}
