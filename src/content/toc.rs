//! Table-of-contents extraction from a markdown body.

use crate::utils::slug::heading_slug;
use pulldown_cmark::{Event, Options, Parser, Tag, TagEnd};
use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};

/// Deepest heading level listed in the table of contents.
pub const TOC_MAX_DEPTH: u8 = 3;

/// A heading listed in the in-page navigation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TocEntry {
    /// Heading text with inline markup stripped
    pub content: String,
    /// Anchor id, de-duplicated with a `-N` suffix
    pub slug: String,
    /// Heading level (2..=`TOC_MAX_DEPTH`)
    pub lvl: u8,
}

/// Extract headings up to [`TOC_MAX_DEPTH`], excluding the level-1 title.
///
/// Headings inside fenced code never count.
pub fn extract_toc(body: &str) -> Vec<TocEntry> {
    let mut entries = Vec::new();
    let mut seen: FxHashMap<String, usize> = FxHashMap::default();
    let mut current: Option<(u8, String)> = None;

    for event in Parser::new_ext(body, Options::ENABLE_TABLES | Options::ENABLE_STRIKETHROUGH) {
        match event {
            Event::Start(Tag::Heading { level, .. }) => {
                current = Some((level as u8, String::new()));
            }
            Event::Text(text) | Event::Code(text) => {
                if let Some((_, buf)) = current.as_mut() {
                    buf.push_str(&text);
                }
            }
            Event::End(TagEnd::Heading(_)) => {
                let Some((lvl, content)) = current.take() else {
                    continue;
                };
                // anchors are assigned to every heading, listed or not
                let base = heading_slug(&content);
                let count = seen.entry(base.clone()).or_insert(0);
                let slug = if *count == 0 {
                    base
                } else {
                    format!("{base}-{count}")
                };
                *count += 1;

                if lvl > 1 && lvl <= TOC_MAX_DEPTH {
                    entries.push(TocEntry {
                        content: content.trim().to_owned(),
                        slug,
                        lvl,
                    });
                }
            }
            _ => {}
        }
    }

    entries
}
