//! Hyperlinks found inside extracted text.

use percent_encoding::percent_decode_str;

use crate::dom::queries::LINKS;
use crate::dom::{ArenaDom, ArenaNodeId};

/// A hyperlink as it appeared on the page.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "cli", derive(serde::Serialize))]
pub struct Link {
    /// Anchor text, trimmed.
    pub display_text: String,
    /// Raw `href`.
    pub target: String,
    /// `title` attribute, empty when absent.
    #[cfg_attr(feature = "cli", serde(skip_serializing_if = "String::is_empty"))]
    pub title: String,
}

impl Link {
    /// Read a link from an `<a href>` element.
    pub fn from_anchor(dom: &ArenaDom, anchor: ArenaNodeId) -> Option<Self> {
        let target = dom.attr(anchor, "href")?;
        Some(Self {
            display_text: dom.text_content(anchor).trim().to_string(),
            target: target.to_string(),
            title: dom.attr(anchor, "title").unwrap_or_default().to_string(),
        })
    }

    /// Wiki page this link points at, e.g. `Liite:Verbitaivutus/suomi/sanoa`.
    ///
    /// `None` for links leaving the wiki's article namespace.
    pub fn page_title(&self) -> Option<String> {
        let path = self.target.strip_prefix("/wiki/")?;
        let path = path.split('#').next().unwrap_or(path);
        if path.is_empty() {
            return None;
        }
        let decoded = percent_decode_str(path).decode_utf8_lossy();
        Some(decoded.replace('_', " "))
    }
}

/// Every link below `root` (inclusive), in document order, duplicates removed.
pub fn collect_links(dom: &ArenaDom, root: ArenaNodeId) -> Vec<Link> {
    let mut links = Vec::new();
    let anchors = std::iter::once(root)
        .filter(|&id| LINKS.matches(dom, id))
        .chain(dom.select(root, &LINKS));
    for anchor in anchors {
        if let Some(link) = Link::from_anchor(dom, anchor) {
            push_unique(&mut links, link);
        }
    }
    links
}

/// Append links not already present, keeping first occurrences.
pub fn merge_links(into: &mut Vec<Link>, more: impl IntoIterator<Item = Link>) {
    for link in more {
        push_unique(into, link);
    }
}

fn push_unique(links: &mut Vec<Link>, link: Link) {
    if !links.contains(&link) {
        links.push(link);
    }
}
