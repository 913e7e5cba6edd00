//! Page extraction.
//!
//! A page is scoped to the Finnish term by its language headline (`h2`).
//! The headline's following siblings, up to the next language, are
//! segmented by heading level; every level-3 segment becomes an entry.
//!
//! # Example
//!
//! ```
//! use wikilex::{Extractor, ExtractorConfig};
//!
//! let html = r#"<h1>talo</h1><h2>Finnish</h2>
//!     <h3>Noun</h3><p>talo</p><ol><li>house</li><li>building</li></ol>"#;
//! let page = Extractor::new()
//!     .with_config(ExtractorConfig::english())
//!     .extract_html(html);
//!
//! assert_eq!(page.term, "talo");
//! assert_eq!(page.entries[0].content.definitions().len(), 2);
//! ```

pub mod config;
pub mod content;
pub mod english;
pub mod example;
pub mod finnish;
pub mod text;

pub use config::{Dialect, EntryLayout, ExtractorConfig, TranslationFilter};

use std::fs;
use std::path::Path;

use percent_encoding::{AsciiSet, CONTROLS, utf8_percent_encode};

use crate::dom::queries::{ERROR_MESSAGE, HEADLINE, TABLE, TITLE};
use crate::dom::{ArenaDom, ArenaNodeId, parse_bytes, parse_html};
use crate::error::Result;
use crate::model::{InflectionPage, PageResult, TableShape};
use crate::section::{HeadingTag, segment};
use crate::table::extract_table_as;
use text::trimmed_text;

/// Markup a host substitutes for a page it failed to retrieve.
const ERROR_PAGE: &str = r#"<html><head></head><body><p class="error">{message}</p></body></html>"#;

/// Bytes escaped in the path of a page URL.
const PAGE_TITLE: &AsciiSet = &CONTROLS
    .add(b' ')
    .add(b'"')
    .add(b'#')
    .add(b'%')
    .add(b'<')
    .add(b'>')
    .add(b'?')
    .add(b'`')
    .add(b'{')
    .add(b'}');

/// Extracts [`PageResult`]s from Wiktionary pages.
#[derive(Debug, Clone, Default)]
pub struct Extractor {
    config: ExtractorConfig,
}

impl Extractor {
    /// Create an extractor for en.wiktionary.org pages.
    pub fn new() -> Self {
        Self {
            config: ExtractorConfig::default(),
        }
    }

    pub fn with_config(mut self, config: ExtractorConfig) -> Self {
        self.config = config;
        self
    }

    pub fn config(&self) -> &ExtractorConfig {
        &self.config
    }

    pub fn extract_html(&self, html: &str) -> PageResult {
        extract_page(&parse_html(html), &self.config)
    }

    /// Extract from raw bytes, sniffing the encoding.
    pub fn extract_bytes(&self, bytes: &[u8]) -> PageResult {
        extract_page(&parse_bytes(bytes), &self.config)
    }

    pub fn extract_file(&self, path: impl AsRef<Path>) -> Result<PageResult> {
        let bytes = fs::read(path)?;
        Ok(self.extract_bytes(&bytes))
    }
}

// ============================================================================
// Page scoping
// ============================================================================

/// Extract every entry of a parsed page.
pub fn extract_page(dom: &ArenaDom, config: &ExtractorConfig) -> PageResult {
    let root = dom.document();
    let mut result = PageResult {
        term: dom
            .select_first(root, &TITLE)
            .map(|h1| trimmed_text(dom, h1))
            .unwrap_or_default(),
        ..PageResult::default()
    };

    if let Some(error) = dom.select_first(root, &ERROR_MESSAGE) {
        let message = trimmed_text(dom, error);
        result.diagnostics.note(format!("page not retrieved: {message}"));
        result.error = Some(message);
        return result;
    }

    let marker = config.marker();
    let Some(headline) = find_headline(dom, marker) else {
        result.diagnostics.note(format!("no {marker} section on the page"));
        return result;
    };

    let nodes = scoped_siblings(dom, headline, config);
    let dialect = config.dialect;
    let segmentation = segment(
        dom,
        nodes,
        |dom, node| is_boundary(dom, node, marker),
        dialect.heading_tags(),
    );

    let entry_level = dialect.entry_level();
    result.orphans = segmentation.leading.len()
        + segmentation
            .segments
            .iter()
            .filter(|s| s.level != entry_level)
            .map(|s| s.node_count())
            .sum::<usize>();
    if result.orphans > 0 {
        result.diagnostics.warn(format!(
            "{} nodes under the {marker} headline belong to no entry",
            result.orphans
        ));
    }

    let mut found = false;
    for seg in segmentation.segments.iter().filter(|s| s.level == entry_level) {
        found = true;
        let built = match dialect {
            Dialect::English => english::build_entries(dom, seg, config, &mut result.diagnostics),
            Dialect::Finnish => finnish::build_entry(dom, seg, config, &mut result.diagnostics)
                .map(|entry| vec![entry]),
        };
        match built {
            Ok(entries) => result.entries.extend(entries),
            Err(err) => result
                .diagnostics
                .warn(format!("skipped entry '{}': {err}", seg.heading)),
        }
    }
    if !found {
        result
            .diagnostics
            .warn(format!("no entry headings under the {marker} headline"));
    }

    result
}

/// The language headline, an `h2` whose text mentions the marker in any
/// letter case.
fn find_headline(dom: &ArenaDom, marker: &str) -> Option<ArenaNodeId> {
    let marker = marker.to_lowercase();
    dom.select(dom.document(), &HEADLINE)
        .into_iter()
        .find(|&h2| dom.text_content(h2).to_lowercase().contains(&marker))
}

/// Whether a node ends the language section: another language's `h2`
/// or the `noscript` placeholder closing the article.
pub fn is_boundary(dom: &ArenaDom, node: ArenaNodeId, marker: &str) -> bool {
    if dom.is_tag(node, "noscript") {
        return true;
    }
    dom.is_tag(node, "h2")
        && !dom
            .text_content(node)
            .to_lowercase()
            .contains(&marker.to_lowercase())
}

/// Siblings following the headline, heading wrappers unwrapped and
/// skipped `div`s left out.
fn scoped_siblings(dom: &ArenaDom, headline: ArenaNodeId, config: &ExtractorConfig) -> Vec<ArenaNodeId> {
    let anchor = dom
        .parent(headline)
        .filter(|&p| is_heading_wrapper(dom, p))
        .unwrap_or(headline);

    dom.following_elements(anchor)
        .map(|node| unwrap_heading(dom, node))
        .filter(|&node| {
            !(dom.is_tag(node, "div")
                && config.skipped_classes.iter().any(|c| dom.has_class(node, c)))
        })
        .collect()
}

fn is_heading_wrapper(dom: &ArenaDom, node: ArenaNodeId) -> bool {
    dom.is_tag(node, "div") && dom.has_class(node, "mw-heading")
}

/// `<div class="mw-heading"><h3>…</h3>…</div>` stands for its heading.
fn unwrap_heading(dom: &ArenaDom, node: ArenaNodeId) -> ArenaNodeId {
    if !is_heading_wrapper(dom, node) {
        return node;
    }
    dom.element_children(node)
        .find(|&child| HeadingTag::of(dom, child).is_some())
        .unwrap_or(node)
}

// ============================================================================
// Conjugation pages
// ============================================================================

/// Extract the tables of a fi.wiktionary.org verb conjugation page.
///
/// Finite forms come first, then infinitives and participles.
pub fn extract_conjugation_page(html: &str) -> InflectionPage {
    extract_conjugation_dom(&parse_html(html))
}

/// [`extract_conjugation_page`] over raw bytes, sniffing the encoding.
pub fn extract_conjugation_bytes(bytes: &[u8]) -> InflectionPage {
    extract_conjugation_dom(&parse_bytes(bytes))
}

fn extract_conjugation_dom(dom: &ArenaDom) -> InflectionPage {
    let mut finite = Vec::new();
    let mut verbids = Vec::new();
    let mut page = InflectionPage::default();

    for table in dom.select(dom.document(), &TABLE) {
        let Ok(set) = extract_table_as(dom, table, Dialect::Finnish) else {
            continue;
        };
        let (block, diagnostics) = set.into_parts();
        page.diagnostics.extend(diagnostics);
        match block.shape {
            TableShape::FiConjugation => finite.push(block),
            TableShape::FiVerbid => verbids.push(block),
            _ => {}
        }
    }

    if finite.is_empty() && verbids.is_empty() {
        page.diagnostics.warn("no conjugation tables on the page");
    }
    page.blocks = finite;
    page.blocks.extend(verbids);
    page
}

// ============================================================================
// Retrieval helpers
// ============================================================================

/// Minimal page standing in for one that could not be retrieved.
pub fn error_page(message: &str) -> String {
    let escaped = message
        .replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;");
    ERROR_PAGE.replace("{message}", &escaped)
}

/// Address of a term's page in the given edition.
pub fn term_url(dialect: Dialect, term: &str) -> String {
    format!(
        "https://{}.wiktionary.org/wiki/{}",
        dialect.code(),
        encode_title(term)
    )
}

/// Address of a verb's conjugation page on fi.wiktionary.org.
pub fn conjugation_url(verb: &str) -> String {
    format!(
        "https://fi.wiktionary.org/wiki/Liite:Verbitaivutus/suomi/{}",
        encode_title(verb)
    )
}

fn encode_title(title: &str) -> String {
    utf8_percent_encode(&title.replace(' ', "_"), PAGE_TITLE).to_string()
}
