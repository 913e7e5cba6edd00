//! Entries of fi.wiktionary.org pages.
//!
//! The Finnish edition lays an entry out as a category heading, a word
//! paragraph (`<p><b>lemma</b> info</p>`), a numbered definition list and
//! then `h4`/`h5` sections. Declension tables may sit anywhere in the
//! entry, often buried in `div`s.

use crate::diagnostics::Diagnostics;
use crate::dom::queries::{DEFINITION_LIST, DESCRIPTION, LINKS, LIST_ITEM};
use crate::dom::{ArenaDom, ArenaNodeId};
use crate::error::EntryError;
use crate::extract::config::{Dialect, ExtractorConfig, TranslationFilter};
use crate::extract::content::{ContentRules, build_content};
use crate::extract::conjugation_url;
use crate::extract::text::{normalized_text, trimmed_text};
use crate::model::{Content, ContentUnit, Definition, Entry, Example, Section, collect_links};
use crate::section::{HeadingTag, Segment};
use crate::table::{describe_table, extract_table_as};
use crate::table::shape::find_fi_declensions;

/// Lexical categories used as entry headings, lower-cased.
pub const PARTS_OF_SPEECH: &[&str] = &[
    "aakkonen",
    "adjektiivi",
    "adpositio",
    "adverbi",
    "artikkeli",
    "erisnimi",
    "fraasi",
    "interjektio",
    "konjunktio",
    "lyhenne",
    "numeraali",
    "postpositio",
    "prepositio",
    "prefiksi",
    "pronomini",
    "substantiivi",
    "suffiksi",
    "supistuma",
    "verbi",
];

/// Link prefix of a verb's separate conjugation page.
pub const CONJUGATION_LINK_PREFIX: &str = "/wiki/Liite:Verbitaivutus/suomi/";

/// Content rules of the Finnish dialect.
///
/// Declension tables met among items are skipped, as they are gathered per
/// entry instead; any other table is reported and dropped.
#[derive(Debug, Clone, Copy, Default)]
pub struct Finnish;

impl ContentRules for Finnish {
    fn definition(
        &self,
        dom: &ArenaDom,
        li: ArenaNodeId,
        rank: usize,
        _diagnostics: &mut Diagnostics,
    ) -> Definition {
        definition(dom, li, rank)
    }

    fn route_table(
        &self,
        dom: &ArenaDom,
        table: ArenaNodeId,
        diagnostics: &mut Diagnostics,
    ) -> Option<ContentUnit> {
        if find_fi_declensions(dom, table).is_empty() {
            diagnostics.warn_with(
                format!("unrecognized table: {}", describe_table(dom, table)),
                dom.outer_html(table),
            );
        }
        None
    }
}

pub fn is_known_category(category: &str) -> bool {
    PARTS_OF_SPEECH.contains(&category.to_lowercase().as_str())
}

// ============================================================================
// Entries
// ============================================================================

/// Build the entry scoped by one level-3 segment.
pub fn build_entry(
    dom: &ArenaDom,
    segment: &Segment,
    config: &ExtractorConfig,
    diagnostics: &mut Diagnostics,
) -> Result<Entry, EntryError> {
    if HeadingTag::of(dom, segment.heading_node) != Some(HeadingTag::H3) {
        return Err(EntryError::NotAHeading {
            tag: dom.tag_name(segment.heading_node).unwrap_or("#text").to_string(),
        });
    }
    if segment.body.iter().all(|&n| dom.is_blank(n)) && segment.children.is_empty() {
        return Err(EntryError::Empty);
    }

    let mut entry = Entry::new(segment.heading.clone());
    entry.category = Some(segment.heading.clone());
    if !is_known_category(&segment.heading) {
        diagnostics.warn(format!("unknown word category '{}'", segment.heading));
    }

    let word = segment.body.iter().copied().find(|&n| is_word_paragraph(dom, n));
    if let Some(word) = word {
        apply_word_paragraph(dom, word, &mut entry);
    }

    entry.content = match segment.body.iter().copied().find(|&n| dom.is_tag(n, "ol")) {
        Some(ol) => Content::Definitions(
            dom.children_matching(ol, &LIST_ITEM)
                .into_iter()
                .enumerate()
                .map(|(i, li)| definition(dom, li, i + 1))
                .collect(),
        ),
        None => {
            let rest: Vec<_> = segment.body.iter().copied().filter(|&n| Some(n) != word).collect();
            build_content(dom, &rest, &Finnish, diagnostics)
        }
    };

    let filter = config.translation_filter.as_ref();
    entry.sections = segment
        .children
        .iter()
        .filter_map(|child| build_section(dom, child, filter, diagnostics))
        .collect();

    for table in scope_nodes(segment)
        .into_iter()
        .flat_map(|node| find_fi_declensions(dom, node))
    {
        match extract_table_as(dom, table, Dialect::Finnish) {
            Ok(set) => {
                let (block, table_diagnostics) = set.into_parts();
                diagnostics.extend(table_diagnostics);
                entry.inflections.push(block);
            }
            Err(err) => diagnostics.warn(err.to_string()),
        }
    }

    Ok(entry)
}

/// `<p><b>lemma</b> …</p>`
fn is_word_paragraph(dom: &ArenaDom, node: ArenaNodeId) -> bool {
    dom.is_tag(node, "p")
        && dom
            .first_element_child(node)
            .is_some_and(|first| dom.is_tag(first, "b"))
}

fn apply_word_paragraph(dom: &ArenaDom, word: ArenaNodeId, entry: &mut Entry) {
    let Some(lemma) = dom.first_element_child(word) else {
        return;
    };
    let headword = trimmed_text(dom, lemma);

    let (mut rest, root) = dom.clone_subtree(word);
    if let Some(first) = rest.first_element_child(root) {
        rest.detach(first);
    }
    let info = trimmed_text(&rest, root);

    let links_to_conjugation = dom
        .select(word, &LINKS)
        .into_iter()
        .filter_map(|a| dom.attr(a, "href"))
        .any(|href| href.starts_with(CONJUGATION_LINK_PREFIX));
    if links_to_conjugation {
        entry.conjugation_page = Some(conjugation_url(&headword));
    }

    entry.info = (!info.is_empty()).then_some(info);
    entry.headword = (!headword.is_empty()).then_some(headword);
    entry.links = collect_links(dom, word);
}

/// Every node under the entry heading, subsection headings included.
fn scope_nodes(segment: &Segment) -> Vec<ArenaNodeId> {
    let mut nodes = segment.body.clone();
    let mut pending: Vec<&Segment> = segment.children.iter().rev().collect();
    while let Some(child) = pending.pop() {
        nodes.push(child.heading_node);
        nodes.extend(child.body.iter().copied());
        pending.extend(child.children.iter().rev());
    }
    nodes
}

// ============================================================================
// Sections and definitions
// ============================================================================

/// A `h4`/`h5` section, or `None` when neither it nor its subsections
/// hold any text.
fn build_section(
    dom: &ArenaDom,
    segment: &Segment,
    filter: Option<&TranslationFilter>,
    diagnostics: &mut Diagnostics,
) -> Option<Section> {
    let subsections: Vec<_> = segment
        .children
        .iter()
        .filter_map(|child| build_section(dom, child, filter, diagnostics))
        .collect();
    let has_text = segment.body.iter().any(|&n| !dom.is_blank(n));
    if !has_text && subsections.is_empty() {
        return None;
    }

    let mut content = build_content(dom, &segment.body, &Finnish, diagnostics);
    if let Some(filter) = filter.filter(|f| f.applies_to(&segment.heading))
        && let Content::Items(units) = &mut content
    {
        units.retain(|unit| match unit {
            ContentUnit::Item(item) => filter.keeps(&item.text),
            ContentUnit::Inflections(_) => true,
        });
    }

    Some(Section {
        heading: segment.heading.clone(),
        content,
        subsections,
    })
}

/// One sense; every `dd` of its first `dl` is an example sentence.
pub fn definition(dom: &ArenaDom, li: ArenaNodeId, rank: usize) -> Definition {
    let (mut copy, root) = dom.clone_subtree(li);
    let mut examples = Vec::new();

    if let Some(dl) = copy.select_first(root, &DEFINITION_LIST) {
        examples = copy
            .select(dl, &DESCRIPTION)
            .into_iter()
            .map(|dd| Example {
                primary_text: normalized_text(&copy, dd),
                secondary_text: String::new(),
                note: None,
                links: collect_links(&copy, dd),
            })
            .collect();
        copy.detach(dl);
    }

    Definition {
        rank,
        text: normalized_text(&copy, root),
        examples,
        notes: Vec::new(),
        links: collect_links(&copy, root),
    }
}
