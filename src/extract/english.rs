//! Entries of en.wiktionary.org pages.

use crate::diagnostics::Diagnostics;
use crate::dom::queries::{DEFINITION_LIST, HEADWORD, QUOTATION_TOGGLE};
use crate::dom::{ArenaDom, ArenaNodeId};
use crate::error::EntryError;
use crate::extract::config::{EntryLayout, ExtractorConfig};
use crate::extract::content::{
    ContentRules, build_content, build_section, has_definition_list, route_english_table,
};
use crate::extract::example::{ExampleShape, parse_example};
use crate::extract::text::{normalized_text, trimmed_text};
use crate::model::{Content, ContentUnit, Definition, Entry, Note, collect_links};
use crate::section::{HeadingTag, Segment};

/// Content rules of the English dialect.
#[derive(Debug, Clone, Copy, Default)]
pub struct English;

impl ContentRules for English {
    fn definition(
        &self,
        dom: &ArenaDom,
        li: ArenaNodeId,
        rank: usize,
        diagnostics: &mut Diagnostics,
    ) -> Definition {
        definition(dom, li, rank, diagnostics)
    }

    fn route_table(
        &self,
        dom: &ArenaDom,
        table: ArenaNodeId,
        diagnostics: &mut Diagnostics,
    ) -> Option<ContentUnit> {
        route_english_table(dom, table, diagnostics)
    }
}

// ============================================================================
// Entries
// ============================================================================

/// Build the entries scoped by one level-3 segment.
///
/// With [`EntryLayout::SectionLevel`], level-4 sections holding definitions
/// are promoted to entries of their own, after the one for the segment.
pub fn build_entries(
    dom: &ArenaDom,
    segment: &Segment,
    config: &ExtractorConfig,
    diagnostics: &mut Diagnostics,
) -> Result<Vec<Entry>, EntryError> {
    if HeadingTag::of(dom, segment.heading_node) != Some(HeadingTag::H3) {
        return Err(EntryError::NotAHeading {
            tag: dom.tag_name(segment.heading_node).unwrap_or("#text").to_string(),
        });
    }
    if segment.body.iter().all(|&n| dom.is_blank(n)) && segment.children.is_empty() {
        return Err(EntryError::Empty);
    }

    let mut entry = entry_from(dom, segment, diagnostics);
    let mut promoted = Vec::new();

    for child in &segment.children {
        let promote = config.entry_layout == EntryLayout::SectionLevel
            && has_definition_list(dom, &child.body);
        if promote {
            promoted.push(entry_from(dom, child, diagnostics));
        } else {
            entry
                .sections
                .push(build_section(dom, child, &English, diagnostics));
        }
    }

    let mut entries = vec![entry];
    entries.extend(promoted);
    Ok(entries)
}

/// An entry for a segment without its subsections.
fn entry_from(dom: &ArenaDom, segment: &Segment, diagnostics: &mut Diagnostics) -> Entry {
    let mut entry = Entry::new(segment.heading.clone());
    entry.content = build_content(dom, &segment.body, &English, diagnostics);
    if matches!(entry.content, Content::Definitions(_)) {
        entry.category = Some(segment.heading.clone());
    }

    if let Some(&line) = segment.body.first()
        && dom.is_tag(line, "p")
    {
        entry.headword = dom
            .select_first(line, &HEADWORD)
            .map(|strong| trimmed_text(dom, strong))
            .filter(|text| !text.is_empty());
        entry.links = collect_links(dom, line);
    }
    entry
}

// ============================================================================
// Definitions
// ============================================================================

/// One sense: the `li` text minus its nested example lists.
///
/// Direct `dl` children carry examples; the other entries of the first one
/// are kept as notes. When one example fails to parse, the definition keeps
/// no examples at all.
pub fn definition(
    dom: &ArenaDom,
    li: ArenaNodeId,
    rank: usize,
    diagnostics: &mut Diagnostics,
) -> Definition {
    let (mut copy, root) = dom.clone_subtree(li);
    for toggle in copy.select(root, &QUOTATION_TOGGLE) {
        copy.detach(toggle);
    }

    let lists = copy.children_matching(root, &DEFINITION_LIST);
    let mut examples = Vec::new();
    let mut notes = Vec::new();
    let mut failed = false;

    for (i, &dl) in lists.iter().enumerate() {
        for child in copy.element_children(dl) {
            if ExampleShape::detect(&copy, child).is_some() {
                match parse_example(&copy, child) {
                    Ok(example) => examples.push(example),
                    Err(err) => {
                        diagnostics.warn_with(
                            format!("definition {rank}: unparsable example"),
                            err.fragment(),
                        );
                        failed = true;
                    }
                }
            } else if i == 0 && !copy.is_blank(child) {
                notes.push(Note::new(
                    normalized_text(&copy, child),
                    collect_links(&copy, child),
                ));
            }
        }
    }
    if failed {
        examples.clear();
    }

    for dl in lists {
        copy.detach(dl);
    }

    Definition {
        rank,
        text: normalized_text(&copy, root),
        examples,
        notes,
        links: collect_links(&copy, root),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dom::parse_html;
    use crate::section::segment;

    fn segments(html: &str) -> (ArenaDom, Vec<Segment>) {
        let dom = parse_html(html);
        let body = dom.find_by_tag("body").unwrap();
        let nodes: Vec<_> = dom.element_children(body).collect();
        let seg = segment(&dom, nodes, |_, _| false, &[HeadingTag::H3, HeadingTag::H4]);
        (dom, seg.segments)
    }

    fn first_li(dom: &ArenaDom) -> ArenaNodeId {
        dom.find_by_tag("li").unwrap()
    }

    #[test]
    fn test_definition_with_example_and_note() {
        let dom = parse_html(
            r#"<ol><li>(<a href="/wiki/transitive">transitive</a>) to read
            <span class="HQToggle">Quotations ▼</span>
            <dl>
              <dd><i>Luen kirjaa.</i><dl><dd>I am reading a book.</dd></dl></dd>
              <dd>Synonym: <a href="/wiki/tavata">tavata</a></dd>
            </dl></li></ol>"#,
        );
        let mut diagnostics = Diagnostics::new();
        let def = definition(&dom, first_li(&dom), 1, &mut diagnostics);

        assert_eq!(def.text, "(transitive) to read");
        assert_eq!(def.examples.len(), 1);
        assert_eq!(def.examples[0].secondary_text, "I am reading a book.");
        assert_eq!(def.notes.len(), 1);
        assert_eq!(def.notes[0].text, "Synonym: tavata");
        assert_eq!(def.links.len(), 1);
        assert!(diagnostics.is_empty());
    }

    #[test]
    fn test_definition_leaves_source_untouched() {
        let dom = parse_html("<ol><li>house<dl><dd>Talo.<dl><dd>House.</dd></dl></dd></dl></li></ol>");
        let li = first_li(&dom);
        let mut diagnostics = Diagnostics::new();
        let def = definition(&dom, li, 1, &mut diagnostics);

        assert_eq!(def.text, "house");
        assert_eq!(def.examples[0].primary_text, "Talo.");
        assert!(dom.first_element_child(li).is_some());
    }

    #[test]
    fn test_failed_example_clears_examples() {
        let dom = parse_html(
            "<ol><li>sense<dl>\
             <dd>Hyvä.<dl><dd>Good.</dd></dl></dd>\
             <dd><i>(vanh.)</i><dl><dd>Old.</dd></dl></dd>\
             </dl></li></ol>",
        );
        let mut diagnostics = Diagnostics::new();
        let def = definition(&dom, first_li(&dom), 2, &mut diagnostics);

        assert_eq!(def.rank, 2);
        assert_eq!(def.text, "sense");
        assert!(def.examples.is_empty());
        assert_eq!(diagnostics.warnings().count(), 1);
    }

    #[test]
    fn test_entry_with_definitions() {
        let (dom, segs) = segments(
            r#"<h3>Noun</h3>
            <p><strong class="Latn headword" lang="fi">talo</strong> (<a href="/wiki/Appendix:Finnish_nominal_inflection">kotus</a>)</p>
            <ol><li>house</li><li>building</li></ol>
            <h4>Synonyms</h4><ul><li>rakennus</li></ul>"#,
        );
        let mut diagnostics = Diagnostics::new();
        let entries = build_entries(&dom, &segs[0], &ExtractorConfig::english(), &mut diagnostics).unwrap();

        assert_eq!(entries.len(), 1);
        let entry = &entries[0];
        assert_eq!(entry.category.as_deref(), Some("Noun"));
        assert_eq!(entry.headword.as_deref(), Some("talo"));
        assert_eq!(entry.content.definitions().len(), 2);
        assert_eq!(entry.links.len(), 1);
        assert_eq!(entry.section("Synonyms").unwrap().content.units().len(), 1);
    }

    #[test]
    fn test_section_level_layout() {
        let html = "<h3>Etymology 1</h3><p>From Proto-Finnic.</p>\
                    <h4>Noun</h4><p>kuusi</p><ol><li>spruce</li></ol>\
                    <h4>Declension</h4><p>x</p>";
        let (dom, segs) = segments(html);
        let mut diagnostics = Diagnostics::new();

        let flat = build_entries(&dom, &segs[0], &ExtractorConfig::english(), &mut diagnostics).unwrap();
        assert_eq!(flat.len(), 1);
        assert_eq!(flat[0].category, None);
        assert_eq!(flat[0].sections.len(), 2);

        let config = ExtractorConfig::english().with_layout(EntryLayout::SectionLevel);
        let promoted = build_entries(&dom, &segs[0], &config, &mut diagnostics).unwrap();
        assert_eq!(promoted.len(), 2);
        assert_eq!(promoted[0].sections.len(), 1);
        assert_eq!(promoted[1].category.as_deref(), Some("Noun"));
    }

    #[test]
    fn test_entry_contract() {
        let (dom, segs) = segments("<h4>Usage notes</h4><p>x</p><h3>Noun</h3>");
        let mut diagnostics = Diagnostics::new();
        let config = ExtractorConfig::english();

        assert_eq!(
            build_entries(&dom, &segs[0], &config, &mut diagnostics),
            Err(EntryError::NotAHeading { tag: "h4".into() })
        );
        assert_eq!(
            build_entries(&dom, &segs[1], &config, &mut diagnostics),
            Err(EntryError::Empty)
        );
    }
}
