//! Section bodies: ranked definitions or loose content units.

use crate::diagnostics::Diagnostics;
use crate::dom::queries::{LIST_ENTRIES, LIST_ITEM, TABLE};
use crate::dom::{ArenaDom, ArenaNodeId};
use crate::extract::text::normalized_text;
use crate::model::{Content, ContentUnit, Definition, Item, Section, collect_links};
use crate::section::Segment;
use crate::table::{describe_table, extract_table};

/// Dialect-specific steps of content building.
pub trait ContentRules {
    /// Build the definition for one `li` of a definition list.
    fn definition(
        &self,
        dom: &ArenaDom,
        li: ArenaNodeId,
        rank: usize,
        diagnostics: &mut Diagnostics,
    ) -> Definition;

    /// Turn a table met among the items into a content unit, if it is one.
    fn route_table(
        &self,
        dom: &ArenaDom,
        table: ArenaNodeId,
        diagnostics: &mut Diagnostics,
    ) -> Option<ContentUnit>;
}

/// Route a table through the English shapes.
///
/// An unrecognized table is reported and dropped.
pub fn route_english_table(
    dom: &ArenaDom,
    table: ArenaNodeId,
    diagnostics: &mut Diagnostics,
) -> Option<ContentUnit> {
    match extract_table(dom, table) {
        Ok(set) => {
            let (block, table_diagnostics) = set.into_parts();
            diagnostics.extend(table_diagnostics);
            Some(ContentUnit::Inflections(block))
        }
        Err(err) => {
            diagnostics.warn_with(
                format!("{err}: {}", describe_table(dom, table)),
                dom.outer_html(table),
            );
            None
        }
    }
}

/// Whether a body opens with a `p` directly followed by an `ol`.
pub fn has_definition_list(dom: &ArenaDom, body: &[ArenaNodeId]) -> bool {
    matches!(body, [p, ol, ..] if dom.is_tag(*p, "p") && dom.is_tag(*ol, "ol"))
}

/// Classify and build the content of a section body.
pub fn build_content<R: ContentRules + ?Sized>(
    dom: &ArenaDom,
    body: &[ArenaNodeId],
    rules: &R,
    diagnostics: &mut Diagnostics,
) -> Content {
    if has_definition_list(dom, body) {
        let definitions = dom
            .children_matching(body[1], &LIST_ITEM)
            .into_iter()
            .enumerate()
            .map(|(i, li)| rules.definition(dom, li, i + 1, diagnostics))
            .collect();
        return Content::Definitions(definitions);
    }

    let mut units = Vec::new();
    for &node in body {
        push_units(dom, node, rules, diagnostics, &mut units);
    }
    if units.is_empty() {
        Content::Empty
    } else {
        Content::Items(units)
    }
}

/// A section and its subsections.
pub fn build_section<R: ContentRules + ?Sized>(
    dom: &ArenaDom,
    segment: &Segment,
    rules: &R,
    diagnostics: &mut Diagnostics,
) -> Section {
    Section {
        heading: segment.heading.clone(),
        content: build_content(dom, &segment.body, rules, diagnostics),
        subsections: segment
            .children
            .iter()
            .map(|child| build_section(dom, child, rules, diagnostics))
            .collect(),
    }
}

/// One `Item` for a node: its collapsed text and links.
pub fn item(dom: &ArenaDom, node: ArenaNodeId) -> Item {
    Item {
        text: normalized_text(dom, node),
        links: collect_links(dom, node),
    }
}

fn push_units<R: ContentRules + ?Sized>(
    dom: &ArenaDom,
    node: ArenaNodeId,
    rules: &R,
    diagnostics: &mut Diagnostics,
    units: &mut Vec<ContentUnit>,
) {
    let Some(tag) = dom.tag_name(node) else {
        return;
    };
    if matches!(tag, "script" | "style" | "noscript") || dom.is_blank(node) {
        return;
    }

    match tag {
        "p" => units.push(ContentUnit::Item(item(dom, node))),
        "ul" | "ol" | "dd" => push_list_items(dom, node, units),
        "div" => {
            let tables = dom.select_outermost(node, &TABLE);
            if tables.is_empty() {
                push_list_items(dom, node, units);
            } else {
                units.extend(
                    tables
                        .into_iter()
                        .filter_map(|table| rules.route_table(dom, table, diagnostics)),
                );
            }
        }
        "table" => units.extend(rules.route_table(dom, node, diagnostics)),
        _ => units.push(ContentUnit::Item(item(dom, node))),
    }
}

fn push_list_items(dom: &ArenaDom, node: ArenaNodeId, units: &mut Vec<ContentUnit>) {
    units.extend(
        dom.select_outermost(node, &LIST_ENTRIES)
            .into_iter()
            .filter(|&entry| !dom.is_blank(entry))
            .map(|entry| ContentUnit::Item(item(dom, entry))),
    );
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dom::parse_html;

    struct Bare;

    impl ContentRules for Bare {
        fn definition(
            &self,
            dom: &ArenaDom,
            li: ArenaNodeId,
            rank: usize,
            _: &mut Diagnostics,
        ) -> Definition {
            Definition {
                rank,
                text: normalized_text(dom, li),
                examples: Vec::new(),
                notes: Vec::new(),
                links: Vec::new(),
            }
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

    fn body(dom: &ArenaDom) -> Vec<ArenaNodeId> {
        let body = dom.find_by_tag("body").unwrap();
        dom.element_children(body).collect()
    }

    fn texts(content: &Content) -> Vec<&str> {
        content
            .units()
            .iter()
            .filter_map(|u| match u {
                ContentUnit::Item(item) => Some(item.text.as_str()),
                ContentUnit::Inflections(_) => None,
            })
            .collect()
    }

    #[test]
    fn test_definitions_ranked() {
        let dom = parse_html("<p>talo</p><ol><li>house</li><li>building</li><li>firm</li></ol>");
        let mut diagnostics = Diagnostics::new();
        let content = build_content(&dom, &body(&dom), &Bare, &mut diagnostics);

        let ranks: Vec<_> = content.definitions().iter().map(|d| d.rank).collect();
        assert_eq!(ranks, vec![1, 2, 3]);
        assert_eq!(content.definitions()[1].text, "building");
        assert!(diagnostics.is_empty());
    }

    #[test]
    fn test_items_dispatch() {
        let dom = parse_html(
            "<p>From  Proto-Finnic\n*talo.</p>\
             <ul><li>one</li><li>two<ul><li>nested</li></ul></li></ul>\
             <script>var x;</script><p>  </p><dl><dd>loose</dd></dl>",
        );
        let mut diagnostics = Diagnostics::new();
        let content = build_content(&dom, &body(&dom), &Bare, &mut diagnostics);

        assert_eq!(
            texts(&content),
            vec!["From Proto-Finnic *talo.", "one", "twonested", "loose"]
        );
    }

    #[test]
    fn test_unknown_table_is_warned() {
        let dom = parse_html(
            r#"<p>x</p><table class="wikitable"><tr><td>a</td></tr><tr><td>b</td></tr></table>"#,
        );
        let mut diagnostics = Diagnostics::new();
        let content = build_content(&dom, &body(&dom), &Bare, &mut diagnostics);

        assert_eq!(texts(&content), vec!["x"]);
        assert_eq!(diagnostics.warnings().count(), 1);
        let warning = diagnostics.iter().next().unwrap();
        assert!(warning.message.contains("table.wikitable (2 rows)"));
        assert!(warning.context.as_deref().unwrap().starts_with("<table"));
    }

    #[test]
    fn test_div_without_tables_yields_list_items() {
        let dom = parse_html("<div><ul><li>a</li></ul><dl><dd>b</dd></dl></div>");
        let mut diagnostics = Diagnostics::new();
        let content = build_content(&dom, &body(&dom), &Bare, &mut diagnostics);

        assert_eq!(texts(&content), vec!["a", "b"]);
    }

    #[test]
    fn test_empty_body() {
        let dom = parse_html("<p> </p>");
        let mut diagnostics = Diagnostics::new();
        let content = build_content(&dom, &body(&dom), &Bare, &mut diagnostics);
        assert_eq!(content, Content::Empty);
    }
}
