//! Table shape detection.
//!
//! Inflection tables carry no reliable class names, so shapes are sniffed
//! from their structure: the row count for the English-language tables,
//! header row layout for the Finnish-language ones.

use crate::dom::queries::TABLE;
use crate::dom::{ArenaDom, ArenaNodeId};
use crate::error::TableShapeError;
use crate::extract::Dialect;
use crate::model::TableShape;
use crate::table::own_rows;

/// Row count of the English-language verb conjugation table.
pub const CONJUGATION_ROWS: usize = 66;
/// Row count of the English-language declension table.
pub const DECLENSION_ROWS: usize = 22;
/// The pronoun table is a single-row wrapper around the real table.
pub const PRONOUN_WRAPPER_ROWS: usize = 1;

/// Rows in the tbody of a Finnish-language declension table.
pub const FI_DECLENSION_ROWS: usize = 20;
/// Rows of the infinitive/participle table on a conjugation page.
pub const FI_VERBID_ROWS: usize = 15;

/// Determine a table's shape and the element to tag.
///
/// The element differs from `node` only for the pronoun table, whose
/// inner table holds the forms.
pub fn classify(
    dom: &ArenaDom,
    node: ArenaNodeId,
    dialect: Dialect,
) -> Result<(TableShape, ArenaNodeId), TableShapeError> {
    if !dom.is_tag(node, "table") {
        return Err(TableShapeError::NotATable {
            tag: dom.tag_name(node).unwrap_or("#text").to_string(),
        });
    }
    match dialect {
        Dialect::English => classify_english(dom, node),
        Dialect::Finnish => classify_finnish(dom, node),
    }
}

fn classify_english(
    dom: &ArenaDom,
    node: ArenaNodeId,
) -> Result<(TableShape, ArenaNodeId), TableShapeError> {
    match own_rows(dom, node).len() {
        CONJUGATION_ROWS => Ok((TableShape::Conjugation, node)),
        DECLENSION_ROWS => Ok((TableShape::Declension, node)),
        PRONOUN_WRAPPER_ROWS => {
            let inner = dom
                .select_first(node, &TABLE)
                .ok_or(TableShapeError::MissingInnerTable)?;
            Ok((TableShape::PronounDeclension, inner))
        }
        rows => Err(TableShapeError::Unrecognized { rows }),
    }
}

fn classify_finnish(
    dom: &ArenaDom,
    node: ArenaNodeId,
) -> Result<(TableShape, ArenaNodeId), TableShapeError> {
    if is_fi_declension(dom, node) {
        return Ok((TableShape::FiDeclension, node));
    }

    let rows = own_rows(dom, node);
    let header_cells = rows
        .first()
        .map(|&tr| dom.element_children(tr).count())
        .unwrap_or(0);
    match (header_cells, rows.len()) {
        (1, _) => Ok((TableShape::FiConjugation, node)),
        (2, FI_VERBID_ROWS) => Ok((TableShape::FiVerbid, node)),
        (_, rows) => Err(TableShapeError::Unrecognized { rows }),
    }
}

/// A `wikitable` whose tbody holds exactly the declension rows.
pub fn is_fi_declension(dom: &ArenaDom, node: ArenaNodeId) -> bool {
    if !dom.is_tag(node, "table") || !dom.has_class(node, "wikitable") {
        return false;
    }
    let Some(tbody) = dom.first_element_child(node) else {
        return false;
    };
    dom.is_tag(tbody, "tbody") && dom.element_children(tbody).count() == FI_DECLENSION_ROWS
}

/// Finnish declension tables at or below `root`, outermost first.
pub fn find_fi_declensions(dom: &ArenaDom, root: ArenaNodeId) -> Vec<ArenaNodeId> {
    std::iter::once(root)
        .chain(dom.select(root, &TABLE))
        .filter(|&id| is_fi_declension(dom, id))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dom::parse_html;

    fn rows_html(n: usize) -> String {
        let mut html = String::from("<table>");
        for i in 0..n {
            html.push_str(&format!("<tr><td>{i}</td></tr>"));
        }
        html.push_str("</table>");
        html
    }

    fn classify_en(html: &str) -> Result<TableShape, TableShapeError> {
        let dom = parse_html(html);
        let table = dom.find_by_tag("table").unwrap();
        classify(&dom, table, Dialect::English).map(|(shape, _)| shape)
    }

    #[test]
    fn test_english_row_counts() {
        assert_eq!(classify_en(&rows_html(66)), Ok(TableShape::Conjugation));
        assert_eq!(classify_en(&rows_html(22)), Ok(TableShape::Declension));
        assert_eq!(
            classify_en(&rows_html(7)),
            Err(TableShapeError::Unrecognized { rows: 7 })
        );
    }

    #[test]
    fn test_pronoun_wrapper_targets_inner_table() {
        let dom = parse_html(
            "<table><tr><td><table id=\"inner\"><tr><td>minä</td></tr></table></td></tr></table>",
        );
        let outer = dom.find_by_tag("table").unwrap();
        let (shape, target) = classify(&dom, outer, Dialect::English).unwrap();

        assert_eq!(shape, TableShape::PronounDeclension);
        assert_eq!(dom.attr(target, "id"), Some("inner"));
    }

    #[test]
    fn test_single_row_without_inner_table() {
        assert_eq!(
            classify_en(&rows_html(1)),
            Err(TableShapeError::MissingInnerTable)
        );
    }

    #[test]
    fn test_finnish_declension() {
        let mut html = String::from("<table class=\"wikitable\"><tbody>");
        for _ in 0..20 {
            html.push_str("<tr><td>x</td></tr>");
        }
        html.push_str("</tbody></table>");
        let dom = parse_html(&format!("<div>{html}</div>"));
        let div = dom.find_by_tag("div").unwrap();
        let table = dom.find_by_tag("table").unwrap();

        assert_eq!(
            classify(&dom, table, Dialect::Finnish).map(|(s, _)| s),
            Ok(TableShape::FiDeclension)
        );
        assert_eq!(find_fi_declensions(&dom, div), vec![table]);
    }

    #[test]
    fn test_finnish_conjugation_page_tables() {
        let dom = parse_html(
            "<table><tr><th>Indikatiivi</th></tr><tr><td>a</td><td>b</td></tr></table>",
        );
        let table = dom.find_by_tag("table").unwrap();
        assert_eq!(
            classify(&dom, table, Dialect::Finnish).map(|(s, _)| s),
            Ok(TableShape::FiConjugation)
        );

        let mut html = String::from("<table><tr><th>a</th><th>b</th></tr>");
        for _ in 0..14 {
            html.push_str("<tr><td>x</td></tr>");
        }
        html.push_str("</table>");
        let dom = parse_html(&html);
        let table = dom.find_by_tag("table").unwrap();
        assert_eq!(
            classify(&dom, table, Dialect::Finnish).map(|(s, _)| s),
            Ok(TableShape::FiVerbid)
        );
    }
}
