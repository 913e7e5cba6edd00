//! Morphological tagging, one pure function per table shape.
//!
//! Every tagger walks the cells in source order, drops placeholders and
//! emits one [`Morpheme`] per surviving entry. Header positions are fixed
//! row/column literals of the table family they come from; if the markup
//! drifts the lookups miss and the miss shows up as a warning with
//! [`UNKNOWN_ATTRIBUTE`](super::UNKNOWN_ATTRIBUTE) in place of the value.

use crate::diagnostics::Diagnostics;
use crate::model::{Link, Morpheme, TableShape};
use crate::table::{Cell, Table};

/// Tag every inflected form of `table` as `shape`.
pub fn tag(table: &Table<'_>, shape: TableShape, diagnostics: &mut Diagnostics) -> Vec<Morpheme> {
    match shape {
        TableShape::Conjugation => conjugation(table, diagnostics),
        TableShape::Declension => declension(table, diagnostics),
        TableShape::PronounDeclension => pronoun_declension(table, diagnostics),
        TableShape::FiDeclension => fi_declension(table, diagnostics),
        TableShape::FiConjugation => fi_conjugation(table, diagnostics),
        TableShape::FiVerbid => fi_verbid(table, diagnostics),
    }
}

/// Empty cells and the dashes tables use for "no such form".
pub fn is_placeholder(text: &str) -> bool {
    matches!(text.trim(), "" | "—" | "–")
}

/// Data cells split into their entries, placeholders removed.
fn entries<'t>(table: &'t Table<'_>, delimiters: &'t [char]) -> impl Iterator<Item = Cell> + 't {
    table
        .cells()
        .iter()
        .filter(|cell| !cell.header)
        .flat_map(move |cell| split_all(cell, delimiters))
        .filter(|entry| !is_placeholder(&entry.text))
}

fn split_all(cell: &Cell, delimiters: &[char]) -> Vec<Cell> {
    let mut pieces = vec![cell.clone()];
    for &delimiter in delimiters {
        pieces = pieces
            .iter()
            .flat_map(|piece| piece.split_entries(delimiter))
            .collect();
    }
    pieces
}

// ============================================================================
// English-language conjugation
// ============================================================================

/// First row of the nominal forms (infinitives and participles).
const NOMINAL_FORMS_ROW: usize = 50;
/// Row naming active/passive above the nominal forms.
const ACTIVITY_ROW: usize = 52;
/// Column where participles start.
const PARTICIPLE_COLUMN: usize = 4;
/// Participle rows from here on hold footnotes.
const PARTICIPLE_FOOTNOTE_ROW: usize = 57;
/// Row holding the positive/negative headers.
const VALENCE_ROW: usize = 3;

fn tense_row(row: usize) -> usize {
    match row {
        0..=10 => 2,
        11..=19 => 11,
        20..=29 => 21,
        30..=39 => 31,
        _ => 41,
    }
}

fn mood_row(row: usize) -> usize {
    match row {
        0..=19 => 1,
        20..=29 => 20,
        30..=39 => 30,
        _ => 40,
    }
}

fn conjugation(table: &Table<'_>, diagnostics: &mut Diagnostics) -> Vec<Morpheme> {
    let mut morphemes = Vec::new();

    for entry in entries(table, &['\n']) {
        let (row, col) = table.coordinates(&entry);
        let mut at = |r: usize, c: usize| table.text_at(r, c, diagnostics).to_string();

        let attributes = if row < NOMINAL_FORMS_ROW {
            vec![
                at(row, 0),
                at(VALENCE_ROW, col),
                at(tense_row(row), col),
                at(mood_row(row), 0),
            ]
        } else if col < PARTICIPLE_COLUMN {
            let mut attributes = vec![format!("{} infinitive", at(row, 0))];
            if (55..=64).contains(&row) {
                attributes.push(at(row, 1));
                if row <= 62 {
                    attributes.push(at(ACTIVITY_ROW, col));
                }
            }
            attributes
        } else if row >= PARTICIPLE_FOOTNOTE_ROW {
            continue;
        } else {
            let tense = at(row, PARTICIPLE_COLUMN);
            if row <= 54 {
                vec![at(ACTIVITY_ROW, col), tense, "participle".to_string()]
            } else {
                vec![tense, "participle".to_string()]
            }
        };

        morphemes.push(Morpheme::new(entry.text, attributes));
    }

    morphemes
}

// ============================================================================
// English-language declension
// ============================================================================

const DECLENSION_HEADER_ROWS: usize = 5;
const NUMBER_ROW: usize = 5;

fn declension(table: &Table<'_>, diagnostics: &mut Diagnostics) -> Vec<Morpheme> {
    let mut morphemes = Vec::new();

    for entry in entries(table, &['\n']) {
        let (row, col) = table.coordinates(&entry);
        if row < DECLENSION_HEADER_ROWS {
            continue;
        }

        let mut attributes = vec![
            table.text_at(row, 0, diagnostics).to_string(),
            table.text_at(NUMBER_ROW, col, diagnostics).to_string(),
        ];
        // Accusative rows name their secondary case in column 1.
        if (row == 7 || row == 8) && col == 2 {
            let secondary = table.text_at(row, 1, diagnostics);
            if !secondary.is_empty() {
                attributes.push(secondary.to_string());
            }
        }

        morphemes.push(Morpheme::new(entry.text, attributes));
    }

    morphemes
}

fn pronoun_declension(table: &Table<'_>, diagnostics: &mut Diagnostics) -> Vec<Morpheme> {
    let mut morphemes = Vec::new();

    for entry in entries(table, &[',', '\n']) {
        let (row, col) = table.coordinates(&entry);
        if row == 0 || col == 0 || col == 3 {
            continue;
        }

        let case_col = if col <= 2 { 0 } else { 3 };
        let attributes = vec![
            table.text_at(row, case_col, diagnostics).to_string(),
            table.text_at(0, col, diagnostics).to_string(),
        ];
        morphemes.push(Morpheme::new(entry.text, attributes));
    }

    morphemes
}

// ============================================================================
// Finnish-language tables (raw positions)
// ============================================================================

const FI_DECLENSION_HEADER_ROWS: [usize; 5] = [0, 1, 6, 10, 14];

/// The comitative plural cell lists the stem and the suffix on two lines.
fn is_unsplittable(cell: &Cell) -> bool {
    cell.row == 19 && cell.column == 2 && cell.text.contains("-\n+")
}

fn fi_declension(table: &Table<'_>, diagnostics: &mut Diagnostics) -> Vec<Morpheme> {
    let mut morphemes = Vec::new();

    for cell in table.cells() {
        if cell.column == 0 || FI_DECLENSION_HEADER_ROWS.contains(&cell.row) {
            continue;
        }
        if is_placeholder(&cell.text) {
            continue;
        }

        let pieces = if is_unsplittable(cell) {
            vec![cell.clone()]
        } else {
            cell.split_entries('\n')
        };
        for piece in pieces {
            if piece.text.is_empty() {
                continue;
            }
            let attributes = vec![
                table.raw_text_at(cell.row, 0, diagnostics).to_string(),
                table.raw_text_at(1, cell.column, diagnostics).to_string(),
            ];
            morphemes.push(Morpheme {
                surface_form: piece.text.replace('\n', " "),
                attributes,
                links: table.cell_links(cell),
            });
        }
    }

    morphemes
}

const FI_CONJUGATION_HEADER_COLUMNS: [usize; 3] = [0, 3, 4];

/// Placeholder for "same as above" in conjugation tables.
const DITTO: &str = "-\"-";

fn fi_conjugation(table: &Table<'_>, diagnostics: &mut Diagnostics) -> Vec<Morpheme> {
    let mut morphemes = Vec::new();
    let mood = table.raw_text_at(0, 0, diagnostics).to_lowercase();

    for cell in table.cells() {
        if cell.header || FI_CONJUGATION_HEADER_COLUMNS.contains(&cell.column) {
            continue;
        }
        if cell.text.trim().is_empty() {
            continue;
        }

        let links: Vec<Link> = table
            .cell_links(cell)
            .into_iter()
            .filter(|link| !link.target.contains("index.php"))
            .collect();

        for entry in cell.split_entries('\n') {
            if is_placeholder(&entry.text) || entry.text == DITTO {
                continue;
            }

            let (row, col) = (entry.row, entry.column);
            let tense_row = if row <= 10 { 1 } else { 11 };
            let tense_col = if col < 4 { 0 } else { 2 };
            let valence_row = if row <= 10 { 2 } else { 12 };

            // Plural and polite "you" share one row; the polite form comes last.
            let person = if row == 7 || row == 17 {
                if table.node_text(cell).trim_end().ends_with(&entry.text) {
                    "Te".to_string()
                } else {
                    "te".to_string()
                }
            } else {
                table.raw_text_at(row, 0, diagnostics).to_string()
            };

            let attributes = vec![
                mood.clone(),
                table.raw_text_at(tense_row, tense_col, diagnostics).to_string(),
                person,
                table.raw_text_at(valence_row, col, diagnostics).to_string(),
            ];
            morphemes.push(Morpheme {
                surface_form: entry.text,
                attributes,
                links: links.clone(),
            });
        }
    }

    morphemes
}

/// Column where participles start, counting spans.
const FI_PARTICIPLE_SPAN_COLUMN: usize = 4;

fn infinitive_ordinal(row: usize) -> &'static str {
    match row {
        0..=2 => "1.",
        3 => "pitkä 1.",
        4..=5 => "2.",
        6..=11 => "3.",
        12..=13 => "4.",
        _ => "5.",
    }
}

fn voice(column: usize) -> &'static str {
    if column == 3 { "aktiivi" } else { "passiivi" }
}

fn fi_verbid(table: &Table<'_>, diagnostics: &mut Diagnostics) -> Vec<Morpheme> {
    let mut morphemes = Vec::new();

    for cell in table.cells() {
        if cell.header || table.declares_rowspan(cell) || is_placeholder(&cell.text) {
            continue;
        }

        for entry in cell.split_entries('\n') {
            if entry.text.is_empty() {
                continue;
            }
            let row = entry.row;
            let first_spans_rows = table
                .raw_cell(row, 0)
                .is_some_and(|first| table.declares_rowspan(first));

            let mut attributes = Vec::new();
            if table.span_column(cell) < FI_PARTICIPLE_SPAN_COLUMN {
                attributes.push(format!("{} infinitiivi", infinitive_ordinal(row)));
                if row > 3 && row <= 13 {
                    let case_col = if first_spans_rows { 1 } else { 0 };
                    attributes.push(table.raw_text_at(row, case_col, diagnostics).to_string());
                    if row == 4 || row == 11 {
                        attributes.push(voice(entry.column).to_string());
                    }
                }
            } else {
                if row == 2 || row == 3 {
                    attributes.push(table.raw_text_at(row, 2, diagnostics).to_string());
                    attributes.push(voice(entry.column).to_string());
                } else {
                    let tense_col = if first_spans_rows { 4 } else { 3 };
                    attributes.push(table.raw_text_at(row, tense_col, diagnostics).to_string());
                }
                attributes.push("partisiippi".to_string());
            }

            morphemes.push(Morpheme::new(entry.text, attributes));
        }
    }

    morphemes
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dom::parse_html;
    use crate::table::UNKNOWN_ATTRIBUTE;

    fn tag_html(html: &str, shape: TableShape) -> (Vec<Morpheme>, Diagnostics) {
        let dom = parse_html(html);
        let node = dom.find_by_tag("table").unwrap();
        let table = Table::from_node(&dom, node).unwrap();
        let mut diagnostics = Diagnostics::new();
        let morphemes = tag(&table, shape, &mut diagnostics);
        (morphemes, diagnostics)
    }

    fn attrs(m: &Morpheme) -> Vec<&str> {
        m.attributes.iter().map(String::as_str).collect()
    }

    #[test]
    fn test_placeholders() {
        assert!(is_placeholder(""));
        assert!(is_placeholder("  — "));
        assert!(is_placeholder("–"));
        assert!(!is_placeholder("talo"));
    }

    #[test]
    fn test_tense_and_mood_bands() {
        assert_eq!(tense_row(4), 2);
        assert_eq!(tense_row(15), 11);
        assert_eq!(tense_row(29), 21);
        assert_eq!(tense_row(35), 31);
        assert_eq!(tense_row(45), 41);
        assert_eq!(mood_row(12), 1);
        assert_eq!(mood_row(25), 20);
        assert_eq!(mood_row(33), 30);
        assert_eq!(mood_row(48), 40);
    }

    /// A conjugation table of 66 rows and 6 columns, empty except for
    /// the given `(row, col, text, header)` cells.
    fn conjugation_html(cells: &[(usize, usize, &str, bool)]) -> String {
        let mut html = String::from("<table>");
        for row in 0..66 {
            html.push_str("<tr>");
            for col in 0..6 {
                match cells.iter().find(|&&(r, c, _, _)| (r, c) == (row, col)) {
                    Some(&(_, _, text, true)) => html.push_str(&format!("<th>{text}</th>")),
                    Some(&(_, _, text, false)) => html.push_str(&format!("<td>{text}</td>")),
                    None => html.push_str("<td></td>"),
                }
            }
            html.push_str("</tr>");
        }
        html.push_str("</table>");
        html
    }

    #[test]
    fn test_conjugation_forms() {
        let html = conjugation_html(&[
            // Finite forms
            (1, 0, "indicative", true),
            (2, 1, "present", true),
            (3, 1, "positive", true),
            (4, 0, "1st singular", true),
            (4, 1, "luen", false),
            // Nominal forms
            (52, 2, "active", true),
            (52, 5, "active", true),
            (53, 4, "present", true),
            (53, 5, "lukeva", false),
            (56, 0, "third", true),
            (56, 1, "inessive", true),
            (56, 2, "lukemassa", false),
            (56, 4, "agent", true),
            (56, 5, "lukema", false),
            (58, 5, "footnote", false),
            (63, 0, "fourth", true),
            (63, 1, "nominative", true),
            (63, 2, "lukeminen", false),
        ]);
        let (morphemes, diagnostics) = tag_html(&html, TableShape::Conjugation);
        let attributes_of = |form: &str| {
            morphemes
                .iter()
                .find(|m| m.surface_form == form)
                .map(attrs)
                .unwrap_or_default()
        };

        assert_eq!(
            attributes_of("luen"),
            vec!["1st singular", "positive", "present", "indicative"]
        );
        assert_eq!(attributes_of("lukemassa"), vec!["third infinitive", "inessive", "active"]);
        assert_eq!(attributes_of("lukeminen"), vec!["fourth infinitive", "nominative"]);
        assert_eq!(attributes_of("lukeva"), vec!["active", "present", "participle"]);
        assert_eq!(attributes_of("lukema"), vec!["agent", "participle"]);
        assert!(morphemes.iter().all(|m| m.surface_form != "footnote"));
        assert_eq!(morphemes.len(), 5);
        assert!(diagnostics.is_empty());
    }

    /// A declension table: five header rows, then case rows.
    fn declension_html(rows: &[(&str, &str, &str)]) -> String {
        let mut html = String::from("<table>");
        for i in 0..NUMBER_ROW {
            html.push_str(&format!("<tr><th colspan=\"3\">header {i}</th></tr>"));
        }
        html.push_str("<tr><th></th><th>singular</th><th>plural</th></tr>");
        for (case, singular, plural) in rows {
            html.push_str(&format!(
                "<tr><th>{case}</th><td>{singular}</td><td>{plural}</td></tr>"
            ));
        }
        html.push_str("</table>");
        html
    }

    #[test]
    fn test_declension_case_and_number() {
        let html = declension_html(&[("nominative", "talo", "talot"), ("genitive", "talon", "—")]);
        let (morphemes, diagnostics) = tag_html(&html, TableShape::Declension);

        assert_eq!(morphemes.len(), 3);
        assert_eq!(morphemes[0].surface_form, "talo");
        assert_eq!(attrs(&morphemes[0]), vec!["nominative", "singular"]);
        assert_eq!(attrs(&morphemes[1]), vec!["nominative", "plural"]);
        assert_eq!(attrs(&morphemes[2]), vec!["genitive", "singular"]);
        assert!(diagnostics.is_empty());
    }

    #[test]
    fn test_declension_split_cell() {
        let html = declension_html(&[("partitive", "taloa", "taloja<br>taloita")]);
        let (morphemes, _) = tag_html(&html, TableShape::Declension);

        let plurals: Vec<_> = morphemes
            .iter()
            .filter(|m| m.has_attribute("plural"))
            .map(|m| m.surface_form.as_str())
            .collect();
        assert_eq!(plurals, vec!["taloja", "taloita"]);
        assert!(
            morphemes
                .iter()
                .filter(|m| m.has_attribute("plural"))
                .all(|m| attrs(m) == vec!["partitive", "plural"])
        );
    }

    #[test]
    fn test_declension_secondary_case() {
        let html = declension_html(&[
            ("nominative", "talo", "talot"),
            ("genitive", "talon", "talojen"),
        ]);
        // Rows 7 and 8 carry a secondary case in column 1.
        let html = html.replace(
            "</table>",
            "<tr><th>accusative</th><th>nom.</th><td>talo</td></tr></table>",
        );
        let (morphemes, _) = tag_html(&html, TableShape::Declension);

        let accusative = morphemes.last().unwrap();
        assert_eq!(attrs(accusative), vec!["accusative", "plural", "nom."]);
    }

    #[test]
    fn test_pronoun_declension_splits_commas() {
        let html = r#"<table>
            <tr><th></th><th>singular</th><th>plural</th><th></th><th>singular</th></tr>
            <tr><th>nominative</th><td>minä, mä</td><td>me</td><th>essive</th><td>minuna</td></tr>
            </table>"#;
        let (morphemes, _) = tag_html(html, TableShape::PronounDeclension);

        let forms: Vec<_> = morphemes.iter().map(|m| m.surface_form.as_str()).collect();
        assert_eq!(forms, vec!["minä", "mä", "me", "minuna"]);
        assert_eq!(attrs(&morphemes[1]), vec!["nominative", "singular"]);
        assert_eq!(attrs(&morphemes[3]), vec!["essive", "singular"]);
    }

    #[test]
    fn test_missing_header_is_warned() {
        // The header row is one cell short, so the number of the last form
        // cannot be looked up.
        let html = "<table><tr><td>a</td><td>b</td></tr>\
                    <tr><td>x</td><td>y</td><td>z</td></tr></table>";
        let (morphemes, diagnostics) = tag_html(html, TableShape::PronounDeclension);

        assert_eq!(morphemes.len(), 2);
        assert_eq!(attrs(&morphemes[0]), vec!["x", "b"]);
        assert_eq!(attrs(&morphemes[1]), vec!["x", UNKNOWN_ATTRIBUTE]);
        assert_eq!(diagnostics.warnings().count(), 1);
    }

    #[test]
    fn test_infinitive_ordinals() {
        assert_eq!(infinitive_ordinal(2), "1.");
        assert_eq!(infinitive_ordinal(3), "pitkä 1.");
        assert_eq!(infinitive_ordinal(5), "2.");
        assert_eq!(infinitive_ordinal(9), "3.");
        assert_eq!(infinitive_ordinal(13), "4.");
        assert_eq!(infinitive_ordinal(14), "5.");
    }
}
