//! Inflection tables: cell model, virtual grid, shape detection and tagging.
//!
//! A [`Table`] reads the rows and cells of one `<table>` element (nested
//! tables excluded) and virtualizes them. [`extract_table`] then picks the
//! [`TableShape`] and runs the matching tagger.

pub mod grid;
pub mod shape;
pub mod tagger;

use crate::diagnostics::Diagnostics;
use crate::dom::queries::{EXTERNAL_LINK, FOOTNOTE, TABLE_CELL};
use crate::dom::{ArenaDom, ArenaNodeId};
use crate::error::TableShapeError;
use crate::extract::Dialect;
use crate::model::{InflectionSet, Link, collect_links};

pub use grid::{CellId, MAX_COLSPAN, MAX_ROWSPAN, Span, VirtualGrid};
pub use shape::classify;

/// Attribute value used when a header lookup falls outside the table.
pub const UNKNOWN_ATTRIBUTE: &str = "?";

/// One `th`/`td`, or one entry split out of it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Cell {
    pub id: CellId,
    /// Text with footnote markers and external links removed, trimmed.
    pub text: String,
    /// Raw row index.
    pub row: usize,
    /// Raw index within the row, spans not counted.
    pub column: usize,
    pub colspan: usize,
    pub rowspan: usize,
    /// `th` rather than `td`.
    pub header: bool,
    pub node: ArenaNodeId,
}

impl Cell {
    /// One synthetic cell per `delimiter`-separated entry.
    ///
    /// Entries are trimmed; every other field, `id` included, is shared
    /// with the parent cell.
    pub fn split_entries(&self, delimiter: char) -> Vec<Cell> {
        self.text
            .split(delimiter)
            .map(|entry| Cell {
                text: entry.trim().to_string(),
                ..self.clone()
            })
            .collect()
    }
}

/// A span attribute, clamped to what browsers honour.
fn span_attr(dom: &ArenaDom, node: ArenaNodeId, name: &str, max: usize) -> usize {
    dom.attr(node, name)
        .and_then(|v| v.trim().parse::<usize>().ok())
        .unwrap_or(1)
        .clamp(1, max)
}

/// Text of a cell without its first footnote marker and external links.
fn cell_text(dom: &ArenaDom, node: ArenaNodeId) -> String {
    let (mut copy, root) = dom.clone_subtree(node);
    let mut removed = copy.select_first(root, &FOOTNOTE).into_iter().collect::<Vec<_>>();
    removed.extend(copy.select(root, &EXTERNAL_LINK));
    for id in removed {
        copy.detach(id);
    }
    copy.text_content(root).trim().to_string()
}

/// The `tr` elements belonging to `table` itself.
pub fn own_rows(dom: &ArenaDom, table: ArenaNodeId) -> Vec<ArenaNodeId> {
    let mut rows = Vec::new();
    for child in dom.element_children(table) {
        match dom.tag_name(child) {
            Some("tr") => rows.push(child),
            Some("thead" | "tbody" | "tfoot") => {
                rows.extend(dom.element_children(child).filter(|&r| dom.is_tag(r, "tr")));
            }
            _ => {}
        }
    }
    rows
}

/// A parsed, virtualized table.
pub struct Table<'a> {
    dom: &'a ArenaDom,
    node: ArenaNodeId,
    cells: Vec<Cell>,
    rows: Vec<Vec<CellId>>,
    grid: VirtualGrid,
}

impl<'a> Table<'a> {
    pub fn from_node(dom: &'a ArenaDom, node: ArenaNodeId) -> Result<Self, TableShapeError> {
        if !dom.is_tag(node, "table") {
            return Err(TableShapeError::NotATable {
                tag: dom.tag_name(node).unwrap_or("#text").to_string(),
            });
        }

        let mut cells = Vec::new();
        let mut rows = Vec::new();
        for (row, tr) in own_rows(dom, node).into_iter().enumerate() {
            let mut ids = Vec::new();
            for (column, td) in dom.children_matching(tr, &TABLE_CELL).into_iter().enumerate() {
                let id = CellId(cells.len());
                cells.push(Cell {
                    id,
                    text: cell_text(dom, td),
                    row,
                    column,
                    colspan: span_attr(dom, td, "colspan", MAX_COLSPAN),
                    rowspan: span_attr(dom, td, "rowspan", MAX_ROWSPAN),
                    header: dom.is_tag(td, "th"),
                    node: td,
                });
                ids.push(id);
            }
            rows.push(ids);
        }

        let spans: Vec<Vec<Span>> = rows
            .iter()
            .map(|ids| {
                ids.iter()
                    .map(|&id| {
                        let cell = &cells[id.0];
                        Span::new(id, cell.colspan, cell.rowspan)
                    })
                    .collect()
            })
            .collect();
        let grid = VirtualGrid::virtualize(&spans);

        Ok(Self {
            dom,
            node,
            cells,
            rows,
            grid,
        })
    }

    pub fn node(&self) -> ArenaNodeId {
        self.node
    }

    pub fn dom(&self) -> &'a ArenaDom {
        self.dom
    }

    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    /// Cells in source order.
    pub fn cells(&self) -> &[Cell] {
        &self.cells
    }

    pub fn cell(&self, id: CellId) -> Option<&Cell> {
        self.cells.get(id.0)
    }

    pub fn grid(&self) -> &VirtualGrid {
        &self.grid
    }

    /// Logical coordinates of a cell, falling back to its raw position.
    pub fn coordinates(&self, cell: &Cell) -> (usize, usize) {
        self.grid
            .logical_coordinates(cell.id)
            .unwrap_or((cell.row, cell.column))
    }

    /// Text at a logical coordinate.
    ///
    /// A miss is recorded as a warning and yields [`UNKNOWN_ATTRIBUTE`].
    pub fn text_at(&self, row: usize, col: usize, diagnostics: &mut Diagnostics) -> &str {
        match self.grid.cell_at(row, col) {
            Ok(id) => self.cells[id.0].text.as_str(),
            Err(err) => {
                diagnostics.warn(format!("{err} in {}", self.describe()));
                UNKNOWN_ATTRIBUTE
            }
        }
    }

    /// Cell at a raw position, spans not counted.
    pub fn raw_cell(&self, row: usize, col: usize) -> Option<&Cell> {
        let id = self.rows.get(row)?.get(col)?;
        self.cells.get(id.0)
    }

    /// Text at a raw position, with the same fallback as [`Table::text_at`].
    pub fn raw_text_at(&self, row: usize, col: usize, diagnostics: &mut Diagnostics) -> &str {
        match self.raw_cell(row, col) {
            Some(cell) => cell.text.as_str(),
            None => {
                diagnostics.warn(format!(
                    "no raw cell at row {row}, column {col} in {}",
                    self.describe()
                ));
                UNKNOWN_ATTRIBUTE
            }
        }
    }

    /// Column of `cell` counting the colspans of the cells left of it.
    pub fn span_column(&self, cell: &Cell) -> usize {
        self.rows
            .get(cell.row)
            .map(|ids| {
                ids.iter()
                    .take(cell.column)
                    .map(|id| self.cells[id.0].colspan)
                    .sum()
            })
            .unwrap_or(0)
    }

    /// Does the cell's markup declare a rowspan?
    pub fn declares_rowspan(&self, cell: &Cell) -> bool {
        self.dom.attr(cell.node, "rowspan").is_some()
    }

    /// Full text of the cell element, footnotes included.
    pub fn node_text(&self, cell: &Cell) -> String {
        self.dom.text_content(cell.node)
    }

    pub fn cell_links(&self, cell: &Cell) -> Vec<Link> {
        collect_links(self.dom, cell.node)
    }

    /// Short description for diagnostics: class or id, and row count.
    pub fn describe(&self) -> String {
        describe_table(self.dom, self.node)
    }
}

pub(crate) fn describe_table(dom: &ArenaDom, node: ArenaNodeId) -> String {
    let rows = own_rows(dom, node).len();
    match (dom.attr(node, "class"), dom.attr(node, "id")) {
        (Some(class), _) => {
            let classes: Vec<_> = class.split_whitespace().collect();
            format!("table.{} ({rows} rows)", classes.join("."))
        }
        (None, Some(id)) => format!("table#{id} ({rows} rows)"),
        (None, None) => format!("table ({rows} rows)"),
    }
}

/// Classify and tag an English-dialect inflection table.
pub fn extract_table(dom: &ArenaDom, node: ArenaNodeId) -> Result<InflectionSet, TableShapeError> {
    extract_table_as(dom, node, Dialect::English)
}

/// Classify and tag a table using the shapes known for `dialect`.
pub fn extract_table_as(
    dom: &ArenaDom,
    node: ArenaNodeId,
    dialect: Dialect,
) -> Result<InflectionSet, TableShapeError> {
    let (shape, target) = classify(dom, node, dialect)?;
    let table = Table::from_node(dom, target)?;
    let mut diagnostics = Diagnostics::new();
    let morphemes = tagger::tag(&table, shape, &mut diagnostics);
    Ok(InflectionSet {
        shape,
        morphemes,
        diagnostics,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dom::parse_html;

    fn first_table(dom: &ArenaDom) -> ArenaNodeId {
        dom.find_by_tag("table").unwrap()
    }

    #[test]
    fn test_cells_and_spans() {
        let dom = parse_html(
            r#"<table>
            <tr><th rowspan="2">case</th><th colspan="2">number</th></tr>
            <tr><td>talo</td><td>talot</td></tr>
            </table>"#,
        );
        let table = Table::from_node(&dom, first_table(&dom)).unwrap();

        assert_eq!(table.row_count(), 2);
        assert_eq!(table.cells().len(), 5);
        let talot = &table.cells()[4];
        assert_eq!(talot.text, "talot");
        assert_eq!((talot.row, talot.column), (1, 1));
        assert_eq!(table.coordinates(talot), (1, 2));
        assert_eq!(table.span_column(&table.cells()[2]), 1);
    }

    #[test]
    fn test_hostile_spans_are_clamped() {
        let dom = parse_html(
            r#"<table>
            <tr><td rowspan="30000000">a</td><td colspan="99999999999999999999">b</td></tr>
            <tr><td>c</td></tr>
            </table>"#,
        );
        let table = Table::from_node(&dom, first_table(&dom)).unwrap();

        assert_eq!(table.cells()[0].rowspan, MAX_ROWSPAN);
        assert_eq!(table.cells()[1].colspan, 1);
        assert_eq!(table.grid().dimensions(), (2, 2));
        assert_eq!(table.coordinates(&table.cells()[2]), (1, 1));
    }

    #[test]
    fn test_cell_text_strips_footnotes_and_external_links() {
        let dom = parse_html(
            r#"<table><tr><td>talo<sup>1</sup> <a class="external" href="https://x">[e]</a></td></tr></table>"#,
        );
        let table = Table::from_node(&dom, first_table(&dom)).unwrap();
        assert_eq!(table.cells()[0].text, "talo");
        assert!(table.node_text(&table.cells()[0]).contains('1'));
    }

    #[test]
    fn test_split_entries_shares_id() {
        let dom = parse_html("<table><tr><td>puhun<br>en puhu </td></tr></table>");
        let table = Table::from_node(&dom, first_table(&dom)).unwrap();

        let entries = table.cells()[0].split_entries('\n');
        assert_eq!(entries.len(), 2);
        assert_eq!(entries[0].text, "puhun");
        assert_eq!(entries[1].text, "en puhu");
        assert!(entries.iter().all(|e| e.id == table.cells()[0].id));
        assert_eq!(table.coordinates(&entries[1]), (0, 0));
    }

    #[test]
    fn test_nested_table_rows_excluded() {
        let dom = parse_html(
            "<table><tr><td><table><tr><td>a</td></tr><tr><td>b</td></tr></table></td></tr></table>",
        );
        let outer = first_table(&dom);
        assert_eq!(own_rows(&dom, outer).len(), 1);
    }

    #[test]
    fn test_lookup_miss_is_warning() {
        let dom = parse_html("<table><tr><td>a</td></tr></table>");
        let table = Table::from_node(&dom, first_table(&dom)).unwrap();
        let mut diagnostics = Diagnostics::new();

        assert_eq!(table.text_at(0, 0, &mut diagnostics), "a");
        assert_eq!(table.text_at(4, 4, &mut diagnostics), UNKNOWN_ATTRIBUTE);
        assert_eq!(table.raw_text_at(0, 9, &mut diagnostics), UNKNOWN_ATTRIBUTE);
        assert_eq!(diagnostics.warnings().count(), 2);
    }

    #[test]
    fn test_not_a_table() {
        let dom = parse_html("<div>x</div>");
        let div = dom.find_by_tag("div").unwrap();
        assert!(matches!(
            Table::from_node(&dom, div),
            Err(TableShapeError::NotATable { .. })
        ));
    }

    #[test]
    fn test_describe_uses_class() {
        let dom = parse_html(r#"<table class="inflection-table fi-decl"><tr><td>a</td></tr></table>"#);
        assert_eq!(
            describe_table(&dom, first_table(&dom)),
            "table.inflection-table.fi-decl (1 rows)"
        );
    }
}
