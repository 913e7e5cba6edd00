//! Span-expanded view of an HTML table.
//!
//! A table's raw rows list only the cells that start in them; a cell with
//! `rowspan` or `colspan` silently shifts every later cell. The virtual
//! grid places each cell at every logical coordinate it covers, so a
//! header can be found at the same `(row, col)` no matter how the rows
//! above it were spanned.

use crate::error::GridError;

/// Largest `colspan` honoured, as in HTML.
pub const MAX_COLSPAN: usize = 1000;
/// Largest `rowspan` honoured, as in HTML.
pub const MAX_ROWSPAN: usize = 65534;

/// Identity of a raw table cell.
///
/// Split entries of a cell keep their parent's id, and therefore its
/// logical coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct CellId(pub usize);

/// The footprint of one cell as declared by its span attributes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Span {
    pub id: CellId,
    pub colspan: usize,
    pub rowspan: usize,
}

impl Span {
    pub fn new(id: CellId, colspan: usize, rowspan: usize) -> Self {
        Self {
            id,
            colspan: colspan.clamp(1, MAX_COLSPAN),
            rowspan: rowspan.clamp(1, MAX_ROWSPAN),
        }
    }
}

/// `(row, col) -> CellId` over all logical coordinates of a table.
#[derive(Debug, Clone, Default)]
pub struct VirtualGrid {
    rows: Vec<Vec<Option<CellId>>>,
    /// Top-left coordinate of each cell, indexed by `CellId`.
    origins: Vec<Option<(usize, usize)>>,
}

impl VirtualGrid {
    /// Place every cell of `rows`, in source order.
    ///
    /// Each row starts its cursor at column 0 and each cell takes the first
    /// free column at or after the cursor. A rowspan reaching past the last
    /// raw row stops at it.
    pub fn virtualize<R: AsRef<[Span]>>(rows: &[R]) -> Self {
        let mut grid = VirtualGrid::default();

        for (row, cells) in rows.iter().enumerate() {
            grid.ensure_row(row);
            let mut cursor = 0;
            for span in cells.as_ref() {
                let span = Span::new(span.id, span.colspan, span.rowspan);
                let last_row = (row + span.rowspan).min(rows.len());
                for _ in 0..span.colspan {
                    while grid.is_occupied(row, cursor) {
                        cursor += 1;
                    }
                    for r in row..last_row {
                        grid.occupy(r, cursor, span.id);
                    }
                    grid.record_origin(span.id, row, cursor);
                    cursor += 1;
                }
            }
        }

        grid
    }

    fn ensure_row(&mut self, row: usize) {
        if self.rows.len() <= row {
            self.rows.resize_with(row + 1, Vec::new);
        }
    }

    fn is_occupied(&self, row: usize, col: usize) -> bool {
        self.rows
            .get(row)
            .and_then(|r| r.get(col))
            .is_some_and(Option::is_some)
    }

    fn occupy(&mut self, row: usize, col: usize, id: CellId) {
        self.ensure_row(row);
        let cells = &mut self.rows[row];
        if cells.len() <= col {
            cells.resize(col + 1, None);
        }
        cells[col] = Some(id);
    }

    fn record_origin(&mut self, id: CellId, row: usize, col: usize) {
        if self.origins.len() <= id.0 {
            self.origins.resize(id.0 + 1, None);
        }
        let origin = &mut self.origins[id.0];
        match origin {
            Some(existing) if *existing <= (row, col) => {}
            _ => *origin = Some((row, col)),
        }
    }

    /// The cell covering `(row, col)`.
    pub fn cell_at(&self, row: usize, col: usize) -> Result<CellId, GridError> {
        self.rows
            .get(row)
            .and_then(|r| r.get(col))
            .copied()
            .flatten()
            .ok_or(GridError::OutOfRange { row, col })
    }

    /// Top-left logical coordinate of a cell.
    pub fn logical_coordinates(&self, id: CellId) -> Option<(usize, usize)> {
        self.origins.get(id.0).copied().flatten()
    }

    /// `(rows, cols)`, cols being the widest row.
    pub fn dimensions(&self) -> (usize, usize) {
        let cols = self.rows.iter().map(Vec::len).max().unwrap_or(0);
        (self.rows.len(), cols)
    }

    /// Number of coordinates owned by a cell.
    pub fn footprint(&self, id: CellId) -> usize {
        self.iter().filter(|&(_, _, owner)| owner == id).count()
    }

    /// Every occupied coordinate, row-major.
    pub fn iter(&self) -> impl Iterator<Item = (usize, usize, CellId)> + '_ {
        self.rows.iter().enumerate().flat_map(|(r, cells)| {
            cells
                .iter()
                .enumerate()
                .filter_map(move |(c, id)| id.map(|id| (r, c, id)))
        })
    }
}
