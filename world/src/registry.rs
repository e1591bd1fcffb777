//! Stable cell identity bookkeeping that survives grid growth.

use corridor_defence_core::{CellCoord, CellId};

/// Dense row-major arena mapping grid positions to permanent cell IDs.
///
/// Identifiers are allocated monotonically and are never reused or
/// renumbered: growth only appends fresh IDs for the cells it creates,
/// so an obstacle holding a `CellId` resolves to the correct logical
/// position even after rows shift or columns are appended.
#[derive(Clone, Debug)]
pub(crate) struct CellIdentityRegistry {
    columns: u32,
    rows: u32,
    cells: Vec<CellId>,
    next_id: u64,
}

impl CellIdentityRegistry {
    /// Creates a registry covering the provided dimensions.
    pub(crate) fn new(columns: u32, rows: u32) -> Self {
        let mut registry = Self {
            columns,
            rows,
            cells: Vec::new(),
            next_id: 0,
        };
        let capacity = registry.cell_count();
        registry.cells.reserve(capacity);
        for _ in 0..capacity {
            let id = registry.allocate();
            registry.cells.push(id);
        }
        registry
    }

    fn allocate(&mut self) -> CellId {
        let id = CellId::new(self.next_id);
        self.next_id += 1;
        id
    }

    fn cell_count(&self) -> usize {
        let count = u64::from(self.columns) * u64::from(self.rows);
        usize::try_from(count).unwrap_or(0)
    }

    /// Identifier of the cell at the provided coordinate, if in bounds.
    #[must_use]
    pub(crate) fn id_at(&self, cell: CellCoord) -> Option<CellId> {
        self.index(cell).and_then(|index| self.cells.get(index)).copied()
    }

    /// Resolves a cell identifier back to its current coordinate.
    ///
    /// Lookup scans the arena: the arena is the single source of truth for
    /// where an identifier currently lives, so a stale coordinate can never
    /// be produced after a resize.
    #[must_use]
    pub(crate) fn resolve(&self, id: CellId) -> Option<CellCoord> {
        let width = usize::try_from(self.columns).ok()?;
        if width == 0 {
            return None;
        }
        self.cells.iter().position(|&entry| entry == id).map(|index| {
            let column = (index % width) as u32;
            let row = (index / width) as u32;
            CellCoord::new(column, row)
        })
    }

    /// Appends `count` columns at the right edge, allocating fresh IDs.
    pub(crate) fn append_columns(&mut self, count: u32) {
        if count == 0 {
            return;
        }
        let old_columns = usize::try_from(self.columns).unwrap_or(0);
        let new_columns = old_columns + usize::try_from(count).unwrap_or(0);
        let rows = usize::try_from(self.rows).unwrap_or(0);

        let mut widened = Vec::with_capacity(new_columns * rows);
        for row in 0..rows {
            let start = row * old_columns;
            widened.extend_from_slice(&self.cells[start..start + old_columns]);
            for _ in 0..count {
                let id = self.allocate();
                widened.push(id);
            }
        }
        self.cells = widened;
        self.columns += count;
    }

    /// Appends `count` rows at the bottom edge, allocating fresh IDs.
    pub(crate) fn append_rows(&mut self, count: u32) {
        if count == 0 {
            return;
        }
        let added = u64::from(count) * u64::from(self.columns);
        for _ in 0..added {
            let id = self.allocate();
            self.cells.push(id);
        }
        self.rows += count;
    }

    /// Prepends one row at the top and appends one at the bottom.
    ///
    /// The symmetric pair keeps the physical midline row in place while
    /// every pre-existing row index shifts down by one.
    pub(crate) fn grow_row_pair(&mut self) {
        let columns = usize::try_from(self.columns).unwrap_or(0);
        let mut top = Vec::with_capacity(columns);
        for _ in 0..columns {
            let id = self.allocate();
            top.push(id);
        }
        let _: Vec<CellId> = self.cells.splice(0..0, top).collect();
        for _ in 0..columns {
            let id = self.allocate();
            self.cells.push(id);
        }
        self.rows += 2;
    }

    /// Dimensions currently covered by the registry.
    #[must_use]
    pub(crate) fn dimensions(&self) -> (u32, u32) {
        (self.columns, self.rows)
    }

    fn index(&self, cell: CellCoord) -> Option<usize> {
        if cell.column() < self.columns && cell.row() < self.rows {
            let row = usize::try_from(cell.row()).ok()?;
            let column = usize::try_from(cell.column()).ok()?;
            let width = usize::try_from(self.columns).ok()?;
            Some(row * width + column)
        } else {
            None
        }
    }
}
