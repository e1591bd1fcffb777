//! Surface-space geometry: cell to pixel mapping and hit-testing.

use corridor_defence_core::{CellCoord, PixelPosition};

const MIN_PADDING_PX: f32 = 6.0;
const PADDING_RATIO: f32 = 0.04;
const MIN_CELL_SIZE_PX: f32 = 10.0;

pub(crate) const DEFAULT_SURFACE_WIDTH_PX: f32 = 960.0;
pub(crate) const DEFAULT_SURFACE_HEIGHT_PX: f32 = 540.0;

/// Derived pixel geometry for the current surface and grid dimensions.
///
/// The board is centred on the surface with a proportional margin; cell
/// size is recomputed whenever either the surface or the grid dimensions
/// change, so stored pixel values never go stale.
#[derive(Clone, Copy, Debug)]
pub(crate) struct CoordinateSpace {
    surface_width: f32,
    surface_height: f32,
    cell_size: f32,
    offset_x: f32,
    offset_y: f32,
}

impl CoordinateSpace {
    /// Creates a coordinate space for the default surface and fits the grid.
    pub(crate) fn new(columns: u32, rows: u32) -> Self {
        let mut space = Self {
            surface_width: DEFAULT_SURFACE_WIDTH_PX,
            surface_height: DEFAULT_SURFACE_HEIGHT_PX,
            cell_size: MIN_CELL_SIZE_PX,
            offset_x: 0.0,
            offset_y: 0.0,
        };
        space.refit(columns, rows);
        space
    }

    /// Records new surface dimensions and refits the grid.
    pub(crate) fn resize_surface(&mut self, width_px: f32, height_px: f32, columns: u32, rows: u32) {
        self.surface_width = width_px.max(0.0);
        self.surface_height = height_px.max(0.0);
        self.refit(columns, rows);
    }

    /// Recomputes cell size and offsets for the provided grid dimensions.
    pub(crate) fn refit(&mut self, columns: u32, rows: u32) {
        if columns == 0 || rows == 0 {
            self.cell_size = MIN_CELL_SIZE_PX;
            self.offset_x = 0.0;
            self.offset_y = 0.0;
            return;
        }

        let short_edge = self.surface_width.min(self.surface_height);
        let padding = (short_edge * PADDING_RATIO).round().max(MIN_PADDING_PX);
        let cell_width = ((self.surface_width - padding * 2.0) / columns as f32).floor();
        let cell_height = ((self.surface_height - padding * 2.0) / rows as f32).floor();
        self.cell_size = cell_width.min(cell_height).max(MIN_CELL_SIZE_PX);

        let board_width = self.cell_size * columns as f32;
        let board_height = self.cell_size * rows as f32;
        self.offset_x = ((self.surface_width - board_width) / 2.0).round();
        self.offset_y = ((self.surface_height - board_height) / 2.0).round();
    }

    /// Pixel centre of the provided cell.
    #[must_use]
    pub(crate) fn cell_center(&self, cell: CellCoord) -> PixelPosition {
        PixelPosition::new(
            self.offset_x + cell.column() as f32 * self.cell_size + self.cell_size / 2.0,
            self.offset_y + cell.row() as f32 * self.cell_size + self.cell_size / 2.0,
        )
    }

    /// Cell containing the provided pixel position, if any.
    ///
    /// Positions left of or above the board floor to negative values and
    /// are rejected before the cast, so hit-testing never wraps around.
    #[must_use]
    pub(crate) fn cell_at(&self, position: PixelPosition, columns: u32, rows: u32) -> Option<CellCoord> {
        if self.cell_size <= 0.0 {
            return None;
        }
        let column = ((position.x - self.offset_x) / self.cell_size).floor();
        let row = ((position.y - self.offset_y) / self.cell_size).floor();
        if column < 0.0 || row < 0.0 {
            return None;
        }
        let column = column as u32;
        let row = row as u32;
        if column < columns && row < rows {
            Some(CellCoord::new(column, row))
        } else {
            None
        }
    }

    /// Side length of a single cell in pixels.
    #[must_use]
    pub(crate) fn cell_size(&self) -> f32 {
        self.cell_size
    }

    /// Pixel offset of the board's left and top edges.
    #[must_use]
    pub(crate) fn offsets(&self) -> (f32, f32) {
        (self.offset_x, self.offset_y)
    }
}

/// Clamps a cell into `[0, columns) x [0, rows)`.
pub(crate) fn clamp_cell(cell: CellCoord, columns: u32, rows: u32) -> CellCoord {
    let max_column = columns.saturating_sub(1);
    let max_row = rows.saturating_sub(1);
    CellCoord::new(cell.column().min(max_column), cell.row().min(max_row))
}
