use crate::foundation::core::{Canvas, GridPos, PixelRect, Rect};
use crate::foundation::error::{MazeError, MazeResult};

/// Cells wider than this (in pixels) get a 1-pixel grid line.
pub const GRID_LINE_MIN_CELL_PX: f64 = 10.0;

/// Aspect-preserving mapping from grid coordinates to canvas pixels.
///
/// Computed from the current canvas size every time it is needed; a container resize invalidates
/// any previously computed value.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Projection {
    /// Width of one cell in pixels.
    pub cell_width: f64,
    /// Height of one cell in pixels.
    pub cell_height: f64,
    /// Left edge of the grid region.
    pub offset_x: f64,
    /// Top edge of the grid region.
    pub offset_y: f64,
    /// Grid columns.
    pub cols: usize,
    /// Grid rows.
    pub rows: usize,
}

impl Projection {
    /// Fit a `cols × rows` grid into a `canvas_width × canvas_height` surface.
    ///
    /// The grid is scaled as large as possible without distortion and centered on the free axis.
    pub fn compute(
        canvas_width: f64,
        canvas_height: f64,
        cols: usize,
        rows: usize,
    ) -> MazeResult<Self> {
        if !(canvas_width.is_finite() && canvas_height.is_finite())
            || canvas_width <= 0.0
            || canvas_height <= 0.0
        {
            return Err(MazeError::validation(
                "projection canvas size must be finite and > 0",
            ));
        }
        if cols == 0 || rows == 0 {
            return Err(MazeError::validation(
                "projection grid dimensions must be > 0",
            ));
        }

        let grid_aspect = cols as f64 / rows as f64;
        let canvas_aspect = canvas_width / canvas_height;

        let (draw_w, draw_h) = if grid_aspect > canvas_aspect {
            (canvas_width, canvas_width / grid_aspect)
        } else {
            (canvas_height * grid_aspect, canvas_height)
        };

        Ok(Self {
            cell_width: draw_w / cols as f64,
            cell_height: draw_h / rows as f64,
            offset_x: (canvas_width - draw_w) / 2.0,
            offset_y: (canvas_height - draw_h) / 2.0,
            cols,
            rows,
        })
    }

    /// [`Projection::compute`] for an integer canvas.
    pub fn for_canvas(canvas: Canvas, cols: usize, rows: usize) -> MazeResult<Self> {
        Self::compute(
            f64::from(canvas.width),
            f64::from(canvas.height),
            cols,
            rows,
        )
    }

    /// Width of the drawn grid region.
    pub fn draw_width(&self) -> f64 {
        self.cell_width * self.cols as f64
    }

    /// Height of the drawn grid region.
    pub fn draw_height(&self) -> f64 {
        self.cell_height * self.rows as f64
    }

    /// Exact (unsnapped) grid bounding rectangle.
    pub fn grid_rect(&self) -> Rect {
        Rect::new(
            self.offset_x,
            self.offset_y,
            self.offset_x + self.draw_width(),
            self.offset_y + self.draw_height(),
        )
    }

    /// Inter-cell gap in whole pixels: 1 for legible cells, 0 for dense grids.
    pub fn gap_px(&self) -> u32 {
        if self.cell_width > GRID_LINE_MIN_CELL_PX {
            1
        } else {
            0
        }
    }

    /// Exact rectangle of cell `p`.
    pub fn cell_rect(&self, p: GridPos) -> Rect {
        let x0 = self.offset_x + p.col as f64 * self.cell_width;
        let y0 = self.offset_y + p.row as f64 * self.cell_height;
        let x1 = self.offset_x + (p.col + 1) as f64 * self.cell_width;
        let y1 = self.offset_y + (p.row + 1) as f64 * self.cell_height;
        Rect::new(x0, y0, x1, y1)
    }

    /// Whole-pixel slot owned by cell `p`. Slots of neighbouring cells share edges exactly.
    pub fn cell_slot(&self, p: GridPos) -> PixelRect {
        PixelRect::snap(self.cell_rect(p))
    }

    /// Painted area of cell `p`: its slot minus the trailing grid line.
    pub fn cell_body(&self, p: GridPos) -> PixelRect {
        self.cell_slot(p).inset_trailing(self.gap_px())
    }

    /// Slot a start/end marker is drawn in.
    ///
    /// Equal to [`Projection::cell_slot`] unless the grid is denser than the canvas and the slot
    /// snapped to nothing; the marker then keeps one pixel at the slot's position, clamped into
    /// the grid region.
    pub fn marker_slot(&self, p: GridPos) -> PixelRect {
        let slot = self.cell_slot(p);
        if !slot.is_empty() {
            return slot;
        }
        let grid = self.grid_slot();
        PixelRect {
            x: slot.x.min(grid.right().saturating_sub(1)).max(grid.x),
            y: slot.y.min(grid.bottom().saturating_sub(1)).max(grid.y),
            width: 1,
            height: 1,
        }
    }

    /// Whole-pixel grid bounding region (union of all slots).
    pub fn grid_slot(&self) -> PixelRect {
        PixelRect::snap(self.grid_rect())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/layout/projection.rs"]
mod tests;
