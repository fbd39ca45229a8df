use smallvec::SmallVec;

use crate::assets::store::{AssetSlot, ThemeAssets};
use crate::foundation::core::{GridPos, PixelRect, Rgba8Premul};
use crate::layout::projection::Projection;
use crate::model::maze::{CellCode, Maze};
use crate::render::glyph::MarkerGlyph;
use crate::render::palette::{
    CANVAS_CLEAR, GRID_BACKGROUND, MarkerStyle, cell_style, end_marker, start_marker,
};

/// A single drawing primitive in canvas pixel space.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum PaintOp {
    /// Opaque flat fill.
    Fill {
        /// Target area.
        rect: PixelRect,
        /// Fill color.
        color: Rgba8Premul,
    },
    /// Texture stretched over `rect`.
    Image {
        /// Target area.
        rect: PixelRect,
        /// Theme slot providing the texture.
        slot: AssetSlot,
    },
    /// Fallback marker letter inside `slot`.
    Glyph {
        /// Cell slot the glyph is centered in.
        slot: PixelRect,
        /// Letter to draw.
        glyph: MarkerGlyph,
        /// Letter color.
        color: Rgba8Premul,
    },
}

/// Paint ops for one cell slot. Most cells need two (background + body), markers up to four.
pub type CellOps = SmallVec<[PaintOp; 4]>;

/// Builds the paint ops for full and incremental redraws.
///
/// Both paths share [`cell_style`] and the same per-cell op sequence, which makes an incremental
/// repaint of a cell indistinguishable from a full redraw of the same maze state.
#[derive(Clone, Copy, Debug)]
pub struct Renderer {
    clear: Rgba8Premul,
}

impl Default for Renderer {
    fn default() -> Self {
        Self::new(CANVAS_CLEAR)
    }
}

impl Renderer {
    /// Renderer clearing the canvas to `clear` outside the grid.
    pub fn new(clear: Rgba8Premul) -> Self {
        Self { clear }
    }

    /// Canvas clear color.
    pub fn clear_color(&self) -> Rgba8Premul {
        self.clear
    }

    /// Ops for a complete redraw of `maze`, in paint order.
    ///
    /// Markers come last so they sit on top of whatever code their cells currently hold.
    pub fn plan_full(
        &self,
        maze: &Maze,
        projection: &Projection,
        region: PixelRect,
        assets: &ThemeAssets,
    ) -> Vec<PaintOp> {
        let mut ops = Vec::with_capacity(2 + maze.width * maze.height + 8);
        ops.push(PaintOp::Fill {
            rect: region,
            color: self.clear,
        });
        ops.push(PaintOp::Fill {
            rect: projection.grid_slot(),
            color: GRID_BACKGROUND,
        });
        for (pos, code) in maze.cells() {
            push_body(&mut ops, projection.cell_body(pos), code, assets);
        }
        for (pos, style) in [
            (maze.start_pos, start_marker()),
            (maze.end_pos, end_marker()),
        ] {
            push_marker(&mut ops, projection.marker_slot(pos), style, assets);
        }
        ops
    }

    /// Ops repainting the single slot of `pos` showing `code`, plus the region they cover.
    ///
    /// The region is first reset to the grid background so the trailing grid line matches a full
    /// redraw. Any marker overlapping the region is re-asserted on top, in full-redraw order; on
    /// ordinary grids that is only the marker of `pos` itself.
    pub fn plan_cell(
        &self,
        maze: &Maze,
        projection: &Projection,
        pos: GridPos,
        code: CellCode,
        assets: &ThemeAssets,
    ) -> (PixelRect, CellOps) {
        let region = if maze.is_marker(pos) {
            projection.marker_slot(pos)
        } else {
            projection.cell_slot(pos)
        };
        let mut ops = CellOps::new();
        ops.push(PaintOp::Fill {
            rect: region,
            color: GRID_BACKGROUND,
        });
        push_body(&mut ops, projection.cell_body(pos), code, assets);
        for (marker, style) in [
            (maze.start_pos, start_marker()),
            (maze.end_pos, end_marker()),
        ] {
            let slot = projection.marker_slot(marker);
            if !slot.intersect(region).is_empty() {
                push_marker(&mut ops, slot, style, assets);
            }
        }
        (region, ops)
    }
}

fn push_body<E: Extend<PaintOp>>(
    ops: &mut E,
    body: PixelRect,
    code: CellCode,
    assets: &ThemeAssets,
) {
    if body.is_empty() {
        return;
    }
    let style = cell_style(code);
    let op = if assets.is_ready(style.asset) {
        PaintOp::Image {
            rect: body,
            slot: style.asset,
        }
    } else {
        PaintOp::Fill {
            rect: body,
            color: style.color,
        }
    };
    ops.extend(std::iter::once(op));
}

fn push_marker<E: Extend<PaintOp>>(
    ops: &mut E,
    slot: PixelRect,
    style: &MarkerStyle,
    assets: &ThemeAssets,
) {
    if slot.is_empty() {
        return;
    }
    if assets.is_ready(style.asset) {
        ops.extend(std::iter::once(PaintOp::Image {
            rect: slot,
            slot: style.asset,
        }));
        return;
    }
    ops.extend([
        PaintOp::Fill {
            rect: slot,
            color: style.color,
        },
        PaintOp::Glyph {
            slot,
            glyph: style.glyph,
            color: style.glyph_color,
        },
    ]);
}

#[cfg(test)]
#[path = "../../tests/unit/render/plan.rs"]
mod tests;
