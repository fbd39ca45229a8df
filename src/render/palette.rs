use crate::assets::store::AssetSlot;
use crate::foundation::core::Rgba8Premul;
use crate::model::maze::CellCode;
use crate::render::glyph::MarkerGlyph;

/// How one cell code is drawn: a themed texture when loaded, otherwise a flat fill.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct CellStyle {
    /// Texture slot to use when ready.
    pub asset: AssetSlot,
    /// Fallback fill color.
    pub color: Rgba8Premul,
}

/// How a start/end marker is drawn on top of its cell.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct MarkerStyle {
    /// Sprite slot to use when ready.
    pub asset: AssetSlot,
    /// Fallback background.
    pub color: Rgba8Premul,
    /// Fallback letter.
    pub glyph: MarkerGlyph,
    /// Fallback letter color.
    pub glyph_color: Rgba8Premul,
}

/// Background painted under the grid; visible through the inter-cell gaps.
pub const GRID_BACKGROUND: Rgba8Premul = Rgba8Premul::opaque_hex(0x000000);

/// Canvas color outside the grid region.
pub const CANVAS_CLEAR: Rgba8Premul = Rgba8Premul::opaque_hex(0xf3f4f6);

const CELL_STYLES: [CellStyle; 7] = [
    CellStyle {
        asset: AssetSlot::Wall,
        color: Rgba8Premul::opaque_hex(0x000000),
    },
    CellStyle {
        asset: AssetSlot::Floor,
        color: Rgba8Premul::opaque_hex(0xffffff),
    },
    CellStyle {
        asset: AssetSlot::Frontier,
        color: Rgba8Premul::opaque_hex(0xfacc15),
    },
    CellStyle {
        asset: AssetSlot::DeadEnd,
        color: Rgba8Premul::opaque_hex(0xef4444),
    },
    CellStyle {
        asset: AssetSlot::Path,
        color: Rgba8Premul::opaque_hex(0x22c55e),
    },
    CellStyle {
        asset: AssetSlot::Start,
        color: Rgba8Premul::opaque_hex(0x3b82f6),
    },
    CellStyle {
        asset: AssetSlot::End,
        color: Rgba8Premul::opaque_hex(0xef4444),
    },
];

const START_MARKER: MarkerStyle = MarkerStyle {
    asset: AssetSlot::Start,
    color: Rgba8Premul::opaque_hex(0x3b82f6),
    glyph: MarkerGlyph::Start,
    glyph_color: Rgba8Premul::opaque_hex(0xffffff),
};

const END_MARKER: MarkerStyle = MarkerStyle {
    asset: AssetSlot::End,
    color: Rgba8Premul::opaque_hex(0xef4444),
    glyph: MarkerGlyph::End,
    glyph_color: Rgba8Premul::opaque_hex(0xffffff),
};

/// Style for a cell code. Both render paths go through this table.
pub fn cell_style(code: CellCode) -> &'static CellStyle {
    &CELL_STYLES[code.index()]
}

/// Style for the start marker.
pub fn start_marker() -> &'static MarkerStyle {
    &START_MARKER
}

/// Style for the end marker.
pub fn end_marker() -> &'static MarkerStyle {
    &END_MARKER
}
