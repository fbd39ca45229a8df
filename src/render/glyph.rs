use crate::foundation::core::{BezPath, PixelRect, Point};

/// Letter drawn on a marker whose sprite is not loaded yet.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum MarkerGlyph {
    /// "S"
    Start,
    /// "E"
    End,
}

// Block letters in a unit box, clockwise, y down.
const S_OUTLINE: [(f64, f64); 12] = [
    (0.0, 0.0),
    (1.0, 0.0),
    (1.0, 0.2),
    (0.3, 0.2),
    (0.3, 0.4),
    (1.0, 0.4),
    (1.0, 1.0),
    (0.0, 1.0),
    (0.0, 0.8),
    (0.7, 0.8),
    (0.7, 0.6),
    (0.0, 0.6),
];

const E_OUTLINE: [(f64, f64); 12] = [
    (0.0, 0.0),
    (1.0, 0.0),
    (1.0, 0.2),
    (0.3, 0.2),
    (0.3, 0.4),
    (0.8, 0.4),
    (0.8, 0.6),
    (0.3, 0.6),
    (0.3, 0.8),
    (1.0, 0.8),
    (1.0, 1.0),
    (0.0, 1.0),
];

impl MarkerGlyph {
    /// The letter this glyph stands for.
    pub const fn letter(self) -> char {
        match self {
            Self::Start => 'S',
            Self::End => 'E',
        }
    }

    fn outline(self) -> &'static [(f64, f64)] {
        match self {
            Self::Start => &S_OUTLINE,
            Self::End => &E_OUTLINE,
        }
    }

    /// Glyph box centered in `slot`: 60% of the shorter side tall, 0.7 as wide as tall.
    pub fn glyph_box(slot: PixelRect) -> PixelRect {
        let side = slot.width.min(slot.height);
        let h = ((f64::from(side) * 0.6).round() as u32).clamp(1, side.max(1));
        let w = ((f64::from(h) * 0.7).round() as u32).max(1);
        PixelRect {
            x: slot.x + slot.width.saturating_sub(w) / 2,
            y: slot.y + slot.height.saturating_sub(h) / 2,
            width: w,
            height: h,
        }
    }

    /// Filled outline inside `slot`, with every vertex on a whole pixel.
    pub fn path_in(self, slot: PixelRect) -> BezPath {
        let b = Self::glyph_box(slot);
        let to_px = |(u, v): (f64, f64)| {
            Point::new(
                f64::from(b.x) + (u * f64::from(b.width)).round(),
                f64::from(b.y) + (v * f64::from(b.height)).round(),
            )
        };

        let mut path = BezPath::new();
        let mut pts = self.outline().iter().copied().map(to_px);
        if let Some(first) = pts.next() {
            path.move_to(first);
            for p in pts {
                path.line_to(p);
            }
            path.close_path();
        }
        path
    }
}

#[cfg(test)]
#[path = "../../tests/unit/render/glyph.rs"]
mod tests;
