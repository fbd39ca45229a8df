use crate::assets::store::ThemeAssets;
use crate::foundation::core::{Canvas, PixelRect};
use crate::foundation::error::MazeResult;
use crate::render::plan::PaintOp;

/// A canvas snapshot as RGBA8 pixels.
///
/// Frames are **premultiplied alpha**. The `premultiplied` flag makes this explicit at API
/// boundaries.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FrameRGBA {
    /// Frame width in pixels.
    pub width: u32,
    /// Frame height in pixels.
    pub height: u32,
    /// RGBA8 bytes, tightly packed, row-major.
    pub data: Vec<u8>,
    /// Whether the `data` is premultiplied alpha.
    pub premultiplied: bool,
}

impl FrameRGBA {
    /// RGBA bytes of pixel `(x, y)`, if inside the frame.
    pub fn pixel(&self, x: u32, y: u32) -> Option<[u8; 4]> {
        if x >= self.width || y >= self.height {
            return None;
        }
        let i = ((y as usize) * (self.width as usize) + (x as usize)) * 4;
        let px = self.data.get(i..i + 4)?;
        Some([px[0], px[1], px[2], px[3]])
    }

    /// Copy of the pixels inside `region`, row-major.
    pub fn crop(&self, region: PixelRect) -> Vec<u8> {
        let region = region.intersect(PixelRect {
            x: 0,
            y: 0,
            width: self.width,
            height: self.height,
        });
        let mut out = Vec::with_capacity((region.width as usize) * (region.height as usize) * 4);
        for y in region.y..region.bottom() {
            let row = (y as usize) * (self.width as usize) * 4;
            let a = row + (region.x as usize) * 4;
            let b = row + (region.right() as usize) * 4;
            out.extend_from_slice(&self.data[a..b]);
        }
        out
    }
}

/// A surface the renderer paints into.
///
/// `paint` replaces every pixel of `region` with the result of drawing `ops` in order, clipped to
/// `region`. Pixels outside `region` are left untouched, which is what lets a step's deltas
/// repaint only their own cells.
pub trait RenderTarget {
    /// Current surface size.
    fn size(&self) -> Canvas;

    /// Change the surface size. Existing contents are discarded.
    fn resize(&mut self, canvas: Canvas) -> MazeResult<()>;

    /// Repaint `region` with `ops`.
    fn paint(&mut self, region: PixelRect, ops: &[PaintOp], assets: &ThemeAssets)
    -> MazeResult<()>;
}
