use crate::assets::store::ThemeAssets;
use crate::foundation::core::{Canvas, PixelRect};
use crate::foundation::error::MazeResult;
use crate::render::backend::RenderTarget;
use crate::render::plan::PaintOp;

/// One `paint` call captured by [`RecordingTarget`].
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PaintRecord {
    /// Region passed to `paint`.
    pub region: PixelRect,
    /// Ops in paint order.
    pub ops: Vec<PaintOp>,
}

/// In-memory render target for tests and debugging.
///
/// Records every paint call instead of rasterizing, so callers can assert on which regions were
/// touched and in what order ops were issued.
#[derive(Debug)]
pub struct RecordingTarget {
    canvas: Canvas,
    records: Vec<PaintRecord>,
    resizes: u32,
}

impl RecordingTarget {
    /// Create a recorder reporting `canvas` as its size.
    pub fn new(canvas: Canvas) -> Self {
        Self {
            canvas,
            records: Vec::new(),
            resizes: 0,
        }
    }

    /// Borrow the captured paint calls.
    pub fn records(&self) -> &[PaintRecord] {
        &self.records
    }

    /// Drain the captured paint calls.
    pub fn take(&mut self) -> Vec<PaintRecord> {
        std::mem::take(&mut self.records)
    }

    /// Forget captured paint calls.
    pub fn clear(&mut self) {
        self.records.clear();
    }

    /// Number of `resize` calls seen.
    pub fn resizes(&self) -> u32 {
        self.resizes
    }
}

impl RenderTarget for RecordingTarget {
    fn size(&self) -> Canvas {
        self.canvas
    }

    fn resize(&mut self, canvas: Canvas) -> MazeResult<()> {
        self.canvas = canvas;
        self.resizes += 1;
        Ok(())
    }

    fn paint(
        &mut self,
        region: PixelRect,
        ops: &[PaintOp],
        _assets: &ThemeAssets,
    ) -> MazeResult<()> {
        self.records.push(PaintRecord {
            region,
            ops: ops.to_vec(),
        });
        Ok(())
    }
}
