use std::collections::HashMap;
use std::path::Path;
use std::sync::Arc;

use anyhow::Context;

use crate::assets::decode::resize_premul;
use crate::assets::store::{AssetSlot, PreparedImage, ThemeAssets};
use crate::foundation::core::{BezPath, Canvas, PixelRect, Rgba8Premul};
use crate::foundation::error::{MazeError, MazeResult};
use crate::render::backend::{FrameRGBA, RenderTarget};
use crate::render::plan::PaintOp;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
struct ScaledKey {
    slot: AssetSlot,
    w: u32,
    h: u32,
}

/// A scaled texture together with the source bytes it was scaled from.
///
/// Holding the source `Arc` keeps its address from being reused while the entry lives.
struct ScaledEntry {
    source: Arc<Vec<u8>>,
    paint: vello_cpu::Image,
}

/// Raster canvas powered by `vello_cpu`.
///
/// Each `paint` call rasterizes its ops into a scratch pixmap the size of the region and copies
/// the result into the canvas, so repainting a handful of cells costs nothing proportional to the
/// canvas size.
pub struct CpuCanvas {
    canvas: Canvas,
    pixmap: vello_cpu::Pixmap,
    ctx: Option<vello_cpu::RenderContext>,
    scaled_cache: HashMap<ScaledKey, ScaledEntry>,
    regions_painted: u64,
}

impl std::fmt::Debug for CpuCanvas {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CpuCanvas")
            .field("canvas", &self.canvas)
            .field("scaled_cache", &self.scaled_cache.len())
            .field("regions_painted", &self.regions_painted)
            .finish()
    }
}

impl CpuCanvas {
    /// Allocate a transparent canvas.
    pub fn new(canvas: Canvas) -> MazeResult<Self> {
        let (w, h) = dims_u16(canvas.width, canvas.height)?;
        Ok(Self {
            canvas,
            pixmap: vello_cpu::Pixmap::new(w, h),
            ctx: None,
            scaled_cache: HashMap::new(),
            regions_painted: 0,
        })
    }

    /// Snapshot the current canvas contents.
    pub fn frame(&self) -> FrameRGBA {
        FrameRGBA {
            width: self.canvas.width,
            height: self.canvas.height,
            data: self.pixmap.data_as_u8_slice().to_vec(),
            premultiplied: true,
        }
    }

    /// Write the canvas as a PNG, creating parent directories as needed.
    ///
    /// Pixels are written as stored; a fully painted canvas is opaque, so premultiplied and
    /// straight alpha coincide.
    pub fn save_png(&self, path: &Path) -> MazeResult<()> {
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent)
                .with_context(|| format!("create output dir '{}'", parent.display()))?;
        }
        image::save_buffer_with_format(
            path,
            self.pixmap.data_as_u8_slice(),
            self.canvas.width,
            self.canvas.height,
            image::ColorType::Rgba8,
            image::ImageFormat::Png,
        )
        .with_context(|| format!("write png '{}'", path.display()))?;
        Ok(())
    }

    /// Number of scaled textures currently cached.
    pub fn cached_textures(&self) -> usize {
        self.scaled_cache.len()
    }

    /// Number of `paint` calls that touched at least one pixel.
    pub fn regions_painted(&self) -> u64 {
        self.regions_painted
    }

    fn with_ctx_mut<R>(
        &mut self,
        width: u16,
        height: u16,
        f: impl FnOnce(&mut Self, &mut vello_cpu::RenderContext) -> MazeResult<R>,
    ) -> MazeResult<R> {
        let mut ctx = match self.ctx.take() {
            None => vello_cpu::RenderContext::new(width, height),
            Some(ctx) if ctx.width() == width && ctx.height() == height => ctx,
            Some(_) => vello_cpu::RenderContext::new(width, height),
        };
        ctx.reset();
        let out = f(self, &mut ctx)?;
        self.ctx = Some(ctx);
        Ok(out)
    }

    fn scaled_paint(
        &mut self,
        slot: AssetSlot,
        image: &PreparedImage,
        w: u32,
        h: u32,
    ) -> MazeResult<vello_cpu::Image> {
        let key = ScaledKey { slot, w, h };
        if let Some(entry) = self.scaled_cache.get(&key)
            && Arc::ptr_eq(&entry.source, &image.rgba8_premul)
        {
            return Ok(entry.paint.clone());
        }
        let scaled = resize_premul(image, w, h)?;
        let pixmap = pixmap_from_premul_bytes(&scaled.rgba8_premul, scaled.width, scaled.height)?;
        let paint = vello_cpu::Image {
            image: vello_cpu::ImageSource::Pixmap(Arc::new(pixmap)),
            sampler: vello_cpu::peniko::ImageSampler::default(),
        };
        // A replaced texture overwrites the stale entry for its slot and size.
        self.scaled_cache.insert(
            key,
            ScaledEntry {
                source: Arc::clone(&image.rgba8_premul),
                paint: paint.clone(),
            },
        );
        Ok(paint)
    }

    fn blit(&mut self, region: PixelRect, src: &vello_cpu::Pixmap) {
        let stride = (self.canvas.width as usize) * 4;
        let row_len = (region.width as usize) * 4;
        let src_bytes = src.data_as_u8_slice();
        let dst_bytes = self.pixmap.data_as_u8_slice_mut();
        for (i, src_row) in src_bytes.chunks_exact(row_len).enumerate() {
            let y = region.y as usize + i;
            let start = y * stride + (region.x as usize) * 4;
            dst_bytes[start..start + row_len].copy_from_slice(src_row);
        }
    }
}

impl RenderTarget for CpuCanvas {
    fn size(&self) -> Canvas {
        self.canvas
    }

    fn resize(&mut self, canvas: Canvas) -> MazeResult<()> {
        let (w, h) = dims_u16(canvas.width, canvas.height)?;
        self.canvas = canvas;
        self.pixmap = vello_cpu::Pixmap::new(w, h);
        self.ctx = None;
        self.scaled_cache.clear();
        Ok(())
    }

    fn paint(
        &mut self,
        region: PixelRect,
        ops: &[PaintOp],
        assets: &ThemeAssets,
    ) -> MazeResult<()> {
        let region = region.intersect(self.canvas.bounds());
        if region.is_empty() {
            return Ok(());
        }
        let (w, h) = dims_u16(region.width, region.height)?;

        let scratch = self.with_ctx_mut(w, h, |this, ctx| {
            ctx.set_paint_transform(vello_cpu::kurbo::Affine::IDENTITY);
            for op in ops {
                draw_op(this, ctx, region, op, assets)?;
            }
            ctx.flush();
            let mut scratch = vello_cpu::Pixmap::new(w, h);
            ctx.render_to_pixmap(&mut scratch);
            Ok(scratch)
        })?;

        self.blit(region, &scratch);
        self.regions_painted = self.regions_painted.saturating_add(1);
        Ok(())
    }
}

fn draw_op(
    canvas: &mut CpuCanvas,
    ctx: &mut vello_cpu::RenderContext,
    region: PixelRect,
    op: &PaintOp,
    assets: &ThemeAssets,
) -> MazeResult<()> {
    let origin = vello_cpu::kurbo::Affine::translate((-f64::from(region.x), -f64::from(region.y)));
    match op {
        PaintOp::Fill { rect, color } => {
            let r = rect.intersect(region);
            if r.is_empty() {
                return Ok(());
            }
            ctx.set_transform(origin);
            ctx.set_paint(color_to_cpu(*color));
            ctx.fill_rect(&rect_to_cpu(r));
            Ok(())
        }
        PaintOp::Image { rect, slot } => {
            if rect.intersect(region).is_empty() {
                return Ok(());
            }
            let image = assets.get(*slot).ok_or_else(|| {
                MazeError::render(format!("asset {slot:?} was planned but is not loaded"))
            })?;
            let paint = canvas.scaled_paint(*slot, image, rect.width, rect.height)?;
            ctx.set_transform(
                origin
                    * vello_cpu::kurbo::Affine::translate((f64::from(rect.x), f64::from(rect.y))),
            );
            ctx.set_paint(paint);
            ctx.fill_rect(&vello_cpu::kurbo::Rect::new(
                0.0,
                0.0,
                f64::from(rect.width),
                f64::from(rect.height),
            ));
            Ok(())
        }
        PaintOp::Glyph { slot, glyph, color } => {
            if slot.intersect(region).is_empty() {
                return Ok(());
            }
            ctx.set_transform(origin);
            ctx.set_paint(color_to_cpu(*color));
            ctx.fill_path(&bezpath_to_cpu(&glyph.path_in(*slot)));
            Ok(())
        }
    }
}

fn dims_u16(width: u32, height: u32) -> MazeResult<(u16, u16)> {
    let w: u16 = width
        .try_into()
        .map_err(|_| MazeError::render("canvas width exceeds u16"))?;
    let h: u16 = height
        .try_into()
        .map_err(|_| MazeError::render("canvas height exceeds u16"))?;
    if w == 0 || h == 0 {
        return Err(MazeError::render("canvas dimensions must be > 0"));
    }
    Ok((w, h))
}

fn color_to_cpu(c: Rgba8Premul) -> vello_cpu::peniko::Color {
    vello_cpu::peniko::Color::from_rgba8(c.r, c.g, c.b, c.a)
}

fn rect_to_cpu(r: PixelRect) -> vello_cpu::kurbo::Rect {
    vello_cpu::kurbo::Rect::new(
        f64::from(r.x),
        f64::from(r.y),
        f64::from(r.right()),
        f64::from(r.bottom()),
    )
}

fn bezpath_to_cpu(path: &BezPath) -> vello_cpu::kurbo::BezPath {
    use kurbo::PathEl;

    let pt = |p: kurbo::Point| vello_cpu::kurbo::Point::new(p.x, p.y);
    let mut out = vello_cpu::kurbo::BezPath::new();
    for &el in path.elements() {
        match el {
            PathEl::MoveTo(p) => out.move_to(pt(p)),
            PathEl::LineTo(p) => out.line_to(pt(p)),
            PathEl::QuadTo(p1, p2) => out.quad_to(pt(p1), pt(p2)),
            PathEl::CurveTo(p1, p2, p3) => out.curve_to(pt(p1), pt(p2), pt(p3)),
            PathEl::ClosePath => out.close_path(),
        }
    }
    out
}

fn pixmap_from_premul_bytes(
    bytes: &[u8],
    width: u32,
    height: u32,
) -> MazeResult<vello_cpu::Pixmap> {
    let (w, h) = dims_u16(width, height)?;
    if bytes.len()
        != (width as usize)
            .saturating_mul(height as usize)
            .saturating_mul(4)
    {
        return Err(MazeError::render("pixmap byte len mismatch"));
    }
    // Pixmap stores PremulRgba8; our bytes are already premultiplied.
    let mut pixels = Vec::<vello_cpu::peniko::color::PremulRgba8>::with_capacity(
        (width as usize) * (height as usize),
    );
    for px in bytes.chunks_exact(4) {
        pixels.push(vello_cpu::peniko::color::PremulRgba8::from_u8_array([
            px[0], px[1], px[2], px[3],
        ]));
    }
    Ok(vello_cpu::Pixmap::from_parts_with_opacity(
        pixels, w, h, true,
    ))
}

#[cfg(test)]
#[path = "../../tests/unit/render/cpu.rs"]
mod tests;
