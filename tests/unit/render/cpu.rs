use super::*;
use crate::render::glyph::MarkerGlyph;

const RED: Rgba8Premul = Rgba8Premul::opaque_hex(0xff0000);
const GREEN: Rgba8Premul = Rgba8Premul::opaque_hex(0x00ff00);
const BLACK: Rgba8Premul = Rgba8Premul::opaque_hex(0x000000);

fn rect(x: u32, y: u32, width: u32, height: u32) -> PixelRect {
    PixelRect {
        x,
        y,
        width,
        height,
    }
}

fn fill(r: PixelRect, color: Rgba8Premul) -> PaintOp {
    PaintOp::Fill { rect: r, color }
}

#[test]
fn rejects_canvas_beyond_u16() {
    assert!(CpuCanvas::new(Canvas::new(70_000, 8).unwrap()).is_err());
    let mut c = CpuCanvas::new(Canvas::new(8, 8).unwrap()).unwrap();
    assert!(c.resize(Canvas::new(8, 70_000).unwrap()).is_err());
}

#[test]
fn paint_replaces_region_and_leaves_the_rest() {
    let assets = ThemeAssets::new();
    let mut c = CpuCanvas::new(Canvas::new(20, 10).unwrap()).unwrap();
    let all = c.size().bounds();
    c.paint(all, &[fill(all, RED)], &assets).unwrap();

    let region = rect(5, 0, 5, 10);
    c.paint(region, &[fill(all, GREEN)], &assets).unwrap();

    let f = c.frame();
    assert_eq!(f.data.len(), 20 * 10 * 4);
    assert_eq!(f.pixel(4, 3), Some([255, 0, 0, 255]));
    assert_eq!(f.pixel(5, 3), Some([0, 255, 0, 255]));
    assert_eq!(f.pixel(9, 9), Some([0, 255, 0, 255]));
    assert_eq!(f.pixel(10, 0), Some([255, 0, 0, 255]));
    assert_eq!(c.regions_painted(), 2);
}

#[test]
fn regions_outside_canvas_are_ignored() {
    let assets = ThemeAssets::new();
    let mut c = CpuCanvas::new(Canvas::new(4, 4).unwrap()).unwrap();
    c.paint(rect(10, 10, 5, 5), &[fill(rect(10, 10, 5, 5), RED)], &assets)
        .unwrap();
    assert_eq!(c.regions_painted(), 0);
    assert_eq!(c.frame().pixel(3, 3), Some([0, 0, 0, 0]));
}

#[test]
fn later_ops_paint_over_earlier_ones() {
    let assets = ThemeAssets::new();
    let mut c = CpuCanvas::new(Canvas::new(10, 10).unwrap()).unwrap();
    let all = c.size().bounds();
    c.paint(all, &[fill(all, BLACK), fill(rect(0, 0, 9, 9), GREEN)], &assets)
        .unwrap();
    let f = c.frame();
    assert_eq!(f.pixel(0, 0), Some([0, 255, 0, 255]));
    assert_eq!(f.pixel(9, 4), Some([0, 0, 0, 255]));
    assert_eq!(f.pixel(4, 9), Some([0, 0, 0, 255]));
}

#[test]
fn glyph_draws_inside_its_box_only() {
    let assets = ThemeAssets::new();
    let mut c = CpuCanvas::new(Canvas::new(40, 40).unwrap()).unwrap();
    let slot = c.size().bounds();
    let white = Rgba8Premul::opaque_hex(0xffffff);
    c.paint(
        slot,
        &[
            fill(slot, RED),
            PaintOp::Glyph {
                slot,
                glyph: MarkerGlyph::End,
                color: white,
            },
        ],
        &assets,
    )
    .unwrap();

    let f = c.frame();
    let b = MarkerGlyph::glyph_box(slot);
    // Top bar of the E.
    assert_eq!(f.pixel(b.x + b.width / 2, b.y), Some([255, 255, 255, 255]));
    assert_eq!(f.pixel(0, 0), Some([255, 0, 0, 255]));
    assert_eq!(f.pixel(b.x - 1, b.y), Some([255, 0, 0, 255]));
}

#[test]
fn image_op_stretches_asset_over_rect() {
    let mut assets = ThemeAssets::new();
    assets
        .install(
            AssetSlot::Wall,
            PreparedImage::solid(4, 4, [0, 0, 255, 255]),
        )
        .unwrap();
    let mut c = CpuCanvas::new(Canvas::new(16, 16).unwrap()).unwrap();
    let all = c.size().bounds();
    c.paint(
        all,
        &[
            fill(all, RED),
            PaintOp::Image {
                rect: rect(2, 2, 8, 8),
                slot: AssetSlot::Wall,
            },
        ],
        &assets,
    )
    .unwrap();

    let f = c.frame();
    assert_eq!(f.pixel(5, 5), Some([0, 0, 255, 255]));
    assert_eq!(f.pixel(1, 5), Some([255, 0, 0, 255]));
    assert_eq!(f.pixel(12, 5), Some([255, 0, 0, 255]));
}

#[test]
fn image_op_without_loaded_asset_is_an_error() {
    let mut c = CpuCanvas::new(Canvas::new(8, 8).unwrap()).unwrap();
    let all = c.size().bounds();
    let err = c
        .paint(
            all,
            &[PaintOp::Image {
                rect: all,
                slot: AssetSlot::Path,
            }],
            &ThemeAssets::new(),
        )
        .unwrap_err();
    assert!(matches!(err, MazeError::Render(_)));
}

#[test]
fn resize_discards_contents() {
    let assets = ThemeAssets::new();
    let mut c = CpuCanvas::new(Canvas::new(8, 8).unwrap()).unwrap();
    let all = c.size().bounds();
    c.paint(all, &[fill(all, RED)], &assets).unwrap();
    c.resize(Canvas::new(12, 6).unwrap()).unwrap();

    let f = c.frame();
    assert_eq!((f.width, f.height), (12, 6));
    assert!(f.data.iter().all(|&b| b == 0));
}

#[test]
fn save_png_writes_a_decodable_file() {
    let assets = ThemeAssets::new();
    let mut c = CpuCanvas::new(Canvas::new(6, 4).unwrap()).unwrap();
    let all = c.size().bounds();
    c.paint(all, &[fill(all, GREEN)], &assets).unwrap();

    let path = std::path::PathBuf::from("target")
        .join("cpu_canvas_unit")
        .join("frame.png");
    c.save_png(&path).unwrap();

    let img = image::open(&path).unwrap().to_rgba8();
    assert_eq!(img.dimensions(), (6, 4));
    assert_eq!(img.get_pixel(3, 2).0, [0, 255, 0, 255]);
}

#[test]
fn replaced_texture_of_same_size_is_not_served_from_cache() {
    let mut assets = ThemeAssets::new();
    let mut c = CpuCanvas::new(Canvas::new(16, 16).unwrap()).unwrap();
    let all = c.size().bounds();
    let colors = [
        [255, 0, 0, 255],
        [0, 255, 0, 255],
        [0, 0, 255, 255],
        [255, 255, 0, 255],
        [255, 0, 0, 255],
    ];
    for color in colors {
        assets
            .install(AssetSlot::Floor, PreparedImage::solid(8, 8, color))
            .unwrap();
        c.paint(
            all,
            &[PaintOp::Image {
                rect: all,
                slot: AssetSlot::Floor,
            }],
            &assets,
        )
        .unwrap();
        assert_eq!(c.frame().pixel(7, 7), Some(color));
        assert_eq!(c.cached_textures(), 1);
    }
}
