use kurbo::{PathEl, Shape};

use super::*;

fn slot() -> PixelRect {
    PixelRect {
        x: 40,
        y: 20,
        width: 30,
        height: 30,
    }
}

#[test]
fn glyph_box_is_centered_inside_slot() {
    let b = MarkerGlyph::glyph_box(slot());
    assert_eq!((b.width, b.height), (13, 18));
    assert!(b.x >= 40 && b.right() <= 70);
    assert!(b.y >= 20 && b.bottom() <= 50);
    assert_eq!(b.x - 40, 70 - b.right() - 1);
}

#[test]
fn outline_vertices_are_whole_pixels_inside_the_box() {
    let b = MarkerGlyph::glyph_box(slot());
    for glyph in [MarkerGlyph::Start, MarkerGlyph::End] {
        let path = glyph.path_in(slot());
        let mut vertices = 0;
        for el in path.elements() {
            let p = match *el {
                PathEl::MoveTo(p) | PathEl::LineTo(p) => p,
                PathEl::ClosePath => continue,
                other => panic!("unexpected element {other:?}"),
            };
            vertices += 1;
            assert_eq!(p.x.fract(), 0.0);
            assert_eq!(p.y.fract(), 0.0);
            assert!(p.x >= f64::from(b.x) && p.x <= f64::from(b.right()));
            assert!(p.y >= f64::from(b.y) && p.y <= f64::from(b.bottom()));
        }
        assert_eq!(vertices, 12);
        assert!(path.area().abs() > 0.0);
    }
}

#[test]
fn letters_are_distinct() {
    assert_eq!(MarkerGlyph::Start.letter(), 'S');
    assert_eq!(MarkerGlyph::End.letter(), 'E');
    assert_ne!(
        MarkerGlyph::Start.path_in(slot()),
        MarkerGlyph::End.path_in(slot())
    );
}

#[test]
fn tiny_slots_still_produce_a_glyph_box() {
    let b = MarkerGlyph::glyph_box(PixelRect {
        x: 0,
        y: 0,
        width: 1,
        height: 1,
    });
    assert_eq!((b.width, b.height), (1, 1));
}
