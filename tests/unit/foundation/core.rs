use super::*;

#[test]
fn canvas_rejects_zero_dimensions() {
    assert!(Canvas::new(0, 10).is_err());
    assert!(Canvas::new(10, 0).is_err());
    let c = Canvas::new(640, 480).unwrap();
    assert_eq!(c.bounds().width, 640);
    assert_eq!(c.bounds().height, 480);
}

#[test]
fn snap_rounds_each_edge_and_adjacent_slots_tile() {
    let a = PixelRect::snap(Rect::new(0.4, 0.0, 10.6, 5.5));
    assert_eq!(
        a,
        PixelRect {
            x: 0,
            y: 0,
            width: 11,
            height: 6
        }
    );

    let left = PixelRect::snap(Rect::new(3.3, 0.0, 13.7, 10.0));
    let right = PixelRect::snap(Rect::new(13.7, 0.0, 24.1, 10.0));
    assert_eq!(left.right(), right.x);
}

#[test]
fn snap_clamps_negative_edges() {
    let r = PixelRect::snap(Rect::new(-4.0, -1.0, 2.0, 3.0));
    assert_eq!(r.x, 0);
    assert_eq!(r.y, 0);
    assert_eq!(r.width, 2);
    assert_eq!(r.height, 3);
}

#[test]
fn intersect_and_inset() {
    let a = PixelRect {
        x: 0,
        y: 0,
        width: 10,
        height: 10,
    };
    let b = PixelRect {
        x: 5,
        y: 8,
        width: 10,
        height: 10,
    };
    let i = a.intersect(b);
    assert_eq!((i.x, i.y, i.width, i.height), (5, 8, 5, 2));

    let far = PixelRect {
        x: 20,
        y: 20,
        width: 1,
        height: 1,
    };
    assert!(a.intersect(far).is_empty());

    let inset = a.inset_trailing(1);
    assert_eq!((inset.width, inset.height), (9, 9));
}

#[test]
fn grid_pos_serializes_as_pair() {
    let p = GridPos::new(3, 7);
    assert_eq!(serde_json::to_string(&p).unwrap(), "[3,7]");
    let back: GridPos = serde_json::from_str("[3,7]").unwrap();
    assert_eq!(back, p);
}

#[test]
fn hex_colors_are_opaque() {
    let c = Rgba8Premul::opaque_hex(0x3b82f6);
    assert_eq!(c.to_array(), [0x3b, 0x82, 0xf6, 255]);
    assert_eq!(Rgba8Premul::transparent().a, 0);
    assert_eq!(
        Rgba8Premul::from_straight_rgba(255, 0, 0, 128).to_array(),
        [128, 0, 0, 128]
    );
}
