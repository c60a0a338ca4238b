use super::*;
use crate::foundation::error::RiverGlyphError;
use crate::render::surface::{TextAlign, with_transform};

fn style() -> TextStyle {
    TextStyle {
        size: 12.0,
        color: Rgba8::rgb(255, 255, 255),
        align: TextAlign::Center,
    }
}

#[test]
fn begin_frame_clears_previous_commands() {
    let mut s = RecordingSurface::new();
    let canvas = Canvas {
        width: 10,
        height: 10,
    };
    s.begin_frame(canvas, Rgba8::rgb(0, 0, 0)).unwrap();
    s.fill_circle(Point::new(1.0, 1.0), 2.0, Rgba8::rgb(1, 2, 3))
        .unwrap();
    s.begin_frame(canvas, Rgba8::rgb(0, 0, 0)).unwrap();
    assert_eq!(s.commands().len(), 1);
    assert!(s.circles().is_empty());
}

#[test]
fn transforms_compose_translate_then_rotate() {
    let mut s = RecordingSurface::new();
    let local = Affine::translate((100.0, 50.0)) * Affine::rotate(std::f64::consts::FRAC_PI_2);
    with_transform(&mut s, local, |s| {
        s.stroke_line(
            Point::ORIGIN,
            Point::new(10.0, 0.0),
            Rgba8::rgb(0, 255, 255),
            1.0,
        )?;
        s.text("Nile", Point::ORIGIN, &style())
    })
    .unwrap();

    let (from, to) = s.lines()[0];
    assert!((from.x - 100.0).abs() < 1e-9 && (from.y - 50.0).abs() < 1e-9);
    assert!((to.x - 100.0).abs() < 1e-9 && (to.y - 60.0).abs() < 1e-9);

    let t = s.texts()[0];
    assert!((t.anchor().x - 100.0).abs() < 1e-9);
    assert!((t.rotation() - std::f64::consts::FRAC_PI_2).abs() < 1e-9);
    assert_eq!(s.transform_depth(), 0);
}

#[test]
fn with_transform_pops_on_error() {
    let mut s = RecordingSurface::new();
    let out: RiverGlyphResult<()> = with_transform(&mut s, Affine::translate((1.0, 1.0)), |_| {
        Err(RiverGlyphError::render("boom"))
    });
    assert!(out.is_err());
    assert_eq!(s.transform_depth(), 0);
}

#[test]
fn pop_without_push_keeps_identity() {
    let mut s = RecordingSurface::new();
    s.pop_transform();
    s.fill_circle(Point::new(3.0, 4.0), 5.0, Rgba8::rgb(0, 0, 255))
        .unwrap();
    let (c, d, _) = s.circles()[0];
    assert_eq!(c, Point::new(3.0, 4.0));
    assert_eq!(d, 5.0);
}
