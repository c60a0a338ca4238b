use super::*;

fn canvas(w: u32, h: u32) -> Canvas {
    Canvas {
        width: w,
        height: h,
    }
}

fn digest_u64(bytes: &[u8]) -> u64 {
    let mut h = 0xcbf2_9ce4_8422_2325u64;
    for &b in bytes {
        h ^= u64::from(b);
        h = h.wrapping_mul(0x0000_0100_0000_01B3);
    }
    h
}

#[test]
fn clears_to_page_color() {
    let mut s = CpuSurface::new(CpuSurfaceOpts::default());
    s.begin_frame(canvas(16, 8), Rgba8::rgb(0, 0x73, 0xe6)).unwrap();
    let frame = s.finish().unwrap();

    assert_eq!(frame.width, 16);
    assert_eq!(frame.height, 8);
    assert!(frame.premultiplied);
    assert_eq!(frame.data.len(), 16 * 8 * 4);
    assert_eq!(frame.pixel(3, 3), Some([0, 0x73, 0xe6, 255]));
    assert_eq!(frame.pixel(16, 0), None);
}

#[test]
fn fills_circle_interior() {
    let mut s = CpuSurface::new(CpuSurfaceOpts::default());
    s.begin_frame(canvas(64, 64), Rgba8::rgb(0, 0, 0)).unwrap();
    s.fill_circle(Point::new(32.0, 32.0), 40.0, Rgba8::rgb(0, 0, 255))
        .unwrap();
    let frame = s.finish().unwrap();

    assert_eq!(frame.pixel(32, 32), Some([0, 0, 255, 255]));
    assert_eq!(frame.pixel(1, 1), Some([0, 0, 0, 255]));
}

#[test]
fn strokes_follow_pushed_transform() {
    let mut s = CpuSurface::new(CpuSurfaceOpts::default());
    s.begin_frame(canvas(64, 64), Rgba8::rgb(0, 0, 0)).unwrap();
    s.push_transform(Affine::translate((0.0, 32.0)));
    s.stroke_line(
        Point::new(4.0, 0.0),
        Point::new(60.0, 0.0),
        Rgba8::rgb(0, 255, 255),
        4.0,
    )
    .unwrap();
    s.pop_transform();
    let frame = s.finish().unwrap();

    let px = frame.pixel(32, 32).unwrap();
    assert!(px[1] > 128 && px[2] > 128);
    assert_eq!(frame.pixel(32, 4), Some([0, 0, 0, 255]));
}

#[test]
fn rendering_is_deterministic() {
    let draw = || {
        let mut s = CpuSurface::new(CpuSurfaceOpts::default());
        s.begin_frame(canvas(48, 48), Rgba8::rgb(10, 20, 30)).unwrap();
        s.fill_circle(Point::new(24.0, 24.0), 30.0, Rgba8::rgb(0, 0, 255))
            .unwrap();
        s.stroke_line(
            Point::new(24.0, 24.0),
            Point::new(40.0, 10.0),
            Rgba8::rgb(0, 255, 255),
            0.8,
        )
        .unwrap();
        s.finish().unwrap()
    };
    let a = draw();
    let b = draw();
    assert_eq!(digest_u64(&a.data), digest_u64(&b.data));
}

#[test]
fn text_without_font_is_skipped() {
    let mut s = CpuSurface::new(CpuSurfaceOpts::default());
    assert!(!s.has_font());
    s.begin_frame(canvas(32, 32), Rgba8::rgb(0, 0, 0)).unwrap();
    let style = TextStyle {
        size: 12.0,
        color: Rgba8::rgb(255, 255, 255),
        align: TextAlign::Center,
    };
    s.text("Nile", Point::new(16.0, 16.0), &style).unwrap();
    let frame = s.finish().unwrap();
    assert!(
        frame
            .data
            .chunks_exact(4)
            .all(|px| px == [0, 0, 0, 255])
    );
}

#[test]
fn rejects_oversized_or_empty_canvas() {
    let mut s = CpuSurface::new(CpuSurfaceOpts::default());
    assert!(s.begin_frame(canvas(70_000, 10), Rgba8::rgb(0, 0, 0)).is_err());
    assert!(s.begin_frame(canvas(0, 10), Rgba8::rgb(0, 0, 0)).is_err());
}

#[test]
fn draw_before_begin_is_an_error() {
    let mut s = CpuSurface::new(CpuSurfaceOpts::default());
    assert!(
        s.fill_circle(Point::new(1.0, 1.0), 2.0, Rgba8::rgb(0, 0, 0))
            .is_err()
    );
    assert!(s.finish().is_err());
}

#[test]
fn invalid_font_bytes_are_rejected() {
    let s = CpuSurface::new(CpuSurfaceOpts::default());
    assert!(s.with_font_bytes(b"not a font").is_err());
}

#[test]
fn oversized_canvas_reports_the_limit() {
    let mut s = CpuSurface::new(CpuSurfaceOpts::default());
    let err = s
        .begin_frame(canvas(100, 70_000), Rgba8::rgb(0, 0, 0))
        .unwrap_err();
    assert!(matches!(err, RiverGlyphError::Render(_)));
    assert!(err.to_string().contains("100x70000"), "{err}");
    assert!(err.to_string().contains("65535"), "{err}");
}
