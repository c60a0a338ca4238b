use super::*;

fn vp(w: f64, h: f64) -> Viewport {
    Viewport::new(w, h).unwrap()
}

fn approx(a: f64, b: f64) -> bool {
    (a - b).abs() < 1e-9
}

#[test]
fn tiers_follow_breakpoints() {
    let p = LayoutParams::default();

    let wide = compute_layout(vp(1300.0, 800.0), 6, &p);
    assert_eq!(wide.columns, 3);
    assert!(approx(wide.circle_size, 250.0));
    assert!(approx(wide.padding, 100.0));

    let medium = compute_layout(vp(1000.0, 800.0), 6, &p);
    assert_eq!(medium.columns, 2);
    assert!(approx(medium.circle_size, 200.0));
    assert!(approx(medium.padding, 60.0));

    let narrow = compute_layout(vp(600.0, 800.0), 6, &p);
    assert_eq!(narrow.columns, 2);
    assert!(approx(narrow.circle_size, 150.0));
    assert!(approx(narrow.padding, 40.0));
    assert!(narrow.circle_size < wide.circle_size);
}

#[test]
fn breakpoints_are_exclusive() {
    let p = LayoutParams::default();
    assert_eq!(SizeTier::for_width(1200.0, &p), SizeTier::Medium);
    assert_eq!(SizeTier::for_width(1200.5, &p), SizeTier::Wide);
    assert_eq!(SizeTier::for_width(800.0, &p), SizeTier::Narrow);
    assert_eq!(SizeTier::for_width(801.0, &p), SizeTier::Medium);
}

#[test]
fn canvas_grows_to_fit_rows_but_never_below_viewport() {
    let p = LayoutParams::default();

    let tall = compute_layout(vp(1300.0, 500.0), 6, &p);
    assert_eq!(tall.rows, 2);
    assert!(approx(tall.canvas_height, 700.0));
    assert!(approx(tall.canvas_width, 1300.0));

    let short = compute_layout(vp(1300.0, 2000.0), 6, &p);
    assert!(approx(short.canvas_height, 2000.0));
}

#[test]
fn grid_is_centered() {
    let p = LayoutParams::default();
    let l = compute_layout(vp(1300.0, 500.0), 6, &p);

    assert!(approx(l.offset_x, 175.0));
    assert!(approx(l.offset_y, 50.0));

    let c0 = l.center(0);
    assert!(approx(c0.x, 300.0) && approx(c0.y, 175.0));

    let c4 = l.center(4);
    assert!(approx(c4.x, 650.0) && approx(c4.y, 525.0));

    let centers = l.grid_centers().collect::<Vec<_>>();
    assert_eq!(centers.len(), 6);
    assert_eq!(centers[4], c4);
}

#[test]
fn partial_last_row_uses_row_major_positions() {
    let p = LayoutParams::default();
    let l = compute_layout(vp(1000.0, 400.0), 5, &p);
    assert_eq!(l.rows, 3);
    let c4 = l.center(4);
    let c0 = l.center(0);
    assert!(approx(c4.x, c0.x));
    assert!(approx(c4.y - c0.y, 2.0 * l.pitch()));
}

#[test]
fn empty_layout_has_no_centers() {
    let p = LayoutParams::default();
    let l = compute_layout(vp(900.0, 600.0), 0, &p);
    assert!(l.is_empty());
    assert_eq!(l.rows, 0);
    assert!(approx(l.canvas_height, 600.0));
    assert_eq!(l.grid_centers().count(), 0);
}

#[test]
fn params_validate_breakpoint_order() {
    let bad = LayoutParams {
        medium_breakpoint: 1300.0,
        ..LayoutParams::default()
    };
    assert!(bad.validate().is_err());
    assert!(LayoutParams::default().validate().is_ok());
}
