// File: crates/texfig-core/tests/layout.rs
// Purpose: Scene layout: fixed subplot margins, autolayout, tight cropping and raster size at a dpi.

use texfig_core::layout::Primitive;
use texfig_core::types::SubplotParams;
use texfig_core::{Axis, BBox, FigSize, Figure, Format, RcParams, SaveOptions, Series};

fn figure(width: f64, height: f64) -> Figure {
    let mut fig = Figure::with_size(FigSize::new(width, height).expect("size"));
    fig.x_axis = Axis::new("x", 0.0, 10.0);
    fig.y_axis = Axis::new("y", -1.0, 1.0);
    fig.axes_title = Some("response".into());
    fig.add_series(Series::line((0..=10).map(|i| (i as f64, (i as f64 * 0.6).sin())).collect()).with_label("sin"));
    fig
}

fn plot_rect(items: &[Primitive]) -> texfig_core::geometry::Rect {
    match items.first() {
        Some(Primitive::FillRect { rect, .. }) => *rect,
        other => panic!("first item should be the axes background, got {other:?}"),
    }
}

#[test]
fn fixed_margins_follow_subplot_params() {
    let mut rc = RcParams::defaults();
    rc.insert("figure.autolayout", false);
    let scene = figure(4.0, 3.0).scene_with(&rc, &SaveOptions::new());
    let sp = SubplotParams::default();
    let plot = plot_rect(&scene.items);
    assert!((plot.left - 4.0 * sp.left).abs() < 1e-9);
    assert!((plot.right - 4.0 * sp.right).abs() < 1e-9);
    assert!((plot.top - 3.0 * sp.top).abs() < 1e-9);
    assert!((plot.bottom - 3.0 * sp.bottom).abs() < 1e-9);
    assert_eq!((scene.width, scene.height), (4.0, 3.0));
}

#[test]
fn autolayout_keeps_labels_on_the_canvas() {
    let rc = RcParams::defaults();
    let scene = figure(4.0, 3.0).scene_with(&rc, &SaveOptions::new());
    let bounds = scene.content_bounds().expect("content");
    assert!(bounds.left >= -1e-9, "left overflow {}", bounds.left);
    assert!(bounds.top >= -1e-9, "top overflow {}", bounds.top);
    assert!(bounds.right <= scene.width + 1e-9);
    assert!(bounds.bottom <= scene.height + 1e-9);
}

#[test]
fn tight_bbox_crops_and_standard_keeps_the_figure_size() {
    let mut rc = RcParams::defaults();
    rc.insert("figure.autolayout", false);
    let fig = figure(6.0, 5.0);

    let standard = fig.scene_with(&rc, &SaveOptions::new().with_bbox(BBox::Standard));
    assert_eq!((standard.width, standard.height), (6.0, 5.0));

    let tight = fig.scene_with(&rc, &SaveOptions::new().with_bbox(BBox::Tight).with_pad_inches(0.05));
    assert!(tight.width < standard.width, "tight width {}", tight.width);
    assert!(tight.height < standard.height, "tight height {}", tight.height);
    let bounds = tight.content_bounds().expect("content");
    assert!((bounds.left - 0.05).abs() < 1e-9);
    assert!((bounds.top - 0.05).abs() < 1e-9);
}

#[test]
fn bbox_comes_from_rc_when_not_given() {
    let mut rc = RcParams::defaults();
    rc.insert("figure.autolayout", false);
    rc.insert("savefig.bbox", "tight");
    let scene = figure(6.0, 5.0).scene_with(&rc, &SaveOptions::new());
    assert!(scene.width < 6.0);
}

#[test]
fn png_size_follows_figure_size_and_dpi() {
    let rc = RcParams::defaults();
    let rendered = figure(4.0, 3.0)
        .render_with(&rc, &SaveOptions::new().with_format(Format::Png).with_dpi(50.0))
        .expect("png");
    let img = image::load_from_memory(&rendered.bytes).expect("decode png");
    assert_eq!((img.width(), img.height()), (200, 150));
}

#[test]
fn figure_without_size_uses_rc_figsize() {
    let mut rc = RcParams::defaults();
    rc.insert("figure.figsize", (3.0, 2.0));
    let scene = Figure::new().scene_with(&rc, &SaveOptions::new());
    assert_eq!((scene.width, scene.height), (3.0, 2.0));
}

#[test]
fn invalid_rc_figsize_never_reaches_the_exporters() {
    let mut rc = RcParams::defaults();
    rc.insert("figure.figsize", (-2.0, f64::NAN));
    let scene = Figure::new().scene_with(&rc, &SaveOptions::new());
    assert_eq!((scene.width, scene.height), (6.4, 4.8));
    let pgf = Figure::new()
        .render_with(&rc, &SaveOptions::new().with_format(Format::Pgf))
        .expect("pgf");
    assert!(!pgf.as_text().expect("pgf text").contains("NaN"));
}
