// File: crates/texfig-core/tests/smoke.rs
// Purpose: End-to-end export smoke tests: PNG/SVG/PGF bytes in memory and files on disk.

use texfig_core::{Axis, Figure, Format, RcParams, SaveOptions, Series};

fn small_figure() -> Figure {
    let mut fig = Figure::new();
    fig.x_axis = Axis::new("X", 0.0, 4.0);
    fig.y_axis = Axis::new("Y", 0.0, 4.0);
    fig.add_series(Series::line(vec![(0.0, 0.0), (1.0, 2.0), (2.0, 1.0), (3.0, 3.5), (4.0, 2.5)]));
    fig
}

#[test]
fn render_smoke_png() {
    let fig = small_figure();
    let rendered = fig.render_with(&RcParams::defaults(), &SaveOptions::new()).expect("render bytes");
    assert_eq!(rendered.format, Format::Png);
    assert!(rendered.bytes.starts_with(&[137, 80, 78, 71]), "should be PNG header");
    assert!(rendered.as_text().is_none());
}

#[test]
fn render_smoke_svg_and_pgf() {
    let fig = small_figure();
    let rc = RcParams::defaults();
    let svg = fig.render_with(&rc, &SaveOptions::new().with_format(Format::Svg)).expect("svg");
    assert!(svg.as_text().expect("svg is text").contains("<svg"));
    let pgf = fig.render_with(&rc, &SaveOptions::new().with_format(Format::Pgf)).expect("pgf");
    assert!(pgf.as_text().expect("pgf is text").contains("\\begin{pgfpicture}"));
}

#[test]
fn savefig_picks_the_format_from_the_extension() {
    let dir = tempfile::tempdir().expect("tempdir");
    let fig = small_figure();
    let rc = RcParams::defaults();

    let png = fig.savefig_with(&rc, dir.path().join("out/smoke.png"), &SaveOptions::new()).expect("png saved");
    let meta = std::fs::metadata(&png).expect("output exists");
    assert!(meta.len() > 0, "png should be non-empty");

    let tex = fig.savefig_with(&rc, dir.path().join("smoke.tex"), &SaveOptions::new()).expect("tex saved");
    let body = std::fs::read_to_string(&tex).expect("read pgf");
    assert!(body.contains("\\end{pgfpicture}"));
}

#[test]
fn savefig_appends_the_default_extension() {
    let dir = tempfile::tempdir().expect("tempdir");
    let fig = small_figure();
    let mut rc = RcParams::defaults();
    rc.insert("savefig.format", "svg");

    let written = fig.savefig_with(&rc, dir.path().join("noext"), &SaveOptions::new()).expect("saved");
    assert_eq!(written, dir.path().join("noext.svg"));
    assert!(written.exists());
}

#[test]
fn unknown_extension_is_an_export_error() {
    let dir = tempfile::tempdir().expect("tempdir");
    let err = small_figure()
        .savefig_with(&RcParams::defaults(), dir.path().join("plot.bmp"), &SaveOptions::new())
        .expect_err("bmp is not supported");
    assert!(matches!(err, texfig_core::Error::Export { .. }), "got {err}");
    assert!(!dir.path().join("plot.bmp").exists());
}
