// File: crates/texfig-core/tests/theme.rs
// Purpose: Theme resolution from rc values, color parsing and the built-in style sheets.

use texfig_core::theme::{presets, sheet, FontFamily};
use texfig_core::{RcParams, Rgba, Theme};

#[test]
fn rgba_parses_hex_and_names() {
    assert_eq!(Rgba::parse("#ff8000"), Some(Rgba::rgb(255, 128, 0)));
    assert_eq!(Rgba::parse("#f80"), Some(Rgba::rgb(255, 136, 0)));
    assert_eq!(Rgba::parse("#00000080"), Some(Rgba::rgba(0, 0, 0, 128)));
    assert_eq!(Rgba::parse(" white "), Some(Rgba::WHITE));
    assert_eq!(Rgba::parse("none").map(|c| c.a), Some(0));
    assert_eq!(Rgba::parse("#12345"), None);
    assert_eq!(Rgba::parse("teal-ish"), None);
}

#[test]
fn theme_reads_the_latex_relevant_keys() {
    let mut rc = RcParams::defaults();
    rc.insert("font.family", "serif");
    rc.insert("font.size", 8.0);
    rc.insert("text.usetex", true);
    rc.insert("figure.autolayout", false);
    let theme = Theme::from_rc(&rc);
    assert_eq!(theme.font_family, FontFamily::Serif);
    assert_eq!(theme.font_size, 8.0);
    assert!(theme.usetex);
    assert!(!theme.autolayout);
    assert_eq!(theme.figsize, (6.4, 4.8));
}

#[test]
fn mistyped_or_missing_values_fall_back_to_defaults() {
    let mut rc = RcParams::new();
    rc.insert("font.size", "large");
    rc.insert("axes.facecolor", "not-a-color");
    rc.insert("font.family", "fantasy");
    let theme = Theme::from_rc(&rc);
    assert_eq!(theme.font_size, 10.0);
    assert_eq!(theme.axes_face, Rgba::WHITE);
    assert_eq!(theme.font_family, FontFamily::SansSerif);
    assert_eq!(theme.dpi, 100.0);
}

#[test]
fn every_preset_resolves_to_a_sheet() {
    for name in presets() {
        let params = sheet(name).unwrap_or_else(|| panic!("missing sheet {name}"));
        assert_eq!(params.flag("axes.grid"), Some(true));
        let theme = Theme::from_rc(&RcParams::defaults().merged(&params));
        assert!(theme.grid);
        assert_eq!(Some(theme.series_color(0)), params.text("lines.color").and_then(Rgba::parse));
    }
    assert!(sheet("DARK").is_some());
    assert!(sheet("neon").is_none());
}

#[test]
fn palette_cycles() {
    let theme = Theme::from_rc(&RcParams::defaults());
    assert_eq!(theme.series_color(0), theme.series_color(10));
    assert_ne!(theme.series_color(0), theme.series_color(1));
}

#[test]
fn invalid_figsize_falls_back_to_the_default() {
    for bad in [(-1.0, 2.0), (3.0, f64::NAN), (0.0, 0.0), (f64::INFINITY, 1.0)] {
        let mut rc = RcParams::defaults();
        rc.insert("figure.figsize", bad);
        assert_eq!(Theme::from_rc(&rc).figsize, (6.4, 4.8), "figsize {bad:?}");
    }
    let mut rc = RcParams::defaults();
    rc.insert("figure.figsize", (3.0, 2.0));
    assert_eq!(Theme::from_rc(&rc).figsize, (3.0, 2.0));
}
