// File: crates/texfig-core/tests/rc_params.rs
// Purpose: rc mapping behavior: merge precedence, TOML style files, global writes and the
//          mutation counter.

use texfig_core::rc::{self, RcParams, RcValue};
use texfig_core::{get_backend, use_backend, Backend, Error};

#[test]
fn merge_lets_the_right_hand_side_win() {
    let mut base: RcParams = [("font.size", RcValue::Number(10.0)), ("font.family", "sans-serif".into())]
        .into_iter()
        .collect();
    let over: RcParams = [("font.size", RcValue::Number(8.0)), ("text.usetex", true.into())].into_iter().collect();
    base.merge(&over);
    assert_eq!(base.number("font.size"), Some(8.0));
    assert_eq!(base.text("font.family"), Some("sans-serif"));
    assert_eq!(base.flag("text.usetex"), Some(true));
    assert_eq!(base.len(), 3);
}

#[test]
fn style_file_flattens_tables_into_dotted_keys() {
    let src = r#"
backend = "pgf"

[font]
family = "serif"
size = 9

[figure]
figsize = [3.5, 2.25]
autolayout = false

[pgf]
preamble = "\\usepackage{amsmath}"
"#;
    let params = RcParams::from_toml_str(src).expect("style file parses");
    assert_eq!(params.text("backend"), Some("pgf"));
    assert_eq!(params.text("font.family"), Some("serif"));
    assert_eq!(params.number("font.size"), Some(9.0));
    assert_eq!(params.pair("figure.figsize"), Some((3.5, 2.25)));
    assert_eq!(params.flag("figure.autolayout"), Some(false));
    assert_eq!(params.text("pgf.preamble"), Some("\\usepackage{amsmath}"));
}

#[test]
fn style_file_rejects_unsupported_values() {
    let err = RcParams::from_toml_str("[lines]\nwidths = [1, 2, 3]\n").expect_err("three-element array");
    match err {
        Error::InvalidRc { key, .. } => assert_eq!(key, "lines.widths"),
        other => panic!("unexpected error: {other}"),
    }
    assert!(matches!(RcParams::from_toml_str("font = ["), Err(Error::StyleParse(_))));
}

#[test]
fn loading_a_missing_style_file_names_the_path() {
    let dir = tempfile::tempdir().expect("tempdir");
    let missing = dir.path().join("nope.toml");
    match RcParams::load(&missing) {
        Err(Error::StyleFile { path, .. }) => assert_eq!(path, missing),
        other => panic!("unexpected result: {other:?}"),
    }
}

#[test]
fn defaults_cover_the_keys_the_latex_style_touches() {
    let defaults = RcParams::defaults();
    for key in texfig_core::latex_defaults().keys() {
        assert!(defaults.contains_key(key), "default table misses {key}");
    }
}

#[test]
fn global_writes_bump_the_generation_and_restore_replaces_everything() {
    let _serial = rc::lock();
    let before = rc::snapshot();
    let gen = rc::generation();

    rc::set("font.size", 7.0);
    rc::rc("axes", &[("titlesize", RcValue::Number(13.0)), ("labelsize", RcValue::Number(9.0))]);
    use_backend(Backend::Svg);
    assert!(rc::generation() >= gen + 3);
    assert_eq!(rc::get("font.size"), Some(RcValue::Number(7.0)));
    assert_eq!(rc::get("axes.titlesize"), Some(RcValue::Number(13.0)));
    assert_eq!(get_backend(), Backend::Svg);

    rc::restore(before.clone());
    assert_eq!(rc::snapshot(), before);
}

#[test]
fn unknown_backend_names_fall_back_to_raster() {
    let _serial = rc::lock();
    let before = rc::snapshot();
    rc::set("backend", "qt5agg");
    assert_eq!(get_backend(), Backend::Raster);
    assert!(matches!("qt5agg".parse::<Backend>(), Err(Error::UnknownBackend(_))));
    rc::restore(before);
}

#[test]
fn rc_defaults_resets_the_global_mapping() {
    let _serial = rc::lock();
    let before = rc::snapshot();
    rc::set("font.family", "monospace");
    rc::rc_defaults();
    assert_eq!(rc::snapshot(), RcParams::defaults());
    rc::restore(before);
}
