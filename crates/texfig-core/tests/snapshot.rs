// File: crates/texfig-core/tests/snapshot.rs
// Purpose: Golden snapshot harness with bless flow.
// Behavior:
// - Renders a deterministic small figure to PNG bytes and to PGF text.
// - If env UPDATE_SNAPSHOTS=1, (re)writes the snapshot files.
// - Else, if a snapshot exists, compares decoded pixels (PNG) or text (PGF) for an exact match.
// - Else, fails under CI (env CI set); locally it records the snapshot so the next run compares.

use std::path::{Path, PathBuf};

use texfig_core::{latex_defaults, Axis, Figure, Format, RcParams, SaveOptions, Series};

fn golden_figure() -> Figure {
    let mut fig = Figure::with_size(texfig_core::FigSize::new(3.0, 2.0).expect("size"));
    fig.x_axis = Axis::new("", 0.0, 4.0);
    fig.y_axis = Axis::new("", 0.0, 4.0);
    fig.add_series(Series::line(vec![(0.0, 0.0), (1.0, 1.0), (2.0, 0.0), (3.0, 1.5), (4.0, 1.0)]));
    fig
}

fn snapshot_dir() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("tests/__snapshots__")
}

fn update_requested() -> bool {
    std::env::var("UPDATE_SNAPSHOTS").ok().map(|v| v == "1" || v.eq_ignore_ascii_case("true")).unwrap_or(false)
}

fn on_ci() -> bool {
    std::env::var_os("CI").is_some_and(|v| !v.is_empty() && v != "0" && v != "false")
}

fn write_snapshot(path: &Path, bytes: &[u8]) {
    std::fs::create_dir_all(snapshot_dir()).expect("create snapshots dir");
    std::fs::write(path, bytes).expect("write snapshot");
    eprintln!("[snapshot] Updated {} ({} bytes)", path.display(), bytes.len());
}

/// Returns the stored snapshot, or `None` right after (re)recording it.
fn golden(name: &str, bytes: &[u8]) -> Option<Vec<u8>> {
    let snap_path = snapshot_dir().join(name);
    if update_requested() {
        write_snapshot(&snap_path, bytes);
        return None;
    }
    if snap_path.exists() {
        return Some(std::fs::read(&snap_path).expect("read snapshot"));
    }
    assert!(
        !on_ci(),
        "missing snapshot {}; run with UPDATE_SNAPSHOTS=1 and commit it",
        snap_path.display()
    );
    eprintln!("[snapshot] Missing snapshot {}; recording it for the next run.", snap_path.display());
    write_snapshot(&snap_path, bytes);
    None
}

#[test]
fn golden_basic_png() {
    let rendered = golden_figure()
        .render_with(&RcParams::defaults(), &SaveOptions::new().with_format(Format::Png).with_dpi(72.0))
        .expect("render png");
    if let Some(want) = golden("basic_figure.png", &rendered.bytes) {
        // Compare decoded pixel buffers to avoid PNG encoder variance
        let got_img = image::load_from_memory(&rendered.bytes).expect("decode got").to_rgba8();
        let want_img = image::load_from_memory(&want).expect("decode want").to_rgba8();
        assert_eq!(got_img.as_raw(), want_img.as_raw(), "rendered pixels differ from golden snapshot");
    }
}

#[test]
fn golden_basic_pgf() {
    let rc = RcParams::defaults().merged(&latex_defaults());
    let rendered = golden_figure().render_with(&rc, &SaveOptions::new()).expect("render pgf");
    if let Some(want) = golden("basic_figure.pgf", &rendered.bytes) {
        assert_eq!(
            rendered.as_text().expect("pgf text"),
            String::from_utf8_lossy(&want),
            "pgf output differs from golden snapshot"
        );
    }
}

#[test]
fn pgf_output_is_reproducible() {
    let rc = RcParams::defaults().merged(&latex_defaults());
    let fig = golden_figure();
    let a = fig.render_with(&rc, &SaveOptions::new()).expect("first render");
    let b = fig.render_with(&rc, &SaveOptions::new()).expect("second render");
    assert_eq!(a.bytes, b.bytes, "pgf output must not vary between runs");
}
