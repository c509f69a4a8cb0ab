// File: crates/texfig-demo/src/main.rs
// Summary: Demo loads x,y CSV data (or generates a sample), renders a preview PNG with the global
//          style and a PGF figure inside a scoped LaTeX style.
// Usage: texfig-demo [data.csv] [style.toml | sheet name]
//        RUST_LOG=debug shows the style scope entering and restoring.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use log::{info, warn};
use texfig_core::rc::{self, RcParams};
use texfig_core::theme;
use texfig_core::{
    figure, latex_figsize, with_latex_style, Axis, Figure, FontSizes, LatexStyle, SaveArgs, SaveOptions, Series,
};

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let mut args = std::env::args().skip(1);
    let input = args.next().map(PathBuf::from);
    let style_arg = args.next();

    let (points, stem) = match &input {
        Some(path) => {
            let pts = load_xy_csv(path).with_context(|| format!("failed to load CSV '{}'", path.display()))?;
            let stem = path.file_stem().and_then(|s| s.to_str()).unwrap_or("data").to_string();
            (pts, stem)
        }
        None => (sample_data(200), "sample".to_string()),
    };
    if points.is_empty() {
        anyhow::bail!("no rows loaded; expected two numeric columns (x,y)");
    }
    info!("loaded {} points", points.len());

    if let Some(arg) = &style_arg {
        let params = match theme::sheet(arg) {
            Some(sheet) => sheet,
            None => RcParams::load(arg)?,
        };
        rc::update(&params);
        info!("applied {} settings from {arg}", params.len());
    }

    let mut fig = Figure::with_size(latex_figsize(0.8)?);
    fig.x_axis = Axis::new("$t$ (s)", 0.0, 1.0);
    fig.y_axis = Axis::new("signal", 0.0, 1.0);
    fig.axes_title = Some(stem.clone());
    fig.add_series(Series::line(points.clone()).with_label("raw"));
    fig.add_series(Series::scatter(every_nth(&points, 10)).with_label("samples"));
    fig.autoscale_axes(0.05);
    let handle = figure(fig);

    let out_dir = PathBuf::from("target/out");
    let preview = handle.lock().savefig(out_dir.join(format!("{stem}.png")), &SaveOptions::new())?;
    println!("Wrote {}", preview.display());

    let style = LatexStyle::new()
        .font_sizes(FontSizes { small: 7.0, medium: 8.0, bigger: 9.0, biggest: 10.0 })
        .packages(["\\usepackage[utf8]{inputenc}", "\\usepackage{amsmath}"])
        .save_on_exit(SaveArgs::new(out_dir.join(&stem)));
    let tight = with_latex_style(style, || -> Result<PathBuf> {
        // the backend is pgf in here; an explicit format still wins
        let path = handle.lock().savefig(
            out_dir.join(format!("{stem}_tight.pgf")),
            &SaveOptions::new().with_bbox(texfig_core::BBox::Tight),
        )?;
        Ok(path)
    })?;
    println!("Wrote {}", tight.display());
    println!("Wrote {}", out_dir.join(format!("{stem}.pgf")).display());
    info!("backend restored to {}", texfig_core::get_backend());
    Ok(())
}

/// Load the first two numeric columns of a CSV. A non-numeric first row is taken as a header.
fn load_xy_csv(path: &Path) -> Result<Vec<(f64, f64)>> {
    let mut rdr = csv::ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .from_path(path)
        .with_context(|| format!("opening {}", path.display()))?;

    let mut out = Vec::new();
    for (row, rec) in rdr.records().enumerate() {
        let rec = rec?;
        let num = |i: usize| rec.get(i).and_then(|s| s.trim().parse::<f64>().ok());
        match (num(0), num(1)) {
            (Some(x), Some(y)) => out.push((x, y)),
            _ if row == 0 => info!("header: {:?}", rec.iter().collect::<Vec<_>>()),
            _ => warn!("skipping row {}: not two numbers", row + 1),
        }
    }
    Ok(out)
}

fn sample_data(n: usize) -> Vec<(f64, f64)> {
    (0..n)
        .map(|i| {
            let t = i as f64 / (n - 1).max(1) as f64 * 4.0;
            (t, (t * std::f64::consts::PI).sin() * (-0.4 * t).exp())
        })
        .collect()
}

fn every_nth(points: &[(f64, f64)], n: usize) -> Vec<(f64, f64)> {
    points.iter().step_by(n.max(1)).copied().collect()
}
