// File: crates/texfig-core/benches/render_bench.rs
// Purpose: Export throughput for a dense line figure, raster vs PGF text.

use anyhow::Result;
use criterion::{black_box, criterion_group, criterion_main, Criterion};
use texfig_core::{latex_defaults, latex_figsize, Axis, Figure, Format, RcParams, SaveOptions, Series};

fn build_figure(n: usize) -> Result<Figure> {
    let mut fig = Figure::with_size(latex_figsize(0.8)?);
    let data = (0..n)
        .map(|i| {
            let x = i as f64;
            (x, (x * 0.01).sin() * 10.0 + x * 0.0001)
        })
        .collect();
    fig.x_axis = Axis::new("X", 0.0, (n - 1) as f64);
    fig.y_axis = Axis::new("Y", -12.0, 12.0);
    fig.add_series(Series::line(data));
    Ok(fig)
}

fn bench_render(c: &mut Criterion) {
    let rc = RcParams::defaults().merged(&latex_defaults());
    let mut group = c.benchmark_group("render_bytes");
    for &n in &[10_000usize, 50_000usize] {
        let fig = build_figure(n).expect("figure");
        for format in [Format::Png, Format::Pgf] {
            let opts = SaveOptions::new().with_format(format).with_dpi(100.0);
            group.bench_function(format!("{}_{n}", format.extension()), |b| {
                b.iter(|| -> Result<()> {
                    let rendered = fig.render_with(&rc, &opts)?;
                    black_box(rendered.bytes);
                    Ok(())
                });
            });
        }
    }
    group.finish();
}

criterion_group!(benches, bench_render);
criterion_main!(benches);
