// File: crates/texfig-examples/src/bin/lines.rs
// Summary: Minimal example: a half-column line figure saved as PNG, then as PGF inside a LaTeX style.

use texfig_core::{figure, latex_figsize, savefig, Axis, Figure, LatexStyle, SaveArgs, SaveOptions, Series};

fn main() -> texfig_core::Result<()> {
    let data = vec![
        (0.0, 0.0),
        (1.0, 1.2),
        (2.0, 0.8),
        (3.0, 1.8),
        (4.0, 1.4),
        (5.0, 2.0),
    ];

    let mut fig = Figure::with_size(latex_figsize(0.5)?);
    fig.x_axis = Axis::new("X", 0.0, 5.0);
    fig.y_axis = Axis::new("Y", 0.0, 2.2);
    fig.add_series(Series::line(data));
    figure(fig);

    if let Some(out) = savefig("target/out/example_lines.png", &SaveOptions::new())? {
        println!("Wrote {}", out.display());
    }

    let guard = LatexStyle::new().save_on_exit(SaveArgs::new("target/out/example_lines")).enter();
    if let Some(out) = guard.finish()? {
        println!("Wrote {}", out.display());
    }
    Ok(())
}
