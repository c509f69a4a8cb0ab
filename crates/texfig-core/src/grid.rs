// File: crates/texfig-core/src/grid.rs
// Summary: Tick layout helpers: "nice" tick steps and tick label formatting.

use crate::axis::{Axis, ScaleKind};

/// Step from the 1-2-5 family giving roughly `target` intervals over `span`.
pub fn nice_step(span: f64, target: usize) -> f64 {
    let raw = span.abs().max(1e-12) / target.max(1) as f64;
    let mag = 10f64.powf(raw.log10().floor());
    let norm = raw / mag;
    let nice = if norm < 1.5 { 1.0 } else if norm < 3.0 { 2.0 } else if norm < 7.0 { 5.0 } else { 10.0 };
    nice * mag
}

/// Tick positions inside `[axis.min, axis.max]` with their labels.
pub fn ticks(axis: &Axis, target: usize) -> Vec<(f64, String)> {
    let (lo, hi) = if axis.min <= axis.max { (axis.min, axis.max) } else { (axis.max, axis.min) };
    if !lo.is_finite() || !hi.is_finite() {
        return Vec::new();
    }
    match axis.kind {
        ScaleKind::Linear => {
            let step = nice_step(hi - lo, target);
            let first = (lo / step).ceil() as i64;
            let last = (hi / step + 1e-9).floor() as i64;
            (first..=last)
                .map(|i| {
                    let v = i as f64 * step;
                    // avoid "-0"
                    let v = if v.abs() < step * 1e-9 { 0.0 } else { v };
                    (v, format_tick(v, step))
                })
                .collect()
        }
        ScaleKind::Log10 => {
            let first = lo.max(1e-12).log10().ceil() as i32;
            let last = hi.max(1e-12).log10().floor() as i32;
            (first..=last)
                .map(|e| {
                    let v = 10f64.powi(e);
                    (v, format_tick(v, v))
                })
                .collect()
        }
    }
}

/// Format with just enough decimals to tell neighbouring ticks `step` apart.
pub fn format_tick(v: f64, step: f64) -> String {
    let decimals = (-step.abs().max(1e-12).log10().floor()).max(0.0) as usize;
    format!("{v:.decimals$}")
}
