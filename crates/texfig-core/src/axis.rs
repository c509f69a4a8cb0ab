// File: crates/texfig-core/src/axis.rs
// Summary: Axis model with labels, ranges and linear/log10 data transforms.

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ScaleKind {
    Linear,
    Log10,
}

#[derive(Clone, Debug, PartialEq)]
pub struct Axis {
    pub label: String,
    pub min: f64,
    pub max: f64,
    pub kind: ScaleKind,
}

impl Axis {
    pub fn new(label: impl Into<String>, min: f64, max: f64) -> Self {
        Self { label: label.into(), min, max, kind: ScaleKind::Linear }
    }

    pub fn log10(label: impl Into<String>, min: f64, max: f64) -> Self {
        Self { kind: ScaleKind::Log10, ..Self::new(label, min, max) }
    }

    pub fn default_x() -> Self {
        Self::new("", 0.0, 1.0)
    }

    pub fn default_y() -> Self {
        Self::new("", 0.0, 1.0)
    }

    /// Map a data value to `[0, 1]` along the axis (values outside the range map outside).
    pub fn normalize(&self, v: f64) -> f64 {
        match self.kind {
            ScaleKind::Linear => {
                let span = (self.max - self.min).max(1e-12);
                (v - self.min) / span
            }
            ScaleKind::Log10 => {
                let lo = self.min.max(1e-12).log10();
                let hi = self.max.max(1e-12).log10();
                let span = (hi - lo).max(1e-12);
                (v.max(1e-12).log10() - lo) / span
            }
        }
    }
}
