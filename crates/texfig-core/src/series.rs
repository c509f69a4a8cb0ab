// File: crates/texfig-core/src/series.rs
// Summary: Series model for line and scatter data.

use crate::color::Rgba;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SeriesType {
    Line,
    Scatter,
}

#[derive(Clone, Debug)]
pub struct Series {
    pub series_type: SeriesType,
    pub data: Vec<(f64, f64)>,
    /// Legend entry; series without one are left out of the legend.
    pub label: Option<String>,
    /// Explicit color; otherwise taken from the theme palette by series index.
    pub color: Option<Rgba>,
}

impl Series {
    pub fn new(series_type: SeriesType) -> Self {
        Self { series_type, data: Vec::new(), label: None, color: None }
    }

    pub fn with_data(series_type: SeriesType, data: Vec<(f64, f64)>) -> Self {
        Self { data, ..Self::new(series_type) }
    }

    pub fn line(data: Vec<(f64, f64)>) -> Self {
        Self::with_data(SeriesType::Line, data)
    }

    pub fn scatter(data: Vec<(f64, f64)>) -> Self {
        Self::with_data(SeriesType::Scatter, data)
    }

    pub fn with_label(mut self, label: impl Into<String>) -> Self {
        self.label = Some(label.into());
        self
    }

    pub fn with_color(mut self, color: Rgba) -> Self {
        self.color = Some(color);
        self
    }

    /// Finite `(x_min, x_max, y_min, y_max)` over the data, if any point is finite.
    pub fn bounds(&self) -> Option<(f64, f64, f64, f64)> {
        let mut it = self.data.iter().filter(|(x, y)| x.is_finite() && y.is_finite());
        let &(x0, y0) = it.next()?;
        Some(it.fold((x0, x0, y0, y0), |(a, b, c, d), &(x, y)| (a.min(x), b.max(x), c.min(y), d.max(y))))
    }
}
