// File: crates/texfig-core/src/figsize.rs
// Summary: Figure size calculator: fraction of a document column width + aspect ratio -> inches.

use crate::error::{Error, Result};

/// Height-to-width ratio used when none is given, (sqrt(5) - 1) / 2.
pub const GOLDEN_RATIO: f64 = 0.618_033_988_749_894_9;
/// Single-column text width of a typical article template, in inches.
pub const DEFAULT_COLUMN_WIDTH: f64 = 6.0;
/// Column width most two-column templates report via `\showthe\columnwidth`, in TeX points.
pub const DEFAULT_COLUMN_WIDTH_PT: f64 = 510.0;
/// One TeX point in inches.
pub const INCHES_PER_PT: f64 = 1.0 / 72.27;

/// Figure size, in the unit of the column width it was derived from (inches by default).
/// Contract: both sides are finite and strictly positive.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct FigSize {
    pub width: f64,
    pub height: f64,
}

impl FigSize {
    pub fn new(width: f64, height: f64) -> Result<Self> {
        ensure_positive("width", width)?;
        ensure_positive("height", height)?;
        Ok(Self { width, height })
    }

    pub const fn as_tuple(&self) -> (f64, f64) { (self.width, self.height) }

    /// Height over width.
    pub fn aspect(&self) -> f64 { self.height / self.width }
}

/// Size for a figure spanning `fractional_width` of the default column, golden-ratio tall.
pub fn latex_figsize(fractional_width: f64) -> Result<FigSize> {
    latex_figsize_with(fractional_width, GOLDEN_RATIO, DEFAULT_COLUMN_WIDTH)
}

/// `width = fractional_width * column_width`, `height = width * aspect_ratio`.
pub fn latex_figsize_with(fractional_width: f64, aspect_ratio: f64, column_width: f64) -> Result<FigSize> {
    ensure_positive("fractional width", fractional_width)?;
    ensure_positive("aspect ratio", aspect_ratio)?;
    ensure_positive("column width", column_width)?;
    let width = fractional_width * column_width;
    FigSize::new(width, width * aspect_ratio)
}

/// Like `latex_figsize_with`, with the column width in TeX points; the result is in inches.
pub fn latex_figsize_pt(fractional_width: f64, aspect_ratio: f64, column_width_pt: f64) -> Result<FigSize> {
    ensure_positive("column width", column_width_pt)?;
    latex_figsize_with(fractional_width, aspect_ratio, column_width_pt * INCHES_PER_PT)
}

fn ensure_positive(what: &str, v: f64) -> Result<()> {
    if v.is_finite() && v > 0.0 {
        Ok(())
    } else {
        Err(Error::InvalidFigSize(format!("{what} must be positive and finite, got {v}")))
    }
}
