// File: crates/texfig-core/src/types.rs
// Summary: Shared layout constants (subplot margins, tick geometry, text metrics).

/// Points per inch (PostScript points, used for font sizes and line widths).
pub const POINTS_PER_INCH: f64 = 72.0;
/// Tick mark length in points.
pub const TICK_LENGTH_PT: f64 = 3.5;
/// Gap between a tick mark and its label, in points.
pub const TICK_PAD_PT: f64 = 3.5;
/// Gap between tick labels and the axis label, in points.
pub const LABEL_PAD_PT: f64 = 4.0;
/// Gap between the plot frame and the axes title, in points.
pub const TITLE_PAD_PT: f64 = 6.0;
/// Approximate glyph advance relative to font size, for text extents without a shaper.
pub const CHAR_WIDTH_RATIO: f64 = 0.6;
/// Line height relative to font size.
pub const LINE_HEIGHT_RATIO: f64 = 1.2;
/// Target tick count per axis.
pub const TARGET_TICKS: usize = 6;

#[inline]
pub fn pt_to_in(pt: f64) -> f64 { pt / POINTS_PER_INCH }

/// Subplot margins as fractions of the figure size.
/// Contract: `0 <= left < right <= 1` and `0 <= top < bottom <= 1`, measured from the top-left.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SubplotParams {
    pub left: f64,
    pub right: f64,
    pub top: f64,
    pub bottom: f64,
}

impl SubplotParams {
    pub const fn new(left: f64, right: f64, top: f64, bottom: f64) -> Self {
        Self { left, right, top, bottom }
    }
}

impl Default for SubplotParams {
    fn default() -> Self {
        Self::new(0.125, 0.9, 0.12, 0.89)
    }
}
