// File: crates/texfig-core/src/lib.rs
// Summary: Core library entry point; exports the style configuration, the scoped LaTeX style
//          context, the figure-size calculator and the figure export API.

pub mod axis;
pub mod backend;
pub mod color;
pub mod error;
pub mod figsize;
pub mod figure;
pub mod geometry;
pub mod grid;
pub mod layout;
pub mod rc;
pub mod render;
pub mod series;
pub mod style;
pub mod text;
pub mod theme;
pub mod types;

pub use axis::{Axis, ScaleKind};
pub use backend::{get_backend, use_backend, BBox, Backend, Format, TexSystem};
pub use color::Rgba;
pub use error::{Error, ExportError, Result};
pub use figsize::{latex_figsize, latex_figsize_pt, latex_figsize_with, FigSize, GOLDEN_RATIO};
pub use figure::{close, figure, gcf, savefig, set_current, Figure, FigureRef};
pub use rc::{RcParams, RcValue};
pub use render::{Rendered, SaveOptions};
pub use series::{Series, SeriesType};
pub use style::{latex_defaults, with_latex_style, FontSizes, LatexStyle, SaveArgs, StyleGuard};
pub use theme::Theme;
