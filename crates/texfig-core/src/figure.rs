// File: crates/texfig-core/src/figure.rs
// Summary: Figure model, export pipeline (layout -> PNG/SVG/PGF) and the current-figure registry.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use log::{debug, info, warn};
use once_cell::sync::Lazy;
use parking_lot::Mutex;

use crate::axis::Axis;
use crate::backend::{backend_from, Format};
use crate::error::{Error, ExportError, Result};
use crate::figsize::FigSize;
use crate::layout::{build_scene, Scene};
use crate::rc::{self, RcParams};
use crate::render::{self, Rendered, SaveOptions};
use crate::series::Series;
use crate::theme::Theme;

#[derive(Clone, Debug)]
pub struct Figure {
    /// Size in inches; `figure.figsize` when unset.
    pub size: Option<FigSize>,
    /// Figure-level title (suptitle).
    pub title: Option<String>,
    pub axes_title: Option<String>,
    pub series: Vec<Series>,
    pub x_axis: Axis,
    pub y_axis: Axis,
    /// Overrides `axes.grid` for this figure.
    pub grid: Option<bool>,
}

impl Default for Figure {
    fn default() -> Self { Self::new() }
}

impl Figure {
    pub fn new() -> Self {
        Self {
            size: None,
            title: None,
            axes_title: None,
            series: Vec::new(),
            x_axis: Axis::default_x(),
            y_axis: Axis::default_y(),
            grid: None,
        }
    }

    pub fn with_size(size: FigSize) -> Self {
        Self { size: Some(size), ..Self::new() }
    }

    pub fn add_series(&mut self, series: Series) {
        self.series.push(series);
    }

    /// Fit both axis ranges to the data, widening each span by `margin` (fraction) per side.
    pub fn autoscale_axes(&mut self, margin: f64) {
        let Some((x_min, x_max, y_min, y_max)) = self
            .series
            .iter()
            .filter_map(Series::bounds)
            .reduce(|a, b| (a.0.min(b.0), a.1.max(b.1), a.2.min(b.2), a.3.max(b.3)))
        else {
            return;
        };
        fit(&mut self.x_axis, x_min, x_max, margin);
        fit(&mut self.y_axis, y_min, y_max, margin);
    }

    /// Lay the figure out with the style in `rc`.
    pub fn scene_with(&self, rc: &RcParams, options: &SaveOptions) -> Scene {
        let theme = Theme::from_rc(rc);
        let bbox = options.resolve_bbox(rc);
        let pad = options.pad_inches.unwrap_or(theme.pad_inches);
        build_scene(self, &theme, bbox, pad)
    }

    /// Render with the global configuration. Without an explicit format the active
    /// backend decides the output.
    pub fn render(&self, options: &SaveOptions) -> Result<Rendered, ExportError> {
        self.render_with(&rc::snapshot(), options)
    }

    /// Render with an explicit configuration; global state is not read.
    pub fn render_with(&self, rc: &RcParams, options: &SaveOptions) -> Result<Rendered, ExportError> {
        let format = options
            .format
            .unwrap_or_else(|| backend_from(rc.text("backend")).default_format());
        self.render_format(rc, options, format)
    }

    fn render_format(&self, rc: &RcParams, options: &SaveOptions, format: Format) -> Result<Rendered, ExportError> {
        let scene = self.scene_with(rc, options);
        let dpi = options.dpi.unwrap_or_else(|| {
            let theme = Theme::from_rc(rc);
            if theme.savefig_dpi > 0.0 { theme.savefig_dpi } else { theme.dpi }
        });
        debug!("rendering {:?} ({:.2}x{:.2} in, {} items)", format, scene.width, scene.height, scene.items.len());
        let bytes = render::export(&scene, format, dpi, rc)?;
        Ok(Rendered { format, bytes })
    }

    /// Save with the global configuration. Returns the path written, which gains the
    /// format's extension when `path` has none.
    pub fn savefig(&self, path: impl AsRef<Path>, options: &SaveOptions) -> Result<PathBuf> {
        self.savefig_with(&rc::snapshot(), path, options)
    }

    /// Save with an explicit configuration; global state is not read.
    pub fn savefig_with(&self, rc: &RcParams, path: impl AsRef<Path>, options: &SaveOptions) -> Result<PathBuf> {
        let path = path.as_ref();
        let (format, path) = match options.format {
            Some(f) => (f, path.to_path_buf()),
            None => match Format::from_extension(path) {
                Some(Ok(f)) => (f, path.to_path_buf()),
                Some(Err(e)) => return Err(Error::export(path, e)),
                None => {
                    let f = default_save_format(rc);
                    (f, path.with_extension(f.extension()))
                }
            },
        };
        let rendered = self.render_format(rc, options, format).map_err(|e| Error::export(&path, e))?;

        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent).map_err(|e| Error::export(&path, e))?;
        }
        std::fs::write(&path, &rendered.bytes).map_err(|e| Error::export(&path, e))?;
        info!("wrote {} ({} bytes)", path.display(), rendered.bytes.len());
        Ok(path)
    }
}

fn fit(axis: &mut Axis, lo: f64, hi: f64, margin: f64) {
    let (mut lo, mut hi) = (lo, hi);
    if (hi - lo).abs() < 1e-9 {
        lo -= 0.5;
        hi += 0.5;
    }
    let m = (hi - lo) * margin.max(0.0);
    axis.min = lo - m;
    axis.max = hi + m;
}

fn default_save_format(rc: &RcParams) -> Format {
    let backend = backend_from(rc.text("backend"));
    match rc.text("savefig.format") {
        Some(s) => s.parse().unwrap_or_else(|e| {
            warn!("savefig.format: {e}; using the {backend} backend's format");
            backend.default_format()
        }),
        None => backend.default_format(),
    }
}

// ---- current figure ---------------------------------------------------------

/// Shared handle to a registered figure.
pub type FigureRef = Arc<Mutex<Figure>>;

static CURRENT: Lazy<Mutex<Option<FigureRef>>> = Lazy::new(|| Mutex::new(None));

/// Register `fig` and make it the current figure.
pub fn figure(fig: Figure) -> FigureRef {
    let handle = Arc::new(Mutex::new(fig));
    set_current(&handle);
    handle
}

/// The current figure, if any.
pub fn gcf() -> Option<FigureRef> {
    CURRENT.lock().clone()
}

pub fn set_current(fig: &FigureRef) {
    *CURRENT.lock() = Some(Arc::clone(fig));
}

/// Forget the current figure and hand it back.
pub fn close() -> Option<FigureRef> {
    CURRENT.lock().take()
}

/// Save the current figure. `Ok(None)` when there is none.
pub fn savefig(path: impl AsRef<Path>, options: &SaveOptions) -> Result<Option<PathBuf>> {
    match gcf() {
        Some(fig) => fig.lock().savefig(path, options).map(Some),
        None => {
            debug!("savefig: no current figure");
            Ok(None)
        }
    }
}
