// File: crates/texfig-core/src/theme.rs
// Summary: Typed style resolved from rc params, and named color style sheets.

use log::warn;

use crate::color::Rgba;
use crate::figsize::FigSize;
use crate::rc::{RcParams, RcValue};

/// Default series color cycle.
pub const PALETTE: [Rgba; 10] = [
    Rgba::rgb(0x1f, 0x77, 0xb4),
    Rgba::rgb(0xff, 0x7f, 0x0e),
    Rgba::rgb(0x2c, 0xa0, 0x2c),
    Rgba::rgb(0xd6, 0x27, 0x28),
    Rgba::rgb(0x94, 0x67, 0xbd),
    Rgba::rgb(0x8c, 0x56, 0x4b),
    Rgba::rgb(0xe3, 0x77, 0xc2),
    Rgba::rgb(0x7f, 0x7f, 0x7f),
    Rgba::rgb(0xbc, 0xbd, 0x22),
    Rgba::rgb(0x17, 0xbe, 0xcf),
];

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum FontFamily {
    Serif,
    SansSerif,
    Monospace,
}

impl FontFamily {
    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "serif" | "roman" => Some(FontFamily::Serif),
            "sans-serif" | "sans" | "sansserif" => Some(FontFamily::SansSerif),
            "monospace" | "mono" | "typewriter" => Some(FontFamily::Monospace),
            _ => None,
        }
    }

    /// Concrete family names to try, most preferred first.
    pub fn candidates(self) -> &'static [&'static str] {
        match self {
            FontFamily::Serif => &["CMU Serif", "Latin Modern Roman", "Computer Modern", "DejaVu Serif", "Times New Roman", "serif"],
            FontFamily::SansSerif => &["Segoe UI", "Arial", "Helvetica", "Roboto", "DejaVu Sans", "sans-serif"],
            FontFamily::Monospace => &["Roboto Mono", "Consolas", "Menlo", "DejaVu Sans Mono", "monospace"],
        }
    }

    /// LaTeX family switch.
    pub fn tex_command(self) -> &'static str {
        match self {
            FontFamily::Serif => "\\rmfamily",
            FontFamily::SansSerif => "\\sffamily",
            FontFamily::Monospace => "\\ttfamily",
        }
    }
}

/// Style snapshot used by layout and exporters. Sizes in points.
#[derive(Clone, Debug, PartialEq)]
pub struct Theme {
    pub font_family: FontFamily,
    pub font_size: f64,
    pub axes_title_size: f64,
    pub axes_label_size: f64,
    pub xtick_size: f64,
    pub ytick_size: f64,
    pub legend_size: f64,
    pub figure_title_size: f64,
    pub figure_face: Rgba,
    pub axes_face: Rgba,
    pub axes_edge: Rgba,
    pub axes_linewidth: f64,
    pub grid: bool,
    pub grid_color: Rgba,
    pub grid_linewidth: f64,
    pub line_width: f64,
    pub marker_size: f64,
    pub text_color: Rgba,
    pub usetex: bool,
    pub autolayout: bool,
    /// Default figure size in inches.
    pub figsize: (f64, f64),
    pub dpi: f64,
    pub savefig_dpi: f64,
    pub pad_inches: f64,
    pub palette: [Rgba; 10],
}

impl Theme {
    /// Resolve from an rc mapping; missing or mistyped keys fall back to library defaults.
    pub fn from_rc(rc: &RcParams) -> Self {
        let defaults = RcParams::defaults();
        let r = Reader { rc, defaults: &defaults };
        let mut palette = PALETTE;
        if let Some(c) = rc.text("lines.color").and_then(Rgba::parse) {
            palette[0] = c;
        }
        Self {
            font_family: r.family(),
            font_size: r.number("font.size"),
            axes_title_size: r.number("axes.titlesize"),
            axes_label_size: r.number("axes.labelsize"),
            xtick_size: r.number("xtick.labelsize"),
            ytick_size: r.number("ytick.labelsize"),
            legend_size: r.number("legend.fontsize"),
            figure_title_size: r.number("figure.titlesize"),
            figure_face: r.color("figure.facecolor"),
            axes_face: r.color("axes.facecolor"),
            axes_edge: r.color("axes.edgecolor"),
            axes_linewidth: r.number("axes.linewidth"),
            grid: r.flag("axes.grid"),
            grid_color: r.color("grid.color"),
            grid_linewidth: r.number("grid.linewidth"),
            line_width: r.number("lines.linewidth"),
            marker_size: r.number("lines.markersize"),
            text_color: r.color("text.color"),
            usetex: r.flag("text.usetex"),
            autolayout: r.flag("figure.autolayout"),
            figsize: r.figsize(),
            dpi: r.number("figure.dpi"),
            savefig_dpi: r.number("savefig.dpi"),
            pad_inches: r.number("savefig.pad_inches"),
            palette,
        }
    }

    /// Resolve from the current global configuration.
    pub fn current() -> Self {
        Self::from_rc(&crate::rc::snapshot())
    }

    pub fn series_color(&self, index: usize) -> Rgba {
        self.palette[index % self.palette.len()]
    }
}

struct Reader<'a> {
    rc: &'a RcParams,
    defaults: &'a RcParams,
}

impl Reader<'_> {
    fn lookup<T>(&self, key: &str, read: impl Fn(&RcValue) -> Option<T>) -> Option<T> {
        if let Some(v) = self.rc.get(key) {
            match read(v) {
                Some(t) => return Some(t),
                None => warn!("rc key `{key}` has unexpected value `{v}`, using default"),
            }
        }
        self.defaults.get(key).and_then(read)
    }

    fn number(&self, key: &str) -> f64 {
        self.lookup(key, |v| v.as_f64().filter(|n| n.is_finite() && *n >= 0.0)).unwrap_or(0.0)
    }

    fn flag(&self, key: &str) -> bool {
        self.lookup(key, RcValue::as_bool).unwrap_or(false)
    }

    fn figsize(&self) -> (f64, f64) {
        self.lookup("figure.figsize", |v| v.as_pair().and_then(|(w, h)| FigSize::new(w, h).ok()))
            .map(|s| s.as_tuple())
            .unwrap_or((6.4, 4.8))
    }

    fn color(&self, key: &str) -> Rgba {
        self.lookup(key, |v| v.as_str().and_then(Rgba::parse)).unwrap_or(Rgba::BLACK)
    }

    fn family(&self) -> FontFamily {
        self.lookup("font.family", |v| v.as_str().and_then(FontFamily::parse))
            .unwrap_or(FontFamily::SansSerif)
    }
}

// ---- style sheets -----------------------------------------------------------

fn sheet_from(background: &str, grid: &str, edge: &str, text: &str, line: &str) -> RcParams {
    let mut params: RcParams = [
        ("figure.facecolor", background),
        ("axes.facecolor", background),
        ("grid.color", grid),
        ("axes.edgecolor", edge),
        ("text.color", text),
        ("lines.color", line),
    ]
    .into_iter()
    .collect();
    params.insert("axes.grid", true);
    params
}

/// Names of the built-in style sheets.
pub fn presets() -> Vec<&'static str> {
    vec!["dark", "light", "solarized-dark", "solarized-light", "high-contrast-dark"]
}

/// Color overrides for a named sheet, usable as scoped-context overrides.
pub fn sheet(name: &str) -> Option<RcParams> {
    let params = match name.to_ascii_lowercase().as_str() {
        "dark" => sheet_from("#121214", "#28282d", "#b4b4be", "#ebebf5", "#40a0ff"),
        "light" => sheet_from("#fafafc", "#e6e6eb", "#3c3c46", "#14141e", "#2078c8"),
        // Solarized: base03 / base02 / base1 / base2 / blue
        "solarized-dark" => sheet_from("#002b36", "#073642", "#93a1a1", "#eee8d5", "#268bd2"),
        "solarized-light" => sheet_from("#fdf6e3", "#eee8d5", "#657b83", "#002b36", "#268bd2"),
        "high-contrast-dark" => sheet_from("#000000", "#222222", "#ffffff", "#ffffff", "#00ffff"),
        _ => return None,
    };
    Some(params)
}
