// File: crates/texfig-core/src/layout.rs
// Summary: Builds a backend-neutral scene (display list in inches, y down) from a figure and theme.
// Notes:
// - Text extents are estimated from `CHAR_WIDTH_RATIO` so every exporter shares one geometry;
//   the PGF exporter has no shaper to ask.
// - With `figure.autolayout` the margins are derived from label extents, otherwise fixed
//   subplot fractions are used. `BBox::Tight` then crops the canvas to the content.

use crate::backend::BBox;
use crate::color::Rgba;
use crate::figure::Figure;
use crate::geometry::{Point, Rect};
use crate::grid::ticks;
use crate::series::SeriesType;
use crate::theme::{FontFamily, Theme};
use crate::types::{
    pt_to_in, SubplotParams, CHAR_WIDTH_RATIO, LABEL_PAD_PT, LINE_HEIGHT_RATIO, TARGET_TICKS,
    TICK_LENGTH_PT, TICK_PAD_PT, TITLE_PAD_PT,
};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum HAlign { Left, Center, Right }

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum VAlign { Top, Center, Bottom }

/// A label. Alignment applies in the text's own frame, before rotation.
#[derive(Clone, Debug, PartialEq)]
pub struct TextItem {
    pub pos: Point,
    pub text: String,
    pub size_pt: f64,
    pub h: HAlign,
    pub v: VAlign,
    /// Rotated 90 degrees counter-clockwise.
    pub rotated: bool,
    pub color: Rgba,
}

impl TextItem {
    /// Estimated extent on the page.
    pub fn bounds(&self) -> Rect {
        let (w, h) = estimate_text(&self.text, self.size_pt);
        let ax = match self.h { HAlign::Left => 0.0, HAlign::Center => 0.5, HAlign::Right => 1.0 };
        let ay = match self.v { VAlign::Top => 0.0, VAlign::Center => 0.5, VAlign::Bottom => 1.0 };
        if self.rotated {
            // text x runs up the page, text y runs right
            Rect::from_ltwh(self.pos.x - h * ay, self.pos.y - w * (1.0 - ax), h, w)
        } else {
            Rect::from_ltwh(self.pos.x - w * ax, self.pos.y - h * ay, w, h)
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub enum Primitive {
    FillRect { rect: Rect, color: Rgba },
    StrokeRect { rect: Rect, color: Rgba, width_pt: f64 },
    Polyline { points: Vec<Point>, color: Rgba, width_pt: f64, clip: Option<Rect> },
    /// Filled circles; `radius` in inches.
    Markers { centers: Vec<Point>, radius: f64, color: Rgba, clip: Option<Rect> },
    Text(TextItem),
}

impl Primitive {
    fn bounds(&self) -> Option<Rect> {
        match self {
            Primitive::FillRect { rect, .. } | Primitive::StrokeRect { rect, .. } => Some(*rect),
            Primitive::Polyline { points, clip, .. } => clipped(points_bounds(points, 0.0)?, clip),
            Primitive::Markers { centers, radius, clip, .. } => clipped(points_bounds(centers, *radius)?, clip),
            Primitive::Text(t) if t.text.is_empty() => None,
            Primitive::Text(t) => Some(t.bounds()),
        }
    }

    fn translate(&mut self, dx: f64, dy: f64) {
        match self {
            Primitive::FillRect { rect, .. } | Primitive::StrokeRect { rect, .. } => *rect = rect.translate(dx, dy),
            Primitive::Polyline { points, clip, .. } | Primitive::Markers { centers: points, clip, .. } => {
                for p in points.iter_mut() { *p = p.offset(dx, dy); }
                if let Some(c) = clip { *c = c.translate(dx, dy); }
            }
            Primitive::Text(t) => t.pos = t.pos.offset(dx, dy),
        }
    }
}

fn points_bounds(points: &[Point], grow: f64) -> Option<Rect> {
    let first = points.first()?;
    let r = points.iter().fold(Rect::from_ltrb(first.x, first.y, first.x, first.y), |r, p| {
        r.union(&Rect::from_ltrb(p.x, p.y, p.x, p.y))
    });
    Some(r.inflate(grow))
}

fn clipped(r: Rect, clip: &Option<Rect>) -> Option<Rect> {
    match clip {
        Some(c) => Some(Rect::from_ltrb(r.left.max(c.left), r.top.max(c.top), r.right.min(c.right), r.bottom.min(c.bottom))),
        None => Some(r),
    }
}

/// Everything an exporter needs, in inches.
#[derive(Clone, Debug, PartialEq)]
pub struct Scene {
    pub width: f64,
    pub height: f64,
    pub background: Rgba,
    pub family: FontFamily,
    pub usetex: bool,
    pub items: Vec<Primitive>,
}

impl Scene {
    /// Union of all item extents, if there are any.
    pub fn content_bounds(&self) -> Option<Rect> {
        self.items.iter().filter_map(Primitive::bounds).reduce(|a, b| a.union(&b))
    }

    /// Crop the canvas to the content, keeping `pad` inches around it.
    pub fn crop_to_content(&mut self, pad: f64) {
        let Some(bounds) = self.content_bounds() else { return };
        let bounds = bounds.inflate(pad.max(0.0));
        for item in &mut self.items {
            item.translate(-bounds.left, -bounds.top);
        }
        self.width = bounds.width();
        self.height = bounds.height();
    }
}

/// `(width, height)` in inches of a single line of text.
pub fn estimate_text(text: &str, size_pt: f64) -> (f64, f64) {
    let chars = text.chars().count() as f64;
    (pt_to_in(size_pt) * CHAR_WIDTH_RATIO * chars, pt_to_in(size_pt) * LINE_HEIGHT_RATIO)
}

pub fn build_scene(fig: &Figure, theme: &Theme, bbox: BBox, pad_inches: f64) -> Scene {
    let (width, height) = fig.size.map(|s| s.as_tuple()).unwrap_or(theme.figsize);
    let xticks = ticks(&fig.x_axis, TARGET_TICKS);
    let yticks = ticks(&fig.y_axis, TARGET_TICKS);

    let tick_len = pt_to_in(TICK_LENGTH_PT);
    let tick_pad = pt_to_in(TICK_PAD_PT);
    let label_pad = pt_to_in(LABEL_PAD_PT);
    let title_pad = pt_to_in(TITLE_PAD_PT);
    let xtick_h = estimate_text("0", theme.xtick_size).1;
    let ytick_w = yticks.iter().map(|(_, l)| estimate_text(l, theme.ytick_size).0).fold(0.0, f64::max);
    let text_h = |s: &Option<String>, size: f64| match s {
        Some(t) if !t.is_empty() => estimate_text(t, size).1,
        _ => 0.0,
    };
    let label = |s: &str| if s.is_empty() { None } else { Some(s.to_string()) };
    let xlabel_h = text_h(&label(&fig.x_axis.label), theme.axes_label_size);
    let ylabel_h = text_h(&label(&fig.y_axis.label), theme.axes_label_size);
    let axes_title_h = text_h(&fig.axes_title, theme.axes_title_size);
    let suptitle_h = text_h(&fig.title, theme.figure_title_size);

    let fixed = || {
        let sp = SubplotParams::default();
        Rect::from_ltrb(width * sp.left, height * sp.top, width * sp.right, height * sp.bottom)
    };
    let plot = if theme.autolayout {
        let pad = pt_to_in(theme.font_size) * 1.08;
        let gap = |h: f64, p: f64| if h > 0.0 { h + p } else { 0.0 };
        let overhang = xticks.last().map(|(_, l)| estimate_text(l, theme.xtick_size).0 * 0.5).unwrap_or(0.0);
        let left = pad + gap(ylabel_h, label_pad) + ytick_w + tick_pad + tick_len;
        let bottom = pad + gap(xlabel_h, label_pad) + xtick_h + tick_pad + tick_len;
        let top = pad + gap(suptitle_h, title_pad) + gap(axes_title_h, title_pad);
        let right = pad + overhang;
        let r = Rect::from_ltrb(left, top, width - right, height - bottom);
        // labels bigger than the figure: keep a usable plot area
        if r.width() < width * 0.2 || r.height() < height * 0.2 { fixed() } else { r }
    } else {
        fixed()
    };

    let map = |x: f64, y: f64| {
        Point::new(
            plot.left + fig.x_axis.normalize(x) * plot.width(),
            plot.bottom - fig.y_axis.normalize(y) * plot.height(),
        )
    };
    let text = |pos: Point, s: &str, size_pt: f64, h: HAlign, v: VAlign| {
        Primitive::Text(TextItem { pos, text: s.to_string(), size_pt, h, v, rotated: false, color: theme.text_color })
    };
    let segment = |a: Point, b: Point, color: Rgba, width_pt: f64| Primitive::Polyline {
        points: vec![a, b],
        color,
        width_pt,
        clip: None,
    };

    let mut items = Vec::new();
    items.push(Primitive::FillRect { rect: plot, color: theme.axes_face });

    if fig.grid.unwrap_or(theme.grid) {
        for (v, _) in &xticks {
            let x = map(*v, fig.y_axis.min).x;
            items.push(segment(Point::new(x, plot.top), Point::new(x, plot.bottom), theme.grid_color, theme.grid_linewidth));
        }
        for (v, _) in &yticks {
            let y = map(fig.x_axis.min, *v).y;
            items.push(segment(Point::new(plot.left, y), Point::new(plot.right, y), theme.grid_color, theme.grid_linewidth));
        }
    }

    for (i, s) in fig.series.iter().enumerate() {
        let color = s.color.unwrap_or_else(|| theme.series_color(i));
        match s.series_type {
            SeriesType::Line => {
                // non-finite points break the line
                for run in s.data.split(|(x, y)| !x.is_finite() || !y.is_finite()) {
                    if run.len() < 2 { continue; }
                    let points = run.iter().map(|&(x, y)| map(x, y)).collect();
                    items.push(Primitive::Polyline { points, color, width_pt: theme.line_width, clip: Some(plot) });
                }
            }
            SeriesType::Scatter => {
                let centers: Vec<Point> = s
                    .data
                    .iter()
                    .filter(|(x, y)| x.is_finite() && y.is_finite())
                    .map(|&(x, y)| map(x, y))
                    .collect();
                if !centers.is_empty() {
                    let radius = pt_to_in(theme.marker_size) * 0.5;
                    items.push(Primitive::Markers { centers, radius, color, clip: Some(plot) });
                }
            }
        }
    }

    items.push(Primitive::StrokeRect { rect: plot, color: theme.axes_edge, width_pt: theme.axes_linewidth });

    for (v, l) in &xticks {
        let x = map(*v, fig.y_axis.min).x;
        items.push(segment(Point::new(x, plot.bottom), Point::new(x, plot.bottom + tick_len), theme.axes_edge, theme.axes_linewidth));
        items.push(text(Point::new(x, plot.bottom + tick_len + tick_pad), l, theme.xtick_size, HAlign::Center, VAlign::Top));
    }
    for (v, l) in &yticks {
        let y = map(fig.x_axis.min, *v).y;
        items.push(segment(Point::new(plot.left - tick_len, y), Point::new(plot.left, y), theme.axes_edge, theme.axes_linewidth));
        items.push(text(Point::new(plot.left - tick_len - tick_pad, y), l, theme.ytick_size, HAlign::Right, VAlign::Center));
    }

    if xlabel_h > 0.0 {
        let y = plot.bottom + tick_len + tick_pad + xtick_h + label_pad;
        items.push(text(Point::new(plot.center_x(), y), &fig.x_axis.label, theme.axes_label_size, HAlign::Center, VAlign::Top));
    }
    if ylabel_h > 0.0 {
        let x = plot.left - tick_len - tick_pad - ytick_w - label_pad;
        items.push(Primitive::Text(TextItem {
            pos: Point::new(x, plot.center_y()),
            text: fig.y_axis.label.clone(),
            size_pt: theme.axes_label_size,
            h: HAlign::Center,
            v: VAlign::Bottom,
            rotated: true,
            color: theme.text_color,
        }));
    }
    if let Some(t) = fig.axes_title.as_deref().filter(|t| !t.is_empty()) {
        items.push(text(Point::new(plot.center_x(), plot.top - title_pad), t, theme.axes_title_size, HAlign::Center, VAlign::Bottom));
    }
    if let Some(t) = fig.title.as_deref().filter(|t| !t.is_empty()) {
        let y = if theme.autolayout { pt_to_in(theme.font_size) * 1.08 } else { height * 0.02 };
        items.push(text(Point::new(width * 0.5, y), t, theme.figure_title_size, HAlign::Center, VAlign::Top));
    }

    push_legend(&mut items, fig, theme, plot);

    let mut scene = Scene {
        width,
        height,
        background: theme.figure_face,
        family: theme.font_family,
        usetex: theme.usetex,
        items,
    };
    if bbox == BBox::Tight {
        scene.crop_to_content(pad_inches);
    }
    scene
}

/// Legend box in the upper-right corner of the plot, one row per labelled series.
fn push_legend(items: &mut Vec<Primitive>, fig: &Figure, theme: &Theme, plot: Rect) {
    let entries: Vec<(usize, &str)> = fig
        .series
        .iter()
        .enumerate()
        .filter_map(|(i, s)| s.label.as_deref().filter(|l| !l.is_empty()).map(|l| (i, l)))
        .collect();
    if entries.is_empty() {
        return;
    }
    let em = pt_to_in(theme.legend_size);
    let row_h = em * LINE_HEIGHT_RATIO;
    let sample_w = em * 2.0;
    let pad = em * 0.5;
    let label_w = entries.iter().map(|(_, l)| estimate_text(l, theme.legend_size).0).fold(0.0, f64::max);
    let box_w = pad + sample_w + pad + label_w + pad;
    let box_h = pad * 2.0 + row_h * entries.len() as f64;
    let margin = em * 0.5;
    let frame = Rect::from_ltwh(plot.right - margin - box_w, plot.top + margin, box_w, box_h);

    items.push(Primitive::FillRect { rect: frame, color: theme.axes_face });
    items.push(Primitive::StrokeRect { rect: frame, color: theme.grid_color, width_pt: theme.axes_linewidth });
    for (row, (i, label)) in entries.into_iter().enumerate() {
        let series = &fig.series[i];
        let color = series.color.unwrap_or_else(|| theme.series_color(i));
        let cy = frame.top + pad + row_h * (row as f64 + 0.5);
        let sx = frame.left + pad;
        match series.series_type {
            SeriesType::Line => items.push(Primitive::Polyline {
                points: vec![Point::new(sx, cy), Point::new(sx + sample_w, cy)],
                color,
                width_pt: theme.line_width,
                clip: None,
            }),
            SeriesType::Scatter => items.push(Primitive::Markers {
                centers: vec![Point::new(sx + sample_w * 0.5, cy)],
                radius: pt_to_in(theme.marker_size) * 0.5,
                color,
                clip: None,
            }),
        }
        items.push(Primitive::Text(TextItem {
            pos: Point::new(sx + sample_w + pad, cy),
            text: label.to_string(),
            size_pt: theme.legend_size,
            h: HAlign::Left,
            v: VAlign::Center,
            rotated: false,
            color: theme.text_color,
        }));
    }
}
