// File: crates/texfig-core/src/render/pgf.rs
// Summary: PGF exporter: writes a scene as `pgfpicture` code for `\input` in a LaTeX document.
// Notes:
// - Coordinates are inches with the origin bottom-left, so scene y values are flipped.
// - Labels are passed through verbatim when `text.usetex` is set; otherwise TeX specials are
//   escaped outside `$...$` math spans.

use std::fmt::Write;

use crate::color::Rgba;
use crate::geometry::{Point, Rect};
use crate::layout::{HAlign, Primitive, Scene, TextItem, VAlign};
use crate::rc::RcParams;
use crate::types::LINE_HEIGHT_RATIO;

/// Metadata echoed into the header comment.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct PgfHeader {
    pub texsystem: String,
    pub preamble: String,
    pub rcfonts: bool,
}

impl PgfHeader {
    pub fn from_rc(rc: &RcParams) -> Self {
        Self {
            texsystem: rc.text("pgf.texsystem").unwrap_or("xelatex").to_string(),
            preamble: rc.text("pgf.preamble").unwrap_or_default().to_string(),
            rcfonts: rc.flag("pgf.rcfonts").unwrap_or(true),
        }
    }
}

pub fn write(scene: &Scene, header: &PgfHeader) -> String {
    let mut w = PgfWriter { out: String::new(), height: scene.height };
    w.header(header);
    w.line("\\begingroup%");
    w.line("\\makeatletter%");
    w.line("\\begin{pgfpicture}%");
    w.line(&format!(
        "\\pgfpathrectangle{{\\pgfpointorigin}}{{\\pgfqpoint{{{}in}}{{{}in}}}}%",
        num(scene.width),
        num(scene.height)
    ));
    w.line("\\pgfusepath{use as bounding box, clip}%");
    w.fill_rect(&Rect::from_ltrb(0.0, 0.0, scene.width, scene.height), scene.background);
    for item in &scene.items {
        match item {
            Primitive::FillRect { rect, color } => w.fill_rect(rect, *color),
            Primitive::StrokeRect { rect, color, width_pt } => w.stroke_rect(rect, *color, *width_pt),
            Primitive::Polyline { points, color, width_pt, clip } => w.polyline(points, *color, *width_pt, clip.as_ref()),
            Primitive::Markers { centers, radius, color, clip } => w.markers(centers, *radius, *color, clip.as_ref()),
            Primitive::Text(t) => w.text(t, scene),
        }
    }
    w.line("\\end{pgfpicture}%");
    w.line("\\makeatother%");
    w.line("\\endgroup%");
    w.out
}

struct PgfWriter {
    out: String,
    height: f64,
}

impl PgfWriter {
    fn line(&mut self, s: &str) {
        self.out.push_str(s);
        self.out.push('\n');
    }

    fn header(&mut self, h: &PgfHeader) {
        let _ = writeln!(self.out, "%% Creator: texfig {}", env!("CARGO_PKG_VERSION"));
        self.line("%% Make sure the required packages are loaded in your preamble");
        self.line("%%   \\usepackage{pgf}");
        for pkg in h.preamble.lines().map(str::trim).filter(|l| !l.is_empty()) {
            let _ = writeln!(self.out, "%%   {pkg}");
        }
        let _ = writeln!(self.out, "%% Typeset with {}.", h.texsystem);
        if !h.rcfonts {
            self.line("%% Fonts follow the enclosing document.");
        }
        self.line("%%");
        self.line("%% Include the figure with \\input{<file>.pgf}.");
        self.line("%%");
    }

    fn point(&self, p: Point) -> String {
        format!("\\pgfqpoint{{{}in}}{{{}in}}", num(p.x), num(self.height - p.y))
    }

    fn color(&mut self, name: &str, c: Rgba) {
        let (r, g, b) = c.unit_rgb();
        let _ = writeln!(self.out, "\\definecolor{{{name}}}{{rgb}}{{{},{},{}}}%", num(r), num(g), num(b));
    }

    fn rect_path(&mut self, r: &Rect) {
        let corner = self.point(Point::new(r.left, r.bottom));
        let _ = writeln!(
            self.out,
            "\\pgfpathrectangle{{{corner}}}{{\\pgfqpoint{{{}in}}{{{}in}}}}%",
            num(r.width()),
            num(r.height())
        );
    }

    fn clip(&mut self, clip: Option<&Rect>) {
        if let Some(c) = clip {
            self.rect_path(c);
            self.line("\\pgfusepath{clip}%");
        }
    }

    fn fill_rect(&mut self, r: &Rect, c: Rgba) {
        if c.a == 0 { return; }
        self.line("\\begin{pgfscope}%");
        self.color("currentfill", c);
        self.line("\\pgfsetfillcolor{currentfill}%");
        self.opacity("fill", c);
        self.rect_path(r);
        self.line("\\pgfusepath{fill}%");
        self.line("\\end{pgfscope}%");
    }

    fn stroke_rect(&mut self, r: &Rect, c: Rgba, width_pt: f64) {
        self.line("\\begin{pgfscope}%");
        self.stroke_style(c, width_pt);
        self.line("\\pgfsetmiterjoin%");
        self.rect_path(r);
        self.line("\\pgfusepath{stroke}%");
        self.line("\\end{pgfscope}%");
    }

    fn polyline(&mut self, points: &[Point], c: Rgba, width_pt: f64, clip: Option<&Rect>) {
        let Some((first, rest)) = points.split_first() else { return };
        self.line("\\begin{pgfscope}%");
        self.clip(clip);
        self.stroke_style(c, width_pt);
        self.line("\\pgfsetroundjoin%");
        let p = self.point(*first);
        let _ = writeln!(self.out, "\\pgfpathmoveto{{{p}}}%");
        for q in rest {
            let p = self.point(*q);
            let _ = writeln!(self.out, "\\pgfpathlineto{{{p}}}%");
        }
        self.line("\\pgfusepath{stroke}%");
        self.line("\\end{pgfscope}%");
    }

    fn markers(&mut self, centers: &[Point], radius: f64, c: Rgba, clip: Option<&Rect>) {
        self.line("\\begin{pgfscope}%");
        self.clip(clip);
        self.color("currentfill", c);
        self.line("\\pgfsetfillcolor{currentfill}%");
        self.opacity("fill", c);
        for m in centers {
            let p = self.point(*m);
            let _ = writeln!(self.out, "\\pgfpathcircle{{{p}}}{{{}in}}%", num(radius));
        }
        self.line("\\pgfusepath{fill}%");
        self.line("\\end{pgfscope}%");
    }

    fn stroke_style(&mut self, c: Rgba, width_pt: f64) {
        self.color("currentstroke", c);
        self.line("\\pgfsetstrokecolor{currentstroke}%");
        self.opacity("stroke", c);
        let _ = writeln!(self.out, "\\pgfsetlinewidth{{{}pt}}%", num(width_pt));
        self.line("\\pgfsetbuttcap%");
    }

    fn opacity(&mut self, which: &str, c: Rgba) {
        if c.a < 255 {
            let _ = writeln!(self.out, "\\pgfset{which}opacity{{{}}}%", num(c.opacity()));
        }
    }

    fn text(&mut self, t: &TextItem, scene: &Scene) {
        if t.text.is_empty() { return; }
        let mut opts = format!("x={}in,y={}in", num(t.pos.x), num(self.height - t.pos.y));
        match t.h {
            HAlign::Left => opts.push_str(",left"),
            HAlign::Right => opts.push_str(",right"),
            HAlign::Center => {}
        }
        match t.v {
            VAlign::Top => opts.push_str(",top"),
            VAlign::Bottom => opts.push_str(",bottom"),
            VAlign::Center => {}
        }
        if t.rotated {
            opts.push_str(",rotate=90.0");
        }
        let body = if scene.usetex { t.text.clone() } else { escape_tex(&t.text) };
        self.line("\\begin{pgfscope}%");
        self.color("textcolor", t.color);
        self.line("\\pgfsetstrokecolor{textcolor}%");
        self.line("\\pgfsetfillcolor{textcolor}%");
        let _ = writeln!(
            self.out,
            "\\pgftext[{opts}]{{\\color{{textcolor}}{}\\fontsize{{{}}}{{{}}}\\selectfont {body}}}%",
            scene.family.tex_command(),
            num(t.size_pt),
            num(t.size_pt * LINE_HEIGHT_RATIO)
        );
        self.line("\\end{pgfscope}%");
    }
}

/// Fixed six decimals, as PGF reads them without scientific notation.
fn num(v: f64) -> String {
    let v = if v.abs() < 5e-7 { 0.0 } else { v };
    format!("{v:.6}")
}

/// Escape TeX specials outside balanced `$...$` spans.
pub fn escape_tex(s: &str) -> String {
    let dollars = s.matches('$').count();
    let math_ok = dollars > 0 && dollars % 2 == 0;
    let mut out = String::with_capacity(s.len());
    let mut in_math = false;
    for ch in s.chars() {
        if ch == '$' && math_ok {
            in_math = !in_math;
            out.push(ch);
            continue;
        }
        if in_math {
            out.push(ch);
            continue;
        }
        match ch {
            '\\' => out.push_str("\\textbackslash{}"),
            '~' => out.push_str("\\textasciitilde{}"),
            '^' => out.push_str("\\^{}"),
            '#' | '$' | '%' | '&' | '_' | '{' | '}' => {
                out.push('\\');
                out.push(ch);
            }
            _ => out.push(ch),
        }
    }
    out
}
