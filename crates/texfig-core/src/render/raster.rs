// File: crates/texfig-core/src/render/raster.rs
// Summary: Skia exporters: CPU raster surface -> PNG, and SVG canvas, both painting the same scene.

use skia_safe as skia;

use crate::color::Rgba;
use crate::error::ExportError;
use crate::geometry::Rect;
use crate::layout::{HAlign, Primitive, Scene, TextItem, VAlign};
use crate::text::TextShaper;
use crate::theme::FontFamily;
use crate::types::POINTS_PER_INCH;

/// Rasterize at `dpi` pixels per inch and encode as PNG.
pub fn encode_png(scene: &Scene, dpi: f64) -> Result<Vec<u8>, ExportError> {
    let dpi = if dpi.is_finite() && dpi > 0.0 { dpi } else { 100.0 };
    let w = (scene.width * dpi).ceil().max(1.0) as i32;
    let h = (scene.height * dpi).ceil().max(1.0) as i32;
    let mut surface = skia::surfaces::raster_n32_premul((w, h))
        .ok_or(ExportError::Render("failed to create raster surface"))?;

    let shaper = TextShaper::new();
    paint_scene(surface.canvas(), scene, dpi as f32, &shaper);

    // Snapshot and encode
    let image = surface.image_snapshot();
    #[allow(deprecated)]
    let data = image
        .encode_to_data(skia::EncodedImageFormat::PNG)
        .ok_or(ExportError::Render("encode PNG failed"))?;
    Ok(data.as_bytes().to_vec())
}

/// Paint onto an SVG canvas at 72 user units per inch.
pub fn encode_svg(scene: &Scene) -> Result<Vec<u8>, ExportError> {
    let scale = POINTS_PER_INCH as f32;
    let bounds = skia::Rect::from_wh(scene.width as f32 * scale, scene.height as f32 * scale);
    #[allow(unused_mut)]
    let mut canvas = skia::svg::Canvas::new(bounds, None);
    let shaper = TextShaper::new();
    paint_scene(&canvas, scene, scale, &shaper);
    let data = canvas.end();
    Ok(data.as_bytes().to_vec())
}

/// Paint every primitive with `scale` device units per inch.
pub fn paint_scene(canvas: &skia::Canvas, scene: &Scene, scale: f32, shaper: &TextShaper) {
    canvas.clear(to_skia(scene.background));
    let px = |v: f64| v as f32 * scale;
    // points -> device units
    let stroke_w = |pt: f64| (pt as f32 * scale / POINTS_PER_INCH as f32).max(0.5);
    let rect = |r: &Rect| skia::Rect::from_ltrb(px(r.left), px(r.top), px(r.right), px(r.bottom));

    for item in &scene.items {
        match item {
            Primitive::FillRect { rect: r, color } => {
                let mut fill = skia::Paint::default();
                fill.set_anti_alias(true);
                fill.set_style(skia::paint::Style::Fill);
                fill.set_color(to_skia(*color));
                canvas.draw_rect(rect(r), &fill);
            }
            Primitive::StrokeRect { rect: r, color, width_pt } => {
                let mut stroke = stroke_paint(*color, stroke_w(*width_pt));
                stroke.set_stroke_join(skia::paint::Join::Miter);
                canvas.draw_rect(rect(r), &stroke);
            }
            Primitive::Polyline { points, color, width_pt, clip } => {
                if points.len() < 2 { continue; }
                let mut path = skia::Path::new();
                path.move_to((px(points[0].x), px(points[0].y)));
                for p in points.iter().skip(1) {
                    path.line_to((px(p.x), px(p.y)));
                }
                canvas.save();
                if let Some(c) = clip {
                    canvas.clip_rect(rect(c), skia::ClipOp::Intersect, true);
                }
                canvas.draw_path(&path, &stroke_paint(*color, stroke_w(*width_pt)));
                canvas.restore();
            }
            Primitive::Markers { centers, radius, color, clip } => {
                let mut fill = skia::Paint::default();
                fill.set_anti_alias(true);
                fill.set_style(skia::paint::Style::Fill);
                fill.set_color(to_skia(*color));
                canvas.save();
                if let Some(c) = clip {
                    canvas.clip_rect(rect(c), skia::ClipOp::Intersect, true);
                }
                for c in centers {
                    canvas.draw_circle((px(c.x), px(c.y)), px(*radius), &fill);
                }
                canvas.restore();
            }
            Primitive::Text(t) => draw_text(canvas, shaper, t, scene.family, scale),
        }
    }
}

fn draw_text(canvas: &skia::Canvas, shaper: &TextShaper, t: &TextItem, family: FontFamily, scale: f32) {
    if t.text.is_empty() { return; }
    let size = t.size_pt as f32 * scale / POINTS_PER_INCH as f32;
    let p = shaper.layout(&t.text, size, to_skia(t.color), family);
    let (w, h) = (p.longest_line(), p.height());
    let dx = match t.h { HAlign::Left => 0.0, HAlign::Center => -w * 0.5, HAlign::Right => -w };
    let dy = match t.v { VAlign::Top => 0.0, VAlign::Center => -h * 0.5, VAlign::Bottom => -h };
    canvas.save();
    canvas.translate((t.pos.x as f32 * scale, t.pos.y as f32 * scale));
    if t.rotated {
        canvas.rotate(-90.0, None);
    }
    // Paragraph draws from top-left
    p.paint(canvas, (dx, dy));
    canvas.restore();
}

fn stroke_paint(color: Rgba, width: f32) -> skia::Paint {
    let mut stroke = skia::Paint::default();
    stroke.set_anti_alias(true);
    stroke.set_style(skia::paint::Style::Stroke);
    stroke.set_stroke_width(width);
    stroke.set_color(to_skia(color));
    stroke
}

pub(crate) fn to_skia(c: Rgba) -> skia::Color {
    skia::Color::from_argb(c.a, c.r, c.g, c.b)
}
