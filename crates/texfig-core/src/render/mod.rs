// File: crates/texfig-core/src/render/mod.rs
// Summary: Export options and format dispatch from a laid-out scene to PNG, SVG or PGF bytes.

pub mod pgf;
pub mod raster;

use log::warn;

use crate::backend::{BBox, Format};
use crate::error::ExportError;
use crate::layout::Scene;
use crate::rc::RcParams;

/// Per-call export settings. Unset fields fall back to the `savefig.*` rc keys.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct SaveOptions {
    pub format: Option<Format>,
    pub dpi: Option<f64>,
    pub bbox: Option<BBox>,
    pub pad_inches: Option<f64>,
}

impl SaveOptions {
    pub fn new() -> Self { Self::default() }

    pub fn with_format(mut self, format: Format) -> Self {
        self.format = Some(format);
        self
    }

    pub fn with_dpi(mut self, dpi: f64) -> Self {
        self.dpi = Some(dpi);
        self
    }

    pub fn with_bbox(mut self, bbox: BBox) -> Self {
        self.bbox = Some(bbox);
        self
    }

    pub fn with_pad_inches(mut self, pad: f64) -> Self {
        self.pad_inches = Some(pad);
        self
    }

    pub(crate) fn resolve_bbox(&self, rc: &RcParams) -> BBox {
        if let Some(b) = self.bbox {
            return b;
        }
        match rc.text("savefig.bbox") {
            Some(s) => s.parse().unwrap_or_else(|e| {
                warn!("{e}; using standard bbox");
                BBox::Standard
            }),
            None => BBox::Standard,
        }
    }
}

/// Encoded figure.
#[derive(Clone, Debug)]
pub struct Rendered {
    pub format: Format,
    pub bytes: Vec<u8>,
}

impl Rendered {
    /// The output as text, for the text-based vector formats.
    pub fn as_text(&self) -> Option<&str> {
        if self.format.is_vector() { std::str::from_utf8(&self.bytes).ok() } else { None }
    }
}

pub(crate) fn export(scene: &Scene, format: Format, dpi: f64, rc: &RcParams) -> Result<Vec<u8>, ExportError> {
    match format {
        Format::Png => raster::encode_png(scene, dpi),
        Format::Svg => raster::encode_svg(scene),
        Format::Pgf => Ok(pgf::write(scene, &pgf::PgfHeader::from_rc(rc)).into_bytes()),
    }
}
