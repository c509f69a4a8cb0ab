// File: crates/texfig-core/src/backend.rs
// Summary: Rendering backends, output formats and bounding-box modes, plus the `backend` rc key.

use std::fmt;
use std::path::Path;
use std::str::FromStr;

use log::warn;

use crate::error::{Error, ExportError, Result};
use crate::rc;

/// Rendering path a figure takes when no output format is asked for.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Backend {
    /// Skia CPU raster surface.
    Raster,
    /// Skia SVG canvas.
    Svg,
    /// PGF picture code for LaTeX.
    Pgf,
}

impl Backend {
    pub const fn all() -> [Backend; 3] { [Backend::Raster, Backend::Svg, Backend::Pgf] }

    pub const fn name(self) -> &'static str {
        match self {
            Backend::Raster => "raster",
            Backend::Svg => "svg",
            Backend::Pgf => "pgf",
        }
    }

    pub const fn default_format(self) -> Format {
        match self {
            Backend::Raster => Format::Png,
            Backend::Svg => Format::Svg,
            Backend::Pgf => Format::Pgf,
        }
    }
}

impl fmt::Display for Backend {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result { f.write_str(self.name()) }
}

impl FromStr for Backend {
    type Err = Error;
    fn from_str(s: &str) -> Result<Self> {
        Backend::all()
            .into_iter()
            .find(|b| b.name().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| Error::UnknownBackend(s.to_string()))
    }
}

/// Active backend from the global configuration.
pub fn get_backend() -> Backend {
    backend_from(rc::get("backend").as_ref().and_then(rc::RcValue::as_str))
}

pub(crate) fn backend_from(name: Option<&str>) -> Backend {
    match name {
        Some(name) => name.parse().unwrap_or_else(|_| {
            warn!("unknown backend `{name}` in rc, falling back to raster");
            Backend::Raster
        }),
        None => Backend::Raster,
    }
}

/// Switch the global backend.
pub fn use_backend(backend: Backend) {
    rc::set("backend", backend.name());
}

/// Output file format.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Format {
    Png,
    Svg,
    Pgf,
}

impl Format {
    pub const fn extension(self) -> &'static str {
        match self {
            Format::Png => "png",
            Format::Svg => "svg",
            Format::Pgf => "pgf",
        }
    }

    pub fn from_extension(path: &Path) -> Option<std::result::Result<Format, ExportError>> {
        let ext = path.extension()?.to_str()?;
        Some(ext.parse())
    }

    pub const fn is_vector(self) -> bool { !matches!(self, Format::Png) }
}

impl FromStr for Format {
    type Err = ExportError;
    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "png" => Ok(Format::Png),
            "svg" => Ok(Format::Svg),
            "pgf" | "tex" => Ok(Format::Pgf),
            other => Err(ExportError::UnsupportedFormat(other.to_string())),
        }
    }
}

/// How much of the canvas a saved figure covers.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum BBox {
    /// The whole figure at its configured size.
    #[default]
    Standard,
    /// Cropped to the drawn content plus `savefig.pad_inches`.
    Tight,
}

impl FromStr for BBox {
    type Err = Error;
    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "standard" | "none" | "" => Ok(BBox::Standard),
            "tight" => Ok(BBox::Tight),
            other => Err(Error::InvalidRc { key: "savefig.bbox".into(), reason: format!("`{other}` is not standard|tight") }),
        }
    }
}

/// TeX engine named in `pgf.texsystem`.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TexSystem {
    Pdflatex,
    Xelatex,
    Lualatex,
}

impl TexSystem {
    pub const fn as_str(self) -> &'static str {
        match self {
            TexSystem::Pdflatex => "pdflatex",
            TexSystem::Xelatex => "xelatex",
            TexSystem::Lualatex => "lualatex",
        }
    }
}
