// File: crates/texfig-core/src/style.rs
// Summary: Scoped LaTeX style context: swaps in PGF-friendly rc overrides and guarantees the
//          previous global configuration comes back when the scope ends.
// Notes:
// - Entering an enabled context takes the process-wide style lock (see `rc::lock`) and holds it
//   until the guard is finished or dropped. Contexts on other threads wait; nested contexts on
//   the same thread restore in reverse order. Plotting on other threads that skips the lock
//   still sees the overrides while a scope is open.
// - `finish` saves the current figure (if asked to) before restoring; the restore happens
//   whether or not the save worked, and the save error is returned afterwards.
// - Leaving the scope any other way (early return, `?`, panic) restores without saving.

use std::path::PathBuf;

use log::{debug, warn};

use crate::backend::TexSystem;
use crate::error::{Error, Result};
use crate::figure;
use crate::rc::{self, RcLock, RcParams, RcValue};
use crate::render::SaveOptions;

/// Font sizes in points, grouped the way LaTeX documents usually scale them.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct FontSizes {
    /// Default text and tick labels.
    pub small: f64,
    /// Axis labels and legend.
    pub medium: f64,
    /// Axes titles.
    pub bigger: f64,
    /// Figure title.
    pub biggest: f64,
}

impl Default for FontSizes {
    fn default() -> Self {
        Self { small: 8.0, medium: 10.0, bigger: 11.0, biggest: 12.0 }
    }
}

impl FontSizes {
    fn apply(&self, params: &mut RcParams) {
        params.insert("font.size", self.small);
        params.insert("xtick.labelsize", self.small);
        params.insert("ytick.labelsize", self.small);
        params.insert("axes.labelsize", self.medium);
        params.insert("legend.fontsize", self.medium);
        params.insert("axes.titlesize", self.bigger);
        params.insert("figure.titlesize", self.biggest);
    }
}

/// Preamble used when no packages are given.
pub const DEFAULT_PREAMBLE: &str = "\\usepackage[utf8]{inputenc}";

/// Built-in overrides applied by every enabled context.
pub fn latex_defaults() -> RcParams {
    let mut params: RcParams = [
        ("backend", RcValue::from("pgf")),
        ("pgf.texsystem", TexSystem::Pdflatex.as_str().into()),
        ("font.family", "serif".into()),
        ("text.usetex", true.into()),
        ("pgf.rcfonts", false.into()),
        ("pgf.preamble", DEFAULT_PREAMBLE.into()),
        ("figure.autolayout", false.into()),
        ("savefig.bbox", "standard".into()),
        ("savefig.format", "pgf".into()),
    ]
    .into_iter()
    .collect();
    FontSizes::default().apply(&mut params);
    params
}

/// Where and how to save the current figure when the scope finishes.
#[derive(Clone, Debug, PartialEq)]
pub struct SaveArgs {
    pub path: PathBuf,
    pub options: SaveOptions,
}

impl SaveArgs {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into(), options: SaveOptions::default() }
    }

    pub fn with_options(mut self, options: SaveOptions) -> Self {
        self.options = options;
        self
    }
}

/// Builder for a scoped style context.
#[derive(Clone, Debug)]
pub struct LatexStyle {
    enabled: bool,
    overrides: RcParams,
    save: Option<SaveArgs>,
}

impl Default for LatexStyle {
    fn default() -> Self { Self::new() }
}

impl LatexStyle {
    /// Enabled, built-in defaults only, no save on exit.
    pub fn new() -> Self {
        Self { enabled: true, overrides: RcParams::new(), save: None }
    }

    /// A context whose entry and exit do nothing.
    pub fn disabled() -> Self {
        Self::new().enabled(false)
    }

    pub fn enabled(mut self, enabled: bool) -> Self {
        self.enabled = enabled;
        self
    }

    pub fn is_enabled(&self) -> bool { self.enabled }

    /// Merge caller overrides; later calls win over earlier ones and over the defaults.
    pub fn with_overrides(mut self, overrides: RcParams) -> Self {
        self.overrides.merge(&overrides);
        self
    }

    pub fn set(mut self, key: impl Into<String>, value: impl Into<RcValue>) -> Self {
        self.overrides.insert(key, value);
        self
    }

    pub fn font_sizes(mut self, sizes: FontSizes) -> Self {
        sizes.apply(&mut self.overrides);
        self
    }

    /// LaTeX packages, one `\usepackage[..]{..}` line each, for `pgf.preamble`.
    pub fn packages<I, S>(mut self, packages: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let preamble = packages.into_iter().map(|p| p.as_ref().to_string()).collect::<Vec<_>>().join("\n");
        self.overrides.insert("pgf.preamble", preamble);
        self
    }

    pub fn texsystem(mut self, tex: TexSystem) -> Self {
        self.overrides.insert("pgf.texsystem", tex.as_str());
        self
    }

    pub fn save_on_exit(mut self, save: SaveArgs) -> Self {
        self.save = Some(save);
        self
    }

    /// Built-in defaults with the caller overrides on top.
    pub fn override_set(&self) -> RcParams {
        latex_defaults().merged(&self.overrides)
    }

    /// Apply the overrides (if enabled) and return the guard that undoes them.
    pub fn enter(self) -> StyleGuard {
        if !self.enabled {
            return StyleGuard { entered: None, save: None };
        }
        let lock = rc::lock();
        let snapshot = rc::snapshot();
        let overrides = self.override_set();
        rc::update(&overrides);
        debug!("latex style entered ({} overrides)", overrides.len());
        StyleGuard { entered: Some(Entered { snapshot, _lock: lock }), save: self.save }
    }
}

struct Entered {
    snapshot: RcParams,
    _lock: RcLock,
}

/// Live style scope. Restores the pre-entry configuration on `finish` or drop.
#[must_use = "dropping the guard immediately restores the previous style"]
pub struct StyleGuard {
    entered: Option<Entered>,
    save: Option<SaveArgs>,
}

impl StyleGuard {
    /// Whether this guard changed the configuration and will restore it.
    pub fn is_active(&self) -> bool { self.entered.is_some() }

    /// The configuration captured at entry.
    pub fn snapshot(&self) -> Option<&RcParams> {
        self.entered.as_ref().map(|e| &e.snapshot)
    }

    /// Save the current figure if requested, then restore. Returns the saved path, if any.
    pub fn finish(self) -> Result<Option<PathBuf>> {
        self.finish_with(|args| figure::savefig(&args.path, &args.options))
    }

    // The snapshot stays in `self` while `save` runs, so a panic there still restores via Drop.
    fn finish_with(mut self, save: impl FnOnce(&SaveArgs) -> Result<Option<PathBuf>>) -> Result<Option<PathBuf>> {
        if self.entered.is_none() {
            return Ok(None);
        }
        let saved = match self.save.take() {
            Some(args) => save(&args),
            None => Ok(None),
        };
        if let Some(entered) = self.entered.take() {
            restore(entered);
        }
        saved
    }
}

impl Drop for StyleGuard {
    fn drop(&mut self) {
        if let Some(entered) = self.entered.take() {
            if let Some(args) = self.save.take() {
                warn!("style scope left early; not saving {}", args.path.display());
            }
            restore(entered);
        }
    }
}

fn restore(entered: Entered) {
    let Entered { snapshot, _lock } = entered;
    rc::restore(snapshot);
    debug!("latex style restored");
}

/// Run `body` inside `style`. On success the save-on-exit runs and its error, if any, is
/// returned; on failure the body's error is returned. The configuration is restored either way.
pub fn with_latex_style<T, E, F>(style: LatexStyle, body: F) -> std::result::Result<T, E>
where
    F: FnOnce() -> std::result::Result<T, E>,
    E: From<Error>,
{
    let guard = style.enter();
    let value = body()?;
    guard.finish()?;
    Ok(value)
}

#[cfg(test)]
mod tests {
    use std::panic::{catch_unwind, AssertUnwindSafe};

    use super::*;

    #[test]
    fn panic_while_saving_still_restores() {
        let _serial = rc::lock();
        let before = rc::snapshot();

        let outcome = catch_unwind(AssertUnwindSafe(|| {
            let guard = LatexStyle::new().save_on_exit(SaveArgs::new("unused.pgf")).enter();
            let _ = guard.finish_with(|_| panic!("exporter blew up"));
        }));
        assert!(outcome.is_err());
        assert_eq!(rc::snapshot(), before);
    }

    #[test]
    fn save_sees_the_overridden_style() {
        let _serial = rc::lock();
        let before = rc::snapshot();

        let guard = LatexStyle::new().save_on_exit(SaveArgs::new("seen.pgf")).enter();
        let saved = guard
            .finish_with(|args| {
                assert_eq!(rc::get("backend"), Some(RcValue::from("pgf")));
                Ok(Some(args.path.clone()))
            })
            .expect("save closure succeeds");
        assert_eq!(saved, Some(PathBuf::from("seen.pgf")));
        assert_eq!(rc::snapshot(), before);
    }
}
