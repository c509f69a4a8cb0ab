// File: crates/texfig-core/src/rc.rs
// Summary: Process-wide style configuration (rc params): typed values, defaults, style files,
//          and the snapshot/restore primitives the scoped style context is built on.
// Notes:
// - The global mapping is a single shared resource. Writers bump `generation()` so callers
//   can tell whether anything touched it, even transiently.
// - `lock()` hands out the process-wide reentrant style lock. Scoped contexts hold it for
//   their whole lifetime; plain `set`/`update` calls do not take it.

use std::collections::BTreeMap;
use std::fmt;
use std::path::Path;
use std::sync::atomic::{AtomicU64, Ordering};

use log::trace;
use once_cell::sync::Lazy;
use parking_lot::{ReentrantMutex, ReentrantMutexGuard, RwLock};

use crate::error::{Error, Result};

/// A single configuration value.
#[derive(Clone, Debug, PartialEq)]
pub enum RcValue {
    Bool(bool),
    Number(f64),
    Text(String),
    Pair(f64, f64),
}

impl RcValue {
    pub fn as_bool(&self) -> Option<bool> {
        match self { RcValue::Bool(b) => Some(*b), _ => None }
    }
    pub fn as_f64(&self) -> Option<f64> {
        match self { RcValue::Number(n) => Some(*n), _ => None }
    }
    pub fn as_str(&self) -> Option<&str> {
        match self { RcValue::Text(s) => Some(s.as_str()), _ => None }
    }
    pub fn as_pair(&self) -> Option<(f64, f64)> {
        match self { RcValue::Pair(a, b) => Some((*a, *b)), _ => None }
    }
}

impl fmt::Display for RcValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RcValue::Bool(b) => write!(f, "{b}"),
            RcValue::Number(n) => write!(f, "{n}"),
            RcValue::Text(s) => f.write_str(s),
            RcValue::Pair(a, b) => write!(f, "{a}, {b}"),
        }
    }
}

impl From<bool> for RcValue { fn from(v: bool) -> Self { RcValue::Bool(v) } }
impl From<f64> for RcValue { fn from(v: f64) -> Self { RcValue::Number(v) } }
impl From<f32> for RcValue { fn from(v: f32) -> Self { RcValue::Number(v as f64) } }
impl From<i32> for RcValue { fn from(v: i32) -> Self { RcValue::Number(v as f64) } }
impl From<&str> for RcValue { fn from(v: &str) -> Self { RcValue::Text(v.to_string()) } }
impl From<String> for RcValue { fn from(v: String) -> Self { RcValue::Text(v) } }
impl From<(f64, f64)> for RcValue { fn from(v: (f64, f64)) -> Self { RcValue::Pair(v.0, v.1) } }

/// Mapping from setting name (`group.name`) to value.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct RcParams {
    values: BTreeMap<String, RcValue>,
}

impl RcParams {
    pub fn new() -> Self {
        Self::default()
    }

    /// Library defaults, the state `rc_defaults()` returns to.
    pub fn defaults() -> Self {
        [
            ("backend", RcValue::from("raster")),
            ("figure.figsize", RcValue::Pair(6.4, 4.8)),
            ("figure.dpi", RcValue::Number(100.0)),
            ("figure.autolayout", true.into()),
            ("figure.facecolor", "#ffffff".into()),
            ("figure.titlesize", RcValue::Number(12.0)),
            ("font.family", "sans-serif".into()),
            ("font.size", RcValue::Number(10.0)),
            ("axes.titlesize", RcValue::Number(12.0)),
            ("axes.labelsize", RcValue::Number(10.0)),
            ("axes.facecolor", "#ffffff".into()),
            ("axes.edgecolor", "#000000".into()),
            ("axes.linewidth", RcValue::Number(0.8)),
            ("axes.grid", false.into()),
            ("grid.color", "#b0b0b0".into()),
            ("grid.linewidth", RcValue::Number(0.8)),
            ("xtick.labelsize", RcValue::Number(10.0)),
            ("ytick.labelsize", RcValue::Number(10.0)),
            ("legend.fontsize", RcValue::Number(10.0)),
            ("lines.linewidth", RcValue::Number(1.5)),
            ("lines.markersize", RcValue::Number(6.0)),
            ("text.color", "#000000".into()),
            ("text.usetex", false.into()),
            ("savefig.dpi", RcValue::Number(100.0)),
            ("savefig.format", "png".into()),
            ("savefig.bbox", "standard".into()),
            ("savefig.pad_inches", RcValue::Number(0.1)),
            ("pgf.texsystem", "xelatex".into()),
            ("pgf.rcfonts", true.into()),
            ("pgf.preamble", "".into()),
        ]
        .into_iter()
        .collect()
    }

    /// Parse a TOML style file. Nested tables flatten to dotted keys.
    pub fn from_toml_str(src: &str) -> Result<Self> {
        let table: toml::Table = src.parse()?;
        let mut out = RcParams::new();
        flatten_into(&mut out, "", &table)?;
        Ok(out)
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let src = std::fs::read_to_string(path)
            .map_err(|source| Error::StyleFile { path: path.to_path_buf(), source })?;
        Self::from_toml_str(&src)
    }

    pub fn get(&self, key: &str) -> Option<&RcValue> {
        self.values.get(key)
    }

    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<RcValue>) -> Option<RcValue> {
        self.values.insert(key.into(), value.into())
    }

    pub fn remove(&mut self, key: &str) -> Option<RcValue> {
        self.values.remove(key)
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.values.contains_key(key)
    }

    /// Merge `other` on top of `self`; `other` wins on collisions.
    pub fn merge(&mut self, other: &RcParams) {
        for (k, v) in &other.values {
            self.values.insert(k.clone(), v.clone());
        }
    }

    pub fn merged(mut self, other: &RcParams) -> Self {
        self.merge(other);
        self
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &RcValue)> {
        self.values.iter().map(|(k, v)| (k.as_str(), v))
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.values.keys().map(String::as_str)
    }

    pub fn len(&self) -> usize { self.values.len() }
    pub fn is_empty(&self) -> bool { self.values.is_empty() }

    pub fn number(&self, key: &str) -> Option<f64> { self.get(key).and_then(RcValue::as_f64) }
    pub fn flag(&self, key: &str) -> Option<bool> { self.get(key).and_then(RcValue::as_bool) }
    pub fn text(&self, key: &str) -> Option<&str> { self.get(key).and_then(RcValue::as_str) }
    pub fn pair(&self, key: &str) -> Option<(f64, f64)> { self.get(key).and_then(RcValue::as_pair) }
}

impl<K: Into<String>, V: Into<RcValue>> FromIterator<(K, V)> for RcParams {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut out = RcParams::new();
        for (k, v) in iter {
            out.insert(k, v);
        }
        out
    }
}

fn flatten_into(out: &mut RcParams, prefix: &str, table: &toml::Table) -> Result<()> {
    for (name, value) in table {
        let key = if prefix.is_empty() { name.clone() } else { format!("{prefix}.{name}") };
        let invalid = |reason: &str| Error::InvalidRc { key: key.clone(), reason: reason.to_string() };
        let v = match value {
            toml::Value::Table(inner) => {
                flatten_into(out, &key, inner)?;
                continue;
            }
            toml::Value::Boolean(b) => RcValue::Bool(*b),
            toml::Value::Integer(i) => RcValue::Number(*i as f64),
            toml::Value::Float(f) => RcValue::Number(*f),
            toml::Value::String(s) => RcValue::Text(s.clone()),
            toml::Value::Array(items) => match items.as_slice() {
                [a, b] => match (toml_number(a), toml_number(b)) {
                    (Some(a), Some(b)) => RcValue::Pair(a, b),
                    _ => return Err(invalid("arrays must hold two numbers")),
                },
                _ => return Err(invalid("arrays must hold exactly two numbers")),
            },
            toml::Value::Datetime(_) => return Err(invalid("datetimes are not supported")),
        };
        out.insert(key, v);
    }
    Ok(())
}

fn toml_number(v: &toml::Value) -> Option<f64> {
    match v {
        toml::Value::Integer(i) => Some(*i as f64),
        toml::Value::Float(f) => Some(*f),
        _ => None,
    }
}

// ---- process-wide state ----------------------------------------------------

static RC: Lazy<RwLock<RcParams>> = Lazy::new(|| RwLock::new(RcParams::defaults()));
static GENERATION: AtomicU64 = AtomicU64::new(0);
static STYLE_LOCK: Lazy<ReentrantMutex<()>> = Lazy::new(|| ReentrantMutex::new(()));

/// Guard for the process-wide style lock. Not `Send`.
pub type RcLock = ReentrantMutexGuard<'static, ()>;

/// Take the process-wide style lock. Reentrant on the owning thread.
pub fn lock() -> RcLock {
    STYLE_LOCK.lock()
}

fn bump() {
    GENERATION.fetch_add(1, Ordering::SeqCst);
}

/// Number of writes made to the global mapping since process start.
pub fn generation() -> u64 {
    GENERATION.load(Ordering::SeqCst)
}

/// Clone of the whole global mapping.
pub fn snapshot() -> RcParams {
    RC.read().clone()
}

/// Replace the whole global mapping.
pub fn restore(params: RcParams) {
    *RC.write() = params;
    bump();
    trace!("rc restored");
}

/// Merge `overrides` on top of the global mapping.
pub fn update(overrides: &RcParams) {
    RC.write().merge(overrides);
    bump();
    trace!("rc updated with {} keys", overrides.len());
}

pub fn get(key: &str) -> Option<RcValue> {
    RC.read().get(key).cloned()
}

pub fn set(key: impl Into<String>, value: impl Into<RcValue>) {
    RC.write().insert(key, value);
    bump();
}

/// Set several keys of one group, e.g. `rc("axes", &[("titlesize", RcValue::Number(11.0))])`.
pub fn rc(group: &str, values: &[(&str, RcValue)]) {
    let mut params = RC.write();
    for (name, value) in values {
        params.insert(format!("{group}.{name}"), value.clone());
    }
    drop(params);
    bump();
}

/// Reset the global mapping to `RcParams::defaults()`.
pub fn rc_defaults() {
    restore(RcParams::defaults());
}
