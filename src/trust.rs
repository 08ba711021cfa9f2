//! Display references and the trust policy that produces them
//!
//! A [`DisplayReference`] is what the UI binds as an embed source. It is
//! derived from a [`RawReference`] by a [`TrustPolicy`], which also bakes in
//! the viewer-chrome fragment (e.g. `#toolbar=0&navpanes=0` for PDF viewers).

use std::fmt;

use serde::Serialize;

use crate::registry::RawReference;

/// Viewer fragment used when nothing else is configured.
pub const DEFAULT_VIEWER_FRAGMENT: &str = "toolbar=0&navpanes=0";

/// A trusted reference, safe to bind directly into a rendering surface.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(into = "String")]
pub struct DisplayReference {
    value: String,
    /// Length of the raw-reference prefix inside `value`
    source_len: usize,
}

impl DisplayReference {
    /// Mark `raw` as trusted, appending `fragment` when it is non-empty.
    pub fn trusted(raw: &RawReference, fragment: &str) -> Self {
        let source_len = raw.url().len();
        let value = if fragment.is_empty() {
            raw.url().to_string()
        } else {
            format!("{}#{}", raw.url(), fragment)
        };
        Self { value, source_len }
    }

    /// Full embed target, including any viewer fragment.
    pub fn as_str(&self) -> &str {
        &self.value
    }

    /// The raw-reference part, without the viewer fragment.
    pub fn source(&self) -> &str {
        &self.value[..self.source_len]
    }
}

impl fmt::Display for DisplayReference {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.value)
    }
}

impl From<DisplayReference> for String {
    fn from(reference: DisplayReference) -> Self {
        reference.value
    }
}

/// Platform port for wrapping raw references for safe display.
pub trait TrustPolicy {
    fn trust(&self, raw: &RawReference) -> DisplayReference;
}

/// Trust policy for embedded document viewers.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ViewerTrustPolicy {
    fragment: String,
}

impl ViewerTrustPolicy {
    /// Use a custom viewer fragment (without the leading `#`).
    pub fn new(fragment: impl Into<String>) -> Self {
        let fragment = fragment.into();
        let fragment = fragment.trim_start_matches('#').to_string();
        Self { fragment }
    }

    pub fn fragment(&self) -> &str {
        &self.fragment
    }
}

impl Default for ViewerTrustPolicy {
    fn default() -> Self {
        Self::new(DEFAULT_VIEWER_FRAGMENT)
    }
}

impl TrustPolicy for ViewerTrustPolicy {
    fn trust(&self, raw: &RawReference) -> DisplayReference {
        DisplayReference::trusted(raw, &self.fragment)
    }
}
