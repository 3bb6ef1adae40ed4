// Chunk: docs/chunks/marker_options - JSON-loadable marker options

//! Options controlling how the marker tracks and trims whitespace.

use serde::{Deserialize, Serialize};
use wsmark_buffer::DEFAULT_HISTORY_LIMIT;

use crate::error::MarkerError;

/// Per-document marker options.
///
/// Every field has a default, so a partial JSON object such as
/// `{"track_anchors": false}` is a valid configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct MarkerOptions {
    /// Whether remove-all also deletes blank and whitespace-only lines at
    /// the end of the document, terminators included.
    pub collapse_trailing_blank_lines: bool,
    /// Number of versions the observed buffer retains for offset translation.
    pub history_limit: usize,
    /// Whether reconciled spans carry a tracking anchor.
    pub track_anchors: bool,
}

impl Default for MarkerOptions {
    fn default() -> Self {
        Self {
            collapse_trailing_blank_lines: true,
            history_limit: DEFAULT_HISTORY_LIMIT,
            track_anchors: true,
        }
    }
}

impl MarkerOptions {
    /// Parses options from a JSON object. Missing fields take their defaults.
    pub fn from_json(json: &str) -> Result<Self, MarkerError> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn to_json(&self) -> Result<String, MarkerError> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}
