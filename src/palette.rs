//! Palette records: the plain data contract between the generator core and
//! the surrounding application (rendering, persistence).

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::harmony::Harmony;

/// A single color: a `#rrggbb` hex string plus an optional display name.
///
/// Swatches produced by the generator always carry a name and a normalized
/// lowercase six-digit hex; swatches built from user input may carry
/// anything, and downstream code treats an unparsable hex as "no color".
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Swatch {
    pub hex: String,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub name: Option<String>,
}

impl Swatch {
    /// A swatch with no display name
    pub fn new(hex: impl Into<String>) -> Self {
        Self {
            hex: hex.into(),
            name: None,
        }
    }

    /// A swatch labeled by the coarse color classifier
    pub fn named(hex: impl Into<String>) -> Self {
        let hex = hex.into();
        let name = crate::colors::color_name(&hex);
        Self {
            hex,
            name: Some(name.to_string()),
        }
    }
}

impl fmt::Display for Swatch {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.name {
            Some(name) => write!(f, "{} ({})", self.hex, name),
            None => f.write_str(&self.hex),
        }
    }
}

/// A saved palette: seed colors, the generated result, and bookkeeping.
///
/// `id` is an opaque session-local join key (see
/// [`crate::harmony::generate_palette_id`]); `timestamp_ms` is unix
/// milliseconds at save time.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Palette {
    pub id: String,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub name: Option<String>,
    pub harmony: Harmony,
    pub base_colors: Vec<Swatch>,
    pub generated_colors: Vec<Swatch>,
    pub timestamp_ms: u64,
}
