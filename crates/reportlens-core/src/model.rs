//! Typed report metadata as delivered by the upstream analysis service.
//!
//! Decoding is deliberately lenient about values the producer is known to emit loosely (nulls,
//! numeric strings, omitted members on AI-generated pages) but still rejects documents whose
//! *shape* is wrong, e.g. `pages` that is not an array.

use crate::decode::{
    lenient_f64, lenient_i64, lenient_opt_f64, null_as_default, projection_map, string_or_empty,
    string_or_unknown,
};
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

/// Placeholder used by the producer for metadata it could not determine.
pub const UNKNOWN: &str = "Unknown";

fn unknown() -> String {
    UNKNOWN.to_string()
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReportMetadata {
    #[serde(default = "unknown", deserialize_with = "string_or_unknown")]
    pub theme: String,
    #[serde(default = "unknown", deserialize_with = "string_or_unknown")]
    pub version: String,
    pub pages: Vec<Page>,
    #[serde(default, deserialize_with = "string_or_empty")]
    pub suggestions: String,
    /// Raw alternate layout text. May be wrapped in Markdown code fences or surrounded by prose;
    /// see [`crate::preprocess::decode_alternate_layout`].
    #[serde(default, deserialize_with = "string_or_empty")]
    pub optimal_layout: String,
}

impl ReportMetadata {
    pub fn page(&self, index: usize) -> Option<&Page> {
        self.pages.get(index)
    }

    pub fn visual_count(&self) -> usize {
        self.pages.iter().map(|p| p.visuals.len()).sum()
    }

    pub fn has_suggestions(&self) -> bool {
        !self.suggestions.trim().is_empty()
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Page {
    #[serde(default, deserialize_with = "lenient_i64")]
    pub page_number: i64,
    #[serde(default, deserialize_with = "string_or_empty")]
    pub page_name: String,
    #[serde(
        default,
        skip_serializing_if = "Option::is_none",
        deserialize_with = "lenient_opt_f64"
    )]
    pub page_width: Option<f64>,
    #[serde(
        default,
        alias = "page_length",
        skip_serializing_if = "Option::is_none",
        deserialize_with = "lenient_opt_f64"
    )]
    pub page_height: Option<f64>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub visuals: Vec<Visual>,
}

impl Page {
    /// Human-readable heading used by dashboards, e.g. `Page 2: Sales`.
    pub fn title(&self) -> String {
        if self.page_name.is_empty() {
            format!("Page {}", self.page_number)
        } else {
            format!("Page {}: {}", self.page_number, self.page_name)
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Visual {
    #[serde(default, deserialize_with = "lenient_i64")]
    pub visual_number: i64,
    #[serde(default = "unknown", deserialize_with = "string_or_unknown")]
    pub visual_type: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub position: Position,
    /// Role name (e.g. `Category`, `Y`) to the fields bound to it, in delivery order.
    #[serde(default, deserialize_with = "projection_map")]
    pub projections: IndexMap<String, Vec<String>>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub query_fields: Vec<String>,
}

impl Default for Visual {
    fn default() -> Self {
        Self {
            visual_number: 0,
            visual_type: unknown(),
            position: Position::default(),
            projections: IndexMap::new(),
            query_fields: Vec::new(),
        }
    }
}

impl Visual {
    /// Number of field references this visual contributes to a usage tally.
    pub fn field_reference_count(&self) -> usize {
        self.query_fields.len() + self.projections.values().map(Vec::len).sum::<usize>()
    }
}

/// Visual placement in report pixel units. Absent or unparseable members decode as `0`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Position {
    #[serde(default, deserialize_with = "lenient_f64")]
    pub x: f64,
    #[serde(default, deserialize_with = "lenient_f64")]
    pub y: f64,
    #[serde(default, deserialize_with = "lenient_f64")]
    pub width: f64,
    #[serde(default, deserialize_with = "lenient_f64")]
    pub height: f64,
}

impl Position {
    pub fn new(x: f64, y: f64, width: f64, height: f64) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    pub fn right(&self) -> f64 {
        self.x + self.width
    }

    pub fn bottom(&self) -> f64 {
        self.y + self.height
    }
}

/// Display preferences, persisted separately from report metadata.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Preferences {
    pub dark_mode: bool,
}

impl Preferences {
    pub const DARK: &'static str = "dark";
    pub const LIGHT: &'static str = "light";

    /// Parses the persisted theme literal. Anything other than `dark` means light mode.
    pub fn from_theme_literal(literal: &str) -> Self {
        Self {
            dark_mode: literal.trim() == Self::DARK,
        }
    }

    pub fn theme_literal(&self) -> &'static str {
        if self.dark_mode {
            Self::DARK
        } else {
            Self::LIGHT
        }
    }

    pub fn toggled(self) -> Self {
        Self {
            dark_mode: !self.dark_mode,
        }
    }
}
