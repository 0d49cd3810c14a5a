use crate::project::ProjectedRect;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Bounds {
    pub min_x: f64,
    pub min_y: f64,
    pub max_x: f64,
    pub max_y: f64,
}

impl Bounds {
    pub fn width(&self) -> f64 {
        self.max_x - self.min_x
    }

    pub fn height(&self) -> f64 {
        self.max_y - self.min_y
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlacedVisual {
    pub visual_number: i64,
    pub visual_type: String,
    pub rect: ProjectedRect,
}

/// One side of the comparison view. Rectangles are relative to this pane's own origin.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PaneLayout {
    pub title: String,
    pub page_number: i64,
    pub page_name: String,
    pub scale: f64,
    pub visuals: Vec<PlacedVisual>,
    /// Scaled canvas size: the page size when known, grown to fit every visual.
    pub extent_width: f64,
    pub extent_height: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "state", rename_all = "snake_case")]
pub enum AlternatePane {
    Resolved(PaneLayout),
    /// The alternate layout was malformed or had no page at this index.
    Unavailable,
}

impl AlternatePane {
    pub fn as_resolved(&self) -> Option<&PaneLayout> {
        match self {
            Self::Resolved(pane) => Some(pane),
            Self::Unavailable => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ComparisonLayout {
    pub page_index: usize,
    pub scale: f64,
    pub original: PaneLayout,
    pub alternate: AlternatePane,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BarLayout {
    pub field: String,
    pub count: usize,
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
    /// Anchor of the category label below the bar.
    pub label_x: f64,
    pub label_y: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AxisTickLayout {
    pub value: usize,
    pub y: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BarChartLayout {
    pub title: String,
    pub bounds: Bounds,
    pub plot_x: f64,
    pub plot_y: f64,
    pub plot_width: f64,
    pub plot_height: f64,
    pub axis_max: usize,
    pub ticks: Vec<AxisTickLayout>,
    pub bars: Vec<BarLayout>,
}
