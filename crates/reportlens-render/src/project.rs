use crate::geom::{self, finite_or_zero};
use reportlens_core::{Position, Visual};
use serde::{Deserialize, Serialize};

/// Absolute on-screen rectangle of a visual, relative to its pane's origin.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct ProjectedRect {
    pub left: f64,
    pub top: f64,
    pub width: f64,
    pub height: f64,
}

impl ProjectedRect {
    pub fn right(&self) -> f64 {
        self.left + self.width
    }

    pub fn bottom(&self) -> f64 {
        self.top + self.height
    }

    pub fn to_rect(&self) -> geom::Rect {
        geom::rect(self.left, self.top, self.width, self.height)
    }

    pub fn overlaps(&self, other: &ProjectedRect) -> bool {
        geom::overlaps(&self.to_rect(), &other.to_rect())
    }
}

pub fn project_position(position: &Position, scale: f64) -> ProjectedRect {
    let s = finite_or_zero(scale);
    ProjectedRect {
        left: finite_or_zero(position.x * s),
        top: finite_or_zero(position.y * s),
        width: finite_or_zero(position.width * s),
        height: finite_or_zero(position.height * s),
    }
}

/// Maps a visual's report-pixel position to screen space: every member multiplied by `scale`.
pub fn project(visual: &Visual, scale: f64) -> ProjectedRect {
    project_position(&visual.position, scale)
}

pub fn project_all(visuals: &[Visual], scale: f64) -> Vec<ProjectedRect> {
    visuals.iter().map(|v| project(v, scale)).collect()
}
