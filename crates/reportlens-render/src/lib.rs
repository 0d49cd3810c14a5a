#![forbid(unsafe_code)]

//! Headless layout projection, side-by-side layout comparison and SVG output for reportlens.
//!
//! Layout functions are pure: they take core model types plus a scale and return plain
//! serializable layout structs. The [`svg`] module turns those into standalone SVG documents.

pub mod chart;
pub mod compare;
pub mod diff;
pub mod geom;
pub mod model;
pub mod project;
pub mod scale;
pub mod svg;
pub mod text;

use crate::text::{DeterministicTextMeasurer, TextMeasurer};
use std::sync::Arc;

pub use chart::{LEAST_USED_TITLE, MOST_USED_TITLE, layout_usage_chart};
pub use compare::{layout_comparison, layout_pane, layout_report_comparison};
pub use diff::{LayoutDiff, VisualChange, VisualDiff, count_overlaps, diff_layouts};
pub use model::{
    AlternatePane, BarChartLayout, ComparisonLayout, PaneLayout, PlacedVisual,
};
pub use project::{ProjectedRect, project, project_all, project_position};
pub use scale::ScaleRange;
pub use svg::{
    CanvasSize, SvgRenderOptions, comparison_canvas_size, no_data_canvas_size, render_comparison_svg,
    render_no_data_svg, render_usage_chart_svg, usage_chart_canvas_size,
};

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("invalid scale range: min {min}, max {max}")]
    InvalidScaleRange { min: f64, max: f64 },
}

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Clone)]
pub struct LayoutOptions {
    pub text_measurer: Arc<dyn TextMeasurer + Send + Sync>,
    pub scale_range: ScaleRange,
}

impl Default for LayoutOptions {
    fn default() -> Self {
        Self {
            text_measurer: Arc::new(DeterministicTextMeasurer::default()),
            scale_range: ScaleRange::default(),
        }
    }
}

impl LayoutOptions {
    /// Comparison layout for `page_index` with the requested scale clamped into range.
    pub fn compare(
        &self,
        metadata: &reportlens_core::ReportMetadata,
        page_index: usize,
        requested_scale: f64,
    ) -> Option<ComparisonLayout> {
        let scale = self.scale_range.clamp(requested_scale);
        layout_report_comparison(metadata, page_index, scale)
    }

    pub fn usage_chart(&self, title: &str, entries: &[reportlens_core::FieldCount]) -> BarChartLayout {
        layout_usage_chart(title, entries, self.text_measurer.as_ref())
    }
}
