use crate::geom::finite_or_zero;
use crate::model::{AlternatePane, ComparisonLayout, PaneLayout, PlacedVisual};
use crate::project::project;
use reportlens_core::{Page, ReportMetadata, resolve_alternate_page};

pub const ORIGINAL_PANE_TITLE: &str = "Old Layout";
pub const ALTERNATE_PANE_TITLE: &str = "New Layout";

/// Projects every visual of `page` under `scale`. O(n) in the number of visuals.
pub fn layout_pane(title: &str, page: &Page, scale: f64) -> PaneLayout {
    let scale = finite_or_zero(scale);
    let mut extent_width = page.page_width.map(|w| w * scale).unwrap_or(0.0);
    let mut extent_height = page.page_height.map(|h| h * scale).unwrap_or(0.0);

    let visuals: Vec<PlacedVisual> = page
        .visuals
        .iter()
        .map(|visual| {
            let rect = project(visual, scale);
            extent_width = extent_width.max(rect.right());
            extent_height = extent_height.max(rect.bottom());
            PlacedVisual {
                visual_number: visual.visual_number,
                visual_type: visual.visual_type.clone(),
                rect,
            }
        })
        .collect();

    PaneLayout {
        title: title.to_string(),
        page_number: page.page_number,
        page_name: page.page_name.clone(),
        scale,
        visuals,
        extent_width: extent_width.max(0.0),
        extent_height: extent_height.max(0.0),
    }
}

/// Lays out both panes independently under the same scale. Neither pane's coordinates depend on
/// the other's.
pub fn layout_comparison(
    page_index: usize,
    original: &Page,
    alternate: Option<&Page>,
    scale: f64,
) -> ComparisonLayout {
    let alternate = match alternate {
        Some(page) => AlternatePane::Resolved(layout_pane(ALTERNATE_PANE_TITLE, page, scale)),
        None => AlternatePane::Unavailable,
    };
    ComparisonLayout {
        page_index,
        scale,
        original: layout_pane(ORIGINAL_PANE_TITLE, original, scale),
        alternate,
    }
}

/// Resolves the alternate page from `metadata` and lays out both panes.
///
/// Returns `None` when `page_index` is not a page of the original report.
pub fn layout_report_comparison(
    metadata: &ReportMetadata,
    page_index: usize,
    scale: f64,
) -> Option<ComparisonLayout> {
    let original = metadata.page(page_index)?;
    let alternate = resolve_alternate_page(metadata, page_index);
    if alternate.is_none() {
        tracing::debug!(page_index, "alternate pane unavailable");
    }
    Some(layout_comparison(
        page_index,
        original,
        alternate.as_ref(),
        scale,
    ))
}
