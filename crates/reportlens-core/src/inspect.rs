//! Structural summaries of a report: what the dashboard lists per page and per visual.

use crate::model::{Page, ReportMetadata, Visual};
use crate::preprocess::decode_alternate_layout;
use crate::usage::{aggregate, aggregate_page};
use indexmap::IndexMap;
use serde::Serialize;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ReportSummary {
    pub theme: String,
    pub version: String,
    pub page_count: usize,
    pub visual_count: usize,
    pub distinct_fields: usize,
    pub field_references: usize,
    pub has_suggestions: bool,
    /// Number of pages in the decoded alternate layout, `None` if it does not decode.
    pub alternate_page_count: Option<usize>,
    pub pages: Vec<PageSummary>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PageSummary {
    pub index: usize,
    pub page_number: i64,
    pub page_name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub page_width: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub page_height: Option<f64>,
    pub visual_count: usize,
    /// Visual type to number of visuals of that type, in first-seen order.
    pub visual_types: IndexMap<String, usize>,
    pub distinct_fields: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PageDetail {
    #[serde(flatten)]
    pub summary: PageSummary,
    pub visuals: Vec<Visual>,
}

pub fn summarize_page(index: usize, page: &Page) -> PageSummary {
    let mut visual_types: IndexMap<String, usize> = IndexMap::new();
    for visual in &page.visuals {
        *visual_types.entry(visual.visual_type.clone()).or_insert(0) += 1;
    }
    PageSummary {
        index,
        page_number: page.page_number,
        page_name: page.page_name.clone(),
        page_width: page.page_width,
        page_height: page.page_height,
        visual_count: page.visuals.len(),
        visual_types,
        distinct_fields: aggregate_page(page).len(),
    }
}

pub fn summarize_report(metadata: &ReportMetadata) -> ReportSummary {
    let tally = aggregate(&metadata.pages);
    let alternate_page_count = decode_alternate_layout(&metadata.optimal_layout)
        .ok()
        .map(|layout| layout.pages.len());
    ReportSummary {
        theme: metadata.theme.clone(),
        version: metadata.version.clone(),
        page_count: metadata.pages.len(),
        visual_count: metadata.visual_count(),
        distinct_fields: tally.len(),
        field_references: tally.total(),
        has_suggestions: metadata.has_suggestions(),
        alternate_page_count,
        pages: metadata
            .pages
            .iter()
            .enumerate()
            .map(|(i, p)| summarize_page(i, p))
            .collect(),
    }
}

pub fn describe_page(metadata: &ReportMetadata, index: usize) -> Option<PageDetail> {
    let page = metadata.page(index)?;
    Some(PageDetail {
        summary: summarize_page(index, page),
        visuals: page.visuals.clone(),
    })
}
