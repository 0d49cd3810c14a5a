//! Headless state for the two interactive pages: the analysis dashboard and the layout
//! comparison page. Both read from an injected [`MetadataStore`].

use super::Result;
use reportlens_core::{
    KeyValueStore, MetadataStore, Page, Preferences, RankedUsage, ReportMetadata, UsageTally,
    aggregate, parse_page_index, rank_top,
};
use reportlens_render::{ComparisonLayout, ScaleRange, layout_report_comparison};

pub const NO_REPORT_TEXT: &str = "⛔ No data found. Please upload a PBIX file.";

fn persist_toggled<S: KeyValueStore>(
    store: &mut MetadataStore<S>,
    current: Preferences,
) -> Result<Preferences> {
    let next = current.toggled();
    store.save_preferences(next)?;
    tracing::debug!(theme = next.theme_literal(), "theme preference changed");
    Ok(next)
}

#[derive(Debug, Clone, PartialEq)]
pub struct AnalysisView {
    metadata: Option<ReportMetadata>,
    tally: UsageTally,
    usage: RankedUsage,
    selected_page: usize,
    show_suggestions: bool,
    preferences: Preferences,
}

impl AnalysisView {
    pub fn load<S: KeyValueStore>(store: &MetadataStore<S>, top_n: usize) -> Self {
        Self::new(store.load(), store.load_preferences(), top_n)
    }

    pub fn new(metadata: Option<ReportMetadata>, preferences: Preferences, top_n: usize) -> Self {
        let tally = metadata
            .as_ref()
            .map(|m| aggregate(&m.pages))
            .unwrap_or_default();
        let usage = rank_top(&tally, top_n);
        Self {
            metadata,
            tally,
            usage,
            selected_page: 0,
            show_suggestions: false,
            preferences,
        }
    }

    pub fn metadata(&self) -> Option<&ReportMetadata> {
        self.metadata.as_ref()
    }

    pub fn has_data(&self) -> bool {
        self.selected_page().is_some()
    }

    pub fn tally(&self) -> &UsageTally {
        &self.tally
    }

    pub fn usage(&self) -> &RankedUsage {
        &self.usage
    }

    pub fn selected_page_index(&self) -> usize {
        self.selected_page
    }

    pub fn selected_page(&self) -> Option<&Page> {
        self.metadata.as_ref()?.page(self.selected_page)
    }

    /// Selects a page. Out-of-range indices are ignored and return `false`.
    pub fn select_page(&mut self, index: usize) -> bool {
        let in_range = self.metadata.as_ref().is_some_and(|m| m.page(index).is_some());
        if in_range {
            self.selected_page = index;
        }
        in_range
    }

    pub fn show_suggestions(&self) -> bool {
        self.show_suggestions
    }

    pub fn toggle_suggestions(&mut self) {
        self.show_suggestions = !self.show_suggestions;
    }

    /// Suggestion text with Markdown emphasis markers (`*`) removed, only while the suggestion
    /// panel is open.
    pub fn suggestions(&self) -> Option<String> {
        if !self.show_suggestions {
            return None;
        }
        self.metadata
            .as_ref()
            .filter(|m| m.has_suggestions())
            .map(|m| m.suggestions.replace('*', ""))
    }

    pub fn preferences(&self) -> Preferences {
        self.preferences
    }

    pub fn toggle_dark_mode<S: KeyValueStore>(
        &mut self,
        store: &mut MetadataStore<S>,
    ) -> Result<Preferences> {
        self.preferences = persist_toggled(store, self.preferences)?;
        Ok(self.preferences)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum ComparisonView {
    /// No stored metadata, an unparseable page parameter, or a page index out of range.
    NoData,
    Ready(ComparisonLayout),
}

impl ComparisonView {
    pub fn layout(&self) -> Option<&ComparisonLayout> {
        match self {
            Self::Ready(layout) => Some(layout),
            Self::NoData => None,
        }
    }
}

/// The comparison page, addressed by a single page-index route parameter.
#[derive(Debug, Clone, PartialEq)]
pub struct LayoutView {
    metadata: Option<ReportMetadata>,
    page_index: Option<usize>,
    scale_range: ScaleRange,
    scale: f64,
    preferences: Preferences,
}

impl LayoutView {
    pub fn load<S: KeyValueStore>(
        store: &MetadataStore<S>,
        page_param: &str,
        scale_range: ScaleRange,
    ) -> Self {
        Self::new(
            store.load(),
            page_param,
            scale_range,
            store.load_preferences(),
        )
    }

    pub fn new(
        metadata: Option<ReportMetadata>,
        page_param: &str,
        scale_range: ScaleRange,
        preferences: Preferences,
    ) -> Self {
        let page_index = parse_page_index(page_param);
        if page_index.is_none() {
            tracing::debug!(page_param, "page parameter is not a page index");
        }
        Self {
            metadata,
            page_index,
            scale_range,
            scale: scale_range.default,
            preferences,
        }
    }

    pub fn page_index(&self) -> Option<usize> {
        self.page_index
    }

    pub fn scale(&self) -> f64 {
        self.scale
    }

    pub fn scale_range(&self) -> ScaleRange {
        self.scale_range
    }

    /// Sets the zoom factor, clamped into the view's range. Returns the applied value.
    pub fn set_scale(&mut self, requested: f64) -> f64 {
        self.scale = self.scale_range.clamp(requested);
        self.scale
    }

    pub fn nudge_scale(&mut self, steps: i32) -> f64 {
        self.scale = self.scale_range.nudge(self.scale, steps);
        self.scale
    }

    /// Recomputes both panes at the current scale.
    pub fn comparison(&self) -> ComparisonView {
        let layout = self
            .metadata
            .as_ref()
            .zip(self.page_index)
            .and_then(|(metadata, index)| layout_report_comparison(metadata, index, self.scale));
        match layout {
            Some(layout) => ComparisonView::Ready(layout),
            None => ComparisonView::NoData,
        }
    }

    pub fn preferences(&self) -> Preferences {
        self.preferences
    }

    pub fn toggle_dark_mode<S: KeyValueStore>(
        &mut self,
        store: &mut MetadataStore<S>,
    ) -> Result<Preferences> {
        self.preferences = persist_toggled(store, self.preferences)?;
        Ok(self.preferences)
    }
}
