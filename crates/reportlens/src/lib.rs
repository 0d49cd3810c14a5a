#![forbid(unsafe_code)]

//! `reportlens` is a headless report analysis toolkit.
//!
//! It inspects report metadata produced by an upstream analysis service, ranks field usage, and
//! lays out the original page next to an AI-suggested alternate layout.
//!
//! # Features
//!
//! - `render` (default): layout comparison, bar charts and SVG output (`reportlens::render`)
//! - `raster`: PNG output via pure-Rust SVG rasterization

pub use reportlens_core::*;

#[cfg(feature = "render")]
pub mod render {
    pub use reportlens_render::diff::{LayoutDiff, VisualChange, VisualDiff};
    pub use reportlens_render::model::{AlternatePane, BarChartLayout, ComparisonLayout, PaneLayout};
    pub use reportlens_render::scale::ScaleRange;
    pub use reportlens_render::svg::{
        CanvasSize, NO_DATA_TEXT, SvgRenderOptions, comparison_canvas_size, no_data_canvas_size,
        usage_chart_canvas_size,
    };
    pub use reportlens_render::text::{DeterministicTextMeasurer, TextMeasurer};
    pub use reportlens_render::{LayoutOptions, diff_layouts};

    mod views;
    pub use views::{AnalysisView, ComparisonView, LayoutView, NO_REPORT_TEXT};

    #[cfg(feature = "raster")]
    pub mod raster;

    use reportlens_core::{
        ConfigError, LensConfig, Preferences, RankedUsage, ReportMetadata, StoreError,
    };
    use reportlens_render::svg::{LEAST_USED_BAR_FILL, MOST_USED_BAR_FILL};
    use reportlens_render::{LEAST_USED_TITLE, MOST_USED_TITLE};

    #[derive(Debug, thiserror::Error)]
    pub enum HeadlessError {
        #[error(transparent)]
        Config(#[from] ConfigError),
        #[error(transparent)]
        Store(#[from] StoreError),
        #[error(transparent)]
        Render(#[from] reportlens_render::Error),
    }

    pub type Result<T> = std::result::Result<T, HeadlessError>;

    /// Converts an arbitrary string into a conservative SVG `id` token suitable for embedding
    /// several rendered views in the same document.
    ///
    /// This helper:
    /// - trims whitespace
    /// - replaces unsupported characters with `-`
    /// - ensures the id starts with an ASCII letter by prefixing `r-` when needed
    pub fn sanitize_svg_id(raw: &str) -> String {
        let raw = raw.trim();
        if raw.is_empty() {
            return "r-untitled".to_string();
        }

        let mut out = String::with_capacity(raw.len() + 4);
        for ch in raw.chars() {
            let ok = ch.is_ascii_alphanumeric() || ch == '-' || ch == '_' || ch == ':' || ch == '.';
            out.push(if ok { ch } else { '-' });
        }

        let starts_ok = out.chars().next().is_some_and(|c| c.is_ascii_alphabetic());
        if !starts_ok {
            out.insert_str(0, "r-");
        }

        while out.contains("--") {
            out = out.replace("--", "-");
        }
        let out = out.trim_matches('-');
        if out.is_empty() || out == "r" {
            return "r-untitled".to_string();
        }
        out.to_string()
    }

    /// Which of the two dashboard charts to draw.
    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    pub enum UsageChart {
        MostUsed,
        LeastUsed,
    }

    impl UsageChart {
        pub fn title(self) -> &'static str {
            match self {
                Self::MostUsed => MOST_USED_TITLE,
                Self::LeastUsed => LEAST_USED_TITLE,
            }
        }

        pub fn bar_fill(self) -> &'static str {
            match self {
                Self::MostUsed => MOST_USED_BAR_FILL,
                Self::LeastUsed => LEAST_USED_BAR_FILL,
            }
        }

        pub fn entries(self, usage: &RankedUsage) -> &[reportlens_core::FieldCount] {
            match self {
                Self::MostUsed => &usage.most_used,
                Self::LeastUsed => &usage.least_used,
            }
        }
    }

    /// Bundles layout and SVG options for headless rendering.
    ///
    /// All work is CPU-bound and performs no I/O.
    #[derive(Clone, Default)]
    pub struct HeadlessRenderer {
        pub layout: LayoutOptions,
        pub svg: SvgRenderOptions,
    }

    impl HeadlessRenderer {
        pub fn new() -> Self {
            Self::default()
        }

        /// Applies `layout.*`, `render.*` and `theme.primary` from `config`.
        pub fn from_config(config: &LensConfig) -> Result<Self> {
            let layout = LayoutOptions {
                scale_range: ScaleRange::from_config(config)?,
                ..LayoutOptions::default()
            };
            Ok(Self {
                layout,
                svg: SvgRenderOptions::from_config(config),
            })
        }

        /// Parses a JSON override document (merged onto the defaults) and applies it.
        pub fn from_config_str(text: &str) -> Result<Self> {
            Self::from_config(&LensConfig::from_json_str(text)?)
        }

        pub fn with_preferences(mut self, preferences: Preferences) -> Self {
            self.svg.preferences = preferences;
            self
        }

        pub fn with_diagram_id(mut self, diagram_id: &str) -> Self {
            self.svg.diagram_id = Some(sanitize_svg_id(diagram_id));
            self
        }

        pub fn render_comparison_svg_sync(&self, view: &ComparisonView) -> String {
            match view {
                ComparisonView::Ready(layout) => {
                    reportlens_render::render_comparison_svg(layout, &self.svg)
                }
                ComparisonView::NoData => {
                    reportlens_render::render_no_data_svg(NO_DATA_TEXT, &self.svg)
                }
            }
        }

        /// Renders the comparison page in the view's own theme.
        pub fn render_layout_view_svg(&self, view: &LayoutView) -> String {
            let mut svg = self.svg.clone();
            svg.preferences = view.preferences();
            match view.comparison() {
                ComparisonView::Ready(layout) => {
                    reportlens_render::render_comparison_svg(&layout, &svg)
                }
                ComparisonView::NoData => reportlens_render::render_no_data_svg(NO_DATA_TEXT, &svg),
            }
        }

        /// Lays out `page_index` of `metadata` at `requested_scale` (clamped) and renders it.
        /// Missing metadata or an out-of-range page renders the no-data placeholder.
        pub fn render_report_comparison_svg(
            &self,
            metadata: Option<&ReportMetadata>,
            page_index: usize,
            requested_scale: f64,
        ) -> String {
            let view = match metadata.and_then(|m| {
                self.layout.compare(m, page_index, requested_scale)
            }) {
                Some(layout) => ComparisonView::Ready(layout),
                None => ComparisonView::NoData,
            };
            self.render_comparison_svg_sync(&view)
        }

        pub fn render_usage_chart_svg(&self, chart: UsageChart, usage: &RankedUsage) -> String {
            let layout = self.layout.usage_chart(chart.title(), chart.entries(usage));
            reportlens_render::render_usage_chart_svg(&layout, chart.bar_fill(), &self.svg)
        }

        #[cfg(feature = "raster")]
        fn canvas_background(&self) -> &'static str {
            reportlens_render::svg::Palette::for_preferences(self.svg.preferences).background
        }

        /// Rasterizes the comparison onto a canvas sized from its layout, filled with the
        /// current theme's page background.
        #[cfg(feature = "raster")]
        pub fn render_comparison_png_sync(
            &self,
            view: &ComparisonView,
            raster: &raster::RasterOptions,
        ) -> raster::Result<Vec<u8>> {
            let canvas = match view {
                ComparisonView::Ready(layout) => {
                    reportlens_render::comparison_canvas_size(layout, &self.svg)
                }
                ComparisonView::NoData => reportlens_render::no_data_canvas_size(&self.svg),
            };
            raster::svg_to_png(
                &self.render_comparison_svg_sync(view),
                canvas,
                self.canvas_background(),
                raster,
            )
        }

        #[cfg(feature = "raster")]
        pub fn render_usage_chart_png_sync(
            &self,
            chart: UsageChart,
            usage: &RankedUsage,
            raster: &raster::RasterOptions,
        ) -> raster::Result<Vec<u8>> {
            let layout = self.layout.usage_chart(chart.title(), chart.entries(usage));
            let svg = reportlens_render::render_usage_chart_svg(&layout, chart.bar_fill(), &self.svg);
            raster::svg_to_png(
                &svg,
                reportlens_render::usage_chart_canvas_size(&layout, &self.svg),
                self.canvas_background(),
                raster,
            )
        }
    }
}
