use crate::chart::{LABEL_FONT_SIZE, TITLE_FONT_SIZE};
use crate::model::{AlternatePane, BarChartLayout, ComparisonLayout, PaneLayout};
use reportlens_core::{LensConfig, Preferences};
use std::fmt::Write as _;

const PANE_HEADER_HEIGHT: f64 = 48.0;
const PANE_PADDING: f64 = 16.0;
const MIN_PANE_WIDTH: f64 = 240.0;
const MIN_PANE_HEIGHT: f64 = 120.0;
const VISUAL_LABEL_MIN_WIDTH: f64 = 40.0;
const VISUAL_LABEL_MIN_HEIGHT: f64 = 28.0;
const NO_DATA_WIDTH: f64 = 480.0;
const NO_DATA_HEIGHT: f64 = 120.0;

pub const ALTERNATE_UNAVAILABLE_TEXT: &str = "No alternate layout available";
pub const NO_DATA_TEXT: &str = "⛔ No metadata found.";

pub const MOST_USED_BAR_FILL: &str = "#1976d2";
pub const LEAST_USED_BAR_FILL: &str = "#d32f2f";

#[derive(Debug, Clone)]
pub struct SvgRenderOptions {
    /// Adds extra space around the computed viewBox.
    pub viewbox_padding: f64,
    /// Root `id` of the document. Each renderer falls back to its own fixed id.
    pub diagram_id: Option<String>,
    /// Horizontal gap between the two comparison panes.
    pub pane_gap: f64,
    pub preferences: Preferences,
    pub primary_color: String,
    /// When true, visuals large enough to hold text are labelled with type and number.
    pub include_visual_labels: bool,
}

impl Default for SvgRenderOptions {
    fn default() -> Self {
        Self {
            viewbox_padding: 8.0,
            diagram_id: None,
            pane_gap: 32.0,
            preferences: Preferences::default(),
            primary_color: "#7c4dff".to_string(),
            include_visual_labels: true,
        }
    }
}

impl SvgRenderOptions {
    pub fn from_config(config: &LensConfig) -> Self {
        let d = Self::default();
        Self {
            viewbox_padding: config
                .get_f64("render.viewboxPadding")
                .unwrap_or(d.viewbox_padding)
                .max(0.0),
            pane_gap: config
                .get_f64("render.paneGap")
                .unwrap_or(d.pane_gap)
                .max(0.0),
            primary_color: config
                .get_str("theme.primary")
                .map(str::to_string)
                .unwrap_or(d.primary_color),
            ..d
        }
    }

    pub fn with_preferences(mut self, preferences: Preferences) -> Self {
        self.preferences = preferences;
        self
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Palette {
    pub background: &'static str,
    pub pane_background: &'static str,
    pub pane_border: &'static str,
    pub text: &'static str,
    pub muted_text: &'static str,
    pub visual_fill: &'static str,
    pub visual_stroke: &'static str,
    pub grid: &'static str,
}

impl Palette {
    pub fn for_preferences(preferences: Preferences) -> Self {
        if preferences.dark_mode {
            Self {
                background: "#121212",
                pane_background: "#1e1e1e",
                pane_border: "#aaa",
                text: "#fff",
                muted_text: "#ccc",
                visual_fill: "#333",
                visual_stroke: "#999",
                grid: "#888",
            }
        } else {
            Self {
                background: "#f0f0f0",
                pane_background: "#f9f9f9",
                pane_border: "#aaa",
                text: "#000",
                muted_text: "#555",
                visual_fill: "#fff",
                visual_stroke: "#999",
                grid: "#ccc",
            }
        }
    }
}

/// Full extent of a rendered document in user units, viewBox padding included.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CanvasSize {
    pub width: f64,
    pub height: f64,
}

impl CanvasSize {
    fn padded(width: f64, height: f64, padding: f64) -> Self {
        Self {
            width: width + 2.0 * padding,
            height: height + 2.0 * padding,
        }
    }
}

struct PaneBox {
    width: f64,
    height: f64,
}

struct ComparisonFrame {
    original: PaneBox,
    alternate: PaneBox,
    alternate_x: f64,
    width: f64,
    height: f64,
}

fn comparison_frame(layout: &ComparisonLayout, pane_gap: f64) -> ComparisonFrame {
    let original = pane_box(&layout.original);
    let alternate = match &layout.alternate {
        AlternatePane::Resolved(pane) => pane_box(pane),
        AlternatePane::Unavailable => PaneBox {
            width: MIN_PANE_WIDTH + 2.0 * PANE_PADDING,
            height: original.height,
        },
    };
    let alternate_x = original.width + pane_gap;
    ComparisonFrame {
        width: alternate_x + alternate.width,
        height: original.height.max(alternate.height),
        original,
        alternate,
        alternate_x,
    }
}

fn usage_chart_extent(layout: &BarChartLayout) -> (f64, f64) {
    (layout.bounds.width().max(1.0), layout.bounds.height().max(1.0))
}

pub fn comparison_canvas_size(layout: &ComparisonLayout, options: &SvgRenderOptions) -> CanvasSize {
    let frame = comparison_frame(layout, options.pane_gap);
    CanvasSize::padded(frame.width, frame.height, options.viewbox_padding)
}

pub fn usage_chart_canvas_size(layout: &BarChartLayout, options: &SvgRenderOptions) -> CanvasSize {
    let (width, height) = usage_chart_extent(layout);
    CanvasSize::padded(width, height, options.viewbox_padding)
}

pub fn no_data_canvas_size(options: &SvgRenderOptions) -> CanvasSize {
    CanvasSize::padded(NO_DATA_WIDTH, NO_DATA_HEIGHT, options.viewbox_padding)
}

fn pane_box(pane: &PaneLayout) -> PaneBox {
    PaneBox {
        width: pane.extent_width.max(MIN_PANE_WIDTH) + 2.0 * PANE_PADDING,
        height: pane.extent_height.max(MIN_PANE_HEIGHT) + PANE_HEADER_HEIGHT + PANE_PADDING,
    }
}

fn open_svg(out: &mut String, id: &str, width: f64, height: f64, padding: f64, role: &str) {
    let _ = write!(
        out,
        r#"<svg id="{id}" width="100%" xmlns="http://www.w3.org/2000/svg" viewBox="{min_x} {min_y} {w} {h}" style="max-width: {w}px;" role="graphics-document document" aria-roledescription="{role}">"#,
        id = escape_xml(id),
        min_x = fmt(-padding),
        min_y = fmt(-padding),
        w = fmt(width + 2.0 * padding),
        h = fmt(height + 2.0 * padding),
        role = escape_xml(role),
    );
}

fn write_background(out: &mut String, width: f64, height: f64, padding: f64, fill: &str) {
    let _ = write!(
        out,
        r#"<rect class="background" x="{x}" y="{y}" width="{w}" height="{h}" fill="{fill}"/>"#,
        x = fmt(-padding),
        y = fmt(-padding),
        w = fmt(width + 2.0 * padding),
        h = fmt(height + 2.0 * padding),
        fill = escape_xml(fill),
    );
}

fn write_pane_frame(
    out: &mut String,
    class: &str,
    title: &str,
    frame: &PaneBox,
    offset_x: f64,
    palette: &Palette,
) {
    let _ = write!(
        out,
        r#"<g class="pane {class}" transform="translate({x},0)">"#,
        class = escape_xml(class),
        x = fmt(offset_x),
    );
    let _ = write!(
        out,
        r#"<rect class="pane-frame" x="0" y="0" width="{w}" height="{h}" rx="12" fill="{fill}" stroke="{stroke}" stroke-width="2" stroke-dasharray="6 4"/>"#,
        w = fmt(frame.width),
        h = fmt(frame.height),
        fill = palette.pane_background,
        stroke = palette.pane_border,
    );
    let _ = write!(
        out,
        r#"<text class="pane-title" x="{x}" y="{y}" text-anchor="middle" font-size="{size}" font-weight="bold" fill="{fill}">{text}</text>"#,
        x = fmt(frame.width / 2.0),
        y = fmt(PANE_HEADER_HEIGHT / 2.0 + TITLE_FONT_SIZE / 2.0),
        size = fmt(TITLE_FONT_SIZE),
        fill = palette.text,
        text = escape_xml(title),
    );
}

fn write_pane_visuals(out: &mut String, pane: &PaneLayout, palette: &Palette, labels: bool) {
    // Each pane's overlay has its own origin; coordinates are never normalized across panes.
    let _ = write!(
        out,
        r#"<g class="overlay" transform="translate({x},{y})">"#,
        x = fmt(PANE_PADDING),
        y = fmt(PANE_HEADER_HEIGHT),
    );
    for visual in &pane.visuals {
        let r = &visual.rect;
        let _ = write!(
            out,
            r#"<g class="visual" data-visual-number="{n}"><title>{tooltip}</title><rect x="{x}" y="{y}" width="{w}" height="{h}" rx="4" fill="{fill}" stroke="{stroke}" stroke-width="1"/>"#,
            n = visual.visual_number,
            tooltip = escape_xml(&format!("{} #{}", visual.visual_type, visual.visual_number)),
            x = fmt(r.left),
            y = fmt(r.top),
            w = fmt(r.width),
            h = fmt(r.height),
            fill = palette.visual_fill,
            stroke = palette.visual_stroke,
        );
        if labels && r.width >= VISUAL_LABEL_MIN_WIDTH && r.height >= VISUAL_LABEL_MIN_HEIGHT {
            let _ = write!(
                out,
                r#"<text x="{x}" y="{y1}" font-size="11" font-weight="bold" fill="{fill}">{ty}</text><text x="{x}" y="{y2}" font-size="10" fill="{muted}">#{n}</text>"#,
                x = fmt(r.left + 4.0),
                y1 = fmt(r.top + 13.0),
                y2 = fmt(r.top + 25.0),
                fill = palette.text,
                muted = palette.muted_text,
                ty = escape_xml(&visual.visual_type),
                n = visual.visual_number,
            );
        }
        out.push_str("</g>");
    }
    out.push_str("</g>");
}

/// Renders the two panes side by side: the original page on the left, the alternate on the
/// right (or a placeholder when the alternate layout could not be resolved).
pub fn render_comparison_svg(layout: &ComparisonLayout, options: &SvgRenderOptions) -> String {
    let palette = Palette::for_preferences(options.preferences);
    let diagram_id = options.diagram_id.as_deref().unwrap_or("reportlens-compare");

    let ComparisonFrame {
        original: original_box,
        alternate: alternate_box,
        alternate_x,
        width,
        height,
    } = comparison_frame(layout, options.pane_gap);

    let mut out = String::new();
    open_svg(
        &mut out,
        diagram_id,
        width,
        height,
        options.viewbox_padding,
        "layout-comparison",
    );
    write_background(
        &mut out,
        width,
        height,
        options.viewbox_padding,
        palette.background,
    );

    write_pane_frame(
        &mut out,
        "pane-original",
        &layout.original.title,
        &original_box,
        0.0,
        &palette,
    );
    write_pane_visuals(
        &mut out,
        &layout.original,
        &palette,
        options.include_visual_labels,
    );
    out.push_str("</g>");

    match &layout.alternate {
        AlternatePane::Resolved(pane) => {
            write_pane_frame(
                &mut out,
                "pane-alternate",
                &pane.title,
                &alternate_box,
                alternate_x,
                &palette,
            );
            write_pane_visuals(&mut out, pane, &palette, options.include_visual_labels);
        }
        AlternatePane::Unavailable => {
            write_pane_frame(
                &mut out,
                "pane-alternate pane-unavailable",
                crate::compare::ALTERNATE_PANE_TITLE,
                &alternate_box,
                alternate_x,
                &palette,
            );
            let _ = write!(
                &mut out,
                r#"<text class="placeholder" x="{x}" y="{y}" text-anchor="middle" font-size="{size}" fill="{fill}">{text}</text>"#,
                x = fmt(alternate_box.width / 2.0),
                y = fmt(PANE_HEADER_HEIGHT + (alternate_box.height - PANE_HEADER_HEIGHT) / 2.0),
                size = fmt(LABEL_FONT_SIZE),
                fill = palette.muted_text,
                text = ALTERNATE_UNAVAILABLE_TEXT,
            );
        }
    }
    out.push_str("</g>");

    out.push_str("</svg>");
    out
}

pub fn render_usage_chart_svg(
    layout: &BarChartLayout,
    bar_fill: &str,
    options: &SvgRenderOptions,
) -> String {
    let palette = Palette::for_preferences(options.preferences);
    let diagram_id = options.diagram_id.as_deref().unwrap_or("reportlens-usage");
    let (width, height) = usage_chart_extent(layout);

    let mut out = String::new();
    open_svg(
        &mut out,
        diagram_id,
        width,
        height,
        options.viewbox_padding,
        "bar-chart",
    );
    write_background(
        &mut out,
        width,
        height,
        options.viewbox_padding,
        palette.pane_background,
    );

    let _ = write!(
        &mut out,
        r#"<text class="chart-title" x="{x}" y="{y}" font-size="{size}" font-weight="bold" fill="{fill}">{text}</text>"#,
        x = fmt(layout.plot_x),
        y = fmt(layout.plot_y / 2.0 + TITLE_FONT_SIZE / 2.0),
        size = fmt(TITLE_FONT_SIZE),
        fill = escape_xml(&options.primary_color),
        text = escape_xml(&layout.title),
    );

    out.push_str(r#"<g class="grid">"#);
    for tick in &layout.ticks {
        let _ = write!(
            &mut out,
            r#"<line x1="{x1}" y1="{y}" x2="{x2}" y2="{y}" stroke="{stroke}" stroke-dasharray="3 3"/><text x="{tx}" y="{ty}" text-anchor="end" font-size="{size}" fill="{fill}">{v}</text>"#,
            x1 = fmt(layout.plot_x),
            x2 = fmt(layout.plot_x + layout.plot_width),
            y = fmt(tick.y),
            stroke = palette.grid,
            tx = fmt(layout.plot_x - 6.0),
            ty = fmt(tick.y + LABEL_FONT_SIZE / 3.0),
            size = fmt(LABEL_FONT_SIZE),
            fill = palette.text,
            v = tick.value,
        );
    }
    out.push_str("</g>");

    out.push_str(r#"<g class="bars">"#);
    for bar in &layout.bars {
        let _ = write!(
            &mut out,
            r#"<g class="bar"><title>{tooltip}</title><rect x="{x}" y="{y}" width="{w}" height="{h}" fill="{fill}"/><text x="{lx}" y="{ly}" text-anchor="middle" font-size="{size}" fill="{text_fill}">{label}</text></g>"#,
            tooltip = escape_xml(&format!("{}: {}", bar.field, bar.count)),
            x = fmt(bar.x),
            y = fmt(bar.y),
            w = fmt(bar.width),
            h = fmt(bar.height),
            fill = escape_xml(bar_fill),
            lx = fmt(bar.label_x),
            ly = fmt(bar.label_y),
            size = fmt(LABEL_FONT_SIZE),
            text_fill = palette.text,
            label = escape_xml(&bar.field),
        );
    }
    out.push_str("</g>");

    let _ = write!(
        &mut out,
        r#"<line class="axis" x1="{x1}" y1="{y}" x2="{x2}" y2="{y}" stroke="{stroke}"/>"#,
        x1 = fmt(layout.plot_x),
        x2 = fmt(layout.plot_x + layout.plot_width),
        y = fmt(layout.plot_y + layout.plot_height),
        stroke = palette.text,
    );

    out.push_str("</svg>");
    out
}

/// Placeholder document for views that have no metadata (or an out-of-range page) to show.
pub fn render_no_data_svg(message: &str, options: &SvgRenderOptions) -> String {
    let palette = Palette::for_preferences(options.preferences);
    let diagram_id = options.diagram_id.as_deref().unwrap_or("reportlens-empty");
    let width = NO_DATA_WIDTH;
    let height = NO_DATA_HEIGHT;

    let mut out = String::new();
    open_svg(
        &mut out,
        diagram_id,
        width,
        height,
        options.viewbox_padding,
        "placeholder",
    );
    write_background(
        &mut out,
        width,
        height,
        options.viewbox_padding,
        palette.background,
    );
    let _ = write!(
        &mut out,
        r#"<text class="placeholder" x="{x}" y="{y}" text-anchor="middle" font-size="{size}" fill="{fill}">{text}</text>"#,
        x = fmt(width / 2.0),
        y = fmt(height / 2.0),
        size = fmt(TITLE_FONT_SIZE),
        fill = palette.text,
        text = escape_xml(message),
    );
    out.push_str("</svg>");
    out
}

fn fmt(v: f64) -> String {
    // Round-trippable decimal form without `-0` or tiny float noise from our own arithmetic.
    if !v.is_finite() {
        return "0".to_string();
    }

    let mut v = if v.abs() < 1e-9 { 0.0 } else { v };
    let nearest = v.round();
    if (v - nearest).abs() < 1e-6 {
        v = nearest;
    }
    let s = v.to_string();
    if s == "-0" { "0".to_string() } else { s }
}

fn escape_xml(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for ch in text.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(ch),
        }
    }
    out
}
