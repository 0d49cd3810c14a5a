use reportlens::render::{
    ComparisonView, HeadlessRenderer, NO_DATA_TEXT, UsageChart, sanitize_svg_id,
};
use reportlens::{Preferences, ReportMetadata, rank};
use std::path::PathBuf;

fn workspace_root() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("..")
        .join("..")
}

fn load_report(name: &str) -> ReportMetadata {
    let path = workspace_root().join("fixtures").join("reports").join(name);
    let text = std::fs::read_to_string(&path).expect("fixture");
    serde_json::from_str(&text).expect("report json")
}

#[test]
fn sanitize_svg_id_produces_safe_tokens() {
    assert_eq!(sanitize_svg_id("page 1"), "page-1");
    assert_eq!(sanitize_svg_id("0-compare"), "r-0-compare");
    assert_eq!(sanitize_svg_id("   "), "r-untitled");
    assert_eq!(sanitize_svg_id("a//b"), "a-b");
}

#[test]
fn report_comparison_svg_renders_or_falls_back() {
    let metadata = load_report("basic.json");
    let renderer = HeadlessRenderer::new();

    let svg = renderer.render_report_comparison_svg(Some(&metadata), 0, 0.48);
    assert!(svg.contains(">Old Layout<"));
    assert!(svg.contains(">New Layout<"));

    let svg = renderer.render_report_comparison_svg(Some(&metadata), 7, 0.48);
    assert!(svg.contains(NO_DATA_TEXT));

    let svg = renderer.render_report_comparison_svg(None, 0, 0.48);
    assert!(svg.contains(NO_DATA_TEXT));

    let svg = renderer.render_comparison_svg_sync(&ComparisonView::NoData);
    assert!(svg.contains(NO_DATA_TEXT));
}

#[test]
fn renderer_applies_config_overrides() {
    let renderer = HeadlessRenderer::from_config_str(
        r##"{"layout":{"maxScale":2.0},"render":{"paneGap":10},"theme":{"primary":"#00ff00"}}"##,
    )
    .expect("config");
    assert_eq!(renderer.layout.scale_range.max, 2.0);
    assert_eq!(renderer.svg.pane_gap, 10.0);
    assert_eq!(renderer.svg.primary_color, "#00ff00");

    let metadata = load_report("basic.json");
    let layout = renderer
        .layout
        .compare(&metadata, 0, 9.0)
        .expect("page 0");
    assert_eq!(layout.scale, 2.0);
}

#[test]
fn renderer_rejects_bad_config() {
    assert!(HeadlessRenderer::from_config_str("[1, 2]").is_err());
    assert!(HeadlessRenderer::from_config_str(r#"{"layout":{"minScale":5,"maxScale":1}}"#).is_err());
}

#[test]
fn usage_charts_use_their_own_fill() {
    let metadata = load_report("basic.json");
    let usage = rank(&reportlens::aggregate(&metadata.pages));
    let renderer = HeadlessRenderer::new()
        .with_preferences(Preferences { dark_mode: true })
        .with_diagram_id("usage most");

    let most = renderer.render_usage_chart_svg(UsageChart::MostUsed, &usage);
    assert!(most.contains(r#"id="usage-most""#));
    assert!(most.contains("#1976d2"));
    assert!(most.contains(">Most Used Columns<"));

    let least = renderer.render_usage_chart_svg(UsageChart::LeastUsed, &usage);
    assert!(least.contains("#d32f2f"));
    assert!(least.contains(">Least Used Columns<"));
}

#[cfg(feature = "raster")]
fn png_size(png: &[u8]) -> (u32, u32) {
    assert!(png.starts_with(b"\x89PNG\r\n\x1a\n"));
    let be = |at: usize| u32::from_be_bytes([png[at], png[at + 1], png[at + 2], png[at + 3]]);
    (be(16), be(20))
}

#[cfg(feature = "raster")]
#[test]
fn png_output_is_sized_from_the_layout() {
    use reportlens::render::raster::RasterOptions;
    use reportlens::render::{comparison_canvas_size, no_data_canvas_size};

    let metadata = load_report("basic.json");
    let renderer = HeadlessRenderer::new().with_preferences(Preferences { dark_mode: true });
    let layout = renderer.layout.compare(&metadata, 0, 0.48).expect("page 0");
    let canvas = comparison_canvas_size(&layout, &renderer.svg);

    let png = renderer
        .render_comparison_png_sync(&ComparisonView::Ready(layout), &RasterOptions::default())
        .expect("png");
    assert_eq!(
        png_size(&png),
        (canvas.width.ceil() as u32, canvas.height.ceil() as u32)
    );

    let empty = no_data_canvas_size(&renderer.svg);
    let png = renderer
        .render_comparison_png_sync(&ComparisonView::NoData, &RasterOptions { scale: 2.0 })
        .expect("png");
    assert_eq!(
        png_size(&png),
        ((empty.width * 2.0).ceil() as u32, (empty.height * 2.0).ceil() as u32)
    );
}
