use reportlens::render::{AnalysisView, ComparisonView, LayoutView, ScaleRange};
use reportlens::{MemoryStore, MetadataStore, Preferences, ReportMetadata};
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

fn store_with(name: &str) -> MetadataStore<MemoryStore> {
    let mut store = MetadataStore::new(MemoryStore::new());
    store.save(&load_report(name)).expect("save");
    store
}

#[test]
fn analysis_view_ranks_usage_from_store() {
    let store = store_with("basic.json");
    let view = AnalysisView::load(&store, 5);

    assert!(view.has_data());
    assert_eq!(view.tally().get("Sales[Amount]"), Some(6));
    assert_eq!(view.tally().get("Sales[Quantity]"), Some(1));
    assert_eq!(view.usage().most_used[0].field, "Sales[Amount]");
    assert_eq!(view.usage().least_used[0].field, "Sales[Quantity]");
    assert_eq!(view.usage().most_used.len(), 4);
}

#[test]
fn analysis_view_respects_top_n() {
    let store = store_with("basic.json");
    let view = AnalysisView::load(&store, 2);
    assert_eq!(view.usage().most_used.len(), 2);
    assert_eq!(view.usage().least_used.len(), 2);
}

#[test]
fn analysis_view_page_selection_ignores_out_of_range() {
    let store = store_with("basic.json");
    let mut view = AnalysisView::load(&store, 5);

    assert_eq!(view.selected_page_index(), 0);
    assert!(view.select_page(1));
    assert_eq!(view.selected_page().map(|p| p.page_name.as_str()), Some("Details"));
    assert!(!view.select_page(9));
    assert_eq!(view.selected_page_index(), 1);
}

#[test]
fn analysis_view_without_metadata_has_no_data() {
    let store = MetadataStore::new(MemoryStore::new());
    let mut view = AnalysisView::load(&store, 5);
    assert!(!view.has_data());
    assert!(view.usage().most_used.is_empty());
    assert!(view.usage().least_used.is_empty());
    assert!(!view.select_page(0));
}

#[test]
fn suggestions_are_hidden_until_toggled() {
    let store = store_with("basic.json");
    let mut view = AnalysisView::load(&store, 5);
    assert_eq!(view.suggestions(), None);
    view.toggle_suggestions();
    assert!(view.show_suggestions());
    assert!(view.suggestions().is_some_and(|s| s.contains("Sales[Quantity]")));
}

#[test]
fn suggestions_drop_markdown_emphasis() {
    let mut metadata = load_report("basic.json");
    metadata.suggestions = "**Remove** the *unused* column Sales[Quantity].".to_string();
    let mut view = AnalysisView::new(Some(metadata), Preferences::default(), 5);
    view.toggle_suggestions();
    assert_eq!(
        view.suggestions().as_deref(),
        Some("Remove the unused column Sales[Quantity].")
    );
}

#[test]
fn dark_mode_toggle_persists_across_views() {
    let mut store = store_with("basic.json");
    let mut analysis = AnalysisView::load(&store, 5);
    assert_eq!(analysis.preferences(), Preferences::default());

    let prefs = analysis.toggle_dark_mode(&mut store).expect("toggle");
    assert!(prefs.dark_mode);

    let layout = LayoutView::load(&store, "0", ScaleRange::default());
    assert!(layout.preferences().dark_mode);
}

#[test]
fn layout_view_starts_at_default_scale_and_clamps() {
    let store = store_with("basic.json");
    let mut view = LayoutView::load(&store, "0", ScaleRange::default());
    assert_eq!(view.scale(), 0.48);
    assert_eq!(view.set_scale(0.0), 0.1);
    assert_eq!(view.set_scale(100.0), 10.0);
    assert_eq!(view.set_scale(f64::NAN), 0.48);
    assert!((view.nudge_scale(2) - 0.5).abs() < 1e-9);
}

#[test]
fn layout_view_renders_both_panes_for_valid_page() {
    let store = store_with("basic.json");
    let view = LayoutView::load(&store, "0", ScaleRange::default());
    let ComparisonView::Ready(layout) = view.comparison() else {
        panic!("expected a comparison");
    };
    assert_eq!(layout.original.visuals.len(), 3);
    assert!(layout.alternate.as_resolved().is_some());
    assert_eq!(layout.scale, 0.48);
}

#[test]
fn layout_view_without_data_or_with_bad_index_is_no_data() {
    let empty = MetadataStore::new(MemoryStore::new());
    let view = LayoutView::load(&empty, "0", ScaleRange::default());
    assert_eq!(view.comparison(), ComparisonView::NoData);

    let store = store_with("basic.json");
    for param in ["2", "-1", "abc", ""] {
        let view = LayoutView::load(&store, param, ScaleRange::default());
        assert_eq!(view.comparison(), ComparisonView::NoData, "param {param:?}");
    }
}

#[test]
fn malformed_alternate_keeps_original_pane() {
    let store = store_with("malformed_layout.json");
    let view = LayoutView::load(&store, "0", ScaleRange::default());
    let layout = view.comparison();
    let layout = layout.layout().expect("original page still renders");
    assert!(layout.alternate.as_resolved().is_none());
    assert_eq!(layout.original.visuals.len(), 3);
}
