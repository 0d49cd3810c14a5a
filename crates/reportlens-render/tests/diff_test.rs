use reportlens_core::{Page, Position, ReportMetadata, Visual, decode_alternate_layout};
use reportlens_render::{VisualChange, count_overlaps, diff_layouts};
use std::path::PathBuf;

fn workspace_root() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("..")
        .join("..")
}

fn visual_at(number: i64, x: f64, y: f64, width: f64, height: f64) -> Visual {
    Visual {
        visual_number: number,
        position: Position::new(x, y, width, height),
        ..Visual::default()
    }
}

#[test]
fn diff_classifies_each_visual_of_the_fixture() {
    let path = workspace_root()
        .join("fixtures")
        .join("reports")
        .join("basic.json");
    let text = std::fs::read_to_string(&path).expect("fixture");
    let metadata: ReportMetadata = serde_json::from_str(&text).expect("report json");
    let alternate = decode_alternate_layout(&metadata.optimal_layout).expect("layout decodes");

    let diff = diff_layouts(&metadata.pages[0], &alternate.pages[0]);

    let changes: Vec<(i64, VisualChange)> = diff
        .visuals
        .iter()
        .map(|v| (v.visual_number, v.change))
        .collect();
    assert_eq!(
        changes,
        vec![
            (1, VisualChange::Unchanged),
            (2, VisualChange::Moved),
            (3, VisualChange::Resized),
            (4, VisualChange::Added),
        ]
    );
    assert_eq!(diff.original_overlaps, 1);
    assert_eq!(diff.alternate_overlaps, 0);
    assert_eq!(diff.count(VisualChange::Added), 1);
    assert_eq!(diff.count(VisualChange::Removed), 0);
}

#[test]
fn visuals_missing_from_alternate_are_removed() {
    let original = Page {
        visuals: vec![visual_at(1, 0.0, 0.0, 10.0, 10.0), visual_at(2, 20.0, 0.0, 10.0, 10.0)],
        ..Page::default()
    };
    let alternate = Page {
        visuals: vec![visual_at(2, 20.3, 0.0, 10.0, 10.0)],
        ..Page::default()
    };
    let diff = diff_layouts(&original, &alternate);
    assert_eq!(diff.visuals[0].change, VisualChange::Removed);
    assert!(diff.visuals[0].alternate.is_none());
    // Within tolerance.
    assert_eq!(diff.visuals[1].change, VisualChange::Unchanged);
}

#[test]
fn moved_and_resized_together() {
    let original = Page {
        visuals: vec![visual_at(7, 0.0, 0.0, 10.0, 10.0)],
        ..Page::default()
    };
    let alternate = Page {
        visuals: vec![visual_at(7, 5.0, 5.0, 20.0, 10.0)],
        ..Page::default()
    };
    let diff = diff_layouts(&original, &alternate);
    assert_eq!(diff.visuals[0].change, VisualChange::MovedAndResized);
}

#[test]
fn touching_edges_are_not_overlaps() {
    let visuals = vec![
        visual_at(1, 0.0, 0.0, 10.0, 10.0),
        visual_at(2, 10.0, 0.0, 10.0, 10.0),
        visual_at(3, 0.0, 10.0, 10.0, 10.0),
    ];
    assert_eq!(count_overlaps(&visuals), 0);

    let visuals = vec![
        visual_at(1, 0.0, 0.0, 10.0, 10.0),
        visual_at(2, 5.0, 5.0, 10.0, 10.0),
        visual_at(3, 8.0, 8.0, 10.0, 10.0),
    ];
    assert_eq!(count_overlaps(&visuals), 3);
}
