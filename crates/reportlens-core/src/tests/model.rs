use crate::{Page, Position, Preferences, ReportMetadata, Visual};
use serde_json::json;

#[test]
fn decodes_producer_snake_case_document() {
    let metadata = super::scenario_metadata();
    assert_eq!(metadata.theme, "CY24SU06");
    assert_eq!(metadata.version, "5.55");
    assert_eq!(metadata.pages.len(), 2);
    assert_eq!(metadata.visual_count(), 3);

    let visual = &metadata.pages[0].visuals[2];
    assert_eq!(visual.visual_number, 3);
    assert_eq!(visual.visual_type, "clusteredBarChart");
    assert_eq!(visual.position, Position::new(10.0, 80.0, 210.0, 200.0));
    assert_eq!(visual.projections["category"], vec!["B".to_string()]);
    assert_eq!(visual.field_reference_count(), 2);
}

#[test]
fn null_and_missing_position_members_become_zero() {
    let visual: Visual = serde_json::from_value(json!({
        "visual_number": 4,
        "position": { "x": null, "y": "12.5", "width": 30 }
    }))
    .unwrap();
    assert_eq!(visual.position, Position::new(0.0, 12.5, 30.0, 0.0));
    assert_eq!(visual.visual_type, "Unknown");
    assert!(visual.projections.is_empty());
    assert!(visual.query_fields.is_empty());
}

#[test]
fn missing_position_defaults_to_origin() {
    let visual: Visual = serde_json::from_value(json!({ "visual_number": 1 })).unwrap();
    assert_eq!(visual.position, Position::default());
}

#[test]
fn null_suggestions_and_layout_decode_as_empty() {
    let metadata: ReportMetadata = serde_json::from_value(json!({
        "theme": null,
        "pages": [{ "page_number": 1, "page_name": "P", "visuals": [] }],
        "suggestions": null,
        "optimal_layout": null
    }))
    .unwrap();
    assert_eq!(metadata.theme, "Unknown");
    assert_eq!(metadata.version, "Unknown");
    assert_eq!(metadata.suggestions, "");
    assert_eq!(metadata.optimal_layout, "");
    assert!(!metadata.has_suggestions());
}

#[test]
fn page_length_is_accepted_for_page_height() {
    let page: Page = serde_json::from_value(json!({
        "page_width": 1280,
        "page_length": 720,
        "visuals": []
    }))
    .unwrap();
    assert_eq!(page.page_width, Some(1280.0));
    assert_eq!(page.page_height, Some(720.0));
}

#[test]
fn wrong_shape_is_rejected() {
    let err = serde_json::from_value::<ReportMetadata>(json!({ "pages": { "visuals": [] } }));
    assert!(err.is_err());

    let err = serde_json::from_value::<Visual>(json!({ "position": { "x": [1, 2] } }));
    assert!(err.is_err());

    let err = serde_json::from_value::<ReportMetadata>(json!({ "theme": "x" }));
    assert!(err.is_err(), "pages is required");
}

#[test]
fn page_title_falls_back_to_number() {
    let page = Page {
        page_number: 3,
        ..Page::default()
    };
    assert_eq!(page.title(), "Page 3");

    let page = Page {
        page_number: 1,
        page_name: "Sales".to_string(),
        ..Page::default()
    };
    assert_eq!(page.title(), "Page 1: Sales");
}

#[test]
fn preferences_theme_literal() {
    assert!(Preferences::from_theme_literal("dark").dark_mode);
    assert!(!Preferences::from_theme_literal("light").dark_mode);
    assert!(!Preferences::from_theme_literal("solarized").dark_mode);
    assert_eq!(Preferences { dark_mode: true }.theme_literal(), "dark");
    assert_eq!(Preferences::default().toggled().theme_literal(), "dark");
}
