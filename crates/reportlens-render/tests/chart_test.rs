use reportlens_core::FieldCount;
use reportlens_render::text::DeterministicTextMeasurer;
use reportlens_render::{MOST_USED_TITLE, layout_usage_chart};

fn entry(field: &str, count: usize) -> FieldCount {
    FieldCount {
        field: field.to_string(),
        count,
    }
}

#[test]
fn chart_layout_scales_bars_to_axis() {
    let entries = vec![entry("Sales[Amount]", 6), entry("Product[Category]", 2), entry("X", 1)];
    let layout = layout_usage_chart(MOST_USED_TITLE, &entries, &DeterministicTextMeasurer::default());

    assert_eq!(layout.title, MOST_USED_TITLE);
    assert_eq!(layout.axis_max, 6);
    let tick_values: Vec<usize> = layout.ticks.iter().map(|t| t.value).collect();
    assert_eq!(tick_values, vec![0, 2, 4, 6]);

    assert_eq!(layout.bars.len(), 3);
    let tallest = &layout.bars[0];
    assert!((tallest.height - layout.plot_height).abs() < 1e-9);
    assert!((tallest.y - layout.plot_y).abs() < 1e-9);
    assert!((layout.bars[1].height * 3.0 - tallest.height).abs() < 1e-9);

    for pair in layout.bars.windows(2) {
        assert!(pair[0].x < pair[1].x);
    }
    let last = layout.bars.last().expect("bar");
    assert!(last.x + last.width <= layout.bounds.max_x);
}

#[test]
fn wide_labels_widen_the_bands() {
    let measurer = DeterministicTextMeasurer::default();
    let short = layout_usage_chart("t", &[entry("A", 1)], &measurer);
    let long = layout_usage_chart(
        "t",
        &[entry("VeryLongTableName[VeryLongColumnName]", 1)],
        &measurer,
    );
    assert!(long.plot_width > short.plot_width);
}

#[test]
fn empty_chart_still_has_an_axis() {
    let layout = layout_usage_chart("empty", &[], &DeterministicTextMeasurer::default());
    assert!(layout.bars.is_empty());
    assert_eq!(layout.axis_max, 1);
    assert_eq!(layout.ticks.len(), 2);
}
