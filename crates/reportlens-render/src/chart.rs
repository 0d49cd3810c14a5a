//! Column charts for the ranked most/least used field lists: one vertical bar per field, field
//! labels under the value axis.

use crate::model::{AxisTickLayout, BarChartLayout, BarLayout, Bounds};
use crate::text::{TextMeasurer, TextStyle};
use reportlens_core::FieldCount;

pub const MOST_USED_TITLE: &str = "Most Used Columns";
pub const LEAST_USED_TITLE: &str = "Least Used Columns";

const CHART_HEIGHT: f64 = 300.0;
const PLOT_TOP: f64 = 48.0;
const PLOT_BOTTOM_MARGIN: f64 = 56.0;
const PLOT_LEFT: f64 = 48.0;
const PLOT_RIGHT_MARGIN: f64 = 16.0;
const MIN_BAND_WIDTH: f64 = 72.0;
const BAND_LABEL_PADDING: f64 = 16.0;
const BAR_WIDTH_RATIO: f64 = 0.6;
const LABEL_OFFSET_Y: f64 = 18.0;
const MAX_TICKS: usize = 5;

pub const LABEL_FONT_SIZE: f64 = 12.0;
pub const TITLE_FONT_SIZE: f64 = 16.0;

fn tick_step(axis_max: usize) -> usize {
    axis_max.div_ceil(MAX_TICKS).max(1)
}

pub fn layout_usage_chart(
    title: &str,
    entries: &[FieldCount],
    measurer: &dyn TextMeasurer,
) -> BarChartLayout {
    let label_style = TextStyle {
        font_family: None,
        font_size: LABEL_FONT_SIZE,
        font_weight: None,
    };
    let title_style = TextStyle {
        font_family: None,
        font_size: TITLE_FONT_SIZE,
        font_weight: Some("bold".to_string()),
    };

    let widest_label = entries
        .iter()
        .map(|e| measurer.measure(&e.field, &label_style).width)
        .fold(0.0, f64::max);
    let band = MIN_BAND_WIDTH.max(widest_label + BAND_LABEL_PADDING);

    let plot_x = PLOT_LEFT;
    let plot_y = PLOT_TOP;
    let plot_width = band * entries.len().max(1) as f64;
    let plot_height = CHART_HEIGHT - PLOT_TOP - PLOT_BOTTOM_MARGIN;

    let axis_max = entries.iter().map(|e| e.count).max().unwrap_or(0).max(1);
    let step = tick_step(axis_max);
    let axis_max = axis_max.div_ceil(step) * step;

    let y_for = |value: usize| plot_y + plot_height - (value as f64 / axis_max as f64) * plot_height;

    let ticks = (0..=axis_max)
        .step_by(step)
        .map(|value| AxisTickLayout {
            value,
            y: y_for(value),
        })
        .collect();

    let bar_width = band * BAR_WIDTH_RATIO;
    let bars = entries
        .iter()
        .enumerate()
        .map(|(i, e)| {
            let band_x = plot_x + i as f64 * band;
            let top = y_for(e.count);
            BarLayout {
                field: e.field.clone(),
                count: e.count,
                x: band_x + (band - bar_width) / 2.0,
                y: top,
                width: bar_width,
                height: plot_y + plot_height - top,
                label_x: band_x + band / 2.0,
                label_y: plot_y + plot_height + LABEL_OFFSET_Y,
            }
        })
        .collect();

    let title_width = measurer.measure(title, &title_style).width;
    let width = (plot_x + plot_width + PLOT_RIGHT_MARGIN).max(title_width + 2.0 * PLOT_LEFT);

    BarChartLayout {
        title: title.to_string(),
        bounds: Bounds {
            min_x: 0.0,
            min_y: 0.0,
            max_x: width,
            max_y: CHART_HEIGHT,
        },
        plot_x,
        plot_y,
        plot_width,
        plot_height,
        axis_max,
        ticks,
        bars,
    }
}
