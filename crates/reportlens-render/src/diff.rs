//! Visual-by-visual comparison of an original page and its alternate layout.

use crate::geom;
use reportlens_core::{Page, Position, Visual};
use serde::Serialize;

/// Position differences at or below this many report pixels are treated as equal.
pub const POSITION_TOLERANCE: f64 = 0.5;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum VisualChange {
    Unchanged,
    Moved,
    Resized,
    MovedAndResized,
    Removed,
    Added,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct VisualDiff {
    pub visual_number: i64,
    pub visual_type: String,
    pub change: VisualChange,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub original: Option<Position>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub alternate: Option<Position>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LayoutDiff {
    pub visuals: Vec<VisualDiff>,
    /// Pairs of visuals whose rectangles overlap on the original page.
    pub original_overlaps: usize,
    pub alternate_overlaps: usize,
}

impl LayoutDiff {
    pub fn count(&self, change: VisualChange) -> usize {
        self.visuals.iter().filter(|v| v.change == change).count()
    }
}

fn close(a: f64, b: f64) -> bool {
    (a - b).abs() <= POSITION_TOLERANCE
}

fn classify(original: &Position, alternate: &Position) -> VisualChange {
    let moved = !(close(original.x, alternate.x) && close(original.y, alternate.y));
    let resized = !(close(original.width, alternate.width)
        && close(original.height, alternate.height));
    match (moved, resized) {
        (false, false) => VisualChange::Unchanged,
        (true, false) => VisualChange::Moved,
        (false, true) => VisualChange::Resized,
        (true, true) => VisualChange::MovedAndResized,
    }
}

fn to_rect(p: &Position) -> geom::Rect {
    geom::rect(p.x, p.y, p.width, p.height)
}

/// Number of unordered visual pairs whose rectangles share positive area.
pub fn count_overlaps(visuals: &[Visual]) -> usize {
    let rects: Vec<geom::Rect> = visuals.iter().map(|v| to_rect(&v.position)).collect();
    let mut n = 0;
    for (i, a) in rects.iter().enumerate() {
        n += rects[i + 1..]
            .iter()
            .filter(|b| geom::overlaps(a, b))
            .count();
    }
    n
}

/// Matches visuals by `visual_number` (first unmatched occurrence wins) and classifies each.
/// Visuals only on the original page are `Removed`; only on the alternate page, `Added`.
pub fn diff_layouts(original: &Page, alternate: &Page) -> LayoutDiff {
    let mut matched = vec![false; alternate.visuals.len()];
    let mut visuals = Vec::with_capacity(original.visuals.len());

    for visual in &original.visuals {
        let counterpart = alternate
            .visuals
            .iter()
            .enumerate()
            .find(|(i, v)| !matched[*i] && v.visual_number == visual.visual_number);
        let entry = match counterpart {
            Some((i, other)) => {
                matched[i] = true;
                VisualDiff {
                    visual_number: visual.visual_number,
                    visual_type: visual.visual_type.clone(),
                    change: classify(&visual.position, &other.position),
                    original: Some(visual.position),
                    alternate: Some(other.position),
                }
            }
            None => VisualDiff {
                visual_number: visual.visual_number,
                visual_type: visual.visual_type.clone(),
                change: VisualChange::Removed,
                original: Some(visual.position),
                alternate: None,
            },
        };
        visuals.push(entry);
    }

    for (i, other) in alternate.visuals.iter().enumerate() {
        if !matched[i] {
            visuals.push(VisualDiff {
                visual_number: other.visual_number,
                visual_type: other.visual_type.clone(),
                change: VisualChange::Added,
                original: None,
                alternate: Some(other.position),
            });
        }
    }

    LayoutDiff {
        visuals,
        original_overlaps: count_overlaps(&original.visuals),
        alternate_overlaps: count_overlaps(&alternate.visuals),
    }
}
