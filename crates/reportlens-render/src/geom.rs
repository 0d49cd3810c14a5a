pub type Unit = euclid::UnknownUnit;

pub type Rect = euclid::Rect<f64, Unit>;

pub fn rect(x: f64, y: f64, width: f64, height: f64) -> Rect {
    euclid::rect(x, y, width, height)
}

/// True when the two rectangles share a region of positive area. Touching edges do not count.
pub fn overlaps(a: &Rect, b: &Rect) -> bool {
    a.intersection(b).is_some_and(|r| !r.is_empty())
}

pub(crate) fn finite_or_zero(v: f64) -> f64 {
    if v.is_finite() { v } else { 0.0 }
}
