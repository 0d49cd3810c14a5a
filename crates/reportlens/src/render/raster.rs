//! PNG output for the headless views.
//!
//! The pixmap is sized from the layout's [`CanvasSize`] and pre-filled with the theme's page
//! background, so themed renders have no transparent fringe.

use reportlens_render::svg::CanvasSize;

#[derive(Debug, thiserror::Error)]
pub enum RasterError {
    #[error("failed to parse SVG")]
    SvgParse,
    #[error("canvas of {width}x{height} px cannot be allocated")]
    PixmapAlloc { width: u32, height: u32 },
    #[error("failed to encode PNG")]
    PngEncode,
}

pub type Result<T> = std::result::Result<T, RasterError>;

#[derive(Debug, Clone)]
pub struct RasterOptions {
    /// Device pixels per SVG user unit. Non-positive or non-finite values fall back to `1.0`.
    pub scale: f32,
}

impl Default for RasterOptions {
    fn default() -> Self {
        Self { scale: 1.0 }
    }
}

/// Rasterizes `svg` onto a `canvas`-sized pixmap filled with `background` (a `#rgb` or
/// `#rrggbb` palette color; anything else leaves the pixmap transparent).
pub fn svg_to_png(
    svg: &str,
    canvas: CanvasSize,
    background: &str,
    options: &RasterOptions,
) -> Result<Vec<u8>> {
    let mut opt = usvg::Options::default();
    opt.fontdb_mut().load_system_fonts();
    opt.font_family = "Segoe UI".to_string();
    let tree = usvg::Tree::from_str(svg, &opt).map_err(|_| RasterError::SvgParse)?;

    let scale = if options.scale.is_finite() && options.scale > 0.0 {
        options.scale
    } else {
        1.0
    };
    let width = pixel_extent(canvas.width, scale);
    let height = pixel_extent(canvas.height, scale);
    let mut pixmap = tiny_skia::Pixmap::new(width, height)
        .ok_or(RasterError::PixmapAlloc { width, height })?;

    if let Some(color) = palette_color(background) {
        pixmap.fill(color);
    }

    let size = tree.size();
    let transform = tiny_skia::Transform::from_scale(
        width as f32 / size.width(),
        height as f32 / size.height(),
    );
    resvg::render(&tree, transform, &mut pixmap.as_mut());
    tracing::debug!(width, height, "rasterized view");

    pixmap.encode_png().map_err(|_| RasterError::PngEncode)
}

fn pixel_extent(units: f64, scale: f32) -> u32 {
    let units = if units.is_finite() { units } else { 1.0 };
    (units * f64::from(scale)).ceil().max(1.0) as u32
}

fn palette_color(hex: &str) -> Option<tiny_skia::Color> {
    let digits = hex.trim().strip_prefix('#')?;
    let channel = |at: usize, len: usize| u8::from_str_radix(digits.get(at..at + len)?, 16).ok();
    let (r, g, b) = match digits.len() {
        6 => (channel(0, 2)?, channel(2, 2)?, channel(4, 2)?),
        3 => (channel(0, 1)? * 17, channel(1, 1)? * 17, channel(2, 1)? * 17),
        _ => return None,
    };
    Some(tiny_skia::Color::from_rgba8(r, g, b, 255))
}
