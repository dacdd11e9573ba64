//! Frosted-glass tile backdrop.

use image::{RgbaImage, imageops};
use tiny_skia::{
    FilterQuality, IntSize, Paint, Pattern, Pixmap, PixmapPaint, Rect, SpreadMode, Transform,
};

use crate::constants::{GLASS_PADDING_RADII, GLASS_RIM_ALPHA, GLASS_WASH_ALPHA};
use crate::models::Color;
use crate::surface::RenderSession;

/// Gaussian blur of a premultiplied pixmap.
fn blur_pixmap(pixmap: &Pixmap, sigma: f32) -> Option<Pixmap> {
    let image = RgbaImage::from_raw(pixmap.width(), pixmap.height(), pixmap.data().to_vec())?;
    let blurred = imageops::blur(&image, sigma);
    let size = IntSize::from_wh(blurred.width(), blurred.height())?;
    Pixmap::from_vec(blurred.into_raw(), size)
}

/// Blur the `backdrop` region behind one tile into the session, then wash it
/// with translucent white and outline it with a thin rim.
///
/// The region is grown by a few blur radii on every side before blurring so
/// the tile edges average real neighbours instead of transparency.
pub fn render_glass_blur(
    session: &mut RenderSession,
    backdrop: &Pixmap,
    x: f32,
    y: f32,
    tile_size: f32,
    blur: f32,
) {
    if blur <= 0.0 || tile_size <= 0.0 {
        return;
    }
    let pad = blur * GLASS_PADDING_RADII;
    let side = (tile_size + pad * 2.0).ceil() as u32;
    let Some(mut region) = Pixmap::new(side, side) else {
        return;
    };
    region.draw_pixmap(
        0,
        0,
        backdrop.as_ref(),
        &PixmapPaint::default(),
        Transform::from_translate(pad - x, pad - y),
        None,
    );

    match blur_pixmap(&region, blur) {
        Some(blurred) => {
            let mut paint = Paint::default();
            paint.shader = Pattern::new(
                blurred.as_ref(),
                SpreadMode::Pad,
                FilterQuality::Nearest,
                1.0,
                Transform::from_translate(x - pad, y - pad),
            );
            if let Some(rect) = Rect::from_xywh(x, y, tile_size, tile_size) {
                session
                    .pixmap_mut()
                    .fill_rect(rect, &paint, Transform::identity(), None);
            }
        }
        None => log::warn!("glass blur skipped for tile at ({x}, {y})"),
    }

    session.fill_rect(x, y, tile_size, tile_size, Color::white_alpha(GLASS_WASH_ALPHA));
    session.stroke_rect(
        x + 1.0,
        y + 1.0,
        tile_size - 2.0,
        tile_size - 2.0,
        Color::white_alpha(GLASS_RIM_ALPHA),
        1.0,
    );
}
