use crate::images::decode_image;
use crate::models::PngExportSettings;
use crate::surface::RenderSession;

/// Destination rectangle `(x, y, w, h)` that scales an image to cover the
/// canvas while keeping its aspect ratio, centered so the overflow is cropped
/// evenly on both sides.
pub fn cover_rect(image_w: f32, image_h: f32, canvas_w: f32, canvas_h: f32) -> (f32, f32, f32, f32) {
    let canvas_aspect = canvas_w / canvas_h;
    let image_aspect = image_w / image_h;
    if image_aspect > canvas_aspect {
        // wider than the canvas: fit height, crop left/right
        let w = canvas_h * image_aspect;
        ((canvas_w - w) / 2.0, 0.0, w, canvas_h)
    } else {
        let h = canvas_w / image_aspect;
        (0.0, (canvas_h - h) / 2.0, canvas_w, h)
    }
}

/// Fill the whole surface with the background color, or cover it with the
/// uploaded image when one decodes.
pub fn render_background(session: &mut RenderSession, settings: &PngExportSettings) {
    let Some(background) = &settings.background_image else {
        session.fill(settings.background_color);
        return;
    };
    match decode_image(&background.bytes) {
        Ok(image) => {
            let (x, y, w, h) = cover_rect(
                image.width() as f32,
                image.height() as f32,
                session.width() as f32,
                session.height() as f32,
            );
            session.draw_image(&image, x, y, w, h);
        }
        Err(e) => {
            log::warn!("background image '{}' unusable, using solid color: {e}", background.name);
            session.fill(settings.background_color);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn wide_image_fits_height_and_crops_sides() {
        assert_eq!(cover_rect(400.0, 100.0, 200.0, 200.0), (-300.0, 0.0, 800.0, 200.0));
    }

    #[test]
    fn tall_image_fits_width_and_crops_top_bottom() {
        assert_eq!(cover_rect(100.0, 400.0, 200.0, 200.0), (0.0, -300.0, 200.0, 800.0));
    }

    #[test]
    fn matching_aspect_fills_exactly() {
        assert_eq!(cover_rect(50.0, 50.0, 200.0, 200.0), (0.0, 0.0, 200.0, 200.0));
    }
}
