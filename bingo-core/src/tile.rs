use crate::config::RenderConfig;
use crate::constants::{
    IMAGE_TEXT_GAP_RATIO, ITEM_GAP_RATIO, ITEM_GAP_RATIO_THREE, ITEM_IMAGE_RATIO, LINE_HEIGHT,
    MAX_TILE_ITEMS,
};
use crate::fonts::{Baseline, FontBook, TextPaint, TextRun};
use crate::images::ImageCache;
use crate::labels::stroke_width;
use crate::models::{BingoTile, PngExportSettings, RenderMode};
use crate::surface::RenderSession;
use crate::text::{TextBlock, fit_description};

/// Square cell reserved for one item image.
#[derive(Clone, Debug, PartialEq)]
pub struct ImageSlot {
    pub item: String,
    pub x: f32,
    pub y: f32,
    pub size: f32,
}

impl ImageSlot {
    /// Largest rectangle with the image's aspect ratio centered in the slot.
    pub fn letterbox(&self, natural_w: u32, natural_h: u32) -> (f32, f32, f32, f32) {
        let aspect = natural_w as f32 / natural_h as f32;
        if aspect > 1.0 {
            let h = self.size / aspect;
            (self.x, self.y + (self.size - h) / 2.0, self.size, h)
        } else {
            let w = self.size * aspect;
            (self.x + (self.size - w) / 2.0, self.y, w, self.size)
        }
    }
}

/// Where the content of one tile goes.
#[derive(Clone, Debug, PartialEq)]
pub struct TileLayout {
    pub images: Vec<ImageSlot>,
    pub text: Vec<TextRun>,
}

/// Lay out up to three item images in a row above the wrapped description,
/// the whole block centered vertically in the tile at (`x`, `y`).
pub fn layout_tile(tile: &BingoTile, x: f32, y: f32, tile_size: f32, block: &TextBlock) -> TileLayout {
    let items: Vec<&String> = tile.items.iter().take(MAX_TILE_ITEMS).collect();
    let n = items.len();

    let image_size = tile_size * ITEM_IMAGE_RATIO;
    let gap = if n == MAX_TILE_ITEMS {
        tile_size * ITEM_GAP_RATIO_THREE
    } else {
        tile_size * ITEM_GAP_RATIO
    };
    let (images_width, images_height, spacing) = if n > 0 {
        (
            n as f32 * image_size + (n - 1) as f32 * gap,
            image_size,
            tile_size * IMAGE_TEXT_GAP_RATIO,
        )
    } else {
        (0.0, 0.0, 0.0)
    };

    let total = images_height + spacing + block.height();
    let content_top = y + (tile_size - total) / 2.0;
    let images_left = x + (tile_size - images_width) / 2.0;

    let images = items
        .into_iter()
        .enumerate()
        .map(|(i, item)| ImageSlot {
            item: item.clone(),
            x: images_left + i as f32 * (image_size + gap),
            y: content_top,
            size: image_size,
        })
        .collect();

    let size = block.font.size;
    let first_baseline = content_top + images_height + spacing + size;
    let text = block
        .lines
        .iter()
        .enumerate()
        .map(|(i, line)| TextRun {
            text: line.clone(),
            x: x + tile_size / 2.0,
            y: first_baseline + i as f32 * size * LINE_HEIGHT,
            baseline: Baseline::Alphabetic,
            font: block.font.clone(),
        })
        .collect();

    TileLayout { images, text }
}

#[allow(clippy::too_many_arguments)]
pub fn render_tile(
    session: &mut RenderSession,
    fonts: &FontBook,
    cache: &ImageCache,
    tile: &BingoTile,
    x: f32,
    y: f32,
    config: &RenderConfig,
    settings: &PngExportSettings,
    mode: RenderMode,
) {
    if tile.is_empty() {
        return;
    }
    let block = fit_description(&tile.description, config.tile_size, fonts);
    let layout = layout_tile(tile, x, y, config.tile_size, &block);

    for slot in &layout.images {
        let Some(image) = cache.get(&slot.item).filter(|i| i.is_drawable()) else {
            continue;
        };
        let (w, h) = image.natural_size();
        let (dx, dy, dw, dh) = slot.letterbox(w, h);
        session.draw_image(&image.pixmap, dx, dy, dw, dh);
    }

    let paint = TextPaint {
        fill: settings.tile_color,
        stroke: settings.text_stroke_color,
        stroke_width: stroke_width(block.font.size, mode),
    };
    if let Err(e) = fonts.draw_runs(session.pixmap_mut(), &layout.text, &paint) {
        log::warn!("description of tile {} not drawn: {e}", tile.id);
    }
}
