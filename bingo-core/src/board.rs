use std::future::Future;

use tiny_skia::Pixmap;

use crate::background::render_background;
use crate::config::{RenderConfig, calculate_render_config, check_dimension};
use crate::error::{RenderError, Result};
use crate::fonts::FontBook;
use crate::glass::render_glass_blur;
use crate::grid::render_grid_borders;
use crate::images::{ImageSource, load_tile_images};
use crate::labels::render_labels;
use crate::models::{BingoTile, PngExportSettings, RenderMode};
use crate::surface::{RenderSession, encode_pixmap_png, pixmap_to_rgba};
use crate::tile::render_tile;

/// Finished frame of one render pass.
pub struct RenderedBoard {
    pub pixmap: Pixmap,
    pub config: RenderConfig,
    /// Items whose images were not drawn.
    pub missing_images: Vec<String>,
}

impl RenderedBoard {
    pub fn width(&self) -> u32 {
        self.pixmap.width()
    }

    pub fn height(&self) -> u32 {
        self.pixmap.height()
    }

    pub fn to_png(&self) -> Result<Vec<u8>> {
        encode_pixmap_png(&self.pixmap)
    }

    pub fn to_rgba(&self) -> Vec<u8> {
        pixmap_to_rgba(&self.pixmap)
    }
}

/// Render a full board: background, labels, glass, tiles, then grid borders.
///
/// Item images are fetched from `source` once labels are drawn; anything not
/// settled when `deadline` fires is left out. Image, background and text
/// failures are logged and skipped. Only bad input or an unallocatable
/// surface fail the render.
pub async fn render_board<S, D>(
    board: &[BingoTile],
    dimension: usize,
    settings: &PngExportSettings,
    mode: RenderMode,
    fonts: &FontBook,
    source: &S,
    deadline: D,
) -> Result<RenderedBoard>
where
    S: ImageSource + ?Sized,
    D: Future<Output = ()>,
{
    check_dimension(dimension)?;
    let expected = dimension * dimension;
    if board.len() != expected {
        return Err(RenderError::BoardLength {
            expected,
            actual: board.len(),
        });
    }

    let config = calculate_render_config(dimension, settings, mode)?;
    let mut session = RenderSession::new(&config)?;
    log::debug!(
        "rendering {dimension}x{dimension} board on {}x{} ({mode:?})",
        session.width(),
        session.height()
    );

    render_background(&mut session, settings);
    render_labels(&mut session, fonts, &config, settings, mode);

    let images = load_tile_images(board, source, deadline).await;

    if settings.glass_blur > 0.0 {
        let blur = settings.glass_blur * mode.multiplier();
        let backdrop = session.pixmap().clone();
        for row in 0..dimension {
            for col in 0..dimension {
                let (x, y) = config.tile_origin(row, col);
                render_glass_blur(&mut session, &backdrop, x, y, config.tile_size, blur);
            }
        }
    }

    for row in 0..dimension {
        for col in 0..dimension {
            let (x, y) = config.tile_origin(row, col);
            let tile = &board[row * dimension + col];
            render_tile(
                &mut session, fonts, &images, tile, x, y, &config, settings, mode,
            );
        }
    }

    render_grid_borders(&mut session, &config, settings, mode);

    Ok(RenderedBoard {
        pixmap: session.finish(),
        config,
        missing_images: images.missing().to_vec(),
    })
}
