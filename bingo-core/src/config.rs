use crate::constants::{BASE_SPACING_PX, BASE_TILE_PX, MARGIN_FLOOR_PX, MARGIN_TILE_RATIO};
use crate::error::{RenderError, Result};
use crate::models::{PngExportSettings, RenderMode};

pub const MIN_DIMENSION: usize = 3;
pub const MAX_DIMENSION: usize = 7;

/// Absolute pixel geometry of one render pass.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct RenderConfig {
    pub dimension: usize,
    /// 1 for preview, 2 for export.
    pub multiplier: f32,
    pub tile_size: f32,
    pub spacing: f32,
    pub board_size: f32,
    pub margin_area_size: f32,
    pub letter_area_height: f32,
    pub row_number_area_width: f32,
    pub x_offset: f32,
    pub y_offset: f32,
    pub extra_padding_height: f32,
    pub extra_padding_width: f32,
}

impl RenderConfig {
    pub fn canvas_width(&self) -> f32 {
        self.board_size + self.row_number_area_width + self.extra_padding_width
    }

    pub fn canvas_height(&self) -> f32 {
        self.board_size + self.letter_area_height + self.extra_padding_height
    }

    /// Canvas size in whole pixels. Rounded in preview pixels and scaled
    /// back up, so an export is always exactly twice its preview.
    pub fn canvas_px(&self) -> (u32, u32) {
        let whole = |len: f32| ((len / self.multiplier).round().max(1.0) * self.multiplier) as u32;
        (whole(self.canvas_width()), whole(self.canvas_height()))
    }

    /// Top-left corner of the tile at (`row`, `col`).
    pub fn tile_origin(&self, row: usize, col: usize) -> (f32, f32) {
        let step = self.tile_size + self.spacing;
        (
            self.x_offset + self.spacing + col as f32 * step,
            self.y_offset + self.spacing + row as f32 * step,
        )
    }
}

pub fn check_dimension(dimension: usize) -> Result<()> {
    if (MIN_DIMENSION..=MAX_DIMENSION).contains(&dimension) {
        Ok(())
    } else {
        Err(RenderError::Dimension(dimension))
    }
}

/// Compute render geometry. Pure; identical inputs give identical output.
///
/// The label margin is `max(80 * multiplier, tile * 0.6)`, so an export is
/// exactly twice the preview for the same export scale.
pub fn calculate_render_config(
    dimension: usize,
    settings: &PngExportSettings,
    mode: RenderMode,
) -> Result<RenderConfig> {
    check_dimension(dimension)?;
    let multiplier = mode.multiplier();
    let base_tile_size = BASE_TILE_PX * (settings.export_scale / 100.0);
    let tile_size = base_tile_size * multiplier;
    let spacing = BASE_SPACING_PX * multiplier;
    let d = dimension as f32;
    let board_size = d * tile_size + (d + 1.0) * spacing;

    let margin_area_size = (MARGIN_FLOOR_PX * multiplier).max(tile_size * MARGIN_TILE_RATIO);
    let label_area = if settings.show_labels {
        margin_area_size
    } else {
        0.0
    };

    Ok(RenderConfig {
        dimension,
        multiplier,
        tile_size,
        spacing,
        board_size,
        margin_area_size,
        letter_area_height: label_area,
        row_number_area_width: label_area,
        x_offset: label_area,
        y_offset: label_area,
        // mirrors the label area so bottom/right margins match top/left
        extra_padding_height: label_area,
        extra_padding_width: label_area,
    })
}
