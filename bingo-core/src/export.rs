//! Export sizing and file naming.

use crate::config::check_dimension;
use crate::constants::{BASE_SPACING_PX, BASE_TILE_PX, MARGIN_FLOOR_PX, MARGIN_TILE_RATIO};
use crate::error::{RenderError, Result};
use crate::models::{PngExportSettings, RenderMode};

/// The settings the on-screen preview renders with.
pub fn preview_settings(settings: &PngExportSettings) -> PngExportSettings {
    PngExportSettings {
        export_scale: 100.0,
        ..settings.clone()
    }
}

/// Export scale at which the exported canvas is `target` pixels on a side.
///
/// The canvas side is linear in the tile size on each side of the point
/// where the tile-proportional margin overtakes the fixed margin, so the
/// proportional branch is tried first and the floor branch otherwise.
pub fn export_scale_for_target(
    dimension: usize,
    settings: &PngExportSettings,
    target: u32,
) -> Result<f32> {
    check_dimension(dimension)?;
    let m = RenderMode::Export.multiplier();
    let d = dimension as f32;
    let side = target as f32;
    let spacing_total = (d + 1.0) * BASE_SPACING_PX * m;

    let tile = if settings.show_labels {
        let floor = MARGIN_FLOOR_PX * m;
        let proportional = (side - spacing_total) / (d + 2.0 * MARGIN_TILE_RATIO);
        if proportional * MARGIN_TILE_RATIO >= floor {
            proportional
        } else {
            (side - spacing_total - 2.0 * floor) / d
        }
    } else {
        (side - spacing_total) / d
    };

    if !tile.is_finite() || tile <= 0.0 {
        return Err(RenderError::ExportTarget(target));
    }
    Ok(tile * 100.0 / (BASE_TILE_PX * m))
}

/// Download name for an exported board.
pub fn export_file_name(target: Option<u32>, timestamp_ms: u64) -> String {
    match target {
        Some(t) => format!("bingo-board-{t}x{t}-{timestamp_ms}.png"),
        None => format!("bingo-board-{timestamp_ms}.png"),
    }
}
