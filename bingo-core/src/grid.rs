use tiny_skia::{LineCap, LineJoin, Paint, PathBuilder, Stroke, Transform};

use crate::config::RenderConfig;
use crate::constants::GRID_MITER_LIMIT;
use crate::models::{PngExportSettings, RenderMode};
use crate::surface::RenderSession;

pub type Segment = ((f32, f32), (f32, f32));

/// Column lines left to right, then row lines top to bottom.
pub fn grid_lines(config: &RenderConfig) -> Vec<Segment> {
    let d = config.dimension as f32;
    let step = config.tile_size + config.spacing;
    let start_x = config.x_offset + config.spacing;
    let start_y = config.y_offset + config.spacing;
    let end_x = start_x + d * config.tile_size + (d - 1.0) * config.spacing;
    let end_y = start_y + d * config.tile_size + (d - 1.0) * config.spacing;

    let columns = (0..=config.dimension).map(|i| {
        let x = start_x + i as f32 * step;
        ((x, start_y), (x, end_y))
    });
    let rows = (0..=config.dimension).map(|i| {
        let y = start_y + i as f32 * step;
        ((start_x, y), (end_x, y))
    });
    columns.chain(rows).collect()
}

/// Stroke every grid line as a single path so shared edges are drawn once.
pub fn render_grid_borders(
    session: &mut RenderSession,
    config: &RenderConfig,
    settings: &PngExportSettings,
    mode: RenderMode,
) {
    if settings.border_thickness <= 0.0 {
        return;
    }
    let mut pb = PathBuilder::new();
    for ((x0, y0), (x1, y1)) in grid_lines(config) {
        pb.move_to(x0, y0);
        pb.line_to(x1, y1);
    }
    let Some(path) = pb.finish() else {
        return;
    };

    let mut paint = Paint::default();
    paint.set_color(settings.border_color.to_skia());
    paint.anti_alias = true;
    let stroke = Stroke {
        width: settings.border_thickness * mode.multiplier(),
        miter_limit: GRID_MITER_LIMIT,
        line_cap: LineCap::Square,
        line_join: LineJoin::Miter,
        ..Default::default()
    };
    session
        .pixmap_mut()
        .stroke_path(&path, &paint, &stroke, Transform::identity(), None);
}
