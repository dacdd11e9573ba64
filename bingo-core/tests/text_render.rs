//! Text reaching the surface. Needs at least one installed font face; the
//! tests return early on hosts without any.

use bingo_core::config::calculate_render_config;
use bingo_core::fonts::{Baseline, TextPaint, TextRun};
use bingo_core::labels::label_runs;
use bingo_core::text::{FontSpec, TextMeasure, fit_description};
use bingo_core::tile::layout_tile;
use bingo_core::{
    BingoTile, Color, FontBook, ImageSource, PngExportSettings, RenderError, RenderMode,
    render_board,
};
use futures::executor::block_on;
use futures::future::pending;
use tiny_skia::Pixmap;

struct NoImages;

impl ImageSource for NoImages {
    async fn fetch(&self, item: &str) -> bingo_core::Result<Vec<u8>> {
        Err(RenderError::Fetch(item.to_string()))
    }
}

fn system_fonts() -> Option<FontBook> {
    let fonts = FontBook::with_system_fonts();
    if fonts.has_faces() {
        Some(fonts)
    } else {
        eprintln!("no font faces installed, skipping");
        None
    }
}

fn count(pixmap: &Pixmap, x0: f32, y0: f32, x1: f32, y1: f32, pred: impl Fn(u8, u8, u8) -> bool) -> usize {
    let x0 = x0.max(0.0) as u32;
    let y0 = y0.max(0.0) as u32;
    let x1 = (x1 as u32).min(pixmap.width());
    let y1 = (y1 as u32).min(pixmap.height());
    let mut n = 0;
    for y in y0..y1 {
        for x in x0..x1 {
            if let Some(px) = pixmap.pixel(x, y) {
                let c = px.demultiply();
                if pred(c.red(), c.green(), c.blue()) {
                    n += 1;
                }
            }
        }
    }
    n
}

fn white(r: u8, g: u8, b: u8) -> bool {
    r > 200 && g > 200 && b > 200
}

fn board_with(d: usize, index: usize, tile: BingoTile) -> Vec<BingoTile> {
    let mut board: Vec<BingoTile> = (0..d * d)
        .map(|i| BingoTile::new(&i.to_string(), "", &[]))
        .collect();
    board[index] = tile;
    board
}

fn white_text_settings(show_labels: bool) -> PngExportSettings {
    PngExportSettings {
        background_color: Color::BLACK,
        text_stroke_color: Color::WHITE,
        tile_color: Color::WHITE,
        border_thickness: 0.0,
        show_labels,
        export_scale: 100.0,
        ..PngExportSettings::for_dimension(3)
    }
}

#[test]
fn labels_are_drawn_at_their_runs() {
    let Some(fonts) = system_fonts() else {
        return;
    };
    let settings = white_text_settings(true);
    let board = board_with(3, 0, BingoTile::new("0", "", &[]));
    let out = block_on(render_board(
        &board,
        3,
        &settings,
        RenderMode::Preview,
        &fonts,
        &NoImages,
        pending(),
    ))
    .unwrap();

    let config = calculate_render_config(3, &settings, RenderMode::Preview).unwrap();
    let runs = label_runs(&config, &settings);
    assert_eq!(runs.len(), 6);
    for run in &runs {
        let half = run.font.size * 0.6;
        let lit = count(&out.pixmap, run.x - half, run.y - half, run.x + half, run.y + half, white);
        assert!(lit > 0, "label '{}' missing at ({}, {})", run.text, run.x, run.y);
    }
    // top-left corner between the two label strips stays empty
    let corner = config.row_number_area_width;
    assert_eq!(count(&out.pixmap, 0.0, 0.0, corner, corner, white), 0);
}

#[test]
fn description_is_drawn_inside_its_tile() {
    let Some(fonts) = system_fonts() else {
        return;
    };
    let settings = white_text_settings(false);
    let tile = BingoTile::new("4", "Dragon", &[]);
    let board = board_with(3, 4, tile.clone());
    let out = block_on(render_board(
        &board,
        3,
        &settings,
        RenderMode::Preview,
        &fonts,
        &NoImages,
        pending(),
    ))
    .unwrap();

    let config = calculate_render_config(3, &settings, RenderMode::Preview).unwrap();
    let (x, y) = config.tile_origin(1, 1);
    let block = fit_description(&tile.description, config.tile_size, &fonts);
    let layout = layout_tile(&tile, x, y, config.tile_size, &block);
    let run = &layout.text[0];
    let half_w = fonts.measure(&run.text, &run.font) / 2.0 + 2.0;
    let lit = count(
        &out.pixmap,
        run.x - half_w,
        run.y - run.font.size,
        run.x + half_w,
        run.y + run.font.size * 0.3,
        white,
    );
    assert!(lit > 0, "description missing around ({}, {})", run.x, run.y);

    // neighbouring empty tile has no text
    let (nx, ny) = config.tile_origin(0, 0);
    let side = config.tile_size;
    assert_eq!(count(&out.pixmap, nx, ny, nx + side, ny + side, white), 0);
}

#[test]
fn fill_is_painted_over_the_outline() {
    let Some(fonts) = system_fonts() else {
        return;
    };
    let run = TextRun {
        text: "H".to_string(),
        x: 100.0,
        y: 60.0,
        baseline: Baseline::Middle,
        font: FontSpec::new("sans-serif", 80.0),
    };
    let red = |r: u8, g: u8, _b: u8| r > 200 && g < 60;
    let draw = |stroke_width: f32| {
        let mut pixmap = Pixmap::new(200, 120).unwrap();
        pixmap.fill(tiny_skia::Color::BLACK);
        let paint = TextPaint {
            fill: Color::WHITE,
            stroke: Color::rgb(255, 0, 0),
            stroke_width,
        };
        fonts.draw_runs(&mut pixmap, &[run.clone()], &paint).unwrap();
        pixmap
    };

    // an outline this wide would cover the whole glyph if drawn last
    let thick = draw(30.0);
    assert!(count(&thick, 0.0, 0.0, 200.0, 120.0, white) > 0);
    assert!(count(&thick, 0.0, 0.0, 200.0, 120.0, red) > 0);

    let bare = draw(0.0);
    assert!(count(&bare, 0.0, 0.0, 200.0, 120.0, white) > 0);
    assert_eq!(count(&bare, 0.0, 0.0, 200.0, 120.0, red), 0);
}
