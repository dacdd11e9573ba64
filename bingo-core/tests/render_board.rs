use std::collections::HashMap;

use bingo_core::surface::encode_rgba_to_png_bytes;
use bingo_core::{
    BingoTile, Color, FontBook, ImageSource, PngExportSettings, RenderError, RenderMode,
    export_scale_for_target, render_board,
};
use futures::executor::block_on;
use futures::future::pending;

struct MemorySource(HashMap<String, Vec<u8>>);

impl ImageSource for MemorySource {
    async fn fetch(&self, item: &str) -> bingo_core::Result<Vec<u8>> {
        self.0
            .get(item)
            .cloned()
            .ok_or_else(|| RenderError::Fetch(format!("no image for {item}")))
    }
}

fn red_wide_png() -> Vec<u8> {
    encode_rgba_to_png_bytes(2, 1, &[255, 0, 0, 255, 255, 0, 0, 255]).unwrap()
}

fn source() -> MemorySource {
    MemorySource(HashMap::from([("Red".to_string(), red_wide_png())]))
}

fn empty_board(d: usize) -> Vec<BingoTile> {
    (0..d * d).map(|i| BingoTile::new(&i.to_string(), "", &[])).collect()
}

fn plain_settings() -> PngExportSettings {
    PngExportSettings {
        show_labels: false,
        export_scale: 100.0,
        background_color: Color::rgb(0x18, 0x18, 0x18),
        border_color: Color::rgb(0, 0, 255),
        ..Default::default()
    }
}

fn rgb_at(board: &bingo_core::RenderedBoard, x: u32, y: u32) -> (u8, u8, u8) {
    let px = board.pixmap.pixel(x, y).unwrap().demultiply();
    (px.red(), px.green(), px.blue())
}

#[test]
fn empty_board_is_background_and_grid() {
    let fonts = FontBook::embedded();
    let out = block_on(render_board(
        &empty_board(3),
        3,
        &plain_settings(),
        RenderMode::Preview,
        &fonts,
        &source(),
        pending(),
    ))
    .unwrap();
    assert_eq!((out.width(), out.height()), (458, 458));
    assert_eq!(rgb_at(&out, 154, 75), (0, 0, 255));
    assert_eq!(rgb_at(&out, 77, 77), (0x18, 0x18, 0x18));
    assert!(out.missing_images.is_empty());
}

#[test]
fn item_image_is_drawn_in_its_slot() {
    let fonts = FontBook::embedded();
    let mut board = empty_board(3);
    board[0] = BingoTile::new("0", "", &["Red"]);
    let out = block_on(render_board(
        &board,
        3,
        &plain_settings(),
        RenderMode::Preview,
        &fonts,
        &source(),
        pending(),
    ))
    .unwrap();
    // 42px slot centered at (77, 71); the 2:1 image is letterboxed to 42x21
    let (r, g, b) = rgb_at(&out, 77, 71);
    assert!(r > 250 && g < 5 && b < 5, "got {:?}", (r, g, b));
    assert_eq!(rgb_at(&out, 77, 55), (0x18, 0x18, 0x18));
}

#[test]
fn missing_images_do_not_fail_the_render() {
    let fonts = FontBook::embedded();
    let mut board = empty_board(3);
    board[4] = BingoTile::new("4", "", &["Gone", "Red"]);
    let out = block_on(render_board(
        &board,
        3,
        &plain_settings(),
        RenderMode::Preview,
        &fonts,
        &source(),
        pending(),
    ))
    .unwrap();
    assert_eq!(out.missing_images, vec!["Gone".to_string()]);
}

#[test]
fn rendering_is_deterministic() {
    let fonts = FontBook::embedded();
    let mut board = empty_board(4);
    board[5] = BingoTile::new("5", "Kill a dragon", &["Red"]);
    let settings = PngExportSettings {
        glass_blur: 3.0,
        ..PngExportSettings::for_dimension(4)
    };
    let render = || {
        block_on(render_board(
            &board,
            4,
            &settings,
            RenderMode::Preview,
            &fonts,
            &source(),
            pending(),
        ))
        .unwrap()
        .to_png()
        .unwrap()
    };
    assert_eq!(render(), render());
}

#[test]
fn export_is_twice_the_preview() {
    let fonts = FontBook::embedded();
    let settings = PngExportSettings::for_dimension(5);
    let run = |mode| {
        block_on(render_board(
            &empty_board(5),
            5,
            &settings,
            mode,
            &fonts,
            &source(),
            pending(),
        ))
        .unwrap()
    };
    let preview = run(RenderMode::Preview);
    let export = run(RenderMode::Export);
    assert_eq!(export.width(), preview.width() * 2);
    assert_eq!(export.height(), preview.height() * 2);
}

#[test]
fn export_scale_reaches_target_size() {
    let fonts = FontBook::embedded();
    let mut settings = plain_settings();
    settings.show_labels = true;
    settings.export_scale = export_scale_for_target(3, &settings, 2048).unwrap();
    let out = block_on(render_board(
        &empty_board(3),
        3,
        &settings,
        RenderMode::Export,
        &fonts,
        &source(),
        pending(),
    ))
    .unwrap();
    assert_eq!((out.width(), out.height()), (2048, 2048));
}

#[test]
fn glass_lightens_every_cell() {
    let fonts = FontBook::embedded();
    let settings = PngExportSettings {
        glass_blur: 4.0,
        border_thickness: 0.0,
        ..plain_settings()
    };
    let out = block_on(render_board(
        &empty_board(3),
        3,
        &settings,
        RenderMode::Preview,
        &fonts,
        &source(),
        pending(),
    ))
    .unwrap();
    for (x, y) in [(77, 77), (229, 229), (381, 381)] {
        let (r, _, _) = rgb_at(&out, x, y);
        assert!((46..=48).contains(&r), "cell at ({x}, {y}) is {r}");
    }
    // the spacing between tiles is untouched
    assert_eq!(rgb_at(&out, 153, 77), (0x18, 0x18, 0x18));
}

#[test]
fn bad_input_is_rejected() {
    let fonts = FontBook::embedded();
    let settings = plain_settings();
    let short = block_on(render_board(
        &empty_board(3)[..8],
        3,
        &settings,
        RenderMode::Preview,
        &fonts,
        &source(),
        pending(),
    ));
    assert!(matches!(
        short,
        Err(RenderError::BoardLength {
            expected: 9,
            actual: 8
        })
    ));
    let big = block_on(render_board(
        &empty_board(8),
        8,
        &settings,
        RenderMode::Preview,
        &fonts,
        &source(),
        pending(),
    ));
    assert!(matches!(big, Err(RenderError::Dimension(8))));
}
