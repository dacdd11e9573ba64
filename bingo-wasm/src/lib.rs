use std::rc::Rc;

use bingo_core::constants::DEFAULT_EXPORT_TARGET_PX;
use bingo_core::{
    FontBook, RenderMode, RenderedBoard, export_file_name, export_scale_for_target,
    preview_settings, render_board,
};
use wasm_bindgen::prelude::*;
use wasm_bindgen::{Clamped, JsCast};
use web_sys::{CanvasRenderingContext2d, File, HtmlCanvasElement, ImageData};

mod constants;
mod fetch;
mod models;
mod utils;

use constants::IMAGE_DEADLINE_MS;
use fetch::{FetchSource, read_background};
use models::BoardDocument;
use utils::{download, init_logging, sleep, to_js};

thread_local! {
    static FONTS: Rc<FontBook> = Rc::new(FontBook::embedded());
}

#[wasm_bindgen(start)]
pub fn start() {
    init_logging();
}

fn font_book() -> Result<Rc<FontBook>, JsValue> {
    let fonts = FONTS.with(Rc::clone);
    fonts.ensure_faces().map_err(to_js)?;
    Ok(fonts)
}

fn parse_document(board_json: &str) -> Result<BoardDocument, JsValue> {
    serde_json::from_str(board_json).map_err(to_js)
}

/// Render the on-screen preview into `canvas`, resizing it to the frame.
#[wasm_bindgen]
pub async fn render_preview(
    canvas: HtmlCanvasElement,
    board_json: String,
    background: Option<File>,
) -> Result<(), JsValue> {
    let doc = parse_document(&board_json)?;
    let mut settings = preview_settings(&doc.settings());
    settings.background_image = read_background(background).await;

    let fonts = font_book()?;
    let rendered = render_board(
        &doc.board,
        doc.dimension,
        &settings,
        RenderMode::Preview,
        &fonts,
        &FetchSource,
        sleep(IMAGE_DEADLINE_MS),
    )
    .await
    .map_err(to_js)?;
    blit(&canvas, &rendered)
}

/// Render at export resolution so the PNG is `target_size` px on a side and
/// download it.
#[wasm_bindgen]
pub async fn export_png(
    board_json: String,
    background: Option<File>,
    target_size: Option<u32>,
) -> Result<(), JsValue> {
    let target = target_size.unwrap_or(DEFAULT_EXPORT_TARGET_PX);
    let doc = parse_document(&board_json)?;
    let mut settings = doc.settings();
    settings.export_scale = export_scale_for_target(doc.dimension, &settings, target).map_err(to_js)?;
    settings.background_image = read_background(background).await;

    let fonts = font_book()?;
    let rendered = render_board(
        &doc.board,
        doc.dimension,
        &settings,
        RenderMode::Export,
        &fonts,
        &FetchSource,
        sleep(IMAGE_DEADLINE_MS),
    )
    .await
    .map_err(to_js)?;

    let bytes = rendered.to_png().map_err(to_js)?;
    let name = export_file_name(Some(target), js_sys::Date::now() as u64);
    log::info!("exporting {name} ({} bytes)", bytes.len());
    download(&bytes, &name)
}

fn blit(canvas: &HtmlCanvasElement, rendered: &RenderedBoard) -> Result<(), JsValue> {
    canvas.set_width(rendered.width());
    canvas.set_height(rendered.height());
    let ctx = canvas
        .get_context("2d")?
        .ok_or_else(|| JsValue::from_str("no 2d context"))?
        .dyn_into::<CanvasRenderingContext2d>()?;
    let rgba = rendered.to_rgba();
    let image =
        ImageData::new_with_u8_clamped_array_and_sh(Clamped(&rgba[..]), rendered.width(), rendered.height())?;
    ctx.put_image_data(&image, 0.0, 0.0)
}
