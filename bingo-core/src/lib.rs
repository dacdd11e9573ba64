//! Renders bingo boards to PNG: labelled grid, item images, wrapped
//! descriptions and an optional frosted-glass look, for both a screen
//! preview and a double-resolution export.

pub mod background;
pub mod board;
pub mod config;
pub mod constants;
pub mod error;
pub mod export;
pub mod fonts;
pub mod glass;
pub mod grid;
pub mod images;
pub mod labels;
pub mod models;
pub mod surface;
pub mod text;
pub mod tile;

pub use board::{RenderedBoard, render_board};
pub use config::{MAX_DIMENSION, MIN_DIMENSION, RenderConfig, calculate_render_config};
pub use error::{RenderError, Result};
pub use export::{export_file_name, export_scale_for_target, preview_settings};
pub use fonts::FontBook;
pub use images::{ImageSource, item_image_file_name, item_image_url};
pub use models::{BackgroundImage, BingoTile, Color, LetterStyle, PngExportSettings, RenderMode};
