/// Rendering constants.
/// Lengths are preview pixels at 100% export scale unless noted otherwise.
pub const BASE_TILE_PX: f32 = 150.0;
/// Gap between neighbouring tiles and around the board edge.
pub const BASE_SPACING_PX: f32 = 2.0;
/// Smallest label margin; scaled by the render multiplier.
pub const MARGIN_FLOOR_PX: f32 = 80.0;
/// Label margin as a fraction of the tile size when that is larger than the floor.
pub const MARGIN_TILE_RATIO: f32 = 0.6;
/// Export renders at twice the preview resolution.
pub const EXPORT_MULTIPLIER: f32 = 2.0;

/// Tile content layout, as fractions of the tile size.
pub const ITEM_IMAGE_RATIO: f32 = 0.28;
pub const ITEM_GAP_RATIO: f32 = 0.04;
pub const ITEM_GAP_RATIO_THREE: f32 = 0.015;
pub const IMAGE_TEXT_GAP_RATIO: f32 = 0.08;
pub const MAX_TILE_ITEMS: usize = 3;

/// Description font fitting.
pub const DESC_FONT_RATIO: f32 = 0.13;
pub const DESC_MIN_FONT_RATIO: f32 = 0.07;
pub const DESC_WIDTH_RATIO: f32 = 0.85;
pub const DESC_HEIGHT_RATIO: f32 = 0.35;
pub const DESC_SHRINK: f32 = 0.92;
pub const LINE_HEIGHT: f32 = 1.1;
pub const DESC_FONT_FAMILY: &str = "Arial, sans-serif";

/// Average glyph advance used when no font face can measure text.
pub const HEURISTIC_CHAR_WIDTH: f32 = 0.6;
/// Text outline width as a fraction of the font size.
pub const STROKE_RATIO: f32 = 0.08;

/// Label font sizing.
pub const LABEL_HEIGHT_RATIO: f32 = 0.6;
pub const LABEL_WIDTH_RATIO: f32 = 0.4;

/// Glass effect: blur padding in blur radii, wash and rim alpha.
pub const GLASS_PADDING_RADII: f32 = 3.0;
pub const GLASS_WASH_ALPHA: f32 = 0.1;
pub const GLASS_RIM_ALPHA: f32 = 0.3;

pub const GRID_MITER_LIMIT: f32 = 10.0;

/// Output size offered by the browser export button (px).
pub const DEFAULT_EXPORT_TARGET_PX: u32 = 2048;
/// Letters cycled to fill the column labels when none are configured.
pub const DEFAULT_LETTERS: &str = "BINGO";
pub const LETTER_PAD: char = '-';
