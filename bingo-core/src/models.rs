use std::fmt;
use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::constants::{DEFAULT_LETTERS, EXPORT_MULTIPLIER};

/// RGBA color written in CSS hex notation (`#rgb`, `#rgba`, `#rrggbb`, `#rrggbbaa`).
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl Color {
    pub const BLACK: Color = Color::rgb(0, 0, 0);
    pub const WHITE: Color = Color::rgb(255, 255, 255);

    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Color { r, g, b, a: 255 }
    }

    pub const fn rgba(r: u8, g: u8, b: u8, a: u8) -> Self {
        Color { r, g, b, a }
    }

    /// White with a fractional alpha, as used by the glass overlay.
    pub fn white_alpha(alpha: f32) -> Self {
        Color::rgba(255, 255, 255, (alpha.clamp(0.0, 1.0) * 255.0).round() as u8)
    }

    pub fn parse(s: &str) -> Option<Color> {
        let hex = s.trim().strip_prefix('#')?;
        if !hex.is_ascii() {
            return None;
        }
        let nibble = |i: usize| u8::from_str_radix(&hex[i..i + 1], 16).ok().map(|v| v * 17);
        let byte = |i: usize| u8::from_str_radix(&hex[i..i + 2], 16).ok();
        match hex.len() {
            3 => Some(Color::rgb(nibble(0)?, nibble(1)?, nibble(2)?)),
            4 => Some(Color::rgba(nibble(0)?, nibble(1)?, nibble(2)?, nibble(3)?)),
            6 => Some(Color::rgb(byte(0)?, byte(2)?, byte(4)?)),
            8 => Some(Color::rgba(byte(0)?, byte(2)?, byte(4)?, byte(6)?)),
            _ => None,
        }
    }

    pub fn to_skia(self) -> tiny_skia::Color {
        tiny_skia::Color::from_rgba8(self.r, self.g, self.b, self.a)
    }

    /// `#rrggbb` plus a separate opacity, the form SVG paint attributes take.
    pub fn svg_paint(self) -> (String, f32) {
        (
            format!("#{:02x}{:02x}{:02x}", self.r, self.g, self.b),
            self.a as f32 / 255.0,
        )
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{:02x}{:02x}{:02x}", self.r, self.g, self.b)?;
        if self.a != 255 {
            write!(f, "{:02x}", self.a)?;
        }
        Ok(())
    }
}

impl TryFrom<String> for Color {
    type Error = String;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Color::parse(&value).ok_or_else(|| format!("invalid color '{value}'"))
    }
}

impl From<Color> for String {
    fn from(c: Color) -> Self {
        c.to_string()
    }
}

/// Content of one board cell. Empty cells have no description and no items.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct BingoTile {
    pub id: String,
    pub description: String,
    pub items: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub completed: Option<bool>,
}

impl BingoTile {
    pub fn new(id: &str, description: &str, items: &[&str]) -> Self {
        BingoTile {
            id: id.to_string(),
            description: description.to_string(),
            items: items.iter().map(|s| s.to_string()).collect(),
            completed: None,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.description.trim().is_empty() && self.items.is_empty()
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LetterStyle {
    #[default]
    Classic,
    Modern,
    Medieval,
    Pixel,
}

/// Font family list and size multiplier selected by a letter style.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct StyleFont {
    pub family: &'static str,
    pub size_multiplier: f32,
}

const STYLE_FONTS: [StyleFont; 4] = [
    StyleFont {
        family: "'Arial Black', Arial, sans-serif",
        size_multiplier: 1.0,
    },
    StyleFont {
        family: "Helvetica, Arial, sans-serif",
        size_multiplier: 1.0,
    },
    StyleFont {
        family: "serif",
        size_multiplier: 1.0,
    },
    StyleFont {
        family: "monospace",
        size_multiplier: 0.9,
    },
];

impl LetterStyle {
    pub const ALL: [LetterStyle; 4] = [
        LetterStyle::Classic,
        LetterStyle::Modern,
        LetterStyle::Medieval,
        LetterStyle::Pixel,
    ];

    pub fn font(self) -> StyleFont {
        STYLE_FONTS[self as usize]
    }

    pub fn label(self) -> &'static str {
        match self {
            LetterStyle::Classic => "Classic",
            LetterStyle::Modern => "Modern",
            LetterStyle::Medieval => "Medieval",
            LetterStyle::Pixel => "Pixel",
        }
    }
}

/// Uploaded background image, already read into memory by a file bridge.
#[derive(Clone)]
pub struct BackgroundImage {
    pub name: String,
    pub bytes: Arc<[u8]>,
}

impl BackgroundImage {
    pub fn new(name: impl Into<String>, bytes: Vec<u8>) -> Self {
        BackgroundImage {
            name: name.into(),
            bytes: bytes.into(),
        }
    }
}

impl fmt::Debug for BackgroundImage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("BackgroundImage")
            .field("name", &self.name)
            .field("bytes", &self.bytes.len())
            .finish()
    }
}

/// User-chosen look of the exported board. Read-only to the renderer.
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct PngExportSettings {
    pub background_color: Color,
    /// Fill color of descriptions and labels.
    pub tile_color: Color,
    pub text_stroke_color: Color,
    #[serde(skip)]
    pub background_image: Option<BackgroundImage>,
    pub letter_style: LetterStyle,
    pub show_labels: bool,
    pub custom_letters: String,
    /// Percentage applied to the 150px base tile.
    pub export_scale: f32,
    /// Glass blur radius in preview pixels; 0 disables the effect.
    pub glass_blur: f32,
    pub border_thickness: f32,
    pub border_color: Color,
}

impl Default for PngExportSettings {
    fn default() -> Self {
        PngExportSettings {
            background_color: Color::rgb(0x18, 0x18, 0x18),
            tile_color: Color::WHITE,
            text_stroke_color: Color::BLACK,
            background_image: None,
            letter_style: LetterStyle::Classic,
            show_labels: true,
            custom_letters: DEFAULT_LETTERS.to_string(),
            export_scale: 200.0,
            glass_blur: 0.0,
            border_thickness: 2.0,
            border_color: Color::BLACK,
        }
    }
}

impl PngExportSettings {
    /// Defaults with column letters cycled from "BINGO" to fit the board.
    pub fn for_dimension(dimension: usize) -> Self {
        PngExportSettings {
            custom_letters: default_letters(dimension),
            ..Default::default()
        }
    }
}

pub fn default_letters(dimension: usize) -> String {
    DEFAULT_LETTERS.chars().cycle().take(dimension).collect()
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum RenderMode {
    Preview,
    Export,
}

impl RenderMode {
    pub fn multiplier(self) -> f32 {
        match self {
            RenderMode::Preview => 1.0,
            RenderMode::Export => EXPORT_MULTIPLIER,
        }
    }

    /// Minimum text outline width in pixels.
    pub fn stroke_floor(self) -> f32 {
        match self {
            RenderMode::Preview => 1.0,
            RenderMode::Export => 2.0,
        }
    }
}
