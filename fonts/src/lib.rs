//! Font bytes embedded at build time.
//!
//! The font comes from `FONT_TTF` or a download. wasm32 builds always
//! download (or fail) since the browser offers no fonts of its own; native
//! builds download only with `FONTS_DOWNLOAD=1`, otherwise `FONT_BYTES` is
//! empty and callers fall back to system fonts.

pub static FONT_BYTES: &[u8] = include_bytes!(concat!(env!("OUT_DIR"), "/embedded-font.otf"));

/// True when a font was bundled into this build.
pub fn has_embedded_font() -> bool {
    !FONT_BYTES.is_empty()
}
