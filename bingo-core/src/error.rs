use thiserror::Error;

#[derive(Debug, Error)]
pub enum RenderError {
    #[error("board dimension {0} is outside 3..=7")]
    Dimension(usize),
    #[error("board has {actual} tiles, expected {expected}")]
    BoardLength { expected: usize, actual: usize },
    #[error("cannot allocate a {width}x{height} surface")]
    Surface { width: u32, height: u32 },
    #[error("export target of {0}px cannot be reached for this board")]
    ExportTarget(u32),
    #[error("image fetch failed: {0}")]
    Fetch(String),
    #[error("image decode failed: {0}")]
    Decode(#[from] image::ImageError),
    #[error("image has no pixels")]
    EmptyImage,
    #[error("no font faces loaded; labels and descriptions cannot be drawn")]
    NoFonts,
    #[error("text layout failed: {0}")]
    Text(String),
    #[error("png encode failed: {0}")]
    Encode(#[from] png::EncodingError),
}

pub type Result<T> = std::result::Result<T, RenderError>;
