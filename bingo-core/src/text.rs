use crate::constants::{
    DESC_FONT_FAMILY, DESC_FONT_RATIO, DESC_HEIGHT_RATIO, DESC_MIN_FONT_RATIO, DESC_SHRINK,
    DESC_WIDTH_RATIO, HEURISTIC_CHAR_WIDTH,
};

/// Font family list (CSS syntax) and pixel size.
#[derive(Clone, Debug, PartialEq)]
pub struct FontSpec {
    pub family: String,
    pub size: f32,
}

impl FontSpec {
    pub fn new(family: &str, size: f32) -> Self {
        FontSpec {
            family: family.to_string(),
            size,
        }
    }
}

/// Width of a single line of text as the rendering surface would draw it.
pub trait TextMeasure {
    fn measure(&self, text: &str, font: &FontSpec) -> f32;
}

/// Average-advance estimate. Lower fidelity than real glyph metrics; used
/// when no font face is available to measure with.
#[derive(Clone, Copy, Debug, Default)]
pub struct HeuristicMeasure;

impl TextMeasure for HeuristicMeasure {
    fn measure(&self, text: &str, font: &FontSpec) -> f32 {
        text.chars().count() as f32 * font.size * HEURISTIC_CHAR_WIDTH
    }
}

/// Greedy word wrap. Words are never split; a word wider than `max_width`
/// is emitted on a line of its own.
pub fn wrap_text<M: TextMeasure + ?Sized>(
    text: &str,
    max_width: f32,
    font: &FontSpec,
    measure: &M,
) -> Vec<String> {
    let mut lines = Vec::new();
    let mut current = String::new();
    for word in text.split_whitespace() {
        if current.is_empty() {
            current.push_str(word);
            continue;
        }
        let candidate = format!("{current} {word}");
        if measure.measure(&candidate, font) > max_width {
            lines.push(std::mem::replace(&mut current, word.to_string()));
        } else {
            current = candidate;
        }
    }
    if !current.is_empty() {
        lines.push(current);
    }
    lines
}

/// Wrapped description and the font size it was fitted at.
#[derive(Clone, Debug, PartialEq)]
pub struct TextBlock {
    pub lines: Vec<String>,
    pub font: FontSpec,
}

impl TextBlock {
    /// Height budgeted for the block: one font size per line.
    pub fn height(&self) -> f32 {
        self.lines.len() as f32 * self.font.size
    }
}

/// Wrap a tile description, shrinking the font until the block fits the
/// tile's text height budget or reaches the minimum size.
pub fn fit_description<M: TextMeasure + ?Sized>(
    description: &str,
    tile_size: f32,
    measure: &M,
) -> TextBlock {
    let max_width = tile_size * DESC_WIDTH_RATIO;
    let max_height = tile_size * DESC_HEIGHT_RATIO;
    let min_size = tile_size * DESC_MIN_FONT_RATIO;

    let mut font = FontSpec::new(DESC_FONT_FAMILY, tile_size * DESC_FONT_RATIO);
    let mut lines = wrap_text(description, max_width, &font, measure);
    while lines.len() as f32 * font.size > max_height && font.size > min_size {
        font.size *= DESC_SHRINK;
        lines = wrap_text(description, max_width, &font, measure);
    }
    TextBlock { lines, font }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    const LONG: &str = "A very long objective description that needs wrapping";

    #[test]
    fn wraps_at_word_boundaries() {
        let font = FontSpec::new("sans-serif", 10.0);
        // 6px per char: 60px fits 10 chars
        let lines = wrap_text("kill the big dragon now", 60.0, &font, &HeuristicMeasure);
        assert_eq!(lines, vec!["kill the", "big dragon", "now"]);
    }

    #[test]
    fn oversized_word_gets_its_own_line() {
        let font = FontSpec::new("sans-serif", 10.0);
        let lines = wrap_text("a supercalifragilistic b", 60.0, &font, &HeuristicMeasure);
        assert_eq!(lines, vec!["a", "supercalifragilistic", "b"]);
    }

    #[test]
    fn empty_description_has_no_lines() {
        let block = fit_description("", 150.0, &HeuristicMeasure);
        assert!(block.lines.is_empty());
        assert_eq!(block.height(), 0.0);
        assert_eq!(block.font.size, 150.0 * DESC_FONT_RATIO);
    }

    #[test]
    fn wrapping_is_idempotent() {
        let font = FontSpec::new("sans-serif", 12.0);
        let lines = wrap_text(LONG, 90.0, &font, &HeuristicMeasure);
        let rejoined = lines.join(" ");
        assert_eq!(wrap_text(&rejoined, 90.0, &font, &HeuristicMeasure).len(), lines.len());
        for line in &lines {
            assert_eq!(wrap_text(line, 90.0, &font, &HeuristicMeasure).len(), 1);
        }
    }

    #[test]
    fn long_description_shrinks_within_bounds() {
        let tile = 150.0;
        let block = fit_description(LONG, tile, &HeuristicMeasure);
        assert!(block.font.size < tile * DESC_FONT_RATIO);
        let fits = block.height() <= tile * DESC_HEIGHT_RATIO;
        let at_floor = block.font.size <= tile * DESC_MIN_FONT_RATIO;
        assert!(fits || at_floor);
        // one more shrink step must not have been necessary
        assert!(block.font.size / DESC_SHRINK > tile * DESC_MIN_FONT_RATIO || fits);
    }

    #[test]
    fn shrink_loop_is_bounded() {
        let text = "word ".repeat(500);
        let tile = 150.0;
        let block = fit_description(&text, tile, &HeuristicMeasure);
        assert!(block.font.size <= tile * DESC_MIN_FONT_RATIO);
        // 0.13 * 0.92^8 < 0.07, so at most eight shrink steps run
        let steps = (block.font.size / (tile * DESC_FONT_RATIO)).ln() / DESC_SHRINK.ln();
        assert!(steps.round() as i32 <= 8);
    }
}
