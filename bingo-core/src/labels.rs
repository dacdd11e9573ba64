use crate::config::RenderConfig;
use crate::constants::{LABEL_HEIGHT_RATIO, LABEL_WIDTH_RATIO, LETTER_PAD, STROKE_RATIO};
use crate::fonts::{Baseline, FontBook, TextPaint, TextRun};
use crate::models::{PngExportSettings, RenderMode};
use crate::surface::RenderSession;
use crate::text::FontSpec;

/// Column letters padded with `-` (or truncated) to exactly `dimension` characters.
pub fn padded_letters(custom: &str, dimension: usize) -> String {
    custom
        .chars()
        .chain(std::iter::repeat(LETTER_PAD))
        .take(dimension)
        .collect()
}

/// Outline width for text of `font_size` in `mode`.
pub fn stroke_width(font_size: f32, mode: RenderMode) -> f32 {
    (font_size * STROKE_RATIO).max(mode.stroke_floor())
}

/// Column letters along the top margin followed by row numbers down the left.
pub fn label_runs(config: &RenderConfig, settings: &PngExportSettings) -> Vec<TextRun> {
    let style = settings.letter_style.font();
    let d = config.dimension as f32;
    let cell = config.board_size / d;
    let base = (config.letter_area_height * LABEL_HEIGHT_RATIO).min(cell * LABEL_WIDTH_RATIO);
    let font = FontSpec::new(style.family, base * style.size_multiplier);

    let letters = padded_letters(&settings.custom_letters, config.dimension);
    let columns = letters.chars().enumerate().map(|(i, letter)| TextRun {
        text: letter.to_string(),
        x: config.row_number_area_width + cell * i as f32 + cell / 2.0,
        y: config.letter_area_height / 2.0,
        baseline: Baseline::Middle,
        font: font.clone(),
    });
    let rows = (0..config.dimension).map(|i| TextRun {
        text: (i + 1).to_string(),
        x: config.row_number_area_width / 2.0,
        y: config.y_offset + cell * i as f32 + cell / 2.0,
        baseline: Baseline::Middle,
        font: font.clone(),
    });
    columns.chain(rows).collect()
}

pub fn render_labels(
    session: &mut RenderSession,
    fonts: &FontBook,
    config: &RenderConfig,
    settings: &PngExportSettings,
    mode: RenderMode,
) {
    if !settings.show_labels {
        return;
    }
    let runs = label_runs(config, settings);
    let Some(size) = runs.first().map(|r| r.font.size) else {
        return;
    };
    let paint = TextPaint {
        fill: settings.tile_color,
        stroke: settings.text_stroke_color,
        stroke_width: stroke_width(size, mode),
    };
    if let Err(e) = fonts.draw_runs(session.pixmap_mut(), &runs, &paint) {
        log::warn!("labels not drawn: {e}");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::calculate_render_config;
    use crate::models::LetterStyle;

    #[test]
    fn pads_short_letters_with_dashes() {
        assert_eq!(padded_letters("BI", 5), "BI---");
        assert_eq!(padded_letters("", 3), "---");
        assert_eq!(padded_letters("BINGO", 5), "BINGO");
        assert_eq!(padded_letters("BINGOS", 3), "BIN");
    }

    #[test]
    fn runs_cover_every_column_and_row() {
        let settings = PngExportSettings {
            custom_letters: "BI".into(),
            export_scale: 100.0,
            ..Default::default()
        };
        let config = calculate_render_config(5, &settings, RenderMode::Preview).unwrap();
        let runs = label_runs(&config, &settings);
        let texts: Vec<&str> = runs.iter().map(|r| r.text.as_str()).collect();
        assert_eq!(texts, ["B", "I", "-", "-", "-", "1", "2", "3", "4", "5"]);

        let cell = config.board_size / 5.0;
        assert_eq!(runs[0].x, config.row_number_area_width + cell / 2.0);
        assert_eq!(runs[0].y, config.letter_area_height / 2.0);
        assert_eq!(runs[5].x, config.row_number_area_width / 2.0);
        assert_eq!(runs[9].y, config.y_offset + cell * 4.0 + cell / 2.0);
    }

    #[test]
    fn pixel_style_shrinks_font() {
        let classic = PngExportSettings {
            export_scale: 100.0,
            ..Default::default()
        };
        let pixel = PngExportSettings {
            letter_style: LetterStyle::Pixel,
            ..classic.clone()
        };
        let config = calculate_render_config(5, &classic, RenderMode::Preview).unwrap();
        let a = label_runs(&config, &classic)[0].font.size;
        let b = label_runs(&config, &pixel)[0].font.size;
        assert!((b - a * 0.9).abs() < 1e-4);
        assert_eq!(label_runs(&config, &pixel)[0].font.family, "monospace");
    }

    #[test]
    fn export_stroke_has_larger_floor() {
        assert_eq!(stroke_width(5.0, RenderMode::Preview), 1.0);
        assert_eq!(stroke_width(5.0, RenderMode::Export), 2.0);
        assert!((stroke_width(100.0, RenderMode::Export) - 8.0).abs() < 1e-4);
    }
}
