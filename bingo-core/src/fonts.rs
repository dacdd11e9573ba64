//! Text measurement and drawing through usvg/resvg.
//!
//! Text is laid out as SVG `<text>` elements over the whole surface and
//! rasterized by resvg on top of what is already drawn, so labels and
//! descriptions share one font database with the measurement path.

use std::cell::RefCell;
use std::collections::HashMap;
use std::fmt::Write as _;
use std::sync::Arc;

use tiny_skia::{Pixmap, Transform};
use usvg::fontdb::{Database, Family, Query};

use crate::error::{RenderError, Result};
use crate::models::Color;
use crate::text::{FontSpec, HeuristicMeasure, TextMeasure};

// Measured widths kept before the cache starts over.
const WIDTH_CACHE_LIMIT: usize = 4096;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Baseline {
    /// Glyphs sit on `y`.
    Alphabetic,
    /// Glyphs are vertically centered on `y`.
    Middle,
}

/// One horizontally centered line of text.
#[derive(Clone, Debug, PartialEq)]
pub struct TextRun {
    pub text: String,
    pub x: f32,
    pub y: f32,
    pub baseline: Baseline,
    pub font: FontSpec,
}

/// Outline-then-fill paint shared by a batch of runs.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct TextPaint {
    pub fill: Color,
    pub stroke: Color,
    pub stroke_width: f32,
}

pub struct FontBook {
    fontdb: Arc<Database>,
    widths: RefCell<HashMap<(String, String, u32), f32>>,
}

impl FontBook {
    /// Only the font bundled by the `fonts` crate, if any.
    pub fn embedded() -> Self {
        let mut db = Database::new();
        if fonts::has_embedded_font() {
            db.load_font_data(fonts::FONT_BYTES.to_vec());
        }
        Self::from_database(db)
    }

    /// Bundled font plus whatever the host system provides.
    pub fn with_system_fonts() -> Self {
        let mut db = Database::new();
        if fonts::has_embedded_font() {
            db.load_font_data(fonts::FONT_BYTES.to_vec());
        }
        db.load_system_fonts();
        Self::from_database(db)
    }

    pub fn from_font_data(data: Vec<u8>) -> Self {
        let mut db = Database::new();
        db.load_font_data(data);
        Self::from_database(db)
    }

    fn from_database(mut db: Database) -> Self {
        map_generic_families(&mut db);
        log::debug!("font book ready with {} faces", db.len());
        FontBook {
            fontdb: Arc::new(db),
            widths: RefCell::new(HashMap::new()),
        }
    }

    pub fn has_faces(&self) -> bool {
        !self.fontdb.is_empty()
    }

    /// Error unless at least one face can draw text.
    pub fn ensure_faces(&self) -> Result<()> {
        if self.has_faces() {
            Ok(())
        } else {
            Err(RenderError::NoFonts)
        }
    }

    fn remember_width(&self, key: (String, String, u32), width: f32) {
        let mut widths = self.widths.borrow_mut();
        if widths.len() >= WIDTH_CACHE_LIMIT {
            widths.clear();
        }
        widths.insert(key, width);
    }

    fn options(&self) -> usvg::Options<'static> {
        let mut opt = usvg::Options::default();
        opt.fontdb = self.fontdb.clone();
        opt
    }

    fn measure_with_fonts(&self, text: &str, font: &FontSpec) -> Option<f32> {
        let mut svg = String::new();
        let _ = write!(
            svg,
            "<svg xmlns=\"http://www.w3.org/2000/svg\" width=\"1\" height=\"1\"><text x=\"0\" y=\"{:.2}\" font-family=\"{}\" font-size=\"{:.3}\">{}</text></svg>",
            font.size * 2.0,
            attr_escape(&font.family),
            font.size,
            svg_escape(text)
        );
        let tree = usvg::Tree::from_str(&svg, &self.options()).ok()?;
        let root = tree.root();
        if !root.has_children() {
            return None;
        }
        Some(root.bounding_box().width())
    }

    /// Draw `runs` onto `pixmap`, outline first and fill on top.
    pub fn draw_runs(&self, pixmap: &mut Pixmap, runs: &[TextRun], paint: &TextPaint) -> Result<()> {
        if runs.is_empty() {
            return Ok(());
        }
        if !self.has_faces() {
            log::warn!("no font faces loaded; skipping {} text runs", runs.len());
            return Ok(());
        }
        let svg = runs_to_svg(pixmap.width(), pixmap.height(), runs, paint);
        let tree = usvg::Tree::from_str(&svg, &self.options())
            .map_err(|e| RenderError::Text(format!("{e:?}")))?;
        let mut pm = pixmap.as_mut();
        resvg::render(&tree, Transform::identity(), &mut pm);
        Ok(())
    }
}

impl TextMeasure for FontBook {
    fn measure(&self, text: &str, font: &FontSpec) -> f32 {
        if !self.has_faces() {
            return HeuristicMeasure.measure(text, font);
        }
        let key = (text.to_string(), font.family.clone(), font.size.to_bits());
        if let Some(w) = self.widths.borrow().get(&key) {
            return *w;
        }
        let width = self
            .measure_with_fonts(text, font)
            .unwrap_or_else(|| HeuristicMeasure.measure(text, font));
        self.remember_width(key, width);
        width
    }
}

// Point generic families at a face that exists. The bundled font is loaded
// first, so it wins when present.
fn map_generic_families(db: &mut Database) {
    let Some(name) = db
        .faces()
        .next()
        .and_then(|face| face.families.first().map(|(n, _)| n.clone()))
    else {
        return;
    };
    let embedded = fonts::has_embedded_font();
    if embedded || !has_family(db, Family::SansSerif) {
        db.set_sans_serif_family(name.clone());
    }
    if embedded || !has_family(db, Family::Serif) {
        db.set_serif_family(name.clone());
    }
    if embedded || !has_family(db, Family::Monospace) {
        db.set_monospace_family(name);
    }
}

fn has_family(db: &Database, family: Family<'_>) -> bool {
    db.query(&Query {
        families: &[family],
        ..Default::default()
    })
    .is_some()
}

fn runs_to_svg(width: u32, height: u32, runs: &[TextRun], paint: &TextPaint) -> String {
    let (fill, fill_opacity) = paint.fill.svg_paint();
    let (stroke, stroke_opacity) = paint.stroke.svg_paint();
    let mut s = String::new();
    let _ = writeln!(
        s,
        "<svg xmlns=\"http://www.w3.org/2000/svg\" width=\"{w}\" height=\"{h}\" viewBox=\"0 0 {w} {h}\">",
        w = width,
        h = height
    );
    for run in runs {
        let baseline = match run.baseline {
            Baseline::Alphabetic => "alphabetic",
            Baseline::Middle => "central",
        };
        let common = format!(
            "x=\"{:.2}\" y=\"{:.2}\" font-family=\"{}\" font-size=\"{:.3}\" text-anchor=\"middle\" dominant-baseline=\"{}\"",
            run.x,
            run.y,
            attr_escape(&run.font.family),
            run.font.size,
            baseline
        );
        let text = svg_escape(&run.text);
        if paint.stroke_width > 0.0 {
            let _ = writeln!(
                s,
                "<text {common} fill=\"none\" stroke=\"{stroke}\" stroke-opacity=\"{stroke_opacity:.3}\" stroke-width=\"{:.3}\">{text}</text>",
                paint.stroke_width
            );
        }
        let _ = writeln!(
            s,
            "<text {common} fill=\"{fill}\" fill-opacity=\"{fill_opacity:.3}\">{text}</text>"
        );
    }
    s.push_str("</svg>\n");
    s
}

fn svg_escape(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
}

fn attr_escape(s: &str) -> String {
    svg_escape(s).replace('"', "&quot;")
}
