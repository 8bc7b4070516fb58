//! PDF export of the combined report

use crate::config::ExportConfig;
use crate::error::{MatcherError, Result};
use crate::request::RequestId;
use ab_glyph::{Font, FontVec};
use log::{debug, info};
use printpdf::{BuiltinFont, IndirectFontRef, Mm, PdfDocument, PdfDocumentReference};
use std::fs::{self, File};
use std::io::BufWriter;
use std::path::{Path, PathBuf};

const PAGE_WIDTH_MM: f32 = 210.0;
const PAGE_HEIGHT_MM: f32 = 297.0;
const PT_TO_MM: f32 = 0.352_778;

const SYSTEM_FONT_CANDIDATES: &[&str] = &[
    "/usr/share/fonts/truetype/dejavu/DejaVuSans.ttf",
    "/usr/share/fonts/TTF/DejaVuSans.ttf",
    "/usr/share/fonts/dejavu/DejaVuSans.ttf",
    "/usr/share/fonts/truetype/liberation/LiberationSans-Regular.ttf",
    "/usr/share/fonts/truetype/noto/NotoSans-Regular.ttf",
    "/System/Library/Fonts/Supplemental/Arial Unicode.ttf",
    "/System/Library/Fonts/Supplemental/Arial.ttf",
    "C:\\Windows\\Fonts\\arial.ttf",
];

/// Helvetica AFM advances (1/1000 em) for U+0020..=U+007E
const HELVETICA_ASCII: [u16; 95] = [
    278, 278, 355, 556, 556, 889, 667, 191, 333, 333, 389, 584, 278, 333, 278, 278,
    556, 556, 556, 556, 556, 556, 556, 556, 556, 556, 278, 278, 584, 584, 584, 556,
    1015, 667, 667, 722, 722, 667, 611, 778, 722, 278, 500, 667, 556, 833, 722, 778,
    667, 778, 722, 667, 611, 722, 667, 944, 667, 667, 611, 278, 278, 278, 469, 556,
    333, 556, 556, 500, 556, 556, 278, 556, 556, 222, 222, 500, 222, 833, 556, 556,
    556, 556, 333, 500, 278, 556, 500, 722, 500, 500, 500, 334, 260, 334, 584,
];

/// Helvetica AFM advances for U+00A0..=U+00FF
const HELVETICA_LATIN1: [u16; 96] = [
    278, 333, 556, 556, 556, 556, 260, 556, 333, 737, 370, 556, 584, 333, 737, 333,
    400, 584, 333, 333, 333, 556, 537, 278, 333, 333, 365, 556, 834, 834, 834, 611,
    667, 667, 667, 667, 667, 667, 1000, 722, 667, 667, 667, 667, 278, 278, 278, 278,
    722, 722, 778, 778, 778, 778, 778, 584, 778, 722, 722, 722, 722, 667, 667, 611,
    556, 556, 556, 556, 556, 556, 889, 500, 556, 556, 556, 556, 278, 278, 278, 278,
    556, 556, 556, 556, 556, 556, 556, 584, 611, 556, 556, 556, 556, 500, 556, 500,
];

const HELVETICA_FALLBACK: u16 = 556;

/// Turns report text into a file and returns where it was written
pub trait DocumentExporter {
    fn export(&self, text: &str, request_id: &RequestId) -> Result<PathBuf>;
}

#[derive(Debug, Clone, PartialEq)]
pub enum FontSource {
    /// TrueType font embedded into the document, full Unicode
    External(PathBuf),
    /// Helvetica, Latin-1 only
    Builtin,
}

impl FontSource {
    /// Configured font, else the first well-known system font, else Helvetica
    pub fn resolve(configured: Option<&Path>) -> Self {
        if let Some(path) = configured {
            return FontSource::External(path.to_path_buf());
        }

        SYSTEM_FONT_CANDIDATES
            .iter()
            .map(Path::new)
            .find(|path| path.exists())
            .map(|path| FontSource::External(path.to_path_buf()))
            .unwrap_or(FontSource::Builtin)
    }
}

/// Horizontal glyph advances used to lay out rows
pub enum FontMetrics {
    Truetype(FontVec),
    Helvetica,
}

impl FontMetrics {
    pub fn from_truetype(data: Vec<u8>) -> Result<Self> {
        FontVec::try_from_vec(data)
            .map(FontMetrics::Truetype)
            .map_err(|e| MatcherError::Export(format!("Cannot parse font: {}", e)))
    }

    /// Advance of `c` as a fraction of the em size
    pub fn advance_em(&self, c: char) -> f32 {
        match self {
            FontMetrics::Truetype(font) => {
                let units_per_em = font.units_per_em().unwrap_or(1000.0);
                font.h_advance_unscaled(font.glyph_id(c)) / units_per_em
            }
            FontMetrics::Helvetica => f32::from(helvetica_advance(c)) / 1000.0,
        }
    }

    pub fn char_width_mm(&self, c: char, font_size_pt: f32) -> f32 {
        self.advance_em(c) * font_size_pt * PT_TO_MM
    }

    pub fn text_width_mm(&self, text: &str, font_size_pt: f32) -> f32 {
        text.chars().map(|c| self.char_width_mm(c, font_size_pt)).sum()
    }
}

fn helvetica_advance(c: char) -> u16 {
    let code = c as u32;
    match code {
        0x20..=0x7E => HELVETICA_ASCII[(code - 0x20) as usize],
        0xA0..=0xFF => HELVETICA_LATIN1[(code - 0xA0) as usize],
        _ => HELVETICA_FALLBACK,
    }
}

/// Font ready for both layout and embedding
struct LoadedFont {
    metrics: FontMetrics,
    /// TTF bytes to embed; `None` for the builtin font
    data: Option<Vec<u8>>,
}

pub struct PdfExporter {
    output_dir: PathBuf,
    file_stem: String,
    font: FontSource,
    font_size_pt: f32,
    line_height_mm: f32,
    margin_mm: f32,
}

impl PdfExporter {
    pub fn new(config: &ExportConfig) -> Self {
        Self::with_font(config, FontSource::resolve(config.font_path.as_deref()))
    }

    pub fn with_font(config: &ExportConfig, font: FontSource) -> Self {
        Self {
            output_dir: config.output_dir.clone(),
            file_stem: config.file_stem.clone(),
            font,
            font_size_pt: config.font_size_pt,
            line_height_mm: config.line_height_mm,
            margin_mm: config.margin_mm,
        }
    }

    pub fn output_path(&self, request_id: &RequestId) -> PathBuf {
        self.output_dir
            .join(format!("{}-{}.pdf", self.file_stem, request_id))
    }

    /// Page width between the left and right margins
    pub fn usable_width_mm(&self) -> f32 {
        PAGE_WIDTH_MM - 2.0 * self.margin_mm
    }

    pub fn lines_per_page(&self) -> usize {
        let usable_height = PAGE_HEIGHT_MM - 2.0 * self.margin_mm;
        ((usable_height / self.line_height_mm).floor() as usize).max(1)
    }

    /// Wrap `text` to the usable width with the given metrics
    pub fn layout(&self, text: &str, metrics: &FontMetrics) -> Vec<String> {
        wrap_text(text, self.usable_width_mm(), |c| {
            metrics.char_width_mm(c, self.font_size_pt)
        })
    }

    fn load_font(&self) -> Result<LoadedFont> {
        match &self.font {
            FontSource::External(path) => {
                let data = fs::read(path).map_err(|e| {
                    MatcherError::Export(format!("Cannot open font '{}': {}", path.display(), e))
                })?;
                let metrics = FontVec::try_from_vec(data.clone())
                    .map(FontMetrics::Truetype)
                    .map_err(|e| MatcherError::Export(format!("Cannot load font '{}': {}", path.display(), e)))?;
                Ok(LoadedFont {
                    metrics,
                    data: Some(data),
                })
            }
            FontSource::Builtin => Ok(LoadedFont {
                metrics: FontMetrics::Helvetica,
                data: None,
            }),
        }
    }

    fn embed_font(&self, doc: &PdfDocumentReference, font: &LoadedFont) -> Result<IndirectFontRef> {
        match &font.data {
            Some(data) => doc
                .add_external_font(data.as_slice())
                .map_err(|e| MatcherError::Export(format!("Cannot embed font: {}", e))),
            None => doc
                .add_builtin_font(BuiltinFont::Helvetica)
                .map_err(|e| MatcherError::Export(format!("Cannot load builtin font: {}", e))),
        }
    }

    fn render(&self, pages: &[Vec<String>], path: &Path, font: &LoadedFont) -> Result<()> {
        let (doc, first_page, first_layer) = PdfDocument::new(
            "Resume analysis",
            Mm(PAGE_WIDTH_MM),
            Mm(PAGE_HEIGHT_MM),
            "Layer 1",
        );
        let font_ref = self.embed_font(&doc, font)?;

        for (index, lines) in pages.iter().enumerate() {
            let (page, layer) = if index == 0 {
                (first_page, first_layer)
            } else {
                doc.add_page(Mm(PAGE_WIDTH_MM), Mm(PAGE_HEIGHT_MM), format!("Layer {}", index + 1))
            };
            let layer = doc.get_page(page).get_layer(layer);

            for (row, line) in lines.iter().enumerate() {
                if line.is_empty() {
                    continue;
                }
                let baseline = PAGE_HEIGHT_MM - self.margin_mm - self.line_height_mm * (row as f32 + 0.75);
                layer.use_text(line.as_str(), self.font_size_pt, Mm(self.margin_mm), Mm(baseline), &font_ref);
            }
        }

        let file = File::create(path)?;
        doc.save(&mut BufWriter::new(file))
            .map_err(|e| MatcherError::Export(format!("Failed to write '{}': {}", path.display(), e)))
    }
}

impl DocumentExporter for PdfExporter {
    fn export(&self, text: &str, request_id: &RequestId) -> Result<PathBuf> {
        if self.font == FontSource::Builtin {
            check_builtin_charset(text)?;
        }

        let font = self.load_font()?;
        let rows = self.layout(text, &font.metrics);
        let pages = paginate(rows, self.lines_per_page());
        debug!("Laid out report on {} page(s)", pages.len());

        fs::create_dir_all(&self.output_dir)?;
        let path = self.output_path(request_id);
        self.render(&pages, &path, &font)?;

        info!("Exported report to {}", path.display());
        Ok(path)
    }
}

/// The builtin font is WinAnsi encoded; anything past Latin-1 would be garbled
fn check_builtin_charset(text: &str) -> Result<()> {
    match text.chars().find(|c| *c as u32 > 0xFF) {
        Some(c) => Err(MatcherError::Export(format!(
            "Character '{}' is not supported by the builtin PDF font; set export.font_path to a Unicode TTF font",
            c
        ))),
        None => Ok(()),
    }
}

/// Split on line breaks, then greedily word-wrap each line so that no row is
/// wider than `max_width`. Blank input lines stay as blank rows; words wider
/// than a row are hard-split.
pub fn wrap_text<W>(text: &str, max_width: f32, char_width: W) -> Vec<String>
where
    W: Fn(char) -> f32,
{
    let space_width = char_width(' ');
    let mut rows = Vec::new();

    for line in text.split('\n') {
        let line = line.trim_end_matches('\r');
        if line.trim().is_empty() {
            rows.push(String::new());
            continue;
        }

        let mut current = String::new();
        let mut current_width = 0.0;

        for word in line.split_whitespace() {
            for (piece, piece_width) in split_word(word, max_width, &char_width) {
                if !current.is_empty() && current_width + space_width + piece_width > max_width {
                    rows.push(std::mem::take(&mut current));
                    current_width = 0.0;
                }
                if !current.is_empty() {
                    current.push(' ');
                    current_width += space_width;
                }
                current.push_str(&piece);
                current_width += piece_width;
            }
        }

        rows.push(current);
    }

    rows
}

/// Pieces of `word` no wider than `max_width` (a lone glyph may exceed it)
fn split_word<W>(word: &str, max_width: f32, char_width: &W) -> Vec<(String, f32)>
where
    W: Fn(char) -> f32,
{
    let mut pieces = Vec::new();
    let mut piece = String::new();
    let mut width = 0.0;

    for c in word.chars() {
        let advance = char_width(c);
        if !piece.is_empty() && width + advance > max_width {
            pieces.push((std::mem::take(&mut piece), width));
            width = 0.0;
        }
        piece.push(c);
        width += advance;
    }
    if !piece.is_empty() {
        pieces.push((piece, width));
    }

    pieces
}

/// Group rows into pages; always at least one page
pub fn paginate(rows: Vec<String>, per_page: usize) -> Vec<Vec<String>> {
    if rows.is_empty() {
        return vec![Vec::new()];
    }
    rows.chunks(per_page.max(1)).map(|chunk| chunk.to_vec()).collect()
}
