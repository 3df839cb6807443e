//! Page-by-page layout text extraction.
//!
//! Each page of the summary is rendered to one text block. Glyphs are
//! grouped by baseline into physical lines and ordered left to right.
//! A horizontal gap wider than [`COLUMN_GAP_EMS`] becomes a two-space
//! column separator, which is what [`crate::rows`] splits on. Narrower
//! gaps between words become a single space.

use pdf_extract::{MediaBox, OutputDev, OutputError, Transform};

use crate::PdfError;

/// Gap, in ems of the following glyph, above which two glyphs are taken
/// to sit in different table columns.
pub const COLUMN_GAP_EMS: f64 = 0.75;

/// Gap, in ems, above which two glyphs are separate words.
const WORD_GAP_EMS: f64 = 0.1;

/// Glyphs whose baselines differ by less than this many ems share a line.
const BASELINE_TOLERANCE_EMS: f64 = 0.5;

#[derive(Debug)]
struct Glyph {
    x: f64,
    y: f64,
    end: f64,
    size: f64,
    text: String,
}

/// Collects positioned glyphs for the current page and renders each
/// finished page to text.
#[derive(Debug, Default)]
struct LayoutText {
    glyphs: Vec<Glyph>,
    pages: Vec<String>,
}

/// Effective font size after the text rendering matrix is applied.
fn glyph_size(trm: &Transform, font_size: f64) -> f64 {
    let sx = font_size * (trm.m11 + trm.m21);
    let sy = font_size * (trm.m12 + trm.m22);
    (sx * sy).abs().sqrt()
}

impl OutputDev for LayoutText {
    fn begin_page(
        &mut self,
        _page_num: u32,
        _media_box: &MediaBox,
        _art_box: Option<(f64, f64, f64, f64)>,
    ) -> Result<(), OutputError> {
        self.glyphs.clear();
        Ok(())
    }

    fn end_page(&mut self) -> Result<(), OutputError> {
        let glyphs = std::mem::take(&mut self.glyphs);
        self.pages.push(render_page(glyphs));
        Ok(())
    }

    fn output_character(
        &mut self,
        trm: &Transform,
        width: f64,
        _spacing: f64,
        font_size: f64,
        char: &str,
    ) -> Result<(), OutputError> {
        let size = glyph_size(trm, font_size);
        let (x, y) = (trm.m31, trm.m32);
        self.glyphs.push(Glyph {
            x,
            y,
            end: width.mul_add(size, x),
            size,
            text: char.to_owned(),
        });
        Ok(())
    }

    fn begin_word(&mut self) -> Result<(), OutputError> {
        Ok(())
    }

    fn end_word(&mut self) -> Result<(), OutputError> {
        Ok(())
    }

    fn end_line(&mut self) -> Result<(), OutputError> {
        Ok(())
    }
}

/// Groups glyphs into lines, top of the page first.
fn render_page(mut glyphs: Vec<Glyph>) -> String {
    glyphs.sort_by(|a, b| b.y.total_cmp(&a.y));

    let mut lines: Vec<Vec<Glyph>> = Vec::new();
    let mut baseline = 0.0;

    for glyph in glyphs {
        match lines.last_mut() {
            Some(line) if (baseline - glyph.y).abs() <= glyph.size * BASELINE_TOLERANCE_EMS => {
                line.push(glyph);
            }
            _ => {
                baseline = glyph.y;
                lines.push(vec![glyph]);
            }
        }
    }

    lines
        .into_iter()
        .map(render_line)
        .collect::<Vec<_>>()
        .join("\n")
}

fn render_line(mut line: Vec<Glyph>) -> String {
    line.sort_by(|a, b| a.x.total_cmp(&b.x));

    let mut text = String::new();
    let mut last_end: Option<f64> = None;

    for glyph in &line {
        if let Some(end) = last_end {
            let gap = glyph.x - end;
            if gap > glyph.size * COLUMN_GAP_EMS {
                text.push_str("  ");
            } else if gap > glyph.size * WORD_GAP_EMS && !text.ends_with(' ') {
                text.push(' ');
            }
        }
        text.push_str(&glyph.text);
        last_end = Some(last_end.map_or(glyph.end, |end| end.max(glyph.end)));
    }

    text.trim_end().to_owned()
}

/// Renders every page of the PDF in `bytes` to a text block, in page
/// order.
///
/// # Errors
///
/// Returns [`PdfError::Document`] if `bytes` is not a parseable PDF.
pub fn extract_pages(bytes: &[u8]) -> Result<Vec<String>, PdfError> {
    let doc = pdf_extract::Document::load_mem(bytes)
        .map_err(|e| PdfError::Document(format!("failed to parse PDF: {e}")))?;

    let mut output = LayoutText::default();
    pdf_extract::output_doc(&doc, &mut output)
        .map_err(|e| PdfError::Document(format!("failed to extract text from PDF: {e}")))?;

    let pages = output.pages;

    log::debug!(
        "Extracted {} page(s), {} characters of text",
        pages.len(),
        pages.iter().map(String::len).sum::<usize>()
    );

    Ok(pages)
}
