//! PDF rendering of report tables with lopdf.
//!
//! Layout is expressed in millimetres on an A4 portrait page and converted
//! to PDF points when content operations are emitted. Every cell is a
//! bordered box with its text centred.

use std::path::Path;

use lopdf::content::{Content, Operation};
use lopdf::{Document, Object, ObjectId, Stream, dictionary};
use tracesplit_core::{CancellationToken, REPORT_HEADER, ReportKind, ReportRow};
use tracing::{debug, info};

use crate::ExportError;

const PT_PER_MM: f32 = 72.0 / 25.4;

const PAGE_WIDTH_MM: f32 = 210.0;
const PAGE_HEIGHT_MM: f32 = 297.0;
const MARGIN_MM: f32 = 10.0;
const BOTTOM_MARGIN_MM: f32 = 20.0;

const ROW_HEIGHT_MM: f32 = 10.0;
const COLUMN_WIDTHS_MM: [f32; 7] = [10.0, 30.0, 30.0, 30.0, 30.0, 30.0, 30.0];

const TITLE_SIZE: f32 = 10.0;
const TABLE_SIZE: f32 = 6.0;

const FONT_REGULAR: &str = "F1";
const FONT_BOLD: &str = "F2";

/// Render the report table for `kind` as an uncompressed PDF document.
///
/// The token is checked before each data row and `progress(done, total)` is
/// called after it. Cancellation returns [`ExportError::Cancelled`] and
/// nothing is produced.
pub fn render_report(
    kind: ReportKind,
    rows: &[ReportRow],
    cancel: &CancellationToken,
    mut progress: impl FnMut(usize, usize),
) -> Result<Document, ExportError> {
    let mut layout = PageLayout::new();

    layout.text_row(kind.title(), FONT_BOLD, TITLE_SIZE);
    layout.cell_row(&REPORT_HEADER, FONT_BOLD, TABLE_SIZE);

    for (i, row) in rows.iter().enumerate() {
        if cancel.is_cancelled() {
            info!(kind = %kind, processed = i, "pdf export cancelled");
            return Err(ExportError::Cancelled);
        }
        layout.cell_row(&row.cells(), FONT_REGULAR, TABLE_SIZE);
        progress(i + 1, rows.len());
    }

    let pages = layout.finish();
    debug!(kind = %kind, rows = rows.len(), pages = pages.len(), "laid out report");
    build_document(pages)
}

/// Compress and write a rendered document to `path`, replacing any existing file.
pub fn write_pdf(doc: &mut Document, path: &Path) -> Result<(), ExportError> {
    doc.compress();
    doc.save(path)?;
    info!(path = %path.display(), "wrote pdf");
    Ok(())
}

// ── Layout ──

/// Accumulates content operations page by page, breaking before a row
/// would cross the bottom margin.
struct PageLayout {
    pages: Vec<Vec<Operation>>,
    current: Vec<Operation>,
    y_mm: f32,
}

impl PageLayout {
    fn new() -> Self {
        Self {
            pages: Vec::new(),
            current: Vec::new(),
            y_mm: MARGIN_MM,
        }
    }

    fn ensure_room(&mut self, height_mm: f32) {
        if self.y_mm + height_mm > PAGE_HEIGHT_MM - BOTTOM_MARGIN_MM && !self.current.is_empty() {
            self.pages.push(std::mem::take(&mut self.current));
            self.y_mm = MARGIN_MM;
        }
    }

    /// Borderless full-width line of centred text.
    fn text_row(&mut self, text: &str, font: &str, size: f32) {
        self.ensure_room(ROW_HEIGHT_MM);
        let width = PAGE_WIDTH_MM - 2.0 * MARGIN_MM;
        self.centred_text(text, font, size, MARGIN_MM, width);
        self.y_mm += ROW_HEIGHT_MM;
    }

    /// One row of bordered cells using [`COLUMN_WIDTHS_MM`].
    fn cell_row<S: AsRef<str>>(&mut self, cells: &[S], font: &str, size: f32) {
        self.ensure_room(ROW_HEIGHT_MM);
        let mut x = MARGIN_MM;
        for (cell, &width) in cells.iter().zip(COLUMN_WIDTHS_MM.iter()) {
            self.border(x, width);
            self.centred_text(cell.as_ref(), font, size, x, width);
            x += width;
        }
        self.y_mm += ROW_HEIGHT_MM;
    }

    fn border(&mut self, x_mm: f32, width_mm: f32) {
        let bottom = PAGE_HEIGHT_MM - self.y_mm - ROW_HEIGHT_MM;
        self.current.push(Operation::new(
            "re",
            vec![
                pt(x_mm),
                pt(bottom),
                pt(width_mm),
                pt(ROW_HEIGHT_MM),
            ],
        ));
        self.current.push(Operation::new("S", vec![]));
    }

    fn centred_text(&mut self, text: &str, font: &str, size: f32, x_mm: f32, width_mm: f32) {
        if text.is_empty() {
            return;
        }
        let text_width_pt = text_width(text, size);
        let x = x_mm * PT_PER_MM + (width_mm * PT_PER_MM - text_width_pt) / 2.0;
        let baseline =
            (PAGE_HEIGHT_MM - self.y_mm - ROW_HEIGHT_MM / 2.0) * PT_PER_MM - 0.3 * size;

        self.current.extend([
            Operation::new("BT", vec![]),
            Operation::new("Tf", vec![font.into(), Object::Real(size)]),
            Operation::new("Td", vec![Object::Real(x), Object::Real(baseline)]),
            Operation::new("Tj", vec![Object::string_literal(win_ansi(text))]),
            Operation::new("ET", vec![]),
        ]);
    }

    fn finish(mut self) -> Vec<Vec<Operation>> {
        if !self.current.is_empty() || self.pages.is_empty() {
            self.pages.push(self.current);
        }
        self.pages
    }
}

fn pt(mm: f32) -> Object {
    Object::Real(mm * PT_PER_MM)
}

/// Approximate Helvetica advance width of `text` in points.
fn text_width(text: &str, size: f32) -> f32 {
    let em: f32 = text
        .chars()
        .map(|c| match c {
            ' ' => 0.278,
            '0'..='9' => 0.556,
            'A'..='Z' => 0.667,
            'a'..='z' => 0.5,
            _ => 0.556,
        })
        .sum();
    em * size
}

/// Encode for the standard fonts' WinAnsi encoding; unmappable characters become `?`.
fn win_ansi(text: &str) -> Vec<u8> {
    text.chars()
        .map(|c| u8::try_from(u32::from(c)).unwrap_or(b'?'))
        .collect()
}

// ── Document assembly ──

fn build_document(pages: Vec<Vec<Operation>>) -> Result<Document, ExportError> {
    let mut doc = Document::with_version("1.5");
    let pages_id = doc.new_object_id();

    let regular_id = doc.add_object(dictionary! {
        "Type" => "Font",
        "Subtype" => "Type1",
        "BaseFont" => "Helvetica",
        "Encoding" => "WinAnsiEncoding",
    });
    let bold_id = doc.add_object(dictionary! {
        "Type" => "Font",
        "Subtype" => "Type1",
        "BaseFont" => "Helvetica-Bold",
        "Encoding" => "WinAnsiEncoding",
    });
    let resources_id = doc.add_object(dictionary! {
        "Font" => dictionary! {
            FONT_REGULAR => regular_id,
            FONT_BOLD => bold_id,
        },
    });

    let mut kids: Vec<Object> = Vec::with_capacity(pages.len());
    for operations in pages {
        let content = Content { operations };
        let content_id = doc.add_object(Stream::new(dictionary! {}, content.encode()?));
        let page_id: ObjectId = doc.add_object(dictionary! {
            "Type" => "Page",
            "Parent" => pages_id,
            "Contents" => content_id,
        });
        kids.push(page_id.into());
    }

    let page_count = kids.len() as i64;
    let pages_dict = dictionary! {
        "Type" => "Pages",
        "Kids" => kids,
        "Count" => page_count,
        "Resources" => resources_id,
        "MediaBox" => vec![
            0.into(),
            0.into(),
            pt(PAGE_WIDTH_MM),
            pt(PAGE_HEIGHT_MM),
        ],
    };
    doc.objects.insert(pages_id, Object::Dictionary(pages_dict));

    let catalog_id = doc.add_object(dictionary! {
        "Type" => "Catalog",
        "Pages" => pages_id,
    });
    doc.trailer.set("Root", catalog_id);

    Ok(doc)
}
