//! PDF serialization for the dossier layout.
//!
//! Draws each `ReportPage` onto an A4 page with the builtin Helvetica
//! faces. Fonts and colors are cosmetic; the normative part is the page
//! structure and field placement, which the layout layer already fixed.

use anyhow::{Context as _, Result};
use lopdf::content::{Content, Operation};
use lopdf::{dictionary, Document, Object, Stream};

use super::{PageBlock, PageKind, ReportPage, ReportDocument};

const PAGE_WIDTH: i64 = 595;
const PAGE_HEIGHT: i64 = 842;
const MARGIN_X: i64 = 50;
const TOP_Y: i64 = 780;

const HEADING_SIZE: i64 = 16;
const BODY_SIZE: i64 = 11;
const BODY_LEADING: i64 = 16;

pub(super) fn serialize(doc: &ReportDocument) -> Result<Vec<u8>> {
    let mut pdf = Document::with_version("1.5");
    let pages_id = pdf.new_object_id();

    let font_regular = pdf.add_object(dictionary! {
        "Type" => "Font",
        "Subtype" => "Type1",
        "BaseFont" => "Helvetica",
        "Encoding" => "WinAnsiEncoding",
    });
    let font_bold = pdf.add_object(dictionary! {
        "Type" => "Font",
        "Subtype" => "Type1",
        "BaseFont" => "Helvetica-Bold",
        "Encoding" => "WinAnsiEncoding",
    });
    let resources_id = pdf.add_object(dictionary! {
        "Font" => dictionary! {
            "F1" => font_regular,
            "F2" => font_bold,
        },
    });

    let mut kids: Vec<Object> = Vec::with_capacity(doc.pages.len());
    for page in &doc.pages {
        let content = Content {
            operations: layout_page(page),
        };
        let stream_id = pdf.add_object(Stream::new(
            dictionary! {},
            content.encode().context("failed to encode page content")?,
        ));
        let page_id = pdf.add_object(dictionary! {
            "Type" => "Page",
            "Parent" => pages_id,
            "Resources" => resources_id,
            "MediaBox" => vec![0.into(), 0.into(), PAGE_WIDTH.into(), PAGE_HEIGHT.into()],
            "Contents" => stream_id,
        });
        kids.push(page_id.into());
    }

    let page_count = kids.len() as i64;
    pdf.objects.insert(
        pages_id,
        Object::Dictionary(dictionary! {
            "Type" => "Pages",
            "Kids" => kids,
            "Count" => page_count,
        }),
    );
    let catalog_id = pdf.add_object(dictionary! {
        "Type" => "Catalog",
        "Pages" => pages_id,
    });
    pdf.trailer.set("Root", catalog_id);
    pdf.compress();

    let mut bytes = Vec::new();
    pdf.save_to(&mut bytes)
        .context("failed to serialize dossier PDF")?;
    Ok(bytes)
}

fn layout_page(page: &ReportPage) -> Vec<Operation> {
    match page.kind {
        PageKind::Cover => layout_cover(page),
        PageKind::Signature => layout_blocks(page, 420),
        _ => layout_blocks(page, TOP_Y),
    }
}

/// Dark full-bleed cover with the title block roughly centered.
fn layout_cover(page: &ReportPage) -> Vec<Operation> {
    let mut w = PageWriter::new();
    w.fill_rect(0, 0, PAGE_WIDTH, PAGE_HEIGHT);
    w.set_white_text();
    for block in &page.blocks {
        match block {
            PageBlock::Heading(title) => w.centered_text(title, 500, 30, true),
            PageBlock::Paragraph(subtitle) => w.centered_text(subtitle, 455, 13, false),
            PageBlock::Table { .. } => {}
        }
    }
    w.ops
}

fn layout_blocks(page: &ReportPage, top: i64) -> Vec<Operation> {
    let mut w = PageWriter::new();
    let mut y = top;
    for block in &page.blocks {
        match block {
            PageBlock::Heading(text) => {
                w.text(MARGIN_X, y, HEADING_SIZE, true, text);
                y -= 34;
            }
            PageBlock::Paragraph(text) => {
                for line in text.split('\n') {
                    if !line.is_empty() {
                        w.text(MARGIN_X, y, BODY_SIZE, false, line);
                    }
                    y -= BODY_LEADING;
                }
                y -= 8;
            }
            PageBlock::Table { headers, rows } => {
                y = w.table(y, headers, rows);
            }
        }
    }
    w.ops
}

/// Accumulates content-stream operations for one page.
struct PageWriter {
    ops: Vec<Operation>,
}

impl PageWriter {
    fn new() -> Self {
        Self { ops: Vec::new() }
    }

    fn text(&mut self, x: i64, y: i64, size: i64, bold: bool, s: &str) {
        let font = if bold { "F2" } else { "F1" };
        self.ops.push(Operation::new("BT", vec![]));
        self.ops
            .push(Operation::new("Tf", vec![font.into(), size.into()]));
        self.ops.push(Operation::new("Td", vec![x.into(), y.into()]));
        self.ops
            .push(Operation::new("Tj", vec![Object::string_literal(s)]));
        self.ops.push(Operation::new("ET", vec![]));
    }

    /// Helvetica averages about half the point size per glyph; close enough
    /// for cover-page centering.
    fn centered_text(&mut self, s: &str, y: i64, size: i64, bold: bool) {
        let approx_width = s.len() as i64 * size / 2;
        let x = (PAGE_WIDTH - approx_width).max(0) / 2;
        self.text(x, y, size, bold, s);
    }

    fn fill_rect(&mut self, x: i64, y: i64, w: i64, h: i64) {
        self.ops.push(Operation::new(
            "re",
            vec![x.into(), y.into(), w.into(), h.into()],
        ));
        self.ops.push(Operation::new("f", vec![]));
    }

    fn stroke_rect(&mut self, x: i64, y: i64, w: i64, h: i64) {
        self.ops.push(Operation::new(
            "re",
            vec![x.into(), y.into(), w.into(), h.into()],
        ));
        self.ops.push(Operation::new("S", vec![]));
    }

    fn set_white_text(&mut self) {
        self.ops
            .push(Operation::new("rg", vec![1.into(), 1.into(), 1.into()]));
    }

    /// Bordered table starting at baseline `y`; returns the y below the
    /// last row. Column widths adapt to 3-column layouts only, which is all
    /// the dossier uses.
    fn table(&mut self, y: i64, headers: &[String], rows: &[Vec<String>]) -> i64 {
        let widths = column_widths(rows.len());
        let row_height = if rows.len() > 10 { 24 } else { 28 };

        let mut cursor = y;
        self.table_row(cursor, row_height, &widths, headers, true);
        cursor -= row_height;
        for row in rows {
            self.table_row(cursor, row_height, &widths, row, false);
            cursor -= row_height;
        }
        cursor
    }

    fn table_row(
        &mut self,
        top: i64,
        row_height: i64,
        widths: &[i64],
        cells: &[impl AsRef<str>],
        bold: bool,
    ) {
        let mut x = MARGIN_X;
        let baseline = top - row_height + 9;
        for (cell, width) in cells.iter().zip(widths) {
            self.stroke_rect(x, top - row_height, *width, row_height);
            self.text(x + 6, baseline, 10, bold, cell.as_ref());
            x += width;
        }
    }
}

fn column_widths(row_count: usize) -> [i64; 3] {
    if row_count > 10 {
        // Audit trail: wide status column.
        [130, 240, 125]
    } else {
        // Composition: three even columns.
        [165, 165, 165]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::inventory::{compute, RawInputs, SupplyMethod};
    use chrono::NaiveDate;

    fn build_reference() -> ReportDocument {
        ReportDocument::build(
            &compute(&RawInputs::default()),
            SupplyMethod::WeightBased.label(),
            NaiveDate::from_ymd_opt(2026, 1, 15).unwrap(),
        )
    }

    #[test]
    fn test_serialized_pdf_reparses_with_seven_pages() {
        let bytes = build_reference().to_pdf_bytes().unwrap();
        let parsed = Document::load_mem(&bytes).unwrap();
        assert_eq!(parsed.get_pages().len(), 7);
    }

    #[test]
    fn test_pdf_starts_with_magic_and_is_nonempty() {
        let bytes = build_reference().to_pdf_bytes().unwrap();
        assert!(bytes.starts_with(b"%PDF-1.5"));
        assert!(bytes.len() > 1000);
    }

    #[test]
    fn test_cover_page_text_survives_round_trip() {
        let bytes = build_reference().to_pdf_bytes().unwrap();
        let parsed = Document::load_mem(&bytes).unwrap();
        let cover = parsed.extract_text(&[1]).unwrap();
        assert!(cover.contains("AETHER CLIMATE CORE"), "got {cover:?}");
    }

    #[test]
    fn test_methodology_page_echoes_method_label() {
        let bytes = ReportDocument::build(
            &compute(&RawInputs::default()),
            SupplyMethod::SpendBased.label(),
            NaiveDate::from_ymd_opt(2026, 1, 15).unwrap(),
        )
        .to_pdf_bytes()
        .unwrap();
        let parsed = Document::load_mem(&bytes).unwrap();
        let methodology = parsed.extract_text(&[4]).unwrap();
        assert!(
            methodology.contains("Economic Input-Output Model"),
            "got {methodology:?}"
        );
    }
}
