//! PDF rendering and export.

use std::fs::File;
use std::io::BufWriter;
use std::path::{Path, PathBuf};

use plastic_core::CostBreakdown;
use printpdf::{BuiltinFont, IndirectFontRef, Line, Mm, PdfDocument, PdfLayerReference, Point};
use tracing::info;

use crate::ReportError;
use crate::report::{CostReport, REPORT_TITLE, ReportLine};

/// File name every export is written to.
pub const REPORT_FILE_NAME: &str = "plastic_tax_report.pdf";

const PAGE_WIDTH_MM: f32 = 210.0;
const PAGE_HEIGHT_MM: f32 = 297.0;
const MARGIN_MM: f32 = 10.0;
const LINE_HEIGHT_MM: f32 = 10.0;
const TITLE_SIZE_PT: f32 = 16.0;
const BODY_SIZE_PT: f32 = 12.0;

/// Writes the report for the last calculation to `directory`.
///
/// # Errors
///
/// * [`ReportError::NotReady`] if nothing has been calculated yet.
/// * [`ReportError::Io`] if the file cannot be created.
/// * [`ReportError::Pdf`] if the document cannot be produced.
pub fn export_report(
    last: Option<&CostBreakdown>,
    directory: &Path,
) -> Result<PathBuf, ReportError> {
    let breakdown = last.ok_or(ReportError::NotReady)?;
    let path = directory.join(REPORT_FILE_NAME);

    write_pdf(&CostReport::new(breakdown), &path)?;

    info!(path = %path.display(), "report exported");
    Ok(path)
}

/// Renders `report` as a single A4 page at `path`, replacing any existing file.
pub fn write_pdf(
    report: &CostReport,
    path: &Path,
) -> Result<(), ReportError> {
    let (doc, page, layer) =
        PdfDocument::new(REPORT_TITLE, Mm(PAGE_WIDTH_MM), Mm(PAGE_HEIGHT_MM), "Layer 1");
    let layer = doc.get_page(page).get_layer(layer);
    let regular = doc
        .add_builtin_font(BuiltinFont::Helvetica)
        .map_err(|e| ReportError::Pdf(e.to_string()))?;
    let bold = doc
        .add_builtin_font(BuiltinFont::HelveticaBold)
        .map_err(|e| ReportError::Pdf(e.to_string()))?;

    let mut y = PAGE_HEIGHT_MM - 2.0 * MARGIN_MM;
    for line in report.lines() {
        y -= draw_line(&layer, line, y, &regular, &bold);
    }

    let file = File::create(path).map_err(|e| ReportError::Io {
        path: path.to_path_buf(),
        source: e,
    })?;
    doc.save(&mut BufWriter::new(file))
        .map_err(|e| ReportError::Pdf(e.to_string()))
}

/// Draws one line with its top at `y` and returns the height it used.
fn draw_line(
    layer: &PdfLayerReference,
    line: &ReportLine,
    y: f32,
    regular: &IndirectFontRef,
    bold: &IndirectFontRef,
) -> f32 {
    match line {
        ReportLine::Title(text) => {
            let x = centered_x(text, TITLE_SIZE_PT);
            layer.use_text(text.as_str(), TITLE_SIZE_PT, Mm(x), Mm(y), bold);
            2.0 * LINE_HEIGHT_MM
        }
        ReportLine::Text(text) => {
            layer.use_text(text.as_str(), BODY_SIZE_PT, Mm(MARGIN_MM), Mm(y), regular);
            LINE_HEIGHT_MM
        }
        ReportLine::Blank => LINE_HEIGHT_MM,
        ReportLine::Separator => {
            let rule_y = y + LINE_HEIGHT_MM / 2.0;
            layer.add_line(Line {
                points: vec![
                    (Point::new(Mm(MARGIN_MM), Mm(rule_y)), false),
                    (Point::new(Mm(PAGE_WIDTH_MM - MARGIN_MM), Mm(rule_y)), false),
                ],
                is_closed: false,
            });
            LINE_HEIGHT_MM
        }
    }
}

/// Left edge that roughly centres `text` on the page.
///
/// Helvetica averages about half an em per glyph, which is close enough for
/// a one-line heading.
fn centered_x(
    text: &str,
    size_pt: f32,
) -> f32 {
    const MM_PER_PT: f32 = 0.3528;
    let width = text.chars().count() as f32 * size_pt * 0.5 * MM_PER_PT;
    ((PAGE_WIDTH_MM - width) / 2.0).max(MARGIN_MM)
}
