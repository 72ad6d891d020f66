//! Page-formatted sources.
//!
//! Each page goes through a [`FallbackChain`]: lopdf's font-aware text
//! extraction first, then a tolerant pass that reads raw string operands
//! straight out of the content stream. Pages that fail are logged and
//! skipped. If no page yields text, the document is scanned again for
//! tabular runs (rows of two or more positioned cells).

use lopdf::content::{Content, Operation};
use lopdf::{Document, Object, ObjectId};

use super::fallback::FallbackChain;
use super::loader::{DocumentFormat, TextLoader};
use crate::error::{Error, Result};

/// Two runs closer than this vertically sit on the same line.
const LINE_TOLERANCE: f32 = 1.0;

/// A `TJ` adjustment more negative than this (thousandths of an em) is
/// wide enough to read as a word gap.
const KERNING_GAP: f32 = 200.0;

fn pdf_error(e: lopdf::Error) -> Error {
    Error::extraction(DocumentFormat::Pdf, e)
}

#[derive(Debug, Clone, Default)]
pub struct PdfLoader;

impl PdfLoader {
    #[must_use]
    pub const fn new() -> Self {
        Self
    }

    /// Synchronous extraction, run inside `spawn_blocking`.
    pub fn extract_sync(data: &[u8]) -> Result<String> {
        let doc = Document::load_mem(data).map_err(pdf_error)?;

        let chain = FallbackChain::<Document>::new()
            .then("page_text", page_text)
            .then("table_cells", table_cells);

        match chain.run(&doc)? {
            Some((strategy, text)) => {
                tracing::debug!(strategy, chars = text.chars().count(), "pdf text extracted");
                Ok(text)
            }
            None => {
                tracing::debug!(
                    pages = doc.get_pages().len(),
                    tried = ?chain.names().collect::<Vec<_>>(),
                    "pdf yielded no text"
                );
                Ok(String::new())
            }
        }
    }
}

#[async_trait::async_trait]
impl TextLoader for PdfLoader {
    fn supported_formats(&self) -> &[DocumentFormat] {
        &[DocumentFormat::Pdf]
    }

    async fn load_bytes(&self, data: Vec<u8>) -> Result<String> {
        tokio::task::spawn_blocking(move || Self::extract_sync(&data))
            .await
            .map_err(|e| Error::extraction(DocumentFormat::Pdf, e))?
    }

    fn name(&self) -> &str {
        "lopdf"
    }
}

pub struct PdfPage<'a> {
    doc: &'a Document,
    number: u32,
    id: ObjectId,
}

impl<'a> PdfPage<'a> {
    fn operations(&self) -> Result<Vec<Operation>> {
        let data = self.doc.get_page_content(self.id).map_err(pdf_error)?;
        let content = Content::decode(&data).map_err(pdf_error)?;
        Ok(content.operations)
    }

    fn all(doc: &'a Document) -> impl Iterator<Item = PdfPage<'a>> + 'a {
        doc.get_pages()
            .into_iter()
            .map(move |(number, id)| PdfPage { doc, number, id })
    }
}

fn page_text(doc: &Document) -> Result<String> {
    let chain = FallbackChain::<PdfPage<'_>>::new()
        .then("primary", primary_text)
        .then("tolerant", tolerant_text);

    let mut text = String::new();
    for page in PdfPage::all(doc) {
        match chain.run(&page) {
            Ok(Some((strategy, page_text))) => {
                tracing::trace!(page = page.number, strategy, "page text");
                text.push_str(&page_text);
                text.push('\n');
            }
            Ok(None) => tracing::debug!(page = page.number, "page has no text"),
            Err(e) => {
                tracing::warn!(page = page.number, error = %e, "skipping unreadable page");
            }
        }
    }
    Ok(text)
}

fn table_cells(doc: &Document) -> Result<String> {
    let mut text = String::new();
    for page in PdfPage::all(doc) {
        let tables = match page.operations() {
            Ok(ops) => extract_tables(&ops),
            Err(e) => {
                tracing::warn!(page = page.number, error = %e, "skipping page tables");
                continue;
            }
        };
        for row in tables.iter().flatten() {
            let cells: Vec<&str> = row
                .iter()
                .map(|c| c.trim())
                .filter(|c| !c.is_empty())
                .collect();
            if !cells.is_empty() {
                text.push_str(&cells.join(" "));
                text.push('\n');
            }
        }
    }
    Ok(text)
}

fn primary_text(page: &PdfPage<'_>) -> Result<String> {
    page.doc.extract_text(&[page.number]).map_err(pdf_error)
}

fn tolerant_text(page: &PdfPage<'_>) -> Result<String> {
    let ops = page.operations()?;
    let lines = group_lines(&text_runs(&ops));
    Ok(lines
        .iter()
        .map(|line| line.join(" "))
        .collect::<Vec<_>>()
        .join("\n"))
}

/// Consecutive lines with at least two cells form a table.
fn extract_tables(ops: &[Operation]) -> Vec<Vec<Vec<String>>> {
    let mut tables = Vec::new();
    let mut current: Vec<Vec<String>> = Vec::new();

    for line in group_lines(&text_runs(ops)) {
        if line.len() >= 2 {
            current.push(line);
        } else if !current.is_empty() {
            tables.push(std::mem::take(&mut current));
        }
    }
    if !current.is_empty() {
        tables.push(current);
    }
    tables
}

#[derive(Debug, Clone, PartialEq)]
struct TextRun {
    y: f32,
    text: String,
}

/// Walks the content stream tracking the text line position, emitting one
/// run per text-showing operator. Font encodings are ignored.
fn text_runs(ops: &[Operation]) -> Vec<TextRun> {
    let mut runs = Vec::new();
    let mut line_y = 0.0_f32;
    let mut leading = 0.0_f32;

    for op in ops {
        let operands = &op.operands;
        match op.operator.as_str() {
            "BT" => line_y = 0.0,
            "Tm" => {
                if let Some(y) = operands.get(5).and_then(number) {
                    line_y = y;
                }
            }
            "Td" | "TD" => {
                if let Some(ty) = operands.get(1).and_then(number) {
                    line_y += ty;
                    if op.operator == "TD" {
                        leading = -ty;
                    }
                }
            }
            "TL" => {
                if let Some(tl) = operands.first().and_then(number) {
                    leading = tl;
                }
            }
            "T*" => line_y -= leading,
            "Tj" => push_run(&mut runs, line_y, operands.first().map(show_text)),
            "'" => {
                line_y -= leading;
                push_run(&mut runs, line_y, operands.first().map(show_text));
            }
            "\"" => {
                line_y -= leading;
                push_run(&mut runs, line_y, operands.get(2).map(show_text));
            }
            "TJ" => push_run(&mut runs, line_y, operands.first().map(show_text)),
            _ => {}
        }
    }
    runs
}

fn push_run(runs: &mut Vec<TextRun>, y: f32, text: Option<String>) {
    if let Some(text) = text.filter(|t| !t.trim().is_empty()) {
        runs.push(TextRun { y, text });
    }
}

fn group_lines(runs: &[TextRun]) -> Vec<Vec<String>> {
    let mut lines: Vec<Vec<String>> = Vec::new();
    let mut last_y: Option<f32> = None;

    for run in runs {
        let same_line = last_y.is_some_and(|y| (y - run.y).abs() <= LINE_TOLERANCE);
        match lines.last_mut() {
            Some(line) if same_line => line.push(run.text.trim().to_string()),
            _ => lines.push(vec![run.text.trim().to_string()]),
        }
        last_y = Some(run.y);
    }
    lines
}

fn show_text(obj: &Object) -> String {
    match obj {
        Object::String(bytes, _) => decode_pdf_string(bytes),
        Object::Array(items) => {
            let mut text = String::new();
            for item in items {
                match item {
                    Object::String(bytes, _) => text.push_str(&decode_pdf_string(bytes)),
                    other => {
                        if number(other).is_some_and(|n| n < -KERNING_GAP) && !text.ends_with(' ') {
                            text.push(' ');
                        }
                    }
                }
            }
            text
        }
        _ => String::new(),
    }
}

fn number(obj: &Object) -> Option<f32> {
    match obj {
        #[allow(clippy::cast_precision_loss)]
        Object::Integer(i) => Some(*i as f32),
        #[allow(clippy::cast_possible_truncation, clippy::unnecessary_cast)]
        Object::Real(r) => Some(*r as f32),
        _ => None,
    }
}

/// UTF-16BE when the string carries a byte order mark, otherwise each byte
/// is read as Latin-1.
fn decode_pdf_string(bytes: &[u8]) -> String {
    if let Some(rest) = bytes.strip_prefix(&[0xFE, 0xFF]) {
        let units: Vec<u16> = rest
            .chunks_exact(2)
            .map(|c| u16::from_be_bytes([c[0], c[1]]))
            .collect();
        return String::from_utf16_lossy(&units);
    }
    bytes
        .iter()
        .map(|&b| char::from(b))
        .filter(|c| !c.is_control() || c.is_whitespace())
        .collect()
}
