//! Flow-formatted sources via docx-rs.

use docx_rs::{DocumentChild, ParagraphChild, RunChild, TableChild, TableRowChild};

use super::loader::{DocumentFormat, TextLoader};
use crate::error::{Error, Result};

/// Body paragraphs come first, newline-joined (empty paragraphs included,
/// so blank lines survive). Table cells follow, each on its own line.
#[derive(Debug, Clone, Default)]
pub struct DocxLoader;

impl DocxLoader {
    #[must_use]
    pub const fn new() -> Self {
        Self
    }

    pub fn extract_sync(data: &[u8]) -> Result<String> {
        let docx = docx_rs::read_docx(data).map_err(|e| Error::extraction(DocumentFormat::Docx, e))?;

        let mut paragraphs: Vec<String> = Vec::new();
        let mut cells: Vec<String> = Vec::new();

        for child in &docx.document.children {
            match child {
                DocumentChild::Paragraph(p) => paragraphs.push(paragraph_text(p)),
                DocumentChild::Table(t) => cells.extend(table_cell_texts(t)),
                _ => {}
            }
        }

        let mut text = paragraphs.join("\n");
        let cells: Vec<String> = cells.into_iter().filter(|c| !c.is_empty()).collect();
        if !cells.is_empty() && !text.is_empty() && !text.ends_with('\n') {
            text.push('\n');
        }
        for cell in cells {
            text.push_str(&cell);
            text.push('\n');
        }

        tracing::debug!(
            paragraphs = paragraphs.len(),
            chars = text.chars().count(),
            "docx text extracted"
        );
        Ok(text)
    }
}

#[async_trait::async_trait]
impl TextLoader for DocxLoader {
    fn supported_formats(&self) -> &[DocumentFormat] {
        &[DocumentFormat::Docx]
    }

    async fn load_bytes(&self, data: Vec<u8>) -> Result<String> {
        tokio::task::spawn_blocking(move || Self::extract_sync(&data))
            .await
            .map_err(|e| Error::extraction(DocumentFormat::Docx, e))?
    }

    fn name(&self) -> &str {
        "docx-rs"
    }
}

fn paragraph_text(p: &docx_rs::Paragraph) -> String {
    let mut text = String::new();

    for child in &p.children {
        match child {
            ParagraphChild::Run(r) => push_run(&mut text, r),
            ParagraphChild::Hyperlink(h) => {
                for child in &h.children {
                    if let ParagraphChild::Run(r) = child {
                        push_run(&mut text, r);
                    }
                }
            }
            _ => {}
        }
    }

    text
}

fn push_run(text: &mut String, r: &docx_rs::Run) {
    for run_child in &r.children {
        match run_child {
            RunChild::Text(t) => text.push_str(&t.text),
            RunChild::Tab(_) => text.push('\t'),
            RunChild::Break(_) => text.push('\n'),
            _ => {}
        }
    }
}

/// A cell's text is its paragraphs joined by newlines.
fn table_cell_texts(t: &docx_rs::Table) -> Vec<String> {
    let mut texts = Vec::new();

    for row in &t.rows {
        let TableChild::TableRow(r) = row;
        for cell in &r.cells {
            let TableRowChild::TableCell(c) = cell;
            let paragraphs: Vec<String> = c
                .children
                .iter()
                .filter_map(|child| match child {
                    docx_rs::TableCellContent::Paragraph(p) => Some(paragraph_text(p)),
                    _ => None,
                })
                .collect();
            texts.push(paragraphs.join("\n"));
        }
    }

    texts
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ingest::fixtures::build_docx;

    #[test]
    fn test_paragraphs_newline_joined() {
        let data = build_docx(&["Jane Doe", "", "jane@example.com"], &[]);
        let text = DocxLoader::extract_sync(&data).unwrap();
        assert_eq!(text, "Jane Doe\n\njane@example.com");
    }

    #[test]
    fn test_table_cells_appended() {
        let data = build_docx(
            &["Jane Doe"],
            &[&["Skills", "Rust, Go"], &["Education", ""]],
        );
        let text = DocxLoader::extract_sync(&data).unwrap();
        assert_eq!(text, "Jane Doe\nSkills\nRust, Go\nEducation\n");
    }

    #[test]
    fn test_invalid_docx_is_extraction_error() {
        let err = DocxLoader::extract_sync(b"PK\x03\x04 broken zip").unwrap_err();
        assert!(matches!(
            err,
            Error::Extraction {
                format: DocumentFormat::Docx,
                ..
            }
        ));
    }

    #[tokio::test]
    async fn test_loader_name_and_formats() {
        let loader = DocxLoader::new();
        assert_eq!(loader.name(), "docx-rs");
        assert!(loader.can_load(DocumentFormat::Docx));
        assert!(!loader.can_load(DocumentFormat::Pdf));
        assert!(loader.load_bytes(Vec::new()).await.is_err());
    }
}
