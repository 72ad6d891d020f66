//! In-memory PDF and DOCX builders for tests.

use docx_rs::{Docx, Paragraph, Run, Table, TableCell, TableRow};
use lopdf::content::{Content, Operation};
use lopdf::{dictionary, Document, Object, Stream};

/// One positioned text run, optionally with a font selected first.
pub fn show_at(x: i64, y: i64, text: &str, with_font: bool) -> Vec<Operation> {
    let mut ops = vec![Operation::new("BT", vec![])];
    if with_font {
        ops.push(Operation::new("Tf", vec!["F1".into(), 12.into()]));
    }
    ops.push(Operation::new("Td", vec![x.into(), y.into()]));
    ops.push(Operation::new("Tj", vec![Object::string_literal(text)]));
    ops.push(Operation::new("ET", vec![]));
    ops
}

/// Builds a PDF with one page per entry; each page is a list of runs.
pub fn build_pdf(pages: &[Vec<Vec<Operation>>]) -> Vec<u8> {
    let mut doc = Document::with_version("1.5");
    let pages_id = doc.new_object_id();
    let font_id = doc.add_object(dictionary! {
        "Type" => "Font",
        "Subtype" => "Type1",
        "BaseFont" => "Courier",
    });
    let resources_id = doc.add_object(dictionary! {
        "Font" => dictionary! {
            "F1" => font_id,
        },
    });

    let mut kids = Vec::new();
    for runs in pages {
        let content: Content<Vec<Operation>> = Content {
            operations: runs.iter().flatten().cloned().collect(),
        };
        let content_id = doc.add_object(Stream::new(
            dictionary! {},
            content.encode().expect("encode content"),
        ));
        let page_id = doc.add_object(dictionary! {
            "Type" => "Page",
            "Parent" => pages_id,
            "Contents" => content_id,
            "Resources" => resources_id,
            "MediaBox" => vec![0.into(), 0.into(), 612.into(), 792.into()],
        });
        kids.push(Object::from(page_id));
    }

    let count = i64::try_from(kids.len()).expect("page count");
    doc.objects.insert(
        pages_id,
        Object::Dictionary(dictionary! {
            "Type" => "Pages",
            "Kids" => kids,
            "Count" => count,
        }),
    );
    let catalog_id = doc.add_object(dictionary! {
        "Type" => "Catalog",
        "Pages" => pages_id,
    });
    doc.trailer.set("Root", catalog_id);

    let mut buf = Vec::new();
    doc.save_to(&mut buf).expect("save pdf");
    buf
}

fn paragraph(text: &str) -> Paragraph {
    Paragraph::new().add_run(Run::new().add_text(text))
}

/// Builds a DOCX with the given body paragraphs followed by one table.
pub fn build_docx(paragraphs: &[&str], rows: &[&[&str]]) -> Vec<u8> {
    let mut docx = Docx::new();
    for text in paragraphs {
        docx = docx.add_paragraph(paragraph(text));
    }
    if !rows.is_empty() {
        let table = Table::new(
            rows.iter()
                .map(|cells| {
                    TableRow::new(
                        cells
                            .iter()
                            .map(|c| TableCell::new().add_paragraph(paragraph(c)))
                            .collect(),
                    )
                })
                .collect(),
        );
        docx = docx.add_table(table);
    }

    let mut cursor = std::io::Cursor::new(Vec::new());
    docx.build().pack(&mut cursor).expect("pack docx");
    cursor.into_inner()
}
