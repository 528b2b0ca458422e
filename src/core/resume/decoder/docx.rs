//! DOCX decoding via `docx-rs`.
//!
//! The teacher only ever *writes* DOCX (see `export.rs`'s templating code); no
//! working read path exists anywhere in the reference pack. This walks the
//! parsed document tree directly rather than round-tripping through HTML,
//! since `docx-rs::read_docx` already hands us a structured paragraph/run
//! tree, including table rows/cells for table-based résumé layouts.

use anyhow::{Context, Result};
use docx_rs::{read_docx, DocumentChild, ParagraphChild, RunChild, Table, TableCellContent, TableChild, TableRowChild};

pub fn extract_text(bytes: &[u8]) -> Result<String> {
    let docx = read_docx(bytes).context("docx-rs failed to parse document")?;

    let mut out = String::new();
    for child in &docx.document.children {
        match child {
            DocumentChild::Paragraph(paragraph) => {
                push_paragraph_text(paragraph, &mut out);
                out.push('\n');
            }
            DocumentChild::Table(table) => push_table_text(table, &mut out),
            _ => {}
        }
    }

    Ok(out)
}

fn push_paragraph_text(paragraph: &docx_rs::Paragraph, out: &mut String) {
    for child in &paragraph.children {
        if let ParagraphChild::Run(run) = child {
            for run_child in &run.children {
                match run_child {
                    RunChild::Text(text) => out.push_str(&text.text),
                    RunChild::Break(_) => out.push('\n'),
                    _ => {}
                }
            }
        }
    }
}

/// Walk a table's rows/cells into text, one cell's paragraphs per line.
/// Nested tables recurse; résumé layouts that put experience rows in a
/// table would otherwise lose that content entirely.
fn push_table_text(table: &Table, out: &mut String) {
    for row_child in &table.rows {
        if let TableChild::TableRow(row) = row_child {
            for cell_child in &row.cells {
                if let TableRowChild::TableCell(cell) = cell_child {
                    for content in &cell.children {
                        match content {
                            TableCellContent::Paragraph(paragraph) => {
                                push_paragraph_text(paragraph, out);
                                out.push('\n');
                            }
                            TableCellContent::Table(nested) => push_table_text(nested, out),
                            _ => {}
                        }
                    }
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use docx_rs::{Docx, Paragraph, Run, TableCell, TableRow};

    #[test]
    fn extract_text_rejects_garbage_bytes() {
        let result = extract_text(b"not a docx");
        assert!(result.is_err());
    }

    #[test]
    fn extract_text_walks_table_cells() {
        let table = docx_rs::Table::new(vec![TableRow::new(vec![
            TableCell::new().add_paragraph(Paragraph::new().add_run(Run::new().add_text("Staff Nurse"))),
            TableCell::new().add_paragraph(Paragraph::new().add_run(Run::new().add_text("St. Luke's Medical Center"))),
        ])]);
        let mut buf = Vec::new();
        Docx::new().add_table(table).build().pack(&mut std::io::Cursor::new(&mut buf)).expect("docx packs");

        let text = extract_text(&buf).expect("extracts table text");
        assert!(text.contains("Staff Nurse"));
        assert!(text.contains("St. Luke's Medical Center"));
    }
}
