use std::fs;
use std::io::Cursor;
use std::path::Path;

use docx_rs::{
    DocumentChild, Docx, Paragraph, ParagraphChild, Run, RunChild, RunFonts, Table, TableCell,
    TableCellContent, TableChild, TableRowChild, read_docx,
};
use tracing::info;

use crate::error::DocxError;

/// Style id of the default paragraph style in a Word document.
const DEFAULT_STYLE: &str = "Normal";

/// Index path to one table cell inside a document. Only valid for the
/// document it was derived from; resolving it against another tree yields
/// `DocxError::StaleCellRef`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CellRef {
    pub table: usize,
    pub row: usize,
    pub cell: usize,
}

/// Read and parse the template document.
pub fn load_template(path: &Path) -> Result<Docx, DocxError> {
    let bytes = fs::read(path).map_err(|source| DocxError::ReadTemplate {
        path: path.to_path_buf(),
        source,
    })?;
    read_docx(&bytes).map_err(|e| DocxError::Parse(e.to_string()))
}

/// Blanket font override on the document defaults, inherited by every
/// paragraph that does not carry its own run-level formatting.
pub fn apply_default_style(docx: Docx, font_name: &str, font_size_pt: usize) -> Docx {
    docx.default_fonts(RunFonts::new().ascii(font_name).hi_ansi(font_name))
        .default_size(font_size_pt * 2) // OOXML uses half-points
}

/// Scan every table, row, cell, and paragraph for `token` and return the one
/// cell containing it. Zero matching cells is an error, and so is more than
/// one: silently picking one of several candidate cells would substitute into
/// the wrong place without warning.
pub fn find_target_cell(docx: &Docx, token: &str) -> Result<CellRef, DocxError> {
    let mut matches: Vec<CellRef> = Vec::new();
    for (table_idx, table) in tables(docx).enumerate() {
        for (row_idx, TableChild::TableRow(row)) in table.rows.iter().enumerate() {
            for (cell_idx, TableRowChild::TableCell(cell)) in row.cells.iter().enumerate() {
                if cell_paragraphs(cell).any(|p| paragraph_text(p).contains(token)) {
                    matches.push(CellRef {
                        table: table_idx,
                        row: row_idx,
                        cell: cell_idx,
                    });
                }
            }
        }
    }
    match matches.as_slice() {
        [] => Err(DocxError::PlaceholderNotFound {
            token: token.to_string(),
        }),
        [only] => Ok(*only),
        many => Err(DocxError::AmbiguousPlaceholder {
            token: token.to_string(),
            count: many.len(),
        }),
    }
}

/// Replace every occurrence of `token` with `value` in each paragraph of the
/// target cell that contains it. Edited paragraphs are collapsed to a single
/// run and reset to the default paragraph style. Returns the number of
/// paragraphs edited.
pub fn replace_in_cell(
    docx: &mut Docx,
    cell_ref: &CellRef,
    token: &str,
    value: &str,
) -> Result<usize, DocxError> {
    let cell = cell_mut(docx, cell_ref).ok_or(DocxError::StaleCellRef {
        table: cell_ref.table,
        row: cell_ref.row,
        cell: cell_ref.cell,
    })?;

    let mut count = 0;
    for content in &mut cell.children {
        let TableCellContent::Paragraph(paragraph) = content else {
            continue;
        };
        let text = paragraph_text(paragraph);
        if !text.contains(token) {
            continue;
        }
        count += 1;
        let replaced = text.replace(token, value);
        *paragraph = Paragraph::new()
            .add_run(Run::new().add_text(replaced))
            .style(DEFAULT_STYLE);
    }

    info!(token, count, "placeholder replaced");
    Ok(count)
}

/// Plain text of the target cell, paragraphs joined by newlines.
pub fn cell_text(docx: &Docx, cell_ref: &CellRef) -> Result<String, DocxError> {
    let cell = cell(docx, cell_ref).ok_or(DocxError::StaleCellRef {
        table: cell_ref.table,
        row: cell_ref.row,
        cell: cell_ref.cell,
    })?;
    let paragraphs: Vec<String> = cell_paragraphs(cell).map(paragraph_text).collect();
    Ok(paragraphs.join("\n"))
}

/// Pack the document and write it to `path`, overwriting any existing file.
pub fn save(docx: Docx, path: &Path) -> Result<(), DocxError> {
    let mut buf = Cursor::new(Vec::new());
    docx.build()
        .pack(&mut buf)
        .map_err(|e| DocxError::Pack(e.to_string()))?;
    fs::write(path, buf.into_inner()).map_err(|source| DocxError::WriteDocument {
        path: path.to_path_buf(),
        source,
    })?;
    info!(path = %path.display(), "document saved");
    Ok(())
}

fn tables(docx: &Docx) -> impl Iterator<Item = &Table> {
    docx.document.children.iter().filter_map(|child| match child {
        DocumentChild::Table(table) => Some(table.as_ref()),
        _ => None,
    })
}

fn cell<'a>(docx: &'a Docx, cell_ref: &CellRef) -> Option<&'a TableCell> {
    let table = tables(docx).nth(cell_ref.table)?;
    let TableChild::TableRow(row) = table.rows.get(cell_ref.row)?;
    let TableRowChild::TableCell(cell) = row.cells.get(cell_ref.cell)?;
    Some(cell)
}

fn cell_mut<'a>(docx: &'a mut Docx, cell_ref: &CellRef) -> Option<&'a mut TableCell> {
    let table = docx
        .document
        .children
        .iter_mut()
        .filter_map(|child| match child {
            DocumentChild::Table(table) => Some(table.as_mut()),
            _ => None,
        })
        .nth(cell_ref.table)?;
    let TableChild::TableRow(row) = table.rows.get_mut(cell_ref.row)?;
    let TableRowChild::TableCell(cell) = row.cells.get_mut(cell_ref.cell)?;
    Some(cell)
}

fn cell_paragraphs(cell: &TableCell) -> impl Iterator<Item = &Paragraph> {
    cell.children.iter().filter_map(|content| match content {
        TableCellContent::Paragraph(paragraph) => Some(paragraph),
        _ => None,
    })
}

/// Concatenated text of a paragraph's runs. Runs split mid-token by Word's
/// editing history are joined here, so `contains` sees the full paragraph.
fn paragraph_text(paragraph: &Paragraph) -> String {
    let mut text = String::new();
    for child in &paragraph.children {
        let ParagraphChild::Run(run) = child else {
            continue;
        };
        for run_child in &run.children {
            match run_child {
                RunChild::Text(t) => text.push_str(&t.text),
                RunChild::Tab(_) => text.push('\t'),
                _ => {}
            }
        }
    }
    text
}

#[cfg(test)]
mod tests {
    use docx_rs::TableRow;
    use tempfile::tempdir;

    use super::*;

    const COMPANY: &str = "[Target Company]";
    const POSITION: &str = "[Target Position]";

    fn letter_cell(paragraphs: &[&str]) -> TableCell {
        paragraphs.iter().fold(TableCell::new(), |cell, text| {
            cell.add_paragraph(Paragraph::new().add_run(Run::new().add_text(*text)))
        })
    }

    /// Pack a one-table document and read it back, so tests exercise the
    /// same parsed tree the tool sees after `load_template`.
    fn template(cells: Vec<TableCell>) -> Docx {
        let table = Table::new(vec![TableRow::new(cells)]);
        let mut buf = Cursor::new(Vec::new());
        Docx::new()
            .add_table(table)
            .build()
            .pack(&mut buf)
            .unwrap();
        read_docx(&buf.into_inner()).unwrap()
    }

    #[test]
    fn finds_the_single_matching_cell() {
        let docx = template(vec![
            letter_cell(&["no placeholders here"]),
            letter_cell(&["Dear [Target Company] Hiring Team,"]),
        ]);
        let cell_ref = find_target_cell(&docx, COMPANY).unwrap();
        assert_eq!(cell_ref.cell, 1);
    }

    #[test]
    fn missing_placeholder_is_an_error_not_a_crash() {
        let docx = template(vec![letter_cell(&["nothing to replace"])]);
        let err = find_target_cell(&docx, COMPANY).unwrap_err();
        assert!(matches!(err, DocxError::PlaceholderNotFound { .. }));
    }

    #[test]
    fn multiple_matching_cells_are_rejected() {
        let docx = template(vec![
            letter_cell(&["Dear [Target Company],"]),
            letter_cell(&["again [Target Company]"]),
        ]);
        let err = find_target_cell(&docx, COMPANY).unwrap_err();
        assert!(matches!(
            err,
            DocxError::AmbiguousPlaceholder { count: 2, .. }
        ));
    }

    #[test]
    fn two_matching_paragraphs_in_one_cell_is_one_match() {
        let docx = template(vec![letter_cell(&[
            "Dear [Target Company],",
            "I admire [Target Company].",
        ])]);
        assert!(find_target_cell(&docx, COMPANY).is_ok());
    }

    #[test]
    fn replaces_counts_paragraphs_not_occurrences() {
        let mut docx = template(vec![letter_cell(&[
            "[Target Company] and [Target Company] again",
            "only prose here",
            "third mention of [Target Company]",
        ])]);
        let cell_ref = find_target_cell(&docx, COMPANY).unwrap();
        let count = replace_in_cell(&mut docx, &cell_ref, COMPANY, "Acme Corp").unwrap();
        assert_eq!(count, 2);

        let text = cell_text(&docx, &cell_ref).unwrap();
        assert!(!text.contains(COMPANY));
        assert_eq!(text.matches("Acme Corp").count(), 3);
    }

    #[test]
    fn company_and_position_passes_are_independent() {
        let mut docx = template(vec![letter_cell(&[
            "Dear [Target Company] Hiring Team,",
            "...excited about the [Target Position] role...",
        ])]);
        let cell_ref = find_target_cell(&docx, COMPANY).unwrap();
        assert_eq!(
            replace_in_cell(&mut docx, &cell_ref, COMPANY, "Acme Corp").unwrap(),
            1
        );
        assert_eq!(
            replace_in_cell(&mut docx, &cell_ref, POSITION, "Senior Engineer").unwrap(),
            1
        );
        assert_eq!(
            cell_text(&docx, &cell_ref).unwrap(),
            "Dear Acme Corp Hiring Team,\n...excited about the Senior Engineer role..."
        );
    }

    #[test]
    fn stale_cell_ref_is_reported() {
        let mut docx = template(vec![letter_cell(&["Dear [Target Company],"])]);
        let bogus = CellRef {
            table: 3,
            row: 0,
            cell: 0,
        };
        let err = replace_in_cell(&mut docx, &bogus, COMPANY, "Acme Corp").unwrap_err();
        assert!(matches!(err, DocxError::StaleCellRef { table: 3, .. }));
    }

    #[test]
    fn save_then_reload_round_trips_the_substituted_text() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("letter.docx");

        let mut docx = template(vec![letter_cell(&["Dear [Target Company],"])]);
        let cell_ref = find_target_cell(&docx, COMPANY).unwrap();
        replace_in_cell(&mut docx, &cell_ref, COMPANY, "Acme Corp").unwrap();
        save(docx, &path).unwrap();

        let reloaded = load_template(&path).unwrap();
        let cell_ref = CellRef {
            table: 0,
            row: 0,
            cell: 0,
        };
        assert_eq!(cell_text(&reloaded, &cell_ref).unwrap(), "Dear Acme Corp,");
    }

    #[test]
    fn missing_template_file_is_a_read_error() {
        let err = load_template(Path::new("/nonexistent/Cover Letter - Template.docx"))
            .unwrap_err();
        assert!(matches!(err, DocxError::ReadTemplate { .. }));
    }
}
