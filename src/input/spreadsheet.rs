use std::path::Path;

use calamine::{Data, Reader, open_workbook_auto};

use crate::input::table::StringTable;
use crate::input::{Delimiter, InputError};

/// Reads the first worksheet; the first row is the header.
pub fn read_spreadsheet(path: &Path) -> Result<StringTable, InputError> {
    let name = path.display().to_string();
    let spreadsheet_err = |reason: String| InputError::Spreadsheet {
        table: name.clone(),
        reason,
    };

    let mut workbook = open_workbook_auto(path).map_err(|e| spreadsheet_err(e.to_string()))?;
    let range = workbook
        .worksheet_range_at(0)
        .ok_or_else(|| spreadsheet_err("workbook has no worksheets".to_string()))?
        .map_err(|e| spreadsheet_err(e.to_string()))?;

    let mut rows_iter = range.rows();
    let header: Vec<String> = rows_iter
        .next()
        .ok_or_else(|| InputError::malformed(&name, "worksheet is empty"))?
        .iter()
        .map(cell_text)
        .collect();

    let mut rows = Vec::new();
    for row in rows_iter {
        let cells: Vec<String> = row.iter().map(cell_text).collect();
        if cells.iter().all(String::is_empty) {
            continue;
        }
        rows.push(cells);
    }

    // Spreadsheets are written back as TSV.
    let table = StringTable {
        name,
        header,
        rows,
        delimiter: Delimiter::Tab,
    };
    table.validate_header()?;
    Ok(table)
}

pub fn cell_text(cell: &Data) -> String {
    match cell {
        Data::Empty => String::new(),
        Data::String(s) => s.trim().to_string(),
        other => other.to_string(),
    }
}
