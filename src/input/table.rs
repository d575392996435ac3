use std::collections::HashSet;

use crate::input::{Delimiter, InputError};

const UTF8_BOM: &[u8] = b"\xEF\xBB\xBF";

/// A header plus rows of raw cells, written back verbatim by the report layer.
#[derive(Debug, Clone, PartialEq)]
pub struct StringTable {
    pub name: String,
    pub header: Vec<String>,
    pub rows: Vec<Vec<String>>,
    pub delimiter: Delimiter,
}

impl StringTable {
    pub fn column_index(&self, column: &str) -> Result<usize, InputError> {
        self.header
            .iter()
            .position(|h| h == column)
            .ok_or_else(|| InputError::MissingColumn {
                table: self.name.clone(),
                column: column.to_string(),
            })
    }

    pub fn column_values(&self, idx: usize) -> impl Iterator<Item = &str> {
        self.rows
            .iter()
            .map(move |row| row.get(idx).map(String::as_str).unwrap_or(""))
    }

    /// Copy of this table with the same header and delimiter but different rows.
    pub fn with_rows(&self, rows: Vec<Vec<String>>) -> StringTable {
        StringTable {
            name: self.name.clone(),
            header: self.header.clone(),
            rows,
            delimiter: self.delimiter,
        }
    }

    pub fn n_rows(&self) -> usize {
        self.rows.len()
    }

    /// Every reader calls this: the header must be non-empty and column names unique.
    pub fn validate_header(&self) -> Result<(), InputError> {
        if self.header.iter().all(String::is_empty) {
            return Err(InputError::malformed(&self.name, "table has no header row"));
        }
        let mut seen = HashSet::with_capacity(self.header.len());
        for column in &self.header {
            if !column.is_empty() && !seen.insert(column.as_str()) {
                return Err(InputError::malformed(
                    &self.name,
                    format!("duplicate column header '{column}'"),
                ));
            }
        }
        Ok(())
    }
}

pub fn parse_delimited(
    name: &str,
    bytes: &[u8],
    delimiter: Delimiter,
) -> Result<StringTable, InputError> {
    let bytes = bytes.strip_prefix(UTF8_BOM).unwrap_or(bytes);
    let mut reader = csv::ReaderBuilder::new()
        .delimiter(delimiter.byte())
        .has_headers(true)
        .flexible(false)
        .trim(csv::Trim::All)
        .from_reader(bytes);

    let header: Vec<String> = reader
        .headers()
        .map_err(|e| InputError::malformed(name, e.to_string()))?
        .iter()
        .map(str::to_string)
        .collect();
    let mut rows = Vec::new();
    for record in reader.records() {
        let record = record.map_err(|e| InputError::malformed(name, e.to_string()))?;
        if record.iter().all(str::is_empty) {
            continue;
        }
        rows.push(record.iter().map(str::to_string).collect());
    }

    let table = StringTable {
        name: name.to_string(),
        header,
        rows,
        delimiter,
    };
    table.validate_header()?;
    Ok(table)
}
