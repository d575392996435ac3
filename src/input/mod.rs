use std::path::Path;

use serde::Serialize;
use thiserror::Error;

pub mod expr;
pub mod source;
pub mod spreadsheet;
pub mod table;

use source::read_table_bytes;
use spreadsheet::read_spreadsheet;
use table::{StringTable, parse_delimited};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Delimiter {
    Comma,
    Tab,
}

impl Delimiter {
    pub fn byte(self) -> u8 {
        match self {
            Delimiter::Comma => b',',
            Delimiter::Tab => b'\t',
        }
    }

    pub fn extension(self) -> &'static str {
        match self {
            Delimiter::Comma => "csv",
            Delimiter::Tab => "tsv",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TableFormat {
    Delimited(Delimiter),
    Spreadsheet,
    /// Plain text without a telling extension; the delimiter is sniffed from the header.
    Unknown,
}

#[derive(Debug, Error)]
pub enum InputError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("missing input: {0}")]
    MissingInput(String),
    #[error("{table}: missing required column '{column}'")]
    MissingColumn { table: String, column: String },
    #[error("{table}: malformed table: {reason}")]
    MalformedTable { table: String, reason: String },
    #[error("{table}: unreadable spreadsheet: {reason}")]
    Spreadsheet { table: String, reason: String },
}

impl InputError {
    pub fn malformed(table: &str, reason: impl Into<String>) -> Self {
        InputError::MalformedTable {
            table: table.to_string(),
            reason: reason.into(),
        }
    }
}

/// Reads a CSV/TSV (optionally gzip-compressed) or spreadsheet file into a string table.
pub fn load_table(path: &Path) -> Result<StringTable, InputError> {
    if !path.exists() {
        return Err(InputError::MissingInput(format!(
            "{} does not exist",
            path.display()
        )));
    }
    let name = path.display().to_string();
    let format = detect_format(path);
    let table = match format {
        TableFormat::Spreadsheet => read_spreadsheet(path)?,
        TableFormat::Delimited(delimiter) => {
            let bytes = read_table_bytes(path)?;
            parse_delimited(&name, &bytes, delimiter)?
        }
        TableFormat::Unknown => {
            let bytes = read_table_bytes(path)?;
            let delimiter = sniff_delimiter(&bytes);
            parse_delimited(&name, &bytes, delimiter)?
        }
    };

    tracing::info!(
        "loaded {}: {} rows x {} columns ({:?})",
        name,
        table.rows.len(),
        table.header.len(),
        format
    );
    Ok(table)
}

pub fn detect_format(path: &Path) -> TableFormat {
    let file_name = path
        .file_name()
        .map(|n| n.to_string_lossy().to_ascii_lowercase())
        .unwrap_or_default();
    let stem = file_name.strip_suffix(".gz").unwrap_or(&file_name);
    let ext = stem.rsplit_once('.').map(|(_, ext)| ext).unwrap_or("");
    match ext {
        "csv" => TableFormat::Delimited(Delimiter::Comma),
        "tsv" | "tab" => TableFormat::Delimited(Delimiter::Tab),
        "xlsx" | "xlsm" | "xls" | "ods" => TableFormat::Spreadsheet,
        _ => TableFormat::Unknown,
    }
}

pub fn sniff_delimiter(bytes: &[u8]) -> Delimiter {
    let first_line = bytes.split(|&b| b == b'\n').next().unwrap_or(&[]);
    if first_line.contains(&b'\t') {
        Delimiter::Tab
    } else {
        Delimiter::Comma
    }
}

#[cfg(test)]
#[path = "../../tests/src_inline/input/tests.rs"]
mod tests;
