use std::collections::HashSet;

use crate::input::InputError;
use crate::input::table::StringTable;

/// Keeps rows whose `id_column` cell is in `keep`, in source order.
pub fn join_rows_by_id(
    table: &StringTable,
    id_column: &str,
    keep: &HashSet<String>,
) -> Result<StringTable, InputError> {
    let id_idx = table.column_index(id_column)?;
    let rows = table
        .rows
        .iter()
        .filter(|row| row.get(id_idx).is_some_and(|id| keep.contains(id.as_str())))
        .cloned()
        .collect();
    Ok(table.with_rows(rows))
}

/// Keeps `id_column` plus every column whose header is in `keep`, in source order.
pub fn join_columns_by_id(
    table: &StringTable,
    id_column: &str,
    keep: &HashSet<String>,
) -> Result<StringTable, InputError> {
    let id_idx = table.column_index(id_column)?;
    let cols: Vec<usize> = table
        .header
        .iter()
        .enumerate()
        .filter(|&(c, name)| c == id_idx || keep.contains(name.as_str()))
        .map(|(c, _)| c)
        .collect();

    let header = cols.iter().map(|&c| table.header[c].clone()).collect();
    let rows = table
        .rows
        .iter()
        .map(|row| {
            cols.iter()
                .map(|&c| row.get(c).cloned().unwrap_or_default())
                .collect()
        })
        .collect();

    Ok(StringTable {
        name: table.name.clone(),
        header,
        rows,
        delimiter: table.delimiter,
    })
}

/// Rows whose `column` contains `category`, ignoring case. Empty cells never match.
pub fn select_by_category(
    table: &StringTable,
    column: &str,
    category: &str,
) -> Result<StringTable, InputError> {
    let idx = table.column_index(column)?;
    let needle = category.to_lowercase();
    let rows = table
        .rows
        .iter()
        .filter(|row| {
            row.get(idx)
                .is_some_and(|cell| !cell.is_empty() && cell.to_lowercase().contains(&needle))
        })
        .cloned()
        .collect();
    Ok(table.with_rows(rows))
}

/// Number of distinct `keep` ids that occur in the `id_column` of `table`.
pub fn count_present(
    table: &StringTable,
    id_column: &str,
    keep: &HashSet<String>,
) -> Result<usize, InputError> {
    let idx = table.column_index(id_column)?;
    let present: HashSet<&str> = table
        .column_values(idx)
        .filter(|id| keep.contains(*id))
        .collect();
    Ok(present.len())
}

/// Non-empty values of the first column, the sample identifiers of a phenotype table.
pub fn first_column_ids(table: &StringTable) -> Vec<String> {
    table
        .column_values(0)
        .filter(|id| !id.is_empty())
        .map(str::to_string)
        .collect()
}

#[cfg(test)]
#[path = "../../tests/src_inline/pipeline/join.rs"]
mod tests;
