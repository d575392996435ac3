use std::collections::HashSet;

use crate::input::InputError;
use crate::input::table::StringTable;

/// Feature-major expression values: `values[feature][sample]`.
#[derive(Debug, Clone, PartialEq)]
pub struct ExprMatrix {
    pub name: String,
    pub id_column: String,
    pub feature_ids: Vec<String>,
    pub sample_ids: Vec<String>,
    pub values: Vec<Vec<f64>>,
}

impl ExprMatrix {
    pub fn n_features(&self) -> usize {
        self.feature_ids.len()
    }

    pub fn n_samples(&self) -> usize {
        self.sample_ids.len()
    }
}

/// Interprets a counts table: `id_column` holds feature ids, every other column is a sample.
pub fn expr_from_table(table: &StringTable, id_column: &str) -> Result<ExprMatrix, InputError> {
    let id_idx = table.column_index(id_column)?;
    let sample_cols: Vec<usize> = (0..table.header.len()).filter(|&c| c != id_idx).collect();
    if sample_cols.is_empty() {
        return Err(InputError::malformed(
            &table.name,
            "no sample columns besides the feature identifier column",
        ));
    }
    let sample_ids: Vec<String> = sample_cols
        .iter()
        .map(|&c| table.header[c].clone())
        .collect();
    if let Some(col) = sample_ids.iter().position(String::is_empty) {
        return Err(InputError::malformed(
            &table.name,
            format!("sample column {} has an empty header", sample_cols[col] + 1),
        ));
    }

    let mut seen_samples: HashSet<&str> = HashSet::with_capacity(sample_ids.len());
    for sample in &sample_ids {
        if !seen_samples.insert(sample.as_str()) {
            return Err(InputError::malformed(
                &table.name,
                format!("duplicate sample column '{sample}'"),
            ));
        }
    }

    let mut seen: HashSet<&str> = HashSet::with_capacity(table.rows.len());
    let mut feature_ids = Vec::with_capacity(table.rows.len());
    let mut values = Vec::with_capacity(table.rows.len());

    for (row_idx, row) in table.rows.iter().enumerate() {
        let line_no = row_idx + 2;
        let feature_id = row.get(id_idx).map(String::as_str).unwrap_or("");
        if feature_id.is_empty() {
            return Err(InputError::malformed(
                &table.name,
                format!("empty {id_column} on line {line_no}"),
            ));
        }
        if !seen.insert(feature_id) {
            return Err(InputError::malformed(
                &table.name,
                format!("duplicate feature id '{feature_id}' on line {line_no}"),
            ));
        }

        let mut row_values = Vec::with_capacity(sample_cols.len());
        for &c in &sample_cols {
            let raw = row.get(c).map(String::as_str).unwrap_or("");
            let value = raw.parse::<f64>().ok().filter(|v| v.is_finite()).ok_or_else(|| {
                InputError::malformed(
                    &table.name,
                    format!(
                        "non-numeric value '{}' for feature '{}' in column '{}'",
                        raw, feature_id, table.header[c]
                    ),
                )
            })?;
            row_values.push(value);
        }

        feature_ids.push(feature_id.to_string());
        values.push(row_values);
    }

    if feature_ids.is_empty() {
        return Err(InputError::malformed(&table.name, "table has no feature rows"));
    }

    Ok(ExprMatrix {
        name: table.name.clone(),
        id_column: id_column.to_string(),
        feature_ids,
        sample_ids,
        values,
    })
}
