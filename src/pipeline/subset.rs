use std::collections::HashSet;

use crate::input::table::StringTable;
use crate::model::params::SubsetParams;
use crate::pipeline::PipelineError;
use crate::pipeline::join::{count_present, join_rows_by_id};

#[derive(Debug, Clone)]
pub struct SubsetOutput {
    pub n_keep_ids: usize,
    pub n_missing: usize,
    pub filtered: StringTable,
}

/// Narrows `dataset` to the feature ids listed in the keep-list's id column.
pub fn run_subset(
    keep_list: &StringTable,
    dataset: &StringTable,
    params: &SubsetParams,
) -> Result<SubsetOutput, PipelineError> {
    let id_idx = keep_list.column_index(&params.id_column)?;
    let keep: HashSet<String> = keep_list
        .column_values(id_idx)
        .filter(|id| !id.is_empty())
        .map(str::to_string)
        .collect();

    let filtered = join_rows_by_id(dataset, &params.id_column, &keep)?;
    let n_missing = keep.len() - count_present(&filtered, &params.id_column, &keep)?;
    if n_missing > 0 {
        tracing::warn!(
            "{} of {} listed ids were not found in {}",
            n_missing,
            keep.len(),
            dataset.name
        );
    }
    tracing::info!(
        "kept {} of {} rows from {}",
        filtered.n_rows(),
        dataset.n_rows(),
        dataset.name
    );

    Ok(SubsetOutput {
        n_keep_ids: keep.len(),
        n_missing,
        filtered,
    })
}

#[cfg(test)]
#[path = "../../tests/src_inline/pipeline/subset.rs"]
mod tests;
