use std::collections::HashSet;

use crate::input::table::StringTable;
use crate::model::params::{KNOWN_CATEGORIES, SegregateParams};
use crate::pipeline::PipelineError;
use crate::pipeline::join::{first_column_ids, join_columns_by_id, select_by_category};
use crate::report::slugify;

#[derive(Debug, Clone)]
pub struct CategoryOutput {
    pub category: String,
    pub slug: String,
    pub phenotype: StringTable,
    pub matched: StringTable,
    pub n_selected: usize,
    pub n_matched: usize,
}

#[derive(Debug, Clone)]
pub struct SegregateOutput {
    pub categories: Vec<CategoryOutput>,
    pub n_phenotype_rows: usize,
    pub n_count_samples: usize,
}

pub fn run_segregate(
    phenotype: &StringTable,
    counts: &StringTable,
    params: &SegregateParams,
) -> Result<SegregateOutput, PipelineError> {
    // Fail on a missing column before doing per-category work.
    phenotype.column_index(&params.category_column)?;
    counts.column_index(&params.id_column)?;

    let mut seen = HashSet::new();
    let mut categories = Vec::with_capacity(params.categories.len());
    for category in &params.categories {
        if !seen.insert(category.to_lowercase()) {
            tracing::warn!("category '{}' requested twice; processing once", category);
            continue;
        }
        if !KNOWN_CATEGORIES
            .iter()
            .any(|known| known.eq_ignore_ascii_case(category))
        {
            tracing::warn!(
                "category '{}' is not one of the known categories ({})",
                category,
                KNOWN_CATEGORIES.join(", ")
            );
        }

        let selected = select_by_category(phenotype, &params.category_column, category)?;
        let sample_ids: HashSet<String> = first_column_ids(&selected).into_iter().collect();
        let matched = join_columns_by_id(counts, &params.id_column, &sample_ids)?;
        let n_matched = matched.header.len() - 1;
        if n_matched == 0 {
            return Err(PipelineError::SampleMismatch {
                category: category.clone(),
                selected: selected.n_rows(),
                phenotype: phenotype.name.clone(),
                counts: counts.name.clone(),
            });
        }

        tracing::info!(
            "category '{}': {} phenotype rows, {} matched count columns",
            category,
            selected.n_rows(),
            n_matched
        );

        categories.push(CategoryOutput {
            category: category.clone(),
            slug: slugify(category),
            n_selected: selected.n_rows(),
            n_matched,
            phenotype: selected,
            matched,
        });
    }

    Ok(SegregateOutput {
        categories,
        n_phenotype_rows: phenotype.n_rows(),
        n_count_samples: counts.header.len().saturating_sub(1),
    })
}

#[cfg(test)]
#[path = "../../tests/src_inline/pipeline/segregate.rs"]
mod tests;
