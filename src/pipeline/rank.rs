use std::collections::HashSet;

use rayon::prelude::*;

use crate::input::expr::{ExprMatrix, expr_from_table};
use crate::input::table::StringTable;
use crate::model::ModelError;
use crate::model::labels::{ClassCounts, SampleClass, binarize, derive_labels};
use crate::model::params::RankParams;
use crate::model::roc::{RocCurve, compute_roc};
use crate::pipeline::PipelineError;
use crate::pipeline::join::{count_present, join_rows_by_id};

#[derive(Debug, Clone, PartialEq)]
pub struct FeatureRoc {
    pub feature_id: String,
    pub curve: RocCurve,
}

impl FeatureRoc {
    pub fn auc(&self) -> f64 {
        self.curve.auc
    }
}

/// Per-feature curves in feature-table order plus the indices that passed the threshold.
#[derive(Debug, Clone)]
pub struct Ranking {
    pub features: Vec<FeatureRoc>,
    pub passing: Vec<usize>,
    pub threshold: f64,
}

impl Ranking {
    pub fn auc_map(&self) -> Vec<(&str, f64)> {
        self.features
            .iter()
            .map(|f| (f.feature_id.as_str(), f.auc()))
            .collect()
    }

    pub fn passing_ids(&self) -> HashSet<String> {
        self.passing
            .iter()
            .map(|&i| self.features[i].feature_id.clone())
            .collect()
    }

    /// Passing indices by descending AUC; ties keep feature order.
    pub fn passing_by_auc(&self) -> Vec<usize> {
        let mut order = self.passing.clone();
        order.sort_by(|&a, &b| self.features[b].auc().total_cmp(&self.features[a].auc()));
        order
    }
}

#[derive(Debug, Clone)]
pub struct RankOutput {
    pub class_counts: ClassCounts,
    pub n_samples: usize,
    pub ranking: Ranking,
    pub filtered: StringTable,
}

/// Strictly greater than: a feature sitting exactly on the threshold is dropped.
pub fn select_above(features: &[FeatureRoc], threshold: f64) -> Vec<usize> {
    features
        .iter()
        .enumerate()
        .filter(|(_, f)| f.auc() > threshold)
        .map(|(i, _)| i)
        .collect()
}

pub fn rank_features(
    matrix: &ExprMatrix,
    labels: &[SampleClass],
    params: &RankParams,
) -> Result<Ranking, PipelineError> {
    params.validate()?;
    if labels.len() != matrix.n_samples() {
        return Err(ModelError::LengthMismatch {
            values: matrix.n_samples(),
            labels: labels.len(),
        }
        .into());
    }
    ClassCounts::from_labels(labels).ensure_both(params.positive)?;
    let positives = binarize(labels, params.positive);

    let features = matrix
        .feature_ids
        .par_iter()
        .zip(matrix.values.par_iter())
        .map(|(feature_id, row)| {
            let values = params.value_policy.apply(row);
            compute_roc(&values, &positives)
                .map(|curve| FeatureRoc {
                    feature_id: feature_id.clone(),
                    curve,
                })
                .map_err(|source| PipelineError::Feature {
                    feature_id: feature_id.clone(),
                    table: matrix.name.clone(),
                    source,
                })
        })
        .collect::<Result<Vec<_>, _>>()?;

    let passing = select_above(&features, params.threshold);
    Ok(Ranking {
        features,
        passing,
        threshold: params.threshold,
    })
}

/// Labels the expression table's samples, ranks every feature and narrows `dataset`
/// (the expression table itself when absent) to the passing features.
pub fn run_rank(
    expr: &StringTable,
    dataset: Option<&StringTable>,
    params: &RankParams,
) -> Result<RankOutput, PipelineError> {
    params.validate()?;
    let matrix = expr_from_table(expr, &params.id_column)?;
    tracing::debug!(
        "{}: {} features keyed by '{}' x {} samples",
        matrix.name,
        matrix.n_features(),
        matrix.id_column,
        matrix.n_samples()
    );
    let labels = derive_labels(&matrix.sample_ids)?;
    let class_counts = ClassCounts::from_labels(&labels);
    tracing::info!(
        "samples: {} cancer, {} normal, {} total",
        class_counts.cancer,
        class_counts.normal,
        class_counts.total()
    );

    let ranking = rank_features(&matrix, &labels, params)?;
    tracing::info!(
        "{} of {} features have AUC > {}",
        ranking.passing.len(),
        ranking.features.len(),
        params.threshold
    );

    let dataset = dataset.unwrap_or(expr);
    let keep = ranking.passing_ids();
    let filtered = join_rows_by_id(dataset, &params.id_column, &keep)?;
    let n_present = count_present(&filtered, &params.id_column, &keep)?;
    if n_present < keep.len() {
        tracing::warn!(
            "{} passing features are absent from {}",
            keep.len() - n_present,
            dataset.name
        );
    }

    Ok(RankOutput {
        class_counts,
        n_samples: matrix.n_samples(),
        ranking,
        filtered,
    })
}

#[cfg(test)]
#[path = "../../tests/src_inline/pipeline/rank.rs"]
mod tests;
