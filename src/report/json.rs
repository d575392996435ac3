use std::collections::BTreeMap;

use serde::Serialize;

use crate::model::labels::ClassCounts;
use crate::model::params::{RankParams, SegregateParams, SubsetParams};
use crate::pipeline::rank::RankOutput;
use crate::pipeline::segregate::SegregateOutput;
use crate::pipeline::subset::SubsetOutput;
use crate::report::{RunInfo, median, p90};

#[derive(Debug, Serialize)]
pub struct ToolSection {
    pub name: String,
    pub version: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub git_hash: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct FeatureAuc {
    pub feature_id: String,
    pub auc: f64,
}

#[derive(Debug, Serialize)]
pub struct RankSummary {
    pub tool: ToolSection,
    pub command: &'static str,
    pub input: BTreeMap<String, String>,
    pub params: RankParamsSection,
    pub samples: SamplesSection,
    pub features: FeaturesSection,
    pub passing: Vec<FeatureAuc>,
    pub filtered_rows: usize,
}

#[derive(Debug, Serialize)]
pub struct RankParamsSection {
    pub threshold: f64,
    pub comparison: &'static str,
    pub id_column: String,
    pub positive_class: &'static str,
    pub value_policy: &'static str,
}

#[derive(Debug, Serialize)]
pub struct SamplesSection {
    #[serde(flatten)]
    pub counts: ClassCounts,
    pub total: usize,
}

#[derive(Debug, Serialize)]
pub struct FeaturesSection {
    pub total: usize,
    pub passing: usize,
    pub auc_median: f64,
    pub auc_p90: f64,
    pub auc_max: f64,
}

#[derive(Debug, Serialize)]
pub struct SegregateSummary {
    pub tool: ToolSection,
    pub command: &'static str,
    pub input: BTreeMap<String, String>,
    pub category_column: String,
    pub id_column: String,
    pub phenotype_rows: usize,
    pub count_samples: usize,
    pub categories: Vec<CategorySection>,
}

#[derive(Debug, Serialize)]
pub struct CategorySection {
    pub category: String,
    pub phenotype_rows: usize,
    pub matched_samples: usize,
    pub phenotype_file: String,
    pub matched_file: String,
}

#[derive(Debug, Serialize)]
pub struct SubsetSummary {
    pub tool: ToolSection,
    pub command: &'static str,
    pub input: BTreeMap<String, String>,
    pub id_column: String,
    pub listed_ids: usize,
    pub missing_ids: usize,
    pub kept_rows: usize,
    pub output_file: String,
}

fn tool_section(info: &RunInfo) -> ToolSection {
    ToolSection {
        name: info.tool_name.clone(),
        version: info.tool_version.clone(),
        git_hash: info.git_hash.clone(),
    }
}

fn input_section(info: &RunInfo) -> BTreeMap<String, String> {
    info.inputs.iter().cloned().collect()
}

pub fn build_rank_summary(info: &RunInfo, params: &RankParams, out: &RankOutput) -> RankSummary {
    let aucs: Vec<f64> = out.ranking.auc_map().into_iter().map(|(_, auc)| auc).collect();
    let auc_max = aucs.iter().copied().fold(0.0f64, f64::max);
    let passing = out
        .ranking
        .passing_by_auc()
        .into_iter()
        .map(|i| FeatureAuc {
            feature_id: out.ranking.features[i].feature_id.clone(),
            auc: out.ranking.features[i].auc(),
        })
        .collect();

    RankSummary {
        tool: tool_section(info),
        command: "rank",
        input: input_section(info),
        params: RankParamsSection {
            threshold: out.ranking.threshold,
            comparison: "auc > threshold",
            id_column: params.id_column.clone(),
            positive_class: params.positive.as_str(),
            value_policy: params.value_policy.as_str(),
        },
        samples: SamplesSection {
            counts: out.class_counts,
            total: out.n_samples,
        },
        features: FeaturesSection {
            total: aucs.len(),
            passing: out.ranking.passing.len(),
            auc_median: median(&aucs),
            auc_p90: p90(&aucs),
            auc_max,
        },
        passing,
        filtered_rows: out.filtered.n_rows(),
    }
}

pub fn build_segregate_summary(
    info: &RunInfo,
    params: &SegregateParams,
    out: &SegregateOutput,
    file_names: &[(String, String)],
) -> SegregateSummary {
    let categories = out
        .categories
        .iter()
        .zip(file_names)
        .map(|(c, (phenotype_file, matched_file))| CategorySection {
            category: c.category.clone(),
            phenotype_rows: c.n_selected,
            matched_samples: c.n_matched,
            phenotype_file: phenotype_file.clone(),
            matched_file: matched_file.clone(),
        })
        .collect();

    SegregateSummary {
        tool: tool_section(info),
        command: "segregate",
        input: input_section(info),
        category_column: params.category_column.clone(),
        id_column: params.id_column.clone(),
        phenotype_rows: out.n_phenotype_rows,
        count_samples: out.n_count_samples,
        categories,
    }
}

pub fn build_subset_summary(
    info: &RunInfo,
    params: &SubsetParams,
    out: &SubsetOutput,
    output_file: &str,
) -> SubsetSummary {
    SubsetSummary {
        tool: tool_section(info),
        command: "subset",
        input: input_section(info),
        id_column: params.id_column.clone(),
        listed_ids: out.n_keep_ids,
        missing_ids: out.n_missing,
        kept_rows: out.filtered.n_rows(),
        output_file: output_file.to_string(),
    }
}

pub fn render_summary_json<T: Serialize>(summary: &T) -> serde_json::Result<String> {
    let mut json = serde_json::to_string_pretty(summary)?;
    json.push('\n');
    Ok(json)
}

#[cfg(test)]
#[path = "../../tests/src_inline/report/json.rs"]
mod tests;
