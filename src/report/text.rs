use crate::report::format_f64_6;
use crate::report::json::RankSummary;

const TOP_LISTED: usize = 25;

pub fn render_rank_report(summary: &RankSummary) -> String {
    let mut out = String::new();

    out.push_str("Discriminative Gene Ranking Report\n");
    out.push_str("==================================\n\n");

    out.push_str("1. Samples\n");
    out.push_str(&format!(
        "Cancer samples: {}\nNormal samples: {}\nTotal samples: {}\n",
        summary.samples.counts.cancer, summary.samples.counts.normal, summary.samples.total
    ));
    out.push_str(&format!(
        "Positive class: {}\n\n",
        summary.params.positive_class
    ));

    out.push_str("2. Ranking\n");
    out.push_str(&format!(
        "Threshold: AUC > {}\n",
        format_f64_6(summary.params.threshold)
    ));
    out.push_str(&format!("Value policy: {}\n", summary.params.value_policy));
    out.push_str(&format!(
        "Features ranked: {}\nFeatures passing: {}\n",
        summary.features.total, summary.features.passing
    ));
    out.push_str(&format!(
        "AUC median: {}\nAUC p90: {}\nAUC max: {}\n\n",
        format_f64_6(summary.features.auc_median),
        format_f64_6(summary.features.auc_p90),
        format_f64_6(summary.features.auc_max)
    ));

    out.push_str("3. High-AUC features\n");
    if summary.passing.is_empty() {
        out.push_str("No feature exceeds the threshold.\n");
    } else {
        for entry in summary.passing.iter().take(TOP_LISTED) {
            out.push_str(&format!(
                "{}\t{}\n",
                entry.feature_id,
                format_f64_6(entry.auc)
            ));
        }
        if summary.passing.len() > TOP_LISTED {
            out.push_str(&format!(
                "... and {} more (see auc_ranking.tsv)\n",
                summary.passing.len() - TOP_LISTED
            ));
        }
    }
    out.push('\n');

    out.push_str("4. Filtered dataset\n");
    out.push_str(&format!("Rows kept: {}\n", summary.filtered_rows));
    if summary.filtered_rows < summary.features.passing {
        out.push_str("Some passing features are absent from the dataset.\n");
    }

    out
}
