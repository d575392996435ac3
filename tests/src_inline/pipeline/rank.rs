use super::*;
use crate::input::Delimiter;
use crate::model::params::ValuePolicy;

fn table(name: &str, header: &[&str], rows: &[&[&str]]) -> StringTable {
    StringTable {
        name: name.to_string(),
        header: header.iter().map(|s| s.to_string()).collect(),
        rows: rows
            .iter()
            .map(|r| r.iter().map(|s| s.to_string()).collect())
            .collect(),
        delimiter: Delimiter::Comma,
    }
}

fn feature(id: &str, auc: f64) -> FeatureRoc {
    FeatureRoc {
        feature_id: id.to_string(),
        curve: RocCurve {
            points: Vec::new(),
            auc,
        },
    }
}

fn params(threshold: f64) -> RankParams {
    let mut p = RankParams::default_v1();
    p.threshold = threshold;
    p
}

/// Two cancer samples and one normal; A separates the classes, B is flat.
fn three_sample_table() -> StringTable {
    table(
        "up.csv",
        &["Ensembl_ID", "TCGA-1-01", "TCGA-2-11", "TCGA-3-01"],
        &[&["A", "9", "1", "8"], &["B", "4", "4", "4"]],
    )
}

#[test]
fn test_threshold_is_strictly_greater() {
    let features = vec![
        feature("at", 0.9),
        feature("above", 0.9001),
        feature("below", 0.5),
    ];
    assert_eq!(select_above(&features, 0.9), vec![1]);
    assert_eq!(select_above(&features, 0.0), vec![0, 1, 2]);
    assert!(select_above(&features, 1.0).is_empty());
}

#[test]
fn test_end_to_end_three_samples_two_features() {
    let expr = three_sample_table();
    let out = run_rank(&expr, None, &params(0.8)).unwrap();

    assert_eq!(out.class_counts.cancer, 2);
    assert_eq!(out.class_counts.normal, 1);
    assert_eq!(out.n_samples, 3);
    assert_eq!(out.ranking.auc_map(), vec![("A", 1.0), ("B", 0.5)]);
    let passing: Vec<(&str, f64)> = out
        .ranking
        .passing
        .iter()
        .map(|&i| (out.ranking.features[i].feature_id.as_str(), out.ranking.features[i].auc()))
        .collect();
    assert_eq!(passing, vec![("A", 1.0)]);

    // Without --dataset the expression table itself is narrowed.
    assert_eq!(out.filtered.rows, vec![vec!["A", "9", "1", "8"]]);
}

#[test]
fn test_rank_filters_separate_dataset() {
    let expr = three_sample_table();
    let combined = table(
        "combined.csv",
        &["Ensembl_ID", "TCGA-9-01"],
        &[&["B", "0"], &["A", "1"], &["C", "2"]],
    );
    let out = run_rank(&expr, Some(&combined), &params(0.8)).unwrap();
    assert_eq!(out.filtered.name, "combined.csv");
    assert_eq!(out.filtered.rows, vec![vec!["A", "1"]]);
}

#[test]
fn test_rank_degenerate_labels() {
    let expr = table(
        "up.csv",
        &["Ensembl_ID", "TCGA-1-11", "TCGA-2-11"],
        &[&["A", "1", "2"]],
    );
    let err = run_rank(&expr, None, &params(0.8)).unwrap_err();
    assert!(matches!(
        err,
        PipelineError::Model(ModelError::DegenerateLabels {
            positives: 0,
            negatives: 2
        })
    ));
}

#[test]
fn test_rank_invalid_threshold() {
    let err = run_rank(&three_sample_table(), None, &params(1.2)).unwrap_err();
    assert!(matches!(
        err,
        PipelineError::Model(ModelError::InvalidThreshold(_))
    ));
}

#[test]
fn test_rank_missing_id_column() {
    let err = run_rank(&three_sample_table(), None, &{
        let mut p = params(0.8);
        p.id_column = "gene_id".to_string();
        p
    })
    .unwrap_err();
    assert!(err.to_string().contains("missing required column 'gene_id'"));
}

#[test]
fn test_normal_positive_flips_auc() {
    let expr = table(
        "up.csv",
        &["Ensembl_ID", "S1-01", "S2-11", "S3-01", "S4-11"],
        &[&["A", "9", "1", "2", "3"]],
    );
    let cancer = run_rank(&expr, None, &params(0.0)).unwrap();
    let mut normal_params = params(0.0);
    normal_params.positive = SampleClass::Normal;
    let normal = run_rank(&expr, None, &normal_params).unwrap();

    let a = cancer.ranking.features[0].auc();
    let b = normal.ranking.features[0].auc();
    assert!((a + b - 1.0).abs() < 1e-12);
    assert!((a - 0.75).abs() < 1e-12);
}

#[test]
fn test_rounding_policy_merges_close_values() {
    // Raw values separate perfectly; rounded half-to-even they all become 2.
    let expr = table(
        "up.csv",
        &["Ensembl_ID", "S1-01", "S2-11", "S3-01", "S4-11"],
        &[&["A", "2.4", "1.5", "2.3", "2.2"]],
    );
    let raw = run_rank(&expr, None, &params(0.5)).unwrap();
    assert_eq!(raw.ranking.features[0].auc(), 1.0);

    let mut rounded_params = params(0.0);
    rounded_params.value_policy = ValuePolicy::RoundHalfEven;
    let rounded = run_rank(&expr, None, &rounded_params).unwrap();
    assert_eq!(rounded.ranking.features[0].auc(), 0.5);
}

#[test]
fn test_rank_features_length_mismatch() {
    let expr = three_sample_table();
    let matrix = expr_from_table(&expr, "Ensembl_ID").unwrap();
    let labels = vec![SampleClass::Cancer, SampleClass::Normal];
    let err = rank_features(&matrix, &labels, &params(0.5)).unwrap_err();
    assert!(matches!(
        err,
        PipelineError::Model(ModelError::LengthMismatch { .. })
    ));
}

#[test]
fn test_rank_wide_table_keeps_feature_order() {
    let mut rows: Vec<Vec<String>> = Vec::new();
    for g in 0..200 {
        rows.push(vec![
            format!("G{g}"),
            format!("{}", g),
            "0".to_string(),
            format!("{}", 400 - g),
            "1".to_string(),
        ]);
    }
    let expr = StringTable {
        name: "wide.csv".to_string(),
        header: ["Ensembl_ID", "S1-01", "S2-11", "S3-01", "S4-11"]
            .iter()
            .map(|s| s.to_string())
            .collect(),
        rows,
        delimiter: Delimiter::Comma,
    };
    let out = run_rank(&expr, None, &params(0.9)).unwrap();
    let ids: Vec<&str> = out
        .ranking
        .features
        .iter()
        .map(|f| f.feature_id.as_str())
        .collect();
    let expected: Vec<String> = (0..200).map(|g| format!("G{g}")).collect();
    assert_eq!(ids, expected);
    // G0 and G1 tie with a normal sample; every later gene separates.
    assert_eq!(out.ranking.passing.len(), 198);
    assert_eq!(out.ranking.passing[0], 2);
}

#[test]
fn test_passing_by_auc_orders_descending_with_stable_ties() {
    let ranking = Ranking {
        features: vec![
            feature("a", 0.91),
            feature("b", 0.99),
            feature("c", 0.91),
            feature("d", 0.95),
        ],
        passing: vec![0, 1, 2, 3],
        threshold: 0.9,
    };
    assert_eq!(ranking.passing_by_auc(), vec![1, 3, 0, 2]);
}
