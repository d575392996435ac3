use super::*;
use crate::input::Delimiter;

fn table(name: &str, header: &[&str], rows: &[&[&str]], delimiter: Delimiter) -> StringTable {
    StringTable {
        name: name.to_string(),
        header: header.iter().map(|s| s.to_string()).collect(),
        rows: rows
            .iter()
            .map(|r| r.iter().map(|s| s.to_string()).collect())
            .collect(),
        delimiter,
    }
}

#[test]
fn test_subset_keeps_listed_ids_in_dataset_order() {
    let keep = table(
        "gene_list.csv",
        &["Ensembl_ID", "auc"],
        &[&["G2", "0.95"], &["G9", "0.93"], &["", "0.91"], &["G1", "0.92"]],
        Delimiter::Comma,
    );
    let dataset = table(
        "combined.tsv",
        &["Ensembl_ID", "S1-01", "S2-11"],
        &[&["G1", "1", "2"], &["G2", "3", "4"], &["G3", "5", "6"]],
        Delimiter::Tab,
    );
    let out = run_subset(&keep, &dataset, &SubsetParams::default()).unwrap();
    assert_eq!(out.n_keep_ids, 3);
    assert_eq!(out.n_missing, 1);
    assert_eq!(out.filtered.rows, vec![vec!["G1", "1", "2"], vec!["G2", "3", "4"]]);
    assert_eq!(out.filtered.delimiter, Delimiter::Tab);
    assert_eq!(out.filtered.name, "combined.tsv");
}

#[test]
fn test_subset_empty_overlap_keeps_header() {
    let keep = table("list.csv", &["Ensembl_ID"], &[&["X"]], Delimiter::Comma);
    let dataset = table(
        "combined.csv",
        &["Ensembl_ID", "S1"],
        &[&["G1", "1"]],
        Delimiter::Comma,
    );
    let out = run_subset(&keep, &dataset, &SubsetParams::default()).unwrap();
    assert_eq!(out.filtered.header, vec!["Ensembl_ID", "S1"]);
    assert_eq!(out.filtered.n_rows(), 0);
    assert_eq!(out.n_missing, 1);
}

#[test]
fn test_subset_missing_id_column_in_either_table() {
    let keep = table("list.csv", &["gene"], &[&["G1"]], Delimiter::Comma);
    let dataset = table(
        "combined.csv",
        &["Ensembl_ID", "S1"],
        &[&["G1", "1"]],
        Delimiter::Comma,
    );
    let err = run_subset(&keep, &dataset, &SubsetParams::default()).unwrap_err();
    assert!(err.to_string().starts_with("list.csv: missing required column"));

    let err = run_subset(&dataset, &keep, &SubsetParams::default()).unwrap_err();
    assert!(err.to_string().starts_with("list.csv: missing required column"));
}

#[test]
fn test_subset_custom_id_column() {
    let keep = table("list.csv", &["gene_id"], &[&["G1"]], Delimiter::Comma);
    let dataset = table(
        "combined.csv",
        &["sample", "gene_id"],
        &[&["S1", "G1"], &["S2", "G2"]],
        Delimiter::Comma,
    );
    let params = SubsetParams {
        id_column: "gene_id".to_string(),
    };
    let out = run_subset(&keep, &dataset, &params).unwrap();
    assert_eq!(out.filtered.rows, vec![vec!["S1", "G1"]]);
}
