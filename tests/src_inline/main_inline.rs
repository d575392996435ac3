
use super::*;

fn parse(args: &[&str]) -> Result<Cli, clap::Error> {
    Cli::try_parse_from(std::iter::once("kira-aucrank").chain(args.iter().copied()))
}

fn rank_args(cli: Cli) -> RankArgs {
    match cli.command {
        Command::Rank(args) => args,
        other => panic!("expected rank command, got {other:?}"),
    }
}

#[test]
fn test_parse_rank_defaults() {
    let cli = parse(&["rank", "--expr", "up.csv", "--out", "out"]).unwrap();
    assert!(!cli.verbose);
    let args = rank_args(cli);
    assert_eq!(args.expr, PathBuf::from("up.csv"));
    assert_eq!(args.dataset, None);
    assert_eq!(args.threshold, 0.9);
    assert_eq!(args.id_column, "Ensembl_ID");
    assert_eq!(args.positive, CliClass::Cancer);
    assert!(!args.round_values);
    assert!(!args.legacy);

    let params = rank_params(&args);
    assert_eq!(params.positive, SampleClass::Cancer);
    assert_eq!(params.value_policy, ValuePolicy::Raw);
}

#[test]
fn test_parse_rank_legacy_sets_orientation_and_rounding() {
    let cli = parse(&[
        "rank",
        "--expr",
        "up.csv",
        "--dataset",
        "combined.csv",
        "--threshold",
        "0.75",
        "--legacy",
        "--out",
        "out",
    ])
    .unwrap();
    let args = rank_args(cli);
    let params = rank_params(&args);
    assert_eq!(params.threshold, 0.75);
    assert_eq!(params.positive, SampleClass::Normal);
    assert_eq!(params.value_policy, ValuePolicy::RoundHalfEven);
    assert_eq!(args.dataset, Some(PathBuf::from("combined.csv")));
}

#[test]
fn test_parse_rank_legacy_conflicts_with_positive() {
    let err = parse(&[
        "rank", "--expr", "up.csv", "--legacy", "--positive", "cancer", "--out", "out",
    ]);
    assert!(err.is_err());
}

#[test]
fn test_parse_rank_rejects_threshold_outside_unit_interval() {
    assert!(parse(&["rank", "--expr", "e.csv", "--threshold", "1.5", "--out", "o"]).is_err());
    assert!(parse(&["rank", "--expr", "e.csv", "--threshold", "abc", "--out", "o"]).is_err());
    assert!(parse(&["rank", "--expr", "e.csv", "--threshold", "1.0", "--out", "o"]).is_ok());
}

#[test]
fn test_parse_segregate_requires_race() {
    assert!(parse(&["segregate", "--phenotype", "p.csv", "--counts", "c.csv", "--out", "o"]).is_err());

    let cli = parse(&[
        "segregate",
        "--phenotype",
        "p.csv",
        "--counts",
        "c.csv",
        "--race",
        "white",
        "--race",
        "asian",
        "--out",
        "o",
        "-v",
    ])
    .unwrap();
    assert!(cli.verbose);
    match cli.command {
        Command::Segregate(args) => {
            assert_eq!(args.races, vec!["white".to_string(), "asian".to_string()]);
            assert_eq!(args.race_column, "race.demographic");
        }
        other => panic!("expected segregate command, got {other:?}"),
    }
}

#[test]
fn test_parse_subset() {
    let cli = parse(&[
        "subset",
        "--genes",
        "deg.csv",
        "--dataset",
        "combined.csv",
        "--id-column",
        "gene",
        "--out",
        "o",
    ])
    .unwrap();
    match cli.command {
        Command::Subset(args) => {
            assert_eq!(args.genes, PathBuf::from("deg.csv"));
            assert_eq!(args.id_column, "gene");
        }
        other => panic!("expected subset command, got {other:?}"),
    }
}

#[test]
fn test_parse_threshold_bounds() {
    assert_eq!(parse_threshold("0.5"), Ok(0.5));
    assert!(parse_threshold("-0.1").is_err());
    assert!(parse_threshold("NaN").is_err());
}
