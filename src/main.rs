mod input;
mod logging;
mod model;
mod pipeline;
mod report;

use std::path::{Path, PathBuf};

use clap::{Args, Parser, Subcommand, ValueEnum};
use thiserror::Error;

use crate::input::load_table;
use crate::model::labels::SampleClass;
use crate::model::params::{
    DEFAULT_AUC_THRESHOLD, DEFAULT_CATEGORY_COLUMN, DEFAULT_ID_COLUMN, RankParams,
    SegregateParams, SubsetParams, ValuePolicy,
};
use crate::pipeline::PipelineError;
use crate::pipeline::rank::run_rank;
use crate::pipeline::report::{
    ReportError, write_rank_reports, write_segregate_reports, write_subset_reports,
};
use crate::pipeline::segregate::run_segregate;
use crate::pipeline::subset::run_subset;
use crate::report::RunInfo;

const TOOL_NAME: &str = "kira-aucrank";

#[derive(Debug, Parser)]
#[command(name = "kira-aucrank", version)]
#[command(about = "Cohort segregation, sample matching and ROC/AUC gene ranking")]
struct Cli {
    /// Log at debug level (RUST_LOG overrides)
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Split a phenotype table by category and match each group to the counts table
    Segregate(SegregateArgs),
    /// Rank genes by ROC AUC between cancer and normal samples
    Rank(RankArgs),
    /// Narrow a dataset to the genes of a DEG list
    Subset(SubsetArgs),
}

#[derive(Debug, Args)]
struct SegregateArgs {
    /// Phenotype table; first column holds sample ids
    #[arg(long)]
    phenotype: PathBuf,

    /// Counts table; one column per sample
    #[arg(long)]
    counts: PathBuf,

    /// Category to select, matched case-insensitively as a substring (repeatable)
    #[arg(long = "race", required = true, value_name = "CATEGORY")]
    races: Vec<String>,

    /// Phenotype column holding the category text
    #[arg(long, default_value = DEFAULT_CATEGORY_COLUMN)]
    race_column: String,

    /// Feature identifier column of the counts table
    #[arg(long, default_value = DEFAULT_ID_COLUMN)]
    id_column: String,

    #[arg(short, long)]
    out: PathBuf,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum CliClass {
    Cancer,
    Normal,
}

impl From<CliClass> for SampleClass {
    fn from(class: CliClass) -> Self {
        match class {
            CliClass::Cancer => SampleClass::Cancer,
            CliClass::Normal => SampleClass::Normal,
        }
    }
}

#[derive(Debug, Args)]
struct RankArgs {
    /// Expression table: feature id column plus one column per sample
    #[arg(long)]
    expr: PathBuf,

    /// Combined dataset narrowed to passing genes [default: the expression table]
    #[arg(long)]
    dataset: Option<PathBuf>,

    /// Keep genes with AUC strictly above this value
    #[arg(long, default_value_t = DEFAULT_AUC_THRESHOLD, value_parser = parse_threshold)]
    threshold: f64,

    /// Feature identifier column
    #[arg(long, default_value = DEFAULT_ID_COLUMN)]
    id_column: String,

    /// Class treated as positive in the ROC sweep
    #[arg(long, value_enum, default_value_t = CliClass::Cancer)]
    positive: CliClass,

    /// Round values half-to-even before ranking
    #[arg(long)]
    round_values: bool,

    /// Legacy orientation and rounding (normal positive, rounded values)
    #[arg(long, conflicts_with_all = ["positive", "round_values"])]
    legacy: bool,

    /// Worker threads for the per-gene ROC sweep [default: all cores]
    #[arg(long)]
    threads: Option<usize>,

    #[arg(short, long)]
    out: PathBuf,
}

#[derive(Debug, Args)]
struct SubsetArgs {
    /// DEG list table holding the id column
    #[arg(long)]
    genes: PathBuf,

    /// Dataset to narrow
    #[arg(long)]
    dataset: PathBuf,

    /// Feature identifier column of both tables
    #[arg(long, default_value = DEFAULT_ID_COLUMN)]
    id_column: String,

    #[arg(short, long)]
    out: PathBuf,
}

#[derive(Debug, Error)]
enum RunError {
    #[error(transparent)]
    Pipeline(#[from] PipelineError),
    #[error(transparent)]
    Report(#[from] ReportError),
    #[error("failed to start worker pool: {0}")]
    ThreadPool(#[from] rayon::ThreadPoolBuildError),
}

impl From<input::InputError> for RunError {
    fn from(err: input::InputError) -> Self {
        RunError::Pipeline(err.into())
    }
}

fn main() {
    let cli = Cli::parse();
    logging::init(cli.verbose);
    if let Err(err) = run(cli.command) {
        tracing::error!("{err}");
        std::process::exit(1);
    }
}

fn run(command: Command) -> Result<(), RunError> {
    match command {
        Command::Segregate(args) => run_segregate_cmd(args),
        Command::Rank(args) => run_rank_cmd(args),
        Command::Subset(args) => run_subset_cmd(args),
    }
}

fn run_segregate_cmd(args: SegregateArgs) -> Result<(), RunError> {
    let mut params = SegregateParams::new(args.races);
    params.category_column = args.race_column;
    params.id_column = args.id_column;
    let phenotype = load_table(&args.phenotype)?;
    let counts = load_table(&args.counts)?;
    let output = run_segregate(&phenotype, &counts, &params)?;

    let info = run_info(&[("phenotype", &args.phenotype), ("counts", &args.counts)]);
    write_segregate_reports(&info, &params, &output, &args.out)?;
    Ok(())
}

fn run_rank_cmd(args: RankArgs) -> Result<(), RunError> {
    if let Some(threads) = args.threads {
        rayon::ThreadPoolBuilder::new()
            .num_threads(threads)
            .build_global()?;
    }
    let params = rank_params(&args);
    tracing::debug!("rank parameters: {:?}", params);

    let expr = load_table(&args.expr)?;
    let dataset = args.dataset.as_deref().map(load_table).transpose()?;
    let output = run_rank(&expr, dataset.as_ref(), &params)?;

    let mut inputs = vec![("expr", args.expr.as_path())];
    if let Some(path) = &args.dataset {
        inputs.push(("dataset", path.as_path()));
    }
    let info = run_info(&inputs);
    write_rank_reports(&info, &params, &output, &args.out)?;
    Ok(())
}

fn run_subset_cmd(args: SubsetArgs) -> Result<(), RunError> {
    let params = SubsetParams {
        id_column: args.id_column,
    };
    let genes = load_table(&args.genes)?;
    let dataset = load_table(&args.dataset)?;
    let output = run_subset(&genes, &dataset, &params)?;

    let info = run_info(&[("genes", &args.genes), ("dataset", &args.dataset)]);
    write_subset_reports(&info, &params, &output, &args.out)?;
    Ok(())
}

fn rank_params(args: &RankArgs) -> RankParams {
    let mut params = if args.legacy {
        RankParams::legacy_v1()
    } else {
        let mut base = RankParams::default_v1();
        base.positive = args.positive.into();
        if args.round_values {
            base.value_policy = ValuePolicy::RoundHalfEven;
        }
        base
    };
    params.threshold = args.threshold;
    params.id_column = args.id_column.clone();
    params
}

fn parse_threshold(raw: &str) -> Result<f64, String> {
    let value: f64 = raw
        .parse()
        .map_err(|_| format!("'{raw}' is not a number"))?;
    if !(0.0..=1.0).contains(&value) {
        return Err(format!("{value} is outside [0, 1]"));
    }
    Ok(value)
}

fn run_info<P: AsRef<Path>>(inputs: &[(&str, P)]) -> RunInfo {
    RunInfo {
        tool_name: TOOL_NAME.to_string(),
        tool_version: env!("CARGO_PKG_VERSION").to_string(),
        git_hash: read_git_hash(&PathBuf::from(".")),
        inputs: inputs
            .iter()
            .map(|(k, p)| (k.to_string(), p.as_ref().display().to_string()))
            .collect(),
    }
}

fn read_git_hash(repo_root: &Path) -> Option<String> {
    let head = repo_root.join(".git/HEAD");
    let content = std::fs::read_to_string(head).ok()?;
    if let Some(ref_line) = content.strip_prefix("ref: ") {
        let ref_path = repo_root.join(".git").join(ref_line.trim());
        return std::fs::read_to_string(ref_path)
            .ok()
            .map(|s| s.trim().to_string());
    }
    Some(content.trim().to_string())
}

#[cfg(test)]
#[path = "../tests/src_inline/main_inline.rs"]
mod tests;
