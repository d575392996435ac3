use std::fs::{self, File};
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

use thiserror::Error;

use crate::input::table::StringTable;
use crate::model::params::{RankParams, SegregateParams, SubsetParams};
use crate::pipeline::rank::RankOutput;
use crate::pipeline::segregate::SegregateOutput;
use crate::pipeline::subset::SubsetOutput;
use crate::report::json::{
    build_rank_summary, build_segregate_summary, build_subset_summary, render_summary_json,
};
use crate::report::text::render_rank_report;
use crate::report::{RunInfo, format_f64_6};

#[derive(Debug, Error)]
pub enum ReportError {
    #[error("IO error writing {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("CSV error writing {path}: {source}")]
    Csv {
        path: PathBuf,
        #[source]
        source: csv::Error,
    },
    #[error("JSON serialization failed: {0}")]
    Json(#[from] serde_json::Error),
}

/// Files are written into a hidden staging directory and moved into `out_dir`
/// only once every file has been written.
struct OutputStage {
    out_dir: PathBuf,
    staging: PathBuf,
    files: Vec<String>,
}

impl OutputStage {
    fn create(out_dir: &Path) -> Result<Self, ReportError> {
        let staging = out_dir.join(format!(".kira-aucrank.staging.{}", std::process::id()));
        fs::create_dir_all(&staging).map_err(|source| ReportError::Io {
            path: staging.clone(),
            source,
        })?;
        Ok(Self {
            out_dir: out_dir.to_path_buf(),
            staging,
            files: Vec::new(),
        })
    }

    fn path(&mut self, file_name: &str) -> PathBuf {
        self.files.push(file_name.to_string());
        self.staging.join(file_name)
    }

    /// Moves every staged file into `out_dir`. If one rename fails, the files
    /// already moved are removed again and the stage is discarded.
    fn commit(self) -> Result<Vec<PathBuf>, ReportError> {
        let mut written = Vec::with_capacity(self.files.len());
        let mut failure = None;
        for name in &self.files {
            let to = self.out_dir.join(name);
            match fs::rename(self.staging.join(name), &to) {
                Ok(()) => written.push(to),
                Err(source) => {
                    failure = Some(ReportError::Io { path: to, source });
                    break;
                }
            }
        }

        match failure {
            None => {
                let _ = fs::remove_dir_all(&self.staging);
                Ok(written)
            }
            Some(err) => {
                for moved in &written {
                    if let Err(e) = fs::remove_file(moved) {
                        tracing::warn!("could not remove {}: {}", moved.display(), e);
                    }
                }
                self.abort();
                Err(err)
            }
        }
    }

    fn abort(self) {
        let _ = fs::remove_dir_all(&self.staging);
    }
}

fn staged<F>(out_dir: &Path, write: F) -> Result<Vec<PathBuf>, ReportError>
where
    F: FnOnce(&mut OutputStage) -> Result<(), ReportError>,
{
    let mut stage = OutputStage::create(out_dir)?;
    match write(&mut stage) {
        Ok(()) => {
            let written = stage.commit()?;
            for path in &written {
                tracing::info!("wrote {}", path.display());
            }
            Ok(written)
        }
        Err(err) => {
            stage.abort();
            Err(err)
        }
    }
}

pub fn table_file_name(stem: &str, table: &StringTable) -> String {
    format!("{}.{}", stem, table.delimiter.extension())
}

pub fn write_rank_reports(
    info: &RunInfo,
    params: &RankParams,
    output: &RankOutput,
    out_dir: &Path,
) -> Result<Vec<PathBuf>, ReportError> {
    let summary = build_rank_summary(info, params, output);
    let json = render_summary_json(&summary)?;
    let report = render_rank_report(&summary);

    staged(out_dir, |stage| {
        let path = stage.path("auc_ranking.tsv");
        write_auc_ranking(output, &path)?;

        let path = stage.path("roc_curves.tsv");
        write_roc_curves(output, &path)?;

        let path = stage.path(&table_file_name("filtered_dataset", &output.filtered));
        write_table(&output.filtered, &path)?;

        let path = stage.path("summary.json");
        write_text(&path, &json)?;

        let path = stage.path("report.txt");
        write_text(&path, &report)
    })
}

pub fn write_segregate_reports(
    info: &RunInfo,
    params: &SegregateParams,
    output: &SegregateOutput,
    out_dir: &Path,
) -> Result<Vec<PathBuf>, ReportError> {
    let file_names: Vec<(String, String)> = output
        .categories
        .iter()
        .map(|c| {
            (
                table_file_name(&format!("phenotype_{}", c.slug), &c.phenotype),
                table_file_name(&format!("matched_{}", c.slug), &c.matched),
            )
        })
        .collect();
    let summary = build_segregate_summary(info, params, output, &file_names);
    let json = render_summary_json(&summary)?;

    staged(out_dir, |stage| {
        for (category, (phenotype_file, matched_file)) in output.categories.iter().zip(&file_names)
        {
            let path = stage.path(phenotype_file);
            write_table(&category.phenotype, &path)?;
            let path = stage.path(matched_file);
            write_table(&category.matched, &path)?;
        }
        let path = stage.path("summary.json");
        write_text(&path, &json)
    })
}

pub fn write_subset_reports(
    info: &RunInfo,
    params: &SubsetParams,
    output: &SubsetOutput,
    out_dir: &Path,
) -> Result<Vec<PathBuf>, ReportError> {
    let file_name = table_file_name("dataset", &output.filtered);
    let summary = build_subset_summary(info, params, output, &file_name);
    let json = render_summary_json(&summary)?;

    staged(out_dir, |stage| {
        let path = stage.path(&file_name);
        write_table(&output.filtered, &path)?;
        let path = stage.path("summary.json");
        write_text(&path, &json)
    })
}

pub fn write_table(table: &StringTable, path: &Path) -> Result<(), ReportError> {
    let csv_err = |source| ReportError::Csv {
        path: path.to_path_buf(),
        source,
    };
    let mut w = csv::WriterBuilder::new()
        .delimiter(table.delimiter.byte())
        .from_path(path)
        .map_err(csv_err)?;
    w.write_record(&table.header).map_err(csv_err)?;
    for row in &table.rows {
        w.write_record(row).map_err(csv_err)?;
    }
    w.flush().map_err(|source| ReportError::Io {
        path: path.to_path_buf(),
        source,
    })
}

fn write_auc_ranking(output: &RankOutput, path: &Path) -> Result<(), ReportError> {
    let mut contents = String::from("feature_id\tauc\tabove_threshold\n");
    let mut passing = vec![false; output.ranking.features.len()];
    for &i in &output.ranking.passing {
        passing[i] = true;
    }
    for ((feature_id, auc), above) in output.ranking.auc_map().into_iter().zip(passing) {
        contents.push_str(&format!(
            "{}\t{}\t{}\n",
            feature_id,
            format_f64_6(auc),
            above
        ));
    }
    write_text(path, &contents)
}

fn write_roc_curves(output: &RankOutput, path: &Path) -> Result<(), ReportError> {
    let mut contents = String::from("feature_id\tthreshold\tfpr\ttpr\n");
    for &i in &output.ranking.passing {
        let feature = &output.ranking.features[i];
        for point in &feature.curve.points {
            let threshold = if point.threshold.is_infinite() {
                "inf".to_string()
            } else {
                point.threshold.to_string()
            };
            contents.push_str(&format!(
                "{}\t{}\t{}\t{}\n",
                feature.feature_id,
                threshold,
                format_f64_6(point.fpr),
                format_f64_6(point.tpr)
            ));
        }
    }
    write_text(path, &contents)
}

fn write_text(path: &Path, contents: &str) -> Result<(), ReportError> {
    let io_err = |source| ReportError::Io {
        path: path.to_path_buf(),
        source,
    };
    let mut w = BufWriter::new(File::create(path).map_err(io_err)?);
    w.write_all(contents.as_bytes()).map_err(io_err)?;
    w.flush().map_err(io_err)
}

#[cfg(test)]
#[path = "../../tests/src_inline/pipeline/report.rs"]
mod tests;
