use thiserror::Error;

use crate::input::InputError;
use crate::model::ModelError;

pub mod join;
pub mod rank;
pub mod report;
pub mod segregate;
pub mod subset;

#[derive(Debug, Error)]
pub enum PipelineError {
    #[error(transparent)]
    Input(#[from] InputError),
    #[error(transparent)]
    Model(#[from] ModelError),
    #[error(
        "no sample of category '{category}' ({selected} rows in {phenotype}) matches a column of {counts}"
    )]
    SampleMismatch {
        category: String,
        selected: usize,
        phenotype: String,
        counts: String,
    },
    #[error("ROC failed for feature '{feature_id}' in {table}: {source}")]
    Feature {
        feature_id: String,
        table: String,
        #[source]
        source: ModelError,
    },
}
