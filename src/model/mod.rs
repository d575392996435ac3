use thiserror::Error;

pub mod labels;
pub mod params;
pub mod roc;

#[derive(Debug, Error, PartialEq)]
pub enum ModelError {
    #[error("sample list is empty; no labels can be derived")]
    EmptySamples,
    #[error(
        "degenerate labels: {positives} positive vs {negatives} negative samples; ROC needs both classes"
    )]
    DegenerateLabels { positives: usize, negatives: usize },
    #[error("length mismatch: {values} values vs {labels} labels")]
    LengthMismatch { values: usize, labels: usize },
    #[error("non-finite value at sample position {index}")]
    NonFiniteValue { index: usize },
    #[error("AUC threshold {0} is outside [0, 1]")]
    InvalidThreshold(f64),
}
