use std::borrow::Cow;

use crate::model::ModelError;
use crate::model::labels::SampleClass;

pub const DEFAULT_ID_COLUMN: &str = "Ensembl_ID";
pub const DEFAULT_CATEGORY_COLUMN: &str = "race.demographic";
pub const DEFAULT_AUC_THRESHOLD: f64 = 0.9;

/// Demographic categories offered for cohort segregation.
pub const KNOWN_CATEGORIES: &[&str] = &[
    "white",
    "black or african american",
    "not reported",
    "asian",
    "american indian or alaska native",
];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValuePolicy {
    Raw,
    /// Round half to even before the ROC sweep, matching legacy integer counts output.
    RoundHalfEven,
}

impl ValuePolicy {
    /// Raw rows are borrowed; only rounding allocates.
    pub fn apply(self, values: &[f64]) -> Cow<'_, [f64]> {
        match self {
            ValuePolicy::Raw => Cow::Borrowed(values),
            ValuePolicy::RoundHalfEven => {
                Cow::Owned(values.iter().map(|v| v.round_ties_even()).collect())
            }
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            ValuePolicy::Raw => "raw",
            ValuePolicy::RoundHalfEven => "round-half-even",
        }
    }
}

#[derive(Debug, Clone)]
pub struct RankParams {
    pub threshold: f64,
    pub id_column: String,
    pub positive: SampleClass,
    pub value_policy: ValuePolicy,
}

impl RankParams {
    pub fn default_v1() -> Self {
        Self {
            threshold: DEFAULT_AUC_THRESHOLD,
            id_column: DEFAULT_ID_COLUMN.to_string(),
            positive: SampleClass::Cancer,
            value_policy: ValuePolicy::Raw,
        }
    }

    /// Normal-positive orientation with rounded values, as the spreadsheet-era workflow scored genes.
    pub fn legacy_v1() -> Self {
        let mut base = Self::default_v1();
        base.positive = SampleClass::Normal;
        base.value_policy = ValuePolicy::RoundHalfEven;
        base
    }

    pub fn validate(&self) -> Result<(), ModelError> {
        if !(0.0..=1.0).contains(&self.threshold) {
            return Err(ModelError::InvalidThreshold(self.threshold));
        }
        Ok(())
    }
}

#[derive(Debug, Clone)]
pub struct SegregateParams {
    pub categories: Vec<String>,
    pub category_column: String,
    pub id_column: String,
}

impl SegregateParams {
    pub fn new(categories: Vec<String>) -> Self {
        Self {
            categories,
            category_column: DEFAULT_CATEGORY_COLUMN.to_string(),
            id_column: DEFAULT_ID_COLUMN.to_string(),
        }
    }
}

#[derive(Debug, Clone)]
pub struct SubsetParams {
    pub id_column: String,
}

impl Default for SubsetParams {
    fn default() -> Self {
        Self {
            id_column: DEFAULT_ID_COLUMN.to_string(),
        }
    }
}

#[cfg(test)]
#[path = "../../tests/src_inline/model/params.rs"]
mod tests;
