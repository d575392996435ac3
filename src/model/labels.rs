use serde::Serialize;

use crate::model::ModelError;

/// Sample barcodes carrying this marker are tumour samples (`TCGA-XX-0001-01`).
pub const CANCER_MARKER: &str = "-01";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum SampleClass {
    Cancer,
    Normal,
}

impl SampleClass {
    pub fn as_str(self) -> &'static str {
        match self {
            SampleClass::Cancer => "cancer",
            SampleClass::Normal => "normal",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ClassCounts {
    pub cancer: usize,
    pub normal: usize,
}

impl ClassCounts {
    pub fn from_labels(labels: &[SampleClass]) -> Self {
        let cancer = labels.iter().filter(|&&l| l == SampleClass::Cancer).count();
        Self {
            cancer,
            normal: labels.len() - cancer,
        }
    }

    pub fn total(&self) -> usize {
        self.cancer + self.normal
    }

    pub fn count(&self, class: SampleClass) -> usize {
        match class {
            SampleClass::Cancer => self.cancer,
            SampleClass::Normal => self.normal,
        }
    }

    pub fn ensure_both(&self, positive: SampleClass) -> Result<(), ModelError> {
        if self.cancer == 0 || self.normal == 0 {
            let positives = self.count(positive);
            return Err(ModelError::DegenerateLabels {
                positives,
                negatives: self.total() - positives,
            });
        }
        Ok(())
    }
}

pub fn classify_sample(sample_id: &str) -> SampleClass {
    if sample_id.contains(CANCER_MARKER) {
        SampleClass::Cancer
    } else {
        SampleClass::Normal
    }
}

pub fn derive_labels<S: AsRef<str>>(sample_ids: &[S]) -> Result<Vec<SampleClass>, ModelError> {
    if sample_ids.is_empty() {
        return Err(ModelError::EmptySamples);
    }
    Ok(sample_ids
        .iter()
        .map(|id| classify_sample(id.as_ref()))
        .collect())
}

/// Indicator vector: `true` where the label is the positive class.
pub fn binarize(labels: &[SampleClass], positive: SampleClass) -> Vec<bool> {
    labels.iter().map(|&l| l == positive).collect()
}

#[cfg(test)]
#[path = "../../tests/src_inline/model/labels.rs"]
mod tests;
