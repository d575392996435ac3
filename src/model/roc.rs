use serde::Serialize;

use crate::model::ModelError;

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct RocPoint {
    /// Samples with a value `>= threshold` are called positive.
    pub threshold: f64,
    pub fpr: f64,
    pub tpr: f64,
}

/// ROC curve from (0, 0) to (1, 1) with its trapezoidal AUC.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RocCurve {
    pub points: Vec<RocPoint>,
    pub auc: f64,
}

/// Sweeps every distinct value as a decision threshold in descending order.
///
/// Tied values move FPR and TPR in a single step, so a constant feature
/// traces the diagonal and scores 0.5. Both classes must be present.
pub fn compute_roc(values: &[f64], positives: &[bool]) -> Result<RocCurve, ModelError> {
    if values.len() != positives.len() {
        return Err(ModelError::LengthMismatch {
            values: values.len(),
            labels: positives.len(),
        });
    }
    if let Some(index) = values.iter().position(|v| !v.is_finite()) {
        return Err(ModelError::NonFiniteValue { index });
    }

    let total_pos = positives.iter().filter(|&&p| p).count();
    let total_neg = positives.len() - total_pos;
    if total_pos == 0 || total_neg == 0 {
        return Err(ModelError::DegenerateLabels {
            positives: total_pos,
            negatives: total_neg,
        });
    }

    let mut order: Vec<usize> = (0..values.len()).collect();
    order.sort_by(|&a, &b| values[b].total_cmp(&values[a]));

    let p = total_pos as f64;
    let n = total_neg as f64;

    let mut points = Vec::with_capacity(values.len() + 1);
    points.push(RocPoint {
        threshold: f64::INFINITY,
        fpr: 0.0,
        tpr: 0.0,
    });

    let mut tp = 0usize;
    let mut fp = 0usize;
    let mut i = 0usize;
    while i < order.len() {
        let threshold = values[order[i]];
        while i < order.len() && values[order[i]] == threshold {
            if positives[order[i]] {
                tp += 1;
            } else {
                fp += 1;
            }
            i += 1;
        }
        points.push(RocPoint {
            threshold,
            fpr: fp as f64 / n,
            tpr: tp as f64 / p,
        });
    }

    let auc = trapezoidal_auc(&points);
    Ok(RocCurve { points, auc })
}

fn trapezoidal_auc(points: &[RocPoint]) -> f64 {
    let mut area = 0.0;
    for pair in points.windows(2) {
        area += (pair[1].fpr - pair[0].fpr) * (pair[1].tpr + pair[0].tpr) / 2.0;
    }
    area
}

#[cfg(test)]
#[path = "../../tests/src_inline/model/roc.rs"]
mod tests;
