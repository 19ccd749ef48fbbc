use crate::Label;
use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Debug, Error, PartialEq)]
pub enum ClassifyError {
    #[error("feature index {index} is outside the classifier's {n_features} features")]
    FeatureOutOfRange { index: usize, n_features: usize },
    #[error("classifier has no classes")]
    NoClasses,
}

/// Fitted decision function over a sparse feature row.
pub trait LabelClassifier: Send + Sync {
    /// Shape checks; `predict` may assume these hold.
    fn validate(&self) -> Result<(), String>;
    fn predict(&self, features: &[(usize, f64)]) -> Result<Label, ClassifyError>;
    fn classes(&self) -> &[Label];
    fn n_features(&self) -> usize;
}

/// One-vs-rest linear model: `score[k] = intercept[k] + coef[k] . x`.
///
/// A two-class model may carry a single coefficient row, in which case a
/// positive score selects `classes[1]`.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct LinearClassifier {
    pub classes: Vec<Label>,
    pub coef: Vec<Vec<f64>>,
    pub intercept: Vec<f64>,
}

impl LinearClassifier {
    fn is_binary(&self) -> bool {
        self.classes.len() == 2 && self.coef.len() == 1
    }

    /// Raw decision values, one per coefficient row.
    pub fn decision_function(&self, features: &[(usize, f64)]) -> Result<Vec<f64>, ClassifyError> {
        let n_features = self.n_features();
        let mut scores = self.intercept.clone();
        for &(index, value) in features {
            if index >= n_features {
                return Err(ClassifyError::FeatureOutOfRange { index, n_features });
            }
            for (score, row) in scores.iter_mut().zip(&self.coef) {
                let weight = row.get(index).ok_or(ClassifyError::FeatureOutOfRange {
                    index,
                    n_features: row.len(),
                })?;
                *score += weight * value;
            }
        }
        Ok(scores)
    }
}

impl LabelClassifier for LinearClassifier {
    fn validate(&self) -> Result<(), String> {
        if self.classes.is_empty() {
            return Err("no classes".to_string());
        }
        for (i, c) in self.classes.iter().enumerate() {
            if self.classes[..i].contains(c) {
                return Err(format!("class {c} listed twice"));
            }
        }

        let expected_rows = if self.is_binary() { 1 } else { self.classes.len() };
        if self.coef.len() != expected_rows {
            return Err(format!(
                "{} classes need {expected_rows} coefficient rows, found {}",
                self.classes.len(),
                self.coef.len()
            ));
        }
        if self.intercept.len() != expected_rows {
            return Err(format!(
                "{expected_rows} coefficient rows need {expected_rows} intercepts, found {}",
                self.intercept.len()
            ));
        }

        let width = self.n_features();
        if let Some(row) = self.coef.iter().position(|r| r.len() != width) {
            return Err(format!("coefficient row {row} has {} features, expected {width}", self.coef[row].len()));
        }
        if self.coef.iter().flatten().chain(&self.intercept).any(|w| !w.is_finite()) {
            return Err("non-finite weight".to_string());
        }
        Ok(())
    }

    fn predict(&self, features: &[(usize, f64)]) -> Result<Label, ClassifyError> {
        let scores = self.decision_function(features)?;

        if self.is_binary() {
            let score = scores.first().ok_or(ClassifyError::NoClasses)?;
            let idx = if *score > 0.0 { 1 } else { 0 };
            return self.classes.get(idx).copied().ok_or(ClassifyError::NoClasses);
        }

        // first maximum wins on ties
        let mut best: Option<(usize, f64)> = None;
        for (i, &s) in scores.iter().enumerate() {
            if best.map_or(true, |(_, b)| s > b) {
                best = Some((i, s));
            }
        }
        let (idx, _) = best.ok_or(ClassifyError::NoClasses)?;
        self.classes.get(idx).copied().ok_or(ClassifyError::NoClasses)
    }

    fn classes(&self) -> &[Label] {
        &self.classes
    }

    fn n_features(&self) -> usize {
        self.coef.first().map_or(0, Vec::len)
    }
}
