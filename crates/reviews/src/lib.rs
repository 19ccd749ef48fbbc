//! Review batches: reading uploads, classifying rows and aggregating the
//! outcome into a sentiment report.

pub mod adapter;
pub mod batch;
pub mod aggregate;
pub mod recommendation;

pub use adapter::*;
pub use batch::*;
pub use aggregate::*;
pub use recommendation::*;

use textmodel::{ClassifyError, SentimentModel};
use thiserror::Error;

#[derive(Debug, Error, PartialEq)]
pub enum AnalyzeError {
    #[error(transparent)]
    Classify(#[from] ClassifyError),
    #[error(transparent)]
    Aggregate(#[from] AggregateError),
}

/// Classifies every review in `batch` and aggregates the labels.
pub fn analyze(model: &SentimentModel, batch: &ReviewBatch) -> Result<AggregateReport, AnalyzeError> {
    let results = classify_batch(model, batch)?;
    Ok(aggregate(&results, batch.dropped_rows())?)
}
