use std::time::Instant;

use axum::{extract::Multipart, http::StatusCode};
use bytes::Bytes;
use reviews::{AggregateError, AggregateReport, AnalyzeError, ParseError};
use textmodel::{ClassifyError, Label};
use thiserror::Error;
use tracing::{info, warn};
use uuid::Uuid;

use crate::state::SharedState;

#[derive(Debug, Error)]
pub enum AnalysisError {
    #[error("missing multipart field \"file\"")]
    MissingFile,
    #[error("could not read upload: {0}")]
    Multipart(String),
    #[error(transparent)]
    Parse(#[from] ParseError),
    #[error(transparent)]
    Analyze(#[from] AnalyzeError),
    #[error(transparent)]
    Classify(#[from] ClassifyError),
    #[error("analysis task failed: {0}")]
    Task(String),
}

impl AnalysisError {
    pub fn status(&self) -> StatusCode {
        match self {
            AnalysisError::MissingFile | AnalysisError::Multipart(_) | AnalysisError::Parse(_) => {
                StatusCode::BAD_REQUEST
            }
            AnalysisError::Analyze(AnalyzeError::Aggregate(AggregateError::NoData { .. })) => {
                StatusCode::UNPROCESSABLE_ENTITY
            }
            AnalysisError::Analyze(AnalyzeError::Classify(_))
            | AnalysisError::Classify(_)
            | AnalysisError::Task(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Short headline shown to the user.
    pub fn title(&self) -> &'static str {
        match self {
            AnalysisError::MissingFile | AnalysisError::Multipart(_) => "Upload failed",
            AnalysisError::Parse(_) => "Unrecognized file format",
            AnalysisError::Analyze(AnalyzeError::Aggregate(_)) => "No data",
            _ => "Analysis failed",
        }
    }

    /// User-facing explanation; parse failures state the expected format.
    pub fn message(&self) -> String {
        match self {
            AnalysisError::Parse(e) => e.expected_format().to_string(),
            other => other.to_string(),
        }
    }

    pub fn details(&self) -> Vec<String> {
        match self {
            AnalysisError::Parse(e) => e
                .attempts
                .iter()
                .map(|a| format!("{} parse: {}", a.strategy, a.reason))
                .collect(),
            _ => vec![],
        }
    }
}

#[derive(Clone, Debug)]
pub struct UploadAnalysis {
    pub analysis_id: Uuid,
    pub strategy: &'static str,
    pub report: AggregateReport,
}

/// Pulls the `file` field out of a multipart body; other fields are ignored.
pub async fn read_upload(mut mp: Multipart) -> Result<Bytes, AnalysisError> {
    let mut file_bytes: Option<Bytes> = None;

    while let Some(field) = mp
        .next_field()
        .await
        .map_err(|e| AnalysisError::Multipart(e.to_string()))?
    {
        if field.name() == Some("file") {
            file_bytes = Some(
                field
                    .bytes()
                    .await
                    .map_err(|e| AnalysisError::Multipart(e.to_string()))?,
            );
        }
    }

    file_bytes.ok_or(AnalysisError::MissingFile)
}

/// Parse, classify and aggregate one upload off the async runtime.
pub async fn analyze_upload(state: &SharedState, data: Bytes) -> Result<UploadAnalysis, AnalysisError> {
    let analysis_id = Uuid::new_v4();
    let started = Instant::now();
    let size = data.len();

    let st = state.clone();
    let outcome = tokio::task::spawn_blocking(move || -> Result<UploadAnalysis, AnalysisError> {
        let parsed = st.adapter.parse(&data)?;
        let report = reviews::analyze(&st.model, &parsed.batch)?;
        Ok(UploadAnalysis {
            analysis_id,
            strategy: parsed.strategy,
            report,
        })
    })
    .await
    .map_err(|e| AnalysisError::Task(e.to_string()))?;

    let elapsed_ms = started.elapsed().as_millis() as u64;
    match &outcome {
        Ok(a) => info!(
            %analysis_id,
            bytes = size,
            strategy = a.strategy,
            rows = a.report.total_rows,
            dropped = a.report.dropped_rows,
            avg_stars = a.report.avg_stars,
            elapsed_ms,
            "upload analyzed"
        ),
        Err(e) => warn!(%analysis_id, bytes = size, error = %e, elapsed_ms, "upload rejected"),
    }
    outcome
}

pub fn classify_text(state: &SharedState, text: &str) -> Result<Label, AnalysisError> {
    let label = state.model.classify(text)?;
    info!(chars = text.chars().count(), %label, "manual review classified");
    Ok(label)
}
