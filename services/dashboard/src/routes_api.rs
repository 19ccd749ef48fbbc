use axum::{
    extract::{Multipart, State},
    http::StatusCode,
    Json,
};
use reviews::AggregateReport;
use serde::{Deserialize, Serialize};
use textmodel::{Label, ModelInfo};
use uuid::Uuid;

use crate::analysis::{analyze_upload, classify_text, read_upload, AnalysisError};
use crate::render::wordcloud::word_frequencies;
use crate::state::SharedState;

const TOP_WORDS: usize = 20;

#[derive(Serialize)]
pub struct ApiError {
    pub error: String,
    pub message: String,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub details: Vec<String>,
}

impl From<&AnalysisError> for ApiError {
    fn from(e: &AnalysisError) -> Self {
        ApiError {
            error: e.title().to_string(),
            message: e.message(),
            details: e.details(),
        }
    }
}

type ApiResult<T> = Result<Json<T>, (StatusCode, Json<ApiError>)>;

fn reject(e: AnalysisError) -> (StatusCode, Json<ApiError>) {
    (e.status(), Json(ApiError::from(&e)))
}

#[derive(Serialize)]
pub struct TopWords {
    pub positive: Vec<(String, usize)>,
    pub negative: Vec<(String, usize)>,
}

#[derive(Serialize)]
pub struct BatchAnalysisResponse {
    pub analysis_id: Uuid,
    pub strategy: &'static str,
    pub recommendation_message: &'static str,
    pub top_words: TopWords,
    pub report: AggregateReport,
}

pub async fn upload(State(state): State<SharedState>, mp: Multipart) -> ApiResult<BatchAnalysisResponse> {
    let data = read_upload(mp).await.map_err(reject)?;
    let analysis = analyze_upload(&state, data).await.map_err(reject)?;

    let report = analysis.report;
    Ok(Json(BatchAnalysisResponse {
        analysis_id: analysis.analysis_id,
        strategy: analysis.strategy,
        recommendation_message: report.recommendation.message(),
        top_words: TopWords {
            positive: word_frequencies(&report.positive_text, TOP_WORDS),
            negative: word_frequencies(&report.negative_text, TOP_WORDS),
        },
        report,
    }))
}

#[derive(Deserialize)]
pub struct ClassifyReq {
    pub review: String,
}

#[derive(Serialize)]
pub struct ClassifyResp {
    pub label: Label,
}

pub async fn classify(
    State(state): State<SharedState>,
    Json(req): Json<ClassifyReq>,
) -> ApiResult<ClassifyResp> {
    let label = classify_text(&state, &req.review).map_err(reject)?;
    Ok(Json(ClassifyResp { label }))
}

pub async fn model_info(State(state): State<SharedState>) -> Json<ModelInfo> {
    Json(state.model.info().clone())
}
