use axum::{
    extract::{Multipart, State},
    http::StatusCode,
    response::Html,
    Form,
};
use serde::Deserialize;
use tracing::error;

use crate::analysis::{analyze_upload, classify_text, read_upload, AnalysisError};
use crate::state::SharedState;

type PageResult = Result<Html<String>, (StatusCode, Html<String>)>;

#[derive(Deserialize)]
pub struct ReviewForm {
    #[serde(default)]
    pub review: String,
}

pub async fn index(State(state): State<SharedState>) -> PageResult {
    state
        .renderer
        .index(state.model.info())
        .map(Html)
        .map_err(render_failure)
}

pub async fn upload(State(state): State<SharedState>, mp: Multipart) -> PageResult {
    let data = read_upload(mp).await.map_err(|e| error_page(&state, &e))?;
    let analysis = analyze_upload(&state, data).await.map_err(|e| error_page(&state, &e))?;

    let st = state.clone();
    let page = tokio::task::spawn_blocking(move || {
        st.renderer
            .report(analysis.analysis_id, analysis.strategy, &analysis.report, st.model.info())
    })
    .await
    .map_err(|e| error_page(&state, &AnalysisError::Task(e.to_string())))?;

    page.map(Html).map_err(render_failure)
}

pub async fn classify_text_form(
    State(state): State<SharedState>,
    Form(form): Form<ReviewForm>,
) -> PageResult {
    let label = classify_text(&state, &form.review).map_err(|e| error_page(&state, &e))?;
    state
        .renderer
        .label(&form.review, label, state.model.info())
        .map(Html)
        .map_err(render_failure)
}

fn error_page(state: &SharedState, err: &AnalysisError) -> (StatusCode, Html<String>) {
    let status = err.status();
    match state.renderer.error(err.title(), &err.message(), &err.details()) {
        Ok(page) => (status, Html(page)),
        Err(e) => render_failure(e),
    }
}

fn render_failure(e: minijinja::Error) -> (StatusCode, Html<String>) {
    error!(error = %e, "template rendering failed");
    (
        StatusCode::INTERNAL_SERVER_ERROR,
        Html("<h1>Internal error</h1><p>The page could not be rendered.</p>".to_string()),
    )
}
