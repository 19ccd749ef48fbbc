use std::sync::Arc;

use anyhow::{Context, Result};
use textmodel::SentimentModel;
use tracing::info;

use review_dashboard::{config::AppConfig, router, state::AppState};

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    let cfg = AppConfig::from_env()?;

    // --- Artifacts (fail fast) ---
    let model = SentimentModel::load(&cfg.model_path, &cfg.vectorizer_path).with_context(|| {
        format!(
            "Failed to load sentiment artifacts (model {}, vectorizer {})",
            cfg.model_path.display(),
            cfg.vectorizer_path.display()
        )
    })?;
    let info = model.info();
    info!(
        manifest = %hex::encode(info.manifest_hash),
        classes = ?info.classes,
        n_features = info.n_features,
        "artifacts loaded"
    );

    let app_state = Arc::new(AppState::new(model, cfg.clone()).context("Failed to compile templates")?);
    let app = router(app_state);

    let addr = &cfg.bind_addr;
    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("Failed to bind {addr}"))?;
    info!("dashboard listening on http://{addr}");
    axum::serve(listener, app).await.context("Server error")?;

    Ok(())
}
