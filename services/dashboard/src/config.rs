use anyhow::{bail, Context, Result};
use std::path::PathBuf;

#[derive(Clone, Debug)]
pub struct AppConfig {
    pub model_path: PathBuf,
    pub vectorizer_path: PathBuf,

    pub bind_addr: String,
    pub max_upload_bytes: usize,
    pub cors_permissive: bool,
}

impl AppConfig {
    pub fn from_env() -> Result<Self> {
        let model_path = std::env::var("SENTIMENT_MODEL_PATH")
            .unwrap_or_else(|_| "final_sentiment_model.bin".to_string())
            .into();
        let vectorizer_path = std::env::var("SENTIMENT_VECTORIZER_PATH")
            .unwrap_or_else(|_| "tfidf_vectorizer.bin".to_string())
            .into();

        let bind_addr = std::env::var("DASHBOARD_BIND_ADDR").unwrap_or_else(|_| "0.0.0.0:8501".to_string());

        let max_upload_bytes = match std::env::var("DASHBOARD_MAX_UPLOAD_BYTES") {
            Ok(v) => v
                .parse::<usize>()
                .with_context(|| format!("DASHBOARD_MAX_UPLOAD_BYTES is not a byte count: {v:?}"))?,
            Err(_) => 10 * 1024 * 1024,
        };
        let cors_permissive = std::env::var("DASHBOARD_CORS_PERMISSIVE")
            .ok()
            .map(|v| matches!(v.as_str(), "1" | "true" | "TRUE" | "yes" | "YES"))
            .unwrap_or(true);

        // fail fast, fail loud
        if max_upload_bytes == 0 {
            bail!("DASHBOARD_MAX_UPLOAD_BYTES must be greater than zero");
        }

        Ok(Self {
            model_path,
            vectorizer_path,
            bind_addr,
            max_upload_bytes,
            cors_permissive,
        })
    }
}
