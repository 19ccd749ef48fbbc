use std::sync::Arc;

use reviews::TableAdapter;
use textmodel::SentimentModel;

use crate::config::AppConfig;
use crate::render::Renderer;

pub type SharedState = Arc<AppState>;

/// Everything a request needs. Built once at startup, never mutated.
pub struct AppState {
    pub model: SentimentModel,
    pub adapter: TableAdapter,
    pub renderer: Renderer,
    pub cfg: AppConfig,
}

impl AppState {
    pub fn new(model: SentimentModel, cfg: AppConfig) -> Result<Self, minijinja::Error> {
        Ok(Self {
            model,
            adapter: TableAdapter::default(),
            renderer: Renderer::new()?,
            cfg,
        })
    }
}
