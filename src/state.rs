use crate::config::Config;
use crate::controller::ClientSettings;
use crate::images::ImageCatalog;
use crate::storage::VoteLog;
use crate::ui::render_index;
use std::sync::Arc;

#[derive(Clone)]
pub struct AppState {
    pub catalog: Arc<ImageCatalog>,
    pub votes: Arc<VoteLog>,
    pub page: Arc<str>,
}

impl AppState {
    pub fn new(catalog: ImageCatalog, votes: VoteLog, settings: &ClientSettings) -> Self {
        Self {
            catalog: Arc::new(catalog),
            votes: Arc::new(votes),
            page: render_index(settings).into(),
        }
    }

    pub fn from_config(config: &Config) -> Self {
        Self::new(
            ImageCatalog::new(config.image_source),
            VoteLog::new(config.vote_log_path.clone()),
            &ClientSettings::new(config.popup_mode, config.failure_feedback),
        )
    }
}
