use std::sync::Arc;

use crate::application::DocumentService;
use crate::domain::ports::DocumentStore;
use crate::infrastructure::Config;

#[derive(Clone)]
pub struct AppState {
    pub document_service: Arc<DocumentService>,
    pub config: Arc<Config>,
}

impl AppState {
    pub fn new(store: Arc<dyn DocumentStore>, config: Config) -> Self {
        Self {
            document_service: Arc::new(DocumentService::new(store)),
            config: Arc::new(config),
        }
    }
}
