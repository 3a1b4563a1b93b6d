// Application state and configuration
use std::sync::Arc;

use crate::{
    app_config::AppConfig,
    db::Store,
    services::{AffiliateService, CharacterCatalog},
};

// Application state shared across handlers
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<AppConfig>,
    pub store: Arc<dyn Store>,
    pub catalog: Arc<CharacterCatalog>,
}

impl AppState {
    pub fn new(config: AppConfig, store: Arc<dyn Store>, catalog: CharacterCatalog) -> Self {
        Self {
            config: Arc::new(config),
            store,
            catalog: Arc::new(catalog),
        }
    }

    pub fn affiliate_service(&self) -> AffiliateService {
        AffiliateService::new(self.store.clone())
    }
}
