use std::sync::Arc;

use crate::auth::IdentityVerifier;
use crate::config::{AppConfig, CorsConfig};
use crate::database::DocumentStore;
use crate::filter::{FilterError, Pagination};
use crate::repository::{
    CauseRepository, GuiverRepository, ProductRepository, StoreCauseRepository, StoreGuiverRepository,
    StoreProductRepository,
};

/// Dependencies shared by every request, built once at startup.
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<AppConfig>,
    pub guivers: Arc<dyn GuiverRepository>,
    pub causes: Arc<dyn CauseRepository>,
    pub products: Arc<dyn ProductRepository>,
    pub identity: Arc<dyn IdentityVerifier>,
}

impl AppState {
    pub fn new(config: AppConfig, store: Arc<dyn DocumentStore>, identity: Arc<dyn IdentityVerifier>) -> Self {
        Self {
            config: Arc::new(config),
            guivers: Arc::new(StoreGuiverRepository::new(store.clone())),
            causes: Arc::new(StoreCauseRepository::new(store.clone())),
            products: Arc::new(StoreProductRepository::new(store)),
            identity,
        }
    }

    pub fn cors(&self) -> Arc<CorsConfig> {
        Arc::new(self.config.cors.clone())
    }

    /// `page` and `limit` query values under the configured page sizes.
    pub fn pagination(&self, page: Option<&str>, limit: Option<&str>) -> Result<Pagination, FilterError> {
        Pagination::parse(
            page,
            limit,
            self.config.pagination.default_page_size,
            self.config.pagination.max_page_size,
        )
    }
}
