//! Application state shared by all handlers.

use crate::services::captcha::CaptchaVerifier;
use crate::services::catalog::CatalogService;
use crate::services::upload::UploadService;
use gitrelay_core::Config;
use gitrelay_storage::ContentStore;
use std::sync::Arc;

#[derive(Clone)]
pub struct AppState {
    pub config: Arc<Config>,
    pub store: Arc<dyn ContentStore>,
    pub uploads: UploadService,
    pub catalog: CatalogService,
    /// `None` when the CAPTCHA gate is disabled
    pub captcha: Option<Arc<dyn CaptchaVerifier>>,
}

impl AppState {
    /// Wire services over one store and configuration.
    pub fn new(
        config: Arc<Config>,
        store: Arc<dyn ContentStore>,
        captcha: Option<Arc<dyn CaptchaVerifier>>,
    ) -> Self {
        Self {
            uploads: UploadService::new(config.clone(), store.clone()),
            catalog: CatalogService::new(config.clone(), store.clone()),
            config,
            store,
            captcha,
        }
    }
}
